//! The network-expansion seam.
//!
//! Growing a polymeric unit by `K` repetition cycles is an external,
//! potentially expensive operation. The classifier only sees this trait, so
//! its logic can be exercised with synthetic point clouds.

use framedim_geometry::PointCloud;

/// Failure to produce a valid atom set from a structure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpansionError {
    #[error("repetition cycle count must be positive")]
    ZeroCycles,

    #[error("polymeric unit has no atoms")]
    EmptyUnit,

    /// Atoms without coordinates must be removed before expansion.
    #[error("atom '{label}' has no coordinates")]
    MissingCoordinates { label: String },

    #[error("expansion would produce {atoms} atoms, limit is {limit}")]
    AtomLimitExceeded { atoms: usize, limit: usize },

    #[error("degenerate geometry: {reason}")]
    Degenerate { reason: String },
}

/// Grows a structure's polymeric network outward by a number of cycles and
/// returns the Cartesian positions of every atom in the result.
pub trait NetworkExpansionService {
    type Structure: ?Sized;

    fn expand(&self, structure: &Self::Structure, cycles: u32) -> Result<PointCloud, ExpansionError>;
}

impl<S: NetworkExpansionService + ?Sized> NetworkExpansionService for &S {
    type Structure = S::Structure;

    fn expand(&self, structure: &Self::Structure, cycles: u32) -> Result<PointCloud, ExpansionError> {
        (**self).expand(structure, cycles)
    }
}
