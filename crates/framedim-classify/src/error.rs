//! Error types for dimensionality classification.

use framedim_geometry::GeometryError;

use crate::expansion::ExpansionError;

/// Errors surfaced by [`DimensionalityClassifier`](crate::DimensionalityClassifier).
///
/// The classifier never recovers locally; every variant is a precondition
/// violation of the structure, the expansion service or the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    /// An expansion produced fewer than two atoms.
    #[error("insufficient data: expansion at {cycles} cycle(s) produced {points} atom(s), at least 2 are required")]
    InsufficientData { cycles: u32, points: usize },

    /// The expansion service could not grow the network.
    #[error("expansion at {cycles} cycle(s) failed: {source}")]
    Expansion {
        cycles: u32,
        #[source]
        source: ExpansionError,
    },

    /// Extent estimation failed for a reason other than missing points.
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("invalid classifier configuration: {0}")]
    InvalidConfig(String),
}

impl ClassifyError {
    /// `true` for [`ClassifyError::InsufficientData`].
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}
