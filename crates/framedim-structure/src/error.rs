//! Error types for structure loading and validation.

use std::path::PathBuf;

/// Errors raised while fetching or interpreting a crystal structure record.
#[derive(Debug, thiserror::Error)]
pub enum StructureError {
    /// No record exists for the identifier.
    #[error("structure '{identifier}' not found")]
    NotFound { identifier: String },

    /// The identifier cannot name a record (empty, or contains a path).
    #[error("invalid structure identifier '{identifier}'")]
    InvalidIdentifier { identifier: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse structure '{identifier}': {source}")]
    Parse {
        identifier: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid unit cell: {reason}")]
    InvalidCell { reason: String },

    /// A bond's lattice image lies further than [`MAX_BOND_IMAGE`] cells away.
    ///
    /// [`MAX_BOND_IMAGE`]: crate::model::MAX_BOND_IMAGE
    #[error("bond {index} has lattice image {image:?}, components are limited to ±{limit}")]
    BondImageOutOfRange { index: usize, image: [i32; 3], limit: i32 },

    /// Unwrapping placed an atom at a cell offset outside the `i32` range.
    #[error("cell offset of atom {atom} overflows")]
    OffsetOverflow { atom: usize },

    /// A bond references an atom index outside the atom list.
    #[error("bond {index} references atom {atom}, structure has {atoms} atoms")]
    InvalidBond { index: usize, atom: usize, atoms: usize },
}

impl StructureError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
