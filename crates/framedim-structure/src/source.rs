//! Where structures come from.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StructureError;
use crate::model::CrystalStructure;

/// Lookup of crystal structures by identifier.
pub trait StructureSource {
    /// # Errors
    ///
    /// [`StructureError::NotFound`] when no record exists for `identifier`.
    fn fetch(&self, identifier: &str) -> Result<CrystalStructure, StructureError>;
}

impl<S: StructureSource + ?Sized> StructureSource for &S {
    fn fetch(&self, identifier: &str) -> Result<CrystalStructure, StructureError> {
        (**self).fetch(identifier)
    }
}

/// Directory of `<IDENTIFIER>.json` records.
#[derive(Debug, Clone)]
pub struct JsonDirectorySource {
    root: PathBuf,
}

impl JsonDirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Record path for `identifier`. Identifiers may not contain path
    /// components.
    pub fn path_for(&self, identifier: &str) -> Result<PathBuf, StructureError> {
        let valid = !identifier.is_empty()
            && identifier != "."
            && identifier != ".."
            && !identifier.contains(|c| c == '/' || c == '\\');
        if !valid {
            return Err(StructureError::InvalidIdentifier { identifier: identifier.to_string() });
        }
        Ok(self.root.join(format!("{identifier}.json")))
    }
}

impl StructureSource for JsonDirectorySource {
    fn fetch(&self, identifier: &str) -> Result<CrystalStructure, StructureError> {
        let path = self.path_for(identifier)?;
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StructureError::NotFound { identifier: identifier.to_string() });
            }
            Err(source) => return Err(StructureError::Io { path, source }),
        };
        debug!(identifier, path = %path.display(), bytes = text.len(), "loaded structure record");
        CrystalStructure::from_json(identifier, &text)
    }
}

/// In-memory structures, keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    structures: HashMap<String, CrystalStructure>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, structure: CrystalStructure) {
        self.structures.insert(structure.identifier.clone(), structure);
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }
}

impl FromIterator<CrystalStructure> for MemorySource {
    fn from_iter<I: IntoIterator<Item = CrystalStructure>>(iter: I) -> Self {
        let mut source = Self::new();
        for s in iter {
            source.insert(s);
        }
        source
    }
}

impl StructureSource for MemorySource {
    fn fetch(&self, identifier: &str) -> Result<CrystalStructure, StructureError> {
        self.structures
            .get(identifier)
            .cloned()
            .ok_or_else(|| StructureError::NotFound { identifier: identifier.to_string() })
    }
}
