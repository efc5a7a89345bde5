//! The repeating unit handed to the expander.

use serde::Serialize;

use crate::cell::CellBasis;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitAtom {
    pub label: String,
    pub element: String,
    /// Unwrapped Cartesian position, `None` if the site has no coordinates.
    pub position: Option<[f64; 3]>,
}

/// One polymeric component, unwrapped, hydrogens removed.
#[derive(Debug, Clone, PartialEq)]
pub struct PolymericUnit {
    pub identifier: String,
    pub atoms: Vec<UnitAtom>,
    pub basis: CellBasis,
    /// Integer lattice translations that map the unit onto its neighbours.
    pub translations: Vec<[i32; 3]>,
}

impl PolymericUnit {
    /// Cartesian translation generators.
    pub fn cartesian_translations(&self) -> Vec<[f64; 3]> {
        self.translations.iter().map(|&t| self.basis.translation(t)).collect()
    }

    /// Label of the first atom lacking coordinates.
    pub fn first_missing_coordinates(&self) -> Option<&str> {
        self.atoms
            .iter()
            .find(|a| a.position.is_none())
            .map(|a| a.label.as_str())
    }
}
