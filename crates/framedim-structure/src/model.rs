//! Crystal structure records as stored in a structure library.

use serde::{Deserialize, Serialize};

use crate::cell::{CellBasis, UnitCell};
use crate::components::{find_components, heaviest, Component};
use crate::elements::is_hydrogen;
use crate::error::StructureError;
use crate::unit::{PolymericUnit, UnitAtom};

/// Largest lattice image component a bond may carry.
pub const MAX_BOND_IMAGE: i32 = 1024;

/// One atom of the asymmetric content of the cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    /// Site label, e.g. `Cu1`. Filled as `<element><index+1>` when absent.
    #[serde(default)]
    pub label: String,
    pub element: String,
    /// Fractional coordinates, `None` when the site was never located.
    #[serde(default)]
    pub fract: Option<[f64; 3]>,
}

/// A bond from `atoms[0]` in cell `0` to `atoms[1]` in cell `image`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bond {
    pub atoms: [usize; 2],
    #[serde(default)]
    pub image: [i32; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrystalStructure {
    #[serde(default)]
    pub identifier: String,
    pub cell: UnitCell,
    pub atoms: Vec<Atom>,
    #[serde(default)]
    pub bonds: Vec<Bond>,
}

impl CrystalStructure {
    /// Parse a JSON record. `identifier` is used when the record has none.
    pub fn from_json(identifier: &str, text: &str) -> Result<Self, StructureError> {
        let mut structure: Self =
            serde_json::from_str(text).map_err(|source| StructureError::Parse {
                identifier: identifier.to_string(),
                source,
            })?;
        if structure.identifier.trim().is_empty() {
            structure.identifier = identifier.to_string();
        }
        for (i, atom) in structure.atoms.iter_mut().enumerate() {
            if atom.label.is_empty() {
                atom.label = format!("{}{}", atom.element, i + 1);
            }
        }
        structure.validate()?;
        Ok(structure)
    }

    /// Check the cell, that every bond references existing atoms and that
    /// bond images stay within [`MAX_BOND_IMAGE`] cells.
    pub fn validate(&self) -> Result<(), StructureError> {
        self.cell.basis()?;
        let n = self.atoms.len();
        for (index, bond) in self.bonds.iter().enumerate() {
            if let Some(&atom) = bond.atoms.iter().find(|&&a| a >= n) {
                return Err(StructureError::InvalidBond { index, atoms: n, atom });
            }
            if bond.image.iter().any(|c| c.unsigned_abs() > MAX_BOND_IMAGE.unsigned_abs()) {
                return Err(StructureError::BondImageOutOfRange {
                    index,
                    image: bond.image,
                    limit: MAX_BOND_IMAGE,
                });
            }
        }
        Ok(())
    }

    /// Connected components of the bond graph.
    pub fn components(&self) -> Result<Vec<Component>, StructureError> {
        find_components(self)
    }

    /// Number of components that repeat periodically.
    pub fn polymeric_components(&self) -> Result<usize, StructureError> {
        Ok(self.components()?.iter().filter(|c| c.is_polymeric()).count())
    }

    /// Component with the greatest mass; ties go to the first found.
    pub fn heaviest_component(&self) -> Result<Option<Component>, StructureError> {
        Ok(heaviest(self.components()?))
    }

    /// Keep only `component`'s atoms, unwrapped into Cartesian space, with
    /// hydrogen and deuterium removed.
    pub fn restrict_to(&self, component: &Component) -> Result<PolymericUnit, StructureError> {
        let basis = self.cell.basis()?;
        let atoms = component
            .atoms
            .iter()
            .zip(&component.offsets)
            .filter_map(|(&i, &offset)| {
                let atom = self.atoms.get(i)?;
                if is_hydrogen(&atom.element) {
                    return None;
                }
                Some(UnitAtom {
                    label: atom.label.clone(),
                    element: atom.element.clone(),
                    position: atom.fract.map(|f| unwrap_position(&basis, f, offset)),
                })
            })
            .collect();

        Ok(PolymericUnit {
            identifier: self.identifier.clone(),
            atoms,
            basis,
            translations: component.translations.clone(),
        })
    }
}

fn unwrap_position(basis: &CellBasis, f: [f64; 3], offset: [i32; 3]) -> [f64; 3] {
    basis.to_cartesian([
        f[0] + f64::from(offset[0]),
        f[1] + f64::from(offset[1]),
        f[2] + f64::from(offset[2]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHAIN: &str = r#"{
        "identifier": "CUCHAIN",
        "cell": { "lengths": [5.0, 6.0, 7.0], "angles": [90.0, 90.0, 90.0] },
        "atoms": [
            { "label": "Cu1", "element": "Cu", "fract": [0.0, 0.0, 0.0] },
            { "label": "O1",  "element": "O",  "fract": [0.5, 0.0, 0.0] },
            { "label": "H1",  "element": "H",  "fract": null }
        ],
        "bonds": [
            { "atoms": [0, 1] },
            { "atoms": [1, 0], "image": [1, 0, 0] },
            { "atoms": [1, 2] }
        ]
    }"#;

    #[test]
    fn parses_example_record() {
        let s = CrystalStructure::from_json("ignored", CHAIN).unwrap();
        assert_eq!(s.identifier, "CUCHAIN");
        assert_eq!(s.atoms.len(), 3);
        assert_eq!(s.atoms[2].fract, None);
        assert_eq!(s.bonds[0].image, [0, 0, 0]);
        assert_eq!(s.bonds[1].image, [1, 0, 0]);
    }

    #[test]
    fn identifier_and_labels_default() {
        let text = r#"{
            "cell": { "lengths": [4.0, 4.0, 4.0], "angles": [90.0, 90.0, 90.0] },
            "atoms": [ { "element": "Zn", "fract": [0.0, 0.0, 0.0] } ]
        }"#;
        let s = CrystalStructure::from_json("ABCDEF", text).unwrap();
        assert_eq!(s.identifier, "ABCDEF");
        assert_eq!(s.atoms[0].label, "Zn1");
        assert!(s.bonds.is_empty());
    }

    #[test]
    fn out_of_range_bond_is_rejected() {
        let text = r#"{
            "cell": { "lengths": [4.0, 4.0, 4.0], "angles": [90.0, 90.0, 90.0] },
            "atoms": [ { "element": "Zn", "fract": [0.0, 0.0, 0.0] } ],
            "bonds": [ { "atoms": [0, 3] } ]
        }"#;
        let err = CrystalStructure::from_json("BAD", text).unwrap_err();
        assert!(matches!(err, StructureError::InvalidBond { index: 0, atom: 3, atoms: 1 }));
    }

    #[test]
    fn far_bond_image_is_rejected() {
        let text = r#"{
            "cell": { "lengths": [4.0, 4.0, 4.0], "angles": [90.0, 90.0, 90.0] },
            "atoms": [ { "element": "Zn", "fract": [0.0, 0.0, 0.0] } ],
            "bonds": [ { "atoms": [0, 0], "image": [1, 2147483647, 0] } ]
        }"#;
        let err = CrystalStructure::from_json("FAR", text).unwrap_err();
        assert!(matches!(err, StructureError::BondImageOutOfRange { index: 0, limit: 1024, .. }));

        let edge = text.replace("2147483647", "-1024");
        assert!(CrystalStructure::from_json("EDGE", &edge).is_ok());
    }

    #[test]
    fn bad_cell_is_rejected() {
        let text = r#"{
            "cell": { "lengths": [4.0, -1.0, 4.0], "angles": [90.0, 90.0, 90.0] },
            "atoms": []
        }"#;
        assert!(matches!(
            CrystalStructure::from_json("BAD", text),
            Err(StructureError::InvalidCell { .. })
        ));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = CrystalStructure::from_json("BROKEN", "{ not json").unwrap_err();
        assert!(matches!(err, StructureError::Parse { ref identifier, .. } if identifier == "BROKEN"));
    }

    #[test]
    fn restrict_strips_hydrogen_and_unwraps() {
        let s = CrystalStructure::from_json("x", CHAIN).unwrap();
        let component = s.heaviest_component().unwrap().unwrap();
        assert!(component.is_polymeric());

        let unit = s.restrict_to(&component).unwrap();
        assert_eq!(unit.identifier, "CUCHAIN");
        assert_eq!(unit.atoms.len(), 2);
        assert!(unit.atoms.iter().all(|a| a.element != "H"));
        assert_eq!(unit.atoms[0].position, Some([0.0, 0.0, 0.0]));
        assert_eq!(unit.atoms[1].position, Some([2.5, 0.0, 0.0]));
        assert_eq!(unit.translations, vec![[1, 0, 0]]);
    }
}
