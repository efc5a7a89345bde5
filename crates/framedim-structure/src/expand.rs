//! Lattice-image growth of a [`PolymericUnit`].
//!
//! ```text
//! images₀ = {0}
//! frontierₖ = { g ± t | g ∈ frontierₖ₋₁, t ∈ translations } \ imagesₖ₋₁
//! imagesₖ = imagesₖ₋₁ ∪ frontierₖ
//! ```
//!
//! Every atom of every image lands in the output cloud.

use std::collections::HashSet;

use framedim_classify::{ExpansionError, NetworkExpansionService};
use framedim_geometry::PointCloud;
use tracing::trace;

use crate::unit::PolymericUnit;

/// Default ceiling on the number of atoms in one expansion.
pub const DEFAULT_MAX_ATOMS: usize = 2_000_000;

/// Grows a unit outward along its translations.
#[derive(Debug, Clone, Copy)]
pub struct PolymerExpander {
    pub max_atoms: usize,
}

impl Default for PolymerExpander {
    fn default() -> Self {
        Self { max_atoms: DEFAULT_MAX_ATOMS }
    }
}

impl PolymerExpander {
    pub fn new(max_atoms: usize) -> Self {
        Self { max_atoms }
    }

    /// Integer lattice images reached after `cycles` growth steps.
    ///
    /// Fails once `images × atoms_per_image` would exceed `max_atoms`, or
    /// with [`ExpansionError::Degenerate`] if an image leaves the `i32` range.
    pub fn lattice_images(
        &self,
        translations: &[[i32; 3]],
        cycles: u32,
        atoms_per_image: usize,
    ) -> Result<Vec<[i32; 3]>, ExpansionError> {
        let mut images = vec![[0i32; 3]];
        let mut seen: HashSet<[i32; 3]> = HashSet::from([[0; 3]]);
        let mut frontier = vec![[0i32; 3]];

        for _ in 0..cycles {
            if frontier.is_empty() {
                break;
            }
            let mut next = Vec::new();
            for g in &frontier {
                for t in translations {
                    for cand in [step(g, t, i32::checked_add)?, step(g, t, i32::checked_sub)?] {
                        if seen.insert(cand) {
                            next.push(cand);
                        }
                    }
                }
            }
            images.extend_from_slice(&next);

            let atoms = images.len().saturating_mul(atoms_per_image);
            if atoms > self.max_atoms {
                return Err(ExpansionError::AtomLimitExceeded { atoms, limit: self.max_atoms });
            }
            frontier = next;
        }
        Ok(images)
    }
}

fn step(
    g: &[i32; 3],
    t: &[i32; 3],
    op: fn(i32, i32) -> Option<i32>,
) -> Result<[i32; 3], ExpansionError> {
    match (op(g[0], t[0]), op(g[1], t[1]), op(g[2], t[2])) {
        (Some(x), Some(y), Some(z)) => Ok([x, y, z]),
        _ => Err(ExpansionError::Degenerate {
            reason: format!("lattice image {g:?} ± {t:?} leaves the i32 range"),
        }),
    }
}

impl NetworkExpansionService for PolymerExpander {
    type Structure = PolymericUnit;

    fn expand(&self, unit: &PolymericUnit, cycles: u32) -> Result<PointCloud, ExpansionError> {
        if cycles == 0 {
            return Err(ExpansionError::ZeroCycles);
        }
        if unit.atoms.is_empty() {
            return Err(ExpansionError::EmptyUnit);
        }
        if let Some(label) = unit.first_missing_coordinates() {
            return Err(ExpansionError::MissingCoordinates { label: label.to_string() });
        }
        let motif: Vec<[f64; 3]> = unit.atoms.iter().filter_map(|a| a.position).collect();
        if motif.len() > self.max_atoms {
            return Err(ExpansionError::AtomLimitExceeded {
                atoms: motif.len(),
                limit: self.max_atoms,
            });
        }
        if let Some(a) = unit
            .atoms
            .iter()
            .find(|a| a.position.is_some_and(|p| !p.iter().all(|c| c.is_finite())))
        {
            return Err(ExpansionError::Degenerate {
                reason: format!("atom {} has non-finite coordinates", a.label),
            });
        }

        let images = self.lattice_images(&unit.translations, cycles, motif.len())?;

        let mut cloud = PointCloud::with_capacity(images.len() * motif.len());
        for &n in &images {
            let shift = unit.basis.translation(n);
            cloud.extend(
                motif
                    .iter()
                    .map(|p| [p[0] + shift[0], p[1] + shift[1], p[2] + shift[2]]),
            );
        }

        trace!(
            identifier = %unit.identifier,
            cycles,
            images = images.len(),
            atoms = cloud.len(),
            "expanded polymeric unit"
        );
        Ok(cloud)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::UnitCell;
    use crate::unit::UnitAtom;

    fn unit(translations: Vec<[i32; 3]>) -> PolymericUnit {
        PolymericUnit {
            identifier: "U".into(),
            atoms: vec![
                UnitAtom { label: "Cu1".into(), element: "Cu".into(), position: Some([0.0; 3]) },
                UnitAtom { label: "O1".into(), element: "O".into(), position: Some([1.0, 0.5, 0.0]) },
            ],
            basis: UnitCell::cubic(4.0).basis().unwrap(),
            translations,
        }
    }

    // ── image growth ───────────────────────────

    #[test]
    fn chain_grows_two_images_per_cycle() {
        let images = PolymerExpander::default().lattice_images(&[[1, 0, 0]], 4, 1).unwrap();
        assert_eq!(images.len(), 9);
        assert!(images.contains(&[-4, 0, 0]) && images.contains(&[4, 0, 0]));
    }

    #[test]
    fn sheet_grows_as_diamond() {
        let images = PolymerExpander::default()
            .lattice_images(&[[1, 0, 0], [0, 1, 0]], 3, 1)
            .unwrap();
        // |i| + |j| ≤ K  →  2K² + 2K + 1
        assert_eq!(images.len(), 25);
    }

    #[test]
    fn no_translations_gives_single_image() {
        let images = PolymerExpander::default().lattice_images(&[], 7, 1).unwrap();
        assert_eq!(images, vec![[0, 0, 0]]);
    }

    #[test]
    fn huge_translation_is_degenerate_not_a_panic() {
        let err = PolymerExpander::default()
            .lattice_images(&[[i32::MAX, 0, 0]], 2, 1)
            .unwrap_err();
        assert!(matches!(err, ExpansionError::Degenerate { .. }));
    }

    // ── expansion ──────────────────────────────

    #[test]
    fn expansion_repeats_every_atom() {
        let cloud = PolymerExpander::default().expand(&unit(vec![[1, 0, 0]]), 2).unwrap();
        assert_eq!(cloud.len(), 5 * 2);
        assert!(cloud.iter().any(|p| *p == [-8.0, 0.0, 0.0]));
        assert!(cloud.iter().any(|p| *p == [9.0, 0.5, 0.0]));
    }

    #[test]
    fn zero_cycles_is_rejected() {
        let err = PolymerExpander::default().expand(&unit(vec![[1, 0, 0]]), 0).unwrap_err();
        assert_eq!(err, ExpansionError::ZeroCycles);
    }

    #[test]
    fn empty_unit_is_rejected() {
        let mut u = unit(vec![[1, 0, 0]]);
        u.atoms.clear();
        assert_eq!(PolymerExpander::default().expand(&u, 4), Err(ExpansionError::EmptyUnit));
    }

    #[test]
    fn missing_coordinates_name_the_atom() {
        let mut u = unit(vec![[1, 0, 0]]);
        u.atoms[1].position = None;
        assert_eq!(
            PolymerExpander::default().expand(&u, 4),
            Err(ExpansionError::MissingCoordinates { label: "O1".into() })
        );
    }

    #[test]
    fn atom_ceiling_is_enforced() {
        let err = PolymerExpander::new(100)
            .expand(&unit(vec![[1, 0, 0], [0, 1, 0], [0, 0, 1]]), 7)
            .unwrap_err();
        assert!(matches!(err, ExpansionError::AtomLimitExceeded { limit: 100, atoms } if atoms > 100));
    }
}
