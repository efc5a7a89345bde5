//! Connected components of a periodic bond graph.
//!
//! Each component is unwrapped by BFS from its lowest-index atom, giving every
//! atom an integer cell offset. A bond that reaches an already placed atom at
//! a different offset closes a loop through neighbouring cells; the offset
//! difference is a lattice translation mapping the component onto itself.
//!
//! ```text
//!   Cu1 ──O1── Cu1' (image +a)
//!   offset(Cu1) = 0, via O1 expected 0 + a  →  translation a
//! ```

use std::collections::VecDeque;

use crate::elements::atomic_weight;
use crate::error::StructureError;
use crate::model::CrystalStructure;

/// One connected piece of the structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Atom indices into [`CrystalStructure::atoms`], in traversal order.
    pub atoms: Vec<usize>,
    /// Cell offset of each entry in `atoms`.
    pub offsets: Vec<[i32; 3]>,
    /// Sign-normalised, deduplicated lattice translations.
    pub translations: Vec<[i32; 3]>,
    /// Sum of standard atomic weights; unknown elements add nothing.
    pub weight: f64,
}

impl Component {
    /// True when the component repeats through at least one lattice translation.
    #[inline]
    pub fn is_polymeric(&self) -> bool {
        !self.translations.is_empty()
    }

    /// Number of linearly independent translations (0..=3).
    ///
    /// This is the topological periodicity of the component. It is reported
    /// next to the geometric label as a cross-check.
    pub fn periodic_rank(&self) -> usize {
        let mut rows: Vec<[f64; 3]> = self.translations.iter().map(|t| t.map(f64::from)).collect();
        let mut rank = 0;
        for col in 0..3 {
            let Some(pivot) = (rank..rows.len()).find(|&r| rows[r][col].abs() > 1e-9) else {
                continue;
            };
            rows.swap(rank, pivot);
            let p = rows[rank];
            for row in rows.iter_mut().skip(rank + 1) {
                let f = row[col] / p[col];
                for k in 0..3 {
                    row[k] -= f * p[k];
                }
            }
            rank += 1;
        }
        rank
    }
}

/// Partition `structure` into components, ordered by their lowest atom index.
///
/// # Errors
///
/// [`StructureError::OffsetOverflow`] when a cell offset or translation
/// leaves the `i32` range.
pub fn find_components(structure: &CrystalStructure) -> Result<Vec<Component>, StructureError> {
    let n = structure.atoms.len();
    let mut adjacency: Vec<Vec<(usize, [i32; 3])>> = vec![Vec::new(); n];
    for bond in &structure.bonds {
        let [u, v] = bond.atoms;
        if u >= n || v >= n {
            continue;
        }
        let back = neg(bond.image).ok_or(StructureError::OffsetOverflow { atom: v })?;
        adjacency[u].push((v, bond.image));
        adjacency[v].push((u, back));
    }

    let mut offset: Vec<Option<[i32; 3]>> = vec![None; n];
    let mut components = Vec::new();

    for start in 0..n {
        if offset[start].is_some() {
            continue;
        }
        offset[start] = Some([0; 3]);

        let mut atoms = Vec::new();
        let mut offsets = Vec::new();
        let mut translations: Vec<[i32; 3]> = Vec::new();
        let mut queue = VecDeque::from([start]);

        while let Some(u) = queue.pop_front() {
            let Some(ou) = offset[u] else { continue };
            atoms.push(u);
            offsets.push(ou);

            for &(v, image) in &adjacency[u] {
                let expected = add(ou, image).ok_or(StructureError::OffsetOverflow { atom: v })?;
                match offset[v] {
                    None => {
                        offset[v] = Some(expected);
                        queue.push_back(v);
                    }
                    Some(ov) if ov != expected => {
                        let t = sub(expected, ov)
                            .and_then(normalise)
                            .ok_or(StructureError::OffsetOverflow { atom: v })?;
                        if !translations.contains(&t) {
                            translations.push(t);
                        }
                    }
                    Some(_) => {}
                }
            }
        }

        let weight = atoms
            .iter()
            .filter_map(|&i| atomic_weight(&structure.atoms[i].element))
            .sum();

        components.push(Component { atoms, offsets, translations, weight });
    }

    Ok(components)
}

/// Component with the greatest weight; ties go to the earliest.
pub fn heaviest<I>(components: I) -> Option<Component>
where
    I: IntoIterator<Item = Component>,
{
    components.into_iter().fold(None, |best, c| match best {
        Some(b) if b.weight >= c.weight => Some(b),
        _ => Some(c),
    })
}

fn add(a: [i32; 3], b: [i32; 3]) -> Option<[i32; 3]> {
    Some([a[0].checked_add(b[0])?, a[1].checked_add(b[1])?, a[2].checked_add(b[2])?])
}

fn sub(a: [i32; 3], b: [i32; 3]) -> Option<[i32; 3]> {
    Some([a[0].checked_sub(b[0])?, a[1].checked_sub(b[1])?, a[2].checked_sub(b[2])?])
}

fn neg(a: [i32; 3]) -> Option<[i32; 3]> {
    Some([a[0].checked_neg()?, a[1].checked_neg()?, a[2].checked_neg()?])
}

/// First non-zero component positive.
fn normalise(t: [i32; 3]) -> Option<[i32; 3]> {
    match t.iter().find(|&&x| x != 0) {
        Some(&x) if x < 0 => neg(t),
        _ => Some(t),
    }
}
