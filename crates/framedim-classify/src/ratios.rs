//! Per-axis growth ratios between two expansions.
//!
//! ```text
//! ratio[i] = extent_large[π(i)] / extent_small[i]
//! ```
//!
//! With [`AxisMatching::Rank`](crate::AxisMatching::Rank), `π` is the
//! identity: axes are paired by the sort rank of their extents, which can pair
//! unrelated physical directions when a growing axis overtakes a fixed one
//! between the two sizes. [`GrowthRatios::by_direction`] instead chooses the
//! permutation whose eigenvectors line up best.

use std::fmt;

use framedim_geometry::{PrincipalAxes, PrincipalExtents};
use serde::{Deserialize, Serialize};

const PERMUTATIONS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

/// Growth ratios in the small expansion's `(short, medium, long)` slots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthRatios(pub [f64; 3]);

impl GrowthRatios {
    /// Pair axes by sort rank.
    pub fn by_rank(small: &PrincipalExtents, large: &PrincipalExtents) -> Self {
        let s = small.as_array();
        let l = large.as_array();
        Self([l[0] / s[0], l[1] / s[1], l[2] / s[2]])
    }

    /// Pair axes by maximum total `|v_small · v_large|`. Ties keep the rank
    /// pairing.
    pub fn by_direction(small: &PrincipalAxes, large: &PrincipalAxes) -> Self {
        let perm = best_alignment(&small.directions, &large.directions);
        let s = small.extents.as_array();
        let l = large.extents.as_array();
        Self([l[perm[0]] / s[0], l[perm[1]] / s[1], l[perm[2]] / s[2]])
    }

    #[inline]
    pub fn as_array(&self) -> [f64; 3] {
        self.0
    }

    /// Number of ratios strictly greater than `threshold`.
    pub fn growing_axes(&self, threshold: f64) -> usize {
        self.0.iter().filter(|&&r| r > threshold).count()
    }
}

impl fmt::Display for GrowthRatios {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.4}, {:.4}, {:.4}]", self.0[0], self.0[1], self.0[2])
    }
}

fn best_alignment(small: &[[f64; 3]; 3], large: &[[f64; 3]; 3]) -> [usize; 3] {
    let mut cos = [[0.0f64; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            cos[i][j] = dot(&small[i], &large[j]).abs();
        }
    }

    let mut best = PERMUTATIONS[0];
    let mut best_score = f64::NEG_INFINITY;
    for perm in PERMUTATIONS {
        let score: f64 = (0..3).map(|i| cos[i][perm[i]]).sum();
        if score > best_score + 1e-12 {
            best = perm;
            best_score = score;
        }
    }
    best
}

#[inline]
fn dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: [f64; 3] = [1.0, 0.0, 0.0];
    const Y: [f64; 3] = [0.0, 1.0, 0.0];
    const Z: [f64; 3] = [0.0, 0.0, 1.0];

    fn extents(v: [f64; 3]) -> PrincipalExtents {
        PrincipalExtents { short: v[0], medium: v[1], long: v[2] }
    }

    #[test]
    fn threshold_is_strict() {
        let r = GrowthRatios([1.15, 1.15, 1.15]);
        assert_eq!(r.growing_axes(1.15), 0);
    }

    #[test]
    fn counts_only_ratios_above_threshold() {
        let r = GrowthRatios([1.0, 1.150_000_1, 2.0]);
        assert_eq!(r.growing_axes(1.15), 2);
    }

    #[test]
    fn rank_ratios_divide_slotwise() {
        let r = GrowthRatios::by_rank(&extents([1.0, 2.0, 4.0]), &extents([1.0, 3.0, 8.0]));
        assert_eq!(r.as_array(), [1.0, 1.5, 2.0]);
    }

    #[test]
    fn direction_matching_follows_eigenvectors() {
        // small: x is medium, y is long; large: y is medium, x is long
        let small = PrincipalAxes { extents: extents([0.1, 2.0, 3.0]), directions: [Z, X, Y] };
        let large = PrincipalAxes { extents: extents([0.1, 3.0, 6.0]), directions: [Z, Y, X] };

        let rank = GrowthRatios::by_rank(&small.extents, &large.extents);
        assert_eq!(rank.growing_axes(1.15), 2);

        let aligned = GrowthRatios::by_direction(&small, &large);
        assert_eq!(aligned.as_array(), [1.0, 3.0, 1.0]);
        assert_eq!(aligned.growing_axes(1.15), 1);
    }

    #[test]
    fn direction_matching_ignores_eigenvector_sign() {
        let neg_x = [-1.0, 0.0, 0.0];
        let small = PrincipalAxes { extents: extents([1.0, 2.0, 3.0]), directions: [X, Y, Z] };
        let large = PrincipalAxes { extents: extents([1.0, 2.0, 3.0]), directions: [neg_x, Y, Z] };
        assert_eq!(GrowthRatios::by_direction(&small, &large).as_array(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn display_has_four_decimals() {
        assert_eq!(GrowthRatios([1.0, 1.5, 2.25]).to_string(), "[1.0000, 1.5000, 2.2500]");
    }
}
