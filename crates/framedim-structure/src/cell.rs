//! Unit cell parameters and fractional → Cartesian conversion.
//!
//! Convention: `a` along x, `b` in the xy-plane, `c` completing a
//! right-handed basis.
//!
//! ```text
//! a = (a, 0, 0)
//! b = (b·cosγ, b·sinγ, 0)
//! c = (c·cosβ, c·(cosα − cosβ·cosγ)/sinγ, c·v/sinγ)
//! v = √(1 − cos²α − cos²β − cos²γ + 2·cosα·cosβ·cosγ)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::StructureError;

/// Cell lengths (Å) and angles (degrees) `α, β, γ`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitCell {
    pub lengths: [f64; 3],
    pub angles: [f64; 3],
}

impl UnitCell {
    pub fn cubic(a: f64) -> Self {
        Self { lengths: [a; 3], angles: [90.0; 3] }
    }

    pub fn orthorhombic(a: f64, b: f64, c: f64) -> Self {
        Self { lengths: [a, b, c], angles: [90.0; 3] }
    }

    /// Cartesian lattice vectors.
    ///
    /// # Errors
    ///
    /// [`StructureError::InvalidCell`] for non-positive lengths, angles outside
    /// (0°, 180°) or angle combinations with no positive volume.
    pub fn basis(&self) -> Result<CellBasis, StructureError> {
        let [a, b, c] = self.lengths;
        if !self.lengths.iter().all(|l| l.is_finite() && *l > 0.0) {
            return Err(StructureError::InvalidCell {
                reason: format!("lengths must be positive, got {:?}", self.lengths),
            });
        }
        if !self.angles.iter().all(|x| x.is_finite() && *x > 0.0 && *x < 180.0) {
            return Err(StructureError::InvalidCell {
                reason: format!("angles must lie in (0, 180), got {:?}", self.angles),
            });
        }

        let [ca, cb, cg] = self.angles.map(|d| d.to_radians().cos());
        let sg = self.angles[2].to_radians().sin();
        let v2 = 1.0 - ca * ca - cb * cb - cg * cg + 2.0 * ca * cb * cg;
        if v2 <= 1e-12 {
            return Err(StructureError::InvalidCell {
                reason: format!("angles {:?} enclose no volume", self.angles),
            });
        }

        Ok(CellBasis([
            [a, 0.0, 0.0],
            [b * cg, b * sg, 0.0],
            [c * cb, c * (ca - cb * cg) / sg, c * v2.sqrt() / sg],
        ]))
    }

}

/// Rows are the Cartesian lattice vectors `a`, `b`, `c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellBasis(pub [[f64; 3]; 3]);

impl CellBasis {
    /// `f₀·a + f₁·b + f₂·c`.
    pub fn to_cartesian(&self, f: [f64; 3]) -> [f64; 3] {
        let m = &self.0;
        [
            f[0] * m[0][0] + f[1] * m[1][0] + f[2] * m[2][0],
            f[0] * m[0][1] + f[1] * m[1][1] + f[2] * m[2][1],
            f[0] * m[0][2] + f[1] * m[1][2] + f[2] * m[2][2],
        ]
    }

    /// Cartesian vector of an integer lattice translation.
    pub fn translation(&self, n: [i32; 3]) -> [f64; 3] {
        self.to_cartesian(n.map(f64::from))
    }
}
