//! Principal-axis extents of a point cloud.
//!
//! ```text
//! Σ = cov(P)                      (3×3, unbiased)
//! λ₁ ≤ λ₂ ≤ λ₃ = eig(Σ)           (clamped at 0)
//! extentᵢ = √λᵢ + ε               (ε = 1e-4 by default)
//! ```
//!
//! The extents are one-standard-deviation radii along the principal axes,
//! not min/max bounding-box widths. The `ε` padding keeps later ratios finite
//! for perfectly linear or planar clouds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cloud::PointCloud;
use crate::error::GeometryError;
use crate::linalg::{LinearAlgebraProvider, Solver};

/// Default padding added to every extent.
pub const EXTENT_EPSILON: f64 = 1e-4;

/// Ascending principal half-extents `(short, medium, long)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrincipalExtents {
    pub short: f64,
    pub medium: f64,
    pub long: f64,
}

impl PrincipalExtents {
    #[inline]
    pub fn as_array(&self) -> [f64; 3] {
        [self.short, self.medium, self.long]
    }

    fn from_sorted(v: [f64; 3]) -> Self {
        debug_assert!(v[0] <= v[1] && v[1] <= v[2], "extents not sorted: {v:?}");
        Self { short: v[0], medium: v[1], long: v[2] }
    }
}

impl fmt::Display for PrincipalExtents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4}, {:.4})", self.short, self.medium, self.long)
    }
}

/// Extents together with the unit direction of each principal axis.
///
/// `directions[i]` belongs to `extents.as_array()[i]`. Eigenvector sign is
/// arbitrary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincipalAxes {
    pub extents: PrincipalExtents,
    pub directions: [[f64; 3]; 3],
}

/// Computes [`PrincipalExtents`] through an injected numeric backend.
#[derive(Debug, Clone)]
pub struct BoundingExtentEstimator<P = Solver> {
    provider: P,
    epsilon: f64,
}

impl Default for BoundingExtentEstimator<Solver> {
    fn default() -> Self {
        Self::new(Solver::default())
    }
}

impl<P: LinearAlgebraProvider> BoundingExtentEstimator<P> {
    pub fn new(provider: P) -> Self {
        Self { provider, epsilon: EXTENT_EPSILON }
    }

    /// Replace the extent padding.
    ///
    /// # Errors
    ///
    /// [`GeometryError::InvalidEpsilon`] unless `epsilon` is finite and > 0.
    pub fn with_epsilon(mut self, epsilon: f64) -> Result<Self, GeometryError> {
        if !(epsilon.is_finite() && epsilon > 0.0) {
            return Err(GeometryError::InvalidEpsilon { epsilon });
        }
        self.epsilon = epsilon;
        Ok(self)
    }

    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    #[inline]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Principal extents of `cloud`, ascending, each `≥ ε`.
    ///
    /// # Errors
    ///
    /// - [`GeometryError::InsufficientData`] for fewer than two points.
    /// - [`GeometryError::NonFiniteCoordinate`] for NaN/∞ input.
    /// - [`GeometryError::EigenNotConverged`] if the backend gives up.
    pub fn estimate(&self, cloud: &PointCloud) -> Result<PrincipalExtents, GeometryError> {
        Ok(self.estimate_axes(cloud)?.extents)
    }

    /// Like [`estimate`](Self::estimate), also returning the axis directions.
    pub fn estimate_axes(&self, cloud: &PointCloud) -> Result<PrincipalAxes, GeometryError> {
        let cov = self.provider.covariance(cloud)?;
        let eig = self.provider.symmetric_eigen(&cov)?;

        let mut order = [0usize, 1, 2];
        order.sort_by(|&i, &j| eig.values[i].total_cmp(&eig.values[j]));

        // Round-off can leave a PSD eigenvalue slightly negative.
        let lengths = order.map(|i| eig.values[i].max(0.0).sqrt() + self.epsilon);
        let directions = order.map(|i| eig.vectors[i]);

        Ok(PrincipalAxes {
            extents: PrincipalExtents::from_sorted(lengths),
            directions,
        })
    }
}
