//! Covariance and symmetric 3×3 eigen-decomposition.
//!
//! The estimator never talks to a numeric library directly; it goes through
//! [`LinearAlgebraProvider`], so the backend can be swapped and tests can pin
//! down exact behavior.
//!
//! | Backend            | Implementation                                   |
//! |--------------------|--------------------------------------------------|
//! | [`JacobiSolver`]   | cyclic Jacobi rotations, pure Rust               |
//! | [`NalgebraSolver`] | `nalgebra::SymmetricEigen` (implicit QR)         |
//! | [`Solver`]         | runtime-selectable enum over both                |

use std::fmt;
use std::str::FromStr;

use nalgebra::SymmetricEigen;
use serde::{Deserialize, Serialize};

use crate::cloud::PointCloud;
use crate::error::GeometryError;

/// Row-major 3×3 matrix.
pub type Matrix3 = [[f64; 3]; 3];

/// Eigen-decomposition of a symmetric 3×3 matrix.
///
/// `vectors[i]` is the unit eigenvector paired with `values[i]`. No ordering
/// is implied; callers sort.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eigen3 {
    pub values: [f64; 3],
    pub vectors: [[f64; 3]; 3],
}

/// Numeric capability used by the extent estimator.
pub trait LinearAlgebraProvider {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Unbiased sample covariance of the cloud (coordinates as variables,
    /// points as observations).
    fn covariance(&self, cloud: &PointCloud) -> Result<Matrix3, GeometryError> {
        sample_covariance(cloud)
    }

    /// Eigenvalues and eigenvectors of a symmetric matrix.
    fn symmetric_eigen(&self, m: &Matrix3) -> Result<Eigen3, GeometryError>;
}

impl<P: LinearAlgebraProvider + ?Sized> LinearAlgebraProvider for &P {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn covariance(&self, cloud: &PointCloud) -> Result<Matrix3, GeometryError> {
        (**self).covariance(cloud)
    }

    fn symmetric_eigen(&self, m: &Matrix3) -> Result<Eigen3, GeometryError> {
        (**self).symmetric_eigen(m)
    }
}

// ─────────────────────────────────────────────
// Covariance
// ─────────────────────────────────────────────

/// Two-pass unbiased covariance (divides by `N − 1`).
///
/// # Errors
///
/// [`GeometryError::InsufficientData`] for fewer than two points,
/// [`GeometryError::NonFiniteCoordinate`] for NaN/∞ input.
pub fn sample_covariance(cloud: &PointCloud) -> Result<Matrix3, GeometryError> {
    cloud.validate()?;
    let centroid = cloud
        .centroid()
        .ok_or(GeometryError::InsufficientData { points: 0 })?;

    let mut cov = [[0.0f64; 3]; 3];
    for p in cloud {
        let d = [p[0] - centroid[0], p[1] - centroid[1], p[2] - centroid[2]];
        for i in 0..3 {
            for j in i..3 {
                cov[i][j] += d[i] * d[j];
            }
        }
    }

    let denom = (cloud.len() - 1) as f64;
    for i in 0..3 {
        for j in i..3 {
            cov[i][j] /= denom;
            cov[j][i] = cov[i][j];
        }
    }
    Ok(cov)
}

// ─────────────────────────────────────────────
// Jacobi
// ─────────────────────────────────────────────

/// Classical Jacobi eigen-solver specialised to 3×3 symmetric matrices.
///
/// Each step zeroes the largest off-diagonal entry with a plane rotation.
/// Converges quadratically; a handful of rotations is typical.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JacobiSolver {
    pub max_rotations: usize,
    /// Stop once every off-diagonal entry is below `tolerance · ‖A‖_F`.
    pub tolerance: f64,
}

impl Default for JacobiSolver {
    fn default() -> Self {
        Self { max_rotations: 64, tolerance: 1e-14 }
    }
}

impl LinearAlgebraProvider for JacobiSolver {
    fn name(&self) -> &'static str {
        "jacobi"
    }

    fn symmetric_eigen(&self, m: &Matrix3) -> Result<Eigen3, GeometryError> {
        let mut a = *m;
        let mut v = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

        let norm = frobenius(&a);
        let limit = self.tolerance * norm;

        let mut converged = false;
        for _ in 0..self.max_rotations {
            let (p, q, off) = largest_off_diagonal(&a);
            if off <= limit {
                converged = true;
                break;
            }
            rotate(&mut a, &mut v, p, q);
        }
        if !converged && largest_off_diagonal(&a).2 > limit {
            return Err(GeometryError::EigenNotConverged { iterations: self.max_rotations });
        }

        Ok(Eigen3 {
            values: [a[0][0], a[1][1], a[2][2]],
            // columns of V are the eigenvectors
            vectors: [
                [v[0][0], v[1][0], v[2][0]],
                [v[0][1], v[1][1], v[2][1]],
                [v[0][2], v[1][2], v[2][2]],
            ],
        })
    }
}

fn frobenius(a: &Matrix3) -> f64 {
    a.iter().flatten().map(|x| x * x).sum::<f64>().sqrt()
}

fn largest_off_diagonal(a: &Matrix3) -> (usize, usize, f64) {
    let mut best = (0, 1, a[0][1].abs());
    for (p, q) in [(0, 2), (1, 2)] {
        if a[p][q].abs() > best.2 {
            best = (p, q, a[p][q].abs());
        }
    }
    best
}

/// Apply the rotation `A ← Jᵀ A J`, `V ← V J` that annihilates `a[p][q]`.
fn rotate(a: &mut Matrix3, v: &mut Matrix3, p: usize, q: usize) {
    let apq = a[p][q];
    if apq == 0.0 {
        return;
    }
    let theta = (a[q][q] - a[p][p]) / (2.0 * apq);
    let t = if theta.abs() > 1e150 {
        0.5 / theta
    } else {
        theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt())
    };
    let c = 1.0 / (t * t + 1.0).sqrt();
    let s = t * c;

    a[p][p] -= t * apq;
    a[q][q] += t * apq;
    a[p][q] = 0.0;
    a[q][p] = 0.0;

    let r = 3 - p - q;
    let arp = a[r][p];
    let arq = a[r][q];
    a[r][p] = c * arp - s * arq;
    a[p][r] = a[r][p];
    a[r][q] = s * arp + c * arq;
    a[q][r] = a[r][q];

    for row in v.iter_mut() {
        let vp = row[p];
        let vq = row[q];
        row[p] = c * vp - s * vq;
        row[q] = s * vp + c * vq;
    }
}

// ─────────────────────────────────────────────
// nalgebra
// ─────────────────────────────────────────────

/// Eigen-decomposition through `nalgebra::SymmetricEigen`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NalgebraSolver {
    pub max_iterations: usize,
}

impl Default for NalgebraSolver {
    fn default() -> Self {
        Self { max_iterations: 1000 }
    }
}

impl LinearAlgebraProvider for NalgebraSolver {
    fn name(&self) -> &'static str {
        "nalgebra"
    }

    fn symmetric_eigen(&self, m: &Matrix3) -> Result<Eigen3, GeometryError> {
        let matrix = nalgebra::Matrix3::new(
            m[0][0], m[0][1], m[0][2],
            m[1][0], m[1][1], m[1][2],
            m[2][0], m[2][1], m[2][2],
        );
        let eig = SymmetricEigen::try_new(matrix, f64::EPSILON, self.max_iterations)
            .ok_or(GeometryError::EigenNotConverged { iterations: self.max_iterations })?;

        let mut vectors = [[0.0; 3]; 3];
        for (i, vector) in vectors.iter_mut().enumerate() {
            let col = eig.eigenvectors.column(i);
            *vector = [col[0], col[1], col[2]];
        }
        Ok(Eigen3 {
            values: [eig.eigenvalues[0], eig.eigenvalues[1], eig.eigenvalues[2]],
            vectors,
        })
    }
}

// ─────────────────────────────────────────────
// Runtime selection
// ─────────────────────────────────────────────

/// Backend chosen from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Solver {
    #[default]
    Jacobi,
    Nalgebra,
}

impl LinearAlgebraProvider for Solver {
    fn name(&self) -> &'static str {
        match self {
            Self::Jacobi => JacobiSolver::default().name(),
            Self::Nalgebra => NalgebraSolver::default().name(),
        }
    }

    fn symmetric_eigen(&self, m: &Matrix3) -> Result<Eigen3, GeometryError> {
        match self {
            Self::Jacobi => JacobiSolver::default().symmetric_eigen(m),
            Self::Nalgebra => NalgebraSolver::default().symmetric_eigen(m),
        }
    }
}

impl FromStr for Solver {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jacobi" => Ok(Self::Jacobi),
            "nalgebra" => Ok(Self::Nalgebra),
            _ => Err(GeometryError::UnknownSolver(s.to_string())),
        }
    }
}

impl fmt::Display for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
