//! # framedim-geometry
//!
//! Point-cloud geometry for network dimensionality classification.
//!
//! ## Core operations
//!
//! | Item | Purpose |
//! |---|---|
//! | [`PointCloud`] | Cartesian atom positions of one expanded network |
//! | [`sample_covariance`] | Unbiased 3×3 coordinate covariance |
//! | [`LinearAlgebraProvider`] | Injectable covariance + symmetric eigen backend |
//! | [`BoundingExtentEstimator`] | Ascending principal half-extents `(short, medium, long)` |
//!
//! ## Invariant
//!
//! Every [`PrincipalExtents`] returned satisfies `0 < short ≤ medium ≤ long`,
//! with each value at least the estimator's epsilon.

pub mod cloud;
pub mod error;
pub mod extents;
pub mod linalg;

pub use cloud::{Point3, PointCloud};
pub use error::GeometryError;
pub use extents::{BoundingExtentEstimator, PrincipalAxes, PrincipalExtents, EXTENT_EPSILON};
pub use linalg::{
    sample_covariance, Eigen3, JacobiSolver, LinearAlgebraProvider, Matrix3, NalgebraSolver, Solver,
};
