//! Error types for point-cloud geometry.

/// Errors raised while estimating principal extents of a point cloud.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// Covariance needs at least two observations.
    #[error("insufficient data: {points} point(s), at least 2 are required")]
    InsufficientData { points: usize },

    /// A coordinate was NaN or infinite.
    #[error("non-finite coordinate at point {index}")]
    NonFiniteCoordinate { index: usize },

    /// The eigen-solver did not reach its off-diagonal tolerance.
    #[error("eigen-decomposition did not converge after {iterations} iterations")]
    EigenNotConverged { iterations: usize },

    /// The extent padding must be strictly positive.
    #[error("extent epsilon must be > 0, got {epsilon}")]
    InvalidEpsilon { epsilon: f64 },

    /// A solver name could not be parsed.
    #[error("unknown solver '{0}' (expected 'jacobi' or 'nalgebra')")]
    UnknownSolver(String),
}
