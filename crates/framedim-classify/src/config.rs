//! Classifier configuration.
//!
//! The cycle counts, threshold and epsilon are empirically tuned, not
//! derived. Defaults reproduce the reference behavior; every value can be
//! overridden from the environment.
//!
//! | Variable                  | Default  | Description                                      |
//! |---------------------------|----------|--------------------------------------------------|
//! | `FRAMEDIM_SMALL_CYCLES`   | `4`      | Repetition cycles of the smaller expansion       |
//! | `FRAMEDIM_LARGE_CYCLES`   | `7`      | Repetition cycles of the larger expansion        |
//! | `FRAMEDIM_THRESHOLD`      | `1.15`   | Growth ratio an axis must exceed to count        |
//! | `FRAMEDIM_EPSILON`        | `1e-4`   | Padding added to every principal extent (Å)      |
//! | `FRAMEDIM_AXIS_MATCHING`  | `rank`   | `rank` or `eigenvector` axis correspondence      |
//! | `FRAMEDIM_SOLVER`         | `jacobi` | `jacobi` or `nalgebra` eigen backend             |

use std::fmt;
use std::str::FromStr;

use framedim_geometry::{Solver, EXTENT_EPSILON};
use serde::{Deserialize, Serialize};

use crate::error::ClassifyError;

pub const DEFAULT_SMALL_CYCLES: u32 = 4;
pub const DEFAULT_LARGE_CYCLES: u32 = 7;
pub const DEFAULT_THRESHOLD: f64 = 1.15;

/// How principal axes of the two expansions are paired before forming ratios.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisMatching {
    /// Pair axes by sort rank of their extents (short↔short, …).
    #[default]
    Rank,
    /// Pair axes by maximum total |cos| between eigenvectors.
    Eigenvector,
}

impl FromStr for AxisMatching {
    type Err = ClassifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rank" => Ok(Self::Rank),
            "eigenvector" => Ok(Self::Eigenvector),
            other => Err(ClassifyError::InvalidConfig(format!(
                "unknown axis matching '{other}' (expected 'rank' or 'eigenvector')"
            ))),
        }
    }
}

impl fmt::Display for AxisMatching {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rank => "rank",
            Self::Eigenvector => "eigenvector",
        })
    }
}

/// Parameters of [`DimensionalityClassifier`](crate::DimensionalityClassifier).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Repetition cycles of the smaller expansion.
    pub small_cycles: u32,

    /// Repetition cycles of the larger expansion. Must exceed `small_cycles`.
    pub large_cycles: u32,

    /// An axis counts as growing when `large / small > threshold` (strict).
    pub threshold: f64,

    /// Padding added to every principal extent.
    pub epsilon: f64,

    pub axis_matching: AxisMatching,

    pub solver: Solver,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            small_cycles: DEFAULT_SMALL_CYCLES,
            large_cycles: DEFAULT_LARGE_CYCLES,
            threshold: DEFAULT_THRESHOLD,
            epsilon: EXTENT_EPSILON,
            axis_matching: AxisMatching::default(),
            solver: Solver::default(),
        }
    }
}

impl ClassifierConfig {
    /// Load configuration from environment variables, applying defaults where
    /// a variable is absent or unparseable.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            small_cycles:  env_parse("FRAMEDIM_SMALL_CYCLES", d.small_cycles),
            large_cycles:  env_parse("FRAMEDIM_LARGE_CYCLES", d.large_cycles),
            threshold:     env_parse("FRAMEDIM_THRESHOLD", d.threshold),
            epsilon:       env_parse("FRAMEDIM_EPSILON", d.epsilon),
            axis_matching: env_parse("FRAMEDIM_AXIS_MATCHING", d.axis_matching),
            solver:        env_parse("FRAMEDIM_SOLVER", d.solver),
        }
    }

    /// Check `0 < small_cycles < large_cycles`, `threshold > 1`, `epsilon > 0`.
    pub fn validate(&self) -> Result<(), ClassifyError> {
        if self.small_cycles == 0 {
            return Err(ClassifyError::InvalidConfig("small_cycles must be positive".into()));
        }
        if self.small_cycles >= self.large_cycles {
            return Err(ClassifyError::InvalidConfig(format!(
                "small_cycles ({}) must be less than large_cycles ({})",
                self.small_cycles, self.large_cycles
            )));
        }
        if !(self.threshold.is_finite() && self.threshold > 1.0) {
            return Err(ClassifyError::InvalidConfig(format!(
                "threshold must be a finite value > 1.0, got {}",
                self.threshold
            )));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(ClassifyError::InvalidConfig(format!(
                "epsilon must be a finite value > 0, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
