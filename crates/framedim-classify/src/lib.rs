//! # framedim-classify
//!
//! Structural dimensionality (0D/1D/2D/3D) of a polymeric network, from the
//! growth of its principal extents between two finite expansions.
//!
//! ```text
//! structure ─ expand(4) ─▶ cloud A ─ estimate ─▶ extents A ─┐
//!           └ expand(7) ─▶ cloud B ─ estimate ─▶ extents B ─┴▶ ratios ─▶ #(ratio > 1.15)
//! ```
//!
//! The expansion itself is external and reached through
//! [`NetworkExpansionService`]; the numeric backend comes from
//! `framedim-geometry`.

pub mod classifier;
pub mod config;
pub mod error;
pub mod expansion;
pub mod label;
pub mod ratios;

pub use classifier::{Classification, DimensionalityClassifier, ExpansionSummary};
pub use config::{
    AxisMatching, ClassifierConfig, DEFAULT_LARGE_CYCLES, DEFAULT_SMALL_CYCLES, DEFAULT_THRESHOLD,
};
pub use error::ClassifyError;
pub use expansion::{ExpansionError, NetworkExpansionService};
pub use label::Dimensionality;
pub use ratios::GrowthRatios;
