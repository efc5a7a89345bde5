//! Two-expansion dimensionality classifier.
//!
//! ## Algorithm
//! 1. Expand the structure by `small_cycles` and by `large_cycles`.
//! 2. Estimate principal extents of both point clouds.
//! 3. `ratio[i] = large[i] / small[i]` over the paired axes.
//! 4. The label is the number of ratios strictly above `threshold`.
//!
//! An axis whose extent keeps growing with more cycles is periodically
//! connected; an axis that stops growing once the finite motif is captured
//! is bounded. The threshold absorbs edge effects of finite expansion.

use std::time::{Duration, Instant};

use framedim_geometry::{
    BoundingExtentEstimator, GeometryError, LinearAlgebraProvider, PointCloud, PrincipalAxes,
    PrincipalExtents, Solver,
};
use serde::Serialize;
use tracing::debug;

use crate::config::{AxisMatching, ClassifierConfig};
use crate::error::ClassifyError;
use crate::expansion::NetworkExpansionService;
use crate::label::Dimensionality;
use crate::ratios::GrowthRatios;

/// Size and shape of one expansion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExpansionSummary {
    pub cycles: u32,
    pub atoms: usize,
    pub extents: PrincipalExtents,
}

/// Label plus the diagnostics behind it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub dimensionality: Dimensionality,
    pub ratios: GrowthRatios,
    pub small: ExpansionSummary,
    pub large: ExpansionSummary,
    /// Wall time spent inside the expansion service (zero for
    /// [`DimensionalityClassifier::classify_clouds`]).
    pub expansion_time: Duration,
}

/// Stateless classifier; one instance can serve any number of structures.
#[derive(Debug, Clone)]
pub struct DimensionalityClassifier<P = Solver> {
    config: ClassifierConfig,
    estimator: BoundingExtentEstimator<P>,
}

impl DimensionalityClassifier<Solver> {
    /// Build a classifier using the backend named in `config.solver`.
    pub fn new(config: ClassifierConfig) -> Result<Self, ClassifyError> {
        Self::with_provider(config, config.solver)
    }
}

impl Default for DimensionalityClassifier<Solver> {
    fn default() -> Self {
        let config = ClassifierConfig::default();
        Self {
            config,
            estimator: BoundingExtentEstimator::new(config.solver),
        }
    }
}

impl<P: LinearAlgebraProvider> DimensionalityClassifier<P> {
    /// Build a classifier around an explicit numeric backend.
    ///
    /// # Errors
    ///
    /// [`ClassifyError::InvalidConfig`] if `config` fails validation.
    pub fn with_provider(config: ClassifierConfig, provider: P) -> Result<Self, ClassifyError> {
        config.validate()?;
        let estimator = BoundingExtentEstimator::new(provider)
            .with_epsilon(config.epsilon)
            .map_err(|e| ClassifyError::InvalidConfig(e.to_string()))?;
        Ok(Self { config, estimator })
    }

    #[inline]
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Expand `structure` twice through `service` and classify the result.
    ///
    /// # Errors
    ///
    /// - [`ClassifyError::Expansion`] when either expansion fails.
    /// - [`ClassifyError::InsufficientData`] when either expansion has fewer
    ///   than two atoms.
    pub fn classify<S>(
        &self,
        service: &S,
        structure: &S::Structure,
    ) -> Result<Classification, ClassifyError>
    where
        S: NetworkExpansionService + ?Sized,
    {
        let start = Instant::now();
        let small = self.expand(service, structure, self.config.small_cycles)?;
        let large = self.expand(service, structure, self.config.large_cycles)?;
        let expansion_time = start.elapsed();

        debug!(
            small_atoms = small.len(),
            large_atoms = large.len(),
            elapsed_ms = expansion_time.as_millis() as u64,
            "polymer expansions complete"
        );

        let mut result = self.classify_clouds(&small, &large)?;
        result.expansion_time = expansion_time;
        Ok(result)
    }

    /// Classify two already-expanded clouds (small first).
    pub fn classify_clouds(
        &self,
        small: &PointCloud,
        large: &PointCloud,
    ) -> Result<Classification, ClassifyError> {
        let small_axes = self.estimate(small, self.config.small_cycles)?;
        let large_axes = self.estimate(large, self.config.large_cycles)?;

        let ratios = match self.config.axis_matching {
            AxisMatching::Rank => GrowthRatios::by_rank(&small_axes.extents, &large_axes.extents),
            AxisMatching::Eigenvector => GrowthRatios::by_direction(&small_axes, &large_axes),
        };

        // growing_axes never exceeds 3
        let dimensionality = Dimensionality::from_count(ratios.growing_axes(self.config.threshold))
            .unwrap_or(Dimensionality::Three);

        debug!(
            small_extents = %small_axes.extents,
            large_extents = %large_axes.extents,
            ratios = %ratios,
            matching = %self.config.axis_matching,
            label = %dimensionality,
            "ratio of principal extents between expansions"
        );

        Ok(Classification {
            dimensionality,
            ratios,
            small: ExpansionSummary {
                cycles: self.config.small_cycles,
                atoms: small.len(),
                extents: small_axes.extents,
            },
            large: ExpansionSummary {
                cycles: self.config.large_cycles,
                atoms: large.len(),
                extents: large_axes.extents,
            },
            expansion_time: Duration::ZERO,
        })
    }

    fn expand<S>(
        &self,
        service: &S,
        structure: &S::Structure,
        cycles: u32,
    ) -> Result<PointCloud, ClassifyError>
    where
        S: NetworkExpansionService + ?Sized,
    {
        service
            .expand(structure, cycles)
            .map_err(|source| ClassifyError::Expansion { cycles, source })
    }

    fn estimate(&self, cloud: &PointCloud, cycles: u32) -> Result<PrincipalAxes, ClassifyError> {
        self.estimator.estimate_axes(cloud).map_err(|e| match e {
            GeometryError::InsufficientData { points } => {
                ClassifyError::InsufficientData { cycles, points }
            }
            other => ClassifyError::Geometry(other),
        })
    }
}
