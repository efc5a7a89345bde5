//! Sequential batch classification.
//!
//! For each identifier, in input order:
//!
//! 1. fetch the structure (missing → `structure not found`)
//! 2. find components; the heaviest one decides
//! 3. non-polymeric heaviest component → `no polymeric bonds detected`
//! 4. otherwise restrict to it, expand, classify
//! 5. record one row and flush
//!
//! Only sink failures abort the run.

use std::fmt;
use std::time::{Duration, Instant};

use framedim_classify::{Classification, Dimensionality, DimensionalityClassifier};
use framedim_geometry::{LinearAlgebraProvider, Solver};
use framedim_structure::{heaviest, PolymerExpander, StructureError, StructureSource};
use indicatif::ProgressBar;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::BatchError;
use crate::sink::{ResultRow, ResultSink};

/// What happened to one identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RowOutcome {
    Classified(Dimensionality),
    NotPolymeric,
    NotFound,
    Failed,
}

impl RowOutcome {
    /// Text for the `dimensionality` column.
    pub fn text(&self) -> &'static str {
        match self {
            Self::Classified(d) => d.description(),
            Self::NotPolymeric => "no polymeric bonds detected",
            Self::NotFound => "structure not found",
            Self::Failed => "classification failed",
        }
    }
}

impl fmt::Display for RowOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Everything learned about one structure.
#[derive(Debug, Clone)]
pub struct StructureReport {
    pub outcome: RowOutcome,
    /// The heaviest component is polymeric, whether or not classification
    /// then succeeded.
    pub polymeric: bool,
    pub polymeric_components: usize,
    /// Present only for [`RowOutcome::Classified`].
    pub classification: Option<Classification>,
}

impl StructureReport {
    fn bare(outcome: RowOutcome) -> Self {
        Self { outcome, polymeric: false, polymeric_components: 0, classification: None }
    }
}

/// Counters for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    /// Structures whose heaviest component is polymeric, including those
    /// whose classification then failed.
    pub polymeric: usize,
    pub non_polymeric: usize,
    pub not_found: usize,
    pub failed: usize,
    /// Structures with more than one polymeric component.
    pub multi_polymer: usize,
    /// Classified structures per label, indexed by axis count.
    pub by_dimensionality: [usize; 4],
    #[serde(serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

impl BatchSummary {
    fn count(&mut self, report: &StructureReport) {
        self.total += 1;
        if report.polymeric_components > 1 {
            self.multi_polymer += 1;
        }
        if report.polymeric {
            self.polymeric += 1;
        }
        match report.outcome {
            RowOutcome::Classified(d) => {
                self.by_dimensionality[usize::from(d.axes())] += 1;
            }
            RowOutcome::NotPolymeric => self.non_polymeric += 1,
            RowOutcome::NotFound => self.not_found += 1,
            RowOutcome::Failed => self.failed += 1,
        }
    }
}

fn serialize_secs<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

/// Runs a classifier over a structure source.
pub struct BatchDriver<Src, P = Solver> {
    source: Src,
    classifier: DimensionalityClassifier<P>,
    expander: PolymerExpander,
    progress: ProgressBar,
}

impl<Src, P> BatchDriver<Src, P>
where
    Src: StructureSource,
    P: LinearAlgebraProvider,
{
    pub fn new(source: Src, classifier: DimensionalityClassifier<P>, expander: PolymerExpander) -> Self {
        Self { source, classifier, expander, progress: ProgressBar::hidden() }
    }

    /// Report progress on `bar`; its length is set by [`run`](Self::run).
    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.progress = bar;
        self
    }

    /// Classify a single identifier. Never fails; failures become outcomes.
    pub fn classify_one(&self, identifier: &str) -> StructureReport {
        let structure = match self.source.fetch(identifier) {
            Ok(s) => s,
            Err(StructureError::NotFound { .. }) => {
                warn!(identifier, "structure not found");
                return StructureReport::bare(RowOutcome::NotFound);
            }
            Err(e) => {
                warn!(identifier, error = %e, "failed to load structure");
                return StructureReport::bare(RowOutcome::Failed);
            }
        };

        let components = match structure.components() {
            Ok(c) => c,
            Err(e) => {
                warn!(identifier, error = %e, "failed to unwrap bond network");
                return StructureReport::bare(RowOutcome::Failed);
            }
        };
        let polymeric_components = components.iter().filter(|c| c.is_polymeric()).count();
        if polymeric_components > 1 {
            warn!(identifier, count = polymeric_components, "multiple polymer units present");
        }

        let Some(component) = heaviest(components).filter(|c| c.is_polymeric()) else {
            info!(identifier, outcome = "non-polymeric", "no polymeric bonds detected");
            return StructureReport {
                outcome: RowOutcome::NotPolymeric,
                polymeric: false,
                polymeric_components,
                classification: None,
            };
        };

        let failed = StructureReport {
            outcome: RowOutcome::Failed,
            polymeric: true,
            polymeric_components,
            classification: None,
        };

        let unit = match structure.restrict_to(&component) {
            Ok(unit) => unit,
            Err(e) => {
                warn!(identifier, error = %e, "failed to isolate polymeric unit");
                return failed;
            }
        };

        match self.classifier.classify(&self.expander, &unit) {
            Ok(c) => {
                info!(
                    identifier,
                    dimensionality = %c.dimensionality,
                    periodic_rank = component.periodic_rank(),
                    component_atoms = component.atoms.len(),
                    atoms = unit.atoms.len(),
                    "classified"
                );
                debug!(
                    identifier,
                    ratios = %c.ratios,
                    small_atoms = c.small.atoms,
                    large_atoms = c.large.atoms,
                    expansion_ms = c.expansion_time.as_millis() as u64,
                    "classification diagnostics"
                );
                StructureReport {
                    outcome: RowOutcome::Classified(c.dimensionality),
                    polymeric: true,
                    polymeric_components,
                    classification: Some(c),
                }
            }
            Err(e) => {
                warn!(identifier, error = %e, "classification failed");
                failed
            }
        }
    }

    /// Classify every identifier, recording one row each.
    ///
    /// # Errors
    ///
    /// Only [`BatchError::Write`] from the sink; per-structure problems are
    /// reported as rows.
    pub fn run<K>(&self, identifiers: &[String], sink: &mut K) -> Result<BatchSummary, BatchError>
    where
        K: ResultSink + ?Sized,
    {
        let start = Instant::now();
        let mut summary = BatchSummary::default();
        self.progress.set_length(identifiers.len() as u64);

        info!(structures = identifiers.len(), "starting batch");

        for (i, identifier) in identifiers.iter().enumerate() {
            self.progress.set_message(identifier.clone());
            let report = self.classify_one(identifier);
            summary.count(&report);
            sink.record(&ResultRow {
                identifier: identifier.clone(),
                outcome: report.outcome,
                sequence: i + 1,
            })?;
            self.progress.inc(1);
        }

        self.progress.finish_and_clear();
        summary.elapsed = start.elapsed();

        info!(
            total = summary.total,
            polymeric = summary.polymeric,
            non_polymeric = summary.non_polymeric,
            not_found = summary.not_found,
            failed = summary.failed,
            multi_polymer = summary.multi_polymer,
            elapsed_s = format!("{:.2}", summary.elapsed.as_secs_f64()),
            "batch complete"
        );
        Ok(summary)
    }
}
