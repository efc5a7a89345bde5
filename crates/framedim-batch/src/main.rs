//! # framedim
//!
//! Batch dimensionality classification of polymeric crystal structures.
//!
//! ## Usage
//!
//! ```text
//! framedim -i refcodes.gcd -o results --library ./structures
//! FRAMEDIM_LIBRARY=./structures framedim          # prompts for input and output
//! framedim -i refcodes.gcd -o out.csv --axis-matching eigenvector --log-level debug
//! ```
//!
//! Classifier settings come from `FRAMEDIM_*` environment variables and are
//! overridden by the matching flags.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use framedim_batch::{csv_output_path, read_identifiers, BatchDriver, CsvSink};
use framedim_classify::{AxisMatching, ClassifierConfig, DimensionalityClassifier};
use framedim_geometry::Solver;
use framedim_structure::{JsonDirectorySource, PolymerExpander, DEFAULT_MAX_ATOMS};

// ─────────────────────────────────────────────
// CLI
// ─────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "framedim", version)]
#[command(about = "Classify polymeric crystal structures as 0D/1D/2D/3D networks")]
struct Cli {
    /// Identifier list, one refcode per line (prompted if omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output CSV; `.csv` is appended when there is no extension (prompted if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory of `<IDENTIFIER>.json` structure records
    #[arg(long, env = "FRAMEDIM_LIBRARY", default_value = ".")]
    library: PathBuf,

    /// Repetition cycles of the smaller expansion
    #[arg(long)]
    small_cycles: Option<u32>,

    /// Repetition cycles of the larger expansion
    #[arg(long)]
    large_cycles: Option<u32>,

    /// Growth ratio an axis must exceed to count
    #[arg(long)]
    threshold: Option<f64>,

    /// Padding added to every principal extent
    #[arg(long)]
    epsilon: Option<f64>,

    /// Axis correspondence between expansions: rank | eigenvector
    #[arg(long)]
    axis_matching: Option<AxisMatching>,

    /// Eigen backend: jacobi | nalgebra
    #[arg(long)]
    solver: Option<Solver>,

    /// Abort a structure's expansion beyond this many atoms
    #[arg(long, env = "FRAMEDIM_MAX_ATOMS", default_value_t = DEFAULT_MAX_ATOMS)]
    max_atoms: usize,

    /// Also write the run summary as JSON
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Tracing filter, e.g. `info` or `framedim_classify=debug`
    #[arg(long, env = "FRAMEDIM_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn classifier_config(&self) -> ClassifierConfig {
        let mut config = ClassifierConfig::from_env();
        if let Some(v) = self.small_cycles {
            config.small_cycles = v;
        }
        if let Some(v) = self.large_cycles {
            config.large_cycles = v;
        }
        if let Some(v) = self.threshold {
            config.threshold = v;
        }
        if let Some(v) = self.epsilon {
            config.epsilon = v;
        }
        if let Some(v) = self.axis_matching {
            config.axis_matching = v;
        }
        if let Some(v) = self.solver {
            config.solver = v;
        }
        config
    }
}

// ─────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    let input = match &cli.input {
        Some(p) => p.clone(),
        None => prompt_path("Identifier list (.gcd): ")?,
    };
    let output = match &cli.output {
        Some(p) => p.clone(),
        None => prompt_path("Output file: ")?,
    };
    let output = csv_output_path(&output);

    let config = cli.classifier_config();
    let classifier = DimensionalityClassifier::new(config).context("invalid classifier settings")?;

    let identifiers = read_identifiers(&input)?;
    info!(
        version       = env!("CARGO_PKG_VERSION"),
        input         = %input.display(),
        output        = %output.display(),
        library       = %cli.library.display(),
        structures    = identifiers.len(),
        small_cycles  = config.small_cycles,
        large_cycles  = config.large_cycles,
        threshold     = config.threshold,
        axis_matching = %config.axis_matching,
        solver        = %config.solver,
        "framedim starting"
    );

    let mut sink = CsvSink::create(&output)?;
    let driver = BatchDriver::new(
        JsonDirectorySource::new(&cli.library),
        classifier,
        PolymerExpander::new(cli.max_atoms),
    )
    .with_progress(progress_bar(cli.no_progress));

    let summary = driver.run(&identifiers, &mut sink)?;

    if let Some(path) = &cli.summary_json {
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
    }

    info!(output = %output.display(), "results written");
    Ok(())
}

fn progress_bar(hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(0);
    if let Ok(style) =
        ProgressStyle::with_template("  {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        bar.set_style(style.progress_chars("=>-"));
    }
    bar
}

fn prompt_path(message: &str) -> Result<PathBuf> {
    let mut stdout = io::stdout();
    write!(stdout, "{message}")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).context("failed to read from stdin")?;
    let line = line.trim();
    if line.is_empty() {
        bail!("no path given");
    }
    Ok(PathBuf::from(line))
}
