//! # framedim-batch
//!
//! Classifies every structure named in an identifier list and writes one CSV
//! row per identifier.
//!
//! | Item | Purpose |
//! |---|---|
//! | [`read_identifiers`] | `.gcd` list → identifiers |
//! | [`BatchDriver`] | fetch → components → classify, one structure at a time |
//! | [`ResultSink`] / [`CsvSink`] | row output, flushed per row |
//! | [`BatchSummary`] | run counters |

pub mod driver;
pub mod error;
pub mod ids;
pub mod sink;

pub use driver::{BatchDriver, BatchSummary, RowOutcome, StructureReport};
pub use error::BatchError;
pub use ids::{parse_identifiers, read_identifiers};
pub use sink::{csv_field, csv_output_path, CsvSink, ResultRow, ResultSink, CSV_HEADER};
