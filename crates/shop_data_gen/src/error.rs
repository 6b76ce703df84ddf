//! Error types for dataset generation and serialization.

use chrono::NaiveDateTime;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while generating or writing a dataset.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A child collection was requested but its parent collection is empty,
    /// so no foreign key could be sampled.
    #[error("cannot generate {count} {child}: no {parent} to reference")]
    EmptyParent {
        child: &'static str,
        parent: &'static str,
        count: usize,
    },

    /// `start_date + day_span` (plus the last day's seconds) falls outside
    /// the representable date range.
    #[error("timestamp window of {day_span} days from {start} overflows the calendar")]
    WindowOverflow { start: NaiveDateTime, day_span: u32 },

    /// The output directory does not exist or is not a directory.
    #[error("output directory does not exist: {}", path.display())]
    MissingOutputDir { path: PathBuf },

    /// A target path exists but is not a regular file, so it cannot be
    /// replaced.
    #[error("cannot replace {}: not a regular file", path.display())]
    TargetNotFile { path: PathBuf },

    /// Writing or persisting one of the CSV files failed.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
