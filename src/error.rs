//! Error taxonomy for the load and report stages.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that abort a pipeline stage. None of them are retried.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An input produced by an earlier stage is missing
    #[error("{} not found. {hint}", path.display())]
    MissingInputFile { path: PathBuf, hint: &'static str },

    /// A CSV header lacks required columns
    #[error("{} is missing fields: {}", path.display(), missing.join(", "))]
    SchemaMismatch { path: PathBuf, missing: Vec<String> },

    /// The store rejected an insert; the whole load was rolled back
    #[error("constraint violation in {table} (row {key}): {message}; load rolled back")]
    ConstraintViolation {
        table: &'static str,
        key: String,
        message: String,
    },

    /// The store file exists but holds no loaded schema
    #[error("{} has no loaded schema. Run `ecom-pipeline load` first.", path.display())]
    StoreNotLoaded { path: PathBuf },

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Store(#[from] duckdb::Error),

    #[error(transparent)]
    Generate(#[from] shop_data_gen::GenerateError),
}
