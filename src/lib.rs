//! Synthetic e-commerce pipeline: load generated CSV files into an embedded
//! DuckDB store and report per-user lifetime spend.
//!
//! Dataset generation lives in the `shop_data_gen` crate.

pub mod config;
pub mod error;
pub mod loader;
pub mod report;
pub mod store;

pub use error::{PipelineError, Result};
