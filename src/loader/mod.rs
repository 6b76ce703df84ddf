//! CSV dataset loader for importing generated files into the store.
//!
//! A load is a full refresh: all five files are read and header-checked
//! first, then the schema reset and every insert run inside one
//! transaction. Any rejected row rolls the whole transaction back, leaving
//! the store as it was before the load.

pub mod csv;

pub use csv::{CsvRecord, CsvTable};

use crate::error::{PipelineError, Result};
use crate::store::{reset_sql, Store, TableSpec, LOAD_ORDER};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Loader settings
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Directory holding the five `<table>.csv` files
    pub data_dir: PathBuf,
    /// Show a progress bar while inserting
    pub progress: bool,
}

/// Statistics from a completed load
#[derive(Debug, Default, Clone)]
pub struct LoadStats {
    /// Number of tables populated
    pub tables_loaded: usize,
    /// Total rows inserted
    pub rows_inserted: u64,
    /// Rows per table, in load order
    pub per_table: Vec<(&'static str, u64)>,
    /// Load duration in seconds
    pub duration_secs: f64,
}

impl std::fmt::Display for LoadStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} tables, {} rows in {:.2}s",
            self.tables_loaded, self.rows_inserted, self.duration_secs
        )
    }
}

/// Path of a table's input file inside `dir`
pub fn input_path(dir: &Path, spec: &TableSpec) -> PathBuf {
    dir.join(format!("{}.csv", spec.name))
}

/// Parse a CSV file into records, failing if the header lacks any of
/// `required_fields`. Values are not checked here; the store checks them
/// on insert.
pub fn read_and_validate(path: &Path, required_fields: &[&str]) -> Result<Vec<CsvRecord>> {
    if !path.exists() {
        return Err(PipelineError::MissingInputFile {
            path: path.to_path_buf(),
            hint: "Run `ecom-pipeline generate` first.",
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let table = csv::parse_table(&content).map_err(|message| PipelineError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, message),
    })?;

    let present: BTreeSet<&str> = table.header.iter().map(|h| h.as_str()).collect();
    let missing: BTreeSet<&str> = required_fields
        .iter()
        .copied()
        .filter(|field| !present.contains(field))
        .collect();

    if !missing.is_empty() {
        return Err(PipelineError::SchemaMismatch {
            path: path.to_path_buf(),
            missing: missing.into_iter().map(String::from).collect(),
        });
    }

    Ok(table.records)
}

/// Loads the five CSV files into a store
pub struct DatasetLoader<'a> {
    store: &'a mut Store,
    config: &'a LoadConfig,
}

impl<'a> DatasetLoader<'a> {
    /// Create a new dataset loader
    pub fn new(store: &'a mut Store, config: &'a LoadConfig) -> Self {
        Self { store, config }
    }

    /// Read all files, then reset the schema and insert everything in one
    /// transaction.
    pub fn load_all(self) -> Result<LoadStats> {
        let start = Instant::now();

        // Read everything before touching the store
        let mut inputs = Vec::with_capacity(LOAD_ORDER.len());
        for spec in LOAD_ORDER.iter() {
            let path = input_path(&self.config.data_dir, spec);
            let records = read_and_validate(&path, spec.columns)?;
            inputs.push((spec, records));
        }

        let total_rows: usize = inputs.iter().map(|(_, records)| records.len()).sum();
        let progress_bar = if self.config.progress {
            let pb = ProgressBar::new(total_rows as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rows {msg}")
            {
                pb.set_style(style.progress_chars("=>-"));
            }
            Some(pb)
        } else {
            None
        };

        let mut stats = LoadStats::default();

        // Reset and inserts commit together; dropping `tx` on any early
        // return restores the pre-load tables
        let tx = self.store.connection_mut().transaction()?;
        tx.execute_batch(&reset_sql())?;

        for (spec, records) in &inputs {
            if let Some(ref pb) = progress_bar {
                pb.set_message(spec.name);
            }

            let mut stmt = tx.prepare(spec.insert_sql)?;
            for record in records {
                let values: Vec<Option<&str>> =
                    spec.columns.iter().map(|column| record.get(column)).collect();

                stmt.execute(duckdb::params_from_iter(values))
                    .map_err(|e| PipelineError::ConstraintViolation {
                        table: spec.name,
                        key: record.get(spec.columns[0]).unwrap_or("?").to_string(),
                        message: e.to_string(),
                    })?;

                if let Some(ref pb) = progress_bar {
                    pb.inc(1);
                }
            }

            stats.per_table.push((spec.name, records.len() as u64));
            stats.rows_inserted += records.len() as u64;
            stats.tables_loaded += 1;
        }

        tx.commit().map_err(|e| PipelineError::ConstraintViolation {
            table: "commit",
            key: "-".to_string(),
            message: e.to_string(),
        })?;

        if let Some(pb) = progress_bar {
            pb.finish_with_message("Load complete");
        }

        stats.duration_secs = start.elapsed().as_secs_f64();
        Ok(stats)
    }
}

/// Convenience wrapper: load `config.data_dir` into `store`
pub fn load_all(store: &mut Store, config: &LoadConfig) -> Result<LoadStats> {
    DatasetLoader::new(store, config).load_all()
}
