//! Load command CLI handler.

use anyhow::Context;
use ecom_pipeline::config::PipelineConfig;
use ecom_pipeline::loader::{self, LoadConfig};
use ecom_pipeline::store::Store;
use std::path::PathBuf;

pub fn run(
    data_dir: Option<PathBuf>,
    db: Option<PathBuf>,
    progress: bool,
    config: Option<PathBuf>,
) -> anyhow::Result<()> {
    let file_config = PipelineConfig::load_or_default(config.as_deref())?;

    let load_config = LoadConfig {
        data_dir: data_dir.unwrap_or_else(|| file_config.data_dir()),
        progress,
    };
    let db_path = db.unwrap_or_else(|| file_config.database());

    let mut store = Store::open(&db_path)
        .with_context(|| format!("Cannot open database: {}", db_path.display()))?;

    eprintln!(
        "Loading {} into {}...",
        load_config.data_dir.display(),
        db_path.display()
    );
    let stats = loader::load_all(&mut store, &load_config)?;

    if progress {
        for (table, rows) in &stats.per_table {
            eprintln!("  {}: {} rows", table, rows);
        }
    }
    eprintln!("Loaded {}", stats);

    Ok(())
}
