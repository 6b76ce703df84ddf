//! Generate command CLI handler.

use anyhow::Context;
use ecom_pipeline::config::{parse_start_date, PipelineConfig};
use shop_data_gen::{write_dataset, Generator};
use std::fs;
use std::path::PathBuf;

pub fn run(
    output: Option<PathBuf>,
    seed: Option<u64>,
    start_date: Option<String>,
    day_span: Option<u32>,
    config: Option<PathBuf>,
) -> anyhow::Result<()> {
    let file_config = PipelineConfig::load_or_default(config.as_deref())?;

    let mut gen_config = file_config
        .generator_config()
        .map_err(|e| anyhow::anyhow!(e))?;

    // Flags win over the config file
    if let Some(seed) = seed {
        gen_config.seed = seed;
    }
    if let Some(ref date) = start_date {
        gen_config.start_date = parse_start_date(date).map_err(|e| anyhow::anyhow!(e))?;
    }
    if let Some(span) = day_span {
        gen_config.day_span = span;
    }

    let output_dir = output.unwrap_or_else(|| file_config.data_dir());
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Cannot create output directory: {}", output_dir.display()))?;

    let seed = gen_config.seed;
    let data = Generator::new(gen_config).generate()?;
    let summary = write_dataset(&output_dir, &data)?;

    for (path, rows) in &summary.files {
        eprintln!("  {} ({} rows)", path.display(), rows);
    }
    eprintln!(
        "Generated {} rows across {} files in {} (seed {})",
        summary.total_rows(),
        summary.files.len(),
        output_dir.display(),
        seed
    );

    Ok(())
}
