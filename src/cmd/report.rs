//! Report command CLI handler.

use anyhow::Context;
use ecom_pipeline::config::PipelineConfig;
use ecom_pipeline::report::{compute_totals, OutputFormat, ReportFormatter};
use ecom_pipeline::store::Store;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

pub fn run(
    db: Option<PathBuf>,
    format: String,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
) -> anyhow::Result<()> {
    let file_config = PipelineConfig::load_or_default(config.as_deref())?;

    let output_format: OutputFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let db_path = db.unwrap_or_else(|| file_config.database());

    let store = Store::open_existing(&db_path)?;
    let totals = compute_totals(&store)?;

    if let Some(output_path) = output {
        let file = File::create(&output_path)
            .with_context(|| format!("Cannot create output file: {}", output_path.display()))?;
        let mut writer = BufWriter::new(file);
        ReportFormatter::write(&totals, output_format, &mut writer)?;
        writer.flush()?;
        eprintln!("Wrote {} rows to {}", totals.len(), output_path.display());
    } else {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        ReportFormatter::write(&totals, output_format, &mut handle)?;
    }

    Ok(())
}
