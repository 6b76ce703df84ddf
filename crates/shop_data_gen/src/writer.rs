//! CSV serialization of a generated dataset.
//!
//! Every target is checked first, then all five files are staged as
//! temporary files next to their targets and only renamed into place once
//! every file has been written and flushed.

use crate::error::GenerateError;
use crate::records::{Category, Dataset, Order, OrderItem, Product, Record, User};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Files written by [`write_dataset`]
#[derive(Debug, Clone, Default)]
pub struct WriteSummary {
    /// (path, data rows) per file, in dependency order
    pub files: Vec<(PathBuf, usize)>,
}

impl WriteSummary {
    pub fn total_rows(&self) -> usize {
        self.files.iter().map(|(_, rows)| rows).sum()
    }
}

/// Escape a value for CSV
pub fn csv_escape(val: &str) -> String {
    if val.contains(',') || val.contains('"') || val.contains('\n') || val.contains('\r') {
        format!("\"{}\"", val.replace('"', "\"\""))
    } else {
        val.to_string()
    }
}

/// Format a single CSV row (without line terminator)
fn csv_row<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|v| csv_escape(v.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Render a collection as CSV text: header row, then one line per record
pub fn render_csv<R: Record>(records: &[R]) -> String {
    let mut output = String::new();
    output.push_str(&csv_row(R::HEADER));
    output.push('\n');
    for record in records {
        output.push_str(&csv_row(record.fields().as_slice()));
        output.push('\n');
    }
    output
}

fn target_path<R: Record>(dir: &Path) -> PathBuf {
    dir.join(format!("{}.csv", R::TABLE))
}

/// Fail unless the target is absent or a regular file a rename can replace
fn check_target<R: Record>(dir: &Path) -> Result<(), GenerateError> {
    let target = target_path::<R>(dir);
    match std::fs::symlink_metadata(&target) {
        Ok(meta) if !meta.is_file() => Err(GenerateError::TargetNotFile { path: target }),
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(GenerateError::Write {
            path: target,
            source,
        }),
    }
}

/// A file written to a temp location, waiting to be renamed into place
struct StagedFile {
    temp: NamedTempFile,
    target: PathBuf,
    rows: usize,
}

fn stage<R: Record>(dir: &Path, records: &[R]) -> Result<StagedFile, GenerateError> {
    let target = target_path::<R>(dir);
    let write_err = |source| GenerateError::Write {
        path: target.clone(),
        source,
    };

    let temp = NamedTempFile::new_in(dir).map_err(write_err)?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        writer
            .write_all(render_csv(records).as_bytes())
            .map_err(write_err)?;
        writer.flush().map_err(write_err)?;
    }
    temp.as_file().sync_all().map_err(write_err)?;

    Ok(StagedFile {
        temp,
        target,
        rows: records.len(),
    })
}

/// Write all five collections as `<table>.csv` into `dir`.
///
/// Nothing is replaced unless every target is replaceable and all five
/// files were staged successfully; staged temp files are removed on any
/// error.
pub fn write_dataset(dir: &Path, data: &Dataset) -> Result<WriteSummary, GenerateError> {
    if !dir.is_dir() {
        return Err(GenerateError::MissingOutputDir {
            path: dir.to_path_buf(),
        });
    }

    check_target::<Category>(dir)?;
    check_target::<User>(dir)?;
    check_target::<Product>(dir)?;
    check_target::<Order>(dir)?;
    check_target::<OrderItem>(dir)?;

    let staged = vec![
        stage(dir, &data.categories)?,
        stage(dir, &data.users)?,
        stage(dir, &data.products)?,
        stage(dir, &data.orders)?,
        stage(dir, &data.order_items)?,
    ];

    let mut summary = WriteSummary::default();
    for file in staged {
        file.temp
            .persist(&file.target)
            .map_err(|e| GenerateError::Write {
                path: file.target.clone(),
                source: e.error,
            })?;
        summary.files.push((file.target, file.rows));
    }

    Ok(summary)
}
