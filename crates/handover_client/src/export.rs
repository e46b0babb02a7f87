use std::path::{Path, PathBuf};

use handover_core::{to_csv, CsvError, CsvRow};
use thiserror::Error;

use console_logging::console_info;

use crate::{export_filename, AtomicFileWriter, PersistError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub row_count: usize,
    pub output_path: PathBuf,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv encoding failed: {0}")]
    Csv(#[from] CsvError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Encodes `rows` as CSV and saves them as `{dir}/{title}.csv`.
pub fn write_csv_export(
    dir: &Path,
    title: &str,
    rows: &[CsvRow],
) -> Result<ExportSummary, ExportError> {
    let content = to_csv(rows)?;
    let writer = AtomicFileWriter::new(dir.to_path_buf());
    let output_path = writer.write(&export_filename(title), content.as_bytes())?;
    console_info!(
        "Exported {} handover rows to {}",
        rows.len(),
        output_path.display()
    );
    Ok(ExportSummary {
        row_count: rows.len(),
        output_path,
    })
}
