use crate::{CsvRow, HandoverToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the latest job record for one handover.
    FetchDetail { token: HandoverToken },
    /// Serialize and save the listed rows as `{title}.csv`.
    ExportCsv { title: String, rows: Vec<CsvRow> },
}
