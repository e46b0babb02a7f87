//! IO adapters for the handover console: the job API over HTTP, status
//! polling and CSV export files.
mod api;
mod export;
mod filename;
mod http;
mod persist;
mod poll;
mod types;

pub use api::{ApiSettings, JobApi};
pub use export::{write_csv_export, ExportError, ExportSummary};
pub use filename::export_filename;
pub use http::HttpJobApi;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use poll::{poll_until_terminal, PollOutcome, PollSettings};
pub use types::{ApiError, FailureKind};
