//! Handover core: status classification, view-model formatting and the
//! pure console state machine.
mod csv_export;
mod dropdown;
mod effect;
mod links;
pub mod markup;
mod msg;
mod progress;
mod record;
mod state;
mod status;
mod submission;
mod update;
mod view_model;

pub use csv_export::{records_to_rows, to_csv, CsvError, CsvRow};
pub use dropdown::{DatabaseOption, DropdownPage, SourceHost};
pub use effect::Effect;
pub use links::{annotate, annotate_markup, Segment};
pub use markup::StatusBadge;
pub use msg::Msg;
pub use progress::{render_progress, render_status, DatacheckView, ProgressView, StatusPanel};
pub use record::{HandoverToken, JobProgressCounters, JobStatusRecord};
pub use state::{AppState, DetailSlot};
pub use status::{classify, classify_message, Classification, Outcome, Phase};
pub use submission::{SubmissionError, SubmissionSpec};
pub use update::update;
pub use view_model::{ConsoleViewModel, DetailView, ExportStatus, JobDetailView, JobRowView};
