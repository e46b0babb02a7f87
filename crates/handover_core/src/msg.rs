use crate::{HandoverToken, JobStatusRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Job list for a release arrived from the job API.
    JobsLoaded {
        release: Option<String>,
        records: Vec<JobStatusRecord>,
    },
    /// Job list request failed.
    JobsFailed { error: String },
    /// User expanded a row to see its details.
    RowExpanded { token: HandoverToken },
    /// User collapsed a row.
    RowCollapsed { token: HandoverToken },
    /// Detail fetch for one handover completed.
    DetailLoaded {
        token: HandoverToken,
        record: JobStatusRecord,
    },
    /// Detail fetch for one handover failed.
    DetailFailed { token: HandoverToken, error: String },
    /// User asked for a CSV export of the listed rows.
    ExportRequested { title: String },
    /// Export file was written.
    ExportFinished { path: String },
    /// Export could not be written.
    ExportFailed { error: String },
    /// Render tick.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
