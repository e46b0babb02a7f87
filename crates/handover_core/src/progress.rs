use crate::links::annotate_markup;
use crate::record::{JobProgressCounters, JobStatusRecord};
use crate::status::{classify, Outcome};

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    /// `progress_complete / progress_total * 100`; not clamped, never NaN.
    pub percent: f64,
    pub completed_label: String,
    pub outcome: Outcome,
    pub datacheck: Option<DatacheckView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatacheckView {
    pub inprogress: u64,
    pub completed: u64,
    pub failed: u64,
    pub percent: u64,
}

/// What the job detail shows in its "Job status" cell.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusPanel {
    /// Terminal outcome: a flat success or failure banner without a bar.
    Banner { outcome: Outcome, message: String },
    InProgress {
        message: String,
        progress: ProgressView,
    },
}

impl StatusPanel {
    pub fn outcome(&self) -> Outcome {
        match self {
            StatusPanel::Banner { outcome, .. } => *outcome,
            StatusPanel::InProgress { progress, .. } => progress.outcome,
        }
    }

    /// Link-annotated status message.
    pub fn message(&self) -> &str {
        match self {
            StatusPanel::Banner { message, .. } | StatusPanel::InProgress { message, .. } => {
                message
            }
        }
    }
}

pub fn render_progress(record: &JobStatusRecord) -> ProgressView {
    let complete = record.progress_complete.unwrap_or(0);
    let total = record.progress_total.unwrap_or(0);

    ProgressView {
        percent: ratio_percent(complete, total),
        completed_label: format!("{complete} / {total} tasks done.."),
        outcome: classify(record.status_message()),
        datacheck: record.job_progress.as_ref().map(datacheck_view),
    }
}

/// Builds the detail panel: a banner for terminal outcomes, a progress view otherwise.
pub fn render_status(record: &JobStatusRecord) -> StatusPanel {
    let message = annotate_markup(record.status_message());
    let outcome = classify(record.status_message());
    if outcome.is_terminal() {
        StatusPanel::Banner { outcome, message }
    } else {
        StatusPanel::InProgress {
            message,
            progress: render_progress(record),
        }
    }
}

fn datacheck_view(counters: &JobProgressCounters) -> DatacheckView {
    let total = counters.total.unwrap_or(0);
    DatacheckView {
        inprogress: counters.inprogress,
        completed: counters.completed,
        failed: counters.failed,
        percent: ceil_percent(counters.completed, total),
    }
}

/// `ceil(part / total * 100)` in integers; 0 when `total` is 0.
fn ceil_percent(part: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    let percent = (u128::from(part) * 100).div_ceil(u128::from(total));
    u64::try_from(percent).unwrap_or(u64::MAX)
}

fn ratio_percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64) * 100.0
}
