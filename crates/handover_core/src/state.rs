use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::progress::render_status;
use crate::status::classify_message;
use crate::view_model::{
    ConsoleViewModel, DetailView, ExportStatus, JobDetailView, JobRowView,
};
use crate::{HandoverToken, JobStatusRecord, StatusBadge};

/// Per-row detail slot, keyed by handover token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailSlot {
    Loading,
    Loaded(JobStatusRecord),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    release: Option<String>,
    rows: Vec<JobStatusRecord>,
    details: BTreeMap<HandoverToken, DetailSlot>,
    list_error: Option<String>,
    export: Option<ExportStatus>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ConsoleViewModel {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, record)| self.row_view(index, record))
            .collect();

        let details = self
            .details
            .iter()
            .map(|(token, slot)| (token.clone(), detail_view(slot)))
            .collect();

        ConsoleViewModel {
            release: self.release.clone(),
            rows,
            details,
            list_error: self.list_error.clone(),
            export: self.export.clone(),
            dirty: self.dirty,
        }
    }

    pub fn rows(&self) -> &[JobStatusRecord] {
        &self.rows
    }

    pub fn detail(&self, token: &str) -> Option<&DetailSlot> {
        self.details.get(token)
    }

    /// Returns whether a re-render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_rows(&mut self, release: Option<String>, mut records: Vec<JobStatusRecord>) {
        records.sort_by(newest_first);
        self.details
            .retain(|token, _| records.iter().any(|record| record.token() == token.as_str()));
        self.release = release;
        self.rows = records;
        self.list_error = None;
        self.mark_dirty();
    }

    pub(crate) fn set_list_error(&mut self, error: String) {
        self.list_error = Some(error);
        self.mark_dirty();
    }

    /// Puts the slot into `Loading`; false when a fetch is already in flight.
    pub(crate) fn begin_loading(&mut self, token: &str) -> bool {
        if self.details.get(token) == Some(&DetailSlot::Loading) {
            return false;
        }
        self.details.insert(token.to_string(), DetailSlot::Loading);
        self.mark_dirty();
        true
    }

    pub(crate) fn collapse(&mut self, token: &str) {
        if self.details.remove(token).is_some() {
            self.mark_dirty();
        }
    }

    /// Stores a fetch result, ignoring results for rows collapsed meanwhile.
    pub(crate) fn settle_detail(&mut self, token: &str, slot: DetailSlot) {
        if let Some(existing) = self.details.get_mut(token) {
            *existing = slot;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_export(&mut self, status: ExportStatus) {
        self.export = Some(status);
        self.mark_dirty();
    }

    fn row_view(&self, index: usize, record: &JobStatusRecord) -> JobRowView {
        let classification = classify_message(record.status_message());
        JobRowView {
            index,
            token: record.token().to_string(),
            outcome: classification.outcome,
            badge: StatusBadge::from(classification.outcome),
            message: record.status_message().to_string(),
            src_uri: record.src_uri.clone().unwrap_or_default(),
            tgt_uri: record.tgt_uri.clone().unwrap_or_default(),
            contact: record.contact.clone().unwrap_or_default(),
            comment: record.comment.clone().unwrap_or_default(),
            report_time: record.report_time.clone().unwrap_or_default(),
            expanded: self.details.contains_key(record.token()),
        }
    }
}

fn detail_view(slot: &DetailSlot) -> DetailView {
    match slot {
        DetailSlot::Loading => DetailView::Loading,
        DetailSlot::Failed(error) => DetailView::Failed {
            error: error.clone(),
        },
        DetailSlot::Loaded(record) => DetailView::Ready(Box::new(JobDetailView {
            classification: classify_message(record.status_message()),
            panel: render_status(record),
            record: record.clone(),
        })),
    }
}

// ISO timestamps sort lexically; missing times go last.
fn newest_first(a: &JobStatusRecord, b: &JobStatusRecord) -> Ordering {
    match (a.report_time.as_deref(), b.report_time.as_deref()) {
        (Some(x), Some(y)) => y.cmp(x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.token().cmp(b.token()))
}
