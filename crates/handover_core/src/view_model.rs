use std::collections::BTreeMap;

use crate::progress::StatusPanel;
use crate::status::{Classification, Outcome};
use crate::{HandoverToken, JobStatusRecord, StatusBadge};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConsoleViewModel {
    pub release: Option<String>,
    pub rows: Vec<JobRowView>,
    pub details: BTreeMap<HandoverToken, DetailView>,
    pub list_error: Option<String>,
    pub export: Option<ExportStatus>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub index: usize,
    pub token: HandoverToken,
    pub outcome: Outcome,
    pub badge: StatusBadge,
    pub message: String,
    pub src_uri: String,
    pub tgt_uri: String,
    pub contact: String,
    pub comment: String,
    pub report_time: String,
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Loading,
    Ready(Box<JobDetailView>),
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobDetailView {
    pub record: JobStatusRecord,
    pub classification: Classification,
    pub panel: StatusPanel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    Written { path: String },
    Failed { error: String },
}
