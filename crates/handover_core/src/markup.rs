//! HTML fragments handed back to the table-display collaborator.
//!
//! Every function here is a pure formatter of `(value, row, index)` data; the
//! caller decides where the fragment is placed.

use crate::dropdown::SourceHost;
use crate::progress::{render_status, DatacheckView, ProgressView, StatusPanel};
use crate::record::JobStatusRecord;
use crate::status::Outcome;
use v_htmlescape::escape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: &'static str,
    pub class: &'static str,
}

impl From<Outcome> for StatusBadge {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => StatusBadge {
                label: "Complete",
                class: "badge-success",
            },
            Outcome::Failure => StatusBadge {
                label: "Failed",
                class: "badge-danger",
            },
            Outcome::Running | Outcome::Unknown => StatusBadge {
                label: "running",
                class: "badge-info",
            },
        }
    }
}

pub fn status_badge(outcome: Outcome) -> String {
    let badge = StatusBadge::from(outcome);
    format!(
        r#"<span class="badge {}">{}</span><br></br>"#,
        badge.class, badge.label
    )
}

pub fn handover_link(token: &str) -> String {
    let token = escape(token);
    format!(r#"<a rel="noopener noreferrer" href="/jobs/{token}">{token}</a>"#)
}

pub fn expand_icon(index: usize) -> String {
    format!(
        r#"<span title="Click for more info" style="cursor: pointer; color:blue" class="fas fa-plus" onclick="row_details({index})">+</span>"#
    )
}

/// Placeholder shown in a row's detail slot while the job record is fetched.
pub fn loading_placeholder(token: &str) -> String {
    let token = escape(token);
    format!(
        r#"<div class="row n-4" id="{token}"><div class="spinner-border text-primary" role="status"><span class="sr-only">Loading...</span></div>Loading....</div>"#
    )
}

/// Error notice scoped to one handover; the rest of the page is untouched.
pub fn fetch_error_notice(token: &str) -> String {
    let token = escape(token);
    format!(
        r#"<div class="alert alert-danger m-4" role="alert">unable to retrieve data for handover {token}</div>"#
    )
}

pub fn progress_bar(view: &ProgressView, total: u64) -> String {
    format!(
        r#"<div class="progress"><div class="progress-bar progress-bar-striped progress-bar-animated bg-info" role="progressbar" style="width: {}%" aria-valuenow="0" aria-valuemin="0" aria-valuemax="{total}">{}</div></div>"#,
        view.percent, view.completed_label
    )
}

pub fn datacheck_badges(view: &DatacheckView) -> String {
    format!(
        concat!(
            r#"<div class="row m-2"><div class="alert alert-dark" role="alert">DataCheck: "#,
            r#"<span class="badge badge-warning">Jobs Running <span class="badge badge-light">{}</span></span> "#,
            r#"<span class="badge badge-success">Jobs completed <span class="badge badge-light">{}</span></span> "#,
            r#"<span class="badge badge-danger">Jobs Failed <span class="badge badge-light">{}</span></span>"#,
            r#"</div></div>"#
        ),
        view.inprogress, view.completed, view.failed
    )
}

/// The "Job status" cell: banner for terminal outcomes, warning plus bar otherwise.
pub fn status_cell(record: &JobStatusRecord) -> String {
    match render_status(record) {
        StatusPanel::Banner { outcome, message } => {
            let class = if outcome == Outcome::Success {
                "alert-success"
            } else {
                "alert-danger"
            };
            format!(r#"<div class="alert {class}" role="alert">{message}</div>"#)
        }
        StatusPanel::InProgress { message, progress } => {
            let mut cell =
                format!(r#"<div class="alert alert-warning" role="alert">{message}</div>"#);
            cell.push_str(&progress_bar(
                &progress,
                record.progress_total.unwrap_or(0),
            ));
            cell.push_str("<div>");
            if let Some(datacheck) = &progress.datacheck {
                cell.push_str(&datacheck_badges(datacheck));
            }
            cell.push_str("</div>");
            cell
        }
    }
}

/// Expanded row detail: DB, Date, Email and Job status.
///
/// Field values are HTML-escaped; the status cell is already markup.
pub fn detail_panel(record: &JobStatusRecord) -> String {
    let rows = [
        ("DB", escape_text(record.src_uri.as_deref().unwrap_or(""))),
        ("Date", escape_text(record.report_time.as_deref().unwrap_or(""))),
        ("Email", escape_text(record.contact.as_deref().unwrap_or(""))),
        ("Job status:", status_cell(record)),
    ];
    let body: String = rows
        .iter()
        .map(|(label, value)| {
            format!(r#"<tr><td class="bg-secondary">{label}</td><td>{value}</td></tr>"#)
        })
        .collect();
    format!(
        r#"<div class="row m-2"><div class="col-12 m-1"><div class="card m-1"><div class="card-header">Details</div><div class="card-body"><table class="table"><tbody>{body}</tbody></table></div></div></div></div>"#
    )
}

/// Autocomplete entry for a source host, with its active/inactive pill.
pub fn host_option(host: &SourceHost) -> String {
    let (class, label) = if host.active {
        ("badge-success", "Active")
    } else {
        ("badge-danger", "Not Active")
    };
    format!(
        r#"<li><span class="badge badge-pill {class}">{label}</span> <span>{}</span></li>"#,
        escape(&host.name)
    )
}

/// Plain value made safe for an HTML text node or quoted attribute.
pub fn escape_text(value: &str) -> String {
    escape(value).to_string()
}
