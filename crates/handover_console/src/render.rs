//! Terminal and markup rendering of the console view model.

use chrono::{DateTime, TimeZone};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use handover_core::markup;
use handover_core::{
    annotate, render_progress, ConsoleViewModel, DatabaseOption, DetailView, DropdownPage,
    ExportStatus, JobRowView, JobStatusRecord, ProgressView, Segment, SourceHost, StatusPanel,
};

const MESSAGE_WIDTH: usize = 60;

pub fn jobs_table(view: &ConsoleViewModel) -> String {
    if let Some(error) = &view.list_error {
        return format!("unable to list handovers: {error}");
    }
    if view.rows.is_empty() {
        return match &view.release {
            Some(release) => format!("no handovers for release {release}"),
            None => "no handovers".to_string(),
        };
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "#", "Token", "Status", "Message", "Source", "Target", "Contact", "Reported",
        ]);
    for row in &view.rows {
        table.add_row(vec![
            row.index.to_string(),
            row.token.clone(),
            row.badge.label.to_string(),
            truncate(&row.message, MESSAGE_WIDTH),
            row.src_uri.clone(),
            row.tgt_uri.clone(),
            row.contact.clone(),
            row.report_time.clone(),
        ]);
    }
    table.to_string()
}

/// Plain-text detail for one handover.
pub fn detail_text(token: &str, detail: Option<&DetailView>) -> String {
    match detail {
        None | Some(DetailView::Loading) => format!("{token}: loading"),
        Some(DetailView::Failed { error }) => {
            format!("unable to retrieve data for handover {token}: {error}")
        }
        Some(DetailView::Ready(ready)) => {
            let record = &ready.record;
            let mut lines = vec![
                format!("Handover  {token}"),
                format!("DB        {}", record.src_uri.as_deref().unwrap_or("")),
                format!("Target    {}", record.tgt_uri.as_deref().unwrap_or("")),
                format!("Date      {}", record.report_time.as_deref().unwrap_or("")),
                format!("Email     {}", record.contact.as_deref().unwrap_or("")),
                format!("Comment   {}", record.comment.as_deref().unwrap_or("")),
            ];
            if let Some(phase) = ready.classification.phase {
                lines.push(format!("Phase     {phase}"));
            }
            if ready.classification.metadata_failed {
                lines.push("Metadata  failed".to_string());
            }
            lines.push(format!("Status    {}", plain_message(record)));
            match &ready.panel {
                StatusPanel::Banner { outcome, .. } => {
                    lines.push(format!("Outcome   {outcome}"));
                }
                StatusPanel::InProgress { progress, .. } => {
                    lines.extend(progress_lines(progress));
                }
            }
            lines.join("\n")
        }
    }
}

/// Detail fragment as the web console would place it in the expanded row.
pub fn detail_markup(token: &str, detail: Option<&DetailView>) -> String {
    match detail {
        None | Some(DetailView::Loading) => markup::loading_placeholder(token),
        Some(DetailView::Failed { .. }) => markup::fetch_error_notice(token),
        Some(DetailView::Ready(ready)) => markup::detail_panel(&ready.record),
    }
}

/// Job list as table rows for the web console.
pub fn jobs_markup(view: &ConsoleViewModel) -> String {
    view.rows.iter().map(row_markup).collect::<Vec<_>>().join("\n")
}

fn row_markup(row: &JobRowView) -> String {
    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        markup::expand_icon(row.index),
        markup::handover_link(&row.token),
        markup::status_badge(row.outcome),
        markup::escape_text(&row.src_uri),
        markup::escape_text(&row.tgt_uri),
        markup::escape_text(&row.contact),
        markup::escape_text(&row.report_time)
    )
}

pub fn progress_lines(progress: &ProgressView) -> Vec<String> {
    let mut lines = vec![format!(
        "Progress  {:.0}% ({})",
        progress.percent, progress.completed_label
    )];
    if let Some(datacheck) = &progress.datacheck {
        lines.push(format!(
            "DataCheck running {} / completed {} / failed {} ({}%)",
            datacheck.inprogress, datacheck.completed, datacheck.failed, datacheck.percent
        ));
    }
    lines
}

/// One `watch` line: local time, outcome and progress.
pub fn watch_line<Tz>(at: &DateTime<Tz>, record: &JobStatusRecord) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let progress = render_progress(record);
    format!(
        "[{}] {:<8} {:>4.0}%  {}",
        at.format("%Y-%m-%d %H:%M:%S"),
        progress.outcome.to_string(),
        progress.percent,
        plain_message(record)
    )
}

pub fn export_text(view: &ConsoleViewModel) -> String {
    match &view.export {
        Some(ExportStatus::Written { path }) => {
            format!("exported {} handovers to {path}", view.rows.len())
        }
        Some(ExportStatus::Failed { error }) => format!("export failed: {error}"),
        None => "nothing exported".to_string(),
    }
}

pub fn hosts_table(page: &DropdownPage<SourceHost>) -> String {
    if let Some(error) = &page.error {
        return format!("host lookup failed: {error}");
    }
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Host", "Port", "User", "Active", "URI prefix"]);
    for host in &page.results {
        table.add_row(vec![
            host.name.clone(),
            host.port.clone(),
            host.mysql_user.clone(),
            if host.active { "Active" } else { "Not Active" }.to_string(),
            host.uri_prefix().unwrap_or_default(),
        ]);
    }
    table.to_string()
}

pub fn hosts_markup(page: &DropdownPage<SourceHost>) -> String {
    page.results
        .iter()
        .map(markup::host_option)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn databases_text(page: &DropdownPage<DatabaseOption>) -> String {
    if let Some(error) = &page.error {
        return format!("database lookup failed: {error}");
    }
    page.results
        .iter()
        .map(|option| option.value().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Status message with links shown as `<url>` instead of anchors.
fn plain_message(record: &JobStatusRecord) -> String {
    annotate(record.status_message())
        .into_iter()
        .map(|segment| match segment {
            Segment::Literal(text) => text,
            Segment::Link(url) => format!("<{url}>"),
        })
        .collect()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use handover_core::{update, AppState, JobProgressCounters, Msg};
    use pretty_assertions::assert_eq;

    fn record(token: &str, message: &str) -> JobStatusRecord {
        JobStatusRecord {
            handover_token: Some(token.to_string()),
            message: Some(message.to_string()),
            ..JobStatusRecord::default()
        }
    }

    #[test]
    fn empty_list_names_release() {
        let view = ConsoleViewModel {
            release: Some("112".to_string()),
            ..ConsoleViewModel::default()
        };
        assert_eq!(jobs_table(&view), "no handovers for release 112");
    }

    #[test]
    fn table_lists_badge_labels() {
        let (state, _) = update(
            AppState::new(),
            Msg::JobsLoaded {
                release: None,
                records: vec![record("tok-1", "Handover tok-1 successful")],
            },
        );
        let table = jobs_table(&state.view());
        assert!(table.contains("tok-1"));
        assert!(table.contains("Complete"));
    }

    #[test]
    fn progress_lines_round_percent_and_show_datachecks() {
        let mut running = record("tok-2", "Datachecks running");
        running.progress_complete = Some(1);
        running.progress_total = Some(3);
        running.job_progress = Some(JobProgressCounters {
            inprogress: 2,
            completed: 1,
            failed: 0,
            total: Some(3),
        });
        let lines = progress_lines(&render_progress(&running));
        assert_eq!(
            lines,
            vec![
                "Progress  33% (1 / 3 tasks done..)".to_string(),
                "DataCheck running 2 / completed 1 / failed 0 (34%)".to_string(),
            ]
        );
    }

    #[test]
    fn watch_line_shows_links_plainly() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).single().expect("valid time");
        let line = watch_line(&at, &record("tok-3", "failed, see https://ci/run/9"));
        assert_eq!(line, "[2024-05-01 10:00:00] failure     0%  failed, see <https://ci/run/9>");
    }

    #[test]
    fn missing_detail_markup_is_a_spinner() {
        assert!(detail_markup("tok-4", None).contains("Loading...."));
    }

    #[test]
    fn row_markup_escapes_record_fields() {
        let mut listed = record("tok-5", "Copying");
        listed.contact = Some("<b>someone</b>".to_string());
        let (state, _) = update(
            AppState::new(),
            Msg::JobsLoaded {
                release: None,
                records: vec![listed],
            },
        );
        let html = jobs_markup(&state.view());
        assert!(html.contains("&lt;b&gt;someone"));
        assert!(!html.contains("<b>someone"));
    }

    #[test]
    fn long_messages_are_cut() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
