use handover_core::markup::{
    datacheck_badges, detail_panel, expand_icon, fetch_error_notice, handover_link, host_option,
    escape_text, loading_placeholder, status_badge, status_cell,
};
use handover_core::{DatacheckView, JobProgressCounters, JobStatusRecord, Outcome, SourceHost};

fn detail(message: &str) -> JobStatusRecord {
    JobStatusRecord {
        handover_token: Some("605f1191".to_string()),
        message: Some(message.to_string()),
        src_uri: Some("mysql://ensro@prod-1:4525/panthera_tigris_altaica_core_93_1".to_string()),
        contact: Some("maurel@ebi.ac.uk".to_string()),
        report_time: Some("2018-06-27T15:19:08.459".to_string()),
        progress_complete: Some(1),
        progress_total: Some(3),
        ..Default::default()
    }
}

#[test]
fn badges_have_three_states() {
    assert_eq!(
        status_badge(Outcome::Success),
        r#"<span class="badge badge-success">Complete</span><br></br>"#
    );
    assert!(status_badge(Outcome::Failure).contains(">Failed<"));
    assert_eq!(status_badge(Outcome::Running), status_badge(Outcome::Unknown));
    assert!(status_badge(Outcome::Unknown).contains("badge-info\">running<"));
}

#[test]
fn row_fragments_embed_token_and_index() {
    assert_eq!(
        handover_link("abc"),
        r#"<a rel="noopener noreferrer" href="/jobs/abc">abc</a>"#
    );
    assert!(expand_icon(7).contains("row_details(7)"));
    assert!(loading_placeholder("abc").contains(r#"id="abc""#));
    assert!(fetch_error_notice("abc").contains("unable to retrieve data for handover abc"));
}

#[test]
fn success_detail_uses_banner_without_bar() {
    let cell = status_cell(&detail("Metadata load complete, Handover successful"));
    assert!(cell.starts_with(r#"<div class="alert alert-success""#));
    assert!(!cell.contains("progress-bar"));
}

#[test]
fn failure_detail_links_the_report() {
    let cell = status_cell(&detail("Metadata load failed, please see http://meta/jobs/2"));
    assert!(cell.starts_with(r#"<div class="alert alert-danger""#));
    assert!(cell.contains(r#"href="http://meta/jobs/2""#));
}

#[test]
fn running_detail_has_bar_and_datacheck_badges() {
    let mut record = detail("Datachecks in progress, please see: http://dc/jobs/7");
    record.job_progress = Some(JobProgressCounters {
        inprogress: 2,
        completed: 5,
        failed: 1,
        total: Some(8),
    });
    let cell = status_cell(&record);
    assert!(cell.contains("alert-warning"));
    assert!(cell.contains(r#"aria-valuemax="3""#));
    assert!(cell.contains("1 / 3 tasks done.."));
    assert!(cell.contains("Jobs Failed <span class=\"badge badge-light\">1</span>"));
}

#[test]
fn detail_panel_lists_db_date_and_email() {
    let panel = detail_panel(&detail("Copying in progress"));
    assert!(panel.contains(&escape_text(
        "mysql://ensro@prod-1:4525/panthera_tigris_altaica_core_93_1"
    )));
    assert!(panel.contains("2018-06-27T15:19:08.459"));
    assert!(panel.contains("maurel@ebi.ac.uk"));
    assert!(panel.contains("Job status:"));
}

#[test]
fn datacheck_badges_show_counts() {
    let html = datacheck_badges(&DatacheckView {
        inprogress: 3,
        completed: 4,
        failed: 0,
        percent: 50,
    });
    assert!(html.contains("Jobs Running <span class=\"badge badge-light\">3</span>"));
    assert!(html.contains("Jobs completed <span class=\"badge badge-light\">4</span>"));
}

#[test]
fn host_option_marks_activity() {
    let host = SourceHost {
        name: "mysql-ens-general-prod-1".to_string(),
        port: "4525".to_string(),
        mysql_user: "ensro".to_string(),
        active: false,
    };
    let html = host_option(&host);
    assert!(html.contains("badge-danger\">Not Active"));
    assert!(html.contains("<span>mysql-ens-general-prod-1</span>"));
}

#[test]
fn field_values_cannot_inject_markup() {
    let mut record = detail("Copying in progress");
    record.contact = Some(r#"<script>alert("x")</script>"#.to_string());
    let panel = detail_panel(&record);
    assert!(!panel.contains("<script>"));
    assert!(panel.contains("&lt;script&gt;"));

    let link = handover_link(r#"a"onclick="x"#);
    assert!(!link.contains(r#""onclick=""#));
    assert!(fetch_error_notice("<b>").contains("handover &lt;b&gt;"));

    let host = SourceHost {
        name: "<i>host</i>".to_string(),
        port: "3306".to_string(),
        mysql_user: "ensro".to_string(),
        active: true,
    };
    assert!(host_option(&host).contains("<span>&lt;i&gt;host&lt;"));
}
