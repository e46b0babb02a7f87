use std::sync::Once;

use handover_core::{
    update, AppState, DetailSlot, DetailView, Effect, ExportStatus, JobStatusRecord, Msg, Outcome,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(console_logging::initialize_for_tests);
}

fn listed(token: &str, message: &str, report_time: &str) -> JobStatusRecord {
    JobStatusRecord {
        handover_token: Some(token.to_string()),
        current_message: Some(message.to_string()),
        report_time: Some(report_time.to_string()),
        ..Default::default()
    }
}

fn loaded_state() -> AppState {
    let (mut state, effects) = update(
        AppState::new(),
        Msg::JobsLoaded {
            release: Some("104".to_string()),
            records: vec![
                listed("old", "Copying complete, Handover successful", "2021-01-01T10:00:00.000"),
                listed("new", "Copy failed, please see: http://c/1", "2021-03-01T10:00:00.000"),
                listed("mid", "Handling {...}", "2021-02-01T10:00:00.000"),
            ],
        },
    );
    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    state
}

#[test]
fn jobs_are_listed_newest_first_with_badges() {
    init_logging();
    let state = loaded_state();
    let view = state.view();

    let tokens: Vec<_> = view.rows.iter().map(|row| row.token.as_str()).collect();
    assert_eq!(tokens, vec!["new", "mid", "old"]);
    let outcomes: Vec<_> = view.rows.iter().map(|row| row.outcome).collect();
    assert_eq!(outcomes, vec![Outcome::Failure, Outcome::Running, Outcome::Success]);
    assert_eq!(view.rows[0].badge.label, "Failed");
    assert_eq!(view.rows[2].badge.label, "Complete");
    assert_eq!(view.release.as_deref(), Some("104"));
    assert!(view.rows.iter().all(|row| !row.expanded));
}

#[test]
fn expanding_a_row_fetches_its_detail_once() {
    init_logging();
    let state = loaded_state();
    let (mut state, effects) = update(
        state,
        Msg::RowExpanded {
            token: "mid".to_string(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::FetchDetail {
            token: "mid".to_string()
        }]
    );
    assert!(state.consume_dirty());
    assert_eq!(state.view().details.get("mid"), Some(&DetailView::Loading));

    // A second click while loading does not start another fetch.
    let (state, effects) = update(
        state,
        Msg::RowExpanded {
            token: "mid".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert!(state.view().rows.iter().any(|row| row.token == "mid" && row.expanded));
}

#[test]
fn blank_token_is_ignored() {
    let (state, effects) = update(
        AppState::new(),
        Msg::RowExpanded {
            token: "  ".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert!(state.view().details.is_empty());
}

#[test]
fn loaded_detail_renders_status_panel() {
    init_logging();
    let (state, _) = update(
        loaded_state(),
        Msg::RowExpanded {
            token: "mid".to_string(),
        },
    );
    let record = JobStatusRecord {
        handover_token: Some("mid".to_string()),
        message: Some("Metadata load failed, please see http://meta/jobs/1".to_string()),
        progress_complete: Some(2),
        progress_total: Some(3),
        ..Default::default()
    };
    let (mut state, _) = update(
        state,
        Msg::DetailLoaded {
            token: "mid".to_string(),
            record: record.clone(),
        },
    );
    assert!(state.consume_dirty());
    assert_eq!(state.detail("mid"), Some(&DetailSlot::Loaded(record)));

    match state.view().details.get("mid") {
        Some(DetailView::Ready(detail)) => {
            assert_eq!(detail.panel.outcome(), Outcome::Failure);
            assert!(detail.classification.metadata_failed);
        }
        other => panic!("expected ready detail, got {other:?}"),
    }
}

#[test]
fn detail_failure_is_scoped_to_its_row() {
    init_logging();
    let (state, _) = update(
        loaded_state(),
        Msg::RowExpanded {
            token: "mid".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::RowExpanded {
            token: "old".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::DetailFailed {
            token: "mid".to_string(),
            error: "http status 500".to_string(),
        },
    );
    let view = state.view();
    assert_eq!(
        view.details.get("mid"),
        Some(&DetailView::Failed {
            error: "http status 500".to_string()
        })
    );
    assert_eq!(view.details.get("old"), Some(&DetailView::Loading));
    assert_eq!(view.rows.len(), 3);
    assert_eq!(view.list_error, None);
}

#[test]
fn results_for_collapsed_rows_are_dropped() {
    let (state, _) = update(
        loaded_state(),
        Msg::RowExpanded {
            token: "old".to_string(),
        },
    );
    let (mut state, _) = update(
        state,
        Msg::RowCollapsed {
            token: "old".to_string(),
        },
    );
    assert!(state.consume_dirty());
    let (mut state, _) = update(
        state,
        Msg::DetailLoaded {
            token: "old".to_string(),
            record: JobStatusRecord::default(),
        },
    );
    assert!(!state.consume_dirty());
    assert_eq!(state.detail("old"), None);
}

#[test]
fn reloading_the_list_drops_details_of_vanished_rows() {
    let (state, _) = update(
        loaded_state(),
        Msg::RowExpanded {
            token: "old".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::JobsLoaded {
            release: Some("105".to_string()),
            records: vec![listed("new", "Handling", "2021-03-01T10:00:00.000")],
        },
    );
    assert!(state.view().details.is_empty());
    assert_eq!(state.view().release.as_deref(), Some("105"));
}

#[test]
fn list_failure_is_reported() {
    let (state, _) = update(
        AppState::new(),
        Msg::JobsFailed {
            error: "network error".to_string(),
        },
    );
    assert_eq!(state.view().list_error.as_deref(), Some("network error"));
}

#[test]
fn export_emits_rows_for_listed_jobs() {
    let (state, effects) = update(
        loaded_state(),
        Msg::ExportRequested {
            title: "  ".to_string(),
        },
    );
    match effects.as_slice() {
        [Effect::ExportCsv { title, rows }] => {
            assert_eq!(title, "export");
            assert_eq!(rows.len(), 3);
            assert_eq!(rows[0]["handover_token"], "new");
        }
        other => panic!("expected one export effect, got {other:?}"),
    }

    let (state, _) = update(
        state,
        Msg::ExportFinished {
            path: "out/export.csv".to_string(),
        },
    );
    assert_eq!(
        state.view().export,
        Some(ExportStatus::Written {
            path: "out/export.csv".to_string()
        })
    );
}

#[test]
fn export_without_rows_fails_without_effect() {
    let (state, effects) = update(
        AppState::new(),
        Msg::ExportRequested {
            title: "handovers".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert!(matches!(
        state.view().export,
        Some(ExportStatus::Failed { .. })
    ));
}

#[test]
fn tick_and_noop_change_nothing() {
    let state = loaded_state();
    let before = state.clone();
    let (state, effects) = update(state, Msg::Tick);
    let (mut state, more) = update(state, Msg::NoOp);
    assert!(effects.is_empty() && more.is_empty());
    assert!(!state.consume_dirty());
    assert_eq!(state, before);
}
