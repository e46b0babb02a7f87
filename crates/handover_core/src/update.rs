use crate::state::DetailSlot;
use crate::view_model::ExportStatus;
use crate::{records_to_rows, AppState, Effect, Msg};

const DEFAULT_EXPORT_TITLE: &str = "export";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::JobsLoaded { release, records } => {
            state.set_rows(release, records);
            Vec::new()
        }
        Msg::JobsFailed { error } => {
            state.set_list_error(error);
            Vec::new()
        }
        Msg::RowExpanded { token } => {
            let token = token.trim().to_string();
            if token.is_empty() || !state.begin_loading(&token) {
                return (state, Vec::new());
            }
            vec![Effect::FetchDetail { token }]
        }
        Msg::RowCollapsed { token } => {
            state.collapse(&token);
            Vec::new()
        }
        Msg::DetailLoaded { token, record } => {
            state.settle_detail(&token, DetailSlot::Loaded(record));
            Vec::new()
        }
        Msg::DetailFailed { token, error } => {
            state.settle_detail(&token, DetailSlot::Failed(error));
            Vec::new()
        }
        Msg::ExportRequested { title } => {
            if state.rows().is_empty() {
                state.set_export(ExportStatus::Failed {
                    error: "nothing to export".to_string(),
                });
                return (state, Vec::new());
            }
            match records_to_rows(state.rows()) {
                Ok(rows) => vec![Effect::ExportCsv {
                    title: export_title(&title),
                    rows,
                }],
                Err(err) => {
                    state.set_export(ExportStatus::Failed {
                        error: err.to_string(),
                    });
                    Vec::new()
                }
            }
        }
        Msg::ExportFinished { path } => {
            state.set_export(ExportStatus::Written { path });
            Vec::new()
        }
        Msg::ExportFailed { error } => {
            state.set_export(ExportStatus::Failed { error });
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn export_title(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_EXPORT_TITLE.to_string()
    } else {
        trimmed.to_string()
    }
}
