use std::collections::VecDeque;

use handover_client::JobApi;
use handover_core::{update, AppState, ConsoleViewModel, Msg};

use console_logging::console_debug;

use crate::effects::EffectRunner;

/// Drives the core state machine, feeding effect results back in until the
/// message queue drains.
pub struct Console<A> {
    state: AppState,
    effects: EffectRunner<A>,
}

impl<A: JobApi> Console<A> {
    pub fn new(effects: EffectRunner<A>) -> Self {
        Self {
            state: AppState::new(),
            effects,
        }
    }

    pub fn api(&self) -> &A {
        self.effects.api()
    }

    /// Returns the view when the state changed.
    pub async fn dispatch(&mut self, msg: Msg) -> Option<ConsoleViewModel> {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            for effect in effects {
                console_debug!("Running effect {}", effect_name(&effect));
                inbox.push_back(self.effects.run(effect).await);
            }
        }

        if self.state.consume_dirty() {
            Some(self.state.view())
        } else {
            None
        }
    }

    pub fn view(&self) -> ConsoleViewModel {
        self.state.view()
    }

    /// Loads the job list for `release` into the state.
    pub async fn load_jobs(&mut self, release: Option<String>) -> ConsoleViewModel {
        let msg = match self.api().list_jobs(release.as_deref()).await {
            Ok(records) => Msg::JobsLoaded { release, records },
            Err(err) => Msg::JobsFailed {
                error: err.to_string(),
            },
        };
        self.dispatch(msg).await.unwrap_or_else(|| self.view())
    }
}

fn effect_name(effect: &handover_core::Effect) -> &'static str {
    match effect {
        handover_core::Effect::FetchDetail { .. } => "FetchDetail",
        handover_core::Effect::ExportCsv { .. } => "ExportCsv",
    }
}
