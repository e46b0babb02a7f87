use std::path::PathBuf;

use console_logging::{console_info, console_warn};
use handover_client::{write_csv_export, JobApi};
use handover_core::{Effect, Msg};

/// Executes core effects against the job API and the export directory,
/// turning each outcome back into a message.
pub struct EffectRunner<A> {
    api: A,
    export_dir: PathBuf,
}

impl<A: JobApi> EffectRunner<A> {
    pub fn new(api: A, export_dir: PathBuf) -> Self {
        Self { api, export_dir }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn run(&self, effect: Effect) -> Msg {
        match effect {
            Effect::FetchDetail { token } => match self.api.fetch_job(&token).await {
                Ok(record) => Msg::DetailLoaded { token, record },
                Err(err) => {
                    console_warn!("Detail fetch for {} failed: {}", token, err);
                    Msg::DetailFailed {
                        token,
                        error: err.to_string(),
                    }
                }
            },
            Effect::ExportCsv { title, rows } => {
                console_info!("ExportCsv title={} rows={}", title, rows.len());
                match write_csv_export(&self.export_dir, &title, &rows) {
                    Ok(summary) => Msg::ExportFinished {
                        path: summary.output_path.display().to_string(),
                    },
                    Err(err) => {
                        console_warn!("Export {} failed: {}", title, err);
                        Msg::ExportFailed {
                            error: err.to_string(),
                        }
                    }
                }
            }
        }
    }
}
