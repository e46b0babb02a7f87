use std::time::Duration;

use handover_core::{classify, JobStatusRecord};

use console_logging::console_debug;

use crate::{ApiError, JobApi};

#[derive(Debug, Clone)]
pub struct PollSettings {
    pub interval: Duration,
    /// Upper bound on fetches; `None` polls until the job settles.
    pub max_polls: Option<u32>,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_polls: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOutcome {
    pub record: JobStatusRecord,
    pub polls: u32,
    /// True when the last record classified as success or failure.
    pub finished: bool,
}

/// Re-fetches one handover until its status is terminal or the poll budget
/// runs out, handing every fetched record to `on_record`.
pub async fn poll_until_terminal<A, F>(
    api: &A,
    token: &str,
    settings: &PollSettings,
    mut on_record: F,
) -> Result<PollOutcome, ApiError>
where
    A: JobApi + ?Sized,
    F: FnMut(&JobStatusRecord),
{
    let mut polls = 0u32;
    loop {
        let record = api.fetch_job(token).await?;
        polls += 1;
        on_record(&record);

        let outcome = classify(record.status_message());
        let finished = outcome.is_terminal();
        let exhausted = settings.max_polls.is_some_and(|max| polls >= max);
        if finished || exhausted {
            console_debug!("Stopped polling {} after {} fetches ({})", token, polls, outcome);
            return Ok(PollOutcome {
                record,
                polls,
                finished,
            });
        }
        tokio::time::sleep(settings.interval).await;
    }
}
