use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Unique identifier of one handover job, used as display key and API path segment.
pub type HandoverToken = String;

/// One job report as served by the job API list and detail endpoints.
///
/// Every field is optional on the wire. Counters accept numbers or numeric
/// strings and silently degrade to `None` when they hold anything else.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JobStatusRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub handover_token: Option<HandoverToken>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub current_message: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub src_uri: Option<String>,
    #[serde(default)]
    pub tgt_uri: Option<String>,
    #[serde(default)]
    pub report_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub progress_complete: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub progress_total: Option<u64>,
    #[serde(default, deserialize_with = "lenient_counters")]
    pub job_progress: Option<JobProgressCounters>,
}

impl JobStatusRecord {
    /// Latest status message: `message` from the detail endpoint, falling back
    /// to `current_message` from the list endpoint.
    pub fn status_message(&self) -> &str {
        self.message
            .as_deref()
            .or(self.current_message.as_deref())
            .unwrap_or("")
    }

    pub fn token(&self) -> &str {
        self.handover_token.as_deref().unwrap_or("")
    }
}

/// Datacheck sub-task counters nested in a job record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JobProgressCounters {
    #[serde(default, deserialize_with = "lenient_count_or_zero")]
    pub inprogress: u64,
    #[serde(default, deserialize_with = "lenient_count_or_zero")]
    pub completed: u64,
    #[serde(default, deserialize_with = "lenient_count_or_zero")]
    pub failed: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total: Option<u64>,
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(count_from_value))
}

fn lenient_count_or_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_count(deserializer)?.unwrap_or(0))
}

fn lenient_counters<'de, D>(deserializer: D) -> Result<Option<JobProgressCounters>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

fn count_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f as u64)
        }),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accept_numeric_strings() {
        let record: JobStatusRecord =
            serde_json::from_str(r#"{"progress_complete": "2", "progress_total": 4}"#).unwrap();
        assert_eq!(record.progress_complete, Some(2));
        assert_eq!(record.progress_total, Some(4));
    }

    #[test]
    fn malformed_counters_degrade_to_absent() {
        let record: JobStatusRecord = serde_json::from_str(
            r#"{"progress_complete": -3, "progress_total": {"x": 1}, "job_progress": "n/a"}"#,
        )
        .unwrap();
        assert_eq!(record.progress_complete, None);
        assert_eq!(record.progress_total, None);
        assert_eq!(record.job_progress, None);
    }

    #[test]
    fn status_message_prefers_detail_message() {
        let record = JobStatusRecord {
            message: Some("detail".to_string()),
            current_message: Some("list".to_string()),
            ..Default::default()
        };
        assert_eq!(record.status_message(), "detail");

        let record = JobStatusRecord {
            current_message: Some("list".to_string()),
            ..Default::default()
        };
        assert_eq!(record.status_message(), "list");
        assert_eq!(JobStatusRecord::default().status_message(), "");
    }
}
