use std::time::Duration;

use handover_core::{
    DatabaseOption, DropdownPage, HandoverToken, JobStatusRecord, SourceHost, SubmissionSpec,
};

use crate::ApiError;

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// The handover job API as seen by the console.
#[async_trait::async_trait]
pub trait JobApi: Send + Sync {
    /// Latest report of every handover, optionally for one release.
    async fn list_jobs(&self, release: Option<&str>) -> Result<Vec<JobStatusRecord>, ApiError>;

    /// Latest report of one handover.
    async fn fetch_job(&self, token: &str) -> Result<JobStatusRecord, ApiError>;

    /// Source servers whose name matches `name`.
    async fn source_hosts(&self, name: &str) -> Result<DropdownPage<SourceHost>, ApiError>;

    /// Databases on `host:port` matching `search`.
    async fn databases(
        &self,
        host: &str,
        port: &str,
        search: &str,
    ) -> Result<DropdownPage<DatabaseOption>, ApiError>;

    /// Starts a handover and returns its token.
    async fn submit(&self, spec: &SubmissionSpec) -> Result<HandoverToken, ApiError>;
}
