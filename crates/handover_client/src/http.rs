use futures_util::StreamExt;
use handover_core::{
    DatabaseOption, DropdownPage, HandoverToken, JobStatusRecord, SourceHost, SubmissionSpec,
};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use console_logging::{console_api, console_warn};

use crate::{ApiError, ApiSettings, FailureKind, JobApi};

/// [`JobApi`] over the handover service's REST endpoints.
#[derive(Debug, Clone)]
pub struct HttpJobApi {
    base: Url,
    settings: ApiSettings,
    client: reqwest::Client,
}

impl HttpJobApi {
    pub fn new(base_url: &str, settings: ApiSettings) -> Result<Self, ApiError> {
        let base = Url::parse(base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::new(FailureKind::InvalidUrl, base_url));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            base,
            settings,
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Appends percent-encoded path segments and query pairs to the base URL.
    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        console_api!("GET {}", url);
        let response = self
            .client
            .get(url.as_str())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;
        self.decode(response).await
    }

    async fn post_json<T: DeserializeOwned>(&self, url: Url, body: Vec<u8>) -> Result<T, ApiError> {
        console_api!("POST {} ({} bytes)", url, body.len());
        let response = self
            .client
            .post(url.as_str())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        self.decode(response).await
    }

    async fn decode<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::new(FailureKind::NotFound, response.url().to_string()));
        }
        if !status.is_success() {
            console_warn!("Job API answered {} for {}", status, response.url());
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        let bytes = self.read_capped(response).await?;
        serde_json::from_slice(&bytes)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
    }

    async fn read_capped(&self, response: reqwest::Response) -> Result<Vec<u8>, ApiError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl JobApi for HttpJobApi {
    async fn list_jobs(&self, release: Option<&str>) -> Result<Vec<JobStatusRecord>, ApiError> {
        let mut query = vec![("format", "json")];
        if let Some(release) = release {
            query.push(("release", release));
        }
        self.get_json(self.endpoint(&["jobs"], &query)).await
    }

    async fn fetch_job(&self, token: &str) -> Result<JobStatusRecord, ApiError> {
        let url = self.endpoint(&["jobs", token], &[("format", "json")]);
        let records: Vec<JobStatusRecord> = self.get_json(url).await?;
        records
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::new(FailureKind::NotFound, format!("handover {token}")))
    }

    async fn source_hosts(&self, name: &str) -> Result<DropdownPage<SourceHost>, ApiError> {
        let url = self.endpoint(&["jobs", "dropdown", "src_host"], &[("name", name)]);
        self.get_json(url).await
    }

    async fn databases(
        &self,
        host: &str,
        port: &str,
        search: &str,
    ) -> Result<DropdownPage<DatabaseOption>, ApiError> {
        let url = self.endpoint(
            &["jobs", "dropdown", "databases", host, port],
            &[("search", search)],
        );
        let listing: DatabaseListing = self.get_json(url).await?;
        Ok(listing.into_page())
    }

    async fn submit(&self, spec: &SubmissionSpec) -> Result<HandoverToken, ApiError> {
        let body = serde_json::to_vec(spec)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;
        let ticket: Value = self.post_json(self.endpoint(&["jobs"], &[]), body).await?;
        match ticket {
            Value::String(token) => Ok(token),
            Value::Null => Err(ApiError::new(FailureKind::Decode, "empty ticket")),
            other => Ok(other.to_string()),
        }
    }
}

/// The database dropdown answers a bare list, or the paged envelope on errors.
#[derive(Deserialize)]
#[serde(untagged)]
enum DatabaseListing {
    List(Vec<DatabaseOption>),
    Page(DropdownPage<DatabaseOption>),
}

impl DatabaseListing {
    fn into_page(self) -> DropdownPage<DatabaseOption> {
        match self {
            DatabaseListing::List(results) => DropdownPage {
                count: results.len() as u64,
                next: None,
                previous: None,
                results,
                error: None,
            },
            DatabaseListing::Page(page) => page,
        }
    }
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> ApiError {
    ApiError::new(
        FailureKind::TooLarge { max_bytes, actual },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Decode, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
