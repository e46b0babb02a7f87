use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use handover_client::{ApiSettings, PollSettings};
use serde::{Deserialize, Serialize};

use console_logging::console_info;

use crate::logging::LogDestination;

pub const DEFAULT_CONFIG_FILE: &str = "./handover_console.ron";
pub const URL_ENV: &str = "HANDOVER_URL";
pub const RELEASE_ENV: &str = "ENS_VERSION";

/// Console settings, read from a RON file and overridden by environment and flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub base_url: String,
    pub release: Option<String>,
    pub poll_interval_secs: u64,
    pub max_polls: Option<u32>,
    pub request_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub export_dir: PathBuf,
    pub log_destination: LogDestination,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            base_url: "http://localhost:5000/".to_string(),
            release: None,
            poll_interval_secs: 5,
            max_polls: None,
            request_timeout_secs: api.request_timeout.as_secs(),
            max_response_bytes: api.max_bytes,
            export_dir: PathBuf::from("."),
            log_destination: LogDestination::File,
        }
    }
}

/// Values taken from global command-line flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub export_dir: Option<PathBuf>,
    pub log_destination: Option<LogDestination>,
}

impl ConsoleConfig {
    /// Loads `path`, or the default file when none is given.
    ///
    /// A missing default file yields the defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && !explicit => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("reading config file {}", path.display()));
            }
        };
        let config = Self::parse(&content)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        console_info!("Loaded console config from {:?}", path);
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }

    pub fn to_ron(&self) -> Result<String> {
        let pretty = ron::ser::PrettyConfig::new();
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Applies environment overrides through `lookup`; blank values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(url) = non_blank(URL_ENV) {
            self.base_url = url;
        }
        if let Some(release) = non_blank(RELEASE_ENV) {
            self.release = Some(release);
        }
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(url) = overrides.base_url {
            self.base_url = url;
        }
        if let Some(dir) = overrides.export_dir {
            self.export_dir = dir;
        }
        if let Some(destination) = overrides.log_destination {
            self.log_destination = destination;
        }
    }

    /// Full resolution: file, then process environment, then flags.
    pub fn resolve(path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env(|key| std::env::var(key).ok());
        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            request_timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
            max_bytes: self.max_response_bytes,
            ..ApiSettings::default()
        }
    }

    pub fn poll_settings(&self, interval_secs: Option<u64>, max_polls: Option<u32>) -> PollSettings {
        PollSettings {
            interval: Duration::from_secs(interval_secs.unwrap_or(self.poll_interval_secs)),
            max_polls: max_polls.or(self.max_polls),
        }
    }

    /// Release named on the command line, else the configured one.
    pub fn release_or(&self, flag: Option<String>) -> Option<String> {
        flag.or_else(|| self.release.clone())
    }
}
