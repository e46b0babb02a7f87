use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Database server offered by the copy service's source-host dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceHost {
    pub name: String,
    #[serde(deserialize_with = "port_text")]
    pub port: String,
    #[serde(default)]
    pub mysql_user: String,
    #[serde(default)]
    pub active: bool,
}

impl SourceHost {
    /// `mysql://user@host:port/`, or `None` for hosts that are not active.
    pub fn uri_prefix(&self) -> Option<String> {
        if !self.active {
            return None;
        }
        Some(format!(
            "mysql://{}@{}:{}/",
            self.mysql_user, self.name, self.port
        ))
    }
}

/// Paged envelope returned by the dropdown proxy.
///
/// The proxy answers failures with an empty page and an `error` text rather
/// than an HTTP error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownPage<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatabaseOption {
    Plain(String),
    Labeled {
        #[serde(default)]
        label: Option<String>,
        value: String,
    },
}

impl DatabaseOption {
    pub fn value(&self) -> &str {
        match self {
            DatabaseOption::Plain(value) | DatabaseOption::Labeled { value, .. } => value,
        }
    }
}

fn port_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(number) => Ok(number.to_string()),
        Value::String(text) => Ok(text),
        other => Err(serde::de::Error::custom(format!(
            "expected port number, got {other}"
        ))),
    }
}
