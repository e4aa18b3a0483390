//! Configuration for the `fetch-todo` binary.
//!
//! Loaded from an optional TOML file; every key has a default so an empty
//! file (or no file) targets the public test endpoint.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::client::TodoClient;
use crate::transport::TransportConfig;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_todo_id")]
    pub todo_id: i64,
    /// Total request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_todo_id() -> i64 {
    1
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            todo_id: default_todo_id(),
            timeout_secs: None,
            connect_timeout_secs: None,
        }
    }
}

impl FetchConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn endpoint(&self) -> String {
        TodoClient::new(&self.base_url).todo_url(self.todo_id)
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout_secs.map(Duration::from_secs),
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
        }
    }
}
