//! Static data source: a local directory or an HTTP base URL.
//!
//! Every resource (`quran.json`, `translation-en.json`, ...) is a single
//! JSON document fetched whole. There are no retries; a failed fetch is
//! reported once and the caller decides what to do.

use std::path::PathBuf;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::DataConfig;
use crate::error::LoadError;

#[derive(Debug, Clone)]
pub enum DataSource {
    Local(PathBuf),
    Http {
        base: String,
        client: reqwest::Client,
    },
}

impl DataSource {
    pub fn from_config(config: &DataConfig) -> Result<Self, LoadError> {
        if config.is_remote() {
            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .map_err(|e| LoadError::DataSourceFetchFailed {
                    resource: config.source.clone(),
                    reason: e.to_string(),
                })?;
            Ok(DataSource::Http {
                base: config.source.trim_end_matches('/').to_string(),
                client,
            })
        } else {
            Ok(DataSource::Local(PathBuf::from(&config.source)))
        }
    }

    /// Human-readable location of a resource, for messages.
    pub fn location(&self, resource: &str) -> String {
        match self {
            DataSource::Local(dir) => dir.join(resource).display().to_string(),
            DataSource::Http { base, .. } => format!("{}/{}", base, resource),
        }
    }

    /// Fetch and deserialize one JSON resource.
    pub async fn fetch_json<T: DeserializeOwned>(&self, resource: &str) -> Result<T, LoadError> {
        let location = self.location(resource);
        debug!(%location, "fetching resource");

        let body = match self {
            DataSource::Local(dir) => tokio::fs::read_to_string(dir.join(resource))
                .await
                .map_err(|e| fetch_failed(resource, e))?,
            DataSource::Http { client, .. } => {
                let response = client
                    .get(&location)
                    .send()
                    .await
                    .map_err(|e| fetch_failed(resource, e))?;
                let status = response.status();
                if !status.is_success() {
                    return Err(fetch_failed(resource, format!("HTTP error {}", status)));
                }
                response
                    .text()
                    .await
                    .map_err(|e| fetch_failed(resource, e))?
            }
        };

        serde_json::from_str(&body).map_err(|e| LoadError::Malformed {
            resource: resource.to_string(),
            reason: e.to_string(),
        })
    }
}

fn fetch_failed(resource: &str, reason: impl ToString) -> LoadError {
    LoadError::DataSourceFetchFailed {
        resource: resource.to_string(),
        reason: reason.to_string(),
    }
}
