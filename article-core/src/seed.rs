use std::path::PathBuf;

use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::article::ArticleRecord;
use crate::config::SeedConfig;
use crate::error::StoreError;

const BUNDLED_SEED: &[u8] = include_bytes!("../data/hackerIpsum.json");

/// Where the sample articles come from when the backend is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SeedSource {
    /// The dataset compiled into the binary.
    #[default]
    Bundled,
    File(PathBuf),
    Url(Url),
}

impl SeedSource {
    pub fn from_config(config: &SeedConfig) -> Result<Self, StoreError> {
        match (&config.url, &config.path) {
            (Some(url), _) => Ok(SeedSource::Url(Url::parse(url)?)),
            (None, Some(path)) => Ok(SeedSource::File(path.clone())),
            (None, None) => Ok(SeedSource::Bundled),
        }
    }

    pub async fn load(&self, client: &Client) -> Result<Vec<ArticleRecord>, StoreError> {
        let records: Vec<ArticleRecord> = match self {
            SeedSource::Bundled => serde_json::from_slice(BUNDLED_SEED)?,
            SeedSource::File(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .map_err(|e| StoreError::io(path, e))?;
                serde_json::from_slice(&bytes)?
            }
            SeedSource::Url(url) => {
                let response = client.get(url.clone()).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(StoreError::Status {
                        status,
                        url: url.to_string(),
                    });
                }
                serde_json::from_slice(&response.bytes().await?)?
            }
        };
        debug!(count = records.len(), source = ?self, "seed dataset loaded");
        Ok(records)
    }
}
