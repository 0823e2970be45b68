use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::error::StoreError;

pub const BASE_URL_ENV: &str = "ARTICLE_STORE_BASE_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub seed: SeedConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    pub collection: String,
    pub request_timeout_seconds: Option<u64>,
    pub body_encoding: BodyEncoding,
    pub user_agent: String,
}

/// How create and update bodies are encoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyEncoding {
    #[default]
    Form,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Seed file on disk; the bundled dataset is used when neither this nor
    /// `url` is set.
    pub path: Option<PathBuf>,
    pub url: Option<String>,
    pub max_seed_rounds: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub template_path: Option<PathBuf>,
    pub text_width: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/".to_owned(),
            collection: "articles".to_owned(),
            request_timeout_seconds: None,
            body_encoding: BodyEncoding::Form,
            user_agent: concat!("article-store/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            path: None,
            url: None,
            max_seed_rounds: 1,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            template_path: None,
            text_width: 80,
        }
    }
}

impl ServerConfig {
    pub fn base_url(&self) -> Result<Url, StoreError> {
        Ok(Url::parse(&self.base_url)?)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }
}

impl AppConfig {
    /// `{config_dir}/article-store/config.json`
    pub fn config_file_path() -> Result<PathBuf, StoreError> {
        let config_dir = dirs::config_dir().ok_or(StoreError::ConfigDirUnavailable)?;
        Ok(config_dir.join("article-store").join("config.json"))
    }

    /// Loads the user configuration. See [`AppConfig::load_or_default`].
    pub fn load() -> Self {
        let mut config = match Self::config_file_path() {
            Ok(path) => Self::load_or_default(&path),
            Err(e) => {
                warn!(error = %e, "no configuration location, using defaults");
                Self::default()
            }
        };
        config.apply_env_overrides();
        config
    }

    /// Reads `path`, falling back to defaults when it cannot be used. Defaults
    /// are written out only when the file does not exist; an unreadable or
    /// corrupt file is left untouched.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::read_file(path) {
            Ok(config) => config,
            Err(e) => {
                let missing = matches!(
                    &e,
                    StoreError::Io { source, .. } if source.kind() == ErrorKind::NotFound
                );
                warn!(error = %e, path = %path.display(), "could not load configuration, using defaults");
                let default_config = Self::default();
                if missing {
                    if let Err(save_err) = default_config.save_to(path) {
                        warn!(error = %save_err, "could not save default configuration");
                    }
                }
                default_config
            }
        }
    }

    /// Loads an explicit configuration file. Errors are returned, not masked.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let mut config = Self::read_file(path.as_ref())?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self) -> Result<(), StoreError> {
        self.save_to(Self::config_file_path()?)
    }

    /// Writes pretty JSON through a temp file and a rename.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let bytes = serde_json::to_vec_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, bytes).map_err(|e| StoreError::io(&tmp, e))?;
        std::fs::rename(&tmp, path).map_err(|e| StoreError::io(path, e))?;
        Ok(())
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.is_empty() {
                self.server.base_url = base_url;
            }
        }
    }
}
