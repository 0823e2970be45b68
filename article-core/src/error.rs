use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("backend answered {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("base url `{0}` cannot address a collection")]
    CannotBeABase(String),
    #[error("article has no identifier; persist it before updating or deleting")]
    MissingId,
    #[error("backend still empty after {rounds} seed round(s)")]
    BackendStillEmpty { rounds: u8 },
    #[error("no configuration directory available on this platform")]
    ConfigDirUnavailable,
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
