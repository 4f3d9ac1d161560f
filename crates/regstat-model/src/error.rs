use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown dataset '{0}'")]
    UnknownDataset(String),
    #[error("unknown view '{0}'")]
    UnknownView(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
