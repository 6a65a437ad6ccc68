use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML config: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),

    #[error("invalid JSON config: {0}")]
    SerdeJson(#[from] serde_json::Error),
}
