use crate::model::ModelError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization failure: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("store YAML serialization failure: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),

    #[error("image encoding failure: {0}")]
    Image(#[from] image::ImageError),

    #[error("stored view is invalid: {0}")]
    Model(#[from] ModelError),
}
