use std::path::PathBuf;

use crate::model::ModelError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("view cannot be rendered: {0}")]
    InvalidView(#[from] ModelError),

    #[error("renderer I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("renderer exited with {status}: {stderr}")]
    ProcessFailed { status: String, stderr: String },

    #[error("renderer produced no image at {0}")]
    MissingImage(PathBuf),

    #[error("plot image decode failure: {0}")]
    Image(#[from] image::ImageError),

    #[error("render request serialization failure: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("id map does not match the image: {0}")]
    Shape(#[from] ndarray::ShapeError),
}
