use crate::config::ConfigError;
use crate::history::HistoryError;
use crate::model::ModelError;
use crate::render::RenderError;
use crate::store::StoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid view: {0}")]
    Model(#[from] ModelError),

    #[error("render service error: {0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    History(#[from] HistoryError),

    #[error("store service error: {0}")]
    Store(#[from] StoreError),
}
