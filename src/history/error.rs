use std::fmt;

use crate::model::ModelError;
use crate::render::RenderError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HistoryError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Undo,
    Redo,
}

impl fmt::Display for Direction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Undo => "undo",
            Self::Redo => "redo",
        })
    }
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("nothing to {0}")]
    EmptyHistory(Direction),

    #[error("settings belong to an incompatible model")]
    IncompatibleSettings,

    #[error("plot generation failed: {0}")]
    RenderFailure(#[from] RenderError),

    #[error("view rejected: {0}")]
    InvalidView(#[from] ModelError),
}
