use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModelError>;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("plot {axis} must be a positive, finite extent, found {value}")]
    NonPositiveExtent { axis: &'static str, value: f64 },

    #[error("{axis} resolution must be at least one pixel")]
    ZeroResolution { axis: &'static str },

    #[error("origin component {index} is not finite: {value}")]
    NonFiniteOrigin { index: usize, value: f64 },

    #[error("highlight alpha must lie in [0, 1], found {0}")]
    AlphaOutOfRange(f64),

    #[error("override for id {id} is stored under key {key}")]
    MismatchedOverrideId { key: i32, id: i32 },
}
