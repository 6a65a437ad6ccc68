mod basis;
mod domain;
mod error;
mod view;

#[cfg(test)]
mod tests;

pub use basis::{Basis, DomainKind};
pub use domain::{DomainMap, DomainOverride, Rgb};
pub use error::{ModelError, Result};
pub use view::{ASPECT_EPSILON, View};
