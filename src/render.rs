mod api;
mod command;
mod error;
mod palette;
mod shells;

#[cfg(test)]
mod tests;

pub use api::{PlotRenderer, RenderRequest, RenderedPlot, VOID_ID};
pub use command::CommandRenderer;
pub use error::{RenderError, Result};
pub use palette::{Palette, default_color, shade};
pub use shells::ShellsRenderer;
