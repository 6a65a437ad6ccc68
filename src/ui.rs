mod app;
mod colors;
mod dock;
pub mod interaction;

pub use app::run;
