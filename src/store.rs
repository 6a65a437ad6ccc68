mod error;
mod io;

#[cfg(test)]
mod tests;

pub use error::{Result, StoreError};
pub use io::{
    VIEW_EXTENSION, load_session, load_view_file, save_plot_image, save_session, save_view_file,
};
