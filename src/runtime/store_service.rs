use std::path::{Path, PathBuf};

use crate::history::{SavedView, SessionState};
use crate::render::RenderedPlot;
use crate::store::{
    load_session, load_view_file, save_plot_image, save_session, save_view_file,
};

use super::Result;

#[derive(Debug, Default, Clone, Copy)]
pub struct StoreService;

impl StoreService {
    pub fn read_view(&self, path: impl AsRef<Path>) -> Result<SavedView> {
        Ok(load_view_file(path)?)
    }

    pub fn write_view(&self, path: impl AsRef<Path>, saved: &SavedView) -> Result<PathBuf> {
        Ok(save_view_file(path, saved)?)
    }

    pub fn read_session(&self, path: impl AsRef<Path>) -> Result<Option<SessionState>> {
        Ok(load_session(path)?)
    }

    pub fn write_session(&self, path: impl AsRef<Path>, session: &SessionState) -> Result<()> {
        save_session(path, session)?;
        Ok(())
    }

    pub fn write_image(&self, path: impl AsRef<Path>, plot: &RenderedPlot) -> Result<PathBuf> {
        Ok(save_plot_image(path, plot)?)
    }
}
