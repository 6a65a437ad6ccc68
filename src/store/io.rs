use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::history::{SavedView, SessionState};
use crate::render::RenderedPlot;

use super::Result;

/// Extension given to saved view files written without one.
pub const VIEW_EXTENSION: &str = "pltvw";
const IMAGE_EXTENSION: &str = "png";

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn with_default_extension(path: &Path, extension: &str) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(extension)
    }
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)?;
    let document = if matches!(extension_of(path).as_str(), "yaml" | "yml") {
        serde_yaml::from_str::<T>(&raw)?
    } else {
        serde_json::from_str::<T>(&raw)?
    };
    Ok(document)
}

fn write_document<T: Serialize>(path: &Path, document: &T) -> Result<()> {
    let serialized = if matches!(extension_of(path).as_str(), "yaml" | "yml") {
        serde_yaml::to_string(document)?
    } else {
        serde_json::to_string_pretty(document)?
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serialized)?;
    Ok(())
}

/// Writes `saved` and returns the path actually used.
pub fn save_view_file(path: impl AsRef<Path>, saved: &SavedView) -> Result<PathBuf> {
    let path = with_default_extension(path.as_ref(), VIEW_EXTENSION);
    write_document(&path, saved)?;
    log::info!("saved view to {}", path.display());
    Ok(path)
}

pub fn load_view_file(path: impl AsRef<Path>) -> Result<SavedView> {
    let path = path.as_ref();
    let saved = read_document::<SavedView>(path)?;
    saved.default.validate()?;
    saved.current.validate()?;
    log::info!("loaded view from {}", path.display());
    Ok(saved)
}

pub fn save_session(path: impl AsRef<Path>, session: &SessionState) -> Result<()> {
    let path = path.as_ref();
    write_document(path, session)?;
    log::info!(
        "saved session to {} ({} undo, {} redo)",
        path.display(),
        session.previous.len(),
        session.subsequent.len()
    );
    Ok(())
}

/// Reads a stored session; a missing file is not an error.
pub fn load_session(path: impl AsRef<Path>) -> Result<Option<SessionState>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Ok(None);
    }
    let session = read_document::<SessionState>(path)?;
    log::info!("loaded session from {}", path.display());
    Ok(Some(session))
}

/// Encodes the plot image by extension (PNG when none is given).
pub fn save_plot_image(path: impl AsRef<Path>, plot: &RenderedPlot) -> Result<PathBuf> {
    let path = with_default_extension(path.as_ref(), IMAGE_EXTENSION);
    plot.image.save(&path)?;
    log::info!("saved plot image to {}", path.display());
    Ok(path)
}
