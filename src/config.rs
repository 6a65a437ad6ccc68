//! Startup configuration for the explorer.
//!
//! Settings are read from an explicit path or the first of
//! [`CONFIG_FILENAMES`] found in the working directory. Unreadable or invalid
//! values never abort startup; they fall back to defaults and are reported as
//! warnings on the returned [`ConfigHandle`].

mod error;
mod settings;


use std::fs;
use std::path::{Path, PathBuf};

pub use error::{ConfigError, Result};
pub use settings::{DefaultViewConfig, ExplorerConfig, RendererConfig};

pub const CONFIG_FILENAMES: &[&str] = &[
    "plot_explorer.yml",
    "plot_explorer.yaml",
    "plot_explorer.json",
];

/// Loaded configuration together with its source and any warnings.
#[derive(Debug, Clone, Default)]
pub struct ConfigHandle {
    pub config: ExplorerConfig,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

/// Parses one configuration file, choosing YAML or JSON by extension.
pub fn read_config(path: impl AsRef<Path>) -> Result<ExplorerConfig> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let config = if extension == "json" {
        serde_json::from_str::<ExplorerConfig>(&raw)?
    } else {
        serde_yaml::from_str::<ExplorerConfig>(&raw)?
    };
    Ok(config)
}

/// Loads the explicit `custom_path` or the first candidate in `search_dir`.
///
/// An explicit path that cannot be read or parsed is an error; discovered
/// candidates that fail only add warnings.
pub fn load_config(custom_path: Option<&Path>, search_dir: &Path) -> Result<ConfigHandle> {
    let mut warnings = Vec::new();

    if let Some(path) = custom_path {
        let config = read_config(path)?;
        return Ok(finish(config, Some(path.to_path_buf()), warnings));
    }

    for name in CONFIG_FILENAMES {
        let candidate = search_dir.join(name);
        if !candidate.is_file() {
            continue;
        }
        match read_config(&candidate) {
            Ok(config) => return Ok(finish(config, Some(candidate), warnings)),
            Err(error) => warnings.push(format!("skipping {}: {error}", candidate.display())),
        }
    }

    for warning in &warnings {
        log::warn!("{warning}");
    }
    Ok(ConfigHandle {
        config: ExplorerConfig::default(),
        source: None,
        warnings,
    })
}

fn finish(config: ExplorerConfig, source: Option<PathBuf>, mut warnings: Vec<String>) -> ConfigHandle {
    let source = source.map(|path| fs::canonicalize(&path).unwrap_or(path));
    let config = config.sanitize(&mut warnings);
    for warning in &warnings {
        log::warn!("{warning}");
    }
    if let Some(path) = &source {
        log::info!("loaded configuration from {}", path.display());
    }
    ConfigHandle {
        config,
        source,
        warnings,
    }
}
