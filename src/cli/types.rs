use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(
    name = "plot-explorer",
    version,
    about = "Interactive slice plot explorer with undo/redo view history"
)]
pub(super) struct Cli {
    /// Configuration file (YAML or JSON); defaults to plot_explorer.yml in the working directory.
    #[arg(long, global = true)]
    pub(super) config: Option<PathBuf>,

    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(super) enum Commands {
    /// Opens the interactive explorer window.
    View,
    /// Renders the current plot of a saved view file without opening a window.
    Render {
        #[arg(long)]
        view: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Prints a saved view file as JSON.
    Info { input: PathBuf },
}

#[derive(Debug, Serialize)]
pub(super) struct ViewInfo {
    pub(super) summary: String,
    pub(super) default_summary: String,
    pub(super) matches_configured_default: bool,
    pub(super) basis: String,
    pub(super) colorby: String,
    pub(super) width: f64,
    pub(super) height: f64,
    pub(super) h_res: u32,
    pub(super) v_res: u32,
    pub(super) aspect_lock: bool,
    pub(super) cell_overrides: usize,
    pub(super) material_overrides: usize,
}
