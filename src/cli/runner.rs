use clap::Parser;
use serde_json::json;

use crate::runtime::AppContext;

use super::types::{Cli, Commands, ViewInfo};

pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Commands::View => {
            crate::ui::run(cli.config)?;
        }
        Commands::Render { view, output } => {
            let app = AppContext::load(cli.config.as_deref()).map_err(|error| error.to_string())?;
            let saved = app
                .store_service()
                .read_view(&view)
                .map_err(|error| error.to_string())?;
            let plot = app
                .render_service()
                .render_view(&saved.current)
                .map_err(|error| error.to_string())?;
            let written = app
                .store_service()
                .write_image(&output, &plot)
                .map_err(|error| error.to_string())?;
            println!(
                "{}",
                json!({
                    "status": "ok",
                    "output": written,
                    "summary": saved.current.summary(),
                })
            );
        }
        Commands::Info { input } => {
            let app = AppContext::load(cli.config.as_deref()).map_err(|error| error.to_string())?;
            let saved = app
                .store_service()
                .read_view(&input)
                .map_err(|error| error.to_string())?;
            let current = &saved.current;
            let info = ViewInfo {
                summary: current.summary(),
                default_summary: saved.default.summary(),
                matches_configured_default: saved.default == app.config().default_view(),
                basis: current.basis.to_string(),
                colorby: current.colorby.to_string(),
                width: current.width(),
                height: current.height(),
                h_res: current.h_res(),
                v_res: current.v_res(),
                aspect_lock: current.aspect_lock(),
                cell_overrides: current.cells.len(),
                material_overrides: current.materials.len(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&info).map_err(|error| error.to_string())?
            );
        }
    }

    Ok(())
}
