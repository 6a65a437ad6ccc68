pub mod cli;
pub mod config;
pub mod history;
pub mod mapping;
pub mod model;
pub mod render;
pub mod runtime;
pub mod store;
pub mod ui;

pub fn run_cli() -> Result<(), String> {
    cli::run_cli()
}
