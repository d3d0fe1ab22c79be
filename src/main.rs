mod api;
mod config;
mod export;
mod input;
mod models;
mod progress;
mod run;
mod token;
mod ui;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let data_dir = get_data_dir()?;
    init_logging(&data_dir)?;

    let config = config::Config::from_env();
    let tokens = token::TokenStore::new(data_dir.join("admin-token"));
    let api = api::Client::new(&config, tokens)?;
    tracing::info!(base_url = %config.base_url, "starting goaltui");

    match args.len() {
        1 => run::as_tui(&api, &config),
        2.. => run::as_cli(&args, &api, &config),
        _ => {
            eprintln!("Usage: goaltui [command]");
            Ok(())
        }
    }
}

fn get_data_dir() -> Result<std::path::PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "goaltui", "GoalTUI")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir().to_path_buf();
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir)
}

/// Log to a file under the data dir; the TUI owns the terminal.
fn init_logging(data_dir: &std::path::Path) -> Result<()> {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join("goaltui.log"))
        .context("Failed to open log file")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}
