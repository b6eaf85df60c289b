use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use client_core::SessionController;
use storage::Storage;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod render;
mod terminal;

use config::{load_settings, normalize_database_url, CONFIG_FILE};
use terminal::Terminal;

#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(&args.config)?;
    if let Some(database_url) = args.database_url {
        settings.database_url = database_url;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .with_writer(std::io::stderr)
        .init();

    let database_url = normalize_database_url(&settings.database_url);
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            error = %format!("{error:#}"),
            "failed to open item database; verify the path and its permissions"
        );
        error
    })?;
    info!(%database_url, "item database ready");

    let mut controller = SessionController::load(storage).await?;
    let mut terminal = Terminal::new();
    terminal::run(&mut controller, &mut terminal).await
}
