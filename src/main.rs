mod ai;
mod app;
mod config;
mod console;
mod domain;
mod infrastructure;
mod view;

use anyhow::{Context, Result};
use infrastructure::{directories, logging, shutdown};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_config().context("failed to load configuration")?;
    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config, &paths)?;

    let (shutdown, _) = shutdown::Shutdown::new();
    shutdown::install_signal_handlers(shutdown.clone());

    let app = app::ClassifierApp::initialize(&config, shutdown)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        app.run_interactive().await
    } else {
        app.run_once(args.join(" ")).await
    }
}
