//! TrayKit demo entry point.

mod app;
mod config;

use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "starting TrayKit demo"
    );

    // Load configuration.
    let config = config::Config::load()?;
    tracing::info!(name = %config.name, "configuration loaded");

    app::run(config)?;

    tracing::info!("demo shut down cleanly");
    Ok(())
}
