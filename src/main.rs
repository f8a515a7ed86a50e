//! SpreadEdge - A terminal client for trading signals
//!
//! Market analysis, trading signals, strategy performance and copy trading
//! from the SpreadEdge backend, built with ratatui.

use spreadedge::{App, Config, Result, config};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Log to a daily-rolling file; the terminal belongs to the UI.
fn init_logging() -> Result<WorkerGuard> {
    let log_dir = config::log_dir()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "spreadedge.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spreadedge=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    tracing::info!(?log_dir, "Logging initialized");
    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let _guard = init_logging()?;

    // Load configuration, writing the defaults on first run
    let config_path = config::config_dir()?.join("config.toml");
    match Config::write_default_if_missing(Some(config_path.clone())) {
        Ok(true) => tracing::info!(?config_path, "Wrote default configuration"),
        Ok(false) => {}
        Err(e) => tracing::warn!(error = %e, "Could not write default configuration"),
    }
    let config = Config::load(Some(config_path))?;
    tracing::info!(base_url = %config.api.base_url, mock_data = config.api.mock_data, "Starting");

    // Run the application
    let mut app = App::new(config).await?;
    app.run().await?;

    Ok(())
}
