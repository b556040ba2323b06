//! Binary entry point: load configuration, start logging and the async
//! runtime used for lookups, then drive the Ratatui event loop until the user
//! exits.
use std::sync::Arc;

use anyhow::Context;
use chord_finder::logging::init_logging;
use chord_finder::{run_app, App, AppConfig, GeminiClient};
use tracing::info;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    let log_path = init_logging(&config.log_filter)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let client = GeminiClient::new(&config.gemini).context("failed to build completion client")?;
    info!(
        model = %config.gemini.model,
        log = %log_path.display(),
        "Starting chord finder"
    );

    let mut app = App::new(Arc::new(client), runtime.handle().clone());
    let result = run_app(&mut app);

    runtime.shutdown_background();
    result
}
