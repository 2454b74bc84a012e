//! Portfolio - personal portfolio desktop application
//!
//! Main entry point for the GUI application.
//!
//! # Execution Flow
//!
//! 1. Load `Portfolio Data/portfolio.yaml` (+ `PORTFOLIO__*` env overrides)
//! 2. Initialize logging → logs/portfolio.<date>
//! 3. Create the tokio runtime that drives fade transitions
//! 4. Create the SessionStore and LocaleController, sharing one Metrics
//! 5. Create PortfolioController (window becomes the locale document)
//! 6. Run the Slint event loop (blocks until the window is closed)
//! 7. Log metrics and shut the runtime down with a 5s timeout

use anyhow::Result;
use portfolio::ui::PortfolioController;
use portfolio::{APP_NAME, ConfigManager, LocaleController, Metrics, SessionStore, VERSION};
use std::sync::Arc;

const WORKER_THREADS: usize = 2;

fn main() -> Result<()> {
    let config_manager = ConfigManager::new("Portfolio Data")?;
    let config = config_manager.load()?;

    // Hold the guard so buffered log lines are flushed on exit
    let _log_guard = portfolio::logging::setup_logging(&config.logging)?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(WORKER_THREADS)
        .thread_name("portfolio-worker")
        .build()?;

    tracing::info!("Tokio runtime initialized with {} worker threads", WORKER_THREADS);

    let metrics = Arc::new(Metrics::new());
    let session = Arc::new(SessionStore::from_config(&config).with_metrics(Arc::clone(&metrics)));
    let locale = Arc::new(
        LocaleController::from_config(&config, runtime.handle().clone())
            .with_metrics(Arc::clone(&metrics)),
    );

    let gui_controller = PortfolioController::new(Arc::clone(&session), Arc::clone(&locale))?;

    tracing::info!("GUI controller initialized, launching window");

    let result = gui_controller.run();

    tracing::info!("GUI closed, shutting down");

    locale.cancel_transition();
    metrics.log_summary();

    runtime.shutdown_timeout(std::time::Duration::from_secs(5));

    tracing::info!("Application shutdown complete");

    result.map_err(|e| {
        tracing::error!("GUI error: {}", e);
        anyhow::anyhow!("GUI error: {}", e)
    })
}
