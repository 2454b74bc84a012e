// Portfolio - personal portfolio desktop application
//
// This is the library crate containing the stores, models and locale logic.
// The binary crate (main.rs) provides the GUI entry point.

pub mod config;
pub mod i18n;
pub mod locale;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod state;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use locale::{Document, LocaleChange, LocaleController, MemoryDocument};
pub use metrics::Metrics;
pub use models::{AppConfig, Locale, ResumeData, SessionState, SystemLogEntry, resume_data};
pub use state::{SessionChange, SessionStore};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
