//! Data models for the portfolio application.
//!
//! - [`LocaleState`]: active interface language with its derived text direction
//! - [`ResumeData`]: static resume content served by [`resume_data()`]
//! - [`SessionState`]: 3D toggle, active section and the bounded system log
//! - [`AppConfig`]: settings loaded from `portfolio.yaml`
//!
//! Mutable models are owned by their stores ([`crate::state::SessionStore`],
//! [`crate::locale::LocaleController`]); consumers read snapshots.

pub mod config;
pub mod locale;
pub mod resume;
pub mod session_state;

pub use config::{
    AppConfig, ConfigError, LocaleSettings, LoggingSettings, SessionSettings, TransitionSettings,
};
pub use locale::{
    DIR_ATTRIBUTE, LANG_ATTRIBUTE, Locale, LocaleError, LocaleState, TextDirection,
};
pub use resume::{Project, ResumeData, Skills, resume_data};
pub use session_state::{DEFAULT_SECTION, MAX_LOG_ENTRIES, SessionState, SystemLogEntry};
