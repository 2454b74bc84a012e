// GUI Controller - Bridges the Slint window with the session and locale stores
//
// This module wires:
// - Slint callbacks (navigation, 3D toggle, locale buttons) → store mutations
// - SessionStore / LocaleController change events → window properties
// - The window itself as the Document the locale controller drives

use crate::i18n;
use crate::locale::{LocaleChange, LocaleController};
use crate::models::{Locale, SessionState, resume_data};
use crate::state::{SessionChange, SessionStore};
use crate::ui::bridge::EventLoopBridge;
use crate::ui::document::SlintDocument;
use anyhow::{Context, Result};
use slint::{ModelRc, SharedString, VecModel};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

// Include the generated Slint code
slint::include_modules!();

/// Navigation sections in menu order
pub const NAV_SECTIONS: [&str; 3] = ["main", "projects", "skills"];

/// Separator used when a list of technologies is shown on one line
const STACK_SEPARATOR: &str = " · ";

/// GUI Controller that wires up the Slint window with application state
///
/// # Example
/// ```ignore
/// let session = Arc::new(SessionStore::from_config(&config));
/// let locale = Arc::new(LocaleController::from_config(&config, runtime.handle().clone()));
///
/// let controller = PortfolioController::new(session, locale)?;
/// controller.run()?;  // Blocks until window is closed
/// ```
pub struct PortfolioController {
    ui: MainWindow,
    _bridge: EventLoopBridge<MainWindow>,
}

impl PortfolioController {
    /// Create the window, attach it to the locale controller and subscribe
    /// to both stores
    pub fn new(session: Arc<SessionStore>, locale: Arc<LocaleController>) -> Result<Self> {
        let ui = MainWindow::new().context("Failed to create Slint UI")?;
        let bridge = EventLoopBridge::new(&ui);

        Self::populate_resume(&ui);
        Self::sync_ui_with_state(&ui, &session, &locale);

        // The window is the document: first paint gets the direction, no fade
        locale.attach_document(Arc::new(SlintDocument::new(bridge.clone())));
        locale.mount();

        Self::setup_callbacks(&ui, &session, &locale);
        Self::setup_session_subscription(&bridge, &session);
        Self::setup_locale_subscription(&bridge, &locale);

        tracing::info!("GUI controller initialized");

        Ok(Self {
            ui,
            _bridge: bridge,
        })
    }

    /// Run the GUI (blocks until window is closed)
    pub fn run(self) -> Result<(), slint::PlatformError> {
        tracing::info!("Starting GUI event loop");
        self.ui.run()
    }

    /// Fill the static resume properties
    fn populate_resume(ui: &MainWindow) {
        let resume = resume_data();

        ui.set_full_name(resume.name.into());
        ui.set_headline(resume.title.into());
        ui.set_location(resume.location.into());
        ui.set_core_stack(join_stack(resume.stack));
        ui.set_projects(ModelRc::new(VecModel::from(project_cards())));
        ui.set_frontend_skills(join_stack(resume.skills.frontend));
        ui.set_backend_skills(join_stack(resume.skills.backend));
        ui.set_architecture_skills(join_stack(resume.skills.architecture));
    }

    /// Synchronize the window with current state, once at startup
    fn sync_ui_with_state(ui: &MainWindow, session: &SessionStore, locale: &LocaleController) {
        let state = session.snapshot();
        ui.set_current_section(state.current_section.as_str().into());
        ui.set_is_3d_enabled(state.is_3d_enabled);
        ui.set_logs(ModelRc::new(VecModel::from(log_lines(&state))));

        let current = locale.current_locale();
        ui.set_lang(current.code().into());
        apply_labels(ui, current);

        tracing::debug!("UI synchronized with initial state");
    }

    /// Connect window callbacks to store mutations
    fn setup_callbacks(ui: &MainWindow, session: &Arc<SessionStore>, locale: &Arc<LocaleController>) {
        let locale_clone = Arc::clone(locale);
        ui.on_locale_selected(move |code: SharedString| {
            tracing::debug!("Locale button clicked: {}", code);
            if let Err(e) = locale_clone.set_locale_code(code.as_str()) {
                tracing::warn!("Locale switch rejected: {}", e);
            }
        });

        let session_clone = Arc::clone(session);
        ui.on_section_selected(move |section: SharedString| {
            tracing::debug!("Navigation clicked: {}", section);
            session_clone.set_section(section.as_str());
        });

        let session_clone = Arc::clone(session);
        ui.on_toggle_3d(move || {
            tracing::debug!("3D toggle clicked");
            session_clone.toggle_3d();
        });

        tracing::debug!("UI callbacks configured");
    }

    /// Forward session change events to the window
    ///
    /// Runs on a background thread; every UI write goes through the bridge.
    fn setup_session_subscription(bridge: &EventLoopBridge<MainWindow>, session: &Arc<SessionStore>) {
        let bridge = bridge.clone();
        let session = Arc::clone(session);
        let mut rx = session.subscribe();

        std::thread::spawn(move || {
            tracing::debug!("Session subscription thread started");

            loop {
                match rx.blocking_recv() {
                    Ok(change) => {
                        tracing::trace!("Session change received: {:?}", change);

                        match change {
                            SessionChange::SectionChanged { section } => {
                                bridge.update_ui(move |ui| {
                                    ui.set_current_section(section.into());
                                });
                            }
                            SessionChange::Mode3dChanged { enabled } => {
                                bridge.update_ui(move |ui| ui.set_is_3d_enabled(enabled));
                            }
                            SessionChange::LogAppended { .. } => {
                                let lines = session.read(log_lines);
                                bridge.update_ui(move |ui| {
                                    ui.set_logs(ModelRc::new(VecModel::from(lines)));
                                });
                            }
                        }
                    }
                    Err(RecvError::Closed) => {
                        tracing::info!("Session channel closed - shutting down subscription thread");
                        break;
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("Session subscription lagged - {} events skipped, resyncing", skipped);
                        let state = session.snapshot();
                        let lines = log_lines(&state);
                        bridge.update_ui(move |ui| {
                            ui.set_current_section(state.current_section.into());
                            ui.set_is_3d_enabled(state.is_3d_enabled);
                            ui.set_logs(ModelRc::new(VecModel::from(lines)));
                        });
                    }
                }
            }
        });
    }

    /// Re-translate labels whenever the active language changes
    fn setup_locale_subscription(bridge: &EventLoopBridge<MainWindow>, locale: &Arc<LocaleController>) {
        let bridge = bridge.clone();
        let locale = Arc::clone(locale);
        let mut rx = locale.subscribe();

        std::thread::spawn(move || {
            tracing::debug!("Locale subscription thread started");

            loop {
                match rx.blocking_recv() {
                    Ok(LocaleChange::LocaleChanged { to, .. }) => {
                        bridge.update_ui(move |ui| apply_labels(ui, to));
                    }
                    // Direction is applied through the document
                    Ok(LocaleChange::DirectionChanged { .. }) => {}
                    Err(RecvError::Closed) => {
                        tracing::info!("Locale channel closed - shutting down subscription thread");
                        break;
                    }
                    Err(RecvError::Lagged(_)) => {
                        let current = locale.current_locale();
                        bridge.update_ui(move |ui| apply_labels(ui, current));
                    }
                }
            }
        });
    }
}

/// Set every translated label and the highlighted locale button
fn apply_labels(ui: &MainWindow, locale: Locale) {
    ui.set_active_locale(locale.code().into());
    ui.set_nav_items(ModelRc::new(VecModel::from(nav_items(locale))));
    ui.set_stack_heading(i18n::t(locale, "heading.stack").into());
    ui.set_projects_heading(i18n::t(locale, "heading.projects").into());
    ui.set_skills_heading(i18n::t(locale, "heading.skills").into());
    ui.set_frontend_label(i18n::t(locale, "skills.frontend").into());
    ui.set_backend_label(i18n::t(locale, "skills.backend").into());
    ui.set_architecture_label(i18n::t(locale, "skills.architecture").into());
    ui.set_log_heading(i18n::t(locale, "heading.log").into());
    ui.set_toggle_3d_label(i18n::t(locale, "toggle.3d").into());
}

fn nav_items(locale: Locale) -> Vec<NavItem> {
    NAV_SECTIONS
        .iter()
        .map(|section| NavItem {
            key: (*section).into(),
            label: i18n::t(locale, &format!("nav.{}", section)).into(),
        })
        .collect()
}

fn project_cards() -> Vec<ProjectCard> {
    resume_data()
        .projects
        .iter()
        .map(|project| ProjectCard {
            title: project.title.into(),
            description: project.description.into(),
            stack: join_stack(project.stack),
            link: project.link.into(),
        })
        .collect()
}

fn log_lines(state: &SessionState) -> Vec<LogLine> {
    state
        .logs
        .iter()
        .map(|entry| LogLine {
            timestamp: entry.timestamp.as_str().into(),
            message: entry.message.as_str().into(),
        })
        .collect()
}

fn join_stack(items: &[&str]) -> SharedString {
    items.join(STACK_SEPARATOR).into()
}
