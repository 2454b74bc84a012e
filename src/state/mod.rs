// Session store module
//
// Wraps SessionState with thread-safe access using Arc<RwLock<T>> and emits
// change events so the window can re-render the log, section and 3D toggle.

use crate::metrics::Metrics;
use crate::models::{AppConfig, SessionState, SystemLogEntry};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::broadcast;

/// Change events emitted when the session is modified
#[derive(Clone, Debug, PartialEq)]
pub enum SessionChange {
    /// Active navigation section has changed
    SectionChanged { section: String },

    /// 3D visualization was switched on or off
    Mode3dChanged { enabled: bool },

    /// An entry was added to the front of the log
    LogAppended {
        entry: SystemLogEntry,
        evicted: usize,
    },
}

/// Thread-safe session store with event emission
///
/// Holds the process-wide [`SessionState`]. Construct one at startup and hand
/// clones (or an `Arc`) to whoever needs it; there is no global instance.
///
/// - [`read()`](Self::read) / [`snapshot()`](Self::snapshot) for reading
/// - [`log_event()`](Self::log_event), [`set_section()`](Self::set_section),
///   [`toggle_3d()`](Self::toggle_3d) for mutations
/// - [`subscribe()`](Self::subscribe) for listening to changes
pub struct SessionStore {
    state: Arc<RwLock<SessionState>>,
    change_tx: broadcast::Sender<SessionChange>,
    metrics: Arc<Metrics>,
}

impl SessionStore {
    /// Create a store with default state
    ///
    /// The change channel retains at least 100 events per subscriber; slower
    /// receivers see `RecvError::Lagged`.
    pub fn new() -> Self {
        Self::with_state(SessionState::default())
    }

    pub fn with_state(state: SessionState) -> Self {
        let (change_tx, _) = broadcast::channel(100);
        Self {
            state: Arc::new(RwLock::new(state)),
            change_tx,
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Create a store seeded from the `session` section of the configuration
    pub fn from_config(config: &AppConfig) -> Self {
        let settings = &config.session;
        tracing::info!(
            "Session store: 3d={}, section={}, log_capacity={}",
            settings.enable_3d,
            settings.initial_section,
            settings.log_capacity
        );

        Self::with_state(SessionState {
            is_3d_enabled: settings.enable_3d,
            current_section: settings.initial_section.clone(),
            log_capacity: settings.log_capacity.max(1),
            ..SessionState::default()
        })
    }

    /// Share a metrics collector with other components
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Get a cloned snapshot of the current state
    pub fn snapshot(&self) -> SessionState {
        self.read_guard().clone()
    }

    /// Execute a function with read access to the state
    ///
    /// # Example
    /// ```ignore
    /// let section = store.read(|s| s.current_section.clone());
    /// ```
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SessionState) -> R,
    {
        f(&self.read_guard())
    }

    /// Subscribe to session change events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionChange> {
        self.change_tx.subscribe()
    }

    /// Prepend a log entry, trimming the log to its capacity
    pub fn log_event(&self, message: impl Into<String>) -> Vec<SessionChange> {
        let entry = SystemLogEntry::new(message);
        tracing::debug!("Session log: {}", entry.message);

        let evicted = self.write_guard().push_log(entry.clone());
        self.metrics.record_log_event(evicted);

        self.emit(vec![SessionChange::LogAppended { entry, evicted }])
    }

    /// Switch the active section and log the route change
    ///
    /// No validation is done on the section name.
    pub fn set_section(&self, section: impl Into<String>) -> Vec<SessionChange> {
        let section = section.into();
        self.write_guard().current_section = section.clone();
        self.metrics.record_section_change();
        tracing::info!("Section changed to {}", section);

        let message = format!("Route changed to /{}", section);
        let mut changes = self.emit(vec![SessionChange::SectionChanged { section }]);
        changes.extend(self.log_event(message));
        changes
    }

    /// Flip the 3D visualization flag and log its new state
    pub fn toggle_3d(&self) -> Vec<SessionChange> {
        let enabled = {
            let mut state = self.write_guard();
            state.is_3d_enabled = !state.is_3d_enabled;
            state.is_3d_enabled
        };
        self.metrics.record_toggle_3d();
        tracing::info!("3D mode toggled: {}", enabled);

        let message = format!("3D Mode {}", if enabled { "Enabled" } else { "Disabled" });
        let mut changes = self.emit(vec![SessionChange::Mode3dChanged { enabled }]);
        changes.extend(self.log_event(message));
        changes
    }

    fn emit(&self, changes: Vec<SessionChange>) -> Vec<SessionChange> {
        for change in &changes {
            // No subscribers is fine (headless use, tests)
            if self.change_tx.send(change.clone()).is_err() {
                self.metrics.record_broadcast_miss();
            }
        }
        changes
    }

    // Every mutation leaves the state consistent before any code that could
    // panic runs, so a poisoned lock still guards valid data.
    fn read_guard(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

// Clones share the same state and channel
impl Clone for SessionStore {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            change_tx: self.change_tx.clone(),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MAX_LOG_ENTRIES;
    use std::sync::atomic::Ordering;

    #[test]
    fn test_new_session_store() {
        let store = SessionStore::new();
        let state = store.snapshot();

        assert!(state.is_3d_enabled);
        assert_eq!(state.current_section, "main");
        assert!(state.logs.is_empty());
    }

    #[test]
    fn test_log_event_prepends() {
        let store = SessionStore::new();
        store.log_event("boot");
        store.log_event("ready");

        let messages = store.read(|s| s.log_messages().join(","));
        assert_eq!(messages, "ready,boot");
    }

    #[test]
    fn test_log_event_reports_evictions() {
        let store = SessionStore::new();
        for i in 0..MAX_LOG_ENTRIES {
            let changes = store.log_event(format!("event {}", i));
            assert!(matches!(changes[0], SessionChange::LogAppended { evicted: 0, .. }));
        }

        let changes = store.log_event("overflow");
        assert!(matches!(changes[0], SessionChange::LogAppended { evicted: 1, .. }));
        assert_eq!(store.read(|s| s.logs.len()), MAX_LOG_ENTRIES);
        assert_eq!(store.metrics().log_evictions.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_set_section_changes() {
        let store = SessionStore::new();
        let changes = store.set_section("skills");

        assert_eq!(changes.len(), 2);
        assert_eq!(
            changes[0],
            SessionChange::SectionChanged {
                section: "skills".to_string()
            }
        );
        match &changes[1] {
            SessionChange::LogAppended { entry, .. } => {
                assert_eq!(entry.message, "Route changed to /skills")
            }
            other => panic!("unexpected change: {:?}", other),
        }
    }

    #[test]
    fn test_set_section_accepts_any_string() {
        let store = SessionStore::new();
        store.set_section("");
        assert_eq!(store.read(|s| s.current_section.clone()), "");
        assert_eq!(
            store.read(|s| s.latest_log().map(|e| e.message.clone())),
            Some("Route changed to /".to_string())
        );
    }

    #[test]
    fn test_toggle_3d_changes() {
        let store = SessionStore::new();
        let changes = store.toggle_3d();

        assert_eq!(changes[0], SessionChange::Mode3dChanged { enabled: false });
        assert!(!store.read(|s| s.is_3d_enabled));
    }

    #[test]
    fn test_from_config() {
        let mut config = AppConfig::default();
        config.session.enable_3d = false;
        config.session.initial_section = "projects".to_string();
        config.session.log_capacity = 5;

        let store = SessionStore::from_config(&config);
        let state = store.snapshot();
        assert!(!state.is_3d_enabled);
        assert_eq!(state.current_section, "projects");
        assert_eq!(state.log_capacity, 5);
    }

    #[test]
    fn test_subscribe_to_changes() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();

        store.toggle_3d();

        assert_eq!(
            rx.try_recv().unwrap(),
            SessionChange::Mode3dChanged { enabled: false }
        );
        assert!(matches!(
            rx.try_recv().unwrap(),
            SessionChange::LogAppended { .. }
        ));
    }

    #[test]
    fn test_broadcast_without_subscribers_is_counted() {
        let store = SessionStore::new();
        store.log_event("nobody listening");
        assert_eq!(store.metrics().broadcast_misses.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_clone_shares_state() {
        let store1 = SessionStore::new();
        let store2 = store1.clone();

        store1.set_section("projects");

        assert_eq!(store2.read(|s| s.current_section.clone()), "projects");
    }
}
