use std::collections::VecDeque;
use uuid::Uuid;

/// Maximum number of entries kept in the session log.
///
/// New entries go to the front; anything pushed past this bound is evicted
/// from the back (oldest first).
pub const MAX_LOG_ENTRIES: usize = 50;

/// Section shown when the application starts
pub const DEFAULT_SECTION: &str = "main";

/// One line of the on-screen system log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemLogEntry {
    /// Random UUID v4
    pub id: String,
    /// Local wall-clock time, `HH:MM:SS`
    pub timestamp: String,
    pub message: String,
}

impl SystemLogEntry {
    /// Create an entry stamped with a fresh id and the current local time
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            message: message.into(),
        }
    }
}

/// UI session state: 3D toggle, active section and the bounded event log.
///
/// # Thread Safety
///
/// Wrapped in `Arc<RwLock<SessionState>>` by [`crate::state::SessionStore`].
/// Mutate it through the store so change events are emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub is_3d_enabled: bool,
    pub current_section: String,
    /// Newest first, never longer than `log_capacity`
    pub logs: VecDeque<SystemLogEntry>,
    pub log_capacity: usize,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            is_3d_enabled: true,
            current_section: DEFAULT_SECTION.to_string(),
            logs: VecDeque::with_capacity(MAX_LOG_ENTRIES + 1),
            log_capacity: MAX_LOG_ENTRIES,
        }
    }
}

impl SessionState {
    /// Insert an entry at the front of the log and trim the back.
    ///
    /// Returns the number of entries evicted.
    pub fn push_log(&mut self, entry: SystemLogEntry) -> usize {
        self.logs.push_front(entry);

        let mut evicted = 0;
        while self.logs.len() > self.log_capacity {
            self.logs.pop_back();
            evicted += 1;
        }
        evicted
    }

    /// Most recent log entry, if any
    pub fn latest_log(&self) -> Option<&SystemLogEntry> {
        self.logs.front()
    }

    /// Log messages, newest first
    pub fn log_messages(&self) -> Vec<&str> {
        self.logs.iter().map(|e| e.message.as_str()).collect()
    }
}
