// Performance metrics module
//
// Lightweight counters for locale switching, transitions and session activity

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Application metrics
///
/// Uses atomic operations for thread-safe tracking without locks.
/// Shared as `Arc<Metrics>` between the stores and logged on shutdown.
#[derive(Debug)]
pub struct Metrics {
    /// Calls to set the locale that changed it
    pub locale_changes: AtomicU64,

    /// Times the derived right-to-left flag flipped
    pub direction_flips: AtomicU64,

    /// Fade transitions started
    pub transitions_started: AtomicU64,

    /// Fade transitions aborted by a newer one
    pub transitions_superseded: AtomicU64,

    /// Entries appended to the session log
    pub log_events: AtomicU64,

    /// Entries evicted from the session log
    pub log_evictions: AtomicU64,

    /// Navigation section changes
    pub section_changes: AtomicU64,

    /// 3D mode toggles
    pub toggles_3d: AtomicU64,

    /// Change events that had no live subscriber
    pub broadcast_misses: AtomicU64,

    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            locale_changes: AtomicU64::new(0),
            direction_flips: AtomicU64::new(0),
            transitions_started: AtomicU64::new(0),
            transitions_superseded: AtomicU64::new(0),
            log_events: AtomicU64::new(0),
            log_evictions: AtomicU64::new(0),
            section_changes: AtomicU64::new(0),
            toggles_3d: AtomicU64::new(0),
            broadcast_misses: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_locale_change(&self) {
        self.locale_changes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_direction_flip(&self) {
        self.direction_flips.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_transition_started(&self) {
        self.transitions_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_transition_superseded(&self) {
        self.transitions_superseded.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a log append and how many entries it evicted
    pub fn record_log_event(&self, evicted: usize) {
        self.log_events.fetch_add(1, Ordering::Relaxed);
        if evicted > 0 {
            self.log_evictions
                .fetch_add(evicted as u64, Ordering::Relaxed);
        }
    }

    pub fn record_section_change(&self) {
        self.section_changes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_toggle_3d(&self) {
        self.toggles_3d.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_broadcast_miss(&self) {
        self.broadcast_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Session Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Locale: {} changes, {} direction flips",
            self.locale_changes.load(Ordering::Relaxed),
            self.direction_flips.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Transitions: {} started, {} superseded",
            self.transitions_started.load(Ordering::Relaxed),
            self.transitions_superseded.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Session: {} log events ({} evicted), {} section changes, {} 3D toggles",
            self.log_events.load(Ordering::Relaxed),
            self.log_evictions.load(Ordering::Relaxed),
            self.section_changes.load(Ordering::Relaxed),
            self.toggles_3d.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Broadcasts without subscribers: {}",
            self.broadcast_misses.load(Ordering::Relaxed)
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new();
        assert_eq!(metrics.locale_changes.load(Ordering::Relaxed), 0);
        assert_eq!(metrics.log_events.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_record_log_events_with_evictions() {
        let metrics = Metrics::new();

        metrics.record_log_event(0);
        metrics.record_log_event(1);
        metrics.record_log_event(2);

        assert_eq!(metrics.log_events.load(Ordering::Relaxed), 3);
        assert_eq!(metrics.log_evictions.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_locale_and_transition_counters() {
        let metrics = Metrics::new();

        metrics.record_locale_change();
        metrics.record_direction_flip();
        metrics.record_transition_started();
        metrics.record_transition_started();
        metrics.record_transition_superseded();

        assert_eq!(metrics.locale_changes.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.direction_flips.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.transitions_started.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.transitions_superseded.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_uptime() {
        let metrics = Metrics::new();
        thread::sleep(Duration::from_millis(10));
        assert!(metrics.uptime().as_millis() >= 10);
    }
}
