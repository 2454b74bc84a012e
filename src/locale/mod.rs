//! Locale controller - current language, derived text direction, document sync.
//!
//! [`LocaleController`] owns the [`LocaleState`]. Every mutation goes through
//! [`set_locale()`](LocaleController::set_locale), which calls the
//! `on_state_settled` hook with the old and new state. When the derived
//! right-to-left flag flips, the hook writes `dir` and `lang` on the attached
//! [`Document`] and then plays a [`FadeTransition`] so the layout flip happens
//! while the body is faded out.
//!
//! Nothing happens when the flag does not change: re-selecting the same locale
//! or switching between two left-to-right locales leaves the document alone.

pub mod document;
pub mod transition;

pub use document::{Document, DocumentWrite, MemoryDocument};
pub use transition::{Easing, FadePhase, FadeTransition, TransitionHandle};

use crate::metrics::Metrics;
use crate::models::{
    AppConfig, DIR_ATTRIBUTE, LANG_ATTRIBUTE, Locale, LocaleError, LocaleState, TextDirection,
};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tokio::sync::broadcast;
use transition::TransitionGate;

/// Change events emitted by [`LocaleController`]
#[derive(Clone, Debug, PartialEq)]
pub enum LocaleChange {
    /// The active language changed
    LocaleChanged { from: Locale, to: Locale },

    /// The derived text direction flipped
    DirectionChanged { direction: TextDirection },
}

/// Holds the active locale and keeps the document in sync with it
///
/// Share it as `Arc<LocaleController>`; there is no global instance.
pub struct LocaleController {
    state: RwLock<LocaleState>,
    document: RwLock<Option<Arc<dyn Document>>>,
    timeline: FadeTransition,
    runtime: tokio::runtime::Handle,
    gate: Arc<TransitionGate>,
    active: Mutex<Option<TransitionHandle>>,
    // Held across a whole set_locale so document writes follow state order
    settle: Mutex<()>,
    change_tx: broadcast::Sender<LocaleChange>,
    metrics: Arc<Metrics>,
}

impl LocaleController {
    /// Create a controller starting in English with the default fade timing
    ///
    /// Transitions are spawned on `runtime`.
    pub fn new(runtime: tokio::runtime::Handle) -> Self {
        Self::with_timeline(runtime, Locale::default(), FadeTransition::default())
    }

    pub fn with_timeline(
        runtime: tokio::runtime::Handle,
        locale: Locale,
        timeline: FadeTransition,
    ) -> Self {
        let (change_tx, _) = broadcast::channel(32);
        Self {
            state: RwLock::new(LocaleState::new(locale)),
            document: RwLock::new(None),
            timeline,
            runtime,
            gate: Arc::new(TransitionGate::new()),
            active: Mutex::new(None),
            settle: Mutex::new(()),
            change_tx,
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Create a controller from the `locale` and `transition` config sections
    pub fn from_config(config: &AppConfig, runtime: tokio::runtime::Handle) -> Self {
        tracing::info!(
            "Locale controller: default={}, fade={}ms/{}ms",
            config.locale.default,
            config.transition.fade_out_ms,
            config.transition.fade_in_ms
        );
        Self::with_timeline(
            runtime,
            config.locale.default,
            FadeTransition::from(&config.transition),
        )
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Attach a renderable document; without one only the state is tracked
    pub fn with_document(self, document: Arc<dyn Document>) -> Self {
        self.attach_document(document);
        self
    }

    pub fn attach_document(&self, document: Arc<dyn Document>) {
        *self
            .document
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(document);
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    pub fn state(&self) -> LocaleState {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current_locale(&self) -> Locale {
        self.state().current_locale()
    }

    pub fn is_rtl(&self) -> bool {
        self.state().is_rtl()
    }

    pub fn direction(&self) -> TextDirection {
        self.state().direction()
    }

    pub fn timeline(&self) -> &FadeTransition {
        &self.timeline
    }

    /// Subscribe to locale change events
    pub fn subscribe(&self) -> broadcast::Receiver<LocaleChange> {
        self.change_tx.subscribe()
    }

    /// Apply the initial direction to the document, without a transition
    ///
    /// Call once after the document is attached so the first paint already
    /// has the right layout.
    pub fn mount(&self) {
        let Some(document) = self.document() else {
            tracing::debug!("mount() without a document, nothing to apply");
            return;
        };
        let direction = self.direction();
        tracing::debug!("Mounting document with dir={}", direction);
        document.set_attribute(DIR_ATTRIBUTE, direction.as_str());
    }

    /// Switch the active locale
    ///
    /// Returns the change events produced; an empty list means the locale was
    /// already active. Concurrent callers are serialized, so the last call to
    /// return also made the last document write.
    pub fn set_locale(&self, locale: Locale) -> Vec<LocaleChange> {
        let _settle = self.settle.lock().unwrap_or_else(PoisonError::into_inner);
        let (old, new) = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let old = *state;
            state.set_locale(locale);
            (old, *state)
        };

        let mut changes = Vec::new();
        if old.current_locale() != new.current_locale() {
            self.metrics.record_locale_change();
            tracing::info!("Locale changed: {} -> {}", old.current_locale(), locale);
            changes.push(LocaleChange::LocaleChanged {
                from: old.current_locale(),
                to: new.current_locale(),
            });
        }
        if old.is_rtl() != new.is_rtl() {
            changes.push(LocaleChange::DirectionChanged {
                direction: new.direction(),
            });
        }

        for change in &changes {
            if self.change_tx.send(change.clone()).is_err() {
                self.metrics.record_broadcast_miss();
            }
        }

        self.on_state_settled(old, new);
        changes
    }

    /// Switch the active locale from a language code
    ///
    /// # Errors
    /// [`LocaleError::Unsupported`] if `code` is not `en`, `fr` or `ar`; the
    /// current state is left untouched.
    pub fn set_locale_code(&self, code: &str) -> Result<Vec<LocaleChange>, LocaleError> {
        let locale = code.parse::<Locale>().inspect_err(|e| {
            tracing::warn!("Ignoring locale request: {}", e);
        })?;
        Ok(self.set_locale(locale))
    }

    /// True while a fade timeline is still running
    pub fn is_transition_active(&self) -> bool {
        self.lock_active()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stop any running fade and restore full opacity
    pub fn cancel_transition(&self) {
        let Some(handle) = self.lock_active().take() else {
            return;
        };
        if handle.is_finished() {
            return;
        }

        let generation = self.gate.begin();
        handle.abort();
        tracing::debug!("Fade transition #{} cancelled", handle.generation());

        if let Some(document) = self.document() {
            self.gate.write(generation, document.as_ref(), 1.0);
        }
    }

    /// Runs after every mutation with the state before and after it
    fn on_state_settled(&self, old: LocaleState, new: LocaleState) {
        if old.is_rtl() == new.is_rtl() {
            return;
        }
        self.metrics.record_direction_flip();

        let Some(document) = self.document() else {
            tracing::debug!("Direction is now {} but no document is attached", new.direction());
            return;
        };

        // Attributes first: the flip lands while the fade-out is masking it
        document.set_attribute(DIR_ATTRIBUTE, new.direction().as_str());
        document.set_attribute(LANG_ATTRIBUTE, new.current_locale().code());

        self.start_transition(document);
    }

    fn start_transition(&self, document: Arc<dyn Document>) {
        let mut active = self.lock_active();

        if let Some(previous) = active.take() {
            if !previous.is_finished() {
                previous.abort();
                self.metrics.record_transition_superseded();
                tracing::debug!("Superseding fade transition #{}", previous.generation());
            }
        }

        let handle = transition::spawn(
            &self.runtime,
            Arc::clone(&self.gate),
            document,
            self.timeline,
        );
        self.metrics.record_transition_started();
        *active = Some(handle);
    }

    fn document(&self) -> Option<Arc<dyn Document>> {
        self.document
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn lock_active(&self) -> std::sync::MutexGuard<'_, Option<TransitionHandle>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
