// Fade transition timeline
//
// Two tweens played back to back on the tokio clock: body opacity down to 0,
// then back up to 1. Each tween starts from whatever opacity the previous
// writer left behind, so a superseded timeline hands over without a jump.

use super::document::Document;
use crate::models::TransitionSettings;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Easing curve applied to the normalized progress of a tween
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// Decelerating polynomial ease; `PowerOut(1)` is quadratic, `PowerOut(2)` cubic
    PowerOut(u8),
}

impl Easing {
    /// Map progress `t` in `[0, 1]` to eased progress in `[0, 1]`
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::PowerOut(power) => 1.0 - (1.0 - t).powi(i32::from(*power) + 1),
        }
    }
}

/// One opacity tween
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadePhase {
    pub target: f32,
    pub duration: Duration,
    pub easing: Easing,
}

/// Fade-out then fade-in, sampled once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeTransition {
    pub fade_out: FadePhase,
    pub fade_in: FadePhase,
    pub frame_interval: Duration,
}

impl Default for FadeTransition {
    fn default() -> Self {
        Self::from(&TransitionSettings::default())
    }
}

impl From<&TransitionSettings> for FadeTransition {
    fn from(settings: &TransitionSettings) -> Self {
        Self {
            fade_out: FadePhase {
                target: 0.0,
                duration: settings.fade_out(),
                easing: Easing::PowerOut(1),
            },
            fade_in: FadePhase {
                target: 1.0,
                duration: settings.fade_in(),
                easing: Easing::PowerOut(2),
            },
            frame_interval: settings.frame_interval().max(Duration::from_millis(1)),
        }
    }
}

impl FadeTransition {
    /// Total time from first frame to settled
    pub fn total_duration(&self) -> Duration {
        self.fade_out.duration + self.fade_in.duration
    }
}

#[derive(Debug)]
struct GateState {
    generation: u64,
    opacity: f32,
}

/// Serializes opacity writes between timelines.
///
/// Each timeline holds the generation it was started with. Starting a new
/// timeline bumps the generation under the lock, after which every write from
/// an older timeline is dropped, even if its task has not observed the abort yet.
#[derive(Debug)]
pub(crate) struct TransitionGate {
    state: Mutex<GateState>,
}

impl TransitionGate {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(GateState {
                generation: 0,
                opacity: 1.0,
            }),
        }
    }

    /// Invalidate all running timelines and return the new generation
    pub(crate) fn begin(&self) -> u64 {
        let mut state = self.lock();
        state.generation += 1;
        state.generation
    }

    pub(crate) fn opacity(&self) -> f32 {
        self.lock().opacity
    }

    /// Write `opacity` if `generation` is still current
    pub(crate) fn write(&self, generation: u64, document: &dyn Document, opacity: f32) -> bool {
        let mut state = self.lock();
        if state.generation != generation {
            return false;
        }
        state.opacity = opacity;
        document.set_opacity(opacity);
        true
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle to a running fade timeline
#[derive(Debug)]
pub struct TransitionHandle {
    generation: u64,
    task: JoinHandle<()>,
}

impl TransitionHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub(crate) fn abort(&self) {
        self.task.abort();
    }
}

/// Start a timeline on `runtime`, superseding any previous one
pub(crate) fn spawn(
    runtime: &tokio::runtime::Handle,
    gate: Arc<TransitionGate>,
    document: Arc<dyn Document>,
    timeline: FadeTransition,
) -> TransitionHandle {
    let generation = gate.begin();
    tracing::debug!(
        "Starting fade transition #{} ({:?} out, {:?} in)",
        generation,
        timeline.fade_out.duration,
        timeline.fade_in.duration
    );

    let task = runtime.spawn(async move {
        for phase in [timeline.fade_out, timeline.fade_in] {
            if !run_phase(&gate, generation, document.as_ref(), phase, timeline.frame_interval).await
            {
                tracing::trace!("Fade transition #{} superseded", generation);
                return;
            }
        }
        tracing::trace!("Fade transition #{} settled", generation);
    });

    TransitionHandle { generation, task }
}

/// Play one tween; returns false if a newer timeline took over
async fn run_phase(
    gate: &TransitionGate,
    generation: u64,
    document: &dyn Document,
    phase: FadePhase,
    frame_interval: Duration,
) -> bool {
    let from = gate.opacity();
    let start = Instant::now();
    let mut ticker = tokio::time::interval(frame_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        let progress = if phase.duration.is_zero() {
            1.0
        } else {
            (start.elapsed().as_secs_f32() / phase.duration.as_secs_f32()).min(1.0)
        };
        let opacity = from + (phase.target - from) * phase.easing.apply(progress);

        if !gate.write(generation, document, opacity) {
            return false;
        }
        if progress >= 1.0 {
            return true;
        }
    }
}
