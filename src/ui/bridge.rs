// EventLoopBridge - marshals UI updates onto the Slint event loop
//
// Slint components may only be touched from the event loop thread, while
// state changes and fade frames arrive from subscription threads and tokio
// tasks. The bridge queues update closures on a bounded channel and a
// dedicated handler thread forwards each one with `upgrade_in_event_loop`.

use slint::ComponentHandle;
use tokio::sync::mpsc;

/// Capacity of the update queue; fade frames alone produce ~60 per second
const UI_UPDATE_CAPACITY: usize = 256;

type UiUpdate<T> = Box<dyn FnOnce(&T) + Send>;

/// Cloneable, thread-safe handle for scheduling UI updates
///
/// # Example
/// ```ignore
/// let ui = MainWindow::new()?;
/// let bridge = EventLoopBridge::new(&ui);
///
/// std::thread::spawn(move || {
///     bridge.update_ui(|ui| ui.set_current_section("projects".into()));
/// });
/// ```
pub struct EventLoopBridge<T: ComponentHandle> {
    ui_update_tx: mpsc::Sender<UiUpdate<T>>,
    ui_weak: slint::Weak<T>,
}

impl<T: ComponentHandle + 'static> EventLoopBridge<T> {
    /// Create a bridge for `ui` and start its handler thread
    ///
    /// The thread exits once every bridge clone is dropped or the event loop
    /// stops accepting work.
    pub fn new(ui: &T) -> Self {
        let ui_weak = ui.as_weak();
        let (ui_update_tx, mut ui_update_rx) = mpsc::channel::<UiUpdate<T>>(UI_UPDATE_CAPACITY);

        let handler_weak = ui_weak.clone();
        let spawned = std::thread::Builder::new()
            .name("portfolio-ui-bridge".to_string())
            .spawn(move || {
                tracing::debug!("EventLoopBridge handler thread started");

                while let Some(update_fn) = ui_update_rx.blocking_recv() {
                    let result = handler_weak.upgrade_in_event_loop(move |ui| {
                        update_fn(&ui);
                    });

                    if let Err(e) = result {
                        tracing::warn!("Failed to queue UI update to event loop: {:?}", e);
                        break;
                    }
                }

                tracing::debug!("EventLoopBridge handler thread terminated");
            });

        if let Err(e) = spawned {
            tracing::error!("Failed to spawn UI bridge thread: {}", e);
        }

        Self {
            ui_update_tx,
            ui_weak,
        }
    }

    /// Schedule a UI update from any thread
    ///
    /// Never blocks: if the queue is full the update is dropped with a warning.
    /// Use [`post()`](Self::post) for updates whose loss would leave the
    /// window in a wrong state.
    pub fn update_ui<F>(&self, update: F)
    where
        F: FnOnce(&T) + Send + 'static,
    {
        match self.ui_update_tx.try_send(Box::new(update)) {
            Ok(_) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!("UI update channel full - skipping update to prevent backpressure");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::warn!("Failed to send UI update - handler thread has stopped");
            }
        }
    }

    /// Schedule a UI update that must not be dropped
    ///
    /// Goes straight to the event loop's own unbounded queue, skipping the
    /// bounded channel. Updates posted this way run in posting order.
    pub fn post<F>(&self, update: F)
    where
        F: FnOnce(&T) + Send + 'static,
    {
        if let Err(e) = self.ui_weak.upgrade_in_event_loop(move |ui| update(&ui)) {
            tracing::warn!("Failed to post UI update to event loop: {:?}", e);
        }
    }
}

// Manual Clone implementation to avoid requiring T: Clone
impl<T: ComponentHandle> Clone for EventLoopBridge<T> {
    fn clone(&self) -> Self {
        Self {
            ui_update_tx: self.ui_update_tx.clone(),
            ui_weak: self.ui_weak.clone(),
        }
    }
}
