use super::bridge::EventLoopBridge;
use super::controller::MainWindow;
use crate::locale::Document;
use crate::models::{DIR_ATTRIBUTE, LANG_ATTRIBUTE, TextDirection};
use slint::SharedString;

/// A closure run against the main window on the event loop thread
pub type WindowUpdate = Box<dyn FnOnce(&MainWindow) + Send>;

/// Delivers window updates without dropping any
pub trait WindowPort: Send + Sync + 'static {
    fn post(&self, update: WindowUpdate);
}

impl WindowPort for EventLoopBridge<MainWindow> {
    fn post(&self, update: WindowUpdate) {
        EventLoopBridge::post(self, update);
    }
}

/// The main window seen as a document.
///
/// `dir` maps to the window's `rtl` property, `lang` to `lang`, and the body
/// opacity to `content-opacity`. Writes can come from any thread and are
/// applied in order; a fade's final frame is never lost to backpressure.
#[derive(Clone)]
pub struct SlintDocument<P = EventLoopBridge<MainWindow>> {
    port: P,
}

impl<P: WindowPort> SlintDocument<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }
}

impl<P: WindowPort> Document for SlintDocument<P> {
    fn set_attribute(&self, name: &str, value: &str) {
        match name {
            DIR_ATTRIBUTE => {
                let rtl = value == TextDirection::Rtl.as_str();
                self.port.post(Box::new(move |ui| ui.set_rtl(rtl)));
            }
            LANG_ATTRIBUTE => {
                let lang = SharedString::from(value);
                self.port.post(Box::new(move |ui| ui.set_lang(lang)));
            }
            other => tracing::debug!("Ignoring unsupported document attribute {}", other),
        }
    }

    fn set_opacity(&self, opacity: f32) {
        self.port
            .post(Box::new(move |ui| ui.set_content_opacity(opacity)));
    }
}
