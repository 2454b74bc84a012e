// Document seam
//
// The locale controller never talks to a window directly. It writes root-node
// attributes and an opacity value through this trait; the GUI implements it
// on top of the Slint event loop, tests and headless runs use MemoryDocument.

use std::sync::{Mutex, PoisonError};

/// A renderable document whose root node carries `dir`/`lang` attributes
#[cfg_attr(test, mockall::automock)]
pub trait Document: Send + Sync {
    /// Set an attribute on the root presentation node
    fn set_attribute(&self, name: &str, value: &str);

    /// Set the opacity of the document body (0.0 to 1.0)
    fn set_opacity(&self, opacity: f32);
}

/// A single write recorded by [`MemoryDocument`]
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentWrite {
    Attribute { name: String, value: String },
    Opacity(f32),
}

/// In-memory document that records every write in order.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    writes: Mutex<Vec<DocumentWrite>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// All writes so far, oldest first
    pub fn writes(&self) -> Vec<DocumentWrite> {
        self.lock().clone()
    }

    /// Attribute writes only, as `(name, value)` pairs
    pub fn attribute_writes(&self) -> Vec<(String, String)> {
        self.lock()
            .iter()
            .filter_map(|w| match w {
                DocumentWrite::Attribute { name, value } => Some((name.clone(), value.clone())),
                DocumentWrite::Opacity(_) => None,
            })
            .collect()
    }

    /// Opacity values in write order
    pub fn opacity_writes(&self) -> Vec<f32> {
        self.lock()
            .iter()
            .filter_map(|w| match w {
                DocumentWrite::Opacity(value) => Some(*value),
                DocumentWrite::Attribute { .. } => None,
            })
            .collect()
    }

    /// Current value of an attribute, if it was ever written
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.lock().iter().rev().find_map(|w| match w {
            DocumentWrite::Attribute { name: n, value } if n == name => Some(value.clone()),
            _ => None,
        })
    }

    /// Current opacity; a document that was never faded is fully opaque
    pub fn opacity(&self) -> f32 {
        self.opacity_writes().last().copied().unwrap_or(1.0)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<DocumentWrite>> {
        self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Document for MemoryDocument {
    fn set_attribute(&self, name: &str, value: &str) {
        self.lock().push(DocumentWrite::Attribute {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    fn set_opacity(&self, opacity: f32) {
        self.lock().push(DocumentWrite::Opacity(opacity));
    }
}
