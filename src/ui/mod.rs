// UI module - Slint window and event loop bridge
//
// This module contains:
// - EventLoopBridge: marshals updates from background threads onto the Slint event loop
// - SlintDocument: the window exposed to the locale controller as a Document
// - PortfolioController: wires the window to the session and locale stores

pub mod bridge;
pub mod controller;
pub mod document;

pub use bridge::EventLoopBridge;
pub use controller::PortfolioController;
pub use document::{SlintDocument, WindowPort};
