//! # System Design Editor
//!
//! A visual editor for sketching system architectures: drag components from a
//! palette onto a canvas, connect them with directed edges, and annotate the
//! selected component in an inspector panel.
//!
//! ## Features
//! - Thirteen component kinds (databases, queues, caches, services, ...)
//! - Drag-and-drop node creation from the component palette
//! - Edge drawing by Shift+drag or in connection mode
//! - Single selection with an inspector for label, notes, and color
//! - Delete key removal with cascade of attached edges
//! - Canvas panning, zooming, and fit-to-view
//!
//! The diagram lives only in memory; UI preferences persist between runs.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod catalog;
pub mod constants;
pub mod controller;
pub mod error;
mod types;
mod ui;
#[cfg(target_arch = "wasm32")]
mod web;

// Re-export public types and functions
pub use catalog::{ColorOption, ComponentDrag, DropEffect, NodeStyle, PaletteEntry};
pub use controller::{CanvasController, Selection, ViewTransform};
pub use error::EditError;
pub use types::*;
pub use ui::{Preferences, SystemDesignApp};

/// Runs the editor as a native desktop application.
///
/// Returns `Ok(())` when the window is closed, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// fn main() -> Result<(), eframe::Error> {
///     system_design_editor::run_app()
/// }
/// ```
#[cfg(not(target_arch = "wasm32"))]
pub fn run_app() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("System Design Editor")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };
    log::info!("starting native editor");
    eframe::run_native(
        "System Design Editor",
        options,
        Box::new(|cc| Ok(Box::new(SystemDesignApp::new(cc)))),
    )
}
