//! Application state management structures.
//!
//! This module contains the state the UI keeps next to the canvas controller:
//! canvas navigation, in-progress gestures, and the persisted preferences.

use crate::controller::{CanvasController, ViewTransform};
use crate::types::*;
use eframe::egui;
use serde::{Deserialize, Serialize};

/// User preferences persisted between sessions.
///
/// The diagram itself is never persisted; only these settings are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Whether dark mode visuals are enabled
    pub dark_mode: bool,
    /// Whether the dotted background grid is drawn
    pub show_grid: bool,
    /// Whether dragged nodes snap to the grid even without Shift
    pub snap_to_grid: bool,
    /// Remembered width of the component palette
    pub palette_width: f32,
    /// Remembered width of the inspector panel
    pub inspector_width: f32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_mode: false,
            show_grid: true,
            snap_to_grid: false,
            palette_width: 200.0,
            inspector_width: 300.0,
        }
    }
}

/// State related to canvas navigation and display.
///
/// Tracks the current pan offset and zoom level, and the screen rectangle the
/// canvas occupied on the last frame.
#[derive(Debug, Clone)]
pub struct CanvasState {
    /// Current canvas pan offset (in screen space)
    pub offset: egui::Vec2,
    /// Current zoom level (1.0 = normal, 2.0 = 2x zoom, 0.5 = 50% zoom)
    pub zoom_factor: f32,
    /// Canvas rectangle from the most recent frame; `None` until first laid out
    pub rect: Option<egui::Rect>,
    /// Fit all nodes into view on the next frame
    pub needs_fit: bool,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            offset: egui::Vec2::ZERO,
            zoom_factor: 1.0,
            rect: None,
            needs_fit: true,
        }
    }
}

impl CanvasState {
    /// Converts screen coordinates to world coordinates accounting for zoom and pan.
    pub fn screen_to_world(&self, screen_pos: egui::Pos2) -> egui::Pos2 {
        (screen_pos - self.offset) / self.zoom_factor
    }

    /// Converts world coordinates to screen coordinates accounting for zoom and pan.
    pub fn world_to_screen(&self, world_pos: egui::Pos2) -> egui::Pos2 {
        world_pos * self.zoom_factor + self.offset
    }

    /// The coordinate transform for drops, available once the canvas has been laid out.
    pub fn view(&self) -> Option<&dyn ViewTransform> {
        self.rect.map(|_| self as &dyn ViewTransform)
    }
}

impl ViewTransform for CanvasState {
    fn screen_to_diagram(&self, screen: (f32, f32)) -> (f32, f32) {
        let world = self.screen_to_world(egui::pos2(screen.0, screen.1));
        (world.x, world.y)
    }
}

/// Inline label editor opened by double-clicking a node.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEdit {
    /// Node whose label is being edited
    pub node_id: NodeId,
    /// Text typed so far; committed on Enter or focus loss
    pub buffer: String,
    /// Whether focus has been requested for this edit session
    pub focus_requested: bool,
}

/// Which end of an edge is being dragged to a new node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEnd {
    /// The end leaving the source node
    Source,
    /// The end entering the target node
    Target,
}

/// State related to user interactions with nodes, edges and the canvas.
///
/// Node selection lives in the controller; everything here is gesture state.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    /// Currently selected edge, if any
    pub selected_edge: Option<EdgeId>,
    /// Set once the current primary press has been hit-tested
    pub press_resolved: bool,
    /// Node currently being dragged by the user
    pub dragging_node: Option<NodeId>,
    /// Offset from mouse to node center during dragging
    pub node_drag_offset: egui::Vec2,
    /// Whether the user is currently panning the canvas
    pub is_panning: bool,
    /// Last mouse position during panning operation
    pub last_pan_pos: Option<egui::Pos2>,
    /// Node from which an edge is being drawn
    pub connecting_from: Option<NodeId>,
    /// Screen position where the connect gesture started
    pub connection_start_pos: Option<egui::Pos2>,
    /// Current mouse position while drawing an edge
    pub connection_draw_pos: Option<egui::Pos2>,
    /// Endpoint of the selected edge being dragged to another node
    pub reconnecting: Option<(EdgeId, EdgeEnd)>,
    /// When set, dragging from a node draws an edge instead of moving the node
    pub connection_mode: bool,
    /// Open inline label editor, if any
    pub label_edit: Option<LabelEdit>,
}

/// The main application structure: the canvas controller plus UI state.
///
/// This struct implements the `eframe::App` trait. Only `prefs` is serialized.
#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemDesignApp {
    /// Owner of the diagram and the node selection
    #[serde(skip)]
    pub controller: CanvasController,
    /// Canvas navigation and display state
    #[serde(skip)]
    pub canvas: CanvasState,
    /// In-progress gestures
    #[serde(skip)]
    pub interaction: InteractionState,
    /// Persisted preferences
    pub prefs: Preferences,
}

/// Storage key under which the app state is persisted.
pub const APP_STATE_KEY: &str = "app_state";

impl SystemDesignApp {
    /// Creates the app, restoring preferences from eframe storage when present.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let restored = cc
            .storage
            .and_then(|storage| storage.get_string(APP_STATE_KEY))
            .and_then(|json| match Self::from_json(&json) {
                Ok(app) => Some(app),
                Err(err) => {
                    log::warn!("ignoring unreadable app state: {err}");
                    None
                }
            });
        restored.unwrap_or_default()
    }

    /// Serializes the persisted part of the app to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Restores an app from JSON. Non-persisted state starts fresh.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_transform_round_trips_through_zoom_and_pan() {
        let canvas = CanvasState {
            offset: egui::vec2(30.0, -20.0),
            zoom_factor: 2.0,
            ..CanvasState::default()
        };

        let world = canvas.screen_to_world(egui::pos2(130.0, 80.0));

        assert_eq!(world, egui::pos2(50.0, 50.0));
        assert_eq!(canvas.world_to_screen(world), egui::pos2(130.0, 80.0));
    }

    #[test]
    fn view_is_unavailable_until_laid_out() {
        let mut canvas = CanvasState::default();
        assert!(canvas.view().is_none());

        canvas.rect = Some(egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(10.0, 10.0)));

        let view = canvas.view().expect("view after layout");
        assert_eq!(view.screen_to_diagram((4.0, 6.0)), (4.0, 6.0));
    }

    #[test]
    fn only_preferences_are_persisted() {
        let mut app = SystemDesignApp::default();
        app.prefs.dark_mode = true;
        app.prefs.palette_width = 240.0;
        app.controller.clear();

        let json = app.to_json().unwrap();
        assert!(!json.contains("Input Node"));

        let restored = SystemDesignApp::from_json(&json).unwrap();
        assert_eq!(restored.prefs, app.prefs);
        assert_eq!(restored.controller.diagram().nodes.len(), 3);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let restored = SystemDesignApp::from_json(r#"{"prefs": {"show_grid": false}}"#).unwrap();

        assert!(!restored.prefs.show_grid);
        assert_eq!(restored.prefs.inspector_width, Preferences::default().inspector_width);
        assert!(SystemDesignApp::from_json("not json").is_err());
    }
}
