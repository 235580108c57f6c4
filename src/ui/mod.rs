//! User interface components and rendering logic for the diagram editor.
//!
//! # Module Organization
//!
//! - `state` - UI state structures, preferences, and the main `SystemDesignApp`
//! - `canvas` - Canvas navigation, gestures, drops, and hit-testing
//! - `rendering` - Drawing nodes, edges, and the grid
//! - `palette` - The draggable component list
//! - `inspector` - The selected-node editor

mod canvas;
mod inspector;
mod palette;
mod rendering;
mod state;

pub use state::{Preferences, SystemDesignApp};

use eframe::egui;
use state::{InteractionState, APP_STATE_KEY};

const MIN_PANEL_WIDTH: f32 = 160.0;

impl eframe::App for SystemDesignApp {
    /// Persist preferences between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.to_json() {
            Ok(json) => storage.set_string(APP_STATE_KEY, json),
            Err(err) => log::warn!("Failed to serialize app state: {err}"),
        }
    }

    /// Main update function called by egui for each frame.
    ///
    /// Lays out the toolbar, the palette on the left, the inspector on the
    /// right (only while a node is selected), and the canvas in the middle.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let visuals = if self.prefs.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);

        self.handle_delete_key(ctx);

        egui::TopBottomPanel::top("top_toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        let viewport_width = ctx.input(|i| i.content_rect().width());
        let max_panel_width = (viewport_width * 0.4).max(MIN_PANEL_WIDTH);

        egui::SidePanel::left("component_palette")
            .resizable(true)
            .default_width(self.prefs.palette_width.clamp(MIN_PANEL_WIDTH, max_panel_width))
            .show(ctx, |ui| {
                self.prefs.palette_width = ui.available_width().clamp(MIN_PANEL_WIDTH, max_panel_width);
                self.draw_palette(ui);
            });

        if self.controller.selected_node().is_some() {
            egui::SidePanel::right("inspector_panel")
                .resizable(true)
                .default_width(self.prefs.inspector_width.clamp(MIN_PANEL_WIDTH, max_panel_width))
                .show(ctx, |ui| {
                    self.prefs.inspector_width =
                        ui.available_width().clamp(MIN_PANEL_WIDTH, max_panel_width);
                    egui::ScrollArea::vertical()
                        .auto_shrink([false; 2])
                        .show(ui, |ui| self.draw_inspector(ui));
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_canvas(ui);
        });
    }
}

impl SystemDesignApp {
    /// Handles the Delete key: removes the selected node, or else the selected edge.
    ///
    /// Ignored while any text field (including the inline label editor) has focus.
    pub fn handle_delete_key(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() || self.interaction.label_edit.is_some() {
            return;
        }
        if !ctx.input(|i| i.key_pressed(egui::Key::Delete)) {
            return;
        }

        if self.controller.delete_selected().is_some() {
            self.interaction.dragging_node = None;
            return;
        }
        if let Some(edge_id) = self.interaction.selected_edge.take() {
            if let Err(err) = self.controller.delete_edge(&edge_id) {
                log::debug!("edge delete ignored: {err}");
            }
        }
    }

    /// Renders the toolbar with view controls and diagram statistics.
    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.strong("System Design");
            ui.separator();

            if ui.button("⛶ Center View").clicked() {
                self.fit_view();
            }
            ui.toggle_value(&mut self.interaction.connection_mode, "🔗 Connect")
                .on_hover_text("Drag from a node to draw an edge (Shift+drag works in any mode)");
            if ui.button("🗑 Clear").clicked() {
                self.controller.clear();
                self.interaction = InteractionState {
                    connection_mode: self.interaction.connection_mode,
                    ..Default::default()
                };
            }

            ui.separator();
            ui.checkbox(&mut self.prefs.show_grid, "Grid");
            ui.checkbox(&mut self.prefs.snap_to_grid, "Snap");
            ui.checkbox(&mut self.prefs.dark_mode, "Dark Mode");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let diagram = self.controller.diagram();
                ui.label(format!(
                    "{} nodes · {} edges · {:.0}%",
                    diagram.nodes.len(),
                    diagram.edges.len(),
                    self.canvas.zoom_factor * 100.0
                ));
            });
        });
    }
}
