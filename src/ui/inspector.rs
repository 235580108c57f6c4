//! The inspector panel for editing the selected node.

use super::rendering::hex_color;
use super::state::SystemDesignApp;
use crate::catalog::COLOR_OPTIONS;
use crate::types::*;
use eframe::egui;
use eframe::epaint::StrokeKind;

const SWATCH_SIZE: f32 = 24.0;

impl SystemDesignApp {
    /// Renders the inspector for the selected node.
    ///
    /// Every field edit goes straight through the controller, so the canvas
    /// reflects it on the same frame.
    pub fn draw_inspector(&mut self, ui: &mut egui::Ui) {
        let Some(node) = self.controller.selected_node().cloned() else {
            return;
        };

        ui.horizontal(|ui| {
            ui.heading("Edit Node");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("✕").on_hover_text("Close").clicked() {
                    self.controller.deselect();
                }
                if ui.button("🗑 Delete").clicked() {
                    self.controller.delete_selected();
                }
            });
        });
        ui.separator();

        egui::Grid::new("node_info_grid")
            .num_columns(2)
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                ui.label("Type:");
                ui.label(format!("{} {}", node.kind.style().icon, node.kind.type_key()));
                ui.end_row();
                ui.label("ID:");
                ui.monospace(&node.id);
                ui.end_row();
            });
        ui.separator();

        ui.label("Label");
        let mut label = node.data.label.clone();
        if ui
            .add(egui::TextEdit::singleline(&mut label).desired_width(f32::INFINITY))
            .changed()
        {
            self.commit_patch(&node.id, NodePatch::label(label));
        }

        ui.add_space(6.0);
        ui.label("Notes");
        let mut notes = node.data.notes.clone();
        if ui
            .add(
                egui::TextEdit::multiline(&mut notes)
                    .desired_rows(4)
                    .desired_width(f32::INFINITY)
                    .hint_text("Add notes about this component"),
            )
            .changed()
        {
            self.commit_patch(&node.id, NodePatch::notes(notes));
        }

        ui.add_space(6.0);
        ui.label("Color");
        ui.horizontal_wrapped(|ui| {
            for option in COLOR_OPTIONS {
                if color_swatch(ui, option.value, node.data.color == option.value)
                    .on_hover_text(option.name)
                    .clicked()
                {
                    self.commit_patch(&node.id, NodePatch::color(option.value));
                }
            }
        });

        ui.add_space(12.0);
        ui.weak("Press Delete to delete this node");
    }

    fn commit_patch(&mut self, id: &str, patch: NodePatch) {
        if let Err(err) = self.controller.update_node(id, patch) {
            log::debug!("inspector edit ignored: {err}");
        }
    }
}

/// Stable widget id of the swatch for `hex`.
pub(super) fn swatch_id(hex: &str) -> egui::Id {
    egui::Id::new(("color_swatch", hex))
}

/// A clickable color square, outlined when it is the node's current color.
fn color_swatch(ui: &mut egui::Ui, hex: &str, current: bool) -> egui::Response {
    let (_, rect) = ui.allocate_space(egui::vec2(SWATCH_SIZE, SWATCH_SIZE));
    let response = ui.interact(rect, swatch_id(hex), egui::Sense::click());
    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        painter.rect_filled(rect, 4.0, hex_color(hex, egui::Color32::WHITE));
        let stroke = if current {
            egui::Stroke::new(2.0, egui::Color32::from_rgb(0x1A, 0x73, 0xE8))
        } else if response.hovered() {
            egui::Stroke::new(1.0, ui.visuals().strong_text_color())
        } else {
            egui::Stroke::new(1.0, egui::Color32::from_gray(180))
        };
        painter.rect_stroke(rect, 4.0, stroke, StrokeKind::Inside);
    }
    response
}
