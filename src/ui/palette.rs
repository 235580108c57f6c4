//! The component palette: one draggable entry per node kind.

use super::rendering::hex_color;
use super::state::SystemDesignApp;
use crate::catalog::PALETTE;
use eframe::egui;

impl SystemDesignApp {
    /// Renders the palette. Entries are drag sources carrying a `ComponentDrag` payload.
    pub fn draw_palette(&mut self, ui: &mut egui::Ui) {
        ui.heading("Components");
        ui.label("Drag onto the canvas");
        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                for entry in PALETTE {
                    let id = egui::Id::new(("palette", entry.kind.type_key()));
                    ui.dnd_drag_source(id, entry.drag_payload(), |ui| {
                        egui::Frame::group(ui.style())
                            .inner_margin(egui::Margin::symmetric(8, 6))
                            .show(ui, |ui| {
                                ui.set_min_width(ui.available_width());
                                ui.horizontal(|ui| {
                                    let color = hex_color(
                                        entry.kind.style().text,
                                        ui.visuals().text_color(),
                                    );
                                    ui.label(egui::RichText::new(entry.icon).color(color).size(16.0));
                                    ui.label(entry.label);
                                });
                            });
                    });
                    ui.add_space(4.0);
                }
            });
    }
}
