//! Canvas rendering functionality for nodes, edges, and the background grid.
//!
//! Drawing happens in layers: dot grid, edges, the in-progress edge preview,
//! then nodes on top.

use super::canvas::{edge_world_points, node_world_rect};
use super::state::{EdgeEnd, SystemDesignApp};
use crate::constants::*;
use crate::types::*;
use eframe::egui;
use eframe::epaint::StrokeKind;

const EDGE_COLOR: egui::Color32 = egui::Color32::from_rgb(0x42, 0x85, 0xF4);
const SELECTED_EDGE_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 165, 0);
const SELECTED_NODE_COLOR: egui::Color32 = egui::Color32::from_rgb(0x1A, 0x73, 0xE8);
const NODE_BORDER_COLOR: egui::Color32 = egui::Color32::from_rgb(0xDA, 0xDC, 0xE0);

/// Parses a `#RRGGBB` string, falling back when it is not a valid color.
pub fn hex_color(hex: &str, fallback: egui::Color32) -> egui::Color32 {
    egui::Color32::from_hex(hex).unwrap_or(fallback)
}

impl SystemDesignApp {
    /// Renders all diagram elements on the canvas.
    pub fn render_diagram(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        if self.prefs.show_grid {
            self.draw_grid(painter, canvas_rect);
        }

        let diagram = self.controller.diagram();
        for edge in &diagram.edges {
            let is_selected = self.interaction.selected_edge.as_deref() == Some(edge.id.as_str());
            self.draw_edge(painter, diagram, edge, is_selected);
        }

        if let (Some(from), Some(draw_pos)) = (
            self.interaction.connecting_from.as_deref(),
            self.interaction.connection_draw_pos,
        ) {
            self.draw_connection_preview(painter, from, draw_pos);
        }
        if let (Some((edge_id, end)), Some(draw_pos)) = (
            self.interaction.reconnecting.as_ref(),
            self.interaction.connection_draw_pos,
        ) {
            self.draw_reconnect_preview(painter, edge_id, *end, draw_pos);
        }

        for node in &diagram.nodes {
            self.draw_node(painter, node);
        }

        if let Some(handles) = self.selected_edge_handles() {
            for (_, handle) in handles {
                let center = self.world_to_screen(handle);
                painter.circle_filled(center, 5.0, egui::Color32::WHITE);
                painter.circle_stroke(center, 5.0, egui::Stroke::new(2.0, SELECTED_EDGE_COLOR));
            }
        }
    }

    /// Draws a zoom-aware dot grid. Skipped when the dots would be too dense to read.
    pub fn draw_grid(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        let screen_spacing = DOT_SPACING * self.canvas.zoom_factor;
        if screen_spacing < 4.0 {
            return;
        }
        let dot_color = if self.prefs.dark_mode {
            egui::Color32::from_gray(70)
        } else {
            egui::Color32::from_gray(200)
        };

        let top_left = self.screen_to_world(canvas_rect.min);
        let bottom_right = self.screen_to_world(canvas_rect.max);
        let start_x = (top_left.x / DOT_SPACING).floor() * DOT_SPACING;
        let start_y = (top_left.y / DOT_SPACING).floor() * DOT_SPACING;

        let mut x = start_x;
        while x <= bottom_right.x {
            let mut y = start_y;
            while y <= bottom_right.y {
                let screen = self.world_to_screen(egui::pos2(x, y));
                if canvas_rect.contains(screen) {
                    painter.circle_filled(screen, DOT_RADIUS, dot_color);
                }
                y += DOT_SPACING;
            }
            x += DOT_SPACING;
        }
    }

    /// Renders an edge as a bezier curve with an arrowhead at the target.
    pub fn draw_edge(&self, painter: &egui::Painter, diagram: &Diagram, edge: &Edge, is_selected: bool) {
        let Some(points) = edge_world_points(diagram, edge) else {
            return;
        };
        let screen: Vec<egui::Pos2> = points.into_iter().map(|p| self.world_to_screen(p)).collect();

        let (color, width) = if is_selected {
            (SELECTED_EDGE_COLOR, EDGE_WIDTH + 1.0)
        } else {
            (EDGE_COLOR, EDGE_WIDTH)
        };

        if let [.., before, tip] = screen.as_slice() {
            self.draw_arrow_head(painter, *before, *tip, color);
        }
        painter.add(egui::Shape::line(screen, egui::Stroke::new(width, color)));
    }

    /// Draws a filled triangle whose point sits on `tip`, aligned with `from -> tip`.
    fn draw_arrow_head(
        &self,
        painter: &egui::Painter,
        from: egui::Pos2,
        tip: egui::Pos2,
        color: egui::Color32,
    ) {
        let direction = (tip - from).normalized();
        if !direction.is_finite() || direction == egui::Vec2::ZERO {
            return;
        }
        let arrow_size = 10.0 * self.canvas.zoom_factor;
        let arrow_width = 5.0 * self.canvas.zoom_factor;
        let perpendicular = egui::vec2(-direction.y, direction.x);
        let base = tip - direction * arrow_size;

        painter.add(egui::Shape::convex_polygon(
            vec![tip, base + perpendicular * arrow_width, base - perpendicular * arrow_width],
            color,
            egui::Stroke::NONE,
        ));
    }

    /// Renders the dashed line from the source node to the pointer while drawing an edge.
    pub fn draw_connection_preview(&self, painter: &egui::Painter, from: &str, to_screen_pos: egui::Pos2) {
        let Some(node) = self.controller.node(from) else {
            return;
        };
        let from_screen = self.world_to_screen(node_world_rect(node).right_center());

        let hovering_target = self
            .find_node_at_position(self.screen_to_world(to_screen_pos))
            .is_some_and(|id| id != from);
        let color = if hovering_target {
            SELECTED_NODE_COLOR
        } else {
            EDGE_COLOR
        };

        painter.extend(egui::Shape::dashed_line(
            &[from_screen, to_screen_pos],
            egui::Stroke::new(EDGE_WIDTH, color),
            6.0,
            4.0,
        ));
        painter.circle_filled(to_screen_pos, 4.0, color);
    }

    /// Renders the dashed line from the fixed end of an edge to the dragged end.
    fn draw_reconnect_preview(
        &self,
        painter: &egui::Painter,
        edge_id: &str,
        end: EdgeEnd,
        to_screen_pos: egui::Pos2,
    ) {
        if self.interaction.selected_edge.as_deref() != Some(edge_id) {
            return;
        }
        let Some([(_, source_end), (_, target_end)]) = self.selected_edge_handles() else {
            return;
        };
        let fixed = match end {
            EdgeEnd::Source => target_end,
            EdgeEnd::Target => source_end,
        };
        painter.extend(egui::Shape::dashed_line(
            &[self.world_to_screen(fixed), to_screen_pos],
            egui::Stroke::new(EDGE_WIDTH, SELECTED_EDGE_COLOR),
            6.0,
            4.0,
        ));
    }

    /// Renders a single node: card, icon, and label.
    ///
    /// The card uses the node's own color when it parses, otherwise the kind's
    /// fill. The selected node gets a blue outline.
    pub fn draw_node(&self, painter: &egui::Painter, node: &DiagramNode) {
        let world_rect = node_world_rect(node);
        let rect = egui::Rect::from_min_max(
            self.world_to_screen(world_rect.min),
            self.world_to_screen(world_rect.max),
        );
        let style = node.kind.style();
        let zoom = self.canvas.zoom_factor;
        let corner = NODE_CORNER_RADIUS * zoom;

        let style_fill = hex_color(style.fill, egui::Color32::WHITE);
        let fill = hex_color(&node.data.color, style_fill);
        painter.rect_filled(rect, corner, fill);

        let stroke = if self.controller.selection().holds(&node.id) {
            egui::Stroke::new(2.0, SELECTED_NODE_COLOR)
        } else {
            egui::Stroke::new(1.0, NODE_BORDER_COLOR)
        };
        painter.rect_stroke(rect, corner, stroke, StrokeKind::Outside);

        let editing = self
            .interaction
            .label_edit
            .as_ref()
            .is_some_and(|edit| edit.node_id == node.id);
        if !editing {
            self.draw_node_text(painter, node, rect);
        }
    }

    /// Renders the kind icon and the wrapped label inside a node.
    fn draw_node_text(&self, painter: &egui::Painter, node: &DiagramNode, rect: egui::Rect) {
        let zoom = self.canvas.zoom_factor;
        let style = node.kind.style();
        let text_color = hex_color(style.text, egui::Color32::BLACK);
        let padding = 8.0 * zoom;

        let icon_font = egui::FontId::proportional((16.0 * zoom).clamp(6.0, 64.0));
        let icon_pos = egui::pos2(rect.min.x + padding, rect.center().y);
        painter.text(icon_pos, egui::Align2::LEFT_CENTER, style.icon, icon_font, text_color);

        let (text, color) = if node.data.label.is_empty() {
            ("Double-click to edit".to_owned(), text_color.gamma_multiply(0.5))
        } else {
            (node.data.label.clone(), text_color)
        };
        let label_left = rect.min.x + padding + 20.0 * zoom;
        let wrap_width = (rect.max.x - padding - label_left).max(1.0);
        let font = egui::FontId::proportional((12.0 * zoom).clamp(6.0, 48.0));
        let galley = painter.layout(text, font, color, wrap_width);

        let pos = egui::pos2(
            label_left + (wrap_width - galley.size().x) / 2.0,
            rect.center().y - galley.size().y / 2.0,
        );
        painter.galley(pos, galley, color);
    }
}
