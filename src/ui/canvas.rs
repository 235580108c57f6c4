//! Canvas interaction and navigation functionality.
//!
//! This module handles canvas panning, zooming, fit-to-view, node dragging,
//! edge drawing, palette drops, inline label editing, and hit-testing. Every
//! change to the diagram goes through the canvas controller.

use super::state::{EdgeEnd, LabelEdit, SystemDesignApp};
use crate::catalog::ComponentDrag;
use crate::constants::*;
use crate::types::*;
use eframe::egui;

impl SystemDesignApp {
    /// Converts screen coordinates to world coordinates accounting for zoom and pan.
    pub fn screen_to_world(&self, screen_pos: egui::Pos2) -> egui::Pos2 {
        self.canvas.screen_to_world(screen_pos)
    }

    /// Converts world coordinates to screen coordinates accounting for zoom and pan.
    pub fn world_to_screen(&self, world_pos: egui::Pos2) -> egui::Pos2 {
        self.canvas.world_to_screen(world_pos)
    }

    /// Snaps a position to the nearest grid point.
    pub fn snap_to_grid(&self, pos: egui::Pos2) -> egui::Pos2 {
        egui::pos2(
            (pos.x / GRID_SIZE).round() * GRID_SIZE,
            (pos.y / GRID_SIZE).round() * GRID_SIZE,
        )
    }

    /// Renders the canvas area and routes all pointer gestures on it.
    pub fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        self.canvas.rect = Some(response.rect);

        if self.canvas.needs_fit {
            self.fit_view();
            self.canvas.needs_fit = false;
        }

        self.handle_canvas_panning(ui, &response);
        self.handle_canvas_zoom(ui, &response);
        self.handle_palette_drop(ui, &response);
        self.handle_canvas_clicks(&response);
        self.handle_node_dragging(ui, &response);

        self.render_diagram(&painter, response.rect);
        if response.dnd_hover_payload::<ComponentDrag>().is_some() {
            painter.rect_stroke(
                response.rect.shrink(2.0),
                4.0,
                egui::Stroke::new(2.0, egui::Color32::from_rgb(0x1A, 0x73, 0xE8)),
                eframe::epaint::StrokeKind::Inside,
            );
        }

        if self.interaction.label_edit.is_some() {
            self.draw_label_editor(ui);
        }
    }

    /// Recenters and rescales the view so every node fits with some padding.
    ///
    /// Does nothing until the canvas has been laid out, or when the diagram is empty.
    pub fn fit_view(&mut self) {
        let Some(canvas_rect) = self.canvas.rect else {
            return;
        };
        let Some(bounds) = self.diagram_bounds() else {
            return;
        };

        let padded = bounds.expand2(bounds.size() * FIT_VIEW_PADDING);
        let zoom = (canvas_rect.width() / padded.width())
            .min(canvas_rect.height() / padded.height())
            .clamp(MIN_ZOOM, MAX_ZOOM);

        self.canvas.zoom_factor = zoom;
        self.canvas.offset = canvas_rect.center().to_vec2() - bounds.center().to_vec2() * zoom;
    }

    /// World-space union of all node rectangles.
    fn diagram_bounds(&self) -> Option<egui::Rect> {
        self.controller
            .diagram()
            .nodes
            .iter()
            .map(node_world_rect)
            .reduce(|acc, rect| acc.union(rect))
    }

    /// Handles middle-click or Cmd/Ctrl+left-click canvas panning functionality.
    pub fn handle_canvas_panning(&mut self, ui: &mut egui::Ui, response: &egui::Response) {
        let should_pan = ui.input(|i| {
            i.pointer.middle_down() || (i.pointer.primary_down() && i.modifiers.command)
        });

        if should_pan {
            if let Some(current_pos) = response.interact_pointer_pos() {
                if !self.interaction.is_panning {
                    self.interaction.is_panning = true;
                    self.interaction.last_pan_pos = Some(current_pos);
                } else if let Some(last_pos) = self.interaction.last_pan_pos {
                    self.canvas.offset += current_pos - last_pos;
                    self.interaction.last_pan_pos = Some(current_pos);
                }
            }
        } else {
            self.interaction.is_panning = false;
            self.interaction.last_pan_pos = None;
        }
    }

    /// Handles scroll wheel zooming, keeping the world point under the cursor fixed.
    pub fn handle_canvas_zoom(&mut self, ui: &mut egui::Ui, response: &egui::Response) {
        let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll_delta == 0.0 {
            return;
        }
        let Some(mouse_pos) = ui.input(|i| i.pointer.hover_pos()) else {
            return;
        };
        if !response.rect.contains(mouse_pos) {
            return;
        }

        let world_before = self.screen_to_world(mouse_pos);
        let zoom_delta = if scroll_delta > 0.0 { 0.025 } else { -0.025 };
        let old_zoom = self.canvas.zoom_factor;
        self.canvas.zoom_factor = (old_zoom + zoom_delta).clamp(MIN_ZOOM, MAX_ZOOM);

        if (self.canvas.zoom_factor - old_zoom).abs() > f32::EPSILON {
            let screen_after = self.world_to_screen(world_before);
            self.canvas.offset += mouse_pos - screen_after;
        }
    }

    /// Creates a node when a palette entry is released over the canvas.
    fn handle_palette_drop(&mut self, ui: &egui::Ui, response: &egui::Response) {
        let Some(payload) = response.dnd_release_payload::<ComponentDrag>() else {
            return;
        };
        let Some(pos) = ui.input(|i| i.pointer.hover_pos()) else {
            return;
        };
        self.accept_drop(payload.type_key, pos);
    }

    /// Hands a dropped type key to the controller. Rejected drops are no-ops.
    pub fn accept_drop(&mut self, type_key: &str, screen_pos: egui::Pos2) -> Option<NodeId> {
        match self
            .controller
            .on_drop(self.canvas.view(), (screen_pos.x, screen_pos.y), type_key)
        {
            Ok(id) => Some(id),
            Err(err) => {
                log::debug!("drop ignored: {err}");
                None
            }
        }
    }

    /// Handles single clicks (selection) and double clicks (label editing).
    fn handle_canvas_clicks(&mut self, response: &egui::Response) {
        if self.interaction.is_panning {
            return;
        }
        let Some(pos) = response.interact_pointer_pos() else {
            return;
        };
        let world_pos = self.screen_to_world(pos);

        if response.double_clicked() {
            if let Some(node_id) = self.find_node_at_position(world_pos) {
                self.start_label_edit(&node_id);
            }
            return;
        }
        if !response.clicked()
            || self.interaction.connecting_from.is_some()
            || self.interaction.reconnecting.is_some()
        {
            return;
        }

        if let Some(node_id) = self.find_node_at_position(world_pos) {
            self.select_node(&node_id);
        } else if let Some(edge_id) = self.find_edge_at_position(world_pos) {
            self.controller.deselect();
            self.interaction.selected_edge = Some(edge_id);
        } else {
            self.controller.deselect();
            self.interaction.selected_edge = None;
        }
    }

    fn select_node(&mut self, node_id: &str) {
        if let Err(err) = self.controller.on_node_click(node_id) {
            log::debug!("selection ignored: {err}");
            return;
        }
        self.interaction.selected_edge = None;
    }

    /// Handles node dragging and edge drawing with the left mouse button.
    ///
    /// What a gesture does is decided once per press, by hit-testing the press
    /// origin; a drag that starts on empty canvas never grabs a node it passes
    /// over. In connection mode, or with Shift held at press time, dragging from
    /// a node draws an edge; otherwise it moves the node. Shift (or the snap
    /// preference) snaps moved nodes to the grid.
    pub fn handle_node_dragging(&mut self, ui: &mut egui::Ui, response: &egui::Response) {
        if ui.input(|i| i.pointer.primary_down()) && !self.interaction.is_panning {
            let Some(current_pos) = response.interact_pointer_pos() else {
                return;
            };
            let world_pos = self.screen_to_world(current_pos);
            let snap = self.prefs.snap_to_grid || ui.input(|i| i.modifiers.shift);

            if let Some(node_id) = self.interaction.dragging_node.clone() {
                self.update_dragged_node_position(&node_id, world_pos, snap);
                return;
            }
            if self.interaction.connecting_from.is_some() || self.interaction.reconnecting.is_some() {
                self.interaction.connection_draw_pos = Some(current_pos);
                return;
            }
            if self.interaction.press_resolved {
                return;
            }
            self.interaction.press_resolved = true;

            let press_pos = ui.input(|i| i.pointer.press_origin()).unwrap_or(current_pos);
            let press_world = self.screen_to_world(press_pos);
            if let Some(grab) = self.find_edge_handle_at(press_world) {
                self.interaction.reconnecting = Some(grab);
                self.interaction.connection_draw_pos = Some(current_pos);
            } else if let Some(node_id) = self.find_node_at_position(press_world) {
                let shift_held = ui.input(|i| i.modifiers.shift);
                if self.interaction.connection_mode || shift_held {
                    self.interaction.connecting_from = Some(node_id);
                    self.interaction.connection_start_pos = Some(press_pos);
                    self.interaction.connection_draw_pos = Some(current_pos);
                } else {
                    self.start_node_drag(node_id.clone(), press_world);
                    if current_pos != press_pos {
                        self.update_dragged_node_position(&node_id, world_pos, snap);
                    }
                }
            }
        } else {
            let release_pos = response
                .interact_pointer_pos()
                .or(self.interaction.connection_draw_pos);
            if let Some(pos) = release_pos {
                if self.interaction.connecting_from.is_some() {
                    self.finalize_connection(pos);
                }
                if let Some((edge_id, end)) = self.interaction.reconnecting.clone() {
                    self.finalize_reconnect(&edge_id, end, pos);
                }
            }

            self.interaction.press_resolved = false;
            self.interaction.dragging_node = None;
            self.interaction.reconnecting = None;
            self.interaction.connecting_from = None;
            self.interaction.connection_start_pos = None;
            self.interaction.connection_draw_pos = None;
        }
    }

    /// Starts dragging the specified node and selects it.
    fn start_node_drag(&mut self, node_id: NodeId, world_pos: egui::Pos2) {
        if let Some(node) = self.controller.node(&node_id) {
            let center = egui::pos2(node.position.0, node.position.1);
            self.interaction.node_drag_offset = center - world_pos;
        }
        self.select_node(&node_id);
        self.interaction.dragging_node = Some(node_id);
    }

    /// Moves the dragged node under the pointer.
    fn update_dragged_node_position(&mut self, node_id: &str, world_pos: egui::Pos2, snap: bool) {
        let mut target = world_pos + self.interaction.node_drag_offset;
        if snap {
            target = self.snap_to_grid(target);
        }
        if let Err(err) = self.controller.move_node(node_id, (target.x, target.y)) {
            log::debug!("drag ignored: {err}");
            self.interaction.dragging_node = None;
        }
    }

    /// Creates an edge if the pointer was released over a node after a real drag.
    fn finalize_connection(&mut self, release_pos: egui::Pos2) {
        let (Some(source), Some(start_pos)) = (
            self.interaction.connecting_from.clone(),
            self.interaction.connection_start_pos,
        ) else {
            return;
        };
        let dragged = (self.screen_to_world(release_pos) - self.screen_to_world(start_pos)).length();
        if dragged < CLICK_THRESHOLD {
            return;
        }
        let Some(target) = self.find_node_at_position(self.screen_to_world(release_pos)) else {
            return;
        };
        if let Err(err) = self.controller.on_connect(&source, &target) {
            log::debug!("connection ignored: {err}");
        }
    }

    /// Re-points one end of an edge at the node under the release position.
    ///
    /// Releasing over empty canvas leaves the edge as it was.
    fn finalize_reconnect(&mut self, edge_id: &str, end: EdgeEnd, release_pos: egui::Pos2) {
        let Some(node_id) = self.find_node_at_position(self.screen_to_world(release_pos)) else {
            return;
        };
        let Some(edge) = self.controller.diagram().edge(edge_id) else {
            return;
        };
        let (source, target) = match end {
            EdgeEnd::Source => (node_id, edge.target.clone()),
            EdgeEnd::Target => (edge.source.clone(), node_id),
        };
        if let Err(err) = self.controller.reconnect_edge(edge_id, &source, &target) {
            log::debug!("reconnect ignored: {err}");
        }
    }

    /// Endpoint handles of the selected edge, in world space.
    pub(super) fn selected_edge_handles(&self) -> Option<[(EdgeEnd, egui::Pos2); 2]> {
        let diagram = self.controller.diagram();
        let edge = diagram.edge(self.interaction.selected_edge.as_deref()?)?;
        let (start, end) = edge_anchors(diagram.node(&edge.source)?, diagram.node(&edge.target)?);
        Some([(EdgeEnd::Source, start), (EdgeEnd::Target, end)])
    }

    /// Finds a handle of the selected edge near a world position.
    fn find_edge_handle_at(&self, pos: egui::Pos2) -> Option<(EdgeId, EdgeEnd)> {
        let handles = self.selected_edge_handles()?;
        let (end, _) = handles
            .into_iter()
            .find(|(_, handle)| (*handle - pos).length() < CLICK_THRESHOLD)?;
        Some((self.interaction.selected_edge.clone()?, end))
    }

    /// Opens the inline label editor for a node.
    pub fn start_label_edit(&mut self, node_id: &str) {
        let Some(node) = self.controller.node(node_id) else {
            return;
        };
        self.interaction.label_edit = Some(LabelEdit {
            node_id: node.id.clone(),
            buffer: node.data.label.clone(),
            focus_requested: false,
        });
    }

    /// Draws the inline label editor over its node.
    ///
    /// Enter or focus loss commits through the controller; Escape discards.
    fn draw_label_editor(&mut self, ui: &mut egui::Ui) {
        let Some(mut edit) = self.interaction.label_edit.take() else {
            return;
        };
        let Some(node) = self.controller.node(&edit.node_id) else {
            return;
        };
        let world_rect = node_world_rect(node);
        let min = self.world_to_screen(world_rect.min);
        let max = self.world_to_screen(world_rect.max);
        let width = (max.x - min.x).max(60.0);
        let anchor = egui::pos2(min.x, (min.y + max.y) / 2.0 - 12.0);

        let area = egui::Area::new(egui::Id::new(("label_edit", edit.node_id.as_str())))
            .fixed_pos(anchor)
            .order(egui::Order::Foreground)
            .show(ui.ctx(), |ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut edit.buffer)
                        .desired_width(width)
                        .horizontal_align(egui::Align::Center),
                )
            });
        let response = area.inner;

        if !edit.focus_requested {
            response.request_focus();
            edit.focus_requested = true;
        }

        let (escape, enter) =
            ui.input(|i| (i.key_pressed(egui::Key::Escape), i.key_pressed(egui::Key::Enter)));
        if escape {
            return;
        }
        if enter || response.lost_focus() {
            let patch = NodePatch::label(edit.buffer.clone());
            if let Err(err) = self.controller.update_node(&edit.node_id, patch) {
                log::debug!("label edit ignored: {err}");
            }
            return;
        }
        self.interaction.label_edit = Some(edit);
    }

    /// Finds the topmost node at the given world position, if any.
    pub fn find_node_at_position(&self, pos: egui::Pos2) -> Option<NodeId> {
        self.controller
            .diagram()
            .nodes
            .iter()
            .rev()
            .find(|node| node_world_rect(node).contains(pos))
            .map(|node| node.id.clone())
    }

    /// Finds the topmost edge passing within the click threshold of a world position.
    pub fn find_edge_at_position(&self, pos: egui::Pos2) -> Option<EdgeId> {
        let diagram = self.controller.diagram();
        diagram
            .edges
            .iter()
            .rev()
            .find(|edge| {
                edge_world_points(diagram, edge).is_some_and(|points| {
                    points
                        .windows(2)
                        .any(|seg| point_to_segment_distance(pos, seg[0], seg[1]) < CLICK_THRESHOLD)
                })
            })
            .map(|edge| edge.id.clone())
    }
}

/// World-space rectangle of a node (centered at its position).
pub(super) fn node_world_rect(node: &DiagramNode) -> egui::Rect {
    egui::Rect::from_center_size(
        egui::pos2(node.position.0, node.position.1),
        egui::vec2(NODE_WIDTH, NODE_HEIGHT),
    )
}

/// Where edges leave a node (right side) and where they enter (left side).
pub(super) fn edge_anchors(source: &DiagramNode, target: &DiagramNode) -> (egui::Pos2, egui::Pos2) {
    (
        node_world_rect(source).right_center(),
        node_world_rect(target).left_center(),
    )
}

/// Control points of the horizontal bezier curve between two anchors.
pub(super) fn edge_curve(start: egui::Pos2, end: egui::Pos2) -> [egui::Pos2; 4] {
    let reach = ((end.x - start.x).abs() / 2.0).max(40.0);
    [
        start,
        start + egui::vec2(reach, 0.0),
        end - egui::vec2(reach, 0.0),
        end,
    ]
}

/// Flattens a cubic bezier into `EDGE_SEGMENTS + 1` points.
pub(super) fn flatten_curve(curve: [egui::Pos2; 4]) -> Vec<egui::Pos2> {
    (0..=EDGE_SEGMENTS)
        .map(|step| {
            let t = step as f32 / EDGE_SEGMENTS as f32;
            let u = 1.0 - t;
            let weights = [u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t];
            let mut point = egui::Vec2::ZERO;
            for (weight, control) in weights.iter().zip(curve) {
                point += control.to_vec2() * *weight;
            }
            point.to_pos2()
        })
        .collect()
}

/// World-space polyline of an edge, or `None` if an endpoint is missing.
pub(super) fn edge_world_points(diagram: &Diagram, edge: &Edge) -> Option<Vec<egui::Pos2>> {
    let source = diagram.node(&edge.source)?;
    let target = diagram.node(&edge.target)?;
    let (start, end) = edge_anchors(source, target);
    Some(flatten_curve(edge_curve(start, end)))
}

/// Distance from a point to a line segment.
fn point_to_segment_distance(point: egui::Pos2, start: egui::Pos2, end: egui::Pos2) -> f32 {
    let line = end - start;
    let len_sq = line.length_sq();
    if len_sq < 0.0001 {
        return (point - start).length();
    }
    let t = ((point - start).dot(line) / len_sq).clamp(0.0, 1.0);
    (point - (start + line * t)).length()
}
