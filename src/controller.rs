//! The canvas controller: sole owner of the diagram and the node selection.
//!
//! All gestures coming out of the UI (drop, connect, click, field edit, delete)
//! end up as one method call here. Every method either applies its change
//! completely or leaves the state untouched and returns an [`EditError`].

use crate::constants::DEFAULT_NODE_COLOR;
use crate::error::EditError;
use crate::types::*;

/// Converts screen positions into diagram coordinates.
///
/// Implemented by the canvas once it knows its pan offset and zoom.
pub trait ViewTransform {
    /// Maps a screen-space point to diagram space.
    fn screen_to_diagram(&self, screen: (f32, f32)) -> (f32, f32);
}

/// The at-most-one node targeted by the inspector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// Nothing selected
    #[default]
    Empty,
    /// The node with this id is selected
    Holding(NodeId),
}

impl Selection {
    /// The selected node id, if any.
    pub fn node_id(&self) -> Option<&str> {
        match self {
            Selection::Empty => None,
            Selection::Holding(id) => Some(id.as_str()),
        }
    }

    /// Returns true if `id` is the selected node.
    pub fn holds(&self, id: &str) -> bool {
        self.node_id() == Some(id)
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Empty)
    }
}

/// Owns the node/edge collections and the selection for one editing session.
#[derive(Debug, Clone)]
pub struct CanvasController {
    diagram: Diagram,
    selection: Selection,
    /// Monotonic suffix for generated node and edge ids
    next_seq: u64,
}

impl Default for CanvasController {
    /// A controller holding the starter diagram.
    fn default() -> Self {
        Self::new(Diagram::seeded())
    }
}

impl CanvasController {
    /// Creates a controller over an existing diagram with nothing selected.
    pub fn new(diagram: Diagram) -> Self {
        Self {
            diagram,
            selection: Selection::Empty,
            next_seq: 0,
        }
    }

    /// Read access to the diagram for rendering.
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// The current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Looks up a node by id.
    pub fn node(&self, id: &str) -> Option<&DiagramNode> {
        self.diagram.node(id)
    }

    /// The live selected node. Always reflects the latest `update_node`.
    pub fn selected_node(&self) -> Option<&DiagramNode> {
        self.selection.node_id().and_then(|id| self.diagram.node(id))
    }

    /// Creates a node from a palette drop.
    ///
    /// `payload` is the dropped type key; `view` is `None` until the canvas has
    /// been laid out. The node gets a fresh id, the label `"<type> node"`, empty
    /// notes and the default fill color.
    pub fn on_drop(
        &mut self,
        view: Option<&dyn ViewTransform>,
        screen_pos: (f32, f32),
        payload: &str,
    ) -> Result<NodeId, EditError> {
        let kind = NodeKind::from_type_key(payload).ok_or(EditError::MissingPayload)?;
        let view = view.ok_or(EditError::SurfaceNotReady)?;
        let position = view.screen_to_diagram(screen_pos);
        Ok(self.insert_node(kind, position))
    }

    fn insert_node(&mut self, kind: NodeKind, position: (f32, f32)) -> NodeId {
        let key = kind.type_key();
        let id = self.fresh_id(|seq| format!("{key}-{seq}"));
        let node = DiagramNode::new(
            id.clone(),
            kind,
            position,
            NodeData {
                label: format!("{key} node"),
                notes: String::new(),
                color: DEFAULT_NODE_COLOR.to_string(),
            },
        );
        self.diagram.nodes.push(node);
        log::debug!("created node {id} at ({:.1}, {:.1})", position.0, position.1);
        id
    }

    /// Links `source` to `target` with a new edge.
    ///
    /// Parallel edges and self-loops are accepted; both endpoints must exist.
    pub fn on_connect(&mut self, source: &str, target: &str) -> Result<EdgeId, EditError> {
        for endpoint in [source, target] {
            if !self.diagram.contains_node(endpoint) {
                return Err(EditError::InvalidReference(endpoint.to_string()));
            }
        }
        let id = self.fresh_id(|seq| format!("e{source}-{target}-{seq}"));
        self.diagram.add_edge(Edge::new(id.clone(), source, target))?;
        log::debug!("connected {source} -> {target} as {id}");
        Ok(id)
    }

    /// Selects the clicked node, replacing any previous selection.
    pub fn on_node_click(&mut self, id: &str) -> Result<(), EditError> {
        if !self.diagram.contains_node(id) {
            return Err(EditError::InvalidReference(id.to_string()));
        }
        self.selection = Selection::Holding(id.to_string());
        Ok(())
    }

    /// Clears the selection.
    pub fn deselect(&mut self) {
        self.selection = Selection::Empty;
    }

    /// Merges `patch` into the node's data.
    pub fn update_node(&mut self, id: &str, patch: NodePatch) -> Result<(), EditError> {
        let node = self
            .diagram
            .node_mut(id)
            .ok_or_else(|| EditError::InvalidReference(id.to_string()))?;
        if patch.is_empty() {
            log::debug!("empty patch for node {id}");
            return Ok(());
        }
        patch.apply_to(&mut node.data);
        Ok(())
    }

    /// Moves a node to a new diagram position.
    pub fn move_node(&mut self, id: &str, position: (f32, f32)) -> Result<(), EditError> {
        let node = self
            .diagram
            .node_mut(id)
            .ok_or_else(|| EditError::InvalidReference(id.to_string()))?;
        node.position = position;
        Ok(())
    }

    /// Removes a node and, in the same step, every edge that references it.
    ///
    /// Clears the selection if it held the node.
    pub fn delete_node(&mut self, id: &str) -> Result<(), EditError> {
        let (node, edges) = self
            .diagram
            .remove_node(id)
            .ok_or_else(|| EditError::InvalidReference(id.to_string()))?;
        if self.selection.holds(id) {
            self.selection = Selection::Empty;
        }
        log::debug!("deleted node {} and {} edge(s)", node.id, edges.len());
        Ok(())
    }

    /// Deletes the selected node, if any. Returns the id that was removed.
    pub fn delete_selected(&mut self) -> Option<NodeId> {
        let id = self.selection.node_id()?.to_string();
        self.delete_node(&id).ok().map(|()| id)
    }

    /// Removes a single edge.
    pub fn delete_edge(&mut self, id: &str) -> Result<Edge, EditError> {
        let edge = self
            .diagram
            .remove_edge(id)
            .ok_or_else(|| EditError::InvalidReference(id.to_string()))?;
        log::debug!("deleted edge {id}");
        Ok(edge)
    }

    /// Re-points an existing edge at new endpoints, keeping its id.
    pub fn reconnect_edge(&mut self, id: &str, source: &str, target: &str) -> Result<(), EditError> {
        for endpoint in [source, target] {
            if !self.diagram.contains_node(endpoint) {
                return Err(EditError::InvalidReference(endpoint.to_string()));
            }
        }
        let edge = self
            .diagram
            .edges
            .iter_mut()
            .find(|edge| edge.id == id)
            .ok_or_else(|| EditError::InvalidReference(id.to_string()))?;
        edge.source = source.to_string();
        edge.target = target.to_string();
        Ok(())
    }

    /// Removes every node and edge and clears the selection.
    pub fn clear(&mut self) {
        self.diagram.clear();
        self.selection = Selection::Empty;
    }

    /// Produces an id not used by any live node or edge.
    fn fresh_id(&mut self, format_id: impl Fn(u64) -> String) -> String {
        loop {
            self.next_seq += 1;
            let candidate = format_id(self.next_seq);
            if !self.diagram.contains_node(&candidate) && !self.diagram.contains_edge(&candidate) {
                return candidate;
            }
        }
    }
}
