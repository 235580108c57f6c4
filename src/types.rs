//! Core data types for system-design diagrams.
//!
//! This module defines the node and edge records, the partial update applied by
//! the inspector, and the `Diagram` collection that owns both. Nodes are plain
//! data: nothing here holds a callback or a pointer back to the controller.

use crate::error::EditError;
use serde::{Deserialize, Serialize};

/// Identifier of a diagram node, e.g. `"database-3"` or `"1"`.
pub type NodeId = String;

/// Identifier of a diagram edge, e.g. `"e1-2"` or `"e1-2-5"`.
pub type EdgeId = String;

/// The closed set of component types a node can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    /// A persistent data store
    Database,
    /// A long-running backend service
    Service,
    /// A public or internal API surface
    Api,
    /// A message queue
    Queue,
    /// An in-memory cache
    Cache,
    /// A load balancer in front of other components
    LoadBalancer,
    /// A client application or browser
    Client,
    /// A small independently deployed service
    Microservice,
    /// An entry point into the system
    Input,
    /// An exit point out of the system
    Output,
    /// A generic component
    Default,
    /// A content delivery network
    Cdn,
    /// A publish/subscribe message broker
    MessageBroker,
}

impl NodeKind {
    /// Every kind, in declaration order.
    pub const ALL: [NodeKind; 13] = [
        NodeKind::Database,
        NodeKind::Service,
        NodeKind::Api,
        NodeKind::Queue,
        NodeKind::Cache,
        NodeKind::LoadBalancer,
        NodeKind::Client,
        NodeKind::Microservice,
        NodeKind::Input,
        NodeKind::Output,
        NodeKind::Default,
        NodeKind::Cdn,
        NodeKind::MessageBroker,
    ];

    /// The type key carried in drag payloads and used as the node id prefix.
    pub fn type_key(self) -> &'static str {
        match self {
            NodeKind::Database => "database",
            NodeKind::Service => "service",
            NodeKind::Api => "api",
            NodeKind::Queue => "queue",
            NodeKind::Cache => "cache",
            NodeKind::LoadBalancer => "loadBalancer",
            NodeKind::Client => "client",
            NodeKind::Microservice => "microservice",
            NodeKind::Input => "input",
            NodeKind::Output => "output",
            NodeKind::Default => "default",
            NodeKind::Cdn => "cdn",
            NodeKind::MessageBroker => "messageBroker",
        }
    }

    /// Parses a type key. Returns `None` for anything outside the catalogue.
    pub fn from_type_key(key: &str) -> Option<NodeKind> {
        NodeKind::ALL.into_iter().find(|kind| kind.type_key() == key)
    }
}

/// The editable fields of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// Text shown on the node
    pub label: String,
    /// Free-form notes, only visible in the inspector
    pub notes: String,
    /// Fill color as a `#RRGGBB` hex string
    pub color: String,
}

/// A single component placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramNode {
    /// Unique identifier within the diagram
    pub id: NodeId,
    /// Component type, used for styling
    pub kind: NodeKind,
    /// Centre of the node in diagram coordinates
    pub position: (f32, f32),
    /// User-editable fields
    pub data: NodeData,
}

impl DiagramNode {
    /// Creates a node with the given identity and fields.
    pub fn new(
        id: impl Into<NodeId>,
        kind: NodeKind,
        position: (f32, f32),
        data: NodeData,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            data,
        }
    }
}

/// A directed link between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier within the diagram
    pub id: EdgeId,
    /// ID of the node the edge starts at
    pub source: NodeId,
    /// ID of the node the edge points to
    pub target: NodeId,
}

impl Edge {
    /// Creates an edge between two node ids.
    pub fn new(id: impl Into<EdgeId>, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }

    /// Returns true if either endpoint is `node_id`.
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// A partial update of a node's data. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    /// New label, if changing
    pub label: Option<String>,
    /// New notes, if changing
    pub notes: Option<String>,
    /// New fill color, if changing
    pub color: Option<String>,
}

impl NodePatch {
    /// A patch that only replaces the label.
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    /// A patch that only replaces the notes.
    pub fn notes(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(notes.into()),
            ..Self::default()
        }
    }

    /// A patch that only replaces the color.
    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }

    /// Returns true if the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.notes.is_none() && self.color.is_none()
    }

    /// Merges the patch into `data`.
    pub fn apply_to(&self, data: &mut NodeData) {
        if let Some(label) = &self.label {
            data.label.clone_from(label);
        }
        if let Some(notes) = &self.notes {
            data.notes.clone_from(notes);
        }
        if let Some(color) = &self.color {
            data.color.clone_from(color);
        }
    }
}

/// The node and edge collections of one editing session.
///
/// Both collections keep insertion order, which is also the drawing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    /// All nodes, in insertion order
    pub nodes: Vec<DiagramNode>,
    /// All edges, in insertion order
    pub edges: Vec<Edge>,
}

impl Diagram {
    /// Creates an empty diagram.
    pub fn new() -> Self {
        Self::default()
    }

    /// The starter diagram shown when a session begins: input → default → output.
    pub fn seeded() -> Self {
        let seed = |id: &str, kind: NodeKind, label: &str, position: (f32, f32)| {
            DiagramNode::new(
                id,
                kind,
                position,
                NodeData {
                    label: label.to_string(),
                    notes: String::new(),
                    color: kind.style().fill.to_string(),
                },
            )
        };
        Self {
            nodes: vec![
                seed("1", NodeKind::Input, "Input Node", (250.0, 25.0)),
                seed("2", NodeKind::Default, "Default Node", (100.0, 125.0)),
                seed("3", NodeKind::Output, "Output Node", (250.0, 250.0)),
            ],
            edges: vec![Edge::new("e1-2", "1", "2"), Edge::new("e2-3", "2", "3")],
        }
    }

    /// Looks up a node by id.
    pub fn node(&self, id: &str) -> Option<&DiagramNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Looks up a node by id for mutation.
    pub fn node_mut(&mut self, id: &str) -> Option<&mut DiagramNode> {
        self.nodes.iter_mut().find(|node| node.id == id)
    }

    /// Returns true if a node with this id exists.
    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// Looks up an edge by id.
    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.id == id)
    }

    /// Returns true if an edge with this id exists.
    pub fn contains_edge(&self, id: &str) -> bool {
        self.edge(id).is_some()
    }

    /// Appends a node.
    ///
    /// Fails with [`EditError::DuplicateId`] if the id is already taken.
    pub fn add_node(&mut self, node: DiagramNode) -> Result<(), EditError> {
        if self.contains_node(&node.id) {
            return Err(EditError::DuplicateId(node.id));
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Appends an edge between two existing nodes.
    ///
    /// Parallel edges and self-loops are accepted. Fails if the edge id is taken
    /// or either endpoint is missing.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), EditError> {
        if self.contains_edge(&edge.id) {
            return Err(EditError::DuplicateId(edge.id));
        }
        for endpoint in [&edge.source, &edge.target] {
            if !self.contains_node(endpoint) {
                return Err(EditError::InvalidReference(endpoint.clone()));
            }
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Removes a node together with every edge that references it.
    ///
    /// Returns the removed node and its edges, or `None` if the node didn't exist.
    pub fn remove_node(&mut self, id: &str) -> Option<(DiagramNode, Vec<Edge>)> {
        let index = self.nodes.iter().position(|node| node.id == id)?;
        let node = self.nodes.remove(index);
        let (removed, kept): (Vec<Edge>, Vec<Edge>) =
            self.edges.drain(..).partition(|edge| edge.touches(id));
        self.edges = kept;
        Some((node, removed))
    }

    /// Removes a single edge.
    pub fn remove_edge(&mut self, id: &str) -> Option<Edge> {
        let index = self.edges.iter().position(|edge| edge.id == id)?;
        Some(self.edges.remove(index))
    }

    /// Removes all nodes and edges.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> DiagramNode {
        DiagramNode::new(
            id,
            NodeKind::Service,
            (0.0, 0.0),
            NodeData {
                label: format!("{id} label"),
                notes: String::new(),
                color: "#FFFFFF".into(),
            },
        )
    }

    fn diagram_with(ids: &[&str]) -> Diagram {
        let mut diagram = Diagram::new();
        for id in ids {
            diagram.add_node(node(id)).unwrap();
        }
        diagram
    }

    #[test]
    fn type_keys_parse_back_to_their_kind() {
        for kind in NodeKind::ALL {
            assert_eq!(NodeKind::from_type_key(kind.type_key()), Some(kind));
        }
        assert_eq!(NodeKind::from_type_key("mainframe"), None);
        assert_eq!(NodeKind::from_type_key(""), None);
    }

    #[test]
    fn serde_names_match_type_keys() {
        for kind in NodeKind::ALL {
            let value = serde_json::to_value(kind).unwrap();
            assert_eq!(value, serde_json::Value::String(kind.type_key().into()));
        }
    }

    #[test]
    fn seeded_diagram_links_input_to_output() {
        let diagram = Diagram::seeded();

        assert_eq!(diagram.nodes.len(), 3);
        assert_eq!(diagram.node("1").unwrap().kind, NodeKind::Input);
        assert_eq!(diagram.node("2").unwrap().data.label, "Default Node");
        assert_eq!(diagram.node("3").unwrap().position, (250.0, 250.0));
        assert_eq!(diagram.node("1").unwrap().data.color, "#E8F0FE");

        let links: Vec<(&str, &str)> = diagram
            .edges
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect();
        assert_eq!(links, vec![("1", "2"), ("2", "3")]);
    }

    #[test]
    fn add_node_rejects_duplicate_id() {
        let mut diagram = diagram_with(&["a"]);

        let result = diagram.add_node(node("a"));

        assert_eq!(result, Err(EditError::DuplicateId("a".into())));
        assert_eq!(diagram.nodes.len(), 1);
    }

    #[test]
    fn add_edge_requires_both_endpoints() {
        let mut diagram = diagram_with(&["a"]);

        assert_eq!(
            diagram.add_edge(Edge::new("e1", "a", "ghost")),
            Err(EditError::InvalidReference("ghost".into()))
        );
        assert_eq!(
            diagram.add_edge(Edge::new("e2", "ghost", "a")),
            Err(EditError::InvalidReference("ghost".into()))
        );
        assert!(diagram.edges.is_empty());
    }

    #[test]
    fn add_edge_allows_parallel_edges_and_self_loops() {
        let mut diagram = diagram_with(&["a", "b"]);

        diagram.add_edge(Edge::new("e1", "a", "b")).unwrap();
        diagram.add_edge(Edge::new("e2", "a", "b")).unwrap();
        diagram.add_edge(Edge::new("e3", "a", "a")).unwrap();

        assert_eq!(diagram.edges.len(), 3);
        assert_eq!(
            diagram.add_edge(Edge::new("e1", "b", "a")),
            Err(EditError::DuplicateId("e1".into()))
        );
    }

    #[test]
    fn remove_node_cascades_to_touching_edges_only() {
        let mut diagram = diagram_with(&["a", "b", "c"]);
        diagram.add_edge(Edge::new("ab", "a", "b")).unwrap();
        diagram.add_edge(Edge::new("bc", "b", "c")).unwrap();
        diagram.add_edge(Edge::new("ac", "a", "c")).unwrap();
        diagram.add_edge(Edge::new("bb", "b", "b")).unwrap();

        let (removed, edges) = diagram.remove_node("b").unwrap();

        assert_eq!(removed.id, "b");
        let mut removed_ids: Vec<&str> = edges.iter().map(|e| e.id.as_str()).collect();
        removed_ids.sort();
        assert_eq!(removed_ids, vec!["ab", "bb", "bc"]);
        assert_eq!(diagram.edges, vec![Edge::new("ac", "a", "c")]);
        assert!(!diagram.contains_node("b"));
    }

    #[test]
    fn remove_missing_node_changes_nothing() {
        let mut diagram = Diagram::seeded();
        let before = diagram.clone();

        assert!(diagram.remove_node("404").is_none());
        assert_eq!(diagram, before);
    }

    #[test]
    fn remove_edge_leaves_nodes() {
        let mut diagram = Diagram::seeded();

        let removed = diagram.remove_edge("e1-2").unwrap();

        assert_eq!(removed.source, "1");
        assert_eq!(diagram.edges.len(), 1);
        assert_eq!(diagram.nodes.len(), 3);
        assert!(diagram.remove_edge("e1-2").is_none());
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let mut data = node("a").data;
        let before = data.clone();

        let patch = NodePatch::default();
        assert!(patch.is_empty());
        patch.apply_to(&mut data);

        assert_eq!(data, before);
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let mut data = node("a").data;

        NodePatch {
            notes: Some("talks to redis".into()),
            color: Some("#FEF7E0".into()),
            ..NodePatch::default()
        }
        .apply_to(&mut data);

        assert_eq!(data.label, "a label");
        assert_eq!(data.notes, "talks to redis");
        assert_eq!(data.color, "#FEF7E0");
    }

    #[test]
    fn clear_empties_both_collections() {
        let mut diagram = Diagram::seeded();
        diagram.clear();
        assert!(diagram.nodes.is_empty());
        assert!(diagram.edges.is_empty());
    }
}
