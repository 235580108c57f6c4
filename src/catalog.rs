//! Static lookup tables: per-kind styling, the component palette, and the
//! inspector's color swatches.
//!
//! Adding a component type is a data-only change here plus a `NodeKind` variant.

use crate::types::NodeKind;

/// Visual record for one node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeStyle {
    /// Glyph drawn next to the label
    pub icon: &'static str,
    /// Background color used when a node has no valid color of its own
    pub fill: &'static str,
    /// Label and icon color
    pub text: &'static str,
}

const NEUTRAL_FILL: &str = "#FFFFFF";
const NEUTRAL_TEXT: &str = "#202124";

impl NodeKind {
    /// Looks up the styling record for this kind.
    pub fn style(self) -> NodeStyle {
        let (icon, fill, text) = match self {
            NodeKind::Input => ("➡", "#E8F0FE", "#1A73E8"),
            NodeKind::Output => ("⬅", "#FCE8E6", "#D93025"),
            NodeKind::Database => ("🗄", "#E6F4EA", "#188038"),
            NodeKind::Api => ("🌐", "#FEF7E0", "#B06000"),
            NodeKind::Service => ("⚙", "#F3E8FD", "#9334E6"),
            NodeKind::Queue => ("📨", "#E8EAED", "#5F6368"),
            NodeKind::Cache => ("💾", "#F1F3F4", "#5F6368"),
            NodeKind::LoadBalancer => ("⚖", "#E8F0FE", "#1A73E8"),
            NodeKind::Cdn => ("🌍", "#FCE8E6", "#D93025"),
            NodeKind::MessageBroker => ("💬", "#E6F4EA", "#188038"),
            NodeKind::Client => ("💻", NEUTRAL_FILL, NEUTRAL_TEXT),
            NodeKind::Microservice => ("🔧", NEUTRAL_FILL, NEUTRAL_TEXT),
            NodeKind::Default => ("○", NEUTRAL_FILL, NEUTRAL_TEXT),
        };
        NodeStyle { icon, fill, text }
    }
}

/// One draggable entry in the component palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Kind of node created when the entry is dropped
    pub kind: NodeKind,
    /// Display name
    pub label: &'static str,
    /// Glyph shown next to the name
    pub icon: &'static str,
}

impl PaletteEntry {
    const fn new(kind: NodeKind, label: &'static str, icon: &'static str) -> Self {
        Self { kind, label, icon }
    }

    /// The payload placed in the drag-and-drop store when this entry is dragged.
    pub fn drag_payload(&self) -> ComponentDrag {
        ComponentDrag {
            type_key: self.kind.type_key(),
            effect: DropEffect::Move,
        }
    }
}

/// The component palette, in display order.
pub const PALETTE: [PaletteEntry; 13] = [
    PaletteEntry::new(NodeKind::Input, "Input", "➡"),
    PaletteEntry::new(NodeKind::Output, "Output", "⬅"),
    PaletteEntry::new(NodeKind::Default, "Default", "○"),
    PaletteEntry::new(NodeKind::Database, "Database", "🗄"),
    PaletteEntry::new(NodeKind::Api, "API", "🌐"),
    PaletteEntry::new(NodeKind::Service, "Service", "⚙"),
    PaletteEntry::new(NodeKind::Queue, "Queue", "📨"),
    PaletteEntry::new(NodeKind::Cache, "Cache", "💾"),
    PaletteEntry::new(NodeKind::LoadBalancer, "Load Balancer", "⚖"),
    PaletteEntry::new(NodeKind::Microservice, "Microservice", "🔧"),
    PaletteEntry::new(NodeKind::Client, "Client", "💻"),
    PaletteEntry::new(NodeKind::Cdn, "CDN", "🌍"),
    PaletteEntry::new(NodeKind::MessageBroker, "Message Broker", "💬"),
];

/// What the drop target is allowed to do with a dragged payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropEffect {
    /// The dragged item is moved onto the target
    Move,
}

/// Drag-and-drop payload emitted by the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentDrag {
    /// `NodeKind::type_key` of the dragged entry
    pub type_key: &'static str,
    /// Allowed drop effect
    pub effect: DropEffect,
}

/// A named swatch offered by the inspector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorOption {
    /// Display name, shown as the swatch tooltip
    pub name: &'static str,
    /// `#RRGGBB` value written into the node
    pub value: &'static str,
}

/// Inspector swatches.
pub const COLOR_OPTIONS: [ColorOption; 7] = [
    ColorOption { name: "White", value: "#FFFFFF" },
    ColorOption { name: "Blue", value: "#E8F0FE" },
    ColorOption { name: "Red", value: "#FCE8E6" },
    ColorOption { name: "Green", value: "#E6F4EA" },
    ColorOption { name: "Yellow", value: "#FEF7E0" },
    ColorOption { name: "Purple", value: "#F3E8FD" },
    ColorOption { name: "Gray", value: "#F1F3F4" },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn palette_covers_every_kind_once() {
        let kinds: HashSet<NodeKind> = PALETTE.iter().map(|e| e.kind).collect();
        assert_eq!(kinds.len(), PALETTE.len());
        assert_eq!(kinds.len(), NodeKind::ALL.len());
    }

    #[test]
    fn palette_icons_match_node_styles() {
        for entry in PALETTE {
            assert_eq!(entry.icon, entry.kind.style().icon, "{:?}", entry.kind);
        }
    }

    #[test]
    fn drag_payload_carries_type_key_with_move_effect() {
        let entry = PALETTE
            .iter()
            .find(|e| e.kind == NodeKind::LoadBalancer)
            .unwrap();

        let payload = entry.drag_payload();

        assert_eq!(payload.type_key, "loadBalancer");
        assert_eq!(payload.effect, DropEffect::Move);
    }

    #[test]
    fn style_table_matches_known_colors() {
        assert_eq!(NodeKind::Database.style().fill, "#E6F4EA");
        assert_eq!(NodeKind::Database.style().text, "#188038");
        assert_eq!(NodeKind::Api.style().text, "#B06000");
        assert_eq!(NodeKind::Default.style().fill, "#FFFFFF");
        let (client, microservice) = (NodeKind::Client.style(), NodeKind::Microservice.style());
        assert_eq!(client.icon, "💻");
        assert_eq!((client.fill, client.text), (microservice.fill, microservice.text));
    }

    #[test]
    fn styles_parse_as_hex_colors() {
        for kind in NodeKind::ALL {
            let style = kind.style();
            for hex in [style.fill, style.text] {
                assert!(egui::Color32::from_hex(hex).is_ok(), "{kind:?}: {hex}");
            }
        }
        for option in COLOR_OPTIONS {
            assert!(egui::Color32::from_hex(option.value).is_ok(), "{}", option.name);
        }
    }
}
