//! Error type shared by the diagram model and the canvas controller.
//!
//! Every variant describes a gesture that had no effect. The UI absorbs these
//! as no-ops and only logs them.

use std::fmt;

/// Reasons an editing operation left the diagram untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// The operation referenced a node or edge id that is not in the diagram.
    InvalidReference(String),
    /// A drop carried no payload, or a type key outside the node catalogue.
    MissingPayload,
    /// A drop arrived before the canvas could convert screen coordinates.
    SurfaceNotReady,
    /// A node or edge with this id already exists.
    DuplicateId(String),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::InvalidReference(id) => write!(f, "no node or edge with id `{id}`"),
            EditError::MissingPayload => f.write_str("drop carried no recognised component type"),
            EditError::SurfaceNotReady => f.write_str("canvas is not initialised yet"),
            EditError::DuplicateId(id) => write!(f, "id `{id}` is already in use"),
        }
    }
}

impl std::error::Error for EditError {}
