use std::fmt;

use crate::env::StageKind;
use crate::state::Position;

/// Identity of a map node. Connections refer to nodes by id, so replacing a
/// node means handing out a new id and rewriting every reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Opaque handle to a visual owned by the map renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderHandle(pub u64);

/// One stage on the map grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageNode {
    pub id: NodeId,
    pub kind: StageKind,
    /// `x` is the column, `y` the row.
    pub position: Position,
    /// Outgoing edges, in insertion order, without duplicates.
    pub connections: Vec<NodeId>,
    pub render: Option<RenderHandle>,
}

impl StageNode {
    pub fn new(id: NodeId, kind: StageKind, position: Position) -> Self {
        Self {
            id,
            kind,
            position,
            connections: Vec::new(),
            render: None,
        }
    }

    /// Adds an edge. Returns false if it already existed.
    pub fn connect(&mut self, to: NodeId) -> bool {
        if self.connections.contains(&to) {
            return false;
        }
        self.connections.push(to);
        true
    }

    pub fn is_connected_to(&self, to: NodeId) -> bool {
        self.connections.contains(&to)
    }
}
