//! Branching stage map.
//!
//! A grid of [`StageNode`]s threaded with random start-to-boss paths and
//! pruned to what the start node can reach. Renderers attach visuals through
//! [`RenderHandle`]s and get them back through
//! [`crate::env::MapRenderer::release`] when a node is pruned.
mod draw;
mod graph;
mod node;

pub use draw::choose_stage;
pub use graph::StageMap;
pub use node::{NodeId, RenderHandle, StageNode};
