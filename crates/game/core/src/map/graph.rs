use std::collections::{BTreeSet, VecDeque};

use crate::config::MapConfig;
use crate::env::{MapRenderer, RandomSource, StageData, StageKind};
use crate::state::Position;

use super::{NodeId, RenderHandle, StageNode, choose_stage};

/// Grid of stage nodes, `columns[column][row]`.
///
/// Column 0 holds the start node in its middle row, the last column the boss
/// node in its middle row. After [`StageMap::generate`] every remaining node
/// is reachable from the start node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageMap {
    columns: Vec<Vec<Option<StageNode>>>,
    width: u32,
    height: u32,
    start: Option<Position>,
    boss: Option<Position>,
    next_id: u32,
}

impl StageMap {
    /// Builds the grid, threads `path_count` paths and prunes what no path
    /// reached.
    ///
    /// Draw order: grid cells column by column, then path passes in order,
    /// then steps within a pass.
    pub fn generate(config: &MapConfig, stages: &[StageData], rng: &mut dyn RandomSource) -> Self {
        let mut map = Self::grid(config, stages, rng);
        map.draw_paths(config.path_count, rng);
        map.prune(None);
        tracing::debug!(
            target: "core::map",
            width = map.width,
            height = map.height,
            nodes = map.len(),
            "map generated"
        );
        map
    }

    /// Fills a full `width x height` grid without connections.
    ///
    /// Grids narrower than two columns or without rows get no start or boss
    /// node; path drawing and pruning are no-ops on them.
    pub fn grid(config: &MapConfig, stages: &[StageData], rng: &mut dyn RandomSource) -> Self {
        let width = config.width;
        let height = config.height;
        let middle = (height / 2) as i32;
        let playable = width >= 2 && height >= 1;
        let start = playable.then(|| Position::new(0, middle));
        let boss = playable.then(|| Position::new(width as i32 - 1, middle));

        let mut map = Self {
            columns: Vec::with_capacity(width as usize),
            width,
            height,
            start,
            boss,
            next_id: 0,
        };

        for column in 0..width as i32 {
            let mut cells = Vec::with_capacity(height as usize);
            for row in 0..height as i32 {
                let position = Position::new(column, row);
                let kind = if Some(position) == start {
                    config.start_kind
                } else if Some(position) == boss {
                    StageKind::Boss
                } else {
                    choose_stage(stages, rng)
                };
                let id = map.allocate_id();
                cells.push(Some(StageNode::new(id, kind, position)));
            }
            map.columns.push(cells);
        }
        map
    }

    /// Walks `path_count` paths from the start node to the boss column.
    ///
    /// Column 1 is reached from any row, the last column always lands on the
    /// boss row, every other step moves at most one row.
    pub fn draw_paths(&mut self, path_count: u32, rng: &mut dyn RandomSource) {
        let (Some(start), Some(boss)) = (self.start, self.boss) else {
            return;
        };
        let last_column = boss.x;
        let max_row = self.height as i32 - 1;

        for _ in 0..path_count {
            let mut current = start;
            for column in 1..=last_column {
                let row = if column == last_column {
                    boss.y
                } else if column == 1 {
                    rng.range_i32(0, self.height as i32)
                } else {
                    (current.y + rng.range_i32(-1, 2)).clamp(0, max_row)
                };
                let next = Position::new(column, row);
                self.connect(current, next);
                current = next;
            }
        }
    }

    /// Removes every node the start node cannot reach, releasing their
    /// render handles, and drops edges into removed nodes. Returns the ids
    /// of the removed nodes.
    pub fn prune(&mut self, renderer: Option<&dyn MapRenderer>) -> Vec<NodeId> {
        if self.start_node().is_none() {
            return Vec::new();
        }
        let reachable = self.reachable_from_start();

        let mut pruned = Vec::new();
        for cell in self.columns.iter_mut().flatten() {
            let Some(node) = cell.as_ref() else {
                continue;
            };
            if reachable.contains(&node.id) {
                continue;
            }
            let Some(mut node) = cell.take() else {
                continue;
            };
            node.connections.clear();
            if let Some(handle) = node.render.take() {
                match renderer {
                    Some(renderer) => renderer.release(handle),
                    None => tracing::debug!(target: "core::map", ?handle, "no renderer; handle dropped"),
                }
            }
            pruned.push(node.id);
        }

        for node in self.nodes_mut() {
            node.connections.retain(|to| reachable.contains(to));
        }
        if !pruned.is_empty() {
            tracing::debug!(target: "core::map", pruned = pruned.len(), "unreachable nodes pruned");
        }
        pruned
    }

    /// Ids reachable from the start node, start included (breadth-first).
    pub fn reachable_from_start(&self) -> BTreeSet<NodeId> {
        let mut visited = BTreeSet::new();
        let Some(start) = self.start_node() else {
            return visited;
        };

        let mut queue = VecDeque::from([start.id]);
        visited.insert(start.id);
        while let Some(id) = queue.pop_front() {
            let Some(node) = self.node(id) else {
                continue;
            };
            for &next in &node.connections {
                if self.node(next).is_some() && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        visited
    }

    /// Replaces the start node with a new node of `kind`.
    ///
    /// The new node takes the old one's position, edges and render handle
    /// under a fresh id; every edge into the old node is redirected. Returns
    /// the new id, or `None` when the map has no start node.
    pub fn set_start_stage_type(&mut self, kind: StageKind) -> Option<NodeId> {
        let start = self.start?;
        let old = self.cell_mut(start)?.take()?;
        let new_id = self.allocate_id();

        let mut replacement = StageNode::new(new_id, kind, start);
        replacement.connections = old.connections;
        replacement.render = old.render;

        for node in self.nodes_mut() {
            for to in node.connections.iter_mut() {
                if *to == old.id {
                    *to = new_id;
                }
            }
        }
        if let Some(cell) = self.cell_mut(start) {
            *cell = Some(replacement);
        }
        tracing::debug!(target: "core::map", old = %old.id, new = %new_id, %kind, "start node replaced");
        Some(new_id)
    }

    /// Rewrites the kind of the node at `position`, keeping its identity.
    /// Returns the previous kind.
    pub fn set_node_kind(&mut self, position: Position, kind: StageKind) -> Option<StageKind> {
        let node = self.cell_mut(position)?.as_mut()?;
        Some(std::mem::replace(&mut node.kind, kind))
    }

    /// Attaches a renderer visual to the node at `position`. Returns the
    /// handle it replaced.
    pub fn attach_render_handle(
        &mut self,
        position: Position,
        handle: RenderHandle,
    ) -> Option<RenderHandle> {
        let node = self.cell_mut(position)?.as_mut()?;
        node.render.replace(handle)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn start_node(&self) -> Option<&StageNode> {
        self.node_at(self.start?)
    }

    pub fn boss_node(&self) -> Option<&StageNode> {
        self.node_at(self.boss?)
    }

    pub fn node_at(&self, position: Position) -> Option<&StageNode> {
        let column = usize::try_from(position.x).ok()?;
        let row = usize::try_from(position.y).ok()?;
        self.columns.get(column)?.get(row)?.as_ref()
    }

    pub fn node(&self, id: NodeId) -> Option<&StageNode> {
        self.nodes().find(|node| node.id == id)
    }

    /// Remaining nodes, column by column.
    pub fn nodes(&self) -> impl Iterator<Item = &StageNode> {
        self.columns.iter().flatten().flatten()
    }

    /// Remaining nodes of one column.
    pub fn column(&self, column: u32) -> impl Iterator<Item = &StageNode> {
        self.columns
            .get(column as usize)
            .into_iter()
            .flatten()
            .flatten()
    }

    pub fn len(&self) -> usize {
        self.nodes().count()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes().next().is_none()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn allocate_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn cell_mut(&mut self, position: Position) -> Option<&mut Option<StageNode>> {
        let column = usize::try_from(position.x).ok()?;
        let row = usize::try_from(position.y).ok()?;
        self.columns.get_mut(column)?.get_mut(row)
    }

    fn nodes_mut(&mut self) -> impl Iterator<Item = &mut StageNode> {
        self.columns.iter_mut().flatten().flatten()
    }

    fn connect(&mut self, from: Position, to: Position) {
        let Some(to_id) = self.node_at(to).map(|node| node.id) else {
            return;
        };
        if let Some(Some(node)) = self.cell_mut(from) {
            node.connect(to_id);
        }
    }
}
