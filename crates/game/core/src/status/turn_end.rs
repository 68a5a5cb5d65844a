use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::state::{EntityId, StatusEffectType, StatusSnapshot};

use super::EffectOutcome;

/// One entity's pending turn end: the stacks it had when resolution began.
///
/// Dropping a batch without committing it cancels the turn end for that
/// entity. Effects already resolved stay applied; decay never happens.
#[derive(Debug)]
#[must_use = "a turn-end batch does nothing until it is committed"]
pub struct TurnEndBatch {
    entity: EntityId,
    snapshot: StatusSnapshot,
    cursor: usize,
    resolved: u32,
}

impl TurnEndBatch {
    pub(super) fn new(entity: EntityId, snapshot: StatusSnapshot) -> Self {
        Self {
            entity,
            snapshot,
            cursor: 0,
            resolved: 0,
        }
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// Stacks captured at the start of the turn end.
    pub fn snapshot(&self) -> &StatusSnapshot {
        &self.snapshot
    }

    /// Number of effects resolved so far.
    pub fn resolved(&self) -> u32 {
        self.resolved
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.snapshot.len()
    }

    pub(super) fn next_entry(&mut self) -> Option<(StatusEffectType, u32)> {
        let entry = self.snapshot.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(entry)
    }

    /// Records a resolved effect and returns its position in the sequence.
    pub(super) fn mark_resolved(&mut self) -> u32 {
        let priority = self.resolved;
        self.resolved += 1;
        priority
    }

    pub(super) fn finish(&mut self) {
        self.cursor = self.snapshot.len();
    }
}

/// One resolved turn-end effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnEndStep {
    pub entity: EntityId,
    pub kind: StatusEffectType,
    /// Stack count the effect resolved with (before decay).
    pub stacks: u32,
    pub outcome: EffectOutcome,
}

/// Summary of a committed turn end.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnEndReport {
    pub entity: EntityId,
    /// Number of effects that triggered.
    pub resolved: u32,
    /// Steps in resolution order. Only filled by
    /// [`super::StatusEngine::process_turn_end`].
    pub steps: Vec<TurnEndStep>,
    /// Kinds whose last stack decayed away.
    pub expired: ArrayVec<StatusEffectType, { GameConfig::MAX_STATUS_KINDS }>,
}

impl TurnEndReport {
    pub(super) fn new(entity: EntityId, resolved: u32) -> Self {
        Self {
            entity,
            resolved,
            steps: Vec::new(),
            expired: ArrayVec::new(),
        }
    }
}
