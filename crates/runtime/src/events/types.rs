//! Event payloads published by the turn coordinator.

use merge_core::{AttackType, BattleOutcome, DamageResult, EntityId, Reward, StatusEffectType};
use serde::{Deserialize, Serialize};

/// Everything observable that happens during one battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// A turn-end effect resolved on `entity`.
    StatusTriggered {
        entity: EntityId,
        kind: StatusEffectType,
        stacks: u32,
    },

    /// Damage landed, from an attack or from a status effect.
    DamageDealt {
        /// `None` for status damage.
        source: Option<EntityId>,
        attack_type: AttackType,
        result: DamageResult,
    },

    /// A scheduled enemy attack did not happen because of Freeze.
    AttackSkipped { entity: EntityId },

    /// An enemy reached zero health and left the roster.
    EnemyDefeated { entity: EntityId, reward: Reward },

    /// Every participant finished its turn end.
    TurnEndCompleted {
        cycle: u32,
        /// Effects resolved across all participants.
        resolved: u32,
    },

    BattleEnded { outcome: BattleOutcome },
}
