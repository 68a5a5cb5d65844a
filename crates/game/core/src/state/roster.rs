//! Ordered container of live enemies.
//!
//! The roster is the shared resource mutated by the death path while turn-end
//! resolution and attack loops walk it. Callers iterate an id snapshot from
//! [`EnemyRoster::ids`] and look each enemy up again, skipping ids that were
//! removed in the meantime.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Combatant, EnemyAttack, EnemyState, EntityId, Reward};

/// Enemy ids copied out of the roster before iterating.
pub type RosterSnapshot = ArrayVec<EntityId, { GameConfig::MAX_ENEMIES }>;

/// Errors raised while populating a roster.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("enemy roster is full ({capacity} enemies)")]
    Full { capacity: usize },

    #[error("enemy {0} is already in the roster")]
    DuplicateId(EntityId),

    #[error("{0} is reserved for the player")]
    ReservedId(EntityId),
}

impl GameError for RosterError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Full { .. } => "ROSTER_FULL",
            Self::DuplicateId(_) => "ROSTER_DUPLICATE_ID",
            Self::ReservedId(_) => "ROSTER_RESERVED_ID",
        }
    }
}

/// An enemy removed by [`EnemyRoster::reap_defeated`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefeatedEnemy {
    pub id: EntityId,
    pub reward: Reward,
}

/// Live enemies in battle order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnemyRoster {
    enemies: ArrayVec<EnemyState, { GameConfig::MAX_ENEMIES }>,
    next_id: u32,
}

impl EnemyRoster {
    pub fn new() -> Self {
        Self {
            enemies: ArrayVec::new(),
            next_id: EntityId::FIRST_ENEMY.0,
        }
    }

    /// Creates an enemy with a fresh id and appends it.
    pub fn spawn(&mut self, max_health: u32, attack: EnemyAttack) -> Result<EntityId, RosterError> {
        let id = self.allocate_id();
        self.insert(EnemyState::new(id, max_health, attack))?;
        Ok(id)
    }

    /// Appends an existing enemy, keeping its id.
    pub fn insert(&mut self, enemy: EnemyState) -> Result<(), RosterError> {
        let id = enemy.id();
        if id.is_player() {
            return Err(RosterError::ReservedId(id));
        }
        if self.contains(id) {
            return Err(RosterError::DuplicateId(id));
        }
        if self.enemies.is_full() {
            return Err(RosterError::Full {
                capacity: GameConfig::MAX_ENEMIES,
            });
        }
        self.next_id = self.next_id.max(id.0.saturating_add(1));
        self.enemies.push(enemy);
        Ok(())
    }

    pub fn get(&self, id: EntityId) -> Option<&EnemyState> {
        self.enemies.iter().find(|enemy| enemy.id() == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut EnemyState> {
        self.enemies.iter_mut().find(|enemy| enemy.id() == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnemyState> {
        self.enemies.iter()
    }

    /// Ids in battle order, copied so the roster can change during the walk.
    pub fn ids(&self) -> RosterSnapshot {
        self.enemies.iter().map(|enemy| enemy.id()).collect()
    }

    /// Ids of enemies that still have health.
    pub fn live_ids(&self) -> RosterSnapshot {
        self.enemies
            .iter()
            .filter(|enemy| enemy.is_alive())
            .map(|enemy| enemy.id())
            .collect()
    }

    pub fn remove(&mut self, id: EntityId) -> Option<EnemyState> {
        let index = self.enemies.iter().position(|enemy| enemy.id() == id)?;
        Some(self.enemies.remove(index))
    }

    /// Removes every enemy at zero health and returns their bounties in
    /// battle order.
    pub fn reap_defeated(&mut self) -> Vec<DefeatedEnemy> {
        let mut defeated = Vec::new();
        self.enemies.retain(|enemy| {
            if enemy.is_alive() {
                return true;
            }
            defeated.push(DefeatedEnemy {
                id: enemy.id(),
                reward: enemy.reward,
            });
            false
        });
        defeated
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id.max(EntityId::FIRST_ENEMY.0));
        self.next_id = id.0.saturating_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attack() -> EnemyAttack {
        EnemyAttack::new(2, 1_000)
    }

    #[test]
    fn spawn_allocates_sequential_ids() {
        let mut roster = EnemyRoster::new();
        let a = roster.spawn(10, attack()).unwrap();
        let b = roster.spawn(10, attack()).unwrap();
        assert_eq!(a, EntityId(1));
        assert_eq!(b, EntityId(2));
        assert_eq!(roster.ids().as_slice(), &[a, b]);
    }

    #[test]
    fn insert_rejects_duplicates_and_player_id() {
        let mut roster = EnemyRoster::new();
        roster
            .insert(EnemyState::new(EntityId(4), 10, attack()))
            .unwrap();
        assert_eq!(
            roster.insert(EnemyState::new(EntityId(4), 10, attack())),
            Err(RosterError::DuplicateId(EntityId(4)))
        );
        assert_eq!(
            roster.insert(EnemyState::new(EntityId::PLAYER, 10, attack())),
            Err(RosterError::ReservedId(EntityId::PLAYER))
        );
        assert_eq!(roster.spawn(10, attack()).unwrap(), EntityId(5));
    }

    #[test]
    fn roster_capacity_is_bounded() {
        let mut roster = EnemyRoster::new();
        for _ in 0..GameConfig::MAX_ENEMIES {
            roster.spawn(1, attack()).unwrap();
        }
        let err = roster.spawn(1, attack()).unwrap_err();
        assert_eq!(err.error_code(), "ROSTER_FULL");
    }

    #[test]
    fn reap_removes_only_dead_enemies() {
        let mut roster = EnemyRoster::new();
        let a = roster.spawn(5, attack()).unwrap();
        let b = roster.spawn(5, attack()).unwrap();
        roster.get_mut(a).unwrap().reward = Reward::new(4, 8);
        roster.get_mut(a).unwrap().take_damage(5);

        let defeated = roster.reap_defeated();
        assert_eq!(
            defeated,
            vec![DefeatedEnemy {
                id: a,
                reward: Reward::new(4, 8)
            }]
        );
        assert_eq!(roster.ids().as_slice(), &[b]);
    }

    #[test]
    fn snapshot_survives_removal() {
        let mut roster = EnemyRoster::new();
        let a = roster.spawn(5, attack()).unwrap();
        let b = roster.spawn(5, attack()).unwrap();
        let snapshot = roster.ids();
        roster.remove(a);
        let seen: Vec<_> = snapshot.iter().filter(|id| roster.contains(**id)).collect();
        assert_eq!(seen, vec![&b]);
    }
}
