use crate::state::{ActorState, Combatant, EnemyRoster, EnemyState, EntityId, RosterError};

/// How a battle finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BattleOutcome {
    Victory,
    Defeat,
    /// Ended from outside (scene transition, retreat) with both sides alive.
    Abandoned,
}

/// Every participant of one battle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleState {
    pub player: ActorState,
    pub enemies: EnemyRoster,
}

impl BattleState {
    pub fn new(player: ActorState) -> Self {
        Self {
            player,
            enemies: EnemyRoster::new(),
        }
    }

    pub fn with_enemies(
        player: ActorState,
        enemies: impl IntoIterator<Item = EnemyState>,
    ) -> Result<Self, RosterError> {
        let mut battle = Self::new(player);
        for enemy in enemies {
            battle.enemies.insert(enemy)?;
        }
        Ok(battle)
    }

    pub fn combatant(&self, id: EntityId) -> Option<&dyn Combatant> {
        if self.player.id == id {
            return Some(&self.player);
        }
        self.enemies.get(id).map(|enemy| enemy as &dyn Combatant)
    }

    pub fn combatant_mut(&mut self, id: EntityId) -> Option<&mut dyn Combatant> {
        if self.player.id == id {
            return Some(&mut self.player);
        }
        self.enemies
            .get_mut(id)
            .map(|enemy| enemy as &mut dyn Combatant)
    }

    /// Turn-end resolution order: the player first, then enemies in roster order.
    pub fn participants(&self) -> Vec<EntityId> {
        std::iter::once(self.player.id)
            .chain(self.enemies.ids())
            .collect()
    }

    /// Returns the outcome once one side is gone, `None` while both fight.
    pub fn outcome(&self) -> Option<BattleOutcome> {
        if !self.player.is_alive() {
            return Some(BattleOutcome::Defeat);
        }
        if self.enemies.live_ids().is_empty() {
            return Some(BattleOutcome::Victory);
        }
        None
    }
}
