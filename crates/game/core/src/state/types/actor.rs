//! Combat participants and the capability contract the engine relies on.

use super::{EntityId, Position, ResourceMeter, StatusStacks};

/// Which side of the battle a combatant fights on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Player,
    Enemy,
}

/// Minimal contract any combat participant must satisfy.
///
/// The status engine only talks to combatants through this trait: raw health
/// changes, the stack map, and identity. Damage modifiers are applied by the
/// engine before `take_damage` is called.
pub trait Combatant {
    fn id(&self) -> EntityId;

    fn side(&self) -> Side;

    fn health(&self) -> u32;

    fn max_health(&self) -> u32;

    /// Screen anchor used when showing effect text for this combatant.
    fn anchor(&self) -> Position {
        Position::ORIGIN
    }

    /// Lowers health by `amount`, saturating at zero. Returns the amount lost.
    fn take_damage(&mut self, amount: u32) -> u32;

    /// Raises health by `amount`, clamped to max health. Returns the amount gained.
    fn heal(&mut self, amount: u32) -> u32;

    fn statuses(&self) -> &StatusStacks;

    fn statuses_mut(&mut self) -> &mut StatusStacks;

    fn is_player(&self) -> bool {
        self.side() == Side::Player
    }

    fn is_alive(&self) -> bool {
        self.health() > 0
    }
}

/// Health, stacks and identity of one combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: EntityId,
    pub side: Side,
    pub health: ResourceMeter,
    pub statuses: StatusStacks,
    pub anchor: Position,
}

impl ActorState {
    pub fn new(id: EntityId, side: Side, max_health: u32) -> Self {
        Self {
            id,
            side,
            health: ResourceMeter::full(max_health),
            statuses: StatusStacks::new(),
            anchor: Position::ORIGIN,
        }
    }

    /// Creates the player at full health.
    pub fn player(max_health: u32) -> Self {
        Self::new(EntityId::PLAYER, Side::Player, max_health)
    }

    /// Creates an enemy fighter at full health.
    pub fn enemy(id: EntityId, max_health: u32) -> Self {
        Self::new(id, Side::Enemy, max_health)
    }

    #[must_use]
    pub fn with_anchor(mut self, anchor: Position) -> Self {
        self.anchor = anchor;
        self
    }

    #[must_use]
    pub fn with_statuses(mut self, statuses: StatusStacks) -> Self {
        self.statuses = statuses;
        self
    }

    #[must_use]
    pub fn with_health(mut self, current: u32) -> Self {
        self.health.current = current.min(self.health.maximum);
        self
    }
}

impl Combatant for ActorState {
    fn id(&self) -> EntityId {
        self.id
    }

    fn side(&self) -> Side {
        self.side
    }

    fn health(&self) -> u32 {
        self.health.current
    }

    fn max_health(&self) -> u32 {
        self.health.maximum
    }

    fn anchor(&self) -> Position {
        self.anchor
    }

    fn take_damage(&mut self, amount: u32) -> u32 {
        self.health.drain(amount)
    }

    fn heal(&mut self, amount: u32) -> u32 {
        self.health.restore(amount)
    }

    fn statuses(&self) -> &StatusStacks {
        &self.statuses
    }

    fn statuses_mut(&mut self) -> &mut StatusStacks {
        &mut self.statuses
    }
}
