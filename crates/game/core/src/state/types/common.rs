use std::fmt;

/// Unique identifier for a combat participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the player. There is exactly one per run.
    pub const PLAYER: Self = Self(0);

    /// First identifier handed out to enemies.
    pub const FIRST_ENEMY: Self = Self(1);

    /// Returns true if this entity represents the player.
    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::PLAYER
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete 2D position.
///
/// Used both for map grid cells (`x` = column, `y` = row) and for the screen
/// anchor that effect text is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// Integer resource meter (health) tracked per combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub const fn new(current: u32, maximum: u32) -> Self {
        Self { current, maximum }
    }

    /// A meter filled to its maximum.
    pub const fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    /// Lowers the meter, saturating at zero. Returns the amount removed.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.current);
        self.current -= removed;
        removed
    }

    /// Raises the meter, clamped to the maximum. Returns the amount added.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let added = amount.min(self.maximum.saturating_sub(self.current));
        self.current += added;
        added
    }

    pub const fn is_empty(&self) -> bool {
        self.current == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meter_drain_saturates_at_zero() {
        let mut hp = ResourceMeter::full(10);
        assert_eq!(hp.drain(4), 4);
        assert_eq!(hp.drain(20), 6);
        assert!(hp.is_empty());
    }

    #[test]
    fn meter_restore_clamps_to_maximum() {
        let mut hp = ResourceMeter::new(7, 10);
        assert_eq!(hp.restore(5), 3);
        assert_eq!(hp.current, 10);
        assert_eq!(hp.restore(1), 0);
    }
}
