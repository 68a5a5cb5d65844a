use crate::env::StageKind;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Base pause between two turn-end effects of the same entity, in milliseconds.
    pub turn_end_effect_delay_ms: u64,

    /// Global time-scale factor applied to every presentation delay.
    /// `0.0` resolves turn ends without pausing.
    pub time_scale: f32,

    /// Period between two turn-end ticks while a battle is running.
    pub turn_end_interval_ms: u64,

    /// Freeze chance contributed by each Freeze stack.
    pub freeze_chance_per_stack: f32,

    /// Upper bound of the freeze chance. Freeze never skips every action.
    pub freeze_chance_cap: f32,

    /// Multiplicative attack bonus contributed by each Rage stack.
    pub rage_bonus_per_stack: f64,

    /// Map generation parameters.
    pub map: MapConfig,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of enemies alive in one battle.
    pub const MAX_ENEMIES: usize = 8;
    /// Number of distinct status effect kinds.
    pub const MAX_STATUS_KINDS: usize = 11;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TURN_END_EFFECT_DELAY_MS: u64 = 500;
    pub const DEFAULT_TIME_SCALE: f32 = 1.0;
    pub const DEFAULT_TURN_END_INTERVAL_MS: u64 = 4_000;
    pub const DEFAULT_FREEZE_CHANCE_PER_STACK: f32 = 0.10;
    pub const DEFAULT_FREEZE_CHANCE_CAP: f32 = 0.90;
    pub const DEFAULT_RAGE_BONUS_PER_STACK: f64 = 0.10;

    pub fn new() -> Self {
        Self {
            turn_end_effect_delay_ms: Self::DEFAULT_TURN_END_EFFECT_DELAY_MS,
            time_scale: Self::DEFAULT_TIME_SCALE,
            turn_end_interval_ms: Self::DEFAULT_TURN_END_INTERVAL_MS,
            freeze_chance_per_stack: Self::DEFAULT_FREEZE_CHANCE_PER_STACK,
            freeze_chance_cap: Self::DEFAULT_FREEZE_CHANCE_CAP,
            rage_bonus_per_stack: Self::DEFAULT_RAGE_BONUS_PER_STACK,
            map: MapConfig::default(),
        }
    }

    /// Returns a config whose presentation delays are all zero.
    pub fn instant() -> Self {
        Self {
            time_scale: 0.0,
            ..Self::new()
        }
    }

    /// Scaled pause between turn-end effects, in milliseconds.
    pub fn scaled_effect_delay_ms(&self) -> u64 {
        let scale = self.time_scale.max(0.0) as f64;
        (self.turn_end_effect_delay_ms as f64 * scale).round() as u64
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters for [`crate::map::StageMap::generate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapConfig {
    /// Number of columns, start column included.
    pub width: u32,
    /// Number of rows per column.
    pub height: u32,
    /// Independent start-to-boss path passes.
    pub path_count: u32,
    /// Stage kind of the start node.
    pub start_kind: StageKind,
}

impl MapConfig {
    pub const DEFAULT_WIDTH: u32 = 7;
    pub const DEFAULT_HEIGHT: u32 = 5;
    pub const DEFAULT_PATH_COUNT: u32 = 4;

    pub const fn new(width: u32, height: u32, path_count: u32) -> Self {
        Self {
            width,
            height,
            path_count,
            start_kind: StageKind::Enemy,
        }
    }

    #[must_use]
    pub const fn with_start_kind(mut self, start_kind: StageKind) -> Self {
        self.start_kind = start_kind;
        self
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_WIDTH,
            Self::DEFAULT_HEIGHT,
            Self::DEFAULT_PATH_COUNT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_delay_follows_time_scale() {
        let mut config = GameConfig::new();
        assert_eq!(config.scaled_effect_delay_ms(), 500);

        config.time_scale = 0.5;
        assert_eq!(config.scaled_effect_delay_ms(), 250);

        assert_eq!(GameConfig::instant().scaled_effect_delay_ms(), 0);
    }

    #[test]
    fn negative_time_scale_never_produces_a_delay() {
        let config = GameConfig {
            time_scale: -2.0,
            ..GameConfig::new()
        };
        assert_eq!(config.scaled_effect_delay_ms(), 0);
    }
}
