use merge_core::GameConfig;

/// Runtime configuration shared by the coordinator and its event bus.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Capacity of each event bus topic.
    pub event_buffer_size: usize,
}

impl RuntimeConfig {
    pub fn new(game_config: GameConfig) -> Self {
        Self {
            game_config,
            ..Self::default()
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 100,
        }
    }
}
