//! Simulation settings read from the environment.
use std::env;
use std::path::PathBuf;

/// Settings for one headless run.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Content directory; embedded content when unset.
    pub data_dir: Option<PathBuf>,
    /// Run seed; drawn from entropy when unset.
    pub seed: Option<u64>,
    /// Sleep for real between turn-end effects.
    pub realtime: bool,
    /// Battle time simulated per step.
    pub step_ms: u64,
    /// Simulated time after which the battle is abandoned.
    pub time_limit_ms: u64,
    pub player_health: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            seed: None,
            realtime: false,
            step_ms: 250,
            time_limit_ms: 120_000,
            player_health: 60,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `MERGE_DATA_DIR` - Directory with config.toml and the RON catalogs
    /// - `MERGE_SEED` - Run seed (default: random)
    /// - `MERGE_REALTIME` - Pause for real between effects (default: false)
    /// - `MERGE_STEP_MS` - Simulated milliseconds per step (default: 250)
    /// - `MERGE_TIME_LIMIT_MS` - Battle time limit (default: 120000)
    /// - `MERGE_PLAYER_HEALTH` - Starting player health (default: 60)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = env::var("MERGE_DATA_DIR").ok().map(PathBuf::from);
        config.seed = read_env::<u64>("MERGE_SEED");

        if let Some(realtime) = read_env::<bool>("MERGE_REALTIME") {
            config.realtime = realtime;
        }
        if let Some(step) = read_env::<u64>("MERGE_STEP_MS") {
            config.step_ms = step.max(1);
        }
        if let Some(limit) = read_env::<u64>("MERGE_TIME_LIMIT_MS") {
            config.time_limit_ms = limit;
        }
        if let Some(health) = read_env::<u32>("MERGE_PLAYER_HEALTH") {
            config.player_health = health.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
