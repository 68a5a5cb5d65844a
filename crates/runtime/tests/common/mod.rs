#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use merge_content::ContentBundle;
use merge_core::{
    ActionRegistry, ActorState, EnemyAttack, EnemyState, EntityId, GameConfig, MergeArena,
    RandomSource, Reward, RunState,
};
use merge_runtime::{CancelHandle, Clock, ImmediateClock, OracleManager, RuntimeConfig};

pub fn oracles() -> OracleManager {
    let content = ContentBundle::embedded(&ActionRegistry::standard()).expect("embedded content");
    OracleManager::from_content(&content)
}

pub fn config() -> RuntimeConfig {
    RuntimeConfig::new(GameConfig::default())
}

pub fn run(max_health: u32) -> RunState {
    RunState::new(ActorState::player(max_health))
}

/// Enemy that attacks for `damage` every `interval_ms`.
pub fn enemy(id: u32, health: u32, damage: u32, interval_ms: u64) -> EnemyState {
    EnemyState::new(EntityId(id), health, EnemyAttack::new(damage, interval_ms))
        .with_reward(Reward::new(id * 10, id))
}

/// Enemy that never attacks within a test.
pub fn dummy(id: u32, health: u32) -> EnemyState {
    enemy(id, health, 1, u64::MAX)
}

pub fn immediate() -> Arc<ImmediateClock> {
    Arc::new(ImmediateClock::new())
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Draws zeros: every freeze check with a non-zero chance succeeds.
pub struct AlwaysLow;

impl RandomSource for AlwaysLow {
    fn next_u32(&mut self) -> u32 {
        0
    }
}

/// Draws the maximum: freeze checks below a 100% chance fail.
pub struct AlwaysHigh;

impl RandomSource for AlwaysHigh {
    fn next_u32(&mut self) -> u32 {
        u32::MAX
    }
}

/// Fires a cancel handle the first time a pause is requested.
#[derive(Default)]
pub struct CancellingClock {
    handle: Mutex<Option<CancelHandle>>,
}

impl CancellingClock {
    pub fn arm(&self, handle: CancelHandle) {
        *self.handle.lock().unwrap() = Some(handle);
    }
}

#[async_trait]
impl Clock for CancellingClock {
    async fn sleep(&self, _duration: Duration) {
        let handle = self.handle.lock().unwrap().take();
        if let Some(handle) = handle {
            handle.cancel();
        }
        tokio::task::yield_now().await;
    }
}

#[derive(Default)]
pub struct CountingArena {
    pub items: AtomicU32,
    pub disturbances: AtomicU32,
}

impl CountingArena {
    pub fn with_items(items: u32) -> Self {
        Self {
            items: AtomicU32::new(items),
            disturbances: AtomicU32::new(0),
        }
    }
}

impl MergeArena for CountingArena {
    fn remove_random_item(&self) -> bool {
        self.items
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |items| items.checked_sub(1))
            .is_ok()
    }

    fn spawn_disturbance_object(&self) {
        self.disturbances.fetch_add(1, Ordering::SeqCst);
    }

    fn item_count(&self) -> u32 {
        self.items.load(Ordering::SeqCst)
    }
}
