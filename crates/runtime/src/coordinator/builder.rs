use std::sync::Arc;

use merge_core::{BattleState, EnemyState, PcgRng, RandomSource, RunState};

use crate::api::{Result, RuntimeError};
use crate::clock::{Clock, TokioClock};
use crate::config::RuntimeConfig;
use crate::events::EventBus;
use crate::oracle::OracleManager;

use super::{BattleLedger, CancelHandle, TurnCoordinator};

/// Builder for [`TurnCoordinator`] with flexible configuration.
pub struct CoordinatorBuilder {
    config: RuntimeConfig,
    oracles: Option<OracleManager>,
    run: Option<RunState>,
    enemies: Vec<EnemyState>,
    clock: Option<Arc<dyn Clock>>,
    rng: Option<Box<dyn RandomSource + Send>>,
    events: Option<EventBus>,
}

impl CoordinatorBuilder {
    pub(super) fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            oracles: None,
            run: None,
            enemies: Vec::new(),
            clock: None,
            rng: None,
            events: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Set the run the battle belongs to (required)
    pub fn run(mut self, run: RunState) -> Self {
        self.run = Some(run);
        self
    }

    /// Add an enemy; battle order is insertion order
    pub fn enemy(mut self, enemy: EnemyState) -> Self {
        self.enemies.push(enemy);
        self
    }

    pub fn enemies(mut self, enemies: impl IntoIterator<Item = EnemyState>) -> Self {
        self.enemies.extend(enemies);
        self
    }

    /// Clock used for turn-end pauses. Defaults to [`TokioClock`].
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Random source for freeze checks and random targeting.
    ///
    /// Defaults to a [`PcgRng`] seeded with 0.
    pub fn rng(mut self, rng: impl RandomSource + Send + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Share an existing bus instead of creating one sized by the config
    pub fn event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Builds the coordinator in the `Idle` phase.
    ///
    /// # Errors
    ///
    /// Fails without oracles or a run state, or when the enemies do not fit
    /// the roster.
    pub fn build(self) -> Result<TurnCoordinator> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;
        let run = self.run.ok_or(RuntimeError::MissingRunState)?;
        let battle = BattleState::with_enemies(run.player.clone(), self.enemies)?;
        let events = self
            .events
            .unwrap_or_else(|| EventBus::with_capacity(self.config.event_buffer_size));

        tracing::debug!(
            target: "runtime::coordinator",
            enemies = battle.enemies.len(),
            "coordinator built"
        );

        Ok(TurnCoordinator {
            oracles,
            config: self.config,
            clock: self.clock.unwrap_or_else(|| Arc::new(TokioClock)),
            rng: self.rng.unwrap_or_else(|| Box::new(PcgRng::new(0))),
            events,
            cancel: CancelHandle::new(),
            ledger: BattleLedger::new(battle, run),
        })
    }
}
