//! Combat turn coordinator.
//!
//! Owns one battle and drives it through its phases: the player attacks
//! whenever merges produce an attack, each enemy attacks on its own cooldown,
//! and a periodic turn end resolves every participant's status effects.
//!
//! Turn-end resolution is the only suspending operation. It walks a snapshot
//! of the participants (player first, then enemies in roster order) and
//! resolves each one's effects with a scaled pause between two effects.
//! Attacks are refused until it completes. Enemies that die are reaped after
//! each participant's commit, so later participants see the updated roster.
mod builder;
mod phase;
mod report;

pub use builder::CoordinatorBuilder;
pub use phase::{BattlePhase, CancelHandle};
pub use report::{AttackReport, BattleSummary, RunReport, TickReport, TurnEndSummary};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use merge_core::{
    AttackType, BattleOutcome, BattleState, Combatant, DamageResult, DefeatedEnemy,
    EffectOutcome, EntityId, RandomSource, Reward, RunState, StatusEffectType, StatusEngine,
    TurnEndStep,
};
use tokio::sync::{broadcast, watch};

use crate::api::{Result, RuntimeError};
use crate::clock::Clock;
use crate::config::RuntimeConfig;
use crate::events::{CombatEvent, EventBus, Topic};
use crate::oracle::OracleManager;

/// Mutable state of one battle.
pub(crate) struct BattleLedger {
    battle: BattleState,
    run: RunState,
    phase: BattlePhase,
    outcome: Option<BattleOutcome>,
    defeated: Vec<DefeatedEnemy>,
    rewards: Reward,
    cycle: u32,
    since_turn_end_ms: u64,
    closed: bool,
}

impl BattleLedger {
    pub(crate) fn new(battle: BattleState, run: RunState) -> Self {
        Self {
            battle,
            run,
            phase: BattlePhase::Idle,
            outcome: None,
            defeated: Vec::new(),
            rewards: Reward::default(),
            cycle: 0,
            since_turn_end_ms: 0,
            closed: false,
        }
    }

    /// Removes dead enemies, grants their bounties and settles the outcome.
    fn reap(&mut self, events: &EventBus) -> Vec<DefeatedEnemy> {
        let defeated = self.battle.enemies.reap_defeated();
        for enemy in &defeated {
            self.run.wallet.grant(enemy.reward);
            self.rewards += enemy.reward;
            tracing::info!(
                target: "runtime::coordinator",
                entity = %enemy.id,
                coins = enemy.reward.coins,
                experience = enemy.reward.experience,
                "enemy defeated"
            );
            events.publish(CombatEvent::EnemyDefeated {
                entity: enemy.id,
                reward: enemy.reward,
            });
        }
        self.defeated.extend(defeated.iter().copied());
        self.settle();
        defeated
    }

    /// Moves to `Ended` once one side is gone.
    fn settle(&mut self) -> Option<BattleOutcome> {
        if self.outcome.is_none() {
            if let Some(outcome) = self.battle.outcome() {
                tracing::info!(target: "runtime::coordinator", %outcome, "battle decided");
                self.outcome = Some(outcome);
                self.phase = BattlePhase::Ended;
            }
        }
        self.outcome
    }
}

/// Drives one battle. Build it with [`TurnCoordinator::builder`].
pub struct TurnCoordinator {
    oracles: OracleManager,
    config: RuntimeConfig,
    clock: Arc<dyn Clock>,
    rng: Box<dyn RandomSource + Send>,
    events: EventBus,
    cancel: CancelHandle,
    ledger: BattleLedger,
}

impl TurnCoordinator {
    pub fn builder() -> CoordinatorBuilder {
        CoordinatorBuilder::new()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn phase(&self) -> BattlePhase {
        self.ledger.phase
    }

    pub fn battle(&self) -> &BattleState {
        &self.ledger.battle
    }

    pub fn run(&self) -> &RunState {
        &self.ledger.run
    }

    /// Set once one side is gone or the battle was abandoned.
    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.ledger.outcome
    }

    /// Completed turn-end cycles.
    pub fn cycle(&self) -> u32 {
        self.ledger.cycle
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<CombatEvent> {
        self.events.subscribe(topic)
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Status engine bound to this battle's oracles and config.
    pub fn engine(&self) -> StatusEngine<'_> {
        StatusEngine::new(self.oracles.env(), &self.config.game_config)
    }

    /// Whether merge input should be distorted for the player.
    pub fn is_player_confused(&self) -> bool {
        self.engine().is_confused(&self.ledger.battle.player)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Opens the first player turn window.
    pub fn start(&mut self) -> Result<()> {
        self.check_cancelled()?;
        match self.ledger.phase {
            BattlePhase::Idle => {}
            BattlePhase::Ended => return Err(RuntimeError::BattleEnded),
            phase => return Err(RuntimeError::InvalidPhase(phase)),
        }
        self.ledger.phase = BattlePhase::PlayerTurnWindow;
        tracing::info!(
            target: "runtime::coordinator",
            enemies = self.ledger.battle.enemies.len(),
            player_health = self.ledger.battle.player.health(),
            "battle started"
        );
        self.ledger.settle();
        Ok(())
    }

    /// Clears every participant's stacks and closes the battle.
    ///
    /// Works in any phase, including after a cancelled or dropped turn end.
    /// Calling it again returns the same outcome without side effects.
    pub fn end_battle(&mut self) -> BattleOutcome {
        if self.ledger.closed {
            return self.ledger.outcome.unwrap_or(BattleOutcome::Abandoned);
        }

        let engine = StatusEngine::new(self.oracles.env(), &self.config.game_config);
        let ledger = &mut self.ledger;
        engine.on_battle_end(&mut ledger.battle.player);
        for id in ledger.battle.enemies.ids() {
            if let Some(enemy) = ledger.battle.enemies.get_mut(id) {
                engine.on_battle_end(enemy);
            }
        }

        let decided = ledger.battle.outcome().unwrap_or(BattleOutcome::Abandoned);
        let outcome = *ledger.outcome.get_or_insert(decided);
        ledger.phase = BattlePhase::Ended;
        ledger.closed = true;

        tracing::info!(
            target: "runtime::coordinator",
            %outcome,
            cycles = ledger.cycle,
            defeated = ledger.defeated.len(),
            "battle ended"
        );
        self.events.publish(CombatEvent::BattleEnded { outcome });
        outcome
    }

    /// Ends the battle if needed and hands the run state back.
    pub fn finish(mut self) -> BattleSummary {
        let outcome = self.end_battle();
        let BattleLedger {
            battle,
            mut run,
            defeated,
            rewards,
            cycle,
            ..
        } = self.ledger;

        run.player = battle.player;
        if outcome == BattleOutcome::Victory {
            run.stages_cleared = run.stages_cleared.saturating_add(1);
        }
        BattleSummary {
            outcome,
            run,
            defeated,
            rewards,
            turn_ends: cycle,
        }
    }

    // ========================================================================
    // Player turn window
    // ========================================================================

    /// Adds stacks to a participant, e.g. from a merged item.
    pub fn apply_status(
        &mut self,
        entity: EntityId,
        kind: StatusEffectType,
        stacks: u32,
    ) -> Result<u32> {
        if self.ledger.phase == BattlePhase::Ended {
            return Err(RuntimeError::BattleEnded);
        }
        let engine = StatusEngine::new(self.oracles.env(), &self.config.game_config);
        let target = self
            .ledger
            .battle
            .combatant_mut(entity)
            .ok_or(RuntimeError::UnknownEntity(entity))?;
        Ok(engine.add_status(target, kind, stacks))
    }

    /// Executes a player attack of `base` power against the enemy roster.
    ///
    /// Freeze may skip the attack. Otherwise outgoing modifiers apply once and
    /// every selected target takes the modified value through its own
    /// incoming modifiers.
    pub fn player_attack(&mut self, attack_type: AttackType, base: u32) -> Result<AttackReport> {
        self.check_cancelled()?;
        self.ledger.phase.ensure_active()?;

        let engine = StatusEngine::new(self.oracles.env(), &self.config.game_config);
        let player = &self.ledger.battle.player;
        let attacker = player.id;
        if engine.check_freeze(player, self.rng.as_mut()) {
            tracing::debug!(target: "runtime::coordinator", "player attack skipped by freeze");
            self.events
                .publish(CombatEvent::AttackSkipped { entity: attacker });
            return Ok(AttackReport::frozen(attacker, attack_type));
        }
        let attack = engine.modify_outgoing_attack(player, attack_type, base);

        let candidates = self.ledger.battle.enemies.live_ids();
        let targets = attack_type.select_targets(&candidates, self.rng.as_mut());
        let mut hits = Vec::with_capacity(targets.len());
        for target in targets {
            let Some(enemy) = self.ledger.battle.enemies.get_mut(target) else {
                continue;
            };
            let result = engine.deal_damage(enemy, attack, attack_type);
            self.events.publish(CombatEvent::DamageDealt {
                source: Some(attacker),
                attack_type,
                result,
            });
            hits.push(result);
        }

        let defeated = self.ledger.reap(&self.events);
        Ok(AttackReport {
            attacker,
            attack_type,
            attack,
            frozen: false,
            hits,
            defeated,
        })
    }

    /// Advances every enemy attack timer and the turn-end cadence by `elapsed`.
    ///
    /// Enemies whose window opens attack the player in roster order, unless
    /// Freeze skips them. The walk stops as soon as the player falls.
    pub fn advance(&mut self, elapsed: Duration) -> Result<TickReport> {
        self.check_cancelled()?;
        self.ledger.phase.ensure_active()?;

        let elapsed_ms = duration_ms(elapsed);
        let engine = StatusEngine::new(self.oracles.env(), &self.config.game_config);
        let ledger = &mut self.ledger;
        let mut report = TickReport::default();

        for id in ledger.battle.enemies.ids() {
            let Some(enemy) = ledger.battle.enemies.get_mut(id) else {
                continue;
            };
            if !enemy.is_alive() || !enemy.tick_attack_timer(elapsed_ms) {
                continue;
            }

            let attack_type = enemy.attack.attack_type;
            if engine.check_freeze(&*enemy, self.rng.as_mut()) {
                tracing::debug!(target: "runtime::coordinator", entity = %id, "enemy attack skipped by freeze");
                self.events.publish(CombatEvent::AttackSkipped { entity: id });
                report.attacks.push(AttackReport::frozen(id, attack_type));
                continue;
            }

            let base = enemy.attack.damage;
            let attack = engine.modify_outgoing_attack(&*enemy, attack_type, base);
            let result = engine.deal_damage(&mut ledger.battle.player, attack, attack_type);
            self.events.publish(CombatEvent::DamageDealt {
                source: Some(id),
                attack_type,
                result,
            });
            report.attacks.push(AttackReport {
                attacker: id,
                attack_type,
                attack,
                frozen: false,
                hits: vec![result],
                defeated: Vec::new(),
            });

            if ledger.settle().is_some() {
                break;
            }
        }

        if ledger.outcome.is_none() {
            let interval = self.config.game_config.turn_end_interval_ms;
            ledger.since_turn_end_ms = ledger.since_turn_end_ms.saturating_add(elapsed_ms);
            if interval > 0 && ledger.since_turn_end_ms >= interval {
                ledger.since_turn_end_ms %= interval;
                report.turn_end_due = true;
            }
        }

        report.outcome = ledger.outcome;
        Ok(report)
    }

    // ========================================================================
    // Turn end
    // ========================================================================

    /// Resolves one turn end for every participant.
    ///
    /// Participants resolve one after another and effects of one participant
    /// one after another, with the scaled effect delay after each effect.
    /// A participant's decay is committed only after all of its effects ran.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::Cancelled` when the cancel handle fires. The
    /// participant being resolved then keeps its stacks undecayed and the
    /// battle is abandoned.
    pub async fn resolve_turn_end(&mut self) -> Result<TurnEndSummary> {
        self.check_cancelled()?;
        self.ledger.phase.ensure_active()?;
        self.ledger.phase = BattlePhase::TurnEndResolution;
        self.ledger.since_turn_end_ms = 0;

        let cycle = self.ledger.cycle.saturating_add(1);
        let engine = StatusEngine::new(self.oracles.env(), &self.config.game_config);
        let delay = Duration::from_millis(self.config.game_config.scaled_effect_delay_ms());
        let mut cancelled = self.cancel.subscribe();
        let ledger = &mut self.ledger;
        let mut summary = TurnEndSummary {
            cycle,
            ..TurnEndSummary::default()
        };
        let mut interrupted = false;

        tracing::debug!(target: "runtime::coordinator", cycle, "turn-end resolution started");

        'participants: for entity in ledger.battle.participants() {
            // Enemies reaped by an earlier participant's effects are skipped.
            let Some(mut batch) = engine.begin_turn_end(&ledger.battle, entity) else {
                continue;
            };

            loop {
                if *cancelled.borrow() {
                    interrupted = true;
                    break 'participants;
                }
                let Some(step) = engine.resolve_next(&mut batch, &mut ledger.battle) else {
                    break;
                };
                publish_step(&self.events, &step);
                if !pause(self.clock.as_ref(), delay, &mut cancelled).await {
                    interrupted = true;
                    break 'participants;
                }
            }

            summary
                .reports
                .push(engine.commit_turn_end(batch, &mut ledger.battle));
            summary.defeated.extend(ledger.reap(&self.events));
            if ledger.outcome.is_some() {
                break;
            }
        }

        if interrupted {
            tracing::info!(target: "runtime::coordinator", cycle, "turn-end resolution cancelled");
            self.abandon();
            return Err(RuntimeError::Cancelled);
        }

        self.ledger.cycle = cycle;
        if self.ledger.outcome.is_none() {
            self.ledger.phase = BattlePhase::PlayerTurnWindow;
        }
        summary.outcome = self.ledger.outcome;

        let resolved = summary.resolved();
        tracing::debug!(
            target: "runtime::coordinator",
            cycle,
            resolved,
            participants = summary.reports.len(),
            "turn-end resolution completed"
        );
        self.events
            .publish(CombatEvent::TurnEndCompleted { cycle, resolved });
        Ok(summary)
    }

    /// Runs enemy timers for `duration` in `step` increments, resolving turn
    /// ends as they come due. Stops early once the battle is decided.
    pub async fn run_for(&mut self, duration: Duration, step: Duration) -> Result<RunReport> {
        let step = if step.is_zero() { duration } else { step };
        let mut report = RunReport::default();
        let mut remaining = duration;

        while !remaining.is_zero() {
            let tick = step.min(remaining);
            self.clock.sleep(tick).await;
            remaining -= tick;

            let tick_report = self.advance(tick)?;
            report.ticks += 1;
            report.enemy_attacks += tick_report
                .attacks
                .iter()
                .filter(|attack| !attack.frozen)
                .count() as u32;
            if tick_report.outcome.is_some() {
                break;
            }

            if tick_report.turn_end_due {
                let summary = self.resolve_turn_end().await?;
                report.turn_ends += 1;
                if summary.outcome.is_some() {
                    break;
                }
            }
        }

        report.outcome = self.ledger.outcome;
        Ok(report)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn check_cancelled(&mut self) -> Result<()> {
        if self.cancel.is_cancelled() && self.ledger.phase != BattlePhase::Ended {
            self.abandon();
            return Err(RuntimeError::Cancelled);
        }
        Ok(())
    }

    fn abandon(&mut self) {
        self.ledger.phase = BattlePhase::Ended;
        if self.ledger.outcome.is_none() {
            self.ledger.outcome = Some(BattleOutcome::Abandoned);
        }
        tracing::info!(target: "runtime::coordinator", cycle = self.ledger.cycle, "battle abandoned");
    }
}

impl fmt::Debug for TurnCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TurnCoordinator")
            .field("phase", &self.ledger.phase)
            .field("outcome", &self.ledger.outcome)
            .field("cycle", &self.ledger.cycle)
            .field("enemies", &self.ledger.battle.enemies.len())
            .field("oracles", &self.oracles)
            .finish()
    }
}

/// Waits for `delay` unless cancellation fires first. Returns false when
/// cancelled.
async fn pause(clock: &dyn Clock, delay: Duration, cancelled: &mut watch::Receiver<bool>) -> bool {
    let slept = tokio::select! {
        _ = clock.sleep(delay) => true,
        _ = cancelled.wait_for(|cancelled| *cancelled) => false,
    };
    slept && !*cancelled.borrow()
}

fn publish_step(events: &EventBus, step: &TurnEndStep) {
    events.publish(CombatEvent::StatusTriggered {
        entity: step.entity,
        kind: step.kind,
        stacks: step.stacks,
    });

    let damage: &[DamageResult] = match &step.outcome {
        EffectOutcome::Damaged(result) => std::slice::from_ref(result),
        EffectOutcome::Shocked(results) => results,
        _ => &[],
    };
    for result in damage {
        events.publish(CombatEvent::DamageDealt {
            source: None,
            attack_type: AttackType::Normal,
            result: *result,
        });
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
