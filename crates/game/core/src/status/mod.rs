//! Status effect resolution engine.
//!
//! The engine applies and removes stacks, modifies incoming damage and
//! outgoing attacks, resolves turn ends, and clears everything at battle end.
//! It owns no state: combatants carry their stacks, the [`CombatEnv`] carries
//! catalogs and presentation collaborators.
//!
//! # Ordering
//!
//! Every loop walks a snapshot of the stack map in [`StatusEffectType`]
//! declaration order. That makes Invincible resolve before Shield and Power
//! before Rage.
//!
//! # Turn end
//!
//! [`StatusEngine::begin_turn_end`], [`StatusEngine::resolve_next`] and
//! [`StatusEngine::commit_turn_end`] split one entity's turn end into
//! suspendable steps. Decay only happens in the commit, so dropping a batch
//! leaves the stack map untouched.
mod effects;
mod turn_end;

pub use effects::EffectOutcome;
pub use turn_end::{TurnEndBatch, TurnEndReport, TurnEndStep};

use crate::combat::{AttackType, DamageResult, HealResult};
use crate::config::GameConfig;
use crate::env::{CombatEnv, RandomSource, StatusTiming};
use crate::state::{BattleState, Combatant, EntityId, StatusEffectType, StatusSnapshot};

/// Stateless resolver bound to a set of collaborators and a config.
#[derive(Clone, Copy, Debug)]
pub struct StatusEngine<'a> {
    env: CombatEnv<'a>,
    config: &'a GameConfig,
}

impl<'a> StatusEngine<'a> {
    pub fn new(env: CombatEnv<'a>, config: &'a GameConfig) -> Self {
        Self { env, config }
    }

    pub fn env(&self) -> CombatEnv<'a> {
        self.env
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    // ========================================================================
    // Stack mutation
    // ========================================================================

    /// Adds stacks of `kind`. Returns the new total.
    ///
    /// Zero stacks are a logged no-op.
    pub fn add_status(
        &self,
        entity: &mut dyn Combatant,
        kind: StatusEffectType,
        stacks: u32,
    ) -> u32 {
        if stacks == 0 {
            tracing::debug!(
                target: "core::status",
                entity = %entity.id(),
                kind = %kind,
                "ignoring zero-stack add"
            );
            return entity.statuses().get(kind);
        }
        let total = entity.statuses_mut().add(kind, stacks);
        tracing::trace!(target: "core::status", entity = %entity.id(), kind = %kind, stacks, total, "status added");
        self.refresh_ui(entity);
        total
    }

    /// Removes up to `stacks` of `kind`. Returns what remains (0 once removed).
    pub fn remove_status(
        &self,
        entity: &mut dyn Combatant,
        kind: StatusEffectType,
        stacks: u32,
    ) -> u32 {
        if !entity.statuses().contains(kind) {
            return 0;
        }
        let remaining = entity.statuses_mut().remove(kind, stacks);
        tracing::trace!(target: "core::status", entity = %entity.id(), kind = %kind, stacks, remaining, "status removed");
        self.refresh_ui(entity);
        remaining
    }

    // ========================================================================
    // Damage and heal
    // ========================================================================

    /// Runs incoming damage modifiers, then applies the result.
    pub fn deal_damage(
        &self,
        target: &mut dyn Combatant,
        amount: u32,
        attack_type: AttackType,
    ) -> DamageResult {
        let was_alive = target.is_alive();
        let dealt = self.modify_incoming_damage(target, amount);
        let applied = target.take_damage(dealt);
        let result = DamageResult {
            target: target.id(),
            requested: amount,
            dealt,
            applied,
            lethal: was_alive && !target.is_alive(),
        };
        tracing::debug!(
            target: "core::status",
            entity = %result.target,
            attack = %attack_type,
            requested = amount,
            dealt,
            applied,
            "damage applied"
        );
        result
    }

    pub fn heal(&self, target: &mut dyn Combatant, amount: u32) -> HealResult {
        let applied = target.heal(amount);
        HealResult {
            target: target.id(),
            requested: amount,
            applied,
        }
    }

    // ========================================================================
    // Modifiers
    // ========================================================================

    /// Applies `OnDamage` effects to incoming damage.
    ///
    /// Invincible zeroes the damage without touching other stacks. Shield
    /// absorbs up to its stack count and loses the absorbed stacks at once.
    pub fn modify_incoming_damage(&self, entity: &mut dyn Combatant, damage: u32) -> u32 {
        let snapshot = entity.statuses().snapshot();
        let mut damage = damage;

        for (kind, _) in self.entries_with_timing(&snapshot, StatusTiming::OnDamage) {
            match kind {
                StatusEffectType::Invincible => {
                    damage = 0;
                    break;
                }
                StatusEffectType::Shield => {
                    let absorbed = entity.statuses().get(kind).min(damage);
                    if absorbed > 0 {
                        entity.statuses_mut().remove(kind, absorbed);
                    }
                    damage -= absorbed;
                }
                _ => {}
            }
        }

        self.refresh_ui(entity);
        damage
    }

    /// Applies `OnAttack` effects to an outgoing attack.
    ///
    /// Power adds its stacks to `Normal` attacks. Rage scales any attack by
    /// `1 + rage_bonus_per_stack * stacks`, rounded.
    pub fn modify_outgoing_attack(
        &self,
        entity: &dyn Combatant,
        attack_type: AttackType,
        attack: u32,
    ) -> u32 {
        let snapshot = entity.statuses().snapshot();
        let mut attack = attack;

        for (kind, stacks) in self.entries_with_timing(&snapshot, StatusTiming::OnAttack) {
            match kind {
                StatusEffectType::Power if attack_type == AttackType::Normal => {
                    attack = attack.saturating_add(stacks);
                }
                StatusEffectType::Rage => {
                    attack = rage_attack(attack, stacks, self.config.rage_bonus_per_stack);
                }
                _ => {}
            }
        }

        self.refresh_ui(entity);
        attack
    }

    // ========================================================================
    // Checks
    // ========================================================================

    /// Rolls whether a frozen entity skips its action. Never changes stacks.
    pub fn check_freeze(&self, entity: &dyn Combatant, rng: &mut dyn RandomSource) -> bool {
        let stacks = entity.statuses().get(StatusEffectType::Freeze);
        if stacks == 0 {
            return false;
        }
        let chance = freeze_chance(
            stacks,
            self.config.freeze_chance_per_stack,
            self.config.freeze_chance_cap,
        );
        let frozen = rng.unit() < chance;
        tracing::debug!(target: "core::status", entity = %entity.id(), stacks, chance, frozen, "freeze check");
        frozen
    }

    pub fn is_confused(&self, entity: &dyn Combatant) -> bool {
        entity.statuses().contains(StatusEffectType::Confusion)
    }

    // ========================================================================
    // Battle end
    // ========================================================================

    /// Clears every stack, permanent ones included, then runs the
    /// `OnBattleEnd` bodies of what was cleared. Returns the cleared stacks.
    pub fn on_battle_end(&self, entity: &mut dyn Combatant) -> StatusSnapshot {
        let snapshot = entity.statuses().snapshot();
        entity.statuses_mut().clear();

        for (kind, stacks) in self.entries_with_timing(&snapshot, StatusTiming::OnBattleEnd) {
            effects::on_battle_end(entity, kind, stacks);
        }

        self.refresh_ui(entity);
        snapshot
    }

    // ========================================================================
    // Turn end
    // ========================================================================

    /// Snapshots the stacks of `entity` for turn-end resolution.
    ///
    /// Returns `None` when the entity is not in the battle.
    pub fn begin_turn_end(&self, battle: &BattleState, entity: EntityId) -> Option<TurnEndBatch> {
        let combatant = battle.combatant(entity)?;
        Some(TurnEndBatch::new(entity, combatant.statuses().snapshot()))
    }

    /// Resolves the next `OnTurnEnd` effect of the batch.
    ///
    /// Returns `None` once the batch is exhausted, the entity left the battle,
    /// or the entity died.
    pub fn resolve_next(
        &self,
        batch: &mut TurnEndBatch,
        battle: &mut BattleState,
    ) -> Option<TurnEndStep> {
        loop {
            let (kind, stacks) = batch.next_entry()?;

            let combatant = battle.combatant(batch.entity())?;
            if !combatant.is_alive() {
                batch.finish();
                return None;
            }

            let Some(data) = self.env.status_data(kind) else {
                continue;
            };
            if data.timing != StatusTiming::OnTurnEnd {
                continue;
            }

            let priority = batch.mark_resolved();
            self.announce(combatant, kind, data.sound_id(), priority);

            let outcome = effects::resolve_turn_end(self, battle, batch.entity(), kind, stacks);
            tracing::debug!(
                target: "core::status",
                entity = %batch.entity(),
                kind = %kind,
                stacks,
                ?outcome,
                "turn-end effect resolved"
            );
            return Some(TurnEndStep {
                entity: batch.entity(),
                kind,
                stacks,
                outcome,
            });
        }
    }

    /// Ages every non-permanent stack of the entity by one and removes the
    /// entries that ran out, all at once.
    ///
    /// Decay walks the live stack map, so effects without a catalog entry
    /// decay too.
    pub fn commit_turn_end(&self, batch: TurnEndBatch, battle: &mut BattleState) -> TurnEndReport {
        let entity = batch.entity();
        let mut report = TurnEndReport::new(entity, batch.resolved());

        let Some(combatant) = battle.combatant_mut(entity) else {
            tracing::debug!(target: "core::status", %entity, "entity left before commit; nothing to decay");
            return report;
        };

        let live = combatant.statuses().snapshot();
        let decaying: StatusSnapshot = live
            .iter()
            .copied()
            .filter(|(kind, _)| !self.env.is_permanent(*kind))
            .collect();

        let stacks = combatant.statuses_mut();
        for (kind, _) in &decaying {
            if stacks.remove(*kind, 1) == 0 {
                report.expired.push(*kind);
            }
        }

        self.refresh_ui(combatant);
        tracing::debug!(
            target: "core::status",
            %entity,
            resolved = report.resolved,
            decayed = decaying.len(),
            expired = report.expired.len(),
            "turn end committed"
        );
        report
    }

    /// Runs a whole turn end for one entity without pausing.
    pub fn process_turn_end(&self, battle: &mut BattleState, entity: EntityId) -> TurnEndReport {
        let Some(mut batch) = self.begin_turn_end(battle, entity) else {
            return TurnEndReport::new(entity, 0);
        };
        let mut steps = Vec::new();
        while let Some(step) = self.resolve_next(&mut batch, battle) {
            steps.push(step);
        }
        let mut report = self.commit_turn_end(batch, battle);
        report.steps = steps;
        report
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn entries_with_timing(&self, snapshot: &StatusSnapshot, timing: StatusTiming) -> StatusSnapshot {
        snapshot
            .iter()
            .copied()
            .filter(|(kind, _)| {
                self.env
                    .status_data(*kind)
                    .is_some_and(|data| data.timing == timing)
            })
            .collect()
    }

    fn announce(
        &self,
        entity: &dyn Combatant,
        kind: StatusEffectType,
        sound: Option<&str>,
        priority: u32,
    ) {
        match self.env.presenter() {
            Some(presenter) => {
                presenter.show_effect_text(kind, entity.anchor(), entity.is_player(), priority)
            }
            None => tracing::debug!(target: "core::status", "no presenter; effect text skipped"),
        }
        if let Some(sound) = sound {
            match self.env.audio() {
                Some(audio) => audio.play_sound_effect(sound),
                None => tracing::debug!(target: "core::status", sound, "no audio sink; sound skipped"),
            }
        }
    }

    pub(crate) fn refresh_ui(&self, entity: &dyn Combatant) {
        if let Some(presenter) = self.env.presenter() {
            presenter.update_status_ui(entity.id(), entity.statuses());
        }
    }
}

/// Freeze chance for `stacks`, capped.
pub fn freeze_chance(stacks: u32, per_stack: f32, cap: f32) -> f32 {
    (stacks as f32 * per_stack).min(cap)
}

/// Rage-scaled attack, rounded half away from zero.
pub fn rage_attack(attack: u32, stacks: u32, bonus_per_stack: f64) -> u32 {
    let scaled = attack as f64 * (1.0 + bonus_per_stack * stacks as f64);
    scaled.round().clamp(0.0, u32::MAX as f64) as u32
}
