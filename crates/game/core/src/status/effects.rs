//! Type-specific effect bodies.

use crate::combat::{AttackType, DamageResult, HealResult};
use crate::state::{BattleState, Combatant, EntityId, StatusEffectType};

use super::StatusEngine;

/// What a turn-end effect did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EffectOutcome {
    /// Burn damaged its holder.
    Damaged(DamageResult),
    /// Regeneration healed its holder.
    Healed(HealResult),
    /// Shock damaged every enemy, in roster order.
    Shocked(Vec<DamageResult>),
    /// Curse dropped disturbance objects into the arena.
    DisturbancesSpawned(u32),
    /// Decay removed items from the player's inventory.
    ItemsRemoved(u32),
    /// The effect has no body, does not apply to this holder, or a
    /// collaborator it needs is missing.
    NoEffect,
}

pub(super) fn resolve_turn_end(
    engine: &StatusEngine<'_>,
    battle: &mut BattleState,
    entity: EntityId,
    kind: StatusEffectType,
    stacks: u32,
) -> EffectOutcome {
    match kind {
        StatusEffectType::Burn => burn(engine, battle, entity, stacks),
        StatusEffectType::Regeneration => regenerate(engine, battle, entity, stacks),
        StatusEffectType::Shock => shock(engine, battle, entity, stacks),
        StatusEffectType::Curse => curse(engine, entity, stacks),
        StatusEffectType::Decay => decay(engine, entity, stacks),
        _ => EffectOutcome::NoEffect,
    }
}

fn burn(
    engine: &StatusEngine<'_>,
    battle: &mut BattleState,
    entity: EntityId,
    stacks: u32,
) -> EffectOutcome {
    match battle.combatant_mut(entity) {
        Some(holder) => {
            EffectOutcome::Damaged(engine.deal_damage(holder, stacks, AttackType::Normal))
        }
        None => EffectOutcome::NoEffect,
    }
}

fn regenerate(
    engine: &StatusEngine<'_>,
    battle: &mut BattleState,
    entity: EntityId,
    stacks: u32,
) -> EffectOutcome {
    match battle.combatant_mut(entity) {
        Some(holder) => EffectOutcome::Healed(engine.heal(holder, stacks)),
        None => EffectOutcome::NoEffect,
    }
}

/// Damages every enemy, the holder included. Only enemies discharge Shock.
fn shock(
    engine: &StatusEngine<'_>,
    battle: &mut BattleState,
    entity: EntityId,
    stacks: u32,
) -> EffectOutcome {
    if entity.is_player() {
        return EffectOutcome::NoEffect;
    }

    let mut hits = Vec::new();
    for id in battle.enemies.ids() {
        // Removed since the snapshot was taken.
        let Some(enemy) = battle.enemies.get_mut(id) else {
            continue;
        };
        hits.push(engine.deal_damage(enemy, stacks, AttackType::Normal));
    }
    EffectOutcome::Shocked(hits)
}

fn curse(engine: &StatusEngine<'_>, entity: EntityId, stacks: u32) -> EffectOutcome {
    if !entity.is_player() {
        return EffectOutcome::NoEffect;
    }
    let Some(arena) = engine.env().arena() else {
        tracing::debug!(target: "core::status", "no merge arena; curse skipped");
        return EffectOutcome::NoEffect;
    };

    for _ in 0..stacks {
        arena.spawn_disturbance_object();
    }
    EffectOutcome::DisturbancesSpawned(stacks)
}

fn decay(engine: &StatusEngine<'_>, entity: EntityId, stacks: u32) -> EffectOutcome {
    if !entity.is_player() {
        return EffectOutcome::NoEffect;
    }
    let Some(arena) = engine.env().arena() else {
        tracing::debug!(target: "core::status", "no merge arena; decay skipped");
        return EffectOutcome::NoEffect;
    };

    let mut removed = 0;
    for _ in 0..stacks {
        if arena.item_count() == 0 || !arena.remove_random_item() {
            break;
        }
        removed += 1;
    }
    EffectOutcome::ItemsRemoved(removed)
}

/// Battle-end bodies. None of the current kinds has one.
pub(super) fn on_battle_end(entity: &dyn Combatant, kind: StatusEffectType, stacks: u32) {
    tracing::trace!(
        target: "core::status",
        entity = %entity.id(),
        kind = %kind,
        stacks,
        "battle-end effect has no body"
    );
}
