mod common;

use common::*;
use merge_core::{
    AttackType, BattleOutcome, Combatant, EntityId, GameConfig, GameError, RosterError,
    StatusEffectType,
};
use merge_runtime::{BattlePhase, CombatEvent, RuntimeError, Topic, TurnCoordinator};

#[test]
fn builder_requires_oracles_and_a_run() {
    let err = TurnCoordinator::builder().run(run(10)).build().unwrap_err();
    assert_eq!(err, RuntimeError::MissingOracles);

    let err = TurnCoordinator::builder().oracles(oracles()).build().unwrap_err();
    assert_eq!(err.error_code(), "RUNTIME_MISSING_RUN_STATE");

    let err = TurnCoordinator::builder()
        .oracles(oracles())
        .run(run(10))
        .enemies((1..=GameConfig::MAX_ENEMIES as u32 + 1).map(|id| dummy(id, 5)))
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        RuntimeError::Roster(RosterError::Full {
            capacity: GameConfig::MAX_ENEMIES
        })
    );
}

#[test]
fn phases_gate_every_operation() {
    let mut coordinator = TurnCoordinator::builder()
        .oracles(oracles())
        .run(run(10))
        .enemy(dummy(1, 10))
        .build()
        .unwrap();

    assert_eq!(coordinator.phase(), BattlePhase::Idle);
    assert_eq!(
        coordinator.advance(ms(10)).unwrap_err(),
        RuntimeError::NotStarted
    );

    coordinator.start().unwrap();
    assert_eq!(
        coordinator.start().unwrap_err(),
        RuntimeError::InvalidPhase(BattlePhase::PlayerTurnWindow)
    );

    assert_eq!(coordinator.end_battle(), BattleOutcome::Abandoned);
    assert_eq!(coordinator.end_battle(), BattleOutcome::Abandoned);
    assert_eq!(
        coordinator
            .player_attack(AttackType::Normal, 1)
            .unwrap_err(),
        RuntimeError::BattleEnded
    );
    assert_eq!(
        coordinator
            .apply_status(EntityId::PLAYER, StatusEffectType::Burn, 1)
            .unwrap_err(),
        RuntimeError::BattleEnded
    );
}

#[test]
fn cancelling_outside_a_turn_end_abandons_the_battle() {
    let mut coordinator = TurnCoordinator::builder()
        .oracles(oracles())
        .run(run(10))
        .enemy(dummy(1, 10))
        .build()
        .unwrap();
    coordinator.start().unwrap();

    coordinator.cancel_handle().cancel();

    assert_eq!(
        coordinator.advance(ms(10)).unwrap_err(),
        RuntimeError::Cancelled
    );
    assert_eq!(coordinator.outcome(), Some(BattleOutcome::Abandoned));
    assert_eq!(
        coordinator.advance(ms(10)).unwrap_err(),
        RuntimeError::BattleEnded
    );
}

#[test]
fn enemies_attack_on_their_own_cooldown() {
    let mut coordinator = TurnCoordinator::builder()
        .oracles(oracles())
        .config(config())
        .run(run(30))
        .enemies([enemy(1, 10, 3, 1_000), enemy(2, 10, 4, 1_500)])
        .build()
        .unwrap();
    let mut combat = coordinator.subscribe(Topic::Combat);
    coordinator.start().unwrap();

    assert!(coordinator.advance(ms(500)).unwrap().attacks.is_empty());

    let tick = coordinator.advance(ms(500)).unwrap();
    assert_eq!(tick.attacks.len(), 1);
    assert_eq!(tick.attacks[0].attacker, EntityId(1));
    assert_eq!(coordinator.battle().player.health(), 27);

    let tick = coordinator.advance(ms(500)).unwrap();
    assert_eq!(tick.attacks.len(), 1);
    assert_eq!(tick.attacks[0].attacker, EntityId(2));
    assert_eq!(coordinator.battle().player.health(), 23);

    match combat.try_recv().unwrap() {
        CombatEvent::DamageDealt { source, result, .. } => {
            assert_eq!(source, Some(EntityId(1)));
            assert_eq!(result.applied, 3);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn freeze_skips_attacks_without_consuming_stacks() {
    let mut frozen = TurnCoordinator::builder()
        .oracles(oracles())
        .config(config())
        .run(run(30))
        .enemy(enemy(1, 10, 3, 1_000))
        .rng(AlwaysLow)
        .build()
        .unwrap();
    frozen.start().unwrap();
    frozen.apply_status(EntityId(1), StatusEffectType::Freeze, 1).unwrap();

    let tick = frozen.advance(ms(1_000)).unwrap();
    assert!(tick.attacks[0].frozen);
    assert_eq!(frozen.battle().player.health(), 30);
    let frozen_enemy = frozen.battle().enemies.get(EntityId(1)).unwrap();
    assert_eq!(frozen_enemy.statuses().get(StatusEffectType::Freeze), 1);

    let mut thawed = TurnCoordinator::builder()
        .oracles(oracles())
        .config(config())
        .run(run(30))
        .enemy(enemy(1, 10, 3, 1_000))
        .rng(AlwaysHigh)
        .build()
        .unwrap();
    thawed.start().unwrap();
    thawed.apply_status(EntityId(1), StatusEffectType::Freeze, 5).unwrap();

    let tick = thawed.advance(ms(1_000)).unwrap();
    assert!(!tick.attacks[0].frozen);
    assert_eq!(thawed.battle().player.health(), 27);
}

#[test]
fn player_attacks_run_both_modifier_chains() {
    let mut coordinator = TurnCoordinator::builder()
        .oracles(oracles())
        .config(config())
        .run(run(30))
        .enemies([dummy(1, 50), dummy(2, 50)])
        .build()
        .unwrap();
    coordinator.start().unwrap();
    coordinator.apply_status(EntityId::PLAYER, StatusEffectType::Power, 4).unwrap();
    coordinator.apply_status(EntityId::PLAYER, StatusEffectType::Rage, 3).unwrap();
    coordinator.apply_status(EntityId(1), StatusEffectType::Shield, 5).unwrap();

    let report = coordinator.player_attack(AttackType::Normal, 10).unwrap();
    assert_eq!(report.attack, 18);
    assert_eq!(report.hits.len(), 1);
    assert_eq!(report.hits[0].dealt, 13);
    assert!(
        !coordinator
            .battle()
            .enemies
            .get(EntityId(1))
            .unwrap()
            .statuses()
            .contains(StatusEffectType::Shield)
    );

    // Power only boosts Normal attacks.
    let report = coordinator.player_attack(AttackType::All, 10).unwrap();
    assert_eq!(report.attack, 13);
    let targets: Vec<EntityId> = report.hits.iter().map(|hit| hit.target).collect();
    assert_eq!(targets, vec![EntityId(1), EntityId(2)]);
}

#[test]
fn lethal_player_attack_grants_the_bounty() {
    let mut coordinator = TurnCoordinator::builder()
        .oracles(oracles())
        .config(config())
        .run(run(30))
        .enemies([dummy(1, 5), dummy(2, 50)])
        .build()
        .unwrap();
    coordinator.start().unwrap();

    let report = coordinator.player_attack(AttackType::Normal, 5).unwrap();
    assert!(report.hits[0].lethal);
    assert_eq!(report.defeated.len(), 1);
    assert_eq!(coordinator.run().wallet.coins, 10);
    assert_eq!(coordinator.outcome(), None);

    // The next Normal attack hits the enemy that is now in front.
    let report = coordinator.player_attack(AttackType::Normal, 1).unwrap();
    assert_eq!(report.hits[0].target, EntityId(2));
}

#[test]
fn confusion_is_reported_for_input_handling() {
    let mut coordinator = TurnCoordinator::builder()
        .oracles(oracles())
        .run(run(30))
        .enemy(dummy(1, 10))
        .build()
        .unwrap();
    coordinator.start().unwrap();
    assert!(!coordinator.is_player_confused());

    coordinator
        .apply_status(EntityId::PLAYER, StatusEffectType::Confusion, 1)
        .unwrap();
    assert!(coordinator.is_player_confused());
}

#[test]
fn turn_end_comes_due_on_its_interval() {
    let mut coordinator = TurnCoordinator::builder()
        .oracles(oracles())
        .config(config())
        .run(run(30))
        .enemy(dummy(1, 10))
        .build()
        .unwrap();
    coordinator.start().unwrap();

    assert!(!coordinator.advance(ms(3_999)).unwrap().turn_end_due);
    assert!(coordinator.advance(ms(1)).unwrap().turn_end_due);
    assert!(!coordinator.advance(ms(1)).unwrap().turn_end_due);
}

#[tokio::test]
async fn run_for_interleaves_attacks_and_turn_ends() {
    let clock = immediate();
    let mut coordinator = TurnCoordinator::builder()
        .oracles(oracles())
        .config(config())
        .run(run(30))
        .enemy(enemy(1, 50, 2, 1_000))
        .clock(clock.clone())
        .build()
        .unwrap();
    coordinator.start().unwrap();

    let report = coordinator.run_for(ms(4_000), ms(1_000)).await.unwrap();

    assert_eq!(report.ticks, 4);
    assert_eq!(report.enemy_attacks, 4);
    assert_eq!(report.turn_ends, 1);
    assert_eq!(report.outcome, None);
    assert_eq!(coordinator.battle().player.health(), 22);
    assert_eq!(coordinator.cycle(), 1);
    assert_eq!(clock.requested(), vec![ms(1_000); 4]);
}

#[tokio::test]
async fn enemy_victory_ends_the_run_early() {
    let mut coordinator = TurnCoordinator::builder()
        .oracles(oracles())
        .config(config())
        .run(run(10))
        .enemy(enemy(1, 50, 10, 1_000))
        .clock(immediate())
        .build()
        .unwrap();
    coordinator.start().unwrap();

    let report = coordinator.run_for(ms(10_000), ms(1_000)).await.unwrap();
    assert_eq!(report.ticks, 1);
    assert_eq!(report.outcome, Some(BattleOutcome::Defeat));

    let result = coordinator.finish();
    assert_eq!(result.outcome, BattleOutcome::Defeat);
    assert_eq!(result.run.player.health(), 0);
    assert_eq!(result.run.stages_cleared, 0);
}
