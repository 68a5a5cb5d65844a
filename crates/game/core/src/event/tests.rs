use super::*;
use crate::config::GameConfig;
use crate::env::{CombatEnv, MergeArena};
use crate::state::{ActorState, Combatant, StatusEffectType};
use crate::testing::{FakeArena, TestCatalog};

fn shrine() -> StageEvent {
    StageEvent::new("shrine", "event.shrine.description")
        .with_option(
            StageEventOption::new("event.shrine.pray", "event.shrine.pray_result")
                .with_effect(OptionEffect::Actions(vec![
                    ActionCall::new("spend_coins", ActionArgs::amount(10)),
                    ActionCall::new("gain_max_health", ActionArgs::amount(5)),
                ]))
                .with_availability(Requirement::MinCoins(10)),
        )
        .with_option(
            StageEventOption::new("event.shrine.bleed", "event.shrine.bleed_result")
                .with_effect(OptionEffect::Actions(vec![
                    ActionCall::new("lose_health", ActionArgs::amount(5)),
                    ActionCall::new("add_status", ActionArgs::status(StatusEffectType::Power, 2)),
                ]))
                .with_availability(Requirement::HealthAbove(5)),
        )
        .with_option(StageEventOption::new("event.shrine.leave", "event.shrine.leave_result").endless())
}

#[test]
fn availability_is_reevaluated_after_state_changes() {
    let catalog = TestCatalog::standard();
    let config = GameConfig::default();
    let engine = StatusEngine::new(CombatEnv::empty().with_statuses(&catalog), &config);
    let mut run = RunState::new(ActorState::player(20)).with_coins(10);
    let event = shrine();
    let registry = ActionRegistry::standard();
    let mut session = EventSession::new(&event);

    let mut ctx = EventContext::new(&mut run, engine);
    assert!(session.options(&ctx)[0].available);

    session.choose(0, &mut ctx, &registry).unwrap();
    assert_eq!(ctx.run.wallet.coins, 0);
    assert_eq!(ctx.run.player.max_health(), 25);
    assert_eq!(ctx.run.player.health(), 25);

    session.reset();
    let options = session.options(&ctx);
    assert!(!options[0].available);
    assert_eq!(
        session.choose(0, &mut ctx, &registry),
        Err(EventError::OptionUnavailable(0))
    );
}

#[test]
fn one_shot_options_are_consumed_endless_ones_are_not() {
    let catalog = TestCatalog::standard();
    let config = GameConfig::default();
    let engine = StatusEngine::new(CombatEnv::empty().with_statuses(&catalog), &config);
    let mut run = RunState::new(ActorState::player(20));
    let event = shrine();
    let registry = ActionRegistry::standard();
    let mut session = EventSession::new(&event);
    let mut ctx = EventContext::new(&mut run, engine);

    let result = session.choose(1, &mut ctx, &registry).unwrap();
    assert!(result.consumed);
    assert_eq!(result.result_key, "event.shrine.bleed_result");
    assert_eq!(ctx.run.player.health(), 15);
    assert_eq!(ctx.run.player.statuses.get(StatusEffectType::Power), 2);
    assert_eq!(
        session.choose(1, &mut ctx, &registry),
        Err(EventError::OptionConsumed(1))
    );

    for _ in 0..3 {
        assert!(!session.choose(2, &mut ctx, &registry).unwrap().consumed);
    }
    let presented: Vec<usize> = session.options(&ctx).iter().map(|view| view.index).collect();
    assert_eq!(presented, vec![0, 2]);
}

#[test]
fn repeatable_policy_consumes_nothing() {
    let catalog = TestCatalog::standard();
    let config = GameConfig::default();
    let engine = StatusEngine::new(CombatEnv::empty().with_statuses(&catalog), &config);
    let mut run = RunState::new(ActorState::player(50));
    let event = shrine().with_policy(ConsumptionPolicy::Repeatable);
    let registry = ActionRegistry::standard();
    let mut session = EventSession::new(&event);
    let mut ctx = EventContext::new(&mut run, engine);

    session.choose(1, &mut ctx, &registry).unwrap();
    session.choose(1, &mut ctx, &registry).unwrap();
    assert_eq!(ctx.run.player.health(), 40);
}

#[test]
fn failed_action_leaves_run_untouched() {
    let catalog = TestCatalog::standard();
    let config = GameConfig::default();
    let engine = StatusEngine::new(CombatEnv::empty().with_statuses(&catalog), &config);
    let mut run = RunState::new(ActorState::player(20)).with_coins(3);
    let event = StageEvent::new("toll", "event.toll").with_option(
        StageEventOption::new("event.toll.pay", "event.toll.paid").with_effect(OptionEffect::Actions(vec![
            ActionCall::new("gain_experience", ActionArgs::amount(4)),
            ActionCall::new("spend_coins", ActionArgs::amount(5)),
        ])),
    );
    let registry = ActionRegistry::standard();
    let mut session = EventSession::new(&event);
    let mut ctx = EventContext::new(&mut run, engine);

    assert_eq!(
        session.choose(0, &mut ctx, &registry),
        Err(EventError::InsufficientCoins {
            required: 5,
            available: 3
        })
    );
    assert_eq!(ctx.run.wallet.experience, 0);
    assert!(!session.is_consumed(0));
}

#[test]
fn unknown_action_is_reported() {
    let registry = ActionRegistry::standard();
    let event = StageEvent::new("broken", "event.broken").with_option(
        StageEventOption::new("a", "b").with_effect(OptionEffect::action("summon_dragon", ActionArgs::default())),
    );
    assert_eq!(
        event.validate(&registry),
        Err(EventError::UnknownAction("summon_dragon".to_owned()))
    );
    assert!(shrine().validate(&registry).is_ok());
}

#[test]
fn add_status_requires_a_status() {
    let catalog = TestCatalog::standard();
    let config = GameConfig::default();
    let engine = StatusEngine::new(CombatEnv::empty().with_statuses(&catalog), &config);
    let mut run = RunState::new(ActorState::player(20));
    let registry = ActionRegistry::standard();
    let mut ctx = EventContext::new(&mut run, engine);

    let err = registry
        .execute("add_status", &mut ctx, &ActionArgs::amount(3))
        .unwrap_err();
    assert!(matches!(err, EventError::MissingArgument { argument: "status", .. }));
}

#[test]
fn custom_predicates_and_effects() {
    let catalog = TestCatalog::standard();
    let arena = FakeArena::with_items(4);
    let config = GameConfig::default();
    let engine = StatusEngine::new(
        CombatEnv::empty().with_statuses(&catalog).with_arena(&arena),
        &config,
    );
    let mut run = RunState::new(ActorState::player(20));
    let event = StageEvent::new("merchant", "event.merchant")
        .with_option(
            StageEventOption::new("event.merchant.sell", "event.merchant.sold")
                .with_availability(Availability::custom(|ctx| ctx.item_count() >= 2))
                .with_effect(OptionEffect::custom(|ctx| {
                    ctx.run.wallet.coins += 7;
                    Ok(())
                })),
        )
        .with_option(
            StageEventOption::new("event.merchant.trade", "event.merchant.traded")
                .with_availability(Requirement::MinItems(2))
                .with_effect(OptionEffect::action("remove_items", ActionArgs::amount(3))),
        );
    let registry = ActionRegistry::standard();
    let mut session = EventSession::new(&event);
    let mut ctx = EventContext::new(&mut run, engine);

    session.choose(1, &mut ctx, &registry).unwrap();
    assert_eq!(arena.item_count(), 1);
    assert!(!session.options(&ctx)[0].available);
    assert_eq!(
        session.choose(0, &mut ctx, &registry),
        Err(EventError::OptionUnavailable(0))
    );
    assert_eq!(
        session.choose(5, &mut ctx, &registry),
        Err(EventError::OptionOutOfRange { index: 5, len: 2 })
    );
}

#[test]
fn failed_action_leaves_the_arena_untouched() {
    let catalog = TestCatalog::standard();
    let arena = FakeArena::with_items(5);
    let config = GameConfig::default();
    let engine = StatusEngine::new(
        CombatEnv::empty().with_statuses(&catalog).with_arena(&arena),
        &config,
    );
    let mut run = RunState::new(ActorState::player(20));
    let event = StageEvent::new("smuggler", "event.smuggler").with_option(
        StageEventOption::new("event.smuggler.deal", "event.smuggler.dealt").with_effect(
            OptionEffect::Actions(vec![
                ActionCall::new("remove_items", ActionArgs::amount(2)),
                ActionCall::new("spend_coins", ActionArgs::amount(50)),
            ]),
        ),
    );
    let registry = ActionRegistry::standard();
    let mut session = EventSession::new(&event);
    let mut ctx = EventContext::new(&mut run, engine);

    assert_eq!(
        session.choose(0, &mut ctx, &registry),
        Err(EventError::InsufficientCoins {
            required: 50,
            available: 0
        })
    );
    assert_eq!(arena.item_count(), 5);
    assert_eq!(ctx.run.wallet.coins, 0);
    assert!(!session.is_consumed(0));

    ctx.run.wallet.coins = 60;
    session.choose(0, &mut ctx, &registry).unwrap();
    assert_eq!(arena.item_count(), 3);
    assert_eq!(ctx.run.wallet.coins, 10);
    assert!(session.is_consumed(0));
}

#[test]
fn failed_custom_effect_spawns_and_removes_nothing() {
    let catalog = TestCatalog::standard();
    let arena = FakeArena::with_items(3);
    let config = GameConfig::default();
    let engine = StatusEngine::new(
        CombatEnv::empty().with_statuses(&catalog).with_arena(&arena),
        &config,
    );
    let mut run = RunState::new(ActorState::player(20)).with_coins(2);
    let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let recorded = seen.clone();
    let event = StageEvent::new("scrapper", "event.scrapper").with_option(
        StageEventOption::new("event.scrapper.scrap", "event.scrapper.scrapped").with_effect(
            OptionEffect::custom(move |ctx| {
                if let Some(arena) = ctx.engine.env().arena() {
                    arena.remove_random_item();
                    arena.remove_random_item();
                    arena.spawn_disturbance_object();
                }
                recorded.lock().unwrap().push(ctx.item_count());
                let available = ctx.run.wallet.coins;
                if !ctx.run.wallet.spend(5) {
                    return Err(EventError::InsufficientCoins {
                        required: 5,
                        available,
                    });
                }
                Ok(())
            }),
        ),
    );
    let registry = ActionRegistry::standard();
    let mut session = EventSession::new(&event);
    let mut ctx = EventContext::new(&mut run, engine);

    assert!(session.choose(0, &mut ctx, &registry).is_err());
    assert_eq!(*seen.lock().unwrap(), vec![1]);
    assert_eq!(arena.item_count(), 3);
    assert_eq!(arena.disturbances.load(std::sync::atomic::Ordering::SeqCst), 0);
    assert_eq!(ctx.run.wallet.coins, 2);
}
