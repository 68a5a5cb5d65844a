//! One seeded walk across the stage map.
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use merge_content::ContentBundle;
use merge_core::{
    ActionRegistry, ActorState, AttackType, BattleOutcome, Combatant, EnemyAttack, EnemyState,
    EntityId, EventContext, EventSession, NodeId, PcgRng, RandomSource, Reward, RunState,
    StageKind, StageMap, StageNode, StatusEffectType, StatusEngine,
};
use merge_runtime::{
    BattleSummary, Clock, ImmediateClock, OracleManager, RuntimeConfig, TokioClock,
    TurnCoordinator,
};
use serde::Serialize;

use crate::arena::Board;
use crate::config::SimConfig;

const MAP_STREAM: u64 = 0;
const WALK_STREAM: u64 = 1;
const BATTLE_STREAM_BASE: u64 = 100;

const BOARD_ITEMS: u32 = 12;

const PLAYER_BUFFS: [StatusEffectType; 4] = [
    StatusEffectType::Shield,
    StatusEffectType::Power,
    StatusEffectType::Rage,
    StatusEffectType::Regeneration,
];

const ENEMY_DEBUFFS: [StatusEffectType; 4] = [
    StatusEffectType::Burn,
    StatusEffectType::Freeze,
    StatusEffectType::Shock,
    StatusEffectType::Confusion,
];

/// What happened at one map node.
#[derive(Debug, Serialize)]
pub struct Visit {
    pub node: u32,
    pub kind: String,
    pub column: i32,
    pub detail: String,
}

/// Condensed battle result.
#[derive(Debug, Serialize)]
pub struct BattleLog {
    pub node: u32,
    pub outcome: BattleOutcome,
    pub defeated: usize,
    pub rewards: Reward,
    pub turn_ends: u32,
    pub player_health: u32,
}

impl BattleLog {
    fn new(node: NodeId, summary: &BattleSummary) -> Self {
        Self {
            node: node.0,
            outcome: summary.outcome,
            defeated: summary.defeated.len(),
            rewards: summary.rewards,
            turn_ends: summary.turn_ends,
            player_health: summary.run.player.health(),
        }
    }
}

/// Final report printed by the binary.
#[derive(Debug, Serialize)]
pub struct ExpeditionReport {
    pub seed: u64,
    pub map_nodes: usize,
    pub reached_boss: bool,
    pub survived: bool,
    pub visits: Vec<Visit>,
    pub battles: Vec<BattleLog>,
    pub disturbances: u32,
    pub run: RunState,
}

pub struct Expedition {
    config: SimConfig,
    content: ContentBundle,
    registry: ActionRegistry,
    oracles: OracleManager,
    board: Arc<Board>,
    run: RunState,
    seed: u64,
    battles_fought: u64,
}

impl Expedition {
    pub fn new(
        config: SimConfig,
        content: ContentBundle,
        registry: ActionRegistry,
        seed: u64,
    ) -> Self {
        let board = Arc::new(Board::with_items(BOARD_ITEMS));
        let oracles = OracleManager::from_content(&content).with_arena(board.clone());
        let run = RunState::new(ActorState::player(config.player_health));
        Self {
            config,
            content,
            registry,
            oracles,
            board,
            run,
            seed,
            battles_fought: 0,
        }
    }

    /// Walks from the start node until the boss falls, the player dies or
    /// the path runs out.
    pub async fn play(&mut self) -> Result<ExpeditionReport> {
        let mut map_rng = PcgRng::for_stream(self.seed, MAP_STREAM);
        let map = StageMap::generate(&self.content.config.map, &self.content.stages, &mut map_rng);
        tracing::info!(
            target: "sim::expedition",
            nodes = map.len(),
            width = map.width(),
            height = map.height(),
            "map generated"
        );

        let mut walk_rng = PcgRng::for_stream(self.seed, WALK_STREAM);
        let mut visits = Vec::new();
        let mut battles = Vec::new();
        let mut reached_boss = false;
        let mut current = map.start_node();

        while let Some(node) = current {
            reached_boss |= node.kind == StageKind::Boss;
            let detail = match node.kind {
                StageKind::Enemy | StageKind::Boss => {
                    let summary = self.battle(node).await?;
                    let log = BattleLog::new(node.id, &summary);
                    let detail = format!("{} after {} turn ends", log.outcome, log.turn_ends);
                    self.run = summary.run;
                    battles.push(log);
                    detail
                }
                StageKind::Events => self.visit_event(&mut walk_rng)?,
                StageKind::Rest => {
                    let healed = self.run.player.heal(self.run.player.max_health() * 3 / 10);
                    format!("rested for {healed}")
                }
                StageKind::Treasure => {
                    let coins = 10 + walk_rng.range_usize(20) as u32;
                    self.run.wallet.grant(Reward::new(coins, 0));
                    format!("found {coins} coins")
                }
                StageKind::Shop => {
                    if self.run.wallet.spend(15) {
                        let healed = self.run.player.heal(12);
                        format!("bought a potion, healed {healed}")
                    } else {
                        "could not afford anything".to_owned()
                    }
                }
                StageKind::Undefined => "empty".to_owned(),
            };
            tracing::info!(
                target: "sim::expedition",
                node = node.id.0,
                kind = %node.kind,
                %detail,
                "node visited"
            );
            visits.push(Visit {
                node: node.id.0,
                kind: node.kind.to_string(),
                column: node.position.x,
                detail,
            });

            if !self.run.player.is_alive() || node.kind == StageKind::Boss {
                break;
            }
            current = next_node(&map, node, &mut walk_rng);
        }

        Ok(ExpeditionReport {
            seed: self.seed,
            map_nodes: map.len(),
            reached_boss,
            survived: self.run.player.is_alive(),
            visits,
            battles,
            disturbances: self.board.disturbances(),
            run: self.run.clone(),
        })
    }

    async fn battle(&mut self, node: &StageNode) -> Result<BattleSummary> {
        let mut rng = PcgRng::for_stream(self.seed, BATTLE_STREAM_BASE + self.battles_fought);
        self.battles_fought += 1;

        let enemies = spawn_enemies(node, &mut rng);
        let clock: Arc<dyn Clock> = if self.config.realtime {
            Arc::new(TokioClock)
        } else {
            Arc::new(ImmediateClock::new())
        };
        let mut coordinator = TurnCoordinator::builder()
            .config(RuntimeConfig::new(self.content.config.clone()))
            .oracles(self.oracles.clone())
            .run(self.run.clone())
            .enemies(enemies)
            .clock(clock)
            .rng(PcgRng::for_stream(self.seed, BATTLE_STREAM_BASE + self.battles_fought + 1_000))
            .build()?;
        coordinator.start()?;

        let step = Duration::from_millis(self.config.step_ms);
        let mut elapsed_ms = 0;
        let mut merges = 0u32;
        while coordinator.outcome().is_none() {
            if elapsed_ms >= self.config.time_limit_ms {
                tracing::warn!(target: "sim::expedition", elapsed_ms, "battle timed out");
                break;
            }

            if self.board.merge() {
                merges += 1;
                if merges % 3 == 0 {
                    merge_status(&mut coordinator, &mut rng)?;
                }
                let attack_type = pick_attack(&mut rng);
                let base = 3 + rng.range_usize(5) as u32;
                coordinator.player_attack(attack_type, base)?;
                if coordinator.outcome().is_some() {
                    break;
                }
            } else {
                self.board.refill(BOARD_ITEMS / 2);
            }

            coordinator.run_for(step, step).await?;
            elapsed_ms += self.config.step_ms;
        }

        Ok(coordinator.finish())
    }

    /// Takes the first available option of a random event.
    fn visit_event(&mut self, rng: &mut PcgRng) -> Result<String> {
        if self.content.events.is_empty() {
            return Ok("no events loaded".to_owned());
        }
        let event = &self.content.events[rng.range_usize(self.content.events.len())];
        let engine = StatusEngine::new(self.oracles.env(), &self.content.config);
        let mut ctx = EventContext::new(&mut self.run, engine);
        let mut session = EventSession::new(event);

        let choice = session
            .options(&ctx)
            .into_iter()
            .find(|view| view.available)
            .map(|view| view.index);
        match choice {
            Some(index) => {
                let result = session.choose(index, &mut ctx, &self.registry)?;
                Ok(format!("{}: {}", event.id, result.result_key))
            }
            None => Ok(format!("{}: nothing available", event.id)),
        }
    }
}

/// Every third merge produces a status item.
fn merge_status(coordinator: &mut TurnCoordinator, rng: &mut PcgRng) -> Result<()> {
    let stacks = 1 + rng.range_usize(3) as u32;
    if rng.unit() < 0.5 {
        let kind = PLAYER_BUFFS[rng.range_usize(PLAYER_BUFFS.len())];
        coordinator.apply_status(EntityId::PLAYER, kind, stacks)?;
        return Ok(());
    }

    let front = coordinator.battle().enemies.live_ids().first().copied();
    if let Some(enemy) = front {
        let kind = ENEMY_DEBUFFS[rng.range_usize(ENEMY_DEBUFFS.len())];
        coordinator.apply_status(enemy, kind, stacks)?;
    }
    Ok(())
}

fn next_node<'m>(map: &'m StageMap, node: &StageNode, rng: &mut PcgRng) -> Option<&'m StageNode> {
    if node.connections.is_empty() {
        return None;
    }
    let next = node.connections[rng.range_usize(node.connections.len())];
    map.node(next)
}

fn spawn_enemies(node: &StageNode, rng: &mut PcgRng) -> Vec<EnemyState> {
    let depth = node.position.x.max(0) as u32;
    if node.kind == StageKind::Boss {
        let boss = EnemyState::new(
            EntityId(1),
            80 + depth * 4,
            EnemyAttack::new(6 + depth / 2, 2_500),
        )
        .with_reward(Reward::new(50, 20));
        return vec![boss];
    }

    let count = 1 + rng.range_usize(3) as u32;
    (1..=count)
        .map(|id| {
            let health = 12 + depth * 2 + rng.range_usize(8) as u32;
            let damage = 2 + depth / 3;
            let interval = 2_000 + rng.range_usize(1_500) as u64;
            EnemyState::new(EntityId(id), health, EnemyAttack::new(damage, interval))
                .with_reward(Reward::new(5 + depth, 2))
        })
        .collect()
}

fn pick_attack(rng: &mut PcgRng) -> AttackType {
    match rng.range_usize(10) {
        0 => AttackType::All,
        1 => AttackType::Random,
        2 => AttackType::Last,
        _ => AttackType::Normal,
    }
}
