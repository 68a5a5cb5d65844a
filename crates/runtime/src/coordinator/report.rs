use merge_core::{
    AttackType, BattleOutcome, DamageResult, DefeatedEnemy, EntityId, Reward, RunState,
    TurnEndReport,
};
use serde::Serialize;

/// One attack, executed or skipped by Freeze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackReport {
    pub attacker: EntityId,
    pub attack_type: AttackType,
    /// Attack value after outgoing modifiers; 0 when frozen.
    pub attack: u32,
    pub frozen: bool,
    pub hits: Vec<DamageResult>,
    /// Enemies this attack removed from the roster.
    pub defeated: Vec<DefeatedEnemy>,
}

impl AttackReport {
    pub(crate) fn frozen(attacker: EntityId, attack_type: AttackType) -> Self {
        Self {
            attacker,
            attack_type,
            attack: 0,
            frozen: true,
            hits: Vec::new(),
            defeated: Vec::new(),
        }
    }
}

/// What one call to `advance` did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Enemy attack windows that opened, in roster order.
    pub attacks: Vec<AttackReport>,
    /// The turn-end cadence elapsed; `resolve_turn_end` should run next.
    pub turn_end_due: bool,
    pub outcome: Option<BattleOutcome>,
}

/// One completed turn-end cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnEndSummary {
    pub cycle: u32,
    /// Committed turn ends in resolution order.
    pub reports: Vec<TurnEndReport>,
    pub defeated: Vec<DefeatedEnemy>,
    pub outcome: Option<BattleOutcome>,
}

impl TurnEndSummary {
    pub fn resolved(&self) -> u32 {
        self.reports.iter().map(|report| report.resolved).sum()
    }
}

/// What `run_for` did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub ticks: u32,
    pub enemy_attacks: u32,
    pub turn_ends: u32,
    pub outcome: Option<BattleOutcome>,
}

/// Final state of a battle, handed back to the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BattleSummary {
    pub outcome: BattleOutcome,
    /// Run state with the player's health and the granted rewards applied.
    pub run: RunState,
    pub defeated: Vec<DefeatedEnemy>,
    pub rewards: Reward,
    pub turn_ends: u32,
}
