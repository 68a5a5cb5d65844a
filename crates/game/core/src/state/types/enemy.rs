use super::{ActorState, Combatant, EntityId, Position, Side, StatusStacks};
use crate::combat::AttackType;

/// Timed attack an enemy performs against the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyAttack {
    /// Base damage before outgoing modifiers.
    pub damage: u32,
    pub attack_type: AttackType,
    /// Cooldown between two attacks, in milliseconds.
    pub interval_ms: u64,
}

impl EnemyAttack {
    pub const fn new(damage: u32, interval_ms: u64) -> Self {
        Self {
            damage,
            attack_type: AttackType::Normal,
            interval_ms,
        }
    }

    #[must_use]
    pub const fn with_attack_type(mut self, attack_type: AttackType) -> Self {
        self.attack_type = attack_type;
        self
    }
}

/// Coins and experience granted when an enemy is defeated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reward {
    pub coins: u32,
    pub experience: u32,
}

impl Reward {
    pub const fn new(coins: u32, experience: u32) -> Self {
        Self { coins, experience }
    }
}

impl core::ops::Add for Reward {
    type Output = Reward;

    fn add(self, rhs: Reward) -> Reward {
        Reward {
            coins: self.coins.saturating_add(rhs.coins),
            experience: self.experience.saturating_add(rhs.experience),
        }
    }
}

impl core::ops::AddAssign for Reward {
    fn add_assign(&mut self, rhs: Reward) {
        *self = *self + rhs;
    }
}

/// An enemy: a fighter plus its attack timer and bounty.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyState {
    pub fighter: ActorState,
    pub attack: EnemyAttack,
    /// Time accumulated since the last attack window opened.
    pub elapsed_ms: u64,
    pub reward: Reward,
}

impl EnemyState {
    pub fn new(id: EntityId, max_health: u32, attack: EnemyAttack) -> Self {
        Self {
            fighter: ActorState::enemy(id, max_health),
            attack,
            elapsed_ms: 0,
            reward: Reward::default(),
        }
    }

    #[must_use]
    pub fn with_reward(mut self, reward: Reward) -> Self {
        self.reward = reward;
        self
    }

    #[must_use]
    pub fn with_anchor(mut self, anchor: Position) -> Self {
        self.fighter.anchor = anchor;
        self
    }

    /// Advances the attack timer. Returns true when an attack window opens.
    ///
    /// Time past the interval carries into the next window, so coarse steps
    /// keep the average attack period. A step spanning several intervals
    /// still opens a single window.
    pub fn tick_attack_timer(&mut self, elapsed_ms: u64) -> bool {
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        let interval = self.attack.interval_ms;
        if self.elapsed_ms < interval {
            return false;
        }
        self.elapsed_ms = self.elapsed_ms.checked_rem(interval).unwrap_or(0);
        true
    }
}

impl Combatant for EnemyState {
    fn id(&self) -> EntityId {
        self.fighter.id
    }

    fn side(&self) -> Side {
        Side::Enemy
    }

    fn health(&self) -> u32 {
        self.fighter.health()
    }

    fn max_health(&self) -> u32 {
        self.fighter.max_health()
    }

    fn anchor(&self) -> Position {
        self.fighter.anchor
    }

    fn take_damage(&mut self, amount: u32) -> u32 {
        self.fighter.take_damage(amount)
    }

    fn heal(&mut self, amount: u32) -> u32 {
        self.fighter.heal(amount)
    }

    fn statuses(&self) -> &StatusStacks {
        &self.fighter.statuses
    }

    fn statuses_mut(&mut self) -> &mut StatusStacks {
        &mut self.fighter.statuses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attack_timer_opens_once_per_interval() {
        let mut enemy = EnemyState::new(EntityId(1), 20, EnemyAttack::new(3, 1_000));
        assert!(!enemy.tick_attack_timer(400));
        assert!(!enemy.tick_attack_timer(500));
        assert!(enemy.tick_attack_timer(100));
        assert_eq!(enemy.elapsed_ms, 0);
    }

    #[test]
    fn attack_timer_carries_overshoot() {
        let mut enemy = EnemyState::new(EntityId(1), 20, EnemyAttack::new(3, 1_000));
        let opened: Vec<u32> = (1..=10)
            .filter(|_| enemy.tick_attack_timer(300))
            .collect();
        assert_eq!(opened, vec![4, 7, 10]);
        assert_eq!(enemy.elapsed_ms, 0);

        assert!(enemy.tick_attack_timer(2_500));
        assert_eq!(enemy.elapsed_ms, 500);
    }

    #[test]
    fn zero_interval_opens_every_tick() {
        let mut enemy = EnemyState::new(EntityId(1), 20, EnemyAttack::new(3, 0));
        assert!(enemy.tick_attack_timer(0));
        assert!(enemy.tick_attack_timer(7));
        assert_eq!(enemy.elapsed_ms, 0);
    }

    #[test]
    fn rewards_sum() {
        let mut total = Reward::new(3, 10);
        total += Reward::new(2, 5);
        assert_eq!(total, Reward::new(5, 15));
    }
}
