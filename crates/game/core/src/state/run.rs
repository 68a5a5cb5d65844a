use crate::state::{ActorState, Reward};

/// Currency and progress earned during a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wallet {
    pub coins: u32,
    pub experience: u32,
}

impl Wallet {
    pub fn grant(&mut self, reward: Reward) {
        self.coins = self.coins.saturating_add(reward.coins);
        self.experience = self.experience.saturating_add(reward.experience);
    }

    /// Spends coins if the balance covers them. Returns false otherwise.
    pub fn spend(&mut self, coins: u32) -> bool {
        if self.coins < coins {
            return false;
        }
        self.coins -= coins;
        true
    }
}

/// State that outlives a single battle: the player and their wallet.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunState {
    pub player: ActorState,
    pub wallet: Wallet,
    /// Number of stages cleared so far.
    pub stages_cleared: u32,
}

impl RunState {
    pub fn new(player: ActorState) -> Self {
        Self {
            player,
            wallet: Wallet::default(),
            stages_cleared: 0,
        }
    }

    #[must_use]
    pub fn with_coins(mut self, coins: u32) -> Self {
        self.wallet.coins = coins;
        self
    }
}
