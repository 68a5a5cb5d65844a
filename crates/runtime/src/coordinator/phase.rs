use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

use crate::api::{Result, RuntimeError};

/// Where a battle is in its cycle.
///
/// `Idle → PlayerTurnWindow → TurnEndResolution → PlayerTurnWindow …`, until
/// one side falls or the battle is abandoned, which moves it to `Ended`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattlePhase {
    #[default]
    Idle,
    /// Player merges and enemy attack timers run.
    PlayerTurnWindow,
    /// Turn ends are resolving; attacks wait until they complete.
    TurnEndResolution,
    Ended,
}

impl BattlePhase {
    /// Fails unless attacks and timers may run.
    pub(crate) fn ensure_active(self) -> Result<()> {
        match self {
            BattlePhase::PlayerTurnWindow => Ok(()),
            BattlePhase::Idle => Err(RuntimeError::NotStarted),
            BattlePhase::TurnEndResolution => Err(RuntimeError::TurnEndInProgress),
            BattlePhase::Ended => Err(RuntimeError::BattleEnded),
        }
    }
}

impl fmt::Display for BattlePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BattlePhase::Idle => "idle",
            BattlePhase::PlayerTurnWindow => "player_turn_window",
            BattlePhase::TurnEndResolution => "turn_end_resolution",
            BattlePhase::Ended => "ended",
        };
        write!(f, "{}", label)
    }
}

/// Abandons a battle from outside the coordinator (scene transition, retreat).
///
/// A turn end in flight stops before its next effect; the entity being
/// resolved keeps the effects that already fired but does not decay.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub(crate) fn new() -> Self {
        Self {
            tx: Arc::new(watch::channel(false).0),
        }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
        tracing::debug!(target: "runtime::coordinator", "battle cancellation requested");
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}
