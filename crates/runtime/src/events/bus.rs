//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::CombatEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Attacks, skipped attacks and defeats
    Combat,
    /// Turn-end effects
    Status,
    /// Battle lifecycle
    Battle,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Combat, Topic::Status, Topic::Battle];
}

impl CombatEvent {
    pub fn topic(&self) -> Topic {
        match self {
            CombatEvent::DamageDealt { .. }
            | CombatEvent::AttackSkipped { .. }
            | CombatEvent::EnemyDefeated { .. } => Topic::Combat,
            CombatEvent::StatusTriggered { .. } | CombatEvent::TurnEndCompleted { .. } => {
                Topic::Status
            }
            CombatEvent::BattleEnded { .. } => Topic::Battle,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks; events nobody listens to
/// are dropped.
#[derive(Debug, Clone)]
pub struct EventBus {
    channels: Arc<HashMap<Topic, broadcast::Sender<CombatEvent>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let channels = Topic::ALL
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity.max(1)).0))
            .collect();

        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: CombatEvent) {
        let topic = event.topic();
        if let Some(tx) = self.channels.get(&topic) {
            if tx.send(event).is_err() {
                // No subscribers for this topic - this is normal, not an error
                tracing::trace!(target: "runtime::events", ?topic, "no subscribers");
            }
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<CombatEvent> {
        match self.channels.get(&topic) {
            Some(tx) => tx.subscribe(),
            // Every topic is created up front; this arm only keeps the
            // signature infallible.
            None => broadcast::channel(1).1,
        }
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<CombatEvent>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use merge_core::{BattleOutcome, EntityId};

    #[tokio::test]
    async fn events_reach_only_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut combat = bus.subscribe(Topic::Combat);
        let mut battle = bus.subscribe(Topic::Battle);

        bus.publish(CombatEvent::AttackSkipped {
            entity: EntityId(1),
        });
        bus.publish(CombatEvent::BattleEnded {
            outcome: BattleOutcome::Victory,
        });

        assert_eq!(
            combat.recv().await.unwrap(),
            CombatEvent::AttackSkipped {
                entity: EntityId(1)
            }
        );
        assert_eq!(
            battle.recv().await.unwrap(),
            CombatEvent::BattleEnded {
                outcome: BattleOutcome::Victory
            }
        );
        assert!(combat.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.publish(CombatEvent::TurnEndCompleted {
            cycle: 1,
            resolved: 0,
        });
    }
}
