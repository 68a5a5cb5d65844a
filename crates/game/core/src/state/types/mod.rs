pub mod actor;
pub mod common;
pub mod enemy;
pub mod status;

pub use actor::{ActorState, Combatant, Side};
pub use common::{EntityId, Position, ResourceMeter};
pub use enemy::{EnemyAttack, EnemyState, Reward};
pub use status::{StatusEffectType, StatusSnapshot, StatusStacks};
