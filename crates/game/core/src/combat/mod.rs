//! Combat vocabulary shared by the status engine and the turn coordinator.
//!
//! - `AttackType`: tags outgoing attacks and picks their targets
//! - `DamageResult`: what one hit did after modifiers
//!
//! Damage itself is applied through [`crate::status::StatusEngine::deal_damage`]
//! so incoming modifiers always run first.

pub mod attack;
pub mod damage;

pub use attack::{AttackType, Targets};
pub use damage::{DamageResult, HealResult};
