//! Named actions stage event options execute.
//!
//! The registry is an explicit name-to-function table. Content refers to
//! actions by name; a name without an entry fails with
//! [`EventError::UnknownAction`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::state::{Combatant, StatusEffectType};

use super::{EventContext, EventError};

/// Arguments passed to a registered action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionArgs {
    pub amount: u32,
    pub status: Option<StatusEffectType>,
}

impl ActionArgs {
    pub fn amount(amount: u32) -> Self {
        Self {
            amount,
            status: None,
        }
    }

    pub fn status(status: StatusEffectType, stacks: u32) -> Self {
        Self {
            amount: stacks,
            status: Some(status),
        }
    }
}

/// One invocation of a registered action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionCall {
    pub action: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub args: ActionArgs,
}

impl ActionCall {
    pub fn new(action: impl Into<String>, args: ActionArgs) -> Self {
        Self {
            action: action.into(),
            args,
        }
    }
}

pub type ActionFn = fn(&mut EventContext<'_>, &ActionArgs) -> Result<(), EventError>;

pub type CustomEffectFn = Arc<dyn Fn(&mut EventContext<'_>) -> Result<(), EventError> + Send + Sync>;

/// What choosing an option does.
#[derive(Clone, Default)]
pub enum OptionEffect {
    /// Closes the dialogue without changing anything.
    #[default]
    Nothing,
    /// Registered actions, run in order.
    Actions(Vec<ActionCall>),
    Custom(CustomEffectFn),
}

impl OptionEffect {
    pub fn action(action: impl Into<String>, args: ActionArgs) -> Self {
        Self::Actions(vec![ActionCall::new(action, args)])
    }

    pub fn custom(
        effect: impl Fn(&mut EventContext<'_>) -> Result<(), EventError> + Send + Sync + 'static,
    ) -> Self {
        Self::Custom(Arc::new(effect))
    }

    /// Runs the effect against `ctx`.
    ///
    /// # Errors
    ///
    /// Returns the first action error. Earlier actions stay applied to `ctx`.
    pub fn apply(
        &self,
        ctx: &mut EventContext<'_>,
        registry: &ActionRegistry,
    ) -> Result<(), EventError> {
        match self {
            Self::Nothing => Ok(()),
            Self::Actions(calls) => calls
                .iter()
                .try_for_each(|call| registry.execute(&call.action, ctx, &call.args)),
            Self::Custom(effect) => effect(ctx),
        }
    }

    /// Names of registered actions this effect calls.
    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        let calls: &[ActionCall] = match self {
            Self::Actions(calls) => calls,
            _ => &[],
        };
        calls.iter().map(|call| call.action.as_str())
    }
}

impl fmt::Debug for OptionEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nothing => f.write_str("Nothing"),
            Self::Actions(calls) => f.debug_tuple("Actions").field(calls).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Name-to-function table of event actions.
#[derive(Clone, Default)]
pub struct ActionRegistry {
    actions: HashMap<&'static str, ActionFn>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in action.
    pub fn standard() -> Self {
        let table: [(&'static str, ActionFn); 8] = [
            ("gain_coins", gain_coins),
            ("spend_coins", spend_coins),
            ("heal", heal),
            ("lose_health", lose_health),
            ("gain_max_health", gain_max_health),
            ("gain_experience", gain_experience),
            ("add_status", add_status),
            ("remove_items", remove_items),
        ];
        Self {
            actions: table.into_iter().collect(),
        }
    }

    /// Registers `action` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: &'static str, action: ActionFn) -> &mut Self {
        if self.actions.insert(name, action).is_some() {
            tracing::debug!(target: "core::event", name, "action replaced");
        }
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Sorted names of the registered actions.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.actions.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Runs the action registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns `EventError::UnknownAction` for an unregistered name, or the
    /// action's own error.
    pub fn execute(
        &self,
        name: &str,
        ctx: &mut EventContext<'_>,
        args: &ActionArgs,
    ) -> Result<(), EventError> {
        let action = self
            .actions
            .get(name)
            .ok_or_else(|| EventError::UnknownAction(name.to_owned()))?;
        tracing::trace!(target: "core::event", name, ?args, "executing action");
        action(ctx, args)
    }
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.names())
            .finish()
    }
}

// ============================================================================
// Built-in actions
// ============================================================================

fn gain_coins(ctx: &mut EventContext<'_>, args: &ActionArgs) -> Result<(), EventError> {
    ctx.run.wallet.coins = ctx.run.wallet.coins.saturating_add(args.amount);
    Ok(())
}

fn spend_coins(ctx: &mut EventContext<'_>, args: &ActionArgs) -> Result<(), EventError> {
    let available = ctx.run.wallet.coins;
    if !ctx.run.wallet.spend(args.amount) {
        return Err(EventError::InsufficientCoins {
            required: args.amount,
            available,
        });
    }
    Ok(())
}

fn heal(ctx: &mut EventContext<'_>, args: &ActionArgs) -> Result<(), EventError> {
    ctx.engine.heal(&mut ctx.run.player, args.amount);
    Ok(())
}

fn lose_health(ctx: &mut EventContext<'_>, args: &ActionArgs) -> Result<(), EventError> {
    ctx.run.player.take_damage(args.amount);
    Ok(())
}

fn gain_max_health(ctx: &mut EventContext<'_>, args: &ActionArgs) -> Result<(), EventError> {
    let health = &mut ctx.run.player.health;
    health.maximum = health.maximum.saturating_add(args.amount);
    health.restore(args.amount);
    Ok(())
}

fn gain_experience(ctx: &mut EventContext<'_>, args: &ActionArgs) -> Result<(), EventError> {
    ctx.run.wallet.experience = ctx.run.wallet.experience.saturating_add(args.amount);
    Ok(())
}

fn add_status(ctx: &mut EventContext<'_>, args: &ActionArgs) -> Result<(), EventError> {
    let kind = args.status.ok_or_else(|| EventError::MissingArgument {
        action: "add_status".to_owned(),
        argument: "status",
    })?;
    ctx.engine.add_status(&mut ctx.run.player, kind, args.amount);
    Ok(())
}

fn remove_items(ctx: &mut EventContext<'_>, args: &ActionArgs) -> Result<(), EventError> {
    let Some(arena) = ctx.engine.env().arena() else {
        tracing::debug!(target: "core::event", "no merge arena; remove_items skipped");
        return Ok(());
    };
    for _ in 0..args.amount {
        if !arena.remove_random_item() {
            break;
        }
    }
    Ok(())
}
