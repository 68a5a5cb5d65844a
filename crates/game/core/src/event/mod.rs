//! Stage events: branching choices offered when a map node resolves to an
//! encounter.
//!
//! An event is a description plus an ordered list of options. Each option has
//! an availability check that is evaluated every time the list is queried and
//! an effect that runs registered actions (or a custom closure) against the
//! run state. [`EventSession`] tracks which options one visit consumed.
mod actions;
mod availability;
mod error;
mod session;

pub use actions::{
    ActionArgs, ActionCall, ActionFn, ActionRegistry, CustomEffectFn, OptionEffect,
};
pub use availability::{Availability, AvailabilityFn, Requirement};
pub use error::EventError;
pub use session::{ConsumptionPolicy, EventSession, OptionResult, OptionView};

use crate::state::RunState;
use crate::status::StatusEngine;

/// Everything an option's availability check and effect may touch.
pub struct EventContext<'a> {
    pub run: &'a mut RunState,
    pub engine: StatusEngine<'a>,
}

impl<'a> EventContext<'a> {
    pub fn new(run: &'a mut RunState, engine: StatusEngine<'a>) -> Self {
        Self { run, engine }
    }

    /// Items in the merge arena; zero without an arena.
    pub fn item_count(&self) -> u32 {
        self.engine
            .env()
            .arena()
            .map_or(0, |arena| arena.item_count())
    }
}

/// One choice of a stage event.
#[derive(Clone, Debug, Default)]
pub struct StageEventOption {
    pub description_key: String,
    pub result_key: String,
    pub effect: OptionEffect,
    pub availability: Availability,
    /// Endless options are never consumed.
    pub is_endless: bool,
}

impl StageEventOption {
    pub fn new(description_key: impl Into<String>, result_key: impl Into<String>) -> Self {
        Self {
            description_key: description_key.into(),
            result_key: result_key.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: OptionEffect) -> Self {
        self.effect = effect;
        self
    }

    #[must_use]
    pub fn with_availability(mut self, availability: impl Into<Availability>) -> Self {
        self.availability = availability.into();
        self
    }

    #[must_use]
    pub fn endless(mut self) -> Self {
        self.is_endless = true;
        self
    }
}

/// A branching encounter.
#[derive(Clone, Debug)]
pub struct StageEvent {
    pub id: String,
    pub description_key: String,
    pub options: Vec<StageEventOption>,
    pub policy: ConsumptionPolicy,
}

impl StageEvent {
    pub fn new(id: impl Into<String>, description_key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description_key: description_key.into(),
            options: Vec::new(),
            policy: ConsumptionPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_option(mut self, option: StageEventOption) -> Self {
        self.options.push(option);
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ConsumptionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Checks that every registered action the options name exists.
    ///
    /// # Errors
    ///
    /// Returns `EventError::UnknownAction` for the first missing name.
    pub fn validate(&self, registry: &ActionRegistry) -> Result<(), EventError> {
        for option in &self.options {
            if let Some(name) = option.effect.action_names().find(|name| !registry.contains(name)) {
                return Err(EventError::UnknownAction(name.to_owned()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
