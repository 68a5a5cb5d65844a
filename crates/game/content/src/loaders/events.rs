//! Stage event loader.
//!
//! Events are stored as plain data: options name registered actions and
//! data-driven requirements. Custom predicates and effects can only be built
//! in code.

use std::path::Path;

use merge_core::{
    ActionCall, ActionRegistry, Availability, ConsumptionPolicy, OptionEffect, Requirement,
    StageEvent, StageEventOption,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

const EMBEDDED: &str = include_str!("../../data/events.ron");

/// One option as written in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionDef {
    pub description: String,
    pub result: String,
    #[serde(default)]
    pub requirement: Option<Requirement>,
    #[serde(default)]
    pub actions: Vec<ActionCall>,
    #[serde(default)]
    pub endless: bool,
}

impl OptionDef {
    fn into_option(self) -> StageEventOption {
        let effect = if self.actions.is_empty() {
            OptionEffect::Nothing
        } else {
            OptionEffect::Actions(self.actions)
        };
        let availability = self
            .requirement
            .map_or(Availability::Always, Availability::Requirement);

        let option = StageEventOption::new(self.description, self.result)
            .with_effect(effect)
            .with_availability(availability);
        if self.endless { option.endless() } else { option }
    }
}

/// One event as written in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDef {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub policy: ConsumptionPolicy,
    pub options: Vec<OptionDef>,
}

impl EventDef {
    pub fn into_event(self) -> StageEvent {
        let event = StageEvent::new(self.id, self.description).with_policy(self.policy);
        self.options
            .into_iter()
            .fold(event, |event, option| event.with_option(option.into_option()))
    }
}

/// Event catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCatalog {
    pub events: Vec<EventDef>,
}

/// Loader for stage events.
pub struct EventLoader;

impl EventLoader {
    /// Loads events and checks every action name against `registry`.
    pub fn load(path: &Path, registry: &ActionRegistry) -> LoadResult<Vec<StageEvent>> {
        let content = read_file(path)?;
        Self::parse(&content, registry)
            .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", path.display(), e))
    }

    pub fn parse(content: &str, registry: &ActionRegistry) -> LoadResult<Vec<StageEvent>> {
        let catalog: EventCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse event catalog RON: {}", e))?;

        let events: Vec<StageEvent> = catalog.events.into_iter().map(EventDef::into_event).collect();
        for event in &events {
            event
                .validate(registry)
                .map_err(|e| anyhow::anyhow!("Invalid event '{}': {}", event.id, e))?;
        }
        Ok(events)
    }

    pub fn embedded(registry: &ActionRegistry) -> LoadResult<Vec<StageEvent>> {
        Self::parse(EMBEDDED, registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_events_use_registered_actions() {
        let events = EventLoader::embedded(&ActionRegistry::standard()).unwrap();
        let ids: Vec<&str> = events.iter().map(|event| event.id.as_str()).collect();
        assert_eq!(ids, vec!["shrine", "campfire", "peddler"]);

        let peddler = &events[2];
        assert_eq!(peddler.policy, ConsumptionPolicy::Repeatable);
        assert!(peddler.options[2].is_endless);
    }

    #[test]
    fn unknown_action_fails_the_load() {
        let content = r#"(events: [(
            id: "bad",
            description: "bad",
            options: [(description: "a", result: "b", actions: [(action: "teleport")])],
        )])"#;
        let err = EventLoader::parse(content, &ActionRegistry::standard()).unwrap_err();
        assert!(err.to_string().contains("teleport"));
    }

    #[test]
    fn empty_actions_close_the_dialogue() {
        let content = r#"(events: [(
            id: "quiet",
            description: "quiet",
            options: [(description: "a", result: "b")],
        )])"#;
        let events = EventLoader::parse(content, &ActionRegistry::standard()).unwrap();
        assert!(matches!(events[0].options[0].effect, OptionEffect::Nothing));
        assert!(matches!(events[0].options[0].availability, Availability::Always));
    }
}
