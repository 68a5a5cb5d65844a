use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU32, Ordering};

use super::{ActionRegistry, EventContext, EventError, StageEvent};
use crate::env::{CombatEnv, MergeArena};
use crate::status::StatusEngine;

/// How non-endless options are consumed within one visit of an event.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ConsumptionPolicy {
    /// A chosen option disappears until the next visit.
    #[default]
    OneShotPerVisit,
    /// Every option stays selectable.
    Repeatable,
}

/// One row of the option list as it should be shown right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionView<'e> {
    pub index: usize,
    pub description_key: &'e str,
    pub available: bool,
    pub is_endless: bool,
}

/// Outcome of a successfully chosen option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionResult<'e> {
    pub index: usize,
    pub result_key: &'e str,
    /// Whether the option is gone for the rest of the visit.
    pub consumed: bool,
}

/// One visit of a stage event: tracks which options were consumed.
#[derive(Clone, Debug)]
pub struct EventSession<'e> {
    event: &'e StageEvent,
    consumed: BTreeSet<usize>,
}

impl<'e> EventSession<'e> {
    pub fn new(event: &'e StageEvent) -> Self {
        Self {
            event,
            consumed: BTreeSet::new(),
        }
    }

    pub fn event(&self) -> &'e StageEvent {
        self.event
    }

    pub fn is_consumed(&self, index: usize) -> bool {
        self.consumed.contains(&index)
    }

    /// Options still presented, with availability evaluated against `ctx`.
    pub fn options(&self, ctx: &EventContext<'_>) -> Vec<OptionView<'e>> {
        self.event
            .options
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.is_consumed(*index))
            .map(|(index, option)| OptionView {
                index,
                description_key: option.description_key.as_str(),
                available: option.availability.is_available(ctx),
                is_endless: option.is_endless,
            })
            .collect()
    }

    /// Executes option `index`.
    ///
    /// The effect first runs as a rehearsal: against a copy of the run state,
    /// with the merge arena replaced by a counting stand-in and no
    /// presentation collaborators. Only when the rehearsal succeeds does the
    /// effect run for real, so a failing action leaves the run state and the
    /// arena untouched. Custom effects therefore run twice and must only
    /// change state through their context.
    ///
    /// # Errors
    ///
    /// Fails for an out-of-range, consumed or unavailable option, or with the
    /// effect's own error.
    pub fn choose(
        &mut self,
        index: usize,
        ctx: &mut EventContext<'_>,
        registry: &ActionRegistry,
    ) -> Result<OptionResult<'e>, EventError> {
        let event = self.event;
        let option = event.options.get(index).ok_or(EventError::OptionOutOfRange {
            index,
            len: event.options.len(),
        })?;
        if self.is_consumed(index) {
            return Err(EventError::OptionConsumed(index));
        }
        if !option.availability.is_available(ctx) {
            return Err(EventError::OptionUnavailable(index));
        }

        rehearse(ctx, |staged| option.effect.apply(staged, registry))?;

        let mut staged_run = ctx.run.clone();
        let mut staged = EventContext::new(&mut staged_run, ctx.engine);
        option.effect.apply(&mut staged, registry)?;
        *ctx.run = staged_run;

        let consumed = event.policy == ConsumptionPolicy::OneShotPerVisit && !option.is_endless;
        if consumed {
            self.consumed.insert(index);
        }
        tracing::debug!(
            target: "core::event",
            event = %event.id,
            index,
            consumed,
            "event option chosen"
        );
        Ok(OptionResult {
            index,
            result_key: option.result_key.as_str(),
            consumed,
        })
    }

    /// Starts a new visit: every option is presented again.
    pub fn reset(&mut self) {
        self.consumed.clear();
    }
}

/// Runs `effect` against a detached copy of `ctx`.
///
/// The copy keeps the catalogs and sees the real arena's item count, but
/// removals and spawned objects only touch a local tally.
fn rehearse(
    ctx: &EventContext<'_>,
    effect: impl FnOnce(&mut EventContext<'_>) -> Result<(), EventError>,
) -> Result<(), EventError> {
    let live = ctx.engine.env();
    let arena = live.arena().map(RehearsalArena::new);

    let mut env = CombatEnv::empty();
    if let Ok(statuses) = live.statuses() {
        env = env.with_statuses(statuses);
    }
    if let Ok(stages) = live.stages() {
        env = env.with_stages(stages);
    }
    if let Some(arena) = &arena {
        env = env.with_arena(arena);
    }

    let mut run = ctx.run.clone();
    let mut staged = EventContext::new(&mut run, StatusEngine::new(env, ctx.engine.config()));
    effect(&mut staged)
}

/// Arena view that counts removals instead of performing them.
struct RehearsalArena<'a> {
    live: &'a dyn MergeArena,
    removed: AtomicU32,
}

impl<'a> RehearsalArena<'a> {
    fn new(live: &'a dyn MergeArena) -> Self {
        Self {
            live,
            removed: AtomicU32::new(0),
        }
    }
}

impl MergeArena for RehearsalArena<'_> {
    fn remove_random_item(&self) -> bool {
        if self.item_count() == 0 {
            return false;
        }
        self.removed.fetch_add(1, Ordering::Relaxed);
        true
    }

    fn spawn_disturbance_object(&self) {}

    fn item_count(&self) -> u32 {
        self.live
            .item_count()
            .saturating_sub(self.removed.load(Ordering::Relaxed))
    }
}
