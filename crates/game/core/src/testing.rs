//! Collaborator fakes shared by the unit tests.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::env::{
    AudioSink, MapRenderer, MergeArena, RandomSource, StageCatalog, StageData, StatusCatalog,
    StatusEffectData, StatusPresenter, StatusTiming,
};
use crate::map::RenderHandle;
use crate::state::{EntityId, Position, StatusEffectType, StatusStacks};

pub(crate) struct TestCatalog {
    entries: BTreeMap<StatusEffectType, StatusEffectData>,
}

impl TestCatalog {
    /// Every kind with its usual timing, nothing permanent.
    pub(crate) fn standard() -> Self {
        use StatusEffectType::*;
        let timings = [
            (Burn, StatusTiming::OnTurnEnd),
            (Regeneration, StatusTiming::OnTurnEnd),
            (Shock, StatusTiming::OnTurnEnd),
            (Curse, StatusTiming::OnTurnEnd),
            (Decay, StatusTiming::OnTurnEnd),
            (Invincible, StatusTiming::OnDamage),
            (Shield, StatusTiming::OnDamage),
            (Power, StatusTiming::OnAttack),
            (Rage, StatusTiming::OnAttack),
            (Freeze, StatusTiming::OnAttack),
            (Confusion, StatusTiming::OnAttack),
        ];
        Self {
            entries: timings
                .into_iter()
                .map(|(kind, timing)| (kind, StatusEffectData::new(kind, timing)))
                .collect(),
        }
    }

    pub(crate) fn with(mut self, data: StatusEffectData) -> Self {
        self.entries.insert(data.kind, data);
        self
    }

    pub(crate) fn without(mut self, kind: StatusEffectType) -> Self {
        self.entries.remove(&kind);
        self
    }
}

impl StatusCatalog for TestCatalog {
    fn status(&self, kind: StatusEffectType) -> Option<StatusEffectData> {
        self.entries.get(&kind).cloned()
    }
}

pub(crate) struct TestStages(pub(crate) Vec<StageData>);

impl StageCatalog for TestStages {
    fn stages(&self) -> Vec<StageData> {
        self.0.clone()
    }
}

#[derive(Default)]
pub(crate) struct RecordingPresenter {
    pub(crate) texts: Mutex<Vec<(StatusEffectType, Position, bool, u32)>>,
    pub(crate) refreshes: Mutex<Vec<EntityId>>,
}

impl RecordingPresenter {
    pub(crate) fn texts(&self) -> Vec<(StatusEffectType, Position, bool, u32)> {
        self.texts.lock().unwrap().clone()
    }

    pub(crate) fn refresh_count(&self) -> usize {
        self.refreshes.lock().unwrap().len()
    }
}

impl StatusPresenter for RecordingPresenter {
    fn show_effect_text(
        &self,
        kind: StatusEffectType,
        position: Position,
        is_player: bool,
        priority: u32,
    ) {
        self.texts
            .lock()
            .unwrap()
            .push((kind, position, is_player, priority));
    }

    fn update_status_ui(&self, entity: EntityId, _stacks: &StatusStacks) {
        self.refreshes.lock().unwrap().push(entity);
    }
}

#[derive(Default)]
pub(crate) struct RecordingAudio {
    pub(crate) sounds: Mutex<Vec<String>>,
}

impl AudioSink for RecordingAudio {
    fn play_sound_effect(&self, sound_id: &str) {
        self.sounds.lock().unwrap().push(sound_id.to_owned());
    }
}

#[derive(Default)]
pub(crate) struct FakeArena {
    pub(crate) items: AtomicU32,
    pub(crate) disturbances: AtomicU32,
}

impl FakeArena {
    pub(crate) fn with_items(items: u32) -> Self {
        Self {
            items: AtomicU32::new(items),
            disturbances: AtomicU32::new(0),
        }
    }
}

impl MergeArena for FakeArena {
    fn remove_random_item(&self) -> bool {
        self.items
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    fn spawn_disturbance_object(&self) {
        self.disturbances.fetch_add(1, Ordering::SeqCst);
    }

    fn item_count(&self) -> u32 {
        self.items.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub(crate) struct RecordingRenderer {
    pub(crate) released: Mutex<Vec<RenderHandle>>,
}

impl MapRenderer for RecordingRenderer {
    fn release(&self, handle: RenderHandle) {
        self.released.lock().unwrap().push(handle);
    }
}

/// Returns the same raw value forever.
pub(crate) struct FixedRng(pub(crate) u32);

impl FixedRng {
    /// `unit()` is 0.0.
    pub(crate) fn low() -> Self {
        Self(0)
    }

    /// `unit()` is just below 1.0.
    pub(crate) fn high() -> Self {
        Self(u32::MAX)
    }
}

impl RandomSource for FixedRng {
    fn next_u32(&mut self) -> u32 {
        self.0
    }
}
