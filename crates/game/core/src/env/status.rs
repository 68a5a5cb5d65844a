//! Status effect catalog: the static data each effect kind is resolved with.

use crate::state::StatusEffectType;

/// Trigger point at which an effect participates in resolution.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusTiming {
    /// Fires during turn-end resolution.
    OnTurnEnd,
    /// Modifies damage the holder receives.
    OnDamage,
    /// Modifies attacks the holder makes.
    OnAttack,
    /// Fires once when the battle ends, after the stacks are cleared.
    OnBattleEnd,
}

/// Immutable catalog entry for one effect kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffectData {
    pub kind: StatusEffectType,
    pub timing: StatusTiming,
    /// Permanent effects are excluded from turn-end decay.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_permanent: bool,
    /// Sound played when the effect triggers. `None` or empty plays nothing.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sound: Option<String>,
}

impl StatusEffectData {
    pub fn new(kind: StatusEffectType, timing: StatusTiming) -> Self {
        Self {
            kind,
            timing,
            is_permanent: false,
            sound: None,
        }
    }

    #[must_use]
    pub fn permanent(mut self) -> Self {
        self.is_permanent = true;
        self
    }

    #[must_use]
    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = Some(sound.into());
        self
    }

    /// Sound identifier, if a non-empty one is set.
    pub fn sound_id(&self) -> Option<&str> {
        self.sound.as_deref().filter(|id| !id.is_empty())
    }
}

/// Read-only lookup of status effect data.
///
/// A kind without an entry is treated as an effect that never triggers but
/// still decays every turn.
pub trait StatusCatalog: Send + Sync {
    fn status(&self, kind: StatusEffectType) -> Option<StatusEffectData>;

    fn timing(&self, kind: StatusEffectType) -> Option<StatusTiming> {
        self.status(kind).map(|data| data.timing)
    }

    /// Unknown kinds count as non-permanent.
    fn is_permanent(&self, kind: StatusEffectType) -> bool {
        self.status(kind).is_some_and(|data| data.is_permanent)
    }
}
