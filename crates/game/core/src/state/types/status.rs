//! Status effect stacks carried by combatants.
//!
//! Every combatant owns a [`StatusStacks`] map from effect type to a positive
//! stack count. The map never stores a zero entry: removing the last stack
//! deletes the key.
//!
//! # Resolution order
//!
//! Entries iterate in [`StatusEffectType`] declaration order. Damage and
//! attack modifiers are applied in that order, so the declaration order is the
//! tie-break between simultaneous effects: Invincible resolves before Shield,
//! and Power (additive) before Rage (multiplicative).

use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::config::GameConfig;

/// Kinds of status effects.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatusEffectType {
    // ========================================================================
    // Turn-end effects
    // ========================================================================
    /// Deals its stack count as damage to the bearer.
    Burn,

    /// Heals the bearer by its stack count.
    Regeneration,

    /// Enemy only: damages every enemy by its stack count.
    Shock,

    /// Player only: spawns disturbance objects into the merge arena.
    Curse,

    /// Player only: destroys random inventory items.
    Decay,

    // ========================================================================
    // Incoming damage modifiers
    // ========================================================================
    /// Nullifies all incoming damage.
    Invincible,

    /// Absorbs incoming damage, one stack per point.
    Shield,

    // ========================================================================
    // Outgoing attack modifiers
    // ========================================================================
    /// Adds its stack count to normal attacks.
    Power,

    /// Multiplies every attack by `1 + bonus * stacks`, rounding halves away
    /// from zero (`3 * 1.5` gives 5, not 4).
    Rage,

    // ========================================================================
    // Checks
    // ========================================================================
    /// Chance to skip the bearer's attack.
    Freeze,

    /// Scrambles merge-cursor input for the bearer.
    Confusion,
}

/// Copy of a stack map taken before iterating it.
pub type StatusSnapshot = ArrayVec<(StatusEffectType, u32), { GameConfig::MAX_STATUS_KINDS }>;

/// Active status stacks on a combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusStacks {
    entries: BTreeMap<StatusEffectType, u32>,
}

impl StatusStacks {
    /// Creates an empty stack map.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Builds a stack map from `(kind, stacks)` pairs, summing duplicates and
    /// dropping zero counts.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (StatusEffectType, u32)>) -> Self {
        let mut stacks = Self::new();
        for (kind, count) in pairs {
            stacks.add(kind, count);
        }
        stacks
    }

    /// Current stack count, `0` when the effect is absent.
    pub fn get(&self, kind: StatusEffectType) -> u32 {
        self.entries.get(&kind).copied().unwrap_or(0)
    }

    pub fn contains(&self, kind: StatusEffectType) -> bool {
        self.entries.contains_key(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Adds stacks, inserting the effect if absent.
    ///
    /// Adding zero stacks is a no-op. Returns the resulting count.
    pub fn add(&mut self, kind: StatusEffectType, stacks: u32) -> u32 {
        if stacks == 0 {
            return self.get(kind);
        }
        let entry = self.entries.entry(kind).or_insert(0);
        *entry = entry.saturating_add(stacks);
        *entry
    }

    /// Removes stacks, deleting the entry once it reaches zero.
    ///
    /// Returns the remaining count (`0` when the entry is gone or was absent).
    pub fn remove(&mut self, kind: StatusEffectType, stacks: u32) -> u32 {
        let Some(current) = self.entries.get_mut(&kind) else {
            return 0;
        };
        *current = current.saturating_sub(stacks);
        let remaining = *current;
        if remaining == 0 {
            self.entries.remove(&kind);
        }
        remaining
    }

    /// Removes an effect entirely, returning its previous count.
    pub fn remove_all(&mut self, kind: StatusEffectType) -> u32 {
        self.entries.remove(&kind).unwrap_or(0)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates entries in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = (StatusEffectType, u32)> + '_ {
        self.entries.iter().map(|(kind, stacks)| (*kind, *stacks))
    }

    /// Copies the current entries so callers can mutate the map while walking
    /// the copy.
    pub fn snapshot(&self) -> StatusSnapshot {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn add_inserts_then_accumulates() {
        let mut stacks = StatusStacks::new();
        assert_eq!(stacks.add(StatusEffectType::Burn, 3), 3);
        assert_eq!(stacks.add(StatusEffectType::Burn, 2), 5);
        assert_eq!(stacks.len(), 1);
    }

    #[test]
    fn add_zero_does_not_create_entry() {
        let mut stacks = StatusStacks::new();
        stacks.add(StatusEffectType::Shield, 0);
        assert!(!stacks.contains(StatusEffectType::Shield));
    }

    #[test]
    fn remove_to_zero_deletes_entry() {
        let mut stacks = StatusStacks::from_pairs([(StatusEffectType::Shield, 5)]);
        assert_eq!(stacks.remove(StatusEffectType::Shield, 2), 3);
        assert_eq!(stacks.remove(StatusEffectType::Shield, 10), 0);
        assert!(stacks.is_empty());
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut stacks = StatusStacks::new();
        assert_eq!(stacks.remove(StatusEffectType::Rage, 1), 0);
        assert!(stacks.is_empty());
    }

    #[test]
    fn iteration_follows_declaration_order() {
        let stacks = StatusStacks::from_pairs([
            (StatusEffectType::Rage, 1),
            (StatusEffectType::Shield, 1),
            (StatusEffectType::Power, 1),
            (StatusEffectType::Invincible, 1),
        ]);
        let kinds: Vec<_> = stacks.iter().map(|(kind, _)| kind).collect();
        assert_eq!(
            kinds,
            vec![
                StatusEffectType::Invincible,
                StatusEffectType::Shield,
                StatusEffectType::Power,
                StatusEffectType::Rage,
            ]
        );
    }

    #[test]
    fn snapshot_holds_every_kind() {
        assert_eq!(StatusEffectType::COUNT, GameConfig::MAX_STATUS_KINDS);
        let stacks = StatusStacks::from_pairs(StatusEffectType::iter().map(|kind| (kind, 1)));
        assert_eq!(stacks.snapshot().len(), GameConfig::MAX_STATUS_KINDS);
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!(
            "Regeneration".parse::<StatusEffectType>(),
            Ok(StatusEffectType::Regeneration)
        );
        assert_eq!(StatusEffectType::Invincible.to_string(), "invincible");
    }

    fn kind_strategy() -> impl Strategy<Value = StatusEffectType> {
        (0..StatusEffectType::COUNT)
            .prop_map(|index| StatusEffectType::iter().nth(index).unwrap_or(StatusEffectType::Burn))
    }

    proptest! {
        #[test]
        fn stored_counts_are_always_positive(
            ops in prop::collection::vec((any::<bool>(), kind_strategy(), 0u32..6), 0..64)
        ) {
            let mut stacks = StatusStacks::new();
            for (is_add, kind, amount) in ops {
                if is_add {
                    stacks.add(kind, amount);
                } else {
                    stacks.remove(kind, amount);
                }
                for (_, count) in stacks.iter() {
                    prop_assert!(count > 0);
                }
            }
        }
    }
}
