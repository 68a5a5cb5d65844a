//! Attack kinds and enemy targeting.

use crate::env::RandomSource;
use crate::state::{EntityId, RosterSnapshot};

/// Kind of an outgoing attack.
///
/// Effects may discriminate by kind: Power only boosts `Normal` attacks.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AttackType {
    /// Hits the front enemy.
    #[default]
    Normal,
    /// Hits every enemy.
    All,
    /// Hits one enemy picked uniformly.
    Random,
    /// Hits the back enemy.
    Last,
    /// Hits the second enemy, or the back one if there are fewer.
    Second,
    /// Hits the third enemy, or the back one if there are fewer.
    Third,
}

/// Enemies selected by one attack.
pub type Targets = RosterSnapshot;

impl AttackType {
    /// Picks targets among `candidates` (live enemies in battle order).
    ///
    /// Only `Random` draws from `rng`. An empty candidate list yields no targets.
    pub fn select_targets(self, candidates: &[EntityId], rng: &mut dyn RandomSource) -> Targets {
        let mut targets = Targets::new();
        let Some(last) = candidates.last().copied() else {
            return targets;
        };

        match self {
            AttackType::All => targets.extend(candidates.iter().copied()),
            AttackType::Normal => targets.push(candidates[0]),
            AttackType::Last => targets.push(last),
            AttackType::Second => targets.push(candidates.get(1).copied().unwrap_or(last)),
            AttackType::Third => targets.push(candidates.get(2).copied().unwrap_or(last)),
            AttackType::Random => {
                let index = rng.range_usize(candidates.len());
                targets.push(candidates[index]);
            }
        }
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    fn ids(n: u32) -> Vec<EntityId> {
        (1..=n).map(EntityId).collect()
    }

    #[test]
    fn positional_kinds_pick_expected_enemy() {
        let mut rng = PcgRng::new(1);
        let roster = ids(4);
        assert_eq!(
            AttackType::Normal.select_targets(&roster, &mut rng).as_slice(),
            &[EntityId(1)]
        );
        assert_eq!(
            AttackType::Second.select_targets(&roster, &mut rng).as_slice(),
            &[EntityId(2)]
        );
        assert_eq!(
            AttackType::Third.select_targets(&roster, &mut rng).as_slice(),
            &[EntityId(3)]
        );
        assert_eq!(
            AttackType::Last.select_targets(&roster, &mut rng).as_slice(),
            &[EntityId(4)]
        );
        assert_eq!(AttackType::All.select_targets(&roster, &mut rng).len(), 4);
    }

    #[test]
    fn short_rosters_fall_back_to_last() {
        let mut rng = PcgRng::new(1);
        let roster = ids(1);
        assert_eq!(
            AttackType::Third.select_targets(&roster, &mut rng).as_slice(),
            &[EntityId(1)]
        );
    }

    #[test]
    fn random_stays_within_roster() {
        let mut rng = PcgRng::new(99);
        let roster = ids(3);
        for _ in 0..50 {
            let targets = AttackType::Random.select_targets(&roster, &mut rng);
            assert_eq!(targets.len(), 1);
            assert!(roster.contains(&targets[0]));
        }
    }

    #[test]
    fn empty_roster_has_no_targets() {
        let mut rng = PcgRng::new(1);
        assert!(AttackType::All.select_targets(&[], &mut rng).is_empty());
    }
}
