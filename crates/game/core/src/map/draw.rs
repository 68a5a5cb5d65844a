use crate::env::{RandomSource, StageData, StageKind};

/// Weighted stage draw for ordinary grid cells.
///
/// Boss entries are excluded. Each eligible entry wins with probability
/// `weight / total`: a uniform draw in `[0, total)` selects the first entry
/// whose cumulative weight exceeds it.
///
/// Degenerate catalogs never fail: all-zero weights pick the first eligible
/// entry, no eligible entry picks the first entry, and an empty catalog
/// yields [`StageKind::Undefined`]. None of these fallbacks draws from `rng`.
pub fn choose_stage(stages: &[StageData], rng: &mut dyn RandomSource) -> StageKind {
    let eligible: Vec<&StageData> = stages.iter().filter(|data| data.kind.is_drawable()).collect();

    let Some(first) = eligible.first() else {
        let fallback = stages.first().map_or(StageKind::Undefined, |data| data.kind);
        tracing::debug!(target: "core::map", %fallback, "no drawable stage; using fallback");
        return fallback;
    };

    let total: u64 = eligible.iter().map(|data| data.weight as u64).sum();
    if total == 0 {
        return first.kind;
    }

    let draw = rng.range_usize(total as usize) as u64;
    let mut cumulative = 0u64;
    for data in &eligible {
        cumulative += data.weight as u64;
        if cumulative > draw {
            return data.kind;
        }
    }
    first.kind
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use crate::testing::FixedRng;

    #[test]
    fn weighted_draw_follows_weights() {
        let stages = [
            StageData::new(StageKind::Shop, 1),
            StageData::new(StageKind::Enemy, 3),
        ];
        let mut rng = PcgRng::new(2024);
        let samples = 40_000;
        let shops = (0..samples)
            .filter(|_| choose_stage(&stages, &mut rng) == StageKind::Shop)
            .count();

        let ratio = shops as f64 / samples as f64;
        assert!((ratio - 0.25).abs() < 0.02, "shop ratio {ratio}");
    }

    #[test]
    fn boss_is_never_drawn() {
        let stages = [
            StageData::new(StageKind::Boss, 100),
            StageData::new(StageKind::Rest, 1),
        ];
        let mut rng = PcgRng::new(5);
        for _ in 0..100 {
            assert_eq!(choose_stage(&stages, &mut rng), StageKind::Rest);
        }
    }

    #[test]
    fn degenerate_catalogs_fall_back() {
        let mut rng = FixedRng::low();
        let zero = [
            StageData::new(StageKind::Treasure, 0),
            StageData::new(StageKind::Enemy, 0),
        ];
        assert_eq!(choose_stage(&zero, &mut rng), StageKind::Treasure);

        let boss_only = [StageData::new(StageKind::Boss, 4)];
        assert_eq!(choose_stage(&boss_only, &mut rng), StageKind::Boss);

        assert_eq!(choose_stage(&[], &mut rng), StageKind::Undefined);
    }
}
