//! Two-tier leveling: plant experience, clipper experience, and the
//! gameplay multipliers derived from level.
//!
//! Plants level without bound; clippers unlock at plant level 25 and cap
//! at clipper level 25. Both tiers share the same loop shape: add the
//! grant, then repeatedly pay the next requirement while the balance
//! covers it, so one large grant can produce several level-ups and the
//! remainder always carries forward.
//!
//! # Plant Level-Up Formula
//!
//! XP required to advance to level `N` is `base + 5 * max(N - 2, 0)`,
//! where `base` is a step function of the species' seed cost:
//!
//! | seed cost          | base |
//! |--------------------|------|
//! | under 1,000        | 20   |
//! | under 10,000       | 45   |
//! | under 100,000      | 90   |
//! | under 1,000,000    | 180  |
//! | 1,000,000 and up   | 320  |
//!
//! Cheap starter species level fast; endgame species grind.
//!
//! # Clipper Level-Up Formula
//!
//! XP required to advance from clipper level `L` to `L + 1` is
//! `100 * L^1.2`, recomputed from the current level on every step of the
//! loop. Clipper experience is fractional.
//!
//! # Multipliers
//!
//! Money, spawn-rate, and special-chance multipliers all grow with the
//! square root of `level - 1`, so level 1 is exactly neutral and returns
//! diminish as the plant climbs.

use beanstock_types::{ClipperXpOutcome, LevelMultipliers, PlantXpOutcome};

use crate::garden::PlantInstance;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Plant level at which the clipper harvester unlocks.
pub const CLIPPER_UNLOCK_LEVEL: u32 = 25;

/// Maximum clipper level. Unlike plant levels, clippers stop here.
pub const CLIPPER_LEVEL_CAP: u32 = 25;

// ---------------------------------------------------------------------------
// Plant leveling
// ---------------------------------------------------------------------------

/// XP required to reach `target_level` from the level below it.
///
/// Defined for every input: targets 0 through 2 all cost the bucket
/// base, and the curve climbs monotonically from there.
pub fn experience_required(target_level: u32, seed_cost: u64) -> u64 {
    let base: u64 = match seed_cost {
        0..=999 => 20,
        1_000..=9_999 => 45,
        10_000..=99_999 => 90,
        100_000..=999_999 => 180,
        _ => 320,
    };
    let steps = u64::from(target_level.saturating_sub(2));
    base.saturating_add(steps.saturating_mul(5))
}

/// Grant plant experience and resolve every level-up it pays for.
///
/// Levels are climbed one at a time, so a grant that carries the plant
/// past level 25 still lands on 25 on the way through, and the clipper
/// unlocks there. The unlock fires only on that first arrival; an
/// instance whose clipper was re-locked while its level sits above 25
/// stays locked.
pub fn add_plant_experience(
    instance: &mut PlantInstance,
    seed_cost: u64,
    amount: u64,
) -> PlantXpOutcome {
    let old_level = instance.level;
    instance.experience = instance.experience.saturating_add(amount);

    loop {
        let required = experience_required(instance.level.saturating_add(1), seed_cost);
        if instance.experience < required {
            break;
        }
        instance.experience = instance.experience.saturating_sub(required);
        instance.level = instance.level.saturating_add(1);

        if instance.level == CLIPPER_UNLOCK_LEVEL && !instance.clipper_unlocked {
            instance.clipper_unlocked = true;
            instance.clipper_level = 1;
            instance.clipper_experience = 0.0;
        }
    }

    PlantXpOutcome {
        leveled_up: instance.level > old_level,
        old_level,
        new_level: instance.level,
        experience: instance.experience,
        required_xp: experience_required(instance.level.saturating_add(1), seed_cost),
        clipper_unlocked: instance.clipper_unlocked,
        clipper_level: instance.clipper_level,
    }
}

// ---------------------------------------------------------------------------
// Clipper leveling
// ---------------------------------------------------------------------------

/// Fractional XP required to advance from clipper level `level`.
fn clipper_requirement(level: u32) -> f64 {
    100.0 * f64::from(level).powf(1.2)
}

/// Whole-point form of the clipper requirement, for read models.
///
/// Floors the fractional curve. Level 0 maps to 0, the locked state.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clipper_xp_required(level: u32) -> u64 {
    // In range: the curve stays far below u64::MAX for any u32 level.
    clipper_requirement(level).floor() as u64
}

/// Grant clipper experience and resolve clipper level-ups.
///
/// Does nothing while the clipper is locked. The requirement is
/// recomputed from the current level on every pass because the exponent
/// curve shifts as the level climbs. At [`CLIPPER_LEVEL_CAP`] any
/// remaining experience is discarded.
pub fn add_clipper_experience(instance: &mut PlantInstance, amount: f64) -> ClipperXpOutcome {
    let old_level = instance.clipper_level;

    if !instance.clipper_unlocked {
        return ClipperXpOutcome {
            leveled_up: false,
            old_level,
            new_level: old_level,
            experience: instance.clipper_experience,
            required_xp: clipper_xp_required(old_level),
        };
    }

    if instance.clipper_level >= CLIPPER_LEVEL_CAP {
        instance.clipper_experience = 0.0;
        return ClipperXpOutcome {
            leveled_up: false,
            old_level,
            new_level: old_level,
            experience: 0.0,
            required_xp: 0,
        };
    }

    instance.clipper_experience += amount;

    while instance.clipper_level < CLIPPER_LEVEL_CAP
        && instance.clipper_experience >= clipper_requirement(instance.clipper_level)
    {
        instance.clipper_experience -= clipper_requirement(instance.clipper_level);
        instance.clipper_level = instance.clipper_level.saturating_add(1);
        if instance.clipper_level >= CLIPPER_LEVEL_CAP {
            instance.clipper_experience = 0.0;
        }
    }

    let capped = instance.clipper_level >= CLIPPER_LEVEL_CAP;
    ClipperXpOutcome {
        leveled_up: instance.clipper_level > old_level,
        old_level,
        new_level: instance.clipper_level,
        experience: instance.clipper_experience,
        required_xp: if capped {
            0
        } else {
            clipper_xp_required(instance.clipper_level)
        },
    }
}

// ---------------------------------------------------------------------------
// Multipliers
// ---------------------------------------------------------------------------

/// Derive the three gameplay multipliers from a plant level.
///
/// Level 1 yields exactly 1.0 across the board. Each curve is
/// `1 + k * sqrt(level - 1)` with per-multiplier `k`, so all three are
/// monotonically increasing with diminishing returns.
pub fn level_multipliers(level: u32) -> LevelMultipliers {
    let progress = f64::from(level.saturating_sub(1)).sqrt();
    LevelMultipliers {
        money: progress.mul_add(0.25, 1.0),
        spawn_rate: progress.mul_add(0.2, 1.0),
        special_chance: progress.mul_add(0.15, 1.0),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::arithmetic_side_effects,
    clippy::float_cmp
)]
mod tests {
    use beanstock_types::{CosmeticRarity, SpeciesId};

    use super::*;

    fn fresh() -> PlantInstance {
        PlantInstance::sow(SpeciesId::from_index(0), 0, CosmeticRarity::plain())
    }

    // -----------------------------------------------------------------------
    // experience_required
    // -----------------------------------------------------------------------

    #[test]
    fn cost_buckets_are_strictly_increasing() {
        let bases: Vec<u64> = [120, 1_285, 17_000, 180_000, 5_620_000]
            .iter()
            .map(|&cost| experience_required(2, cost))
            .collect();
        assert_eq!(bases, vec![20, 45, 90, 180, 320]);
        for pair in bases.windows(2) {
            if let [lower, higher] = pair {
                assert!(higher > lower);
            }
        }
    }

    #[test]
    fn bucket_boundaries() {
        assert_eq!(experience_required(2, 999), 20);
        assert_eq!(experience_required(2, 1_000), 45);
        assert_eq!(experience_required(2, 9_999), 45);
        assert_eq!(experience_required(2, 10_000), 90);
        assert_eq!(experience_required(2, 99_999), 90);
        assert_eq!(experience_required(2, 100_000), 180);
        assert_eq!(experience_required(2, 999_999), 180);
        assert_eq!(experience_required(2, 1_000_000), 320);
    }

    #[test]
    fn requirement_is_monotone_in_level() {
        for cost in [120, 560, 9_300, 465_000, 1_800_000] {
            let mut previous = 0;
            for target in 2..200 {
                let required = experience_required(target, cost);
                assert!(
                    required >= previous,
                    "requirement dipped at target {target} for cost {cost}"
                );
                previous = required;
            }
        }
    }

    #[test]
    fn first_level_up_costs_the_bucket_base() {
        assert_eq!(experience_required(2, 120), 20);
        assert_eq!(experience_required(3, 120), 25);
        assert_eq!(experience_required(4, 120), 30);
    }

    // -----------------------------------------------------------------------
    // add_plant_experience
    // -----------------------------------------------------------------------

    #[test]
    fn grant_below_threshold_accumulates() {
        let mut plant = fresh();
        let outcome = add_plant_experience(&mut plant, 120, 19);
        assert!(!outcome.leveled_up);
        assert_eq!(outcome.old_level, 1);
        assert_eq!(outcome.new_level, 1);
        assert_eq!(plant.level, 1);
        assert_eq!(plant.experience, 19);
        assert_eq!(outcome.required_xp, 20);
    }

    #[test]
    fn exact_threshold_levels_with_zero_remainder() {
        let mut plant = fresh();
        let outcome = add_plant_experience(&mut plant, 120, 20);
        assert!(outcome.leveled_up);
        assert_eq!(outcome.new_level, 2);
        assert_eq!(plant.experience, 0);
    }

    #[test]
    fn overflow_carries_into_next_level() {
        let mut plant = fresh();
        let outcome = add_plant_experience(&mut plant, 120, 23);
        assert_eq!(outcome.new_level, 2);
        assert_eq!(plant.experience, 3);
    }

    #[test]
    fn single_grant_can_level_several_times() {
        let mut plant = fresh();
        // Level 1->2 costs 20, 2->3 costs 25. Give 50: reach 3 with 5 left.
        let outcome = add_plant_experience(&mut plant, 120, 50);
        assert!(outcome.leveled_up);
        assert_eq!(outcome.old_level, 1);
        assert_eq!(outcome.new_level, 3);
        assert_eq!(plant.experience, 5);
    }

    #[test]
    fn split_grants_match_one_lump_grant() {
        let mut lump = fresh();
        add_plant_experience(&mut lump, 560, 1_234);

        let mut split = fresh();
        for amount in [500, 400, 200, 100, 30, 4] {
            add_plant_experience(&mut split, 560, amount);
        }

        assert_eq!(split.level, lump.level);
        assert_eq!(split.experience, lump.experience);
    }

    #[test]
    fn leveling_has_no_upper_bound() {
        let mut plant = fresh();
        let mut total: u64 = 0;
        for target in 2..=150 {
            total += experience_required(target, 120);
        }
        let outcome = add_plant_experience(&mut plant, 120, total);
        assert_eq!(outcome.new_level, 150);
        assert_eq!(plant.experience, 0);
    }

    #[test]
    fn clipper_unlocks_on_reaching_level_25() {
        let mut plant = fresh();
        plant.level = 24;
        plant.experience = experience_required(25, 120) - 1;

        let outcome = add_plant_experience(&mut plant, 120, 1);
        assert!(outcome.leveled_up);
        assert_eq!(outcome.new_level, 25);
        assert!(outcome.clipper_unlocked);
        assert_eq!(outcome.clipper_level, 1);
        assert!(plant.clipper_unlocked);
        assert_eq!(plant.clipper_level, 1);
        assert!(plant.clipper_experience.abs() < f64::EPSILON);
    }

    #[test]
    fn clipper_unlocks_when_a_lump_grant_crosses_25() {
        let mut plant = fresh();
        let total: u64 = (2..=40).map(|t| experience_required(t, 120)).sum();
        let outcome = add_plant_experience(&mut plant, 120, total);
        assert_eq!(outcome.new_level, 40);
        assert!(outcome.clipper_unlocked);
        assert_eq!(outcome.clipper_level, 1);
    }

    #[test]
    fn unlock_does_not_retrigger_past_25() {
        let mut plant = fresh();
        let total: u64 = (2..=25).map(|t| experience_required(t, 120)).sum();
        add_plant_experience(&mut plant, 120, total);
        plant.clipper_level = 7;

        // Further plant levels leave the clipper where it is.
        add_plant_experience(&mut plant, 120, experience_required(26, 120));
        assert_eq!(plant.level, 26);
        assert_eq!(plant.clipper_level, 7);
    }

    #[test]
    fn relocked_instance_above_25_stays_locked() {
        // A restore re-locks clippers but keeps level. Leveling further
        // never passes through 25 again, so the clipper stays locked.
        let mut plant = fresh();
        plant.level = 30;
        let outcome = add_plant_experience(&mut plant, 120, experience_required(31, 120));
        assert_eq!(outcome.new_level, 31);
        assert!(!outcome.clipper_unlocked);
        assert_eq!(outcome.clipper_level, 0);
    }

    #[test]
    fn zero_grant_is_a_quiet_no_op() {
        let mut plant = fresh();
        let outcome = add_plant_experience(&mut plant, 120, 0);
        assert!(!outcome.leveled_up);
        assert_eq!(plant.level, 1);
        assert_eq!(plant.experience, 0);
    }

    // -----------------------------------------------------------------------
    // Clipper leveling
    // -----------------------------------------------------------------------

    fn unlocked() -> PlantInstance {
        let mut plant = fresh();
        plant.level = 25;
        plant.clipper_unlocked = true;
        plant.clipper_level = 1;
        plant
    }

    #[test]
    fn clipper_grant_is_a_no_op_while_locked() {
        let mut plant = fresh();
        let outcome = add_clipper_experience(&mut plant, 500.0);
        assert!(!outcome.leveled_up);
        assert_eq!(outcome.old_level, 0);
        assert_eq!(outcome.new_level, 0);
        assert_eq!(plant.clipper_level, 0);
        assert_eq!(plant.clipper_experience, 0.0);
    }

    #[test]
    fn clipper_requirement_at_locked_level_is_zero() {
        assert_eq!(clipper_xp_required(0), 0);
    }

    #[test]
    fn clipper_requirement_curve() {
        assert_eq!(clipper_xp_required(1), 100);
        // 100 * 2^1.2 = 229.7...
        assert_eq!(clipper_xp_required(2), 229);
        let mut previous = 0;
        for level in 1..=25 {
            let required = clipper_xp_required(level);
            assert!(required > previous, "curve dipped at level {level}");
            previous = required;
        }
    }

    #[test]
    fn clipper_levels_at_exactly_100_from_level_1() {
        let mut plant = unlocked();
        let outcome = add_clipper_experience(&mut plant, 100.0);
        assert!(outcome.leveled_up);
        assert_eq!(outcome.new_level, 2);
        assert!(plant.clipper_experience.abs() < 1e-9);
    }

    #[test]
    fn clipper_requirement_recomputes_each_step() {
        let mut plant = unlocked();
        // Enough for 1->2 (100) and 2->3 (229.7...), with a shaving left.
        let outcome = add_clipper_experience(&mut plant, 330.0);
        assert_eq!(outcome.new_level, 3);
        assert!(plant.clipper_experience > 0.0);
        assert!(plant.clipper_experience < 1.0);
    }

    #[test]
    fn fractional_grants_accumulate() {
        let mut plant = unlocked();
        for _ in 0..4 {
            let outcome = add_clipper_experience(&mut plant, 24.9);
            assert!(!outcome.leveled_up);
        }
        let outcome = add_clipper_experience(&mut plant, 0.4);
        assert!(outcome.leveled_up);
        assert_eq!(outcome.new_level, 2);
    }

    #[test]
    fn clipper_caps_at_25_and_discards_overflow() {
        let mut plant = unlocked();
        plant.clipper_level = 24;
        let outcome = add_clipper_experience(&mut plant, 1_000_000.0);
        assert!(outcome.leveled_up);
        assert_eq!(outcome.new_level, 25);
        assert_eq!(outcome.required_xp, 0);
        assert_eq!(plant.clipper_experience, 0.0);

        let outcome = add_clipper_experience(&mut plant, 500.0);
        assert!(!outcome.leveled_up);
        assert_eq!(outcome.new_level, 25);
        assert_eq!(plant.clipper_experience, 0.0);
    }

    // -----------------------------------------------------------------------
    // Multipliers
    // -----------------------------------------------------------------------

    #[test]
    fn level_1_multipliers_are_neutral() {
        let m = level_multipliers(1);
        assert_eq!(m.money, 1.0);
        assert_eq!(m.spawn_rate, 1.0);
        assert_eq!(m.special_chance, 1.0);
    }

    #[test]
    fn multipliers_increase_monotonically() {
        let mut previous = level_multipliers(1);
        for level in 2..=100 {
            let current = level_multipliers(level);
            assert!(current.money > previous.money, "money dipped at {level}");
            assert!(current.spawn_rate > previous.spawn_rate);
            assert!(current.special_chance > previous.special_chance);
            previous = current;
        }
    }

    #[test]
    fn multipliers_show_diminishing_returns() {
        let low = level_multipliers(2).money - level_multipliers(1).money;
        let high = level_multipliers(100).money - level_multipliers(99).money;
        assert!(high < low);
    }

    #[test]
    fn level_25_money_multiplier_is_over_double() {
        let m = level_multipliers(25);
        assert!(m.money > 2.2 && m.money < 2.25);
        assert!(m.spawn_rate > 1.95 && m.spawn_rate < 2.0);
    }
}
