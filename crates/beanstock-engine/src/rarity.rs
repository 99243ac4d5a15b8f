//! Rarity rolls: cosmetic size/finish draws and tier spawn tables.
//!
//! All probabilities are integers per 10000 rolled against
//! `rng.random_range(0..10000)`, so there is no float comparison anywhere in
//! the hot path. Cosmetic draws are independent: a massive golden plant is
//! two lucky rolls, not one.

use beanstock_types::{CosmeticFinish, CosmeticRarity, CosmeticSize, RarityTier};
use rand::Rng;

// ---------------------------------------------------------------------------
// Cosmetic thresholds (cumulative, per 10000)
// ---------------------------------------------------------------------------

/// Size draw: normal below this threshold.
const SIZE_NORMAL_BELOW: u32 = 6_500;
/// Size draw: large below this threshold (massive above).
const SIZE_LARGE_BELOW: u32 = 9_500;

/// Finish draw: no finish below this threshold.
const FINISH_NONE_BELOW: u32 = 9_400;
/// Finish draw: shiny below this threshold (golden above).
const FINISH_SHINY_BELOW: u32 = 9_700;

// ---------------------------------------------------------------------------
// Cosmetic rolls
// ---------------------------------------------------------------------------

/// Roll a fresh cosmetic rarity for a newly planted instance.
///
/// Size: normal 65%, large 30%, massive 5%. Finish: none 94%, shiny 3%,
/// golden 3%. The two draws are independent.
pub fn roll_cosmetic_rarity(rng: &mut impl Rng) -> CosmeticRarity {
    let size_roll: u32 = rng.random_range(0..10_000);
    let size = if size_roll < SIZE_NORMAL_BELOW {
        CosmeticSize::Normal
    } else if size_roll < SIZE_LARGE_BELOW {
        CosmeticSize::Large
    } else {
        CosmeticSize::Massive
    };

    let finish_roll: u32 = rng.random_range(0..10_000);
    let finish = if finish_roll < FINISH_NONE_BELOW {
        CosmeticFinish::None
    } else if finish_roll < FINISH_SHINY_BELOW {
        CosmeticFinish::Shiny
    } else {
        CosmeticFinish::Golden
    };

    CosmeticRarity { size, finish }
}

/// Sale-value multiplier for a cosmetic roll.
///
/// Base 1.0; large x1.8, massive x3.2; shiny x3.0, golden x6.0. Size and
/// finish compound multiplicatively.
pub fn cosmetic_multiplier(rarity: CosmeticRarity) -> f64 {
    let size_factor = match rarity.size {
        CosmeticSize::Normal => 1.0,
        CosmeticSize::Large => 1.8,
        CosmeticSize::Massive => 3.2,
    };
    let finish_factor = match rarity.finish {
        CosmeticFinish::None => 1.0,
        CosmeticFinish::Shiny => 3.0,
        CosmeticFinish::Golden => 6.0,
    };
    size_factor * finish_factor
}

// ---------------------------------------------------------------------------
// Tier spawn table
// ---------------------------------------------------------------------------

/// Shop-rotation parameters of one rarity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierProfile {
    /// Chance per 10000 that one rotation-attempt roll places this tier.
    pub spawn_chance_per_10000: u32,
    /// Minimum stock quantity for a placed slot.
    pub min_quantity: u32,
    /// Maximum stock quantity for a placed slot (inclusive).
    pub max_quantity: u32,
}

/// The fixed spawn profile for a rarity tier.
pub const fn tier_profile(tier: RarityTier) -> TierProfile {
    match tier {
        RarityTier::Common => TierProfile {
            spawn_chance_per_10000: 5_000,
            min_quantity: 2,
            max_quantity: 5,
        },
        RarityTier::Uncommon => TierProfile {
            spawn_chance_per_10000: 3_500,
            min_quantity: 1,
            max_quantity: 4,
        },
        RarityTier::Rare => TierProfile {
            spawn_chance_per_10000: 2_000,
            min_quantity: 1,
            max_quantity: 3,
        },
        RarityTier::Legendary => TierProfile {
            spawn_chance_per_10000: 1_000,
            min_quantity: 1,
            max_quantity: 2,
        },
        RarityTier::Mythical => TierProfile {
            spawn_chance_per_10000: 500,
            min_quantity: 1,
            max_quantity: 2,
        },
        RarityTier::UltraMythical => TierProfile {
            spawn_chance_per_10000: 200,
            min_quantity: 1,
            max_quantity: 1,
        },
        RarityTier::Godly => TierProfile {
            spawn_chance_per_10000: 80,
            min_quantity: 1,
            max_quantity: 1,
        },
    }
}

/// Roll whether a rotation attempt places this tier.
pub fn roll_tier_spawn(tier: RarityTier, rng: &mut impl Rng) -> bool {
    let roll: u32 = rng.random_range(0..10_000);
    roll < tier_profile(tier).spawn_chance_per_10000
}

/// Roll the stock quantity for a slot placed from this tier.
pub fn roll_stock_quantity(tier: RarityTier, rng: &mut impl Rng) -> u32 {
    let profile = tier_profile(tier);
    rng.random_range(profile.min_quantity..=profile.max_quantity)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
