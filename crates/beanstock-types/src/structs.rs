//! Core shared structs for the Beanstock game engine.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{CosmeticFinish, CosmeticSize};

// ---------------------------------------------------------------------------
// Cosmetic rarity
// ---------------------------------------------------------------------------

/// Cosmetic rarity rolled once when a plant is created, immutable thereafter.
///
/// Purely a sale-value multiplier and a visual; distinct from the species'
/// [`RarityTier`](crate::enums::RarityTier), which governs shop availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CosmeticRarity {
    /// Rolled size component.
    pub size: CosmeticSize,
    /// Rolled finish component, independent of size.
    pub finish: CosmeticFinish,
}

impl CosmeticRarity {
    /// The baseline roll: normal size, no finish, multiplier 1.0.
    pub const fn plain() -> Self {
        Self {
            size: CosmeticSize::Normal,
            finish: CosmeticFinish::None,
        }
    }
}

impl Default for CosmeticRarity {
    fn default() -> Self {
        Self::plain()
    }
}

// ---------------------------------------------------------------------------
// Level multipliers
// ---------------------------------------------------------------------------

/// Gameplay multipliers derived from a plant's level.
///
/// All three start at exactly 1.0 at level 1 and grow with diminishing
/// returns. Consumers multiply these into their own base rates; the engine
/// never applies them to the coin balance itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LevelMultipliers {
    /// Sale-value multiplier.
    pub money: f64,
    /// Produce spawn-rate multiplier (pickers).
    pub spawn_rate: f64,
    /// Chance multiplier for special produce variants.
    pub special_chance: f64,
}

impl LevelMultipliers {
    /// The level-1 baseline: everything at exactly 1.0.
    pub const fn identity() -> Self {
        Self {
            money: 1.0,
            spawn_rate: 1.0,
            special_chance: 1.0,
        }
    }
}

impl Default for LevelMultipliers {
    fn default() -> Self {
        Self::identity()
    }
}
