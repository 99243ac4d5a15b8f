//! Enumeration types for the Beanstock game engine.
//!
//! All enums serialize in `snake_case` because the browser client speaks the
//! original wire vocabulary (`"ultra_mythical"`, `"picker"`, `"ready"`).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Species rarity tiers
// ---------------------------------------------------------------------------

/// Rarity tier of a plant species.
///
/// The tier governs how often the species appears in the shop and how much
/// stock a slot carries when it does. Ordered from most to least common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum RarityTier {
    /// Everyday species, always in reach of a fresh session.
    Common,
    /// Slightly scarcer, early-game upgrades.
    Uncommon,
    /// Mid-game species with real growth times.
    Rare,
    /// Expensive, slow, lucrative.
    Legendary,
    /// Rarely stocked at all.
    Mythical,
    /// One unit per slot when it shows up.
    UltraMythical,
    /// The endgame roster.
    Godly,
}

impl RarityTier {
    /// Every tier, ordered from most to least common.
    ///
    /// Rotation shuffles a copy of this list each attempt, so the order here
    /// carries no gameplay weight beyond being the canonical enumeration.
    pub const ALL: [Self; 7] = [
        Self::Common,
        Self::Uncommon,
        Self::Rare,
        Self::Legendary,
        Self::Mythical,
        Self::UltraMythical,
        Self::Godly,
    ];
}

// ---------------------------------------------------------------------------
// Harvest behavior
// ---------------------------------------------------------------------------

/// How a mature plant is harvested.
///
/// Harvesting itself happens outside this engine; the kind is carried so the
/// client can render the right interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum HarvestKind {
    /// Produces repeatedly; beans are picked off the living plant.
    Picker,
    /// Harvested once by cutting the whole plant down.
    Cutter,
}

// ---------------------------------------------------------------------------
// Growth state machines
// ---------------------------------------------------------------------------

/// Growth state of a planted instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum GrowthState {
    /// Planted and waiting out its species' growth duration.
    Growing,
    /// Fully grown and harvestable.
    Ready,
    /// Harvested but not yet cleared.
    ///
    /// No transition inside this engine produces this state; harvest flows
    /// live outside and clear the pot directly. The variant exists so the
    /// wire vocabulary stays complete.
    Harvested,
}

/// State of a pot as seen by clients.
///
/// A non-empty pot always reports exactly its instance's [`GrowthState`];
/// the extra variant covers the unoccupied case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum PotState {
    /// No plant instance bound to the pot.
    Empty,
    /// Occupied by a growing instance.
    Growing,
    /// Occupied by a ready instance.
    Ready,
    /// Occupied by a harvested instance awaiting clearance.
    Harvested,
}

impl From<GrowthState> for PotState {
    fn from(state: GrowthState) -> Self {
        match state {
            GrowthState::Growing => Self::Growing,
            GrowthState::Ready => Self::Ready,
            GrowthState::Harvested => Self::Harvested,
        }
    }
}

// ---------------------------------------------------------------------------
// Cosmetic rarity components
// ---------------------------------------------------------------------------

/// Cosmetic size rolled once at planting time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum CosmeticSize {
    /// Baseline size, no value bonus.
    Normal,
    /// Noticeably bigger, worth more.
    Large,
    /// Towering, worth a lot more.
    Massive,
}

/// Cosmetic finish rolled once at planting time, independent of size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum CosmeticFinish {
    /// No finish, the overwhelmingly common outcome.
    None,
    /// Glossy sheen.
    Shiny,
    /// Gilded, the rarest finish.
    Golden,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_serialize_snake_case() {
        let json = serde_json::to_string(&RarityTier::UltraMythical).unwrap_or_default();
        assert_eq!(json, "\"ultra_mythical\"");
    }

    #[test]
    fn all_tiers_listed_once() {
        let tiers = RarityTier::ALL;
        assert_eq!(tiers.len(), 7);
        for (i, a) in tiers.iter().enumerate() {
            for b in tiers.iter().skip(i.saturating_add(1)) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn pot_state_mirrors_growth_state() {
        assert_eq!(PotState::from(GrowthState::Growing), PotState::Growing);
        assert_eq!(PotState::from(GrowthState::Ready), PotState::Ready);
        assert_eq!(PotState::from(GrowthState::Harvested), PotState::Harvested);
    }

    #[test]
    fn finish_none_serializes_as_none_string() {
        let json = serde_json::to_string(&CosmeticFinish::None).unwrap_or_default();
        assert_eq!(json, "\"none\"");
    }
}
