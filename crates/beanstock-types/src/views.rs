//! Read models served to clients.
//!
//! Views are derived fresh on every read from live engine state, after the
//! lazy refresh pass (shop rotation, growth advancement) has run. They are
//! plain data: nothing in here mutates anything.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{GrowthState, HarvestKind, PotState, RarityTier};
use crate::ids::PlantId;
use crate::structs::{CosmeticRarity, LevelMultipliers};

// ---------------------------------------------------------------------------
// Shop views
// ---------------------------------------------------------------------------

/// One purchasable slot as presented to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ShopSlotView {
    /// Wire identifier of the stocked species.
    pub species_id: String,
    /// Display name of the stocked species.
    pub species_name: String,
    /// Rarity tier of the stocked species.
    pub rarity: RarityTier,
    /// How the stocked species is harvested.
    pub species_type: HarvestKind,
    /// Units remaining in this slot.
    pub stock: u32,
    /// Price of the next unit, including the repeat-purchase tax.
    pub price: u64,
    /// Untaxed base price.
    pub base_price: u64,
    /// Purchases already made from this slot this rotation.
    pub purchases: u32,
    /// Species growth duration in seconds, for the buy tooltip.
    pub grow_time: u64,
    /// Species base sale value, for the buy tooltip.
    pub sell_price: u64,
}

/// The whole shop as presented to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ShopView {
    /// Current slots in rotation order. May be fewer than eight.
    pub slots: Vec<ShopSlotView>,
    /// Unix timestamp of the next rotation.
    pub refresh_at: u64,
    /// Seconds until the next rotation, clamped at zero.
    pub time_until_refresh: u64,
}

// ---------------------------------------------------------------------------
// Pot views
// ---------------------------------------------------------------------------

/// Details of the plant occupying a pot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlantView {
    /// Wire identifier of the species.
    pub species_id: String,
    /// Display name of the species.
    pub species_name: String,
    /// How this species is harvested.
    pub species_type: HarvestKind,
    /// Unix timestamp when the seed went into the pot.
    pub planted_at: u64,
    /// Species growth duration in seconds.
    pub grow_time: u64,
    /// Cosmetic rarity rolled at planting.
    pub rarity: CosmeticRarity,
    /// Current growth state.
    pub growth_state: GrowthState,
    /// Current plant level.
    pub level: u32,
    /// Experience toward the next level.
    pub experience: u64,
    /// Requirement for the next level.
    pub required_xp: u64,
    /// Whether the clipper has been unlocked on this instance.
    pub clipper_unlocked: bool,
    /// Clipper level, 0 while locked.
    pub clipper_level: u32,
    /// Gameplay multipliers at the current level.
    pub multipliers: LevelMultipliers,
}

/// One pot as presented to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PotView {
    /// Fixed pot index, 0 through 11.
    pub index: u8,
    /// State of the pot, mirroring its instance when occupied.
    pub state: PotState,
    /// Identifier of the occupying instance, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<PlantId>,
    /// Details of the occupying plant, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plant: Option<PlantView>,
}

// ---------------------------------------------------------------------------
// Combined game state
// ---------------------------------------------------------------------------

/// Everything a client needs to render the session in one payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GameStateView {
    /// Current coin balance.
    pub coins: u64,
    /// Current shop contents.
    pub shop: ShopView,
    /// All twelve pots in index order.
    pub pots: Vec<PotView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pot_omits_optional_fields() {
        let view = PotView {
            index: 3,
            state: PotState::Empty,
            instance_id: None,
            plant: None,
        };
        let json = serde_json::to_string(&view).unwrap_or_default();
        assert_eq!(json, "{\"index\":3,\"state\":\"empty\"}");
    }

    #[test]
    fn shop_view_roundtrips() {
        let view = ShopView {
            slots: vec![ShopSlotView {
                species_id: "beanstalk".to_owned(),
                species_name: "Beanstalk".to_owned(),
                rarity: RarityTier::Common,
                species_type: HarvestKind::Picker,
                stock: 3,
                price: 132,
                base_price: 120,
                purchases: 1,
                grow_time: 25,
                sell_price: 14,
            }],
            refresh_at: 1_000,
            time_until_refresh: 42,
        };
        let json = serde_json::to_string(&view).unwrap_or_default();
        let back: Result<ShopView, _> = serde_json::from_str(&json);
        assert_eq!(back.ok().as_ref(), Some(&view));
    }
}
