//! Shared type definitions for the Beanstock game engine.
//!
//! This crate is the single source of truth for types that cross crate
//! boundaries in the Beanstock workspace. Types defined here flow downstream
//! to `TypeScript` via `ts-rs` for the browser client.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe identifiers (plant instances, species)
//! - [`enums`] -- Enumeration types (tiers, states, cosmetics)
//! - [`structs`] -- Shared value types (cosmetic rarity, level multipliers)
//! - [`outcomes`] -- Operation result payloads (XP grants, purchases)
//! - [`views`] -- Read models served to clients

pub mod enums;
pub mod ids;
pub mod outcomes;
pub mod structs;
pub mod views;

// Re-export all public types at crate root for convenience.
pub use enums::{
    CosmeticFinish, CosmeticSize, GrowthState, HarvestKind, PotState, RarityTier,
};
pub use ids::{PlantId, SpeciesId};
pub use outcomes::{ClipperXpOutcome, PlantXpOutcome, PurchaseReceipt};
pub use structs::{CosmeticRarity, LevelMultipliers};
pub use views::{GameStateView, PlantView, PotView, ShopSlotView, ShopView};
