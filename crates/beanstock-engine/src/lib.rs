//! Game rules for Grow A Beanstock: shop, garden, progression, and snapshots.
//!
//! This crate owns the server-side state of a game session and every rule
//! that mutates it: the rotating seed shop with rarity-tiered stocking, the
//! twelve-pot garden with timed growth, plant and clipper experience curves,
//! and JSON snapshot/restore. It is transport-agnostic; all operations take
//! the current time as an explicit argument and touch no clocks, sockets,
//! or files.
//!
//! # Modules
//!
//! - [`catalog`] -- The immutable species roster: growth times, prices, and
//!   rarity tiers for all 20 species.
//! - [`config`] -- Configuration loading from `beanstock-config.yaml` into
//!   strongly-typed structs.
//! - [`error`] -- [`TransactionDeclined`] (expected, non-fatal declines) and
//!   [`SnapshotError`].
//! - [`garden`] -- Fixed pot grid, plant instances, and growth timers.
//! - [`progression`] -- Plant level-up curves, clipper unlock and leveling,
//!   and per-level reward multipliers.
//! - [`rarity`] -- Cosmetic rarity rolls and tier spawn/stock tables.
//! - [`session`] -- [`GameSession`], the composition root tying coins, shop,
//!   and garden together behind transactional operations.
//! - [`shop`] -- The eight-slot rotating seed shop with purchase tax.
//! - [`snapshot`] -- Durable JSON session records and atomic restore.
//!
//! [`TransactionDeclined`]: error::TransactionDeclined
//! [`SnapshotError`]: error::SnapshotError
//! [`GameSession`]: session::GameSession

pub mod catalog;
pub mod config;
pub mod error;
pub mod garden;
pub mod progression;
pub mod rarity;
pub mod session;
pub mod shop;
pub mod snapshot;

// Re-export primary types at crate root.
pub use catalog::{SpeciesCatalog, SpeciesDefinition};
pub use config::{ConfigError, GameConfig};
pub use error::{SnapshotError, TransactionDeclined};
pub use garden::{Garden, POT_COUNT, PlantInstance};
pub use progression::{
    CLIPPER_LEVEL_CAP, CLIPPER_UNLOCK_LEVEL, experience_required, level_multipliers,
};
pub use session::{DEFAULT_STARTING_COINS, GameSession};
pub use shop::{MAX_SLOTS, ROTATION_PERIOD_SECS, Shop};
pub use snapshot::SessionSnapshot;
