//! Result payloads returned by game session operations.
//!
//! Experience grants are fire-and-forget from the caller's side: the engine
//! always answers with an outcome record, even when the target instance no
//! longer exists (it may have been burned between the grant being earned and
//! delivered). The neutral record reports no change rather than an error.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::PlantId;

// ---------------------------------------------------------------------------
// Experience outcomes
// ---------------------------------------------------------------------------

/// Outcome of granting experience to a plant instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlantXpOutcome {
    /// Whether at least one level was gained.
    pub leveled_up: bool,
    /// Level before the grant.
    pub old_level: u32,
    /// Level after the grant (equal to `old_level` when nothing changed).
    pub new_level: u32,
    /// Experience remaining toward the next level after any level-ups.
    pub experience: u64,
    /// Requirement for the next level at the new level.
    pub required_xp: u64,
    /// Whether the clipper is unlocked after this grant.
    pub clipper_unlocked: bool,
    /// Clipper level after this grant (0 while locked).
    pub clipper_level: u32,
}

impl PlantXpOutcome {
    /// The no-change record returned when the instance does not exist.
    pub const fn neutral() -> Self {
        Self {
            leveled_up: false,
            old_level: 0,
            new_level: 0,
            experience: 0,
            required_xp: 0,
            clipper_unlocked: false,
            clipper_level: 0,
        }
    }
}

/// Outcome of granting experience to a plant's clipper.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ClipperXpOutcome {
    /// Whether at least one clipper level was gained.
    pub leveled_up: bool,
    /// Clipper level before the grant (0 while locked).
    pub old_level: u32,
    /// Clipper level after the grant.
    pub new_level: u32,
    /// Clipper experience remaining toward the next level.
    pub experience: f64,
    /// Requirement for the next clipper level, 0 once capped.
    pub required_xp: u64,
}

impl ClipperXpOutcome {
    /// The no-change record for a missing instance or a locked clipper.
    pub const fn neutral() -> Self {
        Self {
            leveled_up: false,
            old_level: 0,
            new_level: 0,
            experience: 0.0,
            required_xp: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Purchase receipt
// ---------------------------------------------------------------------------

/// Record of a completed seed purchase.
///
/// Issued only when every validation passed and the full mutation committed:
/// coins were deducted, stock was decremented, and (when a pot was given)
/// the seed was planted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PurchaseReceipt {
    /// Shop slot the seed came from.
    pub slot_index: usize,
    /// Wire identifier of the purchased species.
    pub species_id: String,
    /// Price actually paid, after the repeat-purchase tax.
    pub price_paid: u64,
    /// Pot the seed was planted into, if planting was requested.
    pub pot_index: Option<u8>,
    /// Instance created by planting, if planting was requested.
    pub instance_id: Option<PlantId>,
    /// Coin balance after the deduction.
    pub coins_remaining: u64,
}
