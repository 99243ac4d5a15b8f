//! Error types for the `beanstock-engine` crate.
//!
//! A failed game operation is a *decline*, not a fault: the request was
//! understood, validation said no, and no state changed. Callers surface
//! declines to the player and move on. Genuine faults (snapshot
//! serialization, config parsing) get their own types.

use beanstock_types::PlantId;

/// Reasons a game transaction is declined.
///
/// Every variant guarantees the session is exactly as it was before the
/// request: validation runs to completion before the first write.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionDeclined {
    /// The requested shop slot does not exist in the current rotation.
    #[error("shop slot {slot_index} out of range (shop has {slot_count} slots)")]
    SlotOutOfRange {
        /// Requested slot index.
        slot_index: usize,
        /// Number of slots in the current rotation.
        slot_count: usize,
    },

    /// The requested slot has no stock left this rotation.
    #[error("shop slot {slot_index} is out of stock")]
    OutOfStock {
        /// Requested slot index.
        slot_index: usize,
    },

    /// The coin balance cannot cover the taxed price.
    #[error("insufficient funds: need {required}, have {available}")]
    InsufficientFunds {
        /// Taxed price of the purchase.
        required: u64,
        /// Current coin balance.
        available: u64,
    },

    /// The requested pot does not exist.
    #[error("pot {pot_index} out of range (garden has {pot_count} pots)")]
    PotOutOfRange {
        /// Requested pot index.
        pot_index: usize,
        /// Number of pots in the garden.
        pot_count: usize,
    },

    /// The target pot already holds a plant.
    #[error("pot {pot_index} is occupied")]
    PotOccupied {
        /// Requested pot index.
        pot_index: usize,
    },

    /// Burn was requested on a pot with nothing in it.
    #[error("pot {pot_index} is already empty")]
    PotAlreadyEmpty {
        /// Requested pot index.
        pot_index: usize,
    },

    /// No species in the catalog carries the given display name.
    #[error("unknown species name: {name:?}")]
    SpeciesNotFound {
        /// The name as received.
        name: String,
    },

    /// A balance overwrite asked for a negative amount.
    #[error("coin balance cannot be negative (requested {requested})")]
    NegativeBalance {
        /// The rejected amount.
        requested: i64,
    },

    /// Checked coin or counter arithmetic overflowed.
    #[error("arithmetic overflow in economy calculation")]
    ArithmeticOverflow,
}

/// Errors producing or consuming a session snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// JSON encoding or decoding failed.
    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The snapshot names a species the catalog does not carry.
    #[error("snapshot references unknown species: {slug:?}")]
    UnknownSpecies {
        /// The unresolvable wire identifier.
        slug: String,
    },

    /// The snapshot references a plant instance that is not in its table.
    #[error("snapshot pot {pot_index} references missing instance {instance}")]
    DanglingInstance {
        /// Pot holding the dangling reference.
        pot_index: usize,
        /// The missing instance id.
        instance: PlantId,
    },

    /// The snapshot names a pot index outside the fixed garden.
    #[error("snapshot pot index {pot_index} out of range")]
    PotOutOfRange {
        /// The offending pot index.
        pot_index: u8,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decline_messages_name_the_numbers() {
        let err = TransactionDeclined::InsufficientFunds {
            required: 132,
            available: 120,
        };
        assert_eq!(err.to_string(), "insufficient funds: need 132, have 120");
    }

    #[test]
    fn pot_range_message() {
        let err = TransactionDeclined::PotOutOfRange {
            pot_index: 12,
            pot_count: 12,
        };
        assert_eq!(err.to_string(), "pot 12 out of range (garden has 12 pots)");
    }
}
