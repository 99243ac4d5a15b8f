//! Type-safe identifier wrappers.
//!
//! Plant instances are identified by strongly-typed UUID v7 wrappers so that
//! an instance id can never be confused with any other identifier at compile
//! time. Species use a small arena index into the immutable catalog instead
//! of a UUID: the catalog is fixed at startup and lookups by index are the
//! hot path during shop rotation.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a planted instance in the garden.
    ///
    /// Minted when a seed is planted, destroyed when the pot is burned or
    /// the plant is removed after harvest.
    PlantId
}

/// Opaque index of a species in the catalog.
///
/// Valid only against the catalog that issued it. Constructed by the catalog
/// itself; holders can compare and store it but not conjure arbitrary live
/// indices (a stale or out-of-range id simply fails lookup with `None`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct SpeciesId(u16);

impl SpeciesId {
    /// Wrap a raw catalog index.
    pub const fn from_index(index: u16) -> Self {
        Self(index)
    }

    /// Return the raw index for catalog lookup.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl core::fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "species#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plant_ids_are_unique() {
        let a = PlantId::new();
        let b = PlantId::new();
        assert_ne!(a, b);
        assert_ne!(a.into_inner(), Uuid::nil());
    }

    #[test]
    fn plant_id_roundtrip_serde() {
        let original = PlantId::new();
        let json = serde_json::to_string(&original).ok();
        assert!(json.is_some());
        let restored: Result<PlantId, _> = serde_json::from_str(json.as_deref().unwrap_or(""));
        assert!(restored.is_ok());
    }

    #[test]
    fn species_id_preserves_index() {
        let id = SpeciesId::from_index(17);
        assert_eq!(id.index(), 17);
        assert_eq!(id.to_string(), "species#17");
    }

    #[test]
    fn species_ids_order_by_index() {
        assert!(SpeciesId::from_index(3) < SpeciesId::from_index(12));
    }
}
