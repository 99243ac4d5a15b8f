//! Session snapshots: the JSON persistence form of a session.
//!
//! A snapshot captures coins, pot bindings, plant instances (species
//! slug, planting time, rarity, growth state, level, experience), and
//! the shop's slots and rotation deadline. Clipper state has no record
//! field at all, so it cannot leak into persistence; a restored session
//! always comes back with every clipper locked. Species are stored by
//! slug rather than table index, which keeps old saves loadable across
//! catalog reorderings and makes an unknown species an explicit error.

use std::collections::BTreeMap;

use beanstock_types::{CosmeticRarity, GrowthState, PlantId};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SnapshotError;
use crate::garden::{Garden, PlantInstance};
use crate::session::GameSession;
use crate::shop::ShopSlot;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One pot's binding in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotRecord {
    /// Fixed pot index.
    pub index: u8,
    /// Occupying instance, if any.
    pub instance: Option<PlantId>,
}

/// One plant instance in a snapshot. Deliberately has no clipper fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceRecord {
    /// Species slug, resolved against the catalog on restore.
    pub species: String,
    /// Unix timestamp of planting.
    pub planted_at: u64,
    /// Cosmetic rarity rolled at planting.
    pub rarity: CosmeticRarity,
    /// Growth state at save time.
    pub growth_state: GrowthState,
    /// Plant level.
    pub level: u32,
    /// Experience toward the next level.
    pub experience: u64,
}

/// One shop slot in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    /// Species slug.
    pub species: String,
    /// Units remaining.
    pub stock: u32,
    /// Untaxed price per seed.
    pub base_price: u64,
    /// Purchases made this rotation.
    pub purchases: u32,
}

/// Shop state in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopRecord {
    /// Rotation deadline carried across the save.
    pub next_rotation_at: u64,
    /// Slots of the saved rotation.
    pub slots: Vec<SlotRecord>,
}

/// A complete serializable session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Coin balance.
    pub coins: u64,
    /// All pot bindings in index order.
    pub pots: Vec<PotRecord>,
    /// Plant instances keyed by id.
    pub instances: BTreeMap<PlantId, InstanceRecord>,
    /// Shop state.
    pub shop: ShopRecord,
    /// Unix timestamp the snapshot was taken.
    pub saved_at: u64,
}

impl SessionSnapshot {
    /// Encode as a JSON string.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(raw)?)
    }
}

// ---------------------------------------------------------------------------
// GameSession integration
// ---------------------------------------------------------------------------

impl GameSession {
    /// Capture the session as a snapshot, stamped with `now`.
    pub fn snapshot(&self, now: u64) -> SessionSnapshot {
        let pots = self
            .garden
            .pots()
            .map(|pot| PotRecord {
                index: pot.index,
                instance: pot.instance,
            })
            .collect();

        let instances = self
            .garden
            .instances()
            .map(|(id, instance)| {
                let slug = self
                    .catalog
                    .get(instance.species)
                    .map_or_else(|| instance.species.to_string(), |s| s.slug.clone());
                (
                    *id,
                    InstanceRecord {
                        species: slug,
                        planted_at: instance.planted_at,
                        rarity: instance.rarity,
                        growth_state: instance.growth_state,
                        level: instance.level,
                        experience: instance.experience,
                    },
                )
            })
            .collect();

        let shop = ShopRecord {
            next_rotation_at: self.shop.next_rotation_at,
            slots: self
                .shop
                .slots
                .iter()
                .map(|slot| SlotRecord {
                    species: self
                        .catalog
                        .get(slot.species)
                        .map_or_else(|| slot.species.to_string(), |s| s.slug.clone()),
                    stock: slot.stock,
                    base_price: slot.base_price,
                    purchases: slot.purchases,
                })
                .collect(),
        };

        SessionSnapshot {
            coins: self.coins,
            pots,
            instances,
            shop,
            saved_at: now,
        }
    }

    /// Replace this session's state with a snapshot's.
    ///
    /// Every slug is resolved and the whole replacement state is built
    /// before anything is committed, so a bad snapshot leaves the
    /// session exactly as it was. Restored instances keep their level
    /// and experience; their clippers come back locked at zero.
    pub fn restore(&mut self, snapshot: &SessionSnapshot) -> Result<(), SnapshotError> {
        let mut resolved: BTreeMap<PlantId, PlantInstance> = BTreeMap::new();
        for (id, record) in &snapshot.instances {
            let Some(species) = self.catalog.by_slug(&record.species) else {
                return Err(SnapshotError::UnknownSpecies {
                    slug: record.species.clone(),
                });
            };
            let mut instance = PlantInstance::sow(species.id, record.planted_at, record.rarity);
            instance.growth_state = record.growth_state;
            instance.level = record.level;
            instance.experience = record.experience;
            resolved.insert(*id, instance);
        }

        let mut garden = Garden::new();
        for pot in &snapshot.pots {
            let Some(id) = pot.instance else {
                continue;
            };
            let Some(instance) = resolved.remove(&id) else {
                return Err(SnapshotError::DanglingInstance {
                    pot_index: usize::from(pot.index),
                    instance: id,
                });
            };
            if !garden.restore_binding(usize::from(pot.index), id, instance) {
                return Err(SnapshotError::PotOutOfRange {
                    pot_index: pot.index,
                });
            }
        }

        let mut slots = Vec::with_capacity(snapshot.shop.slots.len());
        for record in &snapshot.shop.slots {
            let Some(species) = self.catalog.by_slug(&record.species) else {
                return Err(SnapshotError::UnknownSpecies {
                    slug: record.species.clone(),
                });
            };
            slots.push(ShopSlot {
                species: species.id,
                stock: record.stock,
                base_price: record.base_price,
                purchases: record.purchases,
            });
        }

        self.coins = snapshot.coins;
        self.garden = garden;
        self.shop.slots = slots;
        self.shop.next_rotation_at = snapshot.shop.next_rotation_at;
        info!(
            coins = self.coins,
            plants = self.garden.occupied_count(),
            saved_at = snapshot.saved_at,
            "session restored from snapshot"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
