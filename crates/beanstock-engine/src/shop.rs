//! The rotating seed shop: slot generation, stock, and repeat-purchase tax.
//!
//! The shop replaces its slots wholesale every rotation period. Rotation is
//! never driven by a timer; any read of shop data is expected to call
//! [`Shop::refresh`] first, which rotates if the deadline has passed. Two
//! reads separated by a long idle gap both see a single fresh rotation as of
//! the second read, not a backlog of intermediate ones.

use std::collections::BTreeSet;

use beanstock_types::{RarityTier, SpeciesId};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::SpeciesCatalog;
use crate::rarity;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Seconds between shop rotations.
pub const ROTATION_PERIOD_SECS: u64 = 180;

/// Target number of slots per rotation.
pub const MAX_SLOTS: usize = 8;

/// Below this slot count, a fully-failed attempt force-fills from commons.
pub const FORCE_FILL_BELOW: usize = 4;

/// Rotation attempts before accepting a short shop.
const MAX_ATTEMPTS: u32 = 50;

// ---------------------------------------------------------------------------
// ShopSlot
// ---------------------------------------------------------------------------

/// One purchasable slot in the current rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopSlot {
    /// Species stocked in this slot.
    pub species: SpeciesId,
    /// Units remaining.
    pub stock: u32,
    /// Untaxed price per seed, copied from the species at rotation time.
    pub base_price: u64,
    /// Purchases made from this slot since the rotation that created it.
    pub purchases: u32,
}

impl ShopSlot {
    /// Price of the next seed from this slot.
    ///
    /// The tax is keyed on purchases made *before* this one: first purchase
    /// at base, second at +10%, every later one at a flat +25%. Floored
    /// integer arithmetic; `None` only on overflow.
    pub const fn current_price(&self) -> Option<u64> {
        let taxed = match self.purchases {
            0 => return Some(self.base_price),
            1 => self.base_price.checked_mul(110),
            _ => self.base_price.checked_mul(125),
        };
        match taxed {
            Some(value) => value.checked_div(100),
            None => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Shop
// ---------------------------------------------------------------------------

/// The rotating seed shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    /// Current slots in rotation order. At most [`MAX_SLOTS`].
    pub slots: Vec<ShopSlot>,
    /// Unix timestamp at which the current rotation expires.
    pub next_rotation_at: u64,
}

impl Shop {
    /// Create a shop with a freshly rolled rotation.
    pub fn new(catalog: &SpeciesCatalog, now: u64, rng: &mut impl Rng) -> Self {
        let mut shop = Self {
            slots: Vec::new(),
            next_rotation_at: 0,
        };
        shop.rotate(catalog, now, rng);
        shop
    }

    /// Rotate if the deadline has passed. Returns whether a rotation ran.
    pub fn refresh(&mut self, catalog: &SpeciesCatalog, now: u64, rng: &mut impl Rng) -> bool {
        if now >= self.next_rotation_at {
            self.rotate(catalog, now, rng);
            true
        } else {
            false
        }
    }

    /// Replace all slots with a freshly rolled set and reschedule.
    ///
    /// Up to [`MAX_SLOTS`] slots are produced in at most 50 attempts. Each
    /// attempt shuffles the tier list, scans it in shuffled order, and rolls
    /// each tier's spawn chance once; the first success places one slot
    /// (uniform unused species of that tier, uniform stock in the tier's
    /// range) and ends the scan. A species already placed this rotation is
    /// never placed again; a tier whose species are all used is skipped. An
    /// attempt that places nothing force-fills from an unused common species
    /// while fewer than [`FORCE_FILL_BELOW`] slots exist. Exhausting the
    /// attempt budget short of eight slots is accepted as-is.
    pub fn rotate(&mut self, catalog: &SpeciesCatalog, now: u64, rng: &mut impl Rng) {
        let mut slots: Vec<ShopSlot> = Vec::with_capacity(MAX_SLOTS);
        let mut placed: BTreeSet<SpeciesId> = BTreeSet::new();

        for _ in 0..MAX_ATTEMPTS {
            if slots.len() >= MAX_SLOTS {
                break;
            }

            let mut tiers = RarityTier::ALL;
            tiers.shuffle(rng);

            let mut slot_this_attempt = false;
            for tier in tiers {
                if !rarity::roll_tier_spawn(tier, rng) {
                    continue;
                }
                let Some(slot) = draw_slot(catalog, tier, &placed, rng) else {
                    // Tier exhausted of unused species; keep scanning.
                    continue;
                };
                placed.insert(slot.species);
                slots.push(slot);
                slot_this_attempt = true;
                break;
            }

            if !slot_this_attempt && slots.len() < FORCE_FILL_BELOW {
                if let Some(slot) = draw_slot(catalog, RarityTier::Common, &placed, rng) {
                    placed.insert(slot.species);
                    slots.push(slot);
                }
            }
        }

        debug!(slots = slots.len(), now, "shop rotated");
        self.slots = slots;
        self.next_rotation_at = now.saturating_add(ROTATION_PERIOD_SECS);
    }

    /// Borrow a slot by index.
    pub fn slot(&self, index: usize) -> Option<&ShopSlot> {
        self.slots.get(index)
    }

    /// Number of slots in the current rotation.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Commit a purchase against a slot: decrement stock, bump the counter.
    ///
    /// Validation (stock, funds) is the caller's job; this only refuses an
    /// out-of-range index or a counter that cannot move.
    pub fn record_purchase(&mut self, index: usize) -> bool {
        let Some(slot) = self.slots.get_mut(index) else {
            return false;
        };
        let (Some(stock), Some(purchases)) =
            (slot.stock.checked_sub(1), slot.purchases.checked_add(1))
        else {
            return false;
        };
        slot.stock = stock;
        slot.purchases = purchases;
        true
    }

    /// Seconds until the next rotation, clamped at zero.
    pub const fn seconds_until_rotation(&self, now: u64) -> u64 {
        self.next_rotation_at.saturating_sub(now)
    }
}

/// Draw one slot from a tier, excluding already-placed species.
///
/// Returns `None` when every species of the tier is already placed (or the
/// catalog has none).
fn draw_slot(
    catalog: &SpeciesCatalog,
    tier: RarityTier,
    placed: &BTreeSet<SpeciesId>,
    rng: &mut impl Rng,
) -> Option<ShopSlot> {
    let pool: Vec<_> = catalog
        .tier_members(tier)
        .filter(|s| !placed.contains(&s.id))
        .collect();
    if pool.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..pool.len());
    let species = pool.get(idx)?;
    Some(ShopSlot {
        species: species.id,
        stock: rarity::roll_stock_quantity(tier, rng),
        base_price: species.seed_cost,
        purchases: 0,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn catalog() -> SpeciesCatalog {
        SpeciesCatalog::standard()
    }

    #[test]
    fn price_follows_tax_schedule() {
        let mut slot = ShopSlot {
            species: SpeciesId::from_index(0),
            stock: 5,
            base_price: 120,
            purchases: 0,
        };
        assert_eq!(slot.current_price(), Some(120));
        slot.purchases = 1;
        assert_eq!(slot.current_price(), Some(132));
        slot.purchases = 2;
        assert_eq!(slot.current_price(), Some(150));
        // Flat from here on, never compounding further.
        slot.purchases = 9;
        assert_eq!(slot.current_price(), Some(150));
    }

    #[test]
    fn tax_floors_fractional_prices() {
        let slot = ShopSlot {
            species: SpeciesId::from_index(0),
            stock: 1,
            base_price: 15,
            purchases: 1,
        };
        // 15 * 1.10 = 16.5, floored to 16.
        assert_eq!(slot.current_price(), Some(16));
    }

    #[test]
    fn rotation_respects_slot_bounds() {
        let catalog = catalog();
        let mut rng = SmallRng::seed_from_u64(1);
        for round in 0..200 {
            let shop = Shop::new(&catalog, 0, &mut rng);
            let count = shop.slot_count();
            assert!(count >= 1 && count <= MAX_SLOTS, "round {round}: {count}");
        }
    }

    #[test]
    fn rotation_never_duplicates_species() {
        let catalog = catalog();
        let mut rng = SmallRng::seed_from_u64(2);
        for _ in 0..200 {
            let shop = Shop::new(&catalog, 0, &mut rng);
            let mut seen = BTreeSet::new();
            for slot in &shop.slots {
                assert!(seen.insert(slot.species), "duplicate species in rotation");
            }
        }
    }

    #[test]
    fn rotation_quantities_match_tier_ranges() {
        let catalog = catalog();
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..100 {
            let shop = Shop::new(&catalog, 0, &mut rng);
            for slot in &shop.slots {
                let tier = catalog.get(slot.species).unwrap().rarity_tier;
                let profile = rarity::tier_profile(tier);
                assert!(slot.stock >= profile.min_quantity);
                assert!(slot.stock <= profile.max_quantity);
            }
        }
    }

    #[test]
    fn commons_outnumber_godly_over_many_rotations() {
        let catalog = catalog();
        let mut rng = SmallRng::seed_from_u64(4);
        let mut commons = 0_u32;
        let mut godly = 0_u32;
        for _ in 0..300 {
            let shop = Shop::new(&catalog, 0, &mut rng);
            for slot in &shop.slots {
                match catalog.get(slot.species).unwrap().rarity_tier {
                    RarityTier::Common => commons += 1,
                    RarityTier::Godly => godly += 1,
                    _ => {}
                }
            }
        }
        assert!(commons > godly, "commons {commons} vs godly {godly}");
    }

    #[test]
    fn refresh_rotates_only_after_deadline() {
        let catalog = catalog();
        let mut rng = SmallRng::seed_from_u64(5);
        let mut shop = Shop::new(&catalog, 100, &mut rng);
        assert_eq!(shop.next_rotation_at, 100 + ROTATION_PERIOD_SECS);

        let before = shop.clone();
        assert!(!shop.refresh(&catalog, 150, &mut rng));
        assert_eq!(shop, before);

        assert!(shop.refresh(&catalog, 100 + ROTATION_PERIOD_SECS, &mut rng));
        assert_eq!(shop.next_rotation_at, 100 + 2 * ROTATION_PERIOD_SECS);
    }

    #[test]
    fn record_purchase_moves_stock_and_counter() {
        let catalog = catalog();
        let mut rng = SmallRng::seed_from_u64(6);
        let mut shop = Shop::new(&catalog, 0, &mut rng);
        let initial_stock = shop.slot(0).unwrap().stock;
        assert!(initial_stock >= 1);

        assert!(shop.record_purchase(0));
        assert_eq!(shop.slot(0).unwrap().stock, initial_stock - 1);
        assert_eq!(shop.slot(0).unwrap().purchases, 1);

        assert!(!shop.record_purchase(99));
    }

    #[test]
    fn record_purchase_refuses_empty_stock() {
        let catalog = catalog();
        let mut rng = SmallRng::seed_from_u64(7);
        let mut shop = Shop::new(&catalog, 0, &mut rng);
        let stock = shop.slot(0).unwrap().stock;
        for _ in 0..stock {
            assert!(shop.record_purchase(0));
        }
        assert_eq!(shop.slot(0).unwrap().stock, 0);
        assert!(!shop.record_purchase(0));
    }

    #[test]
    fn seconds_until_rotation_clamps_at_zero() {
        let catalog = catalog();
        let mut rng = SmallRng::seed_from_u64(8);
        let shop = Shop::new(&catalog, 1_000, &mut rng);
        assert_eq!(shop.seconds_until_rotation(1_000), ROTATION_PERIOD_SECS);
        assert_eq!(shop.seconds_until_rotation(1_000 + ROTATION_PERIOD_SECS + 50), 0);
    }
}
