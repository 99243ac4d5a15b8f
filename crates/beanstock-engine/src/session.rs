//! The game session: one mutable aggregate that every operation runs
//! against.
//!
//! A [`GameSession`] owns the coin ledger, the garden, the shop, the
//! species catalog, and the RNG. Public operations are synchronous
//! run-to-completion transactions: each one either fully succeeds or
//! declines with the session exactly as it was. There is no background
//! timer anywhere; shop rotation and growth advancement happen inside
//! the view reads, stamped with the caller-supplied `now`.

use beanstock_types::{
    ClipperXpOutcome, GameStateView, PlantId, PlantXpOutcome, PlantView, PotState, PotView,
    PurchaseReceipt, ShopSlotView, ShopView,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info};

use crate::catalog::SpeciesCatalog;
use crate::error::TransactionDeclined;
use crate::garden::{Garden, PlantInstance};
use crate::progression;
use crate::rarity;
use crate::shop::Shop;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Coin balance a fresh session starts with.
pub const DEFAULT_STARTING_COINS: u64 = 120;

// ---------------------------------------------------------------------------
// GameSession
// ---------------------------------------------------------------------------

/// The complete state of one player's game.
///
/// Fields are crate-visible so the snapshot module can lift them into
/// records; everything outside the crate goes through the operation
/// methods.
#[derive(Debug)]
pub struct GameSession {
    /// Current coin balance.
    pub(crate) coins: u64,
    /// Balance restored by [`reset`](Self::reset).
    pub(crate) starting_coins: u64,
    /// Pots and plant instances.
    pub(crate) garden: Garden,
    /// The rotating seed shop.
    pub(crate) shop: Shop,
    /// Immutable species definitions.
    pub(crate) catalog: SpeciesCatalog,
    /// Session RNG, seedable for deterministic tests.
    pub(crate) rng: SmallRng,
}

impl GameSession {
    /// Create a session with an empty garden and a freshly rolled shop.
    pub fn new(catalog: SpeciesCatalog, starting_coins: u64, seed: Option<u64>, now: u64) -> Self {
        let mut rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let shop = Shop::new(&catalog, now, &mut rng);
        info!(
            starting_coins,
            species = catalog.len(),
            slots = shop.slot_count(),
            "session initialized"
        );
        Self {
            coins: starting_coins,
            starting_coins,
            garden: Garden::new(),
            shop,
            catalog,
            rng,
        }
    }

    /// Throw the session away and start over: starting coins, empty
    /// garden, fresh rotation. The RNG stream continues.
    pub fn reset(&mut self, now: u64) {
        self.coins = self.starting_coins;
        self.garden = Garden::new();
        self.shop.rotate(&self.catalog, now, &mut self.rng);
        info!(coins = self.coins, "session reset");
    }

    /// Current coin balance.
    pub const fn coins(&self) -> u64 {
        self.coins
    }

    /// Borrow the species catalog.
    pub const fn catalog(&self) -> &SpeciesCatalog {
        &self.catalog
    }

    /// Borrow the garden (read-only; mutation goes through operations).
    pub const fn garden(&self) -> &Garden {
        &self.garden
    }

    /// Borrow the shop (read-only; mutation goes through operations).
    pub const fn shop(&self) -> &Shop {
        &self.shop
    }

    // -----------------------------------------------------------------------
    // Purchases
    // -----------------------------------------------------------------------

    /// Buy one seed from a shop slot, optionally planting it immediately.
    ///
    /// Validation order: slot exists, slot has stock, target pot (when
    /// given) exists and is empty, balance covers the taxed price. Only
    /// after all checks pass does anything mutate, so a decline leaves
    /// the session untouched. Without a pot index the purchase still
    /// deducts coins and stock; the seed is considered handed to an
    /// inventory outside this engine.
    pub fn buy_seed(
        &mut self,
        slot_index: usize,
        pot_index: Option<u8>,
        now: u64,
    ) -> Result<PurchaseReceipt, TransactionDeclined> {
        let slot_count = self.shop.slot_count();
        let Some(slot) = self.shop.slot(slot_index) else {
            return Err(TransactionDeclined::SlotOutOfRange {
                slot_index,
                slot_count,
            });
        };
        if slot.stock == 0 {
            return Err(TransactionDeclined::OutOfStock { slot_index });
        }
        let species_id = slot.species;
        let price = slot
            .current_price()
            .ok_or(TransactionDeclined::ArithmeticOverflow)?;

        let Some(species) = self.catalog.get(species_id) else {
            return Err(TransactionDeclined::SpeciesNotFound {
                name: species_id.to_string(),
            });
        };

        if let Some(pot) = pot_index {
            let target = usize::from(pot);
            let Some(state) = self.garden.pot_state(target) else {
                return Err(TransactionDeclined::PotOutOfRange {
                    pot_index: target,
                    pot_count: self.garden.pot_count(),
                });
            };
            if state != PotState::Empty {
                return Err(TransactionDeclined::PotOccupied { pot_index: target });
            }
        }

        if self.coins < price {
            return Err(TransactionDeclined::InsufficientFunds {
                required: price,
                available: self.coins,
            });
        }

        // Validation is complete; the steps below cannot fail.
        let mut instance_id = None;
        if let Some(pot) = pot_index {
            let rarity = rarity::roll_cosmetic_rarity(&mut self.rng);
            let instance = PlantInstance::sow(species_id, now, rarity);
            instance_id = Some(self.garden.plant(usize::from(pot), instance)?);
        }
        let _ = self.shop.record_purchase(slot_index);
        self.coins = self.coins.saturating_sub(price);

        let receipt = PurchaseReceipt {
            slot_index,
            species_id: species.slug.clone(),
            price_paid: price,
            pot_index,
            instance_id,
            coins_remaining: self.coins,
        };
        info!(
            species = %receipt.species_id,
            price,
            pot = ?pot_index,
            coins = self.coins,
            "seed purchased"
        );
        Ok(receipt)
    }

    /// Destroy whatever occupies a pot, clearing it for reuse.
    pub fn burn_plant(&mut self, pot_index: usize) -> Result<PlantId, TransactionDeclined> {
        let id = self.garden.burn(pot_index)?;
        debug!(pot_index, instance = %id, "plant burned");
        Ok(id)
    }

    /// Plant a seed the player already holds outside this engine.
    ///
    /// The species is matched by display name, case-sensitively. The pot
    /// is validated before the rarity roll; a decline must not advance
    /// the RNG stream.
    pub fn plant_from_inventory(
        &mut self,
        species_name: &str,
        pot_index: u8,
        now: u64,
    ) -> Result<PlantId, TransactionDeclined> {
        let Some(species) = self.catalog.find_by_name(species_name) else {
            return Err(TransactionDeclined::SpeciesNotFound {
                name: species_name.to_owned(),
            });
        };
        let species_id = species.id;

        let target = usize::from(pot_index);
        let Some(state) = self.garden.pot_state(target) else {
            return Err(TransactionDeclined::PotOutOfRange {
                pot_index: target,
                pot_count: self.garden.pot_count(),
            });
        };
        if state != PotState::Empty {
            return Err(TransactionDeclined::PotOccupied { pot_index: target });
        }

        let rarity = rarity::roll_cosmetic_rarity(&mut self.rng);
        let id = self
            .garden
            .plant(target, PlantInstance::sow(species_id, now, rarity))?;
        info!(species = species_name, pot = target, instance = %id, "planted from inventory");
        Ok(id)
    }

    // -----------------------------------------------------------------------
    // Progression
    // -----------------------------------------------------------------------

    /// Grant plant experience to an instance.
    ///
    /// An unknown instance id yields the neutral outcome so callers can
    /// fire-and-forget grants for plants that may have been burned.
    pub fn add_plant_experience(&mut self, instance: PlantId, amount: u64) -> PlantXpOutcome {
        let Some(plant) = self.garden.instance_mut(instance) else {
            return PlantXpOutcome::neutral();
        };
        let seed_cost = self.catalog.get(plant.species).map_or(0, |s| s.seed_cost);

        let outcome = progression::add_plant_experience(plant, seed_cost, amount);
        if outcome.leveled_up {
            debug!(
                instance = %instance,
                old = outcome.old_level,
                new = outcome.new_level,
                "plant leveled"
            );
        }
        if outcome.clipper_unlocked
            && outcome.old_level < progression::CLIPPER_UNLOCK_LEVEL
            && outcome.new_level >= progression::CLIPPER_UNLOCK_LEVEL
        {
            info!(instance = %instance, level = outcome.new_level, "clipper unlocked");
        }
        outcome
    }

    /// Grant clipper experience to an instance.
    ///
    /// Unknown ids and locked clippers both produce a not-leveled
    /// outcome.
    pub fn add_clipper_experience(&mut self, instance: PlantId, amount: f64) -> ClipperXpOutcome {
        let Some(plant) = self.garden.instance_mut(instance) else {
            return ClipperXpOutcome::neutral();
        };
        let outcome = progression::add_clipper_experience(plant, amount);
        if outcome.leveled_up {
            debug!(
                instance = %instance,
                old = outcome.old_level,
                new = outcome.new_level,
                "clipper leveled"
            );
        }
        outcome
    }

    // -----------------------------------------------------------------------
    // Economy
    // -----------------------------------------------------------------------

    /// Overwrite the coin balance. Rejects negative amounts.
    ///
    /// A correction hatch for external flows (the mini-game settles its
    /// winnings through this), not part of normal purchase accounting.
    pub fn set_coin_balance(&mut self, amount: i64) -> Result<u64, TransactionDeclined> {
        let Ok(value) = u64::try_from(amount) else {
            return Err(TransactionDeclined::NegativeBalance { requested: amount });
        };
        let previous = self.coins;
        self.coins = value;
        info!(previous, coins = value, "coin balance overwritten");
        Ok(value)
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    /// Shop read model. Rotates first when the rotation deadline passed.
    pub fn shop_view(&mut self, now: u64) -> ShopView {
        self.shop.refresh(&self.catalog, now, &mut self.rng);
        self.build_shop_view(now)
    }

    /// Pot read models. Advances growth to `now` first.
    pub fn pots_view(&mut self, now: u64) -> Vec<PotView> {
        self.garden.advance_growth(&self.catalog, now);
        self.build_pots_view()
    }

    /// Coins, shop, and pots in one payload, all refreshed to `now`.
    pub fn game_state_view(&mut self, now: u64) -> GameStateView {
        self.shop.refresh(&self.catalog, now, &mut self.rng);
        self.garden.advance_growth(&self.catalog, now);
        GameStateView {
            coins: self.coins,
            shop: self.build_shop_view(now),
            pots: self.build_pots_view(),
        }
    }

    fn build_shop_view(&self, now: u64) -> ShopView {
        let slots = self
            .shop
            .slots
            .iter()
            .filter_map(|slot| {
                let species = self.catalog.get(slot.species)?;
                Some(ShopSlotView {
                    species_id: species.slug.clone(),
                    species_name: species.display_name.clone(),
                    rarity: species.rarity_tier,
                    species_type: species.harvest_kind,
                    stock: slot.stock,
                    price: slot.current_price().unwrap_or(u64::MAX),
                    base_price: slot.base_price,
                    purchases: slot.purchases,
                    grow_time: species.growth_duration_secs,
                    sell_price: species.base_sale_value,
                })
            })
            .collect();
        ShopView {
            slots,
            refresh_at: self.shop.next_rotation_at,
            time_until_refresh: self.shop.seconds_until_rotation(now),
        }
    }

    fn build_pots_view(&self) -> Vec<PotView> {
        self.garden
            .pots()
            .map(|pot| {
                let occupant = pot
                    .instance
                    .and_then(|id| self.garden.instance(id).map(|plant| (id, plant)));
                match occupant {
                    None => PotView {
                        index: pot.index,
                        state: PotState::Empty,
                        instance_id: None,
                        plant: None,
                    },
                    Some((id, plant)) => PotView {
                        index: pot.index,
                        state: PotState::from(plant.growth_state),
                        instance_id: Some(id),
                        plant: self.build_plant_view(plant),
                    },
                }
            })
            .collect()
    }

    fn build_plant_view(&self, instance: &PlantInstance) -> Option<PlantView> {
        let species = self.catalog.get(instance.species)?;
        Some(PlantView {
            species_id: species.slug.clone(),
            species_name: species.display_name.clone(),
            species_type: species.harvest_kind,
            planted_at: instance.planted_at,
            grow_time: species.growth_duration_secs,
            rarity: instance.rarity,
            growth_state: instance.growth_state,
            level: instance.level,
            experience: instance.experience,
            required_xp: progression::experience_required(
                instance.level.saturating_add(1),
                species.seed_cost,
            ),
            clipper_unlocked: instance.clipper_unlocked,
            clipper_level: instance.clipper_level,
            multipliers: progression::level_multipliers(instance.level),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
