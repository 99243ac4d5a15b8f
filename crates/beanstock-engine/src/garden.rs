//! Pot and plant lifecycle: the twelve planting sites and their instances.
//!
//! Pots are fixed identities created once per session. Plant instances live
//! in an id-keyed table owned by the [`Garden`]; a pot holds at most a
//! reference into that table. Growth is advanced lazily: callers invoke
//! [`Garden::advance_growth`] before any read that must be current, there is
//! no background timer.

use std::collections::BTreeMap;

use beanstock_types::{CosmeticRarity, GrowthState, PlantId, PotState, SpeciesId};

use crate::catalog::SpeciesCatalog;
use crate::error::TransactionDeclined;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of pots in a garden. Fixed for the life of the session.
pub const POT_COUNT: u8 = 12;

// ---------------------------------------------------------------------------
// PlantInstance
// ---------------------------------------------------------------------------

/// One concrete planted seed with its own rarity roll, growth timer, and
/// leveling progress.
///
/// The clipper fields are always present with locked/zero defaults; they
/// are session-scoped and never leave the process through a snapshot.
/// There is deliberately no serde derive here: the only serializable form
/// of an instance is the snapshot record, which cannot express clipper
/// state at all.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantInstance {
    /// Species this instance was grown from.
    pub species: SpeciesId,
    /// Unix timestamp of planting.
    pub planted_at: u64,
    /// Cosmetic rarity rolled at planting, immutable.
    pub rarity: CosmeticRarity,
    /// Current growth state.
    pub growth_state: GrowthState,
    /// Current level, starts at 1, unbounded.
    pub level: u32,
    /// Experience toward the next level.
    pub experience: u64,
    /// Whether the clipper has been unlocked (at level 25, permanent).
    pub clipper_unlocked: bool,
    /// Clipper level, 0 while locked, capped at 25.
    pub clipper_level: u32,
    /// Clipper experience toward the next clipper level. Fractional grants
    /// are part of the contract, hence the float.
    pub clipper_experience: f64,
}

impl PlantInstance {
    /// Create a freshly sown instance: level 1, no experience, growing,
    /// clipper locked.
    pub const fn sow(species: SpeciesId, planted_at: u64, rarity: CosmeticRarity) -> Self {
        Self {
            species,
            planted_at,
            rarity,
            growth_state: GrowthState::Growing,
            level: 1,
            experience: 0,
            clipper_unlocked: false,
            clipper_level: 0,
            clipper_experience: 0.0,
        }
    }

    /// Unix timestamp at which this instance finishes growing.
    pub const fn matures_at(&self, growth_duration_secs: u64) -> u64 {
        self.planted_at.saturating_add(growth_duration_secs)
    }
}

// ---------------------------------------------------------------------------
// Pot
// ---------------------------------------------------------------------------

/// One of the twelve fixed planting sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pot {
    /// Fixed identity, 0 through 11.
    pub index: u8,
    /// The occupying instance, if any.
    pub instance: Option<PlantId>,
}

// ---------------------------------------------------------------------------
// Garden
// ---------------------------------------------------------------------------

/// The pot array and the instance table behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct Garden {
    pots: Vec<Pot>,
    instances: BTreeMap<PlantId, PlantInstance>,
}

impl Garden {
    /// Create a garden of [`POT_COUNT`] empty pots.
    pub fn new() -> Self {
        Self {
            pots: (0..POT_COUNT)
                .map(|index| Pot {
                    index,
                    instance: None,
                })
                .collect(),
            instances: BTreeMap::new(),
        }
    }

    /// Borrow a pot by index.
    pub fn pot(&self, index: usize) -> Option<&Pot> {
        self.pots.get(index)
    }

    /// Iterate all pots in index order.
    pub fn pots(&self) -> impl Iterator<Item = &Pot> {
        self.pots.iter()
    }

    /// Number of pots (always [`POT_COUNT`]).
    pub fn pot_count(&self) -> usize {
        self.pots.len()
    }

    /// Derived state of a pot: its instance's growth state, or empty.
    ///
    /// The pot never stores a state of its own, so it can never disagree
    /// with its instance.
    pub fn pot_state(&self, index: usize) -> Option<PotState> {
        let pot = self.pots.get(index)?;
        let state = pot
            .instance
            .and_then(|id| self.instances.get(&id))
            .map_or(PotState::Empty, |instance| {
                PotState::from(instance.growth_state)
            });
        Some(state)
    }

    /// Plant an instance into an empty pot.
    ///
    /// Declines without mutation when the pot does not exist or is
    /// occupied. On success the instance joins the table and the pot binds
    /// to it.
    pub fn plant(
        &mut self,
        pot_index: usize,
        instance: PlantInstance,
    ) -> Result<PlantId, TransactionDeclined> {
        let pot_count = self.pots.len();
        let Some(pot) = self.pots.get_mut(pot_index) else {
            return Err(TransactionDeclined::PotOutOfRange {
                pot_index,
                pot_count,
            });
        };
        if pot.instance.is_some() {
            return Err(TransactionDeclined::PotOccupied { pot_index });
        }

        let id = PlantId::new();
        pot.instance = Some(id);
        self.instances.insert(id, instance);
        Ok(id)
    }

    /// Burn whatever occupies a pot: delete the instance, empty the pot.
    ///
    /// All-or-nothing by construction. Declines when the pot does not
    /// exist or is already empty. Returns the id of the destroyed instance.
    pub fn burn(&mut self, pot_index: usize) -> Result<PlantId, TransactionDeclined> {
        let pot_count = self.pots.len();
        let Some(pot) = self.pots.get_mut(pot_index) else {
            return Err(TransactionDeclined::PotOutOfRange {
                pot_index,
                pot_count,
            });
        };
        let Some(id) = pot.instance.take() else {
            return Err(TransactionDeclined::PotAlreadyEmpty { pot_index });
        };
        self.instances.remove(&id);
        Ok(id)
    }

    /// Advance every growing instance whose duration has elapsed to ready.
    ///
    /// Returns the number of instances that transitioned. Idempotent for a
    /// fixed `now`.
    pub fn advance_growth(&mut self, catalog: &SpeciesCatalog, now: u64) -> u32 {
        let mut transitioned: u32 = 0;
        for pot in &self.pots {
            let Some(id) = pot.instance else {
                continue;
            };
            let Some(instance) = self.instances.get_mut(&id) else {
                continue;
            };
            if instance.growth_state != GrowthState::Growing {
                continue;
            }
            let Some(species) = catalog.get(instance.species) else {
                continue;
            };
            if now >= instance.matures_at(species.growth_duration_secs) {
                instance.growth_state = GrowthState::Ready;
                transitioned = transitioned.saturating_add(1);
            }
        }
        transitioned
    }

    /// Look up an instance by id.
    pub fn instance(&self, id: PlantId) -> Option<&PlantInstance> {
        self.instances.get(&id)
    }

    /// Mutably look up an instance by id.
    pub fn instance_mut(&mut self, id: PlantId) -> Option<&mut PlantInstance> {
        self.instances.get_mut(&id)
    }

    /// Iterate all live instances.
    pub fn instances(&self) -> impl Iterator<Item = (&PlantId, &PlantInstance)> {
        self.instances.iter()
    }

    /// Number of occupied pots.
    pub fn occupied_count(&self) -> usize {
        self.pots.iter().filter(|p| p.instance.is_some()).count()
    }

    /// Rebind a pot to an instance during snapshot restore.
    ///
    /// Not part of normal gameplay flow; [`plant`](Self::plant) is the
    /// gameplay path.
    pub(crate) fn restore_binding(
        &mut self,
        pot_index: usize,
        id: PlantId,
        instance: PlantInstance,
    ) -> bool {
        let Some(pot) = self.pots.get_mut(pot_index) else {
            return false;
        };
        pot.instance = Some(id);
        self.instances.insert(id, instance);
        true
    }
}

impl Default for Garden {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    fn beanstalk(catalog: &SpeciesCatalog) -> SpeciesId {
        catalog.by_slug("beanstalk").unwrap().id
    }

    #[test]
    fn new_garden_has_twelve_empty_pots() {
        let garden = Garden::new();
        assert_eq!(garden.pot_count(), 12);
        for index in 0..12 {
            assert_eq!(garden.pot_state(index), Some(PotState::Empty));
        }
        assert_eq!(garden.occupied_count(), 0);
    }

    #[test]
    fn plant_binds_instance_and_sets_growing() {
        let catalog = SpeciesCatalog::standard();
        let mut garden = Garden::new();
        let species = beanstalk(&catalog);

        let id = garden
            .plant(0, PlantInstance::sow(species, 100, CosmeticRarity::plain()))
            .unwrap();
        assert_eq!(garden.pot_state(0), Some(PotState::Growing));
        assert_eq!(garden.instance(id).unwrap().level, 1);
        assert_eq!(garden.occupied_count(), 1);
    }

    #[test]
    fn plant_declines_occupied_pot() {
        let catalog = SpeciesCatalog::standard();
        let mut garden = Garden::new();
        let species = beanstalk(&catalog);

        garden
            .plant(3, PlantInstance::sow(species, 0, CosmeticRarity::plain()))
            .unwrap();
        let err = garden
            .plant(3, PlantInstance::sow(species, 5, CosmeticRarity::plain()))
            .unwrap_err();
        assert_eq!(err, TransactionDeclined::PotOccupied { pot_index: 3 });
        assert_eq!(garden.occupied_count(), 1);
    }

    #[test]
    fn plant_declines_out_of_range_pot() {
        let catalog = SpeciesCatalog::standard();
        let mut garden = Garden::new();
        let species = beanstalk(&catalog);

        let err = garden
            .plant(12, PlantInstance::sow(species, 0, CosmeticRarity::plain()))
            .unwrap_err();
        assert_eq!(
            err,
            TransactionDeclined::PotOutOfRange {
                pot_index: 12,
                pot_count: 12
            }
        );
    }

    #[test]
    fn growth_advances_exactly_at_maturity() {
        let catalog = SpeciesCatalog::standard();
        let mut garden = Garden::new();
        // Beanstalk grows in 25 seconds.
        let species = beanstalk(&catalog);
        garden
            .plant(0, PlantInstance::sow(species, 100, CosmeticRarity::plain()))
            .unwrap();

        assert_eq!(garden.advance_growth(&catalog, 124), 0);
        assert_eq!(garden.pot_state(0), Some(PotState::Growing));

        assert_eq!(garden.advance_growth(&catalog, 125), 1);
        assert_eq!(garden.pot_state(0), Some(PotState::Ready));

        // Already ready: nothing further to advance.
        assert_eq!(garden.advance_growth(&catalog, 200), 0);
    }

    #[test]
    fn growth_advances_multiple_pots_independently() {
        let catalog = SpeciesCatalog::standard();
        let mut garden = Garden::new();
        let fast = beanstalk(&catalog); // 25s
        let slow = catalog.by_slug("snap_pea").unwrap().id; // 75s

        garden
            .plant(0, PlantInstance::sow(fast, 0, CosmeticRarity::plain()))
            .unwrap();
        garden
            .plant(1, PlantInstance::sow(slow, 0, CosmeticRarity::plain()))
            .unwrap();

        assert_eq!(garden.advance_growth(&catalog, 30), 1);
        assert_eq!(garden.pot_state(0), Some(PotState::Ready));
        assert_eq!(garden.pot_state(1), Some(PotState::Growing));

        assert_eq!(garden.advance_growth(&catalog, 80), 1);
        assert_eq!(garden.pot_state(1), Some(PotState::Ready));
    }

    #[test]
    fn burn_removes_instance_and_empties_pot() {
        let catalog = SpeciesCatalog::standard();
        let mut garden = Garden::new();
        let species = beanstalk(&catalog);
        let id = garden
            .plant(5, PlantInstance::sow(species, 0, CosmeticRarity::plain()))
            .unwrap();

        let burned = garden.burn(5).unwrap();
        assert_eq!(burned, id);
        assert_eq!(garden.pot_state(5), Some(PotState::Empty));
        assert!(garden.instance(id).is_none());
    }

    #[test]
    fn burn_works_from_ready_state_too() {
        let catalog = SpeciesCatalog::standard();
        let mut garden = Garden::new();
        let species = beanstalk(&catalog);
        garden
            .plant(2, PlantInstance::sow(species, 0, CosmeticRarity::plain()))
            .unwrap();
        garden.advance_growth(&catalog, 1_000);
        assert_eq!(garden.pot_state(2), Some(PotState::Ready));

        assert!(garden.burn(2).is_ok());
        assert_eq!(garden.pot_state(2), Some(PotState::Empty));
    }

    #[test]
    fn burn_declines_empty_pot_without_side_effects() {
        let mut garden = Garden::new();
        let err = garden.burn(4).unwrap_err();
        assert_eq!(err, TransactionDeclined::PotAlreadyEmpty { pot_index: 4 });
        assert_eq!(garden.occupied_count(), 0);
    }

    #[test]
    fn burn_declines_out_of_range_pot() {
        let mut garden = Garden::new();
        let err = garden.burn(40).unwrap_err();
        assert_eq!(
            err,
            TransactionDeclined::PotOutOfRange {
                pot_index: 40,
                pot_count: 12
            }
        );
    }

    #[test]
    fn sown_instance_has_locked_clipper() {
        let catalog = SpeciesCatalog::standard();
        let instance = PlantInstance::sow(beanstalk(&catalog), 0, CosmeticRarity::plain());
        assert!(!instance.clipper_unlocked);
        assert_eq!(instance.clipper_level, 0);
        assert!(instance.clipper_experience.abs() < f64::EPSILON);
    }
}
