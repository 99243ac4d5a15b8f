//! Species catalog: the immutable roster of plantable species.
//!
//! Every species carries a rarity tier (shop availability), a growth
//! duration, a base sale value, and a seed cost. The catalog is built once
//! at session creation and never mutated; everything else refers to species
//! through [`SpeciesId`] and resolves details here.

use beanstock_types::{HarvestKind, RarityTier, SpeciesId};

// ---------------------------------------------------------------------------
// SpeciesDefinition
// ---------------------------------------------------------------------------

/// Static template for one plant species.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesDefinition {
    /// Catalog identity of this species.
    pub id: SpeciesId,
    /// Stable wire identifier (`"coffee_beanstalk"`).
    pub slug: String,
    /// Player-facing display name (`"Coffee Beanstalk"`).
    pub display_name: String,
    /// How a mature instance is harvested.
    pub harvest_kind: HarvestKind,
    /// Shop availability tier.
    pub rarity_tier: RarityTier,
    /// Seconds from planting to ready.
    pub growth_duration_secs: u64,
    /// Base sale value of one harvested unit, before multipliers.
    pub base_sale_value: u64,
    /// Base shop price of one seed, before the repeat-purchase tax.
    pub seed_cost: u64,
}

// ---------------------------------------------------------------------------
// SpeciesCatalog
// ---------------------------------------------------------------------------

/// The full species roster, indexed by [`SpeciesId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesCatalog {
    species: Vec<SpeciesDefinition>,
}

impl SpeciesCatalog {
    /// Create an empty catalog. Mostly useful in tests that want a
    /// hand-rolled roster.
    pub const fn new() -> Self {
        Self {
            species: Vec::new(),
        }
    }

    /// Register a species and return the id it was assigned.
    ///
    /// Ids are dense indices in registration order. Returns `None` if the
    /// roster somehow exceeds the id space (not reachable with any sane
    /// roster size).
    pub fn register(
        &mut self,
        slug: &str,
        display_name: &str,
        harvest_kind: HarvestKind,
        rarity_tier: RarityTier,
        growth_duration_secs: u64,
        base_sale_value: u64,
        seed_cost: u64,
    ) -> Option<SpeciesId> {
        let index = u16::try_from(self.species.len()).ok()?;
        let id = SpeciesId::from_index(index);
        self.species.push(SpeciesDefinition {
            id,
            slug: String::from(slug),
            display_name: String::from(display_name),
            harvest_kind,
            rarity_tier,
            growth_duration_secs,
            base_sale_value,
            seed_cost,
        });
        Some(id)
    }

    /// The standard twenty-species roster.
    #[allow(clippy::too_many_lines)]
    pub fn standard() -> Self {
        use HarvestKind::{Cutter, Picker};
        use RarityTier::{Common, Godly, Legendary, Mythical, Rare, UltraMythical, Uncommon};

        let mut catalog = Self::new();
        // (slug, display name, kind, tier, grow secs, sale value, seed cost)
        let _ = catalog.register("beanstalk", "Beanstalk", Picker, Common, 25, 14, 120);
        let _ = catalog.register("snap_pea", "Snap Pea", Picker, Common, 75, 90, 560);
        let _ = catalog.register(
            "jellybean_vine",
            "Jellybean Vine",
            Picker,
            Uncommon,
            90,
            170,
            1_285,
        );
        let _ = catalog.register("bamboo_bean", "Bamboo-Bean", Cutter, Uncommon, 120, 300, 5_410);
        let _ = catalog.register(
            "coffee_beanstalk",
            "Coffee Beanstalk",
            Picker,
            Uncommon,
            120,
            540,
            9_300,
        );
        let _ = catalog.register("thunder_pod", "Thunder Pod", Cutter, Rare, 150, 970, 17_000);
        let _ = catalog.register("frost_pea", "Frost Pea", Picker, Rare, 150, 2_700, 31_000);
        let _ = catalog.register("choco_vine", "Choco Vine", Picker, Rare, 180, 3_500, 35_200);
        let _ = catalog.register("ironvine", "Ironvine", Cutter, Legendary, 210, 15_300, 90_000);
        let _ = catalog.register("honeyvine", "Honeyvine", Picker, Legendary, 180, 19_300, 180_000);
        let _ = catalog.register("sunbean", "Sunbean", Picker, Legendary, 240, 25_500, 193_000);
        let _ = catalog.register("moonbean", "Moonbean", Picker, Mythical, 240, 43_000, 253_000);
        let _ = catalog.register(
            "cloud_creeper",
            "Cloud Creeper",
            Picker,
            Mythical,
            270,
            49_000,
            295_000,
        );
        let _ = catalog.register(
            "royal_stalk",
            "Royal Stalk",
            Cutter,
            UltraMythical,
            300,
            86_000,
            465_000,
        );
        let _ = catalog.register(
            "crystal_bean",
            "Crystal Bean",
            Picker,
            UltraMythical,
            300,
            120_000,
            600_000,
        );
        let _ = catalog.register(
            "neon_soy",
            "Neon Soy",
            Cutter,
            UltraMythical,
            330,
            160_000,
            570_000,
        );
        let _ = catalog.register("vinecorn", "Vinecorn", Cutter, Godly, 240, 210_000, 1_200_000);
        let _ = catalog.register("fire_pod", "Fire Pod", Cutter, Godly, 360, 280_000, 1_800_000);
        let _ = catalog.register(
            "shadow_bean",
            "Shadow Bean",
            Picker,
            Godly,
            300,
            320_000,
            3_182_000,
        );
        let _ = catalog.register(
            "prism_stalk",
            "Prism Stalk",
            Picker,
            Godly,
            480,
            340_000,
            5_620_000,
        );
        catalog
    }

    /// Look up a species by id.
    pub fn get(&self, id: SpeciesId) -> Option<&SpeciesDefinition> {
        self.species.get(id.index())
    }

    /// Look up a species by its wire identifier.
    pub fn by_slug(&self, slug: &str) -> Option<&SpeciesDefinition> {
        self.species.iter().find(|s| s.slug == slug)
    }

    /// Look up a species by display name. Case-sensitive exact match.
    pub fn find_by_name(&self, display_name: &str) -> Option<&SpeciesDefinition> {
        self.species.iter().find(|s| s.display_name == display_name)
    }

    /// Iterate the species of one rarity tier.
    pub fn tier_members(&self, tier: RarityTier) -> impl Iterator<Item = &SpeciesDefinition> {
        self.species.iter().filter(move |s| s.rarity_tier == tier)
    }

    /// Iterate the whole roster in id order.
    pub fn iter(&self) -> impl Iterator<Item = &SpeciesDefinition> {
        self.species.iter()
    }

    /// Number of species in the catalog.
    pub fn len(&self) -> usize {
        self.species.len()
    }

    /// Whether the catalog has no species.
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

impl Default for SpeciesCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
