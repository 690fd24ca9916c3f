//! Pet ability catalog and the per-frame ability scheduler.
//!
//! Every frame, each following pet walks its unlocked abilities. An ability
//! whose cooldown has reached zero is dispatched to its effect handler and
//! its cooldown is re-armed to the catalog duration, whether or not the
//! handler found anything to do. `Carry` abilities are static stat
//! modifiers and are never dispatched.
//!
//! Handlers talk to the world only through [`Services`]; a missing
//! collaborator turns the dispatch into [`AbilityOutcome::Nothing`].

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use tracing::{debug, warn};

use homestead_types::{AbilityEffect, AbilityId, AgentId, CropStage, ItemId, ItemStack, Vec3};

use crate::collab::{Services, deposit};
use crate::cooldown::CooldownRegistry;
use crate::pet::Pet;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Tool identifier pets present to the gathering collaborator.
pub const PET_TOOL: &str = "pet_paws";

/// Items a rare-explore dispatch can dig up.
pub const RARE_FINDS: &[&str] = &["amethyst", "ancient_coin", "truffle", "fossil", "pearl"];

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Immutable catalog entry for one ability.
#[derive(Debug, Clone, PartialEq)]
pub struct Ability {
    /// Catalog key.
    pub id: AbilityId,
    /// Pet level at which the ability unlocks.
    pub unlock_level: u32,
    /// Seconds between dispatches.
    pub cooldown_secs: f32,
    /// Kind of world effect.
    pub effect: AbilityEffect,
    /// Units found (rare explore) or slots granted (carry).
    pub magnitude: u32,
}

/// The shared, read-only ability catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AbilityCatalog {
    abilities: BTreeMap<AbilityId, Ability>,
}

impl AbilityCatalog {
    /// Build a catalog from entries. Later duplicates replace earlier ones.
    pub fn new(entries: impl IntoIterator<Item = Ability>) -> Self {
        Self {
            abilities: entries
                .into_iter()
                .map(|ability| (ability.id.clone(), ability))
                .collect(),
        }
    }

    /// The stock catalog shipped with the game.
    pub fn standard() -> Self {
        let entry = |id: &str, unlock_level, cooldown_secs, effect, magnitude| Ability {
            id: AbilityId::from(id),
            unlock_level,
            cooldown_secs,
            effect,
            magnitude,
        };
        Self::new([
            entry("forage", 1, 20.0, AbilityEffect::Collect, 1),
            entry("treasure_sniff", 3, 90.0, AbilityEffect::RareExplore, 1),
            entry("pest_patrol", 5, 60.0, AbilityEffect::Defend, 1),
            entry("garden_helper", 8, 45.0, AbilityEffect::Assist, 1),
            entry("pack_saddle", 10, 0.0, AbilityEffect::Carry, 4),
        ])
    }

    /// Look up an ability.
    pub fn get(&self, id: &AbilityId) -> Option<&Ability> {
        self.abilities.get(id)
    }

    /// Iterate every entry in key order.
    pub fn iter(&self) -> impl Iterator<Item = &Ability> {
        self.abilities.values()
    }

    /// Abilities whose level requirement is met at `level` and that are not
    /// already in `held`.
    pub fn newly_unlocked(&self, level: u32, held: &BTreeSet<AbilityId>) -> Vec<AbilityId> {
        self.abilities
            .values()
            .filter(|ability| ability.unlock_level <= level && !held.contains(&ability.id))
            .map(|ability| ability.id.clone())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// What an ability dispatch achieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbilityOutcome {
    /// Gathered the nearest collectible and deposited its yield.
    Collected {
        /// Items deposited.
        items: Vec<ItemStack>,
    },
    /// Dug up a rare item.
    RareFind {
        /// Item deposited.
        item: ItemId,
    },
    /// Cleared withered crops.
    PestsCleared {
        /// Plots cleared.
        plots: u32,
    },
    /// Tended the farm.
    FarmAssisted {
        /// Plots harvested.
        harvested: u32,
        /// Plots watered.
        watered: u32,
    },
    /// Eligible, but nothing to do this time.
    Nothing,
}

/// One ability dispatch, for the tick summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// The acting pet.
    pub pet: AgentId,
    /// The ability that fired.
    pub ability: AbilityId,
    /// Its effect category.
    pub effect: AbilityEffect,
    /// What happened.
    pub outcome: AbilityOutcome,
}

/// Run one frame of the scheduler for a single pet.
///
/// Cooldowns must already have been decremented for this frame. Pets that
/// are not following do nothing. Unlocked ids missing from the catalog are
/// skipped with a warning.
pub fn run_abilities<R: Rng + ?Sized>(
    pet: &Pet,
    catalog: &AbilityCatalog,
    cooldowns: &mut CooldownRegistry,
    services: &mut Services<'_>,
    rng: &mut R,
    rare_find_chance: f64,
) -> Vec<Dispatch> {
    if !pet.is_following() {
        return Vec::new();
    }

    let mut dispatches = Vec::new();
    for id in pet.unlocked_abilities() {
        let Some(ability) = catalog.get(id) else {
            warn!(pet = %pet.id(), ability = %id, "unlocked ability missing from catalog");
            continue;
        };
        if ability.effect == AbilityEffect::Carry {
            continue;
        }
        if !cooldowns.is_ready(pet.id(), id) {
            continue;
        }

        let outcome = match ability.effect {
            AbilityEffect::Collect => {
                collect_nearest(pet.position(), pet.collection_radius(), services)
            }
            AbilityEffect::RareExplore => {
                rare_explore(rng, rare_find_chance, ability.magnitude, services)
            }
            AbilityEffect::Defend => clear_withered(services),
            AbilityEffect::Assist => tend_farm(services),
            AbilityEffect::Carry => AbilityOutcome::Nothing,
        };
        cooldowns.arm(pet.id(), id, ability.cooldown_secs);

        debug!(pet = %pet.id(), ability = %id, ?outcome, "ability dispatched");
        dispatches.push(Dispatch {
            pet: pet.id(),
            ability: id.clone(),
            effect: ability.effect,
            outcome,
        });
    }
    dispatches
}

/// Gather the collectible nearest to `center` within `radius`.
pub fn collect_nearest(center: Vec3, radius: f32, services: &mut Services<'_>) -> AbilityOutcome {
    let (Some(gatherer), Some(inventory)) =
        (services.gatherer.as_deref_mut(), services.inventory.as_deref_mut())
    else {
        return AbilityOutcome::Nothing;
    };

    let nearest = gatherer
        .collectibles_near(center, radius)
        .into_iter()
        .filter(|item| item.position.flat_distance(center) <= radius)
        .min_by(|a, b| {
            a.position
                .flat_distance(center)
                .total_cmp(&b.position.flat_distance(center))
        });
    let Some(target) = nearest else {
        return AbilityOutcome::Nothing;
    };

    match gatherer.gather(&target, PET_TOOL) {
        Some(items) if !items.is_empty() => {
            deposit(inventory, &items);
            AbilityOutcome::Collected { items }
        }
        _ => AbilityOutcome::Nothing,
    }
}

/// Roll for a rare find, independent of position.
pub fn rare_explore<R: Rng + ?Sized>(
    rng: &mut R,
    chance: f64,
    units: u32,
    services: &mut Services<'_>,
) -> AbilityOutcome {
    let Some(inventory) = services.inventory.as_deref_mut() else {
        return AbilityOutcome::Nothing;
    };
    let chance = if chance.is_finite() { chance.clamp(0.0, 1.0) } else { 0.0 };
    if !rng.random_bool(chance) {
        return AbilityOutcome::Nothing;
    }
    let index = rng.random_range(0..RARE_FINDS.len());
    let Some(slug) = RARE_FINDS.get(index) else {
        return AbilityOutcome::Nothing;
    };
    let item = ItemId::from(*slug);
    if inventory.add_item(&item, units.max(1)) {
        AbilityOutcome::RareFind { item }
    } else {
        AbilityOutcome::Nothing
    }
}

/// Clear every withered crop.
pub fn clear_withered(services: &mut Services<'_>) -> AbilityOutcome {
    let Some(farmland) = services.farmland.as_deref_mut() else {
        return AbilityOutcome::Nothing;
    };
    let withered: Vec<_> = farmland
        .plots()
        .into_iter()
        .filter(|plot| plot.crop.is_some_and(|crop| crop.stage == CropStage::Withered))
        .map(|plot| plot.id)
        .collect();

    let plots = withered
        .into_iter()
        .filter(|id| farmland.clear(*id))
        .fold(0_u32, |acc, _| acc.saturating_add(1));

    if plots == 0 {
        AbilityOutcome::Nothing
    } else {
        AbilityOutcome::PestsCleared { plots }
    }
}

/// Harvest mature crops and water dry growing ones.
///
/// Harvests need an inventory to receive the yield; watering does not.
pub fn tend_farm(services: &mut Services<'_>) -> AbilityOutcome {
    let Some(farmland) = services.farmland.as_deref_mut() else {
        return AbilityOutcome::Nothing;
    };
    let mut inventory = services.inventory.as_deref_mut();

    let mut harvested = 0_u32;
    let mut watered = 0_u32;
    for plot in farmland.plots() {
        let Some(crop) = plot.crop else { continue };
        match crop.stage {
            CropStage::Mature => {
                let Some(inventory) = inventory.as_deref_mut() else {
                    continue;
                };
                if let Some(items) = farmland.harvest(plot.id) {
                    deposit(inventory, &items);
                    harvested = harvested.saturating_add(1);
                }
            }
            CropStage::Growing if !crop.watered => {
                if farmland.water(plot.id) {
                    watered = watered.saturating_add(1);
                }
            }
            CropStage::Seed | CropStage::Growing | CropStage::Withered => {}
        }
    }

    if harvested == 0 && watered == 0 {
        AbilityOutcome::Nothing
    } else {
        AbilityOutcome::FarmAssisted { harvested, watered }
    }
}
