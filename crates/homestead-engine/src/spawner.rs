//! Household seeding for the demo engine.
//!
//! The agent layer never owns inventory, coins, crops or forage. The demo
//! stands in for the game host here: it builds the in-memory collaborators
//! from `homestead-world`, fills the backpack with a starter pack, plants
//! the field, and scatters forage nodes across the map.

use rand::Rng;
use tracing::info;

use homestead_agents::{Farmland, Services};
use homestead_core::SimulationConfig;
use homestead_types::{ItemId, PlotId};
use homestead_world::{CoinPurse, FarmField, ForageField, SlotInventory};

use crate::error::EngineError;

/// Items the player starts with: food, toys, and gifts.
const STARTER_PACK: &[(&str, u32)] = &[
    ("bone", 3),
    ("fish", 3),
    ("carrot", 2),
    ("stick", 1),
    ("yarn_ball", 1),
    ("sunflower", 2),
    ("coffee", 1),
    ("pie", 1),
];

/// Produce planted round-robin across the field.
const STARTER_CROPS: &[&str] = &["turnip", "carrot", "potato"];

/// The player's side of the world: every collaborator the agents act on.
#[derive(Debug)]
pub struct Household {
    /// Backpack.
    pub inventory: SlotInventory,
    /// Coins.
    pub purse: CoinPurse,
    /// Farm plots.
    pub farm: FarmField,
    /// Forage nodes.
    pub forage: ForageField,
}

impl Household {
    /// Lend the collaborators to one frame of the agent layer.
    pub fn services(&mut self) -> Services<'_> {
        Services {
            inventory: Some(&mut self.inventory),
            gatherer: Some(&mut self.forage),
            farmland: Some(&mut self.farm),
        }
    }

    /// Water every planted crop. Returns how many were watered.
    pub fn rain(&mut self) -> usize {
        let planted: Vec<PlotId> = self
            .farm
            .plots()
            .into_iter()
            .filter(|plot| plot.crop.is_some())
            .map(|plot| plot.id)
            .collect();
        planted.into_iter().filter(|plot| self.farm.water(*plot)).count()
    }
}

/// Build and seed the household.
///
/// # Errors
///
/// Returns [`EngineError::World`] if the starter pack does not fit the
/// configured inventory or a plot cannot be planted.
pub fn seed_household<R: Rng + ?Sized>(
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<Household, EngineError> {
    let mut inventory = SlotInventory::new(config.inventory.slots, config.inventory.stack_limit);
    for (item, count) in STARTER_PACK {
        inventory.try_add(&ItemId::new(*item), *count)?;
    }

    let mut farm = FarmField::new(config.farm);
    for (plot, produce) in (0..config.farm.plots).zip(STARTER_CROPS.iter().cycle()) {
        farm.plant(PlotId(plot), *produce)?;
    }

    let mut forage = ForageField::new();
    let placed = forage.replenish(rng, &config.world.bounds, config.forage.target_nodes);

    info!(
        items = inventory.used_slots(),
        coins = config.inventory.starting_coins,
        plots = config.farm.plots,
        forage_nodes = placed,
        "Household seeded"
    );

    Ok(Household {
        inventory,
        purse: CoinPurse::new(config.inventory.starting_coins),
        farm,
        forage,
    })
}
