//! Narrow interfaces to the systems the agent layer does not own.
//!
//! Inventory storage, currency, gathering, and farming live in other
//! subsystems. Agents only see these capability traits, so tests and the
//! demo engine can substitute in-memory implementations. Every call is
//! synchronous from the agent layer's point of view; a collaborator that
//! cannot act simply reports failure and the agent moves on.

use homestead_types::{CollectibleId, CropStage, ItemId, ItemStack, PlotId, Vec3};

/// Item storage owned by the player.
pub trait Inventory {
    /// Add `count` units of `item`. Returns `false` if the inventory refused.
    fn add_item(&mut self, item: &ItemId, count: u32) -> bool;

    /// Remove `count` units of `item`. Returns `false` if not enough are held.
    fn remove_item(&mut self, item: &ItemId, count: u32) -> bool;

    /// Units of `item` currently held.
    fn item_count(&self, item: &ItemId) -> u32;
}

/// Coin balance owned by the player.
pub trait Wallet {
    /// Current balance.
    fn coins(&self) -> u64;

    /// Credit coins.
    fn add_coins(&mut self, amount: u64);

    /// Debit coins. Returns `false` (and changes nothing) if the balance is short.
    fn spend_coins(&mut self, amount: u64) -> bool;
}

/// A collectible world object reported by the gathering collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct Collectible {
    /// Handle used to gather it.
    pub id: CollectibleId,
    /// World-object category (e.g. `"forage"`, `"stone"`).
    pub category: String,
    /// Where it sits.
    pub position: Vec3,
}

/// World-object gathering.
pub trait Gatherer {
    /// Collectibles whose position lies within `radius` of `center`.
    fn collectibles_near(&self, center: Vec3, radius: f32) -> Vec<Collectible>;

    /// Attempt to collect `target` with the given tool. Returns the yield on
    /// success, `None` if the object is gone or the tool does not fit.
    fn gather(&mut self, target: &Collectible, tool: &str) -> Option<Vec<ItemStack>>;
}

/// What the farming collaborator reports about one plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotView {
    /// Plot handle.
    pub id: PlotId,
    /// Crop on the plot, if any.
    pub crop: Option<CropView>,
}

/// Observable state of a planted crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropView {
    /// Growth stage.
    pub stage: CropStage,
    /// Whether the crop was watered today.
    pub watered: bool,
}

/// The farm plot model.
pub trait Farmland {
    /// Snapshot of every plot.
    fn plots(&self) -> Vec<PlotView>;

    /// Harvest a mature crop. Returns the yield, or `None` if nothing was ripe.
    fn harvest(&mut self, plot: PlotId) -> Option<Vec<ItemStack>>;

    /// Water a crop. Returns `false` if the plot had nothing to water.
    fn water(&mut self, plot: PlotId) -> bool;

    /// Remove whatever crop is on the plot. Returns `false` if it was empty.
    fn clear(&mut self, plot: PlotId) -> bool;
}

/// Collaborators lent to the agent layer for one frame.
///
/// Any field may be `None`; abilities that need a missing collaborator
/// quietly do nothing.
#[derive(Default)]
pub struct Services<'a> {
    /// Player inventory.
    pub inventory: Option<&'a mut dyn Inventory>,
    /// Gathering system.
    pub gatherer: Option<&'a mut dyn Gatherer>,
    /// Farm plots.
    pub farmland: Option<&'a mut dyn Farmland>,
}

impl core::fmt::Debug for Services<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Services")
            .field("inventory", &self.inventory.is_some())
            .field("gatherer", &self.gatherer.is_some())
            .field("farmland", &self.farmland.is_some())
            .finish()
    }
}

/// Deposit every stack into the inventory. Returns the units accepted.
pub fn deposit(inventory: &mut dyn Inventory, stacks: &[ItemStack]) -> u32 {
    stacks
        .iter()
        .filter(|stack| inventory.add_item(&stack.item, stack.count))
        .fold(0_u32, |acc, stack| acc.saturating_add(stack.count))
}
