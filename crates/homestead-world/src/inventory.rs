//! Slot-limited player inventory and coin purse.
//!
//! Each distinct item occupies one slot and a slot holds at most
//! `stack_limit` units. The slot count grows with pet carry bonuses. All
//! arithmetic is checked: no silent overflows, no panics.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use homestead_agents::{Inventory, Wallet};
use homestead_types::{ItemId, ItemStack};

use crate::error::WorldError;

/// Inventory sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Base slot count (default: 24).
    pub slots: u32,
    /// Units per slot (default: 99).
    pub stack_limit: u32,
    /// Starting coins (default: 1500).
    pub starting_coins: u64,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            slots: 24,
            stack_limit: 99,
            starting_coins: 1_500,
        }
    }
}

/// The player's backpack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotInventory {
    base_slots: u32,
    bonus_slots: u32,
    stack_limit: u32,
    items: BTreeMap<ItemId, u32>,
}

impl SlotInventory {
    /// An empty backpack.
    pub const fn new(slots: u32, stack_limit: u32) -> Self {
        Self {
            base_slots: slots,
            bonus_slots: 0,
            stack_limit,
            items: BTreeMap::new(),
        }
    }

    /// Total slots, including bonuses.
    pub const fn slots(&self) -> u32 {
        self.base_slots.saturating_add(self.bonus_slots)
    }

    /// Replace the bonus slot count (e.g. the sum of pet carry bonuses).
    pub fn set_bonus_slots(&mut self, bonus: u32) {
        if bonus != self.bonus_slots {
            debug!(bonus, "inventory bonus slots changed");
        }
        self.bonus_slots = bonus;
    }

    /// Slots currently in use.
    pub fn used_slots(&self) -> usize {
        self.items.len()
    }

    /// Every held stack, in item order.
    pub fn stacks(&self) -> Vec<ItemStack> {
        self.items
            .iter()
            .map(|(item, count)| ItemStack {
                item: item.clone(),
                count: *count,
            })
            .collect()
    }

    /// Add units of an item.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NoFreeSlot`] if the item is new and every slot
    /// is taken, or [`WorldError::StackFull`] if the stack would overflow.
    pub fn try_add(&mut self, item: &ItemId, count: u32) -> Result<u32, WorldError> {
        let current = self.items.get(item).copied();
        if current.is_none() && u32::try_from(self.items.len()).unwrap_or(u32::MAX) >= self.slots() {
            return Err(WorldError::NoFreeSlot {
                item: item.clone(),
                slots: self.slots(),
            });
        }
        let total = current
            .unwrap_or(0)
            .checked_add(count)
            .filter(|total| *total <= self.stack_limit)
            .ok_or_else(|| WorldError::StackFull {
                item: item.clone(),
                limit: self.stack_limit,
            })?;
        self.items.insert(item.clone(), total);
        Ok(total)
    }

    /// Remove units of an item, freeing the slot when it empties.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InsufficientItem`] if too few are held.
    pub fn try_remove(&mut self, item: &ItemId, count: u32) -> Result<u32, WorldError> {
        let available = self.item_count(item);
        let left = available
            .checked_sub(count)
            .ok_or_else(|| WorldError::InsufficientItem {
                item: item.clone(),
                requested: count,
                available,
            })?;
        if left == 0 {
            self.items.remove(item);
        } else {
            self.items.insert(item.clone(), left);
        }
        Ok(left)
    }
}

impl Inventory for SlotInventory {
    fn add_item(&mut self, item: &ItemId, count: u32) -> bool {
        self.try_add(item, count).is_ok()
    }

    fn remove_item(&mut self, item: &ItemId, count: u32) -> bool {
        self.try_remove(item, count).is_ok()
    }

    fn item_count(&self, item: &ItemId) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }
}

/// A plain coin balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoinPurse {
    coins: u64,
}

impl CoinPurse {
    /// A purse holding `coins`.
    pub const fn new(coins: u64) -> Self {
        Self { coins }
    }
}

impl Wallet for CoinPurse {
    fn coins(&self) -> u64 {
        self.coins
    }

    fn add_coins(&mut self, amount: u64) {
        self.coins = self.coins.saturating_add(amount);
    }

    fn spend_coins(&mut self, amount: u64) -> bool {
        match self.coins.checked_sub(amount) {
            Some(left) => {
                self.coins = left;
                true
            }
            None => false,
        }
    }
}
