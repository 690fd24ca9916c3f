//! In-memory collaborators for the Homestead agent layer.
//!
//! The agent layer reaches inventory, currency, gathering, and farming only
//! through the traits in `homestead_agents::collab`. This crate provides
//! plain in-memory implementations used by the demo engine and by tests;
//! a game host may substitute its own.
//!
//! # Modules
//!
//! - [`error`] -- Error types for host-facing operations ([`WorldError`])
//! - [`farming`] -- Farm plots with growth, watering, and withering ([`FarmField`])
//! - [`forage`] -- Forageable nodes and the gathering collaborator ([`ForageField`])
//! - [`inventory`] -- Slot-limited backpack and coin purse ([`SlotInventory`], [`CoinPurse`])

pub mod error;
pub mod farming;
pub mod forage;
pub mod inventory;

// Re-export primary types at crate root for convenience.
pub use error::WorldError;
pub use farming::{Crop, FarmConfig, FarmField};
pub use forage::{FORAGE_KINDS, ForageConfig, ForageField, ForageKind};
pub use inventory::{CoinPurse, InventoryConfig, SlotInventory};
