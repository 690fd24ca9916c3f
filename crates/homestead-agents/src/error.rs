//! Error types for the homestead-agents crate.
//!
//! Bounds violations never surface here: friendship and needs are clamped.
//! These errors cover the "unknown id" and "precondition failed" cases that
//! player-triggered operations report back to their caller.

use homestead_types::{AgentId, ItemId};

/// Errors that can occur during agent operations.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// No villager with the given ID exists.
    #[error("villager not found: {0}")]
    NpcNotFound(AgentId),

    /// No pet with the given ID exists.
    #[error("pet not found: {0}")]
    PetNotFound(AgentId),

    /// The species key is not in the catalog.
    #[error("unknown species: {0}")]
    UnknownSpecies(String),

    /// The shelter has no free slot for another pet.
    #[error("shelter is full (capacity {capacity})")]
    ShelterFull {
        /// Maximum number of pets the shelter holds.
        capacity: usize,
    },

    /// The wallet could not cover an adoption fee.
    #[error("insufficient funds: price {price}, available {available}")]
    InsufficientFunds {
        /// The fee that was charged.
        price: u64,
        /// Coins the wallet held.
        available: u64,
    },

    /// The inventory did not hold the requested item.
    #[error("item not in inventory: {0}")]
    MissingItem(ItemId),

    /// The villager already accepted a gift today.
    #[error("villager already received a gift on day {day}")]
    GiftAlreadyGiven {
        /// The day the earlier gift was accepted.
        day: u32,
    },

    /// The operation needs a collaborator that is not attached.
    #[error("collaborator unavailable: {0}")]
    CollaboratorUnavailable(&'static str),
}
