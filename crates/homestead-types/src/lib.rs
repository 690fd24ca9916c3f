//! Shared type definitions for the Homestead agent layer.
//!
//! This crate is the single source of truth for the plain-data types that
//! cross crate boundaries and the save-blob boundary. Snapshot types flow to
//! `TypeScript` via `ts-rs` for the browser game host.
//!
//! # Modules
//!
//! - [`ids`] -- Typed identifiers (agent UUIDs, catalog slugs, collaborator handles)
//! - [`enums`] -- Closed sets (personality, species, weather, time bucket, effects)
//! - [`structs`] -- [`Vec3`], item stacks, pet needs, and persistence snapshots

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    AbilityEffect, CropStage, FriendshipTier, Personality, Season, Species, TimeBucket, Weather,
};
pub use ids::{AbilityId, AgentId, CollectibleId, ItemId, PlotId};
pub use structs::{
    ItemStack, NpcSnapshot, PetNeeds, PetSnapshot, Vec3, WorldSnapshot, clamp_percent,
};
