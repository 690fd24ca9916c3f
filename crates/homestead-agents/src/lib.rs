//! Villager and pet agents for the Homestead life simulation.
//!
//! This crate contains the autonomous-agent layer: everything that decides
//! how villagers and pets behave, without touching I/O. It sits between
//! `homestead-types` (plain data) and `homestead-core` (the per-frame
//! orchestrator). Other game systems are reached only through the
//! capability traits in [`collab`].
//!
//! # Modules
//!
//! - [`abilities`] -- Ability catalog and the per-frame scheduler ([`run_abilities`])
//! - [`animation`] -- Procedural walk cycle ([`WalkCycle`], [`LimbPose`])
//! - [`collab`] -- Collaborator traits ([`Inventory`], [`Wallet`], [`Gatherer`], [`Farmland`])
//! - [`config`] -- Tunable parameters ([`NpcConfig`], [`PetConfig`], [`WorldBounds`])
//! - [`cooldown`] -- Per-pet, per-ability cooldown ledger ([`CooldownRegistry`])
//! - [`dialogue`] -- Weighted, day-seeded dialogue selection
//! - [`encounter`] -- Villager proximity encounters ([`EncounterDetector`])
//! - [`error`] -- Error types for player-triggered operations ([`AgentError`])
//! - [`movement`] -- Movement state machines and steering
//! - [`needs`] -- Pet needs decay, care, and levelling ([`Progression`])
//! - [`npc`] -- The villager facade ([`Npc`])
//! - [`pet`] -- The pet facade ([`Pet`])
//! - [`seed`] -- Counter-based day seeds ([`DaySeed`])
//! - [`shelter`] -- Pet roster, adoption, and release ([`Shelter`])
//! - [`species`] -- Fixed species catalog

pub mod abilities;
pub mod animation;
pub mod collab;
pub mod config;
pub mod cooldown;
pub mod dialogue;
pub mod encounter;
pub mod error;
pub mod movement;
pub mod needs;
pub mod npc;
pub mod pet;
pub mod seed;
pub mod shelter;
pub mod species;

// Re-export primary types at crate root for convenience.
pub use abilities::{Ability, AbilityCatalog, AbilityOutcome, Dispatch, run_abilities};
pub use animation::{LimbPose, WalkCycle};
pub use collab::{Collectible, CropView, Farmland, Gatherer, Inventory, PlotView, Services, Wallet};
pub use config::{NpcConfig, PetConfig, WorldBounds};
pub use cooldown::CooldownRegistry;
pub use dialogue::{DialogueContext, DialoguePool, Speaker};
pub use encounter::{Encounter, EncounterDetector, Participant};
pub use error::AgentError;
pub use movement::{NpcMotion, PetMotion};
pub use needs::{MAX_LEVEL, Progression, experience_threshold};
pub use npc::{GiftReaction, Npc, NpcEvent, NpcProfile};
pub use pet::{Pet, PetEvent, PetLevelUp};
pub use seed::DaySeed;
pub use shelter::{Shelter, ShelterConfig};
pub use species::{SpeciesProfile, profile};
