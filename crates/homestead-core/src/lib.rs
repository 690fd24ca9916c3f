//! World clock, weather, configuration, and frame orchestration for the
//! Homestead simulation.
//!
//! This crate drives the agent layer once per rendered frame: it advances
//! the game clock, rolls the day's weather, and runs every villager and pet
//! through movement, encounters, abilities, and needs in a fixed order.
//!
//! # Modules
//!
//! - [`clock`] -- Game clock with day, hour, season, and time-of-day bucket.
//! - [`config`] -- Configuration loading from `homestead-config.yaml` into
//!   strongly-typed structs.
//! - [`tick`] -- The [`AgentWorld`] orchestrator and its per-frame
//!   [`TickSummary`].
//! - [`weather`] -- Deterministic daily weather weighted by season.
//!
//! [`AgentWorld`]: tick::AgentWorld
//! [`TickSummary`]: tick::TickSummary

pub mod clock;
pub mod config;
pub mod tick;
pub mod weather;

pub use clock::{ClockError, WorldClock};
pub use config::{ConfigError, SimulationConfig};
pub use tick::{AgentWorld, Arrival, TickError, TickSummary};
pub use weather::WeatherSystem;
