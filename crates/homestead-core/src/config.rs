//! Configuration loading and typed config structures for the Homestead simulation.
//!
//! The canonical configuration lives in `homestead-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror the
//! YAML structure and a loader that reads the file. Every section has
//! defaults, so a missing key (or an empty file) falls back cleanly.

use std::path::Path;

use serde::Deserialize;

use homestead_agents::{NpcConfig, NpcProfile, PetConfig, ShelterConfig, WorldBounds};
use homestead_types::{ItemId, Personality, Vec3};
use homestead_world::{FarmConfig, ForageConfig, InventoryConfig};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `homestead-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// World-level settings (name, seed, frame pacing, bounds).
    #[serde(default)]
    pub world: WorldConfig,

    /// Game clock and calendar settings.
    #[serde(default)]
    pub time: TimeConfig,

    /// The fixed villager roster.
    #[serde(default)]
    pub village: VillageConfig,

    /// Pet shelter placement and capacity.
    #[serde(default)]
    pub shelter: ShelterConfig,

    /// Villager behavior tunables.
    #[serde(default)]
    pub npc: NpcConfig,

    /// Pet behavior tunables.
    #[serde(default)]
    pub pet: PetConfig,

    /// Player backpack and purse.
    #[serde(default)]
    pub inventory: InventoryConfig,

    /// Farm plot growth.
    #[serde(default)]
    pub farm: FarmConfig,

    /// Forage node population.
    #[serde(default)]
    pub forage: ForageConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `HOMESTEAD_SEED` overrides `world.seed`
    /// - `HOMESTEAD_MAX_FRAMES` overrides `world.max_frames`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.world.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable world name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Real-time milliseconds per frame.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,

    /// Frames to run before the engine exits (0 runs until interrupted).
    #[serde(default = "default_max_frames")]
    pub max_frames: u64,

    /// Walkable area.
    #[serde(default)]
    pub bounds: WorldBounds,
}

impl WorldConfig {
    /// Override seed and frame budget with environment variables when set.
    pub fn apply_env_overrides(&mut self) {
        if let Some(seed) = env_u64("HOMESTEAD_SEED") {
            self.seed = seed;
        }
        if let Some(frames) = env_u64("HOMESTEAD_MAX_FRAMES") {
            self.max_frames = frames;
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            frame_interval_ms: default_frame_interval_ms(),
            max_frames: default_max_frames(),
            bounds: WorldBounds::default(),
        }
    }
}

/// Game clock configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimeConfig {
    /// Game minutes that pass per real second.
    #[serde(default = "default_game_minutes_per_second")]
    pub game_minutes_per_second: f64,

    /// Hour the world starts at on day 1.
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,

    /// Days in one season.
    #[serde(default = "default_days_per_season")]
    pub days_per_season: u32,

    /// Ordered list of season names forming the annual cycle.
    #[serde(default = "default_seasons")]
    pub seasons: Vec<String>,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            game_minutes_per_second: default_game_minutes_per_second(),
            start_hour: default_start_hour(),
            days_per_season: default_days_per_season(),
            seasons: default_seasons(),
        }
    }
}

/// The villager roster.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VillageConfig {
    /// One entry per villager.
    #[serde(default = "default_villagers")]
    pub npcs: Vec<NpcProfile>,
}

impl Default for VillageConfig {
    fn default() -> Self {
        Self {
            npcs: default_villagers(),
        }
    }
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|val| val.trim().parse().ok())
}

fn default_world_name() -> String {
    "Willow Creek".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_frame_interval_ms() -> u64 {
    100
}

const fn default_max_frames() -> u64 {
    3_000
}

const fn default_game_minutes_per_second() -> f64 {
    1.0
}

const fn default_start_hour() -> u32 {
    6
}

const fn default_days_per_season() -> u32 {
    28
}

fn default_seasons() -> Vec<String> {
    vec![
        "spring".to_owned(),
        "summer".to_owned(),
        "autumn".to_owned(),
        "winter".to_owned(),
    ]
}

fn default_villagers() -> Vec<NpcProfile> {
    let villager = |name: &str, personality, x, z, favorite: &str, disliked: &str| NpcProfile {
        name: name.to_owned(),
        personality,
        spawn: Vec3::ground(x, z),
        friendship: 0,
        favorite_items: vec![ItemId::new(favorite)],
        disliked_items: vec![ItemId::new(disliked)],
    };
    vec![
        villager("Rosa", Personality::Cheerful, 4.0, 2.0, "sunflower", "slime"),
        villager("Otto", Personality::Grumpy, -6.0, 3.0, "coffee", "flowers"),
        villager("Mina", Personality::Shy, 2.0, -5.0, "shell", "bug"),
        villager("Kit", Personality::Energetic, 8.0, 8.0, "berries", "stone"),
        villager("Bram", Personality::Lazy, -3.0, -3.0, "pie", "pickaxe"),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.world.seed, 42);
        assert_eq!(config.time.days_per_season, 28);
        assert_eq!(config.time.seasons.len(), 4);
        assert_eq!(config.village.npcs.len(), 5);
        assert_eq!(config.npc.wander_interval_secs, 30.0);
        assert_eq!(config.shelter.capacity, 3);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
world:
  name: "Test Vale"
  seed: 123
  frame_interval_ms: 50
  max_frames: 10
  bounds:
    min_x: -10.0
    max_x: 10.0
    min_z: -10.0
    max_z: 10.0

time:
  game_minutes_per_second: 10.0
  start_hour: 20
  days_per_season: 7
  seasons: [winter]

village:
  npcs:
    - name: "Ada"
      personality: Grumpy
      spawn: { x: 1.0, y: 0.0, z: 2.0 }
      friendship: 60
      favorite_items: [coffee]

shelter:
  position: { x: 5.0, y: 0.0, z: 5.0 }
  capacity: 1

npc:
  encounter_radius: 4.0

pet:
  rare_find_chance: 0.5

inventory:
  slots: 8

farm:
  plots: 2

forage:
  target_nodes: 5
"#;

        let config = SimulationConfig::parse(yaml).unwrap();
        assert_eq!(config.world.name, "Test Vale");
        assert_eq!(config.world.bounds.max_x, 10.0);
        assert_eq!(config.time.start_hour, 20);
        assert_eq!(config.village.npcs.len(), 1);
        let ada = config.village.npcs.first().unwrap();
        assert_eq!(ada.personality, Personality::Grumpy);
        assert_eq!(ada.friendship, 60);
        assert!(ada.disliked_items.is_empty());
        assert_eq!(config.shelter.capacity, 1);
        assert_eq!(config.npc.encounter_radius, 4.0);
        assert_eq!(config.npc.encounter_window_secs, 600.0);
        assert_eq!(config.pet.rare_find_chance, 0.5);
        assert_eq!(config.inventory.slots, 8);
        assert_eq!(config.inventory.stack_limit, 99);
        assert_eq!(config.farm.plots, 2);
        assert_eq!(config.forage.target_nodes, 5);
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = SimulationConfig::parse("world:\n  seed: 7\n").unwrap();
        assert_eq!(config.world.seed, 7);
        assert_eq!(config.world.max_frames, 3_000);
        assert_eq!(config.time.days_per_season, 28);
        assert_eq!(config.village.npcs.len(), 5);
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(SimulationConfig::parse("").is_ok());
        assert!(SimulationConfig::parse("   \n").is_ok());
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let result = SimulationConfig::parse("world: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("homestead-config.yaml");
        if path.exists() {
            let config = SimulationConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
