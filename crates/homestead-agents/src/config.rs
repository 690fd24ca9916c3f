//! Tunable parameters for villager and pet behavior.
//!
//! [`NpcConfig`] and [`PetConfig`] bundle every constant the agent layer
//! uses so that the orchestrator (and tests) can override defaults. Both
//! deserialize from the `npc` and `pet` sections of
//! `homestead-config.yaml`; missing keys fall back to [`Default`].

use serde::Deserialize;

use homestead_types::Vec3;

/// Rectangular walkable area on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldBounds {
    /// Western edge.
    pub min_x: f32,
    /// Eastern edge.
    pub max_x: f32,
    /// Southern edge.
    pub min_z: f32,
    /// Northern edge.
    pub max_z: f32,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self {
            min_x: -40.0,
            max_x: 40.0,
            min_z: -40.0,
            max_z: 40.0,
        }
    }
}

impl WorldBounds {
    /// Clamp a point into the bounds, keeping its height.
    pub fn clamp(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            point.x.clamp(self.min_x, self.max_x),
            point.y,
            point.z.clamp(self.min_z, self.max_z),
        )
    }
}

/// Villager behavior parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NpcConfig {
    /// Seconds between wander assignment rounds (default: 30).
    pub wander_interval_secs: f32,

    /// Probability a sedentary villager skips a wander round (default: 0.7).
    pub sedentary_skip_chance: f64,

    /// Walking speed in world units per second (default: 1.5).
    pub base_speed: f32,

    /// Distance at which a destination counts as reached (default: 0.3).
    pub arrival_threshold: f32,

    /// Speed multiplier applied after a conversation ends (default: 2).
    pub catch_up_multiplier: f32,

    /// How long the catch-up boost lasts, in seconds (default: 10).
    pub catch_up_secs: f32,

    /// Walk-cycle phase advance in radians per second (default: 8).
    pub animation_speed: f32,

    /// Peak limb swing in radians (default: 0.5).
    pub limb_amplitude: f32,

    /// Villager pairs closer than this may trigger an encounter (default: 3).
    pub encounter_radius: f32,

    /// Minimum seconds between encounters of the same pair (default: 600).
    pub encounter_window_secs: f64,

    /// Friendship gained from the first chat of the day (default: 1).
    pub daily_chat_bonus: i32,

    /// Friendship change for a favorite gift (default: +8).
    pub gift_favorite_delta: i32,

    /// Friendship change for a disliked gift (default: -5).
    pub gift_disliked_delta: i32,

    /// Friendship change for any other gift (default: +3).
    pub gift_neutral_delta: i32,
}

impl Default for NpcConfig {
    fn default() -> Self {
        Self {
            wander_interval_secs: 30.0,
            sedentary_skip_chance: 0.7,
            base_speed: 1.5,
            arrival_threshold: 0.3,
            catch_up_multiplier: 2.0,
            catch_up_secs: 10.0,
            animation_speed: 8.0,
            limb_amplitude: 0.5,
            encounter_radius: 3.0,
            encounter_window_secs: 600.0,
            daily_chat_bonus: 1,
            gift_favorite_delta: 8,
            gift_disliked_delta: -5,
            gift_neutral_delta: 3,
        }
    }
}

/// Pet behavior, needs, and progression parameters.
///
/// Decay and regeneration rates are expressed per hour of simulation time
/// and scaled by the frame delta.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PetConfig {
    // --- Following ---
    /// Beyond this distance a following pet closes in (default: 3).
    pub follow_far: f32,
    /// Within this distance a following pet backs away (default: 1.2).
    pub follow_near: f32,
    /// Back-away speed as a fraction of the pet's speed (default: 0.4).
    pub back_away_factor: f32,
    /// Distance at which home counts as reached (default: 0.3).
    pub arrival_threshold: f32,
    /// Walk-cycle phase advance in radians per second (default: 10).
    pub animation_speed: f32,
    /// Peak limb swing in radians (default: 0.35).
    pub limb_amplitude: f32,

    // --- Needs decay ---
    /// Fullness lost per hour (default: 5).
    pub hunger_decay_per_hour: f32,
    /// Below this fullness happiness decays fast (default: 20).
    pub hunger_low: f32,
    /// Below this fullness happiness decays slowly (default: 50).
    pub hunger_mid: f32,
    /// Happiness lost per hour while fullness is low (default: 4).
    pub happiness_decay_fast: f32,
    /// Happiness lost per hour while fullness is middling (default: 1.5).
    pub happiness_decay_slow: f32,
    /// Hours without interaction before intimacy decays (default: 24).
    pub intimacy_grace_hours: f64,
    /// Intimacy lost per hour once neglected (default: 1).
    pub intimacy_decay_per_hour: f32,
    /// Fullness or happiness below this harms health (default: 10).
    pub critical_need: f32,
    /// Health lost per hour in critical condition (default: 3).
    pub health_decay_per_hour: f32,
    /// Health regained per hour otherwise (default: 0.5).
    pub health_regen_per_hour: f32,
    /// Energy regained per hour while not following (default: 12).
    pub energy_regen_per_hour: f32,

    // --- Interactions ---
    /// Fullness from ordinary food (default: 20).
    pub feed_hunger: f32,
    /// Fullness from favorite food (default: 35).
    pub feed_hunger_favorite: f32,
    /// Happiness from ordinary food (default: 5).
    pub feed_happiness: f32,
    /// Happiness from favorite food (default: 12).
    pub feed_happiness_favorite: f32,
    /// Happiness from playing with an ordinary toy (default: 15).
    pub play_happiness: f32,
    /// Happiness from playing with the favorite toy (default: 25).
    pub play_happiness_favorite: f32,
    /// Energy spent per play session (default: 10).
    pub play_energy_cost: f32,
    /// Experience from playing with an ordinary toy (default: 5).
    pub play_experience: u32,
    /// Experience from playing with the favorite toy (default: 10).
    pub play_experience_favorite: u32,
    /// Intimacy from playing (default: 2).
    pub play_intimacy: f32,
    /// Intimacy from petting (default: 5).
    pub pet_intimacy: f32,
    /// Happiness from petting (default: 3).
    pub pet_happiness: f32,

    // --- Abilities and growth ---
    /// Chance a rare-explore dispatch finds something (default: 0.1).
    pub rare_find_chance: f64,
    /// Collection radius gained per level (default: 0.5).
    pub radius_per_level: f32,
    /// Speed gained per level (default: 0.1).
    pub speed_per_level: f32,
    /// Every this many levels the pet earns an inventory slot (default: 5).
    pub slot_bonus_every: u32,
}

impl Default for PetConfig {
    fn default() -> Self {
        Self {
            follow_far: 3.0,
            follow_near: 1.2,
            back_away_factor: 0.4,
            arrival_threshold: 0.3,
            animation_speed: 10.0,
            limb_amplitude: 0.35,
            hunger_decay_per_hour: 5.0,
            hunger_low: 20.0,
            hunger_mid: 50.0,
            happiness_decay_fast: 4.0,
            happiness_decay_slow: 1.5,
            intimacy_grace_hours: 24.0,
            intimacy_decay_per_hour: 1.0,
            critical_need: 10.0,
            health_decay_per_hour: 3.0,
            health_regen_per_hour: 0.5,
            energy_regen_per_hour: 12.0,
            feed_hunger: 20.0,
            feed_hunger_favorite: 35.0,
            feed_happiness: 5.0,
            feed_happiness_favorite: 12.0,
            play_happiness: 15.0,
            play_happiness_favorite: 25.0,
            play_energy_cost: 10.0,
            play_experience: 5,
            play_experience_favorite: 10,
            play_intimacy: 2.0,
            pet_intimacy: 5.0,
            pet_happiness: 3.0,
            rare_find_chance: 0.1,
            radius_per_level: 0.5,
            speed_per_level: 0.1,
            slot_bonus_every: 5,
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn npc_defaults_match_documented_cadence() {
        let cfg = NpcConfig::default();
        assert_eq!(cfg.wander_interval_secs, 30.0);
        assert_eq!(cfg.catch_up_multiplier, 2.0);
        assert_eq!(cfg.catch_up_secs, 10.0);
        assert_eq!(cfg.encounter_radius, 3.0);
        assert_eq!(cfg.encounter_window_secs, 600.0);
    }

    #[test]
    fn pet_follow_thresholds_leave_a_gap() {
        let cfg = PetConfig::default();
        assert!(cfg.follow_near < cfg.follow_far);
        assert_eq!(cfg.play_experience, 5);
    }

    #[test]
    fn bounds_clamp_keeps_height() {
        let bounds = WorldBounds::default();
        let clamped = bounds.clamp(Vec3::new(100.0, 2.0, -100.0));
        assert_eq!(clamped, Vec3::new(40.0, 2.0, -40.0));
    }
}
