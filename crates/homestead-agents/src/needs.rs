//! Pet needs decay, care interactions, and level progression.
//!
//! Needs decay continuously, scaled by the frame delta:
//!
//! - Fullness (`hunger`) drops at a fixed hourly rate.
//! - Happiness drops fast while fullness is low, slowly while it is
//!   middling, and not at all otherwise.
//! - Intimacy drops only after a grace period without interaction.
//! - Health drops while fullness or happiness is critical and regenerates
//!   slowly otherwise.
//! - Energy regenerates only while the pet is not following.
//!
//! Every need is clamped to `[0, 100]` after each update.
//!
//! # Level-Up Formula
//!
//! Experience required to leave level `N` is `N * 50 + (N - 1) * 25`:
//! 50 at level 1, 125 at level 2, 200 at level 3. Crossing the threshold
//! raises the level by exactly one and resets experience to zero.

use homestead_types::PetNeeds;

use crate::config::PetConfig;
use crate::species::SpeciesProfile;

/// Highest reachable pet level.
pub const MAX_LEVEL: u32 = 30;

/// Seconds per hour, for rate scaling.
const SECS_PER_HOUR: f32 = 3600.0;

// ---------------------------------------------------------------------------
// Decay
// ---------------------------------------------------------------------------

/// Apply one frame of needs decay.
///
/// `idle_secs` is the time since the last feed, play, or pet.
pub fn decay(needs: &mut PetNeeds, dt_secs: f32, idle_secs: f64, following: bool, cfg: &PetConfig) {
    if !dt_secs.is_finite() || dt_secs <= 0.0 {
        return;
    }
    let hours = dt_secs / SECS_PER_HOUR;

    needs.hunger -= cfg.hunger_decay_per_hour * hours;

    let happiness_rate = if needs.hunger < cfg.hunger_low {
        cfg.happiness_decay_fast
    } else if needs.hunger < cfg.hunger_mid {
        cfg.happiness_decay_slow
    } else {
        0.0
    };
    needs.happiness -= happiness_rate * hours;

    if idle_secs / 3600.0 >= cfg.intimacy_grace_hours {
        needs.intimacy -= cfg.intimacy_decay_per_hour * hours;
    }

    if needs.hunger < cfg.critical_need || needs.happiness < cfg.critical_need {
        needs.health -= cfg.health_decay_per_hour * hours;
    } else {
        needs.health += cfg.health_regen_per_hour * hours;
    }

    if !following {
        needs.energy += cfg.energy_regen_per_hour * hours;
    }

    needs.clamp();
}

// ---------------------------------------------------------------------------
// Care interactions
// ---------------------------------------------------------------------------

/// Apply the stat gains of a meal.
pub fn apply_feed(needs: &mut PetNeeds, favorite: bool, cfg: &PetConfig) {
    if favorite {
        needs.hunger += cfg.feed_hunger_favorite;
        needs.happiness += cfg.feed_happiness_favorite;
    } else {
        needs.hunger += cfg.feed_hunger;
        needs.happiness += cfg.feed_happiness;
    }
    needs.clamp();
}

/// Apply the stat changes of a play session. Returns the experience earned.
pub fn apply_play(needs: &mut PetNeeds, favorite: bool, cfg: &PetConfig) -> u32 {
    needs.happiness += if favorite {
        cfg.play_happiness_favorite
    } else {
        cfg.play_happiness
    };
    needs.intimacy += cfg.play_intimacy;
    needs.energy -= cfg.play_energy_cost;
    needs.clamp();
    if favorite {
        cfg.play_experience_favorite
    } else {
        cfg.play_experience
    }
}

/// Apply the stat gains of petting.
pub fn apply_pet(needs: &mut PetNeeds, cfg: &PetConfig) {
    needs.intimacy += cfg.pet_intimacy;
    needs.happiness += cfg.pet_happiness;
    needs.clamp();
}

// ---------------------------------------------------------------------------
// Progression
// ---------------------------------------------------------------------------

/// Experience required to advance past `level`.
pub const fn experience_threshold(level: u32) -> u32 {
    level
        .saturating_mul(50)
        .saturating_add(level.saturating_sub(1).saturating_mul(25))
}

/// What changed when a pet levelled up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    /// The level just reached.
    pub new_level: u32,
    /// Whether this level granted an extra inventory slot.
    pub slot_gained: bool,
}

/// Level, experience, and the stats that grow with them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progression {
    level: u32,
    experience: u32,
    collection_radius: f32,
    speed: f32,
    slot_bonus: u32,
}

impl Progression {
    /// Level 1 with the species' base stats.
    pub const fn new(profile: &SpeciesProfile) -> Self {
        Self {
            level: 1,
            experience: 0,
            collection_radius: profile.base_collection_radius,
            speed: profile.base_speed,
            slot_bonus: 0,
        }
    }

    /// Rebuild from persisted values. The level is clamped to `1..=MAX_LEVEL`.
    pub const fn from_parts(
        level: u32,
        experience: u32,
        collection_radius: f32,
        speed: f32,
        slot_bonus: u32,
    ) -> Self {
        let level = if level == 0 {
            1
        } else if level > MAX_LEVEL {
            MAX_LEVEL
        } else {
            level
        };
        Self {
            level,
            experience,
            collection_radius,
            speed,
            slot_bonus,
        }
    }

    /// Current level.
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Experience toward the next level.
    pub const fn experience(&self) -> u32 {
        self.experience
    }

    /// Collection radius in world units.
    pub const fn collection_radius(&self) -> f32 {
        self.collection_radius
    }

    /// Movement speed in world units per second.
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Extra inventory slots earned from levels.
    pub const fn slot_bonus(&self) -> u32 {
        self.slot_bonus
    }

    /// Add experience, levelling up at most once.
    ///
    /// Returns the level-up if the threshold was reached. At
    /// [`MAX_LEVEL`] experience no longer accrues.
    pub fn add_experience(&mut self, amount: u32, cfg: &PetConfig) -> Option<LevelUp> {
        if amount == 0 || self.level >= MAX_LEVEL {
            return None;
        }
        self.experience = self.experience.saturating_add(amount);
        if self.experience < experience_threshold(self.level) {
            return None;
        }

        self.level = self.level.saturating_add(1);
        self.experience = 0;
        self.collection_radius += cfg.radius_per_level;
        self.speed += cfg.speed_per_level;

        let slot_gained = self.level.checked_rem(cfg.slot_bonus_every) == Some(0);
        if slot_gained {
            self.slot_bonus = self.slot_bonus.saturating_add(1);
        }

        Some(LevelUp {
            new_level: self.level,
            slot_gained,
        })
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use homestead_types::Species;

    use super::*;
    use crate::species::profile;

    fn hours(n: f32) -> f32 {
        n * SECS_PER_HOUR
    }

    #[test]
    fn thresholds_follow_the_formula() {
        assert_eq!(experience_threshold(1), 50);
        assert_eq!(experience_threshold(2), 125);
        assert_eq!(experience_threshold(4), 275);
    }

    #[test]
    fn play_pushes_level_one_pet_over_the_edge() {
        let cfg = PetConfig::default();
        let base = profile(Species::Dog);
        let mut progress = Progression::from_parts(1, 47, base.base_collection_radius, base.base_speed, 0);
        let mut needs = PetNeeds::default();

        let earned = apply_play(&mut needs, false, &cfg);
        assert_eq!(earned, 5);
        let level_up = progress.add_experience(earned, &cfg);

        assert_eq!(level_up, Some(LevelUp { new_level: 2, slot_gained: false }));
        assert_eq!(progress.level(), 2);
        assert_eq!(progress.experience(), 0);
        assert!(progress.collection_radius() > base.base_collection_radius);
        assert!(progress.speed() > base.base_speed);
    }

    #[test]
    fn exact_threshold_levels_once() {
        let cfg = PetConfig::default();
        let mut progress = Progression::new(&profile(Species::Cat));
        assert_eq!(progress.add_experience(49, &cfg), None);
        let up = progress.add_experience(1, &cfg);
        assert_eq!(up.map(|u| u.new_level), Some(2));
        assert_eq!(progress.experience(), 0);
    }

    #[test]
    fn every_fifth_level_grants_a_slot() {
        let cfg = PetConfig::default();
        let mut progress = Progression::from_parts(4, 0, 2.0, 3.0, 0);
        let up = progress.add_experience(experience_threshold(4), &cfg);
        assert_eq!(up, Some(LevelUp { new_level: 5, slot_gained: true }));
        assert_eq!(progress.slot_bonus(), 1);
    }

    #[test]
    fn max_level_stops_accruing() {
        let cfg = PetConfig::default();
        let mut progress = Progression::from_parts(MAX_LEVEL + 5, 0, 2.0, 3.0, 0);
        assert_eq!(progress.level(), MAX_LEVEL);
        assert_eq!(progress.add_experience(10_000, &cfg), None);
        assert_eq!(progress.experience(), 0);
    }

    #[test]
    fn well_fed_pet_keeps_its_happiness() {
        let cfg = PetConfig::default();
        let mut needs = PetNeeds::default();
        decay(&mut needs, hours(1.0), 0.0, true, &cfg);
        assert_eq!(needs.hunger, 75.0);
        assert_eq!(needs.happiness, 80.0);
    }

    #[test]
    fn hungry_pet_gets_sad_faster() {
        let cfg = PetConfig::default();
        let mut middling = PetNeeds { hunger: 40.0, ..PetNeeds::default() };
        let mut starving = PetNeeds { hunger: 15.0, ..PetNeeds::default() };
        decay(&mut middling, hours(1.0), 0.0, true, &cfg);
        decay(&mut starving, hours(1.0), 0.0, true, &cfg);
        assert!(starving.happiness < middling.happiness);
        assert!(middling.happiness < 80.0);
    }

    #[test]
    fn intimacy_waits_for_the_grace_period() {
        let cfg = PetConfig::default();
        let mut recent = PetNeeds::default();
        let mut neglected = PetNeeds::default();
        decay(&mut recent, hours(1.0), 3_600.0, true, &cfg);
        decay(&mut neglected, hours(1.0), 25.0 * 3_600.0, true, &cfg);
        assert_eq!(recent.intimacy, 10.0);
        assert_eq!(neglected.intimacy, 9.0);
    }

    #[test]
    fn health_falls_when_critical_and_recovers_otherwise() {
        let cfg = PetConfig::default();
        let mut sick = PetNeeds { hunger: 5.0, health: 50.0, ..PetNeeds::default() };
        let mut fine = PetNeeds { health: 50.0, ..PetNeeds::default() };
        decay(&mut sick, hours(1.0), 0.0, true, &cfg);
        decay(&mut fine, hours(1.0), 0.0, true, &cfg);
        assert!(sick.health < 50.0);
        assert!(fine.health > 50.0);
    }

    #[test]
    fn energy_only_regenerates_at_rest() {
        let cfg = PetConfig::default();
        let mut out = PetNeeds { energy: 50.0, ..PetNeeds::default() };
        let mut home = PetNeeds { energy: 50.0, ..PetNeeds::default() };
        decay(&mut out, hours(1.0), 0.0, true, &cfg);
        decay(&mut home, hours(1.0), 0.0, false, &cfg);
        assert_eq!(out.energy, 50.0);
        assert_eq!(home.energy, 62.0);
    }

    #[test]
    fn favorites_feed_better() {
        let cfg = PetConfig::default();
        let mut plain = PetNeeds { hunger: 10.0, ..PetNeeds::default() };
        let mut loved = PetNeeds { hunger: 10.0, ..PetNeeds::default() };
        apply_feed(&mut plain, false, &cfg);
        apply_feed(&mut loved, true, &cfg);
        assert!(loved.hunger > plain.hunger);
        assert!(loved.happiness > plain.happiness);
    }

    #[test]
    fn care_never_exceeds_bounds() {
        let cfg = PetConfig::default();
        let mut needs = PetNeeds::default();
        for _ in 0..50 {
            apply_feed(&mut needs, true, &cfg);
            apply_pet(&mut needs, &cfg);
            let _ = apply_play(&mut needs, true, &cfg);
        }
        assert_eq!(needs.hunger, 100.0);
        assert_eq!(needs.happiness, 100.0);
        assert_eq!(needs.intimacy, 100.0);
        assert_eq!(needs.energy, 0.0);
    }
}
