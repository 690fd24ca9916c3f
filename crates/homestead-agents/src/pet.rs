//! The pet agent facade.
//!
//! A [`Pet`] composes movement ([`PetMotion`] plus steering and the walk
//! cycle), needs decay, care interactions, and progression. Ability
//! dispatch lives in [`crate::abilities`] and reads the pet through the
//! accessors below; cooldowns are owned by the caller's
//! [`crate::cooldown::CooldownRegistry`].

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use homestead_types::{AbilityEffect, AbilityId, AgentId, ItemId, PetNeeds, PetSnapshot, Species, Vec3};

use crate::abilities::AbilityCatalog;
use crate::animation::{LimbPose, WalkCycle};
use crate::config::PetConfig;
use crate::movement::{PetMotion, Steer, steer_toward};
use crate::needs::{self, Progression};
use crate::species::{SpeciesProfile, profile};

/// Slack around the follow ring so a pet parked on it stays still.
const HOLD_TOLERANCE: f32 = 1e-3;

/// Something notable that happened during a movement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetEvent {
    /// The pet reached the shelter and settled in.
    ArrivedHome,
}

/// What a level-up changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetLevelUp {
    /// The pet that levelled.
    pub pet: AgentId,
    /// The level just reached.
    pub level: u32,
    /// Abilities newly unlocked at this level.
    pub unlocked: Vec<AbilityId>,
    /// Whether an inventory slot was granted.
    pub slot_gained: bool,
}

/// A companion owned by the player.
#[derive(Debug, Clone, PartialEq)]
pub struct Pet {
    id: AgentId,
    name: String,
    species: Species,
    adopted_at: DateTime<Utc>,
    position: Vec3,
    facing: f32,
    motion: PetMotion,
    walk: WalkCycle,
    progression: Progression,
    needs: PetNeeds,
    unlocked: BTreeSet<AbilityId>,
    last_interaction_secs: f64,
}

impl Pet {
    /// A freshly adopted level-1 pet resting at `home`.
    ///
    /// Abilities available at level 1 are unlocked immediately.
    pub fn adopt(
        name: impl Into<String>,
        species: Species,
        home: Vec3,
        now_secs: f64,
        catalog: &AbilityCatalog,
    ) -> Self {
        let base = profile(species);
        let progression = Progression::new(&base);
        let unlocked = catalog
            .newly_unlocked(progression.level(), &BTreeSet::new())
            .into_iter()
            .collect();
        Self {
            id: AgentId::new(),
            name: name.into(),
            species,
            adopted_at: Utc::now(),
            position: home,
            facing: 0.0,
            motion: PetMotion::AtHome,
            walk: WalkCycle::new(),
            progression,
            needs: PetNeeds::default(),
            unlocked,
            last_interaction_secs: now_secs,
        }
    }

    // --- Accessors ---

    /// Stable identity.
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Catalog species.
    pub const fn species(&self) -> Species {
        self.species
    }

    /// Catalog entry for this pet's species.
    pub const fn profile(&self) -> SpeciesProfile {
        profile(self.species)
    }

    /// Current position.
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Facing angle in radians.
    pub const fn facing(&self) -> f32 {
        self.facing
    }

    /// Movement state.
    pub const fn motion(&self) -> PetMotion {
        self.motion
    }

    /// Whether the pet is trailing the player.
    pub fn is_following(&self) -> bool {
        self.motion == PetMotion::Following
    }

    /// Whether the pet is resting in the shelter.
    pub fn is_home(&self) -> bool {
        self.motion == PetMotion::AtHome
    }

    /// Limb offsets from the last movement step.
    pub const fn pose(&self) -> LimbPose {
        self.walk.pose()
    }

    /// Current needs.
    pub const fn needs(&self) -> &PetNeeds {
        &self.needs
    }

    /// Current level.
    pub const fn level(&self) -> u32 {
        self.progression.level()
    }

    /// Experience toward the next level.
    pub const fn experience(&self) -> u32 {
        self.progression.experience()
    }

    /// Collection radius in world units.
    pub const fn collection_radius(&self) -> f32 {
        self.progression.collection_radius()
    }

    /// Movement speed in world units per second.
    pub const fn speed(&self) -> f32 {
        self.progression.speed()
    }

    /// Abilities unlocked so far.
    pub const fn unlocked_abilities(&self) -> &BTreeSet<AbilityId> {
        &self.unlocked
    }

    /// Simulation time of the last feed, play, or pet.
    pub const fn last_interaction_secs(&self) -> f64 {
        self.last_interaction_secs
    }

    /// Extra inventory slots: one per fifth level plus every unlocked
    /// carry ability's magnitude. Static; never dispatched.
    pub fn carry_bonus(&self, catalog: &AbilityCatalog) -> u32 {
        self.unlocked
            .iter()
            .filter_map(|id| catalog.get(id))
            .filter(|ability| ability.effect == AbilityEffect::Carry)
            .fold(self.progression.slot_bonus(), |acc, ability| {
                acc.saturating_add(ability.magnitude)
            })
    }

    // --- Movement ---

    /// Start or stop following the player.
    ///
    /// A pet told to stop heads back to the shelter; one already at home
    /// stays put.
    pub fn set_following(&mut self, follow: bool) {
        self.motion = match (follow, self.motion) {
            (true, _) => PetMotion::Following,
            (false, PetMotion::AtHome) => PetMotion::AtHome,
            (false, PetMotion::Following | PetMotion::Returning) => PetMotion::Returning,
        };
        debug!(pet = %self.id, motion = ?self.motion, "follow toggled");
    }

    /// Advance movement by one frame.
    ///
    /// Following pets keep a gap between `follow_near` and `follow_far`
    /// from the player. Returning pets steer to `home` and settle on
    /// arrival.
    pub fn step(&mut self, dt: f32, player: Vec3, home: Vec3, cfg: &PetConfig) -> Option<PetEvent> {
        match self.motion {
            PetMotion::Following => {
                self.follow(dt, player, cfg);
                None
            }
            PetMotion::Returning => {
                let speed = self.speed();
                match steer_toward(&mut self.position, home, speed, dt, cfg.arrival_threshold) {
                    Steer::Arrived => {
                        self.position = home;
                        self.motion = PetMotion::AtHome;
                        self.walk.reset();
                        debug!(pet = %self.id, "arrived home");
                        Some(PetEvent::ArrivedHome)
                    }
                    Steer::Moved { heading } => {
                        self.facing = heading;
                        self.walk.advance(dt, cfg.animation_speed, cfg.limb_amplitude);
                        None
                    }
                }
            }
            PetMotion::AtHome => {
                self.walk.reset();
                None
            }
        }
    }

    fn follow(&mut self, dt: f32, player: Vec3, cfg: &PetConfig) {
        let offset = self.position.flat_to(player);
        let distance = offset.length();
        let on_top = distance <= f32::EPSILON;
        // Standing on the player: back away behind the current facing.
        let direction = if on_top {
            Vec3::ground(self.facing.sin(), self.facing.cos())
        } else {
            offset.normalize_or_zero()
        };

        if distance > cfg.follow_far + HOLD_TOLERANCE {
            let step = (self.speed() * dt).clamp(0.0, distance - cfg.follow_far);
            self.position = self.position + direction * step;
        } else if distance < cfg.follow_near - HOLD_TOLERANCE {
            let step = (self.speed() * cfg.back_away_factor * dt).clamp(0.0, cfg.follow_near - distance);
            self.position = self.position - direction * step;
        } else {
            self.walk.reset();
            return;
        }

        // Both approach and back-away keep the player in view.
        if !on_top {
            self.facing = offset.heading();
        }
        self.walk.advance(dt, cfg.animation_speed, cfg.limb_amplitude);
    }

    // --- Needs and care ---

    /// Apply one frame of needs decay at simulation time `now_secs`.
    pub fn decay(&mut self, dt: f32, now_secs: f64, cfg: &PetConfig) {
        let idle = (now_secs - self.last_interaction_secs).max(0.0);
        let following = self.is_following();
        needs::decay(&mut self.needs, dt, idle, following, cfg);
    }

    /// Feed the pet. Returns whether the food was its favorite.
    pub fn feed(&mut self, food: &ItemId, now_secs: f64, cfg: &PetConfig) -> bool {
        let favorite = self.profile().loves_food(food);
        needs::apply_feed(&mut self.needs, favorite, cfg);
        self.last_interaction_secs = now_secs;
        debug!(pet = %self.id, %food, favorite, "fed");
        favorite
    }

    /// Play with the pet, granting experience. Returns a level-up if one
    /// occurred.
    pub fn play(
        &mut self,
        toy: &ItemId,
        now_secs: f64,
        catalog: &AbilityCatalog,
        cfg: &PetConfig,
    ) -> Option<PetLevelUp> {
        let favorite = self.profile().loves_toy(toy);
        let earned = needs::apply_play(&mut self.needs, favorite, cfg);
        self.last_interaction_secs = now_secs;
        debug!(pet = %self.id, %toy, favorite, earned, "played");
        self.gain_experience(earned, catalog, cfg)
    }

    /// Pet the pet.
    pub fn pat(&mut self, now_secs: f64, cfg: &PetConfig) {
        needs::apply_pet(&mut self.needs, cfg);
        self.last_interaction_secs = now_secs;
    }

    /// Add experience and, on level-up, unlock newly eligible abilities.
    pub fn gain_experience(
        &mut self,
        amount: u32,
        catalog: &AbilityCatalog,
        cfg: &PetConfig,
    ) -> Option<PetLevelUp> {
        let level_up = self.progression.add_experience(amount, cfg)?;
        let unlocked = catalog.newly_unlocked(level_up.new_level, &self.unlocked);
        self.unlocked.extend(unlocked.iter().cloned());
        info!(
            pet = %self.id,
            level = level_up.new_level,
            unlocked = unlocked.len(),
            slot_gained = level_up.slot_gained,
            "pet levelled up"
        );
        Some(PetLevelUp {
            pet: self.id,
            level: level_up.new_level,
            unlocked,
            slot_gained: level_up.slot_gained,
        })
    }

    // --- Persistence ---

    /// Plain-data snapshot for the save blob.
    pub fn snapshot(&self) -> PetSnapshot {
        PetSnapshot {
            id: self.id,
            name: self.name.clone(),
            species: self.species,
            adopted_at: self.adopted_at,
            position: self.position,
            level: self.level(),
            experience: self.experience(),
            needs: self.needs,
            unlocked_abilities: self.unlocked.clone(),
            following: self.is_following(),
            collection_radius: self.collection_radius(),
            speed: self.speed(),
            slot_bonus: self.progression.slot_bonus(),
            last_interaction_secs: self.last_interaction_secs,
        }
    }

    /// Rebuild a pet from a snapshot. Needs are re-clamped.
    ///
    /// A pet saved while following resumes following. Any other pet saved
    /// within the arrival threshold of `home` wakes up there; one saved
    /// further out resumes its walk back.
    pub fn restore(snapshot: PetSnapshot, home: Vec3, cfg: &PetConfig) -> Self {
        let mut needs = snapshot.needs;
        needs.clamp();
        let (position, motion) = if snapshot.following {
            (snapshot.position, PetMotion::Following)
        } else if snapshot.position.flat_distance(home) > cfg.arrival_threshold {
            (snapshot.position, PetMotion::Returning)
        } else {
            (home, PetMotion::AtHome)
        };
        Self {
            id: snapshot.id,
            name: snapshot.name,
            species: snapshot.species,
            adopted_at: snapshot.adopted_at,
            position,
            facing: 0.0,
            motion,
            walk: WalkCycle::new(),
            progression: Progression::from_parts(
                snapshot.level,
                snapshot.experience,
                snapshot.collection_radius,
                snapshot.speed,
                snapshot.slot_bonus,
            ),
            needs,
            unlocked: snapshot.unlocked_abilities,
            last_interaction_secs: snapshot.last_interaction_secs,
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::abilities::Ability;

    fn catalog() -> AbilityCatalog {
        AbilityCatalog::standard()
    }

    fn home() -> Vec3 {
        Vec3::ZERO
    }

    fn dog() -> Pet {
        Pet::adopt("Biscuit", Species::Dog, home(), 0.0, &catalog())
    }

    #[test]
    fn adoption_starts_at_home_with_level_one_abilities() {
        let pet = dog();
        assert!(pet.is_home());
        assert_eq!(pet.level(), 1);
        let expected = catalog().newly_unlocked(1, &BTreeSet::new());
        assert_eq!(pet.unlocked_abilities().len(), expected.len());
    }

    #[test]
    fn following_and_home_are_exclusive() {
        let mut pet = dog();
        pet.set_following(true);
        assert!(pet.is_following());
        assert!(!pet.is_home());
        pet.set_following(false);
        assert_eq!(pet.motion(), PetMotion::Returning);
        assert!(!pet.is_following());
    }

    #[test]
    fn stopping_at_home_stays_home() {
        let mut pet = dog();
        pet.set_following(false);
        assert!(pet.is_home());
    }

    #[test]
    fn follower_closes_to_the_far_ring() {
        let cfg = PetConfig::default();
        let mut pet = dog();
        pet.set_following(true);
        let player = Vec3::ground(20.0, 0.0);
        for _ in 0..600 {
            pet.step(0.1, player, home(), &cfg);
        }
        let gap = pet.position().flat_distance(player);
        assert!((gap - cfg.follow_far).abs() < 1e-3, "gap {gap}");
        assert!(pet.pose().is_neutral());
    }

    #[test]
    fn follower_backs_away_when_crowded() {
        let cfg = PetConfig::default();
        let mut pet = dog();
        pet.set_following(true);
        let player = Vec3::ground(0.5, 0.0);
        pet.step(0.1, player, home(), &cfg);
        assert!(pet.position().flat_distance(player) > 0.5);
        assert!(!pet.pose().is_neutral());
    }

    #[test]
    fn follower_on_top_of_the_player_steps_back() {
        let cfg = PetConfig::default();
        let mut pet = dog();
        pet.set_following(true);
        pet.step(0.1, home(), home(), &cfg);
        let position = pet.position();
        assert!(position.flat_distance(home()) > 0.0);
        // Facing zero looks down +z, so the retreat is toward -z.
        assert!(position.z < 0.0);
        assert!(pet.facing().abs() < 1e-6);
        assert!(!pet.pose().is_neutral());
    }

    #[test]
    fn returning_pet_settles_at_home() {
        let cfg = PetConfig::default();
        let mut pet = dog();
        pet.set_following(true);
        pet.step(1.0, Vec3::ground(10.0, 0.0), home(), &cfg);
        pet.set_following(false);

        let mut arrived = false;
        for _ in 0..200 {
            if pet.step(0.1, Vec3::ground(10.0, 0.0), home(), &cfg) == Some(PetEvent::ArrivedHome) {
                arrived = true;
                break;
            }
        }
        assert!(arrived);
        assert!(pet.is_home());
        assert_eq!(pet.position(), home());
        assert!(pet.pose().is_neutral());
    }

    #[test]
    fn care_resets_last_interaction() {
        let cfg = PetConfig::default();
        let mut pet = dog();
        assert!(pet.feed(&ItemId::new("bone"), 30.0, &cfg));
        assert_eq!(pet.last_interaction_secs(), 30.0);
        pet.pat(45.0, &cfg);
        assert_eq!(pet.last_interaction_secs(), 45.0);
        assert!(!pet.feed(&ItemId::new("fish"), 50.0, &cfg));
    }

    #[test]
    fn levelling_unlocks_catalog_abilities() {
        let cfg = PetConfig::default();
        let catalog = AbilityCatalog::new([
            Ability {
                id: AbilityId::new("sniff"),
                unlock_level: 1,
                cooldown_secs: 5.0,
                effect: AbilityEffect::Collect,
                magnitude: 1,
            },
            Ability {
                id: AbilityId::new("dig"),
                unlock_level: 2,
                cooldown_secs: 60.0,
                effect: AbilityEffect::RareExplore,
                magnitude: 1,
            },
        ]);
        let mut pet = Pet::adopt("Pip", Species::Rabbit, home(), 0.0, &catalog);
        assert_eq!(pet.unlocked_abilities().len(), 1);

        let up = pet.gain_experience(50, &catalog, &cfg).unwrap();
        assert_eq!(up.level, 2);
        assert_eq!(up.unlocked, vec![AbilityId::new("dig")]);
        assert!(pet.unlocked_abilities().contains(&AbilityId::new("dig")));
        assert_eq!(pet.experience(), 0);
    }

    #[test]
    fn carry_bonus_adds_levels_and_abilities() {
        let cfg = PetConfig::default();
        let catalog = AbilityCatalog::new([Ability {
            id: AbilityId::new("saddlebags"),
            unlock_level: 1,
            cooldown_secs: 0.0,
            effect: AbilityEffect::Carry,
            magnitude: 2,
        }]);
        let mut pet = Pet::adopt("Rex", Species::Dog, home(), 0.0, &catalog);
        assert_eq!(pet.carry_bonus(&catalog), 2);

        for level in 1..5 {
            pet.gain_experience(needs::experience_threshold(level), &catalog, &cfg);
        }
        assert_eq!(pet.level(), 5);
        assert_eq!(pet.carry_bonus(&catalog), 3);
    }

    #[test]
    fn snapshot_restores_progress_and_bond() {
        let cfg = PetConfig::default();
        let mut pet = dog();
        pet.set_following(true);
        pet.play(&ItemId::new("stick"), 12.0, &catalog(), &cfg);
        let restored = Pet::restore(pet.snapshot(), home(), &cfg);
        assert_eq!(restored.id(), pet.id());
        assert_eq!(restored.experience(), pet.experience());
        assert_eq!(restored.needs(), pet.needs());
        assert!(restored.is_following());
        assert_eq!(restored.unlocked_abilities(), pet.unlocked_abilities());
    }

    #[test]
    fn restored_pet_away_from_home_walks_back() {
        let cfg = PetConfig::default();
        let mut pet = dog();
        pet.set_following(true);
        let player = Vec3::ground(20.0, 0.0);
        for _ in 0..50 {
            pet.step(0.1, player, home(), &cfg);
        }
        pet.set_following(false);
        assert!(pet.position().flat_distance(home()) > 1.0);

        let mut restored = Pet::restore(pet.snapshot(), home(), &cfg);
        assert_eq!(restored.motion(), PetMotion::Returning);
        let mut arrived = false;
        for _ in 0..1000 {
            if restored.step(0.1, player, home(), &cfg) == Some(PetEvent::ArrivedHome) {
                arrived = true;
                break;
            }
        }
        assert!(arrived);
        assert_eq!(restored.position(), home());
    }

    #[test]
    fn restored_pet_near_home_settles_in_place() {
        let cfg = PetConfig::default();
        let mut snapshot = dog().snapshot();
        snapshot.position = Vec3::ground(0.1, 0.0);
        let pet = Pet::restore(snapshot, home(), &cfg);
        assert!(pet.is_home());
        assert_eq!(pet.position(), home());
    }

    #[test]
    fn restore_clamps_corrupt_needs() {
        let mut snapshot = dog().snapshot();
        snapshot.needs.hunger = 400.0;
        snapshot.needs.health = f32::NAN;
        let pet = Pet::restore(snapshot, home(), &PetConfig::default());
        assert_eq!(pet.needs().hunger, 100.0);
        assert_eq!(pet.needs().health, 0.0);
    }
}
