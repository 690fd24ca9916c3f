//! Per-frame orchestration of the agent layer.
//!
//! [`AgentWorld`] owns everything the autonomous layer needs between frames:
//! the clock, the day's weather, the villager roster, the pet shelter, the
//! cooldown ledger and the encounter throttle. The host calls
//! [`AgentWorld::tick`] once per rendered frame with the real delta and the
//! player's position, passing its collaborators in a [`Services`] bundle.
//!
//! # Frame order
//!
//! 1. Advance the clock; roll weather on a new day
//! 2. Decrement cooldowns
//! 3. Wander round (every `wander_interval_secs` of real time)
//! 4. Step villager and pet state machines
//! 5. Encounter scan
//! 6. Ability dispatch for following pets
//! 7. Pet needs decay
//!
//! Cooldowns are decremented before dispatch and movement is applied before
//! dispatch, so abilities act on this frame's positions.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use homestead_agents::{
    AbilityCatalog, AgentError, CooldownRegistry, DialogueContext, Dispatch, Encounter,
    EncounterDetector, GiftReaction, Inventory, Npc, NpcConfig, NpcEvent, Participant, Pet,
    PetConfig, PetEvent, PetLevelUp, Services, Shelter, Wallet, WorldBounds, run_abilities,
};
use homestead_types::{AgentId, ItemId, Season, TimeBucket, Vec3, Weather, WorldSnapshot};

use crate::clock::{ClockError, WorldClock};
use crate::config::SimulationConfig;
use crate::weather::WeatherSystem;

/// Errors that can occur while assembling or advancing the world.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// The clock rejected its configuration or a frame delta.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },
}

/// Something that reached its destination this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrival {
    /// A villager finished walking to its wander destination.
    Npc(AgentId),
    /// A pet got back to the shelter.
    PetHome(AgentId),
}

/// Summary of one completed frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSummary {
    /// Frame number just completed (starting at 1).
    pub frame: u64,
    /// Simulation seconds elapsed after this frame.
    pub elapsed_secs: f64,
    /// Day number after this frame.
    pub day: u32,
    /// Set when this frame crossed midnight.
    pub new_day: Option<u32>,
    /// Season after this frame.
    pub season: Season,
    /// Time-of-day bucket after this frame.
    pub time: TimeBucket,
    /// Today's weather.
    pub weather: Weather,
    /// Villagers assigned a new destination by this frame's wander round.
    pub wanderers: usize,
    /// Scripted villager exchanges triggered this frame.
    pub encounters: Vec<Encounter>,
    /// Pet abilities that fired this frame.
    pub dispatches: Vec<Dispatch>,
    /// Level-ups granted since the previous frame.
    pub level_ups: Vec<PetLevelUp>,
    /// Agents that arrived somewhere this frame.
    pub arrivals: Vec<Arrival>,
}

/// The running agent layer.
#[derive(Debug)]
pub struct AgentWorld {
    clock: WorldClock,
    weather: WeatherSystem,
    npcs: Vec<Npc>,
    shelter: Shelter,
    catalog: AbilityCatalog,
    cooldowns: CooldownRegistry,
    encounters: EncounterDetector,
    bounds: WorldBounds,
    npc_config: NpcConfig,
    pet_config: PetConfig,
    /// Real seconds since the last wander round.
    wander_elapsed: f32,
    /// Level-ups from player interactions since the last frame.
    pending_level_ups: Vec<PetLevelUp>,
    frame: u64,
    rng: StdRng,
}

impl AgentWorld {
    /// Assemble a fresh world: spawn the village roster, open an empty
    /// shelter, and roll day 1's weather.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::Clock`] if the time configuration is invalid.
    pub fn new(config: &SimulationConfig) -> Result<Self, TickError> {
        let clock = WorldClock::new(&config.time)?;
        let npcs = config.village.npcs.iter().cloned().map(Npc::spawn).collect();
        let world = Self::assemble(config, clock, npcs, Shelter::new(config.shelter));
        info!(
            world = %config.world.name,
            seed = config.world.seed,
            npcs = world.npcs.len(),
            weather = ?world.weather.current(),
            "agent world assembled"
        );
        Ok(world)
    }

    /// Rebuild a world from a save-blob snapshot.
    ///
    /// Cooldowns and encounter throttles are not persisted and start empty.
    /// Pets beyond the shelter capacity are dropped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::Clock`] if the time configuration is invalid.
    pub fn restore(config: &SimulationConfig, snapshot: WorldSnapshot) -> Result<Self, TickError> {
        let clock = WorldClock::from_parts(
            snapshot.elapsed_secs,
            snapshot.day,
            u64::from(snapshot.minute_of_day),
            &config.time,
        )?;
        let npcs = snapshot.npcs.into_iter().map(Npc::restore).collect();
        let mut shelter = Shelter::new(config.shelter);
        let home = shelter.position();
        let dropped = shelter.restore(
            snapshot
                .pets
                .into_iter()
                .map(|pet| Pet::restore(pet, home, &config.pet)),
        );
        if dropped > 0 {
            warn!(dropped, capacity = shelter.capacity(), "pets beyond shelter capacity dropped on restore");
        }
        let world = Self::assemble(config, clock, npcs, shelter);
        info!(
            day = world.clock.day(),
            npcs = world.npcs.len(),
            pets = world.shelter.len(),
            "agent world restored"
        );
        Ok(world)
    }

    fn assemble(config: &SimulationConfig, clock: WorldClock, npcs: Vec<Npc>, shelter: Shelter) -> Self {
        let mut weather = WeatherSystem::new(config.world.seed);
        weather.roll(clock.day(), clock.season());
        Self {
            weather,
            npcs,
            shelter,
            catalog: AbilityCatalog::standard(),
            cooldowns: CooldownRegistry::new(),
            encounters: EncounterDetector::new(
                config.npc.encounter_radius,
                config.npc.encounter_window_secs,
            ),
            bounds: config.world.bounds,
            npc_config: config.npc.clone(),
            pet_config: config.pet.clone(),
            wander_elapsed: 0.0,
            pending_level_ups: Vec::new(),
            frame: 0,
            rng: StdRng::seed_from_u64(config.world.seed),
            clock,
        }
    }

    /// Advance the whole agent layer by one frame.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::Clock`] for a negative or non-finite delta; no
    /// agent state is touched in that case.
    pub fn tick(
        &mut self,
        dt_secs: f32,
        player: Vec3,
        services: &mut Services<'_>,
    ) -> Result<TickSummary, TickError> {
        // --- Phase 1: Clock and calendar ---
        let new_day = self.clock.advance(dt_secs)?;
        if let Some(day) = new_day {
            let weather = self.weather.roll(day, self.clock.season());
            info!(day, season = ?self.clock.season(), ?weather, "new day");
        }
        let now = self.clock.elapsed_secs();
        self.frame = self.frame.saturating_add(1);

        // --- Phase 2: Cooldowns ---
        self.cooldowns.tick(dt_secs);

        // --- Phase 3: Wander round ---
        let mut wanderers = 0_usize;
        self.wander_elapsed += dt_secs;
        let interval = self.npc_config.wander_interval_secs.max(f32::EPSILON);
        if self.wander_elapsed >= interval {
            self.wander_elapsed -= interval;
            for npc in &mut self.npcs {
                if npc.wander(&mut self.rng, &self.bounds, &self.npc_config) {
                    wanderers = wanderers.saturating_add(1);
                }
            }
            debug!(frame = self.frame, wanderers, "wander round");
        }

        // --- Phase 4: State machines ---
        let mut arrivals = Vec::new();
        for npc in &mut self.npcs {
            if npc.step(dt_secs, &self.npc_config) == Some(NpcEvent::Arrived) {
                arrivals.push(Arrival::Npc(npc.id()));
            }
        }
        let home = self.shelter.position();
        for pet in self.shelter.iter_mut() {
            if pet.step(dt_secs, player, home, &self.pet_config) == Some(PetEvent::ArrivedHome) {
                arrivals.push(Arrival::PetHome(pet.id()));
            }
        }

        // --- Phase 5: Encounters ---
        let participants: Vec<Participant<'_>> = self.npcs.iter().map(Npc::participant).collect();
        let encounters = self.encounters.scan(&participants, now, &mut self.rng);

        // --- Phase 6: Abilities ---
        let mut dispatches = Vec::new();
        for pet in self.shelter.iter() {
            dispatches.extend(run_abilities(
                pet,
                &self.catalog,
                &mut self.cooldowns,
                services,
                &mut self.rng,
                self.pet_config.rare_find_chance,
            ));
        }

        // --- Phase 7: Needs ---
        for pet in self.shelter.iter_mut() {
            pet.decay(dt_secs, now, &self.pet_config);
        }

        let summary = TickSummary {
            frame: self.frame,
            elapsed_secs: now,
            day: self.clock.day(),
            new_day,
            season: self.clock.season(),
            time: self.clock.time_bucket(),
            weather: self.weather.current(),
            wanderers,
            encounters,
            dispatches,
            level_ups: core::mem::take(&mut self.pending_level_ups),
            arrivals,
        };
        debug!(
            frame = summary.frame,
            day = summary.day,
            encounters = summary.encounters.len(),
            dispatches = summary.dispatches.len(),
            arrivals = summary.arrivals.len(),
            "frame complete"
        );
        Ok(summary)
    }

    // --- Villager interactions ---

    /// Begin a conversation and return the villager's opening line.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NpcNotFound`] for an unknown id.
    pub fn talk_to(&mut self, npc: AgentId, player: Vec3) -> Result<&'static str, AgentError> {
        let day = self.clock.day();
        let context = self.dialogue_context();
        let villager = self
            .npcs
            .iter_mut()
            .find(|v| v.id() == npc)
            .ok_or(AgentError::NpcNotFound(npc))?;
        let first_today = villager.start_talking(player, day, &self.npc_config);
        let line = villager.speak(&context);
        debug!(npc = %npc, first_today, line, "conversation started");
        Ok(line)
    }

    /// The line a villager would say right now, without starting a conversation.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NpcNotFound`] for an unknown id.
    pub fn line_for(&self, npc: AgentId) -> Result<&'static str, AgentError> {
        let context = self.dialogue_context();
        Ok(self.npc(npc)?.speak(&context))
    }

    /// End a conversation. The villager hurries off to a fresh destination.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NpcNotFound`] for an unknown id.
    pub fn end_talk(&mut self, npc: AgentId) -> Result<bool, AgentError> {
        let villager = self
            .npcs
            .iter_mut()
            .find(|v| v.id() == npc)
            .ok_or(AgentError::NpcNotFound(npc))?;
        Ok(villager.end_talking(&mut self.rng, &self.bounds, &self.npc_config))
    }

    /// Give an item from the inventory to a villager.
    ///
    /// The item is only removed once the villager accepts it.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NpcNotFound`], [`AgentError::MissingItem`] if
    /// the inventory does not hold the item, or
    /// [`AgentError::GiftAlreadyGiven`] if the villager got a gift today.
    pub fn give_gift(
        &mut self,
        npc: AgentId,
        item: &ItemId,
        inventory: &mut dyn Inventory,
    ) -> Result<GiftReaction, AgentError> {
        let day = self.clock.day();
        let villager = self
            .npcs
            .iter_mut()
            .find(|v| v.id() == npc)
            .ok_or(AgentError::NpcNotFound(npc))?;
        if inventory.item_count(item) == 0 {
            return Err(AgentError::MissingItem(item.clone()));
        }
        let reaction = villager.receive_gift(item, day, &self.npc_config)?;
        if !inventory.remove_item(item, 1) {
            warn!(npc = %npc, %item, "accepted gift could not be removed from inventory");
        }
        Ok(reaction)
    }

    // --- Pet interactions ---

    /// Adopt a pet by species key, paying from `wallet`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::UnknownSpecies`], [`AgentError::ShelterFull`],
    /// or [`AgentError::InsufficientFunds`].
    pub fn adopt(
        &mut self,
        species: &str,
        name: impl Into<String>,
        wallet: &mut dyn Wallet,
    ) -> Result<AgentId, AgentError> {
        let now = self.clock.elapsed_secs();
        self.shelter.adopt_slug(species, name, wallet, now, &self.catalog)
    }

    /// Release a pet and forget its cooldowns.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::PetNotFound`] for an unknown id.
    pub fn release(&mut self, pet: AgentId) -> Result<Pet, AgentError> {
        self.shelter.release(pet, &mut self.cooldowns)
    }

    /// Start or stop a pet following the player.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::PetNotFound`] for an unknown id.
    pub fn set_following(&mut self, pet: AgentId, follow: bool) -> Result<(), AgentError> {
        self.pet_mut(pet)?.set_following(follow);
        Ok(())
    }

    /// Feed a pet one unit of `food` from the inventory. Returns whether it
    /// was the pet's favorite.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::PetNotFound`] or [`AgentError::MissingItem`].
    pub fn feed(
        &mut self,
        pet: AgentId,
        food: &ItemId,
        inventory: &mut dyn Inventory,
    ) -> Result<bool, AgentError> {
        let now = self.clock.elapsed_secs();
        let target = self
            .shelter
            .get_mut(pet)
            .ok_or(AgentError::PetNotFound(pet))?;
        if !inventory.remove_item(food, 1) {
            return Err(AgentError::MissingItem(food.clone()));
        }
        Ok(target.feed(food, now, &self.pet_config))
    }

    /// Play with a pet. Toys are not consumed.
    ///
    /// A resulting level-up is also reported in the next [`TickSummary`].
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::PetNotFound`] for an unknown id.
    pub fn play(&mut self, pet: AgentId, toy: &ItemId) -> Result<Option<PetLevelUp>, AgentError> {
        let now = self.clock.elapsed_secs();
        let target = self
            .shelter
            .get_mut(pet)
            .ok_or(AgentError::PetNotFound(pet))?;
        let level_up = target.play(toy, now, &self.catalog, &self.pet_config);
        if let Some(up) = &level_up {
            self.pending_level_ups.push(up.clone());
        }
        Ok(level_up)
    }

    /// Pat a pet.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::PetNotFound`] for an unknown id.
    pub fn pat(&mut self, pet: AgentId) -> Result<(), AgentError> {
        let now = self.clock.elapsed_secs();
        let target = self
            .shelter
            .get_mut(pet)
            .ok_or(AgentError::PetNotFound(pet))?;
        target.pat(now, &self.pet_config);
        Ok(())
    }

    /// Extra inventory slots granted by all pets together.
    pub fn carry_bonus(&self) -> u32 {
        self.shelter
            .iter()
            .fold(0_u32, |acc, pet| acc.saturating_add(pet.carry_bonus(&self.catalog)))
    }

    // --- Persistence ---

    /// Plain-data snapshot for the save blob.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            elapsed_secs: self.clock.elapsed_secs(),
            day: self.clock.day(),
            minute_of_day: u32::try_from(self.clock.minute_of_day()).unwrap_or(0),
            npcs: self.npcs.iter().map(Npc::snapshot).collect(),
            pets: self.shelter.iter().map(Pet::snapshot).collect(),
        }
    }

    // --- Accessors ---

    /// The world clock.
    pub const fn clock(&self) -> &WorldClock {
        &self.clock
    }

    /// Today's weather.
    pub const fn weather(&self) -> Weather {
        self.weather.current()
    }

    /// Frames completed so far.
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// The villager roster.
    pub fn npcs(&self) -> &[Npc] {
        &self.npcs
    }

    /// Look up a villager.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NpcNotFound`] for an unknown id.
    pub fn npc(&self, id: AgentId) -> Result<&Npc, AgentError> {
        self.npcs
            .iter()
            .find(|v| v.id() == id)
            .ok_or(AgentError::NpcNotFound(id))
    }

    /// Find a villager by display name.
    pub fn npc_named(&self, name: &str) -> Option<&Npc> {
        self.npcs.iter().find(|v| v.name() == name)
    }

    /// The pet shelter.
    pub const fn shelter(&self) -> &Shelter {
        &self.shelter
    }

    /// Look up a pet.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::PetNotFound`] for an unknown id.
    pub fn pet(&self, id: AgentId) -> Result<&Pet, AgentError> {
        self.shelter.get(id).ok_or(AgentError::PetNotFound(id))
    }

    /// The ability catalog.
    pub const fn catalog(&self) -> &AbilityCatalog {
        &self.catalog
    }

    /// The cooldown ledger.
    pub const fn cooldowns(&self) -> &CooldownRegistry {
        &self.cooldowns
    }

    /// The encounter throttle.
    pub const fn encounters(&self) -> &EncounterDetector {
        &self.encounters
    }

    /// Context for dialogue selection right now.
    pub fn dialogue_context(&self) -> DialogueContext {
        DialogueContext {
            day: self.clock.day(),
            time: self.clock.time_bucket(),
            weather: self.weather.current(),
        }
    }

    fn pet_mut(&mut self, id: AgentId) -> Result<&mut Pet, AgentError> {
        self.shelter.get_mut(id).ok_or(AgentError::PetNotFound(id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use homestead_agents::PetMotion;
    use homestead_types::ItemId;

    use super::*;

    struct Purse(u64);

    impl Wallet for Purse {
        fn coins(&self) -> u64 {
            self.0
        }
        fn add_coins(&mut self, amount: u64) {
            self.0 = self.0.saturating_add(amount);
        }
        fn spend_coins(&mut self, amount: u64) -> bool {
            if self.0 < amount {
                return false;
            }
            self.0 = self.0.saturating_sub(amount);
            true
        }
    }

    fn world() -> AgentWorld {
        AgentWorld::new(&SimulationConfig::default()).unwrap()
    }

    #[test]
    fn new_world_spawns_the_village() {
        let world = world();
        assert_eq!(world.npcs().len(), 5);
        assert!(world.shelter().is_empty());
        assert_eq!(world.clock().day(), 1);
        assert_eq!(world.frame(), 0);
    }

    #[test]
    fn negative_delta_is_rejected_without_side_effects() {
        let mut world = world();
        let result = world.tick(-1.0, Vec3::ZERO, &mut Services::default());
        assert!(matches!(result, Err(TickError::Clock { .. })));
        assert_eq!(world.frame(), 0);
    }

    #[test]
    fn frame_counter_advances() {
        let mut world = world();
        let mut services = Services::default();
        let first = world.tick(0.1, Vec3::ZERO, &mut services).unwrap();
        let second = world.tick(0.1, Vec3::ZERO, &mut services).unwrap();
        assert_eq!(first.frame, 1);
        assert_eq!(second.frame, 2);
    }

    #[test]
    fn talking_stops_a_villager() {
        let mut world = world();
        let id = world.npcs().first().unwrap().id();
        world.talk_to(id, Vec3::ground(1.0, 1.0)).unwrap();
        assert!(world.npc(id).unwrap().motion().is_talking());
        assert!(world.npc(id).unwrap().motion().destination().is_none());
        assert!(world.end_talk(id).unwrap());
        assert!(!world.npc(id).unwrap().motion().is_talking());
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut world = world();
        let ghost = AgentId::new();
        assert!(matches!(world.talk_to(ghost, Vec3::ZERO), Err(AgentError::NpcNotFound(_))));
        assert!(matches!(world.pat(ghost), Err(AgentError::PetNotFound(_))));
        assert!(matches!(world.release(ghost), Err(AgentError::PetNotFound(_))));
    }

    #[test]
    fn release_drops_cooldowns() {
        let mut world = world();
        let mut purse = Purse(10_000);
        let pet = world.adopt("dog", "Biscuit", &mut purse).unwrap();
        world.set_following(pet, true).unwrap();
        world.tick(0.1, Vec3::ZERO, &mut Services::default()).unwrap();
        assert!(!world.cooldowns().is_empty());

        let released = world.release(pet).unwrap();
        assert_eq!(released.name(), "Biscuit");
        assert!(world.cooldowns().is_empty());
    }

    #[test]
    fn unfollowed_pet_walks_home() {
        let mut world = world();
        let mut purse = Purse(10_000);
        let pet = world.adopt("cat", "Miso", &mut purse).unwrap();
        world.set_following(pet, true).unwrap();
        let mut services = Services::default();
        let player = Vec3::ground(5.0, 5.0);
        for _ in 0..200 {
            world.tick(0.1, player, &mut services).unwrap();
        }
        world.set_following(pet, false).unwrap();
        assert_eq!(world.pet(pet).unwrap().motion(), PetMotion::Returning);

        let mut arrived = false;
        for _ in 0..600 {
            let summary = world.tick(0.1, player, &mut services).unwrap();
            if summary.arrivals.contains(&Arrival::PetHome(pet)) {
                arrived = true;
                break;
            }
        }
        assert!(arrived);
        assert!(world.pet(pet).unwrap().is_home());
    }

    #[test]
    fn snapshot_restores_roster() {
        let mut world = world();
        let mut purse = Purse(10_000);
        world.adopt("rabbit", "Clover", &mut purse).unwrap();
        let first = world.npcs().first().unwrap().id();
        world.talk_to(first, Vec3::ZERO).unwrap();

        let snapshot = world.snapshot();
        let restored = AgentWorld::restore(&SimulationConfig::default(), snapshot.clone()).unwrap();
        assert_eq!(restored.snapshot().npcs, snapshot.npcs);
        assert_eq!(restored.shelter().len(), 1);
        assert_eq!(restored.clock().day(), world.clock().day());
        assert_eq!(
            restored.npc(first).unwrap().friendship(),
            world.npc(first).unwrap().friendship()
        );
    }

    #[test]
    fn gift_needs_the_item() {
        struct Empty;
        impl Inventory for Empty {
            fn add_item(&mut self, _item: &ItemId, _count: u32) -> bool {
                false
            }
            fn remove_item(&mut self, _item: &ItemId, _count: u32) -> bool {
                false
            }
            fn item_count(&self, _item: &ItemId) -> u32 {
                0
            }
        }
        let mut world = world();
        let id = world.npcs().first().unwrap().id();
        let before = world.npc(id).unwrap().friendship();
        let result = world.give_gift(id, &ItemId::new("turnip"), &mut Empty);
        assert!(matches!(result, Err(AgentError::MissingItem(_))));
        assert_eq!(world.npc(id).unwrap().friendship(), before);
    }
}
