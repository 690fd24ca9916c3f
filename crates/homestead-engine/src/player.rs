//! A scripted stand-in for the human player.
//!
//! The player walks a fixed tour of the village and performs a timetable
//! of interactions (adopt, follow, talk, gift, feed, play, pat) keyed by
//! frame number. Failed actions are logged and skipped; the tour goes on.

use tracing::{info, warn};

use homestead_agents::AgentError;
use homestead_agents::movement::{Steer, steer_toward};
use homestead_core::AgentWorld;
use homestead_types::{AgentId, ItemId, Vec3};

use crate::spawner::Household;

/// Distance at which a waypoint counts as reached.
const WAYPOINT_ARRIVAL: f32 = 0.25;

/// Walking speed in world units per second.
const PLAYER_SPEED: f32 = 2.5;

/// One scripted interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Adopt a pet from the shelter.
    Adopt {
        /// Species key.
        species: &'static str,
        /// Pet name.
        name: &'static str,
    },
    /// Start or stop the pet following.
    Follow(bool),
    /// Start talking to a villager, by name.
    Talk(&'static str),
    /// Stop talking to a villager, by name.
    EndTalk(&'static str),
    /// Give a villager an item from the backpack.
    Gift {
        /// Villager name.
        villager: &'static str,
        /// Item key.
        item: &'static str,
    },
    /// Feed the pet an item from the backpack.
    Feed(&'static str),
    /// Play with the pet using a toy.
    Play(&'static str),
    /// Pat the pet.
    Pat,
}

/// An action due at a given frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cue {
    /// Frame at (or after) which the action runs.
    pub frame: u64,
    /// What to do.
    pub action: Action,
}

const fn cue(frame: u64, action: Action) -> Cue {
    Cue { frame, action }
}

/// The demo timetable, at ten frames per second.
pub const DEFAULT_SCRIPT: &[Cue] = &[
    cue(10, Action::Adopt { species: "dog", name: "Pepper" }),
    cue(20, Action::Follow(true)),
    cue(60, Action::Talk("Rosa")),
    cue(90, Action::EndTalk("Rosa")),
    cue(100, Action::Gift { villager: "Rosa", item: "sunflower" }),
    cue(150, Action::Feed("bone")),
    cue(200, Action::Play("stick")),
    cue(220, Action::Pat),
    cue(400, Action::Talk("Otto")),
    cue(430, Action::EndTalk("Otto")),
    cue(440, Action::Gift { villager: "Otto", item: "coffee" }),
    cue(600, Action::Play("stick")),
    cue(900, Action::Talk("Mina")),
    cue(930, Action::EndTalk("Mina")),
    cue(1200, Action::Feed("bone")),
    cue(2400, Action::Follow(false)),
];

/// The default walking tour.
pub const DEFAULT_TOUR: &[Vec3] = &[
    Vec3::ground(0.0, 0.0),
    Vec3::ground(4.0, 2.0),
    Vec3::ground(8.0, 8.0),
    Vec3::ground(2.0, -5.0),
    Vec3::ground(-3.0, -3.0),
    Vec3::ground(-6.0, 3.0),
];

/// The scripted player.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedPlayer {
    position: Vec3,
    tour: Vec<Vec3>,
    next_waypoint: usize,
    script: Vec<Cue>,
    cursor: usize,
    pet: Option<AgentId>,
}

impl ScriptedPlayer {
    /// A player standing at `start`. Cues are run in frame order.
    pub fn new(start: Vec3, tour: Vec<Vec3>, mut script: Vec<Cue>) -> Self {
        script.sort_by_key(|c| c.frame);
        Self {
            position: start,
            tour,
            next_waypoint: 0,
            script,
            cursor: 0,
            pet: None,
        }
    }

    /// The stock tour and timetable.
    pub fn demo() -> Self {
        Self::new(Vec3::ZERO, DEFAULT_TOUR.to_vec(), DEFAULT_SCRIPT.to_vec())
    }

    /// Current position.
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// The adopted pet, once there is one.
    pub const fn pet(&self) -> Option<AgentId> {
        self.pet
    }

    /// Cues not yet performed.
    pub fn remaining_cues(&self) -> usize {
        self.script.len().saturating_sub(self.cursor)
    }

    /// Walk along the tour for one frame. Returns the new position.
    pub fn walk(&mut self, dt: f32) -> Vec3 {
        let Some(target) = self.tour.get(self.next_waypoint).copied() else {
            return self.position;
        };
        if steer_toward(&mut self.position, target, PLAYER_SPEED, dt, WAYPOINT_ARRIVAL) == Steer::Arrived {
            self.next_waypoint = self
                .next_waypoint
                .saturating_add(1)
                .checked_rem(self.tour.len())
                .unwrap_or(0);
        }
        self.position
    }

    /// Perform every cue due at or before `frame`. Returns how many ran.
    pub fn act(&mut self, frame: u64, world: &mut AgentWorld, household: &mut Household) -> usize {
        let mut performed = 0_usize;
        while let Some(due) = self.script.get(self.cursor).copied().filter(|c| c.frame <= frame) {
            self.cursor = self.cursor.saturating_add(1);
            performed = performed.saturating_add(1);
            if let Err(err) = self.perform(due.action, world, household) {
                warn!(frame, action = ?due.action, %err, "Scripted action failed");
            }
        }
        performed
    }

    fn perform(
        &mut self,
        action: Action,
        world: &mut AgentWorld,
        household: &mut Household,
    ) -> Result<(), AgentError> {
        match action {
            Action::Adopt { species, name } => {
                let pet = world.adopt(species, name, &mut household.purse)?;
                self.pet = Some(pet);
                info!(%pet, species, name, "Player adopted a pet");
            }
            Action::Follow(follow) => {
                if let Some(pet) = self.pet_or_warn(action) {
                    world.set_following(pet, follow)?;
                    info!(%pet, follow, "Player called the pet");
                }
            }
            Action::Talk(villager) => {
                if let Some(npc) = villager_id(world, villager) {
                    let line = world.talk_to(npc, self.position)?;
                    info!(villager, line, "Villager says");
                }
            }
            Action::EndTalk(villager) => {
                if let Some(npc) = villager_id(world, villager) {
                    world.end_talk(npc)?;
                }
            }
            Action::Gift { villager, item } => {
                if let Some(npc) = villager_id(world, villager) {
                    let reaction = world.give_gift(npc, &ItemId::new(item), &mut household.inventory)?;
                    let friendship = world.npc(npc)?.friendship();
                    info!(villager, item, ?reaction, friendship, "Gift given");
                }
            }
            Action::Feed(food) => {
                if let Some(pet) = self.pet_or_warn(action) {
                    let favorite = world.feed(pet, &ItemId::new(food), &mut household.inventory)?;
                    info!(%pet, food, favorite, "Pet fed");
                }
            }
            Action::Play(toy) => {
                if let Some(pet) = self.pet_or_warn(action) {
                    let level_up = world.play(pet, &ItemId::new(toy))?;
                    info!(%pet, toy, levelled = level_up.is_some(), "Played with pet");
                }
            }
            Action::Pat => {
                if let Some(pet) = self.pet_or_warn(action) {
                    world.pat(pet)?;
                }
            }
        }
        Ok(())
    }

    fn pet_or_warn(&self, action: Action) -> Option<AgentId> {
        if self.pet.is_none() {
            warn!(?action, "No pet adopted yet, skipping");
        }
        self.pet
    }
}

fn villager_id(world: &AgentWorld, name: &str) -> Option<AgentId> {
    let id = world.npc_named(name).map(homestead_agents::Npc::id);
    if id.is_none() {
        warn!(villager = name, "No villager by that name, skipping");
    }
    id
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use homestead_agents::Wallet;
    use homestead_core::SimulationConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::spawner::seed_household;

    fn setup() -> (AgentWorld, Household) {
        let config = SimulationConfig::default();
        let world = AgentWorld::new(&config).unwrap();
        let household = seed_household(&config, &mut StdRng::seed_from_u64(1)).unwrap();
        (world, household)
    }

    #[test]
    fn walks_the_tour_in_a_loop() {
        let tour = vec![Vec3::ground(1.0, 0.0), Vec3::ZERO];
        let mut player = ScriptedPlayer::new(Vec3::ZERO, tour, Vec::new());
        // Four frames out at 0.25 per frame, one to register arrival, two back.
        for _ in 0..7 {
            player.walk(0.1);
        }
        assert!((player.position().x - 0.5).abs() < 1e-4);
    }

    #[test]
    fn cues_run_once_in_frame_order() {
        let (mut world, mut household) = setup();
        let script = vec![
            cue(5, Action::Follow(true)),
            cue(2, Action::Adopt { species: "cat", name: "Miso" }),
        ];
        let mut player = ScriptedPlayer::new(Vec3::ZERO, Vec::new(), script);

        assert_eq!(player.act(1, &mut world, &mut household), 0);
        assert_eq!(player.act(5, &mut world, &mut household), 2);
        assert_eq!(player.act(6, &mut world, &mut household), 0);
        assert_eq!(player.remaining_cues(), 0);

        let pet = player.pet().unwrap();
        assert!(world.pet(pet).unwrap().is_following());
        assert_eq!(household.purse.coins(), 1_100);
    }

    #[test]
    fn failures_are_skipped() {
        let (mut world, mut household) = setup();
        let script = vec![
            cue(1, Action::Pat),
            cue(1, Action::Talk("Nobody")),
            cue(1, Action::Adopt { species: "dragon", name: "Smaug" }),
            cue(2, Action::Gift { villager: "Rosa", item: "sunflower" }),
        ];
        let mut player = ScriptedPlayer::new(Vec3::ZERO, Vec::new(), script);
        assert_eq!(player.act(2, &mut world, &mut household), 4);
        assert!(player.pet().is_none());
        let rosa = world.npc_named("Rosa").unwrap();
        assert_eq!(rosa.friendship(), 8);
    }
}
