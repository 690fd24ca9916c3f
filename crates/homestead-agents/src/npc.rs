//! The villager agent facade.
//!
//! An [`Npc`] wanders the village on a fixed cadence, stops to talk with
//! the player, and tracks friendship. Movement is a three-state machine
//! ([`NpcMotion`]); the destination lives inside `Moving`, so a talking
//! villager never holds one.

use rand::Rng;
use serde::Deserialize;
use tracing::{debug, info};

use homestead_types::{AgentId, FriendshipTier, ItemId, NpcSnapshot, Personality, Vec3};

use crate::animation::{LimbPose, WalkCycle};
use crate::config::{NpcConfig, WorldBounds};
use crate::dialogue::{self, DialogueContext, Speaker};
use crate::encounter::Participant;
use crate::error::AgentError;
use crate::movement::{NpcMotion, Steer, random_destination, steer_toward};

/// Highest friendship level.
pub const MAX_FRIENDSHIP: u8 = 100;

/// Roster entry describing a villager at world creation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NpcProfile {
    /// Display name.
    pub name: String,
    /// Archetype.
    pub personality: Personality,
    /// Spawn point.
    #[serde(default = "default_spawn")]
    pub spawn: Vec3,
    /// Starting friendship (default: 0).
    #[serde(default)]
    pub friendship: u8,
    /// Gifts that earn a large bonus.
    #[serde(default)]
    pub favorite_items: Vec<ItemId>,
    /// Gifts that cost friendship.
    #[serde(default)]
    pub disliked_items: Vec<ItemId>,
}

const fn default_spawn() -> Vec3 {
    Vec3::ZERO
}

/// How a villager took a gift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiftReaction {
    /// One of the villager's favorites.
    Loved,
    /// Nothing special.
    Neutral,
    /// Something the villager dislikes.
    Disliked,
}

/// Something notable that happened during a movement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NpcEvent {
    /// The villager reached its destination and went idle.
    Arrived,
}

/// A villager.
#[derive(Debug, Clone, PartialEq)]
pub struct Npc {
    id: AgentId,
    name: String,
    personality: Personality,
    friendship: u8,
    position: Vec3,
    facing: f32,
    motion: NpcMotion,
    walk: WalkCycle,
    /// Seconds of catch-up speed left after a conversation.
    catch_up_left: f32,
    favorite_items: Vec<ItemId>,
    disliked_items: Vec<ItemId>,
    last_chat_day: Option<u32>,
    last_gift_day: Option<u32>,
}

impl Npc {
    /// Spawn an idle villager from its roster entry.
    pub fn spawn(profile: NpcProfile) -> Self {
        Self {
            id: AgentId::new(),
            name: profile.name,
            personality: profile.personality,
            friendship: profile.friendship.min(MAX_FRIENDSHIP),
            position: profile.spawn,
            facing: 0.0,
            motion: NpcMotion::Idle,
            walk: WalkCycle::new(),
            catch_up_left: 0.0,
            favorite_items: profile.favorite_items,
            disliked_items: profile.disliked_items,
            last_chat_day: None,
            last_gift_day: None,
        }
    }

    /// Stable identity.
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Archetype.
    pub const fn personality(&self) -> Personality {
        self.personality
    }

    /// Friendship with the player, `0..=100`.
    pub const fn friendship(&self) -> u8 {
        self.friendship
    }

    /// Friendship band.
    pub const fn tier(&self) -> FriendshipTier {
        FriendshipTier::from_level(self.friendship)
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
    pub const fn motion(&self) -> NpcMotion {
        self.motion
    }

    /// Limb offsets from the last movement step.
    pub const fn pose(&self) -> LimbPose {
        self.walk.pose()
    }

    /// Whether the catch-up boost is active.
    pub fn is_catching_up(&self) -> bool {
        self.catch_up_left > 0.0
    }

    /// Effective walking speed, including any catch-up boost.
    pub fn speed(&self, cfg: &NpcConfig) -> f32 {
        if self.is_catching_up() {
            cfg.base_speed * cfg.catch_up_multiplier
        } else {
            cfg.base_speed
        }
    }

    /// This villager as an encounter participant.
    pub fn participant(&self) -> Participant<'_> {
        Participant {
            id: self.id,
            name: &self.name,
            personality: self.personality,
            position: self.position,
        }
    }

    // --- Movement ---

    /// Run one wander round. Returns whether a destination was assigned.
    ///
    /// Talking villagers are skipped; sedentary ones skip most rounds.
    pub fn wander<R: Rng + ?Sized>(&mut self, rng: &mut R, bounds: &WorldBounds, cfg: &NpcConfig) -> bool {
        if self.motion.is_talking() {
            return false;
        }
        let skip = if cfg.sedentary_skip_chance.is_finite() {
            cfg.sedentary_skip_chance.clamp(0.0, 1.0)
        } else {
            0.0
        };
        if self.personality.is_sedentary() && rng.random_bool(skip) {
            return false;
        }
        let destination = random_destination(rng, bounds);
        self.motion = NpcMotion::Moving { destination };
        true
    }

    /// Advance movement by one frame.
    pub fn step(&mut self, dt: f32, cfg: &NpcConfig) -> Option<NpcEvent> {
        if self.catch_up_left > 0.0 {
            self.catch_up_left = (self.catch_up_left - dt).max(0.0);
        }

        let NpcMotion::Moving { destination } = self.motion else {
            self.walk.reset();
            return None;
        };

        let speed = self.speed(cfg);
        match steer_toward(&mut self.position, destination, speed, dt, cfg.arrival_threshold) {
            Steer::Arrived => {
                self.motion = NpcMotion::Idle;
                self.walk.reset();
                Some(NpcEvent::Arrived)
            }
            Steer::Moved { heading } => {
                self.facing = heading;
                self.walk.advance(dt, cfg.animation_speed, cfg.limb_amplitude);
                None
            }
        }
    }

    // --- Conversation ---

    /// Enter conversation with the player standing at `player`.
    ///
    /// Clears any destination, faces the player, and snaps to the neutral
    /// pose. The first conversation of a day grants the daily chat bonus;
    /// returns whether it did.
    pub fn start_talking(&mut self, player: Vec3, day: u32, cfg: &NpcConfig) -> bool {
        self.motion = NpcMotion::Talking;
        self.walk.reset();
        let toward = self.position.flat_to(player);
        if toward.length() > 0.0 {
            self.facing = toward.heading();
        }

        if self.last_chat_day == Some(day) {
            return false;
        }
        self.last_chat_day = Some(day);
        self.adjust_friendship(cfg.daily_chat_bonus);
        true
    }

    /// Leave conversation: boost speed for the catch-up window and head
    /// for a fresh destination right away.
    ///
    /// Returns `false` if the villager was not talking.
    pub fn end_talking<R: Rng + ?Sized>(&mut self, rng: &mut R, bounds: &WorldBounds, cfg: &NpcConfig) -> bool {
        if !self.motion.is_talking() {
            return false;
        }
        self.catch_up_left = cfg.catch_up_secs.max(0.0);
        let destination = random_destination(rng, bounds);
        self.motion = NpcMotion::Moving { destination };
        debug!(npc = %self.id, "conversation ended, catching up");
        true
    }

    /// The line this villager says in `context`.
    pub fn speak(&self, context: &DialogueContext) -> &'static str {
        dialogue::select_line(
            &Speaker {
                id: self.id,
                personality: self.personality,
                friendship: self.friendship,
            },
            context,
        )
    }

    // --- Friendship ---

    /// Change friendship by `delta`, clamping to `0..=100`.
    pub fn adjust_friendship(&mut self, delta: i32) -> u8 {
        let next = i32::from(self.friendship).saturating_add(delta).clamp(0, i32::from(MAX_FRIENDSHIP));
        self.friendship = u8::try_from(next).unwrap_or(MAX_FRIENDSHIP);
        self.friendship
    }

    /// How the villager feels about `item`.
    pub fn react_to(&self, item: &ItemId) -> GiftReaction {
        if self.favorite_items.contains(item) {
            GiftReaction::Loved
        } else if self.disliked_items.contains(item) {
            GiftReaction::Disliked
        } else {
            GiftReaction::Neutral
        }
    }

    /// Whether a gift was already accepted on `day`.
    pub fn gifted_on(&self, day: u32) -> bool {
        self.last_gift_day == Some(day)
    }

    /// Whether the villager already chatted on `day`.
    pub fn chatted_on(&self, day: u32) -> bool {
        self.last_chat_day == Some(day)
    }

    /// Accept a gift. At most one per day.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::GiftAlreadyGiven`] if a gift was already
    /// accepted on `day`; friendship is unchanged.
    pub fn receive_gift(&mut self, item: &ItemId, day: u32, cfg: &NpcConfig) -> Result<GiftReaction, AgentError> {
        if self.gifted_on(day) {
            return Err(AgentError::GiftAlreadyGiven { day });
        }
        let reaction = self.react_to(item);
        let delta = match reaction {
            GiftReaction::Loved => cfg.gift_favorite_delta,
            GiftReaction::Neutral => cfg.gift_neutral_delta,
            GiftReaction::Disliked => cfg.gift_disliked_delta,
        };
        self.last_gift_day = Some(day);
        let friendship = self.adjust_friendship(delta);
        info!(npc = %self.id, %item, ?reaction, friendship, "gift received");
        Ok(reaction)
    }

    // --- Persistence ---

    /// Plain-data snapshot for the save blob.
    pub fn snapshot(&self) -> NpcSnapshot {
        NpcSnapshot {
            id: self.id,
            name: self.name.clone(),
            personality: self.personality,
            friendship: self.friendship,
            position: self.position,
            favorite_items: self.favorite_items.clone(),
            disliked_items: self.disliked_items.clone(),
            last_chat_day: self.last_chat_day,
            last_gift_day: self.last_gift_day,
        }
    }

    /// Rebuild an idle villager from a snapshot.
    pub fn restore(snapshot: NpcSnapshot) -> Self {
        Self {
            id: snapshot.id,
            name: snapshot.name,
            personality: snapshot.personality,
            friendship: snapshot.friendship.min(MAX_FRIENDSHIP),
            position: snapshot.position,
            facing: 0.0,
            motion: NpcMotion::Idle,
            walk: WalkCycle::new(),
            catch_up_left: 0.0,
            favorite_items: snapshot.favorite_items,
            disliked_items: snapshot.disliked_items,
            last_chat_day: snapshot.last_chat_day,
            last_gift_day: snapshot.last_gift_day,
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use homestead_types::{TimeBucket, Weather};

    use super::*;

    fn villager(personality: Personality, friendship: u8) -> Npc {
        Npc::spawn(NpcProfile {
            name: "Marigold".to_owned(),
            personality,
            spawn: Vec3::ZERO,
            friendship,
            favorite_items: vec![ItemId::new("sunflower")],
            disliked_items: vec![ItemId::new("slime")],
        })
    }

    #[test]
    fn talking_clears_destination_and_pose() {
        let cfg = NpcConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut npc = villager(Personality::Cheerful, 30);
        assert!(npc.wander(&mut rng, &WorldBounds::default(), &cfg));
        npc.step(0.1, &cfg);
        assert!(!npc.pose().is_neutral());

        let player = Vec3::ground(0.0, 5.0);
        npc.start_talking(player, 1, &cfg);
        assert!(npc.motion().is_talking());
        assert_eq!(npc.motion().destination(), None);
        assert!(npc.pose().is_neutral());
        let expected = npc.position().flat_to(player).heading();
        assert!((npc.facing() - expected).abs() < 1e-6);
    }

    #[test]
    fn talking_villager_ignores_wander_and_stays_put() {
        let cfg = NpcConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut npc = villager(Personality::Energetic, 0);
        npc.start_talking(Vec3::ground(1.0, 0.0), 1, &cfg);
        assert!(!npc.wander(&mut rng, &WorldBounds::default(), &cfg));
        let before = npc.position();
        npc.step(1.0, &cfg);
        assert_eq!(npc.position(), before);
    }

    #[test]
    fn ending_a_talk_boosts_speed_for_the_catch_up_window() {
        let cfg = NpcConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut npc = villager(Personality::Shy, 10);
        npc.start_talking(Vec3::ground(1.0, 0.0), 1, &cfg);
        assert!(npc.end_talking(&mut rng, &WorldBounds::default(), &cfg));
        assert!(npc.motion().destination().is_some());
        assert_eq!(npc.speed(&cfg), 3.0);

        for _ in 0..120 {
            npc.step(0.1, &cfg);
        }
        assert!(!npc.is_catching_up());
        assert_eq!(npc.speed(&cfg), cfg.base_speed);
    }

    #[test]
    fn end_talking_without_talking_is_refused() {
        let cfg = NpcConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut npc = villager(Personality::Shy, 10);
        assert!(!npc.end_talking(&mut rng, &WorldBounds::default(), &cfg));
        assert!(!npc.is_catching_up());
    }

    #[test]
    fn walking_reaches_destination_and_idles() {
        let cfg = NpcConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let mut npc = villager(Personality::Cheerful, 0);
        npc.wander(&mut rng, &WorldBounds::default(), &cfg);
        let destination = npc.motion().destination().unwrap();

        let mut arrived = false;
        for _ in 0..2_000 {
            if npc.step(0.1, &cfg) == Some(NpcEvent::Arrived) {
                arrived = true;
                break;
            }
        }
        assert!(arrived);
        assert_eq!(npc.motion(), NpcMotion::Idle);
        assert!(npc.position().flat_distance(destination) < cfg.arrival_threshold);
        assert!(npc.pose().is_neutral());
    }

    #[test]
    fn sedentary_villagers_skip_most_rounds() {
        let cfg = NpcConfig::default();
        let bounds = WorldBounds::default();
        let mut rng = StdRng::seed_from_u64(99);
        let mut lazy = villager(Personality::Lazy, 0);
        let mut busy = villager(Personality::Energetic, 0);

        let rounds = 2_000;
        let lazy_moves = (0..rounds).filter(|_| lazy.wander(&mut rng, &bounds, &cfg)).count();
        let busy_moves = (0..rounds).filter(|_| busy.wander(&mut rng, &bounds, &cfg)).count();

        assert_eq!(busy_moves, rounds);
        assert!((450..750).contains(&lazy_moves), "lazy moved {lazy_moves} times");
    }

    #[test]
    fn daily_chat_bonus_applies_once_per_day() {
        let cfg = NpcConfig::default();
        let mut npc = villager(Personality::Grumpy, 40);
        assert!(npc.start_talking(Vec3::ZERO, 3, &cfg));
        assert!(!npc.start_talking(Vec3::ZERO, 3, &cfg));
        assert_eq!(npc.friendship(), 41);
        assert!(npc.start_talking(Vec3::ZERO, 4, &cfg));
        assert_eq!(npc.friendship(), 42);
    }

    #[test]
    fn gifts_follow_preferences_and_daily_limit() {
        let cfg = NpcConfig::default();
        let mut npc = villager(Personality::Cheerful, 50);

        let loved = npc.receive_gift(&ItemId::new("sunflower"), 1, &cfg).unwrap();
        assert_eq!(loved, GiftReaction::Loved);
        assert_eq!(npc.friendship(), 58);

        let again = npc.receive_gift(&ItemId::new("sunflower"), 1, &cfg);
        assert!(matches!(again, Err(AgentError::GiftAlreadyGiven { day: 1 })));
        assert_eq!(npc.friendship(), 58);

        let disliked = npc.receive_gift(&ItemId::new("slime"), 2, &cfg).unwrap();
        assert_eq!(disliked, GiftReaction::Disliked);
        assert_eq!(npc.friendship(), 53);

        let neutral = npc.receive_gift(&ItemId::new("pebble"), 3, &cfg).unwrap();
        assert_eq!(neutral, GiftReaction::Neutral);
        assert_eq!(npc.friendship(), 56);
    }

    #[test]
    fn friendship_clamps_at_both_ends() {
        let mut npc = villager(Personality::Shy, 98);
        assert_eq!(npc.adjust_friendship(50), 100);
        assert_eq!(npc.adjust_friendship(i32::MIN), 0);
        assert_eq!(npc.adjust_friendship(i32::MAX), 100);
    }

    #[test]
    fn spoken_lines_are_stable_within_a_day() {
        let npc = villager(Personality::Cheerful, 75);
        let context = DialogueContext {
            day: 10,
            time: TimeBucket::Night,
            weather: Weather::Rainy,
        };
        assert_eq!(npc.speak(&context), npc.speak(&context));
    }

    #[test]
    fn snapshot_round_trip_keeps_friendship_and_days() {
        let cfg = NpcConfig::default();
        let mut npc = villager(Personality::Lazy, 20);
        npc.start_talking(Vec3::ZERO, 5, &cfg);
        let restored = Npc::restore(npc.snapshot());
        assert_eq!(restored.id(), npc.id());
        assert_eq!(restored.friendship(), 21);
        assert!(restored.chatted_on(5));
        assert_eq!(restored.motion(), NpcMotion::Idle);
    }
}
