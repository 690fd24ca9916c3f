//! Frame-paced loop for the demo engine.
//!
//! [`run`] drives one [`Session`] at a fixed frame interval until the
//! frame budget is spent or shutdown is requested. Each frame the scripted
//! player walks and acts, the farm grows, the agent layer ticks with the
//! household's collaborators, and day rollover waters and restocks the
//! world.

use std::future::Future;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use homestead_agents::{Inventory, Wallet, WorldBounds};
use homestead_core::{AgentWorld, SimulationConfig, TickSummary};
use homestead_types::Weather;

use crate::error::EngineError;
use crate::player::ScriptedPlayer;
use crate::spawner::{Household, seed_household};

/// Frames between heartbeat log lines.
const HEARTBEAT_FRAMES: u64 = 100;

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The configured frame budget was spent.
    MaxFramesReached,
    /// Shutdown was requested (Ctrl-C).
    ShutdownRequested,
}

/// Result of a run.
#[derive(Debug)]
pub struct RunResult {
    /// The reason the loop ended.
    pub end_reason: EndReason,
    /// The last frame summary, if any frame completed.
    pub final_summary: Option<TickSummary>,
    /// Frames executed by this run.
    pub total_frames: u64,
}

/// Everything one demo run owns.
#[derive(Debug)]
pub struct Session {
    /// The agent layer.
    pub world: AgentWorld,
    /// The player's collaborators.
    pub household: Household,
    /// The scripted player.
    pub player: ScriptedPlayer,
    bounds: WorldBounds,
    forage_target: usize,
    rng: StdRng,
}

impl Session {
    /// Assemble the world, seed the household, and place the player.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the world or household cannot be built.
    pub fn new(config: &SimulationConfig) -> Result<Self, EngineError> {
        let world = AgentWorld::new(config)?;
        // Household randomness draws from its own stream.
        let mut rng = StdRng::seed_from_u64(config.world.seed.rotate_left(32));
        let household = seed_household(config, &mut rng)?;
        Ok(Self {
            world,
            household,
            player: ScriptedPlayer::demo(),
            bounds: config.world.bounds,
            forage_target: config.forage.target_nodes,
            rng,
        })
    }

    /// Run one frame of `dt_secs`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Tick`] if the agent layer rejects the frame.
    pub fn run_frame(&mut self, dt_secs: f32) -> Result<TickSummary, EngineError> {
        let position = self.player.walk(dt_secs);
        let frame = self.world.frame().saturating_add(1);
        self.player.act(frame, &mut self.world, &mut self.household);

        self.household.farm.advance(f64::from(dt_secs));
        let summary = {
            let mut services = self.household.services();
            self.world.tick(dt_secs, position, &mut services)?
        };

        if summary.new_day.is_some() {
            self.household.farm.new_day();
            let watered = if summary.weather == Weather::Rainy {
                self.household.rain()
            } else {
                0
            };
            let restocked =
                self.household
                    .forage
                    .replenish(&mut self.rng, &self.bounds, self.forage_target);
            info!(
                day = summary.day,
                season = ?summary.season,
                weather = ?summary.weather,
                watered,
                restocked,
                "New day"
            );
        }
        self.household.inventory.set_bonus_slots(self.world.carry_bonus());

        log_frame(self, &summary);
        Ok(summary)
    }
}

fn log_frame(session: &Session, summary: &TickSummary) {
    for encounter in &summary.encounters {
        info!(
            frame = summary.frame,
            opening = %encounter.opening,
            reply = %encounter.reply,
            "Villagers chatted"
        );
    }
    for up in &summary.level_ups {
        info!(
            pet = %up.pet,
            level = up.level,
            unlocked = ?up.unlocked,
            slot_gained = up.slot_gained,
            "Pet levelled up"
        );
    }
    for dispatch in &summary.dispatches {
        debug!(pet = %dispatch.pet, ability = %dispatch.ability, outcome = ?dispatch.outcome, "Ability");
    }
    if summary.frame.checked_rem(HEARTBEAT_FRAMES) == Some(0) {
        info!(
            frame = summary.frame,
            day = summary.day,
            hour = session.world.clock().hour(),
            time = ?summary.time,
            weather = ?summary.weather,
            pets = session.world.shelter().len(),
            coins = session.household.purse.coins(),
            slots_used = session.household.inventory.used_slots(),
            slots = session.household.inventory.slots(),
            berries = session.household.inventory.item_count(&"berries".into()),
            "Heartbeat"
        );
    }
}

/// Run the frame loop until the frame budget is spent or `shutdown`
/// resolves. A `max_frames` of zero runs until shutdown.
///
/// Every frame advances the simulation by exactly `frame_interval_ms`,
/// so a run is reproducible regardless of scheduling jitter.
///
/// # Errors
///
/// Returns [`EngineError`] if a frame fails.
pub async fn run<F>(
    session: &mut Session,
    max_frames: u64,
    frame_interval_ms: u64,
    shutdown: F,
) -> Result<RunResult, EngineError>
where
    F: Future<Output = ()>,
{
    let dt = Duration::from_millis(frame_interval_ms).as_secs_f32();
    let mut pacing = tokio::time::interval(Duration::from_millis(frame_interval_ms.max(1)));
    pacing.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);

    let mut last_summary: Option<TickSummary> = None;
    let mut total_frames: u64 = 0;

    info!(max_frames, frame_interval_ms, "Frame loop starting");

    loop {
        tokio::select! {
            biased;
            () = &mut shutdown => {
                info!(total_frames, "Shutdown requested");
                return Ok(RunResult {
                    end_reason: EndReason::ShutdownRequested,
                    final_summary: last_summary,
                    total_frames,
                });
            }
            _ = pacing.tick() => {}
        }

        let summary = session.run_frame(dt)?;
        total_frames = total_frames.saturating_add(1);

        if max_frames > 0 && total_frames >= max_frames {
            info!(frame = summary.frame, max_frames, "Frame limit reached");
            return Ok(RunResult {
                end_reason: EndReason::MaxFramesReached,
                final_summary: Some(summary),
                total_frames,
            });
        }
        last_summary = Some(summary);
    }
}

/// Log the end of a run.
pub fn log_run_end(result: &RunResult, session: &Session) {
    info!(
        reason = ?result.end_reason,
        total_frames = result.total_frames,
        "Run ended"
    );

    let Some(summary) = result.final_summary.as_ref() else {
        warn!("Run ended with no frames executed");
        return;
    };
    info!(
        frame = summary.frame,
        day = summary.day,
        season = ?summary.season,
        weather = ?summary.weather,
        "Final frame"
    );
    for npc in session.world.npcs() {
        info!(villager = npc.name(), friendship = npc.friendship(), tier = ?npc.tier(), "Friendship");
    }
    for pet in session.world.shelter().iter() {
        info!(
            pet = pet.name(),
            species = ?pet.species(),
            level = pet.level(),
            abilities = pet.unlocked_abilities().len(),
            "Companion"
        );
    }
    let snapshot = session.world.snapshot();
    info!(
        npcs = snapshot.npcs.len(),
        pets = snapshot.pets.len(),
        elapsed_secs = snapshot.elapsed_secs,
        "Save snapshot ready"
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(&SimulationConfig::default()).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_by_max_frames() {
        let mut session = session();
        let result = run(&mut session, 5, 100, std::future::pending()).await.unwrap();
        assert_eq!(result.end_reason, EndReason::MaxFramesReached);
        assert_eq!(result.total_frames, 5);
        assert_eq!(session.world.frame(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_stops_before_the_first_frame() {
        let mut session = session();
        let result = run(&mut session, 0, 100, std::future::ready(())).await.unwrap();
        assert_eq!(result.end_reason, EndReason::ShutdownRequested);
        assert_eq!(result.total_frames, 0);
        assert!(result.final_summary.is_none());
    }

    #[test]
    fn scripted_adoption_happens_on_cue() {
        let mut session = session();
        for _ in 0..10 {
            session.run_frame(0.1).unwrap();
        }
        assert!(session.player.pet().is_some());
        assert_eq!(session.world.shelter().len(), 1);
    }

    #[test]
    fn new_day_restocks_forage() {
        let mut config = SimulationConfig::default();
        config.time.game_minutes_per_second = 600.0;
        let mut session = Session::new(&config).unwrap();
        let target = config.forage.target_nodes;
        session.household.forage = homestead_world::ForageField::new();

        let mut saw_new_day = false;
        for _ in 0..20 {
            let summary = session.run_frame(1.0).unwrap();
            if summary.new_day.is_some() {
                saw_new_day = true;
                break;
            }
        }
        assert!(saw_new_day);
        assert_eq!(session.household.forage.len(), target);
    }
}
