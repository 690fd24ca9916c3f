//! Weighted dialogue pool selection for villagers.
//!
//! A line is chosen in two draws from the villager's [`DaySeed`]:
//!
//! 1. Pick a pool: 50% friendship tier, then 30% of the remainder time of
//!    day (15% overall), otherwise weather (35% overall).
//! 2. Index uniformly into the chosen pool.
//!
//! An empty pool falls back to the friendship-tier pool. Because both
//! draws are pure functions of `(day, agent)`, repeated calls within a day
//! return the same line for the same context, and the line changes as days
//! pass.

mod lines;

use homestead_types::{AgentId, FriendshipTier, Personality, TimeBucket, Weather};

use crate::seed::DaySeed;

pub use lines::{friendship_pool, time_pool, weather_pool};

/// Probability of drawing from the friendship-tier pool.
const FRIENDSHIP_SHARE: f64 = 0.5;

/// Share of the non-friendship remainder that goes to the time-of-day pool.
const TIME_SHARE_OF_REMAINDER: f64 = 0.3;

/// Draw counter for the pool choice.
const POOL_DRAW: u64 = 0;

/// Draw counter for the line index.
const LINE_DRAW: u64 = 1;

/// World context a line is chosen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogueContext {
    /// Simulated day number.
    pub day: u32,
    /// Time-of-day bucket.
    pub time: TimeBucket,
    /// Current weather.
    pub weather: Weather,
}

/// Which pool a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialoguePool {
    /// Friendship tier by personality.
    Friendship,
    /// Time-of-day bucket.
    TimeOfDay,
    /// Weather by personality.
    Weather,
}

/// The speaker attributes that shape dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Speaker {
    /// Villager identity (part of the seed).
    pub id: AgentId,
    /// Archetype.
    pub personality: Personality,
    /// Friendship with the player.
    pub friendship: u8,
}

/// Map a uniform draw onto a pool.
pub fn choose_pool(draw: f64) -> DialoguePool {
    let time_cutoff = (1.0 - FRIENDSHIP_SHARE).mul_add(TIME_SHARE_OF_REMAINDER, FRIENDSHIP_SHARE);
    if draw < FRIENDSHIP_SHARE {
        DialoguePool::Friendship
    } else if draw < time_cutoff {
        DialoguePool::TimeOfDay
    } else {
        DialoguePool::Weather
    }
}

/// Select a line and report which pool it came from.
pub fn select(speaker: &Speaker, context: &DialogueContext) -> (DialoguePool, &'static str) {
    let seed = DaySeed::new(context.day, speaker.id);
    let pool = choose_pool(seed.unit(POOL_DRAW));
    let tier = FriendshipTier::from_level(speaker.friendship);

    let (pool, lines) = match pool_lines(pool, tier, speaker.personality, context) {
        lines if lines.is_empty() => (
            DialoguePool::Friendship,
            friendship_pool(tier, speaker.personality),
        ),
        lines => (pool, lines),
    };

    (pool, pick(lines, seed.unit(LINE_DRAW)))
}

/// Select a line for the speaker in the given context.
pub fn select_line(speaker: &Speaker, context: &DialogueContext) -> &'static str {
    select(speaker, context).1
}

fn pool_lines(
    pool: DialoguePool,
    tier: FriendshipTier,
    personality: Personality,
    context: &DialogueContext,
) -> &'static [&'static str] {
    match pool {
        DialoguePool::Friendship => friendship_pool(tier, personality),
        DialoguePool::TimeOfDay => time_pool(context.time),
        DialoguePool::Weather => weather_pool(context.weather, personality),
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn pick(lines: &'static [&'static str], draw: f64) -> &'static str {
    let last = lines.len().saturating_sub(1);
    let index = ((draw * lines.len() as f64) as usize).min(last);
    lines.get(index).copied().unwrap_or("...")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn speaker(friendship: u8) -> Speaker {
        Speaker {
            id: AgentId::new(),
            personality: Personality::Cheerful,
            friendship,
        }
    }

    fn night_rain(day: u32) -> DialogueContext {
        DialogueContext {
            day,
            time: TimeBucket::Night,
            weather: Weather::Rainy,
        }
    }

    #[test]
    fn pool_thresholds() {
        assert_eq!(choose_pool(0.0), DialoguePool::Friendship);
        assert_eq!(choose_pool(0.49), DialoguePool::Friendship);
        assert_eq!(choose_pool(0.5), DialoguePool::TimeOfDay);
        assert_eq!(choose_pool(0.64), DialoguePool::TimeOfDay);
        assert_eq!(choose_pool(0.66), DialoguePool::Weather);
        assert_eq!(choose_pool(0.99), DialoguePool::Weather);
    }

    #[test]
    fn same_day_same_line() {
        let who = speaker(40);
        let ctx = night_rain(7);
        let first = select_line(&who, &ctx);
        for _ in 0..10 {
            assert_eq!(select_line(&who, &ctx), first);
        }
    }

    #[test]
    fn lines_vary_across_days() {
        let who = speaker(40);
        let distinct: BTreeSet<&str> = (1..=60).map(|day| select_line(&who, &night_rain(day))).collect();
        assert!(distinct.len() >= 3, "only {} distinct lines", distinct.len());
    }

    #[test]
    fn friend_at_night_in_rain_never_sounds_like_a_stranger() {
        for _ in 0..50 {
            let who = speaker(75);
            let ctx = night_rain(10);
            let (pool, line) = select(&who, &ctx);

            let allowed: Vec<&str> = friendship_pool(FriendshipTier::Friend, who.personality)
                .iter()
                .chain(time_pool(TimeBucket::Night))
                .chain(weather_pool(Weather::Rainy, who.personality))
                .copied()
                .collect();
            assert!(allowed.contains(&line), "{pool:?} produced {line:?}");
            assert!(!friendship_pool(FriendshipTier::Stranger, who.personality).contains(&line));
        }
    }

    #[test]
    fn pool_frequencies_follow_the_weights() {
        let who = speaker(10);
        let mut friendship = 0_u32;
        let mut time = 0_u32;
        for day in 0..4_000 {
            match select(&who, &night_rain(day)).0 {
                DialoguePool::Friendship => friendship += 1,
                DialoguePool::TimeOfDay => time += 1,
                DialoguePool::Weather => {}
            }
        }
        assert!((1_800..2_200).contains(&friendship), "friendship {friendship}");
        assert!((450..750).contains(&time), "time {time}");
    }

    #[test]
    fn pick_never_overruns() {
        let lines: &'static [&'static str] = &["a", "b", "c"];
        assert_eq!(pick(lines, 0.0), "a");
        assert_eq!(pick(lines, 0.999_999), "c");
        assert_eq!(pick(lines, 1.0), "c");
        assert_eq!(pick(&[], 0.5), "...");
    }
}
