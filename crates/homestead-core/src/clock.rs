//! World clock for the Homestead simulation.
//!
//! The clock converts real frame deltas into game time. It tracks total
//! elapsed simulation seconds (the timebase for cooldowns, encounter
//! throttles, and pet interaction timestamps) and the game calendar (day
//! number, hour, season) used for dialogue and weather.
//!
//! # Design Principles
//!
//! - Day, hour, and season are derived from the game-minute counter, never
//!   stored independently.
//! - All integer derivations use checked or saturating arithmetic.
//! - Days are numbered from 1.

use homestead_types::{Season, TimeBucket};

use crate::config::TimeConfig;

/// Game minutes in one day.
const MINUTES_PER_DAY: u64 = 24 * 60;

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// The frame delta was negative or not a number.
    #[error("invalid frame delta: {0}")]
    InvalidDelta(f32),

    /// Invalid time configuration (e.g. zero days per season).
    #[error("invalid time configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

/// World clock tracking simulation and calendar time.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldClock {
    /// Simulation seconds since the world was created.
    elapsed_secs: f64,

    /// Whole game minutes since midnight of day 1.
    total_minutes: u64,

    /// Fractional game minute carried between frames.
    minute_fraction: f64,

    /// Game minutes that pass per real second.
    minutes_per_second: f64,

    /// Days in one season.
    days_per_season: u32,

    /// Ordered list of seasons that form the annual cycle.
    seasons: Vec<Season>,
}

impl WorldClock {
    /// Create a clock at `start_hour` on day 1.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if the configuration is invalid.
    pub fn new(config: &TimeConfig) -> Result<Self, ClockError> {
        let start_minute = u64::from(config.start_hour.min(23)).saturating_mul(60);
        Self::from_parts(0.0, 1, start_minute, config)
    }

    /// Rebuild a clock at a given moment (useful for restoring a save).
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if the configuration is invalid.
    pub fn from_parts(
        elapsed_secs: f64,
        day: u32,
        minute_of_day: u64,
        config: &TimeConfig,
    ) -> Result<Self, ClockError> {
        if config.days_per_season == 0 {
            return Err(ClockError::InvalidConfig {
                reason: "days_per_season must be at least 1".to_owned(),
            });
        }
        if !config.game_minutes_per_second.is_finite() || config.game_minutes_per_second < 0.0 {
            return Err(ClockError::InvalidConfig {
                reason: "game_minutes_per_second must be a non-negative number".to_owned(),
            });
        }
        let seasons = parse_seasons(&config.seasons)?;
        if seasons.is_empty() {
            return Err(ClockError::InvalidConfig {
                reason: "at least one season must be configured".to_owned(),
            });
        }

        let whole_days = u64::from(day.max(1).saturating_sub(1));
        let total_minutes = whole_days
            .saturating_mul(MINUTES_PER_DAY)
            .saturating_add(minute_of_day.min(MINUTES_PER_DAY.saturating_sub(1)));

        Ok(Self {
            elapsed_secs: if elapsed_secs.is_finite() { elapsed_secs.max(0.0) } else { 0.0 },
            total_minutes,
            minute_fraction: 0.0,
            minutes_per_second: config.game_minutes_per_second,
            days_per_season: config.days_per_season,
            seasons,
        })
    }

    /// Advance by a real frame delta. Returns the new day number if the
    /// clock crossed midnight.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidDelta`] for a negative or non-finite delta.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn advance(&mut self, dt_secs: f32) -> Result<Option<u32>, ClockError> {
        if !dt_secs.is_finite() || dt_secs < 0.0 {
            return Err(ClockError::InvalidDelta(dt_secs));
        }
        let day_before = self.day();
        let dt = f64::from(dt_secs);
        self.elapsed_secs += dt;

        self.minute_fraction += dt * self.minutes_per_second;
        let whole = self.minute_fraction.floor();
        self.minute_fraction -= whole;
        // `whole` is finite and non-negative; `as` saturates at u64::MAX.
        self.total_minutes = self.total_minutes.saturating_add(whole as u64);

        let day_after = self.day();
        Ok((day_after != day_before).then_some(day_after))
    }

    /// Simulation seconds since the world was created.
    pub const fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    /// Current day number, starting at 1.
    pub fn day(&self) -> u32 {
        let days = self.total_minutes.checked_div(MINUTES_PER_DAY).unwrap_or(0);
        u32::try_from(days).unwrap_or(u32::MAX).saturating_add(1)
    }

    /// Minutes past midnight.
    pub fn minute_of_day(&self) -> u64 {
        self.total_minutes.checked_rem(MINUTES_PER_DAY).unwrap_or(0)
    }

    /// Hour of the day, `0..24`.
    pub fn hour(&self) -> u32 {
        u32::try_from(self.minute_of_day().checked_div(60).unwrap_or(0)).unwrap_or(0)
    }

    /// Time-of-day bucket for dialogue.
    pub fn time_bucket(&self) -> TimeBucket {
        TimeBucket::from_hour(self.hour())
    }

    /// Current season.
    ///
    /// The season index is `((day - 1) / days_per_season) % season_count`.
    pub fn season(&self) -> Season {
        let index = self
            .day()
            .saturating_sub(1)
            .checked_div(self.days_per_season)
            .unwrap_or(0);
        let count = u32::try_from(self.seasons.len()).unwrap_or(u32::MAX);
        let index = index.checked_rem(count).unwrap_or(0);
        usize::try_from(index)
            .ok()
            .and_then(|i| self.seasons.get(i))
            .copied()
            .unwrap_or(Season::Spring)
    }

    /// Days left in the current season, counting today.
    pub fn days_until_season_change(&self) -> u32 {
        let within = self
            .day()
            .saturating_sub(1)
            .checked_rem(self.days_per_season)
            .unwrap_or(0);
        self.days_per_season.saturating_sub(within)
    }

    /// The configured season cycle.
    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }
}

/// Parse season names into typed [`Season`] values.
///
/// # Errors
///
/// Returns [`ClockError::InvalidConfig`] for an unknown name.
fn parse_seasons(names: &[String]) -> Result<Vec<Season>, ClockError> {
    names
        .iter()
        .map(|name| match name.to_lowercase().as_str() {
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "autumn" | "fall" => Ok(Season::Autumn),
            "winter" => Ok(Season::Winter),
            other => Err(ClockError::InvalidConfig {
                reason: format!("unknown season: {other}"),
            }),
        })
        .collect()
}
