//! Daily weather with season-weighted probabilities.
//!
//! Weather is rolled once per game day from `(world_seed, day)`, so the
//! same seed always produces the same forecast. The distribution depends
//! on the season:
//!
//! | Weather  | Spring | Summer | Autumn | Winter |
//! |----------|--------|--------|--------|--------|
//! | Sunny    | 30%    | 50%    | 25%    | 20%    |
//! | Cloudy   | 20%    | 20%    | 30%    | 25%    |
//! | Rainy    | 35%    | 15%    | 30%    | 10%    |
//! | Stormy   | 10%    | 15%    | 10%    |  5%    |
//! | Snowy    |  0%    |  0%    |  0%    | 30%    |
//! | (repeat) |  5%    |  0%    |  5%    | 10%    |
//!
//! The "repeat" weight keeps yesterday's weather, giving streaks a natural
//! feel.

use tracing::debug;

use homestead_agents::seed::splitmix64;
use homestead_types::{Season, Weather};

/// Weighted weather entries for one season. `None` means "repeat".
fn season_weights(season: Season) -> &'static [(Option<Weather>, u32)] {
    match season {
        Season::Spring => &[
            (Some(Weather::Sunny), 30),
            (Some(Weather::Cloudy), 20),
            (Some(Weather::Rainy), 35),
            (Some(Weather::Stormy), 10),
            (None, 5),
        ],
        Season::Summer => &[
            (Some(Weather::Sunny), 50),
            (Some(Weather::Cloudy), 20),
            (Some(Weather::Rainy), 15),
            (Some(Weather::Stormy), 15),
        ],
        Season::Autumn => &[
            (Some(Weather::Sunny), 25),
            (Some(Weather::Cloudy), 30),
            (Some(Weather::Rainy), 30),
            (Some(Weather::Stormy), 10),
            (None, 5),
        ],
        Season::Winter => &[
            (Some(Weather::Sunny), 20),
            (Some(Weather::Cloudy), 25),
            (Some(Weather::Rainy), 10),
            (Some(Weather::Stormy), 5),
            (Some(Weather::Snowy), 30),
            (None, 10),
        ],
    }
}

/// Deterministic daily weather generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherSystem {
    world_seed: u64,
    current: Weather,
}

impl WeatherSystem {
    /// A generator starting under sunny skies.
    pub const fn new(world_seed: u64) -> Self {
        Self {
            world_seed,
            current: Weather::Sunny,
        }
    }

    /// Today's weather.
    pub const fn current(&self) -> Weather {
        self.current
    }

    /// Override today's weather (useful for state restoration and tests).
    pub const fn set_current(&mut self, weather: Weather) {
        self.current = weather;
    }

    /// Roll the weather for `day` and make it current.
    pub fn roll(&mut self, day: u32, season: Season) -> Weather {
        let weather = self.peek(day, season);
        debug!(day, ?season, ?weather, "weather rolled");
        self.current = weather;
        weather
    }

    /// What [`WeatherSystem::roll`] would produce, without changing state.
    pub fn peek(&self, day: u32, season: Season) -> Weather {
        let weights = season_weights(season);
        let total = weights
            .iter()
            .fold(0_u32, |acc, (_, weight)| acc.saturating_add(*weight));
        if total == 0 {
            return Weather::Sunny;
        }

        let random = splitmix64(self.world_seed ^ splitmix64(u64::from(day)));
        let roll = u32::try_from(random.checked_rem(u64::from(total)).unwrap_or(0)).unwrap_or(0);

        let mut cumulative = 0_u32;
        for (weather, weight) in weights {
            cumulative = cumulative.saturating_add(*weight);
            if roll < cumulative {
                return weather.unwrap_or(self.current);
            }
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn same_seed_same_forecast() {
        let a = WeatherSystem::new(42);
        let b = WeatherSystem::new(42);
        for day in 1..50 {
            assert_eq!(a.peek(day, Season::Spring), b.peek(day, Season::Spring));
        }
    }

    #[test]
    fn forecasts_vary_across_days() {
        let system = WeatherSystem::new(7);
        let kinds: std::collections::BTreeSet<_> =
            (1..100).map(|day| system.peek(day, Season::Autumn)).collect();
        assert!(kinds.len() >= 3);
    }

    #[test]
    fn snow_only_falls_in_winter() {
        let mut system = WeatherSystem::new(3);
        for day in 1..400 {
            for season in [Season::Spring, Season::Summer, Season::Autumn] {
                system.set_current(Weather::Sunny);
                assert_ne!(system.roll(day, season), Weather::Snowy);
            }
        }
    }

    #[test]
    fn winter_is_often_snowy() {
        let system = WeatherSystem::new(11);
        let mut counts: BTreeMap<Weather, u32> = BTreeMap::new();
        for day in 1..1_001 {
            let entry = counts.entry(system.peek(day, Season::Winter)).or_insert(0);
            *entry = entry.saturating_add(1);
        }
        let snowy = counts.get(&Weather::Snowy).copied().unwrap_or(0);
        assert!((200..450).contains(&snowy), "snowy on {snowy} of 1000 days");
    }

    #[test]
    fn roll_updates_current() {
        let mut system = WeatherSystem::new(99);
        let rolled = system.roll(5, Season::Summer);
        assert_eq!(system.current(), rolled);
    }
}
