//! Enumeration types for the Homestead agent layer.
//!
//! Closed sets shared by every crate: villager archetypes, pet species,
//! world context (season, weather, time bucket), and the ability effect
//! categories of the pet ability catalog.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Villagers
// ---------------------------------------------------------------------------

/// One of the five fixed villager archetypes.
///
/// Personality flavors dialogue and encounter scripts. It also drives the
/// one movement asymmetry: [`Personality::Lazy`] villagers are sedentary and
/// usually skip wander assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Personality {
    /// Warm and talkative.
    Cheerful,
    /// Curt, but softens with friendship.
    Grumpy,
    /// Quiet and easily flustered.
    Shy,
    /// Restless and enthusiastic.
    Energetic,
    /// Sedentary; rarely wanders.
    Lazy,
}

impl Personality {
    /// Every archetype, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Cheerful,
        Self::Grumpy,
        Self::Shy,
        Self::Energetic,
        Self::Lazy,
    ];

    /// Whether this archetype skips most wander assignments.
    pub const fn is_sedentary(self) -> bool {
        matches!(self, Self::Lazy)
    }
}

/// Friendship band used to pick dialogue flavor.
///
/// Bands are inclusive upper bounds: `<= 20`, `<= 50`, `<= 80`, `> 80`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum FriendshipTier {
    /// Friendship 0 through 20.
    Stranger,
    /// Friendship 21 through 50.
    Acquaintance,
    /// Friendship 51 through 80.
    Friend,
    /// Friendship 81 through 100.
    BestFriend,
}

impl FriendshipTier {
    /// Map a friendship level onto its band.
    pub const fn from_level(level: u8) -> Self {
        match level {
            0..=20 => Self::Stranger,
            21..=50 => Self::Acquaintance,
            51..=80 => Self::Friend,
            _ => Self::BestFriend,
        }
    }
}

// ---------------------------------------------------------------------------
// Pets
// ---------------------------------------------------------------------------

/// Species available from the pet shelter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Species {
    /// Independent, loves fish.
    Cat,
    /// Loyal, loves bones.
    Dog,
    /// Fast forager, loves carrots.
    Rabbit,
    /// Keen nose for rare finds.
    Fox,
    /// Wide collection radius.
    Owl,
}

impl Species {
    /// Every species, in declaration order.
    pub const ALL: [Self; 5] = [Self::Cat, Self::Dog, Self::Rabbit, Self::Fox, Self::Owl];

    /// Lowercase catalog key.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Cat => "cat",
            Self::Dog => "dog",
            Self::Rabbit => "rabbit",
            Self::Fox => "fox",
            Self::Owl => "owl",
        }
    }

    /// Look up a species by catalog key, ignoring ASCII case.
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|species| species.slug().eq_ignore_ascii_case(slug.trim()))
    }
}

/// The kind of world effect a pet ability produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum AbilityEffect {
    /// Pick up the nearest collectible in range.
    Collect,
    /// Occasionally dig up a rare item.
    RareExplore,
    /// Clear withered crops (pest control).
    Defend,
    /// Harvest mature crops and water dry ones.
    Assist,
    /// Extra inventory slots; a static modifier, never dispatched.
    Carry,
}

// ---------------------------------------------------------------------------
// World context
// ---------------------------------------------------------------------------

/// The four seasons of the calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Season {
    /// First season of the year.
    Spring,
    /// Second season.
    Summer,
    /// Third season.
    Autumn,
    /// Fourth season.
    Winter,
}

impl Season {
    /// Seasons in calendar order.
    pub const CYCLE: [Self; 4] = [Self::Spring, Self::Summer, Self::Autumn, Self::Winter];
}

/// Weather kinds the dialogue selector distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Weather {
    /// Clear skies.
    Sunny,
    /// Overcast, dry.
    Cloudy,
    /// Steady rain; crops are watered for free.
    Rainy,
    /// Thunderstorm.
    Stormy,
    /// Snowfall.
    Snowy,
}

impl Weather {
    /// Every weather kind, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Sunny,
        Self::Cloudy,
        Self::Rainy,
        Self::Stormy,
        Self::Snowy,
    ];
}

/// Time-of-day bucket derived from the clock hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum TimeBucket {
    /// Dawn through late morning (05:00 to 11:59).
    Morning,
    /// 12:00 to 16:59.
    Afternoon,
    /// 17:00 to 20:59.
    Evening,
    /// 21:00 to 04:59.
    Night,
}

impl TimeBucket {
    /// Bucket for a clock hour in `0..24`. Hours beyond 23 wrap.
    pub const fn from_hour(hour: u32) -> Self {
        match hour % 24 {
            5..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=20 => Self::Evening,
            _ => Self::Night,
        }
    }
}

/// Growth stage of a crop as reported by the farming collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum CropStage {
    /// Freshly planted.
    Seed,
    /// Sprouted and growing.
    Growing,
    /// Ready to harvest.
    Mature,
    /// Dead; must be cleared before replanting.
    Withered,
}
