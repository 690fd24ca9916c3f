//! Core value types and persistence snapshots.
//!
//! [`Vec3`] is the world-space position type used by every agent. The
//! snapshot structs are the plain-data shape handed to the game host's save
//! system and accepted back on load.

use std::collections::BTreeSet;
use std::ops::{Add, Mul, Sub};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Personality, Species};
use crate::ids::{AbilityId, AgentId, ItemId};

// ---------------------------------------------------------------------------
// Vec3
// ---------------------------------------------------------------------------

/// A point or direction in world space. `y` is up.
///
/// Agents walk on the ground plane, so steering helpers ignore `y`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Vec3 {
    /// East-west axis.
    pub x: f32,
    /// Vertical axis.
    pub y: f32,
    /// North-south axis.
    pub z: f32,
}

impl Vec3 {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Construct a vector from components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Construct a point on the ground plane.
    pub const fn ground(x: f32, z: f32) -> Self {
        Self { x, y: 0.0, z }
    }

    /// Vector from `self` to `target`, flattened onto the ground plane.
    pub fn flat_to(self, target: Self) -> Self {
        Self::new(target.x - self.x, 0.0, target.z - self.z)
    }

    /// Euclidean length.
    pub fn length(self) -> f32 {
        self.z.mul_add(self.z, self.x.mul_add(self.x, self.y * self.y)).sqrt()
    }

    /// Ground-plane distance between two points.
    pub fn flat_distance(self, other: Self) -> f32 {
        self.flat_to(other).length()
    }

    /// Unit vector in the same direction, or zero for a zero-length input.
    pub fn normalize_or_zero(self) -> Self {
        let len = self.length();
        if len > f32::EPSILON {
            self * len.recip()
        } else {
            Self::ZERO
        }
    }

    /// Heading (yaw, radians) of a ground-plane direction. Zero faces +z.
    pub fn heading(self) -> f32 {
        self.x.atan2(self.z)
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// A quantity of one inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ItemStack {
    /// Item catalog key.
    pub item: ItemId,
    /// Number of units.
    pub count: u32,
}

impl ItemStack {
    /// Construct a stack.
    pub fn new(item: impl Into<ItemId>, count: u32) -> Self {
        Self {
            item: item.into(),
            count,
        }
    }
}

impl From<String> for ItemId {
    fn from(slug: String) -> Self {
        Self(slug)
    }
}

// ---------------------------------------------------------------------------
// Pet needs
// ---------------------------------------------------------------------------

/// The five percentage needs of a pet. Every field stays in `[0, 100]`.
///
/// `hunger` is a fullness meter: 100 is fed, 0 is starving.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PetNeeds {
    /// Overall health.
    pub health: f32,
    /// Mood.
    pub happiness: f32,
    /// Bond with the owner.
    pub intimacy: f32,
    /// Fullness.
    pub hunger: f32,
    /// Stamina.
    pub energy: f32,
}

impl Default for PetNeeds {
    fn default() -> Self {
        Self {
            health: 100.0,
            happiness: 80.0,
            intimacy: 10.0,
            hunger: 80.0,
            energy: 100.0,
        }
    }
}

impl PetNeeds {
    /// Clamp every need into `[0, 100]`. Non-finite values collapse to 0.
    pub fn clamp(&mut self) {
        for need in [
            &mut self.health,
            &mut self.happiness,
            &mut self.intimacy,
            &mut self.hunger,
            &mut self.energy,
        ] {
            *need = clamp_percent(*need);
        }
    }
}

/// Clamp a percentage into `[0, 100]`, mapping NaN to 0.
pub fn clamp_percent(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// Persisted state of one villager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NpcSnapshot {
    /// Stable identity.
    pub id: AgentId,
    /// Display name.
    pub name: String,
    /// Archetype.
    pub personality: Personality,
    /// Friendship with the player, `0..=100`.
    pub friendship: u8,
    /// Last known position.
    pub position: Vec3,
    /// Items that earn a large friendship bonus as gifts.
    pub favorite_items: Vec<ItemId>,
    /// Items that cost friendship as gifts.
    pub disliked_items: Vec<ItemId>,
    /// Day of the last conversation, if any.
    pub last_chat_day: Option<u32>,
    /// Day of the last accepted gift, if any.
    pub last_gift_day: Option<u32>,
}

/// Persisted state of one pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PetSnapshot {
    /// Stable identity.
    pub id: AgentId,
    /// Display name.
    pub name: String,
    /// Catalog species.
    pub species: Species,
    /// Wall-clock adoption time.
    pub adopted_at: DateTime<Utc>,
    /// Last known position.
    pub position: Vec3,
    /// Current level, starting at 1.
    pub level: u32,
    /// Experience toward the next level.
    pub experience: u32,
    /// Percentage needs.
    pub needs: PetNeeds,
    /// Abilities unlocked so far.
    pub unlocked_abilities: BTreeSet<AbilityId>,
    /// Whether the pet is following the player.
    pub following: bool,
    /// Collection radius stat in world units.
    pub collection_radius: f32,
    /// Movement speed stat in world units per second.
    pub speed: f32,
    /// Extra inventory slots earned from levels.
    pub slot_bonus: u32,
    /// Simulation time (seconds) of the last feed, play, or pet.
    pub last_interaction_secs: f64,
}

/// Persisted state of the whole agent layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WorldSnapshot {
    /// Simulation seconds elapsed since the world was created.
    pub elapsed_secs: f64,
    /// Current day number, starting at 1.
    pub day: u32,
    /// Minutes past midnight on the current day.
    pub minute_of_day: u32,
    /// Villager roster.
    pub npcs: Vec<NpcSnapshot>,
    /// Pet roster.
    pub pets: Vec<PetSnapshot>,
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn flat_distance_ignores_height() {
        let a = Vec3::new(0.0, 5.0, 0.0);
        let b = Vec3::new(3.0, -2.0, 4.0);
        assert!((a.flat_distance(b) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn normalize_zero_stays_zero() {
        assert_eq!(Vec3::ZERO.normalize_or_zero(), Vec3::ZERO);
        let unit = Vec3::ground(10.0, 0.0).normalize_or_zero();
        assert!((unit.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn heading_faces_positive_z_at_zero() {
        assert!(Vec3::ground(0.0, 1.0).heading().abs() < 1e-6);
        assert!((Vec3::ground(1.0, 0.0).heading() - core::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn clamp_percent_handles_nan_and_bounds() {
        assert_eq!(clamp_percent(f32::NAN), 0.0);
        assert_eq!(clamp_percent(-3.0), 0.0);
        assert_eq!(clamp_percent(140.0), 100.0);
        assert_eq!(clamp_percent(42.5), 42.5);
    }

    #[test]
    fn needs_clamp_all_fields() {
        let mut needs = PetNeeds {
            health: 120.0,
            happiness: -1.0,
            intimacy: 50.0,
            hunger: f32::NAN,
            energy: 101.0,
        };
        needs.clamp();
        assert_eq!(needs.health, 100.0);
        assert_eq!(needs.happiness, 0.0);
        assert_eq!(needs.intimacy, 50.0);
        assert_eq!(needs.hunger, 0.0);
        assert_eq!(needs.energy, 100.0);
    }
}
