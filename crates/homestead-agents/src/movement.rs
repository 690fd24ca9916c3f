//! Movement states and direct-line steering.
//!
//! Agents never path-find: they steer straight at a target point on the
//! ground plane. Destinations live inside the state variants, so a talking
//! villager cannot hold a destination and a pet cannot be following and at
//! home at once.

use rand::Rng;

use homestead_types::Vec3;

use crate::config::WorldBounds;

/// Villager movement state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NpcMotion {
    /// Standing still, waiting for the next wander round.
    Idle,
    /// Walking toward a destination.
    Moving {
        /// Where the villager is headed.
        destination: Vec3,
    },
    /// In conversation with the player; autonomous movement is suspended.
    Talking,
}

impl NpcMotion {
    /// Active destination, if walking.
    pub const fn destination(&self) -> Option<Vec3> {
        match self {
            Self::Moving { destination } => Some(*destination),
            Self::Idle | Self::Talking => None,
        }
    }

    /// Whether the villager is talking.
    pub const fn is_talking(&self) -> bool {
        matches!(self, Self::Talking)
    }
}

/// Pet movement state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetMotion {
    /// Resting in the shelter.
    AtHome,
    /// Trailing the player.
    Following,
    /// Walking back to the shelter.
    Returning,
}

/// Result of one steering step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Steer {
    /// Within the arrival threshold; the agent did not move.
    Arrived,
    /// Moved toward the target; carries the new heading.
    Moved {
        /// Heading of the travel direction, in radians.
        heading: f32,
    },
}

/// Step `position` toward `target` at `speed` for `dt` seconds.
///
/// Never overshoots: the final step lands exactly on the target.
pub fn steer_toward(position: &mut Vec3, target: Vec3, speed: f32, dt: f32, arrival: f32) -> Steer {
    let offset = position.flat_to(target);
    let distance = offset.length();
    if distance < arrival {
        return Steer::Arrived;
    }
    let step = (speed * dt).clamp(0.0, distance);
    *position = *position + offset.normalize_or_zero() * step;
    Steer::Moved {
        heading: offset.heading(),
    }
}

/// Pick a uniformly random ground point inside `bounds`.
pub fn random_destination<R: Rng + ?Sized>(rng: &mut R, bounds: &WorldBounds) -> Vec3 {
    let x = if bounds.max_x > bounds.min_x {
        rng.random_range(bounds.min_x..bounds.max_x)
    } else {
        bounds.min_x
    };
    let z = if bounds.max_z > bounds.min_z {
        rng.random_range(bounds.min_z..bounds.max_z)
    } else {
        bounds.min_z
    };
    Vec3::ground(x, z)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn steering_moves_by_speed_times_dt() {
        let mut pos = Vec3::ZERO;
        let result = steer_toward(&mut pos, Vec3::ground(10.0, 0.0), 2.0, 0.5, 0.3);
        assert!(matches!(result, Steer::Moved { .. }));
        assert!((pos.x - 1.0).abs() < 1e-5);
        assert!(pos.z.abs() < 1e-5);
    }

    #[test]
    fn steering_never_overshoots() {
        let mut pos = Vec3::ZERO;
        let _ = steer_toward(&mut pos, Vec3::ground(0.0, 1.0), 100.0, 1.0, 0.3);
        assert!((pos.z - 1.0).abs() < 1e-5);
        assert_eq!(steer_toward(&mut pos, Vec3::ground(0.0, 1.0), 100.0, 1.0, 0.3), Steer::Arrived);
    }

    #[test]
    fn heading_points_at_target() {
        let mut pos = Vec3::ZERO;
        match steer_toward(&mut pos, Vec3::ground(5.0, 0.0), 1.0, 0.1, 0.3) {
            Steer::Moved { heading } => {
                assert!((heading - core::f32::consts::FRAC_PI_2).abs() < 1e-5);
            }
            Steer::Arrived => panic!("should have moved"),
        }
    }

    #[test]
    fn random_destinations_respect_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = WorldBounds {
            min_x: -5.0,
            max_x: 5.0,
            min_z: 0.0,
            max_z: 2.0,
        };
        for _ in 0..200 {
            let d = random_destination(&mut rng, &bounds);
            assert!((-5.0..5.0).contains(&d.x));
            assert!((0.0..2.0).contains(&d.z));
        }
    }

    #[test]
    fn talking_has_no_destination() {
        assert_eq!(NpcMotion::Talking.destination(), None);
        assert_eq!(NpcMotion::Idle.destination(), None);
        let dest = Vec3::ground(1.0, 1.0);
        assert_eq!(NpcMotion::Moving { destination: dest }.destination(), Some(dest));
    }
}
