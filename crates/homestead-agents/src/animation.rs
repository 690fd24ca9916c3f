//! Procedural walk-cycle synthesis.
//!
//! While an agent translates, a phase accumulator advances by
//! `dt * animation_speed`. Opposing limbs swing as `sin(phase)` and
//! `sin(phase + PI)`; a half-rate sine drives a small lateral sway and a
//! vertical bob. Whenever the agent stops, the phase and every offset snap
//! to zero.

use core::f32::consts::PI;

/// Ratio of the secondary (sway/bob) sine to the limb sine.
const SECONDARY_RATE: f32 = 0.5;

/// Peak lateral sway in radians.
const SWAY_AMPLITUDE: f32 = 0.05;

/// Peak vertical bob in world units.
const BOB_AMPLITUDE: f32 = 0.04;

/// Limb rotation offsets for one frame, in radians (bob in world units).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LimbPose {
    /// Left arm swing.
    pub left_arm: f32,
    /// Right arm swing.
    pub right_arm: f32,
    /// Left leg swing.
    pub left_leg: f32,
    /// Right leg swing.
    pub right_leg: f32,
    /// Side-to-side body roll.
    pub sway: f32,
    /// Vertical body offset.
    pub bob: f32,
}

impl LimbPose {
    /// The neutral standing pose.
    pub const NEUTRAL: Self = Self {
        left_arm: 0.0,
        right_arm: 0.0,
        left_leg: 0.0,
        right_leg: 0.0,
        sway: 0.0,
        bob: 0.0,
    };

    /// Whether every offset is zero.
    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }
}

/// Phase accumulator driving the walk cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WalkCycle {
    phase: f32,
    pose: LimbPose,
}

impl WalkCycle {
    /// A cycle at rest.
    pub const fn new() -> Self {
        Self {
            phase: 0.0,
            pose: LimbPose::NEUTRAL,
        }
    }

    /// Advance the cycle for a frame in which the agent moved.
    pub fn advance(&mut self, dt: f32, animation_speed: f32, amplitude: f32) -> LimbPose {
        // Wrap at two full limb periods so the half-rate sway stays continuous.
        self.phase = dt.mul_add(animation_speed, self.phase) % (4.0 * PI);
        self.pose = pose_at(self.phase, amplitude);
        self.pose
    }

    /// Snap to the neutral pose.
    pub const fn reset(&mut self) {
        self.phase = 0.0;
        self.pose = LimbPose::NEUTRAL;
    }

    /// Current phase in radians.
    pub const fn phase(&self) -> f32 {
        self.phase
    }

    /// Pose produced by the last update.
    pub const fn pose(&self) -> LimbPose {
        self.pose
    }
}

/// Compute the limb pose for a phase.
pub fn pose_at(phase: f32, amplitude: f32) -> LimbPose {
    let swing = phase.sin() * amplitude;
    let counter = (phase + PI).sin() * amplitude;
    let secondary = (phase * SECONDARY_RATE).sin();
    LimbPose {
        // Arms swing opposite to the leg on the same side.
        left_arm: counter,
        right_arm: swing,
        left_leg: swing,
        right_leg: counter,
        sway: secondary * SWAY_AMPLITUDE,
        bob: secondary.abs() * BOB_AMPLITUDE,
    }
}
