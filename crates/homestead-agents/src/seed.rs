//! Counter-based hashing for reproducible per-day randomness.
//!
//! Dialogue must be stable for a given villager within one simulated day
//! and vary across days. Rather than keeping generator state, every draw is
//! a pure function of `(day, agent, counter)` run through `splitmix64`.

use homestead_types::AgentId;

/// Golden-ratio increment used by `splitmix64`.
const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// `2^-53`, the spacing of doubles in `[0, 1)` with 53 bits of mantissa.
const UNIT_SCALE: f64 = 1.0 / 9_007_199_254_740_992.0;

/// One round of the `splitmix64` finalizer.
pub const fn splitmix64(value: u64) -> u64 {
    let mut z = value.wrapping_add(GOLDEN_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Seed shared by every draw an agent makes on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySeed(u64);

impl DaySeed {
    /// Derive the seed for `agent` on `day`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(day: u32, agent: AgentId) -> Self {
        let bits = agent.into_inner().as_u128();
        let folded = (bits as u64) ^ ((bits >> 64) as u64);
        Self(splitmix64(folded ^ splitmix64(u64::from(day))))
    }

    /// Raw seed value.
    pub const fn value(self) -> u64 {
        self.0
    }

    /// The `counter`-th uniform draw in `[0, 1)`.
    #[allow(clippy::cast_precision_loss)]
    pub fn unit(self, counter: u64) -> f64 {
        let bits = splitmix64(self.0.wrapping_add(counter.wrapping_mul(GOLDEN_GAMMA)));
        (bits >> 11) as f64 * UNIT_SCALE
    }
}
