//! Per-pet, per-ability cooldown ledger.
//!
//! Pure bookkeeping: `(agent, ability) -> remaining seconds`. Entries are
//! created lazily the first time an ability is checked, count down with
//! the frame delta, never drop below zero, and vanish when the owning
//! agent is released.

use std::collections::BTreeMap;

use homestead_types::{AbilityId, AgentId};

/// Remaining cooldown time for every `(agent, ability)` pair seen so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CooldownRegistry {
    remaining: BTreeMap<(AgentId, AbilityId), f32>,
}

impl CooldownRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            remaining: BTreeMap::new(),
        }
    }

    /// Count every cooldown down by `dt` seconds, flooring at zero.
    ///
    /// Non-finite or non-positive deltas are ignored.
    pub fn tick(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        for remaining in self.remaining.values_mut() {
            *remaining = (*remaining - dt).max(0.0);
        }
    }

    /// Remaining seconds for an ability, creating a zero entry if unseen.
    pub fn remaining(&mut self, agent: AgentId, ability: &AbilityId) -> f32 {
        *self
            .remaining
            .entry((agent, ability.clone()))
            .or_insert(0.0)
    }

    /// Remaining seconds without creating an entry. Unseen pairs report 0.
    pub fn peek(&self, agent: AgentId, ability: &AbilityId) -> f32 {
        self.remaining
            .get(&(agent, ability.clone()))
            .copied()
            .unwrap_or(0.0)
    }

    /// Whether the ability may act this frame.
    pub fn is_ready(&mut self, agent: AgentId, ability: &AbilityId) -> bool {
        self.remaining(agent, ability) <= 0.0
    }

    /// Restart the cooldown at `duration` seconds (negative values clamp to 0).
    pub fn arm(&mut self, agent: AgentId, ability: &AbilityId, duration: f32) {
        let duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        self.remaining.insert((agent, ability.clone()), duration);
    }

    /// Drop every entry owned by `agent`. Returns how many were removed.
    pub fn release(&mut self, agent: AgentId) -> usize {
        let before = self.remaining.len();
        self.remaining.retain(|(owner, _), _| *owner != agent);
        before.saturating_sub(self.remaining.len())
    }

    /// Number of tracked entries.
    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    /// Whether no entries are tracked.
    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn forage() -> AbilityId {
        AbilityId::from("forage")
    }

    #[test]
    fn entries_are_created_lazily_at_zero() {
        let mut registry = CooldownRegistry::new();
        let pet = AgentId::new();
        assert!(registry.is_empty());
        assert_eq!(registry.peek(pet, &forage()), 0.0);
        assert!(registry.is_empty());
        assert!(registry.is_ready(pet, &forage()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn tick_floors_at_zero() {
        let mut registry = CooldownRegistry::new();
        let pet = AgentId::new();
        registry.arm(pet, &forage(), 1.5);
        registry.tick(1.0);
        assert_eq!(registry.peek(pet, &forage()), 0.5);
        registry.tick(1.0);
        assert_eq!(registry.peek(pet, &forage()), 0.0);
    }

    #[test]
    fn sixty_second_cooldown_scenario() {
        let mut registry = CooldownRegistry::new();
        let pet = AgentId::new();
        registry.arm(pet, &forage(), 60.0);
        registry.tick(0.001);
        assert!((registry.peek(pet, &forage()) - 60.0).abs() < 0.01);
        assert!(!registry.is_ready(pet, &forage()));

        for _ in 0..59 {
            registry.tick(1.0);
            assert!(!registry.is_ready(pet, &forage()));
        }
        registry.tick(1.0);
        assert_eq!(registry.peek(pet, &forage()), 0.0);
        assert!(registry.is_ready(pet, &forage()));
    }

    #[test]
    fn invalid_deltas_are_ignored() {
        let mut registry = CooldownRegistry::new();
        let pet = AgentId::new();
        registry.arm(pet, &forage(), 5.0);
        registry.tick(-1.0);
        registry.tick(f32::NAN);
        registry.tick(0.0);
        assert_eq!(registry.peek(pet, &forage()), 5.0);
    }

    #[test]
    fn release_drops_only_the_owner() {
        let mut registry = CooldownRegistry::new();
        let a = AgentId::new();
        let b = AgentId::new();
        registry.arm(a, &forage(), 3.0);
        registry.arm(a, &AbilityId::from("pest_patrol"), 3.0);
        registry.arm(b, &forage(), 3.0);
        assert_eq!(registry.release(a), 2);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.peek(b, &forage()), 3.0);
    }
}
