//! Proximity encounters between villagers.
//!
//! Once per frame the detector scans every unordered pair of villagers.
//! A pair within the encounter radius triggers a short scripted exchange
//! unless the same pair triggered one within the throttle window. The
//! exchange is logged at debug level and handed back to the caller; it is
//! not stored anywhere.

use std::collections::BTreeMap;

use rand::Rng;
use tracing::debug;

use homestead_types::{AgentId, Personality, Vec3};

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// Generic openings and replies. `{a}` is the opener, `{b}` the responder.
const GENERIC_EXCHANGES: &[(&str, &str)] = &[
    ("Morning, {b}! Busy day?", "Always, {a}. Always."),
    ("{b}, have you seen the new crops?", "They're coming along nicely, {a}."),
    ("Lovely weather for a walk, {b}.", "It is! Mind if I join you, {a}?"),
    ("Heard any news, {b}?", "Only what the birds tell me, {a}."),
];

/// Exchanges for specific personality pairings (opener, responder).
const PAIRED_EXCHANGES: &[(Personality, Personality, &str, &str)] = &[
    (
        Personality::Cheerful,
        Personality::Grumpy,
        "Smile, {b}! It's a beautiful day!",
        "Is it, {a}? I hadn't noticed.",
    ),
    (
        Personality::Energetic,
        Personality::Lazy,
        "Race you to the well, {b}!",
        "You go ahead, {a}. I'll cheer.",
    ),
    (
        Personality::Shy,
        Personality::Cheerful,
        "Um... hello, {b}.",
        "{a}! So good to see you!",
    ),
    (
        Personality::Grumpy,
        Personality::Grumpy,
        "Hmph. {b}.",
        "Hmph yourself, {a}.",
    ),
];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// What the detector needs to know about one villager.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Participant<'a> {
    /// Villager identity.
    pub id: AgentId,
    /// Display name used in the script.
    pub name: &'a str,
    /// Archetype, for specialized scripts.
    pub personality: Personality,
    /// Current position.
    pub position: Vec3,
}

/// A scripted exchange between two villagers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encounter {
    /// The villager who spoke first.
    pub opener: AgentId,
    /// The villager who replied.
    pub responder: AgentId,
    /// Opening line.
    pub opening: String,
    /// Reply line.
    pub reply: String,
}

/// Pairwise encounter scanner with a per-pair throttle.
#[derive(Debug, Clone, PartialEq)]
pub struct EncounterDetector {
    radius: f32,
    window_secs: f64,
    /// Last trigger time, keyed by the ordered `(low, high)` id pair.
    last_triggered: BTreeMap<(AgentId, AgentId), f64>,
}

impl EncounterDetector {
    /// Detector with the given proximity radius and throttle window.
    pub const fn new(radius: f32, window_secs: f64) -> Self {
        Self {
            radius,
            window_secs,
            last_triggered: BTreeMap::new(),
        }
    }

    /// Whether the pair may trigger at `now_secs`.
    ///
    /// Never-triggered pairs are always eligible; otherwise strictly more
    /// than the window must have passed.
    pub fn is_eligible(&self, a: AgentId, b: AgentId, now_secs: f64) -> bool {
        self.last_triggered
            .get(&pair_key(a, b))
            .is_none_or(|last| now_secs - last > self.window_secs)
    }

    /// Last trigger time for a pair, if any.
    pub fn last_triggered(&self, a: AgentId, b: AgentId) -> Option<f64> {
        self.last_triggered.get(&pair_key(a, b)).copied()
    }

    /// Scan all pairs once and return the exchanges triggered at `now_secs`.
    pub fn scan<R: Rng + ?Sized>(
        &mut self,
        participants: &[Participant<'_>],
        now_secs: f64,
        rng: &mut R,
    ) -> Vec<Encounter> {
        let mut encounters = Vec::new();
        for (i, first) in participants.iter().enumerate() {
            for second in participants.iter().skip(i.saturating_add(1)) {
                if first.id == second.id {
                    continue;
                }
                if first.position.flat_distance(second.position) > self.radius {
                    continue;
                }
                if !self.is_eligible(first.id, second.id, now_secs) {
                    continue;
                }

                let (opener, responder) = if rng.random_bool(0.5) {
                    (first, second)
                } else {
                    (second, first)
                };
                let encounter = script(opener, responder, rng);
                debug!(
                    opener = %opener.name,
                    responder = %responder.name,
                    opening = %encounter.opening,
                    reply = %encounter.reply,
                    "villager encounter"
                );
                self.last_triggered.insert(pair_key(first.id, second.id), now_secs);
                encounters.push(encounter);
            }
        }
        encounters
    }

    /// Forget every throttle entry involving `agent`.
    pub fn forget(&mut self, agent: AgentId) {
        self.last_triggered.retain(|(a, b), _| *a != agent && *b != agent);
    }
}

/// Order-independent key for a pair.
fn pair_key(a: AgentId, b: AgentId) -> (AgentId, AgentId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Build an exchange, preferring a personality-specific script.
fn script<R: Rng + ?Sized>(opener: &Participant<'_>, responder: &Participant<'_>, rng: &mut R) -> Encounter {
    let paired = PAIRED_EXCHANGES
        .iter()
        .find(|(a, b, _, _)| *a == opener.personality && *b == responder.personality)
        .map(|(_, _, opening, reply)| (*opening, *reply));

    let (opening, reply) = paired.unwrap_or_else(|| {
        let index = rng.random_range(0..GENERIC_EXCHANGES.len());
        GENERIC_EXCHANGES
            .get(index)
            .copied()
            .unwrap_or(("Hello, {b}.", "Hello, {a}."))
    });

    Encounter {
        opener: opener.id,
        responder: responder.id,
        opening: fill(opening, opener.name, responder.name),
        reply: fill(reply, opener.name, responder.name),
    }
}

fn fill(template: &str, a: &str, b: &str) -> String {
    template.replace("{a}", a).replace("{b}", b)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn at(name: &'static str, id: AgentId, x: f32) -> Participant<'static> {
        Participant {
            id,
            name,
            personality: Personality::Cheerful,
            position: Vec3::ground(x, 0.0),
        }
    }

    #[test]
    fn nearby_pair_triggers_once_within_window() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut detector = EncounterDetector::new(3.0, 600.0);
        let (a, b) = (AgentId::new(), AgentId::new());
        let pair = [at("Ada", a, 0.0), at("Bo", b, 2.0)];

        assert_eq!(detector.scan(&pair, 0.0, &mut rng).len(), 1);
        assert!(detector.scan(&pair, 300.0, &mut rng).is_empty());
        assert!(detector.scan(&pair, 600.0, &mut rng).is_empty());
        assert_eq!(detector.scan(&pair, 600.5, &mut rng).len(), 1);
        assert_eq!(detector.last_triggered(b, a), Some(600.5));
    }

    #[test]
    fn distant_pair_never_triggers() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut detector = EncounterDetector::new(3.0, 600.0);
        let pair = [at("Ada", AgentId::new(), 0.0), at("Bo", AgentId::new(), 3.5)];
        assert!(detector.scan(&pair, 0.0, &mut rng).is_empty());
    }

    #[test]
    fn each_pair_is_throttled_independently() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut detector = EncounterDetector::new(3.0, 600.0);
        let ids = [AgentId::new(), AgentId::new(), AgentId::new()];
        let trio = [at("Ada", ids[0], 0.0), at("Bo", ids[1], 1.0), at("Cy", ids[2], 2.0)];

        assert_eq!(detector.scan(&trio, 0.0, &mut rng).len(), 3);
        assert!(detector.scan(&trio, 10.0, &mut rng).is_empty());
        detector.forget(ids[2]);
        assert_eq!(detector.scan(&trio, 20.0, &mut rng).len(), 2);
    }

    #[test]
    fn scripts_name_both_villagers() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut detector = EncounterDetector::new(3.0, 600.0);
        let mut grumpy = at("Gus", AgentId::new(), 0.0);
        grumpy.personality = Personality::Grumpy;
        let mut other = at("Hal", AgentId::new(), 1.0);
        other.personality = Personality::Grumpy;

        let exchange = detector.scan(&[grumpy, other], 0.0, &mut rng);
        let encounter = exchange.first().cloned().unwrap();
        assert!(encounter.opening.starts_with("Hmph."));
        assert!(encounter.reply.contains("Gus") || encounter.reply.contains("Hal"));
        assert!(!encounter.opening.contains('{'));
    }
}
