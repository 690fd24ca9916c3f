//! Forageable world objects: berries, mushrooms, stones, shells.
//!
//! A [`ForageField`] is the in-memory gathering collaborator. Nodes are
//! scattered inside the world bounds, answer radius queries, and vanish
//! when gathered with a tool they accept. [`ForageField::replenish`] tops
//! the field back up to its target population.

use std::collections::BTreeMap;

use rand::Rng;
use serde::Deserialize;
use tracing::debug;

use homestead_agents::abilities::PET_TOOL;
use homestead_agents::{Collectible, Gatherer, WorldBounds};
use homestead_types::{CollectibleId, ItemStack, Vec3};

/// One kind of forageable node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForageKind {
    /// World-object category.
    pub category: &'static str,
    /// Item yielded.
    pub item: &'static str,
    /// Units yielded.
    pub count: u32,
    /// Tools that can gather it.
    pub tools: &'static [&'static str],
}

/// The stock forage kinds.
pub const FORAGE_KINDS: &[ForageKind] = &[
    ForageKind {
        category: "berry_bush",
        item: "berries",
        count: 2,
        tools: &[PET_TOOL, "hands"],
    },
    ForageKind {
        category: "mushroom",
        item: "mushroom",
        count: 1,
        tools: &[PET_TOOL, "hands"],
    },
    ForageKind {
        category: "shell",
        item: "shell",
        count: 1,
        tools: &[PET_TOOL, "hands"],
    },
    ForageKind {
        category: "stone",
        item: "stone",
        count: 3,
        tools: &["pickaxe"],
    },
];

/// Forage field sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ForageConfig {
    /// Target node population (default: 20).
    pub target_nodes: usize,
}

impl Default for ForageConfig {
    fn default() -> Self {
        Self { target_nodes: 20 }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ForageNode {
    kind: ForageKind,
    position: Vec3,
}

/// Every forageable node in the world.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForageField {
    nodes: BTreeMap<CollectibleId, ForageNode>,
    next_id: u32,
}

impl ForageField {
    /// An empty field.
    pub const fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Place a node. Returns its handle.
    pub fn place(&mut self, kind: ForageKind, position: Vec3) -> CollectibleId {
        let id = CollectibleId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.nodes.insert(id, ForageNode { kind, position });
        id
    }

    /// Number of nodes present.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the field is bare.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Scatter random nodes until `target` are present. Returns how many
    /// were added.
    pub fn replenish<R: Rng + ?Sized>(&mut self, rng: &mut R, bounds: &WorldBounds, target: usize) -> usize {
        let mut added = 0_usize;
        while self.nodes.len() < target {
            let Some(kind) = FORAGE_KINDS.get(rng.random_range(0..FORAGE_KINDS.len())).copied() else {
                break;
            };
            let position = homestead_agents::movement::random_destination(rng, bounds);
            self.place(kind, position);
            added = added.saturating_add(1);
        }
        if added > 0 {
            debug!(added, total = self.nodes.len(), "forage replenished");
        }
        added
    }
}

impl Gatherer for ForageField {
    fn collectibles_near(&self, center: Vec3, radius: f32) -> Vec<Collectible> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.position.flat_distance(center) <= radius)
            .map(|(id, node)| Collectible {
                id: *id,
                category: node.kind.category.to_owned(),
                position: node.position,
            })
            .collect()
    }

    fn gather(&mut self, target: &Collectible, tool: &str) -> Option<Vec<ItemStack>> {
        let node = self.nodes.get(&target.id)?;
        if !node.kind.tools.iter().any(|accepted| *accepted == tool) {
            return None;
        }
        let node = self.nodes.remove(&target.id)?;
        Some(vec![ItemStack::new(node.kind.item, node.kind.count)])
    }
}
