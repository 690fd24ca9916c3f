//! Fixed pet species catalog.

use homestead_types::{ItemId, Species};

/// Immutable catalog entry for one species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesProfile {
    /// Which species this describes.
    pub species: Species,
    /// Adoption fee in coins.
    pub price: u64,
    /// Starting movement speed in world units per second.
    pub base_speed: f32,
    /// Starting collection radius in world units.
    pub base_collection_radius: f32,
    /// Food that counts as a favorite when fed.
    pub favorite_food: &'static str,
    /// Toy that counts as a favorite when played with.
    pub favorite_toy: &'static str,
}

impl SpeciesProfile {
    /// Whether `item` is this species' favorite food.
    pub fn loves_food(&self, item: &ItemId) -> bool {
        item.as_str() == self.favorite_food
    }

    /// Whether `toy` is this species' favorite toy.
    pub fn loves_toy(&self, toy: &ItemId) -> bool {
        toy.as_str() == self.favorite_toy
    }
}

/// Look up the catalog entry for a species.
pub const fn profile(species: Species) -> SpeciesProfile {
    match species {
        Species::Cat => SpeciesProfile {
            species,
            price: 400,
            base_speed: 2.6,
            base_collection_radius: 2.0,
            favorite_food: "fish",
            favorite_toy: "yarn_ball",
        },
        Species::Dog => SpeciesProfile {
            species,
            price: 500,
            base_speed: 3.0,
            base_collection_radius: 2.5,
            favorite_food: "bone",
            favorite_toy: "stick",
        },
        Species::Rabbit => SpeciesProfile {
            species,
            price: 300,
            base_speed: 3.2,
            base_collection_radius: 1.5,
            favorite_food: "carrot",
            favorite_toy: "chew_toy",
        },
        Species::Fox => SpeciesProfile {
            species,
            price: 800,
            base_speed: 3.4,
            base_collection_radius: 2.0,
            favorite_food: "berries",
            favorite_toy: "feather",
        },
        Species::Owl => SpeciesProfile {
            species,
            price: 900,
            base_speed: 2.8,
            base_collection_radius: 3.5,
            favorite_food: "mouse_treat",
            favorite_toy: "shiny_pebble",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_species_has_a_positive_profile() {
        for species in Species::ALL {
            let entry = profile(species);
            assert_eq!(entry.species, species);
            assert!(entry.price > 0);
            assert!(entry.base_speed > 0.0);
            assert!(entry.base_collection_radius > 0.0);
        }
    }

    #[test]
    fn favorites_match_by_slug() {
        let dog = profile(Species::Dog);
        assert!(dog.loves_food(&ItemId::from("bone")));
        assert!(!dog.loves_food(&ItemId::from("fish")));
        assert!(dog.loves_toy(&ItemId::from("stick")));
    }
}
