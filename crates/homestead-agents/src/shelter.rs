//! The pet shelter: adoption, release, and the owned pet roster.
//!
//! The roster is bounded by the shelter's capacity. Adoption charges the
//! species price through the [`Wallet`] collaborator; release destroys the
//! pet and drops its cooldown entries.

use serde::Deserialize;
use tracing::info;

use homestead_types::{AgentId, Species, Vec3};

use crate::abilities::AbilityCatalog;
use crate::collab::Wallet;
use crate::cooldown::CooldownRegistry;
use crate::error::AgentError;
use crate::pet::Pet;
use crate::species::profile;

/// Shelter placement and size.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShelterConfig {
    /// Where pets rest.
    pub position: Vec3,
    /// Maximum number of pets (default: 3).
    pub capacity: usize,
}

impl Default for ShelterConfig {
    fn default() -> Self {
        Self {
            position: Vec3::ground(-10.0, -10.0),
            capacity: 3,
        }
    }
}

/// The player's pet shelter and everything living in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Shelter {
    position: Vec3,
    capacity: usize,
    pets: Vec<Pet>,
}

impl Shelter {
    /// An empty shelter.
    pub const fn new(config: ShelterConfig) -> Self {
        Self {
            position: config.position,
            capacity: config.capacity,
            pets: Vec::new(),
        }
    }

    /// Where pets rest.
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Maximum number of pets.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of pets housed.
    pub fn len(&self) -> usize {
        self.pets.len()
    }

    /// Whether the shelter is empty.
    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }

    /// Whether another pet would fit.
    pub fn has_room(&self) -> bool {
        self.pets.len() < self.capacity
    }

    /// Adopt a pet by species key.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::UnknownSpecies`] for a key outside the catalog,
    /// plus every error of [`Shelter::adopt`].
    pub fn adopt_slug(
        &mut self,
        species: &str,
        name: impl Into<String>,
        wallet: &mut dyn Wallet,
        now_secs: f64,
        catalog: &AbilityCatalog,
    ) -> Result<AgentId, AgentError> {
        let species =
            Species::from_slug(species).ok_or_else(|| AgentError::UnknownSpecies(species.to_owned()))?;
        self.adopt(species, name, wallet, now_secs, catalog)
    }

    /// Adopt a pet, paying the species price from `wallet`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::ShelterFull`] at capacity or
    /// [`AgentError::InsufficientFunds`] if the wallet is short. Nothing is
    /// charged on failure.
    pub fn adopt(
        &mut self,
        species: Species,
        name: impl Into<String>,
        wallet: &mut dyn Wallet,
        now_secs: f64,
        catalog: &AbilityCatalog,
    ) -> Result<AgentId, AgentError> {
        if !self.has_room() {
            return Err(AgentError::ShelterFull {
                capacity: self.capacity,
            });
        }
        let price = profile(species).price;
        if !wallet.spend_coins(price) {
            return Err(AgentError::InsufficientFunds {
                price,
                available: wallet.coins(),
            });
        }

        let pet = Pet::adopt(name, species, self.position, now_secs, catalog);
        let id = pet.id();
        info!(pet = %id, name = pet.name(), ?species, price, "pet adopted");
        self.pets.push(pet);
        Ok(id)
    }

    /// Release a pet for good, dropping its cooldowns.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::PetNotFound`] if no such pet lives here.
    pub fn release(&mut self, id: AgentId, cooldowns: &mut CooldownRegistry) -> Result<Pet, AgentError> {
        let index = self
            .pets
            .iter()
            .position(|pet| pet.id() == id)
            .ok_or(AgentError::PetNotFound(id))?;
        let pet = self.pets.remove(index);
        let dropped = cooldowns.release(id);
        info!(pet = %id, name = pet.name(), cooldowns = dropped, "pet released");
        Ok(pet)
    }

    /// Look up a pet.
    pub fn get(&self, id: AgentId) -> Option<&Pet> {
        self.pets.iter().find(|pet| pet.id() == id)
    }

    /// Look up a pet mutably.
    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Pet> {
        self.pets.iter_mut().find(|pet| pet.id() == id)
    }

    /// Iterate the roster.
    pub fn iter(&self) -> impl Iterator<Item = &Pet> {
        self.pets.iter()
    }

    /// Iterate the roster mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Pet> {
        self.pets.iter_mut()
    }

    /// Replace the roster with restored pets, keeping at most `capacity`.
    ///
    /// Returns how many snapshots were dropped for lack of room.
    pub fn restore(&mut self, pets: impl IntoIterator<Item = Pet>) -> usize {
        self.pets.clear();
        let mut dropped = 0_usize;
        for pet in pets {
            if self.has_room() {
                self.pets.push(pet);
            } else {
                dropped = dropped.saturating_add(1);
            }
        }
        dropped
    }
}
