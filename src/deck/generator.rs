//! Weighted random animal generation.
//!
//! A draw is two independent rolls: a roulette over the catalog entries of
//! the allowed rarities, then a modifier roll. Pairs on the catalog
//! blocklist are thrown away and both rolls are repeated, up to the
//! configured attempt cap.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::animals::{AnimalCatalog, AnimalDefinition, DeckAnimal, Modifier, Rarity};
use crate::core::error::{describe_pair, Result, SimError};
use crate::core::{DeckConfig, GameRng};

/// Random animal source backed by a shared catalog.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use ferris_wheel::animals::{AnimalCatalog, Rarity};
/// use ferris_wheel::core::{DeckConfig, GameRng};
/// use ferris_wheel::deck::DeckGenerator;
///
/// let catalog = Arc::new(AnimalCatalog::builtin().unwrap());
/// let generator = DeckGenerator::new(catalog, &DeckConfig::default());
/// let mut rng = GameRng::new(7);
///
/// let animal = generator
///     .generate_random_animal(&mut rng, 0.5, &Rarity::ALL)
///     .unwrap();
/// assert!(!generator.catalog().is_blocked(animal.id(), animal.modifier()));
/// ```
#[derive(Clone, Debug)]
pub struct DeckGenerator {
    catalog: Arc<AnimalCatalog>,
    weights: [f32; 3],
    max_attempts: u32,
}

impl DeckGenerator {
    /// Create a generator using the rarity weights and retry cap of `config`.
    #[must_use]
    pub fn new(catalog: Arc<AnimalCatalog>, config: &DeckConfig) -> Self {
        Self {
            catalog,
            weights: [
                config.weight(Rarity::Common),
                config.weight(Rarity::Uncommon),
                config.weight(Rarity::Rare),
            ],
            max_attempts: config.max_generation_attempts.max(1),
        }
    }

    /// The catalog draws come from.
    #[must_use]
    pub fn catalog(&self) -> &AnimalCatalog {
        &self.catalog
    }

    fn weight(&self, rarity: Rarity) -> f32 {
        match rarity {
            Rarity::Common => self.weights[0],
            Rarity::Uncommon => self.weights[1],
            Rarity::Rare => self.weights[2],
        }
    }

    /// Draw one animal.
    ///
    /// Fails with [`SimError::NoEligibleAnimals`] when no catalog entry has an
    /// allowed rarity with positive weight, and with
    /// [`SimError::GenerationExhausted`] when every attempt hit the blocklist.
    pub fn generate_random_animal(
        &self,
        rng: &mut GameRng,
        modifier_chance: f32,
        allowed: &[Rarity],
    ) -> Result<DeckAnimal> {
        let pool: Vec<&Arc<AnimalDefinition>> = self
            .catalog
            .iter()
            .filter(|d| allowed.contains(&d.rarity))
            .collect();
        let weights: Vec<f32> = pool.iter().map(|d| self.weight(d.rarity)).collect();

        for attempt in 1..=self.max_attempts {
            let Some(index) = rng.choose_weighted(&weights) else {
                warn!(
                    candidates = pool.len(),
                    ?allowed,
                    "no animal with positive weight for the allowed rarities"
                );
                return Err(SimError::NoEligibleAnimals);
            };
            let definition = pool[index];
            let modifier = roll_modifier(rng, modifier_chance);

            if self.catalog.is_blocked(definition.id, modifier) {
                debug!(
                    attempt,
                    pair = %describe_pair(definition.id, modifier),
                    "rejected blocklisted draw"
                );
                continue;
            }

            return Ok(DeckAnimal::new(Arc::clone(definition), modifier));
        }

        error!(
            attempts = self.max_attempts,
            "could not generate a valid animal; skipping this draw"
        );
        Err(SimError::GenerationExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Draw up to `count` animals of any rarity. Failed draws are skipped.
    pub fn get_random_animals(
        &self,
        rng: &mut GameRng,
        count: usize,
        modifier_chance: f32,
    ) -> Vec<DeckAnimal> {
        (0..count)
            .filter_map(|_| {
                self.generate_random_animal(rng, modifier_chance, &Rarity::ALL)
                    .ok()
            })
            .collect()
    }
}

/// `None` unless the roll succeeds, then one of the four rollable modifiers.
fn roll_modifier(rng: &mut GameRng, chance: f32) -> Modifier {
    if rng.roll(chance) {
        Modifier::ROLLABLE[rng.gen_index(Modifier::ROLLABLE.len())]
    } else {
        Modifier::None
    }
}
