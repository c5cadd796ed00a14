//! Animal catalog and static data.
//!
//! `StaticData` is the serialized form: definitions, the blocklist of
//! (animal, modifier) pairs that must never be generated, and the starter
//! decks. It is validated once into an `AnimalCatalog`, which is immutable
//! for the rest of the session and shared through an `Arc`.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::definition::{AnimalDefinition, AnimalId};
use super::instance::DeckAnimal;
use super::modifier::Modifier;
use crate::core::error::{Result, SimError};

const BUILTIN_DATA: &str = include_str!("../../data/animals.json");

fn one() -> u32 {
    1
}

/// `count` copies of an animal with a modifier, as listed in a deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    /// Catalog id.
    pub animal: AnimalId,
    /// Modifier every copy carries.
    #[serde(default)]
    pub modifier: Modifier,
    /// Number of copies.
    #[serde(default = "one")]
    pub count: u32,
}

impl DeckEntry {
    /// A single copy.
    #[must_use]
    pub fn new(animal: AnimalId, modifier: Modifier) -> Self {
        Self {
            animal,
            modifier,
            count: 1,
        }
    }

    /// Set the copy count (builder pattern).
    #[must_use]
    pub fn times(mut self, count: u32) -> Self {
        self.count = count;
        self
    }
}

/// A pair that random generation must reject.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockedPair {
    pub animal: AnimalId,
    pub modifier: Modifier,
}

/// A named deck the player can start a run with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarterDeck {
    pub name: String,
    pub animals: Vec<DeckEntry>,
}

/// Serialized static data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticData {
    /// Every animal kind, in roulette order.
    pub animals: Vec<AnimalDefinition>,
    /// Pairs random generation must never return.
    #[serde(default)]
    pub invalid_combinations: Vec<BlockedPair>,
    /// Starter deck options.
    #[serde(default)]
    pub starter_decks: Vec<StarterDeck>,
}

impl StaticData {
    /// Parse static data from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The data set bundled with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_DATA)
    }
}

/// Validated, read-only animal catalog.
///
/// ## Example
///
/// ```
/// use ferris_wheel::animals::{AnimalCatalog, AnimalDefinition, AnimalId, Modifier};
///
/// let mut catalog = AnimalCatalog::new();
/// catalog.register(AnimalDefinition::new(AnimalId::new(1), "Chicken", 2)).unwrap();
/// catalog.block(AnimalId::new(1), Modifier::Fire).unwrap();
///
/// assert!(catalog.is_blocked(AnimalId::new(1), Modifier::Fire));
/// assert_eq!(catalog.instantiate(AnimalId::new(1), Modifier::Rainbow).unwrap().points(), 4);
/// ```
#[derive(Clone, Debug, Default)]
pub struct AnimalCatalog {
    entries: Vec<Arc<AnimalDefinition>>,
    by_id: FxHashMap<AnimalId, usize>,
    blocked: FxHashSet<BlockedPair>,
    starter_decks: Vec<StarterDeck>,
}

impl AnimalCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate static data into a catalog.
    pub fn from_static_data(data: StaticData) -> Result<Self> {
        let mut catalog = Self::new();

        for definition in data.animals {
            catalog.register(definition)?;
        }
        for pair in data.invalid_combinations {
            catalog.block(pair.animal, pair.modifier)?;
        }
        for deck in data.starter_decks {
            catalog.add_starter_deck(deck)?;
        }

        if catalog.is_empty() {
            warn!("animal catalog is empty; random generation will fail");
        }

        Ok(catalog)
    }

    /// Catalog built from the bundled data set.
    pub fn builtin() -> Result<Self> {
        Self::from_static_data(StaticData::builtin()?)
    }

    /// Add a definition. Ids must be unique.
    pub fn register(&mut self, definition: AnimalDefinition) -> Result<()> {
        if self.by_id.contains_key(&definition.id) {
            return Err(SimError::DuplicateAnimal(definition.id));
        }
        self.by_id.insert(definition.id, self.entries.len());
        self.entries.push(Arc::new(definition));
        Ok(())
    }

    /// Forbid a pair from random generation.
    pub fn block(&mut self, animal: AnimalId, modifier: Modifier) -> Result<()> {
        self.require(animal)?;
        self.blocked.insert(BlockedPair { animal, modifier });
        Ok(())
    }

    /// Add a starter deck. Every entry must reference a known animal.
    pub fn add_starter_deck(&mut self, deck: StarterDeck) -> Result<()> {
        for entry in &deck.animals {
            self.require(entry.animal)?;
        }
        self.starter_decks.push(deck);
        Ok(())
    }

    fn require(&self, id: AnimalId) -> Result<()> {
        if self.by_id.contains_key(&id) {
            Ok(())
        } else {
            Err(SimError::UnknownAnimal(id))
        }
    }

    /// Look up a definition.
    #[must_use]
    pub fn get(&self, id: AnimalId) -> Option<&Arc<AnimalDefinition>> {
        self.by_id.get(&id).map(|&i| &self.entries[i])
    }

    /// Build a runtime instance of a catalog animal.
    pub fn instantiate(&self, id: AnimalId, modifier: Modifier) -> Result<DeckAnimal> {
        let definition = self.get(id).ok_or(SimError::UnknownAnimal(id))?;
        Ok(DeckAnimal::new(Arc::clone(definition), modifier))
    }

    /// Is this pair on the blocklist?
    #[must_use]
    pub fn is_blocked(&self, animal: AnimalId, modifier: Modifier) -> bool {
        self.blocked.contains(&BlockedPair { animal, modifier })
    }

    /// Definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<AnimalDefinition>> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All starter decks.
    #[must_use]
    pub fn starter_decks(&self) -> &[StarterDeck] {
        &self.starter_decks
    }

    /// Starter deck by index.
    pub fn starter_deck(&self, index: usize) -> Result<&StarterDeck> {
        self.starter_decks
            .get(index)
            .ok_or(SimError::UnknownStarterDeck {
                index,
                available: self.starter_decks.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_data() -> StaticData {
        StaticData {
            animals: vec![
                AnimalDefinition::new(AnimalId::new(1), "Chicken", 2),
                AnimalDefinition::new(AnimalId::new(2), "Pig", 3),
            ],
            invalid_combinations: vec![BlockedPair {
                animal: AnimalId::new(2),
                modifier: Modifier::Lightning,
            }],
            starter_decks: vec![StarterDeck {
                name: "Farm".to_string(),
                animals: vec![DeckEntry::new(AnimalId::new(1), Modifier::None).times(3)],
            }],
        }
    }

    #[test]
    fn test_from_static_data() {
        let catalog = AnimalCatalog::from_static_data(small_data()).unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.is_blocked(AnimalId::new(2), Modifier::Lightning));
        assert!(!catalog.is_blocked(AnimalId::new(2), Modifier::Fire));
        assert_eq!(catalog.starter_deck(0).unwrap().name, "Farm");
        assert!(matches!(
            catalog.starter_deck(3),
            Err(SimError::UnknownStarterDeck { index: 3, available: 1 })
        ));
    }

    #[test]
    fn test_duplicate_id() {
        let mut data = small_data();
        data.animals.push(AnimalDefinition::new(AnimalId::new(1), "Other", 1));

        assert!(matches!(
            AnimalCatalog::from_static_data(data),
            Err(SimError::DuplicateAnimal(id)) if id == AnimalId::new(1)
        ));
    }

    #[test]
    fn test_unknown_reference() {
        let mut data = small_data();
        data.starter_decks[0]
            .animals
            .push(DeckEntry::new(AnimalId::new(99), Modifier::None));

        assert!(matches!(
            AnimalCatalog::from_static_data(data),
            Err(SimError::UnknownAnimal(id)) if id == AnimalId::new(99)
        ));
    }

    #[test]
    fn test_iteration_keeps_order() {
        let catalog = AnimalCatalog::from_static_data(small_data()).unwrap();
        let names: Vec<_> = catalog.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Chicken", "Pig"]);
    }

    #[test]
    fn test_instantiate_shares_definition() {
        let catalog = AnimalCatalog::from_static_data(small_data()).unwrap();
        let a = catalog.instantiate(AnimalId::new(1), Modifier::None).unwrap();
        let b = catalog.instantiate(AnimalId::new(1), Modifier::None).unwrap();

        assert!(std::ptr::eq(a.definition(), b.definition()));
        assert!(catalog.instantiate(AnimalId::new(5), Modifier::None).is_err());
    }

    #[test]
    fn test_deck_entry_json_defaults() {
        let entry: DeckEntry = serde_json::from_str(r#"{ "animal": 4 }"#).unwrap();
        assert_eq!(entry, DeckEntry::new(AnimalId::new(4), Modifier::None));
    }

    #[test]
    fn test_builtin_data_loads() {
        let catalog = AnimalCatalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        assert!(!catalog.starter_decks().is_empty());
    }
}
