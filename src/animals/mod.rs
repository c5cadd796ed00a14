//! Animal system: definitions, effects, modifiers, instances and catalog.
//!
//! ## Key Types
//!
//! - `AnimalId`: Identifier for animal definitions
//! - `AnimalDefinition`: Static animal data (points, rarity, effects)
//! - `EffectSpec`: One (type, trigger, target) effect with parameters
//! - `Modifier`: Per-instance trait rewriting points and effects
//! - `DeckAnimal`: Runtime animal state on the wheel or in a queue
//! - `AnimalCatalog`: Validated static data lookup

pub mod catalog;
pub mod definition;
pub mod effect;
pub mod instance;
pub mod modifier;

pub use catalog::{AnimalCatalog, BlockedPair, DeckEntry, StarterDeck, StaticData};
pub use definition::{AnimalDefinition, AnimalId, Rarity};
pub use effect::{EffectSpec, EffectTarget, EffectTrigger, EffectType, VALUE_PLACEHOLDER};
pub use instance::DeckAnimal;
pub use modifier::{Modifier, ROTATE_LABEL};
