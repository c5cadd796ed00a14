//! Animal definitions - static animal data.
//!
//! `AnimalDefinition` holds the immutable template of an animal kind: its
//! name, base points, rarity and effect list. Runtime state (current points,
//! modifier, rewritten effects) lives in `DeckAnimal`.

use serde::{Deserialize, Serialize};

use super::effect::EffectSpec;

/// Unique identifier for an animal definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnimalId(pub u32);

impl AnimalId {
    /// Create a new animal ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for AnimalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Animal({})", self.0)
    }
}

/// How often an animal turns up in random draws.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
}

impl Rarity {
    /// Every rarity.
    pub const ALL: [Rarity; 3] = [Rarity::Common, Rarity::Uncommon, Rarity::Rare];
}

/// Static animal definition.
///
/// ## Example
///
/// ```
/// use ferris_wheel::animals::{AnimalDefinition, AnimalId, EffectSpec, EffectTarget, EffectTrigger, Rarity};
///
/// let chicken = AnimalDefinition::new(AnimalId::new(1), "Chicken", 2)
///     .with_rarity(Rarity::Common)
///     .with_effect(EffectSpec::add_points(EffectTrigger::OnPassTop, EffectTarget::Self_, 1.0));
///
/// assert_eq!(chicken.base_points, 2);
/// assert_eq!(chicken.effects.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimalDefinition {
    /// Unique identifier.
    pub id: AnimalId,

    /// Display name.
    pub name: String,

    /// Points before modifiers.
    pub base_points: i64,

    /// Draw rarity.
    #[serde(default)]
    pub rarity: Rarity,

    /// Ordered effect list.
    #[serde(default)]
    pub effects: Vec<EffectSpec>,
}

impl AnimalDefinition {
    /// Create a common definition with no effects.
    #[must_use]
    pub fn new(id: AnimalId, name: impl Into<String>, base_points: i64) -> Self {
        Self {
            id,
            name: name.into(),
            base_points,
            rarity: Rarity::Common,
            effects: Vec::new(),
        }
    }

    /// Set the rarity (builder pattern).
    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Append an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: EffectSpec) -> Self {
        self.effects.push(effect);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animals::{EffectTarget, EffectTrigger};

    #[test]
    fn test_animal_id() {
        let id = AnimalId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Animal(42)");
    }

    #[test]
    fn test_definition_builder() {
        let cow = AnimalDefinition::new(AnimalId::new(3), "Cow", 4)
            .with_rarity(Rarity::Uncommon)
            .with_effect(EffectSpec::add_points(
                EffectTrigger::OnStop,
                EffectTarget::Adjacent,
                1.0,
            ))
            .with_effect(EffectSpec::spin_wheel(EffectTrigger::OnLoad, 1.0));

        assert_eq!(cow.name, "Cow");
        assert_eq!(cow.rarity, Rarity::Uncommon);
        assert_eq!(cow.effects.len(), 2);
        assert_eq!(cow.effects[1].target, EffectTarget::Self_);
    }

    #[test]
    fn test_definition_json_defaults() {
        let json = r#"{ "id": 7, "name": "Duck", "base_points": 1 }"#;
        let duck: AnimalDefinition = serde_json::from_str(json).unwrap();

        assert_eq!(duck.id, AnimalId::new(7));
        assert_eq!(duck.rarity, Rarity::Common);
        assert!(duck.effects.is_empty());
    }
}
