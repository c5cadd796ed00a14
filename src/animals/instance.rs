//! Animal instances - runtime animal state.
//!
//! `DeckAnimal` is one animal drawn into a round: a shared reference to its
//! definition, the modifier it rolled, and its own mutable state (current
//! points and a private, modifier-rewritten copy of the effects).

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::definition::{AnimalDefinition, AnimalId};
use super::effect::{EffectSpec, EffectTrigger};
use super::modifier::Modifier;

/// An animal instance in a round.
///
/// Created when drawn from the deck or the generator; retired when it is
/// unloaded, skipped or cleared at a round transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeckAnimal {
    definition: Arc<AnimalDefinition>,
    modifier: Modifier,
    modified_points: i64,
    points: i64,
    effects: Vec<EffectSpec>,
}

impl DeckAnimal {
    /// Build an instance, applying `modifier` to a copy of the effects.
    #[must_use]
    pub fn new(definition: Arc<AnimalDefinition>, modifier: Modifier) -> Self {
        let mut effects = definition.effects.clone();
        let modified_points = modifier.apply(definition.base_points, &mut effects);

        Self {
            definition,
            modifier,
            modified_points,
            points: modified_points,
            effects,
        }
    }

    /// Shared catalog definition.
    #[must_use]
    pub fn definition(&self) -> &AnimalDefinition {
        &self.definition
    }

    /// Definition id.
    #[must_use]
    pub fn id(&self) -> AnimalId {
        self.definition.id
    }

    /// Definition name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    #[must_use]
    pub fn modifier(&self) -> Modifier {
        self.modifier
    }

    /// Starting points after the modifier.
    #[must_use]
    pub fn modified_points(&self) -> i64 {
        self.modified_points
    }

    /// Current points.
    #[must_use]
    pub fn points(&self) -> i64 {
        self.points
    }

    /// This instance's effect list.
    #[must_use]
    pub fn effects(&self) -> &[EffectSpec] {
        &self.effects
    }

    /// Effects that fire on `trigger`, in list order.
    pub fn effects_for(&self, trigger: EffectTrigger) -> impl Iterator<Item = &EffectSpec> {
        self.effects.iter().filter(move |e| e.trigger == trigger)
    }

    /// Set current points. With `clamp_at_zero`, negatives become zero.
    pub fn set_points(&mut self, points: i64, clamp_at_zero: bool) {
        self.points = if clamp_at_zero { points.max(0) } else { points };
    }

    /// Restore the modified starting points.
    pub fn reset_points(&mut self) {
        self.points = self.modified_points;
    }

    /// Display name including the modifier, e.g. "Fire Cow".
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.modifier {
            Modifier::None => self.definition.name.clone(),
            m => format!("{} {}", m.display_name(), self.definition.name),
        }
    }

    /// Plain-text tooltip: name, points, then one line per described effect.
    #[must_use]
    pub fn tooltip_text(&self) -> String {
        let effects: Vec<String> = self
            .effects
            .iter()
            .map(EffectSpec::formatted_tooltip)
            .filter(|line| !line.is_empty())
            .collect();

        format!(
            "{}\n{} points\n\n{}",
            self.display_name().to_uppercase(),
            self.modified_points,
            effects.join("\n")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animals::{EffectTarget, EffectType};

    fn cow() -> Arc<AnimalDefinition> {
        Arc::new(
            AnimalDefinition::new(AnimalId::new(1), "Cow", 4)
                .with_effect(
                    EffectSpec::add_points(EffectTrigger::OnStop, EffectTarget::Adjacent, 2.0)
                        .with_tooltip("STOP: #VAL# to neighbours", "STOP: #VAL# to opposite"),
                )
                .with_effect(
                    EffectSpec::multiply_points(EffectTrigger::OnUnload, EffectTarget::Self_, 3.0)
                        .with_tooltip("UNLOAD: #VAL# self", ""),
                ),
        )
    }

    #[test]
    fn test_plain_instance() {
        let animal = DeckAnimal::new(cow(), Modifier::None);
        assert_eq!(animal.points(), 4);
        assert_eq!(animal.modified_points(), 4);
        assert_eq!(animal.effects(), &cow().effects[..]);
        assert_eq!(animal.id(), AnimalId::new(1));
    }

    #[test]
    fn test_modifier_does_not_touch_definition() {
        let def = cow();
        let animal = DeckAnimal::new(Arc::clone(&def), Modifier::Fire);

        assert_eq!(animal.points(), 0);
        assert_eq!(animal.effects()[0].value1, 4.0);
        assert_eq!(def.effects[0].value1, 2.0);
    }

    #[test]
    fn test_set_points_clamp() {
        let mut animal = DeckAnimal::new(cow(), Modifier::None);

        animal.set_points(-3, true);
        assert_eq!(animal.points(), 0);

        animal.set_points(-3, false);
        assert_eq!(animal.points(), -3);

        animal.reset_points();
        assert_eq!(animal.points(), 4);
    }

    #[test]
    fn test_effects_for_trigger() {
        let animal = DeckAnimal::new(cow(), Modifier::Lightning);
        assert_eq!(animal.effects_for(EffectTrigger::OnRotate).count(), 2);
        assert_eq!(animal.effects_for(EffectTrigger::OnStop).count(), 0);

        let plain = DeckAnimal::new(cow(), Modifier::None);
        let unload: Vec<_> = plain.effects_for(EffectTrigger::OnUnload).collect();
        assert_eq!(unload.len(), 1);
        assert_eq!(unload[0].effect_type, EffectType::MultiplyPoints);
    }

    #[test]
    fn test_tooltip_text() {
        let animal = DeckAnimal::new(cow(), Modifier::Rainbow);
        assert_eq!(
            animal.tooltip_text(),
            "RAINBOW COW\n8 points\n\nSTOP: +2 to neighbours\nUNLOAD: x3 self"
        );

        let negative = DeckAnimal::new(cow(), Modifier::Negative);
        assert_eq!(negative.display_name(), "Opposite Cow");
        assert!(negative.tooltip_text().contains("STOP: +2 to opposite"));
    }
}
