//! Per-instance modifiers.
//!
//! A modifier is applied exactly once, when a [`DeckAnimal`] is built. It
//! rewrites the instance's starting points and its private copy of the
//! effect list; the catalog definition is never touched.
//!
//! [`DeckAnimal`]: super::DeckAnimal

use serde::{Deserialize, Serialize};

use super::effect::{EffectSpec, EffectTarget, EffectTrigger, EffectType};

/// Tooltip label Lightning animals show in front of every effect.
pub const ROTATE_LABEL: &str = "ROTATE:";

/// A trait attached to a single animal instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    #[default]
    None,
    /// Double points.
    Rainbow,
    /// First effect flipped: opposite target, or reversed spin.
    Negative,
    /// No points, doubled effect values.
    Fire,
    /// No points, every effect fires on rotate.
    Lightning,
}

impl Modifier {
    /// Modifiers a random roll can produce, in roll order.
    pub const ROLLABLE: [Modifier; 4] = [
        Modifier::Rainbow,
        Modifier::Negative,
        Modifier::Fire,
        Modifier::Lightning,
    ];

    /// Player-facing name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Modifier::None => "None",
            Modifier::Rainbow => "Rainbow",
            Modifier::Negative => "Opposite",
            Modifier::Fire => "Fire",
            Modifier::Lightning => "Hologram",
        }
    }

    /// Rewrite starting points and effects. Returns the modified points.
    pub fn apply(self, base_points: i64, effects: &mut [EffectSpec]) -> i64 {
        match self {
            Modifier::None => base_points,
            Modifier::Rainbow => base_points.saturating_mul(2),
            Modifier::Fire => {
                for effect in effects.iter_mut() {
                    effect.value1 *= 2.0;
                }
                0
            }
            Modifier::Lightning => {
                for effect in effects.iter_mut() {
                    effect.trigger = EffectTrigger::OnRotate;
                    effect.tooltip_text = relabel_rotate(&effect.tooltip_text);
                }
                0
            }
            Modifier::Negative => {
                if let Some(first) = effects.first_mut() {
                    first.tooltip_text = first.tooltip_text_opposite.clone();
                    if first.effect_type == EffectType::SpinWheel {
                        first.value1 = -first.value1;
                    } else {
                        first.target = EffectTarget::Opposite;
                    }
                }
                base_points
            }
        }
    }
}

/// Replace a leading `LABEL:` with the rotate label, or prefix one.
fn relabel_rotate(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    match text.split_once(':') {
        Some((label, rest)) if is_label(label) => format!("{ROTATE_LABEL}{rest}"),
        _ => format!("{ROTATE_LABEL} {text}"),
    }
}

fn is_label(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_uppercase() || c == ' ' || c == '-')
}
