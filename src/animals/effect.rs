//! Effect definitions.
//!
//! An effect is a (type, trigger, target) triple plus numeric parameters.
//! Definitions own their effect lists; every [`DeckAnimal`] holds its own
//! copy so modifiers can rewrite effects per instance.
//!
//! [`DeckAnimal`]: super::DeckAnimal

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the effect's value in tooltip templates.
pub const VALUE_PLACEHOLDER: &str = "#VAL#";

/// What an effect does to its targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectType {
    /// `target.points += value1`
    AddPoints,
    /// `target.points *= value1`, truncated toward zero.
    MultiplyPoints,
    /// The source animal takes the target's current points.
    CopyPoints,
    /// Rotate the wheel `|value1|` steps; the sign picks the direction.
    SpinWheel,
}

/// The wheel event that fires an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTrigger {
    /// The animal was loaded into the bottom cart.
    OnLoad,
    /// The animal is about to leave the wheel at the bottom.
    OnUnload,
    /// Every single step of a rotation.
    OnRotate,
    /// Every occupied cart once a rotation finishes.
    OnStop,
    /// The top cart once a rotation finishes.
    OnStopTop,
    /// The bottom cart once a rotation finishes.
    OnStopBottom,
    /// The cart arrived at the top during a step.
    OnPassTop,
    /// The cart arrived at the bottom during a step.
    OnPassBottom,
    /// The day ended with the animal still riding.
    OnDayEnd,
}

impl EffectTrigger {
    /// Every trigger, in declaration order.
    pub const ALL: [EffectTrigger; 9] = [
        EffectTrigger::OnLoad,
        EffectTrigger::OnUnload,
        EffectTrigger::OnRotate,
        EffectTrigger::OnStop,
        EffectTrigger::OnStopTop,
        EffectTrigger::OnStopBottom,
        EffectTrigger::OnPassTop,
        EffectTrigger::OnPassBottom,
        EffectTrigger::OnDayEnd,
    ];
}

/// Which animals an effect acts on, relative to the source cart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTarget {
    /// The source animal.
    #[serde(rename = "Self")]
    Self_,
    /// Both neighbouring carts.
    Adjacent,
    /// The cart half a revolution away.
    Opposite,
    /// Every cart, in ring order.
    All,
    /// One occupied cart chosen uniformly.
    Random,
}

/// A single effect on an animal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectSpec {
    /// What the effect does.
    #[serde(rename = "type")]
    pub effect_type: EffectType,

    /// When it fires.
    pub trigger: EffectTrigger,

    /// Who it affects.
    pub target: EffectTarget,

    /// Primary parameter (amount, factor, spin steps).
    pub value1: f32,

    /// Reserved parameter.
    #[serde(default)]
    pub value2: f32,

    /// Reserved parameter.
    #[serde(default)]
    pub value3: f32,

    /// Display template; `#VAL#` is substituted.
    #[serde(default)]
    pub tooltip_text: String,

    /// Display template used once the Negative modifier flips this effect.
    #[serde(default)]
    pub tooltip_text_opposite: String,
}

impl EffectSpec {
    /// Create an effect with no tooltip text.
    #[must_use]
    pub fn new(
        effect_type: EffectType,
        trigger: EffectTrigger,
        target: EffectTarget,
        value1: f32,
    ) -> Self {
        Self {
            effect_type,
            trigger,
            target,
            value1,
            value2: 0.0,
            value3: 0.0,
            tooltip_text: String::new(),
            tooltip_text_opposite: String::new(),
        }
    }

    /// Add-points effect.
    #[must_use]
    pub fn add_points(trigger: EffectTrigger, target: EffectTarget, amount: f32) -> Self {
        Self::new(EffectType::AddPoints, trigger, target, amount)
    }

    /// Multiply-points effect.
    #[must_use]
    pub fn multiply_points(trigger: EffectTrigger, target: EffectTarget, factor: f32) -> Self {
        Self::new(EffectType::MultiplyPoints, trigger, target, factor)
    }

    /// Copy-points effect.
    #[must_use]
    pub fn copy_points(trigger: EffectTrigger, target: EffectTarget) -> Self {
        Self::new(EffectType::CopyPoints, trigger, target, 0.0)
    }

    /// Spin effect; negative `steps` spin clockwise.
    #[must_use]
    pub fn spin_wheel(trigger: EffectTrigger, steps: f32) -> Self {
        Self::new(EffectType::SpinWheel, trigger, EffectTarget::Self_, steps)
    }

    /// Set both tooltip templates (builder pattern).
    #[must_use]
    pub fn with_tooltip(mut self, text: impl Into<String>, opposite: impl Into<String>) -> Self {
        self.tooltip_text = text.into();
        self.tooltip_text_opposite = opposite.into();
        self
    }

    /// `value1` truncated toward zero.
    #[must_use]
    pub fn amount(&self) -> i64 {
        self.value1 as i64
    }

    /// Tooltip text with the placeholder filled in. Empty templates stay empty.
    #[must_use]
    pub fn formatted_tooltip(&self) -> String {
        if self.tooltip_text.is_empty() {
            return String::new();
        }

        let value = match self.effect_type {
            EffectType::AddPoints => {
                let sign = if self.value1 > 0.0 { "+" } else { "" };
                format!("{sign}{}", self.value1)
            }
            EffectType::MultiplyPoints => format!("x{}", self.value1),
            EffectType::SpinWheel => format!("{}", self.value1.abs()),
            EffectType::CopyPoints => format!("{}", self.value1),
        };

        self.tooltip_text.replace(VALUE_PLACEHOLDER, &value)
    }
}
