//! Simulation configuration.
//!
//! Sessions are configured at startup by providing:
//! - `WheelConfig`: Cart count and how nested spins are handled
//! - `RoundConfig`: Score targets, energy and skip budgets per round
//! - `DeckConfig`: Rarity weights, retry cap, waiting line size
//! - `ScoringConfig`: Point floor and score delta policy
//! - `SimConfig`: Combines all configuration plus the RNG seed
//!
//! Invalid values are clamped by [`SimConfig::validated`] rather than
//! rejected, so a session always starts in a playable state.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::animals::Rarity;
use crate::core::error::Result;

/// Smallest wheel the ring arithmetic supports.
pub const MIN_CART_COUNT: usize = 4;

/// What happens to a SpinWheel effect that fires while the wheel is already
/// rotating.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpinPolicy {
    /// Discard the request.
    #[default]
    Drop,
    /// Run it after the current rotation (and its day-end pass) completes.
    Queue,
}

/// Where a skipped animal goes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipPolicy {
    /// The animal leaves the round.
    #[default]
    Discard,
    /// The animal returns to the back of the round queue.
    ReturnToBack,
}

/// How `RoundState::add_score` treats its delta.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreDeltaPolicy {
    /// Any delta applies; the score may go negative.
    #[default]
    Signed,
    /// Deltas `<= 0` are ignored. This also disables the day-end deduction.
    PositiveOnly,
}

/// Wheel geometry and re-entrancy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Number of carts. Must be even and at least four.
    pub cart_count: usize,
    /// Handling of spins requested mid-rotation.
    pub spin_policy: SpinPolicy,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            cart_count: 8,
            spin_policy: SpinPolicy::Drop,
        }
    }
}

/// Per-round budgets. Every budget is a non-decreasing function of the
/// round number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    /// Score needed to clear round one.
    pub initial_required_score: i64,
    /// Added to the requirement each round.
    pub required_score_increase: i64,
    /// Energy on round one.
    pub energy_per_day: u32,
    /// Added to the energy budget each round.
    pub energy_increase_per_round: u32,
    /// Skips on round one.
    pub skips_per_round: u32,
    /// Added to the skip budget each round.
    pub skip_increase_per_round: u32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            initial_required_score: 50,
            required_score_increase: 10,
            energy_per_day: 16,
            energy_increase_per_round: 2,
            skips_per_round: 2,
            skip_increase_per_round: 0,
        }
    }
}

impl RoundConfig {
    /// Score required to clear `round` (1-based).
    #[must_use]
    pub fn required_score(&self, round: u32) -> i64 {
        self.initial_required_score + i64::from(round.saturating_sub(1)) * self.required_score_increase
    }

    /// Energy available in `round`.
    #[must_use]
    pub fn energy(&self, round: u32) -> u32 {
        self.energy_per_day
            .saturating_add(round.saturating_sub(1).saturating_mul(self.energy_increase_per_round))
    }

    /// Skips available in `round`.
    #[must_use]
    pub fn skips(&self, round: u32) -> u32 {
        self.skips_per_round
            .saturating_add(round.saturating_sub(1).saturating_mul(self.skip_increase_per_round))
    }
}

/// Deck generation and queue behavior.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Roulette weight of common animals.
    pub common_weight: f32,
    /// Roulette weight of uncommon animals.
    pub uncommon_weight: f32,
    /// Roulette weight of rare animals.
    pub rare_weight: f32,
    /// Retry cap when a draw hits the blocklist.
    pub max_generation_attempts: u32,
    /// Number of visible animals waiting to be loaded.
    pub queue_size: usize,
    /// Draw random animals once the round queue runs dry.
    pub generate_when_empty: bool,
    /// Modifier chance for those fallback draws.
    pub fallback_modifier_chance: f32,
    /// What skipping does with the animal.
    pub skip_policy: SkipPolicy,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            common_weight: 4.0,
            uncommon_weight: 2.0,
            rare_weight: 1.0,
            max_generation_attempts: 100,
            queue_size: 3,
            generate_when_empty: true,
            fallback_modifier_chance: 0.0,
            skip_policy: SkipPolicy::Discard,
        }
    }
}

impl DeckConfig {
    /// Roulette weight for a rarity.
    #[must_use]
    pub fn weight(&self, rarity: Rarity) -> f32 {
        match rarity {
            Rarity::Common => self.common_weight,
            Rarity::Uncommon => self.uncommon_weight,
            Rarity::Rare => self.rare_weight,
        }
    }
}

/// Point and score arithmetic policies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Animal points never drop below zero.
    pub clamp_points_at_zero: bool,
    /// Treatment of score deltas.
    pub score_delta_policy: ScoreDeltaPolicy,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            clamp_points_at_zero: true,
            score_delta_policy: ScoreDeltaPolicy::Signed,
        }
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Wheel geometry.
    pub wheel: WheelConfig,
    /// Round budgets.
    pub round: RoundConfig,
    /// Deck generation.
    pub deck: DeckConfig,
    /// Scoring policies.
    pub scoring: ScoringConfig,
    /// Session RNG seed.
    pub seed: u64,
}

impl SimConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the cart count.
    #[must_use]
    pub fn with_cart_count(mut self, cart_count: usize) -> Self {
        self.wheel.cart_count = cart_count;
        self
    }

    /// Set the spin policy.
    #[must_use]
    pub fn with_spin_policy(mut self, policy: SpinPolicy) -> Self {
        self.wheel.spin_policy = policy;
        self
    }

    /// Replace the round budgets.
    #[must_use]
    pub fn with_round(mut self, round: RoundConfig) -> Self {
        self.round = round;
        self
    }

    /// Replace the deck settings.
    #[must_use]
    pub fn with_deck(mut self, deck: DeckConfig) -> Self {
        self.deck = deck;
        self
    }

    /// Replace the scoring policies.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    /// Clamp every field into its valid range, logging each correction.
    #[must_use]
    pub fn validated(mut self) -> Self {
        let carts = self.wheel.cart_count;
        if carts < MIN_CART_COUNT || carts % 2 != 0 {
            let fixed = valid_cart_count(carts);
            warn!(requested = carts, using = fixed, "cart count must be even and >= 4");
            self.wheel.cart_count = fixed;
        }

        let deck = &mut self.deck;
        for (name, weight) in [
            ("common_weight", &mut deck.common_weight),
            ("uncommon_weight", &mut deck.uncommon_weight),
            ("rare_weight", &mut deck.rare_weight),
        ] {
            if !(*weight >= 0.0) {
                warn!(field = name, value = *weight, "rarity weight clamped to 0");
                *weight = 0.0;
            }
        }
        if deck.common_weight + deck.uncommon_weight + deck.rare_weight <= 0.0 {
            warn!("all rarity weights are zero; random generation will fail");
        }

        if !(0.0..=1.0).contains(&deck.fallback_modifier_chance) {
            let clamped = if deck.fallback_modifier_chance > 1.0 { 1.0 } else { 0.0 };
            warn!(
                value = deck.fallback_modifier_chance,
                using = clamped,
                "fallback modifier chance out of range"
            );
            deck.fallback_modifier_chance = clamped;
        }

        if deck.max_generation_attempts == 0 {
            warn!("max_generation_attempts must be positive; using 1");
            deck.max_generation_attempts = 1;
        }

        if deck.queue_size == 0 {
            warn!("queue_size must be positive; using 1");
            deck.queue_size = 1;
        }

        self
    }
}

/// Nearest valid cart count: even and at least [`MIN_CART_COUNT`].
#[must_use]
pub fn valid_cart_count(requested: usize) -> usize {
    (requested + requested % 2).max(MIN_CART_COUNT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimConfig::default();
        assert_eq!(config.wheel.cart_count, 8);
        assert_eq!(config.wheel.spin_policy, SpinPolicy::Drop);
        assert_eq!(config.round.energy_per_day, 16);
        assert_eq!(config.round.skips_per_round, 2);
        assert_eq!(config.deck.max_generation_attempts, 100);
        assert!(config.scoring.clamp_points_at_zero);
    }

    #[test]
    fn test_round_budgets_grow() {
        let round = RoundConfig::default();
        assert_eq!(round.required_score(1), 50);
        assert_eq!(round.required_score(3), 70);
        assert_eq!(round.energy(1), 16);
        assert_eq!(round.energy(4), 22);
        assert_eq!(round.skips(5), 2);

        for r in 1..20 {
            assert!(round.required_score(r + 1) >= round.required_score(r));
            assert!(round.energy(r + 1) >= round.energy(r));
            assert!(round.skips(r + 1) >= round.skips(r));
        }
    }

    #[test]
    fn test_valid_cart_count() {
        assert_eq!(valid_cart_count(0), 4);
        assert_eq!(valid_cart_count(3), 4);
        assert_eq!(valid_cart_count(4), 4);
        assert_eq!(valid_cart_count(7), 8);
        assert_eq!(valid_cart_count(10), 10);
    }

    #[test]
    fn test_validated_clamps() {
        let mut config = SimConfig::default().with_cart_count(5);
        config.deck.rare_weight = -2.0;
        config.deck.fallback_modifier_chance = 3.0;
        config.deck.max_generation_attempts = 0;
        config.deck.queue_size = 0;

        let config = config.validated();

        assert_eq!(config.wheel.cart_count, 6);
        assert_eq!(config.deck.rare_weight, 0.0);
        assert_eq!(config.deck.fallback_modifier_chance, 1.0);
        assert_eq!(config.deck.max_generation_attempts, 1);
        assert_eq!(config.deck.queue_size, 1);
    }

    #[test]
    fn test_validated_keeps_valid_config() {
        let config = SimConfig::default().with_seed(9);
        assert_eq!(config.clone().validated(), config);
    }

    #[test]
    fn test_weight_lookup() {
        let deck = DeckConfig::default();
        assert_eq!(deck.weight(Rarity::Common), 4.0);
        assert_eq!(deck.weight(Rarity::Uncommon), 2.0);
        assert_eq!(deck.weight(Rarity::Rare), 1.0);
    }

    #[test]
    fn test_from_json_partial() {
        let config = SimConfig::from_json(
            r#"{ "seed": 7, "wheel": { "cart_count": 6 }, "deck": { "skip_policy": "ReturnToBack" } }"#,
        )
        .unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.wheel.cart_count, 6);
        assert_eq!(config.wheel.spin_policy, SpinPolicy::Drop);
        assert_eq!(config.deck.skip_policy, SkipPolicy::ReturnToBack);
        assert_eq!(config.round, RoundConfig::default());
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(SimConfig::from_json("{ \"seed\": \"x\" }").is_err());
    }
}
