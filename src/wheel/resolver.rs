//! Effect resolution.
//!
//! `EffectResolver` fires one trigger on one cart: every matching effect of
//! the rider, in list order, resolves its targets against the ring and
//! mutates points. Spin effects cannot rotate the wheel from here; they are
//! returned as [`SpinRequest`]s for the controller to schedule.

use smallvec::SmallVec;
use tracing::trace;

use super::ring::{CartRing, Direction};
use crate::animals::{EffectSpec, EffectTarget, EffectTrigger, EffectType};
use crate::core::{GameRng, ScoringConfig};
use crate::events::{EffectTargets, EventLog, SimEvent};

/// A rotation requested by a SpinWheel effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpinRequest {
    /// Cart whose effect asked for the spin.
    pub source: usize,
    pub direction: Direction,
    pub steps: u32,
}

/// Spin requests produced by one trigger.
pub type SpinRequests = SmallVec<[SpinRequest; 2]>;

/// What the resolver needs besides the ring.
pub struct ResolverContext<'a> {
    /// Stream used by `Random` targets.
    pub rng: &'a mut GameRng,
    /// Where resolution events are recorded.
    pub events: &'a mut EventLog,
    /// Point floor policy.
    pub scoring: ScoringConfig,
}

impl<'a> ResolverContext<'a> {
    /// Create a context.
    pub fn new(rng: &'a mut GameRng, events: &'a mut EventLog, scoring: ScoringConfig) -> Self {
        Self {
            rng,
            events,
            scoring,
        }
    }
}

/// Resolves animal effects against the ring.
pub struct EffectResolver;

impl EffectResolver {
    /// Fire `trigger` on the animal in `cart`. Empty carts are a no-op.
    pub fn apply_effects(
        ring: &mut CartRing,
        cart: usize,
        trigger: EffectTrigger,
        ctx: &mut ResolverContext<'_>,
    ) -> SpinRequests {
        let mut spins = SpinRequests::new();

        let effects: SmallVec<[EffectSpec; 2]> = match ring.get(cart) {
            Some(animal) => animal.effects_for(trigger).cloned().collect(),
            None => return spins,
        };

        for effect in &effects {
            if effect.effect_type == EffectType::SpinWheel {
                let steps = effect.value1.abs() as u32;
                if steps > 0 {
                    spins.push(SpinRequest {
                        source: cart,
                        direction: Direction::from_spin(effect.value1),
                        steps,
                    });
                }
                ctx.events.push(SimEvent::EffectApplied {
                    cart,
                    trigger,
                    effect_type: effect.effect_type,
                    targets: EffectTargets::new(),
                });
                continue;
            }

            let targets = Self::resolve_targets(ring, cart, effect.target, ctx.rng);
            for &target in &targets {
                Self::apply_single(ring, cart, target, effect, ctx);
            }

            trace!(cart, ?trigger, effect = ?effect.effect_type, ?targets, "effect resolved");
            ctx.events.push(SimEvent::EffectApplied {
                cart,
                trigger,
                effect_type: effect.effect_type,
                targets,
            });
        }

        spins
    }

    /// Occupied carts an effect on `cart` acts on. Empty carts are filtered.
    pub fn resolve_targets(
        ring: &CartRing,
        cart: usize,
        target: EffectTarget,
        rng: &mut GameRng,
    ) -> EffectTargets {
        let candidates: EffectTargets = match target {
            EffectTarget::Self_ => smallvec::smallvec![cart],
            EffectTarget::Adjacent => smallvec::smallvec![
                ring.adjacent(cart, Direction::Clockwise),
                ring.adjacent(cart, Direction::CounterClockwise),
            ],
            EffectTarget::Opposite => smallvec::smallvec![ring.opposite(cart)],
            EffectTarget::All => ring.occupied().collect(),
            EffectTarget::Random => {
                let occupied: EffectTargets = ring.occupied().collect();
                rng.choose(&occupied).copied().into_iter().collect()
            }
        };

        candidates
            .into_iter()
            .filter(|&c| ring.is_occupied(c))
            .collect()
    }

    fn apply_single(
        ring: &mut CartRing,
        source: usize,
        target: usize,
        effect: &EffectSpec,
        ctx: &mut ResolverContext<'_>,
    ) {
        let clamp = ctx.scoring.clamp_points_at_zero;

        let (changed, points) = match effect.effect_type {
            EffectType::AddPoints => {
                let Some(animal) = ring.get_mut(target) else {
                    return;
                };
                animal.set_points(animal.points().saturating_add(effect.amount()), clamp);
                (target, animal.points())
            }
            EffectType::MultiplyPoints => {
                let Some(animal) = ring.get_mut(target) else {
                    return;
                };
                let product = (animal.points() as f64 * f64::from(effect.value1)).trunc();
                animal.set_points(product as i64, clamp);
                (target, animal.points())
            }
            EffectType::CopyPoints => {
                let Some(copied) = ring.get(target).map(|a| a.points()) else {
                    return;
                };
                let Some(animal) = ring.get_mut(source) else {
                    return;
                };
                animal.set_points(copied, clamp);
                (source, animal.points())
            }
            EffectType::SpinWheel => return,
        };

        ctx.events.push(SimEvent::PointsChanged {
            cart: changed,
            points,
        });
    }
}
