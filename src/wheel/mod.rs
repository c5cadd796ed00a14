//! The wheel: cart ring, effect resolution and the rotation state machine.
//!
//! - `CartRing`: Slots plus the top index; pure index arithmetic
//! - `EffectResolver`: Fires one trigger on one cart
//! - `WheelController`: Runs rotations step by step, scheduling spins
//!
//! ## Control Flow
//!
//! `WheelController::rotate` spends energy on the round, advances the ring
//! one position at a time and asks the resolver to fire each trigger. Spin
//! effects come back as requests; the controller drops or queues them
//! according to `SpinPolicy`.

mod controller;
mod resolver;
mod ring;

pub use controller::{WheelContext, WheelController, WheelState};
pub use resolver::{EffectResolver, ResolverContext, SpinRequest, SpinRequests};
pub use ring::{CartRing, Direction};
