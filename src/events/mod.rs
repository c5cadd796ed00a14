//! Events emitted for the presentation layer.
//!
//! - `SimEvent`: One recorded state transition
//! - `EventLog`: Ordered buffer drained once per tick
//! - `PresentationSink`: Push-style consumer

mod event;
mod log;

pub use event::{EffectTargets, SimEvent};
pub use log::{EventLog, PresentationSink};
