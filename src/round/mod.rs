//! Round bookkeeping.

mod state;

pub use state::{RoundOutcome, RoundState};
