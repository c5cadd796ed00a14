//! Session: the root object a front end drives.
//!
//! - `Command`: Player inputs
//! - `Session`: Owns every service of a run and applies commands

mod command;
mod engine;

pub use command::Command;
pub use engine::Session;
