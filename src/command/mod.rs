//! Control surface: typed commands applied to a world
//!
//! Command -> validation -> World operation -> CommandOutcome

pub mod executor;
pub mod request;

pub use executor::execute_command;
pub use request::{Command, CommandOutcome};
