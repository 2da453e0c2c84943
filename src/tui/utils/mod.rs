//! TUI Utility Modules

pub mod formatting;

pub use formatting::*;
