//! Command handlers for unrealpy CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod bindings;
pub mod build;
pub mod clean;
pub mod configure;
pub mod describe;
pub mod engine;
pub mod scaffold;
