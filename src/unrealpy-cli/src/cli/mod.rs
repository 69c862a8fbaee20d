//! CLI argument definitions for unrealpy
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

mod core;
mod global;

pub use core::{Cli, Commands};
