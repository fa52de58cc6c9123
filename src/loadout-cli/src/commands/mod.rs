//! Command handlers for loadout CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod configure;
pub mod convert;
pub mod explain;
