//! CLI module for vault-session
//!
//! This module contains the shared server flags, their usage text, and the
//! command definitions of the `vault-session` binary.

pub mod commands;
pub mod flags;
pub mod usage;

pub use commands::*;
pub use flags::{FlagGroup, ServerFlags};
pub use usage::general_options_usage;
