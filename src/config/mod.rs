//! Configuration management module
//!
//! This module handles reading connection settings from the process
//! environment and describing the effective client configuration.

pub mod env;
pub mod settings;

pub use env::*;
pub use settings::*;
