//! Vault client module
//!
//! This module provides the client handle produced by a session and the
//! data shapes used when talking to the server.

pub mod client;
pub mod models;

pub use client::*;
pub use models::*;
