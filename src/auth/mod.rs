//! Credential sources
//!
//! This module reads the locally cached credential record that acts as the
//! last fallback when no token is otherwise configured.

pub mod keys;

pub use keys::*;
