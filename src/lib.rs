//! vault-session - Vault connection and credential resolution
//!
//! Resolves the server address, TLS settings and access token for a Vault
//! command from flags, the environment, explicit overrides and a locally
//! cached credential file, and produces a ready-to-use client.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod session;
pub mod utils;
pub mod vault;

// Re-export commonly used types
pub use error::{Result, SessionError};
pub use session::{Session, TokenSource};
pub use vault::VaultClient;
