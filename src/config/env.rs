//! Environment sources
//!
//! Configuration reads variables through the [`Environment`] trait so that
//! the process environment can be swapped for a fixed map in tests.

use std::collections::HashMap;

/// Vault server address
pub const ENV_VAULT_ADDRESS: &str = "VAULT_ADDR";
/// PEM encoded CA certificate file
pub const ENV_VAULT_CA_CERT: &str = "VAULT_CACERT";
/// Directory of PEM encoded CA certificate files
pub const ENV_VAULT_CA_PATH: &str = "VAULT_CAPATH";
/// PEM encoded client certificate
pub const ENV_VAULT_CLIENT_CERT: &str = "VAULT_CLIENT_CERT";
/// Unencrypted PEM encoded client key
pub const ENV_VAULT_CLIENT_KEY: &str = "VAULT_CLIENT_KEY";
/// Skip TLS host verification
pub const ENV_VAULT_INSECURE: &str = "VAULT_SKIP_VERIFY";
/// SNI host name override
pub const ENV_VAULT_TLS_SERVER_NAME: &str = "VAULT_TLS_SERVER_NAME";
/// Access token
pub const ENV_VAULT_TOKEN: &str = "VAULT_TOKEN";

/// A source of environment variables
#[cfg_attr(test, mockall::automock)]
pub trait Environment {
    /// Look up a variable, returning `None` when it is unset
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads from the environment of the running process
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl Environment for HashMap<&'static str, &'static str> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).map(|value| value.to_string())
    }
}

/// Parse a boolean the way the Vault tooling accepts it
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
