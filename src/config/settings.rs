//! Connection configuration
//!
//! This module defines the address and TLS settings used to construct a
//! Vault client, and how they are read from the environment.

use super::env::{
    parse_bool, Environment, ENV_VAULT_ADDRESS, ENV_VAULT_CA_CERT, ENV_VAULT_CA_PATH,
    ENV_VAULT_CLIENT_CERT, ENV_VAULT_CLIENT_KEY, ENV_VAULT_INSECURE, ENV_VAULT_TLS_SERVER_NAME,
    ENV_VAULT_TOKEN,
};
use crate::error::{Result, SessionError};
use crate::utils::network::NetworkConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Address used when nothing else is configured
pub const DEFAULT_ADDRESS: &str = "https://127.0.0.1:8200";

/// TLS settings passed through to the client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsConfig {
    /// Path to a PEM encoded CA certificate file
    pub ca_cert: String,
    /// Path to a directory of PEM encoded CA certificate files
    pub ca_path: String,
    /// Path to a PEM encoded client certificate
    pub client_cert: String,
    /// Path to an unencrypted PEM encoded private key
    pub client_key: String,
    /// Overrides the server name used for SNI and verification
    pub tls_server_name: String,
    /// Skip server certificate verification
    pub insecure: bool,
}

/// Effective connection configuration for a Vault client
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Server address, e.g. `https://vault.example.com:8200`
    pub address: String,
    /// TLS settings, `None` means library defaults
    pub tls: Option<TlsConfig>,
    /// Token discovered in the environment, if any
    #[serde(skip)]
    pub token: Option<String>,
    #[serde(skip)]
    pub network: NetworkConfig,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("address", &self.address)
            .field("tls", &self.tls)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("network", &self.network)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            tls: None,
            token: None,
            network: NetworkConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Replace the TLS settings wholesale
    pub fn configure_tls(&mut self, tls: TlsConfig) {
        self.tls = Some(tls);
    }

    /// Overlay settings found in the given environment.
    ///
    /// Empty variables are treated as unset. An unparsable
    /// `VAULT_SKIP_VERIFY` is the only failure.
    pub fn read_environment(&mut self, env: &dyn Environment) -> Result<()> {
        let lookup = |key: &str| env.var(key).filter(|value| !value.is_empty());

        let address = lookup(ENV_VAULT_ADDRESS);
        let ca_cert = lookup(ENV_VAULT_CA_CERT);
        let ca_path = lookup(ENV_VAULT_CA_PATH);
        let client_cert = lookup(ENV_VAULT_CLIENT_CERT);
        let client_key = lookup(ENV_VAULT_CLIENT_KEY);
        let tls_server_name = lookup(ENV_VAULT_TLS_SERVER_NAME);
        let token = lookup(ENV_VAULT_TOKEN);

        let insecure = match lookup(ENV_VAULT_INSECURE) {
            Some(value) => parse_bool(&value).ok_or_else(|| {
                SessionError::config(format!(
                    "could not parse {ENV_VAULT_INSECURE}: invalid boolean {value:?}"
                ))
            })?,
            None => false,
        };

        if let Some(address) = address {
            debug!("Using address from {}", ENV_VAULT_ADDRESS);
            self.address = address;
        }

        if ca_cert.is_some()
            || ca_path.is_some()
            || client_cert.is_some()
            || client_key.is_some()
            || tls_server_name.is_some()
            || insecure
        {
            debug!("Using TLS settings from environment");
            self.configure_tls(TlsConfig {
                ca_cert: ca_cert.unwrap_or_default(),
                ca_path: ca_path.unwrap_or_default(),
                client_cert: client_cert.unwrap_or_default(),
                client_key: client_key.unwrap_or_default(),
                tls_server_name: tls_server_name.unwrap_or_default(),
                insecure,
            });
        }

        if token.is_some() {
            self.token = token;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env::MockEnvironment;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.address, DEFAULT_ADDRESS);
        assert!(config.tls.is_none());
        assert!(config.token.is_none());
    }

    #[test]
    fn test_read_environment_overlays_values() {
        let env: HashMap<&'static str, &'static str> = HashMap::from([
            (ENV_VAULT_ADDRESS, "https://vault.internal:8200"),
            (ENV_VAULT_CA_CERT, "/etc/vault/ca.pem"),
            (ENV_VAULT_TLS_SERVER_NAME, "vault.internal"),
            (ENV_VAULT_TOKEN, "s.envtoken"),
        ]);

        let mut config = ClientConfig::default();
        config.read_environment(&env).unwrap();

        assert_eq!(config.address, "https://vault.internal:8200");
        assert_eq!(config.token.as_deref(), Some("s.envtoken"));
        let tls = config.tls.unwrap();
        assert_eq!(tls.ca_cert, "/etc/vault/ca.pem");
        assert_eq!(tls.tls_server_name, "vault.internal");
        assert!(tls.ca_path.is_empty());
        assert!(!tls.insecure);
    }

    #[test]
    fn test_empty_variables_are_ignored() {
        let env: HashMap<&'static str, &'static str> = HashMap::from([
            (ENV_VAULT_ADDRESS, ""),
            (ENV_VAULT_INSECURE, ""),
            (ENV_VAULT_TOKEN, ""),
        ]);

        let mut config = ClientConfig::default();
        config.read_environment(&env).unwrap();

        assert_eq!(config.address, DEFAULT_ADDRESS);
        assert!(config.tls.is_none());
        assert!(config.token.is_none());
    }

    #[test]
    fn test_skip_verify_false_does_not_configure_tls() {
        let env: HashMap<&'static str, &'static str> =
            HashMap::from([(ENV_VAULT_INSECURE, "false")]);

        let mut config = ClientConfig::default();
        config.read_environment(&env).unwrap();
        assert!(config.tls.is_none());
    }

    #[test]
    fn test_invalid_skip_verify_is_an_error() {
        let mut env = MockEnvironment::new();
        env.expect_var().returning(|key| match key {
            ENV_VAULT_INSECURE => Some("maybe".to_string()),
            _ => None,
        });

        let mut config = ClientConfig::default();
        let err = config.read_environment(&env).unwrap_err();
        assert!(matches!(err, SessionError::Config(_)));
        assert!(err.to_string().contains(ENV_VAULT_INSECURE));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig {
            token: Some("s.secret".to_string()),
            ..Default::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("s.secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
