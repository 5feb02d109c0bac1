use crate::config::TlsConfig;
use crate::error::{Result, SessionError};
use reqwest::Client;
use std::time::Duration;

/// Timeouts and identification for the HTTP client
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            request_timeout: Duration::from_secs(60),
            user_agent: format!("vault-session/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Create an HTTP client with timeouts applied.
///
/// Certificate paths are carried on the configuration only; the insecure
/// flag is the one TLS setting applied here.
pub fn create_http_client(config: &NetworkConfig, tls: Option<&TlsConfig>) -> Result<Client> {
    let insecure = tls.map(|tls| tls.insecure).unwrap_or(false);

    Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .user_agent(&config.user_agent)
        .danger_accept_invalid_certs(insecure)
        .build()
        .map_err(|e| SessionError::client(format!("Failed to create HTTP client: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_user_agent() {
        let config = NetworkConfig::default();
        assert!(config.user_agent.starts_with("vault-session/"));
    }

    #[test]
    fn test_create_http_client_insecure() {
        let tls = TlsConfig {
            insecure: true,
            ..Default::default()
        };
        assert!(create_http_client(&NetworkConfig::default(), Some(&tls)).is_ok());
        assert!(create_http_client(&NetworkConfig::default(), None).is_ok());
    }
}
