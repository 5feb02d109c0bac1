//! Vault client handle
//!
//! Construction validates the address and prepares an HTTP client but never
//! touches the network.

use crate::config::ClientConfig;
use crate::error::{Result, SessionError};
use crate::utils::network::create_http_client;
use reqwest::{Client, Method, RequestBuilder};
use url::Url;
use zeroize::Zeroize;

/// Header carrying the access token
pub const TOKEN_HEADER: &str = "X-Vault-Token";

/// A configured Vault client
pub struct VaultClient {
    config: ClientConfig,
    address: Url,
    token: String,
    http: Client,
}

impl VaultClient {
    /// Build a client from the effective configuration.
    ///
    /// The token found in the configuration, if any, becomes the client's
    /// initial token.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let address = parse_address(&config.address)?;
        let http = create_http_client(&config.network, config.tls.as_ref())?;
        let token = config.token.clone().unwrap_or_default();

        Ok(Self {
            config,
            address,
            token,
            http,
        })
    }

    /// Server address
    pub fn address(&self) -> &str {
        self.config.address.as_str()
    }

    /// Current token, empty when unset
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn set_token<S: Into<String>>(&mut self, token: S) {
        self.token.zeroize();
        self.token = token.into();
    }

    pub fn clear_token(&mut self) {
        self.token.zeroize();
        self.token.clear();
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Start a request against `/v1/{path}`.
    ///
    /// The token header is attached when a token is set. Nothing is sent
    /// until the caller does so.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.api_url(path)?;
        let mut builder = self.http.request(method, url);
        if !self.token.is_empty() {
            builder = builder.header(TOKEN_HEADER, self.token.as_str());
        }
        Ok(builder)
    }

    fn api_url(&self, path: &str) -> Result<Url> {
        let mut base = self.address.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        Ok(base.join(&format!("v1/{}", path.trim_start_matches('/')))?)
    }
}

impl std::fmt::Debug for VaultClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = if self.token.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("VaultClient")
            .field("address", &self.config.address)
            .field("tls", &self.config.tls)
            .field("token", &token)
            .finish()
    }
}

impl Drop for VaultClient {
    fn drop(&mut self) {
        self.token.zeroize();
    }
}

fn parse_address(address: &str) -> Result<Url> {
    let url = Url::parse(address)
        .map_err(|e| SessionError::client(format!("invalid address {:?}: {}", address, e)))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(SessionError::client(format!(
                "invalid address {:?}: unsupported scheme {:?}",
                address, other
            )))
        }
    }

    if url.host_str().is_none() {
        return Err(SessionError::client(format!(
            "invalid address {:?}: missing host",
            address
        )));
    }

    Ok(url)
}
