//! Session state shared by Vault commands
//!
//! A [`Session`] holds the server flags bound for one command invocation and
//! the token it has resolved. It builds the effective connection
//! configuration and hands out ready-to-use clients.
//!
//! Address precedence, highest first: explicit argument, `--address` flag,
//! `VAULT_ADDR`, built-in default.
//!
//! Token precedence: a token cached on the session, then the token the client
//! picked up from `VAULT_TOKEN`, then the root token in the cached credential
//! file. An explicit token always wins and is cached on the session, so it
//! keeps applying to later calls that pass no token.

use crate::auth::{default_keys_path, read_vault_keys};
use crate::cli::flags::{self, FlagGroup, ServerFlags};
use crate::config::{ClientConfig, Environment, ProcessEnvironment, TlsConfig};
use crate::error::{Result, SessionError};
use crate::utils::ui::{ConsoleUi, Ui};
use crate::vault::VaultClient;
use clap::Command;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;
use zeroize::Zeroize;

/// Where the token of the most recent resolution came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenSource {
    /// No token was found
    #[default]
    None,
    /// Cached on the session by an earlier explicit token
    Session,
    /// Carried by the client from `VAULT_TOKEN`
    Environment,
    /// Root token from the cached credential file
    LocalKeys,
    /// Passed explicitly to this call
    Explicit,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenSource::None => "none",
            TokenSource::Session => "session",
            TokenSource::Environment => "environment",
            TokenSource::LocalKeys => "local keys",
            TokenSource::Explicit => "explicit",
        };
        f.write_str(name)
    }
}

/// Connection and credential state for one command invocation
pub struct Session {
    token: String,
    token_source: TokenSource,
    ui: Box<dyn Ui>,
    env: Box<dyn Environment>,
    keys_path: PathBuf,
    flags: ServerFlags,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Box::new(ConsoleUi::default()))
    }
}

impl Session {
    /// Create a session reading the process environment and `.local/vault.json`
    pub fn new(ui: Box<dyn Ui>) -> Self {
        Self {
            token: String::new(),
            token_source: TokenSource::None,
            ui,
            env: Box::new(ProcessEnvironment),
            keys_path: default_keys_path(),
            flags: ServerFlags::default(),
        }
    }

    /// Read configuration from `env` instead of the process environment
    pub fn with_environment<E: Environment + 'static>(mut self, env: E) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Read cached credentials from `path` instead of `.local/vault.json`
    pub fn with_keys_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.keys_path = path.into();
        self
    }

    pub fn ui(&self) -> &dyn Ui {
        self.ui.as_ref()
    }

    pub fn keys_path(&self) -> &Path {
        &self.keys_path
    }

    pub fn flags(&self) -> &ServerFlags {
        &self.flags
    }

    /// Build a command carrying the options of the selected groups
    pub fn flag_set(name: &'static str, groups: &[FlagGroup]) -> Command {
        flags::flag_set(name, groups)
    }

    /// Parse `args` against the selected groups and bind the values.
    ///
    /// Returns the positional arguments that followed the flags.
    pub fn parse_flags<I, T>(
        &mut self,
        name: &'static str,
        groups: &[FlagGroup],
        args: I,
    ) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = Self::flag_set(name, groups).try_get_matches_from(args)?;

        if groups.contains(&FlagGroup::Server) {
            self.bind_server_flags(flags::server_flags(&matches)?);
        }

        Ok(flags::remaining_args(&matches))
    }

    /// Bind server flags parsed elsewhere
    pub fn bind_server_flags(&mut self, flags: ServerFlags) {
        self.flags = flags;
    }

    /// Build the effective connection configuration.
    ///
    /// A non-empty `address` overrides both the `--address` flag and
    /// `VAULT_ADDR`. TLS flags, when any is set, replace the TLS settings
    /// from the environment entirely.
    pub fn config(&self, address: &str) -> Result<ClientConfig> {
        let mut config = ClientConfig::default();

        config
            .read_environment(self.env.as_ref())
            .map_err(|e| SessionError::config(format!("Error reading environment: {}", e)))?;

        if !self.flags.address.is_empty() {
            debug!("Using address from --address flag");
            config.address = self.flags.address.clone();
        }

        if !address.is_empty() {
            debug!("Using explicit address");
            config.address = address.to_string();
        }

        if self.flags.has_tls() {
            debug!("Using TLS settings from flags");
            config.configure_tls(TlsConfig {
                ca_cert: self.flags.ca_cert.clone(),
                ca_path: self.flags.ca_path.clone(),
                client_cert: self.flags.client_cert.clone(),
                client_key: self.flags.client_key.clone(),
                tls_server_name: String::new(),
                insecure: self.flags.insecure,
            });
        }

        Ok(config)
    }

    /// Build a client for `address` authenticated with the resolved token
    pub fn client(&mut self, address: &str, token: &str) -> Result<VaultClient> {
        let config = self.config(address)?;
        let mut client = VaultClient::new(config)?;

        let (mut resolved, mut source) = if !self.token.is_empty() {
            (self.token.clone(), TokenSource::Session)
        } else if !client.token().is_empty() {
            (client.token().to_string(), TokenSource::Environment)
        } else {
            let mut keys = read_vault_keys(&self.keys_path)?;
            let root_token = keys.take_root_token();
            let source = if root_token.is_empty() {
                TokenSource::None
            } else {
                TokenSource::LocalKeys
            };
            (root_token, source)
        };

        if !token.is_empty() {
            resolved.zeroize();
            resolved = token.to_string();
            source = TokenSource::Explicit;
            self.token.zeroize();
            self.token = token.to_string();
        }

        debug!("Resolved token from {}", source);
        self.token_source = source;
        client.set_token(resolved);

        Ok(client)
    }

    /// Token cached on the session, empty until an explicit token is given
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Source of the token used by the most recent client
    pub fn token_source(&self) -> TokenSource {
        self.token_source
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.token.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("Session")
            .field("token", &token)
            .field("token_source", &self.token_source)
            .field("keys_path", &self.keys_path)
            .field("flags", &self.flags)
            .finish()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.token.zeroize();
    }
}
