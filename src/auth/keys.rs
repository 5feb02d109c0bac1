//! Locally cached Vault credentials
//!
//! Operators who initialise a development server keep its root token and
//! unseal keys in `.local/vault.json`. This module only ever reads that file.

use crate::error::{Result, SessionError};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use zeroize::Zeroize;

/// Directory holding the cached credential file, relative to the working directory
pub const LOCAL_DIR: &str = ".local";
/// Cached credential file name
pub const LOCAL_FILE: &str = "vault.json";

/// Default location of the cached credential file
pub fn default_keys_path() -> PathBuf {
    Path::new(LOCAL_DIR).join(LOCAL_FILE)
}

/// Keys and tokens parsed from the cached credential file
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultKeys {
    /// Root token issued at initialisation
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub root_token: String,
    /// Master keys used to unseal the server
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub master_keys: Vec<String>,
    /// Token issued by the server
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub token: String,
}

impl VaultKeys {
    pub fn is_empty(&self) -> bool {
        self.root_token.is_empty() && self.master_keys.is_empty() && self.token.is_empty()
    }

    /// Move the root token out, leaving an empty string behind
    pub fn take_root_token(&mut self) -> String {
        std::mem::take(&mut self.root_token)
    }
}

impl std::fmt::Debug for VaultKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultKeys")
            .field("root_token", &redact(&self.root_token))
            .field("master_keys", &self.master_keys.len())
            .field("token", &redact(&self.token))
            .finish()
    }
}

impl Drop for VaultKeys {
    fn drop(&mut self) {
        self.root_token.zeroize();
        self.master_keys.zeroize();
        self.token.zeroize();
    }
}

/// Treat an explicit JSON `null` the same as an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}

/// Read the cached credential file.
///
/// A missing file yields an empty record. A file that exists but cannot be
/// read or parsed is an error.
pub fn read_vault_keys(path: &Path) -> Result<VaultKeys> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No cached vault keys at {}", path.display());
            return Ok(VaultKeys::default());
        }
        Err(e) => return Err(SessionError::credentials(path, e)),
    };

    let keys: VaultKeys =
        serde_json::from_str(&contents).map_err(|e| SessionError::credentials(path, e))?;

    debug!("Loaded cached vault keys from {}", path.display());
    Ok(keys)
}
