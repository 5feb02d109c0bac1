//! Vault data models
//!
//! Plain data shapes mirroring the server's mounts, roles, certificates,
//! backends and policies. They carry no behavior.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form configuration map as accepted by the server
pub type ConfigMap = Map<String, Value>;

/// Mount configuration sent when enabling a backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MountInput {
    #[serde(rename = "type")]
    pub mount_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub config: ConfigMap,
}

/// A mount path and its configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultMount {
    pub path: String,
    pub mount_input: MountInput,
}

/// A role defined on a backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultRole {
    pub backend: String,
    pub name: String,
    #[serde(default)]
    pub config: ConfigMap,
}

/// Certificate type requested from a PKI backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertType {
    /// Private key stays on the server
    #[default]
    Internal,
    /// Private key is returned to the caller
    Exported,
}

/// SSL certificate issued by a PKI backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultCert {
    pub backend: String,
    #[serde(rename = "type", default)]
    pub cert_type: CertType,
    /// Root CA certificate rather than a leaf
    #[serde(default)]
    pub root: bool,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub config: ConfigMap,
    /// Ask the server to store the issued certificate
    #[serde(default)]
    pub store: bool,
}

/// A backend with its roles and certificates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VaultBackend {
    pub name: String,
    #[serde(default)]
    pub roles: Vec<VaultRole>,
    #[serde(default)]
    pub certs: Vec<VaultCert>,
}

/// A named policy and its HCL rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultPolicy {
    pub name: String,
    pub rules: String,
}
