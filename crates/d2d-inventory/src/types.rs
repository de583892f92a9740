//! Inventory type definitions

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Device id recorded for skipped devices whose id cannot be extracted
pub const UNKNOWN_DEVICE_ID: &str = "<unknown>";

// ============================================================================
// Records
// ============================================================================

/// Connection record for one resolved device
///
/// Serializes to the flat mapping consumed by the SSH test tooling:
/// `hostname`, `host`, `os`, `device_id`, `username`, `password` plus any
/// architecture specific fields from `extra`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Device hostname
    pub hostname: String,
    /// Management address (IPv4/IPv6 literal, no prefix length)
    pub host: String,
    /// OS type (`iosxe`, `nxos`, ...)
    pub os: String,
    /// Identifier unique within the architecture
    pub device_id: String,
    /// SSH username
    #[serde(default)]
    pub username: String,
    /// SSH password
    #[serde(default)]
    pub password: String,
    /// Architecture specific fields (`platform`, `type`, ...)
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl DeviceRecord {
    /// Create a record without credentials
    pub fn new(
        hostname: impl Into<String>,
        host: impl Into<String>,
        os: impl Into<String>,
        device_id: impl Into<String>,
    ) -> Self {
        Self {
            hostname: hostname.into(),
            host: host.into(),
            os: os.into(),
            device_id: device_id.into(),
            username: String::new(),
            password: String::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Add an architecture specific field
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Architecture specific field by name
    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }

    /// Set SSH credentials
    pub fn set_credentials(&mut self, credentials: &CredentialPair) {
        self.username.clone_from(&credentials.username);
        self.password.clone_from(&credentials.password);
    }

    /// Check if credentials have been injected
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for DeviceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceRecord")
            .field("hostname", &self.hostname)
            .field("host", &self.host)
            .field("os", &self.os)
            .field("device_id", &self.device_id)
            .field("username", &self.username)
            .field("password", &redacted(&self.password))
            .field("extra", &self.extra)
            .finish()
    }
}

/// A device left out of the resolved inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipRecord {
    /// Device id, or [`UNKNOWN_DEVICE_ID`] if it could not be extracted
    pub device_id: String,
    /// Why the device was skipped
    pub reason: String,
}

impl SkipRecord {
    /// Create a skip record
    pub fn new(device_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Output of one resolution run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Devices ready for SSH connection, in navigation order
    pub devices: Vec<DeviceRecord>,
    /// Devices that were skipped, in navigation order
    pub skipped: Vec<SkipRecord>,
}

impl Resolution {
    /// Number of resolved devices
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.devices.len()
    }

    /// Number of skipped devices
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Check if nothing was found at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty() && self.skipped.is_empty()
    }

    /// Resolved device by id
    pub fn device(&self, device_id: &str) -> Option<&DeviceRecord> {
        self.devices.iter().find(|d| d.device_id == device_id)
    }
}

// ============================================================================
// Credentials
// ============================================================================

/// SSH credentials shared by every device of an architecture
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialPair {
    /// Username
    pub username: String,
    /// Password
    pub password: String,
}

impl CredentialPair {
    /// Create a credential pair
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPair")
            .field("username", &self.username)
            .field("password", &redacted(&self.password))
            .finish()
    }
}

fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "<redacted>" }
}
