//! Error types for d2d-inventory

use thiserror::Error;

/// Reasons a single device cannot be resolved
///
/// These never abort a resolution run. The resolver turns each one into a
/// [`SkipRecord`](crate::types::SkipRecord) and moves on to the next device.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// A required field is absent or empty in the device fragment
    #[error("{entity} missing '{field}' field")]
    MissingField {
        /// Kind of entry the field was expected on ("Device", "Router")
        entity: &'static str,
        /// Field name
        field: &'static str,
    },

    /// Neither the router nor the architecture root names a management IP variable
    #[error(
        "management_ip_variable not configured. Set it at router level or sdwan level in sites.nac.yaml."
    )]
    ManagementIpNotConfigured,

    /// The management IP variable is not defined in `device_variables`
    #[error("management_ip_variable '{variable}' not found in device_variables.")]
    ManagementIpNotFound {
        /// Name of the variable that was looked up
        variable: String,
    },

    /// Device lifecycle state is not usable for SSH testing
    #[error(
        "Device has unsupported state '{state}' (devices in INIT or PNP state are not fully provisioned)"
    )]
    UnsupportedState {
        /// Uppercased state value
        state: String,
    },

    /// An extractor produced an empty value
    #[error("Invalid {field}: {value:?}")]
    InvalidField {
        /// Human readable field label
        field: &'static str,
        /// Offending value
        value: String,
    },

    /// A constructed record has an empty required field
    #[error("{field} is empty or missing")]
    EmptyField {
        /// Human readable field label
        field: &'static str,
    },

    /// Adapter specific rejection
    #[error("{0}")]
    Rejected(String),
}

impl DeviceError {
    /// Check if the device was rejected by validation rather than by a data problem
    #[must_use]
    pub fn is_validation_rejection(&self) -> bool {
        matches!(
            self,
            DeviceError::UnsupportedState { .. } | DeviceError::Rejected(_)
        )
    }
}

/// Fatal errors that abort a whole resolution run
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Device credential variables are absent or empty
    #[error(
        "Missing required credential environment variables: {}. These are required for {architecture} D2D testing.",
        .missing.join(", ")
    )]
    MissingCredentials {
        /// Architecture being resolved
        architecture: String,
        /// Every missing variable name, username first
        missing: Vec<String>,
    },
}

impl ResolveError {
    /// Names of the missing variables
    #[must_use]
    pub fn missing_variables(&self) -> &[String] {
        match self {
            ResolveError::MissingCredentials { missing, .. } => missing,
        }
    }
}

/// Errors raised while building or querying an adapter registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// An adapter is already registered under this key
    #[error("architecture already registered: {key}")]
    AlreadyRegistered {
        /// Architecture key
        key: String,
    },

    /// No adapter is registered under this key
    #[error("unknown architecture '{key}' (available: {})", .available.join(", "))]
    UnknownArchitecture {
        /// Requested key
        key: String,
        /// Registered keys
        available: Vec<String>,
    },
}
