//! Architecture adapter trait
//!
//! An adapter knows where one architecture keeps its devices in the data model
//! and how to read hostname, address, OS type and id out of a device entry.
//! The resolver drives adapters; adapters never see each other.

use serde_json::Value;

use crate::document::RawDevice;
use crate::error::DeviceError;
use crate::types::{DeviceRecord, UNKNOWN_DEVICE_ID};

/// Architecture specific schema navigation and field extraction
///
/// Implementations must be stateless with respect to the document: every
/// method reads from the arguments it is given and nothing else.
pub trait ArchitectureAdapter: Send + Sync {
    /// Architecture identifier used in logs and error messages
    fn architecture_name(&self) -> &'static str;

    /// Top-level data model key owned by this architecture
    fn schema_root_key(&self) -> &'static str;

    /// All device entries in the document, in traversal order
    ///
    /// Missing sections yield an empty list, never an error.
    fn navigate<'a>(&self, document: &'a Value) -> Vec<RawDevice<'a>>;

    /// Identifier unique within the architecture
    ///
    /// # Errors
    /// Returns an error naming the field if the device has no id.
    fn extract_device_id(&self, device: &RawDevice<'_>) -> Result<String, DeviceError>;

    /// Hostname for the SSH connection
    ///
    /// # Errors
    /// Returns an error naming the field if the device has no hostname.
    fn extract_hostname(&self, device: &RawDevice<'_>) -> Result<String, DeviceError>;

    /// Management address with any `/prefix` removed
    ///
    /// # Errors
    /// Returns an error naming the field if the device has no address.
    fn extract_host_ip(&self, device: &RawDevice<'_>) -> Result<String, DeviceError>;

    /// OS type (`iosxe`, `nxos`, ...)
    ///
    /// # Errors
    /// Returns an error if the OS type cannot be determined.
    fn extract_os_type(&self, device: &RawDevice<'_>) -> Result<String, DeviceError>;

    /// Environment variable names holding `(username, password)`
    fn credential_env_vars(&self) -> (&'static str, &'static str);

    /// Reject a device before extraction
    ///
    /// # Errors
    /// Returns the skip reason if the device must not be resolved.
    fn validate(&self, _device: &RawDevice<'_>) -> Result<(), DeviceError> {
        Ok(())
    }

    /// Build the record for one device, without credentials
    ///
    /// Overrides should start from [`base_record`] and add fields to it.
    ///
    /// # Errors
    /// Returns the first extraction or validation failure.
    fn build_record(&self, device: &RawDevice<'_>) -> Result<DeviceRecord, DeviceError> {
        base_record(self, device)
    }
}

/// Compose the four required extractors into a record
///
/// Each extracted value must be non-empty; the first empty one is reported
/// together with its value.
///
/// # Errors
/// Returns the first extraction failure or [`DeviceError::InvalidField`].
pub fn base_record<A: ArchitectureAdapter + ?Sized>(
    adapter: &A,
    device: &RawDevice<'_>,
) -> Result<DeviceRecord, DeviceError> {
    let hostname = adapter.extract_hostname(device)?;
    let host = adapter.extract_host_ip(device)?;
    let os = adapter.extract_os_type(device)?;
    let device_id = adapter.extract_device_id(device)?;

    for (field, value) in [
        ("hostname", &hostname),
        ("host IP", &host),
        ("OS type", &os),
        ("device ID", &device_id),
    ] {
        if value.is_empty() {
            return Err(DeviceError::InvalidField {
                field,
                value: value.clone(),
            });
        }
    }

    Ok(DeviceRecord::new(hostname, host, os, device_id))
}

/// Device id for skip reporting, [`UNKNOWN_DEVICE_ID`] if extraction fails
pub fn device_id_or_unknown<A: ArchitectureAdapter + ?Sized>(
    adapter: &A,
    device: &RawDevice<'_>,
) -> String {
    adapter
        .extract_device_id(device)
        .ok()
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| UNKNOWN_DEVICE_ID.to_string())
}
