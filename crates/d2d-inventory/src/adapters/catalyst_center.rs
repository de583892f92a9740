//! Catalyst Center adapter
//!
//! Devices live under `catalyst_center.inventory.devices[]`:
//!
//! ```yaml
//! catalyst_center:
//!   inventory:
//!     devices:
//!       - name: P3-BN1
//!         fqdn_name: P3-BN1.cisco.eu
//!         device_ip: 192.168.38.1
//!         pid: C9300-24P
//!         state: PROVISION
//! ```
//!
//! D2D tests connect to the managed IOS-XE devices, not to the controller, so
//! the IOS-XE credentials are used.

use serde_json::Value;

use super::IOSXE;
use crate::adapter::ArchitectureAdapter;
use crate::credentials::{IOSXE_PASSWORD, IOSXE_USERNAME};
use crate::document::{RawDevice, sequence_at, strip_cidr};
use crate::error::DeviceError;

const ROOT_KEY: &str = "catalyst_center";
const DEVICES_PATH: [&str; 3] = [ROOT_KEY, "inventory", "devices"];

/// Lifecycle states of devices that are not fully provisioned yet
const UNPROVISIONED_STATES: [&str; 2] = ["INIT", "PNP"];

/// Adapter for the Catalyst Center data model
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalystCenterAdapter;

impl CatalystCenterAdapter {
    /// Create a new adapter
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn name(device: &RawDevice<'_>) -> Result<String, DeviceError> {
        device.str_field("name").ok_or(DeviceError::MissingField {
            entity: "Device",
            field: "name",
        })
    }
}

impl ArchitectureAdapter for CatalystCenterAdapter {
    fn architecture_name(&self) -> &'static str {
        "catalyst_center"
    }

    fn schema_root_key(&self) -> &'static str {
        ROOT_KEY
    }

    fn navigate<'a>(&self, document: &'a Value) -> Vec<RawDevice<'a>> {
        sequence_at(document, &DEVICES_PATH)
            .iter()
            .map(|device| RawDevice::new(document, device))
            .collect()
    }

    fn validate(&self, device: &RawDevice<'_>) -> Result<(), DeviceError> {
        let state = device
            .get("state")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_uppercase();

        if UNPROVISIONED_STATES.contains(&state.as_str()) {
            return Err(DeviceError::UnsupportedState { state });
        }
        Ok(())
    }

    fn extract_device_id(&self, device: &RawDevice<'_>) -> Result<String, DeviceError> {
        Self::name(device)
    }

    fn extract_hostname(&self, device: &RawDevice<'_>) -> Result<String, DeviceError> {
        Self::name(device)
    }

    fn extract_host_ip(&self, device: &RawDevice<'_>) -> Result<String, DeviceError> {
        let device_ip = device
            .str_field("device_ip")
            .ok_or(DeviceError::MissingField {
                entity: "Device",
                field: "device_ip",
            })?;

        Ok(strip_cidr(&device_ip).to_string())
    }

    fn extract_os_type(&self, _device: &RawDevice<'_>) -> Result<String, DeviceError> {
        Ok(IOSXE.to_string())
    }

    fn credential_env_vars(&self) -> (&'static str, &'static str) {
        (IOSXE_USERNAME, IOSXE_PASSWORD)
    }
}
