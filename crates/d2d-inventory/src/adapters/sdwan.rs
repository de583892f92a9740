//! SD-WAN adapter
//!
//! Routers live under `sdwan.sites[].routers[]` and are flattened across all
//! sites in site order:
//!
//! ```yaml
//! sdwan:
//!   management_ip_variable: vpn511_int1_if_ipv4_address   # global default
//!   sites:
//!     - name: site1
//!       routers:
//!         - chassis_id: abc123
//!           management_ip_variable: custom_mgmt_ip        # router override
//!           device_variables:
//!             system_hostname: router1
//!             vpn511_int1_if_ipv4_address: 10.1.1.100/32
//!             custom_mgmt_ip: 10.2.2.200/32
//! ```
//!
//! The management address is the value of the `device_variables` entry named by
//! `management_ip_variable`, looked up on the router first and on `sdwan` second.

use serde_json::Value;
use tracing::warn;

use super::IOSXE;
use crate::adapter::{ArchitectureAdapter, base_record};
use crate::credentials::{IOSXE_PASSWORD, IOSXE_USERNAME};
use crate::document::{RawDevice, navigate_path, scalar_string, sequence_at, strip_cidr};
use crate::error::DeviceError;
use crate::types::DeviceRecord;

const ROOT_KEY: &str = "sdwan";
const MANAGEMENT_IP_VARIABLE: &str = "management_ip_variable";
const DEVICE_VARIABLES: &str = "device_variables";
const SYSTEM_HOSTNAME: &str = "system_hostname";

/// Adapter for the SD-WAN data model
#[derive(Debug, Clone, Copy, Default)]
pub struct SdwanAdapter;

impl SdwanAdapter {
    /// Create a new adapter
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Management IP variable name, router level first
    fn management_ip_variable(device: &RawDevice<'_>) -> Option<String> {
        device.str_field(MANAGEMENT_IP_VARIABLE).or_else(|| {
            navigate_path(device.root(), &[ROOT_KEY, MANAGEMENT_IP_VARIABLE])
                .and_then(scalar_string)
        })
    }
}

impl ArchitectureAdapter for SdwanAdapter {
    fn architecture_name(&self) -> &'static str {
        "sdwan"
    }

    fn schema_root_key(&self) -> &'static str {
        ROOT_KEY
    }

    fn navigate<'a>(&self, document: &'a Value) -> Vec<RawDevice<'a>> {
        sequence_at(document, &[ROOT_KEY, "sites"])
            .iter()
            .flat_map(|site| sequence_at(site, &["routers"]))
            .map(|router| RawDevice::new(document, router))
            .collect()
    }

    fn extract_device_id(&self, device: &RawDevice<'_>) -> Result<String, DeviceError> {
        device.str_field("chassis_id").ok_or(DeviceError::MissingField {
            entity: "Router",
            field: "chassis_id",
        })
    }

    /// Falls back to the chassis id when `system_hostname` is not defined
    fn extract_hostname(&self, device: &RawDevice<'_>) -> Result<String, DeviceError> {
        if let Some(hostname) = device
            .get(DEVICE_VARIABLES)
            .and_then(|vars| vars.get(SYSTEM_HOSTNAME))
        {
            return Ok(scalar_string(hostname).unwrap_or_default());
        }

        let chassis_id = device
            .str_field("chassis_id")
            .unwrap_or_else(|| "unknown".to_string());
        warn!(
            chassis_id = %chassis_id,
            "No system_hostname found for {chassis_id}, using chassis_id as hostname"
        );
        Ok(chassis_id)
    }

    fn extract_host_ip(&self, device: &RawDevice<'_>) -> Result<String, DeviceError> {
        let variable =
            Self::management_ip_variable(device).ok_or(DeviceError::ManagementIpNotConfigured)?;

        let value = device
            .get(DEVICE_VARIABLES)
            .and_then(|vars| vars.get(variable.as_str()))
            .ok_or_else(|| DeviceError::ManagementIpNotFound {
                variable: variable.clone(),
            })?;

        let address = scalar_string(value).unwrap_or_default();
        Ok(strip_cidr(&address).to_string())
    }

    fn extract_os_type(&self, _device: &RawDevice<'_>) -> Result<String, DeviceError> {
        Ok(IOSXE.to_string())
    }

    fn credential_env_vars(&self) -> (&'static str, &'static str) {
        (IOSXE_USERNAME, IOSXE_PASSWORD)
    }

    /// Every SD-WAN edge is an IOS-XE router on the `sdwan` platform
    fn build_record(&self, device: &RawDevice<'_>) -> Result<DeviceRecord, DeviceError> {
        Ok(base_record(self, device)?
            .with_extra("platform", "sdwan")
            .with_extra("type", "router"))
    }
}
