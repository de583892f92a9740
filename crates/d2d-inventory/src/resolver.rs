//! Inventory resolution
//!
//! Drives an [`ArchitectureAdapter`] over a data model. Per-device failures are
//! collected as skips; only missing credentials abort a run.

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::adapter::{ArchitectureAdapter, device_id_or_unknown};
use crate::credentials::{CredentialSource, ProcessEnv, load_credentials};
use crate::document::RawDevice;
use crate::error::{DeviceError, ResolveError};
use crate::types::{DeviceRecord, Resolution, SkipRecord};

/// Resolves device inventories using a fixed credential source
///
/// The resolver keeps no state between runs; every call to
/// [`resolve`](Self::resolve) starts with empty output lists.
#[derive(Debug, Clone, Default)]
pub struct InventoryResolver<C = ProcessEnv> {
    credentials: C,
}

impl InventoryResolver<ProcessEnv> {
    /// Create a resolver reading credentials from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(ProcessEnv)
    }
}

impl<C: CredentialSource> InventoryResolver<C> {
    /// Create a resolver reading credentials from `credentials`
    pub fn new(credentials: C) -> Self {
        Self { credentials }
    }

    /// Resolve every device the adapter finds in `document`
    ///
    /// # Errors
    /// Returns [`ResolveError::MissingCredentials`] if either credential
    /// variable named by the adapter is unset or empty. No partial inventory is
    /// returned in that case.
    #[instrument(skip_all, fields(architecture = adapter.architecture_name()))]
    pub fn resolve<A: ArchitectureAdapter + ?Sized>(
        &self,
        document: &Value,
        adapter: &A,
    ) -> Result<Resolution, ResolveError> {
        let architecture = adapter.architecture_name();
        info!("Resolving device inventory for {architecture}");

        let mut resolution = Resolution::default();
        let devices = adapter.navigate(document);
        debug!(count = devices.len(), "found devices in data model");

        for device in &devices {
            match resolve_device(adapter, device) {
                Ok(record) => {
                    debug!(
                        hostname = %record.hostname,
                        host = %record.host,
                        os = %record.os,
                        "resolved device"
                    );
                    resolution.devices.push(record);
                }
                Err(e) => {
                    let device_id = device_id_or_unknown(adapter, device);
                    debug!(device_id = %device_id, reason = %e, "skipping device");
                    resolution.skipped.push(SkipRecord::new(device_id, e.to_string()));
                }
            }
        }

        let credentials = load_credentials(
            &self.credentials,
            adapter.credential_env_vars(),
            architecture,
        )?;
        for record in &mut resolution.devices {
            record.set_credentials(&credentials);
        }

        info!(
            resolved = resolution.resolved_count(),
            skipped = resolution.skipped_count(),
            "Resolved {} devices for {architecture} D2D testing",
            resolution.resolved_count()
        );

        Ok(resolution)
    }
}

/// Resolve `document` with credentials read from `credentials`
///
/// # Errors
/// See [`InventoryResolver::resolve`].
pub fn resolve<A, C>(
    document: &Value,
    adapter: &A,
    credentials: C,
) -> Result<Resolution, ResolveError>
where
    A: ArchitectureAdapter + ?Sized,
    C: CredentialSource,
{
    InventoryResolver::new(credentials).resolve(document, adapter)
}

/// Validate, build and re-check one device
fn resolve_device<A: ArchitectureAdapter + ?Sized>(
    adapter: &A,
    device: &RawDevice<'_>,
) -> Result<DeviceRecord, DeviceError> {
    adapter.validate(device)?;
    let record = adapter.build_record(device)?;
    check_required_fields(&record)?;
    Ok(record)
}

/// Required fields must be non-empty even when an adapter builds records itself
fn check_required_fields(record: &DeviceRecord) -> Result<(), DeviceError> {
    for (field, value) in [
        ("hostname", &record.hostname),
        ("host (IP address)", &record.host),
        ("os type", &record.os),
        ("device_id", &record.device_id),
    ] {
        if value.is_empty() {
            return Err(DeviceError::EmptyField { field });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use super::*;
    use crate::adapters::{CatalystCenterAdapter, SdwanAdapter};
    use crate::types::UNKNOWN_DEVICE_ID;

    fn credentials() -> HashMap<String, String> {
        HashMap::from([
            ("IOSXE_USERNAME".to_string(), "test_user".to_string()),
            ("IOSXE_PASSWORD".to_string(), "test_pass".to_string()),
        ])
    }

    /// Builds records without the shared non-empty check
    struct SloppyAdapter;

    impl ArchitectureAdapter for SloppyAdapter {
        fn architecture_name(&self) -> &'static str {
            "sloppy"
        }

        fn schema_root_key(&self) -> &'static str {
            "sloppy"
        }

        fn navigate<'a>(&self, document: &'a Value) -> Vec<RawDevice<'a>> {
            crate::document::sequence_at(document, &["sloppy", "devices"])
                .iter()
                .map(|d| RawDevice::new(document, d))
                .collect()
        }

        fn extract_device_id(&self, device: &RawDevice<'_>) -> Result<String, DeviceError> {
            Ok(device.str_field("id").unwrap_or_default())
        }

        fn extract_hostname(&self, device: &RawDevice<'_>) -> Result<String, DeviceError> {
            Ok(device.str_field("hostname").unwrap_or_default())
        }

        fn extract_host_ip(&self, _device: &RawDevice<'_>) -> Result<String, DeviceError> {
            Ok("10.0.0.1".to_string())
        }

        fn extract_os_type(&self, _device: &RawDevice<'_>) -> Result<String, DeviceError> {
            Ok("nxos".to_string())
        }

        fn credential_env_vars(&self) -> (&'static str, &'static str) {
            ("IOSXE_USERNAME", "IOSXE_PASSWORD")
        }

        fn build_record(&self, device: &RawDevice<'_>) -> Result<DeviceRecord, DeviceError> {
            Ok(DeviceRecord::new(
                self.extract_hostname(device)?,
                self.extract_host_ip(device)?,
                self.extract_os_type(device)?,
                self.extract_device_id(device)?,
            ))
        }
    }

    #[test]
    fn test_post_build_check_catches_adapter_bypass() {
        let doc = json!({"sloppy": {"devices": [
            {"id": "d1", "hostname": "r1"},
            {"id": "d2"}
        ]}});

        let resolution = resolve(&doc, &SloppyAdapter, credentials()).unwrap();

        assert_eq!(resolution.resolved_count(), 1);
        assert_eq!(resolution.skipped, [SkipRecord::new(
            "d2",
            "hostname is empty or missing"
        )]);
    }

    #[test]
    fn test_unknown_id_sentinel() {
        let doc = json!({"catalyst_center": {"inventory": {"devices": [
            {"device_ip": "10.0.0.1"}
        ]}}});

        let resolution = resolve(&doc, &CatalystCenterAdapter, credentials()).unwrap();
        assert!(resolution.devices.is_empty());
        assert_eq!(resolution.skipped[0].device_id, UNKNOWN_DEVICE_ID);
        assert_eq!(resolution.skipped[0].reason, "Device missing 'name' field");
    }

    #[test]
    fn test_missing_credentials_abort_even_without_devices() {
        let err = resolve(&json!({}), &SdwanAdapter, HashMap::new()).unwrap_err();
        assert_eq!(err.missing_variables(), &["IOSXE_USERNAME", "IOSXE_PASSWORD"]);
    }

    #[test]
    fn test_credentials_injected_into_every_record() {
        let doc = json!({"catalyst_center": {"inventory": {"devices": [
            {"name": "a", "device_ip": "10.0.0.1"},
            {"name": "b", "device_ip": "10.0.0.2"}
        ]}}});

        let resolution = InventoryResolver::new(credentials())
            .resolve(&doc, &CatalystCenterAdapter)
            .unwrap();
        assert_eq!(resolution.resolved_count(), 2);
        for record in &resolution.devices {
            assert_eq!(record.username, "test_user");
            assert_eq!(record.password, "test_pass");
        }
    }
}
