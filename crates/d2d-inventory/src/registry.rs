//! Adapter registry
//!
//! Plain mapping from architecture key to adapter. The surrounding application
//! builds one at startup and looks adapters up before resolving; nothing is
//! registered implicitly.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::adapter::ArchitectureAdapter;
use crate::adapters::{CatalystCenterAdapter, SdwanAdapter};
use crate::error::RegistryError;

/// Key of the built-in Catalyst Center adapter
pub const CATALYST_CENTER: &str = "CC";
/// Key of the built-in SD-WAN adapter
pub const SDWAN: &str = "SDWAN";

/// Registry of architecture adapters keyed by architecture code
///
/// Keys are stored uppercased and looked up case-insensitively.
#[derive(Default, Clone)]
pub struct AdapterRegistry {
    adapters: HashMap<String, Arc<dyn ArchitectureAdapter>>,
}

impl AdapterRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            adapters: HashMap::new(),
        }
    }

    /// Create a registry holding the built-in adapters
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut adapters: HashMap<String, Arc<dyn ArchitectureAdapter>> = HashMap::new();
        adapters.insert(CATALYST_CENTER.to_string(), Arc::new(CatalystCenterAdapter));
        adapters.insert(SDWAN.to_string(), Arc::new(SdwanAdapter));
        Self { adapters }
    }

    /// Register an adapter under `key`
    ///
    /// # Errors
    /// Returns [`RegistryError::AlreadyRegistered`] if the key is taken.
    pub fn register(
        &mut self,
        key: &str,
        adapter: Arc<dyn ArchitectureAdapter>,
    ) -> Result<(), RegistryError> {
        let key = key.to_uppercase();
        if self.adapters.contains_key(&key) {
            return Err(RegistryError::AlreadyRegistered { key });
        }
        self.adapters.insert(key, adapter);
        Ok(())
    }

    /// Adapter registered under `key`
    pub fn get(&self, key: &str) -> Option<Arc<dyn ArchitectureAdapter>> {
        self.adapters.get(&key.to_uppercase()).cloned()
    }

    /// Adapter registered under `key`, or an error listing the known keys
    ///
    /// # Errors
    /// Returns [`RegistryError::UnknownArchitecture`] if nothing is registered.
    pub fn require(&self, key: &str) -> Result<Arc<dyn ArchitectureAdapter>, RegistryError> {
        self.get(key)
            .ok_or_else(|| RegistryError::UnknownArchitecture {
                key: key.to_string(),
                available: self.keys(),
            })
    }

    /// Check if a key is registered
    pub fn contains(&self, key: &str) -> bool {
        self.adapters.contains_key(&key.to_uppercase())
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.adapters.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Keys whose schema root is present in `document`, sorted
    pub fn detect(&self, document: &Value) -> Vec<String> {
        let mut keys: Vec<String> = self
            .adapters
            .iter()
            .filter(|(_, adapter)| document.get(adapter.schema_root_key()).is_some())
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_builtin_adapters() {
        let registry = AdapterRegistry::with_builtin();

        assert_eq!(registry.keys(), ["CC", "SDWAN"]);
        assert_eq!(
            registry.get("CC").unwrap().architecture_name(),
            "catalyst_center"
        );
        assert_eq!(registry.get("sdwan").unwrap().architecture_name(), "sdwan");
        assert!(registry.contains("Sdwan"));
    }

    #[test]
    fn test_register_duplicate() {
        let mut registry = AdapterRegistry::with_builtin();

        let err = registry
            .register("cc", Arc::new(CatalystCenterAdapter))
            .unwrap_err();
        assert_eq!(err, RegistryError::AlreadyRegistered {
            key: "CC".to_string()
        });
    }

    #[test]
    fn test_register_custom_key() {
        let mut registry = AdapterRegistry::new();
        registry
            .register("campus", Arc::new(CatalystCenterAdapter))
            .unwrap();

        assert!(registry.contains("CAMPUS"));
        assert_eq!(registry.keys(), ["CAMPUS"]);
    }

    #[test]
    fn test_require_unknown() {
        let registry = AdapterRegistry::with_builtin();

        let err = registry.require("ACI").err().unwrap();
        assert_eq!(
            err.to_string(),
            "unknown architecture 'ACI' (available: CC, SDWAN)"
        );
    }

    #[test]
    fn test_detect() {
        let registry = AdapterRegistry::with_builtin();

        assert_eq!(registry.detect(&json!({"sdwan": {}})), ["SDWAN"]);
        assert_eq!(
            registry.detect(&json!({"sdwan": {}, "catalyst_center": {}})),
            ["CC", "SDWAN"]
        );
        assert!(registry.detect(&json!({"apic": {}})).is_empty());
    }
}
