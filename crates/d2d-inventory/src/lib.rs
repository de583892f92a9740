//! d2d-inventory: device inventory resolution for D2D testing
//!
//! Walks a merged network-as-code data model, pulls per-device fields out of it
//! through an architecture-specific [`ArchitectureAdapter`] and produces a flat
//! list of SSH connection records plus a list of devices that were skipped.

pub mod adapter;
pub mod adapters;
pub mod credentials;
pub mod document;
pub mod error;
pub mod registry;
pub mod resolver;
pub mod types;

pub use adapter::{ArchitectureAdapter, base_record, device_id_or_unknown};
pub use adapters::{CatalystCenterAdapter, SdwanAdapter};
pub use credentials::{CredentialSource, ProcessEnv, load_credentials};
pub use document::RawDevice;
pub use error::{DeviceError, RegistryError, ResolveError};
pub use registry::AdapterRegistry;
pub use resolver::{InventoryResolver, resolve};
pub use types::{CredentialPair, DeviceRecord, Resolution, SkipRecord};
