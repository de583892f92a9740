//! Built-in architecture adapters

pub mod catalyst_center;
pub mod sdwan;

pub use catalyst_center::CatalystCenterAdapter;
pub use sdwan::SdwanAdapter;

/// OS type of every device managed by the built-in architectures
pub const IOSXE: &str = "iosxe";
