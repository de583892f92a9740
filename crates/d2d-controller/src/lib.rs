//! d2d-controller: controller authentication contract
//!
//! Controller level API access (bearer tokens) is separate from the device SSH
//! credentials handled by `d2d-inventory`. This crate holds the endpoint
//! fallback policy, the token cache and the environment settings; the HTTP
//! exchange itself is supplied by the caller through [`TokenTransport`].

pub mod auth;
pub mod cache;
pub mod error;
pub mod settings;

pub use auth::{
    AuthData, CATALYST_CENTER_AUTH_ENDPOINTS, CATALYST_CENTER_TOKEN_LIFETIME_SECONDS,
    TokenResponse, TokenTransport, authenticate,
};
pub use cache::TokenCache;
pub use error::{AuthError, Result};
pub use settings::ControllerSettings;
