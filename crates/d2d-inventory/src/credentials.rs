//! Device credential lookup
//!
//! Credentials are read through a [`CredentialSource`] so the process
//! environment can be swapped for a plain map in tests.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::error::ResolveError;
use crate::types::CredentialPair;

/// Username variable for SSH access to IOS-XE devices
pub const IOSXE_USERNAME: &str = "IOSXE_USERNAME";
/// Password variable for SSH access to IOS-XE devices
pub const IOSXE_PASSWORD: &str = "IOSXE_PASSWORD";

/// Named key/value lookup for credentials
pub trait CredentialSource {
    /// Value of a variable, `None` if it is not set
    fn var(&self, name: &str) -> Option<String>;
}

/// The process environment, read at lookup time
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl CredentialSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl CredentialSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl CredentialSource for BTreeMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<T: CredentialSource + ?Sized> CredentialSource for &T {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

/// Read a username/password pair
///
/// Empty values count as missing.
///
/// # Errors
/// Returns [`ResolveError::MissingCredentials`] naming every missing variable
/// (username first) and the architecture.
pub fn load_credentials<S: CredentialSource + ?Sized>(
    source: &S,
    (username_var, password_var): (&str, &str),
    architecture: &str,
) -> Result<CredentialPair, ResolveError> {
    let username = source.var(username_var).filter(|v| !v.is_empty());
    let password = source.var(password_var).filter(|v| !v.is_empty());

    match (username, password) {
        (Some(username), Some(password)) => {
            debug!(
                username_var,
                password_var, "loaded device credentials from environment"
            );
            Ok(CredentialPair::new(username, password))
        }
        (username, password) => {
            let mut missing = Vec::new();
            if username.is_none() {
                missing.push(username_var.to_string());
            }
            if password.is_none() {
                missing.push(password_var.to_string());
            }
            Err(ResolveError::MissingCredentials {
                architecture: architecture.to_string(),
                missing,
            })
        }
    }
}
