//! Controller connection settings from the environment
//!
//! A controller type `CC` reads `CC_URL`, `CC_USERNAME`, `CC_PASSWORD` and the
//! optional `CC_INSECURE`.

use d2d_inventory::CredentialSource;

use crate::error::{AuthError, Result};

/// Settings for one controller
#[derive(Clone, PartialEq, Eq)]
pub struct ControllerSettings {
    /// Controller type (`CC`, `SDWAN_MANAGER`, ...)
    pub controller_type: String,
    /// Base URL without trailing slash
    pub url: String,
    /// API username
    pub username: String,
    /// API password
    pub password: String,
    /// Skip TLS certificate verification
    pub insecure: bool,
}

impl ControllerSettings {
    /// Read settings for `controller_type` from `source`
    ///
    /// `<TYPE>_INSECURE` defaults to true and accepts `true`, `1` or `yes` in
    /// any case; every other value turns verification on.
    ///
    /// # Errors
    /// Returns [`AuthError::MissingSettings`] listing every missing variable.
    pub fn from_env<S: CredentialSource + ?Sized>(
        source: &S,
        controller_type: &str,
    ) -> Result<Self> {
        let read = |suffix: &str| {
            let name = format!("{controller_type}_{suffix}");
            let value = source.var(&name).filter(|v| !v.is_empty());
            (name, value)
        };

        let (url_var, url) = read("URL");
        let (username_var, username) = read("USERNAME");
        let (password_var, password) = read("PASSWORD");
        let (_, insecure) = read("INSECURE");

        let missing: Vec<String> = [
            (&url_var, url.is_none()),
            (&username_var, username.is_none()),
            (&password_var, password.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, missing)| missing.then(|| name.clone()))
        .collect();

        let (Some(url), Some(username), Some(password)) = (url, username, password) else {
            return Err(AuthError::MissingSettings(missing));
        };

        Ok(Self {
            controller_type: controller_type.to_string(),
            url: url.trim_end_matches('/').to_string(),
            username,
            password,
            insecure: insecure.as_deref().is_none_or(parse_flag),
        })
    }

    /// Whether TLS certificates must be verified
    #[must_use]
    pub fn verify_tls(&self) -> bool {
        !self.insecure
    }
}

impl std::fmt::Debug for ControllerSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerSettings")
            .field("controller_type", &self.controller_type)
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("insecure", &self.insecure)
            .finish()
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}
