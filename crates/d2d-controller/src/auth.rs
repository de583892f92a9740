//! Catalyst Center token authentication
//!
//! Endpoints are tried in order: the modern path first, then the legacy path
//! kept by older controller releases. The first response carrying a `Token`
//! wins.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{AuthError, Result};
use crate::settings::ControllerSettings;

/// Token endpoints, modern first
pub const CATALYST_CENTER_AUTH_ENDPOINTS: [&str; 2] =
    ["/api/system/v1/auth/token", "/dna/system/api/v1/auth/token"];

/// Lifetime assumed for a Catalyst Center token
pub const CATALYST_CENTER_TOKEN_LIFETIME_SECONDS: u64 = 3600;

/// Authentication result handed to API clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthData {
    /// Bearer token for the `X-Auth-Token` header
    pub token: String,
}

/// Raw reply to a token request
#[derive(Debug, Clone, PartialEq)]
pub struct TokenResponse {
    /// HTTP status code
    pub status: u16,
    /// Decoded JSON body, `Value::Null` when the body was not JSON
    pub body: Value,
}

impl TokenResponse {
    /// Check for a 2xx status
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Non-empty `Token` string in the body
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.body
            .get("Token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
    }
}

/// Performs one HTTP token request
///
/// Implementations send a basic-auth POST to `url` and return the status and
/// decoded body. Connection failures are reported as [`AuthError::Transport`].
#[async_trait]
pub trait TokenTransport: Send + Sync {
    /// POST to a token endpoint
    async fn post_token(
        &self,
        url: &str,
        username: &str,
        password: &str,
        verify_tls: bool,
    ) -> Result<TokenResponse>;
}

/// Obtain a Catalyst Center token, trying each endpoint in turn
///
/// Returns the token and its lifetime in seconds.
///
/// # Errors
/// Returns [`AuthError::AllEndpointsFailed`] with one entry per endpoint when
/// none of them yields a token.
pub async fn authenticate<T: TokenTransport + ?Sized>(
    transport: &T,
    settings: &ControllerSettings,
) -> Result<(AuthData, u64)> {
    let mut attempts = Vec::with_capacity(CATALYST_CENTER_AUTH_ENDPOINTS.len());

    for endpoint in CATALYST_CENTER_AUTH_ENDPOINTS {
        let url = format!("{}{endpoint}", settings.url);
        debug!(url = %url, "requesting controller token");

        let response = match transport
            .post_token(
                &url,
                &settings.username,
                &settings.password,
                settings.verify_tls(),
            )
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(endpoint, error = %e, "token request failed");
                attempts.push(format!("{endpoint}: {e}"));
                continue;
            }
        };

        if !response.is_success() {
            warn!(endpoint, status = response.status, "token endpoint rejected request");
            attempts.push(format!("{endpoint}: HTTP {}", response.status));
            continue;
        }

        match response.token() {
            Some(token) => {
                info!(endpoint, "authenticated with {}", settings.controller_type);
                return Ok((
                    AuthData {
                        token: token.to_string(),
                    },
                    CATALYST_CENTER_TOKEN_LIFETIME_SECONDS,
                ));
            }
            None => {
                warn!(endpoint, "token response has no Token field");
                attempts.push(format!("{endpoint}: no token in response"));
            }
        }
    }

    Err(AuthError::AllEndpointsFailed { attempts })
}
