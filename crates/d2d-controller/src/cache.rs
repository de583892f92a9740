//! Token cache
//!
//! One token per `(controller_type, url)` pair, reused until it expires.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use crate::auth::{AuthData, TokenTransport, authenticate};
use crate::error::Result;
use crate::settings::ControllerSettings;

type CacheKey = (String, String);

#[derive(Debug, Clone)]
struct CachedToken {
    auth: AuthData,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Process-wide token cache
///
/// The lock is held across authentication so concurrent callers for the same
/// controller share a single login.
#[derive(Debug, Default)]
pub struct TokenCache {
    entries: Mutex<HashMap<CacheKey, CachedToken>>,
}

impl TokenCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached token for `settings`, authenticating when absent or expired
    ///
    /// # Errors
    /// Propagates the error from [`authenticate`]; nothing is cached then.
    pub async fn get_or_authenticate<T: TokenTransport + ?Sized>(
        &self,
        transport: &T,
        settings: &ControllerSettings,
    ) -> Result<AuthData> {
        let key = (settings.controller_type.clone(), settings.url.clone());
        let mut entries = self.entries.lock().await;

        if let Some(cached) = entries.get(&key)
            && cached.is_valid_at(Utc::now())
        {
            debug!(controller = %key.0, url = %key.1, "using cached token");
            return Ok(cached.auth.clone());
        }

        let (auth, lifetime) = authenticate(transport, settings).await?;
        let expires_at = i64::try_from(lifetime)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        entries.insert(key, CachedToken {
            auth: auth.clone(),
            expires_at,
        });
        Ok(auth)
    }

    /// Drop the token for `settings`, forcing the next call to log in again
    pub async fn invalidate(&self, settings: &ControllerSettings) -> bool {
        self.entries
            .lock()
            .await
            .remove(&(settings.controller_type.clone(), settings.url.clone()))
            .is_some()
    }

    /// Number of cached tokens, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Check if nothing is cached
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::auth::TokenResponse;
    use crate::error::AuthError;

    /// Issues `token-N` on every call
    #[derive(Default)]
    struct CountingTransport {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl TokenTransport for CountingTransport {
        async fn post_token(
            &self,
            _url: &str,
            _username: &str,
            _password: &str,
            _verify_tls: bool,
        ) -> Result<TokenResponse> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail {
                return Err(AuthError::Transport("unreachable".to_string()));
            }
            Ok(TokenResponse {
                status: 200,
                body: json!({ "Token": format!("token-{n}") }),
            })
        }
    }

    fn settings(url: &str) -> ControllerSettings {
        ControllerSettings {
            controller_type: "CC".to_string(),
            url: url.to_string(),
            username: "admin".to_string(),
            password: "secret".to_string(),
            insecure: true,
        }
    }

    #[tokio::test]
    async fn test_token_reused() {
        let cache = TokenCache::new();
        let transport = CountingTransport::default();
        let cc = settings("https://cc1.example.com");

        let first = cache.get_or_authenticate(&transport, &cc).await.unwrap();
        let second = cache.get_or_authenticate(&transport, &cc).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_keyed_by_url() {
        let cache = TokenCache::new();
        let transport = CountingTransport::default();

        let a = cache
            .get_or_authenticate(&transport, &settings("https://cc1.example.com"))
            .await
            .unwrap();
        let b = cache
            .get_or_authenticate(&transport, &settings("https://cc2.example.com"))
            .await
            .unwrap();

        assert_ne!(a, b);
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_login() {
        let cache = TokenCache::new();
        let transport = CountingTransport::default();
        let cc = settings("https://cc1.example.com");

        cache.get_or_authenticate(&transport, &cc).await.unwrap();
        assert!(cache.invalidate(&cc).await);
        assert!(!cache.invalidate(&cc).await);

        let auth = cache.get_or_authenticate(&transport, &cc).await.unwrap();
        assert_eq!(auth.token, "token-2");
    }

    #[tokio::test]
    async fn test_expired_entry_refreshed() {
        let cache = TokenCache::new();
        let transport = CountingTransport::default();
        let cc = settings("https://cc1.example.com");

        cache.entries.lock().await.insert(
            (cc.controller_type.clone(), cc.url.clone()),
            CachedToken {
                auth: AuthData {
                    token: "stale".to_string(),
                },
                expires_at: Utc::now() - Duration::seconds(1),
            },
        );

        let auth = cache.get_or_authenticate(&transport, &cc).await.unwrap();
        assert_eq!(auth.token, "token-1");
    }

    #[tokio::test]
    async fn test_failure_not_cached() {
        let cache = TokenCache::new();
        let transport = CountingTransport {
            fail: true,
            ..Default::default()
        };

        let err = cache
            .get_or_authenticate(&transport, &settings("https://cc1.example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::AllEndpointsFailed { .. }));
        assert!(cache.is_empty().await);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
    }
}
