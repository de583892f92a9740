//! End-to-end controller login against an in-memory transport

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use d2d_controller::{
    AuthError, ControllerSettings, TokenCache, TokenResponse, TokenTransport, authenticate,
};
use serde_json::json;

/// Legacy-only controller that records what it was asked
#[derive(Default)]
struct LegacyController {
    requests: Mutex<Vec<(String, String, bool)>>,
}

#[async_trait]
impl TokenTransport for LegacyController {
    async fn post_token(
        &self,
        url: &str,
        username: &str,
        _password: &str,
        verify_tls: bool,
    ) -> d2d_controller::Result<TokenResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), username.to_string(), verify_tls));

        if url.ends_with("/dna/system/api/v1/auth/token") {
            Ok(TokenResponse {
                status: 200,
                body: json!({"Token": "legacy-token"}),
            })
        } else {
            Ok(TokenResponse {
                status: 404,
                body: serde_json::Value::Null,
            })
        }
    }
}

fn environment(insecure: &str) -> HashMap<String, String> {
    HashMap::from([
        ("CC_URL".to_string(), "https://10.0.0.10/".to_string()),
        ("CC_USERNAME".to_string(), "admin".to_string()),
        ("CC_PASSWORD".to_string(), "secret".to_string()),
        ("CC_INSECURE".to_string(), insecure.to_string()),
    ])
}

#[tokio::test]
async fn test_login_from_environment() {
    let settings = ControllerSettings::from_env(&environment("false"), "CC").unwrap();
    let controller = LegacyController::default();

    let (auth, lifetime) = authenticate(&controller, &settings).await.unwrap();

    assert_eq!(auth.token, "legacy-token");
    assert_eq!(lifetime, 3600);

    let requests = controller.requests.lock().unwrap().clone();
    assert_eq!(requests, [
        (
            "https://10.0.0.10/api/system/v1/auth/token".to_string(),
            "admin".to_string(),
            true
        ),
        (
            "https://10.0.0.10/dna/system/api/v1/auth/token".to_string(),
            "admin".to_string(),
            true
        ),
    ]);
}

#[tokio::test]
async fn test_cache_shares_login_across_tasks() {
    let settings = ControllerSettings::from_env(&environment("yes"), "CC").unwrap();
    let controller = std::sync::Arc::new(LegacyController::default());
    let cache = std::sync::Arc::new(TokenCache::new());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cache = cache.clone();
            let controller = controller.clone();
            let settings = settings.clone();
            tokio::spawn(async move {
                cache
                    .get_or_authenticate(controller.as_ref(), &settings)
                    .await
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap().token, "legacy-token");
    }

    // one login, two endpoint attempts
    assert_eq!(controller.requests.lock().unwrap().len(), 2);
}

#[test]
fn test_missing_settings() {
    let err = ControllerSettings::from_env(&HashMap::<String, String>::new(), "CC").unwrap_err();

    assert_eq!(
        err,
        AuthError::MissingSettings(vec![
            "CC_URL".to_string(),
            "CC_USERNAME".to_string(),
            "CC_PASSWORD".to_string(),
        ])
    );
}
