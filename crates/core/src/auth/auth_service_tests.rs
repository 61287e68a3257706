use std::sync::Arc;

use super::*;
use crate::api::{MessageResponse, VerifyResponse};
use crate::test_support::{memory_cache, MockAdminApi};

fn service(api: Arc<MockAdminApi>) -> (AuthService, crate::cache::CacheService) {
    let (_store, cache) = memory_cache();
    (AuthService::new(api, cache.clone()), cache)
}

#[tokio::test]
async fn send_otp_rejects_bad_mobile_without_calling_backend() {
    let api = Arc::new(MockAdminApi::default());
    let (auth, _) = service(api.clone());

    let err = auth.send_otp("12345").await.unwrap_err();
    assert_eq!(err.user_message(), "Please enter a valid 10-digit mobile number");
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn send_otp_needs_a_message() {
    let api = Arc::new(MockAdminApi::default());
    *api.login_response.lock().unwrap() = MessageResponse {
        status: None,
        message: Some("OTP sent".into()),
    };
    let (auth, _) = service(api.clone());
    assert_eq!(auth.send_otp("9876543210").await.unwrap(), "OTP sent");
    assert_eq!(auth.resend_otp("9876543210").await.unwrap(), "OTP sent");

    *api.login_response.lock().unwrap() = MessageResponse::default();
    let err = auth.send_otp("9876543210").await.unwrap_err();
    assert_eq!(err.user_message(), "Failed to send OTP. Please try again.");
}

#[tokio::test]
async fn verify_persists_session_and_token() {
    let api = Arc::new(MockAdminApi::default());
    *api.verify_response.lock().unwrap() = VerifyResponse {
        access_token: Some("jwt-token".into()),
        token_type: Some("bearer".into()),
        id: Some("42".into()),
        role: Some("admin".into()),
    };
    let (auth, cache) = service(api.clone());

    let session = auth.verify_otp("9876543210", "1234").await.unwrap();
    assert_eq!(session.user.name, "9876543210");
    assert_eq!(session.user.id, "42");
    assert!(session.is_authenticated);

    assert_eq!(cache.session(), Some(session));
    assert!(auth.is_authenticated());
    assert_eq!(auth.user_id(), Some(42));
    assert_eq!(api.token.lock().unwrap().as_deref(), Some("jwt-token"));
}

#[tokio::test]
async fn verify_without_token_is_rejected() {
    let api = Arc::new(MockAdminApi::default());
    let (auth, cache) = service(api);

    let err = auth.verify_otp("9876543210", "0000").await.unwrap_err();
    assert_eq!(
        err.user_message(),
        "Invalid response from server. Please try again."
    );
    assert!(cache.session().is_none());
    assert!(!auth.is_authenticated());
}

#[tokio::test]
async fn logout_clears_session_even_when_backend_fails() {
    let api = Arc::new(MockAdminApi::default());
    *api.verify_response.lock().unwrap() = VerifyResponse {
        access_token: Some("jwt-token".into()),
        id: Some("admin-1".into()),
        ..Default::default()
    };
    let (auth, _) = service(api.clone());
    auth.verify_otp("9876543210", "1234").await.unwrap();
    assert_eq!(auth.user_id(), None);

    *api.fail_with.lock().unwrap() = Some("backend down".into());
    auth.logout().await.unwrap();

    assert!(!auth.is_authenticated());
    assert!(auth.current_user().is_none());
    assert!(api.token.lock().unwrap().is_none());
}

#[tokio::test]
async fn restore_token_uses_cached_session() {
    let api = Arc::new(MockAdminApi::default());
    let (auth, cache) = service(api.clone());
    assert!(!auth.restore_token());

    cache
        .set_session(&AuthSession {
            user: AuthUser {
                id: "7".into(),
                name: "9999999999".into(),
                mobile: "9999999999".into(),
                role: "admin".into(),
                email: None,
            },
            token: "persisted".into(),
            is_authenticated: true,
        })
        .await
        .unwrap();

    assert!(auth.restore_token());
    assert_eq!(api.token.lock().unwrap().as_deref(), Some("persisted"));
}
