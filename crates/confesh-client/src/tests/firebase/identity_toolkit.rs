use crate::firebase::identity_toolkit::{AuthResponse, PasswordRequest};

use chrono::Utc;
use serde_json::json;

#[test]
fn test_password_request_uses_camel_case() {
    let body = serde_json::to_value(PasswordRequest {
        email: "a@b.c",
        password: "pw",
        return_secure_token: true,
    })
    .unwrap();

    assert_eq!(
        body,
        json!({ "email": "a@b.c", "password": "pw", "returnSecureToken": true })
    );
}

#[test]
fn test_auth_response_into_session() {
    let response: AuthResponse = serde_json::from_value(json!({
        "kind": "identitytoolkit#VerifyPasswordResponse",
        "localId": "uid-1",
        "email": "a@b.c",
        "displayName": "Maria",
        "idToken": "id-token",
        "registered": true,
        "refreshToken": "refresh-token",
        "expiresIn": "3600"
    }))
    .unwrap();

    let before = Utc::now();
    let session = response.into_session();

    assert_eq!(session.identity.id, "uid-1");
    assert_eq!(session.identity.display_name.as_deref(), Some("Maria"));
    assert_eq!(session.id_token, "id-token");
    assert_eq!(session.refresh_token.as_deref(), Some("refresh-token"));
    let expires_at = session.expires_at.unwrap();
    assert!(expires_at > before + chrono::Duration::seconds(3500));
    assert!(!session.is_expired(Utc::now()));
}

#[test]
fn test_auth_response_empty_display_name_is_none() {
    let response: AuthResponse = serde_json::from_value(json!({
        "localId": "uid-2",
        "idToken": "t",
        "displayName": ""
    }))
    .unwrap();

    let session = response.into_session();
    assert!(session.identity.display_name.is_none());
    assert!(session.expires_at.is_none());
}
