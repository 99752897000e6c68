//! Request and response bodies of the Identity Toolkit `accounts:*` endpoints.

use crate::Session;

use confesh_core::Identity;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PasswordRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateProfileRequest<'a> {
    pub id_token: &'a str,
    pub display_name: &'a str,
    pub return_secure_token: bool,
}

/// Shared shape of `signInWithPassword` and `signUp` responses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthResponse {
    pub local_id: String,
    pub id_token: String,
    pub refresh_token: Option<String>,
    pub display_name: Option<String>,
    /// Token lifetime in seconds, sent as a string
    pub expires_in: Option<String>,
}

impl AuthResponse {
    pub fn into_session(self) -> Session {
        let display_name = self.display_name.filter(|n| !n.is_empty());
        let expires_at = self
            .expires_in
            .as_deref()
            .and_then(|secs| secs.parse::<i64>().ok())
            .map(|secs| Utc::now() + Duration::seconds(secs));

        Session {
            identity: Identity::new(self.local_id, display_name),
            id_token: self.id_token,
            refresh_token: self.refresh_token,
            expires_at,
        }
    }
}
