use crate::{Backend, ClientError, IdentitySubscription, Session};

use confesh_core::{
    Confession, Credentials, Identity, NewConfession, Result as WallResult, WallError,
    validate_content,
};

use std::sync::Arc;

use chrono::Utc;

/// The operations the wall needs from its backend, with input checks and
/// failures folded into [`WallError`].
#[derive(Clone)]
pub struct WallClient {
    backend: Arc<dyn Backend>,
}

impl WallClient {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    // =========================================================================
    // Confession Operations
    // =========================================================================

    /// All confessions, in backend order.
    pub async fn list_confessions(&self) -> WallResult<Vec<Confession>> {
        self.backend
            .list_documents()
            .await
            .map_err(|e| unavailable("list confessions", e))
    }

    /// Post a confession as `identity`.
    ///
    /// Empty content and a missing identity are rejected before any backend call.
    pub async fn create_confession(
        &self,
        content: &str,
        is_anonymous: bool,
        identity: Option<&Identity>,
    ) -> WallResult<()> {
        validate_content(content)?;
        let identity =
            identity.ok_or_else(|| WallError::auth_required("You must be signed in to post"))?;

        let new = NewConfession::new(content.to_string(), is_anonymous, identity)?;
        self.backend
            .insert_document(&new)
            .await
            .map_err(|e| unavailable("create confession", e))?;
        Ok(())
    }

    /// Replace the content of an existing confession.
    ///
    /// A missing record is reported the same way as any other backend failure.
    pub async fn update_confession(&self, id: &str, content: &str) -> WallResult<()> {
        validate_content(content)?;
        self.backend
            .update_content(id, content, Utc::now())
            .await
            .map_err(|e| unavailable("update confession", e))
    }

    /// Delete a confession. Deleting one that is already gone succeeds.
    pub async fn delete_confession(&self, id: &str) -> WallResult<()> {
        match self.backend.delete_document(id).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_not_found() => {
                log::debug!("Confession {id} already deleted");
                Ok(())
            }
            Err(e) => Err(unavailable("delete confession", e)),
        }
    }

    // =========================================================================
    // Identity Operations
    // =========================================================================

    pub async fn sign_in(&self, credentials: &Credentials) -> WallResult<Identity> {
        self.backend.sign_in(credentials).await.map_err(|e| {
            log::warn!("Sign-in failed for {}: {e}", credentials.email);
            WallError::auth(auth_message(&e))
        })
    }

    pub async fn sign_up(
        &self,
        credentials: &Credentials,
        display_name: Option<&str>,
    ) -> WallResult<Identity> {
        self.backend
            .sign_up(credentials, display_name)
            .await
            .map_err(|e| {
                log::warn!("Sign-up failed for {}: {e}", credentials.email);
                WallError::auth(auth_message(&e))
            })
    }

    pub async fn sign_out(&self) -> WallResult<()> {
        self.backend
            .sign_out()
            .await
            .map_err(|e| unavailable("sign out", e))
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.backend.current_identity()
    }

    /// Observe identity transitions; `listener` runs once immediately.
    pub fn observe_identity<F>(&self, listener: F) -> IdentitySubscription
    where
        F: Fn(Option<&Identity>) + Send + Sync + 'static,
    {
        self.backend.observe_identity(Box::new(listener))
    }

    pub fn session(&self) -> Option<Session> {
        self.backend.session()
    }

    pub fn restore_session(&self, session: Session) {
        self.backend.restore_session(session);
    }
}

#[track_caller]
fn unavailable(operation: &str, err: ClientError) -> WallError {
    log::error!("Failed to {operation}: {err}");
    WallError::backend_unavailable(format!("Failed to {operation}"))
}

/// Provider error code when there is one, otherwise a generic reason.
fn auth_message(err: &ClientError) -> String {
    match err {
        ClientError::Api { code, .. } => code.clone(),
        _ => "identity provider unreachable".to_string(),
    }
}
