use crate::{ClientResult, IdentityHub, IdentityListener, IdentitySubscription, Session};

use confesh_core::{Confession, Credentials, Identity, NewConfession};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Raw access to the confession collection.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every record, in the order the store returns them.
    async fn list_documents(&self) -> ClientResult<Vec<Confession>>;

    /// Insert a record and return the id the store assigned.
    async fn insert_document(&self, confession: &NewConfession) -> ClientResult<String>;

    /// Replace `content` (and stamp `updated_at`) on an existing record.
    async fn update_content(
        &self,
        id: &str,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> ClientResult<()>;

    async fn delete_document(&self, id: &str) -> ClientResult<()>;
}

/// The external identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, credentials: &Credentials) -> ClientResult<Identity>;

    async fn sign_up(
        &self,
        credentials: &Credentials,
        display_name: Option<&str>,
    ) -> ClientResult<Identity>;

    async fn sign_out(&self) -> ClientResult<()>;

    /// Session state and listeners shared with subscription handles.
    fn identity_hub(&self) -> &IdentityHub;

    fn current_identity(&self) -> Option<Identity> {
        self.identity_hub().current()
    }

    fn observe_identity(&self, listener: IdentityListener) -> IdentitySubscription {
        self.identity_hub().subscribe(listener)
    }

    fn session(&self) -> Option<Session> {
        self.identity_hub().session()
    }

    /// Re-establish a session saved by an earlier run.
    fn restore_session(&self, session: Session) {
        self.identity_hub().set_session(Some(session));
    }
}

/// A document store and identity provider pair.
pub trait Backend: DocumentStore + IdentityProvider {}

impl<T: DocumentStore + IdentityProvider> Backend for T {}
