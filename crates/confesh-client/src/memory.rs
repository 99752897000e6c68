use crate::{ClientError, ClientResult, DocumentStore, IdentityHub, IdentityProvider, Session};

use confesh_core::{Confession, Credentials, Identity, NewConfession};

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Number of calls each backend operation has received.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackendCalls {
    pub list: usize,
    pub insert: usize,
    pub update: usize,
    pub delete: usize,
    pub sign_in: usize,
    pub sign_out: usize,
}

impl BackendCalls {
    /// Calls that touched the document store.
    pub fn store_total(&self) -> usize {
        self.list + self.insert + self.update + self.delete
    }
}

#[derive(Default)]
struct Counters {
    list: AtomicUsize,
    insert: AtomicUsize,
    update: AtomicUsize,
    delete: AtomicUsize,
    sign_in: AtomicUsize,
    sign_out: AtomicUsize,
}

struct Account {
    password: String,
    identity: Identity,
}

#[derive(Default)]
struct MemoryInner {
    /// Insertion order is the list order.
    documents: Vec<Confession>,
    accounts: HashMap<String, Account>,
}

/// In-process backend with the same access rules as the managed one:
/// writes need a session, and only the author may update or delete.
#[derive(Default)]
pub struct MemoryBackend {
    inner: Mutex<MemoryInner>,
    hub: IdentityHub,
    counters: Counters,
    unavailable: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account that `sign_in` will accept.
    pub fn register_account(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> ClientResult<Identity> {
        let mut inner = self.lock();
        if inner.accounts.contains_key(email) {
            return Err(ClientError::api_error(400, "EMAIL_EXISTS", "EMAIL_EXISTS"));
        }

        let identity = Identity::new(
            Uuid::new_v4().simple().to_string(),
            display_name.map(String::from),
        );
        inner.accounts.insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                identity: identity.clone(),
            },
        );
        Ok(identity)
    }

    /// Put a record straight into the store, bypassing access rules.
    pub fn seed(&self, confession: Confession) -> String {
        let id = confession
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string());
        self.lock().documents.push(Confession {
            id: Some(id.clone()),
            ..confession
        });
        id
    }

    /// Make every store call fail as if the service were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn calls(&self) -> BackendCalls {
        BackendCalls {
            list: self.counters.list.load(Ordering::SeqCst),
            insert: self.counters.insert.load(Ordering::SeqCst),
            update: self.counters.update.load(Ordering::SeqCst),
            delete: self.counters.delete.load(Ordering::SeqCst),
            sign_in: self.counters.sign_in.load(Ordering::SeqCst),
            sign_out: self.counters.sign_out.load(Ordering::SeqCst),
        }
    }

    /// Snapshot of the stored records.
    pub fn documents(&self) -> Vec<Confession> {
        self.lock().documents.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[track_caller]
    fn check_available(&self) -> ClientResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ClientError::api_error(
                503,
                "UNAVAILABLE",
                "The service is currently unavailable.",
            ));
        }
        Ok(())
    }

    #[track_caller]
    fn require_identity(&self) -> ClientResult<Identity> {
        self.hub.current().ok_or_else(|| {
            ClientError::api_error(403, "PERMISSION_DENIED", "Missing or insufficient permissions.")
        })
    }

    #[track_caller]
    fn require_owner(&self, record: &Confession, identity: &Identity) -> ClientResult<()> {
        if record.author_id.as_deref() != Some(identity.id.as_str()) {
            return Err(ClientError::api_error(
                403,
                "PERMISSION_DENIED",
                "Missing or insufficient permissions.",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryBackend {
    async fn list_documents(&self) -> ClientResult<Vec<Confession>> {
        self.counters.list.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.documents())
    }

    async fn insert_document(&self, confession: &NewConfession) -> ClientResult<String> {
        self.counters.insert.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let identity = self.require_identity()?;
        if identity.id != confession.author_id {
            return Err(ClientError::api_error(
                403,
                "PERMISSION_DENIED",
                "Missing or insufficient permissions.",
            ));
        }

        let id = Uuid::new_v4().simple().to_string();
        self.lock()
            .documents
            .push(Confession::from_new(id.clone(), confession.clone()));

        log::info!("Created confession {id}");
        Ok(id)
    }

    async fn update_content(
        &self,
        id: &str,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> ClientResult<()> {
        self.counters.update.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        let identity = self.require_identity()?;

        let mut inner = self.lock();
        let record = inner
            .documents
            .iter_mut()
            .find(|c| c.id.as_deref() == Some(id))
            .ok_or_else(|| {
                ClientError::api_error(404, "NOT_FOUND", format!("No document to update: {id}"))
            })?;

        self.require_owner(record, &identity)?;
        record.content = content.to_string();
        record.updated_at = Some(updated_at);

        log::info!("Updated confession {id}");
        Ok(())
    }

    async fn delete_document(&self, id: &str) -> ClientResult<()> {
        self.counters.delete.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        let identity = self.require_identity()?;

        let mut inner = self.lock();
        let Some(index) = inner
            .documents
            .iter()
            .position(|c| c.id.as_deref() == Some(id))
        else {
            // Deleting a missing document succeeds, like the managed store.
            return Ok(());
        };

        self.require_owner(&inner.documents[index], &identity)?;
        inner.documents.remove(index);

        log::info!("Deleted confession {id}");
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for MemoryBackend {
    async fn sign_in(&self, credentials: &Credentials) -> ClientResult<Identity> {
        self.counters.sign_in.fetch_add(1, Ordering::SeqCst);

        let identity = {
            let inner = self.lock();
            match inner.accounts.get(&credentials.email) {
                Some(account) if account.password == credentials.password => {
                    account.identity.clone()
                }
                _ => {
                    return Err(ClientError::api_error(
                        400,
                        "INVALID_LOGIN_CREDENTIALS",
                        "INVALID_LOGIN_CREDENTIALS",
                    ));
                }
            }
        };

        let token = Uuid::new_v4().simple().to_string();
        self.hub.set_session(Some(Session::new(identity.clone(), token)));
        Ok(identity)
    }

    async fn sign_up(
        &self,
        credentials: &Credentials,
        display_name: Option<&str>,
    ) -> ClientResult<Identity> {
        self.register_account(&credentials.email, &credentials.password, display_name)?;
        self.sign_in(credentials).await
    }

    async fn sign_out(&self) -> ClientResult<()> {
        self.counters.sign_out.fetch_add(1, Ordering::SeqCst);
        self.hub.set_session(None);
        Ok(())
    }

    fn identity_hub(&self) -> &IdentityHub {
        &self.hub
    }
}
