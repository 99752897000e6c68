//! confesh-client
//!
//! Thin shim between the wall and its managed backend: a document store
//! holding confessions and an identity provider holding the session.

pub(crate) mod backend;
pub(crate) mod error;
pub(crate) mod firebase;
pub(crate) mod identity;
pub(crate) mod memory;
pub(crate) mod wall_client;

#[cfg(test)]
mod tests;

pub use backend::{Backend, DocumentStore, IdentityProvider};
pub use error::{ClientError, Result as ClientResult};
pub use firebase::FirebaseBackend;
pub use identity::{IdentityHub, IdentityListener, IdentitySubscription, Session};
pub use memory::{BackendCalls, MemoryBackend};
pub use wall_client::WallClient;

use confesh_config::{BackendConfig, BackendKind};

use std::sync::Arc;

/// Build the backend selected by configuration.
///
/// Call `validate()` on the config first; this only wires things up.
pub fn connect(config: &BackendConfig) -> Arc<dyn Backend> {
    match config.kind {
        BackendKind::Firebase => Arc::new(FirebaseBackend::new(config)),
        BackendKind::Memory => Arc::new(MemoryBackend::new()),
    }
}
