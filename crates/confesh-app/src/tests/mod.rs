mod controller;

use crate::WallController;

use confesh_client::{MemoryBackend, WallClient};
use confesh_core::{Confession, Credentials, Identity};

use std::sync::Arc;

use chrono::Utc;

pub(crate) const EMAIL: &str = "maria@hcdc.edu.ph";
pub(crate) const PASSWORD: &str = "correct horse";

/// A started controller over an in-memory backend with one registered account.
pub(crate) async fn started() -> (Arc<MemoryBackend>, WallController) {
    let backend = Arc::new(MemoryBackend::new());
    backend
        .register_account(EMAIL, PASSWORD, Some("Maria"))
        .unwrap();

    let mut controller = WallController::new(WallClient::new(backend.clone()));
    controller.start().await;
    (backend, controller)
}

/// Same as [`started`], signed in as the registered account.
pub(crate) async fn signed_in() -> (Arc<MemoryBackend>, WallController, Identity) {
    let (backend, mut controller) = started().await;
    controller
        .sign_in(&Credentials::new(EMAIL, PASSWORD))
        .await;
    let identity = controller.identity().cloned().unwrap();
    (backend, controller, identity)
}

pub(crate) fn confession_by(author_id: &str, content: &str) -> Confession {
    Confession {
        id: None,
        content: content.to_string(),
        created_at: Utc::now(),
        updated_at: None,
        is_anonymous: false,
        author: "Someone".to_string(),
        author_id: Some(author_id.to_string()),
    }
}
