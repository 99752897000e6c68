
use confesh_app::WallController;
use confesh_client::{MemoryBackend, WallClient};

use std::sync::Arc;

pub(crate) const TITLE: &str = "HCDC CONFESH WALL";
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

pub(crate) fn output(out: Vec<u8>) -> String {
    String::from_utf8(out).unwrap()
}
