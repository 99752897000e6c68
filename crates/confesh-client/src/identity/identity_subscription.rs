use crate::identity::identity_hub::HubInner;

use std::sync::{Mutex, PoisonError, Weak};

/// Handle for a registered identity listener.
///
/// Dropping the handle deregisters the listener.
#[must_use = "dropping the subscription stops identity notifications"]
pub struct IdentitySubscription {
    id: u64,
    hub: Weak<Mutex<HubInner>>,
}

impl IdentitySubscription {
    pub(crate) fn new(id: u64, hub: Weak<Mutex<HubInner>>) -> Self {
        Self { id, hub }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Stop receiving identity transitions.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for IdentitySubscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            let removed = hub
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove_listener(self.id);
            if removed {
                log::debug!("Identity listener {} removed", self.id);
            }
        }
    }
}

impl std::fmt::Debug for IdentitySubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentitySubscription")
            .field("id", &self.id)
            .finish()
    }
}
