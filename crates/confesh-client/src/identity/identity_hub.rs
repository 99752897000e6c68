use crate::{IdentitySubscription, Session};

use confesh_core::Identity;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Callback invoked with the current identity on every transition.
pub type IdentityListener = Box<dyn Fn(Option<&Identity>) + Send + Sync>;

type SharedListener = Arc<dyn Fn(Option<&Identity>) + Send + Sync>;

/// Holds the current session and the listeners observing it.
#[derive(Clone, Default)]
pub struct IdentityHub {
    inner: Arc<Mutex<HubInner>>,
}

#[derive(Default)]
pub(crate) struct HubInner {
    session: Option<Session>,
    listeners: HashMap<u64, SharedListener>,
    next_listener_id: u64,
}

impl HubInner {
    pub(crate) fn remove_listener(&mut self, id: u64) -> bool {
        self.listeners.remove(&id).is_some()
    }
}

impl IdentityHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Identity> {
        self.lock().session.as_ref().map(|s| s.identity.clone())
    }

    pub fn session(&self) -> Option<Session> {
        self.lock().session.clone()
    }

    /// Replace the session and notify every listener.
    ///
    /// Listeners run after the lock is released, so they may call back
    /// into the hub.
    pub fn set_session(&self, session: Option<Session>) {
        let (identity, listeners) = {
            let mut inner = self.lock();
            inner.session = session;
            let identity = inner.session.as_ref().map(|s| s.identity.clone());
            let listeners: Vec<SharedListener> = inner.listeners.values().cloned().collect();
            (identity, listeners)
        };

        match &identity {
            Some(identity) => log::info!("Identity signed in: {}", identity.id),
            None => log::info!("Identity signed out"),
        }

        for listener in listeners {
            listener(identity.as_ref());
        }
    }

    /// Register a listener; it is called once right away with the current
    /// identity, then on every sign-in and sign-out.
    pub fn subscribe(&self, listener: IdentityListener) -> IdentitySubscription {
        let listener: SharedListener = Arc::from(listener);

        let (id, identity) = {
            let mut inner = self.lock();
            let id = inner.next_listener_id;
            inner.next_listener_id += 1;
            inner.listeners.insert(id, Arc::clone(&listener));
            (id, inner.session.as_ref().map(|s| s.identity.clone()))
        };

        log::debug!("Identity listener {id} registered");
        listener(identity.as_ref());

        IdentitySubscription::new(id, Arc::downgrade(&self.inner))
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    fn lock(&self) -> MutexGuard<'_, HubInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
