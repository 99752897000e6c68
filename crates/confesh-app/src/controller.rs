use crate::{ActionOutcome, EditSession, Notice};

use confesh_client::{IdentitySubscription, WallClient};
use confesh_core::{Confession, Credentials, Identity, WallError, validate_content};

use std::collections::VecDeque;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

const LOAD_FAILED: &str = "Failed to load confessions";
const CREATE_FAILED: &str = "Failed to add confession";
const UPDATE_FAILED: &str = "Failed to update confession";
const DELETE_FAILED: &str = "Failed to delete confession";
const SIGN_IN_FAILED: &str = "Failed to sign in";
const SIGN_UP_FAILED: &str = "Failed to create account";
const SIGN_OUT_FAILED: &str = "Failed to sign out";

/// Owns the wall state and runs user actions against the backend.
///
/// One `busy` flag serializes every mutation: while an action is in flight,
/// further actions are ignored rather than queued. After every successful
/// create, update or delete the whole list is fetched again; nothing is
/// patched locally.
pub struct WallController {
    client: WallClient,

    pub(crate) confessions: Vec<Confession>,
    pub(crate) identity: Option<Identity>,
    pub(crate) draft: String,
    pub(crate) draft_is_anonymous: bool,
    pub(crate) editing: Option<EditSession>,
    pub(crate) pending_delete: Option<String>,
    pub(crate) busy: bool,
    notices: VecDeque<Notice>,

    identity_tx: UnboundedSender<Option<Identity>>,
    identity_rx: UnboundedReceiver<Option<Identity>>,
    subscription: Option<IdentitySubscription>,
}

impl WallController {
    pub fn new(client: WallClient) -> Self {
        let (identity_tx, identity_rx) = unbounded_channel();
        Self {
            client,
            confessions: Vec::new(),
            identity: None,
            draft: String::new(),
            draft_is_anonymous: false,
            editing: None,
            pending_delete: None,
            busy: false,
            notices: VecDeque::new(),
            identity_tx,
            identity_rx,
            subscription: None,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Subscribe to identity transitions and apply the current identity.
    pub async fn start(&mut self) {
        if self.subscription.is_none() {
            let tx = self.identity_tx.clone();
            let subscription = self.client.observe_identity(move |identity: Option<&Identity>| {
                // The receiver lives as long as the controller.
                let _ = tx.send(identity.cloned());
            });
            self.subscription = Some(subscription);
        }

        self.process_identity_events().await;
    }

    /// Stop observing identity transitions.
    pub fn shutdown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.cancel();
            log::debug!("Wall controller stopped observing identity");
        }
    }

    /// Apply every identity transition delivered since the last call.
    ///
    /// Returns the number of transitions applied.
    pub async fn process_identity_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(identity) = self.identity_rx.try_recv() {
            self.apply_identity(identity).await;
            applied += 1;
        }
        applied
    }

    async fn apply_identity(&mut self, identity: Option<Identity>) {
        self.identity = identity;

        if self.identity.is_some() {
            self.busy = true;
            self.reload().await;
            self.busy = false;
        } else {
            self.confessions.clear();
            self.editing = None;
            self.pending_delete = None;
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn confessions(&self) -> &[Confession] {
        &self.confessions
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn draft_is_anonymous(&self) -> bool {
        self.draft_is_anonymous
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// The composer is only offered to a signed-in identity.
    pub fn composer_visible(&self) -> bool {
        self.identity.is_some()
    }

    /// Whether edit/delete controls are shown for `confession`.
    pub fn can_modify(&self, confession: &Confession) -> bool {
        confession.is_owned_by(self.identity.as_ref())
    }

    /// Confession at a 1-based position in the current list.
    pub fn confession_at(&self, position: usize) -> Option<&Confession> {
        position
            .checked_sub(1)
            .and_then(|index| self.confessions.get(index))
    }

    pub fn find(&self, id: &str) -> Option<&Confession> {
        self.confessions
            .iter()
            .find(|c| c.id.as_deref() == Some(id))
    }

    pub fn pending_notices(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notices.pop_front()
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    // =========================================================================
    // Composer
    // =========================================================================

    pub fn set_draft(&mut self, text: impl Into<String>) {
        if !self.busy {
            self.draft = text.into();
        }
    }

    pub fn set_anonymous(&mut self, is_anonymous: bool) {
        if !self.busy {
            self.draft_is_anonymous = is_anonymous;
        }
    }

    pub fn toggle_anonymous(&mut self) {
        self.set_anonymous(!self.draft_is_anonymous);
    }

    /// Post the draft. Empty drafts and signed-out users never reach the backend.
    pub async fn submit_confession(&mut self) -> ActionOutcome {
        if self.busy {
            return ActionOutcome::Ignored;
        }

        if let Err(err) = validate_content(&self.draft) {
            return self.reject(err);
        }

        let Some(identity) = self.identity.clone() else {
            return self.reject(WallError::auth_required("You must be signed in to post"));
        };

        self.busy = true;
        let result = self
            .client
            .create_confession(&self.draft, self.draft_is_anonymous, Some(&identity))
            .await;

        let outcome = match result {
            Ok(()) => {
                self.draft.clear();
                self.draft_is_anonymous = false;
                self.reload().await;
                ActionOutcome::Completed
            }
            Err(err) => self.fail(&err, CREATE_FAILED),
        };
        self.busy = false;
        outcome
    }

    // =========================================================================
    // Edit flow
    // =========================================================================

    /// Open the editor on one of the signed-in identity's confessions.
    pub fn begin_edit(&mut self, id: &str) -> ActionOutcome {
        if self.busy {
            return ActionOutcome::Ignored;
        }

        match self.modifiable(id) {
            Some(confession) => {
                self.editing = Some(EditSession::new(confession));
                ActionOutcome::Completed
            }
            None => ActionOutcome::Ignored,
        }
    }

    pub fn set_edit_content(&mut self, text: impl Into<String>) {
        if self.busy {
            return;
        }
        if let Some(editing) = self.editing.as_mut() {
            editing.content = text.into();
        }
    }

    pub fn cancel_edit(&mut self) -> ActionOutcome {
        if self.busy || self.editing.is_none() {
            return ActionOutcome::Ignored;
        }
        self.editing = None;
        ActionOutcome::Completed
    }

    /// Save the working copy. On failure the editor stays open.
    pub async fn save_edit(&mut self) -> ActionOutcome {
        if self.busy {
            return ActionOutcome::Ignored;
        }

        let Some((id, content)) = self
            .editing
            .as_ref()
            .and_then(|e| e.target_id().map(|id| (id.to_string(), e.content.clone())))
        else {
            return ActionOutcome::Ignored;
        };

        if let Err(err) = validate_content(&content) {
            return self.reject(err);
        }

        self.busy = true;
        let outcome = match self.client.update_confession(&id, &content).await {
            Ok(()) => {
                self.editing = None;
                self.reload().await;
                ActionOutcome::Completed
            }
            Err(err) => self.fail(&err, UPDATE_FAILED),
        };
        self.busy = false;
        outcome
    }

    // =========================================================================
    // Delete flow
    // =========================================================================

    /// Ask for confirmation before deleting one of the identity's confessions.
    pub fn request_delete(&mut self, id: &str) -> ActionOutcome {
        if self.busy {
            return ActionOutcome::Ignored;
        }

        match self.modifiable(id) {
            Some(_) => {
                self.pending_delete = Some(id.to_string());
                ActionOutcome::AwaitingConfirmation
            }
            None => ActionOutcome::Ignored,
        }
    }

    /// Decline the pending delete; nothing is sent to the backend.
    pub fn cancel_delete(&mut self) -> ActionOutcome {
        match self.pending_delete.take() {
            Some(_) => ActionOutcome::Completed,
            None => ActionOutcome::Ignored,
        }
    }

    pub async fn confirm_delete(&mut self) -> ActionOutcome {
        if self.busy {
            return ActionOutcome::Ignored;
        }
        let Some(id) = self.pending_delete.take() else {
            return ActionOutcome::Ignored;
        };

        self.busy = true;
        let outcome = match self.client.delete_confession(&id).await {
            Ok(()) => {
                if self
                    .editing
                    .as_ref()
                    .is_some_and(|e| e.target_id() == Some(id.as_str()))
                {
                    self.editing = None;
                }
                self.reload().await;
                ActionOutcome::Completed
            }
            Err(err) => self.fail(&err, DELETE_FAILED),
        };
        self.busy = false;
        outcome
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Sign in; the wall reloads when the identity transition arrives.
    pub async fn sign_in(&mut self, credentials: &Credentials) -> ActionOutcome {
        if self.busy {
            return ActionOutcome::Ignored;
        }

        self.busy = true;
        let outcome = match self.client.sign_in(credentials).await {
            Ok(_) => ActionOutcome::Completed,
            Err(err) => self.fail(&err, SIGN_IN_FAILED),
        };
        self.busy = false;

        self.process_identity_events().await;
        outcome
    }

    pub async fn sign_up(
        &mut self,
        credentials: &Credentials,
        display_name: Option<&str>,
    ) -> ActionOutcome {
        if self.busy {
            return ActionOutcome::Ignored;
        }

        self.busy = true;
        let outcome = match self.client.sign_up(credentials, display_name).await {
            Ok(_) => ActionOutcome::Completed,
            Err(err) => self.fail(&err, SIGN_UP_FAILED),
        };
        self.busy = false;

        self.process_identity_events().await;
        outcome
    }

    /// Sign out; the wall clears when the identity transition arrives.
    pub async fn sign_out(&mut self) -> ActionOutcome {
        if self.busy {
            return ActionOutcome::Ignored;
        }

        self.busy = true;
        let outcome = match self.client.sign_out().await {
            Ok(()) => ActionOutcome::Completed,
            Err(err) => self.fail(&err, SIGN_OUT_FAILED),
        };
        self.busy = false;

        self.process_identity_events().await;
        outcome
    }

    /// Fetch the list again on request.
    pub async fn refresh(&mut self) -> ActionOutcome {
        if self.busy {
            return ActionOutcome::Ignored;
        }

        self.busy = true;
        let loaded = self.reload().await;
        self.busy = false;

        if loaded {
            ActionOutcome::Completed
        } else {
            ActionOutcome::Failed
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// A listed confession the current identity may edit or delete.
    fn modifiable(&self, id: &str) -> Option<Confession> {
        self.find(id).filter(|c| self.can_modify(c)).cloned()
    }

    /// Replace the list with the backend's; on failure keep the old one.
    async fn reload(&mut self) -> bool {
        match self.client.list_confessions().await {
            Ok(confessions) => {
                log::debug!("Wall reloaded with {} confessions", confessions.len());
                self.confessions = confessions;
                true
            }
            Err(err) => {
                self.fail(&err, LOAD_FAILED);
                false
            }
        }
    }

    /// Refuse an action before it reaches the backend.
    fn reject(&mut self, err: WallError) -> ActionOutcome {
        log::debug!("Action rejected: {err}");
        self.notices
            .push_back(Notice::from_error(&err, err.message().to_string()));
        ActionOutcome::Failed
    }

    fn fail(&mut self, err: &WallError, message: &str) -> ActionOutcome {
        log::warn!("{message}: {err}");
        self.notices.push_back(Notice::from_error(err, message));
        ActionOutcome::Failed
    }
}

impl Drop for WallController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
