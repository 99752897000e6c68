use crate::tests::{EMAIL, PASSWORD, confession_by, signed_in, started};
use crate::{ActionOutcome, WallController};

use confesh_client::{IdentityProvider, MemoryBackend, WallClient};
use confesh_core::Credentials;

use std::sync::Arc;

use googletest::prelude::*;

// =========================================================================
// Identity transitions
// =========================================================================

#[tokio::test]
async fn given_signed_out_when_started_then_nothing_loaded() {
    let (backend, controller) = started().await;

    assert_that!(controller.identity(), none());
    assert!(controller.confessions().is_empty());
    assert!(!controller.composer_visible());
    assert_that!(backend.calls().list, eq(0));
}

#[tokio::test]
async fn given_restored_session_when_started_then_list_loaded() {
    let backend = Arc::new(MemoryBackend::new());
    let identity = backend.register_account(EMAIL, PASSWORD, None).unwrap();
    backend.seed(confession_by(&identity.id, "already here"));
    let client = WallClient::new(backend.clone());
    client.sign_in(&Credentials::new(EMAIL, PASSWORD)).await.unwrap();

    let mut controller = WallController::new(client);
    controller.start().await;

    assert_that!(controller.identity(), some(eq(&identity)));
    assert_that!(controller.confessions().len(), eq(1));
}

#[tokio::test]
async fn given_sign_in_when_completed_then_list_loaded_from_backend() {
    let (backend, mut controller) = started().await;
    backend.seed(confession_by("someone", "hello wall"));

    let outcome = controller.sign_in(&Credentials::new(EMAIL, PASSWORD)).await;

    assert_that!(outcome, eq(ActionOutcome::Completed));
    assert!(controller.composer_visible());
    assert_that!(controller.confessions().len(), eq(1));
    assert!(!controller.is_busy());
}

#[tokio::test]
async fn given_bad_password_when_sign_in_then_auth_notice_and_still_signed_out() {
    let (backend, mut controller) = started().await;

    let outcome = controller.sign_in(&Credentials::new(EMAIL, "nope")).await;

    assert_that!(outcome, eq(ActionOutcome::Failed));
    assert_that!(controller.identity(), none());
    let notice = controller.take_notice().unwrap();
    assert_that!(notice.message.as_str(), eq("Failed to sign in"));
    assert_that!(notice.kind, some(eq("AUTH_ERROR")));
    assert_that!(backend.calls().list, eq(0));
}

#[tokio::test]
async fn given_signed_in_when_sign_out_then_list_cleared_and_composer_hidden() {
    let (backend, mut controller, identity) = signed_in().await;
    let id = backend.seed(confession_by(&identity.id, "mine"));
    controller.refresh().await;
    controller.begin_edit(&id);

    let outcome = controller.sign_out().await;

    assert_that!(outcome, eq(ActionOutcome::Completed));
    assert!(controller.confessions().is_empty());
    assert!(!controller.composer_visible());
    assert_that!(controller.editing(), none());
    assert_that!(backend.documents().len(), eq(1));
}

#[tokio::test]
async fn given_sign_out_then_sign_in_then_list_reflects_current_backend_state() {
    let (backend, mut controller, identity) = signed_in().await;
    controller.sign_out().await;
    backend.seed(confession_by(&identity.id, "posted while away"));
    backend.seed(confession_by("other", "someone else"));

    controller.sign_in(&Credentials::new(EMAIL, PASSWORD)).await;

    let contents: Vec<&str> = controller
        .confessions()
        .iter()
        .map(|c| c.content.as_str())
        .collect();
    assert_that!(contents, eq(&vec!["posted while away", "someone else"]));
}

#[tokio::test]
async fn given_shutdown_when_identity_changes_then_controller_not_notified() {
    let (backend, mut controller) = started().await;
    controller.shutdown();

    let client = WallClient::new(backend.clone());
    client.sign_in(&Credentials::new(EMAIL, PASSWORD)).await.unwrap();

    assert_that!(controller.process_identity_events().await, eq(0));
    assert_that!(controller.identity(), none());
    assert_that!(backend.identity_hub().listener_count(), eq(0));
}

#[tokio::test]
async fn given_load_failure_on_sign_in_then_notice_and_empty_list() {
    let (backend, mut controller) = started().await;
    backend.set_unavailable(true);

    controller.sign_in(&Credentials::new(EMAIL, PASSWORD)).await;

    assert!(controller.identity().is_some());
    assert!(controller.confessions().is_empty());
    assert_that!(
        controller.take_notice().map(|n| n.message),
        some(eq("Failed to load confessions"))
    );
}

// =========================================================================
// Create
// =========================================================================

#[tokio::test]
async fn given_draft_when_submitted_then_one_new_record_owned_by_identity() {
    let (backend, mut controller, identity) = signed_in().await;
    let lists_before = backend.calls().list;

    controller.set_draft("I still sleep with a night light");
    let outcome = controller.submit_confession().await;

    assert_that!(outcome, eq(ActionOutcome::Completed));
    assert_that!(controller.confessions().len(), eq(1));
    let posted = &controller.confessions()[0];
    assert_that!(posted.author_id.as_deref(), some(eq(identity.id.as_str())));
    assert_that!(posted.author.as_str(), eq("Maria"));
    assert_that!(backend.calls().insert, eq(1));
    assert_that!(backend.calls().list, eq(lists_before + 1));
    assert_that!(controller.draft(), eq(""));
    assert!(!controller.draft_is_anonymous());
}

#[tokio::test]
async fn given_anonymous_draft_when_submitted_then_author_hidden() {
    let (_backend, mut controller, identity) = signed_in().await;

    controller.set_draft("it was me");
    controller.toggle_anonymous();
    controller.submit_confession().await;

    let posted = &controller.confessions()[0];
    assert!(posted.is_anonymous);
    assert_that!(posted.display_author(), eq("Anonymous"));
    assert_that!(posted.author_id.as_deref(), some(eq(identity.id.as_str())));
    assert!(controller.can_modify(posted));
}

#[tokio::test]
async fn given_whitespace_draft_when_submitted_then_validation_notice_and_no_backend_calls() {
    let (backend, mut controller, _identity) = signed_in().await;
    let calls_before = backend.calls();

    controller.set_draft("   \n\t");
    let outcome = controller.submit_confession().await;

    assert_that!(outcome, eq(ActionOutcome::Failed));
    assert_that!(backend.calls(), eq(calls_before));
    let notice = controller.take_notice().unwrap();
    assert_that!(notice.kind, some(eq("VALIDATION_ERROR")));
    assert_that!(notice.message.as_str(), eq("Confession cannot be empty"));
    assert_that!(controller.draft(), eq("   \n\t"));
}

#[tokio::test]
async fn given_signed_out_when_submitted_then_auth_required_notice_and_no_backend_calls() {
    let (backend, mut controller) = started().await;

    controller.set_draft("let me in");
    let outcome = controller.submit_confession().await;

    assert_that!(outcome, eq(ActionOutcome::Failed));
    assert_that!(backend.calls().store_total(), eq(0));
    let notice = controller.take_notice().unwrap();
    assert_that!(notice.kind, some(eq("AUTH_REQUIRED")));
    assert_that!(notice.message.as_str(), eq("You must be signed in to post"));
}

#[tokio::test]
async fn given_backend_down_when_submitted_then_notice_and_state_unchanged() {
    let (backend, mut controller, _identity) = signed_in().await;
    backend.set_unavailable(true);

    controller.set_draft("keep me");
    let outcome = controller.submit_confession().await;

    assert_that!(outcome, eq(ActionOutcome::Failed));
    assert!(!controller.is_busy());
    assert!(controller.confessions().is_empty());
    assert_that!(controller.draft(), eq("keep me"));
    assert_that!(
        controller.take_notice().map(|n| n.message),
        some(eq("Failed to add confession"))
    );
}

#[tokio::test]
async fn given_busy_when_submitted_then_ignored_without_backend_calls() {
    let (backend, mut controller, _identity) = signed_in().await;
    controller.set_draft("second post");
    let calls_before = backend.calls();
    controller.busy = true;

    let outcome = controller.submit_confession().await;

    assert_that!(outcome, eq(ActionOutcome::Ignored));
    assert_that!(backend.calls(), eq(calls_before));
    assert_that!(controller.take_notice(), none());
}

// =========================================================================
// Edit
// =========================================================================

#[tokio::test]
async fn given_owned_record_when_edited_then_same_id_new_content_other_fields_unchanged() {
    let (backend, mut controller, identity) = signed_in().await;
    let id = backend.seed(confession_by(&identity.id, "before"));
    controller.refresh().await;
    let original = controller.find(&id).cloned().unwrap();

    assert_that!(controller.begin_edit(&id), eq(ActionOutcome::Completed));
    controller.set_edit_content("after");
    let outcome = controller.save_edit().await;

    assert_that!(outcome, eq(ActionOutcome::Completed));
    assert_that!(controller.editing(), none());
    let edited = controller.find(&id).unwrap();
    assert_that!(edited.content.as_str(), eq("after"));
    assert_that!(edited.created_at, eq(original.created_at));
    assert_that!(edited.author.as_str(), eq(original.author.as_str()));
    assert_that!(edited.author_id, eq(&original.author_id));
    assert_that!(edited.is_anonymous, eq(original.is_anonymous));
    assert!(edited.updated_at.is_some());
    assert_that!(controller.confessions().len(), eq(1));
}

#[tokio::test]
async fn given_record_of_other_identity_when_begin_edit_then_ignored() {
    let (backend, mut controller, _identity) = signed_in().await;
    let id = backend.seed(confession_by("someone-else", "not yours"));
    controller.refresh().await;

    assert_that!(controller.begin_edit(&id), eq(ActionOutcome::Ignored));
    assert_that!(controller.request_delete(&id), eq(ActionOutcome::Ignored));
    assert_that!(controller.editing(), none());
}

#[tokio::test]
async fn given_emptied_edit_when_saved_then_validation_notice_and_no_update_call() {
    let (backend, mut controller, identity) = signed_in().await;
    let id = backend.seed(confession_by(&identity.id, "before"));
    controller.refresh().await;
    controller.begin_edit(&id);

    controller.set_edit_content("  ");
    let outcome = controller.save_edit().await;

    assert_that!(outcome, eq(ActionOutcome::Failed));
    assert_that!(backend.calls().update, eq(0));
    assert!(controller.editing().is_some());
}

#[tokio::test]
async fn given_record_deleted_elsewhere_when_edit_saved_then_notice_and_editor_stays_open() {
    let (backend, mut controller, identity) = signed_in().await;
    let id = backend.seed(confession_by(&identity.id, "before"));
    controller.refresh().await;
    controller.begin_edit(&id);
    WallClient::new(backend.clone())
        .delete_confession(&id)
        .await
        .unwrap();

    controller.set_edit_content("after");
    let outcome = controller.save_edit().await;

    assert_that!(outcome, eq(ActionOutcome::Failed));
    assert!(controller.editing().is_some());
    assert_that!(
        controller.take_notice().map(|n| n.message),
        some(eq("Failed to update confession"))
    );
}

#[tokio::test]
async fn given_cancelled_edit_then_nothing_sent() {
    let (backend, mut controller, identity) = signed_in().await;
    let id = backend.seed(confession_by(&identity.id, "before"));
    controller.refresh().await;
    controller.begin_edit(&id);
    controller.set_edit_content("never saved");

    assert_that!(controller.cancel_edit(), eq(ActionOutcome::Completed));
    assert_that!(controller.save_edit().await, eq(ActionOutcome::Ignored));
    assert_that!(backend.calls().update, eq(0));
    assert_that!(backend.documents()[0].content.as_str(), eq("before"));
}

// =========================================================================
// Delete
// =========================================================================

#[tokio::test]
async fn given_declined_confirmation_then_record_set_unchanged() {
    let (backend, mut controller, identity) = signed_in().await;
    let id = backend.seed(confession_by(&identity.id, "maybe"));
    controller.refresh().await;

    assert_that!(
        controller.request_delete(&id),
        eq(ActionOutcome::AwaitingConfirmation)
    );
    assert_that!(controller.cancel_delete(), eq(ActionOutcome::Completed));
    assert_that!(controller.confirm_delete().await, eq(ActionOutcome::Ignored));

    assert_that!(backend.calls().delete, eq(0));
    assert_that!(controller.confessions().len(), eq(1));
}

#[tokio::test]
async fn given_confirmed_delete_then_exactly_that_record_removed() {
    let (backend, mut controller, identity) = signed_in().await;
    let keep = backend.seed(confession_by(&identity.id, "keep"));
    let doomed = backend.seed(confession_by(&identity.id, "doomed"));
    controller.refresh().await;

    controller.request_delete(&doomed);
    let outcome = controller.confirm_delete().await;

    assert_that!(outcome, eq(ActionOutcome::Completed));
    assert_that!(controller.pending_delete(), none());
    let ids: Vec<&str> = controller
        .confessions()
        .iter()
        .filter_map(|c| c.id.as_deref())
        .collect();
    assert_that!(ids, eq(&vec![keep.as_str()]));
}

#[tokio::test]
async fn given_already_removed_record_when_deleted_again_then_no_visible_change() {
    let (backend, mut controller, identity) = signed_in().await;
    let keep = backend.seed(confession_by(&identity.id, "keep"));
    let doomed = backend.seed(confession_by(&identity.id, "doomed"));
    controller.refresh().await;

    // Remove it behind the controller's back; its list still shows the record.
    WallClient::new(backend.clone())
        .delete_confession(&doomed)
        .await
        .unwrap();

    controller.request_delete(&doomed);
    let first = controller.confirm_delete().await;
    let after_first: Vec<_> = controller.confessions().to_vec();

    // The record is no longer listed, so a second request has nothing to act on.
    let second_request = controller.request_delete(&doomed);
    let second = controller.confirm_delete().await;

    assert_that!(first, eq(ActionOutcome::Completed));
    assert_that!(second_request, eq(ActionOutcome::Ignored));
    assert_that!(second, eq(ActionOutcome::Ignored));
    assert_that!(controller.confessions(), eq(after_first.as_slice()));
    assert_that!(after_first.len(), eq(1));
    assert_that!(after_first[0].id.as_deref(), some(eq(keep.as_str())));
    assert_that!(controller.take_notice(), none());
}

#[tokio::test]
async fn given_backend_down_when_delete_confirmed_then_notice_and_list_unchanged() {
    let (backend, mut controller, identity) = signed_in().await;
    let id = backend.seed(confession_by(&identity.id, "sticky"));
    controller.refresh().await;
    backend.set_unavailable(true);

    controller.request_delete(&id);
    let outcome = controller.confirm_delete().await;

    assert_that!(outcome, eq(ActionOutcome::Failed));
    assert_that!(controller.confessions().len(), eq(1));
    assert!(!controller.is_busy());
    assert_that!(
        controller.take_notice().map(|n| n.message),
        some(eq("Failed to delete confession"))
    );
}

#[tokio::test]
async fn given_editing_record_when_deleted_then_editor_closed() {
    let (backend, mut controller, identity) = signed_in().await;
    let id = backend.seed(confession_by(&identity.id, "gone soon"));
    controller.refresh().await;
    controller.begin_edit(&id);

    controller.request_delete(&id);
    controller.confirm_delete().await;

    assert_that!(controller.editing(), none());
    assert!(controller.confessions().is_empty());
}

// =========================================================================
// Misc
// =========================================================================

#[tokio::test]
async fn test_confession_at_is_one_based() {
    let (backend, mut controller, identity) = signed_in().await;
    backend.seed(confession_by(&identity.id, "first"));
    backend.seed(confession_by(&identity.id, "second"));
    controller.refresh().await;

    assert_that!(controller.confession_at(0), none());
    assert_that!(
        controller.confession_at(2).map(|c| c.content.as_str()),
        some(eq("second"))
    );
    assert_that!(controller.confession_at(3), none());
}

#[tokio::test]
async fn test_drain_notices_empties_queue() {
    let (_backend, mut controller) = started().await;
    controller.submit_confession().await;
    controller.submit_confession().await;

    assert_that!(controller.pending_notices().count(), eq(2));
    assert_that!(controller.drain_notices().len(), eq(2));
    assert_that!(controller.take_notice(), none());
}
