//! End-to-end dialog lifecycle behavior through the public API

use dialog_dispatch::dialogs::{confirm_delete, error, upload};
use dialog_dispatch::prelude::*;
use serde_json::json;

fn store() -> DialogStore {
    let mut registry = DialogRegistry::new();
    dialog_dispatch::dialogs::register_builtin(&mut registry);
    registry.register(
        DialogDescriptor::new("discard_confirm", "DiscardConfirmDialog"),
    );
    DialogStore::new(registry)
}

fn delete_id() -> DialogId {
    DialogId::new(confirm_delete::FAMILY)
}

fn upload_id() -> DialogId {
    DialogId::new(upload::FAMILY)
}

#[test]
fn show_reflects_payload_and_opens() {
    let mut store = store();
    store.dispatch(confirm_delete::show(confirm_delete::DeleteDialogPayload {
        items: vec![confirm_delete::DeleteItem::new("/site/a")],
        on_success: None,
    }));

    let item = store.stack().get(&delete_id()).unwrap();
    assert!(item.state.open);
    assert_eq!(item.prop("items"), Some(&json!([{ "path": "/site/a" }])));
}

#[test]
fn close_then_closed_restores_initial_state() {
    let mut store = store();
    store.dispatch(upload::show(upload::UploadDialogPayload {
        site_id: Some("editorial".into()),
        path: Some("/static-assets".into()),
        on_success: None,
    }));

    store.dispatch_all(upload::close());

    // The entry is gone and a fresh show starts from family defaults
    assert!(store.stack().get(&upload_id()).is_none());
    store.dispatch(upload::show(Default::default()));
    let item = store.stack().get(&upload_id()).unwrap();
    assert!(item.prop("site_id").is_none());
    assert!(item.prop("path").is_none());
    assert!(!item.state.is_submitting);
    assert!(!item.state.has_pending_changes);
}

#[test]
fn pending_changes_divert_close_request_exactly_once() {
    let mut store = store();
    store.dispatch(upload::show(Default::default()));
    store.dispatch(StandardAction::with_payload(
        "dialog/upload/update",
        json!({ "has_pending_changes": true }),
    ));

    let notifications = store.dispatch_all(close_request(
        upload::FAMILY,
        CloseReason::BackdropClick,
    ));

    // Open is untouched and the divert notification fired once
    assert!(store.stack().get(&upload_id()).unwrap().state.open);
    assert_eq!(
        notifications,
        vec![DialogEffect::PendingChangesCloseRequest {
            id: upload_id(),
            reason: CloseReason::BackdropClick,
        }]
    );
}

#[test]
fn pending_changes_prompt_opens_configured_confirmation() {
    let mut registry = DialogRegistry::new();
    dialog_dispatch::dialogs::register_builtin(&mut registry);
    registry.register(DialogDescriptor::new("discard_confirm", "DiscardConfirmDialog"));
    registry.register(
        upload::descriptor()
            .with_pending_changes_prompt(StandardAction::new("dialog/discard_confirm/show")),
    );
    let mut store = DialogStore::new(registry);

    store.dispatch(upload::show(Default::default()));
    store.dispatch(StandardAction::with_payload(
        "dialog/upload/update",
        json!({ "has_pending_changes": true }),
    ));
    store.dispatch_all(close_request(upload::FAMILY, CloseReason::CloseButton));

    // The confirmation dialog is layered on top; upload stays open
    assert!(store.stack().get(&upload_id()).unwrap().state.open);
    assert_eq!(
        store.stack().active().unwrap().id,
        DialogId::new("discard_confirm")
    );
}

#[test]
fn submitting_makes_close_request_a_complete_noop() {
    let mut store = store();
    store.dispatch(confirm_delete::show(Default::default()));
    store.dispatch(StandardAction::with_payload(
        "dialog/delete/update",
        json!({ "is_submitting": true }),
    ));
    let before = store.stack().get(&delete_id()).cloned().unwrap();

    for reason in [
        CloseReason::BackdropClick,
        CloseReason::EscapeKey,
        CloseReason::CloseButton,
    ] {
        let notifications = store.dispatch_all(close_request(confirm_delete::FAMILY, reason));
        assert!(notifications.is_empty());
    }

    assert_eq!(store.stack().get(&delete_id()).unwrap(), &before);
}

#[test]
fn minimize_round_trip_keeps_dialog_mounted() {
    let mut store = store();
    store.dispatch(upload::show(upload::UploadDialogPayload {
        site_id: Some("editorial".into()),
        path: Some("/a".into()),
        on_success: None,
    }));

    // Emulate an app's mount bookkeeping: a body mounts when its entry
    // first appears and unmounts only when the entry is discarded
    let mut mount_count = 0usize;
    let mut mounted = false;
    let mut observe = |stack: &DialogStack| {
        let present = stack.contains(&DialogId::new(upload::FAMILY));
        if present && !mounted {
            mount_count += 1;
        }
        mounted = present;
    };

    observe(store.stack());
    store.dispatch(upload::minimize());
    observe(store.stack());
    store.dispatch(upload::maximize());
    observe(store.stack());

    assert_eq!(mount_count, 1);
    let item = store.stack().get(&upload_id()).unwrap();
    assert!(!item.state.is_minimized);
    assert_eq!(item.prop("path"), Some(&json!("/a")));
}

#[test]
fn stack_operations_via_actions() {
    let mut store = store();

    // Update before show is a silent no-op
    store.dispatch(upload::update(upload::UploadDialogPayload {
        path: Some("/ghost".into()),
        ..Default::default()
    }));
    assert!(store.stack().is_empty());

    // Push then pop leaves the stack empty
    store.dispatch(upload::show(Default::default()));
    assert_eq!(store.stack().len(), 1);
    store.dispatch_all(upload::close());
    assert!(store.stack().is_empty());
}

/// Middleware recording every action kind that crosses the store.
#[derive(Default)]
struct RecordingMiddleware {
    kinds: Vec<String>,
}

impl Middleware<StandardAction> for RecordingMiddleware {
    fn before(&mut self, action: &StandardAction) {
        self.kinds.push(action.kind.clone());
    }

    fn after(&mut self, _action: &StandardAction, _state_changed: bool) {}
}

#[test]
fn delete_confirmation_happy_path() {
    let mut registry = DialogRegistry::new();
    dialog_dispatch::dialogs::register_builtin(&mut registry);
    let mut store = DialogStore::with_middleware(registry, RecordingMiddleware::default());

    // The feature dispatches a show carrying both the data and the
    // success plan as a batch of plain actions
    store.dispatch(confirm_delete::show(confirm_delete::DeleteDialogPayload {
        items: vec![confirm_delete::DeleteItem::new("/site/a")],
        on_success: Some(StandardAction::batch(vec![
            confirm_delete::close(),
            StandardAction::new("content/refresh"),
        ])),
    }));

    let item = store.stack().get(&delete_id()).unwrap();
    assert!(item.state.open);
    assert_eq!(item.prop("items"), Some(&json!([{ "path": "/site/a" }])));
    let on_success = item.state.on_success.clone().unwrap();

    // Backend succeeded: the body dispatches the configured on_success
    store.dispatch_all(on_success);

    assert!(store.stack().is_empty());
    // The non-dialog member of the batch crossed the store for the app
    // reducer to pick up
    assert!(store
        .middleware()
        .kinds
        .iter()
        .any(|kind| kind == "content/refresh"));
}

#[test]
fn upload_escape_key_blocked_by_pending_changes_end_to_end() {
    use dialog_dispatch::testing::key;
    use tokio::sync::mpsc;

    let mut store = store();
    store.dispatch(upload::show(Default::default()));
    store.dispatch(StandardAction::with_payload(
        "dialog/upload/update",
        json!({ "has_pending_changes": true }),
    ));

    // A real escape key press travels through the event router
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut events = DialogEventRouter::new(tx);
    events.sync(store.stack());
    assert!(events.handle(&EventKind::Key(key("esc")), store.stack()));

    let action = rx.try_recv().unwrap();
    let notifications = store.dispatch_all(action);

    assert!(store.stack().get(&upload_id()).unwrap().state.open);
    assert_eq!(
        notifications,
        vec![DialogEffect::PendingChangesCloseRequest {
            id: upload_id(),
            reason: CloseReason::EscapeKey,
        }]
    );
}

#[test]
fn failed_submission_surfaces_error_dialog_and_unblocks_retry() {
    let mut store = store();
    store.dispatch(upload::show(Default::default()));
    store.dispatch(StandardAction::with_payload(
        "dialog/upload/update",
        json!({ "is_submitting": true }),
    ));

    // Backend failed: the body dispatches the normalized error
    store.dispatch_all(error::show_error(
        ApiError::new(507, "Storage quota exceeded")
            .with_remedial_action("Free up space and retry"),
        Some(upload::FAMILY.to_string()),
    ));

    // Error dialog layered on top; triggering dialog can retry or close
    assert_eq!(store.stack().active().unwrap().id, DialogId::new(error::FAMILY));
    let upload_item = store.stack().get(&upload_id()).unwrap();
    assert!(upload_item.state.open);
    assert!(!upload_item.state.is_submitting);

    // Dismiss the error dialog; upload becomes active again
    store.dispatch_all(error::close());
    assert_eq!(store.stack().active().unwrap().id, upload_id());
}

#[test]
fn context_updates_flow_into_the_stack() {
    use tokio::sync::mpsc;

    let mut store = store();
    store.dispatch(upload::show(Default::default()));

    let (tx, mut rx) = mpsc::unbounded_channel();
    let ctx = DialogContext::new(upload::FAMILY, tx);

    // A deeply nested body component flips flags through its context
    ctx.set_pending_changes(true);
    ctx.set_submitting(true);

    while let Ok(action) = rx.try_recv() {
        store.dispatch_all(action);
    }

    let item = store.stack().get(&upload_id()).unwrap();
    assert!(item.state.has_pending_changes);
    assert!(item.state.is_submitting);
}
