//! Dialog context: store-free handle for dialog bodies
//!
//! A dialog body can be composed arbitrarily deep; threading close and
//! submit wiring through every layer of props does not scale. Instead each
//! mounted dialog gets a [`DialogContext`] — a cheap clonable handle that
//! knows the dialog's id and the action channel. Any descendant can request
//! a close or flip the submitting/pending-changes flags without ever seeing
//! the store, and the handle's methods keep a stable identity across
//! renders because they are plain methods on a value type.

use serde_json::json;
use tokio::sync::mpsc;

use crate::action::{
    close_request, dialog_action, dialog_kind, CloseReason, DialogVerb, StandardAction,
};
use crate::stack::DialogId;

/// Handle given to a dialog body and its descendants
#[derive(Debug, Clone)]
pub struct DialogContext {
    id: DialogId,
    action_tx: mpsc::UnboundedSender<StandardAction>,
}

impl DialogContext {
    /// Create a context for the dialog with `id`, sending on `action_tx`.
    pub fn new(id: impl Into<DialogId>, action_tx: mpsc::UnboundedSender<StandardAction>) -> Self {
        Self {
            id: id.into(),
            action_tx,
        }
    }

    /// The dialog this context belongs to.
    pub fn id(&self) -> &DialogId {
        &self.id
    }

    /// Send any action into the dispatch loop.
    ///
    /// Send failures mean the loop is gone (shutdown); they are ignored.
    pub fn dispatch(&self, action: StandardAction) {
        let _ = self.action_tx.send(action);
    }

    /// Ask to close this dialog. Subject to the router's close gate.
    pub fn request_close(&self, reason: CloseReason) {
        self.dispatch(close_request(self.id.as_str(), reason));
    }

    /// Mark a submission as started or finished.
    pub fn set_submitting(&self, is_submitting: bool) {
        self.update_flags(Some(is_submitting), None);
    }

    /// Mark the dialog as having (or no longer having) unsaved input.
    pub fn set_pending_changes(&self, has_pending_changes: bool) {
        self.update_flags(None, Some(has_pending_changes));
    }

    /// Update either lifecycle flag in one action; `None` leaves a flag as
    /// it is.
    pub fn update_flags(&self, is_submitting: Option<bool>, has_pending_changes: Option<bool>) {
        let mut payload = serde_json::Map::new();
        if let Some(flag) = is_submitting {
            payload.insert("is_submitting".into(), json!(flag));
        }
        if let Some(flag) = has_pending_changes {
            payload.insert("has_pending_changes".into(), json!(flag));
        }
        if payload.is_empty() {
            return;
        }
        self.dispatch(StandardAction::with_payload(
            dialog_kind(self.id.as_str(), DialogVerb::Update),
            payload.into(),
        ));
    }

    /// Shallow-merge arbitrary props into this dialog's entry.
    pub fn update_props(&self, props: serde_json::Map<String, serde_json::Value>) {
        if props.is_empty() {
            return;
        }
        self.dispatch(StandardAction::with_payload(
            dialog_kind(self.id.as_str(), DialogVerb::Update),
            props.into(),
        ));
    }

    /// Minimize this dialog (honored only if its family allows it).
    pub fn minimize(&self) {
        self.dispatch(dialog_action(self.id.as_str(), DialogVerb::Minimize));
    }

    /// Restore this dialog from the minimized bar.
    pub fn maximize(&self) {
        self.dispatch(dialog_action(self.id.as_str(), DialogVerb::Maximize));
    }

    /// Flip full-screen rendering (honored only if the family allows it).
    pub fn toggle_full_screen(&self) {
        self.dispatch(dialog_action(self.id.as_str(), DialogVerb::ToggleFullScreen));
    }
}
