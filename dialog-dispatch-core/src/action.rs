//! Action types for dialog dispatch
//!
//! Two layers of actions coexist:
//!
//! - [`Action`] is the marker trait for an application's own typed action
//!   enum, dispatched to a [`Store`](crate::Store).
//! - [`StandardAction`] is a serializable `{type, payload}` envelope that
//!   stands in for a callback. It describes "what happens next" as data, so
//!   one dialog can hand another dialog an action to dispatch on success
//!   without either of them holding a reference to the store.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Marker trait for actions that can be dispatched to a store
///
/// Actions represent intents to change state. They should be:
/// - Clone: Actions may be logged, replayed, or sent to multiple handlers
/// - Debug: For debugging and logging
/// - Send + 'static: For async dispatch across threads
///
/// Use `#[derive(Action)]` from `dialog-dispatch-macros` to auto-implement
/// this trait for an enum.
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &str;
}

/// Category-aware extension of [`Action`]
///
/// Generated by `#[derive(Action)]` with `#[action(infer_categories)]`.
/// Dialog action families group naturally: `PublishDialogShow` and
/// `PublishDialogClose` both land in the `publish_dialog` category.
pub trait ActionCategory: Action {
    /// Enum of all categories discovered on the action type
    type Category: Copy + Eq + std::hash::Hash + Debug;

    /// Get the action's category (if categorized)
    fn category(&self) -> Option<&'static str>;

    /// Get the category as an enum value
    fn category_enum(&self) -> Self::Category;
}

/// A serializable action envelope: `{ "type": ..., "payload": ... }`
///
/// The `kind` is a stable identifier produced by an action constructor
/// (never assembled ad hoc at a call site), and the payload is an arbitrary
/// JSON value. A `StandardAction` is never mutated after creation; reducers
/// and routers consume it by value or reference.
///
/// # Example
///
/// ```
/// use dialog_dispatch_core::StandardAction;
/// use serde_json::json;
///
/// let action = StandardAction::with_payload(
///     "dialog/delete/show",
///     json!({ "items": [{ "path": "/site/a" }] }),
/// );
/// assert_eq!(action.kind, "dialog/delete/show");
///
/// let wire = serde_json::to_string(&action).unwrap();
/// assert!(wire.contains("\"type\":\"dialog/delete/show\""));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardAction {
    /// Stable action identifier, serialized as `type`
    #[serde(rename = "type")]
    pub kind: String,
    /// Optional payload carried with the action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl StandardAction {
    /// Create an action with no payload.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: None,
        }
    }

    /// Create an action carrying a payload.
    pub fn with_payload(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload: Some(payload),
        }
    }

    /// Wrap several actions into a single batch action.
    ///
    /// The router expands a batch into one dispatch per element, in order.
    /// This is how an `on_success` payload can both close a dialog and
    /// refresh a view with one configured value.
    pub fn batch(actions: Vec<StandardAction>) -> Self {
        let elements = actions
            .into_iter()
            .map(|a| serde_json::to_value(a).unwrap_or(Value::Null))
            .collect();
        Self {
            kind: BATCH_KIND.to_string(),
            payload: Some(Value::Array(elements)),
        }
    }

    /// Check whether a JSON value is shaped like a `StandardAction`.
    ///
    /// The router uses this predicate on payload fields: any object with a
    /// string `type` key is treated as an action standing in for a callback.
    pub fn is_action_shaped(value: &Value) -> bool {
        value
            .as_object()
            .and_then(|obj| obj.get("type"))
            .map(Value::is_string)
            .unwrap_or(false)
    }

    /// Parse a JSON value into a `StandardAction`, if it is action-shaped.
    pub fn from_value(value: &Value) -> Option<Self> {
        if Self::is_action_shaped(value) {
            serde_json::from_value(value.clone()).ok()
        } else {
            None
        }
    }

    /// The payload as a JSON object, if it is one.
    pub fn payload_object(&self) -> Option<&Map<String, Value>> {
        self.payload.as_ref().and_then(Value::as_object)
    }
}

impl Action for StandardAction {
    fn name(&self) -> &str {
        &self.kind
    }
}

/// Kind of the batch envelope produced by [`StandardAction::batch`].
pub const BATCH_KIND: &str = "batch/dispatch";

/// Namespace prefix for dialog lifecycle action kinds.
pub const DIALOG_KIND_PREFIX: &str = "dialog";

/// Lifecycle verbs understood by the dialog router
///
/// A dialog action kind is `dialog/<family>/<verb>`. The mapping between a
/// kind and its `(family, verb)` pair is fixed and reversible, so the dialog
/// id (the family string) stays consistent across show/update/close with no
/// separate id-allocation channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogVerb {
    /// Open the dialog, merging the payload into its props
    Show,
    /// Shallow-merge the payload into the dialog's props
    Update,
    /// Ask to close; subject to the pending-changes/submitting gate
    CloseRequest,
    /// Actually close (sets `open = false`, keeps fields)
    Close,
    /// The dialog has fully gone away; its entry is discarded
    Closed,
    /// Hide the dialog while keeping its entry (and body state) alive
    Minimize,
    /// Restore a minimized dialog
    Maximize,
    /// Flip full-screen rendering
    ToggleFullScreen,
}

impl DialogVerb {
    /// The verb's wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            DialogVerb::Show => "show",
            DialogVerb::Update => "update",
            DialogVerb::CloseRequest => "close_request",
            DialogVerb::Close => "close",
            DialogVerb::Closed => "closed",
            DialogVerb::Minimize => "minimize",
            DialogVerb::Maximize => "maximize",
            DialogVerb::ToggleFullScreen => "toggle_full_screen",
        }
    }

    /// Parse a wire name back into a verb.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "show" => Some(DialogVerb::Show),
            "update" => Some(DialogVerb::Update),
            "close_request" => Some(DialogVerb::CloseRequest),
            "close" => Some(DialogVerb::Close),
            "closed" => Some(DialogVerb::Closed),
            "minimize" => Some(DialogVerb::Minimize),
            "maximize" => Some(DialogVerb::Maximize),
            "toggle_full_screen" => Some(DialogVerb::ToggleFullScreen),
            _ => None,
        }
    }
}

impl std::fmt::Display for DialogVerb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the action kind for a dialog family and verb.
pub fn dialog_kind(family: &str, verb: DialogVerb) -> String {
    format!("{DIALOG_KIND_PREFIX}/{family}/{verb}")
}

/// Split a kind into `(family, verb)` if it is a dialog lifecycle kind.
///
/// Returns `None` for any kind outside the `dialog/` namespace, which is how
/// the router ignores actions that are not addressed to it.
pub fn parse_dialog_kind(kind: &str) -> Option<(&str, DialogVerb)> {
    let rest = kind.strip_prefix(DIALOG_KIND_PREFIX)?.strip_prefix('/')?;
    let (family, verb) = rest.rsplit_once('/')?;
    if family.is_empty() {
        return None;
    }
    Some((family, DialogVerb::parse(verb)?))
}

/// Build a dialog lifecycle action with no payload.
pub fn dialog_action(family: &str, verb: DialogVerb) -> StandardAction {
    StandardAction::new(dialog_kind(family, verb))
}

/// Why a close was requested
///
/// Every close trigger (backdrop click, escape key, explicit close button)
/// funnels into one close-request action carrying its reason, so the gate in
/// the router is the single place closability is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    /// Click on the scrim outside the dialog
    BackdropClick,
    /// Escape key press
    EscapeKey,
    /// The header close button
    CloseButton,
}

impl CloseReason {
    /// Wire name of the reason.
    pub fn as_str(self) -> &'static str {
        match self {
            CloseReason::BackdropClick => "backdrop_click",
            CloseReason::EscapeKey => "escape_key",
            CloseReason::CloseButton => "close_button",
        }
    }
}

/// Build a close-request action for a family with the given reason.
pub fn close_request(family: &str, reason: CloseReason) -> StandardAction {
    StandardAction::with_payload(
        dialog_kind(family, DialogVerb::CloseRequest),
        serde_json::json!({ "reason": reason }),
    )
}
