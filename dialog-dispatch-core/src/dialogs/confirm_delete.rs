//! Delete confirmation dialog family

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::{dialog_action, dialog_kind, DialogVerb, StandardAction};
use crate::registry::DialogDescriptor;

/// Family string and dialog id.
pub const FAMILY: &str = "delete";

/// Component that renders this family.
pub const COMPONENT: &str = "ConfirmDeleteDialog";

/// One item selected for deletion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteItem {
    /// Content path of the item
    pub path: String,
}

impl DeleteItem {
    /// Create an item from a path.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Payload for showing or updating the delete confirmation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteDialogPayload {
    /// Items the confirmation is about
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<DeleteItem>,
    /// Dispatched when the deletion succeeds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_success: Option<StandardAction>,
}

/// Descriptor for registering this family.
pub fn descriptor() -> DialogDescriptor {
    DialogDescriptor::new(FAMILY, COMPONENT)
}

/// Show the delete confirmation.
pub fn show(payload: DeleteDialogPayload) -> StandardAction {
    StandardAction::with_payload(
        dialog_kind(FAMILY, DialogVerb::Show),
        serde_json::to_value(payload).unwrap_or(Value::Null),
    )
}

/// Merge new fields into an open delete confirmation.
pub fn update(payload: DeleteDialogPayload) -> StandardAction {
    StandardAction::with_payload(
        dialog_kind(FAMILY, DialogVerb::Update),
        serde_json::to_value(payload).unwrap_or(Value::Null),
    )
}

/// Close the delete confirmation.
pub fn close() -> StandardAction {
    dialog_action(FAMILY, DialogVerb::Close)
}

/// Signal that the delete confirmation has fully gone away.
pub fn closed() -> StandardAction {
    dialog_action(FAMILY, DialogVerb::Closed)
}
