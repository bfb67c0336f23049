//! Upload dialog family
//!
//! Uploads run long, so this family allows minimizing: the entry stays in
//! the stack while hidden and in-flight transfer state in the body survives
//! a minimize/restore round trip.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::{dialog_action, dialog_kind, DialogVerb, StandardAction};
use crate::registry::DialogDescriptor;

/// Family string and dialog id.
pub const FAMILY: &str = "upload";

/// Component that renders this family.
pub const COMPONENT: &str = "UploadDialog";

/// Payload for showing or updating the upload dialog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadDialogPayload {
    /// Target site
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
    /// Target path within the site
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Dispatched when the upload succeeds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_success: Option<StandardAction>,
}

/// Descriptor for registering this family.
pub fn descriptor() -> DialogDescriptor {
    DialogDescriptor::new(FAMILY, COMPONENT)
        .allow_minimize()
        .allow_full_screen()
}

/// Show the upload dialog.
pub fn show(payload: UploadDialogPayload) -> StandardAction {
    StandardAction::with_payload(
        dialog_kind(FAMILY, DialogVerb::Show),
        serde_json::to_value(payload).unwrap_or(Value::Null),
    )
}

/// Merge new fields into the open upload dialog.
pub fn update(payload: UploadDialogPayload) -> StandardAction {
    StandardAction::with_payload(
        dialog_kind(FAMILY, DialogVerb::Update),
        serde_json::to_value(payload).unwrap_or(Value::Null),
    )
}

/// Close the upload dialog.
pub fn close() -> StandardAction {
    dialog_action(FAMILY, DialogVerb::Close)
}

/// Signal that the upload dialog has fully gone away.
pub fn closed() -> StandardAction {
    dialog_action(FAMILY, DialogVerb::Closed)
}

/// Minimize the upload dialog to the minimized bar.
pub fn minimize() -> StandardAction {
    dialog_action(FAMILY, DialogVerb::Minimize)
}

/// Restore the upload dialog from the minimized bar.
pub fn maximize() -> StandardAction {
    dialog_action(FAMILY, DialogVerb::Maximize)
}
