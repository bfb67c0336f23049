//! Error dialog family
//!
//! Backend failures surface here: the caller catches the error at the call
//! site, normalizes it into an [`ApiError`], and dispatches a show for this
//! family. When the payload names the dialog whose submission failed, the
//! router resets that dialog's submitting flag so the user can retry or
//! close it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::{dialog_action, dialog_kind, DialogVerb, StandardAction};
use crate::error::ApiError;
use crate::registry::DialogDescriptor;

/// Family string and dialog id.
pub const FAMILY: &str = "error";

/// Component that renders this family.
pub const COMPONENT: &str = "ErrorDialog";

/// Payload for showing the error dialog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDialogPayload {
    /// The normalized backend error
    pub error: ApiError,
    /// Family of the dialog whose submission produced this error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggered_by: Option<String>,
}

/// Descriptor for registering this family.
pub fn descriptor() -> DialogDescriptor {
    DialogDescriptor::new(FAMILY, COMPONENT)
}

/// Show the error dialog for a backend failure.
pub fn show_error(error: ApiError, triggered_by: Option<String>) -> StandardAction {
    StandardAction::with_payload(
        dialog_kind(FAMILY, DialogVerb::Show),
        serde_json::to_value(ErrorDialogPayload {
            error,
            triggered_by,
        })
        .unwrap_or(Value::Null),
    )
}

/// Close the error dialog.
pub fn close() -> StandardAction {
    dialog_action(FAMILY, DialogVerb::Close)
}

/// Signal that the error dialog has fully gone away.
pub fn closed() -> StandardAction {
    dialog_action(FAMILY, DialogVerb::Closed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogs::upload;
    use crate::router::DialogStore;
    use crate::stack::DialogId;
    use serde_json::json;

    fn store() -> DialogStore {
        let mut registry = crate::registry::DialogRegistry::new();
        registry.register(descriptor());
        registry.register(upload::descriptor());
        DialogStore::new(registry)
    }

    #[test]
    fn test_show_error_reflects_error_shape() {
        let mut store = store();
        let err = ApiError::new(409, "Item is locked by another user")
            .with_remedial_action("Try again later");
        store.dispatch(show_error(err, None));

        let item = store.stack().get(&DialogId::new(FAMILY)).unwrap();
        assert!(item.state.open);
        assert_eq!(item.prop("error").unwrap()["code"], json!(409));
        assert_eq!(
            item.prop("error").unwrap()["remedial_action"],
            json!("Try again later")
        );
    }

    #[test]
    fn test_failed_submission_resets_trigger_and_layers_error() {
        let mut store = store();
        store.dispatch(upload::show(Default::default()));
        store.dispatch(upload::update(Default::default()));

        // Body marks submission in flight
        store.dispatch(StandardAction::with_payload(
            "dialog/upload/update",
            json!({ "is_submitting": true }),
        ));

        store.dispatch(show_error(
            ApiError::new(500, "upload failed"),
            Some(upload::FAMILY.to_string()),
        ));

        let upload_item = store.stack().get(&DialogId::new(upload::FAMILY)).unwrap();
        assert!(!upload_item.state.is_submitting);
        assert!(upload_item.state.open);

        // The error dialog is layered on top of the triggering dialog
        assert_eq!(store.stack().active().unwrap().id, DialogId::new(FAMILY));
    }
}
