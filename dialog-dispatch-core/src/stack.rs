//! The dialog stack: ordered collection of active dialog descriptors
//!
//! The stack is the single owner of which dialogs exist right now. Entries
//! are keyed by a [`DialogId`] derived from the triggering action kind, so a
//! `show` can never race its own `update`/`close` (the id cannot exist before
//! first push). Minimized dialogs stay in the stack, which is what keeps
//! their body state alive while they are hidden.

use std::collections::HashMap;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::action::StandardAction;

/// Identifier of a dialog instance
///
/// Equal to the dialog's family string. Only one instance of a family is
/// representable at a time; a show while one is already open reuses the
/// same id (and the existing entry).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DialogId(String);

impl DialogId {
    /// Create an id from a family string.
    pub fn new(family: impl Into<String>) -> Self {
        Self(family.into())
    }

    /// The underlying family string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DialogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DialogId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DialogId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

bitflags! {
    /// What a dialog is allowed to do beyond plain open/close
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DialogCapabilities: u8 {
        /// The dialog may be minimized to the minimized bar
        const MINIMIZE = 1 << 0;
        /// The dialog may be toggled to full-screen rendering
        const FULL_SCREEN = 1 << 1;
    }
}

impl Default for DialogCapabilities {
    fn default() -> Self {
        DialogCapabilities::empty()
    }
}

/// Per-dialog lifecycle flags and callbacks
///
/// Invariants the router maintains:
/// - `is_minimized` implies `open`
/// - `has_pending_changes` blocks every close path except the explicit
///   pending-changes confirmation flow
/// - `is_submitting` blocks every close path outright
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialogLifecycle {
    /// Whether the dialog is logically open (false while the entry lingers
    /// for its closing pass)
    pub open: bool,
    /// A submission is in flight; closing is fully blocked
    pub is_submitting: bool,
    /// Hidden but mounted; body state survives
    pub is_minimized: bool,
    /// Render over the whole screen instead of a centered rect
    pub is_full_screen: bool,
    /// Unsaved user input; close requests divert to a confirmation
    pub has_pending_changes: bool,
    /// Action dispatched when the gate allows an actual close
    pub on_close: Option<StandardAction>,
    /// Action dispatched after the close pass completes; resets the entry
    pub on_closed: Option<StandardAction>,
    /// Action the dialog body dispatches on successful submission
    pub on_success: Option<StandardAction>,
}

/// One entry in the dialog stack
#[derive(Debug, Clone, PartialEq)]
pub struct DialogStackItem {
    /// Stack key, derived from the action kind
    pub id: DialogId,
    /// Name of the component that renders this dialog
    pub component: String,
    /// Minimize/full-screen permissions
    pub capabilities: DialogCapabilities,
    /// Plain data props for the dialog body
    pub props: Map<String, Value>,
    /// Payload fields that arrived action-shaped, resolved out of `props`
    pub callbacks: HashMap<String, StandardAction>,
    /// Lifecycle flags and callbacks
    pub state: DialogLifecycle,
}

impl DialogStackItem {
    /// Create an entry with empty props and default lifecycle state.
    pub fn new(id: impl Into<DialogId>, component: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            component: component.into(),
            capabilities: DialogCapabilities::empty(),
            props: Map::new(),
            callbacks: HashMap::new(),
            state: DialogLifecycle::default(),
        }
    }

    /// Set the capability flags.
    pub fn with_capabilities(mut self, capabilities: DialogCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// A prop value by name.
    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }

    /// A resolved callback action by prop name.
    pub fn callback(&self, name: &str) -> Option<&StandardAction> {
        self.callbacks.get(name)
    }

    /// The `title` prop, if it is a string.
    pub fn title(&self) -> Option<&str> {
        self.prop("title").and_then(Value::as_str)
    }

    /// The `subtitle` prop, if it is a string.
    pub fn subtitle(&self) -> Option<&str> {
        self.prop("subtitle").and_then(Value::as_str)
    }

    /// Whether this entry is the kind the user currently interacts with.
    pub fn is_interactive(&self) -> bool {
        self.state.open && !self.state.is_minimized
    }
}

/// Ordered collection of active dialog descriptors
///
/// Supports `push`, `update`, `pop`. The top-most interactive entry is the
/// active modal; entries below it (including minimized ones) persist.
#[derive(Debug, Clone, Default)]
pub struct DialogStack {
    items: Vec<DialogStackItem>,
}

impl DialogStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    ///
    /// A colliding id is a caller error; the previous entry is replaced
    /// (last write wins) and no assertion is performed.
    pub fn push(&mut self, item: DialogStackItem) {
        self.items.retain(|existing| existing.id != item.id);
        self.items.push(item);
    }

    /// Shallow-merge `props` into the entry matching `id`.
    ///
    /// Silently a no-op when the id is not present. Returns whether an
    /// entry was updated.
    pub fn update(&mut self, id: &DialogId, props: Map<String, Value>) -> bool {
        match self.get_mut(id) {
            Some(item) => {
                for (key, value) in props {
                    item.props.insert(key, value);
                }
                true
            }
            None => false,
        }
    }

    /// Remove and return the entry matching `id`.
    pub fn pop(&mut self, id: &DialogId) -> Option<DialogStackItem> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        Some(self.items.remove(index))
    }

    /// The entry matching `id`.
    pub fn get(&self, id: &DialogId) -> Option<&DialogStackItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Mutable access to the entry matching `id`.
    pub fn get_mut(&mut self, id: &DialogId) -> Option<&mut DialogStackItem> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    /// Whether an entry with `id` exists.
    pub fn contains(&self, id: &DialogId) -> bool {
        self.get(id).is_some()
    }

    /// Number of entries, minimized ones included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the stack has no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &DialogStackItem> {
        self.items.iter()
    }

    /// The active modal: the top-most open, non-minimized entry.
    pub fn active(&self) -> Option<&DialogStackItem> {
        self.items.iter().rev().find(|item| item.is_interactive())
    }

    /// All minimized entries, bottom to top (for the minimized bar).
    pub fn minimized(&self) -> impl Iterator<Item = &DialogStackItem> {
        self.items
            .iter()
            .filter(|item| item.state.open && item.state.is_minimized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn open_item(id: &str) -> DialogStackItem {
        let mut item = DialogStackItem::new(id, "Test");
        item.state.open = true;
        item
    }

    #[test]
    fn test_push_then_pop_leaves_empty() {
        let mut stack = DialogStack::new();
        stack.push(DialogStackItem::new("delete", "ConfirmDelete"));
        assert_eq!(stack.len(), 1);

        let popped = stack.pop(&DialogId::new("delete")).unwrap();
        assert_eq!(popped.component, "ConfirmDelete");
        assert!(stack.is_empty());
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let mut stack = DialogStack::new();
        stack.push(open_item("delete"));
        let before = stack.clone();

        let updated = stack.update(&DialogId::new("upload"), props(&[("path", json!("/x"))]));
        assert!(!updated);
        assert_eq!(stack.get(&DialogId::new("delete")), before.get(&DialogId::new("delete")));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_update_merges_shallow() {
        let mut stack = DialogStack::new();
        let mut item = open_item("upload");
        item.props = props(&[("path", json!("/a")), ("site_id", json!("editorial"))]);
        stack.push(item);

        stack.update(&DialogId::new("upload"), props(&[("path", json!("/b"))]));

        let item = stack.get(&DialogId::new("upload")).unwrap();
        assert_eq!(item.prop("path"), Some(&json!("/b")));
        assert_eq!(item.prop("site_id"), Some(&json!("editorial")));
    }

    #[test]
    fn test_colliding_push_last_write_wins() {
        let mut stack = DialogStack::new();
        stack.push(DialogStackItem::new("delete", "First"));
        stack.push(DialogStackItem::new("delete", "Second"));

        assert_eq!(stack.len(), 1);
        assert_eq!(stack.get(&DialogId::new("delete")).unwrap().component, "Second");
    }

    #[test]
    fn test_active_skips_minimized() {
        let mut stack = DialogStack::new();
        stack.push(open_item("publish"));

        let mut minimized = open_item("upload");
        minimized.state.is_minimized = true;
        stack.push(minimized);

        // Upload is on top but minimized; publish is the active modal
        assert_eq!(stack.active().unwrap().id, DialogId::new("publish"));
        let minimized: Vec<_> = stack.minimized().map(|i| i.id.clone()).collect();
        assert_eq!(minimized, vec![DialogId::new("upload")]);
    }

    #[test]
    fn test_active_none_when_all_closed() {
        let mut stack = DialogStack::new();
        let mut item = open_item("delete");
        item.state.open = false;
        stack.push(item);

        assert!(stack.active().is_none());
    }

    #[test]
    fn test_minimized_persist_in_stack() {
        let mut stack = DialogStack::new();
        let mut item = open_item("upload");
        item.props = props(&[("path", json!("/site/a"))]);
        item.state.is_minimized = true;
        stack.push(item);

        // Entry (and its props) survive while hidden
        assert!(stack.contains(&DialogId::new("upload")));
        assert_eq!(
            stack.get(&DialogId::new("upload")).unwrap().prop("path"),
            Some(&json!("/site/a"))
        );
    }
}
