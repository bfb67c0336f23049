//! Registry of dialog families
//!
//! The router only materializes dialogs it knows about. A descriptor ties a
//! family string to the component that renders it, its minimize/full-screen
//! permissions, default props, and the optional action dispatched when a
//! close request hits unsaved changes.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::action::StandardAction;
use crate::stack::DialogCapabilities;

/// Static description of one dialog family
#[derive(Debug, Clone)]
pub struct DialogDescriptor {
    /// Family string; doubles as the dialog id
    pub family: String,
    /// Name of the component that renders this dialog
    pub component: String,
    /// Minimize/full-screen permissions
    pub capabilities: DialogCapabilities,
    /// Props every instance starts from
    pub default_props: Map<String, Value>,
    /// Dispatched (typically a confirmation dialog show) when a close
    /// request is diverted by pending changes
    pub pending_changes_prompt: Option<StandardAction>,
}

impl DialogDescriptor {
    /// Create a descriptor with no capabilities and empty defaults.
    pub fn new(family: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            component: component.into(),
            capabilities: DialogCapabilities::empty(),
            default_props: Map::new(),
            pending_changes_prompt: None,
        }
    }

    /// Allow minimizing this dialog.
    pub fn allow_minimize(mut self) -> Self {
        self.capabilities |= DialogCapabilities::MINIMIZE;
        self
    }

    /// Allow full-screen rendering.
    pub fn allow_full_screen(mut self) -> Self {
        self.capabilities |= DialogCapabilities::FULL_SCREEN;
        self
    }

    /// Add a default prop value.
    pub fn with_default(mut self, key: impl Into<String>, value: Value) -> Self {
        self.default_props.insert(key.into(), value);
        self
    }

    /// Set the pending-changes confirmation action.
    pub fn with_pending_changes_prompt(mut self, action: StandardAction) -> Self {
        self.pending_changes_prompt = Some(action);
        self
    }
}

/// Lookup table from family to descriptor
#[derive(Debug, Clone, Default)]
pub struct DialogRegistry {
    families: HashMap<String, DialogDescriptor>,
}

impl DialogRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a family. Re-registering replaces the previous descriptor.
    pub fn register(&mut self, descriptor: DialogDescriptor) -> &mut Self {
        self.families
            .insert(descriptor.family.clone(), descriptor);
        self
    }

    /// The descriptor for a family.
    pub fn get(&self, family: &str) -> Option<&DialogDescriptor> {
        self.families.get(family)
    }

    /// Whether a family is registered.
    pub fn is_registered(&self, family: &str) -> bool {
        self.families.contains_key(family)
    }

    /// Number of registered families.
    pub fn len(&self) -> usize {
        self.families.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = DialogRegistry::new();
        registry.register(
            DialogDescriptor::new("upload", "UploadDialog")
                .allow_minimize()
                .with_default("path", json!("/")),
        );

        let descriptor = registry.get("upload").unwrap();
        assert_eq!(descriptor.component, "UploadDialog");
        assert!(descriptor.capabilities.contains(DialogCapabilities::MINIMIZE));
        assert!(!descriptor
            .capabilities
            .contains(DialogCapabilities::FULL_SCREEN));
        assert_eq!(descriptor.default_props["path"], json!("/"));

        assert!(!registry.is_registered("publish"));
    }

    #[test]
    fn test_reregister_replaces() {
        let mut registry = DialogRegistry::new();
        registry.register(DialogDescriptor::new("delete", "Old"));
        registry.register(DialogDescriptor::new("delete", "New"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("delete").unwrap().component, "New");
    }
}
