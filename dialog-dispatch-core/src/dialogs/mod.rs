//! Built-in dialog families
//!
//! Typed payloads and action constructors for the dialogs every authoring
//! app ends up needing: a delete confirmation, an upload dialog, and the
//! error dialog that backend failures surface through. Each family routes
//! through the generic stack like any other; the typed layer only exists so
//! call sites get real structs instead of hand-built JSON.

pub mod confirm_delete;
pub mod error;
pub mod upload;

use crate::registry::DialogRegistry;

/// Register all built-in families into a registry.
pub fn register_builtin(registry: &mut DialogRegistry) {
    registry.register(confirm_delete::descriptor());
    registry.register(upload::descriptor());
    registry.register(error::descriptor());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_builtin() {
        let mut registry = DialogRegistry::new();
        register_builtin(&mut registry);

        assert!(registry.is_registered(confirm_delete::FAMILY));
        assert!(registry.is_registered(upload::FAMILY));
        assert!(registry.is_registered(error::FAMILY));
    }
}
