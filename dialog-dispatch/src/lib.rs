//! dialog-dispatch: Dialog lifecycle and stack coordination for Rust TUI apps
//!
//! Like Redux/Elm, but for modal dialogs in terminals. Every dialog lives in
//! one ordered stack, every mutation travels as an action through one
//! router, and "what to do next" is passed between dialogs as serializable
//! `{type, payload}` values instead of callbacks.
//!
//! # Example
//! ```ignore
//! use dialog_dispatch::prelude::*;
//! use serde_json::json;
//!
//! let mut registry = DialogRegistry::new();
//! registry.register(DialogDescriptor::new("delete", "ConfirmDeleteDialog"));
//!
//! let mut dialogs = DialogStore::new(registry);
//! dialogs.dispatch(StandardAction::with_payload(
//!     "dialog/delete/show",
//!     json!({ "items": [{ "path": "/site/home" }] }),
//! ));
//! ```

// Re-export everything from core
pub use dialog_dispatch_core::*;

// Re-export derive macros
pub use dialog_dispatch_macros::Action;

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use dialog_dispatch_core::{Action, ActionCategory, Component};

    // Dialog model
    pub use dialog_dispatch_core::{
        close_request, dialog_action, dialog_kind, parse_dialog_kind, ApiError, CloseReason,
        DialogCapabilities, DialogContext, DialogDescriptor, DialogEffect, DialogId,
        DialogLifecycle, DialogRegistry, DialogRouter, DialogStack, DialogStackItem, DialogStore,
        DialogVerb, StandardAction,
    };

    // Event system
    pub use dialog_dispatch_core::{
        process_raw_event, spawn_event_poller, DialogEventRouter, Event, EventContext, EventKind,
        EventType, RawEvent,
    };

    // Store
    pub use dialog_dispatch_core::{
        ComposedMiddleware, DispatchResult, EffectReducer, EffectStore, EffectStoreWithMiddleware,
        LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store, StoreWithMiddleware,
    };

    // Derive macros
    pub use dialog_dispatch_macros::Action;

    // Ratatui re-exports
    pub use dialog_dispatch_core::{Color, Frame, Line, Modifier, Rect, Span, Style, Text};
}
