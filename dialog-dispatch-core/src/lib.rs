//! Core traits and types for dialog-dispatch
//!
//! This crate provides the foundational abstractions for coordinating modal
//! dialogs in TUI applications with centralized state management, following
//! a Redux/Elm-inspired architecture.
//!
//! # Core Concepts
//!
//! - **StandardAction**: Serializable `{type, payload}` envelopes that can
//!   stand in for callbacks
//! - **DialogStack**: Ordered collection of active dialog descriptors
//! - **DialogRouter**: Translates lifecycle actions (`show`, `update`,
//!   `close`, `closed`) into stack operations and owns the close gate
//! - **DialogContext**: Store-free handle dialog bodies use to close
//!   themselves or flip their submitting/pending-changes flags
//! - **Store**: Centralized state container with reducer pattern for the
//!   app's own state
//!
//! # Basic Example
//!
//! ```ignore
//! use dialog_dispatch_core::prelude::*;
//! use serde_json::json;
//!
//! let mut registry = DialogRegistry::new();
//! registry.register(DialogDescriptor::new("publish", "PublishDialog").allow_minimize());
//!
//! let mut dialogs = DialogStore::new(registry);
//! dialogs.dispatch(StandardAction::with_payload(
//!     "dialog/publish/show",
//!     json!({ "items": ["/site/home"] }),
//! ));
//! assert!(dialogs.stack().active().is_some());
//! ```
//!
//! # Close gating
//!
//! Every close trigger (escape key, scrim click, header button) funnels into
//! one `close_request` action carrying its reason. The router applies the
//! gate in a single place:
//!
//! 1. Unsaved input (`has_pending_changes`) diverts the request to a
//!    pending-changes confirmation; the dialog stays open.
//! 2. An in-flight submission (`is_submitting`) blocks closing entirely.
//! 3. Otherwise the entry's `on_close` action is scheduled, which flips
//!    `open` off, and `closed` follows on a later dispatch cycle to discard
//!    the entry after the closing pass.
//!
//! # Async work
//!
//! Dialog bodies run backend calls through the [`tasks::TaskManager`]
//! (feature `tasks`): the future resolves to an action — the configured
//! `on_success`, or an error-dialog show — and the main loop feeds it back
//! into dispatch. Closing a dialog does not abort its tasks; bodies own
//! their teardown and cancel by key.

pub mod action;
pub mod bus;
pub mod component;
pub mod context;
pub mod dialogs;
pub mod effect;
pub mod error;
pub mod event;
pub mod registry;
pub mod router;
pub mod stack;
pub mod store;
#[cfg(feature = "tasks")]
pub mod tasks;
pub mod testing;

// Core trait exports
pub use action::{
    close_request, dialog_action, dialog_kind, parse_dialog_kind, Action, ActionCategory,
    CloseReason, DialogVerb, StandardAction, BATCH_KIND, DIALOG_KIND_PREFIX,
};
pub use component::Component;
pub use context::DialogContext;
pub use error::ApiError;

// Dialog model exports
pub use registry::{DialogDescriptor, DialogRegistry};
pub use router::{DialogEffect, DialogRouter, DialogStore};
pub use stack::{DialogCapabilities, DialogId, DialogLifecycle, DialogStack, DialogStackItem};

// Event system exports
pub use bus::{process_raw_event, spawn_event_poller, DialogEventRouter, RawEvent};
pub use event::{Event, EventContext, EventKind, EventType};

// Store exports
pub use store::{
    ComposedMiddleware, LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store,
    StoreWithMiddleware,
};

// Effect exports
pub use effect::{DispatchResult, EffectReducer, EffectStore, EffectStoreWithMiddleware};

// Task exports (requires "tasks" feature)
#[cfg(feature = "tasks")]
pub use tasks::{TaskKey, TaskManager};

// Re-export ratatui types for convenience
pub use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    Frame,
};

// Testing exports
pub use testing::{
    alt_key, buffer_to_string_plain, char_key, ctrl_key, into_event, key, key_event,
    parse_key_string, RenderHarness, TestHarness,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{
        close_request, dialog_action, dialog_kind, parse_dialog_kind, Action, ActionCategory,
        CloseReason, DialogVerb, StandardAction,
    };
    pub use crate::bus::{process_raw_event, spawn_event_poller, DialogEventRouter, RawEvent};
    pub use crate::component::Component;
    pub use crate::context::DialogContext;
    pub use crate::effect::{DispatchResult, EffectReducer, EffectStore, EffectStoreWithMiddleware};
    pub use crate::error::ApiError;
    pub use crate::event::{Event, EventContext, EventKind, EventType};
    pub use crate::registry::{DialogDescriptor, DialogRegistry};
    pub use crate::router::{DialogEffect, DialogRouter, DialogStore};
    pub use crate::stack::{
        DialogCapabilities, DialogId, DialogLifecycle, DialogStack, DialogStackItem,
    };
    pub use crate::store::{
        ComposedMiddleware, LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store,
        StoreWithMiddleware,
    };
    #[cfg(feature = "tasks")]
    pub use crate::tasks::{TaskKey, TaskManager};

    // Re-export ratatui types
    pub use ratatui::{
        layout::Rect,
        style::{Color, Modifier, Style},
        text::{Line, Span, Text},
        Frame,
    };
}
