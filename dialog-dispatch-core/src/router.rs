//! Dialog router: translates lifecycle actions into stack operations
//!
//! The router is an effect-aware reducer over the [`DialogStack`]. It owns
//! the whole dialog model:
//!
//! - `show`/`update`/`close`/`closed` map onto stack push/merge/flag/pop
//! - payload fields that arrive shaped like a [`StandardAction`] are lifted
//!   out of the prop bag into the entry's callback table, so "what to do on
//!   success" travels as data and dialog bodies never touch the store
//! - close requests funnel through one gate: pending changes divert to a
//!   confirmation, an in-flight submission blocks closing entirely
//! - `closed` is always scheduled as an effect, never applied in the same
//!   pass as `close`, so a closing dialog gets a final render/teardown pass
//!   before its state is discarded

use std::collections::VecDeque;

use serde_json::Value;

use crate::action::{
    dialog_action, parse_dialog_kind, CloseReason, DialogVerb, StandardAction, BATCH_KIND,
};
use crate::effect::DispatchResult;
use crate::registry::DialogRegistry;
use crate::stack::{DialogCapabilities, DialogId, DialogStack, DialogStackItem};
use crate::store::{Middleware, NoopMiddleware};

/// Follow-up work declared by the router
#[derive(Debug, Clone, PartialEq)]
pub enum DialogEffect {
    /// Feed this action back into the dispatch loop on a later cycle
    Dispatch(StandardAction),
    /// A close request was diverted by unsaved changes; emitted exactly once
    /// per request, alongside the family's configured prompt action (if any)
    PendingChangesCloseRequest {
        /// The dialog whose close was diverted
        id: DialogId,
        /// What triggered the request
        reason: CloseReason,
    },
}

impl DialogEffect {
    /// The action to re-dispatch, if this is a `Dispatch` effect.
    pub fn into_action(self) -> Option<StandardAction> {
        match self {
            DialogEffect::Dispatch(action) => Some(action),
            DialogEffect::PendingChangesCloseRequest { .. } => None,
        }
    }
}

/// Stateless translator from lifecycle actions to stack operations
#[derive(Debug, Clone)]
pub struct DialogRouter {
    registry: DialogRegistry,
}

impl DialogRouter {
    /// Create a router over a registry of dialog families.
    pub fn new(registry: DialogRegistry) -> Self {
        Self { registry }
    }

    /// The registry this router resolves families against.
    pub fn registry(&self) -> &DialogRegistry {
        &self.registry
    }

    /// Reduce one action against the stack.
    ///
    /// Actions outside the `dialog/` namespace (other than batches) pass
    /// through untouched: the result is unchanged with no effects.
    pub fn reduce(
        &self,
        stack: &mut DialogStack,
        action: &StandardAction,
    ) -> DispatchResult<DialogEffect> {
        if action.kind == BATCH_KIND {
            return self.expand_batch(action);
        }

        let Some((family, verb)) = parse_dialog_kind(&action.kind) else {
            return DispatchResult::unchanged();
        };
        let id = DialogId::new(family);

        match verb {
            DialogVerb::Show => self.show(stack, family, action),
            DialogVerb::Update => self.update(stack, &id, action),
            DialogVerb::CloseRequest => self.close_request(stack, family, &id, action),
            DialogVerb::Close => self.close(stack, family, &id),
            DialogVerb::Closed => self.closed(stack, &id),
            DialogVerb::Minimize => self.minimize(stack, &id),
            DialogVerb::Maximize => self.maximize(stack, &id),
            DialogVerb::ToggleFullScreen => self.toggle_full_screen(stack, &id),
        }
    }

    fn expand_batch(&self, action: &StandardAction) -> DispatchResult<DialogEffect> {
        let elements = action
            .payload
            .as_ref()
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let effects: Vec<DialogEffect> = elements
            .iter()
            .filter_map(StandardAction::from_value)
            .map(DialogEffect::Dispatch)
            .collect();
        DispatchResult::effects(effects)
    }

    fn show(
        &self,
        stack: &mut DialogStack,
        family: &str,
        action: &StandardAction,
    ) -> DispatchResult<DialogEffect> {
        let Some(descriptor) = self.registry.get(family) else {
            tracing::warn!(family, "show for unregistered dialog family ignored");
            return DispatchResult::unchanged();
        };

        let payload = action.payload_object().cloned().unwrap_or_default();
        let triggered_by = payload
            .get("triggered_by")
            .and_then(Value::as_str)
            .map(str::to_owned);

        let id = DialogId::new(family);
        if let Some(item) = stack.get_mut(&id) {
            // Reuse-on-reopen: fields absent from the payload keep their
            // prior values until the entry is fully closed
            apply_payload(item, payload);
            item.state.open = true;
            item.state.is_minimized = false;
        } else {
            let mut item =
                DialogStackItem::new(id, descriptor.component.clone())
                    .with_capabilities(descriptor.capabilities);
            item.props = descriptor.default_props.clone();
            item.state.on_close = Some(dialog_action(family, DialogVerb::Close));
            item.state.on_closed = Some(dialog_action(family, DialogVerb::Closed));
            apply_payload(&mut item, payload);
            item.state.open = true;
            tracing::debug!(family, component = %item.component, "dialog pushed");
            stack.push(item);
        }

        // A dialog opened in reaction to another dialog's failed submission
        // unblocks that dialog so the user can retry or close it
        if let Some(source) = triggered_by {
            if let Some(source_item) = stack.get_mut(&DialogId::new(source)) {
                source_item.state.is_submitting = false;
            }
        }

        DispatchResult::changed()
    }

    fn update(
        &self,
        stack: &mut DialogStack,
        id: &DialogId,
        action: &StandardAction,
    ) -> DispatchResult<DialogEffect> {
        let Some(item) = stack.get_mut(id) else {
            tracing::debug!(dialog = %id, "update for dialog not in stack ignored");
            return DispatchResult::unchanged();
        };

        let payload = action.payload_object().cloned().unwrap_or_default();
        apply_payload(item, payload);
        DispatchResult::changed()
    }

    fn close_request(
        &self,
        stack: &mut DialogStack,
        family: &str,
        id: &DialogId,
        action: &StandardAction,
    ) -> DispatchResult<DialogEffect> {
        let Some(item) = stack.get(id) else {
            return DispatchResult::unchanged();
        };
        if !item.state.open {
            return DispatchResult::unchanged();
        }

        if item.state.has_pending_changes {
            let reason = action
                .payload
                .as_ref()
                .and_then(|p| p.get("reason"))
                .and_then(|r| serde_json::from_value(r.clone()).ok())
                .unwrap_or(CloseReason::CloseButton);

            let mut result = DispatchResult::effect(DialogEffect::PendingChangesCloseRequest {
                id: id.clone(),
                reason,
            });
            if let Some(prompt) = self
                .registry
                .get(family)
                .and_then(|d| d.pending_changes_prompt.clone())
            {
                result = result.with(DialogEffect::Dispatch(prompt));
            }
            return result;
        }

        if item.state.is_submitting {
            // Closing is fully blocked during submission
            return DispatchResult::unchanged();
        }

        let close = item
            .state
            .on_close
            .clone()
            .unwrap_or_else(|| dialog_action(family, DialogVerb::Close));
        DispatchResult::effect(DialogEffect::Dispatch(close))
    }

    fn close(
        &self,
        stack: &mut DialogStack,
        family: &str,
        id: &DialogId,
    ) -> DispatchResult<DialogEffect> {
        let Some(item) = stack.get_mut(id) else {
            return DispatchResult::unchanged();
        };
        if !item.state.open {
            // Already closing; `closed` was scheduled by the first close
            return DispatchResult::unchanged();
        }

        item.state.open = false;
        item.state.is_minimized = false;
        let closed = item
            .state
            .on_closed
            .clone()
            .unwrap_or_else(|| dialog_action(family, DialogVerb::Closed));
        DispatchResult::changed_with(DialogEffect::Dispatch(closed))
    }

    fn closed(&self, stack: &mut DialogStack, id: &DialogId) -> DispatchResult<DialogEffect> {
        match stack.pop(id) {
            Some(item) => {
                tracing::debug!(dialog = %item.id, "dialog entry discarded");
                DispatchResult::changed()
            }
            None => DispatchResult::unchanged(),
        }
    }

    fn minimize(&self, stack: &mut DialogStack, id: &DialogId) -> DispatchResult<DialogEffect> {
        let Some(item) = stack.get_mut(id) else {
            return DispatchResult::unchanged();
        };
        if !item.state.open
            || item.state.is_minimized
            || !item.capabilities.contains(DialogCapabilities::MINIMIZE)
        {
            return DispatchResult::unchanged();
        }
        item.state.is_minimized = true;
        DispatchResult::changed()
    }

    fn maximize(&self, stack: &mut DialogStack, id: &DialogId) -> DispatchResult<DialogEffect> {
        let Some(item) = stack.get_mut(id) else {
            return DispatchResult::unchanged();
        };
        if !item.state.is_minimized {
            return DispatchResult::unchanged();
        }
        item.state.is_minimized = false;
        DispatchResult::changed()
    }

    fn toggle_full_screen(
        &self,
        stack: &mut DialogStack,
        id: &DialogId,
    ) -> DispatchResult<DialogEffect> {
        let Some(item) = stack.get_mut(id) else {
            return DispatchResult::unchanged();
        };
        if !item.capabilities.contains(DialogCapabilities::FULL_SCREEN) {
            return DispatchResult::unchanged();
        }
        item.state.is_full_screen = !item.state.is_full_screen;
        DispatchResult::changed()
    }
}

/// Merge a show/update payload into a stack entry.
///
/// Known lifecycle booleans set flags, action-shaped values become
/// callbacks (with `on_close`/`on_closed`/`on_success` landing in their
/// dedicated lifecycle slots), everything else is a plain prop.
fn apply_payload(item: &mut DialogStackItem, payload: serde_json::Map<String, Value>) {
    for (key, value) in payload {
        match key.as_str() {
            "is_submitting" => {
                if let Some(flag) = value.as_bool() {
                    item.state.is_submitting = flag;
                }
            }
            "has_pending_changes" => {
                if let Some(flag) = value.as_bool() {
                    item.state.has_pending_changes = flag;
                }
            }
            "on_close" => {
                if let Some(action) = StandardAction::from_value(&value) {
                    item.state.on_close = Some(action);
                }
            }
            "on_closed" => {
                if let Some(action) = StandardAction::from_value(&value) {
                    item.state.on_closed = Some(action);
                }
            }
            "on_success" => {
                if let Some(action) = StandardAction::from_value(&value) {
                    item.state.on_success = Some(action);
                }
            }
            _ => {
                if let Some(action) = StandardAction::from_value(&value) {
                    item.callbacks.insert(key, action);
                } else {
                    item.props.insert(key, value);
                }
            }
        }
    }
}

/// Cap on chained dispatches per [`DialogStore::dispatch_all`] call.
const MAX_CHAINED_DISPATCHES: usize = 64;

/// Stack, router, and middleware bundled into one dialog store
///
/// All dialog mutations are serialized through `dispatch`; middleware sees
/// every action exactly as a [`Store`](crate::Store) middleware would.
pub struct DialogStore<M: Middleware<StandardAction> = NoopMiddleware> {
    stack: DialogStack,
    router: DialogRouter,
    middleware: M,
}

impl DialogStore<NoopMiddleware> {
    /// Create a store with no middleware.
    pub fn new(registry: DialogRegistry) -> Self {
        Self::with_middleware(registry, NoopMiddleware)
    }
}

impl<M: Middleware<StandardAction>> DialogStore<M> {
    /// Create a store with middleware.
    pub fn with_middleware(registry: DialogRegistry, middleware: M) -> Self {
        Self {
            stack: DialogStack::new(),
            router: DialogRouter::new(registry),
            middleware,
        }
    }

    /// The current dialog stack.
    pub fn stack(&self) -> &DialogStack {
        &self.stack
    }

    /// Mutable stack access; prefer dispatching actions.
    pub fn stack_mut(&mut self) -> &mut DialogStack {
        &mut self.stack
    }

    /// The router's registry.
    pub fn registry(&self) -> &DialogRegistry {
        self.router.registry()
    }

    /// Get a reference to the middleware.
    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    /// Get a mutable reference to the middleware.
    pub fn middleware_mut(&mut self) -> &mut M {
        &mut self.middleware
    }

    /// Dispatch one action through middleware and router.
    pub fn dispatch(&mut self, action: StandardAction) -> DispatchResult<DialogEffect> {
        self.middleware.before(&action);
        let result = self.router.reduce(&mut self.stack, &action);
        self.middleware.after(&action, result.changed);
        result
    }

    /// Dispatch an action and every action the router schedules from it,
    /// each on its own cycle, until the store is quiescent.
    ///
    /// This is the synchronous equivalent of feeding `Dispatch` effects back
    /// through the run loop's action channel: `closed` still lands on a
    /// cycle after `close`. Returns the non-dispatch effects in order.
    pub fn dispatch_all(&mut self, action: StandardAction) -> Vec<DialogEffect> {
        let mut queue = VecDeque::from([action]);
        let mut notifications = Vec::new();
        let mut cycles = 0usize;

        while let Some(next) = queue.pop_front() {
            cycles += 1;
            if cycles > MAX_CHAINED_DISPATCHES {
                tracing::warn!("dialog dispatch chain exceeded budget, dropping remainder");
                break;
            }
            for effect in self.dispatch(next).effects {
                match effect {
                    DialogEffect::Dispatch(scheduled) => queue.push_back(scheduled),
                    other => notifications.push(other),
                }
            }
        }
        notifications
    }
}
