//! Effect-based state management
//!
//! Reducers that coordinate dialogs need to do more than mutate state: a
//! `close` must schedule the `closed` notification for a later dispatch
//! cycle, and a gated close request must surface a pending-changes prompt.
//! Effects are declarative descriptions of that follow-up work, not the work
//! itself; the run loop decides how each effect is executed.
//!
//! # Overview
//!
//! The plain reducer returns `bool` (state changed or not):
//! ```ignore
//! fn reducer(state: &mut S, action: A) -> bool
//! ```
//!
//! An effect-aware reducer returns both change status and effects:
//! ```ignore
//! fn reducer(state: &mut S, action: A) -> DispatchResult<E>
//! ```
//!
//! # Example
//!
//! ```ignore
//! use dialog_dispatch::{Action, DispatchResult, EffectStore};
//!
//! enum Effect {
//!     DeleteItems { paths: Vec<String> },
//!     RefreshContentList,
//! }
//!
//! struct AppState { deleting: bool }
//!
//! #[derive(Clone, Debug, Action)]
//! enum AppAction {
//!     DeleteConfirmed(Vec<String>),
//!     DidDelete,
//! }
//!
//! fn reducer(state: &mut AppState, action: AppAction) -> DispatchResult<Effect> {
//!     match action {
//!         AppAction::DeleteConfirmed(paths) => {
//!             state.deleting = true;
//!             DispatchResult::changed_with(Effect::DeleteItems { paths })
//!         }
//!         AppAction::DidDelete => {
//!             state.deleting = false;
//!             DispatchResult::changed_with(Effect::RefreshContentList)
//!         }
//!     }
//! }
//!
//! let mut store = EffectStore::new(AppState { deleting: false }, reducer);
//! let result = store.dispatch(AppAction::DidDelete);
//! for effect in result.effects {
//!     // hand to the run loop / task manager
//! }
//! ```

use std::marker::PhantomData;

use crate::action::Action;
use crate::store::Middleware;

/// Result of dispatching an action to an effect-aware store.
///
/// Contains both the state change indicator and any effects to be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    /// Whether the state was modified by this action.
    pub changed: bool,
    /// Effects to be processed after dispatch.
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    /// Create a result indicating no state change and no effects.
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    /// Create a result indicating state changed but no effects.
    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    /// Create a result with a single effect but no state change.
    #[inline]
    pub fn effect(effect: E) -> Self {
        Self {
            changed: false,
            effects: vec![effect],
        }
    }

    /// Create a result with multiple effects but no state change.
    #[inline]
    pub fn effects(effects: Vec<E>) -> Self {
        Self {
            changed: false,
            effects,
        }
    }

    /// Create a result indicating state changed with a single effect.
    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    /// Create a result indicating state changed with multiple effects.
    #[inline]
    pub fn changed_with_many(effects: Vec<E>) -> Self {
        Self {
            changed: true,
            effects,
        }
    }

    /// Add an effect to this result.
    #[inline]
    pub fn with(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    /// Set the changed flag to true.
    #[inline]
    pub fn mark_changed(mut self) -> Self {
        self.changed = true;
        self
    }

    /// Returns true if there are any effects to process.
    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// A reducer function that can emit effects.
///
/// Takes mutable state and an action, returns whether state changed
/// and any effects to process.
pub type EffectReducer<S, A, E> = fn(&mut S, A) -> DispatchResult<E>;

/// A store that supports effect-emitting reducers.
///
/// Similar to [`Store`](crate::Store), but the reducer returns
/// [`DispatchResult<E>`] instead of `bool`, allowing it to declare
/// side effects alongside state changes.
pub struct EffectStore<S, A, E> {
    state: S,
    reducer: EffectReducer<S, A, E>,
    _marker: PhantomData<(A, E)>,
}

impl<S, A, E> EffectStore<S, A, E>
where
    A: Action,
{
    /// Create a new effect store with the given initial state and reducer.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self {
            state,
            reducer,
            _marker: PhantomData,
        }
    }

    /// Get a reference to the current state.
    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Get a mutable reference to the state.
    ///
    /// Use sparingly - prefer dispatching actions for state changes.
    /// This is mainly useful for initialization.
    #[inline]
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Dispatch an action to the store.
    ///
    /// The reducer is called with the current state and action,
    /// returning whether state changed and any effects to process.
    #[inline]
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        (self.reducer)(&mut self.state, action)
    }
}

/// An effect store with middleware support.
///
/// Wraps an [`EffectStore`] and calls middleware hooks before and after
/// each dispatch. The middleware receives action references and the
/// state change indicator, but not the effects.
pub struct EffectStoreWithMiddleware<S, A, E, M>
where
    A: Action,
    M: Middleware<A>,
{
    store: EffectStore<S, A, E>,
    middleware: M,
}

impl<S, A, E, M> EffectStoreWithMiddleware<S, A, E, M>
where
    A: Action,
    M: Middleware<A>,
{
    /// Create a new effect store with middleware.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>, middleware: M) -> Self {
        Self {
            store: EffectStore::new(state, reducer),
            middleware,
        }
    }

    /// Get a reference to the current state.
    #[inline]
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Get a mutable reference to the state.
    #[inline]
    pub fn state_mut(&mut self) -> &mut S {
        self.store.state_mut()
    }

    /// Get a reference to the middleware.
    #[inline]
    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    /// Get a mutable reference to the middleware.
    #[inline]
    pub fn middleware_mut(&mut self) -> &mut M {
        &mut self.middleware
    }

    /// Dispatch an action through middleware and store.
    ///
    /// Calls `middleware.before()`, then `store.dispatch()`,
    /// then `middleware.after()` with the state change indicator.
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        self.middleware.before(&action);
        let result = self.store.dispatch(action.clone());
        self.middleware.after(&action, result.changed);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    enum TestAction {
        SubmitStart,
        SubmitDone,
        NoOp,
        FanOut,
    }

    impl Action for TestAction {
        fn name(&self) -> &str {
            match self {
                TestAction::SubmitStart => "SubmitStart",
                TestAction::SubmitDone => "SubmitDone",
                TestAction::NoOp => "NoOp",
                TestAction::FanOut => "FanOut",
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum TestEffect {
        Notify(String),
        Refresh,
    }

    #[derive(Default)]
    struct TestState {
        submitting: bool,
    }

    fn test_reducer(state: &mut TestState, action: TestAction) -> DispatchResult<TestEffect> {
        match action {
            TestAction::SubmitStart => {
                state.submitting = true;
                DispatchResult::changed()
            }
            TestAction::SubmitDone => {
                state.submitting = false;
                DispatchResult::changed_with(TestEffect::Notify("done".into()))
            }
            TestAction::NoOp => DispatchResult::unchanged(),
            TestAction::FanOut => DispatchResult::effects(vec![
                TestEffect::Notify("first".into()),
                TestEffect::Refresh,
            ]),
        }
    }

    #[test]
    fn test_dispatch_result_builders() {
        let r: DispatchResult<TestEffect> = DispatchResult::unchanged();
        assert!(!r.changed);
        assert!(r.effects.is_empty());

        let r: DispatchResult<TestEffect> = DispatchResult::changed();
        assert!(r.changed);
        assert!(r.effects.is_empty());

        let r = DispatchResult::effect(TestEffect::Refresh);
        assert!(!r.changed);
        assert_eq!(r.effects, vec![TestEffect::Refresh]);

        let r = DispatchResult::changed_with(TestEffect::Refresh);
        assert!(r.changed);
        assert_eq!(r.effects, vec![TestEffect::Refresh]);

        let r = DispatchResult::changed_with_many(vec![
            TestEffect::Refresh,
            TestEffect::Notify("x".into()),
        ]);
        assert!(r.changed);
        assert_eq!(r.effects.len(), 2);
    }

    #[test]
    fn test_dispatch_result_chaining() {
        let r: DispatchResult<TestEffect> = DispatchResult::unchanged()
            .with(TestEffect::Refresh)
            .mark_changed();
        assert!(r.changed);
        assert_eq!(r.effects, vec![TestEffect::Refresh]);
    }

    #[test]
    fn test_effect_store_basic() {
        let mut store = EffectStore::new(TestState::default(), test_reducer);

        let result = store.dispatch(TestAction::SubmitStart);
        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert!(store.state().submitting);

        let result = store.dispatch(TestAction::NoOp);
        assert!(!result.changed);
    }

    #[test]
    fn test_effect_store_with_effects() {
        let mut store = EffectStore::new(TestState::default(), test_reducer);
        store.state_mut().submitting = true;

        let result = store.dispatch(TestAction::SubmitDone);
        assert!(result.changed);
        assert!(!store.state().submitting);
        assert!(matches!(&result.effects[0], TestEffect::Notify(s) if s == "done"));

        let result = store.dispatch(TestAction::FanOut);
        assert!(!result.changed);
        assert_eq!(result.effects.len(), 2);
    }

    #[test]
    fn test_has_effects() {
        let r: DispatchResult<TestEffect> = DispatchResult::unchanged();
        assert!(!r.has_effects());

        let r = DispatchResult::effect(TestEffect::Refresh);
        assert!(r.has_effects());
    }
}
