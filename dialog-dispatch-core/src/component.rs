//! Component trait for pure UI elements

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A pure UI component that renders based on props and emits actions
///
/// Components follow these rules:
/// 1. Props contain ALL read-only data needed for rendering
/// 2. `handle_event` returns actions, never mutates external state
/// 3. `render` is a pure function of props (plus internal UI state like
///    scroll position or last-rendered hit areas)
///
/// Dialog bodies are components too: they read their data out of the stack
/// entry's props and emit [`StandardAction`](crate::StandardAction)s (or the
/// app's own action type) instead of touching the store.
///
/// # Example
///
/// ```ignore
/// use dialog_dispatch::{Component, EventKind, Frame, Rect, StandardAction};
///
/// struct DeleteSummary;
///
/// struct DeleteSummaryProps<'a> {
///     item: &'a DialogStackItem,
/// }
///
/// impl Component<StandardAction> for DeleteSummary {
///     type Props<'a> = DeleteSummaryProps<'a>;
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
///         let count = props
///             .item
///             .prop("items")
///             .and_then(|v| v.as_array())
///             .map(|a| a.len())
///             .unwrap_or(0);
///         let text = format!("Delete {count} item(s)?");
///         frame.render_widget(Paragraph::new(text), area);
///     }
/// }
/// ```
pub trait Component<A> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Handle an event and return actions to dispatch
    ///
    /// Components receive the raw `EventKind` (key press, mouse event, etc.)
    /// after the dialog layer has had its chance to claim it.
    ///
    /// Returns any type implementing `IntoIterator<Item = A>`:
    /// - `None` - no actions (most common)
    /// - `Some(action)` - single action
    /// - `[a, b]` or `vec![...]` - multiple actions
    ///
    /// Default implementation returns no actions (render-only components).
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Render the component to the frame
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
