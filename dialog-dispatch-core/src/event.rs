//! Event types for dialog-aware input routing

use crossterm::event::{KeyEvent, KeyModifiers, MouseEvent};
use ratatui::layout::Rect;
use std::collections::HashMap;

use crate::stack::DialogId;

/// Coarse event classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Keyboard events
    Key,
    /// Mouse click/drag events
    Mouse,
    /// Scroll wheel events
    Scroll,
    /// Terminal resize events
    Resize,
    /// Periodic tick for animations
    Tick,
}

/// The actual event payload
#[derive(Debug, Clone)]
pub enum EventKind {
    /// Keyboard event
    Key(KeyEvent),
    /// Mouse event
    Mouse(MouseEvent),
    /// Scroll event with position and delta
    Scroll { column: u16, row: u16, delta: isize },
    /// Terminal resize
    Resize(u16, u16),
    /// Periodic tick
    Tick,
}

impl EventKind {
    /// Get the event type for this event kind
    pub fn event_type(&self) -> EventType {
        match self {
            EventKind::Key(_) => EventType::Key,
            EventKind::Mouse(_) => EventType::Mouse,
            EventKind::Scroll { .. } => EventType::Scroll,
            EventKind::Resize(_, _) => EventType::Resize,
            EventKind::Tick => EventType::Tick,
        }
    }

    /// Check if this event should be seen regardless of which dialog or
    /// component currently has input (escape, quit chords, resize)
    pub fn is_global(&self) -> bool {
        match self {
            EventKind::Key(key) => {
                use crossterm::event::KeyCode;
                matches!(key.code, KeyCode::Esc)
                    || (key.modifiers.contains(KeyModifiers::CONTROL)
                        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')))
            }
            EventKind::Resize(_, _) => true,
            _ => false,
        }
    }
}

/// Context carried alongside every routed event
///
/// Tracks where each dialog was last rendered (for backdrop hit-testing)
/// and which dialog is currently the active modal.
#[derive(Debug, Clone)]
pub struct EventContext {
    /// Current mouse position (if known)
    pub mouse_position: Option<(u16, u16)>,
    /// Active key modifiers
    pub modifiers: KeyModifiers,
    /// Last rendered area per dialog, for hit-testing
    pub dialog_areas: HashMap<DialogId, Rect>,
    /// The dialog that currently owns input, if any
    pub active_dialog: Option<DialogId>,
}

impl Default for EventContext {
    fn default() -> Self {
        Self {
            mouse_position: None,
            modifiers: KeyModifiers::empty(),
            dialog_areas: HashMap::new(),
            active_dialog: None,
        }
    }
}

impl EventContext {
    /// Create a new event context
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a modal currently owns input
    pub fn is_modal_open(&self) -> bool {
        self.active_dialog.is_some()
    }

    /// Check if a point is within a dialog's last rendered area
    pub fn point_in_dialog(&self, dialog: &DialogId, x: u16, y: u16) -> bool {
        self.dialog_areas
            .get(dialog)
            .map(|area| {
                x >= area.x
                    && x < area.x.saturating_add(area.width)
                    && y >= area.y
                    && y < area.y.saturating_add(area.height)
            })
            .unwrap_or(false)
    }

    /// Get the dialog at a given point, preferring the active modal
    pub fn dialog_at(&self, x: u16, y: u16) -> Option<&DialogId> {
        if let Some(active) = &self.active_dialog {
            if self.point_in_dialog(active, x, y) {
                return Some(active);
            }
        }

        self.dialog_areas
            .iter()
            .find(|(id, area)| {
                self.active_dialog.as_ref() != Some(*id)
                    && x >= area.x
                    && x < area.x.saturating_add(area.width)
                    && y >= area.y
                    && y < area.y.saturating_add(area.height)
            })
            .map(|(id, _)| id)
    }

    /// Record where a dialog was rendered this frame
    pub fn set_dialog_area(&mut self, dialog: DialogId, area: Rect) {
        self.dialog_areas.insert(dialog, area);
    }

    /// Forget a dialog's area (after its entry leaves the stack)
    pub fn clear_dialog_area(&mut self, dialog: &DialogId) {
        self.dialog_areas.remove(dialog);
    }

    /// Set the dialog that owns input
    pub fn set_active_dialog(&mut self, dialog: Option<DialogId>) {
        self.active_dialog = dialog;
    }
}

/// An event with its context
#[derive(Debug, Clone)]
pub struct Event {
    /// The event payload
    pub kind: EventKind,
    /// Context at the time of the event
    pub context: EventContext,
}

impl Event {
    /// Create a new event
    pub fn new(kind: EventKind, context: EventContext) -> Self {
        Self { kind, context }
    }

    /// Get the event type
    pub fn event_type(&self) -> EventType {
        self.kind.event_type()
    }

    /// Check if this is a global event
    pub fn is_global(&self) -> bool {
        self.kind.is_global()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_in_dialog() {
        let mut context = EventContext::new();
        context.set_dialog_area(DialogId::new("upload"), Rect::new(10, 5, 40, 10));

        assert!(context.point_in_dialog(&DialogId::new("upload"), 10, 5));
        assert!(context.point_in_dialog(&DialogId::new("upload"), 49, 14));
        assert!(!context.point_in_dialog(&DialogId::new("upload"), 50, 5));
        assert!(!context.point_in_dialog(&DialogId::new("upload"), 9, 5));
        assert!(!context.point_in_dialog(&DialogId::new("delete"), 20, 8));
    }

    #[test]
    fn test_dialog_at_prefers_active() {
        let mut context = EventContext::new();
        context.set_dialog_area(DialogId::new("below"), Rect::new(0, 0, 80, 24));
        context.set_dialog_area(DialogId::new("top"), Rect::new(20, 8, 40, 8));
        context.set_active_dialog(Some(DialogId::new("top")));

        assert_eq!(context.dialog_at(30, 10), Some(&DialogId::new("top")));
        assert_eq!(context.dialog_at(1, 1), Some(&DialogId::new("below")));
    }

    #[test]
    fn test_escape_is_global() {
        use crossterm::event::{KeyCode, KeyEventKind, KeyEventState};
        let esc = EventKind::Key(KeyEvent {
            code: KeyCode::Esc,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        });
        assert!(esc.is_global());
        assert_eq!(esc.event_type(), EventType::Key);
    }
}
