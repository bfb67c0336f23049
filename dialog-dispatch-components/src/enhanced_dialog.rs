//! Enhanced dialog chrome: header, affordances, close wiring
//!
//! Wraps the modal primitive for one stack entry. The component renders the
//! scrim, a bordered frame with title/subtitle, and the header affordances
//! the entry's capabilities allow (minimize, full-screen, close). It never
//! decides closability itself: every affordance only emits the matching
//! lifecycle action and the router's gate has the final word.
//!
//! A minimized entry renders nothing here (the minimized bar draws its
//! chip), but the component value and the stack entry both survive, so the
//! dialog body keeps its state across a minimize/restore round trip.

use crossterm::event::{MouseButton, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph},
    Frame,
};

use dialog_dispatch_core::{
    close_request, dialog_action, CloseReason, Component, DialogCapabilities, DialogStackItem,
    DialogVerb, EventKind, StandardAction,
};

use crate::modal::{centered_rect, render_modal, ModalStyle};

/// Props for [`EnhancedDialog`]
pub struct EnhancedDialogProps<'a> {
    /// The stack entry being rendered
    pub item: &'a DialogStackItem,
    /// Skip the header row (no title/affordances; close via escape only)
    pub omit_header: bool,
}

/// Chrome component for one dialog stack entry
pub struct EnhancedDialog {
    /// Modal width when not full-screen
    pub width: u16,
    /// Modal height when not full-screen
    pub height: u16,
    /// Scrim and background styling
    pub style: ModalStyle,
    area: Option<Rect>,
    body: Option<Rect>,
    close_button: Option<Rect>,
    minimize_button: Option<Rect>,
    full_screen_button: Option<Rect>,
}

impl Default for EnhancedDialog {
    fn default() -> Self {
        Self {
            width: 60,
            height: 14,
            style: ModalStyle::default(),
            area: None,
            body: None,
            close_button: None,
            minimize_button: None,
            full_screen_button: None,
        }
    }
}

impl EnhancedDialog {
    /// Create chrome with an explicit modal size.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Where the modal was last rendered (for scrim hit-testing).
    pub fn area(&self) -> Option<Rect> {
        self.area
    }

    /// Where the dialog body should render, below the header.
    pub fn body_area(&self) -> Option<Rect> {
        self.body
    }

    fn clear_layout(&mut self) {
        self.area = None;
        self.body = None;
        self.close_button = None;
        self.minimize_button = None;
        self.full_screen_button = None;
    }

    fn hit(rect: Option<Rect>, x: u16, y: u16) -> bool {
        rect.map(|r| {
            x >= r.x && x < r.x.saturating_add(r.width) && y >= r.y && y < r.y.saturating_add(r.height)
        })
        .unwrap_or(false)
    }
}

impl Component<StandardAction> for EnhancedDialog {
    type Props<'a> = EnhancedDialogProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = StandardAction> {
        let item = props.item;
        if !item.is_interactive() {
            return None;
        }

        if let EventKind::Mouse(mouse) = event {
            if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                let (x, y) = (mouse.column, mouse.row);
                if Self::hit(self.close_button, x, y) {
                    return Some(close_request(item.id.as_str(), CloseReason::CloseButton));
                }
                if Self::hit(self.minimize_button, x, y) {
                    return Some(dialog_action(item.id.as_str(), DialogVerb::Minimize));
                }
                if Self::hit(self.full_screen_button, x, y) {
                    return Some(dialog_action(
                        item.id.as_str(),
                        DialogVerb::ToggleFullScreen,
                    ));
                }
            }
        }
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let item = props.item;
        if !item.is_interactive() {
            self.clear_layout();
            return;
        }

        let modal_area = if item.state.is_full_screen {
            area
        } else {
            centered_rect(self.width, self.height, area)
        };
        render_modal(frame, modal_area, &self.style);

        let mut block = Block::bordered();
        if let Some(title) = item.title() {
            block = block.title(title.to_string());
        }
        let inner = block.inner(modal_area);
        frame.render_widget(block, modal_area);

        self.area = Some(modal_area);
        self.close_button = None;
        self.minimize_button = None;
        self.full_screen_button = None;

        if props.omit_header || inner.height == 0 {
            self.body = Some(inner);
            return;
        }

        let header = Rect::new(inner.x, inner.y, inner.width, 1);

        // Affordance chips, right to left
        let mut right = header.x.saturating_add(header.width);
        let mut place = |rect_slot: &mut Option<Rect>, label: &str| {
            let width = label.len() as u16;
            if right < header.x.saturating_add(width) {
                return;
            }
            right -= width;
            let rect = Rect::new(right, header.y, width, 1);
            frame.render_widget(Paragraph::new(label), rect);
            *rect_slot = Some(rect);
            right = right.saturating_sub(1);
        };

        place(&mut self.close_button, "[x]");
        if item.capabilities.contains(DialogCapabilities::FULL_SCREEN) {
            place(&mut self.full_screen_button, "[o]");
        }
        if item.capabilities.contains(DialogCapabilities::MINIMIZE) {
            place(&mut self.minimize_button, "[_]");
        }

        if let Some(subtitle) = item.subtitle() {
            let subtitle_width = right.saturating_sub(header.x);
            let subtitle_area = Rect::new(header.x, header.y, subtitle_width, 1);
            frame.render_widget(
                Paragraph::new(Line::from(subtitle.to_string()))
                    .style(Style::default().add_modifier(Modifier::DIM)),
                subtitle_area,
            );
        }

        self.body = Some(Rect::new(
            inner.x,
            inner.y.saturating_add(1),
            inner.width,
            inner.height.saturating_sub(1),
        ));
    }
}
