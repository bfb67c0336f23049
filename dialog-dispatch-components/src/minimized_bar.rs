//! Bottom bar of minimized dialogs
//!
//! One chip per minimized stack entry. Clicking a chip restores its dialog;
//! the entry itself never left the stack, so the dialog comes back with its
//! body state intact.

use crossterm::event::{MouseButton, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::Paragraph,
    Frame,
};

use dialog_dispatch_core::{
    dialog_action, Component, DialogId, DialogStack, DialogVerb, EventKind, StandardAction,
};

/// Props for [`MinimizedBar`]
pub struct MinimizedBarProps<'a> {
    /// The dialog stack to read minimized entries from
    pub stack: &'a DialogStack,
}

/// Bar component listing minimized dialogs
#[derive(Default)]
pub struct MinimizedBar {
    chips: Vec<(DialogId, Rect)>,
}

impl MinimizedBar {
    /// Create an empty bar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the bar has anything to show for this stack.
    pub fn is_visible(stack: &DialogStack) -> bool {
        stack.minimized().next().is_some()
    }

    fn chip_label(item: &dialog_dispatch_core::DialogStackItem) -> String {
        let name = item.title().unwrap_or(item.id.as_str());
        format!("[^ {name}]")
    }
}

impl Component<StandardAction> for MinimizedBar {
    type Props<'a> = MinimizedBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = StandardAction> {
        if let EventKind::Mouse(mouse) = event {
            if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                let (x, y) = (mouse.column, mouse.row);
                for (id, rect) in &self.chips {
                    let hit = x >= rect.x
                        && x < rect.x.saturating_add(rect.width)
                        && y >= rect.y
                        && y < rect.y.saturating_add(rect.height);
                    if hit {
                        return Some(dialog_action(id.as_str(), DialogVerb::Maximize));
                    }
                }
            }
        }
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.chips.clear();
        if area.height == 0 {
            return;
        }

        let row = Rect::new(area.x, area.y, area.width, 1);
        let mut x = row.x;
        for item in props.stack.minimized() {
            let label = Self::chip_label(item);
            let width = label.len() as u16;
            if x.saturating_add(width) > row.x.saturating_add(row.width) {
                break;
            }
            let rect = Rect::new(x, row.y, width, 1);
            frame.render_widget(
                Paragraph::new(label).style(Style::default().add_modifier(Modifier::REVERSED)),
                rect,
            );
            self.chips.push((item.id.clone(), rect));
            x = x.saturating_add(width).saturating_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseEvent};
    use dialog_dispatch_core::testing::RenderHarness;
    use dialog_dispatch_core::DialogStackItem;
    use serde_json::json;

    fn stack_with_minimized() -> DialogStack {
        let mut stack = DialogStack::new();

        let mut upload = DialogStackItem::new("upload", "UploadDialog");
        upload.state.open = true;
        upload.state.is_minimized = true;
        upload.props.insert("title".into(), json!("Uploading 3 files"));
        stack.push(upload);

        let mut publish = DialogStackItem::new("publish", "PublishDialog");
        publish.state.open = true;
        stack.push(publish);

        stack
    }

    #[test]
    fn test_renders_chip_per_minimized_dialog() {
        let mut harness = RenderHarness::new(80, 24);
        let mut bar = MinimizedBar::new();
        let stack = stack_with_minimized();

        let output = harness.render_to_string_plain(|frame| {
            let area = frame.area();
            let bottom = Rect::new(area.x, area.height - 1, area.width, 1);
            bar.render(frame, bottom, MinimizedBarProps { stack: &stack });
        });

        // Only the minimized entry gets a chip
        assert!(output.contains("[^ Uploading 3 files]"));
        assert!(!output.contains("publish"));
        assert_eq!(bar.chips.len(), 1);
    }

    #[test]
    fn test_chip_click_restores_dialog() {
        let mut harness = RenderHarness::new(80, 24);
        let mut bar = MinimizedBar::new();
        let stack = stack_with_minimized();

        harness.render(|frame| {
            let area = frame.area();
            let bottom = Rect::new(area.x, area.height - 1, area.width, 1);
            bar.render(frame, bottom, MinimizedBarProps { stack: &stack });
        });

        let chip = bar.chips[0].1;
        let click = EventKind::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: chip.x,
            row: chip.y,
            modifiers: KeyModifiers::NONE,
        });

        let actions: Vec<_> = bar
            .handle_event(&click, MinimizedBarProps { stack: &stack })
            .into_iter()
            .collect();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].kind, "dialog/upload/maximize");
    }

    #[test]
    fn test_is_visible() {
        assert!(MinimizedBar::is_visible(&stack_with_minimized()));
        assert!(!MinimizedBar::is_visible(&DialogStack::new()));
    }
}
