//! Event routing into the dialog layer
//!
//! The router decides which raw terminal events become dialog actions: an
//! escape key or a click on the scrim outside the active modal turns into a
//! close request for that dialog. Everything else is left for the dialog
//! body (or the app behind it) to interpret.

use crate::action::{close_request, CloseReason, StandardAction};
use crate::event::{EventContext, EventKind};
use crate::stack::DialogStack;
use crossterm::event::{self, KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Raw event from crossterm before processing
#[derive(Debug)]
pub enum RawEvent {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize(u16, u16),
}

/// Routes terminal events to the active dialog
///
/// Holds the [`EventContext`] (dialog hit-test areas, modifiers, mouse
/// position) and the action sender. The render pass records dialog areas
/// into the context; the event pass consults them.
pub struct DialogEventRouter {
    context: EventContext,
    action_tx: mpsc::UnboundedSender<StandardAction>,
}

impl DialogEventRouter {
    /// Create a new event router
    pub fn new(action_tx: mpsc::UnboundedSender<StandardAction>) -> Self {
        Self {
            context: EventContext::default(),
            action_tx,
        }
    }

    /// Get a reference to the context
    pub fn context(&self) -> &EventContext {
        &self.context
    }

    /// Get mutable reference to the context
    pub fn context_mut(&mut self) -> &mut EventContext {
        &mut self.context
    }

    /// Get the action sender
    pub fn action_tx(&self) -> &mpsc::UnboundedSender<StandardAction> {
        &self.action_tx
    }

    /// Send an action through the router's channel
    pub fn send(&self, action: StandardAction) -> Result<(), mpsc::error::SendError<StandardAction>> {
        self.action_tx.send(action)
    }

    /// Align the context with the current stack: the active modal owns
    /// input, and areas of discarded dialogs are forgotten.
    pub fn sync(&mut self, stack: &DialogStack) {
        self.context
            .set_active_dialog(stack.active().map(|item| item.id.clone()));
        self.context
            .dialog_areas
            .retain(|id, _| stack.contains(id));
    }

    /// Map an event to a dialog action, if the dialog layer claims it.
    ///
    /// - Escape becomes a close request (escape reason) for the active modal
    /// - A left-click outside the active modal's area becomes a close
    ///   request with the backdrop reason; clicks inside are left alone
    /// - With no active modal, nothing is claimed
    pub fn route(&self, kind: &EventKind, stack: &DialogStack) -> Option<StandardAction> {
        let active = stack.active()?;

        match kind {
            EventKind::Key(key) if key.code == KeyCode::Esc => {
                Some(close_request(active.id.as_str(), CloseReason::EscapeKey))
            }
            EventKind::Mouse(mouse)
                if mouse.kind == MouseEventKind::Down(MouseButton::Left) =>
            {
                if self
                    .context
                    .point_in_dialog(&active.id, mouse.column, mouse.row)
                {
                    None
                } else {
                    Some(close_request(active.id.as_str(), CloseReason::BackdropClick))
                }
            }
            _ => None,
        }
    }

    /// Track context updates from an event, route it, and send any resulting
    /// action. Returns whether the dialog layer claimed the event.
    pub fn handle(&mut self, kind: &EventKind, stack: &DialogStack) -> bool {
        match kind {
            EventKind::Key(key) => self.context.modifiers = key.modifiers,
            EventKind::Mouse(mouse) => {
                self.context.mouse_position = Some((mouse.column, mouse.row));
                self.context.modifiers = mouse.modifiers;
            }
            _ => {}
        }

        match self.route(kind, stack) {
            Some(action) => {
                debug!(action = %action.kind, "dialog layer claimed event");
                let _ = self.action_tx.send(action);
                true
            }
            None => false,
        }
    }

    /// Update context from mouse position
    pub fn update_mouse_position(&mut self, x: u16, y: u16) {
        self.context.mouse_position = Some((x, y));
    }

    /// Update modifiers from key event
    pub fn update_modifiers(&mut self, modifiers: KeyModifiers) {
        self.context.modifiers = modifiers;
    }
}

/// Spawn the event polling task with cancellation support
///
/// This spawns an async task that polls for crossterm events and sends them
/// through the provided channel. The task can be cancelled using the token.
///
/// # Arguments
/// * `tx` - Channel to send raw events
/// * `poll_timeout` - Timeout for each poll operation
/// * `loop_sleep` - Sleep duration between poll cycles
/// * `cancel_token` - Token to cancel the polling task
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<RawEvent>,
    poll_timeout: Duration,
    loop_sleep: Duration,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        const MAX_EVENTS_PER_BATCH: usize = 20;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("Event poller cancelled, draining buffer");
                    // Drain any remaining events from crossterm buffer before exiting
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(loop_sleep) => {
                    // Process up to MAX_EVENTS_PER_BATCH events per iteration
                    let mut events_processed = 0;
                    while events_processed < MAX_EVENTS_PER_BATCH
                        && event::poll(poll_timeout).unwrap_or(false)
                    {
                        events_processed += 1;
                        if let Ok(evt) = event::read() {
                            let raw = match evt {
                                event::Event::Key(key) => Some(RawEvent::Key(key)),
                                event::Event::Mouse(mouse) => Some(RawEvent::Mouse(mouse)),
                                event::Event::Resize(w, h) => Some(RawEvent::Resize(w, h)),
                                _ => None,
                            };
                            if let Some(raw) = raw {
                                if tx.send(raw).is_err() {
                                    debug!("Event channel closed, stopping poller");
                                    return;
                                }
                            }
                        }
                    }
                }
            }
        }
    })
}

/// Process a raw event into an EventKind
pub fn process_raw_event(raw: RawEvent) -> EventKind {
    match raw {
        RawEvent::Key(key) => EventKind::Key(key),
        RawEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollDown => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: 1,
            },
            MouseEventKind::ScrollUp => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: -1,
            },
            _ => EventKind::Mouse(mouse),
        },
        RawEvent::Resize(w, h) => EventKind::Resize(w, h),
    }
}
