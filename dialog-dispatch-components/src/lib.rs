//! Pre-built dialog UI components for dialog-dispatch
//!
//! This crate provides the rendering layer over the dialog stack: the modal
//! overlay primitive, the enhanced dialog chrome, and the minimized bar.
//! Components implement the `Component<A>` trait from
//! `dialog-dispatch-core` and emit `StandardAction`s; the router decides
//! what those actions do.
//!
//! # Components
//!
//! - [`EnhancedDialog`] - Chrome for one stack entry: scrim, frame, title,
//!   minimize/full-screen/close affordances
//! - [`MinimizedBar`] - Bottom bar of minimized dialogs with restore chips
//! - [`render_modal`] - The overlay primitive (dim + background fill)
//!
//! # Example
//!
//! ```ignore
//! use dialog_dispatch_components::{EnhancedDialog, EnhancedDialogProps, MinimizedBar, MinimizedBarProps};
//!
//! // In your render function, after drawing the background:
//! if let Some(item) = dialogs.stack().active() {
//!     chrome.render(frame, frame.area(), EnhancedDialogProps { item, omit_header: false });
//!     if let Some(body) = chrome.body_area() {
//!         // render the dialog body into `body`
//!     }
//! }
//! bar.render(frame, bottom_row, MinimizedBarProps { stack: dialogs.stack() });
//! ```

mod enhanced_dialog;
mod minimized_bar;
mod modal;

pub use enhanced_dialog::{EnhancedDialog, EnhancedDialogProps};
pub use minimized_bar::{MinimizedBar, MinimizedBarProps};
pub use modal::{centered_rect, dim_buffer, render_modal, ModalStyle};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        centered_rect, render_modal, EnhancedDialog, EnhancedDialogProps, MinimizedBar,
        MinimizedBarProps, ModalStyle,
    };
}
