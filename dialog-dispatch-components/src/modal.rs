//! Modal overlay primitive with background dimming
//!
//! The lower-level capability the enhanced dialog wraps: dims whatever was
//! rendered before it (keeping animations live, the dim is applied fresh
//! each frame) and fills the modal area with a background color. Scrim
//! hit-testing, close gating, and headers live a layer up.

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget, Frame};

/// Configuration for modal appearance
pub struct ModalStyle {
    /// Dim factor for background (0.0 = no dim, 1.0 = black)
    pub dim_factor: f32,
    /// Background color for the modal area (None = transparent/cleared)
    pub bg_color: Option<Color>,
}

impl Default for ModalStyle {
    fn default() -> Self {
        Self {
            dim_factor: 0.5,
            bg_color: None,
        }
    }
}

impl ModalStyle {
    /// Create a style with a background color
    pub fn with_bg(bg_color: Color) -> Self {
        Self {
            bg_color: Some(bg_color),
            ..Default::default()
        }
    }
}

/// Render a modal overlay with dimmed background
///
/// Call this AFTER rendering background content. It dims the current buffer
/// and fills the modal area with the background color.
///
/// # Example
///
/// ```ignore
/// // Render background first
/// content_view.render(frame, area, props);
///
/// // Then render the active dialog on top
/// if let Some(item) = dialogs.stack().active() {
///     let modal_area = centered_rect(60, 12, frame.area());
///     render_modal(frame, modal_area, &ModalStyle::with_bg(Color::Rgb(30, 30, 40)));
///     // Render dialog content in modal_area
/// }
/// ```
pub fn render_modal(frame: &mut Frame, area: Rect, style: &ModalStyle) {
    // Dim the background (everything rendered so far)
    dim_buffer(frame.buffer_mut(), style.dim_factor);

    // Fill modal area with background color
    if let Some(bg) = style.bg_color {
        frame.render_widget(BgFill(bg), area);
    }
}

/// Simple widget that fills an area with a background color
struct BgFill(Color);

impl Widget for BgFill {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in area.y..area.y.saturating_add(area.height) {
            for x in area.x..area.x.saturating_add(area.width) {
                buf[(x, y)].set_bg(self.0);
                buf[(x, y)].set_symbol(" ");
            }
        }
    }
}

/// Calculate a centered rectangle within an area
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Dim a buffer by scaling colors towards black
///
/// `factor` ranges from 0.0 (no change) to 1.0 (fully dimmed/black).
/// Handles RGB and the named colors; indexed colors are left as-is.
pub fn dim_buffer(buffer: &mut Buffer, factor: f32) {
    let factor = factor.clamp(0.0, 1.0);
    let scale = 1.0 - factor;

    for cell in buffer.content.iter_mut() {
        cell.fg = dim_color(cell.fg, scale);
        cell.bg = dim_color(cell.bg, scale);
    }
}

fn scale_rgb(r: u8, g: u8, b: u8, scale: f32) -> Color {
    Color::Rgb(
        ((r as f32) * scale) as u8,
        ((g as f32) * scale) as u8,
        ((b as f32) * scale) as u8,
    )
}

/// Dim a single color by scaling towards black
fn dim_color(color: Color, scale: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => scale_rgb(r, g, b, scale),
        // Named colors - scale RGB approximations
        Color::Red => scale_rgb(205, 0, 0, scale),
        Color::Green => scale_rgb(0, 205, 0, scale),
        Color::Yellow => scale_rgb(205, 205, 0, scale),
        Color::Blue => scale_rgb(0, 0, 238, scale),
        Color::Magenta => scale_rgb(205, 0, 205, scale),
        Color::Cyan => scale_rgb(0, 205, 205, scale),
        Color::Gray => scale_rgb(229, 229, 229, scale),
        Color::DarkGray => scale_rgb(127, 127, 127, scale),
        Color::LightRed => scale_rgb(255, 0, 0, scale),
        Color::LightGreen => scale_rgb(0, 255, 0, scale),
        Color::LightYellow => scale_rgb(255, 255, 0, scale),
        Color::LightBlue => scale_rgb(92, 92, 255, scale),
        Color::LightMagenta => scale_rgb(255, 0, 255, scale),
        Color::LightCyan => scale_rgb(0, 255, 255, scale),
        Color::White => scale_rgb(255, 255, 255, scale),
        // Indexed palettes vary per terminal; leave them alone
        other => other,
    }
}
