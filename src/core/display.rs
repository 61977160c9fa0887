//! Display trait implemented by the host rendering engine.
//!
//! Glyph rasterization, frame buffers and panel drivers live on the other side of this trait.
//! Screens only draw text, filled bars and icons, measure text, and drive the backlight.

use crate::core::color::Color;
use crate::core::geometry::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Normal,
    Bold,
    Mono,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Default,
    Confirm,
    Cancel,
    Back,
    Info,
    Warning,
    Error,
    Success,
    Lock,
    Receive,
    Send,
}

/// Text measurement, shared by displays and offline layout code.
pub trait TextMetrics {
    /// Width of `text` in pixels when drawn with `font`.
    fn text_width(&self, text: &str, font: Font) -> i32;

    /// Baseline-to-baseline distance of `font`.
    fn line_height(&self, font: Font) -> i32;
}

/// Minimal drawing interface.
pub trait Display: TextMetrics {
    /// Drawable area of the panel.
    fn area(&self) -> Rect;

    /// Fill the whole panel with the background color.
    fn clear(&mut self);

    /// Push the frame to the panel.
    fn refresh(&mut self);

    /// Fill `area` with `color`.
    fn bar(&mut self, area: Rect, color: Color);

    /// Draw `text` with its baseline starting at `origin`.
    fn text(&mut self, origin: Point, text: &str, font: Font, fg: Color, bg: Color);

    fn icon(&mut self, origin: Point, icon: Icon, fg: Color, bg: Color);

    /// Draw encoded image `data` scaled into `area`. Decoding is up to the display.
    fn image(&mut self, area: Rect, data: &[u8]);

    /// Current backlight level.
    fn backlight(&self) -> u8;

    fn set_backlight(&mut self, level: u8);

    /// Draw `text` aligned around `origin.x`.
    fn text_aligned(
        &mut self,
        origin: Point,
        text: &str,
        font: Font,
        fg: Color,
        bg: Color,
        align: Align,
    ) {
        let x = match align {
            Align::Left => origin.x,
            Align::Center => origin.x - self.text_width(text, font) / 2,
            Align::Right => origin.x - self.text_width(text, font),
        };
        self.text(Point::new(x, origin.y), text, font, fg, bg);
    }
}
