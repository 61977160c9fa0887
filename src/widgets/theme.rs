//! Colors and metrics shared by widgets.

use std::time::Duration;

use crate::core::color::Color;
use crate::core::display::Font;
use crate::core::geometry::{Insets, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonStyle {
    pub fg: Color,
    pub bg: Color,
    pub font: Font,
}

impl ButtonStyle {
    pub const fn new(fg: Color, bg: Color, font: Font) -> Self {
        Self { fg, bg, font }
    }
}

/// Per-skin look of every widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub screen: Rect,
    pub fg: Color,
    pub bg: Color,
    pub title_fg: Color,
    pub subtitle_fg: Color,
    pub accent: Color,
    pub warning: Color,
    pub error: Color,
    pub success: Color,
    pub title_font: Font,
    pub text_font: Font,
    pub value_font: Font,
    pub borders: Insets,
    pub header_height: i32,
    pub line_height: i32,
    pub button_height: i32,
    pub button_spacing: i32,
    pub button_default: ButtonStyle,
    pub button_confirm: ButtonStyle,
    pub button_cancel: ButtonStyle,
    pub button_danger: ButtonStyle,
    pub button_pressed: ButtonStyle,
    pub button_disabled: ButtonStyle,
    /// Minimum vertical travel of a touch that counts as a swipe.
    pub swipe_distance: i32,
    pub hold_duration: Duration,
}

impl Theme {
    /// Square touchscreen layout.
    pub fn touch(width: i32, height: i32) -> Self {
        Self {
            screen: Rect::from_size(width, height),
            fg: Color::WHITE,
            bg: Color::BLACK,
            title_fg: Color::GREY,
            subtitle_fg: Color::WHITE,
            accent: Color::GREEN,
            warning: Color::ORANGE,
            error: Color::RED,
            success: Color::GREEN,
            title_font: Font::Bold,
            text_font: Font::Normal,
            value_font: Font::Mono,
            borders: Insets::new(0, 6, 6, 6),
            header_height: 42,
            line_height: 26,
            button_height: 38,
            button_spacing: 6,
            button_default: ButtonStyle::new(Color::WHITE, Color::DARK_GREY, Font::Bold),
            button_confirm: ButtonStyle::new(Color::WHITE, Color::GREEN, Font::Bold),
            button_cancel: ButtonStyle::new(Color::WHITE, Color::RED, Font::Bold),
            button_danger: ButtonStyle::new(Color::WHITE, Color::RED, Font::Bold),
            button_pressed: ButtonStyle::new(Color::BLACK, Color::WHITE, Font::Bold),
            button_disabled: ButtonStyle::new(Color::GREY, Color::BLACK, Font::Bold),
            swipe_distance: 20,
            hold_duration: Duration::from_millis(1000),
        }
    }

    /// Small monochrome screen driven by two physical buttons.
    pub fn buttons(width: i32, height: i32) -> Self {
        Self {
            screen: Rect::from_size(width, height),
            fg: Color::WHITE,
            bg: Color::BLACK,
            title_fg: Color::WHITE,
            subtitle_fg: Color::WHITE,
            accent: Color::WHITE,
            warning: Color::WHITE,
            error: Color::WHITE,
            success: Color::WHITE,
            title_font: Font::Bold,
            text_font: Font::Normal,
            value_font: Font::Mono,
            borders: Insets::new(0, 0, 0, 0),
            header_height: 12,
            line_height: 10,
            button_height: 11,
            button_spacing: 2,
            button_default: ButtonStyle::new(Color::WHITE, Color::BLACK, Font::Bold),
            button_confirm: ButtonStyle::new(Color::BLACK, Color::WHITE, Font::Bold),
            button_cancel: ButtonStyle::new(Color::WHITE, Color::BLACK, Font::Bold),
            button_danger: ButtonStyle::new(Color::BLACK, Color::WHITE, Font::Bold),
            button_pressed: ButtonStyle::new(Color::BLACK, Color::WHITE, Font::Bold),
            button_disabled: ButtonStyle::new(Color::GREY, Color::BLACK, Font::Bold),
            swipe_distance: 0,
            hold_duration: Duration::from_millis(1000),
        }
    }

    pub fn with_hold_duration(mut self, hold_duration: Duration) -> Self {
        self.hold_duration = hold_duration;
        self
    }

    /// Screen without borders.
    pub fn content_area(&self) -> Rect {
        self.screen.inset(self.borders)
    }

    /// Area below the header and above the button row.
    pub fn body_area(&self) -> Rect {
        let (_, rest) = self.content_area().split_top(self.header_height);
        let (body, _) = rest.split_bottom(self.button_height + self.button_spacing);
        body
    }

    /// Bottom row reserved for buttons.
    pub fn button_area(&self) -> Rect {
        let (_, buttons) = self.content_area().split_bottom(self.button_height);
        buttons
    }

    /// Number of body text lines that fit between header and buttons.
    pub fn body_lines(&self) -> usize {
        (self.body_area().height / self.line_height.max(1)).max(1) as usize
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::touch(240, 240)
    }
}

#[cfg(test)]
mod tests {
    use super::Theme;
    use crate::core::geometry::Rect;

    #[test]
    fn touch_areas_stack_without_overlap() {
        let theme = Theme::touch(240, 240);
        let body = theme.body_area();
        let buttons = theme.button_area();
        assert_eq!(buttons, Rect::new(6, 196, 228, 38));
        assert!(body.bottom() <= buttons.y);
        assert_eq!(body.y, 42);
        assert_eq!(theme.body_lines(), 5);
    }

    #[test]
    fn button_screen_fits_a_few_lines() {
        let theme = Theme::buttons(128, 64);
        assert_eq!(theme.body_lines(), 3);
    }
}
