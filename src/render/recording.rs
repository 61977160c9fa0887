//! A [`Display`] that records what is drawn instead of rasterizing it.

use crate::core::color::Color;
use crate::core::display::{Display, Font, Icon, TextMetrics};
use crate::core::geometry::{Point, Rect};
use crate::core::text::width::MonospaceMetrics;

pub const DEFAULT_BACKLIGHT: u8 = 150;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Clear,
    Refresh,
    Bar {
        area: Rect,
        color: Color,
    },
    Text {
        origin: Point,
        text: String,
        font: Font,
        fg: Color,
        bg: Color,
    },
    Icon {
        origin: Point,
        icon: Icon,
        fg: Color,
    },
    /// Image data is not kept, only its size.
    Image {
        area: Rect,
        len: usize,
    },
    Backlight(u8),
}

/// Recording display with monospace metrics.
///
/// Draw operations since the last [`Display::clear`] form the current screen; the full history is
/// kept until [`RecordingDisplay::take_ops`].
#[derive(Debug, Clone)]
pub struct RecordingDisplay {
    area: Rect,
    metrics: MonospaceMetrics,
    backlight: u8,
    ops: Vec<DrawOp>,
    screen_start: usize,
    refreshes: usize,
}

impl RecordingDisplay {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            area: Rect::from_size(width, height),
            metrics: MonospaceMetrics::default(),
            backlight: DEFAULT_BACKLIGHT,
            ops: Vec::new(),
            screen_start: 0,
            refreshes: 0,
        }
    }

    pub fn with_metrics(mut self, metrics: MonospaceMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_backlight(mut self, level: u8) -> Self {
        self.backlight = level;
        self
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        self.screen_start = 0;
        std::mem::take(&mut self.ops)
    }

    fn screen_ops(&self) -> &[DrawOp] {
        &self.ops[self.screen_start.min(self.ops.len())..]
    }

    /// Strings drawn since the last clear, in drawing order.
    pub fn screen_contents(&self) -> Vec<String> {
        self.screen_ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Everything on screen joined with single spaces.
    pub fn screen_text(&self) -> String {
        self.screen_contents().join(" ")
    }

    pub fn text_origins(&self) -> Vec<Point> {
        self.screen_ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { origin, .. } => Some(*origin),
                _ => None,
            })
            .collect()
    }

    pub fn text_fonts(&self) -> Vec<Font> {
        self.screen_ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { font, .. } => Some(*font),
                _ => None,
            })
            .collect()
    }

    /// Byte sizes of the images drawn since the last clear.
    pub fn screen_images(&self) -> Vec<usize> {
        self.screen_ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Image { len, .. } => Some(*len),
                _ => None,
            })
            .collect()
    }

    pub fn screen_icons(&self) -> Vec<Icon> {
        self.screen_ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Icon { icon, .. } => Some(*icon),
                _ => None,
            })
            .collect()
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes
    }

    /// Every level the backlight was set to, oldest first.
    pub fn backlight_history(&self) -> Vec<u8> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Backlight(level) => Some(*level),
                _ => None,
            })
            .collect()
    }
}

impl TextMetrics for RecordingDisplay {
    fn text_width(&self, text: &str, font: Font) -> i32 {
        self.metrics.text_width(text, font)
    }

    fn line_height(&self, font: Font) -> i32 {
        self.metrics.line_height(font)
    }
}

impl Display for RecordingDisplay {
    fn area(&self) -> Rect {
        self.area
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
        self.screen_start = self.ops.len();
    }

    fn refresh(&mut self) {
        self.refreshes += 1;
        self.ops.push(DrawOp::Refresh);
    }

    fn bar(&mut self, area: Rect, color: Color) {
        self.ops.push(DrawOp::Bar { area, color });
    }

    fn text(&mut self, origin: Point, text: &str, font: Font, fg: Color, bg: Color) {
        self.ops.push(DrawOp::Text {
            origin,
            text: text.to_string(),
            font,
            fg,
            bg,
        });
    }

    fn icon(&mut self, origin: Point, icon: Icon, fg: Color, _bg: Color) {
        self.ops.push(DrawOp::Icon { origin, icon, fg });
    }

    fn image(&mut self, area: Rect, data: &[u8]) {
        self.ops.push(DrawOp::Image {
            area,
            len: data.len(),
        });
    }

    fn backlight(&self) -> u8 {
        self.backlight
    }

    fn set_backlight(&mut self, level: u8) {
        self.backlight = level;
        self.ops.push(DrawOp::Backlight(level));
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawOp, RecordingDisplay};
    use crate::core::color::Color;
    use crate::core::display::{Align, Display, Font};
    use crate::core::geometry::Point;

    #[test]
    fn clear_starts_a_new_screen() {
        let mut display = RecordingDisplay::new(240, 240);
        display.text(Point::new(0, 10), "old", Font::Normal, Color::WHITE, Color::BLACK);
        display.clear();
        display.text(Point::new(0, 10), "new", Font::Normal, Color::WHITE, Color::BLACK);
        assert_eq!(display.screen_contents(), vec!["new".to_string()]);
        assert_eq!(display.ops().len(), 3);
    }

    #[test]
    fn aligned_text_uses_metrics() {
        let mut display = RecordingDisplay::new(240, 240);
        display.text_aligned(
            Point::new(120, 50),
            "abcd",
            Font::Bold,
            Color::WHITE,
            Color::BLACK,
            Align::Center,
        );
        display.text_aligned(
            Point::new(240, 80),
            "ab",
            Font::Bold,
            Color::WHITE,
            Color::BLACK,
            Align::Right,
        );
        assert_eq!(
            display.text_origins(),
            vec![Point::new(100, 50), Point::new(220, 80)]
        );
    }

    #[test]
    fn backlight_changes_are_recorded() {
        let mut display = RecordingDisplay::new(240, 240).with_backlight(10);
        display.set_backlight(150);
        display.refresh();
        assert_eq!(display.backlight(), 150);
        assert_eq!(display.backlight_history(), vec![150]);
        assert_eq!(display.refresh_count(), 1);
        assert_eq!(display.ops().last(), Some(&DrawOp::Refresh));
    }
}
