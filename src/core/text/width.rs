//! Grapheme cell widths and a monospace [`TextMetrics`] built on them.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

use crate::core::display::{Font, TextMetrics};

const TAB_WIDTH: usize = 3;

/// Number of terminal-style cells a grapheme occupies.
pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.is_empty() {
        return 0;
    }
    if grapheme == "\t" {
        return TAB_WIDTH;
    }

    let mut width = 0;
    for ch in grapheme.chars() {
        if ch == '\t' {
            width += TAB_WIDTH;
            continue;
        }
        width += UnicodeWidthChar::width(ch).unwrap_or(0);
    }
    // Combining sequences still take a cell when their base has no width of its own.
    width.max(1)
}

pub fn cell_width(input: &str) -> usize {
    input.graphemes(true).map(grapheme_width).sum()
}

/// Fixed-advance metrics: every cell of every font has the same pixel advance.
///
/// Stands in for the firmware font tables in emulators and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonospaceMetrics {
    normal_advance: i32,
    bold_advance: i32,
    mono_advance: i32,
    line_height: i32,
}

impl MonospaceMetrics {
    pub const fn new(advance: i32, line_height: i32) -> Self {
        Self {
            normal_advance: advance,
            bold_advance: advance,
            mono_advance: advance,
            line_height,
        }
    }

    pub const fn with_bold_advance(mut self, advance: i32) -> Self {
        self.bold_advance = advance;
        self
    }

    pub const fn with_mono_advance(mut self, advance: i32) -> Self {
        self.mono_advance = advance;
        self
    }

    pub fn advance(&self, font: Font) -> i32 {
        match font {
            Font::Normal => self.normal_advance,
            Font::Bold => self.bold_advance,
            Font::Mono => self.mono_advance,
        }
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self::new(10, 26)
    }
}

impl TextMetrics for MonospaceMetrics {
    fn text_width(&self, text: &str, font: Font) -> i32 {
        cell_width(text) as i32 * self.advance(font)
    }

    fn line_height(&self, _font: Font) -> i32 {
        self.line_height
    }
}

#[cfg(test)]
mod tests {
    use super::{cell_width, MonospaceMetrics};
    use crate::core::display::{Font, TextMetrics};

    #[test]
    fn ascii_is_one_cell_per_char() {
        assert_eq!(cell_width("bc1q"), 4);
        assert_eq!(cell_width(""), 0);
    }

    #[test]
    fn wide_and_combining_graphemes() {
        assert_eq!(cell_width("你好"), 4);
        assert_eq!(cell_width("e\u{301}"), 1);
    }

    #[test]
    fn fonts_use_their_own_advance() {
        let metrics = MonospaceMetrics::new(6, 12).with_bold_advance(7).with_mono_advance(8);
        assert_eq!(metrics.text_width("abc", Font::Normal), 18);
        assert_eq!(metrics.text_width("abc", Font::Bold), 21);
        assert_eq!(metrics.text_width("abc", Font::Mono), 24);
        assert_eq!(metrics.line_height(Font::Bold), 12);
    }
}
