//! Line breaking over a single string.
//!
//! A [`Span`] walks a string one display line at a time. Lines end before whitespace when
//! possible, always at `\n`, and a word that cannot fit on a line of its own is split with a
//! trailing dash.

use crate::core::display::{Font, TextMetrics};

/// Glyph drawn after a split word.
pub const WORD_BREAK_DASH: &str = "-";

#[derive(Debug, Clone)]
pub struct Span<'a> {
    text: &'a str,
    font: Font,
    line_width: i32,
    offset_x: i32,
    break_words: bool,

    /// Byte offset of the current line.
    pub start: usize,
    /// Byte length of the current line.
    pub length: usize,
    /// Pixel width of the current line, without a trailing dash.
    pub width: i32,
    /// The current line ends inside a word and needs a dash.
    pub word_break: bool,
    advance_whitespace: bool,
}

impl<'a> Span<'a> {
    pub fn new(text: &'a str, font: Font, line_width: i32) -> Self {
        Self {
            text,
            font,
            line_width,
            offset_x: 0,
            break_words: false,
            start: 0,
            length: 0,
            width: 0,
            word_break: false,
            advance_whitespace: false,
        }
    }

    /// Horizontal space already used on the first line.
    pub fn with_offset_x(mut self, offset_x: i32) -> Self {
        self.offset_x = offset_x.max(0);
        self
    }

    /// Break anywhere instead of only at whitespace.
    pub fn with_break_words(mut self, break_words: bool) -> Self {
        self.break_words = break_words;
        self
    }

    /// Resume from a byte offset previously returned by [`Span::resume_offset`].
    pub fn starting_at(mut self, offset: usize) -> Self {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        self.start = offset;
        self.length = 0;
        self.advance_whitespace = false;
        self
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Contents of the current line.
    pub fn line(&self) -> &'a str {
        &self.text[self.start..self.start + self.length]
    }

    /// Byte offset where the next line will begin.
    pub fn resume_offset(&self) -> usize {
        let mut offset = self.start + self.length;
        if self.advance_whitespace {
            offset += 1;
        }
        offset.min(self.text.len())
    }

    /// Whether anything is left after the current line.
    pub fn has_more_content(&self) -> bool {
        self.resume_offset() < self.text.len()
    }

    /// Advance to the next line.
    ///
    /// Returns `true` when a line break follows the new current line, `false` when it is the last
    /// one. Rendering loops draw every line for which this returns `true`, then the final line.
    pub fn next_line<M: TextMetrics + ?Sized>(&mut self, metrics: &M) -> bool {
        let text = self.text;
        let mut start = self.start + self.length;
        let line_width = self.line_width - self.offset_x;
        self.offset_x = 0;

        if start >= text.len() {
            return false;
        }

        // Skip the whitespace character the previous line ended on.
        if self.advance_whitespace {
            start += 1;
        }

        let dash_width = metrics.text_width(WORD_BREAK_DASH, Font::Bold);
        let mut width = 0;
        let mut result_width = 0;
        let mut length = 0;
        let mut word_break = true;
        let mut advance_whitespace = false;
        let mut consumed_all = true;

        for (index, ch) in text[start..].char_indices() {
            let end = index + ch.len_utf8();
            let char_width = metrics.text_width(&text[start + index..start + end], self.font);

            if ch == ' ' || ch == '\n' {
                word_break = false;
                length = index;
                advance_whitespace = true;
                result_width = width;
                if ch == '\n' {
                    consumed_all = false;
                    break;
                }
            } else if width + char_width > line_width {
                consumed_all = false;
                break;
            } else if (self.break_words || word_break)
                && width + char_width + dash_width <= line_width
            {
                result_width = width + char_width;
                length = end;
                advance_whitespace = false;
                word_break = true;
            }

            width += char_width;
        }

        if consumed_all {
            word_break = false;
            advance_whitespace = false;
            result_width = width;
            length = text.len() - start;
        } else if length == 0 && !advance_whitespace {
            // Not even one glyph and a dash fit; emit a single glyph so callers make progress.
            if let Some(ch) = text[start..].chars().next() {
                length = ch.len_utf8();
                result_width = metrics.text_width(&text[start..start + length], self.font);
                word_break = false;
            }
        }

        self.start = start;
        self.length = length;
        self.width = result_width;
        self.word_break = word_break;
        self.advance_whitespace = advance_whitespace;
        start + length < text.len()
    }

    /// Number of lines the remaining text occupies. Leaves the span at its last line.
    pub fn count_lines<M: TextMetrics + ?Sized>(&mut self, metrics: &M) -> usize {
        let mut lines = 0;
        while self.next_line(metrics) {
            lines += 1;
        }
        // A trailing newline leaves an empty final line that is not counted.
        if self.length > 0 {
            lines += 1;
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::Span;
    use crate::core::display::Font;
    use crate::core::text::width::MonospaceMetrics;

    fn metrics() -> MonospaceMetrics {
        MonospaceMetrics::new(1, 1)
    }

    fn lines(text: &str, width: i32, break_words: bool) -> Vec<(String, bool)> {
        let metrics = metrics();
        let mut span = Span::new(text, Font::Normal, width).with_break_words(break_words);
        let mut out = Vec::new();
        while span.next_line(&metrics) {
            out.push((span.line().to_string(), span.word_break));
        }
        out.push((span.line().to_string(), span.word_break));
        out
    }

    #[test]
    fn breaks_at_whitespace() {
        assert_eq!(
            lines("hello big world", 10, false),
            vec![
                ("hello big".to_string(), false),
                ("world".to_string(), false)
            ]
        );
    }

    #[test]
    fn newline_always_breaks() {
        assert_eq!(
            lines("ab\ncd", 10, false),
            vec![("ab".to_string(), false), ("cd".to_string(), false)]
        );
    }

    #[test]
    fn long_word_gets_dash_break() {
        // Each line holds 4 glyphs plus the dash.
        assert_eq!(
            lines("abcdefghij", 5, false),
            vec![
                ("abcd".to_string(), true),
                ("efgh".to_string(), true),
                ("ij".to_string(), false)
            ]
        );
    }

    #[test]
    fn break_words_fills_lines() {
        assert_eq!(
            lines("ab cdefghi", 5, true),
            vec![
                ("ab c".to_string(), true),
                ("defg".to_string(), true),
                ("hi".to_string(), false)
            ]
        );
    }

    #[test]
    fn first_line_offset_shrinks_only_first_line() {
        let metrics = metrics();
        let mut span = Span::new("aaa bbb", Font::Normal, 7).with_offset_x(4);
        assert!(span.next_line(&metrics));
        assert_eq!(span.line(), "aaa");
        assert!(!span.next_line(&metrics));
        assert_eq!(span.line(), "bbb");
    }

    #[test]
    fn count_lines_ignores_trailing_newline() {
        let metrics = metrics();
        assert_eq!(Span::new("one two", Font::Normal, 3).count_lines(&metrics), 2);
        assert_eq!(Span::new("one\n", Font::Normal, 10).count_lines(&metrics), 1);
        assert_eq!(Span::new("", Font::Normal, 10).count_lines(&metrics), 0);
    }

    #[test]
    fn resume_offset_round_trips() {
        let metrics = metrics();
        let mut span = Span::new("one two three", Font::Normal, 8);
        assert!(span.next_line(&metrics));
        assert_eq!(span.line(), "one two");
        let offset = span.resume_offset();
        let mut resumed = Span::new("one two three", Font::Normal, 8).starting_at(offset);
        assert!(!resumed.next_line(&metrics));
        assert_eq!(resumed.line(), "three");
        assert!(!resumed.has_more_content());
    }

    #[test]
    fn always_makes_progress_on_tiny_lines() {
        let metrics = metrics();
        let mut span = Span::new("abc", Font::Normal, 1);
        assert!(span.next_line(&metrics));
        assert_eq!(span.line(), "a");
        assert!(span.next_line(&metrics));
        assert_eq!(span.line(), "b");
        assert!(!span.next_line(&metrics));
        assert_eq!(span.line(), "c");
    }
}
