//! Multi-item text rendering, pagination and trimming.

use crate::core::color::Color;
use crate::core::display::{Display, Font, TextMetrics};
use crate::core::geometry::Point;
use crate::core::text::span::{Span, WORD_BREAK_DASH};

/// Marker drawn where a page cuts content off.
pub const ELLIPSIS: &str = "...";

/// One element of rich text content.
///
/// Strings are drawn; the other variants change the state used for the strings that follow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextItem {
    Text(String),
    Font(Font),
    Color(Color),
    /// Full line break.
    Br,
    /// Half-height line break.
    BrHalf,
}

impl TextItem {
    pub fn text(text: impl Into<String>) -> Self {
        TextItem::Text(text.into())
    }
}

/// Placement and behaviour of [`render_text`].
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    /// Left edge of the text box.
    pub offset_x: i32,
    /// Baseline of the first line.
    pub offset_y: i32,
    pub line_width: i32,
    pub line_height: i32,
    pub header_height: i32,
    pub max_lines: i32,
    pub font: Font,
    pub fg: Color,
    pub bg: Color,
    pub overflow_color: Color,
    /// Break after every string item.
    pub new_lines: bool,
    /// Split anywhere instead of at whitespace.
    pub break_words: bool,
    /// Draw `...` where the page cuts remaining content off.
    pub render_page_overflow: bool,
    /// First item to draw; font and color items before it still apply.
    pub item_offset: usize,
    /// Byte offset inside the first drawn item.
    pub char_offset: usize,
}

impl TextLayout {
    pub fn new(offset_x: i32, header_height: i32, line_width: i32, line_height: i32) -> Self {
        Self {
            offset_x,
            offset_y: header_height + line_height,
            line_width,
            line_height,
            header_height,
            max_lines: 4,
            font: Font::Normal,
            fg: Color::WHITE,
            bg: Color::BLACK,
            overflow_color: Color::GREY,
            new_lines: true,
            break_words: false,
            render_page_overflow: true,
            item_offset: 0,
            char_offset: 0,
        }
    }

    pub fn with_max_lines(mut self, max_lines: i32) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn with_colors(mut self, fg: Color, bg: Color) -> Self {
        self.fg = fg;
        self.bg = bg;
        self
    }

    pub fn with_new_lines(mut self, new_lines: bool) -> Self {
        self.new_lines = new_lines;
        self
    }

    pub fn with_break_words(mut self, break_words: bool) -> Self {
        self.break_words = break_words;
        self
    }

    pub fn with_page_overflow(mut self, render_page_overflow: bool) -> Self {
        self.render_page_overflow = render_page_overflow;
        self
    }

    pub fn starting_at(mut self, item_offset: usize, char_offset: usize) -> Self {
        self.item_offset = item_offset;
        self.char_offset = char_offset;
        self
    }

    fn half_line_height(&self) -> i32 {
        self.line_height / 2
    }

    fn last_baseline(&self) -> i32 {
        self.header_height + self.line_height * self.max_lines
    }
}

/// Where a page of items begins: an item index and a byte offset inside that item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageStart {
    pub item: usize,
    pub offset: usize,
}

/// A string placed by [`lay_out_text`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedRun<'a> {
    pub origin: Point,
    pub text: &'a str,
    pub font: Font,
    pub fg: Color,
}

/// One page of laid out items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaidOutPage<'a> {
    pub runs: Vec<PlacedRun<'a>>,
    /// First content that did not fit, `None` when everything was placed.
    pub next_page: Option<PageStart>,
}

impl LaidOutPage<'_> {
    fn mark_overflow(&mut self, line_end: Option<Point>, dash_last: bool, layout: &TextLayout) {
        if !layout.render_page_overflow {
            return;
        }
        if dash_last {
            self.runs.pop();
        }
        if let Some(origin) = line_end {
            self.runs.push(PlacedRun {
                origin,
                text: ELLIPSIS,
                font: Font::Bold,
                fg: layout.overflow_color,
            });
        }
    }
}

/// Place `items` into the box described by `layout` without drawing them.
///
/// A line is only placed when its baseline is within `max_lines`; the first line of a page is
/// always placed so pagination makes progress.
pub fn lay_out_text<'a, M: TextMetrics + ?Sized>(
    metrics: &M,
    items: &'a [TextItem],
    layout: &TextLayout,
) -> LaidOutPage<'a> {
    let initial_x = layout.offset_x;
    let last_baseline = layout.last_baseline();
    let mut x = layout.offset_x;
    let mut y = layout.offset_y;
    let mut font = layout.font;
    let mut fg = layout.fg;

    for item in items.iter().take(layout.item_offset) {
        match item {
            TextItem::Font(f) => font = *f,
            TextItem::Color(c) => fg = *c,
            _ => {}
        }
    }

    let mut space = metrics.text_width(" ", font);
    let mut page = LaidOutPage::default();
    let mut line_end: Option<Point> = None;
    let mut dash_last = false;

    for (index, item) in items.iter().enumerate().skip(layout.item_offset) {
        let text = match item {
            TextItem::Br => {
                x = initial_x;
                y += layout.line_height;
                continue;
            }
            TextItem::BrHalf => {
                x = initial_x;
                y += layout.half_line_height();
                continue;
            }
            TextItem::Font(f) => {
                font = *f;
                space = metrics.text_width(" ", font);
                continue;
            }
            TextItem::Color(c) => {
                fg = *c;
                continue;
            }
            TextItem::Text(text) => text.as_str(),
        };

        let mut start = if index == layout.item_offset {
            layout.char_offset.min(text.len())
        } else {
            0
        };
        while !text.is_char_boundary(start) {
            start -= 1;
        }
        if start >= text.len() {
            continue;
        }

        // A short item that does not fit after the previous one moves to a fresh line whole.
        let rest = &text[start..];
        let rest_width = metrics.text_width(rest, font);
        if x > initial_x
            && rest_width <= layout.line_width
            && rest_width + x - initial_x > layout.line_width
            && !rest.contains('\n')
        {
            x = initial_x;
            y += layout.line_height;
        }

        let mut span = Span::new(text, font, layout.line_width)
            .with_offset_x(x - initial_x)
            .with_break_words(layout.break_words)
            .starting_at(start);

        loop {
            let more_lines = span.next_line(metrics);
            if y > last_baseline && !page.runs.is_empty() {
                page.next_page = Some(PageStart {
                    item: index,
                    offset: span.start,
                });
                page.mark_overflow(line_end, dash_last, layout);
                return page;
            }

            page.runs.push(PlacedRun {
                origin: Point::new(x, y),
                text: span.line(),
                font,
                fg,
            });
            line_end = Some(Point::new(x + span.width, y));
            dash_last = span.word_break;
            if span.word_break {
                page.runs.push(PlacedRun {
                    origin: Point::new(x + span.width, y),
                    text: WORD_BREAK_DASH,
                    font: Font::Bold,
                    fg: layout.overflow_color,
                });
            }

            if !more_lines {
                break;
            }
            x = initial_x;
            y += layout.line_height;
        }

        if layout.new_lines {
            x = initial_x;
            y += layout.line_height;
        } else if span.width > 0 {
            x += span.width + space;
        }
    }
    page
}

/// Draw `items` into the box described by `layout`.
///
/// Text that does not fit in `max_lines` is cut off, with `...` after the last visible line
/// when overflow rendering is on. A word split across lines gets a dash. Returns where the
/// content that did not fit begins.
pub fn render_text<D: Display + ?Sized>(
    display: &mut D,
    items: &[TextItem],
    layout: &TextLayout,
) -> Option<PageStart> {
    let page = lay_out_text(&*display, items, layout);
    for run in &page.runs {
        display.text(run.origin, run.text, run.font, run.fg, layout.bg);
    }
    page.next_page
}

/// Start of every page `items` fill when laid out with `layout`, beginning at its offsets.
///
/// Always returns at least one page.
pub fn paginate_items<M: TextMetrics + ?Sized>(
    metrics: &M,
    items: &[TextItem],
    layout: &TextLayout,
) -> Vec<PageStart> {
    let mut pages = vec![PageStart {
        item: layout.item_offset,
        offset: layout.char_offset,
    }];
    let mut layout = layout.clone();
    while let Some(next) = lay_out_text(metrics, items, &layout).next_page {
        if pages.last() == Some(&next) {
            break;
        }
        pages.push(next);
        layout = layout.starting_at(next.item, next.offset);
    }
    pages
}

/// Byte offsets where each page of `text` starts.
///
/// Always returns at least one page.
pub fn paginate_text<M: TextMetrics + ?Sized>(
    metrics: &M,
    text: &str,
    font: Font,
    line_width: i32,
    lines_per_page: usize,
) -> Vec<usize> {
    let lines_per_page = lines_per_page.max(1);
    let mut pages = vec![0];
    let mut span = Span::new(text, font, line_width);
    let mut lines = 0;
    while span.has_more_content() {
        span.next_line(metrics);
        lines += 1;
        if lines == lines_per_page && span.has_more_content() {
            pages.push(span.resume_offset());
            lines = 0;
        }
    }
    pages
}

/// Longest suffix of `text` that fits in `max_width` together with a leading ellipsis.
pub fn fit_tail<'a, M: TextMetrics + ?Sized>(
    metrics: &M,
    text: &'a str,
    font: Font,
    max_width: i32,
) -> &'a str {
    let ellipsis_width = metrics.text_width(ELLIPSIS, Font::Bold);
    let mut fitted = "";
    for (index, _) in text.char_indices().rev() {
        let tail = &text[index..];
        if metrics.text_width(tail, font) + ellipsis_width > max_width {
            break;
        }
        fitted = tail;
    }
    fitted
}

/// Longest prefix of `text` that fits in `max_width` together with a trailing ellipsis.
pub fn fit_head<'a, M: TextMetrics + ?Sized>(
    metrics: &M,
    text: &'a str,
    font: Font,
    max_width: i32,
) -> &'a str {
    let ellipsis_width = metrics.text_width(ELLIPSIS, Font::Bold);
    let mut fitted = "";
    for (index, ch) in text.char_indices() {
        let head = &text[..index + ch.len_utf8()];
        if metrics.text_width(head, font) + ellipsis_width > max_width {
            break;
        }
        fitted = head;
    }
    fitted
}

/// Draw `text` centered on `center`, replacing its beginning with `...` when too wide.
pub fn text_center_trim_left<D: Display + ?Sized>(
    display: &mut D,
    center: Point,
    text: &str,
    font: Font,
    max_width: i32,
    fg: Color,
    bg: Color,
) {
    if display.text_width(text, font) <= max_width {
        let x = center.x - display.text_width(text, font) / 2;
        display.text(Point::new(x, center.y), text, font, fg, bg);
        return;
    }
    let ellipsis_width = display.text_width(ELLIPSIS, Font::Bold);
    if max_width < ellipsis_width {
        return;
    }
    let tail = fit_tail(&*display, text, font, max_width);
    let tail_width = display.text_width(tail, font);
    let mut x = center.x - (tail_width + ellipsis_width) / 2;
    display.text(Point::new(x, center.y), ELLIPSIS, Font::Bold, Color::GREY, bg);
    x += ellipsis_width;
    display.text(Point::new(x, center.y), tail, font, fg, bg);
}

/// Draw `text` centered on `center`, replacing its end with `...` when too wide.
pub fn text_center_trim_right<D: Display + ?Sized>(
    display: &mut D,
    center: Point,
    text: &str,
    font: Font,
    max_width: i32,
    fg: Color,
    bg: Color,
) {
    if display.text_width(text, font) <= max_width {
        let x = center.x - display.text_width(text, font) / 2;
        display.text(Point::new(x, center.y), text, font, fg, bg);
        return;
    }
    let ellipsis_width = display.text_width(ELLIPSIS, Font::Bold);
    if max_width < ellipsis_width {
        return;
    }
    let head = fit_head(&*display, text, font, max_width);
    let head_width = display.text_width(head, font);
    let mut x = center.x - (head_width + ellipsis_width) / 2;
    display.text(Point::new(x, center.y), head, font, fg, bg);
    x += head_width;
    display.text(Point::new(x, center.y), ELLIPSIS, Font::Bold, Color::GREY, bg);
}

/// Group characters of `text` into chunks separated by spaces, `per_line` chunks per line.
pub fn chunkify(text: &str, chunk_len: usize, per_line: usize) -> String {
    let chunk_len = chunk_len.max(1);
    let per_line = per_line.max(1);
    let mut out = String::with_capacity(text.len() + text.len() / chunk_len + 1);
    let chars: Vec<char> = text.chars().filter(|ch| !ch.is_whitespace()).collect();
    for (index, chunk) in chars.chunks(chunk_len).enumerate() {
        if index > 0 {
            out.push(if index % per_line == 0 { '\n' } else { ' ' });
        }
        out.extend(chunk.iter());
    }
    out
}
