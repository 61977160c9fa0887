//! Text block with an optional header, and a single-line label.

use crate::core::color::Color;
use crate::core::component::{Component, UiResult};
use crate::core::display::{Align, Display, Font, Icon, TextMetrics};
use crate::core::event::{Event, EventCtx};
use crate::core::geometry::{Point, Rect};
use crate::core::text::layout::{paginate_items, render_text, PageStart, TextItem, TextLayout};
use crate::widgets::theme::Theme;

#[derive(Debug, Clone, PartialEq)]
struct Header {
    title: String,
    icon: Option<(Icon, Color)>,
    fg: Color,
    font: Font,
    height: i32,
}

/// Rich text content under a title.
///
/// Content is built with the `normal`/`bold`/`mono`/`br` helpers, which append
/// [`TextItem`]s. Text that does not fit in `max_lines` is cut off with an ellipsis;
/// [`Text::into_pages`] splits it so nothing is cut.
#[derive(Debug, Clone)]
pub struct Text {
    header: Option<Header>,
    items: Vec<TextItem>,
    area: Rect,
    layout: TextLayout,
    /// Where the next page begins, when this text is one page of a longer one.
    page_end: Option<PageStart>,
    repaint: bool,
}

impl Text {
    pub fn new(theme: &Theme, title: impl Into<String>) -> Self {
        let title = title.into();
        let header = (!title.is_empty()).then(|| Header {
            title,
            icon: None,
            fg: theme.title_fg,
            font: theme.title_font,
            height: theme.header_height,
        });
        Self::in_area(theme, theme.body_area(), header)
    }

    /// Text without header, filling `area`.
    pub fn plain(theme: &Theme, area: Rect) -> Self {
        Self::in_area(theme, area, None)
    }

    fn in_area(theme: &Theme, area: Rect, header: Option<Header>) -> Self {
        let max_lines = (area.height / theme.line_height.max(1)).max(1);
        let mut layout = TextLayout::new(area.x, area.y, area.width, theme.line_height)
            .with_max_lines(max_lines)
            .with_colors(theme.fg, theme.bg)
            .with_new_lines(false);
        layout.font = theme.text_font;
        Self {
            header,
            items: Vec::new(),
            area,
            layout,
            page_end: None,
            repaint: true,
        }
    }

    pub fn with_icon(mut self, icon: Icon, color: Color) -> Self {
        if let Some(header) = self.header.as_mut() {
            header.icon = Some((icon, color));
        }
        self
    }

    pub fn with_title_color(mut self, color: Color) -> Self {
        if let Some(header) = self.header.as_mut() {
            header.fg = color;
        }
        self
    }

    pub fn with_max_lines(mut self, max_lines: i32) -> Self {
        self.layout.max_lines = max_lines;
        self
    }

    pub fn with_new_lines(mut self, new_lines: bool) -> Self {
        self.layout.new_lines = new_lines;
        self
    }

    pub fn with_break_words(mut self, break_words: bool) -> Self {
        self.layout.break_words = break_words;
        self
    }

    pub fn with_page_overflow(mut self, render_page_overflow: bool) -> Self {
        self.layout.render_page_overflow = render_page_overflow;
        self
    }

    /// Start drawing at `item_offset`, `char_offset` bytes into that item.
    pub fn starting_at(mut self, item_offset: usize, char_offset: usize) -> Self {
        self.layout.item_offset = item_offset;
        self.layout.char_offset = char_offset;
        self
    }

    /// Split into pages that each fit the text area. Every page repeats the header.
    pub fn into_pages<M: TextMetrics + ?Sized>(self, metrics: &M) -> Vec<Text> {
        let starts = paginate_items(metrics, &self.items, &self.paint_layout());
        let mut pages = Vec::with_capacity(starts.len());
        for (index, start) in starts.iter().enumerate() {
            let mut page = self.clone();
            page.layout.item_offset = start.item;
            page.layout.char_offset = start.offset;
            page.page_end = starts.get(index + 1).copied();
            pages.push(page);
        }
        pages
    }

    pub fn push(&mut self, item: TextItem) {
        self.items.push(item);
        self.repaint = true;
    }

    pub fn normal(mut self, text: impl Into<String>) -> Self {
        self.push(TextItem::Font(Font::Normal));
        self.push(TextItem::Text(text.into()));
        self
    }

    pub fn bold(mut self, text: impl Into<String>) -> Self {
        self.push(TextItem::Font(Font::Bold));
        self.push(TextItem::Text(text.into()));
        self
    }

    pub fn mono(mut self, text: impl Into<String>) -> Self {
        self.push(TextItem::Font(Font::Mono));
        self.push(TextItem::Text(text.into()));
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.push(TextItem::Color(color));
        self
    }

    pub fn br(mut self) -> Self {
        self.push(TextItem::Br);
        self
    }

    pub fn br_half(mut self) -> Self {
        self.push(TextItem::BrHalf);
        self
    }

    pub fn items(&self) -> &[TextItem] {
        &self.items
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn title(&self) -> Option<&str> {
        self.header.as_ref().map(|header| header.title.as_str())
    }

    // First baseline sits one line below the top of the area.
    fn paint_layout(&self) -> TextLayout {
        let mut layout = self.layout.clone();
        layout.header_height = self.area.y;
        layout.offset_y = self.area.y + self.layout.line_height;
        layout
    }

    /// Strings drawn on this page, with the split items cut at the page bounds.
    fn page_strings(&self) -> impl Iterator<Item = &str> + '_ {
        let first = self.layout.item_offset;
        let end = self.page_end;
        self.items
            .iter()
            .enumerate()
            .skip(first)
            .take_while(move |(index, _)| match end {
                Some(end) => *index < end.item || (*index == end.item && end.offset > 0),
                None => true,
            })
            .filter_map(move |(index, item)| {
                let TextItem::Text(text) = item else {
                    return None;
                };
                let from = if index == first {
                    self.layout.char_offset.min(text.len())
                } else {
                    0
                };
                let to = match end {
                    Some(end) if end.item == index => end.offset.min(text.len()),
                    _ => text.len(),
                };
                let piece = text.get(from..to.max(from))?.trim();
                (!piece.is_empty()).then_some(piece)
            })
    }

    fn paint_header(&self, display: &mut dyn Display, header: &Header) {
        let baseline = header.height * 2 / 3;
        let mut x = self.area.x;
        if let Some((icon, color)) = header.icon {
            display.icon(Point::new(x, baseline / 3), icon, color, self.layout.bg);
            x += header.height * 3 / 4;
        }
        display.text(
            Point::new(x, baseline),
            &header.title,
            header.font,
            header.fg,
            self.layout.bg,
        );
    }
}

impl Component for Text {
    fn event(&mut self, _ctx: &mut EventCtx, _event: &Event) -> Option<UiResult> {
        None
    }

    fn paint(&mut self, display: &mut dyn Display) {
        if !self.repaint {
            return;
        }
        if let Some(header) = &self.header {
            self.paint_header(display, header);
        }
        display.bar(self.area, self.layout.bg);
        render_text(display, &self.items, &self.paint_layout());
        self.repaint = false;
    }

    fn request_repaint(&mut self) {
        self.repaint = true;
    }

    fn read_content(&self, out: &mut Vec<String>) {
        if let Some(header) = &self.header {
            out.push(header.title.clone());
        }
        out.extend(self.page_strings().map(str::to_string));
    }
}

/// One line of text aligned inside its area.
#[derive(Debug, Clone)]
pub struct Label {
    text: String,
    area: Rect,
    align: Align,
    font: Font,
    fg: Color,
    bg: Color,
    repaint: bool,
}

impl Label {
    pub fn new(text: impl Into<String>, area: Rect, align: Align, font: Font) -> Self {
        Self {
            text: text.into(),
            area,
            align,
            font,
            fg: Color::WHITE,
            bg: Color::BLACK,
            repaint: true,
        }
    }

    pub fn left_aligned(text: impl Into<String>, area: Rect, font: Font) -> Self {
        Self::new(text, area, Align::Left, font)
    }

    pub fn centered(text: impl Into<String>, area: Rect, font: Font) -> Self {
        Self::new(text, area, Align::Center, font)
    }

    pub fn right_aligned(text: impl Into<String>, area: Rect, font: Font) -> Self {
        Self::new(text, area, Align::Right, font)
    }

    pub fn with_colors(mut self, fg: Color, bg: Color) -> Self {
        self.fg = fg;
        self.bg = bg;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.repaint = true;
    }

    pub fn area(&self) -> Rect {
        self.area
    }
}

impl Component for Label {
    fn event(&mut self, _ctx: &mut EventCtx, _event: &Event) -> Option<UiResult> {
        None
    }

    fn paint(&mut self, display: &mut dyn Display) {
        if !self.repaint {
            return;
        }
        display.bar(self.area, self.bg);
        let x = match self.align {
            Align::Left => self.area.x,
            Align::Center => self.area.center().x,
            Align::Right => self.area.right(),
        };
        let baseline = self.area.y + (self.area.height + display.line_height(self.font)) / 2;
        display.text_aligned(
            Point::new(x, baseline.min(self.area.bottom())),
            &self.text,
            self.font,
            self.fg,
            self.bg,
            self.align,
        );
        self.repaint = false;
    }

    fn request_repaint(&mut self) {
        self.repaint = true;
    }

    fn read_content(&self, out: &mut Vec<String>) {
        if !self.text.is_empty() {
            out.push(self.text.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Label, Text};
    use crate::core::component::{content_of, Component};
    use crate::core::display::Font;
    use crate::core::geometry::{Point, Rect};
    use crate::core::text::width::MonospaceMetrics;
    use crate::render::RecordingDisplay;
    use crate::widgets::theme::Theme;
    use pretty_assertions::assert_eq;

    #[test]
    fn text_paints_header_then_content_once() {
        let theme = Theme::touch(240, 240);
        let mut text = Text::new(&theme, "Send")
            .normal("Amount:")
            .br()
            .bold("0.001 BTC");
        let mut display = RecordingDisplay::new(240, 240);
        text.paint(&mut display);
        assert_eq!(display.screen_contents(), vec!["Send", "Amount:", "0.001 BTC"]);
        text.paint(&mut display);
        assert_eq!(display.screen_contents().len(), 3);
        text.request_repaint();
        text.paint(&mut display);
        assert_eq!(display.screen_contents().len(), 6);
    }

    #[test]
    fn body_starts_below_header() {
        let theme = Theme::touch(240, 240);
        let mut text = Text::new(&theme, "Title").normal("body");
        let mut display = RecordingDisplay::new(240, 240);
        text.paint(&mut display);
        let origins = display.text_origins();
        assert_eq!(origins[1], Point::new(6, 42 + 26));
        assert!(origins[0].y < 42);
    }

    #[test]
    fn read_content_lists_title_and_strings() {
        let theme = Theme::touch(240, 240);
        let text = Text::new(&theme, "Warning").normal("Continue?").br().mono("");
        assert_eq!(content_of(&text), vec!["Warning", "Continue?"]);
    }

    #[test]
    fn pages_split_content_at_the_last_visible_line() {
        let theme = Theme::buttons(128, 64);
        let text = Text::new(&theme, "Note")
            .normal("one two three four five six seven eight nine ten eleven twelve");
        let pages = text.into_pages(&MonospaceMetrics::new(6, 10));
        assert_eq!(pages.len(), 2);
        assert_eq!(
            content_of(&pages[0]),
            vec!["Note", "one two three four five six seven eight nine ten eleven"]
        );
        assert_eq!(content_of(&pages[1]), vec!["Note", "twelve"]);

        let mut display = RecordingDisplay::new(128, 64).with_metrics(MonospaceMetrics::new(6, 10));
        let mut second = pages[1].clone();
        second.paint(&mut display);
        assert_eq!(display.screen_contents(), vec!["Note", "twelve"]);
    }

    #[test]
    fn label_alignment() {
        let mut display = RecordingDisplay::new(240, 240);
        let area = Rect::new(0, 0, 100, 30);
        Label::right_aligned("abc", area, Font::Normal).paint(&mut display);
        Label::centered("abcd", area, Font::Normal).paint(&mut display);
        let origins = display.text_origins();
        assert_eq!(origins[0].x, 70);
        assert_eq!(origins[1].x, 30);
        assert_eq!(origins[0].y, 28);
    }
}
