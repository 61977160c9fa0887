//! Multi-page content with swipe or button navigation.

use crate::core::color::Color;
use crate::core::component::{Component, UiResult};
use crate::core::display::{Align, Display, Font, TextMetrics};
use crate::core::event::{ButtonEvent, Event, EventCtx, InputKind, PhysicalButton, TouchEvent};
use crate::core::geometry::{Point, Rect};
use crate::core::text::layout::TextItem;
use crate::widgets::dialog::{Dialog, DialogVerbs};
use crate::widgets::text::Text;
use crate::widgets::theme::Theme;

/// Navigation arrows shown on pages before the last one.
pub const NEXT_PAGE: &str = ">";
pub const PREV_PAGE: &str = "<";

/// A sequence of pages; only the last page can confirm.
///
/// Touch: swiping up goes forward, swiping down goes back, taps reach the page. A `Confirmed`
/// from an earlier page moves forward. Buttons: on earlier pages the right button moves forward
/// and the left one moves back (or cancels on the first page); on the last page a `Cancelled`
/// from the page moves back when there is a previous page.
pub struct Paginated {
    pages: Vec<Box<dyn Component>>,
    page: usize,
    input: InputKind,
    screen: Rect,
    indicator: Point,
    fg: Color,
    bg: Color,
    swipe_distance: i32,
    swipe_origin: Option<Point>,
    held: Option<PhysicalButton>,
    page_changed: bool,
}

impl Paginated {
    pub fn new(theme: &Theme, input: InputKind, pages: Vec<Box<dyn Component>>) -> Self {
        let screen = theme.screen;
        Self {
            pages,
            page: 0,
            input,
            screen,
            indicator: Point::new(screen.right() - theme.borders.right, theme.header_height * 2 / 3),
            fg: theme.title_fg,
            bg: theme.bg,
            swipe_distance: theme.swipe_distance.max(1),
            swipe_origin: None,
            held: None,
            page_changed: true,
        }
    }

    /// Split `text` into pages of body text; the last page carries the dialog controls.
    pub fn from_text<M: TextMetrics + ?Sized>(
        metrics: &M,
        theme: &Theme,
        input: InputKind,
        title: &str,
        text: &str,
        font: Font,
        verbs: &DialogVerbs,
    ) -> Self {
        let mut content = Text::new(theme, title).with_new_lines(false);
        content.push(TextItem::Font(font));
        content.push(TextItem::text(text));
        let chunks = content.into_pages(metrics);
        let last = chunks.len().saturating_sub(1);
        let mut pages: Vec<Box<dyn Component>> = Vec::with_capacity(chunks.len());
        for (index, page) in chunks.into_iter().enumerate() {
            if index == last {
                pages.push(Box::new(Dialog::new(theme, input, page, verbs)));
            } else {
                pages.push(Box::new(page));
            }
        }
        Self::new(theme, input, pages)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn is_last_page(&self) -> bool {
        self.page + 1 >= self.pages.len()
    }

    fn change_page(&mut self, page: usize) {
        if page != self.page && page < self.pages.len() {
            self.page = page;
            self.page_changed = true;
            if let Some(current) = self.pages.get_mut(page) {
                current.request_repaint();
            }
        }
    }

    fn next_page(&mut self) {
        self.change_page(self.page + 1);
    }

    fn prev_page(&mut self) {
        if self.page > 0 {
            self.change_page(self.page - 1);
        }
    }

    fn forward(&mut self, ctx: &mut EventCtx, event: &Event) -> Option<UiResult> {
        let last = self.is_last_page();
        let page = self.pages.get_mut(self.page)?;
        match page.event(ctx, event)? {
            UiResult::Confirmed if !last => {
                self.next_page();
                None
            }
            UiResult::Cancelled if last && self.page > 0 && self.input == InputKind::Buttons => {
                self.prev_page();
                None
            }
            result => Some(result),
        }
    }

    fn touch_event(&mut self, ctx: &mut EventCtx, event: &Event, touch: TouchEvent) -> Option<UiResult> {
        match touch {
            TouchEvent::Start(point) => self.swipe_origin = Some(point),
            TouchEvent::End(point) => {
                if let Some(origin) = self.swipe_origin.take() {
                    let dy = point.y - origin.y;
                    if dy <= -self.swipe_distance && !self.is_last_page() {
                        self.next_page();
                        return None;
                    }
                    if dy >= self.swipe_distance && self.page > 0 {
                        self.prev_page();
                        return None;
                    }
                }
            }
            TouchEvent::Move(_) => {}
        }
        self.forward(ctx, event)
    }

    fn button_event(&mut self, ctx: &mut EventCtx, event: &Event, button: ButtonEvent) -> Option<UiResult> {
        if self.is_last_page() {
            return self.forward(ctx, event);
        }
        match button {
            ButtonEvent::Pressed(which) => self.held = Some(which),
            ButtonEvent::Released(which) if self.held == Some(which) => {
                self.held = None;
                match which {
                    PhysicalButton::Right => self.next_page(),
                    PhysicalButton::Left if self.page == 0 => return Some(UiResult::Cancelled),
                    PhysicalButton::Left => self.prev_page(),
                }
            }
            ButtonEvent::Released(_) => self.held = None,
        }
        None
    }

    fn paint_indicator(&self, display: &mut dyn Display) {
        if self.pages.len() < 2 {
            return;
        }
        let label = match self.input {
            InputKind::Touch => format!("{}/{}", self.page + 1, self.pages.len()),
            InputKind::Buttons => {
                let mut arrows = String::new();
                if self.page > 0 {
                    arrows.push_str(PREV_PAGE);
                }
                if !self.is_last_page() {
                    arrows.push_str(NEXT_PAGE);
                }
                arrows
            }
        };
        display.text_aligned(self.indicator, &label, Font::Mono, self.fg, self.bg, Align::Right);
    }
}

impl Component for Paginated {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event) -> Option<UiResult> {
        match (self.input, event) {
            (InputKind::Touch, Event::Touch(touch)) => self.touch_event(ctx, event, *touch),
            (InputKind::Buttons, Event::Button(button)) => self.button_event(ctx, event, *button),
            _ => self.forward(ctx, event),
        }
    }

    fn paint(&mut self, display: &mut dyn Display) {
        if self.page_changed {
            display.bar(self.screen, self.bg);
            self.paint_indicator(display);
            self.page_changed = false;
        }
        if let Some(page) = self.pages.get_mut(self.page) {
            page.paint(display);
        }
    }

    fn request_repaint(&mut self) {
        self.page_changed = true;
        if let Some(page) = self.pages.get_mut(self.page) {
            page.request_repaint();
        }
    }

    fn read_content(&self, out: &mut Vec<String>) {
        if let Some(page) = self.pages.get(self.page) {
            page.read_content(out);
        }
    }

    fn page_count(&self) -> usize {
        self.pages.len().max(1)
    }
}
