//! Passphrase entry.
//!
//! Touch models use a multi-tap keyboard: each key holds a group of characters, tapping the same
//! key again within [`MULTI_TAP_TIMEOUT`] cycles the pending character, and swiping left or right
//! switches between pages of key groups. Button-only models cycle through single characters.

use std::time::Duration;

use crate::core::color::Color;
use crate::core::component::{Component, UiResult};
use crate::core::display::{Align, Display, Font, Icon};
use crate::core::event::{Event, EventCtx, TimerToken, TouchEvent};
use crate::core::geometry::{Grid, Point, Rect};
use crate::core::text::layout::{fit_tail, ELLIPSIS};
use crate::widgets::button::{Button, ButtonContent, ButtonMsg, ButtonStyleSheet};
use crate::widgets::button_controller::{ButtonController, ButtonLayout, ButtonPos};
use crate::widgets::theme::Theme;

pub const MAX_LENGTH: usize = 50;
pub const MULTI_TAP_TIMEOUT: Duration = Duration::from_millis(1000);

const ERASE_HOLD_DURATION: Duration = Duration::from_millis(1500);

pub const KEY_PAGES: [[&str; 10]; 4] = [
    ["1", "2", "3", "4", "5", "6", "7", "8", "9", "0"],
    [" ", "abc", "def", "ghi", "jkl", "mno", "pqrs", "tuv", "wxyz", "*#"],
    [" ", "ABC", "DEF", "GHI", "JKL", "MNO", "PQRS", "TUV", "WXYZ", "*#"],
    ["_<>", ".:@", "/|\\", "!()", "+%&", "-[]", "?{}", ",'`", ";\"~", "$^="],
];

/// Keypad cells holding keys; cell 9 is erase and cell 11 is confirm.
const KEY_CELLS: [usize; 10] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 10];
const ERASE_CELL: usize = 9;
const CONFIRM_CELL: usize = 11;

/// Key whose character is still cycling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingKey {
    key: usize,
    presses: usize,
    timer: TimerToken,
}

/// Entered text as shown in the input line.
#[derive(Debug, Clone)]
struct InputLine {
    text: String,
    area: Rect,
    fg: Color,
    bg: Color,
    pending_fg: Color,
    has_pending: bool,
    repaint: bool,
}

impl InputLine {
    fn new(theme: &Theme, area: Rect) -> Self {
        Self {
            text: String::new(),
            area,
            fg: theme.fg,
            bg: theme.bg,
            pending_fg: theme.accent,
            has_pending: false,
            repaint: true,
        }
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn is_full(&self) -> bool {
        self.len() >= MAX_LENGTH
    }

    fn paint(&mut self, display: &mut dyn Display) {
        if !self.repaint {
            return;
        }
        display.bar(self.area, self.bg);
        let baseline = self.area.y + (self.area.height + display.line_height(Font::Mono)) / 2;
        let width = self.area.width;
        let mut x = self.area.x;
        let shown = if display.text_width(&self.text, Font::Mono) > width {
            display.text(Point::new(x, baseline), ELLIPSIS, Font::Bold, self.fg, self.bg);
            x += display.text_width(ELLIPSIS, Font::Bold);
            fit_tail(&*display, &self.text, Font::Mono, width).to_string()
        } else {
            self.text.clone()
        };
        if self.has_pending {
            let split = shown.char_indices().last().map_or(0, |(index, _)| index);
            let (done, pending) = shown.split_at(split);
            display.text(Point::new(x, baseline), done, Font::Mono, self.fg, self.bg);
            let x = x + display.text_width(done, Font::Mono);
            display.text(Point::new(x, baseline), pending, Font::Mono, self.pending_fg, self.bg);
        } else {
            display.text(Point::new(x, baseline), &shown, Font::Mono, self.fg, self.bg);
        }
        self.repaint = false;
    }
}

/// Touchscreen multi-tap keyboard.
pub struct PassphraseKeyboard {
    input: InputLine,
    page: usize,
    keys: Vec<Button>,
    erase: Button,
    cancel: Button,
    confirm: Button,
    pending: Option<PendingKey>,
    swipe_origin: Option<Point>,
    swipe_distance: i32,
}

impl PassphraseKeyboard {
    /// Starts on the lowercase page.
    pub fn new(theme: &Theme) -> Self {
        let (header, keypad) = theme.content_area().split_top(theme.header_height);
        let grid = Grid::new(keypad, 3, 4).with_spacing(theme.button_spacing);
        let page = 1;
        let keys = KEY_PAGES[page]
            .iter()
            .zip(KEY_CELLS)
            .map(|(label, cell)| {
                Button::with_text(grid.cell(cell), key_label(label), ButtonStyleSheet::default_for(theme))
            })
            .collect();
        let mut keyboard = Self {
            input: InputLine::new(theme, header),
            page,
            keys,
            erase: Button::with_icon(grid.cell(ERASE_CELL), Icon::Back, ButtonStyleSheet::default_for(theme))
                .with_long_press(ERASE_HOLD_DURATION),
            cancel: Button::with_icon(grid.cell(ERASE_CELL), Icon::Cancel, ButtonStyleSheet::cancel(theme)),
            confirm: Button::with_icon(grid.cell(CONFIRM_CELL), Icon::Confirm, ButtonStyleSheet::confirm(theme)),
            pending: None,
            swipe_origin: None,
            swipe_distance: theme.swipe_distance.max(1),
        };
        keyboard.update_buttons();
        keyboard
    }

    pub fn passphrase(&self) -> &str {
        &self.input.text
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Area of the key with index `key` on the current page.
    pub fn key_area(&self, key: usize) -> Option<Rect> {
        self.keys.get(key).map(Button::area)
    }

    pub fn erase_area(&self) -> Rect {
        self.erase.area()
    }

    pub fn confirm_area(&self) -> Rect {
        self.confirm.area()
    }

    fn set_page(&mut self, page: usize) {
        self.commit_pending();
        self.page = page % KEY_PAGES.len();
        for (button, label) in self.keys.iter_mut().zip(KEY_PAGES[self.page]) {
            button.set_content(ButtonContent::Text(key_label(label)));
        }
        self.update_buttons();
    }

    fn commit_pending(&mut self) {
        if self.pending.take().is_some() {
            self.input.has_pending = false;
            self.input.repaint = true;
        }
    }

    fn press_key(&mut self, ctx: &mut EventCtx, key: usize) {
        let group: Vec<char> = KEY_PAGES[self.page][key].chars().collect();
        if group.is_empty() {
            return;
        }
        match self.pending {
            Some(pending) if pending.key == key => {
                let presses = pending.presses + 1;
                self.input.text.pop();
                self.input.text.push(group[presses % group.len()]);
                self.pending = Some(PendingKey {
                    key,
                    presses,
                    timer: ctx.request_timer(MULTI_TAP_TIMEOUT),
                });
            }
            _ => {
                self.commit_pending();
                if self.input.is_full() {
                    return;
                }
                self.input.text.push(group[0]);
                if group.len() > 1 {
                    self.pending = Some(PendingKey {
                        key,
                        presses: 0,
                        timer: ctx.request_timer(MULTI_TAP_TIMEOUT),
                    });
                    self.input.has_pending = true;
                }
            }
        }
        self.input.repaint = true;
        self.update_buttons();
    }

    fn update_buttons(&mut self) {
        let empty = self.input.text.is_empty();
        let full = self.input.is_full();
        self.erase.enable_if(!empty);
        self.cancel.enable_if(empty);
        let pending_key = self.pending.map(|pending| pending.key);
        for (index, key) in self.keys.iter_mut().enumerate() {
            // A full input still lets the pending key cycle.
            key.enable_if(!full || pending_key == Some(index));
        }
        if empty {
            self.cancel.request_repaint();
        } else {
            self.erase.request_repaint();
        }
    }

    /// Reset buttons pressed at the start of a swipe.
    fn release_buttons(&mut self, ctx: &mut EventCtx) {
        let outside = Event::Touch(TouchEvent::End(Point::new(-1, -1)));
        self.erase.handle(ctx, &outside);
        self.cancel.handle(ctx, &outside);
        self.confirm.handle(ctx, &outside);
        for key in self.keys.iter_mut() {
            key.handle(ctx, &outside);
        }
    }

    fn handle_swipe(&mut self, ctx: &mut EventCtx, touch: TouchEvent) -> bool {
        match touch {
            TouchEvent::Start(point) => {
                self.swipe_origin = Some(point);
                false
            }
            TouchEvent::End(point) => {
                let Some(origin) = self.swipe_origin.take() else {
                    return false;
                };
                let dx = point.x - origin.x;
                if dx.abs() < self.swipe_distance {
                    return false;
                }
                self.release_buttons(ctx);
                if dx < 0 {
                    self.set_page(self.page + 1);
                } else {
                    self.set_page(self.page + KEY_PAGES.len() - 1);
                }
                true
            }
            TouchEvent::Move(_) => false,
        }
    }
}

fn key_label(group: &str) -> String {
    if group == " " {
        "_".to_string()
    } else {
        group.to_string()
    }
}

impl Component for PassphraseKeyboard {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event) -> Option<UiResult> {
        match event {
            Event::Timer(token) if self.pending.map(|p| p.timer) == Some(*token) => {
                self.commit_pending();
                self.update_buttons();
                return None;
            }
            Event::Touch(touch) => {
                if self.handle_swipe(ctx, *touch) {
                    return None;
                }
            }
            _ => {}
        }

        if let Some(ButtonMsg::Clicked) = self.confirm.handle(ctx, event) {
            self.commit_pending();
            return Some(UiResult::Text(self.input.text.clone()));
        }
        if self.input.text.is_empty() {
            if let Some(ButtonMsg::Clicked) = self.cancel.handle(ctx, event) {
                return Some(UiResult::Cancelled);
            }
        } else {
            match self.erase.handle(ctx, event) {
                Some(ButtonMsg::Clicked) => {
                    self.commit_pending();
                    self.input.text.pop();
                    self.input.repaint = true;
                    self.update_buttons();
                    return None;
                }
                Some(ButtonMsg::LongPressed) => {
                    self.commit_pending();
                    self.input.text.clear();
                    self.input.repaint = true;
                    self.update_buttons();
                    return None;
                }
                _ => {}
            }
        }

        let clicked = self
            .keys
            .iter_mut()
            .enumerate()
            .find_map(|(index, key)| match key.handle(ctx, event) {
                Some(ButtonMsg::Clicked) => Some(index),
                _ => None,
            });
        if let Some(key) = clicked {
            self.press_key(ctx, key);
        }
        None
    }

    fn paint(&mut self, display: &mut dyn Display) {
        self.input.paint(display);
        if self.input.text.is_empty() {
            self.cancel.paint(display);
        } else {
            self.erase.paint(display);
        }
        self.confirm.paint(display);
        for key in self.keys.iter_mut() {
            key.paint(display);
        }
    }

    fn request_repaint(&mut self) {
        self.input.repaint = true;
        self.erase.request_repaint();
        self.cancel.request_repaint();
        self.confirm.request_repaint();
        for key in self.keys.iter_mut() {
            key.request_repaint();
        }
    }

    fn read_content(&self, out: &mut Vec<String>) {
        for key in &self.keys {
            key.read_content(out);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharChoice {
    Delete,
    Enter,
    Char(char),
}

/// Button-only entry: left and right cycle through characters, both buttons select.
pub struct PassphraseSelector {
    input: InputLine,
    choices: Vec<CharChoice>,
    current: usize,
    choice_area: Rect,
    controller: ButtonController,
    fg: Color,
    bg: Color,
    repaint: bool,
}

impl PassphraseSelector {
    pub fn new(theme: &Theme) -> Self {
        let mut choices = vec![CharChoice::Delete, CharChoice::Enter];
        for page in [1, 2, 0, 3] {
            for group in KEY_PAGES[page] {
                for ch in group.chars() {
                    let choice = CharChoice::Char(ch);
                    if !choices.contains(&choice) {
                        choices.push(choice);
                    }
                }
            }
        }
        let (header, rest) = theme.content_area().split_top(theme.header_height * 2);
        let (choice_area, _) = rest.split_bottom(theme.button_height);
        let layout = ButtonLayout::new()
            .with(ButtonPos::Left, "<", UiResult::Index(0))
            .with(ButtonPos::Middle, "SELECT", UiResult::Confirmed)
            .with(ButtonPos::Right, ">", UiResult::Index(1));
        Self {
            input: InputLine::new(theme, header),
            choices,
            // First lowercase letter.
            current: 3,
            choice_area,
            controller: ButtonController::new(theme, layout),
            fg: theme.fg,
            bg: theme.bg,
            repaint: true,
        }
    }

    pub fn passphrase(&self) -> &str {
        &self.input.text
    }

    pub fn current_choice(&self) -> String {
        match self.choices[self.current] {
            CharChoice::Delete => "DELETE".to_string(),
            CharChoice::Enter => "ENTER".to_string(),
            CharChoice::Char(' ') => "SPACE".to_string(),
            CharChoice::Char(ch) => ch.to_string(),
        }
    }

    fn select(&mut self) -> Option<UiResult> {
        match self.choices[self.current] {
            CharChoice::Delete if self.input.text.is_empty() => return Some(UiResult::Cancelled),
            CharChoice::Delete => {
                self.input.text.pop();
            }
            CharChoice::Enter => return Some(UiResult::Text(self.input.text.clone())),
            CharChoice::Char(ch) => {
                if !self.input.is_full() {
                    self.input.text.push(ch);
                }
            }
        }
        self.input.repaint = true;
        None
    }
}

impl Component for PassphraseSelector {
    fn event(&mut self, _ctx: &mut EventCtx, event: &Event) -> Option<UiResult> {
        let len = self.choices.len();
        match self.controller.handle(event)? {
            ButtonPos::Left => self.current = (self.current + len - 1) % len,
            ButtonPos::Right => self.current = (self.current + 1) % len,
            ButtonPos::Middle => return self.select(),
        }
        self.repaint = true;
        None
    }

    fn paint(&mut self, display: &mut dyn Display) {
        self.input.paint(display);
        if self.repaint {
            display.bar(self.choice_area, self.bg);
            let baseline = self.choice_area.y
                + (self.choice_area.height + display.line_height(Font::Bold)) / 2;
            display.text_aligned(
                Point::new(self.choice_area.center().x, baseline),
                &self.current_choice(),
                Font::Bold,
                self.fg,
                self.bg,
                Align::Center,
            );
            self.repaint = false;
        }
        self.controller.paint(display);
    }

    fn request_repaint(&mut self) {
        self.input.repaint = true;
        self.repaint = true;
        self.controller.request_repaint();
    }

    fn read_content(&self, out: &mut Vec<String>) {
        out.push(self.current_choice());
    }
}
