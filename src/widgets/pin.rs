//! PIN entry: a shuffled keypad on touch models, a digit selector on button-only models.
//!
//! Both finish with `UiResult::Text(pin)` on confirm and `UiResult::Cancelled` on cancel.
//! Digits never reach the log.

use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::core::color::Color;
use crate::core::component::{Component, UiResult};
use crate::core::display::{Align, Display, Font, Icon};
use crate::core::event::{Event, EventCtx, TimerToken};
use crate::core::geometry::{Grid, Point, Rect};
use crate::core::text::layout::ELLIPSIS;
use crate::widgets::button::{Button, ButtonMsg, ButtonStyleSheet};
use crate::widgets::button_controller::{ButtonController, ButtonLayout, ButtonPos};
use crate::widgets::theme::Theme;

pub const MAX_LENGTH: usize = 50;
pub const MAX_VISIBLE_DOTS: usize = 14;

const DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];
const LAST_DIGIT_TIMEOUT: Duration = Duration::from_secs(1);
const WARNING_TIMEOUT: Duration = Duration::from_secs(2);
const ERASE_HOLD_DURATION: Duration = Duration::from_millis(1500);
const DOT: &str = "*";

/// Keypad cells holding digits; cell 9 is erase/cancel and cell 11 is confirm.
const DIGIT_CELLS: [usize; 10] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 10];
const ERASE_CELL: usize = 9;
const CONFIRM_CELL: usize = 11;

/// Entered digits plus the prompt shown while there are none.
#[derive(Debug, Clone)]
struct PinText {
    digits: String,
    prompt: String,
    subprompt: String,
    warning: Option<String>,
    warning_until: Option<Instant>,
    show_last_digit: bool,
    reveal: bool,
    area: Rect,
    fg: Color,
    bg: Color,
    warning_fg: Color,
    repaint: bool,
}

impl PinText {
    fn new(theme: &Theme, area: Rect, prompt: &str, subprompt: &str) -> Self {
        Self {
            digits: String::new(),
            prompt: prompt.to_string(),
            subprompt: subprompt.to_string(),
            warning: None,
            warning_until: None,
            show_last_digit: false,
            reveal: false,
            area,
            fg: theme.fg,
            bg: theme.bg,
            warning_fg: theme.warning,
            repaint: true,
        }
    }

    fn len(&self) -> usize {
        self.digits.chars().count()
    }

    fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    fn is_full(&self) -> bool {
        self.len() >= MAX_LENGTH
    }

    fn push(&mut self, digit: char) -> bool {
        if self.is_full() {
            return false;
        }
        self.digits.push(digit);
        self.warning = None;
        self.repaint = true;
        true
    }

    fn pop(&mut self) {
        self.digits.pop();
        self.show_last_digit = false;
        self.repaint = true;
    }

    fn clear(&mut self) {
        self.digits.clear();
        self.show_last_digit = false;
        self.repaint = true;
    }

    /// Masked rendition of the digits, keeping at most `MAX_VISIBLE_DOTS` symbols.
    fn masked(&self) -> String {
        let len = self.len();
        let visible = len.min(MAX_VISIBLE_DOTS);
        let mut out = String::new();
        if len > MAX_VISIBLE_DOTS {
            out.push_str(ELLIPSIS);
        }
        if self.reveal {
            out.extend(self.digits.chars().skip(len - visible));
            return out;
        }
        for _ in 0..visible.saturating_sub(1) {
            out.push_str(DOT);
        }
        match self.digits.chars().last() {
            Some(last) if self.show_last_digit => out.push(last),
            Some(_) => out.push_str(DOT),
            None => {}
        }
        out
    }

    fn expire_warning(&mut self) {
        if self.warning.is_none() {
            return;
        }
        let now = Instant::now();
        match self.warning_until {
            None => self.warning_until = Some(now + WARNING_TIMEOUT),
            Some(until) if now >= until => {
                self.warning = None;
                self.warning_until = None;
                self.repaint = true;
            }
            Some(_) => {}
        }
    }

    fn paint(&mut self, display: &mut dyn Display) {
        self.expire_warning();
        if !self.repaint {
            return;
        }
        display.bar(self.area, self.bg);
        let center = self.area.center().x;
        let line = display.line_height(Font::Normal);
        if let Some(warning) = &self.warning {
            let baseline = self.area.y + (self.area.height + line) / 2;
            display.text_aligned(
                Point::new(center, baseline),
                warning,
                Font::Bold,
                self.warning_fg,
                self.bg,
                Align::Center,
            );
        } else if self.is_empty() {
            if self.subprompt.is_empty() {
                let baseline = self.area.y + (self.area.height + line) / 2;
                display.text_aligned(
                    Point::new(center, baseline),
                    &self.prompt,
                    Font::Bold,
                    self.fg,
                    self.bg,
                    Align::Center,
                );
            } else {
                let baseline = (self.area.y + line).min(self.area.bottom());
                display.text_aligned(
                    Point::new(center, baseline),
                    &self.prompt,
                    Font::Bold,
                    self.fg,
                    self.bg,
                    Align::Center,
                );
                display.text_aligned(
                    Point::new(center, (baseline + line).min(self.area.bottom())),
                    &self.subprompt,
                    Font::Normal,
                    self.fg,
                    self.bg,
                    Align::Center,
                );
            }
        } else {
            let baseline = self.area.y + (self.area.height + line) / 2;
            display.text_aligned(
                Point::new(center, baseline),
                &self.masked(),
                Font::Mono,
                self.fg,
                self.bg,
                Align::Center,
            );
        }
        self.repaint = false;
    }

    fn read_content(&self, out: &mut Vec<String>) {
        if let Some(warning) = &self.warning {
            out.push(warning.clone());
        } else if self.is_empty() {
            out.push(self.prompt.clone());
            if !self.subprompt.is_empty() {
                out.push(self.subprompt.clone());
            }
        } else {
            out.push(self.masked());
        }
    }
}

/// Touchscreen keypad with the digits in random positions.
pub struct PinKeyboard {
    text: PinText,
    allow_cancel: bool,
    digits: Vec<(char, Button)>,
    erase: Button,
    cancel: Button,
    confirm: Button,
    last_digit_timer: Option<TimerToken>,
}

impl PinKeyboard {
    pub fn new<R: Rng + ?Sized>(
        theme: &Theme,
        prompt: &str,
        subprompt: &str,
        allow_cancel: bool,
        rng: &mut R,
    ) -> Self {
        let (header, keypad) = theme.content_area().split_top(theme.header_height);
        let grid = Grid::new(keypad, 3, 4).with_spacing(theme.button_spacing);

        let mut order = DIGITS;
        order.shuffle(rng);
        let digits = order
            .iter()
            .zip(DIGIT_CELLS)
            .map(|(&digit, cell)| {
                let button = Button::with_text(
                    grid.cell(cell),
                    digit.to_string(),
                    ButtonStyleSheet::default_for(theme),
                );
                (digit, button)
            })
            .collect();

        let mut keyboard = Self {
            text: PinText::new(theme, header, prompt, subprompt),
            allow_cancel,
            digits,
            erase: Button::with_icon(grid.cell(ERASE_CELL), Icon::Back, ButtonStyleSheet::default_for(theme))
                .with_long_press(ERASE_HOLD_DURATION),
            cancel: Button::with_icon(grid.cell(ERASE_CELL), Icon::Cancel, ButtonStyleSheet::cancel(theme)),
            confirm: Button::with_icon(grid.cell(CONFIRM_CELL), Icon::Confirm, ButtonStyleSheet::confirm(theme)),
            last_digit_timer: None,
        };
        keyboard.update_buttons();
        keyboard
    }

    /// Show `warning` in place of the prompt for a couple of seconds.
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.text.warning = Some(warning.into());
        self
    }

    pub fn pin(&self) -> &str {
        &self.text.digits
    }

    /// Area of the key showing `digit`.
    pub fn key_area(&self, digit: char) -> Option<Rect> {
        self.digits
            .iter()
            .find(|(d, _)| *d == digit)
            .map(|(_, button)| button.area())
    }

    pub fn erase_area(&self) -> Rect {
        self.erase.area()
    }

    pub fn confirm_area(&self) -> Rect {
        self.confirm.area()
    }

    fn update_buttons(&mut self) {
        let empty = self.text.is_empty();
        let full = self.text.is_full();
        self.cancel.enable_if(empty && self.allow_cancel);
        self.erase.enable_if(!empty);
        self.confirm.enable_if(!empty);
        for (_, button) in self.digits.iter_mut() {
            button.enable_if(!full);
        }
        // Erase and cancel share a cell; repaint whichever is showing.
        if empty {
            self.cancel.request_repaint();
        } else {
            self.erase.request_repaint();
        }
    }
}

impl Component for PinKeyboard {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event) -> Option<UiResult> {
        if let Event::Timer(token) = event {
            if Some(*token) == self.last_digit_timer {
                self.last_digit_timer = None;
                self.text.show_last_digit = false;
                self.text.repaint = true;
                return None;
            }
        }

        if let Some(ButtonMsg::Clicked) = self.confirm.handle(ctx, event) {
            debug!("pin keypad confirmed");
            return Some(UiResult::Text(self.text.digits.clone()));
        }

        let was_empty = self.text.is_empty();
        if was_empty {
            if let Some(ButtonMsg::Clicked) = self.cancel.handle(ctx, event) {
                debug!("pin keypad cancelled");
                return Some(UiResult::Cancelled);
            }
        } else {
            match self.erase.handle(ctx, event) {
                Some(ButtonMsg::Clicked) => {
                    self.text.pop();
                    self.last_digit_timer = None;
                    self.update_buttons();
                    if self.text.is_empty() {
                        debug!("pin keypad empty");
                    }
                    return None;
                }
                Some(ButtonMsg::LongPressed) => {
                    self.text.clear();
                    self.last_digit_timer = None;
                    self.update_buttons();
                    debug!("pin keypad cleared");
                    return None;
                }
                _ => {}
            }
        }

        let pressed = self
            .digits
            .iter_mut()
            .find_map(|(digit, button)| match button.handle(ctx, event) {
                Some(ButtonMsg::Clicked) => Some(*digit),
                _ => None,
            });
        if let Some(digit) = pressed {
            if self.text.push(digit) {
                self.text.show_last_digit = true;
                self.last_digit_timer = Some(ctx.request_timer(LAST_DIGIT_TIMEOUT));
                if was_empty {
                    debug!("pin keypad started");
                }
                if self.text.is_full() {
                    debug!("pin keypad full");
                }
                self.update_buttons();
            }
        }
        None
    }

    fn paint(&mut self, display: &mut dyn Display) {
        self.text.paint(display);
        if self.text.is_empty() {
            self.cancel.paint(display);
        } else {
            self.erase.paint(display);
        }
        self.confirm.paint(display);
        for (_, button) in self.digits.iter_mut() {
            button.paint(display);
        }
    }

    fn request_repaint(&mut self) {
        self.text.repaint = true;
        self.cancel.request_repaint();
        self.erase.request_repaint();
        self.confirm.request_repaint();
        for (_, button) in self.digits.iter_mut() {
            button.request_repaint();
        }
    }

    fn read_content(&self, out: &mut Vec<String>) {
        self.text.read_content(out);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PinChoice {
    Delete,
    Show,
    Enter,
    Digit(char),
}

impl PinChoice {
    fn label(&self) -> String {
        match self {
            PinChoice::Delete => "DELETE".to_string(),
            PinChoice::Show => "SHOW".to_string(),
            PinChoice::Enter => "ENTER".to_string(),
            PinChoice::Digit(digit) => digit.to_string(),
        }
    }
}

/// Button-only PIN entry: left and right cycle through choices, both buttons select.
pub struct PinSelector {
    text: PinText,
    allow_cancel: bool,
    choices: Vec<PinChoice>,
    current: usize,
    choice_area: Rect,
    controller: ButtonController,
    fg: Color,
    bg: Color,
    repaint: bool,
}

impl PinSelector {
    /// Starts on a random digit.
    pub fn new<R: Rng + ?Sized>(
        theme: &Theme,
        prompt: &str,
        subprompt: &str,
        allow_cancel: bool,
        rng: &mut R,
    ) -> Self {
        let mut choices = vec![PinChoice::Delete, PinChoice::Show, PinChoice::Enter];
        let first_digit = choices.len();
        choices.extend(DIGITS.iter().map(|&digit| PinChoice::Digit(digit)));
        let current = rng.gen_range(first_digit..choices.len());

        let content = theme.content_area();
        let (header, rest) = content.split_top(theme.header_height * 2);
        let (choice_area, _) = rest.split_bottom(theme.button_height);
        let layout = ButtonLayout::new()
            .with(ButtonPos::Left, "<", UiResult::Index(0))
            .with(ButtonPos::Middle, "SELECT", UiResult::Confirmed)
            .with(ButtonPos::Right, ">", UiResult::Index(1));
        Self {
            text: PinText::new(theme, header, prompt, subprompt),
            allow_cancel,
            choices,
            current,
            choice_area,
            controller: ButtonController::new(theme, layout),
            fg: theme.fg,
            bg: theme.bg,
            repaint: true,
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.text.warning = Some(warning.into());
        self
    }

    pub fn pin(&self) -> &str {
        &self.text.digits
    }

    /// Label of the highlighted choice.
    pub fn current_choice(&self) -> String {
        self.choices[self.current].label()
    }

    fn move_by(&mut self, forward: bool) {
        let len = self.choices.len();
        self.current = if forward {
            (self.current + 1) % len
        } else {
            (self.current + len - 1) % len
        };
        self.repaint = true;
    }

    fn select(&mut self) -> Option<UiResult> {
        match self.choices[self.current] {
            PinChoice::Delete if self.text.is_empty() => {
                if self.allow_cancel {
                    debug!("pin selector cancelled");
                    return Some(UiResult::Cancelled);
                }
            }
            PinChoice::Delete => self.text.pop(),
            PinChoice::Show => {
                self.text.reveal = !self.text.reveal;
                self.text.repaint = true;
            }
            PinChoice::Enter if self.text.is_empty() => {}
            PinChoice::Enter => {
                debug!("pin selector confirmed");
                return Some(UiResult::Text(self.text.digits.clone()));
            }
            PinChoice::Digit(digit) => {
                if !self.text.push(digit) {
                    debug!("pin selector full");
                }
            }
        }
        None
    }
}

impl Component for PinSelector {
    fn event(&mut self, _ctx: &mut EventCtx, event: &Event) -> Option<UiResult> {
        match self.controller.handle(event)? {
            ButtonPos::Left => {
                self.move_by(false);
                None
            }
            ButtonPos::Right => {
                self.move_by(true);
                None
            }
            ButtonPos::Middle => self.select(),
        }
    }

    fn paint(&mut self, display: &mut dyn Display) {
        self.text.paint(display);
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
        self.text.repaint = true;
        self.repaint = true;
        self.controller.request_repaint();
    }

    fn read_content(&self, out: &mut Vec<String>) {
        self.text.read_content(out);
        out.push(self.current_choice());
    }
}

#[cfg(test)]
mod tests {
    use super::{PinKeyboard, PinSelector, MAX_LENGTH, MAX_VISIBLE_DOTS};
    use crate::core::component::{content_of, Component, UiResult};
    use crate::core::event::{ButtonEvent, Event, EventCtx, PhysicalButton, TouchEvent};
    use crate::core::geometry::Rect;
    use crate::widgets::theme::Theme;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tap(keyboard: &mut PinKeyboard, ctx: &mut EventCtx, area: Rect) -> Option<UiResult> {
        let point = area.center();
        keyboard.event(ctx, &Event::Touch(TouchEvent::Start(point)));
        keyboard.event(ctx, &Event::Touch(TouchEvent::End(point)))
    }

    fn keyboard(allow_cancel: bool) -> PinKeyboard {
        PinKeyboard::new(
            &Theme::touch(240, 240),
            "Enter PIN",
            "",
            allow_cancel,
            &mut StdRng::seed_from_u64(7),
        )
    }

    fn enter(keyboard: &mut PinKeyboard, ctx: &mut EventCtx, pin: &str) {
        for digit in pin.chars() {
            let area = keyboard.key_area(digit).unwrap();
            tap(keyboard, ctx, area);
        }
    }

    #[test]
    fn every_digit_has_a_key() {
        let keyboard = keyboard(true);
        for digit in '0'..='9' {
            assert!(keyboard.key_area(digit).is_some(), "missing {digit}");
        }
    }

    #[test]
    fn digits_then_confirm() {
        let mut ctx = EventCtx::new();
        let mut keyboard = keyboard(true);
        enter(&mut keyboard, &mut ctx, "1234");
        assert_eq!(keyboard.pin(), "1234");
        let confirm = keyboard.confirm_area();
        assert_eq!(
            tap(&mut keyboard, &mut ctx, confirm),
            Some(UiResult::Text("1234".to_string()))
        );
    }

    #[test]
    fn confirm_is_disabled_while_empty_and_cancel_only_while_empty() {
        let mut ctx = EventCtx::new();
        let mut keyboard = keyboard(true);
        let confirm = keyboard.confirm_area();
        assert_eq!(tap(&mut keyboard, &mut ctx, confirm), None);

        enter(&mut keyboard, &mut ctx, "5");
        // The shared cell now erases instead of cancelling.
        let erase = keyboard.erase_area();
        assert_eq!(tap(&mut keyboard, &mut ctx, erase), None);
        assert_eq!(keyboard.pin(), "");
        assert_eq!(tap(&mut keyboard, &mut ctx, erase), Some(UiResult::Cancelled));
    }

    #[test]
    fn cancel_can_be_disallowed() {
        let mut ctx = EventCtx::new();
        let mut keyboard = keyboard(false);
        let erase = keyboard.erase_area();
        assert_eq!(tap(&mut keyboard, &mut ctx, erase), None);
    }

    #[test]
    fn long_press_on_erase_clears() {
        let mut ctx = EventCtx::new();
        let mut keyboard = keyboard(true);
        enter(&mut keyboard, &mut ctx, "987");
        ctx.take_timers();
        let erase = keyboard.erase_area().center();
        keyboard.event(&mut ctx, &Event::Touch(TouchEvent::Start(erase)));
        let (token, _) = ctx.take_timers()[0];
        keyboard.event(&mut ctx, &Event::Timer(token));
        assert_eq!(keyboard.pin(), "");
    }

    #[test]
    fn length_is_capped_and_dots_are_limited() {
        let mut ctx = EventCtx::new();
        let mut keyboard = keyboard(true);
        let pin = "1".repeat(MAX_LENGTH + 5);
        enter(&mut keyboard, &mut ctx, &pin);
        assert_eq!(keyboard.pin().len(), MAX_LENGTH);
        for (token, _) in ctx.take_timers() {
            keyboard.event(&mut ctx, &Event::Timer(token));
        }
        let shown = content_of(&keyboard).join("");
        assert_eq!(shown, format!("...{}", "*".repeat(MAX_VISIBLE_DOTS)));
    }

    #[test]
    fn last_digit_is_visible_until_its_timer() {
        let mut ctx = EventCtx::new();
        let mut keyboard = keyboard(true);
        enter(&mut keyboard, &mut ctx, "42");
        assert_eq!(content_of(&keyboard), vec!["*2"]);
        let timers = ctx.take_timers();
        let (token, _) = timers[timers.len() - 1];
        keyboard.event(&mut ctx, &Event::Timer(token));
        assert_eq!(content_of(&keyboard), vec!["**"]);
    }

    #[test]
    fn warning_replaces_prompt_until_a_digit() {
        let mut ctx = EventCtx::new();
        let mut keyboard = keyboard(true).with_warning("Wrong PIN");
        assert_eq!(content_of(&keyboard), vec!["Wrong PIN"]);
        enter(&mut keyboard, &mut ctx, "1");
        assert_eq!(content_of(&keyboard), vec!["1"]);
    }

    fn click(selector: &mut PinSelector, ctx: &mut EventCtx, button: PhysicalButton) -> Option<UiResult> {
        selector.event(ctx, &Event::Button(ButtonEvent::Pressed(button)));
        selector.event(ctx, &Event::Button(ButtonEvent::Released(button)))
    }

    fn select(selector: &mut PinSelector, ctx: &mut EventCtx) -> Option<UiResult> {
        let both = [
            ButtonEvent::Pressed(PhysicalButton::Left),
            ButtonEvent::Pressed(PhysicalButton::Right),
            ButtonEvent::Released(PhysicalButton::Left),
        ];
        for event in both {
            selector.event(ctx, &Event::Button(event));
        }
        selector.event(ctx, &Event::Button(ButtonEvent::Released(PhysicalButton::Right)))
    }

    fn go_to(selector: &mut PinSelector, ctx: &mut EventCtx, label: &str) {
        for _ in 0..13 {
            if selector.current_choice() == label {
                return;
            }
            click(selector, ctx, PhysicalButton::Right);
        }
        panic!("choice {label} not found");
    }

    #[test]
    fn selector_enters_digits_and_confirms() {
        let mut ctx = EventCtx::new();
        let mut selector = PinSelector::new(
            &Theme::buttons(128, 64),
            "Enter PIN",
            "",
            true,
            &mut StdRng::seed_from_u64(1),
        );
        assert!(selector.current_choice().chars().all(|c| c.is_ascii_digit()));
        go_to(&mut selector, &mut ctx, "ENTER");
        assert_eq!(select(&mut selector, &mut ctx), None);
        go_to(&mut selector, &mut ctx, "3");
        select(&mut selector, &mut ctx);
        go_to(&mut selector, &mut ctx, "7");
        select(&mut selector, &mut ctx);
        assert_eq!(selector.pin(), "37");
        go_to(&mut selector, &mut ctx, "ENTER");
        assert_eq!(
            select(&mut selector, &mut ctx),
            Some(UiResult::Text("37".to_string()))
        );
    }

    #[test]
    fn selector_delete_on_empty_cancels() {
        let mut ctx = EventCtx::new();
        let mut selector = PinSelector::new(
            &Theme::buttons(128, 64),
            "Enter PIN",
            "",
            true,
            &mut StdRng::seed_from_u64(2),
        );
        click(&mut selector, &mut ctx, PhysicalButton::Left);
        go_to(&mut selector, &mut ctx, "DELETE");
        assert_eq!(select(&mut selector, &mut ctx), Some(UiResult::Cancelled));
    }
}
