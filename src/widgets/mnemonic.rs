//! Recovery word entry with prefix completion against a word list.
//!
//! Both variants finish with `UiResult::Text(word)` and, when going back is allowed, with
//! `UiResult::Cancelled` when erasing an empty prefix.

use std::sync::Arc;
use std::time::Duration;

use crate::core::color::Color;
use crate::core::component::{Component, UiResult};
use crate::core::display::{Align, Display, Font, Icon};
use crate::core::event::{Event, EventCtx};
use crate::core::geometry::{Grid, Point, Rect};
use crate::widgets::button::{Button, ButtonMsg, ButtonStyleSheet};
use crate::widgets::button_controller::{ButtonController, ButtonLayout, ButtonPos};
use crate::widgets::theme::Theme;

const ERASE_HOLD_DURATION: Duration = Duration::from_millis(1500);
/// Below this many candidates the button-only variant offers whole words.
const WORD_CHOICE_LIMIT: usize = 5;

/// Sorted, deduplicated list of lowercase words.
#[derive(Debug, Clone)]
pub struct WordList {
    words: Arc<[String]>,
}

impl WordList {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words: Vec<String> = words
            .into_iter()
            .map(|word| word.into().trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();
        words.sort();
        words.dedup();
        Self {
            words: words.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.binary_search_by(|w| w.as_str().cmp(word)).is_ok()
    }

    /// Words starting with `prefix`, in order.
    pub fn completions(&self, prefix: &str) -> &[String] {
        let start = self.words.partition_point(|w| w.as_str() < prefix);
        let len = self.words[start..]
            .iter()
            .take_while(|w| w.starts_with(prefix))
            .count();
        &self.words[start..start + len]
    }

    /// Letters that extend `prefix` towards at least one word.
    pub fn next_letters(&self, prefix: &str) -> Vec<char> {
        let mut letters: Vec<char> = self
            .completions(prefix)
            .iter()
            .filter_map(|word| word[prefix.len()..].chars().next())
            .collect();
        letters.dedup();
        letters
    }
}

/// Prefix typed so far and what it completes to.
#[derive(Debug, Clone)]
struct PrefixLine {
    /// Shown in place of the prefix until the first letter.
    prompt: String,
    prefix: String,
    words: WordList,
    area: Rect,
    fg: Color,
    hint_fg: Color,
    bg: Color,
    repaint: bool,
}

impl PrefixLine {
    fn suggestion(&self) -> Option<&str> {
        if self.prefix.is_empty() {
            return None;
        }
        self.words.completions(&self.prefix).first().map(String::as_str)
    }

    /// The only word the prefix can still become.
    fn unique_completion(&self) -> Option<&str> {
        match self.words.completions(&self.prefix) {
            [only] if !self.prefix.is_empty() => Some(only.as_str()),
            _ => None,
        }
    }

    fn paint(&mut self, display: &mut dyn Display) {
        if !self.repaint {
            return;
        }
        display.bar(self.area, self.bg);
        let baseline = self.area.y + (self.area.height + display.line_height(Font::Mono)) / 2;
        let origin = Point::new(self.area.x, baseline);
        if self.prefix.is_empty() {
            display.text(origin, &self.prompt, Font::Normal, self.hint_fg, self.bg);
            self.repaint = false;
            return;
        }
        display.text(origin, &self.prefix, Font::Mono, self.fg, self.bg);
        if let Some(rest) = self.suggestion().and_then(|word| word.get(self.prefix.len()..)) {
            let x = origin.x + display.text_width(&self.prefix, Font::Mono);
            display.text(Point::new(x, baseline), rest, Font::Mono, self.hint_fg, self.bg);
        }
        self.repaint = false;
    }
}

/// Touchscreen keyboard with one key per letter.
pub struct MnemonicKeyboard {
    line: PrefixLine,
    can_go_back: bool,
    letters: Vec<(char, Button)>,
    erase: Button,
    back: Button,
    accept: Button,
}

impl MnemonicKeyboard {
    pub fn new(theme: &Theme, words: WordList, prefill: &str, can_go_back: bool) -> Self {
        let (header, keypad) = theme.content_area().split_top(theme.header_height);
        let grid = Grid::new(keypad, 7, 4).with_spacing(theme.button_spacing / 2);
        let letters = ('a'..='z')
            .enumerate()
            .map(|(index, letter)| {
                let button = Button::with_text(
                    grid.cell(index),
                    letter.to_string(),
                    ButtonStyleSheet::default_for(theme),
                );
                (letter, button)
            })
            .collect();
        let mut keyboard = Self {
            line: PrefixLine {
                prompt: String::new(),
                prefix: prefill.to_lowercase(),
                words,
                area: header,
                fg: theme.fg,
                hint_fg: theme.title_fg,
                bg: theme.bg,
                repaint: true,
            },
            can_go_back,
            letters,
            erase: Button::with_icon(grid.cell(26), Icon::Back, ButtonStyleSheet::default_for(theme))
                .with_long_press(ERASE_HOLD_DURATION),
            back: Button::with_icon(grid.cell(26), Icon::Cancel, ButtonStyleSheet::cancel(theme)),
            accept: Button::with_icon(grid.cell(27), Icon::Confirm, ButtonStyleSheet::confirm(theme)),
        };
        keyboard.update_buttons();
        keyboard
    }

    pub fn prefix(&self) -> &str {
        &self.line.prefix
    }

    pub fn key_area(&self, letter: char) -> Option<Rect> {
        self.letters
            .iter()
            .find(|(l, _)| *l == letter)
            .map(|(_, button)| button.area())
    }

    pub fn erase_area(&self) -> Rect {
        self.erase.area()
    }

    pub fn accept_area(&self) -> Rect {
        self.accept.area()
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.line.prompt = prompt.into();
        self
    }

    fn update_buttons(&mut self) {
        let allowed = self.line.words.next_letters(&self.line.prefix);
        for (letter, button) in self.letters.iter_mut() {
            button.enable_if(allowed.contains(letter));
        }
        let empty = self.line.prefix.is_empty();
        self.erase.enable_if(!empty);
        self.back.enable_if(empty && self.can_go_back);
        self.accept.enable_if(self.line.suggestion().is_some());
        if empty {
            self.back.request_repaint();
        } else {
            self.erase.request_repaint();
        }
        self.line.repaint = true;
    }
}

impl Component for MnemonicKeyboard {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event) -> Option<UiResult> {
        if let Some(ButtonMsg::Clicked) = self.accept.handle(ctx, event) {
            return self.line.suggestion().map(|word| UiResult::Text(word.to_string()));
        }
        if self.line.prefix.is_empty() {
            if let Some(ButtonMsg::Clicked) = self.back.handle(ctx, event) {
                return Some(UiResult::Cancelled);
            }
        } else {
            match self.erase.handle(ctx, event) {
                Some(ButtonMsg::Clicked) => {
                    self.line.prefix.pop();
                    self.update_buttons();
                    return None;
                }
                Some(ButtonMsg::LongPressed) => {
                    self.line.prefix.clear();
                    self.update_buttons();
                    return None;
                }
                _ => {}
            }
        }
        let typed = self
            .letters
            .iter_mut()
            .find_map(|(letter, button)| match button.handle(ctx, event) {
                Some(ButtonMsg::Clicked) => Some(*letter),
                _ => None,
            });
        if let Some(letter) = typed {
            self.line.prefix.push(letter);
            if let Some(word) = self.line.unique_completion() {
                return Some(UiResult::Text(word.to_string()));
            }
            self.update_buttons();
        }
        None
    }

    fn paint(&mut self, display: &mut dyn Display) {
        self.line.paint(display);
        if self.line.prefix.is_empty() {
            self.back.paint(display);
        } else {
            self.erase.paint(display);
        }
        self.accept.paint(display);
        for (_, button) in self.letters.iter_mut() {
            button.paint(display);
        }
    }

    fn request_repaint(&mut self) {
        self.line.repaint = true;
        self.erase.request_repaint();
        self.back.request_repaint();
        self.accept.request_repaint();
        for (_, button) in self.letters.iter_mut() {
            button.request_repaint();
        }
    }

    fn read_content(&self, out: &mut Vec<String>) {
        if !self.line.prompt.is_empty() {
            out.push(self.line.prompt.clone());
        }
        out.push(self.line.prefix.clone());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum WordChoice {
    Delete,
    Letter(char),
    Word(String),
}

/// Button-only entry: cycles through the letters that can follow the prefix, then through
/// whole words once few candidates remain.
pub struct MnemonicSelector {
    line: PrefixLine,
    can_go_back: bool,
    choices: Vec<WordChoice>,
    current: usize,
    choice_area: Rect,
    controller: ButtonController,
    repaint: bool,
}

impl MnemonicSelector {
    pub fn new(theme: &Theme, words: WordList, prefill: &str, can_go_back: bool) -> Self {
        let (header, rest) = theme.content_area().split_top(theme.header_height * 2);
        let (choice_area, _) = rest.split_bottom(theme.button_height);
        let layout = ButtonLayout::new()
            .with(ButtonPos::Left, "<", UiResult::Index(0))
            .with(ButtonPos::Middle, "SELECT", UiResult::Confirmed)
            .with(ButtonPos::Right, ">", UiResult::Index(1));
        let mut selector = Self {
            line: PrefixLine {
                prompt: String::new(),
                prefix: prefill.to_lowercase(),
                words,
                area: header,
                fg: theme.fg,
                hint_fg: theme.title_fg,
                bg: theme.bg,
                repaint: true,
            },
            can_go_back,
            choices: Vec::new(),
            current: 0,
            choice_area,
            controller: ButtonController::new(theme, layout),
            repaint: true,
        };
        selector.update_choices();
        selector
    }

    pub fn prefix(&self) -> &str {
        &self.line.prefix
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.line.prompt = prompt.into();
        self
    }

    pub fn current_choice(&self) -> String {
        match self.choices.get(self.current) {
            Some(WordChoice::Delete) => "DELETE".to_string(),
            Some(WordChoice::Letter(letter)) => letter.to_string(),
            Some(WordChoice::Word(word)) => word.to_uppercase(),
            None => String::new(),
        }
    }

    /// Rebuild the choices for the current prefix and highlight the first non-delete one.
    fn update_choices(&mut self) {
        let completions = self.line.words.completions(&self.line.prefix);
        let mut choices = vec![WordChoice::Delete];
        if !self.line.prefix.is_empty() && completions.len() <= WORD_CHOICE_LIMIT {
            choices.extend(completions.iter().cloned().map(WordChoice::Word));
        } else {
            choices.extend(
                self.line
                    .words
                    .next_letters(&self.line.prefix)
                    .into_iter()
                    .map(WordChoice::Letter),
            );
        }
        self.current = usize::from(choices.len() > 1);
        self.choices = choices;
        self.line.repaint = true;
        self.repaint = true;
    }

    fn select(&mut self) -> Option<UiResult> {
        match self.choices.get(self.current)?.clone() {
            WordChoice::Delete if self.line.prefix.is_empty() => {
                if self.can_go_back {
                    return Some(UiResult::Cancelled);
                }
            }
            WordChoice::Delete => {
                self.line.prefix.pop();
                self.update_choices();
            }
            WordChoice::Letter(letter) => {
                self.line.prefix.push(letter);
                self.update_choices();
            }
            WordChoice::Word(word) => return Some(UiResult::Text(word)),
        }
        None
    }
}

impl Component for MnemonicSelector {
    fn event(&mut self, _ctx: &mut EventCtx, event: &Event) -> Option<UiResult> {
        let len = self.choices.len().max(1);
        match self.controller.handle(event)? {
            ButtonPos::Left => self.current = (self.current + len - 1) % len,
            ButtonPos::Right => self.current = (self.current + 1) % len,
            ButtonPos::Middle => return self.select(),
        }
        self.repaint = true;
        None
    }

    fn paint(&mut self, display: &mut dyn Display) {
        self.line.paint(display);
        if self.repaint {
            display.bar(self.choice_area, self.line.bg);
            let baseline = self.choice_area.y
                + (self.choice_area.height + display.line_height(Font::Bold)) / 2;
            display.text_aligned(
                Point::new(self.choice_area.center().x, baseline),
                &self.current_choice(),
                Font::Bold,
                self.line.fg,
                self.line.bg,
                Align::Center,
            );
            self.repaint = false;
        }
        self.controller.paint(display);
    }

    fn request_repaint(&mut self) {
        self.line.repaint = true;
        self.repaint = true;
        self.controller.request_repaint();
    }

    fn read_content(&self, out: &mut Vec<String>) {
        if !self.line.prompt.is_empty() {
            out.push(self.line.prompt.clone());
        }
        out.push(self.line.prefix.clone());
        out.push(self.current_choice());
    }
}

#[cfg(test)]
mod tests {
    use super::{MnemonicKeyboard, MnemonicSelector, WordList};
    use crate::core::component::{Component, UiResult};
    use crate::core::event::{ButtonEvent, Event, EventCtx, PhysicalButton, TouchEvent};
    use crate::core::geometry::Rect;
    use crate::widgets::theme::Theme;
    use pretty_assertions::assert_eq;

    fn words() -> WordList {
        WordList::new(["abandon", "ability", "able", "about", "zoo", "zone", "Able "])
    }

    fn tap(keyboard: &mut MnemonicKeyboard, ctx: &mut EventCtx, area: Rect) -> Option<UiResult> {
        let point = area.center();
        keyboard.event(ctx, &Event::Touch(TouchEvent::Start(point)));
        keyboard.event(ctx, &Event::Touch(TouchEvent::End(point)))
    }

    #[test]
    fn word_list_completes_prefixes() {
        let words = words();
        assert_eq!(words.len(), 6);
        assert_eq!(words.completions("ab"), ["abandon", "ability", "able", "about"]);
        assert_eq!(words.next_letters("ab"), vec!['a', 'i', 'l', 'o']);
        assert_eq!(words.next_letters(""), vec!['a', 'z']);
        assert!(words.completions("q").is_empty());
        assert!(words.contains("zoo"));
    }

    #[test]
    fn unique_prefix_finishes_the_word() {
        let mut ctx = EventCtx::new();
        let mut keyboard = MnemonicKeyboard::new(&Theme::touch(240, 240), words(), "", true);
        let z = keyboard.key_area('z').unwrap();
        assert_eq!(tap(&mut keyboard, &mut ctx, z), None);
        let o = keyboard.key_area('o').unwrap();
        assert_eq!(tap(&mut keyboard, &mut ctx, o), None);
        let n = keyboard.key_area('n').unwrap();
        assert_eq!(
            tap(&mut keyboard, &mut ctx, n),
            Some(UiResult::Text("zone".to_string()))
        );
    }

    #[test]
    fn letters_that_lead_nowhere_are_disabled() {
        let mut ctx = EventCtx::new();
        let mut keyboard = MnemonicKeyboard::new(&Theme::touch(240, 240), words(), "", true);
        let q = keyboard.key_area('q').unwrap();
        tap(&mut keyboard, &mut ctx, q);
        assert_eq!(keyboard.prefix(), "");
    }

    #[test]
    fn accept_takes_the_first_suggestion() {
        let mut ctx = EventCtx::new();
        let mut keyboard = MnemonicKeyboard::new(&Theme::touch(240, 240), words(), "ab", false);
        let accept = keyboard.accept_area();
        assert_eq!(
            tap(&mut keyboard, &mut ctx, accept),
            Some(UiResult::Text("abandon".to_string()))
        );
    }

    #[test]
    fn erasing_an_empty_prefix_goes_back_when_allowed() {
        let mut ctx = EventCtx::new();
        let mut keyboard = MnemonicKeyboard::new(&Theme::touch(240, 240), words(), "a", true);
        let erase = keyboard.erase_area();
        assert_eq!(tap(&mut keyboard, &mut ctx, erase), None);
        assert_eq!(tap(&mut keyboard, &mut ctx, erase), Some(UiResult::Cancelled));

        let mut keyboard = MnemonicKeyboard::new(&Theme::touch(240, 240), words(), "", false);
        assert_eq!(tap(&mut keyboard, &mut ctx, erase), None);
    }

    fn both(selector: &mut MnemonicSelector, ctx: &mut EventCtx) -> Option<UiResult> {
        for event in [
            ButtonEvent::Pressed(PhysicalButton::Left),
            ButtonEvent::Pressed(PhysicalButton::Right),
            ButtonEvent::Released(PhysicalButton::Left),
        ] {
            selector.event(ctx, &Event::Button(event));
        }
        selector.event(ctx, &Event::Button(ButtonEvent::Released(PhysicalButton::Right)))
    }

    #[test]
    fn selector_switches_to_words_when_few_remain() {
        let mut ctx = EventCtx::new();
        let mut selector = MnemonicSelector::new(&Theme::buttons(128, 64), words(), "", true);
        assert_eq!(selector.current_choice(), "a");
        assert_eq!(both(&mut selector, &mut ctx), None);
        assert_eq!(selector.prefix(), "a");
        assert_eq!(selector.current_choice(), "ABANDON");
        assert_eq!(
            both(&mut selector, &mut ctx),
            Some(UiResult::Text("abandon".to_string()))
        );
    }
}
