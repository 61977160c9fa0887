//! Number of words in a recovery seed.

use crate::core::color::Color;
use crate::core::component::{Component, UiResult};
use crate::core::display::{Align, Display, Font};
use crate::core::event::{Event, EventCtx, InputKind};
use crate::core::geometry::{Grid, Point, Rect};
use crate::widgets::button::{Button, ButtonStyleSheet};
use crate::widgets::button_controller::{ButtonController, ButtonLayout, ButtonPos};
use crate::widgets::theme::Theme;

/// Word counts offered on touch models.
pub const TOUCH_WORD_COUNTS: [u32; 5] = [12, 18, 20, 24, 33];
/// Word counts offered on button-only models.
pub const BUTTON_WORD_COUNTS: [u32; 4] = [12, 18, 20, 24];

enum Selector {
    Touch(Vec<Button>),
    Physical {
        controller: ButtonController,
        current: usize,
        area: Rect,
        fg: Color,
        bg: Color,
        repaint: bool,
    },
}

/// Finishes with `UiResult::Number(count)`.
pub struct WordCountSelector {
    counts: Vec<u32>,
    selector: Selector,
}

impl WordCountSelector {
    pub fn new(theme: &Theme, input: InputKind) -> Self {
        match input {
            InputKind::Touch => {
                let counts = TOUCH_WORD_COUNTS.to_vec();
                let grid = Grid::new(theme.body_area(), 3, 2).with_spacing(theme.button_spacing);
                let buttons = counts
                    .iter()
                    .enumerate()
                    .map(|(index, count)| {
                        Button::with_text(
                            grid.cell(index),
                            count.to_string(),
                            ButtonStyleSheet::default_for(theme),
                        )
                        .on_click(UiResult::Number(*count))
                    })
                    .collect();
                Self {
                    counts,
                    selector: Selector::Touch(buttons),
                }
            }
            InputKind::Buttons => {
                let layout = ButtonLayout::new()
                    .with(ButtonPos::Left, "<", UiResult::Index(0))
                    .with(ButtonPos::Middle, "SELECT", UiResult::Confirmed)
                    .with(ButtonPos::Right, ">", UiResult::Index(1));
                Self {
                    counts: BUTTON_WORD_COUNTS.to_vec(),
                    selector: Selector::Physical {
                        controller: ButtonController::new(theme, layout),
                        current: 0,
                        area: theme.body_area(),
                        fg: theme.fg,
                        bg: theme.bg,
                        repaint: true,
                    },
                }
            }
        }
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Area of the touch button for `count`.
    pub fn button_area(&self, count: u32) -> Option<Rect> {
        let Selector::Touch(buttons) = &self.selector else {
            return None;
        };
        let index = self.counts.iter().position(|c| *c == count)?;
        buttons.get(index).map(Button::area)
    }
}

impl Component for WordCountSelector {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event) -> Option<UiResult> {
        let len = self.counts.len();
        match &mut self.selector {
            Selector::Touch(buttons) => buttons
                .iter_mut()
                .find_map(|button| button.event(ctx, event)),
            Selector::Physical {
                controller,
                current,
                repaint,
                ..
            } => {
                match controller.handle(event)? {
                    ButtonPos::Left => *current = (*current + len - 1) % len,
                    ButtonPos::Right => *current = (*current + 1) % len,
                    ButtonPos::Middle => return Some(UiResult::Number(self.counts[*current])),
                }
                *repaint = true;
                None
            }
        }
    }

    fn paint(&mut self, display: &mut dyn Display) {
        match &mut self.selector {
            Selector::Touch(buttons) => buttons.iter_mut().for_each(|button| button.paint(display)),
            Selector::Physical {
                controller,
                current,
                area,
                fg,
                bg,
                repaint,
            } => {
                if *repaint {
                    display.bar(*area, *bg);
                    let baseline = area.y + (area.height + display.line_height(Font::Bold)) / 2;
                    display.text_aligned(
                        Point::new(area.center().x, baseline),
                        &self.counts[*current].to_string(),
                        Font::Bold,
                        *fg,
                        *bg,
                        Align::Center,
                    );
                    *repaint = false;
                }
                controller.paint(display);
            }
        }
    }

    fn request_repaint(&mut self) {
        match &mut self.selector {
            Selector::Touch(buttons) => buttons.iter_mut().for_each(Button::request_repaint),
            Selector::Physical {
                controller,
                repaint,
                ..
            } => {
                *repaint = true;
                controller.request_repaint();
            }
        }
    }

    fn read_content(&self, out: &mut Vec<String>) {
        match &self.selector {
            Selector::Touch(_) => out.extend(self.counts.iter().map(u32::to_string)),
            Selector::Physical { current, .. } => out.push(self.counts[*current].to_string()),
        }
    }
}
