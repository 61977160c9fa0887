//! Confirmation that requires holding a button for a while.

use std::time::{Duration, Instant};

use crate::core::color::Color;
use crate::core::component::{Component, UiResult};
use crate::core::display::{Align, Display, Font};
use crate::core::event::{ButtonEvent, Event, EventCtx, InputKind, PhysicalButton, TimerToken, TouchEvent};
use crate::core::geometry::{Point, Rect};
use crate::widgets::theme::Theme;

pub struct HoldToConfirm {
    content: Box<dyn Component>,
    input: InputKind,
    label: String,
    cancel_label: Option<String>,
    area: Rect,
    cancel_area: Option<Rect>,
    duration: Duration,
    held_since: Option<Instant>,
    timer: Option<TimerToken>,
    cancel_pressed: bool,
    fg: Color,
    bg: Color,
    progress: Color,
    repaint: bool,
}

impl HoldToConfirm {
    pub fn new(
        theme: &Theme,
        input: InputKind,
        content: impl Component + 'static,
        label: impl Into<String>,
        danger: bool,
    ) -> Self {
        let area = theme.button_area();
        Self {
            content: Box::new(content),
            input,
            label: label.into(),
            cancel_label: None,
            area,
            cancel_area: None,
            duration: theme.hold_duration,
            held_since: None,
            timer: None,
            cancel_pressed: false,
            fg: theme.fg,
            bg: theme.bg,
            progress: if danger { theme.error } else { theme.accent },
            repaint: true,
        }
    }

    /// Add a cancel control: a touch button left of the hold area, or the left physical button.
    pub fn with_cancel(mut self, theme: &Theme, label: impl Into<String>) -> Self {
        self.cancel_label = Some(label.into());
        if self.input == InputKind::Touch {
            let (cancel, hold) = self.area.split_left(self.area.width / 3);
            self.cancel_area = Some(Rect::new(
                cancel.x,
                cancel.y,
                cancel.width - theme.button_spacing,
                cancel.height,
            ));
            self.area = hold;
        }
        self
    }

    pub fn is_held(&self) -> bool {
        self.held_since.is_some()
    }

    fn start(&mut self, ctx: &mut EventCtx) {
        self.held_since = Some(Instant::now());
        self.timer = Some(ctx.request_timer(self.duration));
        self.repaint = true;
    }

    fn reset(&mut self) {
        self.held_since = None;
        self.timer = None;
        self.repaint = true;
    }

    fn touch_event(&mut self, ctx: &mut EventCtx, touch: TouchEvent) -> Option<UiResult> {
        match touch {
            TouchEvent::Start(point) => {
                if self.area.contains(point) {
                    self.start(ctx);
                } else if self.cancel_area.is_some_and(|area| area.contains(point)) {
                    self.cancel_pressed = true;
                }
            }
            TouchEvent::Move(point) => {
                if self.is_held() && !self.area.contains(point) {
                    self.reset();
                }
            }
            TouchEvent::End(point) => {
                if self.is_held() {
                    self.reset();
                }
                let cancel = self.cancel_pressed
                    && self.cancel_area.is_some_and(|area| area.contains(point));
                self.cancel_pressed = false;
                if cancel {
                    return Some(UiResult::Cancelled);
                }
            }
        }
        None
    }

    fn button_event(&mut self, ctx: &mut EventCtx, button: ButtonEvent) -> Option<UiResult> {
        match button {
            ButtonEvent::Pressed(PhysicalButton::Right) => self.start(ctx),
            ButtonEvent::Released(PhysicalButton::Right) => self.reset(),
            ButtonEvent::Pressed(PhysicalButton::Left) => self.cancel_pressed = true,
            ButtonEvent::Released(PhysicalButton::Left) => {
                let cancel = self.cancel_pressed && self.cancel_label.is_some();
                self.cancel_pressed = false;
                if cancel {
                    return Some(UiResult::Cancelled);
                }
            }
        }
        None
    }

    fn progress_width(&self) -> i32 {
        match self.held_since {
            Some(since) if !self.duration.is_zero() => {
                let ratio = since.elapsed().as_secs_f32() / self.duration.as_secs_f32();
                (self.area.width as f32 * ratio.min(1.0)) as i32
            }
            Some(_) => self.area.width,
            None => 0,
        }
    }
}

impl Component for HoldToConfirm {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event) -> Option<UiResult> {
        if let Some(result) = self.content.event(ctx, event) {
            return Some(result);
        }
        match (self.input, event) {
            (_, Event::Timer(token)) if Some(*token) == self.timer => {
                self.timer = None;
                if self.is_held() {
                    self.held_since = None;
                    return Some(UiResult::Confirmed);
                }
                None
            }
            (InputKind::Touch, Event::Touch(touch)) => self.touch_event(ctx, *touch),
            (InputKind::Buttons, Event::Button(button)) => self.button_event(ctx, *button),
            _ => None,
        }
    }

    fn paint(&mut self, display: &mut dyn Display) {
        self.content.paint(display);
        // Progress changes on its own while held.
        if !self.repaint && !self.is_held() {
            return;
        }
        display.bar(self.area, self.bg);
        let progress = self.progress_width();
        if progress > 0 {
            display.bar(
                Rect::new(self.area.x, self.area.y, progress, self.area.height),
                self.progress,
            );
        }
        let baseline = self.area.bottom() - self.area.height / 4;
        display.text_aligned(
            Point::new(self.area.center().x, baseline),
            &self.label,
            Font::Bold,
            self.fg,
            self.bg,
            Align::Center,
        );
        if let Some(label) = &self.cancel_label {
            let origin = match self.cancel_area {
                Some(area) => Point::new(area.center().x, baseline),
                None => Point::new(self.area.x, baseline),
            };
            let align = if self.cancel_area.is_some() {
                Align::Center
            } else {
                Align::Left
            };
            display.text_aligned(origin, label, Font::Bold, self.fg, self.bg, align);
        }
        self.repaint = false;
    }

    fn request_repaint(&mut self) {
        self.content.request_repaint();
        self.repaint = true;
    }

    fn read_content(&self, out: &mut Vec<String>) {
        self.content.read_content(out);
        if let Some(label) = &self.cancel_label {
            out.push(label.clone());
        }
        out.push(self.label.clone());
    }

    fn page_count(&self) -> usize {
        self.content.page_count()
    }
}
