//! Events delivered to component trees.

use std::time::Duration;

use crate::core::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchEvent {
    Start(Point),
    Move(Point),
    End(Point),
}

impl TouchEvent {
    pub fn point(&self) -> Point {
        match self {
            TouchEvent::Start(point) | TouchEvent::Move(point) | TouchEvent::End(point) => *point,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalButton {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    Pressed(PhysicalButton),
    Released(PhysicalButton),
}

/// Identifies a timer requested through [`EventCtx::request_timer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(pub u64);

/// Which physical input a device model has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Touch,
    Buttons,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Draw whatever changed.
    Render,
    /// Mark everything as needing a redraw.
    Repaint,
    Touch(TouchEvent),
    Button(ButtonEvent),
    Timer(TimerToken),
}

impl Event {
    /// Input kind of a user event, `None` for synthetic events.
    pub fn input_kind(&self) -> Option<InputKind> {
        match self {
            Event::Touch(_) => Some(InputKind::Touch),
            Event::Button(_) => Some(InputKind::Buttons),
            Event::Render | Event::Repaint | Event::Timer(_) => None,
        }
    }
}

/// Side channel from components back to the layout loop.
#[derive(Debug, Default)]
pub struct EventCtx {
    next_token: u64,
    requested_timers: Vec<(TimerToken, Duration)>,
    paint_requested: bool,
}

impl EventCtx {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for an [`Event::Timer`] carrying the returned token after `after`.
    pub fn request_timer(&mut self, after: Duration) -> TimerToken {
        self.next_token += 1;
        let token = TimerToken(self.next_token);
        self.requested_timers.push((token, after));
        token
    }

    pub fn request_paint(&mut self) {
        self.paint_requested = true;
    }

    pub fn take_timers(&mut self) -> Vec<(TimerToken, Duration)> {
        std::mem::take(&mut self.requested_timers)
    }

    pub fn take_paint_request(&mut self) -> bool {
        std::mem::replace(&mut self.paint_requested, false)
    }
}
