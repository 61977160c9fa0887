//! Two physical buttons driving left, right and "both" actions.

use crate::core::component::{Component, UiResult};
use crate::core::display::{Align, Display};
use crate::core::event::{ButtonEvent, Event, EventCtx, PhysicalButton};
use crate::core::geometry::{Point, Rect};
use crate::widgets::theme::{ButtonStyle, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonPos {
    Left,
    Middle,
    Right,
}

impl ButtonPos {
    fn index(self) -> usize {
        match self {
            ButtonPos::Left => 0,
            ButtonPos::Middle => 1,
            ButtonPos::Right => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressState {
    Nothing,
    OneDown(PhysicalButton),
    BothDown,
    OneReleased(PhysicalButton),
}

/// Labels and results of the three positions. A position without a label is inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonLayout {
    slots: [Option<(String, UiResult)>; 3],
}

impl ButtonLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, pos: ButtonPos, label: impl Into<String>, result: UiResult) -> Self {
        self.slots[pos.index()] = Some((label.into(), result));
        self
    }

    /// Cancel on the left, confirm on the right.
    pub fn cancel_confirm(cancel: impl Into<String>, confirm: impl Into<String>) -> Self {
        Self::new()
            .with(ButtonPos::Left, cancel, UiResult::Cancelled)
            .with(ButtonPos::Right, confirm, UiResult::Confirmed)
    }

    pub fn label(&self, pos: ButtonPos) -> Option<&str> {
        self.slots[pos.index()]
            .as_ref()
            .map(|(label, _)| label.as_str())
    }

    pub fn result(&self, pos: ButtonPos) -> Option<&UiResult> {
        self.slots[pos.index()].as_ref().map(|(_, result)| result)
    }

    pub fn remove(&mut self, pos: ButtonPos) {
        self.slots[pos.index()] = None;
    }
}

/// Turns raw press/release events into triggered positions.
///
/// A position triggers when the last held button is released: one button gives left or right,
/// holding both at any point gives middle.
#[derive(Debug, Clone)]
pub struct ButtonController {
    state: PressState,
    layout: ButtonLayout,
    area: Rect,
    normal: ButtonStyle,
    pressed: ButtonStyle,
    repaint: bool,
}

impl ButtonController {
    pub fn new(theme: &Theme, layout: ButtonLayout) -> Self {
        Self {
            state: PressState::Nothing,
            layout,
            area: theme.button_area(),
            normal: theme.button_default,
            pressed: theme.button_pressed,
            repaint: true,
        }
    }

    pub fn layout(&self) -> &ButtonLayout {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: ButtonLayout) {
        if self.layout != layout {
            self.layout = layout;
            self.repaint = true;
        }
    }

    /// Position triggered by `event`, if any. Inactive positions never trigger.
    pub fn handle(&mut self, event: &Event) -> Option<ButtonPos> {
        let Event::Button(button) = event else {
            return None;
        };
        let (state, triggered) = match (self.state, *button) {
            (PressState::Nothing, ButtonEvent::Pressed(which)) => (PressState::OneDown(which), None),
            (PressState::OneDown(down), ButtonEvent::Released(up)) if up == down => {
                let pos = match down {
                    PhysicalButton::Left => ButtonPos::Left,
                    PhysicalButton::Right => ButtonPos::Right,
                };
                (PressState::Nothing, Some(pos))
            }
            (PressState::OneDown(down), ButtonEvent::Pressed(other)) if other != down => {
                (PressState::BothDown, None)
            }
            (PressState::BothDown, ButtonEvent::Released(up)) => (PressState::OneReleased(up), None),
            (PressState::OneReleased(up), ButtonEvent::Pressed(again)) if again == up => {
                (PressState::BothDown, None)
            }
            (PressState::OneReleased(up), ButtonEvent::Released(other)) if other != up => {
                (PressState::Nothing, Some(ButtonPos::Middle))
            }
            (state, _) => (state, None),
        };
        if state != self.state {
            self.state = state;
            self.repaint = true;
        }
        triggered.filter(|pos| self.layout.label(*pos).is_some())
    }

    fn is_held(&self, pos: ButtonPos) -> bool {
        match (self.state, pos) {
            (PressState::OneDown(PhysicalButton::Left), ButtonPos::Left) => true,
            (PressState::OneDown(PhysicalButton::Right), ButtonPos::Right) => true,
            (PressState::BothDown | PressState::OneReleased(_), ButtonPos::Middle) => true,
            _ => false,
        }
    }

    fn paint_slot(&self, display: &mut dyn Display, pos: ButtonPos, x: i32, align: Align) {
        if let Some(label) = self.layout.label(pos) {
            let style = if self.is_held(pos) {
                self.pressed
            } else {
                self.normal
            };
            let width = display.text_width(label, style.font);
            let left = match align {
                Align::Left => x,
                Align::Center => x - width / 2,
                Align::Right => x - width,
            };
            display.bar(Rect::new(left, self.area.y, width, self.area.height), style.bg);
            display.text_aligned(
                Point::new(x, self.area.bottom() - 1),
                label,
                style.font,
                style.fg,
                style.bg,
                align,
            );
        }
    }
}

impl Component for ButtonController {
    fn event(&mut self, _ctx: &mut EventCtx, event: &Event) -> Option<UiResult> {
        let pos = self.handle(event)?;
        self.layout.result(pos).cloned()
    }

    fn paint(&mut self, display: &mut dyn Display) {
        if !self.repaint {
            return;
        }
        display.bar(self.area, self.normal.bg);
        self.paint_slot(display, ButtonPos::Left, self.area.x, Align::Left);
        self.paint_slot(display, ButtonPos::Middle, self.area.center().x, Align::Center);
        self.paint_slot(display, ButtonPos::Right, self.area.right(), Align::Right);
        self.repaint = false;
    }

    fn request_repaint(&mut self) {
        self.repaint = true;
    }

    fn read_content(&self, out: &mut Vec<String>) {
        for pos in [ButtonPos::Left, ButtonPos::Middle, ButtonPos::Right] {
            if let Some(label) = self.layout.label(pos) {
                out.push(label.to_string());
            }
        }
    }
}
