//! Touch buttons.

use std::time::Duration;

use crate::core::component::{Component, UiResult};
use crate::core::display::{Align, Display, Icon};
use crate::core::event::{Event, EventCtx, TimerToken, TouchEvent};
use crate::core::geometry::{Point, Rect};
use crate::widgets::theme::{ButtonStyle, Theme};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonContent {
    Empty,
    Text(String),
    Icon(Icon),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Initial,
    Pressed,
    /// Touch left the area while pressed; the release will not click.
    Released,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonMsg {
    Pressed,
    Released,
    Clicked,
    LongPressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonStyleSheet {
    pub normal: ButtonStyle,
    pub active: ButtonStyle,
    pub disabled: ButtonStyle,
}

impl ButtonStyleSheet {
    pub fn default_for(theme: &Theme) -> Self {
        Self::with_normal(theme, theme.button_default)
    }

    pub fn confirm(theme: &Theme) -> Self {
        Self::with_normal(theme, theme.button_confirm)
    }

    pub fn cancel(theme: &Theme) -> Self {
        Self::with_normal(theme, theme.button_cancel)
    }

    pub fn danger(theme: &Theme) -> Self {
        Self::with_normal(theme, theme.button_danger)
    }

    fn with_normal(theme: &Theme, normal: ButtonStyle) -> Self {
        Self {
            normal,
            active: theme.button_pressed,
            disabled: theme.button_disabled,
        }
    }
}

/// A touch button. A click is a touch that starts and ends inside its area.
#[derive(Debug, Clone)]
pub struct Button {
    area: Rect,
    content: ButtonContent,
    styles: ButtonStyleSheet,
    state: ButtonState,
    on_click: Option<UiResult>,
    long_press: Option<Duration>,
    long_timer: Option<TimerToken>,
    repaint: bool,
}

impl Button {
    pub fn new(area: Rect, content: ButtonContent, styles: ButtonStyleSheet) -> Self {
        Self {
            area,
            content,
            styles,
            state: ButtonState::Initial,
            on_click: None,
            long_press: None,
            long_timer: None,
            repaint: true,
        }
    }

    pub fn with_text(area: Rect, text: impl Into<String>, styles: ButtonStyleSheet) -> Self {
        Self::new(area, ButtonContent::Text(text.into()), styles)
    }

    pub fn with_icon(area: Rect, icon: Icon, styles: ButtonStyleSheet) -> Self {
        Self::new(area, ButtonContent::Icon(icon), styles)
    }

    /// Result reported through [`Component::event`] on click.
    pub fn on_click(mut self, result: UiResult) -> Self {
        self.on_click = Some(result);
        self
    }

    pub fn with_long_press(mut self, duration: Duration) -> Self {
        self.long_press = Some(duration);
        self
    }

    pub fn initially_enabled(mut self, enabled: bool) -> Self {
        if !enabled {
            self.state = ButtonState::Disabled;
        }
        self
    }

    pub fn content(&self) -> &ButtonContent {
        &self.content
    }

    pub fn set_content(&mut self, content: ButtonContent) {
        if self.content != content {
            self.content = content;
            self.repaint = true;
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state != ButtonState::Disabled
    }

    pub fn enable_if(&mut self, enabled: bool) {
        if enabled {
            if self.state == ButtonState::Disabled {
                self.set_state(ButtonState::Initial);
            }
        } else {
            self.long_timer = None;
            self.set_state(ButtonState::Disabled);
        }
    }

    fn set_state(&mut self, state: ButtonState) {
        if self.state != state {
            self.state = state;
            self.repaint = true;
        }
    }

    fn style(&self) -> ButtonStyle {
        match self.state {
            ButtonState::Initial | ButtonState::Released => self.styles.normal,
            ButtonState::Pressed => self.styles.active,
            ButtonState::Disabled => self.styles.disabled,
        }
    }

    /// Low-level event handling, for containers that react to more than clicks.
    pub fn handle(&mut self, ctx: &mut EventCtx, event: &Event) -> Option<ButtonMsg> {
        match event {
            Event::Touch(TouchEvent::Start(pos)) => {
                if self.state != ButtonState::Disabled && self.area.contains(*pos) {
                    self.set_state(ButtonState::Pressed);
                    if let Some(duration) = self.long_press {
                        self.long_timer = Some(ctx.request_timer(duration));
                    }
                    return Some(ButtonMsg::Pressed);
                }
            }
            Event::Touch(TouchEvent::Move(pos)) => {
                if self.state == ButtonState::Pressed && !self.area.contains(*pos) {
                    self.set_state(ButtonState::Released);
                    self.long_timer = None;
                    return Some(ButtonMsg::Released);
                }
            }
            Event::Touch(TouchEvent::End(pos)) => match self.state {
                ButtonState::Initial | ButtonState::Disabled => {}
                ButtonState::Pressed if self.area.contains(*pos) => {
                    self.set_state(ButtonState::Initial);
                    self.long_timer = None;
                    return Some(ButtonMsg::Clicked);
                }
                _ => {
                    self.set_state(ButtonState::Initial);
                    self.long_timer = None;
                }
            },
            Event::Timer(token) if Some(*token) == self.long_timer => {
                self.long_timer = None;
                if self.state == ButtonState::Pressed {
                    self.set_state(ButtonState::Initial);
                    return Some(ButtonMsg::LongPressed);
                }
            }
            _ => {}
        }
        None
    }
}

impl Component for Button {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event) -> Option<UiResult> {
        match self.handle(ctx, event) {
            Some(ButtonMsg::Clicked) => self.on_click.clone(),
            _ => None,
        }
    }

    fn paint(&mut self, display: &mut dyn Display) {
        if !self.repaint {
            return;
        }
        let style = self.style();
        display.bar(self.area, style.bg);
        let center = self.area.center();
        match &self.content {
            ButtonContent::Empty => {}
            ButtonContent::Text(text) => {
                let baseline = center.y + display.line_height(style.font) / 4;
                display.text_aligned(
                    Point::new(center.x, baseline),
                    text,
                    style.font,
                    style.fg,
                    style.bg,
                    Align::Center,
                );
            }
            ButtonContent::Icon(icon) => display.icon(center, *icon, style.fg, style.bg),
        }
        self.repaint = false;
    }

    fn request_repaint(&mut self) {
        self.repaint = true;
    }

    fn read_content(&self, out: &mut Vec<String>) {
        if let ButtonContent::Text(text) = &self.content {
            out.push(text.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Button, ButtonMsg, ButtonState, ButtonStyleSheet};
    use crate::core::component::{Component, UiResult};
    use crate::core::event::{Event, EventCtx, TouchEvent};
    use crate::core::geometry::{Point, Rect};
    use crate::widgets::theme::Theme;
    use std::time::Duration;

    fn button() -> Button {
        let theme = Theme::default();
        Button::with_text(
            Rect::new(0, 0, 100, 40),
            "OK",
            ButtonStyleSheet::confirm(&theme),
        )
        .on_click(UiResult::Confirmed)
    }

    fn touch(event: TouchEvent) -> Event {
        Event::Touch(event)
    }

    #[test]
    fn click_inside_reports_result() {
        let mut ctx = EventCtx::new();
        let mut button = button();
        assert_eq!(button.event(&mut ctx, &touch(TouchEvent::Start(Point::new(5, 5)))), None);
        assert_eq!(button.state(), ButtonState::Pressed);
        assert_eq!(
            button.event(&mut ctx, &touch(TouchEvent::End(Point::new(50, 30)))),
            Some(UiResult::Confirmed)
        );
        assert_eq!(button.state(), ButtonState::Initial);
    }

    #[test]
    fn ending_outside_does_not_click() {
        let mut ctx = EventCtx::new();
        let mut button = button();
        button.handle(&mut ctx, &touch(TouchEvent::Start(Point::new(5, 5))));
        assert_eq!(
            button.handle(&mut ctx, &touch(TouchEvent::Move(Point::new(150, 5)))),
            Some(ButtonMsg::Released)
        );
        assert_eq!(
            button.handle(&mut ctx, &touch(TouchEvent::End(Point::new(5, 5)))),
            None
        );
        // Right and bottom edges are outside the area.
        button.handle(&mut ctx, &touch(TouchEvent::Start(Point::new(5, 5))));
        assert_eq!(
            button.handle(&mut ctx, &touch(TouchEvent::End(Point::new(100, 5)))),
            None
        );
    }

    #[test]
    fn disabled_button_ignores_touches() {
        let mut ctx = EventCtx::new();
        let mut button = button().initially_enabled(false);
        assert_eq!(
            button.handle(&mut ctx, &touch(TouchEvent::Start(Point::new(5, 5)))),
            None
        );
        button.enable_if(true);
        assert!(button.is_enabled());
    }

    #[test]
    fn long_press_fires_on_timer() {
        let mut ctx = EventCtx::new();
        let mut button = button().with_long_press(Duration::from_millis(500));
        button.handle(&mut ctx, &touch(TouchEvent::Start(Point::new(5, 5))));
        let timers = ctx.take_timers();
        assert_eq!(timers.len(), 1);
        let (token, after) = timers[0];
        assert_eq!(after, Duration::from_millis(500));
        assert_eq!(
            button.handle(&mut ctx, &Event::Timer(token)),
            Some(ButtonMsg::LongPressed)
        );
    }
}
