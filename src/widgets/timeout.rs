//! Content that confirms itself after a while.

use std::time::Duration;

use crate::core::component::{Component, UiResult};
use crate::core::display::Display;
use crate::core::event::{Event, EventCtx, TimerToken};

/// Wraps `content` and finishes with `Confirmed` once `duration` has passed.
///
/// The timer is armed by the first `Repaint`, which every layout dispatches before it renders.
pub struct Timeout<C> {
    content: C,
    duration: Duration,
    timer: Option<TimerToken>,
}

impl<C: Component> Timeout<C> {
    pub fn new(content: C, duration: Duration) -> Self {
        Self {
            content,
            duration,
            timer: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }
}

impl<C: Component> Component for Timeout<C> {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event) -> Option<UiResult> {
        match event {
            Event::Timer(token) if Some(*token) == self.timer => {
                self.timer = None;
                Some(UiResult::Confirmed)
            }
            _ => self.content.event(ctx, event),
        }
    }

    fn paint(&mut self, display: &mut dyn Display) {
        self.content.paint(display);
    }

    fn request_repaint(&mut self) {
        self.content.request_repaint();
    }

    fn read_content(&self, out: &mut Vec<String>) {
        self.content.read_content(out);
    }

    fn page_count(&self) -> usize {
        self.content.page_count()
    }

    fn dispatch(
        &mut self,
        ctx: &mut EventCtx,
        event: &Event,
        display: &mut dyn Display,
    ) -> Option<UiResult> {
        match event {
            Event::Render => {
                self.paint(display);
                None
            }
            Event::Repaint => {
                if self.timer.is_none() {
                    self.timer = Some(ctx.request_timer(self.duration));
                }
                self.request_repaint();
                None
            }
            _ => self.event(ctx, event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Timeout;
    use crate::core::component::{Component, UiResult};
    use crate::core::event::{Event, EventCtx};
    use crate::render::RecordingDisplay;
    use crate::widgets::text::Text;
    use crate::widgets::theme::Theme;
    use std::time::Duration;

    #[test]
    fn first_repaint_arms_the_timer_once() {
        let theme = Theme::touch(240, 240);
        let mut display = RecordingDisplay::new(240, 240);
        let mut popup = Timeout::new(Text::new(&theme, "Done"), Duration::from_millis(5));
        let mut ctx = EventCtx::new();
        assert!(!popup.is_armed());
        popup.dispatch(&mut ctx, &Event::Repaint, &mut display);
        popup.dispatch(&mut ctx, &Event::Repaint, &mut display);
        let timers = ctx.take_timers();
        assert_eq!(timers.len(), 1);
        let (token, after) = timers[0];
        assert_eq!(after, Duration::from_millis(5));
        assert_eq!(
            popup.dispatch(&mut ctx, &Event::Timer(token), &mut display),
            Some(UiResult::Confirmed)
        );
    }
}
