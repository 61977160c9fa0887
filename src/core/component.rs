//! Component trait and the values a component tree can finish with.

use crate::core::display::Display;
use crate::core::event::{Event, EventCtx};

/// Outcome a component reports to its layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiResult {
    Confirmed,
    Cancelled,
    /// The user asked for more details.
    Info,
    Text(String),
    Number(u32),
    Index(usize),
}

/// Renderable, event-driven widget.
///
/// Trees are shallow and composed by hand: containers forward `event`, `paint` and
/// `request_repaint` to their children. Widgets keep a repaint flag and only draw when it is set.
pub trait Component {
    /// Handle a touch, button or timer event.
    fn event(&mut self, ctx: &mut EventCtx, event: &Event) -> Option<UiResult>;

    /// Draw if the repaint flag is set, then clear it.
    fn paint(&mut self, display: &mut dyn Display);

    /// Force the next `paint` to draw.
    fn request_repaint(&mut self);

    /// Append the text this component shows, in reading order.
    fn read_content(&self, _out: &mut Vec<String>) {}

    /// Number of pages the user has to go through.
    fn page_count(&self) -> usize {
        1
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
                self.request_repaint();
                None
            }
            _ => self.event(ctx, event),
        }
    }
}

impl<C: Component + ?Sized> Component for Box<C> {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event) -> Option<UiResult> {
        (**self).event(ctx, event)
    }

    fn paint(&mut self, display: &mut dyn Display) {
        (**self).paint(display)
    }

    fn request_repaint(&mut self) {
        (**self).request_repaint()
    }

    fn read_content(&self, out: &mut Vec<String>) {
        (**self).read_content(out)
    }

    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn dispatch(
        &mut self,
        ctx: &mut EventCtx,
        event: &Event,
        display: &mut dyn Display,
    ) -> Option<UiResult> {
        (**self).dispatch(ctx, event, display)
    }
}

impl<C: Component + ?Sized> Component for &mut C {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event) -> Option<UiResult> {
        (**self).event(ctx, event)
    }

    fn paint(&mut self, display: &mut dyn Display) {
        (**self).paint(display)
    }

    fn request_repaint(&mut self) {
        (**self).request_repaint()
    }

    fn read_content(&self, out: &mut Vec<String>) {
        (**self).read_content(out)
    }

    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn dispatch(
        &mut self,
        ctx: &mut EventCtx,
        event: &Event,
        display: &mut dyn Display,
    ) -> Option<UiResult> {
        (**self).dispatch(ctx, event, display)
    }
}

/// Collect everything `component` shows.
pub fn content_of(component: &dyn Component) -> Vec<String> {
    let mut out = Vec::new();
    component.read_content(&mut out);
    out
}
