//! Container forwarding events to a list of children.

use crate::core::component::{Component, UiResult};
use crate::core::display::Display;
use crate::core::event::{Event, EventCtx};

#[derive(Default)]
pub struct Container {
    children: Vec<Box<dyn Component>>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_child(mut self, component: impl Component + 'static) -> Self {
        self.children.push(Box::new(component));
        self
    }

    pub fn add_child(&mut self, component: Box<dyn Component>) {
        self.children.push(component);
    }

    pub fn remove_child(&mut self, index: usize) -> Option<Box<dyn Component>> {
        if index < self.children.len() {
            Some(self.children.remove(index))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Component for Container {
    /// First child to produce a result wins; later children do not see the event.
    fn event(&mut self, ctx: &mut EventCtx, event: &Event) -> Option<UiResult> {
        for child in self.children.iter_mut() {
            if let Some(result) = child.event(ctx, event) {
                return Some(result);
            }
        }
        None
    }

    fn paint(&mut self, display: &mut dyn Display) {
        for child in self.children.iter_mut() {
            child.paint(display);
        }
    }

    fn request_repaint(&mut self) {
        for child in self.children.iter_mut() {
            child.request_repaint();
        }
    }

    fn read_content(&self, out: &mut Vec<String>) {
        for child in &self.children {
            child.read_content(out);
        }
    }

    fn page_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.page_count())
            .max()
            .unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::Container;
    use crate::core::component::{content_of, Component, UiResult};
    use crate::core::display::Display;
    use crate::core::event::{Event, EventCtx, TimerToken};

    struct Fixed {
        text: &'static str,
        result: Option<UiResult>,
        paints: usize,
    }

    impl Component for Fixed {
        fn event(&mut self, _ctx: &mut EventCtx, _event: &Event) -> Option<UiResult> {
            self.result.clone()
        }

        fn paint(&mut self, _display: &mut dyn Display) {
            self.paints += 1;
        }

        fn request_repaint(&mut self) {}

        fn read_content(&self, out: &mut Vec<String>) {
            out.push(self.text.to_string());
        }
    }

    fn fixed(text: &'static str, result: Option<UiResult>) -> Fixed {
        Fixed {
            text,
            result,
            paints: 0,
        }
    }

    #[test]
    fn first_result_wins() {
        let mut container = Container::new()
            .with_child(fixed("a", None))
            .with_child(fixed("b", Some(UiResult::Info)))
            .with_child(fixed("c", Some(UiResult::Confirmed)));
        let mut ctx = EventCtx::new();
        assert_eq!(
            container.event(&mut ctx, &Event::Timer(TimerToken(1))),
            Some(UiResult::Info)
        );
    }

    #[test]
    fn content_is_collected_in_order() {
        let mut container = Container::new().with_child(fixed("a", None));
        container.add_child(Box::new(fixed("b", None)));
        assert_eq!(content_of(&container), vec!["a", "b"]);
        assert!(container.remove_child(5).is_none());
        assert_eq!(container.len(), 2);
    }
}
