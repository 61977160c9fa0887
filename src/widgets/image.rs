//! Image preview, such as a new homescreen.

use crate::core::component::{Component, UiResult};
use crate::core::display::Display;
use crate::core::event::{Event, EventCtx};
use crate::core::geometry::Rect;
use crate::widgets::text::Label;
use crate::widgets::theme::Theme;

/// Encoded image drawn into an area, with a text fallback when there is no data.
#[derive(Debug, Clone)]
pub struct Image {
    area: Rect,
    data: Vec<u8>,
    fallback: Option<Label>,
    repaint: bool,
}

impl Image {
    pub fn new(area: Rect, data: impl Into<Vec<u8>>) -> Self {
        Self {
            area,
            data: data.into(),
            fallback: None,
            repaint: true,
        }
    }

    /// Text shown instead of an empty image.
    pub fn with_fallback(mut self, theme: &Theme, fallback: impl Into<String>) -> Self {
        let label = Label::centered(fallback, self.area, theme.text_font)
            .with_colors(theme.fg, theme.bg);
        self.fallback = Some(label);
        self
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Component for Image {
    fn event(&mut self, _ctx: &mut EventCtx, _event: &Event) -> Option<UiResult> {
        None
    }

    fn paint(&mut self, display: &mut dyn Display) {
        if !self.repaint {
            return;
        }
        match &mut self.fallback {
            Some(label) if self.data.is_empty() => {
                label.request_repaint();
                label.paint(display);
            }
            _ => display.image(self.area, &self.data),
        }
        self.repaint = false;
    }

    fn request_repaint(&mut self) {
        self.repaint = true;
    }

    fn read_content(&self, out: &mut Vec<String>) {
        if let Some(label) = self.fallback.as_ref().filter(|_| self.data.is_empty()) {
            label.read_content(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Image;
    use crate::core::component::{content_of, Component};
    use crate::core::geometry::Rect;
    use crate::render::RecordingDisplay;
    use crate::widgets::theme::Theme;
    use pretty_assertions::assert_eq;

    #[test]
    fn data_goes_to_the_display() {
        let theme = Theme::touch(240, 240);
        let mut image = Image::new(theme.body_area(), vec![0xff, 0xd8, 0xff]);
        let mut display = RecordingDisplay::new(240, 240);
        image.paint(&mut display);
        assert_eq!(display.screen_images(), vec![3]);
        assert!(display.screen_contents().is_empty());
        assert!(content_of(&image).is_empty());
    }

    #[test]
    fn empty_image_shows_the_fallback() {
        let theme = Theme::touch(240, 240);
        let mut image =
            Image::new(Rect::new(0, 40, 240, 150), Vec::new()).with_fallback(&theme, "Default");
        let mut display = RecordingDisplay::new(240, 240);
        image.paint(&mut display);
        assert!(display.screen_images().is_empty());
        assert_eq!(display.screen_contents(), vec!["Default"]);
        assert_eq!(content_of(&image), vec!["Default"]);
    }
}
