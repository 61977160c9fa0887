//! Content with cancel, confirm and info controls.

use crate::core::component::{Component, UiResult};
use crate::core::display::Display;
use crate::core::event::{Event, EventCtx, InputKind};
use crate::core::geometry::Grid;
use crate::widgets::button::{Button, ButtonStyleSheet};
use crate::widgets::button_controller::{ButtonController, ButtonLayout, ButtonPos};
use crate::widgets::theme::Theme;

/// Which controls a dialog offers and what they say.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogVerbs {
    pub cancel: Option<String>,
    pub info: Option<String>,
    pub confirm: Option<String>,
    pub danger: bool,
}

impl DialogVerbs {
    pub fn new(cancel: Option<&str>, confirm: &str) -> Self {
        Self {
            cancel: cancel.map(str::to_string),
            info: None,
            confirm: Some(confirm.to_string()),
            danger: false,
        }
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    pub fn with_danger(mut self, danger: bool) -> Self {
        self.danger = danger;
        self
    }
}

enum Controls {
    Touch(Vec<Button>),
    Physical(ButtonController),
}

/// A content component above a row of controls.
pub struct Dialog {
    content: Box<dyn Component>,
    controls: Controls,
}

impl Dialog {
    pub fn new(
        theme: &Theme,
        input: InputKind,
        content: impl Component + 'static,
        verbs: &DialogVerbs,
    ) -> Self {
        let controls = match input {
            InputKind::Touch => Controls::Touch(Self::touch_buttons(theme, verbs)),
            InputKind::Buttons => {
                let mut layout = ButtonLayout::new();
                if let Some(cancel) = &verbs.cancel {
                    layout = layout.with(ButtonPos::Left, cancel.clone(), UiResult::Cancelled);
                }
                if let Some(info) = &verbs.info {
                    layout = layout.with(ButtonPos::Middle, info.clone(), UiResult::Info);
                }
                if let Some(confirm) = &verbs.confirm {
                    layout = layout.with(ButtonPos::Right, confirm.clone(), UiResult::Confirmed);
                }
                Controls::Physical(ButtonController::new(theme, layout))
            }
        };
        Self {
            content: Box::new(content),
            controls,
        }
    }

    fn touch_buttons(theme: &Theme, verbs: &DialogVerbs) -> Vec<Button> {
        let mut specs = Vec::new();
        if let Some(cancel) = &verbs.cancel {
            specs.push((cancel.clone(), ButtonStyleSheet::cancel(theme), UiResult::Cancelled));
        }
        if let Some(info) = &verbs.info {
            specs.push((info.clone(), ButtonStyleSheet::default_for(theme), UiResult::Info));
        }
        if let Some(confirm) = &verbs.confirm {
            let styles = if verbs.danger {
                ButtonStyleSheet::danger(theme)
            } else {
                ButtonStyleSheet::confirm(theme)
            };
            specs.push((confirm.clone(), styles, UiResult::Confirmed));
        }
        let grid = Grid::new(theme.button_area(), specs.len().max(1) as i32, 1)
            .with_spacing(theme.button_spacing);
        specs
            .into_iter()
            .enumerate()
            .map(|(index, (label, styles, result))| {
                Button::with_text(grid.cell(index), label, styles).on_click(result)
            })
            .collect()
    }

    pub fn content(&self) -> &dyn Component {
        self.content.as_ref()
    }
}

impl Component for Dialog {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event) -> Option<UiResult> {
        if let Some(result) = self.content.event(ctx, event) {
            return Some(result);
        }
        match &mut self.controls {
            Controls::Touch(buttons) => {
                for button in buttons.iter_mut() {
                    if let Some(result) = button.event(ctx, event) {
                        return Some(result);
                    }
                }
                None
            }
            Controls::Physical(controller) => controller.event(ctx, event),
        }
    }

    fn paint(&mut self, display: &mut dyn Display) {
        self.content.paint(display);
        match &mut self.controls {
            Controls::Touch(buttons) => buttons.iter_mut().for_each(|button| button.paint(display)),
            Controls::Physical(controller) => controller.paint(display),
        }
    }

    fn request_repaint(&mut self) {
        self.content.request_repaint();
        match &mut self.controls {
            Controls::Touch(buttons) => buttons.iter_mut().for_each(Button::request_repaint),
            Controls::Physical(controller) => controller.request_repaint(),
        }
    }

    fn read_content(&self, out: &mut Vec<String>) {
        self.content.read_content(out);
        match &self.controls {
            Controls::Touch(buttons) => buttons.iter().for_each(|button| button.read_content(out)),
            Controls::Physical(controller) => controller.read_content(out),
        }
    }

    fn page_count(&self) -> usize {
        self.content.page_count()
    }
}

#[cfg(test)]
mod tests {
    use super::{Dialog, DialogVerbs};
    use crate::core::component::{content_of, Component, UiResult};
    use crate::core::event::{ButtonEvent, Event, EventCtx, InputKind, PhysicalButton, TouchEvent};
    use crate::widgets::text::Text;
    use crate::widgets::theme::Theme;

    #[test]
    fn touch_dialog_lays_buttons_in_a_row() {
        let theme = Theme::touch(240, 240);
        let verbs = DialogVerbs::new(Some("Cancel"), "Confirm").with_info("Info");
        let mut dialog = Dialog::new(
            &theme,
            InputKind::Touch,
            Text::new(&theme, "Title").normal("Body"),
            &verbs,
        );
        assert_eq!(
            content_of(&dialog),
            vec!["Title", "Body", "Cancel", "Info", "Confirm"]
        );
        let area = theme.button_area();
        let mut ctx = EventCtx::new();
        let right = area.right() - 10;
        let y = area.center().y;
        let point = crate::core::geometry::Point::new(right, y);
        dialog.event(&mut ctx, &Event::Touch(TouchEvent::Start(point)));
        assert_eq!(
            dialog.event(&mut ctx, &Event::Touch(TouchEvent::End(point))),
            Some(UiResult::Confirmed)
        );
        let left = crate::core::geometry::Point::new(area.x + 5, y);
        dialog.event(&mut ctx, &Event::Touch(TouchEvent::Start(left)));
        assert_eq!(
            dialog.event(&mut ctx, &Event::Touch(TouchEvent::End(left))),
            Some(UiResult::Cancelled)
        );
    }

    #[test]
    fn physical_dialog_maps_buttons() {
        let theme = Theme::buttons(128, 64);
        let mut dialog = Dialog::new(
            &theme,
            InputKind::Buttons,
            Text::new(&theme, "Title"),
            &DialogVerbs::new(None, "OK"),
        );
        let mut ctx = EventCtx::new();
        let button = Event::Button;
        dialog.event(&mut ctx, &button(ButtonEvent::Pressed(PhysicalButton::Left)));
        assert_eq!(
            dialog.event(&mut ctx, &button(ButtonEvent::Released(PhysicalButton::Left))),
            None
        );
        dialog.event(&mut ctx, &button(ButtonEvent::Pressed(PhysicalButton::Right)));
        assert_eq!(
            dialog.event(&mut ctx, &button(ButtonEvent::Released(PhysicalButton::Right))),
            Some(UiResult::Confirmed)
        );
    }
}
