//! Generic screens the flows are made of.

use crate::core::color::Color;
use crate::core::component::Component;
use crate::core::display::{Font, Icon};
use crate::core::text::layout::TextItem;
use crate::layouts::UiContext;
use crate::widgets::dialog::{Dialog, DialogVerbs};
use crate::widgets::hold_to_confirm::HoldToConfirm;
use crate::widgets::paginated::Paginated;
use crate::widgets::text::Text;

/// Declarative description of one dialog, built into a [`Paginated`] tree.
///
/// Paragraphs and values start on fresh lines, in the order they were added. Content flows over
/// as many pages as it needs; only the last page carries the controls.
#[derive(Debug, Clone, Default)]
pub struct Screen {
    title: String,
    icon: Option<(Icon, Color)>,
    items: Vec<TextItem>,
    verb: Option<String>,
    verb_cancel: Option<String>,
    verb_info: Option<String>,
    hold: bool,
    danger: bool,
}

impl Screen {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn icon(mut self, icon: Icon, color: Color) -> Self {
        self.icon = Some((icon, color));
        self
    }

    /// Start a paragraph in `font`. Empty text is skipped.
    pub fn paragraph(mut self, font: Font, text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return self;
        }
        if !self.items.is_empty() {
            self.items.push(TextItem::Br);
        }
        self.items.push(TextItem::Font(font));
        self.items.push(TextItem::Text(text));
        self
    }

    /// Continue the current paragraph in `font`.
    pub fn inline(mut self, font: Font, text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            return self;
        }
        self.items.push(TextItem::Font(font));
        self.items.push(TextItem::Text(text));
        self
    }

    pub fn normal(self, text: impl Into<String>) -> Self {
        self.paragraph(Font::Normal, text)
    }

    pub fn bold(self, text: impl Into<String>) -> Self {
        self.paragraph(Font::Bold, text)
    }

    /// Value shown where it is added, paginated with the rest when long.
    pub fn value(self, value: impl Into<String>, font: Font) -> Self {
        self.paragraph(font, value)
    }

    pub fn verb(mut self, verb: impl Into<String>) -> Self {
        self.verb = Some(verb.into());
        self
    }

    pub fn verb_cancel(mut self, verb_cancel: Option<String>) -> Self {
        self.verb_cancel = verb_cancel;
        self
    }

    pub fn verb_info(mut self, verb_info: Option<String>) -> Self {
        self.verb_info = verb_info;
        self
    }

    pub fn hold(mut self, hold: bool) -> Self {
        self.hold = hold;
        self
    }

    pub fn danger(mut self, danger: bool) -> Self {
        self.danger = danger;
        self
    }

    pub fn build(self, ctx: &UiContext<'_>) -> Paginated {
        let pages = self.content_pages(ctx);
        self.assemble(ctx, pages)
    }

    /// Content pages without controls. Nothing is cut off: text that does not fit continues on
    /// the next page.
    pub fn content_pages(&self, ctx: &UiContext<'_>) -> Vec<Text> {
        let mut text = Text::new(ctx.theme(), self.title.as_str());
        if let Some((icon, color)) = self.icon {
            text = text.with_icon(icon, color);
        }
        for item in &self.items {
            text.push(item.clone());
        }
        text.into_pages(ctx.display())
    }

    /// Put `pages` in a [`Paginated`], with this screen's controls on the last one.
    pub fn assemble(&self, ctx: &UiContext<'_>, pages: Vec<Text>) -> Paginated {
        let last = pages.len().saturating_sub(1);
        let mut components: Vec<Box<dyn Component>> = Vec::with_capacity(pages.len());
        for (index, text) in pages.into_iter().enumerate() {
            if index == last {
                components.push(self.controls(ctx, text));
            } else {
                components.push(Box::new(text));
            }
        }
        Paginated::new(ctx.theme(), ctx.input(), components)
    }

    fn controls(&self, ctx: &UiContext<'_>, content: Text) -> Box<dyn Component> {
        let theme = ctx.theme();
        if self.hold {
            let label = self
                .verb
                .clone()
                .unwrap_or_else(|| ctx.button("buttons__hold_to_confirm"));
            let mut hold = HoldToConfirm::new(theme, ctx.input(), content, label, self.danger);
            if let Some(cancel) = &self.verb_cancel {
                hold = hold.with_cancel(theme, cancel.clone());
            }
            return Box::new(hold);
        }
        let verbs = DialogVerbs {
            cancel: self.verb_cancel.clone(),
            info: self.verb_info.clone(),
            confirm: self.verb.clone(),
            danger: self.danger,
        };
        Box::new(Dialog::new(theme, ctx.input(), content, &verbs))
    }
}

/// Label/value pairs under `title`, left with a single back control.
pub fn info_screen(ctx: &UiContext<'_>, title: &str, items: &[(String, String)]) -> Paginated {
    let mut screen = Screen::new(title).verb_cancel(Some(ctx.button("buttons__back")));
    for (label, value) in items {
        screen = screen.bold(label.clone()).paragraph(Font::Mono, value.clone());
    }
    screen.build(ctx)
}

/// Replace `{}` (or `{0}`) in `template` by `param`.
pub fn format_param(template: &str, param: Option<&str>) -> String {
    match param {
        Some(param) if template.contains("{}") => template.replacen("{}", param, 1),
        Some(param) => template.replace("{0}", param),
        None => template.to_string(),
    }
}
