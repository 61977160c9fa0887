//! Confirmation flows: actions, values, blobs, outputs and transaction summaries.

use std::cmp::Ordering;

use tracing::debug;

use crate::core::component::{Component, UiResult};
use crate::core::display::Font;
use crate::core::text::layout::chunkify;
use crate::error::{Result, UiError};
use crate::layouts::address::show_mismatch;
use crate::layouts::host::ButtonRequestType;
use crate::layouts::screens::{format_param, info_screen, Screen};
use crate::layouts::{confirm_linear_flow, interact, raise_if_not_confirmed, with_info, UiContext};
use crate::widgets::container::Container;
use crate::widgets::dialog::{Dialog, DialogVerbs};
use crate::widgets::image::Image;
use crate::widgets::text::Text;

/// Messages longer than this many pages are offered a "show all" step instead of paging.
pub const LONG_MSG_PAGE_THRESHOLD: usize = 5;

const CHUNK_LEN: usize = 4;
const CHUNKS_PER_LINE: usize = 4;

/// Parameters of [`confirm_action`].
#[derive(Debug, Clone)]
pub struct ConfirmAction<'s> {
    pub br_name: &'s str,
    pub title: &'s str,
    pub action: Option<&'s str>,
    pub description: Option<&'s str>,
    pub description_param: Option<&'s str>,
    pub subtitle: Option<&'s str>,
    pub verb: Option<&'s str>,
    pub verb_cancel: Option<&'s str>,
    pub cancellable: bool,
    pub hold: bool,
    pub hold_danger: bool,
    /// Show the description before the action.
    pub reverse: bool,
    pub exc: UiError,
    pub br_code: ButtonRequestType,
}

impl<'s> ConfirmAction<'s> {
    pub fn new(br_name: &'s str, title: &'s str) -> Self {
        Self {
            br_name,
            title,
            action: None,
            description: None,
            description_param: None,
            subtitle: None,
            verb: None,
            verb_cancel: None,
            cancellable: true,
            hold: false,
            hold_danger: false,
            reverse: false,
            exc: UiError::ActionCancelled,
            br_code: ButtonRequestType::Other,
        }
    }

    pub fn action(mut self, action: &'s str) -> Self {
        self.action = Some(action);
        self
    }

    pub fn description(mut self, description: &'s str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn description_param(mut self, param: &'s str) -> Self {
        self.description_param = Some(param);
        self
    }

    pub fn subtitle(mut self, subtitle: &'s str) -> Self {
        self.subtitle = Some(subtitle);
        self
    }

    pub fn verb(mut self, verb: &'s str) -> Self {
        self.verb = Some(verb);
        self
    }

    pub fn verb_cancel(mut self, verb_cancel: &'s str) -> Self {
        self.verb_cancel = Some(verb_cancel);
        self
    }

    /// Drop the cancel control.
    pub fn no_cancel(mut self) -> Self {
        self.cancellable = false;
        self
    }

    pub fn hold(mut self, hold: bool) -> Self {
        self.hold = hold;
        self
    }

    pub fn hold_danger(mut self, hold_danger: bool) -> Self {
        self.hold_danger = hold_danger;
        self
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn exc(mut self, exc: UiError) -> Self {
        self.exc = exc;
        self
    }

    pub fn br_code(mut self, br_code: ButtonRequestType) -> Self {
        self.br_code = br_code;
        self
    }
}

/// Confirm an action described by a bold action line and a description.
pub fn confirm_action(ctx: &mut UiContext<'_>, params: &ConfirmAction<'_>) -> Result<()> {
    let description = params
        .description
        .map(|description| format_param(description, params.description_param))
        .unwrap_or_default();
    let action = params.action.unwrap_or_default();

    let mut screen = Screen::new(params.title);
    if let Some(subtitle) = params.subtitle {
        screen = screen.bold(subtitle);
    }
    screen = if params.reverse {
        screen.normal(description).bold(action)
    } else {
        screen.bold(action).normal(description)
    };
    let verb = match params.verb {
        Some(verb) => ctx.skin().button_label(verb),
        None => ctx.button("buttons__confirm"),
    };
    let verb_cancel = params.cancellable.then(|| match params.verb_cancel {
        Some(verb) => ctx.skin().button_label(verb),
        None => ctx.button("buttons__cancel"),
    });
    let component = screen
        .verb(verb)
        .verb_cancel(verb_cancel)
        .hold(params.hold || params.hold_danger)
        .danger(params.hold_danger)
        .build(ctx);
    raise_if_not_confirmed(
        ctx,
        component,
        Some(params.br_name),
        params.br_code,
        params.exc.clone(),
    )
}

/// Confirm a sentence with one emphasized parameter at its `{0}` placeholder.
pub fn confirm_single(
    ctx: &mut UiContext<'_>,
    br_name: &str,
    title: &str,
    description: &str,
    description_param: &str,
    verb: Option<&str>,
) -> Result<()> {
    let Some((begin, end)) = description.split_once("{0}") else {
        return Err(UiError::InvalidArgument(format!(
            "description has no {{0}} placeholder: {description}"
        )));
    };
    let verb = match verb {
        Some(verb) => ctx.skin().button_label(verb),
        None => ctx.button("buttons__confirm"),
    };
    let component = Screen::new(title)
        .normal(begin.trim())
        .inline(Font::Bold, description_param)
        .inline(Font::Normal, end.trim())
        .verb(verb)
        .verb_cancel(Some(ctx.button("buttons__cancel")))
        .build(ctx);
    raise_if_not_confirmed(
        ctx,
        component,
        Some(br_name),
        ButtonRequestType::ProtectCall,
        UiError::ActionCancelled,
    )
}

pub fn confirm_change_passphrase(ctx: &mut UiContext<'_>, enable: bool) -> Result<()> {
    let (description, verb) = if enable {
        (ctx.tr("passphrase__turn_on"), ctx.tr("buttons__turn_on"))
    } else {
        (ctx.tr("passphrase__turn_off"), ctx.tr("buttons__turn_off"))
    };
    let title = ctx.tr("passphrase__title_settings");
    confirm_action(
        ctx,
        &ConfirmAction::new("set_passphrase", &title)
            .description(&description)
            .verb(&verb)
            .br_code(ButtonRequestType::ProtectCall),
    )
}

pub fn confirm_hide_passphrase_from_host(ctx: &mut UiContext<'_>) -> Result<()> {
    let title = ctx.tr("passphrase__title_hide");
    let description = ctx.tr("passphrase__hide");
    confirm_action(
        ctx,
        &ConfirmAction::new("set_hide_passphrase_from_host", &title)
            .description(&description)
            .br_code(ButtonRequestType::ProtectCall),
    )
}

pub fn confirm_change_passphrase_source(
    ctx: &mut UiContext<'_>,
    passphrase_always_on_device: bool,
) -> Result<()> {
    let title = ctx.tr("passphrase__title_source");
    let description = if passphrase_always_on_device {
        ctx.tr("passphrase__always_on_device")
    } else {
        ctx.tr("passphrase__revoke_on_device")
    };
    confirm_action(
        ctx,
        &ConfirmAction::new("set_passphrase_source", &title)
            .description(&description)
            .br_code(ButtonRequestType::ProtectCall),
    )
}

/// Parameters of [`confirm_value`].
#[derive(Debug, Clone)]
pub struct ConfirmValue<'s> {
    pub br_name: &'s str,
    pub title: &'s str,
    pub value: &'s str,
    pub description: Option<&'s str>,
    pub subtitle: Option<&'s str>,
    pub verb: Option<&'s str>,
    pub verb_cancel: Option<&'s str>,
    pub hold: bool,
    /// Show the value in the monospace font.
    pub is_data: bool,
    pub info_items: Vec<(String, String)>,
    pub info_title: Option<&'s str>,
    pub chunkify_info: bool,
    pub br_code: ButtonRequestType,
}

impl<'s> ConfirmValue<'s> {
    pub fn new(br_name: &'s str, title: &'s str, value: &'s str) -> Self {
        Self {
            br_name,
            title,
            value,
            description: None,
            subtitle: None,
            verb: None,
            verb_cancel: None,
            hold: false,
            is_data: true,
            info_items: Vec::new(),
            info_title: None,
            chunkify_info: false,
            br_code: ButtonRequestType::Other,
        }
    }

    pub fn description(mut self, description: &'s str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn subtitle(mut self, subtitle: &'s str) -> Self {
        self.subtitle = Some(subtitle);
        self
    }

    pub fn verb(mut self, verb: &'s str) -> Self {
        self.verb = Some(verb);
        self
    }

    pub fn verb_cancel(mut self, verb_cancel: &'s str) -> Self {
        self.verb_cancel = Some(verb_cancel);
        self
    }

    pub fn hold(mut self, hold: bool) -> Self {
        self.hold = hold;
        self
    }

    pub fn is_data(mut self, is_data: bool) -> Self {
        self.is_data = is_data;
        self
    }

    pub fn info(mut self, title: Option<&'s str>, items: Vec<(String, String)>) -> Self {
        self.info_title = title;
        self.info_items = items;
        self
    }

    pub fn chunkify_info(mut self, chunkify_info: bool) -> Self {
        self.chunkify_info = chunkify_info;
        self
    }

    pub fn br_code(mut self, br_code: ButtonRequestType) -> Self {
        self.br_code = br_code;
        self
    }

    fn screen(&self, ctx: &UiContext<'_>, with_info_button: bool) -> Screen {
        let description = match self.description {
            Some(description)
                if !description.is_empty() && !self.value.is_empty() && !description.ends_with(':') =>
            {
                format!("{description}:")
            }
            Some(description) => description.to_string(),
            None => String::new(),
        };
        let font = if self.is_data { Font::Mono } else { Font::Normal };
        let verb = match (self.verb, self.hold) {
            (Some(verb), _) => ctx.skin().button_label(verb),
            (None, true) => ctx.button("buttons__hold_to_confirm"),
            (None, false) => ctx.button("buttons__confirm"),
        };
        let verb_cancel = match self.verb_cancel {
            Some(verb) => ctx.skin().button_label(verb),
            None => ctx.button("buttons__cancel"),
        };
        let mut screen = Screen::new(self.title);
        if let Some(subtitle) = self.subtitle {
            screen = screen.bold(subtitle);
        }
        screen
            .normal(description)
            .value(self.value, font)
            .verb(verb)
            .verb_cancel(Some(verb_cancel))
            .verb_info(with_info_button.then(|| ctx.button("buttons__info")))
            .hold(self.hold)
    }
}

/// General value confirmation with an optional information screen.
pub fn confirm_value(ctx: &mut UiContext<'_>, params: &ConfirmValue<'_>) -> Result<()> {
    let has_info = !params.info_items.is_empty();
    let mut main = params.screen(ctx, has_info).build(ctx);
    let info_title = match params.info_title {
        Some(title) => title.to_string(),
        None => ctx.tr("words__title_information"),
    };
    let items: Vec<(String, String)> = params
        .info_items
        .iter()
        .map(|(label, value)| {
            let value = if params.chunkify_info {
                chunkify(value, CHUNK_LEN, CHUNKS_PER_LINE)
            } else {
                value.clone()
            };
            (label.clone(), value)
        })
        .collect();
    let mut info = info_screen(ctx, &info_title, &items);
    with_info(ctx, &mut main, &mut info, params.br_name, params.br_code)
}

/// Confirm an address. `description` may carry what other screens show as a subtitle.
pub fn confirm_address(
    ctx: &mut UiContext<'_>,
    title: &str,
    address: &str,
    description: Option<&str>,
    verb: Option<&str>,
    br_name: &str,
    br_code: ButtonRequestType,
) -> Result<()> {
    let confirm = ctx.tr("buttons__confirm");
    let params = ConfirmValue::new(br_name, title, address)
        .description(description.unwrap_or_default())
        .verb(verb.unwrap_or(&confirm))
        .br_code(br_code);
    confirm_value(ctx, &params)
}

pub fn confirm_text(
    ctx: &mut UiContext<'_>,
    br_name: &str,
    title: &str,
    data: &str,
    description: Option<&str>,
    br_code: ButtonRequestType,
) -> Result<()> {
    let confirm = ctx.tr("buttons__confirm");
    let params = ConfirmValue::new(br_name, title, data)
        .description(description.unwrap_or_default())
        .verb(&confirm)
        .br_code(br_code);
    confirm_value(ctx, &params)
}

/// Confirm an amount; the description defaults to "Amount:".
pub fn confirm_amount(
    ctx: &mut UiContext<'_>,
    title: &str,
    amount: &str,
    description: Option<&str>,
    br_name: &str,
    br_code: ButtonRequestType,
) -> Result<()> {
    let default_description = format!("{}:", ctx.tr("words__amount"));
    let confirm = ctx.tr("buttons__confirm");
    let params = ConfirmValue::new(br_name, title, amount)
        .description(description.unwrap_or(&default_description))
        .verb(&confirm)
        .br_code(br_code);
    confirm_value(ctx, &params)
}

/// Parameters of [`confirm_blob`].
#[derive(Debug, Clone)]
pub struct ConfirmBlob<'s> {
    pub br_name: &'s str,
    pub title: &'s str,
    pub data: &'s str,
    pub description: Option<&'s str>,
    pub subtitle: Option<&'s str>,
    pub verb: Option<&'s str>,
    pub hold: bool,
    /// Offer "show all" instead of paging through long data.
    pub ask_pagination: bool,
    /// Confirming unread data needs a second, held confirmation.
    pub extra_confirmation_if_not_read: bool,
    pub br_code: ButtonRequestType,
}

impl<'s> ConfirmBlob<'s> {
    pub fn new(br_name: &'s str, title: &'s str, data: &'s str) -> Self {
        Self {
            br_name,
            title,
            data,
            description: None,
            subtitle: None,
            verb: None,
            hold: false,
            ask_pagination: false,
            extra_confirmation_if_not_read: false,
            br_code: ButtonRequestType::Other,
        }
    }

    pub fn description(mut self, description: &'s str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn subtitle(mut self, subtitle: &'s str) -> Self {
        self.subtitle = Some(subtitle);
        self
    }

    pub fn verb(mut self, verb: &'s str) -> Self {
        self.verb = Some(verb);
        self
    }

    pub fn hold(mut self, hold: bool) -> Self {
        self.hold = hold;
        self
    }

    pub fn ask_pagination(mut self, ask_pagination: bool) -> Self {
        self.ask_pagination = ask_pagination;
        self
    }

    pub fn extra_confirmation_if_not_read(mut self, extra: bool) -> Self {
        self.extra_confirmation_if_not_read = extra;
        self
    }

    pub fn br_code(mut self, br_code: ButtonRequestType) -> Self {
        self.br_code = br_code;
        self
    }
}

/// Confirm arbitrary data, paging through it or asking whether to show it all.
pub fn confirm_blob(ctx: &mut UiContext<'_>, params: &ConfirmBlob<'_>) -> Result<()> {
    let description = params.description.map(|description| {
        if description.is_empty() || description.ends_with(':') {
            description.to_string()
        } else {
            format!("{description}:")
        }
    });
    let confirm = ctx.tr("buttons__confirm");
    let mut value = ConfirmValue::new(params.br_name, params.title, params.data)
        .verb(params.verb.unwrap_or(&confirm))
        .hold(params.hold)
        .br_code(params.br_code);
    value.description = description.as_deref();
    value.subtitle = params.subtitle;
    let layout = value.screen(ctx, false).build(ctx);

    if params.ask_pagination && layout.page_count() > 1 {
        debug!(pages = layout.page_count(), "asking before showing long data");
        return confirm_ask_pagination(
            ctx,
            params,
            description.as_deref().unwrap_or_default(),
        );
    }
    raise_if_not_confirmed(
        ctx,
        layout,
        Some(params.br_name),
        params.br_code,
        UiError::ActionCancelled,
    )
}

/// Ask whether to see everything: `Ok(true)` for "show all", `Ok(false)` to go on without it.
pub fn should_show_more(
    ctx: &mut UiContext<'_>,
    title: &str,
    items: &[(String, bool)],
    button_text: Option<&str>,
    br_name: &str,
    br_code: ButtonRequestType,
    confirm: Option<&str>,
) -> Result<bool> {
    let mut screen = Screen::new(title);
    for (text, mono) in items {
        let font = if *mono { Font::Mono } else { Font::Normal };
        screen = screen.paragraph(font, text.clone());
    }
    let verb = match confirm {
        Some(verb) => ctx.skin().button_label(verb),
        None => ctx.button("buttons__confirm"),
    };
    let verb_info = match button_text {
        Some(text) => ctx.skin().button_label(text),
        None => ctx.button("buttons__show_all"),
    };
    let component = screen
        .verb(verb)
        .verb_info(Some(verb_info))
        .verb_cancel(Some(ctx.button("buttons__cancel")))
        .build(ctx);
    match interact(ctx, component, Some(br_name), br_code, None)? {
        UiResult::Confirmed => Ok(false),
        UiResult::Info => Ok(true),
        _ => Err(UiError::ActionCancelled),
    }
}

fn confirm_ask_pagination(
    ctx: &mut UiContext<'_>,
    params: &ConfirmBlob<'_>,
    description: &str,
) -> Result<()> {
    let mut confirm_more = Screen::new(params.title)
        .value(params.data, Font::Mono)
        .verb(ctx.button("buttons__confirm"))
        .verb_cancel(Some(ctx.button("buttons__back")))
        .hold(params.hold)
        .build(ctx);
    let items = [
        (description.to_string(), false),
        (params.data.to_string(), true),
    ];
    let extra = params.extra_confirmation_if_not_read;
    let confirm_label = extra.then(|| ctx.tr("buttons__continue"));
    loop {
        let show_all = should_show_more(
            ctx,
            params.title,
            &items,
            None,
            params.br_name,
            params.br_code,
            confirm_label.as_deref(),
        )?;
        if !show_all {
            if extra {
                let without_review = ctx.tr("sign_message__confirm_without_review");
                let confirm = ctx.tr("buttons__confirm");
                let back = ctx.tr("buttons__back");
                let check = ConfirmValue::new(params.br_name, params.title, &without_review)
                    .verb(&confirm)
                    .verb_cancel(&back)
                    .hold(true)
                    .is_data(false)
                    .br_code(params.br_code);
                match confirm_value(ctx, &check) {
                    Err(UiError::ActionCancelled) => continue,
                    other => other?,
                }
            }
            return Ok(());
        }
        let result = interact(
            ctx,
            &mut confirm_more,
            Some(params.br_name),
            params.br_code,
            None,
        )?;
        if result == UiResult::Confirmed {
            return Ok(());
        }
    }
}

/// A single property: label and text or binary value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Text(String),
    Data(Vec<u8>),
}

impl PropertyValue {
    fn render(&self) -> (String, Font) {
        match self {
            PropertyValue::Text(text) => (text.clone(), Font::Normal),
            PropertyValue::Data(bytes) => (
                bytes.iter().map(|byte| format!("{byte:02x}")).collect(),
                Font::Mono,
            ),
        }
    }
}

/// Confirm a list of labelled properties, one or more pages each.
pub fn confirm_properties(
    ctx: &mut UiContext<'_>,
    br_name: &str,
    title: &str,
    props: &[(Option<String>, PropertyValue)],
    hold: bool,
    br_code: ButtonRequestType,
) -> Result<()> {
    let mut pages = Vec::new();
    for (label, value) in props {
        let (value, font) = value.render();
        let mut screen = Screen::new(title);
        if let Some(label) = label {
            screen = screen.bold(label.clone());
        }
        pages.extend(screen.value(value, font).content_pages(ctx));
    }
    let controls = Screen::new(title)
        .verb(if hold {
            ctx.button("buttons__hold_to_confirm")
        } else {
            ctx.button("buttons__confirm")
        })
        .verb_cancel(Some(ctx.button("buttons__cancel")))
        .hold(hold);
    if pages.is_empty() {
        pages = controls.content_pages(ctx);
    }
    let component = controls.assemble(ctx, pages);
    raise_if_not_confirmed(ctx, component, Some(br_name), br_code, UiError::ActionCancelled)
}

/// Parameters of [`confirm_output`].
#[derive(Debug, Clone)]
pub struct ConfirmOutput<'s> {
    pub address: &'s str,
    pub amount: &'s str,
    pub title: Option<&'s str>,
    pub hold: bool,
    pub address_label: Option<&'s str>,
    pub output_index: Option<usize>,
    pub chunkify: bool,
    pub br_code: ButtonRequestType,
}

impl<'s> ConfirmOutput<'s> {
    pub fn new(address: &'s str, amount: &'s str) -> Self {
        Self {
            address,
            amount,
            title: None,
            hold: false,
            address_label: None,
            output_index: None,
            chunkify: false,
            br_code: ButtonRequestType::ConfirmOutput,
        }
    }

    pub fn title(mut self, title: &'s str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn hold(mut self, hold: bool) -> Self {
        self.hold = hold;
        self
    }

    pub fn address_label(mut self, address_label: &'s str) -> Self {
        self.address_label = Some(address_label);
        self
    }

    pub fn output_index(mut self, output_index: usize) -> Self {
        self.output_index = Some(output_index);
        self
    }

    pub fn chunkify(mut self, chunkify: bool) -> Self {
        self.chunkify = chunkify;
        self
    }
}

/// Recipient, then amount. Backing out of the amount returns to the recipient.
pub fn confirm_output(ctx: &mut UiContext<'_>, params: &ConfirmOutput<'_>) -> Result<()> {
    let (recipient_title, amount_title) = match (params.title, params.output_index) {
        (Some(title), _) => {
            let title = match title.get(..8) {
                Some(prefix) if prefix.eq_ignore_ascii_case("confirm ") => &title[8..],
                _ => title,
            };
            (title.to_string(), title.to_string())
        }
        (None, Some(index)) => (
            format!("{} #{}", ctx.tr("words__recipient"), index + 1),
            format!("{} #{}", ctx.tr("words__amount"), index + 1),
        ),
        (None, None) => (ctx.tr("send__sending_to"), ctx.tr("send__confirm_sending")),
    };
    let address = if params.chunkify {
        chunkify(params.address, CHUNK_LEN, CHUNKS_PER_LINE)
    } else {
        params.address.to_string()
    };

    let mut recipient = Screen::new(recipient_title);
    if let Some(label) = params.address_label {
        recipient = recipient.bold(label);
    }
    let recipient = recipient
        .value(address, Font::Mono)
        .verb(ctx.button("buttons__continue"))
        .verb_cancel(Some(ctx.button("buttons__cancel")))
        .build(ctx);
    let mut amount = Screen::new(amount_title)
        .value(params.amount, Font::Normal)
        .verb_cancel(Some(ctx.button("buttons__back")))
        .hold(params.hold);
    if !params.hold {
        amount = amount.verb(ctx.button("buttons__confirm"));
    }
    let amount = amount.build(ctx);

    let mut screens: [Box<dyn Component>; 2] = [Box::new(recipient), Box::new(amount)];
    confirm_linear_flow(ctx, &mut screens, "confirm_output", params.br_code)
}

/// Parameters of [`confirm_total`].
#[derive(Debug, Clone)]
pub struct ConfirmTotal<'s> {
    pub total_amount: &'s str,
    pub fee_amount: &'s str,
    pub title: Option<&'s str>,
    pub total_label: Option<&'s str>,
    pub fee_label: Option<&'s str>,
    pub source_account: Option<&'s str>,
    pub fee_rate_amount: Option<&'s str>,
    pub br_name: &'s str,
    pub br_code: ButtonRequestType,
}

impl<'s> ConfirmTotal<'s> {
    pub fn new(total_amount: &'s str, fee_amount: &'s str) -> Self {
        Self {
            total_amount,
            fee_amount,
            title: None,
            total_label: None,
            fee_label: None,
            source_account: None,
            fee_rate_amount: None,
            br_name: "confirm_total",
            br_code: ButtonRequestType::SignTx,
        }
    }

    pub fn title(mut self, title: &'s str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn source_account(mut self, account: &'s str) -> Self {
        self.source_account = Some(account);
        self
    }

    pub fn fee_rate_amount(mut self, fee_rate: &'s str) -> Self {
        self.fee_rate_amount = Some(fee_rate);
        self
    }
}

fn summary_screen(
    ctx: &UiContext<'_>,
    title: &str,
    amount_label: &str,
    amount: &str,
    fee_label: &str,
    fee: &str,
    info: bool,
) -> Screen {
    Screen::new(title)
        .normal(amount_label)
        .bold(amount)
        .normal(fee_label)
        .bold(fee)
        .verb(ctx.button("buttons__confirm"))
        .verb_cancel(Some(ctx.button("buttons__cancel")))
        .verb_info(info.then(|| ctx.button("buttons__info")))
}

/// Total amount and fee, with account and fee rate behind the info control.
pub fn confirm_total(ctx: &mut UiContext<'_>, params: &ConfirmTotal<'_>) -> Result<()> {
    let title = params
        .title
        .map(str::to_string)
        .unwrap_or_else(|| ctx.tr("words__title_summary"));
    let total_label = params
        .total_label
        .map(str::to_string)
        .unwrap_or_else(|| ctx.tr("send__total_amount"));
    let fee_label = params
        .fee_label
        .map(str::to_string)
        .unwrap_or_else(|| ctx.tr("send__including_fee"));

    let mut items = Vec::new();
    if let Some(account) = params.source_account {
        items.push((ctx.tr("confirm_total__sending_from_account"), account.to_string()));
    }
    if let Some(rate) = params.fee_rate_amount {
        items.push((ctx.tr("confirm_total__fee_rate"), rate.to_string()));
    }
    let mut main = summary_screen(
        ctx,
        &title,
        &total_label,
        params.total_amount,
        &fee_label,
        params.fee_amount,
        !items.is_empty(),
    )
    .build(ctx);
    let info_title = ctx.tr("words__title_information");
    let mut info = info_screen(ctx, &info_title, &items);
    with_info(ctx, &mut main, &mut info, params.br_name, params.br_code)
}

pub fn confirm_joint_total(
    ctx: &mut UiContext<'_>,
    spending_amount: &str,
    total_amount: &str,
) -> Result<()> {
    let component = summary_screen(
        ctx,
        &ctx.tr("send__title_joint_transaction"),
        &ctx.tr("send__you_are_contributing"),
        spending_amount,
        &ctx.tr("send__to_the_total_amount"),
        total_amount,
        false,
    )
    .build(ctx);
    raise_if_not_confirmed(
        ctx,
        component,
        Some("confirm_joint_total"),
        ButtonRequestType::SignTx,
        UiError::ActionCancelled,
    )
}

/// Transaction metadata: `content` with `param` substituted, confirmed with "Continue".
pub fn confirm_metadata(
    ctx: &mut UiContext<'_>,
    br_name: &str,
    title: &str,
    content: &str,
    param: Option<&str>,
    hold: bool,
) -> Result<()> {
    let verb = ctx.tr("buttons__continue");
    let mut action = ConfirmAction::new(br_name, title)
        .action("")
        .description(content)
        .verb(&verb)
        .hold(hold)
        .br_code(ButtonRequestType::SignTx);
    action.description_param = param;
    confirm_action(ctx, &action)
}

pub fn confirm_replacement(ctx: &mut UiContext<'_>, title: &str, txid: &str) -> Result<()> {
    let description = ctx.tr("send__transaction_id");
    let verb = ctx.tr("buttons__continue");
    confirm_blob(
        ctx,
        &ConfirmBlob::new("confirm_replacement", title, txid)
            .description(&description)
            .verb(&verb)
            .br_code(ButtonRequestType::SignTx),
    )
}

/// Fee change of a replacement transaction. `change` tells whether the user's fee went up.
pub fn confirm_modify_fee(
    ctx: &mut UiContext<'_>,
    title: &str,
    change: Ordering,
    user_fee_change: &str,
    total_fee_new: &str,
    fee_rate_amount: Option<&str>,
) -> Result<()> {
    let mut screen = Screen::new(title);
    screen = match change {
        Ordering::Less => screen
            .normal(ctx.tr("modify_fee__decrease_fee"))
            .bold(user_fee_change),
        Ordering::Greater => screen
            .normal(ctx.tr("modify_fee__increase_fee"))
            .bold(user_fee_change),
        Ordering::Equal => screen.normal(ctx.tr("modify_fee__no_change")),
    };
    let items: Vec<(String, String)> = fee_rate_amount
        .map(|rate| vec![(ctx.tr("bitcoin__new_fee_rate"), rate.to_string())])
        .unwrap_or_default();
    let mut main = screen
        .normal(ctx.tr("modify_fee__transaction_fee"))
        .bold(total_fee_new)
        .verb(ctx.button("buttons__confirm"))
        .verb_cancel(Some(ctx.button("buttons__cancel")))
        .verb_info((!items.is_empty()).then(|| ctx.button("buttons__info")))
        .build(ctx);
    let info_title = ctx.tr("confirm_total__title_fee");
    let mut info = info_screen(ctx, &info_title, &items);
    with_info(ctx, &mut main, &mut info, "modify_fee", ButtonRequestType::SignTx)
}

/// Amount change of an output in a replacement transaction.
///
/// The address comes first. Cancelling the amount returns to the address; the button request is
/// only sent on the first pass.
pub fn confirm_modify_output(
    ctx: &mut UiContext<'_>,
    address: &str,
    change: Ordering,
    amount_change: &str,
    amount_new: &str,
) -> Result<()> {
    let br_name = "modify_output";
    let br_code = ButtonRequestType::ConfirmOutput;
    let title = ctx.tr("modify_amount__title");
    let mut send_request = true;
    loop {
        let address_screen = Screen::new(title.as_str())
            .normal(format!("{}:", ctx.tr("words__address")))
            .value(address, Font::Mono)
            .verb(ctx.button("buttons__continue"))
            .verb_cancel(Some(ctx.button("buttons__cancel")))
            .build(ctx);
        raise_if_not_confirmed(
            ctx,
            address_screen,
            send_request.then_some(br_name),
            br_code,
            UiError::ActionCancelled,
        )?;

        let mut amount_screen = Screen::new(title.as_str());
        amount_screen = match change {
            Ordering::Less => amount_screen
                .normal(ctx.tr("modify_amount__decrease_amount"))
                .bold(amount_change),
            Ordering::Greater => amount_screen
                .normal(ctx.tr("modify_amount__increase_amount"))
                .bold(amount_change),
            Ordering::Equal => amount_screen,
        };
        let amount_screen = amount_screen
            .normal(ctx.tr("modify_amount__new_amount"))
            .bold(amount_new)
            .verb(ctx.button("buttons__confirm"))
            .verb_cancel(Some(ctx.button("buttons__cancel")))
            .build(ctx);
        let result = interact(
            ctx,
            amount_screen,
            send_request.then_some(br_name),
            br_code,
            None,
        )?;
        send_request = false;
        match result {
            UiResult::Confirmed => return Ok(()),
            UiResult::Cancelled => debug!("back to the modified output address"),
            other => return Err(UiError::UnexpectedResult(other)),
        }
    }
}

/// Preview a new homescreen before it is stored. An empty image restores the default one.
pub fn confirm_homescreen(ctx: &mut UiContext<'_>, image: &[u8]) -> Result<()> {
    let theme = ctx.theme();
    let preview = Image::new(theme.body_area(), image)
        .with_fallback(theme, ctx.tr("homescreen__set_default"));
    let content = Container::new()
        .with_child(Text::new(theme, ctx.tr("homescreen__title_set")))
        .with_child(preview);
    let cancel = ctx.button("buttons__cancel");
    let verbs = DialogVerbs::new(Some(cancel.as_str()), &ctx.button("buttons__change"));
    let dialog = Dialog::new(theme, ctx.input(), content, &verbs);
    debug!(bytes = image.len(), "confirming homescreen");
    raise_if_not_confirmed(
        ctx,
        dialog,
        Some("set_homesreen"),
        ButtonRequestType::ProtectCall,
        UiError::ActionCancelled,
    )
}

pub fn confirm_coinjoin(
    ctx: &mut UiContext<'_>,
    max_rounds: u32,
    max_fee_per_vbyte: &str,
) -> Result<()> {
    let component = Screen::new(ctx.tr("coinjoin__title"))
        .normal(ctx.tr("coinjoin__max_rounds"))
        .bold(max_rounds.to_string())
        .normal(ctx.tr("coinjoin__max_mining_fee"))
        .bold(max_fee_per_vbyte)
        .verb_cancel(Some(ctx.button("buttons__cancel")))
        .hold(true)
        .build(ctx);
    raise_if_not_confirmed(
        ctx,
        component,
        Some("coinjoin_final"),
        ButtonRequestType::Other,
        UiError::ActionCancelled,
    )
}

pub fn confirm_sign_identity(
    ctx: &mut UiContext<'_>,
    proto: &str,
    identity: &str,
    challenge_visual: Option<&str>,
) -> Result<()> {
    let title = format!("{} {proto}", ctx.tr("words__sign"));
    let mut blob = ConfirmBlob::new("sign_identity", &title, identity);
    blob.description = challenge_visual;
    confirm_blob(ctx, &blob)
}

/// Parameters of [`confirm_signverify`].
#[derive(Debug, Clone)]
pub struct SignVerify<'s> {
    pub message: &'s str,
    pub address: &'s str,
    /// Verifying a signature instead of creating one.
    pub verify: bool,
    pub path: Option<&'s str>,
    pub account: Option<&'s str>,
    pub chunkify: bool,
}

impl<'s> SignVerify<'s> {
    pub fn new(message: &'s str, address: &'s str, verify: bool) -> Self {
        Self {
            message,
            address,
            verify,
            path: None,
            account: None,
            chunkify: false,
        }
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn account(mut self, account: &'s str) -> Self {
        self.account = Some(account);
        self
    }
}

/// Signing address (with details and a mismatch escape), then the message.
pub fn confirm_signverify(ctx: &mut UiContext<'_>, params: &SignVerify<'_>) -> Result<()> {
    let (address_title, br_name) = if params.verify {
        (ctx.tr("sign_message__verify_address"), "verify_message")
    } else {
        (ctx.tr("sign_message__confirm_address"), "sign_message")
    };
    let address = if params.chunkify {
        chunkify(params.address, CHUNK_LEN, CHUNKS_PER_LINE)
    } else {
        params.address.to_string()
    };
    let mut address_screen = Screen::new(address_title)
        .value(address, Font::Mono)
        .verb(ctx.button("buttons__continue"))
        .verb_cancel(Some(ctx.button("buttons__cancel")))
        .verb_info(Some(ctx.button("buttons__info")))
        .build(ctx);

    let mut items = Vec::new();
    if let Some(account) = params.account {
        items.push((ctx.tr("address_details__account"), account.to_string()));
    }
    if let Some(path) = params.path {
        items.push((ctx.tr("address_details__derivation_path"), path.to_string()));
    }
    let size = params.message.len().to_string();
    items.push((
        ctx.tr("sign_message__message_size"),
        ctx.tr_format("sign_message__bytes_template", &[size.as_str()]),
    ));
    let info_title = ctx.tr("words__title_information");
    let mut info = info_screen(ctx, &info_title, &items);

    loop {
        match with_info(ctx, &mut address_screen, &mut info, br_name, ButtonRequestType::Other) {
            Ok(()) => break,
            Err(UiError::ActionCancelled) => {
                let title = ctx.tr("addr_mismatch__mismatch");
                if show_mismatch(ctx, &title)? {
                    return Err(UiError::ActionCancelled);
                }
            }
            Err(err) => return Err(err),
        }
    }

    let message_title = ctx.tr("sign_message__confirm_message");
    let mut message = Screen::new(message_title.as_str())
        .value(params.message, Font::Mono)
        .verb(ctx.button("buttons__confirm"))
        .verb_cancel(Some(ctx.button("buttons__cancel")))
        .hold(!params.verify)
        .build(ctx);

    if message.page_count() > LONG_MSG_PAGE_THRESHOLD {
        let confirm = ctx.tr("buttons__confirm");
        return confirm_blob(
            ctx,
            &ConfirmBlob::new(br_name, &message_title, params.message)
                .verb(&confirm)
                .hold(!params.verify)
                .ask_pagination(true)
                .extra_confirmation_if_not_read(!params.verify),
        );
    }
    loop {
        let result = interact(
            ctx,
            &mut message,
            Some(br_name),
            ButtonRequestType::Other,
            Some(UiError::ActionCancelled),
        )?;
        if result == UiResult::Confirmed {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        confirm_blob, confirm_homescreen, confirm_modify_output, confirm_single, ConfirmBlob,
        ConfirmValue,
    };
    use crate::config::{Model, UiConfig};
    use crate::core::component::content_of;
    use crate::core::geometry::Point;
    use crate::error::UiError;
    use crate::layouts::{RecordingHost, Skin, UiContext};
    use crate::render::{DrawOp, RecordingDisplay};
    use crate::runtime::channel::ui_channel;
    use assert_matches::assert_matches;
    use std::cmp::Ordering;

    #[test]
    fn missing_placeholder_is_rejected_before_anything_is_shown() {
        let (_input, slot) = ui_channel();
        let mut display = RecordingDisplay::new(240, 240);
        let mut host = RecordingHost::new();
        let mut ctx = UiContext::new(&mut display, &mut host, slot, UiConfig::default());
        assert_matches!(
            confirm_single(&mut ctx, "x", "Title", "no placeholder", "param", None),
            Err(UiError::InvalidArgument(_))
        );
        drop(ctx);
        assert!(host.requests().is_empty());
    }

    #[test]
    fn value_description_gets_a_colon_once() {
        let (_input, slot) = ui_channel();
        let mut display = RecordingDisplay::new(240, 240);
        let mut host = RecordingHost::new();
        let ctx = UiContext::new(&mut display, &mut host, slot, UiConfig::default());
        let screen = ConfirmValue::new("x", "Title", "42")
            .description("Amount")
            .screen(&ctx, false)
            .build(&ctx);
        assert_eq!(content_of(&screen)[1], "Amount:");
        let screen = ConfirmValue::new("x", "Title", "42")
            .description("Amount:")
            .screen(&ctx, true)
            .build(&ctx);
        let content = content_of(&screen);
        assert_eq!(content[1], "Amount:");
        assert!(content.contains(&"Info".to_string()));
    }

    #[test]
    fn blob_description_gets_the_same_colon_as_a_value() {
        let (input, slot) = ui_channel();
        let mut display = RecordingDisplay::new(240, 240);
        let mut host = RecordingHost::new();
        let mut ctx = UiContext::new(&mut display, &mut host, slot, UiConfig::default())
            .with_skin(Skin::for_model(Model::Bolt))
            .record_screens();
        let area = ctx.theme().button_area();
        input.touch_click(Point::new(area.right() - 10, area.center().y));
        let params = ConfirmBlob::new("blob", "Data", "deadbeef").description("Memo: ref");
        confirm_blob(&mut ctx, &params).unwrap();
        let screens = ctx.screens();
        assert_eq!(screens[0][1], "Memo: ref:");
        assert_eq!(screens[0][2], "deadbeef");
    }

    #[test]
    fn cancelled_amount_returns_to_the_address_without_a_new_request() {
        let (input, slot) = ui_channel();
        let mut display = RecordingDisplay::new(240, 240);
        let mut host = RecordingHost::new();
        let mut ctx = UiContext::new(&mut display, &mut host, slot, UiConfig::default())
            .with_skin(Skin::for_model(Model::Bolt))
            .record_screens();
        let area = ctx.theme().button_area();
        let confirm = Point::new(area.right() - 10, area.center().y);
        let cancel = Point::new(area.x + 5, area.center().y);
        for point in [confirm, cancel, confirm, confirm] {
            input.touch_click(point);
        }
        confirm_modify_output(&mut ctx, "bc1qshort", Ordering::Less, "0.001 BTC", "0.009 BTC")
            .unwrap();
        let screens = ctx.screens();
        drop(ctx);
        assert_eq!(host.names(), vec!["modify_output", "modify_output"]);
        assert_eq!(screens.len(), 4);
        assert_eq!(screens[0], screens[2]);
        assert_eq!(
            &screens[1][..5],
            &["Modify amount", "Decrease amount by:", "0.001 BTC", "New amount:", "0.009 BTC"]
        );
    }

    #[test]
    fn homescreen_preview_draws_the_image() {
        let (input, slot) = ui_channel();
        let mut display = RecordingDisplay::new(240, 240);
        let mut host = RecordingHost::new();
        let mut ctx = UiContext::new(&mut display, &mut host, slot, UiConfig::default())
            .with_skin(Skin::for_model(Model::Bolt));
        let area = ctx.theme().button_area();
        input.touch_click(Point::new(area.right() - 10, area.center().y));
        confirm_homescreen(&mut ctx, &[0xff, 0xd8, 0xff, 0xe0]).unwrap();
        drop(ctx);
        assert_eq!(host.names(), vec!["set_homesreen"]);
        assert!(display
            .ops()
            .iter()
            .any(|op| matches!(op, DrawOp::Image { len: 4, .. })));
    }

    #[test]
    fn empty_homescreen_offers_the_default() {
        let (input, slot) = ui_channel();
        let mut display = RecordingDisplay::new(240, 240);
        let mut host = RecordingHost::new();
        let mut ctx = UiContext::new(&mut display, &mut host, slot, UiConfig::default())
            .with_skin(Skin::for_model(Model::Bolt))
            .record_screens();
        let area = ctx.theme().button_area();
        input.touch_click(Point::new(area.x + 5, area.center().y));
        let result = confirm_homescreen(&mut ctx, &[]);
        assert_matches!(result, Err(UiError::ActionCancelled));
        let screens = ctx.screens();
        assert_eq!(
            screens[0],
            vec!["Change homescreen", "Change homescreen to default?", "Cancel", "Change"]
        );
    }
}
