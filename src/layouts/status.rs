//! Warning, error and success screens.

use std::time::Duration;

use crate::core::component::Component;
use crate::core::display::{Font, Icon};
use crate::error::{Result, UiError};
use crate::layouts::confirm::{confirm_value, ConfirmValue};
use crate::layouts::host::ButtonRequestType;
use crate::layouts::screens::{format_param, Screen};
use crate::layouts::{draw_simple, interact, raise_if_not_confirmed, UiContext};
use crate::widgets::text::Text;
use crate::widgets::timeout::Timeout;

/// Show an error and fail with `exc` however the user dismisses it.
pub fn show_error_and_raise(
    ctx: &mut UiContext<'_>,
    br_name: &str,
    content: &str,
    subheader: Option<&str>,
    button: Option<&str>,
    exc: UiError,
) -> Result<()> {
    let verb = button
        .map(|label| ctx.skin().button_label(label))
        .unwrap_or_else(|| ctx.button("buttons__try_again"));
    let screen = Screen::new(subheader.unwrap_or_default())
        .icon(Icon::Error, ctx.theme().error)
        .normal(content)
        .verb(verb)
        .build(ctx);
    interact(ctx, screen, Some(br_name), ButtonRequestType::Other, None)?;
    Err(exc)
}

/// Warning the user has to acknowledge. Anything but a confirmation fails with
/// `ActionCancelled`.
pub fn show_warning(
    ctx: &mut UiContext<'_>,
    br_name: &str,
    content: &str,
    subheader: Option<&str>,
    button: Option<&str>,
    br_code: ButtonRequestType,
) -> Result<()> {
    let verb = button
        .map(|label| ctx.skin().button_label(label))
        .unwrap_or_else(|| ctx.button("buttons__continue"));
    let screen = Screen::new(content)
        .icon(Icon::Warning, ctx.theme().warning)
        .normal(subheader.unwrap_or_default())
        .verb(verb)
        .build(ctx);
    raise_if_not_confirmed(ctx, screen, Some(br_name), br_code, UiError::ActionCancelled)
}

/// Warning that asks whether to go on despite a risk.
///
/// Models with a danger screen show `value` in it and offer `verb_cancel` (default "Cancel and
/// exit"); the others fall back to [`show_warning`] with a "Continue anyway?" subheader.
pub fn show_danger(
    ctx: &mut UiContext<'_>,
    br_name: &str,
    content: &str,
    value: Option<&str>,
    verb_cancel: Option<&str>,
    br_code: ButtonRequestType,
) -> Result<()> {
    let question = ctx.tr("words__continue_anyway_question");
    if !ctx.skin().features.danger_screen {
        let subheader = match value {
            Some(value) => format!("{value}\n{question}"),
            None => question,
        };
        return show_warning(ctx, br_name, content, Some(&subheader), None, br_code);
    }
    let cancel = verb_cancel
        .map(|label| ctx.skin().button_label(label))
        .unwrap_or_else(|| ctx.button("buttons__cancel_and_exit"));
    let screen = Screen::new(ctx.tr("words__important"))
        .icon(Icon::Warning, ctx.theme().error)
        .bold(content)
        .value(value.unwrap_or_default(), Font::Mono)
        .normal(question)
        .verb(ctx.button("buttons__continue"))
        .verb_cancel(Some(cancel))
        .danger(true)
        .build(ctx);
    raise_if_not_confirmed(ctx, screen, Some(br_name), br_code, UiError::ActionCancelled)
}

/// Success screen with a single button.
pub fn show_success(
    ctx: &mut UiContext<'_>,
    br_name: &str,
    content: &str,
    subheader: Option<&str>,
    button: Option<&str>,
) -> Result<()> {
    let verb = button
        .map(|label| ctx.skin().button_label(label))
        .unwrap_or_else(|| ctx.button("buttons__continue"));
    let screen = Screen::new(ctx.tr("words__title_success"))
        .icon(Icon::Success, ctx.theme().success)
        .bold(content)
        .normal(subheader.unwrap_or_default())
        .verb(verb)
        .build(ctx);
    raise_if_not_confirmed(
        ctx,
        screen,
        Some(br_name),
        ButtonRequestType::Success,
        UiError::ActionCancelled,
    )
}

/// Error popup for the caller to run.
///
/// `description` has its `{}` filled by `description_param`. The popup needs a button or a
/// `timeout` to go away; with a timeout it confirms itself once the time is up.
pub fn error_popup(
    ctx: &UiContext<'_>,
    title: &str,
    description: &str,
    subtitle: Option<&str>,
    description_param: Option<&str>,
    button: Option<&str>,
    timeout: Option<Duration>,
) -> Result<Box<dyn Component>> {
    let timeout = timeout.filter(|timeout| !timeout.is_zero());
    if button.is_none() && timeout.is_none() {
        return Err(UiError::InvalidArgument(
            "error popup needs a button or a timeout".to_string(),
        ));
    }
    let title = match subtitle {
        Some(subtitle) => format!("{title}\n{subtitle}"),
        None => title.to_string(),
    };
    let mut screen = Screen::new(title)
        .icon(Icon::Error, ctx.theme().error)
        .normal(format_param(description, description_param));
    if let Some(button) = button {
        screen = screen.verb(ctx.skin().button_label(button));
    }
    let popup = screen.build(ctx);
    let popup: Box<dyn Component> = match timeout {
        Some(timeout) => Box::new(Timeout::new(popup, timeout)),
        None => Box::new(popup),
    };
    Ok(popup)
}

/// Paint a short message while the device works.
pub fn show_wait_text(ctx: &mut UiContext<'_>, message: &str) {
    let mut text = Text::new(ctx.theme(), "").normal(message);
    draw_simple(ctx, &mut text);
}

/// Warn about a derivation path outside the expected ones.
///
/// `path_type` names the kind of path ("Account", "Change"...) when known.
pub fn confirm_path_warning(
    ctx: &mut UiContext<'_>,
    path: &str,
    path_type: Option<&str>,
) -> Result<()> {
    let title = match path_type {
        Some(path_type) => format!("{} {}.", ctx.tr("words__unknown"), path_type.to_lowercase()),
        None => ctx.tr("words__wrong_derivation_path"),
    };
    let br_code = ButtonRequestType::UnknownDerivationPath;
    if ctx.skin().features.danger_screen {
        return show_danger(ctx, "path_warning", &title, Some(path), None, br_code);
    }
    let screen = Screen::new(ctx.tr("words__warning"))
        .icon(Icon::Warning, ctx.theme().warning)
        .bold(title)
        .value(path, Font::Mono)
        .normal(ctx.tr("words__continue_anyway_question"))
        .verb(ctx.button("buttons__continue"))
        .verb_cancel(Some(ctx.button("buttons__cancel")))
        .build(ctx);
    raise_if_not_confirmed(
        ctx,
        screen,
        Some("path_warning"),
        br_code,
        UiError::ActionCancelled,
    )
}

pub fn confirm_multisig_warning(ctx: &mut UiContext<'_>) -> Result<()> {
    let content = ctx.tr("send__receiving_to_multisig");
    let subheader = ctx.tr("words__continue_anyway_question");
    show_warning(
        ctx,
        "warning_multisig",
        &content,
        Some(&subheader),
        None,
        ButtonRequestType::Warning,
    )
}

pub fn confirm_multisig_different_paths_warning(ctx: &mut UiContext<'_>) -> Result<()> {
    let content = ctx.tr("send__using_different_paths");
    let subheader = ctx.tr("words__continue_anyway_question");
    show_warning(
        ctx,
        "warning_multisig_different_paths",
        &content,
        Some(&subheader),
        None,
        ButtonRequestType::Warning,
    )
}

/// Ask before installing new firmware; the info control reveals its fingerprint.
pub fn confirm_firmware_update(
    ctx: &mut UiContext<'_>,
    description: &str,
    fingerprint: &str,
) -> Result<()> {
    let title = ctx.tr("firmware_update__title");
    let verb = ctx.tr("buttons__install");
    let fingerprint_title = ctx.tr("firmware_update__title_fingerprint");
    let params = ConfirmValue::new("firmware_update", &title, "")
        .description(description)
        .verb(&verb)
        .info(
            Some(&fingerprint_title),
            vec![(String::new(), fingerprint.to_string())],
        )
        .chunkify_info(true)
        .br_code(ButtonRequestType::Other);
    confirm_value(ctx, &params)
}

#[cfg(test)]
mod tests {
    use super::{error_popup, show_danger, show_error_and_raise};
    use crate::config::{Model, UiConfig};
    use crate::core::component::Component;
    use crate::core::geometry::Point;
    use crate::error::UiError;
    use crate::layouts::{ButtonRequestType, RecordingHost, Skin, UiContext};
    use crate::render::RecordingDisplay;
    use crate::runtime::channel::ui_channel;
    use assert_matches::assert_matches;
    use std::time::Duration;

    #[test]
    fn popup_without_a_way_out_is_rejected() {
        let (_input, slot) = ui_channel();
        let mut display = RecordingDisplay::new(240, 240);
        let mut host = RecordingHost::new();
        let ctx = UiContext::new(&mut display, &mut host, slot, UiConfig::default());
        let result = error_popup(&ctx, "Error", "Bad", None, None, None, None);
        assert_matches!(result.err(), Some(UiError::InvalidArgument(_)));
        let zero = error_popup(&ctx, "Error", "Bad", None, None, None, Some(Duration::ZERO));
        assert_matches!(zero.err(), Some(UiError::InvalidArgument(_)));
    }

    #[test]
    fn popup_fills_the_description() {
        let (_input, slot) = ui_channel();
        let mut display = RecordingDisplay::new(240, 240);
        let mut host = RecordingHost::new();
        let ctx = UiContext::new(&mut display, &mut host, slot, UiConfig::default());
        let popup = error_popup(
            &ctx,
            "Wrong PIN",
            "{} attempts left",
            Some("Try again"),
            Some("3"),
            None,
            Some(Duration::from_millis(10)),
        )
        .unwrap();
        let mut content = Vec::new();
        popup.read_content(&mut content);
        assert_eq!(content[0], "Wrong PIN\nTry again");
        assert_eq!(content[1], "3 attempts left");
    }

    #[test]
    fn error_always_raises() {
        let (input, slot) = ui_channel();
        let mut display = RecordingDisplay::new(240, 240);
        let mut host = RecordingHost::new();
        let mut ctx = UiContext::new(&mut display, &mut host, slot, UiConfig::default());
        let theme = ctx.theme().clone();
        let area = theme.button_area();
        input.touch_click(Point::new(area.right() - 10, area.center().y));
        let result = show_error_and_raise(
            &mut ctx,
            "error",
            "Something failed",
            None,
            None,
            UiError::ActionCancelled,
        );
        assert_matches!(result, Err(UiError::ActionCancelled));
        drop(ctx);
        assert_eq!(host.names(), vec!["error"]);
    }

    #[test]
    fn danger_shows_the_value_before_the_question() {
        let (input, slot) = ui_channel();
        drop(input);
        let mut display = RecordingDisplay::new(240, 240);
        let mut host = RecordingHost::new();
        let mut ctx = UiContext::new(&mut display, &mut host, slot, UiConfig::default())
            .with_skin(Skin::for_model(Model::Delizia))
            .record_screens();
        let result = show_danger(
            &mut ctx,
            "path_warning",
            "Risky path",
            Some("m/44'/0'/7'"),
            None,
            ButtonRequestType::Warning,
        );
        assert_matches!(result, Err(UiError::InputClosed));
        let screens = ctx.screens();
        assert_eq!(
            &screens[0][..4],
            &["Important", "Risky path", "m/44'/0'/7'", "Continue anyway?"]
        );
    }
}
