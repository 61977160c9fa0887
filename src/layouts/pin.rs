//! PIN, wipe code and passphrase entry.
//!
//! Entered secrets never reach the logs; only transitions are traced.

use tracing::{debug, warn};

use crate::core::component::{Component, UiResult};
use crate::core::event::InputKind;
use crate::error::{Result, UiError};
use crate::layouts::confirm::{confirm_action, ConfirmAction};
use crate::layouts::host::ButtonRequestType;
use crate::layouts::screens::Screen;
use crate::layouts::status::error_popup;
use crate::layouts::{draw_simple, interact, raise_if_not_confirmed, UiContext};
use crate::widgets::passphrase::{PassphraseKeyboard, PassphraseSelector};
use crate::widgets::pin::{PinKeyboard, PinSelector};
use crate::widgets::text::Text;

/// Attempts a fresh device starts with.
pub const FULL_ATTEMPTS: u32 = 16;

/// Tell the user to type the passphrase on the host. Drawn once without waiting for input.
pub fn request_passphrase_on_host(ctx: &mut UiContext<'_>) {
    let mut screen = Text::new(ctx.theme(), "").normal(ctx.tr("passphrase__please_enter"));
    debug!("passphrase requested on host");
    draw_simple(ctx, &mut screen);
}

/// Ask for the passphrase on the device itself.
///
/// Cancelling fails with `ActionCancelled`. Input longer than `max_len` characters is cut.
pub fn request_passphrase_on_device(ctx: &mut UiContext<'_>, max_len: usize) -> Result<String> {
    let component: Box<dyn Component> = match ctx.input() {
        InputKind::Touch => Box::new(PassphraseKeyboard::new(ctx.theme())),
        InputKind::Buttons => Box::new(PassphraseSelector::new(ctx.theme())),
    };
    let result = interact(
        ctx,
        component,
        Some("passphrase_device"),
        ButtonRequestType::PassphraseEntry,
        Some(UiError::ActionCancelled),
    )?;
    match result {
        UiResult::Text(passphrase) => {
            let length = passphrase.chars().count();
            if length > max_len {
                warn!(length, max_len, "passphrase too long, truncating");
                return Ok(passphrase.chars().take(max_len).collect());
            }
            debug!(length, "passphrase entered");
            Ok(passphrase)
        }
        other => Err(UiError::UnexpectedResult(other)),
    }
}

/// Line under the PIN prompt telling how many attempts are left.
fn attempts_subprompt(ctx: &UiContext<'_>, attempts_remaining: Option<u32>) -> String {
    match attempts_remaining {
        None => String::new(),
        Some(FULL_ATTEMPTS) if ctx.skin().features.blank_full_attempts => String::new(),
        Some(1) => ctx.tr("pin__last_attempt"),
        Some(attempts) => format!("{attempts} {}", ctx.tr("pin__tries_left")),
    }
}

/// Ask for the PIN. Cancelling fails with `PinCancelled`.
///
/// `wrong_pin` flashes "Incorrect PIN" over the prompt after a failed attempt.
pub fn request_pin_on_device(
    ctx: &mut UiContext<'_>,
    prompt: &str,
    attempts_remaining: Option<u32>,
    allow_cancel: bool,
    wrong_pin: bool,
) -> Result<String> {
    let subprompt = attempts_subprompt(ctx, attempts_remaining);
    let warning = wrong_pin.then(|| ctx.tr("pin__incorrect"));
    let theme = ctx.theme().clone();
    let component: Box<dyn Component> = match ctx.input() {
        InputKind::Touch => {
            let mut keyboard = PinKeyboard::new(&theme, prompt, &subprompt, allow_cancel, ctx.rng());
            if let Some(warning) = warning {
                keyboard = keyboard.with_warning(warning);
            }
            Box::new(keyboard)
        }
        InputKind::Buttons => {
            let mut selector = PinSelector::new(&theme, prompt, &subprompt, allow_cancel, ctx.rng());
            if let Some(warning) = warning {
                selector = selector.with_warning(warning);
            }
            Box::new(selector)
        }
    };
    debug!(?attempts_remaining, wrong_pin, "requesting pin");
    let result = interact(
        ctx,
        component,
        Some("pin_device"),
        ButtonRequestType::PinEntry,
        Some(UiError::PinCancelled),
    )?;
    match result {
        UiResult::Text(pin) => Ok(pin),
        other => Err(UiError::UnexpectedResult(other)),
    }
}

/// Prompt before the new PIN (or wipe code) is typed a second time. Only some models show it.
pub fn confirm_reenter_pin(ctx: &mut UiContext<'_>, is_wipe_code: bool) -> Result<()> {
    if !ctx.skin().features.reenter_pin_prompt {
        return Ok(());
    }
    let (br_name, title, description) = if is_wipe_code {
        (
            "reenter_wipe_code",
            ctx.tr("wipe_code__title_check"),
            ctx.tr("wipe_code__reenter_to_confirm"),
        )
    } else {
        (
            "reenter_pin",
            ctx.tr("pin__title_check_pin"),
            ctx.tr("pin__reenter_to_confirm"),
        )
    };
    let verb = ctx.tr("buttons__continue");
    let params = ConfirmAction::new(br_name, &title)
        .description(&description)
        .verb(&verb)
        .no_cancel()
        .br_code(ButtonRequestType::Other);
    confirm_action(ctx, &params)
}

/// The two entries of a new PIN (or wipe code) differ.
pub fn pin_mismatch_popup(ctx: &mut UiContext<'_>, is_wipe_code: bool) -> Result<()> {
    let br_name = if is_wipe_code {
        "wipe_code_mismatch"
    } else {
        "pin_mismatch"
    };
    let (title, description) = match (is_wipe_code, ctx.skin().features.short_mismatch_texts) {
        (false, true) => (ctx.tr("words__mismatch"), ctx.tr("pin__reenter_new")),
        (true, true) => (ctx.tr("words__mismatch"), ctx.tr("wipe_code__reenter_new")),
        (false, false) => (ctx.tr("pin__title_mismatch"), ctx.tr("pin__mismatch")),
        (true, false) => (
            ctx.tr("wipe_code__title_mismatch"),
            ctx.tr("wipe_code__mismatch"),
        ),
    };
    let button = ctx.tr("buttons__try_again");
    let popup = error_popup(ctx, &title, &description, None, None, Some(&button), None)?;
    debug!(is_wipe_code, "entries differ");
    interact(ctx, popup, Some(br_name), ButtonRequestType::Other, None)?;
    Ok(())
}

pub fn wipe_code_same_as_pin_popup(ctx: &mut UiContext<'_>) -> Result<()> {
    let title = ctx.tr("wipe_code__invalid");
    let description = ctx.tr("wipe_code__diff_from_pin");
    let button = ctx.tr("buttons__try_again");
    let popup = error_popup(ctx, &title, &description, None, None, Some(&button), None)?;
    interact(
        ctx,
        popup,
        Some("wipe_code_same_as_pin"),
        ButtonRequestType::Other,
        None,
    )?;
    Ok(())
}

/// Offer to turn on PIN (or wipe code) protection.
pub fn confirm_set_new_pin(
    ctx: &mut UiContext<'_>,
    br_name: &str,
    title: &str,
    description: &str,
    information: &str,
    br_code: ButtonRequestType,
) -> Result<()> {
    let screen = Screen::new(title)
        .bold(description)
        .normal(information)
        .verb(ctx.button("buttons__turn_on"))
        .verb_cancel(Some(ctx.button("buttons__cancel")))
        .build(ctx);
    raise_if_not_confirmed(ctx, screen, Some(br_name), br_code, UiError::ActionCancelled)
}

#[cfg(test)]
mod tests {
    use super::{
        attempts_subprompt, confirm_reenter_pin, request_passphrase_on_host, request_pin_on_device,
    };
    use crate::config::{Model, UiConfig};
    use crate::error::UiError;
    use crate::layouts::{RecordingHost, Skin, UiContext};
    use crate::render::RecordingDisplay;
    use crate::runtime::channel::ui_channel;
    use crate::widgets::pin::PinKeyboard;
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn subprompt_counts_attempts() {
        let (_input, slot) = ui_channel();
        let mut display = RecordingDisplay::new(240, 240);
        let mut host = RecordingHost::new();
        let ctx = UiContext::new(&mut display, &mut host, slot, UiConfig::default())
            .with_skin(Skin::for_model(Model::Bolt));
        assert_eq!(attempts_subprompt(&ctx, None), "");
        assert_eq!(attempts_subprompt(&ctx, Some(1)), "Last attempt");
        assert_eq!(attempts_subprompt(&ctx, Some(16)), "16 tries left");
        assert_eq!(attempts_subprompt(&ctx, Some(5)), "5 tries left");
    }

    #[test]
    fn caesar_hides_full_attempt_count() {
        let (_input, slot) = ui_channel();
        let mut display = RecordingDisplay::new(128, 64);
        let mut host = RecordingHost::new();
        let ctx = UiContext::new(&mut display, &mut host, slot, UiConfig::default())
            .with_skin(Skin::for_model(Model::Caesar));
        assert_eq!(attempts_subprompt(&ctx, Some(16)), "");
        assert_eq!(attempts_subprompt(&ctx, Some(15)), "15 tries left");
    }

    #[test]
    fn reenter_prompt_is_skipped_on_touch_models() {
        let (_input, slot) = ui_channel();
        let mut display = RecordingDisplay::new(240, 240);
        let mut host = RecordingHost::new();
        let mut ctx = UiContext::new(&mut display, &mut host, slot, UiConfig::default())
            .with_skin(Skin::for_model(Model::Delizia));
        confirm_reenter_pin(&mut ctx, false).unwrap();
        drop(ctx);
        assert!(host.requests().is_empty());
    }

    #[test]
    fn cancelled_pin_entry_raises_pin_cancelled() {
        let (input, slot) = ui_channel();
        let mut display = RecordingDisplay::new(240, 240);
        let mut host = RecordingHost::new();
        let mut ctx = UiContext::new(&mut display, &mut host, slot, UiConfig::default())
            .with_skin(Skin::for_model(Model::Bolt))
            .with_rng_seed(7);
        let keypad = PinKeyboard::new(ctx.theme(), "", "", true, &mut StdRng::seed_from_u64(1));
        input.touch_click(keypad.erase_area().center());
        let result = request_pin_on_device(&mut ctx, "Enter PIN", Some(3), true, true);
        drop(ctx);
        assert_matches!(result, Err(UiError::PinCancelled));
        assert_eq!(host.names(), vec!["pin_device"]);
    }

    #[test]
    fn host_passphrase_prompt_is_drawn_without_a_request() {
        let (_input, slot) = ui_channel();
        let mut display = RecordingDisplay::new(240, 240);
        let mut host = RecordingHost::new();
        let mut ctx = UiContext::new(&mut display, &mut host, slot, UiConfig::default())
            .with_skin(Skin::for_model(Model::Delizia));
        request_passphrase_on_host(&mut ctx);
        drop(ctx);
        assert!(host.requests().is_empty());
        assert_eq!(display.screen_text(), "Please type your passphrase.");
    }
}
