//! Wallet creation, backup prompts and the backup check entry point.

use tracing::info;

use crate::core::component::UiResult;
use crate::core::display::Icon;
use crate::error::Result;
use crate::layouts::confirm::{confirm_action, ConfirmAction};
use crate::layouts::host::ButtonRequestType;
use crate::layouts::screens::Screen;
use crate::layouts::status::show_success;
use crate::layouts::{interact, UiContext};

/// First screen of wallet creation or recovery.
pub fn confirm_reset_device(ctx: &mut UiContext<'_>, recovery: bool) -> Result<()> {
    let (br_name, br_code, title) = if recovery {
        (
            "recover_device",
            ButtonRequestType::ProtectCall,
            ctx.tr("recovery__title"),
        )
    } else {
        (
            "setup_device",
            ButtonRequestType::ResetDevice,
            ctx.tr("reset__title_create_wallet"),
        )
    };
    let description = ctx.tr("reset__by_continuing");
    let params = ConfirmAction::new(br_name, &title)
        .description(&description)
        .br_code(br_code);
    confirm_action(ctx, &params)
}

/// Offer to back up the new wallet now. Returns `true` when the user chose to.
pub fn prompt_backup(ctx: &mut UiContext<'_>) -> Result<bool> {
    let br_name = "backup_device";
    let br_code = ButtonRequestType::ResetDevice;

    let first = Screen::new(ctx.tr("words__title_success"))
        .icon(Icon::Success, ctx.theme().success)
        .bold(ctx.tr("backup__new_wallet_successfully_created"))
        .normal(ctx.tr("backup__it_should_be_backed_up"))
        .verb(ctx.button("buttons__back_up"))
        .verb_cancel(Some(ctx.button("buttons__skip")))
        .build(ctx);
    if interact(ctx, first, Some(br_name), br_code, None)? == UiResult::Confirmed {
        info!("backup accepted");
        return Ok(true);
    }
    if !ctx.skin().features.backup_skip_confirmation {
        info!("backup skipped");
        return Ok(false);
    }

    let second = Screen::new(ctx.tr("backup__title_skip"))
        .icon(Icon::Warning, ctx.theme().warning)
        .normal(ctx.tr("backup__want_to_skip"))
        .normal(ctx.tr("backup__can_back_up_anytime"))
        .verb(ctx.button("buttons__back_up"))
        .verb_cancel(Some(ctx.button("buttons__skip")))
        .build(ctx);
    let accepted = interact(ctx, second, Some(br_name), br_code, None)? == UiResult::Confirmed;
    info!(accepted, "backup skip confirmed");
    Ok(accepted)
}

/// Success screen after creating a wallet, on models that have one.
pub fn show_wallet_created_success(ctx: &mut UiContext<'_>) -> Result<()> {
    if !ctx.skin().features.wallet_created_screen {
        return Ok(());
    }
    let content = ctx.tr("backup__new_wallet_created");
    show_success(ctx, "backup_device", &content, None, None)
}

pub fn prompt_recovery_check(ctx: &mut UiContext<'_>) -> Result<()> {
    let title = ctx.tr("recovery__title_dry_run");
    let description = ctx.tr("recovery__check_dry_run");
    let verb = ctx.tr("buttons__check");
    let params = ConfirmAction::new("confirm_seedcheck", &title)
        .description(&description)
        .verb(&verb)
        .br_code(ButtonRequestType::ProtectCall);
    confirm_action(ctx, &params)
}

#[cfg(test)]
mod tests {
    use super::{prompt_backup, show_wallet_created_success};
    use crate::config::{Model, UiConfig};
    use crate::core::geometry::Point;
    use crate::layouts::{RecordingHost, Skin, UiContext};
    use crate::render::RecordingDisplay;
    use crate::runtime::channel::ui_channel;
    use pretty_assertions::assert_eq;

    #[test]
    fn skipping_twice_declines_the_backup() {
        let (input, slot) = ui_channel();
        let mut display = RecordingDisplay::new(240, 240);
        let mut host = RecordingHost::new();
        let mut ctx = UiContext::new(&mut display, &mut host, slot, UiConfig::default())
            .with_skin(Skin::for_model(Model::Bolt));
        let area = ctx.theme().button_area();
        let skip = Point::new(area.x + 5, area.center().y);
        input.touch_click(skip);
        input.touch_click(skip);
        assert!(!prompt_backup(&mut ctx).unwrap());
        drop(ctx);
        assert_eq!(host.names(), vec!["backup_device", "backup_device"]);
    }

    #[test]
    fn backup_is_accepted_from_the_first_screen() {
        let (input, slot) = ui_channel();
        let mut display = RecordingDisplay::new(240, 240);
        let mut host = RecordingHost::new();
        let mut ctx = UiContext::new(&mut display, &mut host, slot, UiConfig::default())
            .with_skin(Skin::for_model(Model::Delizia));
        let area = ctx.theme().button_area();
        input.touch_click(Point::new(area.right() - 10, area.center().y));
        assert!(prompt_backup(&mut ctx).unwrap());
    }

    #[test]
    fn wallet_created_screen_depends_on_the_model() {
        let (_input, slot) = ui_channel();
        let mut display = RecordingDisplay::new(240, 240);
        let mut host = RecordingHost::new();
        let mut ctx = UiContext::new(&mut display, &mut host, slot, UiConfig::default())
            .with_skin(Skin::for_model(Model::Bolt));
        show_wallet_created_success(&mut ctx).unwrap();
        drop(ctx);
        assert!(host.requests().is_empty());
    }
}
