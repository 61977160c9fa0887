//! Screen builders: user-facing flows assembled from widgets.
//!
//! Every flow takes a [`UiContext`], builds a component tree for the active [`Skin`], tells the
//! host through a [`ButtonRequest`] and runs the tree as a [`Layout`] until the user answers.

pub mod address;
pub mod backup;
pub mod confirm;
pub mod host;
pub mod pin;
pub mod recovery;
pub mod screens;
pub mod skin;
pub mod status;
pub mod translations;

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::UiConfig;
use crate::core::component::{Component, UiResult};
use crate::core::display::Display;
use crate::core::event::InputKind;
use crate::error::{Result, UiError};
use crate::runtime::channel::LayoutSlot;
use crate::runtime::layout::{self, IdleTimer, Layout, LayoutOptions};
use crate::widgets::theme::Theme;

pub use address::{show_address, show_pubkey, AddressDetails};
pub use backup::{
    confirm_reset_device, prompt_backup, prompt_recovery_check, show_wallet_created_success,
};
pub use confirm::{
    confirm_action, confirm_address, confirm_amount, confirm_blob, confirm_change_passphrase,
    confirm_change_passphrase_source, confirm_coinjoin, confirm_hide_passphrase_from_host,
    confirm_homescreen, confirm_joint_total, confirm_metadata, confirm_modify_fee,
    confirm_modify_output, confirm_output, confirm_properties, confirm_replacement, confirm_sign_identity, confirm_signverify, confirm_single, confirm_text,
    confirm_total, confirm_value, should_show_more, ConfirmAction, ConfirmBlob, ConfirmOutput,
    ConfirmTotal, ConfirmValue, SignVerify,
};
pub use host::{ButtonRequest, ButtonRequestType, HostChannel, RecordingHost};
pub use pin::{
    confirm_reenter_pin, confirm_set_new_pin, pin_mismatch_popup, request_passphrase_on_device,
    request_passphrase_on_host, request_pin_on_device, wipe_code_same_as_pin_popup,
};
pub use recovery::{
    continue_recovery, request_word, request_word_count, show_group_share_success,
    show_recovery_warning, RecoveryWizard,
};
pub use skin::{Skin, SkinFeatures};
pub use status::{
    confirm_firmware_update, confirm_multisig_different_paths_warning, confirm_multisig_warning,
    confirm_path_warning, error_popup, show_danger, show_error_and_raise, show_success,
    show_wait_text, show_warning,
};
pub use translations::Translations;

/// Screens shown so far, as read by [`crate::core::component::content_of`].
pub type ScreenLog = Arc<Mutex<Vec<Vec<String>>>>;

/// Everything a flow needs to put screens in front of the user.
pub struct UiContext<'a> {
    display: &'a mut dyn Display,
    host: &'a mut dyn HostChannel,
    slot: LayoutSlot,
    skin: Skin,
    translations: Arc<Translations>,
    config: UiConfig,
    rng: StdRng,
    idle_timer: Option<IdleTimer>,
    screens: Option<ScreenLog>,
}

impl<'a> UiContext<'a> {
    pub fn new(
        display: &'a mut dyn Display,
        host: &'a mut dyn HostChannel,
        slot: LayoutSlot,
        config: UiConfig,
    ) -> Self {
        let screens = config.debug.then(ScreenLog::default);
        Self {
            display,
            host,
            slot,
            skin: Skin::from_config(&config),
            translations: Arc::new(Translations::from_config(&config)),
            config,
            rng: StdRng::from_entropy(),
            idle_timer: None,
            screens,
        }
    }

    pub fn with_skin(mut self, skin: Skin) -> Self {
        self.skin = skin;
        self
    }

    pub fn with_translations(mut self, translations: Translations) -> Self {
        self.translations = Arc::new(translations);
        self
    }

    /// Make keypad shuffling reproducible.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_idle_timer(mut self, idle_timer: IdleTimer) -> Self {
        self.idle_timer = Some(idle_timer);
        self
    }

    /// Keep the content of every screen shown from now on.
    pub fn record_screens(mut self) -> Self {
        if self.screens.is_none() {
            self.screens = Some(ScreenLog::default());
        }
        self
    }

    pub fn skin(&self) -> &Skin {
        &self.skin
    }

    pub fn theme(&self) -> &Theme {
        &self.skin.theme
    }

    pub fn input(&self) -> InputKind {
        self.skin.input
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    pub fn tr(&self, key: &str) -> String {
        self.translations.get(key).to_string()
    }

    pub fn tr_format(&self, key: &str, args: &[&str]) -> String {
        self.translations.format(key, args)
    }

    /// Translated button label, styled for the skin.
    pub fn button(&self, key: &str) -> String {
        self.skin.button_label(self.translations.get(key))
    }

    pub fn display(&self) -> &dyn Display {
        &*self.display
    }

    pub fn display_mut(&mut self) -> &mut dyn Display {
        &mut *self.display
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn slot(&self) -> &LayoutSlot {
        &self.slot
    }

    /// Content of the screens recorded so far.
    pub fn screens(&self) -> Vec<Vec<String>> {
        match &self.screens {
            Some(log) => match log.lock() {
                Ok(screens) => screens.clone(),
                Err(poisoned) => poisoned.into_inner().clone(),
            },
            None => Vec::new(),
        }
    }

    fn layout_options(&self) -> LayoutOptions {
        let mut options = LayoutOptions::new(self.skin.input)
            .with_animation(self.config.animate())
            .with_debug_indicator(self.config.debug);
        if let Some(idle_timer) = &self.idle_timer {
            options = options.with_idle_timer(idle_timer.clone());
        }
        if let Some(log) = &self.screens {
            let log = Arc::clone(log);
            let debug_mode = self.config.debug;
            options = options.with_observer(Box::new(move |content: &[String]| {
                if debug_mode {
                    debug!(?content, "layout changed");
                }
                let mut screens = match log.lock() {
                    Ok(screens) => screens,
                    Err(poisoned) => poisoned.into_inner(),
                };
                screens.push(content.to_vec());
            }));
        }
        options
    }
}

/// Show `component` until it produces a result.
///
/// With `br_name` set, a [`ButtonRequest`] carrying the page count goes to the host first. A
/// `Cancelled` result turns into `raise_on_cancel` when one is given.
pub fn interact<C: Component>(
    ctx: &mut UiContext<'_>,
    component: C,
    br_name: Option<&str>,
    br_code: ButtonRequestType,
    raise_on_cancel: Option<UiError>,
) -> Result<UiResult> {
    if let Some(name) = br_name {
        let request = ButtonRequest::new(name, br_code, component.page_count());
        info!(%request, "sending button request");
        ctx.host.button_request(&request)?;
    }
    let mut layout = Layout::new(component, ctx.layout_options());
    let result = layout.run(&ctx.slot, &mut *ctx.display)?;
    match (result, raise_on_cancel) {
        (UiResult::Cancelled, Some(err)) => Err(err),
        (result, _) => Ok(result),
    }
}

/// Run `component` and fail with `exc` unless the user confirmed.
pub fn raise_if_not_confirmed<C: Component>(
    ctx: &mut UiContext<'_>,
    component: C,
    br_name: Option<&str>,
    br_code: ButtonRequestType,
    exc: UiError,
) -> Result<()> {
    match interact(ctx, component, br_name, br_code, Some(exc.clone()))? {
        UiResult::Confirmed => Ok(()),
        _ => Err(exc),
    }
}

/// Main screen with an info detour: `Info` shows `info` and comes back to `main`.
///
/// The button request goes out only when `main` is first shown.
pub fn with_info<M: Component, I: Component>(
    ctx: &mut UiContext<'_>,
    main: &mut M,
    info: &mut I,
    br_name: &str,
    br_code: ButtonRequestType,
) -> Result<()> {
    let mut send_request = true;
    loop {
        let name = send_request.then_some(br_name);
        send_request = false;
        match interact(ctx, &mut *main, name, br_code, None)? {
            UiResult::Confirmed => return Ok(()),
            UiResult::Info => {
                interact(ctx, &mut *info, None, br_code, None)?;
            }
            _ => return Err(UiError::ActionCancelled),
        }
    }
}

/// Walk `screens` in order; each confirmation moves forward.
///
/// Cancelling the first screen fails with `ActionCancelled`; cancelling a later one (or asking
/// for info there) goes back one screen. Each shown screen sends `br_name` to the host.
pub fn confirm_linear_flow(
    ctx: &mut UiContext<'_>,
    screens: &mut [Box<dyn Component>],
    br_name: &str,
    br_code: ButtonRequestType,
) -> Result<()> {
    let mut index = 0;
    while let Some(screen) = screens.get_mut(index) {
        match interact(ctx, screen, Some(br_name), br_code, None)? {
            UiResult::Confirmed => index += 1,
            UiResult::Cancelled if index == 0 => return Err(UiError::ActionCancelled),
            UiResult::Cancelled | UiResult::Info => index = index.saturating_sub(1),
            other => return Err(UiError::UnexpectedResult(other)),
        }
        debug!(index, total = screens.len(), "linear flow step");
    }
    Ok(())
}

/// Paint `component` once, without waiting for input.
pub fn draw_simple(ctx: &mut UiContext<'_>, component: &mut dyn Component) {
    let animate = ctx.config.animate();
    layout::draw_simple(component, &mut *ctx.display, animate);
}
