#![allow(unused_imports)]

use wallet_ui::layouts::{
    confirm_action, confirm_address, confirm_amount, confirm_blob, confirm_change_passphrase,
    confirm_change_passphrase_source, confirm_coinjoin, confirm_firmware_update,
    confirm_hide_passphrase_from_host, confirm_homescreen, confirm_joint_total, confirm_linear_flow,
    confirm_metadata, confirm_modify_fee, confirm_modify_output,
    confirm_multisig_different_paths_warning, confirm_multisig_warning,
    confirm_output, confirm_path_warning, confirm_properties, confirm_reenter_pin,
    confirm_replacement, confirm_reset_device, confirm_set_new_pin, confirm_sign_identity,
    confirm_signverify, confirm_single, confirm_text, confirm_total, confirm_value,
    continue_recovery, draw_simple, error_popup, interact, pin_mismatch_popup, prompt_backup,
    prompt_recovery_check, raise_if_not_confirmed, request_passphrase_on_device,
    request_passphrase_on_host,
    request_pin_on_device, request_word, request_word_count, should_show_more, show_address,
    show_danger, show_error_and_raise, show_group_share_success, show_pubkey,
    show_recovery_warning, show_success, show_wait_text, show_wallet_created_success,
    show_warning, wipe_code_same_as_pin_popup, with_info, AddressDetails, ConfirmAction,
    ConfirmBlob, ConfirmOutput, ConfirmTotal, ConfirmValue, ScreenLog, SignVerify, SkinFeatures,
};
use wallet_ui::runtime::{
    alert, backlight_fade, IdleTimer, LayoutLease, LayoutObserver, Wakeup, BACKLIGHT_DIM,
    BACKLIGHT_MAX, BACKLIGHT_NONE, BACKLIGHT_NORMAL, DEBUG_INDICATOR_SIZE, RENDER_DELAY,
};
use wallet_ui::widgets::{
    Button, ButtonController, ButtonLayout, ButtonPos, Container, Dialog, DialogVerbs,
    HoldToConfirm, Image, Label, MnemonicKeyboard, MnemonicSelector, Paginated, PassphraseKeyboard,
    PassphraseSelector, PinKeyboard, PinSelector, Text, Theme, Timeout, WordCountSelector,
    WordList,
};
use wallet_ui::{
    content_of, ui_channel, Align, ButtonEvent, ButtonRequest, ButtonRequestType, Component,
    Display, Event, EventCtx, Font, Grid, HostChannel, Icon, InputKind, InputSender, Insets,
    Layout, LayoutOptions, LayoutSlot, Model, PhysicalButton, Point, RecordingDisplay,
    RecordingHost, Rect, RecoveryWizard, Result, Skin, TextMetrics, TouchEvent, Translations,
    UiConfig, UiContext, UiError, UiResult,
};

#[test]
fn public_api_exports_compile() {}
