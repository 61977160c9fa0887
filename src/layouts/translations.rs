//! User-visible strings, English by default.
//!
//! Overrides come from `key=value` text, one entry per line. Blank lines and lines starting
//! with `#` are skipped and `\n` in a value becomes a line break.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use tracing::{debug, warn};

use crate::config::UiConfig;
use crate::error::{Result, UiError};

const ENGLISH_ENTRIES: &[(&str, &str)] = &[
    ("address__public_key", "Public key"),
    ("address__title_cosigner", "Cosigner"),
    ("address__title_receive_address", "Receive address"),
    ("address__title_yours", "Yours"),
    ("address_details__account", "Account:"),
    ("address_details__derivation_path", "Derivation path:"),
    ("address_details__title_receive_address", "Receive address"),
    ("addr_mismatch__contact_support", "Please contact Trezor support."),
    ("addr_mismatch__key_mismatch", "Key mismatch?"),
    ("addr_mismatch__mismatch", "Address mismatch?"),
    ("addr_mismatch__wrong_derivation_path", "Wrong derivation path for selected account."),
    ("backup__can_back_up_anytime", "You can back up your Trezor once, at any time."),
    ("backup__it_should_be_backed_up", "Your wallet backup is ready. You should back it up now."),
    ("backup__new_wallet_created", "Wallet created."),
    ("backup__new_wallet_successfully_created", "Wallet created successfully."),
    ("backup__title_skip", "Skip backup"),
    ("backup__want_to_skip", "Are you sure you want to skip the backup?"),
    ("bitcoin__new_fee_rate", "New fee rate:"),
    ("buttons__back", "Back"),
    ("buttons__back_up", "Back up"),
    ("buttons__cancel", "Cancel"),
    ("buttons__cancel_and_exit", "Cancel and exit"),
    ("buttons__change", "Change"),
    ("buttons__check", "Check"),
    ("buttons__confirm", "Confirm"),
    ("buttons__continue", "Continue"),
    ("buttons__hold_to_confirm", "Hold to confirm"),
    ("buttons__info", "Info"),
    ("buttons__install", "Install"),
    ("buttons__quit", "Quit"),
    ("buttons__show_all", "Show all"),
    ("buttons__skip", "Skip"),
    ("buttons__try_again", "Try again"),
    ("buttons__turn_off", "Turn off"),
    ("buttons__turn_on", "Turn on"),
    ("coinjoin__max_mining_fee", "Max mining fee:"),
    ("coinjoin__max_rounds", "Max rounds:"),
    ("coinjoin__title", "Authorize coinjoin"),
    ("confirm_total__fee_rate", "Fee rate:"),
    ("confirm_total__sending_from_account", "Sending from account:"),
    ("confirm_total__title_fee", "Fee information"),
    ("firmware_update__title", "Update firmware"),
    ("firmware_update__title_fingerprint", "Fingerprint"),
    ("homescreen__set_default", "Change homescreen to default?"),
    ("homescreen__title_set", "Change homescreen"),
    ("modify_amount__decrease_amount", "Decrease amount by:"),
    ("modify_amount__increase_amount", "Increase amount by:"),
    ("modify_amount__new_amount", "New amount:"),
    ("modify_amount__title", "Modify amount"),
    ("modify_fee__decrease_fee", "Decrease fee by:"),
    ("modify_fee__increase_fee", "Increase fee by:"),
    ("modify_fee__no_change", "Fee did not change."),
    ("modify_fee__title", "Modify fee"),
    ("modify_fee__transaction_fee", "New transaction fee:"),
    ("passphrase__always_on_device", "Do you really want to enter passphrase always on the device?"),
    ("passphrase__hide", "Hide passphrase coming from app?"),
    ("passphrase__please_enter", "Please type your passphrase."),
    ("passphrase__revoke_on_device", "Do you want to revoke the passphrase on device setting?"),
    ("passphrase__title_enter", "Enter passphrase"),
    ("passphrase__title_hide", "Hide passphrase"),
    ("passphrase__title_settings", "Passphrase settings"),
    ("passphrase__title_source", "Passphrase source"),
    ("passphrase__turn_off", "Turn off passphrase protection?"),
    ("passphrase__turn_on", "Turn on passphrase protection?"),
    ("pin__diff_from_wipe_code", "The new PIN must be different from your wipe code."),
    ("pin__incorrect", "Incorrect PIN"),
    ("pin__last_attempt", "Last attempt"),
    ("pin__mismatch", "The PINs you entered do not match."),
    ("pin__reenter_new", "Please re-enter new PIN."),
    ("pin__reenter_to_confirm", "Please re-enter PIN to confirm."),
    ("pin__title_check_pin", "Check PIN"),
    ("pin__title_mismatch", "PIN mismatch"),
    ("pin__title_settings", "PIN settings"),
    ("pin__tries_left", "tries left"),
    ("recovery__enter_any_share", "Enter any share"),
    ("recovery__group_share_success_template", "You have entered\nShare {0}\nfrom\nGroup {1}"),
    ("recovery__num_of_words", "Select the number of words in your backup."),
    ("recovery__title", "Recover wallet"),
    ("recovery__title_dry_run", "Backup check"),
    ("recovery__check_dry_run", "Check your backup?"),
    ("recovery__title_select_num_of_words", "Number of words"),
    ("recovery__type_word_x_of_y_template", "Type word {0} of {1}"),
    ("recovery__enter_backup", "Enter your backup."),
    ("recovery__title_recovery_share", "Recovery share"),
    ("reset__by_continuing", "By continuing you agree to the terms of use."),
    ("reset__title_create_wallet", "Create wallet"),
    ("send__confirm_sending", "Sending amount"),
    ("send__including_fee", "Including fee:"),
    ("send__receiving_to_multisig", "Receiving to a multisig address."),
    ("send__sending_to", "Sending to"),
    ("send__title_joint_transaction", "Joint transaction"),
    ("send__title_replace", "Replace transaction"),
    ("send__to_the_total_amount", "To the total amount:"),
    ("send__total_amount", "Total amount:"),
    ("send__transaction_id", "Transaction ID"),
    ("send__you_are_contributing", "You are contributing:"),
    ("send__using_different_paths", "Using different paths for different XPUBs."),
    ("sign_message__bytes_template", "{0} Bytes"),
    ("sign_message__confirm_address", "Signing address"),
    ("sign_message__confirm_message", "Confirm message"),
    ("sign_message__confirm_without_review", "Confirm without review"),
    ("sign_message__message_size", "Message size:"),
    ("sign_message__verify_address", "Verify address"),
    ("wipe_code__diff_from_pin", "The wipe code must be different from your PIN."),
    ("wipe_code__invalid", "Invalid wipe code"),
    ("wipe_code__mismatch", "The wipe codes you entered do not match."),
    ("wipe_code__reenter_to_confirm", "Please re-enter wipe code to confirm."),
    ("wipe_code__title_check", "Check wipe code"),
    ("wipe_code__title_mismatch", "Wipe code mismatch"),
    ("wipe_code__reenter_new", "Please re-enter new wipe code."),
    ("words__address", "Address"),
    ("words__amount", "Amount"),
    ("words__confirm_without_review", "Confirm without review"),
    ("words__continue_anyway_question", "Continue anyway?"),
    ("words__error", "Error"),
    ("words__important", "Important"),
    ("words__mismatch", "Mismatch"),
    ("words__please_try_again", "Please try again."),
    ("words__recipient", "Recipient"),
    ("words__sign", "Sign"),
    ("words__title_done", "Done"),
    ("words__title_information", "Information"),
    ("words__title_success", "Success"),
    ("words__title_summary", "Summary"),
    ("words__unknown", "Unknown"),
    ("words__warning", "Warning"),
    ("words__wrong_derivation_path", "Wrong derivation path for selected account."),
];

static ENGLISH: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| ENGLISH_ENTRIES.iter().copied().collect());

/// Lookup table for screen texts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translations {
    overrides: HashMap<String, String>,
}

impl Translations {
    pub fn english() -> Self {
        Self::default()
    }

    /// Parse `key=value` overrides.
    pub fn parse(text: &str) -> Result<Self> {
        let mut overrides = HashMap::new();
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(UiError::InvalidArgument(format!(
                    "line {}: expected key=value",
                    index + 1
                )));
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(UiError::InvalidArgument(format!("line {}: empty key", index + 1)));
            }
            if !ENGLISH.contains_key(key) {
                debug!(key, "override for a key without an English default");
            }
            overrides.insert(key.to_string(), value.trim().replace("\\n", "\n"));
        }
        Ok(Self { overrides })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|err| UiError::InvalidArgument(format!("{}: {err}", path.display())))?;
        Self::parse(&text)
    }

    /// English with the overrides from `config.lang_file`, if it can be read.
    pub fn from_config(config: &UiConfig) -> Self {
        let Some(path) = config.lang_file.as_deref() else {
            return Self::english();
        };
        match Self::from_file(path) {
            Ok(translations) => {
                debug!(path, entries = translations.overrides.len(), "translations loaded");
                translations
            }
            Err(err) => {
                warn!(%err, "falling back to English texts");
                Self::english()
            }
        }
    }

    /// Text for `key`; unknown keys come back unchanged.
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(value) = self.overrides.get(key) {
            return value;
        }
        ENGLISH.get(key).copied().unwrap_or(key)
    }

    /// Text for `key` with `{0}`, `{1}`... replaced by `args`.
    pub fn format(&self, key: &str, args: &[&str]) -> String {
        fill_placeholders(self.get(key), args)
    }

    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}

pub(crate) fn fill_placeholders(template: &str, args: &[&str]) -> String {
    let mut out = template.to_string();
    for (index, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{index}}}"), arg);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{Translations, ENGLISH_ENTRIES};
    use crate::config::UiConfig;
    use crate::error::UiError;
    use assert_matches::assert_matches;
    use std::collections::HashSet;

    #[test]
    fn english_keys_are_unique() {
        let keys: HashSet<_> = ENGLISH_ENTRIES.iter().map(|(key, _)| key).collect();
        assert_eq!(keys.len(), ENGLISH_ENTRIES.len());
    }

    #[test]
    fn overrides_win_over_english() {
        let translations = Translations::parse(
            "# German buttons\n\nbuttons__confirm = Bestätigen\nwords__title_success=Erfolg\\n!\n",
        )
        .unwrap();
        assert_eq!(translations.get("buttons__confirm"), "Bestätigen");
        assert_eq!(translations.get("words__title_success"), "Erfolg\n!");
        assert_eq!(translations.get("buttons__cancel"), "Cancel");
        assert_eq!(translations.get("no__such_key"), "no__such_key");
        assert_eq!(translations.override_count(), 2);
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert_matches!(
            Translations::parse("buttons__confirm\n"),
            Err(UiError::InvalidArgument(message)) if message.starts_with("line 1")
        );
        assert_matches!(
            Translations::parse("ok=1\n = value"),
            Err(UiError::InvalidArgument(message)) if message.starts_with("line 2")
        );
    }

    #[test]
    fn templates_are_filled() {
        let translations = Translations::english();
        assert_eq!(
            translations.format("recovery__type_word_x_of_y_template", &["3", "12"]),
            "Type word 3 of 12"
        );
    }

    #[test]
    fn unreadable_lang_file_falls_back_to_english() {
        let config = UiConfig {
            lang_file: Some("/nonexistent/wallet_ui/lang.txt".to_string()),
            ..UiConfig::default()
        };
        assert_eq!(Translations::from_config(&config), Translations::english());
    }
}
