//! Wallet recovery: word count, word entry and the wizard tying them together.

use tracing::{debug, info};

use crate::core::component::{Component, UiResult};
use crate::core::display::Icon;
use crate::core::event::InputKind;
use crate::error::{Result, UiError};
use crate::layouts::host::ButtonRequestType;
use crate::layouts::screens::Screen;
use crate::layouts::{interact, raise_if_not_confirmed, UiContext};
use crate::widgets::mnemonic::{MnemonicKeyboard, MnemonicSelector, WordList};
use crate::widgets::word_count::WordCountSelector;

/// Ask how many words the backup has.
pub fn request_word_count(ctx: &mut UiContext<'_>, dry_run: bool) -> Result<u32> {
    let selector = WordCountSelector::new(ctx.theme(), ctx.input());
    debug!(dry_run, "requesting word count");
    match interact(
        ctx,
        selector,
        Some("word_count"),
        ButtonRequestType::MnemonicWordCount,
        None,
    )? {
        UiResult::Number(count) => Ok(count),
        other => Err(UiError::UnexpectedResult(other)),
    }
}

/// Ask for word `index` (zero-based) of `count`, starting from `prefill`.
///
/// Returns `None` when the user went back from an empty prefix.
pub fn request_word(
    ctx: &mut UiContext<'_>,
    words: &WordList,
    index: usize,
    count: usize,
    prefill: &str,
    can_go_back: bool,
) -> Result<Option<String>> {
    let position = (index + 1).to_string();
    let total = count.to_string();
    let prompt = ctx.tr_format(
        "recovery__type_word_x_of_y_template",
        &[position.as_str(), total.as_str()],
    );
    let component: Box<dyn Component> = match ctx.input() {
        InputKind::Touch => Box::new(
            MnemonicKeyboard::new(ctx.theme(), words.clone(), prefill, can_go_back)
                .with_prompt(prompt),
        ),
        InputKind::Buttons => Box::new(
            MnemonicSelector::new(ctx.theme(), words.clone(), prefill, can_go_back)
                .with_prompt(prompt),
        ),
    };
    match interact(
        ctx,
        component,
        Some("mnemonic_input"),
        ButtonRequestType::MnemonicInput,
        None,
    )? {
        UiResult::Text(word) => Ok(Some(word)),
        UiResult::Cancelled => Ok(None),
        other => Err(UiError::UnexpectedResult(other)),
    }
}

/// Confirm that a share of a multi-group backup was accepted. Indices are zero-based.
pub fn show_group_share_success(
    ctx: &mut UiContext<'_>,
    share_index: usize,
    group_index: usize,
) -> Result<()> {
    let share = (share_index + 1).to_string();
    let group = (group_index + 1).to_string();
    let text = ctx.tr_format(
        "recovery__group_share_success_template",
        &[share.as_str(), group.as_str()],
    );
    let screen = Screen::new(ctx.tr("words__title_success"))
        .icon(Icon::Success, ctx.theme().success)
        .normal(text)
        .verb(ctx.button("buttons__continue"))
        .build(ctx);
    raise_if_not_confirmed(
        ctx,
        screen,
        Some("share_success"),
        ButtonRequestType::Other,
        UiError::ActionCancelled,
    )
}

/// Warning during recovery, such as an invalid or repeated share. Dismissing it is enough.
pub fn show_recovery_warning(
    ctx: &mut UiContext<'_>,
    br_name: &str,
    content: &str,
    subheader: Option<&str>,
    button: Option<&str>,
) -> Result<()> {
    let verb = button
        .map(|label| ctx.skin().button_label(label))
        .unwrap_or_else(|| ctx.button("buttons__try_again"));
    let screen = Screen::new(content)
        .icon(Icon::Warning, ctx.theme().warning)
        .normal(subheader.unwrap_or_default())
        .verb(verb)
        .build(ctx);
    interact(ctx, screen, Some(br_name), ButtonRequestType::Warning, None)?;
    Ok(())
}

/// Recovery home screen between steps. Returns `false` when the user wants to stop.
pub fn continue_recovery(
    ctx: &mut UiContext<'_>,
    button_label: &str,
    text: &str,
    subtext: Option<&str>,
    dry_run: bool,
) -> Result<bool> {
    let title = if dry_run {
        ctx.tr("recovery__title_dry_run")
    } else {
        ctx.tr("recovery__title")
    };
    let screen = Screen::new(title)
        .bold(text)
        .normal(subtext.unwrap_or_default())
        .verb(ctx.skin().button_label(button_label))
        .verb_cancel(Some(ctx.button("buttons__cancel")))
        .build(ctx);
    let result = interact(
        ctx,
        screen,
        Some("recovery_homepage"),
        ButtonRequestType::RecoveryHomepage,
        None,
    )?;
    Ok(result == UiResult::Confirmed)
}

/// Collects the words of a single-share backup.
///
/// Going back from an empty prefix reopens the previous word with its letters filled in; going
/// back from the first word asks for the word count again.
#[derive(Debug, Clone)]
pub struct RecoveryWizard {
    words: WordList,
    dry_run: bool,
}

impl RecoveryWizard {
    pub fn new(words: WordList) -> Self {
        Self {
            words,
            dry_run: false,
        }
    }

    /// Check an existing backup instead of restoring a wallet.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn run(&self, ctx: &mut UiContext<'_>) -> Result<Vec<String>> {
        if self.words.is_empty() {
            return Err(UiError::InvalidArgument("empty word list".to_string()));
        }
        let text = ctx.tr("recovery__enter_backup");
        let button = ctx.tr("buttons__continue");
        if !continue_recovery(ctx, &button, &text, None, self.dry_run)? {
            info!(dry_run = self.dry_run, "recovery abandoned");
            return Err(UiError::ActionCancelled);
        }

        'count: loop {
            let count = request_word_count(ctx, self.dry_run)? as usize;
            let mut entered: Vec<String> = Vec::with_capacity(count);
            let mut prefill = String::new();
            while entered.len() < count {
                let index = entered.len();
                match request_word(ctx, &self.words, index, count, &prefill, true)? {
                    Some(word) => {
                        entered.push(word);
                        prefill.clear();
                    }
                    None => match entered.pop() {
                        Some(previous) => prefill = previous,
                        None => {
                            debug!("back to word count");
                            continue 'count;
                        }
                    },
                }
                debug!(entered = entered.len(), count, "recovery progress");
            }
            info!(count, dry_run = self.dry_run, "recovery words collected");
            return Ok(entered);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{continue_recovery, show_group_share_success, RecoveryWizard};
    use crate::config::{Model, UiConfig};
    use crate::core::event::InputKind;
    use crate::core::geometry::Point;
    use crate::error::UiError;
    use crate::layouts::{RecordingHost, Skin, UiContext};
    use crate::render::RecordingDisplay;
    use crate::runtime::channel::{ui_channel, InputSender};
    use crate::widgets::mnemonic::{MnemonicKeyboard, WordList};
    use crate::widgets::theme::Theme;
    use crate::widgets::word_count::WordCountSelector;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    fn words() -> WordList {
        WordList::new(["abandon", "ability", "zone", "zoo"])
    }

    fn confirm_point(theme: &Theme) -> Point {
        let area = theme.button_area();
        Point::new(area.right() - 10, area.center().y)
    }

    fn type_zoo(input: &InputSender, keyboard: &MnemonicKeyboard) {
        for letter in ['z', 'o', 'o'] {
            if let Some(area) = keyboard.key_area(letter) {
                input.touch_click(area.center());
            }
        }
    }

    #[test]
    fn wizard_goes_back_to_the_previous_word() {
        let (input, slot) = ui_channel();
        let mut display = RecordingDisplay::new(240, 240);
        let mut host = RecordingHost::new();
        let mut ctx = UiContext::new(&mut display, &mut host, slot, UiConfig::default())
            .with_skin(Skin::for_model(Model::Bolt));
        let theme = ctx.theme().clone();
        let keyboard = MnemonicKeyboard::new(&theme, words(), "", true);
        let count_area = WordCountSelector::new(&theme, InputKind::Touch)
            .button_area(12)
            .unwrap();

        input.touch_click(confirm_point(&theme));
        input.touch_click(count_area.center());
        type_zoo(&input, &keyboard);
        // Back from the empty second word, then accept the prefilled first word.
        input.touch_click(keyboard.erase_area().center());
        input.touch_click(keyboard.accept_area().center());
        for _ in 1..12 {
            type_zoo(&input, &keyboard);
        }

        let entered = RecoveryWizard::new(words()).run(&mut ctx).unwrap();
        drop(ctx);
        assert_eq!(entered, vec!["zoo".to_string(); 12]);
        let names = host.names();
        assert_eq!(&names[..2], &["recovery_homepage", "word_count"]);
        assert_eq!(names.iter().filter(|name| **name == "mnemonic_input").count(), 14);
    }

    #[test]
    fn homepage_cancel_stops_recovery() {
        let (input, slot) = ui_channel();
        let mut display = RecordingDisplay::new(240, 240);
        let mut host = RecordingHost::new();
        let mut ctx = UiContext::new(&mut display, &mut host, slot, UiConfig::default())
            .with_skin(Skin::for_model(Model::Bolt));
        let area = ctx.theme().button_area();
        input.touch_click(Point::new(area.x + 5, area.center().y));
        let result = RecoveryWizard::new(words()).with_dry_run(true).run(&mut ctx);
        assert_matches!(result, Err(UiError::ActionCancelled));
    }

    #[test]
    fn empty_word_list_is_rejected() {
        let (_input, slot) = ui_channel();
        let mut display = RecordingDisplay::new(240, 240);
        let mut host = RecordingHost::new();
        let mut ctx = UiContext::new(&mut display, &mut host, slot, UiConfig::default());
        let empty: [&str; 0] = [];
        let result = RecoveryWizard::new(WordList::new(empty)).run(&mut ctx);
        assert_matches!(result, Err(UiError::InvalidArgument(_)));
    }

    #[test]
    fn share_success_counts_from_one() {
        let (input, slot) = ui_channel();
        let mut display = RecordingDisplay::new(240, 240);
        let mut host = RecordingHost::new();
        let mut ctx = UiContext::new(&mut display, &mut host, slot, UiConfig::default())
            .with_skin(Skin::for_model(Model::Bolt))
            .record_screens();
        let theme = ctx.theme().clone();
        input.touch_click(confirm_point(&theme));
        show_group_share_success(&mut ctx, 0, 1).unwrap();
        let screens = ctx.screens();
        assert!(screens[0]
            .iter()
            .any(|line| line.contains("Share 1") && line.contains("Group 2")));
        input.touch_click(confirm_point(&theme));
        assert!(continue_recovery(&mut ctx, "Continue", "Enter share", None, false).unwrap());
    }
}
