//! Per-model screen parameters.

use std::time::Duration;

use crate::config::{Model, UiConfig};
use crate::core::event::InputKind;
use crate::widgets::theme::Theme;

/// Screens and wording that differ between models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkinFeatures {
    /// A success screen follows wallet creation.
    pub wallet_created_screen: bool,
    /// Asking to re-enter a new PIN gets its own screen.
    pub reenter_pin_prompt: bool,
    /// The subprompt is blank while all 16 attempts remain.
    pub blank_full_attempts: bool,
    /// Skipping the backup asks for confirmation on a second screen.
    pub backup_skip_confirmation: bool,
    /// Warnings asking to continue use the danger screen with a cancel option.
    pub danger_screen: bool,
    /// PIN mismatch popups use the short title and body.
    pub short_mismatch_texts: bool,
    /// Button labels are shown in capitals.
    pub uppercase_buttons: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Skin {
    pub model: Model,
    pub input: InputKind,
    pub theme: Theme,
    pub features: SkinFeatures,
}

impl Skin {
    pub fn for_model(model: Model) -> Self {
        match model {
            Model::Bolt => Self {
                model,
                input: InputKind::Touch,
                theme: Theme::touch(240, 240),
                features: SkinFeatures {
                    wallet_created_screen: false,
                    reenter_pin_prompt: false,
                    blank_full_attempts: false,
                    backup_skip_confirmation: true,
                    danger_screen: false,
                    short_mismatch_texts: false,
                    uppercase_buttons: false,
                },
            },
            Model::Caesar => Self {
                model,
                input: InputKind::Buttons,
                theme: Theme::buttons(128, 64),
                features: SkinFeatures {
                    wallet_created_screen: false,
                    reenter_pin_prompt: true,
                    blank_full_attempts: true,
                    backup_skip_confirmation: true,
                    danger_screen: false,
                    short_mismatch_texts: false,
                    uppercase_buttons: true,
                },
            },
            Model::Delizia => Self {
                model,
                input: InputKind::Touch,
                theme: Theme::touch(240, 240),
                features: SkinFeatures {
                    wallet_created_screen: true,
                    reenter_pin_prompt: false,
                    blank_full_attempts: false,
                    backup_skip_confirmation: false,
                    danger_screen: true,
                    short_mismatch_texts: true,
                    uppercase_buttons: false,
                },
            },
            Model::Eckhart => {
                let mut theme = Theme::touch(380, 520);
                theme.header_height = 64;
                theme.line_height = 34;
                theme.button_height = 72;
                theme.button_spacing = 8;
                theme.swipe_distance = 40;
                Self {
                    model,
                    input: InputKind::Touch,
                    theme,
                    features: SkinFeatures {
                        wallet_created_screen: true,
                        reenter_pin_prompt: false,
                        blank_full_attempts: false,
                        backup_skip_confirmation: false,
                        danger_screen: true,
                        short_mismatch_texts: true,
                        uppercase_buttons: false,
                    },
                }
            }
        }
    }

    pub fn from_config(config: &UiConfig) -> Self {
        Self::for_model(config.model)
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_hold_duration(mut self, hold_duration: Duration) -> Self {
        self.theme.hold_duration = hold_duration;
        self
    }

    /// Label as this model prints it on a button.
    pub fn button_label(&self, label: &str) -> String {
        if self.features.uppercase_buttons {
            label.to_uppercase()
        } else {
            label.to_string()
        }
    }

    pub fn is_touch(&self) -> bool {
        self.input == InputKind::Touch
    }
}

impl Default for Skin {
    fn default() -> Self {
        Self::for_model(Model::default())
    }
}

#[cfg(test)]
mod tests {
    use super::Skin;
    use crate::config::{Model, UiConfig};
    use crate::core::event::InputKind;

    #[test]
    fn only_caesar_uses_buttons() {
        for model in Model::ALL {
            let skin = Skin::for_model(model);
            assert_eq!(skin.input == InputKind::Buttons, model == Model::Caesar);
            assert_eq!(skin.model, model);
        }
    }

    #[test]
    fn config_selects_the_skin() {
        let config = UiConfig::default().with_model(Model::Eckhart);
        let skin = Skin::from_config(&config);
        assert_eq!(skin.model, Model::Eckhart);
        assert!(skin.features.wallet_created_screen);
        assert!(skin.theme.screen.height > Skin::default().theme.screen.height);
    }

    #[test]
    fn caesar_capitalizes_button_labels() {
        assert_eq!(Skin::for_model(Model::Caesar).button_label("Confirm"), "CONFIRM");
        assert_eq!(Skin::for_model(Model::Bolt).button_label("Confirm"), "Confirm");
    }
}
