//! Environment configuration.

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::error::UiError;

/// Device model whose screens are built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Model {
    #[default]
    Bolt,
    Caesar,
    Delizia,
    Eckhart,
}

impl Model {
    pub const ALL: [Model; 4] = [Model::Bolt, Model::Caesar, Model::Delizia, Model::Eckhart];

    pub fn name(&self) -> &'static str {
        match self {
            Model::Bolt => "bolt",
            Model::Caesar => "caesar",
            Model::Delizia => "delizia",
            Model::Eckhart => "eckhart",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Model {
    type Err = UiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Model::ALL
            .into_iter()
            .find(|model| model.name().eq_ignore_ascii_case(value))
            .ok_or_else(|| UiError::InvalidArgument(format!("unknown model: {value}")))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiConfig {
    pub model: Model,
    pub disable_animation: bool,
    pub debug: bool,
    pub log_filter: Option<String>,
    pub lang_file: Option<String>,
}

impl UiConfig {
    /// Reads `WALLET_UI_*` variables. An unknown model falls back to the default one.
    pub fn from_env() -> Self {
        let model = match env_string_opt("WALLET_UI_MODEL") {
            Some(value) => value.parse().unwrap_or_else(|err| {
                tracing::warn!(%err, "falling back to the default model");
                Model::default()
            }),
            None => Model::default(),
        };
        Self {
            model,
            disable_animation: env_flag("WALLET_UI_DISABLE_ANIMATION"),
            debug: env_flag("WALLET_UI_DEBUG"),
            log_filter: env_string_opt("WALLET_UI_LOG"),
            lang_file: env_string_opt("WALLET_UI_LANG_FILE"),
        }
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_animation(mut self, animate: bool) -> Self {
        self.disable_animation = !animate;
        self
    }

    pub fn animate(&self) -> bool {
        !self.disable_animation
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}
