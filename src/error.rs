use thiserror::Error;

use crate::core::component::UiResult;

pub type Result<T, E = UiError> = std::result::Result<T, E>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UiError {
    #[error("action cancelled by user")]
    ActionCancelled,
    #[error("PIN entry cancelled")]
    PinCancelled,
    #[error("layout was replaced by another layout")]
    LayoutCancelled,
    #[error("input channel closed")]
    InputClosed,
    #[error("unexpected layout result: {0:?}")]
    UnexpectedResult(UiResult),
    #[error("host error: {0}")]
    Host(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl UiError {
    /// Whether the user (not the host or the runtime) ended the interaction.
    pub fn is_user_cancel(&self) -> bool {
        matches!(self, UiError::ActionCancelled | UiError::PinCancelled)
    }
}
