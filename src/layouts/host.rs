//! Messages sent to the connected host while a screen is shown.

use std::fmt;

use tracing::debug;

use crate::error::{Result, UiError};

/// Reason code carried by a [`ButtonRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonRequestType {
    Other,
    FeeOverThreshold,
    ConfirmOutput,
    ResetDevice,
    ConfirmWord,
    WipeDevice,
    ProtectCall,
    SignTx,
    FirmwareCheck,
    Address,
    PublicKey,
    MnemonicWordCount,
    MnemonicInput,
    PassphraseType,
    UnknownDerivationPath,
    RecoveryHomepage,
    Success,
    Warning,
    PassphraseEntry,
    PinEntry,
}

impl ButtonRequestType {
    /// Wire value of the code.
    pub fn code(self) -> u32 {
        match self {
            ButtonRequestType::Other => 1,
            ButtonRequestType::FeeOverThreshold => 2,
            ButtonRequestType::ConfirmOutput => 3,
            ButtonRequestType::ResetDevice => 4,
            ButtonRequestType::ConfirmWord => 5,
            ButtonRequestType::WipeDevice => 6,
            ButtonRequestType::ProtectCall => 7,
            ButtonRequestType::SignTx => 8,
            ButtonRequestType::FirmwareCheck => 9,
            ButtonRequestType::Address => 10,
            ButtonRequestType::PublicKey => 11,
            ButtonRequestType::MnemonicWordCount => 12,
            ButtonRequestType::MnemonicInput => 13,
            ButtonRequestType::PassphraseType => 14,
            ButtonRequestType::UnknownDerivationPath => 15,
            ButtonRequestType::RecoveryHomepage => 16,
            ButtonRequestType::Success => 17,
            ButtonRequestType::Warning => 18,
            ButtonRequestType::PassphraseEntry => 19,
            ButtonRequestType::PinEntry => 20,
        }
    }
}

/// Tells the host that the device waits for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonRequest {
    pub name: String,
    pub code: ButtonRequestType,
    /// Pages of the screen, `None` for single-page screens.
    pub pages: Option<usize>,
}

impl ButtonRequest {
    pub fn new(name: impl Into<String>, code: ButtonRequestType, pages: usize) -> Self {
        Self {
            name: name.into(),
            code,
            pages: (pages > 1).then_some(pages),
        }
    }
}

impl fmt::Display for ButtonRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code.code())?;
        if let Some(pages) = self.pages {
            write!(f, " [{pages} pages]")?;
        }
        Ok(())
    }
}

/// Link to the host the device is connected to.
pub trait HostChannel {
    /// Deliver `request`. An error aborts the flow before its screen waits for input.
    fn button_request(&mut self, request: &ButtonRequest) -> Result<()>;
}

/// Host that keeps every request, optionally failing deliveries.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    requests: Vec<ButtonRequest>,
    failure: Option<String>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every request with `UiError::Host(reason)`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            requests: Vec::new(),
            failure: Some(reason.into()),
        }
    }

    pub fn requests(&self) -> &[ButtonRequest] {
        &self.requests
    }

    pub fn names(&self) -> Vec<&str> {
        self.requests.iter().map(|request| request.name.as_str()).collect()
    }

    pub fn clear(&mut self) {
        self.requests.clear();
    }
}

impl HostChannel for RecordingHost {
    fn button_request(&mut self, request: &ButtonRequest) -> Result<()> {
        if let Some(reason) = &self.failure {
            return Err(UiError::Host(reason.clone()));
        }
        debug!(%request, "button request recorded");
        self.requests.push(request.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ButtonRequest, ButtonRequestType, HostChannel, RecordingHost};
    use crate::error::UiError;

    #[test]
    fn codes_match_the_wire_values() {
        assert_eq!(ButtonRequestType::Other.code(), 1);
        assert_eq!(ButtonRequestType::ProtectCall.code(), 7);
        assert_eq!(ButtonRequestType::SignTx.code(), 8);
        assert_eq!(ButtonRequestType::PinEntry.code(), 20);
    }

    #[test]
    fn single_page_requests_carry_no_page_count() {
        let request = ButtonRequest::new("confirm_output", ButtonRequestType::ConfirmOutput, 1);
        assert_eq!(request.pages, None);
        assert_eq!(request.to_string(), "confirm_output (3)");
        let request = ButtonRequest::new("confirm_data", ButtonRequestType::Other, 3);
        assert_eq!(request.to_string(), "confirm_data (1) [3 pages]");
    }

    #[test]
    fn failing_host_rejects_requests() {
        let mut host = RecordingHost::failing("usb disconnected");
        let request = ButtonRequest::new("x", ButtonRequestType::Other, 1);
        assert_eq!(
            host.button_request(&request),
            Err(UiError::Host("usb disconnected".to_string()))
        );
        assert!(host.requests().is_empty());
    }
}
