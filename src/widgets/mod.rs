//! Widgets composed by the screen builders.

pub mod button;
pub mod button_controller;
pub mod container;
pub mod dialog;
pub mod hold_to_confirm;
pub mod image;
pub mod mnemonic;
pub mod paginated;
pub mod passphrase;
pub mod pin;
pub mod text;
pub mod theme;
pub mod timeout;
pub mod word_count;

pub use button::{Button, ButtonContent, ButtonMsg, ButtonState, ButtonStyleSheet};
pub use button_controller::{ButtonController, ButtonLayout, ButtonPos};
pub use container::Container;
pub use dialog::{Dialog, DialogVerbs};
pub use hold_to_confirm::HoldToConfirm;
pub use image::Image;
pub use mnemonic::{MnemonicKeyboard, MnemonicSelector, WordList};
pub use paginated::Paginated;
pub use passphrase::{PassphraseKeyboard, PassphraseSelector};
pub use pin::{PinKeyboard, PinSelector};
pub use text::{Label, Text};
pub use theme::{ButtonStyle, Theme};
pub use timeout::Timeout;
pub use word_count::WordCountSelector;
