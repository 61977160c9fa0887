//! Hardware-wallet user interface: confirmation screens, PIN and passphrase entry, recovery.
//!
//! Invariant: single layout at a time. Entering the [`runtime::LayoutSlot`] pre-empts the layout
//! that was running, which returns [`UiError::LayoutCancelled`].
//!
//! # Public API Overview
//! - Implement [`Display`] for the screen and [`HostChannel`] for the host link, or use the
//!   recording versions in tests.
//! - Feed touch and button events through an [`InputSender`] obtained from [`ui_channel`].
//! - Build a [`UiContext`] and call the flows in [`layouts`] (`confirm_output`,
//!   `request_pin_on_device`, [`RecoveryWizard`]...).
//! - Compose lower-level screens from [`widgets`] and run them with [`Layout`].
//!
//! # Configuration
//! [`UiConfig::from_env`] reads `WALLET_UI_*` variables; [`logging::init`] installs the
//! `tracing` subscriber they describe.

#![allow(
    clippy::derivable_impls,
    clippy::needless_range_loop,
    clippy::too_many_arguments,
    clippy::type_complexity
)]

pub mod config;
pub mod error;
pub mod logging;

pub mod core;
pub mod layouts;
pub mod render;
pub mod runtime;
pub mod widgets;

/// Configuration and errors.
pub use crate::config::{Model, UiConfig};
pub use crate::error::{Result, UiError};

/// Component contract and drawing primitives.
pub use crate::core::component::{content_of, Component, UiResult};
pub use crate::core::display::{Align, Display, Font, Icon, TextMetrics};
pub use crate::core::event::{ButtonEvent, Event, EventCtx, InputKind, PhysicalButton, TouchEvent};
pub use crate::core::geometry::{Grid, Insets, Point, Rect};

/// Layout loop and input delivery.
pub use crate::runtime::{ui_channel, InputSender, Layout, LayoutOptions, LayoutSlot};

/// Screen builders.
pub use crate::layouts::{
    ButtonRequest, ButtonRequestType, HostChannel, RecordingHost, RecoveryWizard, Skin,
    Translations, UiContext,
};

/// Test display.
pub use crate::render::RecordingDisplay;
