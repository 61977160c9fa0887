//! Runtime orchestration: input delivery and the layout loop.

pub mod channel;
pub mod layout;

pub use channel::{ui_channel, InputSender, LayoutLease, LayoutSlot, Wakeup};
pub use layout::{
    alert, backlight_fade, draw_simple, IdleTimer, Layout, LayoutObserver, LayoutOptions,
    BACKLIGHT_DIM, BACKLIGHT_MAX, BACKLIGHT_NONE, BACKLIGHT_NORMAL, DEBUG_INDICATOR_SIZE,
    RENDER_DELAY,
};
