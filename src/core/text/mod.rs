//! Text helpers: grapheme widths, line breaking, multi-item layout.
//!
//! These helpers only measure through [`crate::core::display::TextMetrics`] and draw through
//! [`crate::core::display::Display`], so widgets can use them without the render layer.

pub mod layout;
pub mod span;
pub mod width;
