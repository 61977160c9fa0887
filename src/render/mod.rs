//! Display implementations shipped with the crate.

pub mod recording;

pub use recording::{DrawOp, RecordingDisplay};
