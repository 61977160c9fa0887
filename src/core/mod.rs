//! Core interfaces and types.

pub mod color;
pub mod component;
pub mod display;
pub mod event;
pub mod geometry;
pub mod text;
