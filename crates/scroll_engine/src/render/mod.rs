//! Rendering interface
//!
//! The game core draws through the [`RenderTarget`] trait; the actual
//! graphics backend lives outside this crate.

pub mod commands;
pub mod target;

pub use commands::{DrawCommand, DrawRecorder};
pub use target::{RenderTarget, Sprite, View};
