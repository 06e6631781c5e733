//! Render commands for llay layouts.
//!
//! This crate turns a positioned [`llay_layout::LayoutTree`] into a flat list
//! of draw instructions for an external renderer. Nothing here rasterizes.

mod commands;
mod emit;
pub mod golden;

pub use commands::{
    BorderData, RectangleData, RenderCommand, RenderCommandType, RenderData, TextData,
};
pub use emit::emit_commands;
