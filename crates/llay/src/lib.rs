//! Immediate-mode box layout.
//!
//! Declare a tree of elements every frame and get back absolute geometry as
//! an ordered list of render commands. Rendering, fonts and input are left
//! to the caller.
//!
//! # Example
//!
//! ```ignore
//! use llay::{Color, ElementDeclaration, Llay, MonospaceMeasure, Padding, Sizing, TextConfig};
//!
//! let mut ui = Llay::default().with_measure_text(MonospaceMeasure::default());
//! ui.begin_frame()?;
//! ui.element(
//!     ElementDeclaration::new()
//!         .with_sizing(Sizing::grow())
//!         .with_padding(Padding::all(16))
//!         .with_background(Color::WHITE),
//!     |ui| {
//!         ui.text("Hello", TextConfig::default())?;
//!         Ok(())
//!     },
//! )?;
//! for command in ui.end_frame()? {
//!     println!("{:?} {:?}", command.command_type, command.bounding_box);
//! }
//! ```

mod engine;

pub use engine::Llay;

pub use llay_core::*;
pub use llay_layout::{LayoutNode, LayoutNodeId, LayoutTree, MeasureText, MonospaceMeasure};
pub use llay_render::{
    golden, BorderData, RectangleData, RenderCommand, RenderCommandType, RenderData, TextData,
};
