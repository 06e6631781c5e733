//! Layout computation for llay frames.
//!
//! This crate turns a sequence of open/close calls into a sized and
//! positioned element tree.
//!
//! # Architecture
//!
//! 1. **Building**: [`LayoutContext`] keeps the stack of open elements and
//!    materializes them into a frame-scoped [`LayoutTree`]
//! 2. **Sizing**: a bottom-up fit pass and a top-down distribution pass per
//!    axis, width before height
//! 3. **Positioning**: absolute origins from padding, gaps and alignment
//!
//! # Example
//!
//! ```ignore
//! use llay_core::{ElementDeclaration, Sizing, TextConfig};
//! use llay_layout::{LayoutContext, MonospaceMeasure};
//!
//! let mut ctx = LayoutContext::default().with_measure_text(MonospaceMeasure::default());
//! ctx.begin_frame()?;
//! ctx.open(ElementDeclaration::new().with_sizing(Sizing::grow()))?;
//! ctx.text("Hello", TextConfig::default())?;
//! ctx.close()?;
//! for node in ctx.end_frame()?.nodes() {
//!     println!("{}: {:?}", node.id, node.bounds);
//! }
//! ```

mod context;
mod position;
mod sizing;
mod text;
mod tree;

pub use context::{ErrorHandler, LayoutContext};
pub use position::resolve_positions;
pub use sizing::resolve_sizes;
pub use text::{MeasureText, MonospaceMeasure};
pub use tree::{LayoutNode, LayoutNodeId, LayoutTree, TextElement};
