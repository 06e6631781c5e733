//! Core types, declarations, and errors for the llay layout engine.
//!
//! This crate provides the vocabulary shared by the other llay crates:
//! - Geometry and paint values (colors, dimensions, bounding boxes, padding)
//! - Sizing rules and layout configuration
//! - Element declarations and text configuration
//! - Stable element ids
//! - Engine options and error types

pub mod declaration;
pub mod errors;
pub mod id;
pub mod layout;
pub mod options;
pub mod types;

pub use declaration::*;
pub use errors::*;
pub use id::*;
pub use layout::*;
pub use options::*;
pub use types::*;
