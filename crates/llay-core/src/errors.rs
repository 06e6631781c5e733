//! Error types for the llay engine.

use thiserror::Error;

use crate::id::ElementId;
use crate::types::Axis;

/// Top-level error type for the llay engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LlayError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Capacity(#[from] CapacityError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Duplicate element id {id}{}", label.as_ref().map(|l| format!(" (label {l:?})")).unwrap_or_default())]
    DuplicateId { id: ElementId, label: Option<String> },
}

/// Violations of the begin/open/close/end call protocol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("No frame is open; call begin_frame first")]
    NoOpenFrame,

    #[error("A frame is already open on this context")]
    FrameAlreadyOpen,

    #[error("close called with no open element")]
    UnmatchedClose,

    #[error("Frame ended with {count} unclosed element(s)")]
    UnclosedElements { count: usize },

    #[error("Text element {parent} cannot have children")]
    ChildOfTextElement { parent: ElementId },
}

/// Limits configured in `LayoutOptions` were exceeded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapacityError {
    #[error("Element count exceeded the configured maximum of {limit}")]
    ElementLimitExceeded { limit: usize },

    #[error("Text of {length} bytes exceeds the configured maximum of {limit}")]
    TextTooLong { length: usize, limit: usize },
}

/// Invalid declarations or engine setup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Text elements require a text measurement function")]
    MissingMeasureText,

    #[error("Negative {axis} bound: {value}")]
    NegativeBound { axis: Axis, value: f32 },

    #[error("Non-finite {axis} minimum: {value}")]
    NonFiniteBound { axis: Axis, value: f32 },

    #[error("Inverted {axis} bounds: min {min} is greater than max {max}")]
    InvertedBounds { axis: Axis, min: f32, max: f32 },

    #[error("Percent {axis} sizing must be between 0 and 1, got {value}")]
    InvalidPercent { axis: Axis, value: f32 },

    #[error("Invalid viewport {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
}
