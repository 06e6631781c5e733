//! The per-element configuration surface handed to the builder.

use glam::Vec2;

use crate::errors::ConfigError;
use crate::layout::{ChildAlignment, LayoutConfig, LayoutDirection, Sizing};
use crate::types::{Axis, BorderWidth, Color, CornerRadius, Padding};

/// Border widths and color.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BorderConfig {
    pub color: Color,
    pub width: BorderWidth,
}

impl BorderConfig {
    pub const fn new(width: BorderWidth, color: Color) -> Self {
        Self { color, width }
    }

    /// Whether any side would be drawn.
    pub fn is_visible(&self) -> bool {
        !self.width.is_zero()
    }
}

/// Clipping of children to the element's box, with a scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClipConfig {
    pub horizontal: bool,
    pub vertical: bool,
    /// Offset applied to every child's position (scroll position)
    pub child_offset: Vec2,
}

impl ClipConfig {
    pub fn is_enabled(&self) -> bool {
        self.horizontal || self.vertical
    }

    pub fn clips(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.horizontal,
            Axis::Y => self.vertical,
        }
    }
}

/// Declaration of a container element.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementDeclaration {
    /// Explicit label hashed into the element id; anonymous when `None`
    pub id: Option<String>,
    pub layout: LayoutConfig,
    pub background_color: Color,
    pub corner_radius: CornerRadius,
    pub border: BorderConfig,
    pub clip: ClipConfig,
}

impl ElementDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the element's label.
    pub fn with_id(mut self, label: impl Into<String>) -> Self {
        self.id = Some(label.into());
        self
    }

    pub fn with_sizing(mut self, sizing: Sizing) -> Self {
        self.layout.sizing = sizing;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.layout.padding = padding;
        self
    }

    pub fn with_child_gap(mut self, gap: u16) -> Self {
        self.layout.child_gap = gap;
        self
    }

    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.layout.direction = direction;
        self
    }

    pub fn with_alignment(mut self, alignment: ChildAlignment) -> Self {
        self.layout.child_alignment = alignment;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_corner_radius(mut self, radius: impl Into<CornerRadius>) -> Self {
        self.corner_radius = radius.into();
        self
    }

    pub fn with_border(mut self, border: BorderConfig) -> Self {
        self.border = border;
        self
    }

    pub fn with_clip(mut self, clip: ClipConfig) -> Self {
        self.clip = clip;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()
    }
}

/// How text breaks into lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextWrapMode {
    /// Break at whitespace when the text is wider than its box
    #[default]
    Words,
    /// Break only at explicit newlines
    Newlines,
    /// Never break
    None,
}

/// Font attributes of a text element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextConfig {
    pub text_color: Color,
    pub font_id: u16,
    pub font_size: u16,
    pub letter_spacing: u16,
    /// Line height in pixels; zero means the measured height
    pub line_height: u16,
    pub wrap_mode: TextWrapMode,
}

impl TextConfig {
    pub fn new(font_id: u16, font_size: u16) -> Self {
        Self {
            font_id,
            font_size,
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn with_line_height(mut self, line_height: u16) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn with_wrap_mode(mut self, wrap_mode: TextWrapMode) -> Self {
        self.wrap_mode = wrap_mode;
        self
    }
}
