//! Render command model.

use llay_core::{BorderWidth, BoundingBox, Color, CornerRadius, ElementId, TextConfig};

/// Kind of a render command. Discriminants are the stable numeric tags
/// written to golden dumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum RenderCommandType {
    Rectangle = 1,
    Border = 2,
    Text = 3,
    ClipStart = 5,
    ClipEnd = 6,
}

impl RenderCommandType {
    pub fn tag(self) -> u8 {
        self as u8
    }
}

/// A filled, optionally rounded rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RectangleData {
    pub color: Color,
    pub corner_radius: CornerRadius,
}

/// A border drawn inside the bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BorderData {
    pub color: Color,
    pub width: BorderWidth,
    pub corner_radius: CornerRadius,
}

/// A run of text with its font attributes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextData {
    pub text: String,
    pub config: TextConfig,
}

/// Type-specific payload of a render command.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderData {
    Rectangle(RectangleData),
    Border(BorderData),
    Text(TextData),
    /// Clip start and end carry no payload; the clip rect is the bounding box
    Clip,
}

/// A single draw instruction with absolute bounds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderCommand {
    pub id: ElementId,
    pub command_type: RenderCommandType,
    pub bounding_box: BoundingBox,
    pub data: RenderData,
}

impl RenderCommand {
    pub fn rectangle(id: ElementId, bounding_box: BoundingBox, data: RectangleData) -> Self {
        Self {
            id,
            command_type: RenderCommandType::Rectangle,
            bounding_box,
            data: RenderData::Rectangle(data),
        }
    }

    pub fn border(id: ElementId, bounding_box: BoundingBox, data: BorderData) -> Self {
        Self {
            id,
            command_type: RenderCommandType::Border,
            bounding_box,
            data: RenderData::Border(data),
        }
    }

    pub fn text(id: ElementId, bounding_box: BoundingBox, data: TextData) -> Self {
        Self {
            id,
            command_type: RenderCommandType::Text,
            bounding_box,
            data: RenderData::Text(data),
        }
    }

    pub fn clip_start(id: ElementId, bounding_box: BoundingBox) -> Self {
        Self {
            id,
            command_type: RenderCommandType::ClipStart,
            bounding_box,
            data: RenderData::Clip,
        }
    }

    pub fn clip_end(id: ElementId, bounding_box: BoundingBox) -> Self {
        Self {
            id,
            command_type: RenderCommandType::ClipEnd,
            bounding_box,
            data: RenderData::Clip,
        }
    }
}
