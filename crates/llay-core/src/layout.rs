//! Sizing rules and container layout configuration.

use crate::errors::ConfigError;
use crate::types::{Axis, Padding};

/// Lower and upper bound for a sizing rule.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MinMax {
    pub min: f32,
    pub max: f32,
}

impl MinMax {
    pub const UNBOUNDED: Self = Self { min: 0.0, max: f32::MAX };

    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamp `value` into `[min, max]`.
    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.min).min(self.max)
    }
}

impl Default for MinMax {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// How a node is sized along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizingAxis {
    /// Shrink to the content, clamped into the bounds.
    Fit(MinMax),
    /// Expand into leftover space, clamped into the bounds.
    Grow(MinMax),
    /// Content size clamped into the bounds; exact when `min == max`.
    /// Never grows or shrinks with its siblings.
    Fixed(MinMax),
    /// Fraction (0.0 to 1.0) of the parent's content box on this axis.
    Percent(f32),
}

impl Default for SizingAxis {
    fn default() -> Self {
        Self::Fit(MinMax::UNBOUNDED)
    }
}

impl SizingAxis {
    pub const fn fit() -> Self {
        Self::Fit(MinMax::UNBOUNDED)
    }

    pub const fn grow() -> Self {
        Self::Grow(MinMax::UNBOUNDED)
    }

    /// An exact size.
    pub const fn fixed(size: f32) -> Self {
        Self::Fixed(MinMax::new(size, size))
    }

    pub const fn percent(fraction: f32) -> Self {
        Self::Percent(fraction)
    }

    pub fn is_grow(&self) -> bool {
        matches!(self, Self::Grow(_))
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }

    pub fn is_percent(&self) -> bool {
        matches!(self, Self::Percent(_))
    }

    /// The bounds this rule clamps into. Percent sizing has none.
    pub fn bounds(&self) -> MinMax {
        match self {
            Self::Fit(bounds) | Self::Grow(bounds) | Self::Fixed(bounds) => *bounds,
            Self::Percent(_) => MinMax::UNBOUNDED,
        }
    }

    /// Reject negative, infinite-minimum or inverted bounds and out-of-range
    /// fractions.
    pub fn validate(&self, axis: Axis) -> Result<(), ConfigError> {
        match *self {
            Self::Fit(bounds) | Self::Grow(bounds) | Self::Fixed(bounds) => {
                for value in [bounds.min, bounds.max] {
                    if value.is_nan() || value < 0.0 {
                        return Err(ConfigError::NegativeBound { axis, value });
                    }
                }
                if !bounds.min.is_finite() {
                    return Err(ConfigError::NonFiniteBound { axis, value: bounds.min });
                }
                if bounds.max < bounds.min {
                    return Err(ConfigError::InvertedBounds {
                        axis,
                        min: bounds.min,
                        max: bounds.max,
                    });
                }
                Ok(())
            }
            Self::Percent(fraction) => {
                if (0.0..=1.0).contains(&fraction) {
                    Ok(())
                } else {
                    Err(ConfigError::InvalidPercent { axis, value: fraction })
                }
            }
        }
    }
}

/// Sizing rules for both axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sizing {
    pub width: SizingAxis,
    pub height: SizingAxis,
}

impl Sizing {
    pub const fn new(width: SizingAxis, height: SizingAxis) -> Self {
        Self { width, height }
    }

    /// Exact width and height.
    pub const fn fixed(width: f32, height: f32) -> Self {
        Self::new(SizingAxis::fixed(width), SizingAxis::fixed(height))
    }

    /// Grow on both axes.
    pub const fn grow() -> Self {
        Self::new(SizingAxis::grow(), SizingAxis::grow())
    }

    pub fn along(&self, axis: Axis) -> SizingAxis {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }
}

/// Direction children are laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutDirection {
    /// Row: width is the main axis
    #[default]
    LeftToRight,
    /// Column: height is the main axis
    TopToBottom,
}

impl LayoutDirection {
    pub fn main_axis(self) -> Axis {
        match self {
            Self::LeftToRight => Axis::X,
            Self::TopToBottom => Axis::Y,
        }
    }
}

/// Alignment of children within the content box on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    /// Left for x, top for y
    #[default]
    Start,
    Center,
    /// Right for x, bottom for y
    End,
}

impl Alignment {
    /// Offset of a box of `extent` inside `available` space.
    pub fn offset(self, available: f32, extent: f32) -> f32 {
        match self {
            Self::Start => 0.0,
            Self::Center => (available - extent) / 2.0,
            Self::End => available - extent,
        }
    }
}

/// Child alignment on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChildAlignment {
    pub x: Alignment,
    pub y: Alignment,
}

impl ChildAlignment {
    pub const fn new(x: Alignment, y: Alignment) -> Self {
        Self { x, y }
    }

    pub const fn center() -> Self {
        Self::new(Alignment::Center, Alignment::Center)
    }

    pub fn along(&self, axis: Axis) -> Alignment {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

/// Layout configuration of a container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutConfig {
    pub sizing: Sizing,
    pub padding: Padding,
    /// Space between consecutive children along the main axis
    pub child_gap: u16,
    pub child_alignment: ChildAlignment,
    pub direction: LayoutDirection,
}

impl LayoutConfig {
    /// Gap as a float, for arithmetic.
    pub fn gap(&self) -> f32 {
        self.child_gap as f32
    }

    /// Total gap space between `child_count` children.
    pub fn total_gap(&self, child_count: usize) -> f32 {
        child_count.saturating_sub(1) as f32 * self.gap()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sizing.width.validate(Axis::X)?;
        self.sizing.height.validate(Axis::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_is_exact() {
        let fixed = SizingAxis::fixed(120.0);
        assert_eq!(fixed.bounds().clamp(0.0), 120.0);
        assert_eq!(fixed.bounds().clamp(500.0), 120.0);
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let sizing = SizingAxis::Fixed(MinMax::new(50.0, 10.0));
        assert_eq!(
            sizing.validate(Axis::X),
            Err(ConfigError::InvertedBounds { axis: Axis::X, min: 50.0, max: 10.0 })
        );
    }

    #[test]
    fn test_validate_rejects_negative_bound() {
        let sizing = SizingAxis::Grow(MinMax::new(-1.0, 10.0));
        assert_eq!(
            sizing.validate(Axis::Y),
            Err(ConfigError::NegativeBound { axis: Axis::Y, value: -1.0 })
        );
    }

    #[test]
    fn test_validate_rejects_infinite_minimum() {
        let sizing = SizingAxis::Fit(MinMax::new(f32::INFINITY, f32::INFINITY));
        assert_eq!(
            sizing.validate(Axis::X),
            Err(ConfigError::NonFiniteBound { axis: Axis::X, value: f32::INFINITY })
        );
        assert!(SizingAxis::Grow(MinMax::new(0.0, f32::INFINITY)).validate(Axis::X).is_ok());
    }

    #[test]
    fn test_validate_percent_range() {
        assert!(SizingAxis::percent(0.5).validate(Axis::X).is_ok());
        assert!(SizingAxis::percent(1.5).validate(Axis::X).is_err());
    }

    #[test]
    fn test_alignment_offset() {
        assert_eq!(Alignment::Start.offset(800.0, 100.0), 0.0);
        assert_eq!(Alignment::Center.offset(800.0, 100.0), 350.0);
        assert_eq!(Alignment::End.offset(800.0, 100.0), 700.0);
    }

    #[test]
    fn test_total_gap() {
        let config = LayoutConfig { child_gap: 20, ..Default::default() };
        assert_eq!(config.total_gap(0), 0.0);
        assert_eq!(config.total_gap(1), 0.0);
        assert_eq!(config.total_gap(3), 40.0);
    }
}
