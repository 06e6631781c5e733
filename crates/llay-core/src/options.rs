//! Engine configuration.

use crate::errors::ConfigError;
use crate::types::Dimensions;

/// What happens to a frame that exceeds a capacity limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CapacityPolicy {
    /// Report the error and discard the frame
    #[default]
    Discard,
    /// Report the error, drop the excess elements or text and keep going
    Truncate,
}

/// Rounding applied to the equal share each GROW child receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShareRounding {
    /// Shares are exact float divisions
    #[default]
    Fractional,
    /// Shares are floored to whole pixels
    WholePixels,
}

/// Handling of children that overflow their parent along the main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverflowPolicy {
    /// Shrink non-FIXED children proportionally down to their minimums
    #[default]
    Proportional,
    /// Leave children at their sizes and let them overflow
    Overflow,
}

/// Space distribution policy points of the sizing resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistributionPolicy {
    pub rounding: ShareRounding,
    pub overflow: OverflowPolicy,
}

/// Options for a layout context.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutOptions {
    /// Size of the root container
    pub viewport: Dimensions,
    /// Maximum number of elements per frame, root container included
    pub max_element_count: usize,
    /// Maximum length of a single text element in bytes
    pub max_text_length: usize,
    pub capacity_policy: CapacityPolicy,
    pub distribution: DistributionPolicy,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            viewport: Dimensions::new(800.0, 600.0),
            max_element_count: 8192,
            max_text_length: 16384,
            capacity_policy: CapacityPolicy::default(),
            distribution: DistributionPolicy::default(),
        }
    }
}

impl LayoutOptions {
    pub fn with_viewport(mut self, viewport: impl Into<Dimensions>) -> Self {
        self.viewport = viewport.into();
        self
    }

    pub fn with_max_element_count(mut self, count: usize) -> Self {
        self.max_element_count = count;
        self
    }

    pub fn with_max_text_length(mut self, length: usize) -> Self {
        self.max_text_length = length;
        self
    }

    pub fn with_capacity_policy(mut self, policy: CapacityPolicy) -> Self {
        self.capacity_policy = policy;
        self
    }

    pub fn with_distribution(mut self, distribution: DistributionPolicy) -> Self {
        self.distribution = distribution;
        self
    }
}

/// Check that a viewport has finite, non-negative extents.
pub fn validate_viewport(viewport: Dimensions) -> Result<(), ConfigError> {
    let valid = |v: f32| v.is_finite() && v >= 0.0;
    if valid(viewport.width) && valid(viewport.height) {
        Ok(())
    } else {
        Err(ConfigError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        })
    }
}
