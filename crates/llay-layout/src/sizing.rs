//! Two-pass sizing resolver.
//!
//! Each axis is solved completely before the other, width first, so that
//! wrapping text can be measured against its resolved width before heights
//! are computed.
//!
//! 1. **Fit pass** (post-order): every node's size and minimum size from its
//!    content, clamped by its own sizing rule.
//! 2. **Distribution pass** (pre-order): each container hands its content box
//!    to its children, resolving PERCENT children, growing GROW children into
//!    leftover space, or compressing children that overflow.
//!
//! Sums are always taken over children left to right, then padding is
//! added, then gaps, so that results are bit-reproducible.

use smallvec::SmallVec;

use llay_core::{
    Axis, DistributionPolicy, MinMax, OverflowPolicy, ShareRounding, SizingAxis, TextWrapMode,
};

use crate::text::{widest_word, MeasureText};
use crate::tree::LayoutTree;

/// Resolve the size of every node in the tree.
pub fn resolve_sizes(
    tree: &mut LayoutTree,
    measurer: Option<&dyn MeasureText>,
    policy: DistributionPolicy,
) {
    let order = tree.pre_order();

    measure_text(tree, &order, measurer);
    fit_pass(tree, &order, Axis::X);
    distribute_pass(tree, &order, Axis::X, policy);

    wrap_text(tree, &order, measurer);
    fit_pass(tree, &order, Axis::Y);
    distribute_pass(tree, &order, Axis::Y, policy);
}

/// Unwrapped size and narrowest width of every text element.
fn measure_text(tree: &mut LayoutTree, order: &[usize], measurer: Option<&dyn MeasureText>) {
    let Some(measurer) = measurer else {
        return;
    };
    for &index in order {
        let Some(text) = tree.at_mut(index).text.as_mut() else {
            continue;
        };
        text.measured = measurer.measure(&text.text, &text.config, None);
        text.min_width = match text.config.wrap_mode {
            TextWrapMode::Words => widest_word(measurer, &text.text, &text.config),
            TextWrapMode::Newlines | TextWrapMode::None => text.measured.width,
        };
    }
}

/// Re-measure the height of word-wrapping text at its resolved width.
fn wrap_text(tree: &mut LayoutTree, order: &[usize], measurer: Option<&dyn MeasureText>) {
    let Some(measurer) = measurer else {
        return;
    };
    for &index in order {
        let node = tree.at_mut(index);
        let width = node.dimensions.width;
        let Some(text) = node.text.as_mut() else {
            continue;
        };
        if text.config.wrap_mode == TextWrapMode::Words {
            text.measured.height = measurer.measure(&text.text, &text.config, Some(width)).height;
        }
    }
}

/// Bottom-up: size each node to its content on `axis`.
fn fit_pass(tree: &mut LayoutTree, order: &[usize], axis: Axis) {
    for &index in order.iter().rev() {
        let node = tree.at(index);

        if let Some(text) = &node.text {
            let (size, min) = match axis {
                Axis::X => (text.measured.width, text.min_width),
                Axis::Y => (text.measured.height, text.measured.height),
            };
            let node = tree.at_mut(index);
            *node.dimensions.along_mut(axis) = size;
            *node.min_dimensions.along_mut(axis) = min;
            continue;
        }

        let layout = node.declaration.layout;
        let along_main = layout.direction.main_axis() == axis;
        let children = tree.child_indices(index);

        let mut content = 0.0_f32;
        let mut min_content = 0.0_f32;
        for &child in &children {
            let child = tree.at(child);
            // Percent children are sized from the parent, not the other way round.
            if child.sizing(axis).is_percent() {
                continue;
            }
            let size = child.dimensions.along(axis);
            let min = child.min_dimensions.along(axis);
            if along_main {
                content += size;
                min_content += min;
            } else {
                content = content.max(size);
                min_content = min_content.max(min);
            }
        }

        let padding = layout.padding.total(axis);
        content += padding;
        min_content += padding;
        if along_main {
            content += layout.total_gap(children.len());
            min_content += layout.total_gap(children.len());
        }

        let (size, min) = match node.sizing(axis) {
            SizingAxis::Fixed(bounds) => {
                let size = bounds.clamp(content);
                (size, size)
            }
            SizingAxis::Fit(bounds) | SizingAxis::Grow(bounds) => {
                (bounds.clamp(content), bounds.clamp(min_content))
            }
            SizingAxis::Percent(_) => (content, min_content),
        };

        let node = tree.at_mut(index);
        *node.dimensions.along_mut(axis) = size;
        *node.min_dimensions.along_mut(axis) = min;
    }
}

/// Top-down: hand each container's content box to its children on `axis`.
fn distribute_pass(tree: &mut LayoutTree, order: &[usize], axis: Axis, policy: DistributionPolicy) {
    for &index in order {
        let node = tree.at(index);
        if node.children.is_empty() {
            continue;
        }

        let layout = node.declaration.layout;
        let clips = node.declaration.clip.clips(axis);
        let size = node.dimensions.along(axis);
        let padding = layout.padding.total(axis);
        let content_box = size - padding;
        let children = tree.child_indices(index);

        if layout.direction.main_axis() != axis {
            size_cross_axis(tree, &children, axis, content_box, clips);
            continue;
        }

        for &child in &children {
            let node = tree.at_mut(child);
            if let SizingAxis::Percent(fraction) = node.sizing(axis) {
                let min = node.min_dimensions.along(axis);
                *node.dimensions.along_mut(axis) = (fraction * content_box).max(min);
            }
        }

        let gaps = layout.total_gap(children.len());
        let remaining = size - occupied(tree, &children, axis, padding, gaps);

        if remaining > 0.0 {
            let growable: SmallVec<[usize; 8]> = children
                .iter()
                .copied()
                .filter(|&child| tree.at(child).sizing(axis).is_grow())
                .collect();
            let last = grow_children(tree, &growable, axis, remaining, policy.rounding);
            if let Some(last) = last {
                let filled = Filled {
                    children: &children,
                    axis,
                    padding,
                    gaps,
                };
                filled.settle(tree, last, size);
            }
        } else if remaining < 0.0 && policy.overflow == OverflowPolicy::Proportional && !clips {
            let shrinkable: SmallVec<[usize; 8]> = children
                .iter()
                .copied()
                .filter(|&child| !tree.at(child).sizing(axis).is_fixed())
                .collect();
            shrink_children(tree, &shrinkable, axis, -remaining);
        }
    }
}

fn size_cross_axis(tree: &mut LayoutTree, children: &[usize], axis: Axis, content_box: f32, clips: bool) {
    for &child in children {
        let node = tree.at_mut(child);
        let min = node.min_dimensions.along(axis);
        let current = node.dimensions.along(axis);
        let resolved = match node.sizing(axis) {
            SizingAxis::Fixed(_) => current,
            SizingAxis::Grow(bounds) => bounds.clamp(content_box).max(min),
            SizingAxis::Percent(fraction) => (fraction * content_box).max(min),
            SizingAxis::Fit(_) if clips => current,
            SizingAxis::Fit(_) => current.min(content_box).max(min),
        };
        *node.dimensions.along_mut(axis) = resolved;
    }
}

/// Sum of the children's sizes left to right, then padding, then gaps.
fn occupied(tree: &LayoutTree, children: &[usize], axis: Axis, padding: f32, gaps: f32) -> f32 {
    let used: f32 = children
        .iter()
        .map(|&child| tree.at(child).dimensions.along(axis))
        .sum();
    used + padding + gaps
}

/// A container whose GROW children absorb all of its free space.
struct Filled<'a> {
    children: &'a [usize],
    axis: Axis,
    padding: f32,
    gaps: f32,
}

impl Filled<'_> {
    fn total_with(&self, tree: &mut LayoutTree, child: usize, value: f32) -> f32 {
        *tree.at_mut(child).dimensions.along_mut(self.axis) = value;
        occupied(tree, self.children, self.axis, self.padding, self.gaps)
    }

    /// Adjust the remainder child until the occupied total equals `size`
    /// exactly, as summed in float. The total only grows with the child's
    /// size, so the exact value is found by bisection between two sizes
    /// that bracket it.
    fn settle(&self, tree: &mut LayoutTree, child: usize, size: f32) {
        let start = tree.at(child).dimensions.along(self.axis);
        let total = self.total_with(tree, child, start);
        if total == size {
            return;
        }

        let up = total < size;
        let mut step = size - total;
        let (mut lo, mut hi) = (start, start);
        let mut edge = start;
        let mut bracketed = false;
        for _ in 0..64 {
            edge = (edge + step).max(0.0);
            let total = self.total_with(tree, child, edge);
            if total == size {
                return;
            }
            if total < size {
                lo = edge;
            } else {
                hi = edge;
            }
            if (total < size) != up {
                bracketed = true;
                break;
            }
            if edge == 0.0 {
                break;
            }
            step *= 2.0;
        }
        if !bracketed {
            self.total_with(tree, child, edge);
            return;
        }

        for _ in 0..64 {
            let mid = lo + (hi - lo) / 2.0;
            if mid <= lo || mid >= hi {
                break;
            }
            let total = self.total_with(tree, child, mid);
            if total == size {
                return;
            }
            if total < size {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        // No float value lands exactly; keep the closer end.
        let below = size - self.total_with(tree, child, lo);
        let above = self.total_with(tree, child, hi) - size;
        let value = if below <= above { lo } else { hi };
        self.total_with(tree, child, value);
    }
}

/// Share `extra` space among GROW children.
///
/// The space the children share is their current sizes plus `extra`. Each
/// gets an equal share; a child whose own content needs more than the share
/// keeps its size, and one whose maximum is below the share stops at its
/// maximum, after which the share is recomputed for the rest. The last
/// unpinned child takes whatever remains and is returned; `None` when every
/// child was pinned.
fn grow_children(
    tree: &mut LayoutTree,
    growable: &[usize],
    axis: Axis,
    extra: f32,
    rounding: ShareRounding,
) -> Option<usize> {
    let mut space: f32 = growable
        .iter()
        .map(|&child| tree.at(child).dimensions.along(axis))
        .sum::<f32>()
        + extra;

    let mut active: SmallVec<[(usize, f32, MinMax); 8]> = growable
        .iter()
        .map(|&child| {
            let node = tree.at(child);
            (child, node.dimensions.along(axis), node.sizing(axis).bounds())
        })
        .collect();

    while !active.is_empty() {
        let share = equal_share(space, active.len(), rounding);

        let before = active.len();
        active.retain(|&mut (child, floor, _)| {
            if floor > share {
                *tree.at_mut(child).dimensions.along_mut(axis) = floor;
                space -= floor;
                false
            } else {
                true
            }
        });
        if active.len() != before {
            continue;
        }

        active.retain(|&mut (child, _, bounds)| {
            if bounds.max < share {
                *tree.at_mut(child).dimensions.along_mut(axis) = bounds.max;
                space -= bounds.max;
                false
            } else {
                true
            }
        });
        if active.len() != before {
            continue;
        }

        let (last, rest) = active.split_last()?;
        for &(child, _, _) in rest {
            *tree.at_mut(child).dimensions.along_mut(axis) = share;
            space -= share;
        }
        *tree.at_mut(last.0).dimensions.along_mut(axis) = space;
        return Some(last.0);
    }
    None
}

fn equal_share(space: f32, count: usize, rounding: ShareRounding) -> f32 {
    let share = space / count as f32;
    match rounding {
        ShareRounding::Fractional => share,
        ShareRounding::WholePixels => share.floor(),
    }
}

/// Take `deficit` away from children in proportion to their sizes, never
/// below a child's minimum.
fn shrink_children(tree: &mut LayoutTree, shrinkable: &[usize], axis: Axis, mut deficit: f32) {
    let mut active: SmallVec<[usize; 8]> = shrinkable
        .iter()
        .copied()
        .filter(|&child| {
            let node = tree.at(child);
            node.dimensions.along(axis) > node.min_dimensions.along(axis)
        })
        .collect();

    while deficit > 0.0 && !active.is_empty() {
        let total: f32 = active
            .iter()
            .map(|&child| tree.at(child).dimensions.along(axis))
            .sum();
        if total <= 0.0 {
            break;
        }

        let step = deficit;
        let before = active.len();
        active.retain(|&mut child| {
            let node = tree.at_mut(child);
            let size = node.dimensions.along(axis);
            let min = node.min_dimensions.along(axis);
            if size - step * size / total < min {
                deficit -= size - min;
                *node.dimensions.along_mut(axis) = min;
                false
            } else {
                true
            }
        });
        if active.len() != before {
            continue;
        }

        for &child in &active {
            let size = tree.at(child).dimensions.along(axis);
            *tree.at_mut(child).dimensions.along_mut(axis) = size - deficit * size / total;
        }
        break;
    }
}
