//! Final positioning pass.
//!
//! Runs after sizing, top-down. Each container places its children one after
//! another along its main axis and aligns them on the cross axis, offset by
//! its padding, its child alignment and, for clipping containers, its scroll
//! offset.

use glam::Vec2;

use llay_core::{Axis, BoundingBox};

use crate::tree::LayoutTree;

/// Compute the absolute bounds of every node. The root sits at the origin.
pub fn resolve_positions(tree: &mut LayoutTree) {
    let order = tree.pre_order();
    let Some(&root) = order.first() else {
        return;
    };

    let node = tree.at_mut(root);
    node.bounds = BoundingBox::from_origin(Vec2::ZERO, node.dimensions);

    for &index in &order {
        position_children(tree, index);
    }
}

fn position_children(tree: &mut LayoutTree, index: usize) {
    let node = tree.at(index);
    if node.children.is_empty() {
        return;
    }

    let layout = node.declaration.layout;
    let origin = node.origin();
    let size = node.dimensions;
    let offset = node.declaration.clip.child_offset;
    let main = layout.direction.main_axis();
    let cross = main.other();
    let children = tree.child_indices(index);

    let used: f32 = children
        .iter()
        .map(|&child| tree.at(child).dimensions.along(main))
        .sum();
    let content_main = size.along(main) - layout.padding.total(main);
    let content_cross = size.along(cross) - layout.padding.total(cross);
    let free = (content_main - used - layout.total_gap(children.len())).max(0.0);

    let mut cursor = along(origin, main)
        + layout.padding.leading(main)
        + layout.child_alignment.along(main).offset(free, 0.0)
        + along(offset, main);

    for &child in &children {
        let child = tree.at_mut(child);
        let extent = child.dimensions.along(cross);
        let cross_position = along(origin, cross)
            + layout.padding.leading(cross)
            + layout.child_alignment.along(cross).offset(content_cross, extent)
            + along(offset, cross);

        let position = match main {
            Axis::X => Vec2::new(cursor, cross_position),
            Axis::Y => Vec2::new(cross_position, cursor),
        };
        child.bounds = BoundingBox::from_origin(position, child.dimensions);
        cursor += child.dimensions.along(main) + layout.gap();
    }
}

fn along(v: Vec2, axis: Axis) -> f32 {
    match axis {
        Axis::X => v.x,
        Axis::Y => v.y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizing::resolve_sizes;
    use crate::tree::{LayoutNode, LayoutNodeId};
    use llay_core::{
        Alignment, ChildAlignment, ClipConfig, DistributionPolicy, ElementDeclaration, ElementId,
        LayoutDirection, Padding, Sizing,
    };

    fn build(parent_decl: ElementDeclaration, child_sizes: &[(f32, f32)]) -> (LayoutTree, Vec<LayoutNodeId>) {
        let mut tree = LayoutTree::new();
        let root = tree
            .insert(
                None,
                LayoutNode::new(
                    ElementId::root(),
                    ElementDeclaration::new().with_sizing(Sizing::fixed(800.0, 600.0)),
                ),
            )
            .unwrap();
        let parent = tree
            .insert(Some(root), LayoutNode::new(ElementId::from_label("parent"), parent_decl))
            .unwrap();
        let children = child_sizes
            .iter()
            .enumerate()
            .map(|(i, &(w, h))| {
                let decl = ElementDeclaration::new().with_sizing(Sizing::fixed(w, h));
                tree.insert(Some(parent), LayoutNode::new(ElementId::indexed("child", i as u32), decl))
                    .unwrap()
            })
            .collect();
        resolve_sizes(&mut tree, None, DistributionPolicy::default());
        resolve_positions(&mut tree);
        (tree, children)
    }

    fn origin(tree: &LayoutTree, node: LayoutNodeId) -> (f32, f32) {
        let bounds = tree.get(node).unwrap().bounds;
        (bounds.x, bounds.y)
    }

    #[test]
    fn test_row_with_padding_and_gap() {
        let decl = ElementDeclaration::new()
            .with_padding(Padding::all(16))
            .with_child_gap(16);
        let (tree, children) = build(decl, &[(100.0, 50.0), (200.0, 50.0)]);

        assert_eq!(origin(&tree, children[0]), (16.0, 16.0));
        assert_eq!(origin(&tree, children[1]), (132.0, 16.0));
    }

    #[test]
    fn test_column_stacks_vertically() {
        let decl = ElementDeclaration::new()
            .with_direction(LayoutDirection::TopToBottom)
            .with_child_gap(4);
        let (tree, children) = build(decl, &[(10.0, 20.0), (10.0, 30.0), (10.0, 5.0)]);

        assert_eq!(origin(&tree, children[1]), (0.0, 24.0));
        assert_eq!(origin(&tree, children[2]), (0.0, 58.0));
    }

    #[test]
    fn test_center_alignment() {
        let decl = ElementDeclaration::new()
            .with_sizing(Sizing::fixed(200.0, 100.0))
            .with_alignment(ChildAlignment::center());
        let (tree, children) = build(decl, &[(50.0, 20.0)]);

        assert_eq!(origin(&tree, children[0]), (75.0, 40.0));
    }

    #[test]
    fn test_end_alignment_respects_padding() {
        let decl = ElementDeclaration::new()
            .with_sizing(Sizing::fixed(200.0, 100.0))
            .with_padding(Padding::all(10))
            .with_alignment(ChildAlignment::new(Alignment::End, Alignment::End));
        let (tree, children) = build(decl, &[(50.0, 20.0)]);

        assert_eq!(origin(&tree, children[0]), (140.0, 70.0));
    }

    #[test]
    fn test_overflowing_children_start_at_padding() {
        let decl = ElementDeclaration::new()
            .with_sizing(Sizing::fixed(100.0, 100.0))
            .with_alignment(ChildAlignment::new(Alignment::End, Alignment::Start));
        let (tree, children) = build(decl, &[(80.0, 10.0), (80.0, 10.0)]);

        assert_eq!(origin(&tree, children[0]), (0.0, 0.0));
        assert_eq!(origin(&tree, children[1]), (80.0, 0.0));
    }

    #[test]
    fn test_clip_offset_shifts_children() {
        let decl = ElementDeclaration::new()
            .with_sizing(Sizing::fixed(100.0, 100.0))
            .with_clip(ClipConfig {
                vertical: true,
                child_offset: Vec2::new(0.0, -30.0),
                ..Default::default()
            });
        let (tree, children) = build(decl, &[(50.0, 200.0)]);

        assert_eq!(origin(&tree, children[0]), (0.0, -30.0));
        assert_eq!(tree.get(children[0]).unwrap().bounds.height, 200.0);
    }
}
