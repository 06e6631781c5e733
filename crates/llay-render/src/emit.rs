//! Render command emission from a positioned layout tree.

use llay_layout::{LayoutNodeId, LayoutTree};

use crate::commands::{BorderData, RectangleData, RenderCommand, TextData};

/// Walk the tree depth-first and emit commands in painter's order.
///
/// Per element: a rectangle when it has a visible background or rounded
/// corners, a border when any side has width, the text of text elements,
/// and clip markers around the children of clipping elements.
pub fn emit_commands(tree: &LayoutTree) -> Vec<RenderCommand> {
    let mut emitter = CommandEmitter {
        commands: Vec::with_capacity(tree.len()),
        tree,
    };

    if let Some(root) = tree.root() {
        emitter.emit_node(root);
    }

    tracing::trace!("Emitted {} render commands", emitter.commands.len());
    emitter.commands
}

struct CommandEmitter<'a> {
    commands: Vec<RenderCommand>,
    tree: &'a LayoutTree,
}

impl<'a> CommandEmitter<'a> {
    fn emit_node(&mut self, handle: LayoutNodeId) {
        let tree = self.tree;
        let Some(node) = tree.get(handle) else {
            return;
        };
        let decl = &node.declaration;
        let bounds = node.bounds;

        if !decl.background_color.is_transparent() || !decl.corner_radius.is_zero() {
            self.commands.push(RenderCommand::rectangle(
                node.id,
                bounds,
                RectangleData {
                    color: decl.background_color,
                    corner_radius: decl.corner_radius,
                },
            ));
        }

        if decl.border.is_visible() {
            self.commands.push(RenderCommand::border(
                node.id,
                bounds,
                BorderData {
                    color: decl.border.color,
                    width: decl.border.width,
                    corner_radius: decl.corner_radius,
                },
            ));
        }

        if let Some(text) = &node.text {
            self.commands.push(RenderCommand::text(
                node.id,
                bounds,
                TextData {
                    text: text.text.clone(),
                    config: text.config,
                },
            ));
        }

        let clips = decl.clip.is_enabled();
        if clips {
            self.commands.push(RenderCommand::clip_start(node.id, bounds));
        }

        for &child in &node.children {
            self.emit_node(child);
        }

        if clips {
            self.commands.push(RenderCommand::clip_end(node.id, bounds));
        }
    }
}
