//! Frame-scoped element tree.
//!
//! Nodes live in a flat arena indexed by position. Every frame bumps the
//! tree's generation, which invalidates all handles from earlier frames
//! without any per-node teardown.

use glam::Vec2;
use indexmap::IndexMap;
use smallvec::SmallVec;

use llay_core::{
    Axis, BoundingBox, Dimensions, ElementDeclaration, ElementId, LlayError, SizingAxis,
    TextConfig,
};

/// Handle to a node, valid only within the frame that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutNodeId {
    index: u32,
    generation: u32,
}

impl LayoutNodeId {
    /// Position of the node in the arena.
    pub fn index(&self) -> usize {
        self.index as usize
    }

    /// Frame generation the handle belongs to.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Text payload of a leaf text element.
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub text: String,
    pub config: TextConfig,
    /// Measured size: unwrapped width, and height at the resolved width
    pub measured: Dimensions,
    /// Narrowest width the text can be wrapped to
    pub min_width: f32,
}

/// A node in the layout tree.
#[derive(Debug, Clone)]
pub struct LayoutNode {
    pub id: ElementId,
    pub declaration: ElementDeclaration,
    /// Present on leaf text elements only
    pub text: Option<TextElement>,
    pub parent: Option<LayoutNodeId>,
    /// Children in declaration order
    pub children: SmallVec<[LayoutNodeId; 4]>,
    /// Resolved size
    pub dimensions: Dimensions,
    /// Smallest size the node can be compressed to
    pub min_dimensions: Dimensions,
    /// Absolute bounds, in the root's coordinate space
    pub bounds: BoundingBox,
}

impl LayoutNode {
    /// Create a container node.
    pub fn new(id: ElementId, declaration: ElementDeclaration) -> Self {
        Self {
            id,
            declaration,
            text: None,
            parent: None,
            children: SmallVec::new(),
            dimensions: Dimensions::ZERO,
            min_dimensions: Dimensions::ZERO,
            bounds: BoundingBox::default(),
        }
    }

    /// Create a leaf text node.
    pub fn text(id: ElementId, text: String, config: TextConfig) -> Self {
        let mut node = Self::new(id, ElementDeclaration::default());
        node.text = Some(TextElement {
            text,
            config,
            measured: Dimensions::ZERO,
            min_width: 0.0,
        });
        node
    }

    pub fn is_text(&self) -> bool {
        self.text.is_some()
    }

    pub fn sizing(&self, axis: Axis) -> SizingAxis {
        self.declaration.layout.sizing.along(axis)
    }

    pub fn origin(&self) -> Vec2 {
        self.bounds.origin()
    }
}

/// The element tree of one frame.
#[derive(Debug, Clone, Default)]
pub struct LayoutTree {
    nodes: Vec<LayoutNode>,
    root: Option<LayoutNodeId>,
    generation: u32,
    /// Element id to node, for duplicate detection and lookups
    ids: IndexMap<ElementId, LayoutNodeId>,
}

impl LayoutTree {
    /// Create an empty layout tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every node and start a new generation. Storage is kept.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.ids.clear();
        self.root = None;
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The root container, once one has been inserted.
    pub fn root(&self) -> Option<LayoutNodeId> {
        self.root
    }

    /// Insert a node as the last child of `parent`, or as the root.
    ///
    /// Fails with `DuplicateId` when the node's id is already taken this frame.
    pub fn insert(
        &mut self,
        parent: Option<LayoutNodeId>,
        mut node: LayoutNode,
    ) -> Result<LayoutNodeId, LlayError> {
        if self.ids.contains_key(&node.id) {
            return Err(LlayError::DuplicateId {
                id: node.id,
                label: node.declaration.id.clone(),
            });
        }

        let handle = LayoutNodeId {
            index: self.nodes.len() as u32,
            generation: self.generation,
        };
        node.parent = parent;
        self.ids.insert(node.id, handle);
        self.nodes.push(node);

        match parent.and_then(|p| self.get_mut(p)) {
            Some(parent) => parent.children.push(handle),
            None => {
                if self.root.is_none() {
                    self.root = Some(handle);
                }
            }
        }
        Ok(handle)
    }

    /// Get a node by handle. Handles from other frames resolve to `None`.
    pub fn get(&self, handle: LayoutNodeId) -> Option<&LayoutNode> {
        if handle.generation != self.generation {
            return None;
        }
        self.nodes.get(handle.index())
    }

    /// Get a mutable node by handle.
    pub fn get_mut(&mut self, handle: LayoutNodeId) -> Option<&mut LayoutNode> {
        if handle.generation != self.generation {
            return None;
        }
        self.nodes.get_mut(handle.index())
    }

    /// Get a node by element id.
    pub fn find(&self, id: ElementId) -> Option<&LayoutNode> {
        self.ids.get(&id).and_then(|&handle| self.get(handle))
    }

    /// Handle of the element with the given id.
    pub fn handle_of(&self, id: ElementId) -> Option<LayoutNodeId> {
        self.ids.get(&id).copied()
    }

    /// Iterate over all nodes in creation order (which is pre-order).
    pub fn nodes(&self) -> impl Iterator<Item = &LayoutNode> {
        self.nodes.iter()
    }

    /// Get children of a node.
    pub fn children(&self, handle: LayoutNodeId) -> impl Iterator<Item = &LayoutNode> {
        self.get(handle)
            .into_iter()
            .flat_map(|n| n.children.iter())
            .filter_map(|&child| self.get(child))
    }

    /// Arena indices in depth-first pre-order, starting at the root.
    pub(crate) fn pre_order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<usize> = self.root.map(|r| r.index()).into_iter().collect();
        while let Some(index) = stack.pop() {
            order.push(index);
            stack.extend(self.nodes[index].children.iter().rev().map(|c| c.index()));
        }
        order
    }

    pub(crate) fn at(&self, index: usize) -> &LayoutNode {
        &self.nodes[index]
    }

    pub(crate) fn at_mut(&mut self, index: usize) -> &mut LayoutNode {
        &mut self.nodes[index]
    }

    /// Arena indices of a node's children.
    pub(crate) fn child_indices(&self, index: usize) -> SmallVec<[usize; 8]> {
        self.nodes[index].children.iter().map(|c| c.index()).collect()
    }
}
