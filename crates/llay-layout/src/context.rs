//! Frame builder.
//!
//! A [`LayoutContext`] owns everything one layout instance needs: the arena
//! tree, the stack of open elements, the text measurer and the error handler.
//! Independent contexts share nothing.

use llay_core::{
    validate_viewport, BuildError, CapacityError, CapacityPolicy, ConfigError, Dimensions,
    ElementDeclaration, ElementId, LayoutOptions, LlayError, Sizing, TextConfig,
};

use crate::position::resolve_positions;
use crate::sizing::resolve_sizes;
use crate::text::MeasureText;
use crate::tree::{LayoutNode, LayoutNodeId, LayoutTree};

/// Callback invoked for every reported error.
pub type ErrorHandler = Box<dyn FnMut(&LlayError)>;

#[derive(Debug, Clone, PartialEq)]
enum FrameState {
    Idle,
    Open,
    /// The frame hit a fatal error; every later call returns it
    Failed(LlayError),
}

/// Builds one frame's element tree and resolves its layout.
pub struct LayoutContext {
    options: LayoutOptions,
    tree: LayoutTree,
    /// Open elements, innermost last; the root container sits at the bottom
    open: Vec<LayoutNodeId>,
    measurer: Option<Box<dyn MeasureText>>,
    error_handler: Option<ErrorHandler>,
    state: FrameState,
    /// Nesting depth of elements dropped by truncation
    truncated_depth: usize,
    truncation_reported: bool,
}

impl LayoutContext {
    /// Create a context. No frame is open until `begin_frame`.
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            options,
            tree: LayoutTree::new(),
            open: Vec::new(),
            measurer: None,
            error_handler: None,
            state: FrameState::Idle,
            truncated_depth: 0,
            truncation_reported: false,
        }
    }

    pub fn with_measure_text(mut self, measurer: impl MeasureText + 'static) -> Self {
        self.set_measure_text(measurer);
        self
    }

    /// Register the text measurer used by every later frame.
    pub fn set_measure_text(&mut self, measurer: impl MeasureText + 'static) {
        self.measurer = Some(Box::new(measurer));
    }

    /// Register a callback invoked for every reported error.
    pub fn set_error_handler(&mut self, handler: impl FnMut(&LlayError) + 'static) {
        self.error_handler = Some(Box::new(handler));
    }

    /// Change the viewport. Takes effect at the next `begin_frame`.
    pub fn set_viewport_size(&mut self, viewport: impl Into<Dimensions>) {
        self.options.viewport = viewport.into();
    }

    pub fn viewport(&self) -> Dimensions {
        self.options.viewport
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    pub fn is_frame_open(&self) -> bool {
        !matches!(self.state, FrameState::Idle)
    }

    /// The tree of the frame being built, or of the last completed frame.
    pub fn tree(&self) -> &LayoutTree {
        &self.tree
    }

    /// Start a new frame, invalidating every node of the previous one.
    pub fn begin_frame(&mut self) -> Result<(), LlayError> {
        match &self.state {
            FrameState::Idle => {}
            FrameState::Open => return Err(self.fail(BuildError::FrameAlreadyOpen.into())),
            FrameState::Failed(_) => {
                tracing::debug!("Discarding failed frame {}", self.tree.generation());
                self.discard_frame();
                self.state = FrameState::Idle;
            }
        }

        if let Err(err) = validate_viewport(self.options.viewport) {
            return Err(self.fail(err.into()));
        }

        self.tree.reset();
        self.open.clear();
        self.truncated_depth = 0;
        self.truncation_reported = false;

        let viewport = self.options.viewport;
        let root = LayoutNode::new(
            ElementId::root(),
            ElementDeclaration::new().with_sizing(Sizing::fixed(viewport.width, viewport.height)),
        );
        let root = self.tree.insert(None, root)?;
        self.open.push(root);
        self.state = FrameState::Open;

        tracing::debug!(
            "Frame {} started at {}x{}",
            self.tree.generation(),
            viewport.width,
            viewport.height
        );
        Ok(())
    }

    /// Open a container as the last child of the innermost open element.
    ///
    /// Elements dropped by `CapacityPolicy::Truncate` still get an id but are
    /// absent from the tree, as are their descendants.
    pub fn open(&mut self, declaration: ElementDeclaration) -> Result<ElementId, LlayError> {
        let parent = self.open_parent()?;

        if let Err(err) = declaration.validate() {
            return Err(self.fail(err.into()));
        }

        let id = self.element_id(parent, declaration.id.as_deref());
        if self.truncated_depth > 0 || !self.has_capacity()? {
            self.truncated_depth += 1;
            return Ok(id);
        }

        self.push(parent, LayoutNode::new(id, declaration))?;
        Ok(id)
    }

    /// Open a leaf text element. It must be closed before anything else is
    /// opened.
    pub fn open_text(&mut self, text: &str, config: TextConfig) -> Result<ElementId, LlayError> {
        let parent = self.open_parent()?;

        if self.measurer.is_none() {
            return Err(self.fail(ConfigError::MissingMeasureText.into()));
        }

        let id = self.element_id(parent, None);
        if self.truncated_depth > 0 || !self.has_capacity()? {
            self.truncated_depth += 1;
            return Ok(id);
        }

        let limit = self.options.max_text_length;
        let text = if text.len() > limit {
            let err: LlayError = CapacityError::TextTooLong {
                length: text.len(),
                limit,
            }
            .into();
            match self.options.capacity_policy {
                CapacityPolicy::Discard => return Err(self.fail(err)),
                CapacityPolicy::Truncate => {
                    self.report(&err);
                    truncate_at_char_boundary(text, limit)
                }
            }
        } else {
            text
        };

        self.push(parent, LayoutNode::text(id, text.to_string(), config))?;
        Ok(id)
    }

    /// Add a text element and close it.
    pub fn text(&mut self, text: &str, config: TextConfig) -> Result<ElementId, LlayError> {
        let id = self.open_text(text, config)?;
        self.close()?;
        Ok(id)
    }

    /// Close the innermost open element.
    pub fn close(&mut self) -> Result<(), LlayError> {
        self.ensure_open()?;

        if self.truncated_depth > 0 {
            self.truncated_depth -= 1;
            return Ok(());
        }
        // The root container is closed by `end_frame`, never by the caller.
        if self.open.len() <= 1 {
            return Err(self.fail(BuildError::UnmatchedClose.into()));
        }
        self.open.pop();
        Ok(())
    }

    /// Finish the frame: check that every element was closed, then size and
    /// position the tree.
    ///
    /// A frame that failed returns its error here and is discarded.
    pub fn end_frame(&mut self) -> Result<&LayoutTree, LlayError> {
        match std::mem::replace(&mut self.state, FrameState::Idle) {
            FrameState::Open => {}
            FrameState::Idle => {
                let err: LlayError = BuildError::NoOpenFrame.into();
                self.report(&err);
                return Err(err);
            }
            FrameState::Failed(err) => {
                self.discard_frame();
                return Err(err);
            }
        }

        let unclosed = self.open.len().saturating_sub(1) + self.truncated_depth;
        if unclosed > 0 {
            let err: LlayError = BuildError::UnclosedElements { count: unclosed }.into();
            self.report(&err);
            self.discard_frame();
            return Err(err);
        }
        self.open.clear();

        resolve_sizes(
            &mut self.tree,
            self.measurer.as_deref(),
            self.options.distribution,
        );
        resolve_positions(&mut self.tree);

        tracing::debug!(
            "Frame {} laid out {} elements",
            self.tree.generation(),
            self.tree.len()
        );
        Ok(&self.tree)
    }

    fn ensure_open(&mut self) -> Result<(), LlayError> {
        match &self.state {
            FrameState::Open => Ok(()),
            FrameState::Failed(err) => Err(err.clone()),
            FrameState::Idle => {
                let err: LlayError = BuildError::NoOpenFrame.into();
                self.report(&err);
                Err(err)
            }
        }
    }

    /// The innermost open element, which must be able to take children.
    fn open_parent(&mut self) -> Result<LayoutNodeId, LlayError> {
        self.ensure_open()?;

        let Some(&parent) = self.open.last() else {
            return Err(self.fail(BuildError::NoOpenFrame.into()));
        };
        if self.truncated_depth == 0 {
            if let Some(node) = self.tree.get(parent).filter(|node| node.is_text()) {
                let err = BuildError::ChildOfTextElement { parent: node.id };
                return Err(self.fail(err.into()));
            }
        }
        Ok(parent)
    }

    fn element_id(&self, parent: LayoutNodeId, label: Option<&str>) -> ElementId {
        match label {
            Some(label) => ElementId::from_label(label),
            None => {
                let (parent_id, ordinal) = self
                    .tree
                    .get(parent)
                    .map(|node| (node.id, node.children.len() as u32))
                    .unwrap_or((ElementId::root(), 0));
                ElementId::anonymous(parent_id, ordinal)
            }
        }
    }

    /// Whether another element fits. Under `Truncate` a full tree reports
    /// once and answers `false`; under `Discard` it fails the frame.
    fn has_capacity(&mut self) -> Result<bool, LlayError> {
        let limit = self.options.max_element_count;
        if self.tree.len() < limit {
            return Ok(true);
        }

        let err: LlayError = CapacityError::ElementLimitExceeded { limit }.into();
        match self.options.capacity_policy {
            CapacityPolicy::Discard => Err(self.fail(err)),
            CapacityPolicy::Truncate => {
                if !self.truncation_reported {
                    self.truncation_reported = true;
                    tracing::warn!("Element limit of {} reached, truncating frame", limit);
                    self.report(&err);
                }
                Ok(false)
            }
        }
    }

    fn push(&mut self, parent: LayoutNodeId, node: LayoutNode) -> Result<(), LlayError> {
        match self.tree.insert(Some(parent), node) {
            Ok(handle) => {
                self.open.push(handle);
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Report a fatal error and poison the open frame with it.
    fn fail(&mut self, err: LlayError) -> LlayError {
        self.report(&err);
        if self.state == FrameState::Open {
            self.state = FrameState::Failed(err.clone());
        }
        err
    }

    fn report(&mut self, err: &LlayError) {
        tracing::debug!("Layout error: {}", err);
        if let Some(handler) = self.error_handler.as_mut() {
            handler(err);
        }
    }

    fn discard_frame(&mut self) {
        self.tree.reset();
        self.open.clear();
        self.truncated_depth = 0;
    }
}

impl Default for LayoutContext {
    fn default() -> Self {
        Self::new(LayoutOptions::default())
    }
}

impl std::fmt::Debug for LayoutContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutContext")
            .field("options", &self.options)
            .field("state", &self.state)
            .field("elements", &self.tree.len())
            .field("open", &self.open.len())
            .finish()
    }
}

fn truncate_at_char_boundary(text: &str, limit: usize) -> &str {
    let mut end = limit.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::MonospaceMeasure;
    use llay_core::{BoundingBox, SizingAxis};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn context() -> LayoutContext {
        LayoutContext::default().with_measure_text(MonospaceMeasure::default())
    }

    fn collect_errors(ctx: &mut LayoutContext) -> Rc<RefCell<Vec<LlayError>>> {
        let errors = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&errors);
        ctx.set_error_handler(move |err| sink.borrow_mut().push(err.clone()));
        errors
    }

    #[test]
    fn test_builds_nested_tree() {
        let mut ctx = context();
        ctx.begin_frame().unwrap();
        ctx.open(ElementDeclaration::new().with_id("outer")).unwrap();
        ctx.open(ElementDeclaration::new()).unwrap();
        ctx.close().unwrap();
        ctx.text("hi", TextConfig::default()).unwrap();
        ctx.close().unwrap();
        let tree = ctx.end_frame().unwrap();

        assert_eq!(tree.len(), 4);
        let outer = tree.find(ElementId::from_label("outer")).unwrap();
        assert_eq!(outer.children.len(), 2);
        assert_eq!(outer.dimensions, Dimensions::new(20.0, 20.0));
        assert!(!ctx.is_frame_open());
    }

    #[test]
    fn test_anonymous_ids_follow_parent_and_ordinal() {
        let mut ctx = context();
        ctx.begin_frame().unwrap();
        let first = ctx.open(ElementDeclaration::new()).unwrap();
        ctx.close().unwrap();
        let second = ctx.open(ElementDeclaration::new()).unwrap();
        ctx.close().unwrap();
        ctx.end_frame().unwrap();

        assert_eq!(first, ElementId::anonymous(ElementId::root(), 0));
        assert_eq!(second, ElementId::anonymous(ElementId::root(), 1));
    }

    #[test]
    fn test_unmatched_close_poisons_frame() {
        let mut ctx = context();
        let errors = collect_errors(&mut ctx);
        ctx.begin_frame().unwrap();
        let err = ctx.close().unwrap_err();
        assert_eq!(err, BuildError::UnmatchedClose.into());

        // Later calls repeat the first error without reporting it again.
        assert_eq!(ctx.open(ElementDeclaration::new()).unwrap_err(), err);
        assert_eq!(ctx.end_frame().unwrap_err(), err);
        assert_eq!(errors.borrow().len(), 1);

        // The next frame starts clean.
        ctx.begin_frame().unwrap();
        assert!(ctx.end_frame().is_ok());
    }

    #[test]
    fn test_begin_frame_recovers_from_failed_frame() {
        let mut ctx = context();
        let errors = collect_errors(&mut ctx);
        ctx.begin_frame().unwrap();
        ctx.close().unwrap_err();

        // No end_frame in between: the failed frame is dropped.
        ctx.begin_frame().unwrap();
        ctx.open(ElementDeclaration::new().with_id("fresh")).unwrap();
        ctx.close().unwrap();
        let tree = ctx.end_frame().unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(errors.borrow().len(), 1);
    }

    #[test]
    fn test_unclosed_elements() {
        let mut ctx = context();
        ctx.begin_frame().unwrap();
        ctx.open(ElementDeclaration::new()).unwrap();
        ctx.open(ElementDeclaration::new()).unwrap();
        let err = ctx.end_frame().unwrap_err();
        assert_eq!(err, BuildError::UnclosedElements { count: 2 }.into());
        assert!(ctx.tree().is_empty());
    }

    #[test]
    fn test_text_cannot_have_children() {
        let mut ctx = context();
        ctx.begin_frame().unwrap();
        let text = ctx.open_text("leaf", TextConfig::default()).unwrap();
        let err = ctx.open(ElementDeclaration::new()).unwrap_err();
        assert_eq!(err, BuildError::ChildOfTextElement { parent: text }.into());
    }

    #[test]
    fn test_begin_twice_is_an_error() {
        let mut ctx = context();
        ctx.begin_frame().unwrap();
        assert_eq!(
            ctx.begin_frame().unwrap_err(),
            BuildError::FrameAlreadyOpen.into()
        );
    }

    #[test]
    fn test_calls_outside_a_frame() {
        let mut ctx = context();
        assert_eq!(
            ctx.open(ElementDeclaration::new()).unwrap_err(),
            BuildError::NoOpenFrame.into()
        );
        assert_eq!(ctx.end_frame().unwrap_err(), BuildError::NoOpenFrame.into());
    }

    #[test]
    fn test_missing_measurer() {
        let mut ctx = LayoutContext::default();
        ctx.begin_frame().unwrap();
        assert_eq!(
            ctx.open_text("x", TextConfig::default()).unwrap_err(),
            ConfigError::MissingMeasureText.into()
        );
    }

    #[test]
    fn test_invalid_declaration() {
        let mut ctx = context();
        ctx.begin_frame().unwrap();
        let decl = ElementDeclaration::new().with_sizing(Sizing::new(
            SizingAxis::Fixed(llay_core::MinMax::new(50.0, 10.0)),
            SizingAxis::fit(),
        ));
        let err = ctx.open(decl).unwrap_err();
        assert!(matches!(err, LlayError::Config(ConfigError::InvertedBounds { .. })));
    }

    #[test]
    fn test_duplicate_label() {
        let mut ctx = context();
        ctx.begin_frame().unwrap();
        ctx.open(ElementDeclaration::new().with_id("card")).unwrap();
        ctx.close().unwrap();
        let err = ctx.open(ElementDeclaration::new().with_id("card")).unwrap_err();
        assert!(matches!(err, LlayError::DuplicateId { .. }));
        assert!(ctx.end_frame().is_err());
    }

    #[test]
    fn test_element_limit_discards_frame() {
        let mut ctx = LayoutContext::new(LayoutOptions::default().with_max_element_count(2));
        ctx.begin_frame().unwrap();
        ctx.open(ElementDeclaration::new()).unwrap();
        ctx.close().unwrap();
        let err = ctx.open(ElementDeclaration::new()).unwrap_err();
        assert_eq!(err, CapacityError::ElementLimitExceeded { limit: 2 }.into());
        assert_eq!(ctx.end_frame().unwrap_err(), err);
    }

    #[test]
    fn test_element_limit_truncates_frame() {
        let options = LayoutOptions::default()
            .with_max_element_count(2)
            .with_capacity_policy(CapacityPolicy::Truncate);
        let mut ctx = LayoutContext::new(options);
        let errors = collect_errors(&mut ctx);
        ctx.begin_frame().unwrap();
        for _ in 0..3 {
            ctx.open(ElementDeclaration::new()).unwrap();
            ctx.open(ElementDeclaration::new()).unwrap();
            ctx.close().unwrap();
            ctx.close().unwrap();
        }
        let tree = ctx.end_frame().unwrap();

        assert_eq!(tree.len(), 2);
        assert_eq!(errors.borrow().len(), 1);
    }

    #[test]
    fn test_long_text_is_truncated_at_char_boundary() {
        let options = LayoutOptions::default()
            .with_max_text_length(4)
            .with_capacity_policy(CapacityPolicy::Truncate);
        let mut ctx = LayoutContext::new(options).with_measure_text(MonospaceMeasure::default());
        ctx.begin_frame().unwrap();
        let id = ctx.text("abcé", TextConfig::default()).unwrap();
        let tree = ctx.end_frame().unwrap();

        let node = tree.find(id).unwrap();
        assert_eq!(node.text.as_ref().unwrap().text, "abc");
    }

    #[test]
    fn test_long_text_discards_frame() {
        let mut ctx = LayoutContext::new(LayoutOptions::default().with_max_text_length(2))
            .with_measure_text(MonospaceMeasure::default());
        ctx.begin_frame().unwrap();
        let err = ctx.open_text("abc", TextConfig::default()).unwrap_err();
        assert_eq!(err, CapacityError::TextTooLong { length: 3, limit: 2 }.into());
    }

    #[test]
    fn test_viewport_change_applies_next_frame() {
        let mut ctx = context();
        ctx.begin_frame().unwrap();
        ctx.set_viewport_size((1024.0, 768.0));
        let tree = ctx.end_frame().unwrap();
        let root = tree.root().and_then(|root| tree.get(root)).unwrap();
        assert_eq!(root.bounds, BoundingBox::new(0.0, 0.0, 800.0, 600.0));

        ctx.begin_frame().unwrap();
        let tree = ctx.end_frame().unwrap();
        let root = tree.root().and_then(|root| tree.get(root)).unwrap();
        assert_eq!(root.dimensions, Dimensions::new(1024.0, 768.0));
    }

    #[test]
    fn test_invalid_viewport() {
        let mut ctx = context();
        ctx.set_viewport_size((-1.0, 10.0));
        assert!(matches!(
            ctx.begin_frame().unwrap_err(),
            LlayError::Config(ConfigError::InvalidViewport { .. })
        ));
        assert!(!ctx.is_frame_open());
    }
}
