//! The layout engine facade.

use llay_core::{
    BoundingBox, Dimensions, ElementDeclaration, ElementId, LayoutOptions, LlayError, TextConfig,
};
use llay_layout::{LayoutContext, LayoutTree, MeasureText};
use llay_render::{emit_commands, RenderCommand};

/// One independent layout instance.
///
/// Each frame is built with `begin_frame`, any number of nested
/// `open`/`close` pairs and `end_frame`, which returns the render commands.
#[derive(Debug, Default)]
pub struct Llay {
    context: LayoutContext,
}

impl Llay {
    pub fn new(options: LayoutOptions) -> Self {
        Self {
            context: LayoutContext::new(options),
        }
    }

    pub fn with_measure_text(mut self, measurer: impl MeasureText + 'static) -> Self {
        self.set_measure_text(measurer);
        self
    }

    /// Register the text measurer. Required before any frame contains text.
    pub fn set_measure_text(&mut self, measurer: impl MeasureText + 'static) {
        self.context.set_measure_text(measurer);
    }

    /// Register a callback invoked for every reported error.
    pub fn set_error_handler(&mut self, handler: impl FnMut(&LlayError) + 'static) {
        self.context.set_error_handler(handler);
    }

    /// Resize the root container from the next frame on.
    pub fn set_viewport_size(&mut self, viewport: impl Into<Dimensions>) {
        self.context.set_viewport_size(viewport);
    }

    pub fn viewport(&self) -> Dimensions {
        self.context.viewport()
    }

    pub fn begin_frame(&mut self) -> Result<(), LlayError> {
        self.context.begin_frame()
    }

    pub fn open(&mut self, declaration: ElementDeclaration) -> Result<ElementId, LlayError> {
        self.context.open(declaration)
    }

    pub fn open_text(&mut self, text: &str, config: TextConfig) -> Result<ElementId, LlayError> {
        self.context.open_text(text, config)
    }

    /// Add a closed text element.
    pub fn text(&mut self, text: &str, config: TextConfig) -> Result<ElementId, LlayError> {
        self.context.text(text, config)
    }

    pub fn close(&mut self) -> Result<(), LlayError> {
        self.context.close()
    }

    /// Open an element, declare its children in `children`, and close it.
    pub fn element<F>(&mut self, declaration: ElementDeclaration, children: F) -> Result<ElementId, LlayError>
    where
        F: FnOnce(&mut Self) -> Result<(), LlayError>,
    {
        let id = self.open(declaration)?;
        children(self)?;
        self.close()?;
        Ok(id)
    }

    /// Lay out the frame and return its render commands in painter's order.
    pub fn end_frame(&mut self) -> Result<Vec<RenderCommand>, LlayError> {
        let tree = self.context.end_frame()?;
        let commands = emit_commands(tree);
        tracing::debug!(
            "Frame {} produced {} render commands",
            tree.generation(),
            commands.len()
        );
        Ok(commands)
    }

    /// Bounds of an element in the last completed frame.
    pub fn element_bounds(&self, id: ElementId) -> Option<BoundingBox> {
        if self.context.is_frame_open() {
            return None;
        }
        self.context.tree().find(id).map(|node| node.bounds)
    }

    /// The tree of the last completed frame.
    pub fn tree(&self) -> &LayoutTree {
        self.context.tree()
    }
}
