//! Presentation output handed to view sinks.

use crate::text::cursor::VisualCursor;
use crate::text::layout::{HighlightSpan, Layout};
use crate::text::model::Selection;

/// Where and how tall the cursor is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorGeometry {
    pub left: f32,
    pub top: f32,
    pub height: f32,
}

/// A snapshot of everything a surface needs to paint the editor.
#[derive(Clone, Debug)]
pub struct Frame<'a> {
    pub layout: &'a Layout,
    pub selection: Selection,
    pub cursor: VisualCursor,
    pub caret: CursorGeometry,
    /// The editor has focus and the selection is collapsed.
    pub caret_visible: bool,
    /// One span per row intersecting a non-collapsed selection. Empty when
    /// the editor is blurred.
    pub highlights: Vec<HighlightSpan>,
    pub focused: bool,
}

/// Receives a frame after every editor operation.
pub trait ViewSink {
    fn paint(&mut self, frame: &Frame<'_>);
}

impl<F: FnMut(&Frame<'_>)> ViewSink for F {
    fn paint(&mut self, frame: &Frame<'_>) {
        self(frame);
    }
}
