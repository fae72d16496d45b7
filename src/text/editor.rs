//! Editor: binds a buffer model to a layout, a cursor and view sinks.
//!
//! The model owns text and selection. The editor keeps the derived view
//! state (layout, visual cursor, measurer) behind a shared cell that the
//! model updates through its replace subscription, so layout is always in
//! step with the text by the time a mutation call returns. After every
//! operation the cursor is re-derived from the selection and each sink is
//! handed a fresh [`Frame`].

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::event::{ReplaceText, SubscriptionId};
use crate::input::{KeyEvent, command_for_key};
use crate::text::cursor::{VisualCursor, hop, offset_at_row_x, row_and_left};
use crate::text::diff::minimal_edit;
use crate::text::document::canonicalize_line_breaks;
use crate::text::layout::Layout;
use crate::text::measure::{DEFAULT_SAMPLE_RUN_LEN, TextMeasurer};
use crate::text::model::{BufferModel, Selection};
use crate::text::view::{CursorGeometry, Frame, ViewSink};

/// Default wrap width in pixels.
pub const DEFAULT_WRAP_WIDTH: f32 = 584.0;

/// Editor configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditorOptions {
    /// Row width in pixels at which text wraps.
    pub wrap_width: f32,
    /// Number of copies measured when sampling a glyph width.
    pub sample_run_len: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            wrap_width: DEFAULT_WRAP_WIDTH,
            sample_run_len: DEFAULT_SAMPLE_RUN_LEN,
        }
    }
}

impl EditorOptions {
    #[must_use]
    pub fn with_wrap_width(mut self, wrap_width: f32) -> Self {
        self.wrap_width = wrap_width;
        self
    }

    #[must_use]
    pub fn with_sample_run_len(mut self, sample_run_len: usize) -> Self {
        self.sample_run_len = sample_run_len;
        self
    }
}

/// A discrete editing or navigation command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replace the selection with text (or insert it at the cursor).
    Insert(String),
    MoveLeft { word: bool, extend: bool },
    MoveRight { word: bool, extend: bool },
    MoveUp { extend: bool },
    MoveDown { extend: bool },
    /// Start of the cursor's row.
    LineStart { extend: bool },
    /// Right end of the cursor's row.
    LineEnd { extend: bool },
    DeleteBackward { word: bool },
    DeleteForward { word: bool },
    SelectAll,
    Copy,
    Cut,
    Paste,
}

impl Command {
    /// Insert a single character.
    #[must_use]
    pub fn insert_char(ch: char) -> Self {
        Self::Insert(ch.to_string())
    }
}

/// Layout and cursor state, updated from model events.
struct ViewState {
    layout: Layout,
    cursor: VisualCursor,
    measurer: Box<dyn TextMeasurer>,
    fault: Option<Error>,
}

impl ViewState {
    fn rebuild(&mut self, text: &str) {
        self.layout.reset(text, &*self.measurer);
        self.cursor = VisualCursor::default();
        self.fault = None;
    }

    fn on_replace(&mut self, ev: &ReplaceText) {
        self.cursor.clear_memory();
        if let Err(err) = self.layout.apply_replace(ev, &*self.measurer) {
            tracing::error!(%err, "layout rejected replace");
            self.fault = Some(err);
        }
    }

    fn set_wrap_width(&mut self, wrap_width: f32) {
        self.layout.set_wrap_width(wrap_width, &*self.measurer);
    }

    fn place_cursor(&mut self, offset: usize) -> VisualCursor {
        let (row, left) = row_and_left(&self.layout, offset, self.cursor.right_end);
        self.cursor.row = row;
        self.cursor.left = left;
        self.cursor
    }
}

/// Interactive editor over a [`BufferModel`].
pub struct Editor {
    model: BufferModel,
    view: Rc<RefCell<ViewState>>,
    subscription: SubscriptionId,
    sinks: Vec<Box<dyn ViewSink>>,
    clipboard: String,
    focused: bool,
    pointer_is_down: bool,
}

impl Editor {
    /// Create an editor over `model`, measuring text with `measurer`.
    #[must_use]
    pub fn new<M>(mut model: BufferModel, measurer: M, options: EditorOptions) -> Self
    where
        M: TextMeasurer + 'static,
    {
        let mut state = ViewState {
            layout: Layout::new(options.wrap_width, options.sample_run_len),
            cursor: VisualCursor::default(),
            measurer: Box::new(measurer),
            fault: None,
        };
        state.rebuild(&model.text());
        state.place_cursor(model.selection().end);

        let view = Rc::new(RefCell::new(state));
        let subscription = Self::attach(&mut model, &view);
        Self {
            model,
            view,
            subscription,
            sinks: Vec::new(),
            clipboard: String::new(),
            focused: false,
            pointer_is_down: false,
        }
    }

    /// Create an editor over a new local model holding `text`.
    #[must_use]
    pub fn local<M>(text: &str, measurer: M, options: EditorOptions) -> Self
    where
        M: TextMeasurer + 'static,
    {
        Self::new(BufferModel::local(text), measurer, options)
    }

    fn attach(model: &mut BufferModel, view: &Rc<RefCell<ViewState>>) -> SubscriptionId {
        let view = Rc::clone(view);
        model.on_replace_text(move |ev| view.borrow_mut().on_replace(ev))
    }

    /// Swap in a different model, rebuilding layout and dropping focus.
    pub fn reset(&mut self, model: BufferModel) -> Result<()> {
        self.model = model;
        self.subscription = Self::attach(&mut self.model, &self.view);
        self.view.borrow_mut().rebuild(&self.model.text());
        self.focused = false;
        self.pointer_is_down = false;
        tracing::debug!(len = self.model.len_chars(), "editor reset");
        self.render()
    }

    /// Detach from the model and hand it back.
    #[must_use]
    pub fn into_model(mut self) -> BufferModel {
        self.model.unsubscribe(self.subscription);
        self.model
    }

    /// Register a sink that is painted after every operation.
    pub fn add_sink<S: ViewSink + 'static>(&mut self, sink: S) {
        self.sinks.push(Box::new(sink));
    }

    #[must_use]
    pub fn model(&self) -> &BufferModel {
        &self.model
    }

    /// Get the full text content.
    #[must_use]
    pub fn text(&self) -> String {
        self.model.text()
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.model.selection()
    }

    #[must_use]
    pub fn selection_range(&self) -> (usize, usize) {
        self.model.selection_range()
    }

    /// Visual cursor as of the last completed operation.
    #[must_use]
    pub fn cursor(&self) -> VisualCursor {
        self.view.borrow().cursor
    }

    /// Borrow the current layout.
    #[must_use]
    pub fn layout(&self) -> Ref<'_, Layout> {
        Ref::map(self.view.borrow(), |view| &view.layout)
    }

    #[must_use]
    pub fn clipboard(&self) -> &str {
        &self.clipboard
    }

    #[must_use]
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) -> Result<()> {
        self.focused = true;
        self.render()
    }

    pub fn blur(&mut self) -> Result<()> {
        self.focused = false;
        self.render()
    }

    /// Change the wrap width and reflow.
    pub fn set_wrap_width(&mut self, wrap_width: f32) -> Result<()> {
        self.view.borrow_mut().set_wrap_width(wrap_width);
        self.render()
    }

    /// Re-derive the cursor from the model, surfacing any layout fault.
    fn sync_cursor(&self) -> Result<VisualCursor> {
        let mut view = self.view.borrow_mut();
        if let Some(err) = view.fault.take() {
            return Err(err);
        }
        if let Err(err) = view.layout.check_len(self.model.len_chars()) {
            tracing::error!(%err, "layout out of step with model");
            debug_assert!(false, "{err}");
            return Err(err);
        }
        Ok(view.place_cursor(self.model.selection().end))
    }

    /// Refresh the cursor and paint every sink.
    pub fn render(&mut self) -> Result<()> {
        let cursor = self.sync_cursor()?;
        if self.sinks.is_empty() {
            return Ok(());
        }

        let view = self.view.borrow();
        let selection = self.model.selection();
        let band = view
            .layout
            .bands()
            .get(cursor.row)
            .copied()
            .unwrap_or_default();
        let highlights = match selection.ordered() {
            Some((lo, hi)) if self.focused => view.layout.highlight_spans(lo, hi),
            _ => Vec::new(),
        };
        let frame = Frame {
            layout: &view.layout,
            selection,
            cursor,
            caret: CursorGeometry {
                left: cursor.left,
                top: band.top,
                height: band.height(),
            },
            caret_visible: self.focused && selection.is_collapsed(),
            highlights,
            focused: self.focused,
        };
        for sink in &mut self.sinks {
            sink.paint(&frame);
        }
        Ok(())
    }

    /// Run one command. While the model is paused only the clipboard half
    /// of Copy and Cut runs; everything else is dropped.
    pub fn execute(&mut self, command: Command) -> Result<()> {
        if self.model.paused() {
            if matches!(command, Command::Copy | Command::Cut) {
                self.copy_selection();
            }
            if !matches!(command, Command::Copy) {
                tracing::warn!(?command, "command dropped: model paused");
            }
            return Ok(());
        }
        tracing::trace!(?command, "execute");
        let cursor = self.sync_cursor()?;

        match command {
            Command::Insert(text) => self.replace_selection(&text)?,
            Command::MoveLeft { word, extend } => self.move_horizontal(false, word, extend)?,
            Command::MoveRight { word, extend } => self.move_horizontal(true, word, extend)?,
            Command::MoveUp { extend } => self.move_vertical(cursor, false, extend)?,
            Command::MoveDown { extend } => self.move_vertical(cursor, true, extend)?,
            Command::LineStart { extend } => {
                let start = self.layout().rows().get(cursor.row).map_or(0, |r| r.start);
                self.select_offset(start, !extend)?;
            }
            Command::LineEnd { extend } => {
                self.select_row_x(cursor.row, f32::INFINITY, !extend, true)?;
            }
            Command::DeleteBackward { word } => self.delete_hop(false, word)?,
            Command::DeleteForward { word } => self.delete_hop(true, word)?,
            Command::SelectAll => {
                self.view.borrow_mut().cursor.clear_memory();
                let len = self.model.len_chars();
                self.model.set_selection_range(0, len)?;
            }
            Command::Copy => {
                self.copy_selection();
            }
            Command::Cut => {
                if self.copy_selection() {
                    self.delete_selection()?;
                }
            }
            Command::Paste => {
                let text = self.clipboard.clone();
                self.replace_selection(&text)?;
            }
        }
        self.render()
    }

    /// Map a key to a command and run it. Returns whether the key was
    /// consumed; keys are ignored without focus or during a pointer drag.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        if !self.focused || self.pointer_is_down {
            return Ok(false);
        }
        let Some(command) = command_for_key(&key) else {
            return Ok(false);
        };
        self.execute(command)?;
        Ok(true)
    }

    /// Press the pointer at `(x, y)`: focus and collapse the selection there.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> Result<()> {
        self.focused = true;
        self.pointer_is_down = true;
        if !self.model.paused() {
            let row = self.layout().row_at_y(y);
            self.select_row_x(row, x, true, true)?;
        }
        self.render()
    }

    /// Drag the pointer to `(x, y)`, extending the selection.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> Result<()> {
        if !self.pointer_is_down {
            return Ok(());
        }
        if !self.model.paused() {
            let row = self.layout().row_at_y(y);
            self.select_row_x(row, x, false, true)?;
        }
        self.render()
    }

    pub fn pointer_up(&mut self) -> Result<()> {
        if !self.pointer_is_down {
            return Ok(());
        }
        self.pointer_is_down = false;
        self.render()
    }

    /// Set the selection programmatically.
    pub fn set_selection_range(&mut self, start: usize, end: usize) -> Result<()> {
        self.model.set_selection_range(start, end)?;
        self.view.borrow_mut().cursor.clear_memory();
        self.render()
    }

    /// Acknowledge or deliver an edit to the model, then repaint.
    pub fn apply_replace_text(
        &mut self,
        is_local: bool,
        pos: usize,
        len: usize,
        value: &str,
    ) -> Result<()> {
        self.model.apply_replace_text(is_local, pos, len, value)?;
        self.render()
    }

    /// Bring the model in line with a full-text snapshot reported by the
    /// host, as one minimal replace.
    pub fn sync_text(&mut self, snapshot: &str) -> Result<()> {
        if self.model.paused() {
            return Err(Error::Busy);
        }
        let snapshot = canonicalize_line_breaks(snapshot);
        let edit = minimal_edit(&self.model.text(), &snapshot);
        if edit.is_noop() {
            return Ok(());
        }
        tracing::trace!(pos = edit.pos, delete_len = edit.delete_len, "snapshot diffed");
        self.model
            .replace_text(edit.pos, edit.delete_len, &edit.insert)?;
        self.render()
    }

    fn select_offset(&mut self, offset: usize, collapse: bool) -> Result<()> {
        self.view.borrow_mut().cursor.clear_memory();
        let anchor = if collapse {
            offset
        } else {
            self.model.selection().start
        };
        self.model.set_selection_range(anchor, offset)
    }

    fn select_row_x(&mut self, row: usize, x: f32, collapse: bool, clear_prev: bool) -> Result<()> {
        let hit = {
            let mut view = self.view.borrow_mut();
            let hit = offset_at_row_x(&view.layout, row, x);
            view.cursor.right_end = hit.right_end;
            if clear_prev {
                view.cursor.prev_left = None;
            }
            hit
        };
        let anchor = if collapse {
            hit.offset
        } else {
            self.model.selection().start
        };
        self.model.set_selection_range(anchor, hit.offset)
    }

    fn move_horizontal(&mut self, forward: bool, word: bool, extend: bool) -> Result<()> {
        let sel = self.model.selection();
        let doc = self.model.document();
        let (target, collapse) = if extend {
            (hop(doc, sel.end, forward, word), false)
        } else {
            match sel.ordered() {
                None => (hop(doc, sel.end, forward, word), true),
                Some((lo, hi)) => {
                    let edge = if forward { hi } else { lo };
                    let target = if word { hop(doc, edge, forward, true) } else { edge };
                    (target, true)
                }
            }
        };
        self.select_offset(target, collapse)
    }

    fn move_vertical(&mut self, cursor: VisualCursor, down: bool, extend: bool) -> Result<()> {
        let rows = self.layout().row_count();
        let target = if down {
            if cursor.row + 1 >= rows {
                return Ok(());
            }
            cursor.row + 1
        } else {
            let Some(row) = cursor.row.checked_sub(1) else {
                return Ok(());
            };
            row
        };
        let x = *self
            .view
            .borrow_mut()
            .cursor
            .prev_left
            .get_or_insert(cursor.left);
        self.select_row_x(target, x, !extend, false)
    }

    fn replace_selection(&mut self, text: &str) -> Result<()> {
        let sel = self.model.selection();
        let (lo, hi) = sel.ordered().unwrap_or((sel.start, sel.start));
        self.model.replace_text(lo, hi - lo, text)
    }

    fn delete_selection(&mut self) -> Result<()> {
        match self.model.selection().ordered() {
            Some((lo, hi)) => self.model.delete_text(lo, hi - lo),
            None => Ok(()),
        }
    }

    fn delete_hop(&mut self, forward: bool, word: bool) -> Result<()> {
        if !self.model.selection().is_collapsed() {
            return self.delete_selection();
        }
        let p = self.model.selection().end;
        let q = hop(self.model.document(), p, forward, word);
        let (lo, hi) = if forward { (p, q) } else { (q, p) };
        self.model.delete_text(lo, hi - lo)
    }

    /// Copy a non-collapsed selection to the clipboard.
    fn copy_selection(&mut self) -> bool {
        let Some((lo, hi)) = self.model.selection().ordered() else {
            return false;
        };
        self.clipboard = self.model.document().slice_to_string(lo, hi);
        true
    }
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("model", &self.model)
            .field("cursor", &self.cursor())
            .field("sinks", &self.sinks.len())
            .field("focused", &self.focused)
            .field("pointer_is_down", &self.pointer_is_down)
            .finish_non_exhaustive()
    }
}
