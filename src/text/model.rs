//! Buffer model: document text, selection, and the mutation protocol.
//!
//! A [`BufferModel`] owns the text and the selection range. Mutations go
//! through one shared protocol:
//!
//! 1. [`replace_text`](BufferModel::replace_text) validates the request and
//!    sets the pending-mutation flag (`paused`).
//! 2. The apply strategy decides how the edit reaches
//!    [`apply_replace_text`](BufferModel::apply_replace_text). A local model
//!    applies it on the spot; a synchronized model hands it to an external
//!    [`EditHandler`], which acknowledges later (zero, one, or many times).
//! 3. Applying a local edit clears `paused` and collapses the selection;
//!    applying a remote edit remaps each selection endpoint independently.
//!
//! # Examples
//!
//! ```
//! use goatee::BufferModel;
//!
//! let mut model = BufferModel::local("abc");
//! model.replace_text(1, 1, "XY").unwrap();
//! assert_eq!(model.text(), "aXYc");
//! assert_eq!(model.selection_range(), (3, 3));
//! ```

use crate::error::{Error, Result};
use crate::event::{ReplaceText, SetSelectionRange, SubscriptionId, Subscribers};
use crate::text::document::{Document, canonicalize_line_breaks};

/// Selection range. `start > end` means the anchor sits to the right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Create a new selection.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A collapsed selection (plain cursor) at `offset`.
    #[must_use]
    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Check if the endpoints coincide.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Ordered `(low, high)` bounds, or `None` when collapsed.
    #[must_use]
    pub fn ordered(&self) -> Option<(usize, usize)> {
        match self.start.cmp(&self.end) {
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Less => Some((self.start, self.end)),
            std::cmp::Ordering::Greater => Some((self.end, self.start)),
        }
    }
}

/// Receives proposed local edits for a synchronized model.
///
/// The handler owns transport and ordering. It must eventually cause
/// [`BufferModel::apply_replace_text`] to be called with `is_local = true`
/// for the proposal, otherwise the model stays paused.
pub trait EditHandler {
    fn handle_replace_text(&mut self, pos: usize, len: usize, value: &str);
}

/// How an accepted edit gets applied.
enum ApplyStrategy {
    Local,
    Synchronized(Box<dyn EditHandler>),
}

impl std::fmt::Debug for ApplyStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => f.write_str("Local"),
            Self::Synchronized(_) => f.write_str("Synchronized"),
        }
    }
}

/// Map one selection endpoint across a remote replace of `[pos, pos + len)`.
fn remap_endpoint(offset: usize, pos: usize, len: usize, inserted: usize) -> usize {
    if offset < pos {
        offset
    } else {
        offset.saturating_sub(len).max(pos) + inserted
    }
}

/// Document text plus selection, with observer fan-out.
#[derive(Debug)]
pub struct BufferModel {
    text: Document,
    selection: Selection,
    paused: bool,
    strategy: ApplyStrategy,
    subscribers: Subscribers,
}

impl BufferModel {
    fn with_strategy(strategy: ApplyStrategy, initial: &str) -> Self {
        Self {
            text: Document::from_str(initial),
            selection: Selection::default(),
            paused: false,
            strategy,
            subscribers: Subscribers::new(),
        }
    }

    /// A model whose mutations apply immediately.
    #[must_use]
    pub fn local(initial: &str) -> Self {
        Self::with_strategy(ApplyStrategy::Local, initial)
    }

    /// A model whose mutations are proposed to `handler` and applied on
    /// acknowledgment.
    #[must_use]
    pub fn synchronized(handler: Box<dyn EditHandler>, initial: &str) -> Self {
        Self::with_strategy(ApplyStrategy::Synchronized(handler), initial)
    }

    /// True while a local edit awaits acknowledgment. Local mutations fail
    /// with [`Error::Busy`] in this state.
    #[must_use]
    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Get the full text content.
    #[must_use]
    pub fn text(&self) -> String {
        self.text.to_string()
    }

    /// Borrow the document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.text
    }

    /// Number of characters in the document.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.text.len_chars()
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Current selection as `(start, end)`.
    #[must_use]
    pub fn selection_range(&self) -> (usize, usize) {
        (self.selection.start, self.selection.end)
    }

    /// Register a text-replacement observer.
    pub fn on_replace_text<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ReplaceText) + 'static,
    {
        self.subscribers.on_replace_text(callback)
    }

    /// Register a selection-change observer.
    pub fn on_selection_change<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&SetSelectionRange) + 'static,
    {
        self.subscribers.on_selection_change(callback)
    }

    /// Remove an observer.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    fn check_range(&self, pos: usize, len: usize) -> Result<()> {
        let text_len = self.text.len_chars();
        match pos.checked_add(len) {
            Some(end) if end <= text_len => Ok(()),
            _ => Err(Error::invalid_range(pos, len, text_len)),
        }
    }

    /// Insert `value` at `pos`.
    pub fn insert_text(&mut self, pos: usize, value: &str) -> Result<()> {
        self.replace_text(pos, 0, value)
    }

    /// Delete `len` characters at `pos`.
    pub fn delete_text(&mut self, pos: usize, len: usize) -> Result<()> {
        self.replace_text(pos, len, "")
    }

    /// Request replacing `len` characters at `pos` with `value`.
    ///
    /// Line breaks in `value` are canonicalized first. A local model applies
    /// the edit before returning; a synchronized model pauses and forwards
    /// it to its handler.
    pub fn replace_text(&mut self, pos: usize, len: usize, value: &str) -> Result<()> {
        if self.paused {
            tracing::debug!(pos, len, "replace rejected: model paused");
            return Err(Error::Busy);
        }
        self.check_range(pos, len)?;
        if len == 0 && value.is_empty() {
            return Ok(());
        }

        let value = canonicalize_line_breaks(value);
        self.paused = true;

        if let ApplyStrategy::Synchronized(handler) = &mut self.strategy {
            tracing::debug!(pos, len, inserted = value.len(), "edit proposed, awaiting ack");
            handler.handle_replace_text(pos, len, &value);
            return Ok(());
        }
        self.apply_replace_text(true, pos, len, &value)
    }

    /// Apply a replace to the document. This is the acknowledgment path for
    /// synchronized models and the only place text actually changes.
    ///
    /// A local apply clears `paused` and collapses the selection after the
    /// inserted text. A remote apply shifts each selection endpoint at or
    /// past `pos` by `-len + value.len()`, never left of `pos`.
    pub fn apply_replace_text(
        &mut self,
        is_local: bool,
        pos: usize,
        len: usize,
        value: &str,
    ) -> Result<()> {
        if is_local && self.paused {
            self.paused = false;
            tracing::debug!("local edit acknowledged");
        }
        if len == 0 && value.is_empty() {
            return Ok(());
        }
        self.check_range(pos, len)?;

        let value = canonicalize_line_breaks(value);
        let inserted = value.chars().count();
        self.text.splice(pos, len, &value);

        self.selection = if is_local {
            Selection::caret(pos + inserted)
        } else {
            Selection::new(
                remap_endpoint(self.selection.start, pos, len, inserted),
                remap_endpoint(self.selection.end, pos, len, inserted),
            )
        };

        tracing::debug!(is_local, pos, len, inserted, "text replaced");
        let ev = ReplaceText {
            is_local,
            pos,
            len,
            value: value.into_owned(),
        };
        self.subscribers.emit_replace_text(&ev);
        Ok(())
    }

    /// Set the selection range.
    ///
    /// Selection changes never pause the model, even when synchronized: they
    /// are applied and announced immediately.
    pub fn set_selection_range(&mut self, start: usize, end: usize) -> Result<()> {
        if self.paused {
            return Err(Error::Busy);
        }
        let text_len = self.text.len_chars();
        if start > text_len || end > text_len {
            return Err(Error::invalid_range(start.max(end), 0, text_len));
        }
        if self.selection == Selection::new(start, end) {
            return Ok(());
        }

        self.selection = Selection::new(start, end);
        tracing::trace!(start, end, "selection changed");
        self.subscribers.emit_selection_change(&SetSelectionRange {
            is_local: true,
            start,
            end,
        });
        Ok(())
    }
}

impl Default for BufferModel {
    fn default() -> Self {
        Self::local("")
    }
}
