//! Change events emitted by the buffer model and the subscriber fan-out.
//!
//! Subscribers are plain callbacks kept in one list per event kind and
//! invoked synchronously in registration order.

/// Text in `[pos, pos + len)` was replaced by `value`.
///
/// `pos`, `len` and `value` are always canonical: bounds were validated and
/// line breaks normalized before the event was emitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplaceText {
    pub is_local: bool,
    pub pos: usize,
    pub len: usize,
    pub value: String,
}

impl ReplaceText {
    /// Number of characters inserted.
    #[must_use]
    pub fn inserted_len(&self) -> usize {
        self.value.chars().count()
    }
}

/// The selection range changed to `(start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetSelectionRange {
    pub is_local: bool,
    pub start: usize,
    pub end: usize,
}

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type ReplaceCallback = Box<dyn FnMut(&ReplaceText)>;
type SelectionCallback = Box<dyn FnMut(&SetSelectionRange)>;

/// Per-kind subscriber lists.
#[derive(Default)]
pub struct Subscribers {
    next_id: u64,
    replace: Vec<(SubscriptionId, ReplaceCallback)>,
    selection: Vec<(SubscriptionId, SelectionCallback)>,
}

impl Subscribers {
    /// Create an empty subscriber set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> SubscriptionId {
        self.next_id += 1;
        SubscriptionId(self.next_id)
    }

    /// Register a callback for text replacements.
    pub fn on_replace_text<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ReplaceText) + 'static,
    {
        let id = self.next_id();
        self.replace.push((id, Box::new(callback)));
        id
    }

    /// Register a callback for selection changes.
    pub fn on_selection_change<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&SetSelectionRange) + 'static,
    {
        let id = self.next_id();
        self.selection.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscription. Returns false if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.replace.len() + self.selection.len();
        self.replace.retain(|(sid, _)| *sid != id);
        self.selection.retain(|(sid, _)| *sid != id);
        before != self.replace.len() + self.selection.len()
    }

    /// Number of live subscriptions across both kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.replace.len() + self.selection.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver a text replacement to every replace subscriber.
    pub fn emit_replace_text(&mut self, ev: &ReplaceText) {
        for (_, callback) in &mut self.replace {
            callback(ev);
        }
    }

    /// Deliver a selection change to every selection subscriber.
    pub fn emit_selection_change(&mut self, ev: &SetSelectionRange) {
        for (_, callback) in &mut self.selection {
            callback(ev);
        }
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("replace", &self.replace.len())
            .field("selection", &self.selection.len())
            .finish()
    }
}
