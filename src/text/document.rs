//! Document text backed by a rope.

use ropey::Rope;
use std::borrow::Cow;

/// Replace `\r\n` and lone `\r` with `\n`.
#[must_use]
pub fn canonicalize_line_breaks(s: &str) -> Cow<'_, str> {
    if !s.contains('\r') {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Document text addressed by character offset.
///
/// Line breaks are canonicalized on the way in, so the stored text never
/// contains a carriage return.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    rope: Rope,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a document from a string.
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        Self {
            rope: Rope::from_str(&canonicalize_line_breaks(s)),
        }
    }

    /// Get the number of characters.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_bytes() == 0
    }

    /// Character at `char_idx`, if in bounds.
    #[must_use]
    pub fn char_at(&self, char_idx: usize) -> Option<char> {
        self.rope.get_char(char_idx)
    }

    /// Copy `[start, end)` out as a string. Out-of-range bounds are clamped.
    #[must_use]
    pub fn slice_to_string(&self, start: usize, end: usize) -> String {
        let len = self.len_chars();
        let end = end.min(len);
        let start = start.min(end);
        self.rope.slice(start..end).to_string()
    }

    /// Iterate characters starting at `char_idx`.
    pub fn chars_at(&self, char_idx: usize) -> impl Iterator<Item = char> + '_ {
        self.rope.chars_at(char_idx.min(self.len_chars()))
    }

    /// Replace `[pos, pos + len)` with `value`.
    ///
    /// The caller validates bounds and canonicalizes `value`.
    pub fn splice(&mut self, pos: usize, len: usize, value: &str) {
        debug_assert!(pos + len <= self.len_chars());
        debug_assert!(!value.contains('\r'));
        if len > 0 {
            self.rope.remove(pos..pos + len);
        }
        if !value.is_empty() {
            self.rope.insert(pos, value);
        }
    }

    /// Convert to string.
    #[must_use]
    pub fn to_string(&self) -> String {
        self.rope.to_string()
    }
}

impl From<&str> for Document {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

impl From<String> for Document {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}
