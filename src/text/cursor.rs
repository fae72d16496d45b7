//! Cursor navigation primitives over a laid-out document.

use crate::text::document::Document;
use crate::text::layout::Layout;
use crate::text::search::search;

/// Visual cursor state: where the moving selection endpoint is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VisualCursor {
    /// Row the cursor is drawn on.
    pub row: usize,
    /// Horizontal pixel offset within the row.
    pub left: f32,
    /// The cursor sits at the end of a wrapped row rather than the start of
    /// the next one.
    pub right_end: bool,
    /// Horizontal target remembered across consecutive vertical moves.
    pub prev_left: Option<f32>,
}

impl VisualCursor {
    /// Forget the wrap-point tie-break and the vertical target.
    pub fn clear_memory(&mut self) {
        self.right_end = false;
        self.prev_left = None;
    }
}

/// Word characters for word-wise movement: ASCII letters and digits.
#[must_use]
pub fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
}

/// Offset reached from `pos` by one hop.
///
/// Character mode moves one offset. Word mode skips a run of non-word
/// characters, then a run of word characters. Both stop at the buffer bounds.
#[must_use]
pub fn hop(doc: &Document, pos: usize, forward: bool, word: bool) -> usize {
    let len = doc.len_chars();
    let mut p = pos.min(len);

    if !word {
        return if forward { (p + 1).min(len) } else { p.saturating_sub(1) };
    }

    if forward {
        let mut chars = doc.chars_at(p).peekable();
        while chars.next_if(|&c| !is_word_char(c)).is_some() {
            p += 1;
        }
        while chars.next_if(|&c| is_word_char(c)).is_some() {
            p += 1;
        }
    } else {
        let before = |p: usize| p.checked_sub(1).and_then(|i| doc.char_at(i));
        while before(p).is_some_and(|c| !is_word_char(c)) {
            p -= 1;
        }
        while before(p).is_some_and(is_word_char) {
            p -= 1;
        }
    }
    p
}

/// Offset resolved from a horizontal pixel position on a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowHit {
    pub offset: usize,
    /// The offset is the end of a non-empty row.
    pub right_end: bool,
}

/// Resolve pixel `x` on `row` to an offset.
///
/// Scans the row's characters, excluding a trailing newline, and stops at the
/// first one whose right edge reaches `x`, snapping to the nearer of its two
/// edges. Ties go to the left edge. An `x` past every character lands at the
/// end of the scan.
#[must_use]
pub fn offset_at_row_x(layout: &Layout, row: usize, x: f32) -> RowHit {
    let Some(span) = layout.rows().get(row).copied() else {
        return RowHit {
            offset: layout.len(),
            right_end: false,
        };
    };
    let glyphs = layout.glyphs();

    let mut end = span.end;
    if end > span.start && glyphs[end - 1].ch == '\n' {
        end -= 1;
    }

    let mut p = span.start;
    let mut left = 0.0f32;
    while p < end {
        let new_left = left + glyphs[p].width;
        if new_left >= x {
            if new_left - x < x - left {
                p += 1;
            }
            break;
        }
        left = new_left;
        p += 1;
    }

    RowHit {
        offset: p,
        right_end: p == span.end && p > span.start,
    }
}

/// Row and horizontal pixel offset at which `offset` is drawn.
///
/// The row is the first one ending after `offset`, or ending exactly at it
/// when `right_end` is set.
#[must_use]
pub fn row_and_left(layout: &Layout, offset: usize, right_end: bool) -> (usize, f32) {
    let rows = layout.rows();
    if rows.is_empty() {
        return (0, 0.0);
    }
    let row = search(rows.len() - 1, |i| {
        offset < rows[i].end || (offset == rows[i].end && right_end)
    });
    (row, layout.span_width(rows[row].start, offset))
}
