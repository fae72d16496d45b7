//! Word-wrap layout and pixel geometry.
//!
//! [`Layout`] keeps three derived structures in step with the document:
//!
//! - the per-character geometry cache ([`Glyph`]s), spliced on every applied
//!   replace and only fully measured on reset,
//! - the row partition ([`RowSpan`]s) covering `[0, len)` without gaps,
//! - the row pixel bands ([`RowBand`]s), parallel to the partition.
//!
//! Partition and bands are rebuilt in one pass whenever text or wrap width
//! changes, so readers never observe a mix of old and new geometry.

use crate::error::{Error, Result};
use crate::event::ReplaceText;
use crate::text::measure::{self, DEFAULT_SAMPLE_RUN_LEN, TextMeasurer};
use crate::text::search::search;

/// One cached character with its measured size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub width: f32,
    pub height: f32,
}

/// Half-open offset range of one visual row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowSpan {
    pub start: usize,
    pub end: usize,
}

impl RowSpan {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Vertical pixel extent of one visual row.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RowBand {
    pub top: f32,
    pub bottom: f32,
}

impl RowBand {
    #[must_use]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Portion of one row covered by a selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightSpan {
    pub row: usize,
    pub left: f32,
    /// Pixel width, or `None` when the highlight runs to the row's right edge.
    pub width: Option<f32>,
}

/// Greedy word wrap over cached glyphs.
///
/// A newline always closes its row (it belongs to the row but adds no
/// width). On overflow the row breaks after the last space seen on it, or,
/// with no space, right before the overflowing glyph. The last row is always
/// emitted, even when empty.
#[must_use]
pub fn wrap_rows(glyphs: &[Glyph], wrap_width: f32) -> Vec<RowSpan> {
    let mut rows = Vec::new();
    let mut begin = 0usize;
    let mut width = 0.0f32;
    let mut last_space: Option<usize> = None;

    let mut p = 0usize;
    while p < glyphs.len() {
        let glyph = glyphs[p];
        if glyph.ch == '\n' {
            p += 1;
        } else {
            width += glyph.width;
            if glyph.ch == ' ' {
                last_space = Some(p);
            }
            // A lone glyph wider than the row still has to go somewhere.
            if width <= wrap_width || p == begin {
                p += 1;
                continue;
            }
            if let Some(space) = last_space {
                p = space + 1;
            }
        }
        rows.push(RowSpan::new(begin, p));
        begin = p;
        width = 0.0;
        last_space = None;
    }
    rows.push(RowSpan::new(begin, p));
    rows
}

/// Layout engine state for one document.
#[derive(Clone, Debug)]
pub struct Layout {
    glyphs: Vec<Glyph>,
    rows: Vec<RowSpan>,
    bands: Vec<RowBand>,
    wrap_width: f32,
    sample_len: usize,
}

impl Layout {
    /// Create an empty layout. Call [`reset`](Self::reset) before reading it.
    #[must_use]
    pub fn new(wrap_width: f32, sample_len: usize) -> Self {
        Self {
            glyphs: Vec::new(),
            rows: vec![RowSpan::default()],
            bands: vec![RowBand::default()],
            wrap_width,
            sample_len,
        }
    }

    /// Measure `text` from scratch and lay it out.
    #[must_use]
    pub fn build<M: TextMeasurer + ?Sized>(text: &str, wrap_width: f32, measurer: &M) -> Self {
        let mut layout = Self::new(wrap_width, DEFAULT_SAMPLE_RUN_LEN);
        layout.reset(text, measurer);
        layout
    }

    /// Re-measure every character of `text` and reflow.
    pub fn reset<M: TextMeasurer + ?Sized>(&mut self, text: &str, measurer: &M) {
        self.glyphs = text
            .chars()
            .enumerate()
            .map(|(pos, ch)| self.measure_glyph(measurer, ch, pos))
            .collect();
        self.reflow(measurer);
    }

    fn measure_glyph<M: TextMeasurer + ?Sized>(&self, measurer: &M, ch: char, pos: usize) -> Glyph {
        let size = measure::glyph_size(measurer, ch, pos, self.sample_len);
        Glyph {
            ch,
            width: size.width,
            height: size.height,
        }
    }

    /// Splice the measured characters of an applied replace into the cache,
    /// then reflow.
    pub fn apply_replace<M: TextMeasurer + ?Sized>(
        &mut self,
        ev: &ReplaceText,
        measurer: &M,
    ) -> Result<()> {
        let end = ev.pos.checked_add(ev.len);
        if end.is_none_or(|end| end > self.glyphs.len()) {
            return Err(Error::Assertion(format!(
                "replace {}+{} outside glyph cache of {} entries",
                ev.pos,
                ev.len,
                self.glyphs.len()
            )));
        }

        let inserted: Vec<Glyph> = ev
            .value
            .chars()
            .enumerate()
            .map(|(i, ch)| self.measure_glyph(measurer, ch, ev.pos + i))
            .collect();
        self.glyphs.splice(ev.pos..ev.pos + ev.len, inserted);
        self.reflow(measurer);
        Ok(())
    }

    /// Change the wrap width and reflow.
    pub fn set_wrap_width<M: TextMeasurer + ?Sized>(&mut self, wrap_width: f32, measurer: &M) {
        self.wrap_width = wrap_width;
        self.reflow(measurer);
    }

    /// Rebuild the row partition and the row bands from the glyph cache.
    pub fn reflow<M: TextMeasurer + ?Sized>(&mut self, measurer: &M) {
        let rows = wrap_rows(&self.glyphs, self.wrap_width);

        let mut bands = Vec::with_capacity(rows.len());
        let mut top = 0.0f32;
        for row in &rows {
            let height = self.glyphs[row.start..row.end]
                .iter()
                .fold(measure::empty_line_height(measurer, row.start), |h, g| {
                    h.max(g.height)
                });
            bands.push(RowBand {
                top,
                bottom: top + height,
            });
            top += height;
        }

        tracing::trace!(
            rows = rows.len(),
            glyphs = self.glyphs.len(),
            wrap_width = self.wrap_width,
            "reflowed"
        );
        self.rows = rows;
        self.bands = bands;
    }

    /// Check that the glyph cache covers exactly `text_len` characters.
    pub fn check_len(&self, text_len: usize) -> Result<()> {
        if self.glyphs.len() == text_len {
            return Ok(());
        }
        Err(Error::Assertion(format!(
            "glyph cache holds {} entries, text has {text_len}",
            self.glyphs.len()
        )))
    }

    #[must_use]
    pub fn wrap_width(&self) -> f32 {
        self.wrap_width
    }

    /// Per-character geometry cache.
    #[must_use]
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Row partition.
    #[must_use]
    pub fn rows(&self) -> &[RowSpan] {
        &self.rows
    }

    /// Row pixel bands, parallel to [`rows`](Self::rows).
    #[must_use]
    pub fn bands(&self) -> &[RowBand] {
        &self.bands
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of characters laid out.
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Total height of all rows.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.bands.last().map_or(0.0, |b| b.bottom)
    }

    /// Characters of a row, including a trailing newline if it has one.
    #[must_use]
    pub fn row_text(&self, row: usize) -> String {
        self.rows
            .get(row)
            .map(|r| self.glyphs[r.start..r.end].iter().map(|g| g.ch).collect())
            .unwrap_or_default()
    }

    /// Sum of glyph widths over `[start, end)`.
    #[must_use]
    pub fn span_width(&self, start: usize, end: usize) -> f32 {
        let end = end.min(self.glyphs.len());
        let start = start.min(end);
        self.glyphs[start..end].iter().map(|g| g.width).sum()
    }

    /// Row containing the vertical pixel `y`: the first row whose bottom is at
    /// or below `y`, or the last row.
    #[must_use]
    pub fn row_at_y(&self, y: f32) -> usize {
        search(self.bands.len().saturating_sub(1), |i| y <= self.bands[i].bottom)
    }

    /// Per-row highlight spans for the ordered selection `[lo, hi)`.
    #[must_use]
    pub fn highlight_spans(&self, lo: usize, hi: usize) -> Vec<HighlightSpan> {
        let mut spans = Vec::new();
        for (row, span) in self.rows.iter().enumerate() {
            if lo >= span.end {
                continue;
            }
            if hi <= span.start {
                break;
            }

            let from = lo.max(span.start);
            let left = self.span_width(span.start, from);
            let ends_with_newline =
                span.end > span.start && self.glyphs[span.end - 1].ch == '\n';
            let width = if hi > span.end || (hi == span.end && ends_with_newline) {
                None
            } else {
                Some(self.span_width(from, hi))
            };
            spans.push(HighlightSpan { row, left, width });
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::measure::MonospaceMeasurer;

    const CELL: f32 = 10.0;
    const LINE: f32 = 16.0;

    fn mono() -> MonospaceMeasurer {
        MonospaceMeasurer::new(CELL, LINE)
    }

    fn spans(layout: &Layout) -> Vec<(usize, usize)> {
        layout.rows().iter().map(|r| (r.start, r.end)).collect()
    }

    #[test]
    fn test_empty_text_has_one_row() {
        let layout = Layout::build("", 100.0, &mono());
        assert_eq!(spans(&layout), vec![(0, 0)]);
        assert_eq!(layout.bands(), &[RowBand { top: 0.0, bottom: LINE }]);
    }

    #[test]
    fn test_newlines_close_rows() {
        let layout = Layout::build("ab\n\ncd\n", 100.0, &mono());
        assert_eq!(spans(&layout), vec![(0, 3), (3, 4), (4, 7), (7, 7)]);
        assert_eq!(layout.row_text(0), "ab\n");
        assert_eq!(layout.height(), 4.0 * LINE);
    }

    #[test]
    fn test_break_after_space() {
        let text = format!("{} {}", "W".repeat(10), "W".repeat(10));
        let layout = Layout::build(&text, 15.0 * CELL, &mono());
        assert_eq!(spans(&layout), vec![(0, 11), (11, 21)]);
        assert_eq!(layout.row_text(0), format!("{} ", "W".repeat(10)));
    }

    #[test]
    fn test_forced_break_without_space() {
        let text = "W".repeat(50);
        let layout = Layout::build(&text, 37.5 * CELL, &mono());
        assert_eq!(spans(&layout), vec![(0, 37), (37, 50)]);
    }

    #[test]
    fn test_exact_fit_does_not_wrap() {
        let layout = Layout::build("WWWW", 4.0 * CELL, &mono());
        assert_eq!(spans(&layout), vec![(0, 4)]);
    }

    #[test]
    fn test_overflowing_trailing_space_leaves_empty_row() {
        let layout = Layout::build("WWW ", 3.0 * CELL, &mono());
        assert_eq!(spans(&layout), vec![(0, 4), (4, 4)]);
    }

    #[test]
    fn test_glyph_wider_than_row_makes_progress() {
        let layout = Layout::build("WWW", 0.5 * CELL, &mono());
        assert_eq!(spans(&layout), vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_apply_replace_splices_cache() {
        let m = mono();
        let mut layout = Layout::build("hello world", 100.0, &m);
        let ev = ReplaceText {
            is_local: true,
            pos: 5,
            len: 6,
            value: "\nthere".into(),
        };
        layout.apply_replace(&ev, &m).unwrap();
        assert_eq!(layout.len(), 11);
        assert!(layout.check_len(11).is_ok());
        assert_eq!(spans(&layout), vec![(0, 6), (6, 11)]);
        assert_eq!(layout.glyphs()[5].width, 0.0);
    }

    #[test]
    fn test_apply_replace_out_of_cache() {
        let m = mono();
        let mut layout = Layout::build("abc", 100.0, &m);
        let ev = ReplaceText {
            is_local: false,
            pos: 2,
            len: 5,
            value: String::new(),
        };
        assert!(matches!(layout.apply_replace(&ev, &m), Err(Error::Assertion(_))));
        assert_eq!(layout.len(), 3);
        assert!(layout.check_len(4).is_err());
    }

    #[test]
    fn test_set_wrap_width_reflows() {
        let m = mono();
        let mut layout = Layout::build("aaaa bbbb", 100.0, &m);
        assert_eq!(layout.row_count(), 1);
        layout.set_wrap_width(6.0 * CELL, &m);
        assert_eq!(spans(&layout), vec![(0, 5), (5, 9)]);
    }

    #[test]
    fn test_row_at_y() {
        let layout = Layout::build("a\nb\nc", 100.0, &mono());
        assert_eq!(layout.row_at_y(0.0), 0);
        assert_eq!(layout.row_at_y(LINE), 0);
        assert_eq!(layout.row_at_y(LINE + 0.5), 1);
        assert_eq!(layout.row_at_y(1000.0), 2);
    }

    #[test]
    fn test_highlight_spans() {
        let layout = Layout::build("abc\ndef\nghi", 100.0, &mono());
        // "bc\nde" spans two rows; the first runs to the edge.
        let hl = layout.highlight_spans(1, 6);
        assert_eq!(
            hl,
            vec![
                HighlightSpan {
                    row: 0,
                    left: CELL,
                    width: None
                },
                HighlightSpan {
                    row: 1,
                    left: 0.0,
                    width: Some(2.0 * CELL)
                },
            ]
        );

        // Ending right after a newline still runs to the edge.
        let hl = layout.highlight_spans(4, 8);
        assert_eq!(hl.len(), 1);
        assert_eq!(hl[0].width, None);
    }
}
