//! Text measurement contract and per-character sampling.

use unicode_width::UnicodeWidthChar;

/// Default number of copies measured when sampling a glyph width.
pub const DEFAULT_SAMPLE_RUN_LEN: usize = 8;

/// Rendered size of a run of text, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Maps a run of text to its rendered size.
///
/// `pos` is the logical offset the run starts at, so styled surfaces can
/// measure with the right font. Results must be deterministic.
pub trait TextMeasurer {
    fn measure(&self, run: &str, pos: usize) -> Size;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, run: &str, pos: usize) -> Size {
        (**self).measure(run, pos)
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for Box<T> {
    fn measure(&self, run: &str, pos: usize) -> Size {
        (**self).measure(run, pos)
    }
}

/// Size of one character at `pos`.
///
/// The width of `n` copies is not always `n` times the width of one, so the
/// width is taken from a run of `sample_len` copies and divided. The height
/// comes from a single character because the character may be a newline.
#[must_use]
pub fn glyph_size<M: TextMeasurer + ?Sized>(
    measurer: &M,
    ch: char,
    pos: usize,
    sample_len: usize,
) -> Size {
    let n = sample_len.max(1);
    let mut buf = [0u8; 4];
    let single: &str = ch.encode_utf8(&mut buf);
    let run = single.repeat(n);
    let width = measurer.measure(&run, pos).width / n as f32;
    let height = measurer.measure(single, pos).height;
    Size { width, height }
}

/// Height of an empty row starting at `pos`: the height of one space.
#[must_use]
pub fn empty_line_height<M: TextMeasurer + ?Sized>(measurer: &M, pos: usize) -> f32 {
    measurer.measure(" ", pos).height
}

/// Grid measurer for cell-based surfaces: each character is as many cells
/// wide as its terminal display width, every run is one line tall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasurer {
    pub cell_width: f32,
    pub line_height: f32,
}

impl MonospaceMeasurer {
    #[must_use]
    pub fn new(cell_width: f32, line_height: f32) -> Self {
        Self {
            cell_width,
            line_height,
        }
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, run: &str, _pos: usize) -> Size {
        let cells: usize = run
            .chars()
            .map(|ch| if ch == '\n' { 0 } else { ch.width().unwrap_or(0) })
            .sum();
        Size {
            width: cells as f32 * self.cell_width,
            height: self.line_height,
        }
    }
}
