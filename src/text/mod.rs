//! Text model, layout and cursor engine.
//!
//! Key types:
//!
//! - [`BufferModel`]: document text plus selection, with the local/remote
//!   mutation protocol
//! - [`Layout`]: word wrap, row partition and row pixel bands
//! - [`Editor`]: binds a model to a layout, a cursor and view sinks
//!
//! # Examples
//!
//! ```
//! use goatee::{Command, Editor, EditorOptions, MonospaceMeasurer};
//!
//! let options = EditorOptions::default().with_wrap_width(60.0);
//! let mut editor = Editor::local("", MonospaceMeasurer::new(10.0, 16.0), options);
//! editor.execute(Command::Insert("aaaa bbbb".into())).unwrap();
//!
//! let layout = editor.layout();
//! assert_eq!(layout.row_count(), 2);
//! assert_eq!(layout.row_text(0), "aaaa ");
//! ```

pub mod cursor;
pub mod diff;
pub mod document;
pub mod editor;
pub mod layout;
pub mod measure;
pub mod model;
pub mod search;
pub mod view;

pub use cursor::{RowHit, VisualCursor, hop, is_word_char, offset_at_row_x, row_and_left};
pub use diff::{TextEdit, minimal_edit};
pub use document::{Document, canonicalize_line_breaks};
pub use editor::{Command, DEFAULT_WRAP_WIDTH, Editor, EditorOptions};
pub use layout::{Glyph, HighlightSpan, Layout, RowBand, RowSpan, wrap_rows};
pub use measure::{DEFAULT_SAMPLE_RUN_LEN, MonospaceMeasurer, Size, TextMeasurer};
pub use model::{BufferModel, EditHandler, Selection};
pub use search::search;
pub use view::{CursorGeometry, Frame, ViewSink};
