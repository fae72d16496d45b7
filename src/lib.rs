//! `goatee` - word-wrapping text editing engine
//!
//! Separates what a document contains (text plus selection, mutated through
//! a local/remote protocol suited to collaborative editing) from how it is
//! presented (pixel word wrap, row geometry, and cursor navigation). Text
//! measurement and painting are supplied by the host through
//! [`TextMeasurer`] and [`ViewSink`].

// Crate-level lint configuration
#![allow(clippy::cast_precision_loss)] // Pixel math over usize offsets
#![allow(clippy::module_name_repetitions)] // Allow text::TextEdit etc
#![allow(clippy::missing_errors_doc)] // Errors are the crate enum throughout
#![allow(clippy::missing_panics_doc)] // Panics only on broken invariants
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::inherent_to_string)] // to_string methods are convenient
#![allow(clippy::should_implement_trait)] // from_str naming is intentional
#![allow(clippy::float_cmp)] // Widths are sums of exact measurements

pub mod error;
pub mod event;
pub mod input;
pub mod text;

pub use error::{Error, Result};
pub use event::{ReplaceText, SetSelectionRange, SubscriptionId};
pub use input::{KeyCode, KeyEvent, KeyModifiers, command_for_key};
pub use text::{
    BufferModel, Command, Editor, EditorOptions, EditHandler, Frame, Layout, MonospaceMeasurer,
    Selection, TextMeasurer, ViewSink, VisualCursor, minimal_edit,
};
