#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Once;

use goatee::text::Size;
use goatee::{Editor, EditorOptions, KeyCode, KeyEvent, KeyModifiers, TextMeasurer};

pub const W_WIDTH: f32 = 10.0;
pub const T_WIDTH: f32 = 7.0;
pub const SPACE_WIDTH: f32 = 5.0;
pub const LINE_HEIGHT: f32 = 16.0;

/// Fits 37 W's per row.
pub const WRAP_WIDTH: f32 = 375.0;

pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// Measurer with a fixed width per character and one line height.
#[derive(Clone, Debug)]
pub struct TableMeasurer {
    widths: HashMap<char, f32>,
    fallback: f32,
}

impl TableMeasurer {
    pub fn new(fallback: f32) -> Self {
        Self {
            widths: HashMap::new(),
            fallback,
        }
    }

    pub fn with(mut self, ch: char, width: f32) -> Self {
        self.widths.insert(ch, width);
        self
    }

    /// W, T and space at the default test widths.
    pub fn standard() -> Self {
        Self::new(W_WIDTH)
            .with('W', W_WIDTH)
            .with('T', T_WIDTH)
            .with(' ', SPACE_WIDTH)
    }
}

impl TextMeasurer for TableMeasurer {
    fn measure(&self, run: &str, _pos: usize) -> Size {
        let width = run
            .chars()
            .map(|ch| match ch {
                '\n' => 0.0,
                ch => *self.widths.get(&ch).unwrap_or(&self.fallback),
            })
            .sum();
        Size::new(width, LINE_HEIGHT)
    }
}

pub fn editor_with(measurer: TableMeasurer) -> Editor {
    init_tracing();
    let options = EditorOptions::default().with_wrap_width(WRAP_WIDTH);
    let mut editor = Editor::local("", measurer, options);
    editor.focus().unwrap();
    editor
}

/// Focused, empty editor over the standard measurer.
pub fn editor() -> Editor {
    editor_with(TableMeasurer::standard())
}

/// Type each character as a key press.
pub fn type_text(editor: &mut Editor, text: &str) {
    for ch in text.chars() {
        let key = if ch == '\n' {
            KeyEvent::key(KeyCode::Enter)
        } else {
            KeyEvent::char(ch)
        };
        assert!(editor.handle_key(key).unwrap(), "key {ch:?} not handled");
    }
}

/// Parse one key combination such as `left`, `shift+ctrl+left` or `meta+A`.
pub fn parse_key(cmd: &str) -> KeyEvent {
    let mut modifiers = KeyModifiers::empty();
    let mut parts: Vec<&str> = cmd.split('+').collect();
    let name = parts.pop().unwrap();
    for part in parts {
        modifiers |= match part {
            "shift" => KeyModifiers::SHIFT,
            "ctrl" => KeyModifiers::CTRL,
            "meta" => KeyModifiers::META,
            "alt" => KeyModifiers::ALT,
            other => panic!("unknown modifier {other}"),
        };
    }
    let code = match name {
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "end" => KeyCode::End,
        "home" => KeyCode::Home,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        c if c.chars().count() == 1 => KeyCode::Char(c.chars().next().unwrap()),
        other => panic!("unknown key {other}"),
    };
    KeyEvent::new(code, modifiers)
}

/// Fire a space-separated sequence of key combinations.
pub fn keys(editor: &mut Editor, seq: &str) {
    for cmd in seq.split(' ') {
        editor.handle_key(parse_key(cmd)).unwrap();
    }
}

/// Text plus selection, with the end dropped when the selection is collapsed.
pub fn state(editor: &Editor) -> (String, usize, Option<usize>) {
    let (start, end) = editor.selection_range();
    let end = (start != end).then_some(end);
    (editor.text(), start, end)
}

/// Cursor offset (selection end), row and left.
pub fn cursor_state(editor: &Editor) -> (usize, usize, f32) {
    let cursor = editor.cursor();
    (editor.selection_range().1, cursor.row, cursor.left)
}

/// Rows rendered between bars, newlines shown as `⏎`.
pub fn render_rows(editor: &Editor) -> String {
    let layout = editor.layout();
    (0..layout.row_count())
        .map(|row| format!("|{}|", layout.row_text(row).replace('\n', "⏎")))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn repeat(s: &str, n: usize) -> String {
    s.repeat(n)
}
