//! Fuzz target for editor command sequences.
//!
//! Drives a local editor with arbitrary commands, pointer input and wrap
//! width changes. No sequence may panic or leave the layout out of step
//! with the text.

#![no_main]

use arbitrary::Arbitrary;
use goatee::{Command, Editor, EditorOptions, MonospaceMeasurer};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Action {
    Insert(String),
    Left { word: bool, extend: bool },
    Right { word: bool, extend: bool },
    Up(bool),
    Down(bool),
    Home(bool),
    End(bool),
    Backspace(bool),
    Delete(bool),
    SelectAll,
    Copy,
    Cut,
    Paste,
    Pointer { x: u8, y: u8, drag: bool },
    Wrap(u8),
    Sync(String),
}

fuzz_target!(|actions: Vec<Action>| {
    let options = EditorOptions::default().with_wrap_width(16.0);
    let mut ed = Editor::local("", MonospaceMeasurer::default(), options);
    for action in actions {
        let result = match action {
            Action::Insert(text) => ed.execute(Command::Insert(text)),
            Action::Left { word, extend } => ed.execute(Command::MoveLeft { word, extend }),
            Action::Right { word, extend } => ed.execute(Command::MoveRight { word, extend }),
            Action::Up(extend) => ed.execute(Command::MoveUp { extend }),
            Action::Down(extend) => ed.execute(Command::MoveDown { extend }),
            Action::Home(extend) => ed.execute(Command::LineStart { extend }),
            Action::End(extend) => ed.execute(Command::LineEnd { extend }),
            Action::Backspace(word) => ed.execute(Command::DeleteBackward { word }),
            Action::Delete(word) => ed.execute(Command::DeleteForward { word }),
            Action::SelectAll => ed.execute(Command::SelectAll),
            Action::Copy => ed.execute(Command::Copy),
            Action::Cut => ed.execute(Command::Cut),
            Action::Paste => ed.execute(Command::Paste),
            Action::Pointer { x, y, drag } => {
                let (x, y) = (f32::from(x), f32::from(y));
                if drag {
                    ed.pointer_move(x, y)
                } else {
                    ed.pointer_up().and_then(|()| ed.pointer_down(x, y))
                }
            }
            Action::Wrap(cells) => ed.set_wrap_width(f32::from(cells)),
            Action::Sync(text) => ed.sync_text(&text),
        };
        result.expect("local editor operations succeed");
        assert_eq!(ed.layout().len(), ed.text().chars().count());
    }
});
