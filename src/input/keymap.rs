//! Key-to-command mapping.

use crate::input::keyboard::{KeyCode, KeyEvent};
use crate::text::Command;

/// Command bound to `key`, if any.
///
/// Meta combinations are shortcuts (select all, copy, cut, paste). Plain or
/// shifted printable ASCII characters are typed; anything else outside ASCII
/// is ignored. Ctrl makes horizontal movement and deletion word-wise.
#[must_use]
pub fn command_for_key(key: &KeyEvent) -> Option<Command> {
    if key.meta() {
        return match key.code.char()?.to_ascii_lowercase() {
            'a' => Some(Command::SelectAll),
            'c' => Some(Command::Copy),
            'x' => Some(Command::Cut),
            'v' => Some(Command::Paste),
            _ => None,
        };
    }

    let extend = key.shift();
    let word = key.ctrl();
    let command = match key.code {
        KeyCode::Char(ch) => {
            if key.ctrl() || key.alt() || !ch.is_ascii() || ch.is_ascii_control() {
                return None;
            }
            Command::insert_char(ch)
        }
        KeyCode::Enter => Command::insert_char('\n'),
        KeyCode::Left => Command::MoveLeft { word, extend },
        KeyCode::Right => Command::MoveRight { word, extend },
        KeyCode::Up => Command::MoveUp { extend },
        KeyCode::Down => Command::MoveDown { extend },
        KeyCode::Home => Command::LineStart { extend },
        KeyCode::End => Command::LineEnd { extend },
        KeyCode::Backspace => Command::DeleteBackward { word },
        KeyCode::Delete => Command::DeleteForward { word },
        KeyCode::Tab | KeyCode::Esc => return None,
    };
    Some(command)
}
