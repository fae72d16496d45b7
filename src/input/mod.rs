//! Keyboard input for the editor.
//!
//! Hosts translate their platform key events into [`KeyEvent`]s;
//! [`command_for_key`] maps those onto editor commands.

mod keyboard;
mod keymap;

pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};
pub use keymap::command_for_key;
