//! Keyboard input handling.
//!
//! # Keybindings
//!
//! | Key | Action |
//! |-----|--------|
//! | `q` / Esc | Exit |
//! | Ctrl-C | Exit (treated as a clean shutdown) |
//!
//! Terminal resizes are reported through the same path so the next frame
//! is laid out for the new size.

use crate::surface::KeySequence;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the render loop should do with an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Nothing to do.
    Ignored,
    /// User requested quit.
    Quit,
    /// Lay out the next frame at this size.
    Resize { width: u16, height: u16 },
}

/// Decide what a decoded key means to the render loop.
pub fn handle_key(key: KeySequence) -> InputResult {
    match key {
        KeySequence::Char('q') | KeySequence::Escape | KeySequence::Interrupt => InputResult::Quit,
        KeySequence::Resize { width, height } => InputResult::Resize { width, height },
        KeySequence::None | KeySequence::Char(_) | KeySequence::Alt(_) | KeySequence::Other => {
            InputResult::Ignored
        }
    }
}

/// Decode a crossterm event into a [`KeySequence`].
pub fn translate(event: Event) -> KeySequence {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Resize(width, height) => KeySequence::Resize { width, height },
        _ => KeySequence::Other,
    }
}

fn translate_key(key: KeyEvent) -> KeySequence {
    // Only presses count; some platforms also report repeats and releases.
    if key.kind == KeyEventKind::Release {
        return KeySequence::None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            KeySequence::Interrupt
        }
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::ALT) => KeySequence::Alt(c),
        KeyCode::Char(c) => KeySequence::Char(c),
        KeyCode::Esc => KeySequence::Escape,
        _ => KeySequence::Other,
    }
}
