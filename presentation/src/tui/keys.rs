//! Key mapping for the chat screen
//!
//! The screen has a single input line, so there is no mode switching:
//! printable keys edit the input, Enter submits, Esc or Ctrl+C quits.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// User action derived from key events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Submit the current input
    Submit,
    /// Quit application
    Quit,
    /// Insert character
    InsertChar(char),
    /// Delete character before the cursor (Backspace)
    DeleteChar,
    /// Delete character under the cursor (Delete)
    DeleteForward,
    /// Move cursor left
    CursorLeft,
    /// Move cursor right
    CursorRight,
    /// Move to start of line
    CursorStart,
    /// Move to end of line
    CursorEnd,
    /// Scroll transcript up one line
    ScrollUp,
    /// Scroll transcript down one line
    ScrollDown,
    /// Scroll transcript up one page
    PageUp,
    /// Scroll transcript down one page
    PageDown,
    /// No action
    None,
}

impl Action {
    /// Whether this action edits the input buffer
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            Action::InsertChar(_)
                | Action::DeleteChar
                | Action::DeleteForward
                | Action::CursorLeft
                | Action::CursorRight
                | Action::CursorStart
                | Action::CursorEnd
        )
    }
}

/// Key event handler - maps key events to actions
pub struct KeyHandler;

impl KeyHandler {
    pub fn handle(key: KeyEvent) -> Action {
        // Some terminals report releases too
        if key.kind == KeyEventKind::Release {
            return Action::None;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
            (KeyCode::Esc, _) => Action::Quit,
            (KeyCode::Enter, _) => Action::Submit,

            // Emacs-style line movement
            (KeyCode::Char('a'), KeyModifiers::CONTROL) => Action::CursorStart,
            (KeyCode::Char('e'), KeyModifiers::CONTROL) => Action::CursorEnd,

            (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => Action::InsertChar(c),
            (KeyCode::Backspace, _) => Action::DeleteChar,
            (KeyCode::Delete, _) => Action::DeleteForward,
            (KeyCode::Left, _) => Action::CursorLeft,
            (KeyCode::Right, _) => Action::CursorRight,
            (KeyCode::Home, _) => Action::CursorStart,
            (KeyCode::End, _) => Action::CursorEnd,

            (KeyCode::Up, _) => Action::ScrollUp,
            (KeyCode::Down, _) => Action::ScrollDown,
            (KeyCode::PageUp, _) => Action::PageUp,
            (KeyCode::PageDown, _) => Action::PageDown,

            _ => Action::None,
        }
    }
}
