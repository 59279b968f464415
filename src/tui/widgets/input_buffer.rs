//! Editable text of one dialog field.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Field text plus a caret. The caret is a byte offset that always sits on
/// a char boundary.
#[derive(Debug, Default)]
pub struct InputBuffer {
    content: String,
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    /// Caret as a byte offset into [`text`](Self::text).
    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Caret in characters, for placing the terminal cursor.
    pub fn cursor_column(&self) -> usize {
        self.content[..self.cursor].chars().count()
    }

    /// Replace the content and park the caret at the end.
    pub fn set(&mut self, text: &str) {
        self.content.clear();
        self.content.push_str(text);
        self.cursor = self.content.len();
    }

    pub fn clear(&mut self) {
        self.set("");
    }

    pub fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Apply a plain editing key. Returns `true` if the content or caret
    /// changed. `Enter` is left to the caller, as are chorded keys.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return false;
        }
        let before = self.cursor;
        match key.code {
            KeyCode::Char(c) => {
                self.insert_char(c);
                return true;
            }
            KeyCode::Backspace => match self.prev_boundary() {
                Some(start) => {
                    self.content.replace_range(start..self.cursor, "");
                    self.cursor = start;
                }
                None => return false,
            },
            KeyCode::Delete => match self.next_boundary() {
                Some(end) => {
                    self.content.replace_range(self.cursor..end, "");
                    return true;
                }
                None => return false,
            },
            KeyCode::Left => self.cursor = self.prev_boundary().unwrap_or(self.cursor),
            KeyCode::Right => self.cursor = self.next_boundary().unwrap_or(self.cursor),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.content.len(),
            _ => return false,
        }
        self.cursor != before
    }

    /// Start of the char before the caret.
    fn prev_boundary(&self) -> Option<usize> {
        self.content[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    /// End of the char after the caret.
    fn next_boundary(&self) -> Option<usize> {
        self.content[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn typed(text: &str) -> InputBuffer {
        let mut buf = InputBuffer::new();
        for c in text.chars() {
            buf.handle_key(&key(KeyCode::Char(c)));
        }
        buf
    }

    #[test]
    fn test_typing_advances_caret() {
        let buf = typed("hi");
        assert_eq!(buf.text(), "hi");
        assert_eq!(buf.cursor_position(), 2);
    }

    #[test]
    fn test_caret_moves_and_edits_in_the_middle() {
        let mut buf = typed("abc");
        assert!(buf.handle_key(&key(KeyCode::Left)));
        assert!(buf.handle_key(&key(KeyCode::Backspace)));
        assert_eq!(buf.text(), "ac");
        assert!(buf.handle_key(&key(KeyCode::Delete)));
        assert_eq!(buf.text(), "a");
        assert!(!buf.handle_key(&key(KeyCode::Delete)));
        assert!(!buf.handle_key(&key(KeyCode::End)));
        assert!(buf.handle_key(&key(KeyCode::Home)));
        assert!(!buf.handle_key(&key(KeyCode::Backspace)));
    }

    #[test]
    fn test_set_and_multibyte_caret() {
        let mut buf = InputBuffer::new();
        buf.set("café");
        assert_eq!(buf.cursor_position(), 5);
        assert_eq!(buf.cursor_column(), 4);
        buf.handle_key(&key(KeyCode::Backspace));
        assert_eq!(buf.text(), "caf");
        buf.handle_key(&key(KeyCode::Home));
        buf.handle_key(&key(KeyCode::Right));
        assert_eq!(buf.cursor_column(), 1);
    }

    #[test]
    fn test_chorded_keys_and_enter_are_not_edits() {
        let mut buf = InputBuffer::new();
        assert!(buf.handle_key(&KeyEvent::new(KeyCode::Char('Y'), KeyModifiers::SHIFT)));
        assert!(!buf.handle_key(&KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)));
        assert!(!buf.handle_key(&key(KeyCode::Enter)));
        assert_eq!(buf.text(), "Y");
    }

    #[test]
    fn test_clear_resets_caret() {
        let mut buf = typed("gone");
        buf.clear();
        assert_eq!(buf.text(), "");
        assert_eq!(buf.cursor_position(), 0);
    }
}
