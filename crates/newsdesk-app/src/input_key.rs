//! Terminal-independent key events.
//!
//! The TUI converts crossterm events into [`InputKey`] so the update logic
//! never sees terminal types.

/// A key press after modifier folding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    /// Printable character
    Char(char),
    /// Character with Ctrl held
    CharCtrl(char),

    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,

    Enter,
    /// Alt+Enter, used for newlines in multi-line inputs
    AltEnter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Delete,

    F(u8),
}

impl InputKey {
    /// Ctrl+C quits from every mode.
    pub fn is_force_quit(&self) -> bool {
        matches!(self, InputKey::CharCtrl('c'))
    }

    /// Digit keys `1`..`9` as a zero-based index.
    pub fn digit_index(&self) -> Option<usize> {
        match self {
            InputKey::Char(c @ '1'..='9') => c.to_digit(10).map(|d| d as usize - 1),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_force_quit() {
        assert!(InputKey::CharCtrl('c').is_force_quit());
        assert!(!InputKey::Char('c').is_force_quit());
    }

    #[test]
    fn test_digit_index() {
        assert_eq!(InputKey::Char('1').digit_index(), Some(0));
        assert_eq!(InputKey::Char('9').digit_index(), Some(8));
        assert_eq!(InputKey::Char('0').digit_index(), None);
        assert_eq!(InputKey::Enter.digit_index(), None);
    }
}
