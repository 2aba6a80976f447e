//! Remote-control keypad input events.
//!
//! The key-dispatch layer maps native remote-control codes to these enums
//! and delivers them strictly one at a time.

use serde::{Deserialize, Serialize};

/// Highest digit key on the keypad.
pub const MAX_DIGIT: u8 = 9;

/// A keypad event delivered to a focused text-entry field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// A remote-control key was pressed.
    Press(Key),
    /// The text-entry field gained focus.
    FocusGained,
    /// The text-entry field lost focus.
    FocusLost,
}

/// Keys relevant to multi-tap text entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Numeric key 0-9.
    Digit(u8),
    /// Delete the last character.
    Backspace,
    /// Accept the entered text.
    Confirm,
    /// Leave the field without a result.
    Cancel,
}

impl Key {
    /// Build a digit key, rejecting anything above 9.
    pub fn digit(n: u8) -> Option<Self> {
        (n <= MAX_DIGIT).then_some(Self::Digit(n))
    }

    /// The digit value, if this is a numeric key.
    pub fn as_digit(&self) -> Option<u8> {
        match self {
            Self::Digit(n) => Some(*n),
            _ => None,
        }
    }
}
