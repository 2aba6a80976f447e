//! The cyclic character set bound to one key.

use keytap_types::config::KeySpec;
use keytap_types::error::{KeytapError, Result};

/// Ordered characters of one key plus the rotation pointer.
///
/// A "character" is a token and may hold more than one `char`. The pointer
/// always names the token the next press yields and wraps to 0 after the
/// last one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCharacterSet {
    characters: Vec<String>,
    pointer: usize,
}

impl KeyCharacterSet {
    /// Split a comma-separated list into tokens.
    pub fn from_csv(chars_csv: &str) -> Result<Self> {
        if chars_csv.is_empty() {
            return Err(KeytapError::Config("empty character set".into()));
        }
        Self::from_tokens(chars_csv.split(',').map(str::to_string).collect())
    }

    /// Build from an explicit token list.
    pub fn from_tokens(tokens: Vec<String>) -> Result<Self> {
        if tokens.is_empty() {
            return Err(KeytapError::Config("empty character set".into()));
        }
        if let Some(pos) = tokens.iter().position(String::is_empty) {
            return Err(KeytapError::Config(format!(
                "empty token at position {pos} in character set"
            )));
        }
        Ok(Self {
            characters: tokens,
            pointer: 0,
        })
    }

    /// Build from either config form.
    pub fn from_spec(spec: &KeySpec) -> Result<Self> {
        match spec {
            KeySpec::Csv(csv) => Self::from_csv(csv),
            KeySpec::Tokens(tokens) => Self::from_tokens(tokens.clone()),
        }
    }

    /// Return the current token and advance the pointer.
    pub fn character_and_move_next(&mut self) -> &str {
        let current = self.pointer;
        self.pointer = (self.pointer + 1) % self.characters.len();
        &self.characters[current]
    }

    /// The token returned by the last press.
    ///
    /// With the pointer at 0 this is the first token, so it cannot tell
    /// "wrapped after the last token" apart from "not pressed yet".
    pub fn previous_character(&self) -> &str {
        let idx = self.pointer.saturating_sub(1);
        &self.characters[idx]
    }

    /// The token returned by the last press, accounting for wrap-around.
    pub fn last_yielded(&self) -> &str {
        let len = self.characters.len();
        &self.characters[(self.pointer + len - 1) % len]
    }

    /// Token the next press yields, without advancing.
    pub fn peek(&self) -> &str {
        &self.characters[self.pointer]
    }

    pub fn reset_pointer(&mut self) {
        self.pointer = 0;
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Number of tokens on this key.
    pub fn character_len(&self) -> usize {
        self.characters.len()
    }

    pub fn characters(&self) -> &[String] {
        &self.characters
    }
}
