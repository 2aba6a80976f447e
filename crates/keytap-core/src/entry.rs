//! Text entry session for a focused input field.
//!
//! Owns the text buffer and a [`MultiTapEngine`] for as long as the field
//! is on screen. Focus loss releases the keypad, focus gain rebuilds it.

use keytap_types::config::EngineConfig;
use keytap_types::error::Result;
use keytap_types::input::{Key, KeyEvent};

use crate::alphabet::Alphabet;
use crate::engine::MultiTapEngine;
use crate::timer::{Clock, SystemClock};

/// Runtime state of one multi-tap text field.
#[derive(Debug)]
pub struct TextEntry<C: Clock = SystemClock> {
    engine: MultiTapEngine<C>,
    alphabet: Alphabet,
    /// The text being edited.
    buffer: String,
    /// Whether the field has focus and accepts keys.
    active: bool,
    /// Whether the user confirmed or cancelled (`None` = still editing).
    result: Option<bool>,
}

impl<C: Clock> TextEntry<C> {
    /// Create a focused, empty entry.
    pub fn new(config: &EngineConfig, clock: C) -> Result<Self> {
        Self::with_text(config, clock, "")
    }

    /// Create a focused entry pre-filled with `initial`.
    pub fn with_text(config: &EngineConfig, clock: C, initial: &str) -> Result<Self> {
        config.validate()?;
        let alphabet = Alphabet::resolve(config)?;
        let mut engine = MultiTapEngine::new(clock);
        engine.set_max_chars(config.max_chars);
        engine.set_cycle_timeout(config.cycle_timeout_ms);
        engine.init_keypad(&alphabet)?;
        Ok(Self {
            engine,
            alphabet,
            buffer: initial.to_string(),
            active: true,
            result: None,
        })
    }

    /// Handle one event. Returns `true` if the entry consumed it.
    pub fn handle_event(&mut self, event: &KeyEvent) -> Result<bool> {
        match event {
            KeyEvent::FocusGained => {
                if !self.active {
                    self.engine.init_keypad(&self.alphabet)?;
                    self.active = true;
                    self.result = None;
                }
                Ok(true)
            },
            KeyEvent::FocusLost => {
                if self.active {
                    self.engine.teardown();
                    self.active = false;
                }
                Ok(true)
            },
            KeyEvent::Press(key) => {
                if !self.active {
                    return Ok(false);
                }
                self.handle_key(*key)?;
                Ok(true)
            },
        }
    }

    fn handle_key(&mut self, key: Key) -> Result<()> {
        match key {
            Key::Digit(d) => {
                self.buffer = self.engine.input_char(usize::from(d), Some(&self.buffer))?;
            },
            Key::Backspace => {
                // A token still known to the engine goes as a whole.
                let token = self
                    .engine
                    .last_token()
                    .filter(|token| self.buffer.ends_with(*token))
                    .map(str::len);
                self.engine.commit();
                match token {
                    Some(len) => self.buffer.truncate(self.buffer.len() - len),
                    None => {
                        self.buffer.pop();
                    },
                }
            },
            Key::Confirm => self.finish(true),
            Key::Cancel => self.finish(false),
        }
        Ok(())
    }

    fn finish(&mut self, confirmed: bool) {
        self.engine.teardown();
        self.active = false;
        self.result = Some(confirmed);
        log::debug!(
            "Text entry {}",
            if confirmed { "confirmed" } else { "cancelled" }
        );
    }

    /// Close an expired cycle window. Call once per frame.
    pub fn tick(&mut self) -> bool {
        self.engine.poll()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// The entered text, once the user confirmed.
    pub fn confirmed_text(&self) -> Option<&str> {
        match self.result {
            Some(true) => Some(&self.buffer),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.result == Some(false)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The character still cycling, for highlighting at the end of the text.
    pub fn pending_char(&self) -> Option<&str> {
        self.engine.pending_character()
    }

    pub fn engine(&self) -> &MultiTapEngine<C> {
        &self.engine
    }
}
