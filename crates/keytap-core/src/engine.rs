//! The multi-tap engine: key presses in, text out.
//!
//! Pressing the same key again while its cycle window is open replaces the
//! character it just produced with the next one on that key. Any other press
//! appends a fresh character. The engine never renders; the caller owns the
//! text and passes it back in on every press.

use keytap_types::config::{DEFAULT_CYCLE_TIMEOUT_MS, DEFAULT_MAX_CHARS, EngineConfig};
use keytap_types::error::{KeytapError, Result};

use crate::alphabet::Alphabet;
use crate::charset::KeyCharacterSet;
use crate::timer::{Clock, CycleTimer, SystemClock};

/// Whether a press is still waiting to be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No cycle window open.
    Idle,
    /// The last press can still be cycled by pressing its key again.
    Pending,
}

/// Per-field multi-tap state.
///
/// Key presses and timer polls must arrive on one sequential timeline;
/// the engine is not meant to be shared across threads.
#[derive(Debug)]
pub struct MultiTapEngine<C: Clock = SystemClock> {
    keypad: Option<Vec<KeyCharacterSet>>,
    last_key: Option<usize>,
    /// Whether the press behind the open window actually placed a character.
    placed: bool,
    timer: CycleTimer,
    max_chars: usize,
    cycle_timeout_ms: u64,
    clock: C,
}

impl<C: Clock> MultiTapEngine<C> {
    /// Create an engine with no keypad. Call [`init_keypad`](Self::init_keypad)
    /// before the first press.
    pub fn new(clock: C) -> Self {
        Self {
            keypad: None,
            last_key: None,
            placed: false,
            timer: CycleTimer::new(),
            max_chars: DEFAULT_MAX_CHARS,
            cycle_timeout_ms: DEFAULT_CYCLE_TIMEOUT_MS,
            clock,
        }
    }

    /// Create an engine with limits and keypad taken from `config`.
    pub fn with_config(config: &EngineConfig, clock: C) -> Result<Self> {
        config.validate()?;
        let mut engine = Self::new(clock);
        engine.set_max_chars(config.max_chars);
        engine.set_cycle_timeout(config.cycle_timeout_ms);
        engine.init_keypad(&Alphabet::resolve(config)?)?;
        Ok(engine)
    }

    /// Cap the text length for all following presses. Must be positive.
    pub fn set_max_chars(&mut self, max: usize) {
        self.max_chars = max;
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn set_cycle_timeout(&mut self, ms: u64) {
        self.cycle_timeout_ms = ms;
    }

    pub fn cycle_timeout(&self) -> u64 {
        self.cycle_timeout_ms
    }

    /// Build one character set per alphabet entry, indexed by position.
    ///
    /// Any open cycle window is discarded.
    pub fn init_keypad(&mut self, alphabet: &Alphabet) -> Result<()> {
        let keypad = alphabet.build_keypad()?;
        log::info!("Keypad initialized with {} keys", keypad.len());
        self.keypad = Some(keypad);
        self.last_key = None;
        self.placed = false;
        self.timer.cancel();
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.keypad.is_some()
    }

    /// Number of keys on the keypad, 0 before initialization.
    pub fn key_count(&self) -> usize {
        self.keypad.as_ref().map_or(0, Vec::len)
    }

    /// Apply one key press to `current_text` and return the new text.
    ///
    /// `None` is treated as empty text.
    pub fn input_char(&mut self, key: usize, current_text: Option<&str>) -> Result<String> {
        self.poll();
        let mut text = current_text.unwrap_or_default().to_string();

        let keypad = self.keypad.as_mut().ok_or(KeytapError::Uninitialized)?;
        let keys = keypad.len();
        if key >= keys {
            return Err(KeytapError::InvalidKey { key, keys });
        }

        let cycling = self.last_key == Some(key)
            && self.timer.is_pending()
            && self.placed
            && keypad[key].character_len() > 1
            && text.ends_with(keypad[key].last_yielded());
        self.timer.cancel();

        if cycling {
            let set = &mut keypad[key];
            let placed = set.last_yielded().to_string();
            text.truncate(text.len() - placed.len());
            let room = self.max_chars.saturating_sub(text.chars().count());
            // Skip tokens that would overflow; a full lap lands back on `placed`.
            let mut next = placed;
            for _ in 0..set.character_len() {
                let candidate = set.character_and_move_next();
                if candidate.chars().count() <= room {
                    next = candidate.to_string();
                    break;
                }
            }
            log::debug!("Key {key} cycled to {next:?}");
            text.push_str(&next);
        } else {
            if let Some(last) = self.last_key {
                if let Some(set) = keypad.get_mut(last) {
                    set.reset_pointer();
                }
            }
            let len = text.chars().count();
            if len + keypad[key].peek().chars().count() <= self.max_chars {
                let next = keypad[key].character_and_move_next();
                log::debug!("Key {key} appended {next:?}");
                text.push_str(next);
                self.placed = true;
            } else {
                log::debug!("Key {key} dropped: text at limit of {}", self.max_chars);
                self.placed = false;
            }
        }

        let now = self.clock.now_ms();
        self.timer.schedule(now, self.cycle_timeout_ms);
        self.last_key = Some(key);
        Ok(text)
    }

    /// Fire the cycle timer if its window has closed.
    ///
    /// Returns `true` if a pending character was committed by this call.
    pub fn poll(&mut self) -> bool {
        let fired = self.timer.fire_if_due(self.clock.now_ms());
        if fired {
            log::debug!("Cycle window closed for key {:?}", self.last_key);
        }
        fired
    }

    /// Whether the cycle window of the last press is still open.
    pub fn is_pending(&self) -> bool {
        matches!(self.timer.remaining_ms(self.clock.now_ms()), Some(ms) if ms > 0)
    }

    pub fn state(&self) -> EngineState {
        if self.is_pending() {
            EngineState::Pending
        } else {
            EngineState::Idle
        }
    }

    pub fn last_key(&self) -> Option<usize> {
        self.last_key
    }

    /// Key whose character can still be cycled.
    pub fn pending_key(&self) -> Option<usize> {
        self.last_key.filter(|_| self.placed && self.is_pending())
    }

    /// The character the pending key last produced.
    pub fn pending_character(&self) -> Option<&str> {
        let key = self.pending_key()?;
        let keypad = self.keypad.as_ref()?;
        keypad.get(key).map(KeyCharacterSet::last_yielded)
    }

    /// The token the last press placed, while its key still remembers it.
    ///
    /// Cleared by [`commit`](Self::commit) and by a press that was dropped.
    pub fn last_token(&self) -> Option<&str> {
        let key = self.last_key.filter(|_| self.placed)?;
        let keypad = self.keypad.as_ref()?;
        keypad.get(key).map(KeyCharacterSet::last_yielded)
    }

    /// Time left in the open cycle window.
    pub fn remaining_ms(&self) -> Option<u64> {
        self.timer.remaining_ms(self.clock.now_ms())
    }

    /// Commit the pending character now and rewind its key.
    pub fn commit(&mut self) {
        self.timer.cancel();
        self.placed = false;
        if let (Some(last), Some(keypad)) = (self.last_key, self.keypad.as_mut()) {
            if let Some(set) = keypad.get_mut(last) {
                set.reset_pointer();
            }
        }
    }

    /// Commit and drop the keypad. The engine must be re-initialized before
    /// it accepts presses again.
    pub fn teardown(&mut self) {
        self.commit();
        self.keypad = None;
        self.last_key = None;
        log::debug!("Keypad released");
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
