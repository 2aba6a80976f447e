//! Engine configuration, loaded from TOML.
//!
//! ```toml
//! cycle_timeout_ms = 1000
//! max_chars = 32
//! locale = "de"
//! # Optional custom alphabet, one entry per key 0-9.
//! # keys = [" ,0", [".", ",", "?", "!", "1"], "a,b,c,2", ...]
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{KeytapError, Result};

/// Default cycle window after which a pending character is committed.
pub const DEFAULT_CYCLE_TIMEOUT_MS: u64 = 1000;

/// Default cap on entered text length, in characters.
pub const DEFAULT_MAX_CHARS: usize = 64;

/// The characters bound to one key.
///
/// Either a comma-separated string (`"a,b,c"`) or an explicit list of
/// tokens (`["a", "b", "c"]`). Only the list form can bind `,` itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum KeySpec {
    Csv(String),
    Tokens(Vec<String>),
}

impl From<&str> for KeySpec {
    fn from(csv: &str) -> Self {
        Self::Csv(csv.to_string())
    }
}

/// Multi-tap engine settings for one text-entry field.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Cycle window in milliseconds.
    #[serde(default = "default_cycle_timeout_ms")]
    pub cycle_timeout_ms: u64,
    /// Upper bound on the entered text, in characters.
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
    /// Locale tag selecting the built-in alphabet.
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Custom alphabet overriding the locale table.
    #[serde(default)]
    pub keys: Option<Vec<KeySpec>>,
}

fn default_cycle_timeout_ms() -> u64 {
    DEFAULT_CYCLE_TIMEOUT_MS
}
fn default_max_chars() -> usize {
    DEFAULT_MAX_CHARS
}
fn default_locale() -> String {
    "en".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cycle_timeout_ms: default_cycle_timeout_ms(),
            max_chars: default_max_chars(),
            locale: default_locale(),
            keys: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Reject limits the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.max_chars == 0 {
            return Err(KeytapError::Config("max_chars must be positive".into()));
        }
        if self.cycle_timeout_ms == 0 {
            return Err(KeytapError::Config(
                "cycle_timeout_ms must be positive".into(),
            ));
        }
        if self.keys.as_ref().is_some_and(Vec::is_empty) {
            return Err(KeytapError::Config("keys must not be empty".into()));
        }
        Ok(())
    }
}
