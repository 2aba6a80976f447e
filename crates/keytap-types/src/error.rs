//! Error types for keytap.

use std::io;

/// Errors produced by the keytap crates.
///
/// All variants are local configuration or programmer errors. None of them
/// are retryable.
#[derive(Debug, thiserror::Error)]
pub enum KeytapError {
    #[error("config error: {0}")]
    Config(String),

    #[error("keypad used before initialization")]
    Uninitialized,

    #[error("invalid key {key}: keypad has {keys} keys")]
    InvalidKey { key: usize, keys: usize },

    #[error("unknown locale: {0}")]
    UnknownLocale(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, KeytapError>;
