//! Per-locale "SMS alphabets": the characters bound to each digit key.
//!
//! Built-in tables cover the Latin-script locales the keypad ships with.
//! Custom alphabets come from [`EngineConfig::keys`] or a standalone TOML
//! document:
//!
//! ```toml
//! keys = [" ,0", [".", ",", "?", "!", "1"], "a,b,c,2", "d,e,f,3", ...]
//! ```

use std::path::Path;

use serde::Deserialize;

use keytap_types::config::{EngineConfig, KeySpec};
use keytap_types::error::{KeytapError, Result};

use crate::charset::KeyCharacterSet;

/// Number of digit keys on a remote-control keypad.
pub const KEY_COUNT: usize = 10;

/// Locale used when a configured locale has no table.
pub const FALLBACK_LOCALE: &str = "en";

/// Base Latin layout shared by all locales.
const LATIN: [&[&str]; KEY_COUNT] = [
    &[" ", "0"],
    &[".", ",", "?", "!", "1", "'", "-", "@"],
    &["a", "b", "c", "2"],
    &["d", "e", "f", "3"],
    &["g", "h", "i", "4"],
    &["j", "k", "l", "5"],
    &["m", "n", "o", "6"],
    &["p", "q", "r", "s", "7"],
    &["t", "u", "v", "8"],
    &["w", "x", "y", "z", "9"],
];

type Extras = &'static [(usize, &'static [&'static str])];

const DE: Extras = &[(2, &["ä"]), (6, &["ö"]), (7, &["ß"]), (8, &["ü"])];

const FR: Extras = &[
    (2, &["à", "â", "ç"]),
    (3, &["é", "è", "ê", "ë"]),
    (4, &["î", "ï"]),
    (6, &["ô"]),
    (8, &["ù", "û"]),
];

const ES: Extras = &[
    (1, &["¿", "¡"]),
    (2, &["á"]),
    (3, &["é"]),
    (4, &["í"]),
    (6, &["ñ", "ó"]),
    (8, &["ú", "ü"]),
];

const IT: Extras = &[
    (2, &["à"]),
    (3, &["é", "è"]),
    (4, &["ì"]),
    (6, &["ò"]),
    (8, &["ù"]),
];

const NL: Extras = &[(3, &["ë"]), (4, &["ï"])];

/// Locales with a built-in table.
pub const BUILTIN_LOCALES: &[&str] = &["en", "de", "fr", "es", "it", "nl", "numeric"];

/// Standalone alphabet document.
#[derive(Debug, Deserialize)]
struct AlphabetDocument {
    keys: Vec<KeySpec>,
}

/// The character specs for every key, indexed by key number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    keys: Vec<KeySpec>,
}

impl Alphabet {
    /// Built-in table for a locale tag such as `"de"` or `"fr-CA"`.
    pub fn builtin(locale: &str) -> Result<Self> {
        let tag = normalize_locale(locale);
        let extras: Extras = match tag.as_str() {
            "en" => &[],
            "de" => DE,
            "fr" => FR,
            "es" => ES,
            "it" => IT,
            "nl" => NL,
            "numeric" => return Ok(Self::numeric()),
            _ => return Err(KeytapError::UnknownLocale(locale.to_string())),
        };
        Ok(Self::latin_with(extras))
    }

    /// Each key yields only its own digit.
    pub fn numeric() -> Self {
        let keys = (0..KEY_COUNT)
            .map(|d| KeySpec::Tokens(vec![d.to_string()]))
            .collect();
        Self { keys }
    }

    pub fn from_specs(keys: Vec<KeySpec>) -> Result<Self> {
        if keys.is_empty() {
            return Err(KeytapError::Config("alphabet has no keys".into()));
        }
        Ok(Self { keys })
    }

    /// One comma-separated row per key.
    pub fn from_csv_rows(rows: &[&str]) -> Result<Self> {
        Self::from_specs(rows.iter().map(|row| KeySpec::from(*row)).collect())
    }

    /// Parse a standalone alphabet document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let doc: AlphabetDocument = toml::from_str(s)?;
        Self::from_specs(doc.keys)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// The alphabet a config asks for: its custom keys, else its locale.
    ///
    /// An unknown locale falls back to [`FALLBACK_LOCALE`].
    pub fn resolve(config: &EngineConfig) -> Result<Self> {
        if let Some(keys) = &config.keys {
            return Self::from_specs(keys.clone());
        }
        match Self::builtin(&config.locale) {
            Ok(alphabet) => Ok(alphabet),
            Err(KeytapError::UnknownLocale(tag)) => {
                log::warn!("No keypad alphabet for locale '{tag}', using '{FALLBACK_LOCALE}'");
                Self::builtin(FALLBACK_LOCALE)
            },
            Err(e) => Err(e),
        }
    }

    pub fn keys(&self) -> &[KeySpec] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Build one character set per key. Fails on the first malformed entry.
    pub fn build_keypad(&self) -> Result<Vec<KeyCharacterSet>> {
        self.keys
            .iter()
            .enumerate()
            .map(|(idx, spec)| {
                KeyCharacterSet::from_spec(spec)
                    .map_err(|e| KeytapError::Config(format!("key {idx}: {e}")))
            })
            .collect()
    }

    fn latin_with(extras: Extras) -> Self {
        let keys = LATIN
            .iter()
            .enumerate()
            .map(|(idx, base)| {
                let mut tokens: Vec<String> = base.iter().map(|s| s.to_string()).collect();
                for (_, extra) in extras.iter().filter(|(key, _)| *key == idx) {
                    tokens.extend(extra.iter().map(|s| s.to_string()));
                }
                KeySpec::Tokens(tokens)
            })
            .collect();
        Self { keys }
    }
}

/// `"de-AT"`, `"de_AT"` and `"DE"` all select `"de"`.
fn normalize_locale(locale: &str) -> String {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
