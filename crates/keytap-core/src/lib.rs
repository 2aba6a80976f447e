//! Multi-tap keypad text entry.
//!
//! Converts a sequence of numeric remote-control key presses into text the
//! way legacy mobile phones did: each digit key carries several characters,
//! repeated presses inside a cycle window rotate through them, and a pause
//! or a different key commits the character.

pub mod alphabet;
pub mod charset;
pub mod engine;
pub mod entry;
pub mod timer;

pub use alphabet::Alphabet;
pub use charset::KeyCharacterSet;
pub use engine::{EngineState, MultiTapEngine};
pub use entry::TextEntry;
pub use timer::{Clock, CycleTimer, ManualClock, SystemClock};

pub use keytap_types::config::{EngineConfig, KeySpec};
pub use keytap_types::error::{KeytapError, Result};
pub use keytap_types::input::{Key, KeyEvent};
