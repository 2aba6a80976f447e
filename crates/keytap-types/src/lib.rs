//! Foundation types for keytap.
//!
//! This crate contains the types shared by the keytap crates: keypad input
//! events, engine configuration, and error types.

pub mod config;
pub mod error;
pub mod input;
