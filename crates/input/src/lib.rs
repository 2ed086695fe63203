//! Terminal input.
//!
//! Maps `crossterm` key events into [`crate::types::Command`]s. Holding a
//! key relies on the terminal's own key repeat.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
