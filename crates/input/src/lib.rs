//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]s. Each key
//! press is one engine operation; key repeat is left to the terminal.

pub mod map;

pub use srs_tetris_types as types;

pub use map::{handle_key_event, should_quit};
