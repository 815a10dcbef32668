//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`]. There is no
//! auto-repeat handling here: every key press is one action, and the terminal's
//! own key repeat supplies held-key movement.

pub mod map;

pub use classic_tetris_types as types;

pub use map::{handle_key_event, should_quit};
