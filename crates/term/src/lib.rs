//! Terminal rendering for the game.
//!
//! Renders into a plain framebuffer (no widget toolkit) that is then flushed
//! to the terminal with `crossterm`.
//!
//! - [`fb`]: framebuffer and colors
//! - [`game_view`]: snapshot -> framebuffer (pure, testable)
//! - [`renderer`]: framebuffer -> terminal, with run-based diffing

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use classic_tetris_core as core;
pub use classic_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
