//! Core game logic - pure, deterministic, and testable
//!
//! Everything the game decides lives here: piece shapes, collision, rotation,
//! merging, line clears, scoring, and the state machine that strings them
//! together. There is **no** I/O, timing, or global state in this crate; the
//! gravity timer and the keyboard belong to whoever drives it.
//!
//! # Module Structure
//!
//! - [`pieces`]: tetromino templates, positions, and matrix rotation
//! - [`board`]: 10x20 grid with collision, merge, and line clearing
//! - [`scoring`]: line-clear points, levels, and gravity speed
//! - [`rng`]: uniform independent piece draws
//! - [`game_state`]: the game state value and its transitions
//! - [`snapshot`]: display grid and stats for renderers
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: every kind has a 1/7 chance on every draw (no bag)
//! - **Naive rotation**: clockwise matrix turn, rejected if blocked (no wall kicks)
//! - **Instant lock**: a piece locks the moment it cannot fall
//! - **Scoring**: 100/300/500/800 for 1-4 lines, times `level + 1`
//! - **Levels**: one per 10 lines
//!
//! # Example
//!
//! ```
//! use classic_tetris_core::GameState;
//! use classic_tetris_core::types::GameAction;
//!
//! let game = GameState::new(12345);
//! let game = game.apply(GameAction::MoveRight);
//! let game = game.apply(GameAction::Rotate);
//! let game = game.apply(GameAction::HardDrop);
//!
//! // A single piece on an empty board clears nothing.
//! assert_eq!(game.score(), 0);
//! assert!(!game.board().is_empty());
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use classic_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{check_collision, clear_lines, merge_piece_to_board, Board, LineClear};
pub use game_state::{GameState, LockEvent};
pub use pieces::{rotate_piece, template_shape, Position, Shape, Tetromino};
pub use rng::{random_tetromino, PieceRng};
pub use scoring::{calculate_level, calculate_score, drop_interval_ms};
pub use snapshot::{ActiveSnapshot, DisplayGrid, GameSnapshot, PiecePreview};
