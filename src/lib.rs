//! Classic Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under short names and adds the pieces that
//! sit around the pure engine: environment configuration, the JSON-lines event
//! log, and the [`session::Session`] shell that owns the state cell and the
//! gravity timer.

pub use classic_tetris_core as core;
pub use classic_tetris_input as input;
pub use classic_tetris_term as term;
pub use classic_tetris_types as types;

pub mod config;
pub mod event_log;
pub mod session;

pub use config::GameConfig;
pub use event_log::{EventLog, SessionEvent};
pub use session::{GravityTimer, Session, SessionEnd};
