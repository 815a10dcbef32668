//! Snapshot module - the renderer-facing view of a game state
//!
//! A snapshot is plain data: the board with the falling piece painted on top,
//! the preview piece, and the scalar stats. It serializes to JSON so front ends
//! outside this workspace can draw it; grid cells become color strings.

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::pieces::{Position, Shape, Tetromino};
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Display grid, top row first
pub type DisplayGrid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub position: Position,
}

/// Preview panel content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PiecePreview {
    pub kind: PieceKind,
    pub color: &'static str,
    pub shape: Shape,
}

impl From<Tetromino> for PiecePreview {
    fn from(piece: Tetromino) -> Self {
        Self {
            kind: piece.kind,
            color: piece.color(),
            shape: piece.shape,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    #[serde(serialize_with = "serialize_grid")]
    pub grid: DisplayGrid,
    pub active: Option<ActiveSnapshot>,
    pub next: Option<PiecePreview>,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub paused: bool,
    pub game_over: bool,
    pub episode: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Color of the cell at (x, y), if painted
    pub fn color_at(&self, x: usize, y: usize) -> Option<&'static str> {
        self.grid
            .get(y)
            .and_then(|row| row.get(x))
            .and_then(|cell| cell.map(|kind| kind.color()))
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: None,
            score: 0,
            lines: 0,
            level: 0,
            paused: false,
            game_over: false,
            episode: 0,
        }
    }
}

fn serialize_grid<S: Serializer>(grid: &DisplayGrid, serializer: S) -> Result<S::Ok, S::Error> {
    let mut rows = serializer.serialize_seq(Some(grid.len()))?;
    for row in grid {
        let colors: Vec<Option<&'static str>> =
            row.iter().map(|cell| cell.map(|kind| kind.color())).collect();
        rows.serialize_element(&colors)?;
    }
    rows.end()
}
