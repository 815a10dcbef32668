//! Board module - the locked-cell grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the kind of the
//! piece that was locked there. Storage is a flat row-major array so a board is
//! cheap to copy; every mutating operation here returns a new board and leaves
//! its input untouched.
//!
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use crate::pieces::{Position, Tetromino};
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Row indices removed by a line clear, sorted bottom to top
pub type ClearedRows = ArrayVec<usize, HEIGHT>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

/// Outcome of [`clear_lines`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClear {
    pub board: Board,
    pub rows: ClearedRows,
}

impl LineClear {
    pub fn lines_cleared(&self) -> usize {
        self.rows.len()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Row `y` as a slice of cells. Empty if `y` is out of range.
    pub fn row(&self, y: usize) -> &[Cell] {
        if y >= HEIGHT {
            return &[];
        }
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < HEIGHT && self.row(y).iter().all(|cell| cell.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Collision test for `piece` anchored at `pos`.
    ///
    /// A cell collides when its column leaves `[0, WIDTH)`, its row reaches
    /// `HEIGHT` or beyond, or it lands on a locked cell. Rows above the top
    /// (negative y) do not collide on their own.
    pub fn collides(&self, piece: &Tetromino, pos: Position) -> bool {
        piece.cells_at(pos).any(|(x, y)| {
            x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 || self.is_occupied(x, y)
        })
    }

    /// Copy of this board with `piece` stamped in at `pos`.
    ///
    /// Cells above the top or off either side are dropped.
    pub fn merged(&self, piece: &Tetromino, pos: Position) -> Board {
        let mut next = *self;
        for (x, y) in piece.cells_at(pos) {
            next.set(x, y, Some(piece.kind));
        }
        next
    }

    /// Copy of this board with all full rows removed and the rest shifted down.
    ///
    /// Uses the same bottom-up two-pointer compaction as an in-place clear,
    /// run on a copy.
    pub fn cleared(&self) -> LineClear {
        let mut next = *self;
        let mut rows = ClearedRows::new();
        let mut write_y = HEIGHT;

        for read_y in (0..HEIGHT).rev() {
            if self.is_row_full(read_y) {
                rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * WIDTH;
                    next.cells.copy_within(src..src + WIDTH, write_y * WIDTH);
                }
            }
        }

        // Fresh empty rows on top
        next.cells[..write_y * WIDTH].fill(None);

        LineClear { board: next, rows }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Build a board from rows of text, top row first.
    ///
    /// `.` and space are empty; any piece letter (`IOTSZJL`) fills the cell
    /// with that kind; any other character fills it with `I`. Missing rows are
    /// padded at the top so short pictures describe the bottom of the board.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let offset = HEIGHT.saturating_sub(rows.len());
        for (i, line) in rows.iter().take(HEIGHT).enumerate() {
            let y = (offset + i) as i8;
            for (x, ch) in line.chars().take(WIDTH).enumerate() {
                let cell = match ch {
                    '.' | ' ' => None,
                    other => Some(PieceKind::from_str(&other.to_string()).unwrap_or(PieceKind::I)),
                };
                board.set(x as i8, y, cell);
            }
        }
        board
    }

    /// Convert to a 2D grid, top row first
    pub fn to_rows(&self) -> [[Cell; WIDTH]; HEIGHT] {
        let mut out = [[None; WIDTH]; HEIGHT];
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(self.row(y));
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `piece` at `pos` would leave the field or overlap a locked cell.
pub fn check_collision(board: &Board, piece: &Tetromino, pos: Position) -> bool {
    board.collides(piece, pos)
}

/// New board with `piece` locked in at `pos`; `board` is unchanged.
pub fn merge_piece_to_board(board: &Board, piece: &Tetromino, pos: Position) -> Board {
    board.merged(piece, pos)
}

/// Remove full rows. Returns the new board and how many rows went.
pub fn clear_lines(board: &Board) -> (Board, usize) {
    let result = board.cleared();
    let count = result.lines_cleared();
    (result.board, count)
}
