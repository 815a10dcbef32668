//! Pieces module - tetromino templates and matrix rotation
//!
//! Every piece is an occupancy matrix anchored at its top-left corner. The I
//! piece lives in a 4x4 box, O in 2x2, the rest in 3x3. Rotation is the naive
//! transpose-then-reverse-rows turn; there are no wall kicks.

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::types::{PieceKind, SPAWN_X, SPAWN_Y};

/// Largest side of any shape's bounding box
pub const MAX_SHAPE_DIM: usize = 4;

/// Top-left anchor of a piece on the board.
///
/// `y` may be negative while a piece is partly above the visible field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Horizontally centered spawn anchor
    pub const fn spawn() -> Self {
        Self::new(SPAWN_X, SPAWN_Y)
    }

    pub fn offset(self, dx: i8, dy: i8) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::spawn()
    }
}

/// Rectangular occupancy matrix of up to 4x4 cells.
///
/// Cells outside `rows x cols` are always empty, so derived equality compares
/// shapes by their visible content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from row-major 0/1 rows.
    ///
    /// Rows beyond the fourth and columns beyond the fourth are ignored. The
    /// column count is taken from the first row.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let height = rows.len().min(MAX_SHAPE_DIM);
        let width = rows.first().map_or(0, |r| r.len()).min(MAX_SHAPE_DIM);
        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (y, row) in rows.iter().take(height).enumerate() {
            for (x, &v) in row.iter().take(width).enumerate() {
                cells[y][x] = v != 0;
            }
        }
        Self {
            rows: height as u8,
            cols: width as u8,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Whether local cell `(x, y)` is occupied. Out-of-box cells are empty.
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.cols() && y < self.rows() && self.cells[y][x]
    }

    /// Occupied cells as local `(x, y)` offsets, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.rows()).flat_map(move |y| {
            (0..self.cols())
                .filter(move |&x| self.cells[y][x])
                .map(move |x| (x as i8, y as i8))
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }

    /// Quarter turn clockwise: transpose, then reverse every row.
    ///
    /// An `R x C` matrix becomes `C x R`; `out[i][j] = in[R - 1 - j][i]`.
    pub fn rotated_cw(&self) -> Self {
        let (rows, cols) = (self.rows(), self.cols());
        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (i, out_row) in cells.iter_mut().enumerate().take(cols) {
            for (j, out_cell) in out_row.iter_mut().enumerate().take(rows) {
                *out_cell = self.cells[rows - 1 - j][i];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Rows as 0/1 vectors (for rendering and tests).
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows())
            .map(|y| (0..self.cols()).map(|x| self.cells[y][x] as u8).collect())
            .collect()
    }
}

impl Serialize for Shape {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows()))?;
        for row in self.to_rows() {
            seq.serialize_element(&row)?;
        }
        seq.end()
    }
}

/// Spawn orientation of each piece kind
pub fn template_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::from_rows(&[
            &[0, 0, 0, 0],
            &[1, 1, 1, 1],
            &[0, 0, 0, 0],
            &[0, 0, 0, 0],
        ]),
        PieceKind::O => Shape::from_rows(&[&[1, 1], &[1, 1]]),
        PieceKind::T => Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]]),
        PieceKind::S => Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]]),
        PieceKind::Z => Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]]),
        PieceKind::J => Shape::from_rows(&[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]]),
        PieceKind::L => Shape::from_rows(&[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]]),
    }
}

/// A piece value: its kind tag plus its current orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub shape: Shape,
}

impl Tetromino {
    /// Piece in spawn orientation
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: template_shape(kind),
        }
    }

    pub fn color(&self) -> &'static str {
        self.kind.color()
    }

    /// Absolute board coordinates of every occupied cell at `pos`.
    pub fn cells_at(&self, pos: Position) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .occupied()
            .map(move |(dx, dy)| (pos.x.saturating_add(dx), pos.y.saturating_add(dy)))
    }
}

/// Rotate a piece 90° clockwise. The caller decides whether to keep it.
pub fn rotate_piece(piece: &Tetromino) -> Tetromino {
    Tetromino {
        shape: piece.shape.rotated_cw(),
        ..*piece
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(template_shape(kind).occupied_count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn template_boxes() {
        let dims = |kind| {
            let shape = template_shape(kind);
            (shape.rows(), shape.cols())
        };
        assert_eq!(dims(PieceKind::I), (4, 4));
        assert_eq!(dims(PieceKind::O), (2, 2));
        assert_eq!(dims(PieceKind::T), (3, 3));
    }

    #[test]
    fn occupied_is_row_major() {
        let t = template_shape(PieceKind::T);
        let cells: Vec<_> = t.occupied().collect();
        assert_eq!(cells, vec![(1, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn rotating_t_points_it_right() {
        let rotated = template_shape(PieceKind::T).rotated_cw();
        assert_eq!(rotated.to_rows(), vec![vec![0, 1, 0], vec![0, 1, 1], vec![0, 1, 0]]);
    }

    #[test]
    fn rotating_i_makes_it_vertical() {
        let rotated = template_shape(PieceKind::I).rotated_cw();
        let cells: Vec<_> = rotated.occupied().collect();
        assert_eq!(cells, vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn rectangular_matrix_swaps_dimensions() {
        let bar = Shape::from_rows(&[&[1, 1, 1], &[1, 0, 0]]);
        let rotated = bar.rotated_cw();
        assert_eq!(rotated.rows(), 3);
        assert_eq!(rotated.cols(), 2);
        assert_eq!(rotated.to_rows(), vec![vec![1, 1], vec![0, 1], vec![0, 1]]);
    }

    #[test]
    fn rotate_piece_keeps_kind() {
        let piece = Tetromino::new(PieceKind::S);
        let rotated = rotate_piece(&piece);
        assert_eq!(rotated.kind, PieceKind::S);
        assert_ne!(rotated.shape, piece.shape);
    }

    #[test]
    fn cells_at_offsets_by_position() {
        let o = Tetromino::new(PieceKind::O);
        let cells: Vec<_> = o.cells_at(Position::new(4, -1)).collect();
        assert_eq!(cells, vec![(4, -1), (5, -1), (4, 0), (5, 0)]);
    }
}
