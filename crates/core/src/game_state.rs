//! Game state module - the single value that describes a game
//!
//! This module ties together the board, pieces, RNG, and scoring. Every
//! transition borrows the current state and returns a brand-new one, so a
//! caller holding the old value never observes a half-applied update.
//! Internally a transition clones the state, edits the private copy, and
//! hands it back.
//!
//! The state carries its own seeded RNG, so two states built from the same
//! seed stay identical under the same sequence of actions.

use serde::Serialize;

use crate::board::{check_collision, clear_lines, merge_piece_to_board, Board};
use crate::pieces::{rotate_piece, Position, Tetromino};
use crate::rng::PieceRng;
use crate::scoring::{calculate_level, calculate_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, PiecePreview};
use crate::types::{Cell, GameAction, BOARD_HEIGHT, BOARD_WIDTH};

/// What happened when the last piece locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub score_gained: u32,
    /// Level after the lock's lines were counted
    pub level: u32,
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    /// `None` only once the game is over
    active: Option<Tetromino>,
    position: Position,
    next: Option<Tetromino>,
    rng: PieceRng,
    /// Monotonic episode id (increments on restart)
    episode: u32,
    /// Set by the transition that locked a piece, cleared by any other
    last_event: Option<LockEvent>,
    score: u32,
    lines: u32,
    level: u32,
    paused: bool,
    game_over: bool,
}

impl GameState {
    /// Fresh game: empty board, random active and next piece, zeroed stats.
    pub fn new(seed: u64) -> Self {
        let mut rng = PieceRng::new(seed);
        let active = rng.draw();
        let next = rng.draw();

        Self {
            board: Board::new(),
            active: Some(active),
            position: Position::spawn(),
            next: Some(next),
            rng,
            episode: 0,
            last_event: None,
            score: 0,
            lines: 0,
            level: 0,
            paused: false,
            game_over: false,
        }
    }

    /// Replace the board (for puzzles and test setups).
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    /// Replace the active piece and its anchor.
    pub fn with_active(mut self, piece: Tetromino, position: Position) -> Self {
        self.active = Some(piece);
        self.position = position;
        self
    }

    /// Replace the preview piece. `None` makes the next lock draw a fresh one.
    pub fn with_next(mut self, next: Option<Tetromino>) -> Self {
        self.next = next;
        self
    }

    /// Replace score, cleared lines, and level.
    pub fn with_stats(mut self, score: u32, lines: u32, level: u32) -> Self {
        self.score = score;
        self.lines = lines;
        self.level = level;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn next_piece(&self) -> Option<Tetromino> {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn last_event(&self) -> Option<LockEvent> {
        self.last_event
    }

    /// Apply an action and return the resulting state.
    ///
    /// Returns `None` when the action is ignored: a blocked move or rotation,
    /// or anything but pause/restart while paused or after game over.
    /// Toggle-pause always applies.
    pub fn step(&self, action: GameAction) -> Option<Self> {
        if self.game_over && !action.allowed_while_paused() {
            return None;
        }
        if self.paused && !action.allowed_while_paused() {
            return None;
        }

        let mut next = self.clone();
        next.last_event = None;

        let accepted = match action {
            GameAction::MoveLeft => next.try_shift(-1),
            GameAction::MoveRight => next.try_shift(1),
            GameAction::Rotate => next.try_rotate(),
            GameAction::SoftDrop => next.move_down(),
            GameAction::HardDrop => next.hard_drop(),
            GameAction::TogglePause => {
                next.paused = !next.paused;
                true
            }
            GameAction::Restart => {
                next = self.restarted();
                true
            }
        };

        accepted.then_some(next)
    }

    /// Like [`step`](Self::step), but an ignored action yields an unchanged copy.
    pub fn apply(&self, action: GameAction) -> Self {
        self.step(action).unwrap_or_else(|| self.clone())
    }

    /// One gravity step: same as a soft drop.
    pub fn tick(&self) -> Self {
        self.apply(GameAction::SoftDrop)
    }

    /// Replace `self` with the result of `action`. Returns whether it applied.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match self.step(action) {
            Some(next) => {
                *self = next;
                true
            }
            None => false,
        }
    }

    fn restarted(&self) -> Self {
        let mut rng = self.rng.clone();
        let mut fresh = Self::new(rng.next_seed());
        fresh.episode = self.episode.wrapping_add(1);
        fresh
    }

    fn try_shift(&mut self, dx: i8) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        let target = self.position.offset(dx, 0);
        if check_collision(&self.board, &piece, target) {
            return false;
        }
        self.position = target;
        true
    }

    fn try_rotate(&mut self) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        let rotated = rotate_piece(&piece);
        if check_collision(&self.board, &rotated, self.position) {
            return false;
        }
        self.active = Some(rotated);
        true
    }

    /// Move down one row, or lock in place if the row below is blocked.
    fn move_down(&mut self) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        let below = self.position.offset(0, 1);
        if check_collision(&self.board, &piece, below) {
            self.lock();
        } else {
            self.position = below;
        }
        true
    }

    fn hard_drop(&mut self) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        self.position = self.resting_position(&piece);
        self.lock();
        true
    }

    /// Lowest reachable anchor straight below the current one.
    fn resting_position(&self, piece: &Tetromino) -> Position {
        let mut pos = self.position;
        // The row guard only matters for a shape with no cells, which never collides.
        while pos.y < BOARD_HEIGHT as i8 && !check_collision(&self.board, piece, pos.offset(0, 1)) {
            pos = pos.offset(0, 1);
        }
        pos
    }

    /// Merge the active piece, clear lines, score, and spawn the next piece.
    fn lock(&mut self) {
        let Some(piece) = self.active else {
            return;
        };

        let merged = merge_piece_to_board(&self.board, &piece, self.position);
        let (cleared, lines_cleared) = clear_lines(&merged);

        // Points use the level in effect before this lock's lines count.
        let gained = calculate_score(lines_cleared, self.level);
        self.score = self.score.saturating_add(gained);
        self.lines = self.lines.saturating_add(lines_cleared as u32);
        self.level = calculate_level(self.lines);
        self.board = cleared;

        let promoted = match self.next.take() {
            Some(piece) => piece,
            None => self.rng.draw(),
        };
        self.next = Some(self.rng.draw());
        self.position = Position::spawn();

        self.game_over = check_collision(&self.board, &promoted, self.position);
        self.active = if self.game_over { None } else { Some(promoted) };

        self.last_event = Some(LockEvent {
            lines_cleared: lines_cleared as u32,
            score_gained: gained,
            level: self.level,
            game_over: self.game_over,
        });
    }

    /// Board cells with the active piece painted over them.
    pub fn display_grid(&self) -> [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize] {
        let mut grid = self.board.to_rows();
        if let Some(piece) = self.active {
            for (x, y) in piece.cells_at(self.position) {
                if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
                    grid[y as usize][x as usize] = Some(piece.kind);
                }
            }
        }
        grid
    }

    /// Renderer-facing view of this state
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid: self.display_grid(),
            active: self.active.map(|piece| ActiveSnapshot {
                kind: piece.kind,
                position: self.position,
            }),
            next: self.next.map(PiecePreview::from),
            score: self.score,
            lines: self.lines,
            level: self.level,
            paused: self.paused,
            game_over: self.game_over,
            episode: self.episode,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
