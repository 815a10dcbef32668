//! RNG module - uniform piece generation
//!
//! Each draw picks one of the seven kinds with probability 1/7, independent
//! of every earlier draw. There is no bag, so streaks and immediate repeats
//! happen.
//!
//! [`PieceRng`] is seeded so a game can be replayed exactly;
//! [`random_tetromino`] draws from the thread-local generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::pieces::Tetromino;
use crate::types::PieceKind;

/// Seeded uniform piece generator
#[derive(Debug, Clone)]
pub struct PieceRng {
    seed: u64,
    rng: StdRng,
}

impl PieceRng {
    /// Create a new generator with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw the next piece kind
    pub fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())]
    }

    /// Draw the next piece in spawn orientation
    pub fn draw(&mut self) -> Tetromino {
        Tetromino::new(self.next_kind())
    }

    /// Derive a seed for a follow-up game (used on restart).
    pub fn next_seed(&mut self) -> u64 {
        self.rng.gen()
    }
}

/// Draw a piece from the thread-local generator.
pub fn random_tetromino() -> Tetromino {
    let mut rng = rand::thread_rng();
    Tetromino::new(PieceKind::ALL[rng.gen_range(0..PieceKind::ALL.len())])
}
