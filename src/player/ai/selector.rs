use super::weighted::{sample_exponential, weighted_choice};
use crate::core::{Board, GameError, Move};
use crate::logic::is_balanced;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Legal moves split by the position they leave behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    /// Moves that leave the opponent a lost position.
    pub good: Vec<Move>,
    pub bad: Vec<Move>,
}

/// Nim-sum move selection with a tunable chance of a deliberate mistake.
///
/// `difficulty == 0` always plays a winning move when one exists. Larger
/// values give each losing move an exponential weight with that mean against
/// a weight of 1 for each winning move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveSelector {
    pub difficulty: u32,
}

impl MoveSelector {
    pub fn new(difficulty: u32) -> Self {
        Self { difficulty }
    }

    /// Simulates every legal move on a copy of `board`.
    pub fn classify(&self, board: &Board) -> Classified {
        let mut classified = Classified::default();
        for mv in board.legal_moves() {
            let mut next = board.clone();
            if next.push(mv).is_err() {
                continue;
            }
            if is_balanced(&next) {
                classified.good.push(mv);
            } else {
                classified.bad.push(mv);
            }
        }
        classified
    }

    pub fn choose_move<R: Rng + ?Sized>(&self, board: &Board, rng: &mut R) -> Result<Move, GameError> {
        let Classified { good, bad } = self.classify(board);
        debug!(
            good = good.len(),
            bad = bad.len(),
            difficulty = self.difficulty,
            "classified moves"
        );

        if good.is_empty() && bad.is_empty() {
            return Err(GameError::NoLegalMoves);
        }

        if self.difficulty == 0 {
            let pool = if good.is_empty() { &bad } else { &good };
            return pool.choose(rng).copied().ok_or(GameError::NoLegalMoves);
        }

        let mean = self.difficulty as f64;
        let pool: Vec<(Move, f64)> = good
            .into_iter()
            .map(|mv| (mv, 1.0))
            .chain(bad.into_iter().map(|mv| (mv, sample_exponential(rng, mean))))
            .collect();
        weighted_choice(rng, &pool)
    }
}
