use super::error::GameError;
use super::r#move::Move;
use super::types::PlayerId;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_SIZE: usize = 4;

/// 盤面
///
/// Row `r` of a size `n` board starts with `2r + 1` tokens followed by empty
/// cells, for `2n - 1` columns in total. Cells hold 0 or 1 and only ever go
/// from 1 to 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    grid: Vec<Vec<u8>>,
    turn: PlayerId,
    history: Vec<Move>,
}

impl Default for Board {
    fn default() -> Self {
        Board {
            grid: triangle(DEFAULT_SIZE),
            turn: PlayerId::Player1,
            history: Vec::new(),
        }
    }
}

fn triangle(size: usize) -> Vec<Vec<u8>> {
    let columns = 2 * size - 1;
    (0..size)
        .map(|row| (0..columns).map(|col| u8::from(col <= 2 * row)).collect())
        .collect()
}

impl Board {
    pub fn new(size: usize) -> Result<Self, GameError> {
        if size == 0 {
            return Err(GameError::InvalidSize { size });
        }
        Ok(Board {
            grid: triangle(size),
            turn: PlayerId::Player1,
            history: Vec::new(),
        })
    }

    /// Arbitrary position, `turn` to move, empty history.
    pub fn from_grid(grid: Vec<Vec<u8>>, turn: PlayerId) -> Result<Self, GameError> {
        let columns = grid.first().map(Vec::len).unwrap_or(0);
        if grid.is_empty() || columns == 0 {
            return Err(GameError::InvalidPosition {
                reason: "grid has no cells".to_string(),
            });
        }
        if let Some(row) = grid.iter().position(|r| r.len() != columns) {
            return Err(GameError::InvalidPosition {
                reason: format!("row {} has {} columns, expected {}", row, grid[row].len(), columns),
            });
        }
        if grid.iter().flatten().any(|&cell| cell > 1) {
            return Err(GameError::InvalidPosition {
                reason: "cells must be 0 or 1".to_string(),
            });
        }
        Ok(Board {
            grid,
            turn,
            history: Vec::new(),
        })
    }

    pub fn num_rows(&self) -> usize {
        self.grid.len()
    }

    pub fn num_columns(&self) -> usize {
        self.grid.first().map(Vec::len).unwrap_or(0)
    }

    pub fn grid(&self) -> &[Vec<u8>] {
        &self.grid
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<u8> {
        self.grid.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    pub fn current_turn(&self) -> PlayerId {
        self.turn
    }

    /// Tokens left in each row, top row first.
    pub fn row_counts(&self) -> Vec<usize> {
        self.grid
            .iter()
            .map(|row| row.iter().map(|&c| c as usize).sum())
            .collect()
    }

    pub fn total_tokens(&self) -> usize {
        self.row_counts().iter().sum()
    }

    fn span_sum(&self, row: usize, start: usize, end: usize) -> usize {
        self.grid[row][start..=end].iter().map(|&c| c as usize).sum()
    }

    /// 合法手生成: every `(row, start, end)` with `start <= end` whose span
    /// still holds a token.
    pub fn legal_moves(&self) -> Vec<Move> {
        let columns = self.num_columns();
        let mut moves = Vec::new();
        for row in 0..self.num_rows() {
            for start in 0..columns {
                for end in start..columns {
                    if self.span_sum(row, start, end) > 0 {
                        moves.push(Move::new(row, start, end));
                    }
                }
            }
        }
        moves
    }

    pub fn is_legal(&self, mv: &Move) -> bool {
        self.legal_moves().contains(mv)
    }

    /// Applies `mv` if it is one of the enumerated legal moves, then flips
    /// the turn.
    pub fn push(&mut self, mv: Move) -> Result<Move, GameError> {
        if !self.is_legal(&mv) {
            debug!(%mv, player = %self.turn, "rejected illegal move");
            return Err(GameError::IllegalMove { mv });
        }
        for cell in &mut self.grid[mv.row][mv.start..=mv.end] {
            *cell = 0;
        }
        self.history.push(mv);
        debug!(%mv, player = %self.turn, remaining = self.total_tokens(), "move applied");
        self.turn = self.turn.opponent();
        Ok(mv)
    }

    /// Same as `push`, but only for the player whose turn it is.
    pub fn submit_move(&mut self, player: PlayerId, mv: Move) -> Result<Move, GameError> {
        if player != self.turn {
            return Err(GameError::NotYourTurn { player });
        }
        self.push(mv)
    }

    pub fn is_game_over(&self) -> bool {
        self.grid.iter().flatten().all(|&c| c == 0)
    }

    /// The player who emptied the board, i.e. the one not on turn.
    pub fn winner(&self) -> Result<PlayerId, GameError> {
        if self.is_game_over() {
            Ok(self.turn.opponent())
        } else {
            Err(GameError::GameNotOver)
        }
    }
}
