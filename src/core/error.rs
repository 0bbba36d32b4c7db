//! Error taxonomy shared by the board, the players and the game loop.

use super::r#move::Move;
use super::types::PlayerId;
use derive_more::{Display, Error};

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// The move is not in the current legal-move set.
    #[display("illegal move: {mv}")]
    IllegalMove { mv: Move },

    /// Move text did not parse into three non-negative integers.
    #[display("cannot read a move from {input:?} (expected: row, start, end)")]
    Format { input: String },

    #[display("it is not {player}'s turn")]
    NotYourTurn { player: PlayerId },

    #[display("board size must be at least 1, got {size}")]
    InvalidSize { size: usize },

    #[display("invalid position: {reason}")]
    InvalidPosition { reason: String },

    #[display("invalid player setup: {reason}")]
    InvalidPlayers { reason: String },

    /// `winner` asked before the board is empty.
    #[display("the game is not over yet")]
    GameNotOver,

    /// Move selection on a board with nothing left to take.
    #[display("no legal moves on a board that is not terminal")]
    NoLegalMoves,

    #[display("weighted selection over an empty or zero-weight pool")]
    EmptyPool,

    #[display("input closed")]
    InputClosed,

    #[display("input error: {message}")]
    Input { message: String },
}

impl GameError {
    /// Errors a player can recover from by submitting another move.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GameError::IllegalMove { .. } | GameError::Format { .. } | GameError::NotYourTurn { .. }
        )
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        GameError::Input {
            message: err.to_string(),
        }
    }
}
