use crate::core::{GameError, Move, PlayerId, SharedBoard};

/// What happened when a player was asked to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Played(Move),
    /// Asked out of turn; the board was left alone.
    NotYourTurn,
}

/// プレイヤー操作のtrait
pub trait PlayerController {
    fn id(&self) -> PlayerId;
    fn name(&self) -> &str;
    fn is_human(&self) -> bool;
    fn difficulty(&self) -> u32 {
        0
    }
    fn board(&self) -> &SharedBoard;

    fn is_turn(&self) -> bool {
        self.board().borrow().current_turn() == self.id()
    }

    /// Obtains a move from this player's own source and applies it.
    fn push(&mut self) -> Result<PushOutcome, GameError>;

    /// Applies an externally chosen move, e.g. from a button grid.
    fn push_move(&mut self, mv: Move) -> Result<PushOutcome, GameError>;
}
