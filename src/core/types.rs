use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::board::Board;

/// プレイヤーID (Player1 が常に先手)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayerId {
    #[default]
    Player1,
    Player2,
}

impl PlayerId {
    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::Player1 => PlayerId::Player2,
            PlayerId::Player2 => PlayerId::Player1,
        }
    }

    /// 1-based seat number, as shown to players.
    pub fn number(self) -> u8 {
        match self {
            PlayerId::Player1 => 1,
            PlayerId::Player2 => 2,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Handle to the one board both players and the game loop act on.
///
/// Mutation goes through `Board::push` only, and the turn order guarantees a
/// single writer at a time, so a plain `RefCell` is enough.
pub type SharedBoard = Rc<RefCell<Board>>;

pub fn share(board: Board) -> SharedBoard {
    Rc::new(RefCell::new(board))
}
