pub mod replay;

pub use replay::ReplayViewer;

use crate::core::{GameError, Move, PlayerId, SharedBoard};
use crate::player::{PlayerController, PushOutcome};
use std::rc::Rc;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    InProgress,
    Terminal(PlayerId),
}

/// Result of asking the player on turn for one move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Moved(PlayerId, Move),
    /// Recoverable failure; the same player is asked again next tick.
    Rejected(PlayerId, GameError),
    Finished(PlayerId),
}

/// Notifications for whatever is presenting the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Moved { player: PlayerId, mv: Move },
    Rejected { player: PlayerId, error: GameError },
    Finished { winner: PlayerId },
}

pub struct Game {
    board: SharedBoard,
    p1: Box<dyn PlayerController>,
    p2: Box<dyn PlayerController>,
    state: GameState,
}

impl Game {
    pub fn new(
        board: SharedBoard,
        p1: Box<dyn PlayerController>,
        p2: Box<dyn PlayerController>,
    ) -> Result<Self, GameError> {
        if p1.id() == p2.id() {
            return Err(GameError::InvalidPlayers {
                reason: format!("both players are {}", p1.id()),
            });
        }
        if !Rc::ptr_eq(p1.board(), &board) || !Rc::ptr_eq(p2.board(), &board) {
            return Err(GameError::InvalidPlayers {
                reason: "players must act on the game's board".to_string(),
            });
        }
        let state = match board.borrow().winner() {
            Ok(winner) => GameState::Terminal(winner),
            Err(_) => GameState::InProgress,
        };
        Ok(Game {
            board,
            p1,
            p2,
            state,
        })
    }

    pub fn board(&self) -> &SharedBoard {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn player(&self, id: PlayerId) -> &dyn PlayerController {
        let controller = if self.p1.id() == id { &self.p1 } else { &self.p2 };
        controller.as_ref()
    }

    fn player_mut(&mut self, id: PlayerId) -> &mut dyn PlayerController {
        let controller = if self.p1.id() == id { &mut self.p1 } else { &mut self.p2 };
        controller.as_mut()
    }

    /// Lets the player on turn make exactly one move.
    pub fn tick(&mut self) -> Result<TickOutcome, GameError> {
        if let GameState::Terminal(winner) = self.state {
            return Ok(TickOutcome::Finished(winner));
        }

        let current = self.board.borrow().current_turn();
        let outcome = match self.player_mut(current).push() {
            Ok(PushOutcome::Played(mv)) => TickOutcome::Moved(current, mv),
            Ok(PushOutcome::NotYourTurn) => {
                TickOutcome::Rejected(current, GameError::NotYourTurn { player: current })
            }
            Err(err) if err.is_recoverable() => {
                info!(player = %current, error = %err, "move rejected");
                TickOutcome::Rejected(current, err)
            }
            Err(err) => return Err(err),
        };

        self.refresh_state()?;
        Ok(outcome)
    }

    /// Move submission for presentation layers that collect their own input.
    pub fn submit_move(&mut self, player: PlayerId, mv: Move) -> Result<Move, GameError> {
        if let GameState::Terminal(_) = self.state {
            return Err(GameError::IllegalMove { mv });
        }
        let mv = match self.player_mut(player).push_move(mv)? {
            PushOutcome::Played(mv) => mv,
            PushOutcome::NotYourTurn => return Err(GameError::NotYourTurn { player }),
        };
        self.refresh_state()?;
        Ok(mv)
    }

    fn refresh_state(&mut self) -> Result<(), GameError> {
        let board = self.board.borrow();
        if board.is_game_over() {
            let winner = board.winner()?;
            self.state = GameState::Terminal(winner);
            debug!(%winner, moves = board.history().len(), "game over");
        }
        Ok(())
    }

    /// 対局ループ: ticks until the board is empty and returns the winner.
    pub fn play<F>(&mut self, mut on_event: F) -> Result<PlayerId, GameError>
    where
        F: FnMut(&Game, &GameEvent),
    {
        on_event(self, &GameEvent::Started);
        loop {
            let event = match self.tick()? {
                TickOutcome::Moved(player, mv) => GameEvent::Moved { player, mv },
                TickOutcome::Rejected(player, error) => GameEvent::Rejected { player, error },
                TickOutcome::Finished(winner) => {
                    on_event(self, &GameEvent::Finished { winner });
                    return Ok(winner);
                }
            };
            on_event(self, &event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{share, Board};
    use crate::player::{ComputerPlayer, HumanPlayer};
    use std::io::{self, Cursor};

    fn human(board: &SharedBoard, id: PlayerId, input: &str) -> Box<dyn PlayerController> {
        Box::new(HumanPlayer::with_io(
            id,
            "human",
            board.clone(),
            Box::new(Cursor::new(input.to_string())),
            Box::new(io::sink()),
        ))
    }

    fn computer(board: &SharedBoard, id: PlayerId, difficulty: u32, seed: u64) -> Box<dyn PlayerController> {
        Box::new(ComputerPlayer::new(id, "cpu", board.clone(), difficulty).with_seed(seed))
    }

    #[test]
    fn test_size_one_game_is_won_by_first_mover() {
        let board = share(Board::new(1).unwrap());
        let mut game = Game::new(
            board.clone(),
            human(&board, PlayerId::Player1, "0, 0, 0\n"),
            computer(&board, PlayerId::Player2, 0, 1),
        )
        .unwrap();

        assert_eq!(game.state(), GameState::InProgress);
        assert_eq!(
            game.tick(),
            Ok(TickOutcome::Moved(PlayerId::Player1, Move::new(0, 0, 0)))
        );
        assert_eq!(game.state(), GameState::Terminal(PlayerId::Player1));
        assert_eq!(game.tick(), Ok(TickOutcome::Finished(PlayerId::Player1)));
    }

    #[test]
    fn test_rejected_moves_are_retried() {
        let board = share(Board::new(2).unwrap());
        let mut game = Game::new(
            board.clone(),
            human(&board, PlayerId::Player1, "nonsense\n0, 5, 5\n1, 0, 2\n"),
            human(&board, PlayerId::Player2, "0, 0, 0\n"),
        )
        .unwrap();

        let mut events = Vec::new();
        let winner = game.play(|_, event| events.push(event.clone())).unwrap();

        assert_eq!(winner, PlayerId::Player2);
        assert_eq!(events.first(), Some(&GameEvent::Started));
        let rejected = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Rejected { player: PlayerId::Player1, .. }))
            .count();
        assert_eq!(rejected, 2);
        assert_eq!(
            events.last(),
            Some(&GameEvent::Finished { winner: PlayerId::Player2 })
        );
        assert_eq!(board.borrow().history(), &[Move::new(1, 0, 2), Move::new(0, 0, 0)]);
    }

    #[test]
    fn test_closed_input_is_fatal() {
        let board = share(Board::new(2).unwrap());
        let mut game = Game::new(
            board.clone(),
            human(&board, PlayerId::Player1, ""),
            computer(&board, PlayerId::Player2, 0, 1),
        )
        .unwrap();
        assert_eq!(game.play(|_, _| {}), Err(GameError::InputClosed));
        assert_eq!(game.state(), GameState::InProgress);
    }

    #[test]
    fn test_perfect_player_wins_from_unbalanced_start() {
        // size 5 starts with a non-zero Nim-sum, so the first mover wins
        for seed in 0..5 {
            let board = share(Board::new(5).unwrap());
            let mut game = Game::new(
                board.clone(),
                computer(&board, PlayerId::Player1, 0, seed),
                computer(&board, PlayerId::Player2, 0, seed + 100),
            )
            .unwrap();
            assert_eq!(game.play(|_, _| {}), Ok(PlayerId::Player1));
            assert!(board.borrow().is_game_over());
        }
    }

    #[test]
    fn test_perfect_second_player_wins_balanced_start() {
        // size 4 starts with Nim-sum zero
        let board = share(Board::new(4).unwrap());
        let mut game = Game::new(
            board.clone(),
            computer(&board, PlayerId::Player1, 3, 8),
            computer(&board, PlayerId::Player2, 0, 9),
        )
        .unwrap();
        assert_eq!(game.play(|_, _| {}), Ok(PlayerId::Player2));
    }

    #[test]
    fn test_submit_move_from_button_grid() {
        let board = share(Board::new(2).unwrap());
        let mut game = Game::new(
            board.clone(),
            human(&board, PlayerId::Player1, ""),
            human(&board, PlayerId::Player2, ""),
        )
        .unwrap();

        assert_eq!(
            game.submit_move(PlayerId::Player2, Move::new(0, 0, 0)),
            Err(GameError::NotYourTurn { player: PlayerId::Player2 })
        );
        assert_eq!(
            game.submit_move(PlayerId::Player1, Move::new(0, 5, 5)),
            Err(GameError::IllegalMove { mv: Move::new(0, 5, 5) })
        );
        assert_eq!(game.submit_move(PlayerId::Player1, Move::new(1, 0, 2)), Ok(Move::new(1, 0, 2)));
        assert_eq!(game.submit_move(PlayerId::Player2, Move::new(0, 0, 2)), Ok(Move::new(0, 0, 2)));
        assert_eq!(game.state(), GameState::Terminal(PlayerId::Player2));
        assert!(game.submit_move(PlayerId::Player1, Move::new(0, 0, 0)).is_err());
    }

    #[test]
    fn test_players_must_share_the_board() {
        let board = share(Board::new(2).unwrap());
        let other = share(Board::new(2).unwrap());
        assert!(Game::new(
            board.clone(),
            computer(&board, PlayerId::Player1, 0, 1),
            computer(&other, PlayerId::Player2, 0, 1),
        )
        .is_err());
        assert!(Game::new(
            board.clone(),
            computer(&board, PlayerId::Player1, 0, 1),
            computer(&board, PlayerId::Player1, 0, 1),
        )
        .is_err());
    }
}
