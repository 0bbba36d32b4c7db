use crate::core::{Board, GameError, Move};
use crate::display::{render_board, DisplayState};
use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal;
use std::time::Duration;

/// Steps through a finished (or unfinished) game one move at a time.
pub struct ReplayViewer {
    history: Vec<Move>,
    boards: Vec<Board>,
    current_index: usize,
}

impl ReplayViewer {
    /// Replays `history` from a fresh board of `size`.
    pub fn new(size: usize, history: Vec<Move>) -> Result<Self, GameError> {
        Self::with_initial_board(Board::new(size)?, history)
    }

    pub fn with_initial_board(initial_board: Board, history: Vec<Move>) -> Result<Self, GameError> {
        // 全局面を事前計算
        let mut boards = Vec::with_capacity(history.len() + 1);
        let mut board = initial_board;
        boards.push(board.clone());
        for mv in &history {
            board.push(*mv)?;
            boards.push(board.clone());
        }

        Ok(Self {
            history,
            boards,
            current_index: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn position(&self) -> usize {
        self.current_index
    }

    pub fn current_board(&self) -> &Board {
        &self.boards[self.current_index]
    }

    pub fn last_move(&self) -> Option<Move> {
        self.current_index
            .checked_sub(1)
            .map(|i| self.history[i])
    }

    /// The move that `forward` would play next.
    pub fn next_move(&self) -> Option<Move> {
        self.history.get(self.current_index).copied()
    }

    /// Last move in red, upcoming move highlighted, plus a status line.
    pub fn display_state(&self) -> DisplayState {
        let board = self.current_board();
        let mut state = DisplayState::new();
        state.last_move = self.last_move();
        state.highlights = self.next_move().into_iter().collect();
        state.status_msg = Some(match board.winner() {
            Ok(winner) => format!(
                "Replay {}/{} | {} wins",
                self.current_index,
                self.len(),
                winner
            ),
            Err(_) => format!(
                "Replay {}/{} | {} to move",
                self.current_index,
                self.len(),
                board.current_turn()
            ),
        });
        state
    }

    pub fn forward(&mut self) -> bool {
        if self.current_index < self.history.len() {
            self.current_index += 1;
            true
        } else {
            false
        }
    }

    pub fn back(&mut self) -> bool {
        if self.current_index > 0 {
            self.current_index -= 1;
            true
        } else {
            false
        }
    }

    pub fn jump_to_start(&mut self) {
        self.current_index = 0;
    }

    pub fn jump_to_end(&mut self) {
        self.current_index = self.history.len();
    }

    /// Interactive viewer: arrows step, Home/End jump, q leaves.
    pub fn run(&mut self) -> anyhow::Result<()> {
        terminal::enable_raw_mode()?;
        let res = self.event_loop();
        terminal::disable_raw_mode()?;
        res
    }

    fn event_loop(&mut self) -> anyhow::Result<()> {
        let mut dirty = true;
        loop {
            if dirty {
                render_board(self.current_board(), &self.display_state())?;
                print!("[←/→] Step | [Home/End] Jump | [q] Quit\r\n");
                dirty = false;
            }

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    dirty = match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Right | KeyCode::Char('n') => self.forward(),
                        KeyCode::Left | KeyCode::Char('p') => self.back(),
                        KeyCode::Home => {
                            self.jump_to_start();
                            true
                        }
                        KeyCode::End => {
                            self.jump_to_end();
                            true
                        }
                        _ => false,
                    };
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    #[test]
    fn test_navigation() {
        let history = vec![Move::new(1, 0, 2), Move::new(0, 0, 0)];
        let mut replay = ReplayViewer::new(2, history).unwrap();

        assert_eq!(replay.len(), 2);
        assert_eq!(replay.current_board().total_tokens(), 4);
        assert_eq!(replay.last_move(), None);
        assert!(!replay.back());

        assert!(replay.forward());
        assert_eq!(replay.current_board().row_counts(), vec![1, 0]);
        assert_eq!(replay.last_move(), Some(Move::new(1, 0, 2)));

        replay.jump_to_end();
        assert!(!replay.forward());
        assert!(replay.current_board().is_game_over());
        assert_eq!(replay.current_board().winner(), Ok(PlayerId::Player2));

        replay.jump_to_start();
        assert_eq!(replay.position(), 0);
    }

    #[test]
    fn test_display_state_highlights_upcoming_move() {
        let history = vec![Move::new(1, 0, 2), Move::new(0, 0, 0)];
        let mut replay = ReplayViewer::new(2, history).unwrap();

        let state = replay.display_state();
        assert_eq!(state.highlights, vec![Move::new(1, 0, 2)]);
        assert_eq!(state.last_move, None);
        assert_eq!(state.status_msg.as_deref(), Some("Replay 0/2 | Player 1 to move"));

        replay.forward();
        let state = replay.display_state();
        assert_eq!(state.highlights, vec![Move::new(0, 0, 0)]);
        assert_eq!(state.last_move, Some(Move::new(1, 0, 2)));

        replay.jump_to_end();
        let state = replay.display_state();
        assert!(state.highlights.is_empty());
        assert_eq!(state.status_msg.as_deref(), Some("Replay 2/2 | Player 2 wins"));
    }

    #[test]
    fn test_rejects_inconsistent_history() {
        let history = vec![Move::new(0, 0, 0), Move::new(0, 0, 0)];
        assert_eq!(
            ReplayViewer::new(2, history).err(),
            Some(GameError::IllegalMove { mv: Move::new(0, 0, 0) })
        );
    }
}
