use crate::core::{GameError, Move, PlayerId, SharedBoard};
use crate::player::{PlayerController, PushOutcome};
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Human player typing moves as `row, start, end`.
pub struct HumanPlayer {
    player_id: PlayerId,
    name: String,
    board: SharedBoard,
    input: Box<dyn BufRead>,
    output: Box<dyn Write>,
}

impl HumanPlayer {
    pub fn new(player_id: PlayerId, name: &str, board: SharedBoard) -> Self {
        Self::with_io(
            player_id,
            name,
            board,
            Box::new(io::BufReader::new(io::stdin())),
            Box::new(io::stdout()),
        )
    }

    pub fn with_io(
        player_id: PlayerId,
        name: &str,
        board: SharedBoard,
        input: Box<dyn BufRead>,
        output: Box<dyn Write>,
    ) -> Self {
        Self {
            player_id,
            name: name.to_string(),
            board,
            input,
            output,
        }
    }

    fn read_move(&mut self) -> Result<Move, GameError> {
        write!(self.output, "{}, enter move as row, [start, end]: ", self.name)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(GameError::InputClosed);
        }
        Move::parse(&line)
    }
}

impl PlayerController for HumanPlayer {
    fn id(&self) -> PlayerId {
        self.player_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_human(&self) -> bool {
        true
    }

    fn board(&self) -> &SharedBoard {
        &self.board
    }

    fn push(&mut self) -> Result<PushOutcome, GameError> {
        if !self.is_turn() {
            return Ok(PushOutcome::NotYourTurn);
        }
        let mv = self.read_move()?;
        self.push_move(mv)
    }

    fn push_move(&mut self, mv: Move) -> Result<PushOutcome, GameError> {
        if !self.is_turn() {
            return Ok(PushOutcome::NotYourTurn);
        }
        let mv = self.board.borrow_mut().submit_move(self.player_id, mv)?;
        debug!(player = %self.name, %mv, "human move");
        Ok(PushOutcome::Played(mv))
    }
}
