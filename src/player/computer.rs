use crate::core::{GameError, Move, PlayerId, SharedBoard};
use crate::player::ai::MoveSelector;
use crate::player::{PlayerController, PushOutcome};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tracing::debug;

/// Computer player backed by `MoveSelector`.
pub struct ComputerPlayer {
    player_id: PlayerId,
    name: String,
    board: SharedBoard,
    selector: MoveSelector,
    rng: StdRng,
    delay: Duration,
}

impl ComputerPlayer {
    pub fn new(player_id: PlayerId, name: &str, board: SharedBoard, difficulty: u32) -> Self {
        Self {
            player_id,
            name: name.to_string(),
            board,
            selector: MoveSelector::new(difficulty),
            rng: StdRng::from_entropy(),
            delay: Duration::ZERO,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Pause before each move so a watching human can follow.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl PlayerController for ComputerPlayer {
    fn id(&self) -> PlayerId {
        self.player_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_human(&self) -> bool {
        false
    }

    fn difficulty(&self) -> u32 {
        self.selector.difficulty
    }

    fn board(&self) -> &SharedBoard {
        &self.board
    }

    fn push(&mut self) -> Result<PushOutcome, GameError> {
        if !self.is_turn() {
            return Ok(PushOutcome::NotYourTurn);
        }
        let mv = {
            let board = self.board.borrow();
            self.selector.choose_move(&board, &mut self.rng)?
        };
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        let mv = self.board.borrow_mut().submit_move(self.player_id, mv)?;
        debug!(player = %self.name, %mv, "computer move");
        Ok(PushOutcome::Played(mv))
    }

    /// The computer always plays its own choice.
    fn push_move(&mut self, _mv: Move) -> Result<PushOutcome, GameError> {
        self.push()
    }
}
