use crate::core::{share, Board, GameError, PlayerId};
use crate::game::Game;
use crate::player::ComputerPlayer;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfPlayConfig {
    pub num_games: usize,
    pub size: usize,
    pub p1_difficulty: u32,
    pub p2_difficulty: u32,
    /// Base seed; game `i` uses `seed + 2i` and `seed + 2i + 1`.
    pub seed: Option<u64>,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            num_games: 100,
            size: crate::core::DEFAULT_SIZE,
            p1_difficulty: 0,
            p2_difficulty: 0,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: PlayerId,
    pub moves: usize,
    pub time_ms: u128,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelfPlayStats {
    pub total_games: usize,
    pub p1_wins: usize,
    pub p2_wins: usize,
    pub avg_moves: f64,
    pub avg_time_ms: f64,
    pub size: usize,
    pub p1_difficulty: u32,
    pub p2_difficulty: u32,
    pub games: Vec<GameResult>,
}

impl SelfPlayStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_result(&mut self, result: GameResult) {
        self.total_games += 1;
        match result.winner {
            PlayerId::Player1 => self.p1_wins += 1,
            PlayerId::Player2 => self.p2_wins += 1,
        }
        self.games.push(result);
        self.recalculate_averages();
    }

    fn recalculate_averages(&mut self) {
        if self.games.is_empty() {
            return;
        }
        let total_moves: usize = self.games.iter().map(|g| g.moves).sum();
        let total_time: u128 = self.games.iter().map(|g| g.time_ms).sum();
        self.avg_moves = total_moves as f64 / self.games.len() as f64;
        self.avg_time_ms = total_time as f64 / self.games.len() as f64;
    }
}

pub fn play_one(config: &SelfPlayConfig, game_num: usize) -> Result<GameResult, GameError> {
    let start_time = Instant::now();
    let board = share(Board::new(config.size)?);

    let mut p1 = ComputerPlayer::new(PlayerId::Player1, "CPU 1", board.clone(), config.p1_difficulty);
    let mut p2 = ComputerPlayer::new(PlayerId::Player2, "CPU 2", board.clone(), config.p2_difficulty);
    if let Some(seed) = config.seed {
        let base = seed.wrapping_add(2 * game_num as u64);
        p1 = p1.with_seed(base);
        p2 = p2.with_seed(base.wrapping_add(1));
    }

    let mut game = Game::new(board.clone(), Box::new(p1), Box::new(p2))?;
    let winner = game.play(|_, _| {})?;
    let moves = board.borrow().history().len();

    Ok(GameResult {
        winner,
        moves,
        time_ms: start_time.elapsed().as_millis(),
    })
}

/// Plays `num_games` computer-vs-computer games one after another.
pub fn run_selfplay(config: &SelfPlayConfig) -> Result<SelfPlayStats, GameError> {
    let mut stats = SelfPlayStats {
        size: config.size,
        p1_difficulty: config.p1_difficulty,
        p2_difficulty: config.p2_difficulty,
        ..SelfPlayStats::new()
    };

    for game_num in 0..config.num_games {
        let result = play_one(config, game_num)?;
        info!(
            game = game_num + 1,
            winner = %result.winner,
            moves = result.moves,
            "self-play game finished"
        );
        stats.add_result(result);
    }
    Ok(stats)
}
