use crate::core::DEFAULT_SIZE;
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "nimm_config.json";

/// Log filter used when `RUST_LOG` is unset. Stderr shares the terminal with
/// the board, so only warnings go there.
pub fn default_log_filter(to_file: bool) -> &'static str {
    if to_file {
        "info"
    } else {
        "warn"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub size: usize,
    pub difficulty: u32,
    /// Cosmetic pause before each computer move.
    pub ai_delay_ms: u64,
    pub seed: Option<u64>,
    /// Whether the human moves first against the computer.
    pub human_first: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            size: DEFAULT_SIZE,
            difficulty: 0,
            ai_delay_ms: 2000,
            seed: None,
            human_first: true,
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&config_str)
            .with_context(|| format!("parsing {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Falls back to defaults when the file is missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            tracing::debug!(error = %err, "using default configuration");
            Self::default()
        })
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.size >= 1, "board size must be at least 1, got {}", self.size);
        Ok(())
    }

    /// Command-line values win over file values.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(size) = cli.size {
            self.size = size;
        }
        if let Some(difficulty) = cli.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(delay) = cli.ai_delay_ms {
            self.ai_delay_ms = delay;
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
    }
}

/// Triangular Nim against a human or the computer.
#[derive(Parser, Debug)]
#[command(name = "nimm")]
#[command(version)]
pub struct Cli {
    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of rows of the triangle
    #[arg(long)]
    pub size: Option<usize>,

    /// Computer mistake weight (0 plays perfectly)
    #[arg(long)]
    pub difficulty: Option<u32>,

    #[arg(long)]
    pub ai_delay_ms: Option<u64>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play on the terminal (asks for a mode if none is given)
    Play {
        #[arg(long, value_enum)]
        mode: Option<Mode>,

        /// Step through the moves after the game ends
        #[arg(long)]
        replay: bool,
    },

    /// Computer-vs-computer games, printed as JSON stats
    Selfplay {
        #[arg(long, default_value = "100")]
        games: usize,

        #[arg(long, default_value = "0")]
        p1_difficulty: u32,

        #[arg(long, default_value = "0")]
        p2_difficulty: u32,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    HumanVsComputer,
    ComputerVsHuman,
    HumanVsHuman,
    ComputerVsComputer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_filter() {
        assert_eq!(default_log_filter(false), "warn");
        assert_eq!(default_log_filter(true), "info");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"size": 6, "difficulty": 2}"#).unwrap();
        assert_eq!(config.size, 6);
        assert_eq!(config.difficulty, 2);
        assert_eq!(config.ai_delay_ms, GameConfig::default().ai_delay_ms);
        assert!(config.human_first);
    }

    #[test]
    fn test_validate_rejects_empty_board() {
        let config = GameConfig {
            size: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = GameConfig::load_or_default(Path::new("/nonexistent/nimm_config.json"));
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_cli_overrides_file() {
        let cli = Cli::parse_from(["nimm", "--size", "5", "--seed", "9", "play", "--mode", "human-vs-human"]);
        let mut config = GameConfig {
            difficulty: 3,
            ..GameConfig::default()
        };
        config.apply_cli(&cli);
        assert_eq!(config.size, 5);
        assert_eq!(config.difficulty, 3);
        assert_eq!(config.seed, Some(9));
        assert!(matches!(
            cli.command,
            Some(Command::Play {
                mode: Some(Mode::HumanVsHuman),
                replay: false
            })
        ));
    }

    #[test]
    fn test_selfplay_defaults() {
        let cli = Cli::parse_from(["nimm", "selfplay", "--games", "3"]);
        match cli.command {
            Some(Command::Selfplay {
                games,
                p1_difficulty,
                p2_difficulty,
            }) => assert_eq!((games, p1_difficulty, p2_difficulty), (3, 0, 0)),
            other => panic!("unexpected {:?}", other),
        }
    }
}
