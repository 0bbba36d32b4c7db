use clap::Parser;
use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal;
use nimm::config::{default_log_filter, Cli, Command, GameConfig, Mode, DEFAULT_CONFIG_PATH};
use nimm::core::{share, Board, PlayerId, SharedBoard};
use nimm::display::{render_board, turn_message, DisplayState};
use nimm::game::{Game, GameEvent, ReplayViewer};
use nimm::player::{ComputerPlayer, HumanPlayer, PlayerController};
use nimm::selfplay::{run_selfplay, SelfPlayConfig};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::load_or_default(&PathBuf::from(DEFAULT_CONFIG_PATH)),
    };
    config.apply_cli(&cli);
    config.validate()?;
    info!(?config, "configuration loaded");

    match cli.command {
        Some(Command::Selfplay {
            games,
            p1_difficulty,
            p2_difficulty,
        }) => {
            let stats = run_selfplay(&SelfPlayConfig {
                num_games: games,
                size: config.size,
                p1_difficulty,
                p2_difficulty,
                seed: config.seed,
            })?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
            Ok(())
        }
        Some(Command::Play { mode, replay }) => run_local(&config, mode, replay),
        None => run_local(&config, None, false),
    }
}

fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter(log_file.is_some())));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    // ログをファイルに逃がして盤面表示を崩さない
    let res = match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            builder
                .with_writer(std::sync::Arc::new(file))
                .with_ansi(false)
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    res.map_err(|e| anyhow::anyhow!("installing tracing subscriber: {}", e))
}

fn select_mode(config: &GameConfig) -> anyhow::Result<Option<Mode>> {
    print!("\r\n=== Nimm ===\r\n");
    print!("Select players:\r\n");
    print!("1. Human vs Computer\r\n");
    print!("2. Human vs Human\r\n");
    print!("3. Computer vs Computer\r\n");
    print!("[q] Quit\r\n");

    terminal::enable_raw_mode()?;
    let choice = loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('1') if config.human_first => break Some(Mode::HumanVsComputer),
                    KeyCode::Char('1') => break Some(Mode::ComputerVsHuman),
                    KeyCode::Char('2') => break Some(Mode::HumanVsHuman),
                    KeyCode::Char('3') => break Some(Mode::ComputerVsComputer),
                    KeyCode::Char('q') | KeyCode::Esc => break None,
                    _ => {}
                }
            }
        }
    };
    terminal::disable_raw_mode()?;
    Ok(choice)
}

fn make_player(
    id: PlayerId,
    human: bool,
    board: &SharedBoard,
    config: &GameConfig,
) -> Box<dyn PlayerController> {
    if human {
        return Box::new(HumanPlayer::new(id, &format!("Human {}", id.number()), board.clone()));
    }
    let mut cpu = ComputerPlayer::new(id, &format!("Computer {}", id.number()), board.clone(), config.difficulty)
        .with_delay(Duration::from_millis(config.ai_delay_ms));
    if let Some(seed) = config.seed {
        cpu = cpu.with_seed(seed.wrapping_add(id.number() as u64));
    }
    Box::new(cpu)
}

fn run_local(config: &GameConfig, mode: Option<Mode>, replay: bool) -> anyhow::Result<()> {
    let mode = match mode {
        Some(mode) => mode,
        None => match select_mode(config)? {
            Some(mode) => mode,
            None => return Ok(()),
        },
    };

    let (p1_human, p2_human) = match mode {
        Mode::HumanVsComputer => (true, false),
        Mode::ComputerVsHuman => (false, true),
        Mode::HumanVsHuman => (true, true),
        Mode::ComputerVsComputer => (false, false),
    };

    let board = share(Board::new(config.size)?);
    let p1 = make_player(PlayerId::Player1, p1_human, &board, config);
    let p2 = make_player(PlayerId::Player2, p2_human, &board, config);
    let mut game = Game::new(board.clone(), p1, p2)?;

    let winner = game.play(|game, event| {
        let board = game.board().borrow();
        let mut state = DisplayState::new();
        state.last_move = board.last_move();
        state.status_msg = Some(match event {
            GameEvent::Finished { winner } => {
                format!("Game over! {} ({}) wins!", game.player(*winner).name(), winner)
            }
            GameEvent::Rejected { error, .. } => {
                let turn = board.current_turn();
                format!("{} | {}", error, turn_message(turn, game.player(turn).name()))
            }
            _ => {
                let turn = board.current_turn();
                let player = game.player(turn);
                if player.is_human() {
                    turn_message(turn, player.name())
                } else {
                    format!("{} is thinking...", player.name())
                }
            }
        });
        if let Err(e) = render_board(&board, &state) {
            warn!(error = %e, "render failed");
        }
    })?;
    info!(%winner, "finished");

    if replay {
        let history = board.borrow().history().to_vec();
        ReplayViewer::new(config.size, history)?.run()?;
    }
    Ok(())
}
