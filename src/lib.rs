pub mod config;
pub mod core;
pub mod display;
pub mod game;
pub mod logic;
pub mod player;
pub mod selfplay;


pub use crate::core::{Board, GameError, Move, PlayerId, SharedBoard};
pub use crate::game::{Game, GameEvent};
