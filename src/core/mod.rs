pub mod board;
pub mod error;
pub mod r#move;
pub mod types;

pub use board::{Board, DEFAULT_SIZE};
pub use error::GameError;
pub use r#move::Move;
pub use types::{share, PlayerId, SharedBoard};
