pub mod ai;
pub mod computer;
pub mod controller;
pub mod human;

pub use computer::ComputerPlayer;
pub use controller::{PlayerController, PushOutcome};
pub use human::HumanPlayer;
