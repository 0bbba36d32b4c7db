pub mod selector;
pub mod weighted;

pub use selector::{Classified, MoveSelector};
pub use weighted::weighted_choice;
