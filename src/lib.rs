pub mod dictionary;
pub mod error;
pub mod judge;
pub mod matrix;
pub mod pattern;
pub mod players;
pub mod posterior;
pub mod word;

pub use error::{Result, WordleError};
pub use judge::Game;
pub use matrix::Matrix;
pub use pattern::{Mark, Pattern};
pub use players::{Greedy, Player, TwoStep};
pub use posterior::Posterior;
pub use word::{Word, L};
