//! Card zones: draw piles, hands, and the lane board.

pub mod board;
pub mod deck;

pub use board::{Board, Row};
pub use deck::{Deck, Hand};
