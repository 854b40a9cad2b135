//! A depth-limited minimax agent for playing the board game 'Connect 4'
//!
//! The agent grows a game tree from the current position to a fixed depth,
//! scores the frontier with a static evaluation and backs the scores up with
//! alpha-beta pruned minimax to choose a move.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_minimax::{board::Board, state::State, turn::Turn};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // Red has three in a row along the bottom and is to move
//! let board = Board::from_moves(Turn::Red, "112233")?;
//! let mut state = State::new(Turn::Red, board, Turn::Red);
//! state.expand_up_to(2)?;
//! state.compute_minimax();
//!
//! assert_eq!(state.get_preferred_move()?.column(), 3);
//! assert_eq!(state.value()?, i32::MAX);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod turn;

pub mod board;

pub mod state;


/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

// ensure that a line of four fits on the board in every direction
const_assert!(WIDTH >= 4 && HEIGHT >= 4);
// columns are entered as single digits
const_assert!(WIDTH <= 9);
