//! Tictac-Rust: a tic-tac-toe engine with a computer opponent.
//!
//! The engine is pure: boards and game states are immutable values, and
//! every move or undo returns a new one. The computer opponent has three
//! difficulty levels, the hardest running an exhaustive minimax search.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, scoring, and opponent parameters
//! - [`board`] - Board representation and win/draw detection
//! - [`game`] - Game state, history, and undo
//! - [`ai`] - Move selection per difficulty
//! - [`minimax`] - Exhaustive search for the hard opponent
//! - [`session`] - Mode, names, scores around a running game
//! - [`console`] - Text command protocol for driving a session
//!
//! ## Example
//!
//! ```
//! use tictac_rust::ai::{Difficulty, decide_move};
//! use tictac_rust::game::{game_status, initialize_game, update_game_state};
//!
//! // X opens in the corner
//! let state = initialize_game();
//! let state = update_game_state(&state, 0).unwrap();
//!
//! // Ask the hard opponent for O's reply
//! let mut rng = fastrand::Rng::with_seed(7);
//! let reply = decide_move(state.board(), Difficulty::Hard, state.current_player(), &mut rng).unwrap();
//! assert_eq!(reply, 4);
//!
//! let state = update_game_state(&state, reply).unwrap();
//! assert_eq!(game_status(&state), "Player X's turn");
//! ```

pub mod ai;
pub mod board;
pub mod console;
pub mod constants;
pub mod game;
pub mod minimax;
pub mod session;
