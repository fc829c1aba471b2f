//! Computer opponent: move selection for each difficulty.
//!
//! - `easy`: uniformly random move
//! - `medium`: a fixed-priority heuristic most of the time, otherwise random
//! - `hard`: exhaustive minimax (see [`crate::minimax`])
//!
//! Randomness is injected through [`RandomSource`] so games can be replayed
//! from a seed.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::board::{Board, Player, available_moves, check_winner, is_game_over};
use crate::constants::{
    CENTER, CORNERS, EASY_DELAY, EDGES, HARD_DELAY, MEDIUM_DELAY, MEDIUM_STRATEGIC_PROB,
};
use crate::minimax::best_move;

/// Errors raised by the decision module.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionError {
    /// The board is full or already won.
    #[error("no moves available: the game is over")]
    NoMovesAvailable,
    /// A difficulty string was not one of `easy`, `medium`, `hard`.
    #[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
    UnknownDifficulty(String),
}

/// Opponent strength.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Default pause before the computer answers at this difficulty.
    pub fn thinking_delay(self) -> Duration {
        match self {
            Difficulty::Easy => EASY_DELAY,
            Difficulty::Medium => MEDIUM_DELAY,
            Difficulty::Hard => HARD_DELAY,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(s)
    }
}

impl FromStr for Difficulty {
    type Err = DecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(DecisionError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Source of randomness for the opponent.
pub trait RandomSource {
    /// Uniform index in `0..len`. Never called with `len == 0`.
    fn index(&mut self, len: usize) -> usize;

    /// Uniform float in `[0, 1)`.
    fn chance(&mut self) -> f64;
}

impl RandomSource for fastrand::Rng {
    fn index(&mut self, len: usize) -> usize {
        self.usize(..len)
    }

    fn chance(&mut self) -> f64 {
        self.f64()
    }
}

/// Choose a move for `ai_player`.
///
/// # Errors
/// [`DecisionError::NoMovesAvailable`] if the board is already decided.
pub fn decide_move<R>(
    board: &Board,
    difficulty: Difficulty,
    ai_player: Player,
    rng: &mut R,
) -> Result<usize, DecisionError>
where
    R: RandomSource + ?Sized,
{
    if is_game_over(board) {
        return Err(DecisionError::NoMovesAvailable);
    }
    let mv = match difficulty {
        Difficulty::Easy => random_move(board, rng),
        Difficulty::Medium => medium_move(board, ai_player, rng),
        Difficulty::Hard => best_move(board, ai_player),
    }
    .ok_or(DecisionError::NoMovesAvailable)?;

    debug!(%difficulty, player = %ai_player, mv, "computer move decided");
    Ok(mv)
}

/// [`decide_move`] after a pause. Dropping the future cancels it; the
/// chosen move does not depend on the delay.
pub async fn decide_move_with_delay<R>(
    board: Board,
    difficulty: Difficulty,
    ai_player: Player,
    delay: Duration,
    rng: &mut R,
) -> Result<usize, DecisionError>
where
    R: RandomSource + ?Sized,
{
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    decide_move(&board, difficulty, ai_player, rng)
}

/// Uniformly random empty cell.
pub fn random_move<R: RandomSource + ?Sized>(board: &Board, rng: &mut R) -> Option<usize> {
    pick(&available_moves(board), rng)
}

/// Strategic move with probability [`MEDIUM_STRATEGIC_PROB`], otherwise (or
/// when the heuristic finds nothing) a random move.
pub fn medium_move<R: RandomSource + ?Sized>(
    board: &Board,
    ai_player: Player,
    rng: &mut R,
) -> Option<usize> {
    if rng.chance() < MEDIUM_STRATEGIC_PROB {
        if let Some(mv) = strategic_move(board, ai_player, rng) {
            return Some(mv);
        }
    }
    random_move(board, rng)
}

/// Fixed-priority heuristic: win, block, center, corner, edge.
pub fn strategic_move<R: RandomSource + ?Sized>(
    board: &Board,
    ai_player: Player,
    rng: &mut R,
) -> Option<usize> {
    if let Some(mv) = finishing_move(board, ai_player) {
        return Some(mv);
    }
    if let Some(mv) = finishing_move(board, ai_player.opponent()) {
        return Some(mv);
    }
    if board.is_empty_at(CENTER) {
        return Some(CENTER);
    }
    let corners: Vec<usize> = CORNERS.into_iter().filter(|&c| board.is_empty_at(c)).collect();
    if let Some(mv) = pick(&corners, rng) {
        return Some(mv);
    }
    let edges: Vec<usize> = EDGES.into_iter().filter(|&e| board.is_empty_at(e)).collect();
    pick(&edges, rng)
}

/// First empty cell (ascending) that completes a line for `player`.
pub fn finishing_move(board: &Board, player: Player) -> Option<usize> {
    available_moves(board)
        .into_iter()
        .find(|&mv| check_winner(&board.with_mark(mv, player)) == Some(player))
}

fn pick<R: RandomSource + ?Sized>(cells: &[usize], rng: &mut R) -> Option<usize> {
    if cells.is_empty() {
        return None;
    }
    Some(cells[rng.index(cells.len())])
}
