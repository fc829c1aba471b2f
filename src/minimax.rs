//! Exhaustive minimax search for the hard opponent.
//!
//! The tree is searched to the end of the game from every root move. Each
//! branch works on its own copy of the board (`Board` is `Copy`), so no
//! state is shared between branches.
//!
//! Terminal positions are scored from the AI's point of view:
//! - AI win: `WIN_SCORE - depth`
//! - opponent win: `depth - WIN_SCORE`
//! - draw: `DRAW_SCORE`
//!
//! where `depth` counts plies below the root move. Faster wins and slower
//! losses therefore score higher.

use tracing::trace;

use crate::board::{Board, Player, available_moves, check_draw, check_winner};
use crate::constants::{DRAW_SCORE, WIN_SCORE};

/// Score every available move for `ai_player`, in ascending index order.
pub fn evaluate_moves(board: &Board, ai_player: Player) -> Vec<(usize, i32)> {
    available_moves(board)
        .into_iter()
        .map(|mv| {
            let child = board.with_mark(mv, ai_player);
            (mv, minimax(&child, 0, false, ai_player))
        })
        .collect()
}

/// Pick the move with the highest minimax score.
///
/// Ties go to the lowest index. Returns `None` when no cell is empty.
pub fn best_move(board: &Board, ai_player: Player) -> Option<usize> {
    let mut best: Option<(usize, i32)> = None;
    for (mv, score) in evaluate_moves(board, ai_player) {
        trace!(mv, score, "root move scored");
        if best.is_none_or(|(_, s)| score > s) {
            best = Some((mv, score));
        }
    }
    best.map(|(mv, _)| mv)
}

/// Minimax value of `board` for `ai_player`.
///
/// `maximizing` is true when it is the AI's turn to place a mark.
pub fn minimax(board: &Board, depth: i32, maximizing: bool, ai_player: Player) -> i32 {
    match check_winner(board) {
        Some(p) if p == ai_player => return WIN_SCORE - depth,
        Some(_) => return depth - WIN_SCORE,
        None => {}
    }
    if check_draw(board) {
        return DRAW_SCORE;
    }

    let mover = if maximizing {
        ai_player
    } else {
        ai_player.opponent()
    };
    let scores = available_moves(board)
        .into_iter()
        .map(|mv| minimax(&board.with_mark(mv, mover), depth + 1, !maximizing, ai_player));

    let value = if maximizing { scores.max() } else { scores.min() };
    value.unwrap_or(DRAW_SCORE)
}
