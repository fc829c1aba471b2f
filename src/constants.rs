//! Constants for board geometry, search scoring, and opponent behaviour.
//!
//! The board is a flat array of 9 cells in row-major order:
//!
//! ```text
//!  0 | 1 | 2
//! ---+---+---
//!  3 | 4 | 5
//! ---+---+---
//!  6 | 7 | 8
//! ```

use std::time::Duration;

// =============================================================================
// Board Geometry
// =============================================================================

/// Board side length.
pub const SIDE: usize = 3;

/// Number of cells on the board.
pub const CELLS: usize = SIDE * SIDE;

/// The 8 winning lines: rows, then columns, then diagonals.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2], // Top row
    [3, 4, 5], // Middle row
    [6, 7, 8], // Bottom row
    [0, 3, 6], // Left column
    [1, 4, 7], // Middle column
    [2, 5, 8], // Right column
    [0, 4, 8], // Diagonal
    [2, 4, 6], // Anti-diagonal
];

/// Center cell.
pub const CENTER: usize = 4;

/// Corner cells.
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// Edge (side-middle) cells.
pub const EDGES: [usize; 4] = [1, 3, 5, 7];

// =============================================================================
// Minimax Scoring
// =============================================================================

/// Base score for a decided game. A win found `d` plies deep scores
/// `WIN_SCORE - d`, a loss scores `d - WIN_SCORE`.
pub const WIN_SCORE: i32 = 10;

/// Score of a drawn position.
pub const DRAW_SCORE: i32 = 0;

// =============================================================================
// Opponent Behaviour
// =============================================================================

/// Probability that the medium opponent tries the strategic heuristic
/// before falling back to a random move.
pub const MEDIUM_STRATEGIC_PROB: f64 = 0.7;

/// Thinking delay before the easy opponent answers.
pub const EASY_DELAY: Duration = Duration::from_millis(300);

/// Thinking delay before the medium opponent answers.
pub const MEDIUM_DELAY: Duration = Duration::from_millis(500);

/// Thinking delay before the hard opponent answers.
pub const HARD_DELAY: Duration = Duration::from_millis(800);

// =============================================================================
// Session Defaults
// =============================================================================

/// Default display name for the X player.
pub const DEFAULT_NAME_X: &str = "Player X";

/// Default display name for the O player.
pub const DEFAULT_NAME_O: &str = "Player O";
