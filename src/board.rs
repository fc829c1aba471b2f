//! Board representation, move application, and win/draw detection.
//!
//! A [`Board`] is a small `Copy` value: every operation that changes it
//! returns a new board, so callers (and the search) never share mutable
//! state.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::trace;

use crate::constants::{CELLS, SIDE, WINNING_LINES};

/// One of the two players, identified by their mark.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Returns the other player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// The mark as a character.
    pub fn mark(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mark())
    }
}

impl FromStr for Player {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "X" | "x" => Ok(Player::X),
            "O" | "o" => Ok(Player::O),
            other => Err(ParseError::Mark(other.to_string())),
        }
    }
}

/// A single cell: a player's mark or empty.
pub type Cell = Option<Player>;

/// Errors raised when a move cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The target cell already holds a mark.
    #[error("cell {0} is already occupied")]
    Occupied(usize),
    /// The index is outside 0..=8.
    #[error("cell index {0} is out of range (expected 0-8)")]
    OutOfRange(usize),
    /// The game already has a winner or is drawn.
    #[error("the game is already over")]
    GameOver,
}

/// Errors raised when parsing marks or boards from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("board must have 9 cells, got {0}")]
    Length(usize),
    #[error("unknown mark '{0}'")]
    Mark(String),
}

/// A 3x3 board in row-major order (indices 0-8).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Self {
            cells: [None; CELLS],
        }
    }

    /// Build a board directly from its cells.
    pub fn from_cells(cells: [Cell; CELLS]) -> Self {
        Self { cells }
    }

    /// The cell at `index`, or `None` when the index is off the board.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Whether `index` is on the board and empty.
    pub fn is_empty_at(&self, index: usize) -> bool {
        matches!(self.get(index), Some(None))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Place `player`'s mark without validation. Only for callers that have
    /// already checked the cell is empty and in range.
    pub(crate) fn with_mark(mut self, index: usize, player: Player) -> Self {
        self.cells[index] = Some(player);
        self
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIDE {
            for col in 0..SIDE {
                let idx = row * SIDE + col;
                match self.cells[idx] {
                    Some(p) => write!(f, " {p} ")?,
                    None => write!(f, " {idx} ")?,
                }
                if col + 1 < SIDE {
                    write!(f, "|")?;
                }
            }
            writeln!(f)?;
            if row + 1 < SIDE {
                writeln!(f, "---+---+---")?;
            }
        }
        Ok(())
    }
}

/// Parse a 9-character board string such as `"XX.OO...."`.
///
/// `X`/`x` and `O`/`o` are marks; `.`, `-`, `_` and space are empty cells.
impl FromStr for Board {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != CELLS {
            return Err(ParseError::Length(chars.len()));
        }
        let mut cells = [None; CELLS];
        for (cell, ch) in cells.iter_mut().zip(chars) {
            *cell = match ch {
                'X' | 'x' => Some(Player::X),
                'O' | 'o' => Some(Player::O),
                '.' | '-' | '_' | ' ' => None,
                other => return Err(ParseError::Mark(other.to_string())),
            };
        }
        Ok(Self { cells })
    }
}

/// Create a board of 9 empty cells.
pub fn create_empty_board() -> Board {
    Board::new()
}

/// Return the mark that completes a winning line, if any.
///
/// All 8 lines are scanned; in a legal game at most one mark can own a
/// completed line.
pub fn check_winner(board: &Board) -> Option<Player> {
    winning_line(board).map(|(player, _)| player)
}

/// Return the first completed line (rows, columns, then diagonals) for
/// highlighting.
pub fn winning_combination(board: &Board) -> Option<[usize; 3]> {
    winning_line(board).map(|(_, line)| line)
}

fn winning_line(board: &Board) -> Option<(Player, [usize; 3])> {
    WINNING_LINES.iter().find_map(|&[a, b, c]| {
        let mark = board.cells[a]?;
        (board.cells[b] == Some(mark) && board.cells[c] == Some(mark)).then_some((mark, [a, b, c]))
    })
}

/// True when every cell is occupied. Callers check the winner first, since
/// a full board may also be a win.
pub fn check_draw(board: &Board) -> bool {
    board.cells.iter().all(Option::is_some)
}

/// True when the board is won or full.
pub fn is_game_over(board: &Board) -> bool {
    check_winner(board).is_some() || check_draw(board)
}

/// Indices of empty cells in ascending order.
pub fn available_moves(board: &Board) -> Vec<usize> {
    board
        .cells
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_none())
        .map(|(i, _)| i)
        .collect()
}

/// Return a new board with `player`'s mark at `index`.
///
/// # Errors
/// - [`MoveError::OutOfRange`] if `index` is not in 0..=8
/// - [`MoveError::Occupied`] if the cell already holds a mark
pub fn make_move(board: &Board, index: usize, player: Player) -> Result<Board, MoveError> {
    match board.get(index) {
        None => Err(MoveError::OutOfRange(index)),
        Some(Some(_)) => Err(MoveError::Occupied(index)),
        Some(None) => {
            trace!(index, %player, "placing mark");
            Ok(board.with_mark(index, player))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().expect("valid board literal")
    }

    #[test]
    fn test_empty_board() {
        let b = create_empty_board();
        assert_eq!(b.occupied(), 0);
        assert_eq!(available_moves(&b), (0..9).collect::<Vec<_>>());
        assert_eq!(check_winner(&b), None);
        assert!(!check_draw(&b));
    }

    #[test]
    fn test_winner_every_line() {
        for line in WINNING_LINES {
            let mut b = Board::new();
            for idx in line {
                b = make_move(&b, idx, Player::O).unwrap();
            }
            assert_eq!(check_winner(&b), Some(Player::O), "line {line:?}");
            assert_eq!(winning_combination(&b), Some(line));
        }
    }

    #[test]
    fn test_winning_combination_prefers_rows() {
        // Top row and left column both complete for X.
        let b = board("XXXXO.XOO");
        assert_eq!(winning_combination(&b), Some([0, 1, 2]));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let b = board("XX.OO....");
        assert_eq!(check_winner(&b), None);
        assert_eq!(winning_combination(&b), None);
    }

    #[test]
    fn test_draw_full_board() {
        let b = board("XOXXOOOXX");
        assert_eq!(check_winner(&b), None);
        assert!(check_draw(&b));
        assert!(is_game_over(&b));
    }

    #[test]
    fn test_full_board_can_be_a_win() {
        let b = board("XXXOOXOXO");
        assert_eq!(check_winner(&b), Some(Player::X));
        assert!(check_draw(&b));
    }

    #[test]
    fn test_make_move_is_pure() {
        let b = Board::new();
        let next = make_move(&b, 4, Player::X).unwrap();
        assert_eq!(b.get(4), Some(None));
        assert_eq!(next.get(4), Some(Some(Player::X)));
    }

    #[test]
    fn test_make_move_occupied() {
        let b = make_move(&Board::new(), 0, Player::X).unwrap();
        assert_eq!(make_move(&b, 0, Player::O), Err(MoveError::Occupied(0)));
    }

    #[test]
    fn test_make_move_out_of_range() {
        assert_eq!(
            make_move(&Board::new(), 9, Player::X),
            Err(MoveError::OutOfRange(9))
        );
    }

    #[test]
    fn test_available_moves_ascending() {
        let b = board("X...O...X");
        assert_eq!(available_moves(&b), vec![1, 2, 3, 5, 6, 7]);
    }

    #[test]
    fn test_parse_board_rejects_bad_input() {
        assert!("XX".parse::<Board>().is_err());
        assert!("XX.OO...Z".parse::<Board>().is_err());
    }

    #[test]
    fn test_display() {
        let b = board("X...O....");
        let s = b.to_string();
        assert!(s.starts_with(" X | 1 | 2 "));
        assert!(s.contains(" 3 | O | 5 "));
    }
}
