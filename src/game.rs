//! Game state and move history.
//!
//! A [`GameState`] is an immutable snapshot. Applying a move or undoing one
//! returns a new state and leaves the input untouched, so callers simply
//! replace the state they hold.
//!
//! History is stored as a sequence of full board snapshots plus a pointer
//! (`current_move_index`) into it. Undo moves the pointer back; a new move
//! after an undo truncates everything past the pointer before appending, so
//! the abandoned redo branch is dropped.

use tracing::debug;

use crate::board::{
    Board, MoveError, Player, check_draw, check_winner, create_empty_board, make_move,
};

/// Who produced a history entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Actor {
    Human,
    Computer,
}

/// One snapshot in the game history.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Board after this entry's move
    pub board: Board,
    /// Actor that played the move (`None` for the starting position)
    pub actor: Option<Actor>,
}

/// An immutable game snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    winner: Option<Player>,
    is_draw: bool,
    history: Vec<HistoryEntry>,
    current_move_index: usize,
}

impl Default for GameState {
    fn default() -> Self {
        initialize_game()
    }
}

impl GameState {
    /// The current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Player to move.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Winner, once decided.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// True when the board is full without a winner.
    pub fn is_draw(&self) -> bool {
        self.is_draw
    }

    /// True when the game has a winner or is drawn.
    pub fn is_over(&self) -> bool {
        self.winner.is_some() || self.is_draw
    }

    /// Full history, including any redo branch beyond the pointer.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// History boards in order (index 0 is the empty board).
    pub fn history_boards(&self) -> impl Iterator<Item = &Board> + '_ {
        self.history.iter().map(|e| &e.board)
    }

    /// Position of the current board in the history (0 = start).
    pub fn current_move_index(&self) -> usize {
        self.current_move_index
    }

    /// Whether there is a move to undo.
    pub fn can_undo(&self) -> bool {
        self.current_move_index > 0
    }

    /// Restore the pointer to `index`, recomputing the derived fields.
    fn rewound_to(&self, index: usize) -> Self {
        let board = self.history[index].board;
        let (winner, is_draw) = outcome(&board);
        Self {
            board,
            current_player: self.current_player.opponent(),
            winner,
            is_draw,
            history: self.history.clone(),
            current_move_index: index,
        }
    }
}

fn outcome(board: &Board) -> (Option<Player>, bool) {
    let winner = check_winner(board);
    let is_draw = winner.is_none() && check_draw(board);
    (winner, is_draw)
}

/// A fresh game: empty board, X to move, single-entry history.
pub fn initialize_game() -> GameState {
    let board = create_empty_board();
    GameState {
        board,
        current_player: Player::X,
        winner: None,
        is_draw: false,
        history: vec![HistoryEntry { board, actor: None }],
        current_move_index: 0,
    }
}

/// Same as [`initialize_game`].
pub fn reset_game() -> GameState {
    initialize_game()
}

/// Apply a human move for the current player.
///
/// # Errors
/// - [`MoveError::Occupied`] / [`MoveError::OutOfRange`] from [`make_move`]
/// - [`MoveError::GameOver`] if the cell is free but the game is decided
pub fn update_game_state(state: &GameState, move_index: usize) -> Result<GameState, MoveError> {
    update_game_state_by(state, move_index, Actor::Human)
}

/// Apply a move for the current player, tagging the history entry with
/// `actor`.
pub fn update_game_state_by(
    state: &GameState,
    move_index: usize,
    actor: Actor,
) -> Result<GameState, MoveError> {
    let board = make_move(&state.board, move_index, state.current_player)?;
    if state.is_over() {
        return Err(MoveError::GameOver);
    }
    let (winner, is_draw) = outcome(&board);

    let mut history = Vec::with_capacity(state.current_move_index + 2);
    history.extend_from_slice(&state.history[..=state.current_move_index]);
    history.push(HistoryEntry {
        board,
        actor: Some(actor),
    });

    debug!(
        index = move_index,
        player = %state.current_player,
        ?actor,
        ?winner,
        is_draw,
        "move applied"
    );

    Ok(GameState {
        board,
        current_player: state.current_player.opponent(),
        winner,
        is_draw,
        history,
        current_move_index: state.current_move_index + 1,
    })
}

/// Step back one move. At the start this returns an unchanged copy.
pub fn undo_move(state: &GameState) -> GameState {
    if !state.can_undo() {
        return state.clone();
    }
    state.rewound_to(state.current_move_index - 1)
}

/// Undo back to (and including) the most recent human move.
///
/// Computer replies that followed it are undone too, so in a game against
/// the computer this returns to the human's turn.
pub fn undo_round(state: &GameState) -> GameState {
    let mut current = state.clone();
    while current.can_undo() {
        let undone = current.history[current.current_move_index].actor;
        current = undo_move(&current);
        if undone != Some(Actor::Computer) {
            break;
        }
    }
    debug!(
        from = state.current_move_index,
        to = current.current_move_index,
        "round undone"
    );
    current
}

/// Status line for display.
pub fn game_status(state: &GameState) -> String {
    if let Some(winner) = state.winner {
        return format!("Player {winner} wins!");
    }
    if state.is_draw {
        return "It's a draw!".to_string();
    }
    format!("Player {}'s turn", state.current_player)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(state: &GameState, moves: &[usize]) -> GameState {
        moves.iter().fold(state.clone(), |s, &m| {
            update_game_state(&s, m).expect("legal move")
        })
    }

    #[test]
    fn test_initialize_game() {
        let s = initialize_game();
        assert_eq!(s.current_player(), Player::X);
        assert_eq!(s.winner(), None);
        assert!(!s.is_draw());
        assert_eq!(s.history().len(), 1);
        assert_eq!(s.current_move_index(), 0);
        assert_eq!(game_status(&s), "Player X's turn");
        assert_eq!(reset_game(), s);
    }

    #[test]
    fn test_update_alternates_and_tracks_history() {
        let s = play(&initialize_game(), &[0, 4, 1]);
        assert_eq!(s.current_player(), Player::O);
        assert_eq!(s.current_move_index(), 3);
        assert_eq!(s.history().len(), 4);
        assert_eq!(s.history()[3].board, *s.board());
        assert_eq!(game_status(&s), "Player O's turn");
    }

    #[test]
    fn test_win_detected_and_final() {
        let s = play(&initialize_game(), &[0, 3, 1, 4, 2]);
        assert_eq!(s.winner(), Some(Player::X));
        assert!(!s.is_draw());
        assert_eq!(game_status(&s), "Player X wins!");
        assert_eq!(update_game_state(&s, 8), Err(MoveError::GameOver));
    }

    #[test]
    fn test_draw_detected() {
        // X O X / X O O / O X X
        let s = play(&initialize_game(), &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
        assert_eq!(s.winner(), None);
        assert!(s.is_draw());
        assert_eq!(game_status(&s), "It's a draw!");
    }

    #[test]
    fn test_occupied_leaves_state_untouched() {
        let s = play(&initialize_game(), &[4]);
        let before = s.clone();
        assert_eq!(update_game_state(&s, 4), Err(MoveError::Occupied(4)));
        assert_eq!(s, before);
    }

    #[test]
    fn test_undo_at_start_is_noop() {
        let s = initialize_game();
        assert_eq!(undo_move(&s), s);
    }

    #[test]
    fn test_undo_restores_previous() {
        let s1 = play(&initialize_game(), &[0]);
        let s2 = update_game_state(&s1, 4).unwrap();
        let back = undo_move(&s2);
        assert_eq!(back.board(), s1.board());
        assert_eq!(back.current_player(), s1.current_player());
        assert_eq!(back.current_move_index(), 1);
        // redo branch kept until a new move is played
        assert_eq!(back.history().len(), 3);
    }

    #[test]
    fn test_move_after_undo_truncates_redo_branch() {
        let s = play(&initialize_game(), &[0, 4, 8]);
        let back = undo_move(&undo_move(&s));
        let replay = update_game_state(&back, 2).unwrap();
        assert_eq!(replay.history().len(), 3);
        assert_eq!(replay.current_move_index(), 2);
        assert_eq!(replay.board().get(4), Some(None));
        assert_eq!(replay.board().get(2), Some(Some(Player::O)));
    }

    #[test]
    fn test_undo_clears_win() {
        let s = play(&initialize_game(), &[0, 3, 1, 4, 2]);
        let back = undo_move(&s);
        assert_eq!(back.winner(), None);
        assert_eq!(back.current_player(), Player::X);
    }

    #[test]
    fn test_undo_round_skips_computer_reply() {
        let s = update_game_state(&initialize_game(), 0).unwrap();
        let s = update_game_state_by(&s, 4, Actor::Computer).unwrap();
        let s = update_game_state(&s, 8).unwrap();
        let s = update_game_state_by(&s, 2, Actor::Computer).unwrap();

        let back = undo_round(&s);
        assert_eq!(back.current_move_index(), 2);
        assert_eq!(back.current_player(), Player::X);
        assert_eq!(back.board().get(8), Some(None));
    }

    #[test]
    fn test_undo_round_after_human_win() {
        // Human's winning move had no computer reply after it.
        let s = update_game_state(&initialize_game(), 0).unwrap();
        let s = update_game_state_by(&s, 3, Actor::Computer).unwrap();
        let s = update_game_state(&s, 1).unwrap();
        let s = update_game_state_by(&s, 4, Actor::Computer).unwrap();
        let s = update_game_state(&s, 2).unwrap();
        assert_eq!(s.winner(), Some(Player::X));

        let back = undo_round(&s);
        assert_eq!(back.current_move_index(), 4);
        assert_eq!(back.current_player(), Player::X);
        assert_eq!(back.winner(), None);
    }

    #[test]
    fn test_undo_round_at_start() {
        let s = initialize_game();
        assert_eq!(undo_round(&s), s);
    }
}
