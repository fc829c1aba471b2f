//! A game session: the caller that holds the current [`GameState`].
//!
//! The session adds what a front-end needs around the pure engine: the
//! game mode, the computer's difficulty, player names, a running
//! scoreboard, and the rule that the human cannot move (or undo) while the
//! computer is to play. Against the computer the human always plays X.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::info;

use crate::ai::{DecisionError, Difficulty, RandomSource, decide_move};
use crate::board::{MoveError, Player};
use crate::constants::{DEFAULT_NAME_O, DEFAULT_NAME_X};
use crate::game::{Actor, GameState, reset_game, undo_move, undo_round, update_game_state_by};

/// Errors raised by session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The human tried to act while the computer is to move.
    #[error("it is the computer's turn")]
    ComputerTurn,
    /// A computer move was submitted while the human is to move.
    #[error("it is not the computer's turn")]
    NotComputerTurn,
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error(transparent)]
    Decision(#[from] DecisionError),
    #[error("unknown mode '{0}' (expected pvp or pve)")]
    UnknownMode(String),
}

/// Who plays against whom.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum GameMode {
    #[default]
    PlayerVsPlayer,
    PlayerVsComputer,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::PlayerVsPlayer => f.write_str("pvp"),
            GameMode::PlayerVsComputer => f.write_str("pve"),
        }
    }
}

impl FromStr for GameMode {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pvp" => Ok(GameMode::PlayerVsPlayer),
            "pve" | "pvc" => Ok(GameMode::PlayerVsComputer),
            _ => Err(SessionError::UnknownMode(s.to_string())),
        }
    }
}

/// Wins per mark. Draws are not counted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Scores {
    pub x: u32,
    pub o: u32,
}

impl Scores {
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    fn record_win(&mut self, player: Player) {
        match player {
            Player::X => self.x += 1,
            Player::O => self.o += 1,
        }
    }
}

/// Current game plus the settings and tallies around it.
#[derive(Clone, Debug)]
pub struct Session {
    state: GameState,
    mode: GameMode,
    difficulty: Difficulty,
    name_x: String,
    name_o: String,
    scores: Scores,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GameMode::default(), Difficulty::default())
    }
}

impl Session {
    pub fn new(mode: GameMode, difficulty: Difficulty) -> Self {
        Self {
            state: reset_game(),
            mode,
            difficulty,
            name_x: DEFAULT_NAME_X.to_string(),
            name_o: DEFAULT_NAME_O.to_string(),
            scores: Scores::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    /// The mark the computer plays, if any.
    pub fn computer_player(&self) -> Option<Player> {
        match self.mode {
            GameMode::PlayerVsComputer => Some(Player::O),
            GameMode::PlayerVsPlayer => None,
        }
    }

    /// True when the computer must move next.
    pub fn is_computer_turn(&self) -> bool {
        !self.state.is_over() && self.computer_player() == Some(self.state.current_player())
    }

    /// Display name for `player`; the computer shows as `AI (<difficulty>)`.
    pub fn name(&self, player: Player) -> String {
        if self.computer_player() == Some(player) {
            return format!("AI ({})", self.difficulty);
        }
        match player {
            Player::X => self.name_x.clone(),
            Player::O => self.name_o.clone(),
        }
    }

    /// Name of the player to move.
    pub fn current_player_name(&self) -> String {
        self.name(self.state.current_player())
    }

    /// Play a human move.
    ///
    /// # Errors
    /// - [`SessionError::ComputerTurn`] while the computer is to move
    /// - [`SessionError::Move`] if the engine rejects the move
    pub fn play(&mut self, index: usize) -> Result<&GameState, SessionError> {
        if self.is_computer_turn() {
            return Err(SessionError::ComputerTurn);
        }
        self.apply(index, Actor::Human)
    }

    /// Apply a move the computer has already decided on.
    pub fn play_computer_move(&mut self, index: usize) -> Result<&GameState, SessionError> {
        if !self.is_computer_turn() {
            return Err(SessionError::NotComputerTurn);
        }
        self.apply(index, Actor::Computer)
    }

    /// Decide and apply the computer's move without any delay.
    pub fn computer_move<R>(&mut self, rng: &mut R) -> Result<usize, SessionError>
    where
        R: RandomSource + ?Sized,
    {
        let player = match self.computer_player() {
            Some(p) if self.is_computer_turn() => p,
            _ => return Err(SessionError::NotComputerTurn),
        };
        let mv = decide_move(self.state.board(), self.difficulty, player, rng)?;
        self.apply(mv, Actor::Computer)?;
        Ok(mv)
    }

    fn apply(&mut self, index: usize, actor: Actor) -> Result<&GameState, SessionError> {
        let next = update_game_state_by(&self.state, index, actor)?;
        if let Some(winner) = next.winner() {
            self.scores.record_win(winner);
            info!(%winner, x = self.scores.x, o = self.scores.o, "game won");
        } else if next.is_draw() {
            info!("game drawn");
        }
        self.state = next;
        Ok(&self.state)
    }

    /// Undo one move, or a whole round (human move plus computer reply)
    /// against the computer.
    pub fn undo(&mut self) -> Result<&GameState, SessionError> {
        if self.is_computer_turn() {
            return Err(SessionError::ComputerTurn);
        }
        self.state = match self.mode {
            GameMode::PlayerVsPlayer => undo_move(&self.state),
            GameMode::PlayerVsComputer => undo_round(&self.state),
        };
        Ok(&self.state)
    }

    /// Start a new game, keeping settings and scores.
    pub fn reset(&mut self) {
        self.state = reset_game();
    }

    /// Switch mode. Always starts a new game.
    pub fn set_mode(&mut self, mode: GameMode) {
        info!(%mode, "mode changed");
        self.mode = mode;
        self.reset();
    }

    /// Change difficulty. Starts a new game when playing the computer.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        info!(%difficulty, "difficulty changed");
        self.difficulty = difficulty;
        if self.mode == GameMode::PlayerVsComputer {
            self.reset();
        }
    }

    pub fn set_names(&mut self, x: impl Into<String>, o: impl Into<String>) {
        self.name_x = x.into();
        self.name_o = o.into();
    }

    pub fn reset_scores(&mut self) {
        self.scores = Scores::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::game_status;

    #[test]
    fn test_mode_parse() {
        assert_eq!("pvp".parse::<GameMode>(), Ok(GameMode::PlayerVsPlayer));
        assert_eq!("PVE".parse::<GameMode>(), Ok(GameMode::PlayerVsComputer));
        assert!("coop".parse::<GameMode>().is_err());
    }

    #[test]
    fn test_pvp_win_scores() {
        let mut s = Session::default();
        for mv in [0, 3, 1, 4, 2] {
            s.play(mv).unwrap();
        }
        assert_eq!(s.state().winner(), Some(Player::X));
        assert_eq!(s.scores(), Scores { x: 1, o: 0 });

        s.reset();
        assert_eq!(game_status(s.state()), "Player X's turn");
        assert_eq!(s.scores().get(Player::X), 1);
        s.reset_scores();
        assert_eq!(s.scores(), Scores::default());
    }

    #[test]
    fn test_draw_does_not_score() {
        let mut s = Session::default();
        for mv in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            s.play(mv).unwrap();
        }
        assert!(s.state().is_draw());
        assert_eq!(s.scores(), Scores::default());
    }

    #[test]
    fn test_human_blocked_on_computer_turn() {
        let mut s = Session::new(GameMode::PlayerVsComputer, Difficulty::Hard);
        s.play(0).unwrap();
        assert!(s.is_computer_turn());
        assert_eq!(s.play(1).unwrap_err(), SessionError::ComputerTurn);
        assert_eq!(s.undo().unwrap_err(), SessionError::ComputerTurn);
    }

    #[test]
    fn test_computer_move_and_round_undo() {
        let mut s = Session::new(GameMode::PlayerVsComputer, Difficulty::Hard);
        let mut rng = fastrand::Rng::with_seed(1);
        s.play(0).unwrap();
        let reply = s.computer_move(&mut rng).unwrap();
        assert_eq!(reply, 4);
        assert!(!s.is_computer_turn());

        s.undo().unwrap();
        assert_eq!(s.state().current_move_index(), 0);
        assert_eq!(s.state().current_player(), Player::X);
    }

    #[test]
    fn test_computer_move_rejected_on_human_turn() {
        let mut s = Session::new(GameMode::PlayerVsComputer, Difficulty::Easy);
        let mut rng = fastrand::Rng::with_seed(1);
        assert_eq!(
            s.computer_move(&mut rng).unwrap_err(),
            SessionError::NotComputerTurn
        );
        assert_eq!(
            s.play_computer_move(4).unwrap_err(),
            SessionError::NotComputerTurn
        );
    }

    #[test]
    fn test_pvp_undo_single_move() {
        let mut s = Session::default();
        s.play(0).unwrap();
        s.play(4).unwrap();
        s.undo().unwrap();
        assert_eq!(s.state().current_move_index(), 1);
        assert_eq!(s.state().current_player(), Player::O);
    }

    #[test]
    fn test_occupied_is_reported() {
        let mut s = Session::default();
        s.play(4).unwrap();
        assert_eq!(
            s.play(4).unwrap_err(),
            SessionError::Move(MoveError::Occupied(4))
        );
    }

    #[test]
    fn test_settings_reset_game() {
        let mut s = Session::default();
        s.play(0).unwrap();
        s.set_difficulty(Difficulty::Easy);
        // pvp keeps the game going
        assert_eq!(s.state().current_move_index(), 1);

        s.set_mode(GameMode::PlayerVsComputer);
        assert_eq!(s.state().current_move_index(), 0);

        s.play(0).unwrap();
        let mut rng = fastrand::Rng::with_seed(3);
        s.computer_move(&mut rng).unwrap();
        s.set_difficulty(Difficulty::Hard);
        assert_eq!(s.state().current_move_index(), 0);
    }

    #[test]
    fn test_names() {
        let mut s = Session::default();
        assert_eq!(s.current_player_name(), "Player X");
        s.set_names("Ada", "Grace");
        assert_eq!(s.name(Player::O), "Grace");

        s.set_mode(GameMode::PlayerVsComputer);
        s.set_difficulty(Difficulty::Hard);
        assert_eq!(s.name(Player::O), "AI (hard)");
        assert_eq!(s.name(Player::X), "Ada");
    }
}
