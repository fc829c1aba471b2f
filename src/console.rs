//! Line-oriented text protocol for driving a [`Session`].
//!
//! The framing follows GTP: each request is `[id] command [args...]`, each
//! reply is `=[id] text` on success or `?[id] text` on failure, followed by
//! a blank line. Empty lines and `#` comments are skipped.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `list_commands`, `known_command <cmd>`, `quit`
//! - `play <0-8>` - Play a move for the human to move
//! - `undo` - Undo a move (a whole round against the computer)
//! - `reset` - Start a new game
//! - `mode <pvp|pve>` - Switch mode (starts a new game)
//! - `difficulty <easy|medium|hard>` - Set the computer's strength
//! - `names <x> <o>` - Set display names
//! - `scores`, `reset_scores` - Show or clear the scoreboard
//! - `status`, `board`, `winning_line`, `moves` - Queries
//!
//! When a command leaves the computer to move, the loop waits for the
//! computer's thinking delay and prints `= computer <index>`.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use tracing::{debug, warn};

use crate::ai::{Difficulty, decide_move_with_delay};
use crate::board::{Player, available_moves, winning_combination};
use crate::game::game_status;
use crate::session::{GameMode, Session, SessionError};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "board",
    "difficulty",
    "known_command",
    "list_commands",
    "mode",
    "moves",
    "name",
    "names",
    "play",
    "quit",
    "reset",
    "reset_scores",
    "scores",
    "status",
    "undo",
    "version",
    "winning_line",
];

/// Console front-end state.
pub struct Console {
    session: Session,
    rng: fastrand::Rng,
    /// Fixed thinking delay; `None` uses the difficulty's default
    delay: Option<Duration>,
}

impl Console {
    pub fn new(session: Session, rng: fastrand::Rng) -> Self {
        Self {
            session,
            rng,
            delay: None,
        }
    }

    /// Use a fixed thinking delay for every computer move.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run the command loop until `quit` or end of input.
    pub async fn run<I, O>(&mut self, input: I, output: &mut O) -> io::Result<()>
    where
        I: BufRead,
        O: Write,
    {
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }

            while self.session.is_computer_turn() {
                match self.computer_turn().await {
                    Ok(mv) => writeln!(output, "= computer {mv}\n")?,
                    Err(e) => {
                        writeln!(output, "? computer {e}\n")?;
                        break;
                    }
                }
                output.flush()?;
            }
        }
        Ok(())
    }

    async fn computer_turn(&mut self) -> Result<usize, SessionError> {
        let player = self
            .session
            .computer_player()
            .ok_or(SessionError::NotComputerTurn)?;
        let difficulty = self.session.difficulty();
        let delay = self.delay.unwrap_or_else(|| difficulty.thinking_delay());
        let board = *self.session.state().board();

        let mv = decide_move_with_delay(board, difficulty, player, delay, &mut self.rng).await?;
        self.session.play_computer_move(mv)?;
        Ok(mv)
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        debug!(command, ?args, "console command");
        let (success, message) = self.dispatch(command, args);
        if !success {
            warn!(command, %message, "command rejected");
        }
        (success, message)
    }

    fn dispatch(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => match args.first() {
                Some(cmd) => {
                    let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                    (true, known.to_string())
                }
                None => (false, "missing argument".to_string()),
            },

            "quit" => (true, String::new()),

            "play" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let Ok(index) = arg.parse::<usize>() else {
                    return (false, format!("invalid cell '{arg}'"));
                };
                match self.session.play(index) {
                    Ok(state) => (true, game_status(state)),
                    Err(e) => (false, e.to_string()),
                }
            }

            "undo" => match self.session.undo() {
                Ok(state) => (true, game_status(state)),
                Err(e) => (false, e.to_string()),
            },

            "reset" => {
                self.session.reset();
                (true, game_status(self.session.state()))
            }

            "mode" => match args.first().map(|m| m.parse::<GameMode>()) {
                Some(Ok(mode)) => {
                    self.session.set_mode(mode);
                    (true, String::new())
                }
                Some(Err(e)) => (false, e.to_string()),
                None => (false, "missing argument".to_string()),
            },

            "difficulty" => match args.first().map(|d| d.parse::<Difficulty>()) {
                Some(Ok(difficulty)) => {
                    self.session.set_difficulty(difficulty);
                    (true, String::new())
                }
                Some(Err(e)) => (false, e.to_string()),
                None => (false, "missing argument".to_string()),
            },

            "names" => match args {
                [x, o] => {
                    self.session.set_names(*x, *o);
                    (true, String::new())
                }
                _ => (false, "expected two names".to_string()),
            },

            "scores" => {
                let scores = self.session.scores();
                (
                    true,
                    format!(
                        "{} {} - {} {}",
                        self.session.name(Player::X),
                        scores.x,
                        scores.o,
                        self.session.name(Player::O)
                    ),
                )
            }

            "reset_scores" => {
                self.session.reset_scores();
                (true, String::new())
            }

            "status" => (true, game_status(self.session.state())),

            "board" => (true, format!("\n{}", self.session.state().board())),

            "winning_line" => match winning_combination(self.session.state().board()) {
                Some(line) => (true, join(&line)),
                None => (true, "none".to_string()),
            },

            "moves" => (true, join(&available_moves(self.session.state().board()))),

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

fn join(cells: &[usize]) -> String {
    cells
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
