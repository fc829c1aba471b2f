//! Tictac-Rust: tic-tac-toe against a friend or the computer.
//!
//! ## Usage
//!
//! - `tictac-rust` - Show a demo (hard computer against itself)
//! - `tictac-rust play` - Start the text console on stdin/stdout
//! - `tictac-rust demo` - Run the demo

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tictac_rust::ai::{Difficulty, decide_move};
use tictac_rust::console::Console;
use tictac_rust::game::{Actor, game_status, initialize_game, update_game_state_by};
use tictac_rust::session::{GameMode, Session};

/// Tictac-Rust: tic-tac-toe with a minimax opponent
#[derive(Parser)]
#[command(name = "tictac-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the text console for interactive play
    Play(PlayArgs),
    /// Let the hard computer play itself
    Demo,
}

#[derive(Args)]
struct PlayArgs {
    /// Game mode: pvp or pve
    #[arg(long, default_value = "pvp")]
    mode: GameMode,
    /// Computer strength: easy, medium or hard
    #[arg(long, default_value = "medium")]
    difficulty: Difficulty,
    /// Seed for the computer's random choices
    #[arg(long)]
    seed: Option<u64>,
    /// Answer immediately instead of pausing to "think"
    #[arg(long)]
    no_delay: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play(args)) => run_console(args),
        Some(Commands::Demo) | None => run_demo(),
    }
}

fn run_console(args: PlayArgs) -> Result<()> {
    let rng = match args.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let mut console = Console::new(Session::new(args.mode, args.difficulty), rng);
    if args.no_delay {
        console = console.with_delay(Duration::ZERO);
    }
    info!(mode = %args.mode, difficulty = %args.difficulty, "console started");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("failed to start runtime")?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    runtime
        .block_on(console.run(stdin.lock(), &mut stdout))
        .context("console I/O failed")
}

fn run_demo() -> Result<()> {
    println!("Tictac-Rust: hard computer vs hard computer\n");

    let mut rng = fastrand::Rng::new();
    let mut state = initialize_game();
    println!("{}", state.board());

    while !state.is_over() {
        let player = state.current_player();
        let mv = decide_move(state.board(), Difficulty::Hard, player, &mut rng)?;
        state = update_game_state_by(&state, mv, Actor::Computer)?;
        println!("{player} plays {mv}\n");
        println!("{}", state.board());
    }

    println!("{}", game_status(&state));
    Ok(())
}
