mod game;
mod ui;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use othello_core::disc::Player;
use othello_core::level::Difficulty;
use tracing_subscriber::EnvFilter;

/// Who is controlled by the computer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Two humans share the terminal.
    Human,
    /// Human plays Black, the computer plays White.
    CpuWhite,
    /// The computer plays Black, human plays White.
    CpuBlack,
    /// The computer plays both sides.
    CpuBoth,
}

impl Mode {
    /// Returns `true` if the computer moves for `player`.
    pub fn is_cpu(self, player: Player) -> bool {
        matches!(
            (self, player),
            (Mode::CpuBoth, _) | (Mode::CpuWhite, Player::White) | (Mode::CpuBlack, Player::Black)
        )
    }
}

#[derive(Parser, Debug, Clone)]
pub struct GameParams {
    #[arg(short, long, value_enum, default_value_t = Mode::CpuWhite)]
    pub mode: Mode,

    #[arg(short, long, default_value = "normal")]
    pub difficulty: Difficulty,

    /// Fixed seed for reproducible computer play
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub no_color: bool,
}

#[derive(Parser, Debug)]
#[command(version, about = "Play Othello in the terminal")]
struct Cli {
    #[command(flatten)]
    params: GameParams,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if args.params.no_color {
        colored::control::set_override(false);
    }

    ui::ui_loop(&args.params).context("failed to run the game loop")
}
