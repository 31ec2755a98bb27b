//! Line-oriented REPL for playing against the computer.

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::anyhow;
use clap::ValueEnum;
use colored::Colorize;
use othello_core::ai;
use othello_core::board::Board;
use othello_core::disc::{Disc, Player};
use othello_core::game_state::{GameEvent, GameState};
use othello_core::level::Difficulty;
use othello_core::search::{self, SearchResult};
use othello_core::square::Square;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::game;
use crate::{GameParams, Mode};

/// How often a background search is checked for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// A progress dot is printed per elapsed interval while the computer thinks.
const PROGRESS_INTERVAL: Duration = Duration::from_millis(500);

const HELP: &str = "\
Commands:
  <square>            play a move, e.g. d3
  new                 start a new game
  undo                take back the last move (and the computer's reply)
  mode [m]            show or set the mode: human, cpu-white, cpu-black, cpu-both
  level [d]           show or set the difficulty: easy, normal, hard
  hint                suggest a move for the side to move
  go                  let the computer move for the side to move
  setup <board> <x|o> load 64 cells (X, O, -) with the side to move
  moves               list legal moves
  quit                leave";

enum Flow {
    Continue,
    Quit,
}

/// Interactive session state.
struct Session {
    game: GameState,
    mode: Mode,
    difficulty: Difficulty,
    rng: StdRng,
}

impl Session {
    fn new(params: &GameParams) -> Self {
        let seed = params
            .seed
            .unwrap_or_else(|| rand::rng().random_range(0..u64::MAX));
        debug!(seed, mode = ?params.mode, difficulty = %params.difficulty, "session started");
        Self {
            game: GameState::new(),
            mode: params.mode,
            difficulty: params.difficulty,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn cpu_to_move(&self) -> Option<Player> {
        self.game.side_to_move().filter(|&p| self.mode.is_cpu(p))
    }

    fn report_events(&mut self) {
        for event in self.game.drain_events() {
            let line = game::describe_event(&event);
            match event {
                GameEvent::MoveApplied { .. } => println!("{line}"),
                GameEvent::Passed { .. } => println!("{}", line.as_str().bright_magenta()),
                GameEvent::GameOver { .. } => println!("{}", line.as_str().bold()),
            }
        }
    }

    /// Runs the computer's choice on a worker thread and plays it.
    fn play_cpu(&mut self, player: Player) -> anyhow::Result<()> {
        let seed = self.rng.random_range(0..u64::MAX);
        let pending = ai::spawn_choose_move(*self.game.board(), player, self.difficulty, seed);
        wait_with_progress(|| pending.is_finished());
        let choice = pending
            .join()
            .map_err(|_| anyhow!("move search thread panicked"))?;

        match choice {
            Some(sq) => {
                self.game.attempt_move(sq, player)?;
                println!("Computer plays {sq}\n");
            }
            None => return Err(anyhow!("computer has no legal move as {player}")),
        }
        Ok(())
    }

    fn execute(&mut self, line: &str) -> anyhow::Result<Flow> {
        let mut parts = line.split_whitespace();
        let Some(cmd) = parts.next() else {
            return Ok(Flow::Continue);
        };

        match cmd {
            "new" | "n" => self.game = GameState::new(),
            "undo" | "u" => self.undo(),
            "mode" | "m" => match parts.next() {
                Some(arg) => match Mode::from_str(arg, true) {
                    Ok(mode) => {
                        self.mode = mode;
                        println!("Mode changed to: {}", mode_name(mode));
                    }
                    Err(_) => println!("Invalid mode: {arg}"),
                },
                None => println!(
                    "Current mode: {} (human, cpu-white, cpu-black, cpu-both)",
                    mode_name(self.mode)
                ),
            },
            "level" | "l" => match parts.next() {
                Some(arg) => match arg.parse::<Difficulty>() {
                    Ok(difficulty) => {
                        self.difficulty = difficulty;
                        println!("Difficulty changed to: {difficulty}");
                    }
                    Err(e) => println!("{e}"),
                },
                None => println!("Current difficulty: {}", self.difficulty),
            },
            "hint" => match self.game.side_to_move() {
                Some(player) => {
                    let result = search_in_background(*self.game.board(), player)?;
                    if let Some(sq) = result.best_move {
                        println!("Hint: {sq} (score {})", result.score);
                    }
                }
                None => println!("The game is over."),
            },
            "go" => self.go()?,
            "setup" => self.setup(parts.next(), parts.next()),
            "moves" => {
                let moves: Vec<String> = self
                    .game
                    .legal_moves()
                    .iter()
                    .map(|m| format!("{}({})", m.sq, m.flipped.count()))
                    .collect();
                if moves.is_empty() {
                    println!("No legal moves.");
                } else {
                    println!("{}", moves.join(" "));
                }
            }
            "help" | "h" | "?" => println!("{HELP}"),
            "quit" | "q" => return Ok(Flow::Quit),
            _ => match cmd.parse::<Square>() {
                Ok(sq) => {
                    if let Err(e) = self.game.play(sq) {
                        println!("Illegal move {sq}: {e}");
                    }
                }
                Err(_) => println!("Unknown command: {cmd} (type 'help')"),
            },
        }
        Ok(Flow::Continue)
    }

    /// Takes back moves until a human is to move again.
    fn undo(&mut self) {
        if !self.game.undo() {
            println!("Cannot undo.");
            return;
        }
        if self.mode == Mode::CpuBoth {
            return;
        }
        while self.cpu_to_move().is_some() && self.game.undo() {}
    }

    /// Searches for the side to move, prints statistics and plays the result.
    fn go(&mut self) -> anyhow::Result<()> {
        let Some(player) = self.game.side_to_move() else {
            println!("The game is over.");
            return Ok(());
        };

        let result = search_in_background(*self.game.board(), player)?;
        let Some(sq) = result.best_move else {
            return Ok(());
        };

        println!("depth | score | nodes | nps");
        println!("----------------------------");
        println!(
            "{} | {} | {} | {}\n",
            result.depth,
            result.score,
            result.n_nodes,
            result.nps()
        );
        let root_moves: Vec<String> = result
            .root_moves
            .iter()
            .map(|rm| format!("{}:{}", rm.sq, rm.score))
            .collect();
        println!("{}\n", root_moves.join(" "));
        self.game.attempt_move(sq, player)?;
        println!("Computer plays {sq}\n");
        Ok(())
    }

    fn setup(&mut self, board: Option<&str>, side: Option<&str>) {
        let (Some(board), Some(side)) = (board, side) else {
            println!("Usage: setup <64 cells> <x|o>");
            return;
        };
        let board = match Board::from_string(board) {
            Ok(board) => board,
            Err(e) => {
                println!("Invalid board: {e}");
                return;
            }
        };
        let player = side
            .chars()
            .next()
            .and_then(Disc::from_char)
            .and_then(Disc::player);
        match player {
            Some(player) => self.game = GameState::from_board(board, player),
            None => println!("Invalid side to move: {side}"),
        }
    }
}

/// Prints a dot per [`PROGRESS_INTERVAL`] until `is_done` reports completion.
fn wait_with_progress(mut is_done: impl FnMut() -> bool) {
    let start = Instant::now();
    let mut dots = 0;
    while !is_done() {
        thread::sleep(POLL_INTERVAL);
        let due = start.elapsed().as_millis() / PROGRESS_INTERVAL.as_millis();
        if due > dots {
            print!("{}", ".".repeat((due - dots) as usize));
            let _ = io::stdout().flush();
            dots = due;
        }
    }
    if dots > 0 {
        println!();
    }
}

/// Runs the adaptive-depth search on a worker thread with a board copy.
fn search_in_background(board: Board, player: Player) -> anyhow::Result<SearchResult> {
    let handle = thread::spawn(move || search::search(&board, player));
    wait_with_progress(|| handle.is_finished());
    handle
        .join()
        .map_err(|_| anyhow!("search thread panicked"))
}

fn mode_name(mode: Mode) -> String {
    mode.to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_default()
}

/// Main REPL loop.
///
/// The computer moves automatically whenever it is its turn under the
/// current mode; otherwise a command is read from the terminal.
pub fn ui_loop(params: &GameParams) -> anyhow::Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut session = Session::new(params);
    println!("{HELP}\n");

    loop {
        session.report_events();
        println!("{}", game::render_board(&session.game));

        if let Some(player) = session.cpu_to_move() {
            session.play_cpu(player)?;
            continue;
        }

        match rl.readline("> ") {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                println!();
                if let Flow::Quit = session.execute(&line)? {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(mode: Mode) -> Session {
        Session::new(&GameParams {
            mode,
            difficulty: Difficulty::Easy,
            seed: Some(7),
            no_color: true,
        })
    }

    #[test]
    fn test_human_move_and_undo() {
        let mut s = session(Mode::Human);
        s.execute("d3").unwrap();
        assert_eq!(s.game.last_move(), Some(Square::D3));
        s.execute("undo").unwrap();
        assert_eq!(s.game.last_move(), None);
    }

    #[test]
    fn test_illegal_move_keeps_state() {
        let mut s = session(Mode::Human);
        s.execute("a1").unwrap();
        s.execute("z9").unwrap();
        assert_eq!(*s.game.board(), Board::new());
    }

    #[test]
    fn test_cpu_reply_and_undo_to_human_turn() {
        let mut s = session(Mode::CpuWhite);
        s.execute("d3").unwrap();
        let player = s.cpu_to_move().unwrap();
        assert_eq!(player, Player::White);
        s.play_cpu(player).unwrap();
        assert_eq!(s.game.move_history().len(), 2);
        assert_eq!(s.cpu_to_move(), None);

        s.execute("undo").unwrap();
        assert_eq!(s.game.move_history().len(), 0);
        assert_eq!(s.game.side_to_move(), Some(Player::Black));
    }

    #[test]
    fn test_mode_and_level_commands() {
        let mut s = session(Mode::Human);
        s.execute("mode cpu-black").unwrap();
        assert_eq!(s.mode, Mode::CpuBlack);
        s.execute("level hard").unwrap();
        assert_eq!(s.difficulty, Difficulty::Hard);
        s.execute("level impossible").unwrap();
        assert_eq!(s.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_setup_command() {
        let mut s = session(Mode::Human);
        let cells = format!("XXXXXXO-{}", "-".repeat(56));
        s.execute(&format!("setup {cells} o")).unwrap();
        // White cannot move here, so the turn passes straight to Black.
        assert_eq!(s.game.side_to_move(), Some(Player::Black));
        s.execute("setup XO x").unwrap();
        assert_eq!(s.game.side_to_move(), Some(Player::Black));
    }

    #[test]
    fn test_go_plays_for_side_to_move() {
        let mut s = session(Mode::Human);
        s.execute("go").unwrap();
        assert_eq!(s.game.side_to_move(), Some(Player::White));
        assert_eq!(s.game.move_history().len(), 1);
    }

    #[test]
    fn test_setup_crowded_position() {
        colored::control::set_override(false);
        let mut s = session(Mode::Human);
        let cells = "------OX-OOO-----OXX-OOX--X--XX-XO--OXO--XX-XX---OOOXOO---------";
        s.execute(&format!("setup {cells} x")).unwrap();
        assert_eq!(s.game.legal_moves().count(), 35);
        let text = game::render_board(&s.game);
        assert_eq!(text.matches('·').count(), 35);
    }

    #[test]
    fn test_hint_leaves_state_unchanged() {
        let mut s = session(Mode::Human);
        s.execute("hint").unwrap();
        assert_eq!(*s.game.board(), Board::new());
        assert_eq!(s.game.side_to_move(), Some(Player::Black));
    }

    #[test]
    fn test_wait_with_progress_returns_when_done() {
        let mut polls = 0;
        wait_with_progress(|| {
            polls += 1;
            polls > 3
        });
        assert_eq!(polls, 4);
    }

    #[test]
    fn test_quit() {
        let mut s = session(Mode::Human);
        assert!(matches!(s.execute("quit").unwrap(), Flow::Quit));
    }
}
