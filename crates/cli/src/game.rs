//! Terminal rendering of the game for human players.

use std::fmt::Write;

use colored::Colorize;
use othello_core::board::DiscCount;
use othello_core::disc::{Disc, Player};
use othello_core::game_state::{GameEvent, GameState, Outcome};
use othello_core::square::Square;

/// Renders the board with legal moves, the last move and the score.
pub fn render_board(game: &GameState) -> String {
    let board = game.board();
    let legal = game.legal_moves().to_bitboard();
    let last_move = game.last_move();
    let score = game.score();
    let mut out = String::new();

    out.push_str("      a   b   c   d   e   f   g   h\n");
    out.push_str("    ┌───┬───┬───┬───┬───┬───┬───┬───┐\n");

    for row in 0..8 {
        let _ = write!(out, "  {} │", row + 1);

        for col in 0..8 {
            let sq = Square::from_index_unchecked(row * 8 + col);
            let is_last_move = Some(sq) == last_move;

            let symbol = match board.get(sq) {
                Disc::Black if is_last_move => " X ".on_bright_black().bright_green(),
                Disc::White if is_last_move => " O ".on_bright_black().bright_yellow(),
                Disc::Black => " X ".bright_green(),
                Disc::White => " O ".bright_yellow(),
                Disc::Empty if legal.contains(sq) => " · ".bright_cyan(),
                Disc::Empty => "   ".normal(),
            };
            let _ = write!(out, "{symbol}│");
        }

        match row {
            2 => {
                let turn = match game.side_to_move() {
                    Some(Player::Black) => "Black's turn (X)".bright_green(),
                    Some(Player::White) => "White's turn (O)".bright_yellow(),
                    None => "*** Game Over ***".bright_red(),
                };
                let _ = write!(out, "   {turn}");
            }
            3 => {
                let _ = write!(out, "   Black: {}", format!("{:2}", score.black).bright_green());
            }
            4 => {
                let _ = write!(out, "   White: {}", format!("{:2}", score.white).bright_yellow());
            }
            6 => {
                if let Some(outcome) = game.outcome() {
                    let _ = write!(out, "   {}", outcome_label(outcome));
                }
            }
            _ => {}
        }
        out.push('\n');

        if row < 7 {
            out.push_str("    ├───┼───┼───┼───┼───┼───┼───┼───┤\n");
        }
    }

    out.push_str("    └───┴───┴───┴───┴───┴───┴───┴───┘\n");
    out
}

fn outcome_label(outcome: Outcome) -> colored::ColoredString {
    match outcome {
        Outcome::BlackWins => "Black wins!".bright_green(),
        Outcome::WhiteWins => "White wins!".bright_yellow(),
        Outcome::Draw => "Draw".bright_cyan(),
    }
}

/// One line describing a game event.
pub fn describe_event(event: &GameEvent) -> String {
    match *event {
        GameEvent::MoveApplied {
            square,
            flipped,
            mover,
        } => format!("{mover} plays {square}, flipping {}", flipped.count()),
        GameEvent::Passed { player } => format!("{player} has no legal move and passes"),
        GameEvent::GameOver { black, white } => {
            result_message(DiscCount { black, white }).to_string()
        }
    }
}

/// Final result line, e.g. `Game over: Black wins 40-24`.
pub fn result_message(count: DiscCount) -> String {
    match Outcome::from_count(count) {
        Outcome::Draw => format!("Game over: draw {}-{}", count.black, count.white),
        Outcome::BlackWins => format!("Game over: Black wins {}-{}", count.black, count.white),
        Outcome::WhiteWins => format!("Game over: White wins {}-{}", count.white, count.black),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_initial_board() {
        colored::control::set_override(false);
        let game = GameState::new();
        let text = render_board(&game);
        assert!(text.contains("Black's turn (X)"));
        assert!(text.contains("Black:  2"));
        assert!(text.contains("White:  2"));
        // Row 3 shows the legal move d3.
        let row3 = text.lines().find(|l| l.starts_with("  3 ")).unwrap();
        assert_eq!(row3.matches('·').count(), 1);
    }

    #[test]
    fn test_describe_events() {
        let applied = GameEvent::MoveApplied {
            square: Square::D3,
            flipped: Square::D4.bitboard(),
            mover: Player::Black,
        };
        assert_eq!(describe_event(&applied), "Black plays d3, flipping 1");
        assert_eq!(
            describe_event(&GameEvent::Passed { player: Player::White }),
            "White has no legal move and passes"
        );
        assert_eq!(
            describe_event(&GameEvent::GameOver { black: 24, white: 40 }),
            "Game over: White wins 40-24"
        );
    }

    #[test]
    fn test_result_message_draw() {
        assert_eq!(
            result_message(DiscCount { black: 32, white: 32 }),
            "Game over: draw 32-32"
        );
    }
}
