//! Static position evaluation.
//!
//! All scores are from White's point of view: positive favors White,
//! negative favors Black.

use crate::board::Board;
use crate::disc::Player;
use crate::rules;
use crate::square::Square;
use crate::types::Score;

/// Positional weight of each square, indexed by `[row][col]`.
///
/// Corners can never be flipped back, so they carry the largest weight. The
/// X- and C-squares next to an empty corner tend to hand that corner to the
/// opponent and are penalized.
#[rustfmt::skip]
pub const WEIGHTS: [[Score; 8]; 8] = [
    [120, -20,  20,   5,   5,  20, -20, 120],
    [-20, -40,  -5,  -5,  -5,  -5, -40, -20],
    [ 20,  -5,  15,   3,   3,  15,  -5,  20],
    [  5,  -5,   3,   3,   3,   3,  -5,   5],
    [  5,  -5,   3,   3,   3,   3,  -5,   5],
    [ 20,  -5,  15,   3,   3,  15,  -5,  20],
    [-20, -40,  -5,  -5,  -5,  -5, -40, -20],
    [120, -20,  20,   5,   5,  20, -20, 120],
];

/// Score per move of mobility advantage.
pub const MOBILITY_WEIGHT: Score = 5;

/// Base score of a decided game. Every heuristic score lies strictly inside
/// `(-WIN_SCORE, WIN_SCORE)`.
pub const WIN_SCORE: Score = 10_000;

/// Upper bound of `|combined_score|`: the sum of absolute weights plus the
/// mobility term for 64 moves.
pub const MAX_HEURISTIC_SCORE: Score = 1176 + MOBILITY_WEIGHT * 64;

/// Weight of a single square.
#[inline(always)]
pub fn square_weight(sq: Square) -> Score {
    WEIGHTS[sq.row()][sq.col()]
}

/// Sum of White's square weights minus the sum of Black's.
pub fn positional_score(board: &Board) -> Score {
    let white: Score = board.white().iter().map(square_weight).sum();
    let black: Score = board.black().iter().map(square_weight).sum();
    white - black
}

/// `MOBILITY_WEIGHT × (White's legal moves − Black's legal moves)`.
pub fn mobility_score(board: &Board) -> Score {
    let white = rules::moves_bitboard(board, Player::White).count() as Score;
    let black = rules::moves_bitboard(board, Player::Black).count() as Score;
    MOBILITY_WEIGHT * (white - black)
}

/// Heuristic score of a non-final position.
#[inline]
pub fn combined_score(board: &Board) -> Score {
    positional_score(board) + mobility_score(board)
}

/// Score of a finished game: `WIN_SCORE` plus the margin for a White win,
/// the negation for a Black win and `0` for a draw.
pub fn terminal_score(board: &Board) -> Score {
    let count = board.count_discs();
    let margin = count.white as Score - count.black as Score;
    match margin {
        0 => 0,
        m if m > 0 => WIN_SCORE + m,
        m => -WIN_SCORE + m,
    }
}
