//! Game rules: legality, move application and pass/terminal detection.
//!
//! Every board mutation goes through this module. Human input handling and
//! the AI search use the same functions, so a move accepted by one is
//! accepted by the other.

use thiserror::Error;

use crate::bitboard::Bitboard;
use crate::board::{Board, DiscCount};
use crate::disc::Player;
use crate::flip;
use crate::move_list::{Move, MoveList};
use crate::square::Square;

/// Reasons a square cannot be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidMoveError {
    #[error("{0} is already occupied")]
    Occupied(Square),
    #[error("{0} does not flip any disc")]
    NoFlips(Square),
}

/// Opponent discs `player` would flip by playing `sq`.
///
/// Returns an empty set if `sq` is occupied or the move is not legal.
#[inline]
pub fn flippable(board: &Board, sq: Square, player: Player) -> Bitboard {
    flip::flip(sq, board.discs(player), board.discs(player.opponent()))
}

/// Checks whether `player` may play `sq`.
#[inline]
pub fn is_legal(board: &Board, sq: Square, player: Player) -> bool {
    !flippable(board, sq, player).is_empty()
}

/// All legal moves for `player` in row-major order.
#[inline]
pub fn legal_moves(board: &Board, player: Player) -> MoveList {
    MoveList::new(board, player)
}

/// Legal move squares for `player` as a bitboard.
#[inline]
pub fn moves_bitboard(board: &Board, player: Player) -> Bitboard {
    board.discs(player).get_moves(board.discs(player.opponent()))
}

/// Returns `true` if `player` has at least one legal move.
#[inline]
pub fn has_legal_moves(board: &Board, player: Player) -> bool {
    !moves_bitboard(board, player).is_empty()
}

/// Returns `true` if neither side can move.
#[inline]
pub fn is_terminal(board: &Board) -> bool {
    !has_legal_moves(board, Player::Black) && !has_legal_moves(board, Player::White)
}

/// Plays `sq` for `player`, flipping every flanked disc.
///
/// # Returns
///
/// The set of discs that changed color.
///
/// # Errors
///
/// Returns [`InvalidMoveError`] and leaves the board untouched if the square
/// is occupied or flips nothing.
pub fn apply_move(
    board: &mut Board,
    sq: Square,
    player: Player,
) -> Result<Bitboard, InvalidMoveError> {
    if !board.is_square_empty(sq) {
        return Err(InvalidMoveError::Occupied(sq));
    }
    let flipped = flippable(board, sq, player);
    if flipped.is_empty() {
        return Err(InvalidMoveError::NoFlips(sq));
    }
    board.place(sq, player, flipped);
    Ok(flipped)
}

/// Plays a move taken from a [`MoveList`] generated for `player` on this board.
///
/// No validation is performed beyond debug assertions.
#[inline(always)]
pub fn make_move(board: &mut Board, mv: &Move, player: Player) {
    debug_assert_eq!(flippable(board, mv.sq, player), mv.flipped);
    board.place(mv.sq, player, mv.flipped);
}

/// Returns a copy of `board` with `mv` played.
#[inline(always)]
pub fn with_move(board: &Board, mv: &Move, player: Player) -> Board {
    let mut next = *board;
    make_move(&mut next, mv, player);
    next
}

/// Tallies both sides' discs.
#[inline]
pub fn count_discs(board: &Board) -> DiscCount {
    board.count_discs()
}
