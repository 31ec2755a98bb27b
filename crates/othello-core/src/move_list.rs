//! Legal move generation.

use arrayvec::ArrayVec;
use std::slice;

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::disc::Player;
use crate::flip;
use crate::square::{Square, TOTAL_SQUARES};

/// Upper bound on the moves in any position, reachable or not.
///
/// Boards loaded from text can hold more moves than any played game, so the
/// bound is the number of squares rather than the known game maximum.
pub const MAX_MOVES: usize = TOTAL_SQUARES;

/// Represents a single legal move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    /// The square where the disc is placed.
    pub sq: Square,
    /// Bitboard representing all opponent discs flipped by this move.
    pub flipped: Bitboard,
}

impl Move {
    /// Creates a new move with the specified square and flipped discs.
    #[inline]
    pub fn new(sq: Square, flipped: Bitboard) -> Move {
        debug_assert!(!flipped.is_empty(), "Move must flip at least one disc");
        Move { sq, flipped }
    }
}

/// All legal moves for one player in a position, in row-major order.
#[derive(Clone, Debug, Default)]
pub struct MoveList {
    moves: ArrayVec<Move, MAX_MOVES>,
}

impl MoveList {
    /// Generates all legal moves for `player`.
    ///
    /// Squares come out in row-major order (A1, B1, ..., H8), so the first
    /// move of the list is the first legal square a top-left scan would find.
    #[inline]
    pub fn new(board: &Board, player: Player) -> MoveList {
        let p = board.discs(player);
        let o = board.discs(player.opponent());
        let mut moves = ArrayVec::new();
        for sq in p.get_moves(o).iter() {
            let flipped = flip::flip(sq, p, o);
            moves.push(Move::new(sq, flipped));
        }
        MoveList { moves }
    }

    /// Returns the number of legal moves.
    #[inline]
    pub fn count(&self) -> usize {
        self.moves.len()
    }

    /// Returns `true` if there are no legal moves (the player must pass).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns an iterator over the moves.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Move> {
        self.moves.iter()
    }

    /// Returns the moves as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Finds the move placing a disc on `sq`.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<&Move> {
        self.moves.iter().find(|m| m.sq == sq)
    }

    /// Returns the target squares in order.
    pub fn squares(&self) -> Vec<Square> {
        self.moves.iter().map(|m| m.sq).collect()
    }

    /// Returns the target squares as a bitboard.
    pub fn to_bitboard(&self) -> Bitboard {
        self.moves.iter().map(|m| m.sq).collect()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}
