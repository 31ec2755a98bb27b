//! Board coordinates.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::bitboard::Bitboard;

/// Represents a square on the board, ranging from A1 to H8.
///
/// Files (columns) are labeled A-H and ranks (rows) are labeled 1-8. A square's
/// `(row, col)` coordinate is `(rank index, file index)`, so `D3` is `(2, 3)`.
///
/// ```text
///   A  B  C  D  E  F  G  H
/// 1 00 01 02 03 04 05 06 07
/// 2 08 09 10 11 12 13 14 15
/// 3 16 17 18 19 20 21 22 23
/// 4 24 25 26 27 28 29 30 31
/// 5 32 33 34 35 36 37 38 39
/// 6 40 41 42 43 44 45 46 47
/// 7 48 49 50 51 52 53 54 55
/// 8 56 57 58 59 60 61 62 63
/// ```
///
/// Index order is row-major, which is also the scan order of move generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
#[rustfmt::skip]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

/// Constants for board dimensions
pub const BOARD_SIZE: usize = 8;
pub const TOTAL_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

impl Square {
    /// Returns a bitboard with only this square set.
    #[inline]
    pub const fn bitboard(self) -> Bitboard {
        Bitboard::new(1 << self as u8)
    }

    /// Converts the `Square` into a `usize` index (0-63).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Converts an index into a `Square` without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `index` >= 64.
    #[inline]
    pub fn from_index_unchecked(index: usize) -> Square {
        debug_assert!(
            index < TOTAL_SQUARES,
            "Index out of bounds for Square enum. index: {index}"
        );
        // SAFETY: `Square` is `repr(u8)` with 64 contiguous variants starting at 0.
        unsafe { std::mem::transmute(index as u8) }
    }

    /// Safely converts an index into a `Square`.
    ///
    /// # Returns
    /// `Some(Square)` if the index is in 0-63, `None` otherwise.
    #[inline]
    pub fn from_index(index: usize) -> Option<Square> {
        (index < TOTAL_SQUARES).then(|| Square::from_index_unchecked(index))
    }

    /// Creates a `Square` from a `(row, col)` coordinate.
    ///
    /// This is the boundary check for coordinates coming from a front end:
    /// anything outside 0-7 is rejected here and never reaches the move engine.
    ///
    /// # Errors
    ///
    /// Returns [`SquareError::OutOfRange`] if either component is >= 8.
    pub fn from_row_col(row: usize, col: usize) -> Result<Square, SquareError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(SquareError::OutOfRange { row, col });
        }
        Ok(Square::from_index_unchecked(row * BOARD_SIZE + col))
    }

    /// Returns the row (rank index, 0-7).
    #[inline]
    pub const fn row(self) -> usize {
        self.index() / BOARD_SIZE
    }

    /// Returns the column (file index, 0-7).
    #[inline]
    pub const fn col(self) -> usize {
        self.index() % BOARD_SIZE
    }

    /// Returns the `(row, col)` coordinate of this square.
    #[inline]
    pub const fn coords(self) -> (usize, usize) {
        (self.row(), self.col())
    }

    /// Returns an iterator over all 64 squares in row-major order (A1 to H8).
    #[inline]
    pub fn iter() -> impl Iterator<Item = Square> {
        (0..TOTAL_SQUARES).map(Square::from_index_unchecked)
    }
}

/// Error type for square-related operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SquareError {
    /// Invalid square string format (must be 2 characters)
    #[error("invalid square format: must be 2 characters (e.g., 'd3')")]
    InvalidFormat,
    /// Invalid file character (must be a-h or A-H)
    #[error("invalid file '{0}': must be a-h")]
    InvalidFile(char),
    /// Invalid rank character (must be 1-8)
    #[error("invalid rank '{0}': must be 1-8")]
    InvalidRank(char),
    /// Row or column outside 0-7
    #[error("coordinate ({row}, {col}) is off the board")]
    OutOfRange { row: usize, col: usize },
}

impl FromStr for Square {
    type Err = SquareError;

    /// Parses algebraic notation (e.g., "d3", "H8"), case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let (Some(file_char), Some(rank_char), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(SquareError::InvalidFormat);
        };

        let file = file_char.to_ascii_lowercase();
        if !('a'..='h').contains(&file) {
            return Err(SquareError::InvalidFile(file_char));
        }
        if !('1'..='8').contains(&rank_char) {
            return Err(SquareError::InvalidRank(rank_char));
        }

        let col = (file as u8 - b'a') as usize;
        let row = (rank_char as u8 - b'1') as usize;
        Square::from_row_col(row, col)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = self.col() as u8 + b'a';
        let rank = self.row() as u8 + b'1';
        write!(f, "{}{}", file as char, rank as char)
    }
}
