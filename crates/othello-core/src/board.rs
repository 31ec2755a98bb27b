//! Othello board representation using bitboards.

use std::fmt;

use thiserror::Error;

use crate::bitboard::Bitboard;
use crate::disc::{Disc, Player};
use crate::square::{Square, TOTAL_SQUARES};

/// Number of discs each side owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DiscCount {
    pub black: u32,
    pub white: u32,
}

impl DiscCount {
    /// Total number of occupied cells.
    #[inline]
    pub fn total(self) -> u32 {
        self.black + self.white
    }
}

/// Error returned when parsing a board from text fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardParseError {
    #[error("expected 64 cells, found {0}")]
    WrongLength(usize),
    #[error("unexpected board character '{0}'")]
    InvalidChar(char),
}

/// An 8×8 Othello board.
///
/// Cells are stored as two absolute-color bitboards. The bitboards never
/// overlap, and the board exposes no public setter: discs are only placed
/// and flipped through [`crate::rules`], which keeps every mutation a legal
/// move.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    black: Bitboard,
    white: Bitboard,
}

impl Default for Board {
    /// Creates a board with the standard starting position.
    ///
    /// The initial position has:
    /// - Black discs on E4 (3,4) and D5 (4,3)
    /// - White discs on D4 (3,3) and E5 (4,4)
    fn default() -> Self {
        Board {
            black: Square::E4.bitboard() | Square::D5.bitboard(),
            white: Square::D4.bitboard() | Square::E5.bitboard(),
        }
    }
}

impl Board {
    /// Creates a new `Board` with the initial setup.
    pub fn new() -> Board {
        Default::default()
    }

    /// Creates a board with no discs at all.
    pub fn empty() -> Board {
        Board {
            black: Bitboard::EMPTY,
            white: Bitboard::EMPTY,
        }
    }

    /// Creates a `Board` from a string representation.
    ///
    /// The string holds 64 cells from A1 to H8 in row-major order. Whitespace
    /// is ignored, so both the compact one-line form and an 8-line diagram are
    /// accepted. See [`Disc::from_char`] for the accepted characters.
    ///
    /// # Errors
    ///
    /// Returns [`BoardParseError`] for unknown characters or a cell count other than 64.
    pub fn from_string(board_string: &str) -> Result<Board, BoardParseError> {
        let mut board = Board::empty();
        let mut n_cells = 0;
        for c in board_string.chars().filter(|c| !c.is_whitespace()) {
            let disc = Disc::from_char(c).ok_or(BoardParseError::InvalidChar(c))?;
            if n_cells < TOTAL_SQUARES {
                let sq = Square::from_index_unchecked(n_cells);
                match disc {
                    Disc::Black => board.black = board.black.set(sq),
                    Disc::White => board.white = board.white.set(sq),
                    Disc::Empty => {}
                }
            }
            n_cells += 1;
        }

        if n_cells != TOTAL_SQUARES {
            return Err(BoardParseError::WrongLength(n_cells));
        }
        Ok(board)
    }

    /// Gets the cell state at a square.
    #[inline]
    pub fn get(&self, sq: Square) -> Disc {
        if self.black.contains(sq) {
            Disc::Black
        } else if self.white.contains(sq) {
            Disc::White
        } else {
            Disc::Empty
        }
    }

    /// Black's discs.
    #[inline(always)]
    pub fn black(&self) -> Bitboard {
        self.black
    }

    /// White's discs.
    #[inline(always)]
    pub fn white(&self) -> Bitboard {
        self.white
    }

    /// The discs owned by `player`.
    #[inline(always)]
    pub fn discs(&self, player: Player) -> Bitboard {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    /// All occupied cells.
    #[inline(always)]
    pub fn occupied(&self) -> Bitboard {
        self.black | self.white
    }

    /// All empty cells.
    #[inline(always)]
    pub fn empty_squares(&self) -> Bitboard {
        !self.occupied()
    }

    /// Number of occupied cells.
    #[inline(always)]
    pub fn filled_count(&self) -> u32 {
        self.occupied().count()
    }

    /// Number of empty cells.
    #[inline(always)]
    pub fn empty_count(&self) -> u32 {
        self.empty_squares().count()
    }

    /// Checks whether a square is empty.
    #[inline(always)]
    pub fn is_square_empty(&self, sq: Square) -> bool {
        !self.occupied().contains(sq)
    }

    /// Tallies discs for both sides.
    #[inline]
    pub fn count_discs(&self) -> DiscCount {
        DiscCount {
            black: self.black.count(),
            white: self.white.count(),
        }
    }

    /// Places `player`'s disc on `sq` and turns every square in `flipped` to `player`.
    ///
    /// Callers guarantee `sq` is empty and `flipped` is a subset of the
    /// opponent's discs; the rules layer is the only caller.
    #[inline(always)]
    pub(crate) fn place(&mut self, sq: Square, player: Player, flipped: Bitboard) {
        debug_assert!(self.is_square_empty(sq));
        debug_assert!(flipped & self.discs(player.opponent()) == flipped);
        let placed = flipped | sq.bitboard();
        match player {
            Player::Black => {
                self.black |= placed;
                self.white ^= flipped;
            }
            Player::White => {
                self.white |= placed;
                self.black ^= flipped;
            }
        }
    }

    /// Returns the 64-character compact form (`X`, `O`, `-`) from A1 to H8.
    pub fn to_compact_string(&self) -> String {
        Square::iter().map(|sq| self.get(sq).to_char()).collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for row in 0..8 {
            write!(f, "{}", row + 1)?;
            for col in 0..8 {
                let sq = Square::from_index_unchecked(row * 8 + col);
                write!(f, " {}", self.get(sq).to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_board() {
        let board = Board::new();
        assert_eq!(board.get(Square::D4), Disc::White);
        assert_eq!(board.get(Square::E4), Disc::Black);
        assert_eq!(board.get(Square::D5), Disc::Black);
        assert_eq!(board.get(Square::E5), Disc::White);
        assert_eq!(board.count_discs(), DiscCount { black: 2, white: 2 });
        assert_eq!(board.empty_count(), 60);
        assert!(board.black() & board.white() == Bitboard::EMPTY);
    }

    #[test]
    fn test_initial_discs_are_diagonal() {
        let board = Board::new();
        let black: Vec<(usize, usize)> = board.black().iter().map(Square::coords).collect();
        let white: Vec<(usize, usize)> = board.white().iter().map(Square::coords).collect();
        assert_eq!(black, vec![(3, 4), (4, 3)]);
        assert_eq!(white, vec![(3, 3), (4, 4)]);
    }

    #[test]
    fn test_from_string() {
        let board = Board::from_string(
            "---------------------------OX------XO---------------------------",
        )
        .unwrap();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_from_string_diagram() {
        let diagram = "
            X - - - - - - O
            - - - - - - - -
            - - - - - - - -
            - - - O X - - -
            - - - X O - - -
            - - - - - - - -
            - - - - - - - -
            O - - - - - - X
        ";
        let board = Board::from_string(diagram).unwrap();
        assert_eq!(board.get(Square::A1), Disc::Black);
        assert_eq!(board.get(Square::H1), Disc::White);
        assert_eq!(board.get(Square::A8), Disc::White);
        assert_eq!(board.get(Square::H8), Disc::Black);
        assert_eq!(board.count_discs(), DiscCount { black: 4, white: 4 });
    }

    #[test]
    fn test_from_string_errors() {
        assert_eq!(
            Board::from_string("XO--"),
            Err(BoardParseError::WrongLength(4))
        );
        assert_eq!(
            Board::from_string(&"?".repeat(64)),
            Err(BoardParseError::InvalidChar('?'))
        );
        assert_eq!(
            Board::from_string(&"-".repeat(65)),
            Err(BoardParseError::WrongLength(65))
        );
    }

    #[test]
    fn test_compact_string_round_trip() {
        let board = Board::new();
        let s = board.to_compact_string();
        assert_eq!(s.len(), 64);
        assert_eq!(Board::from_string(&s).unwrap(), board);
    }

    #[test]
    fn test_place() {
        let mut board = Board::new();
        board.place(Square::D3, Player::Black, Square::D4.bitboard());
        assert_eq!(board.get(Square::D3), Disc::Black);
        assert_eq!(board.get(Square::D4), Disc::Black);
        assert_eq!(board.count_discs(), DiscCount { black: 4, white: 1 });
    }

    #[test]
    fn test_display() {
        let text = Board::new().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  a b c d e f g h");
        assert_eq!(lines[4], "4 - - - O X - - -");
        assert_eq!(lines[5], "5 - - - X O - - -");
    }
}
