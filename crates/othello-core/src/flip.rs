//! Disc flip calculation for move execution.

use crate::bitboard::{Bitboard, DIRECTIONS};
use crate::square::Square;

/// Calculates which opponent discs would be flipped by placing a disc at the given square.
///
/// For each of the eight directions the walk steps outward from `sq` while it
/// stays on opponent discs. If the run ends on one of the player's own discs,
/// the traversed discs are flanked and flip; a run that ends on an empty cell
/// or at the board edge flips nothing.
///
/// # Arguments
///
/// * `sq` - The square where the disc is being placed
/// * `p` - Bitboard representing the moving player's discs
/// * `o` - Bitboard representing the opponent's discs
///
/// # Returns
///
/// A bitboard representing all opponent discs that would be flipped by this move.
/// Returns an empty bitboard if `sq` is occupied or no discs would be flipped.
#[inline]
pub fn flip(sq: Square, p: Bitboard, o: Bitboard) -> Bitboard {
    let origin = sq.bitboard();
    if !((p | o) & origin).is_empty() {
        return Bitboard::EMPTY;
    }

    let mut flipped = Bitboard::EMPTY;
    for dir in DIRECTIONS {
        let mut line = Bitboard::EMPTY;
        let mut cursor = origin.shift(dir);
        while !(cursor & o).is_empty() {
            line |= cursor;
            cursor = cursor.shift(dir);
        }
        if !(cursor & p).is_empty() {
            flipped |= line;
        }
    }
    flipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::disc::Player;

    #[test]
    fn test_flip() {
        let p = Square::D5.bitboard() | Square::E4.bitboard();
        let o = Square::D4.bitboard() | Square::E5.bitboard();
        assert_eq!(flip(Square::C4, p, o), Square::D4.bitboard());
        assert_eq!(flip(Square::D3, p, o), Square::D4.bitboard());
        assert_eq!(flip(Square::E6, p, o), Square::E5.bitboard());
        assert_eq!(flip(Square::F5, p, o), Square::E5.bitboard());
        assert!(flip(Square::C3, p, o).is_empty());
    }

    #[test]
    fn test_flip_occupied_square() {
        let p = Square::D5.bitboard() | Square::E4.bitboard();
        let o = Square::D4.bitboard() | Square::E5.bitboard();
        assert!(flip(Square::D4, p, o).is_empty());
        assert!(flip(Square::E4, p, o).is_empty());
    }

    #[test]
    fn test_flip_long_diagonal() {
        let board = Board::from_string(
            "XXXXXXXOXOOXXXXOXOXXXOXOXOOXOXXOXOXOOOXOXOOOOOXOXOOOXXXO-X-OXOOO",
        )
        .unwrap();
        let flipped = flip(Square::A8, board.black(), board.white());
        let expected = Square::B7.bitboard()
            | Square::C6.bitboard()
            | Square::D5.bitboard()
            | Square::E4.bitboard()
            | Square::F3.bitboard();
        assert_eq!(flipped, expected);
    }

    #[test]
    fn test_flip_run_ending_on_empty_or_edge() {
        // a1 b1 c1 d1 e1 = - O O - X: the run stops on an empty cell.
        let board = Board::from_string(&format!("-OO-X{}", "-".repeat(59))).unwrap();
        assert!(flip(Square::A1, board.black(), board.white()).is_empty());

        // The run along rank 1 reaches the edge without meeting a black disc.
        let board = Board::from_string(&format!("-OOOOOOOX{}", "-".repeat(55))).unwrap();
        assert!(flip(Square::A1, board.black(), board.white()).is_empty());
    }

    #[test]
    fn test_flip_multiple_directions() {
        let diagram = "
            - - - - - - - -
            - X - X - X - -
            - - O O O - - -
            - X O - O X - -
            - - O O O - - -
            - X - X - X - -
            - - - - - - - -
            - - - - - - - -
        ";
        let board = Board::from_string(diagram).unwrap();
        let flipped = flip(Square::D4, board.discs(Player::Black), board.discs(Player::White));
        assert_eq!(flipped, board.white());
        assert_eq!(flipped.count(), 8);
    }
}
