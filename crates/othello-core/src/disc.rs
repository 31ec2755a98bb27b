//! Cell contents and players.

use std::fmt;

/// Represents the content of a single cell.
///
/// The `Disc` enum has three variants:
///
/// * `Empty` - Represents an empty spot on the board.
/// * `Black` - Represents a black disc.
/// * `White` - Represents a white disc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disc {
    Empty,
    Black,
    White,
}

impl Disc {
    /// Converts the disc to its corresponding character representation.
    ///
    /// # Returns
    ///
    /// * `'-'` for `Disc::Empty`
    /// * `'X'` for `Disc::Black`
    /// * `'O'` for `Disc::White`
    pub fn to_char(self) -> char {
        match self {
            Disc::Empty => '-',
            Disc::Black => 'X',
            Disc::White => 'O',
        }
    }

    /// Parses a single board character.
    ///
    /// Accepts `X`/`x`/`*` for Black, `O`/`o` for White and `-`/`.` for Empty.
    pub fn from_char(c: char) -> Option<Disc> {
        match c {
            'X' | 'x' | '*' => Some(Disc::Black),
            'O' | 'o' => Some(Disc::White),
            '-' | '.' => Some(Disc::Empty),
            _ => None,
        }
    }

    /// Returns the player owning this disc, or `None` for an empty cell.
    pub fn player(self) -> Option<Player> {
        match self {
            Disc::Black => Some(Player::Black),
            Disc::White => Some(Player::White),
            Disc::Empty => None,
        }
    }
}

/// One of the two sides. Black always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// Returns the other player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Returns the disc this player places.
    #[inline]
    pub fn disc(self) -> Disc {
        match self {
            Player::Black => Disc::Black,
            Player::White => Disc::White,
        }
    }

    /// White is the maximizing side in search; Black is the minimizing side.
    #[inline]
    pub fn is_maximizing(self) -> bool {
        self == Player::White
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => f.write_str("Black"),
            Player::White => f.write_str("White"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Player::Black.opponent(), Player::White);
        assert_eq!(Player::White.opponent(), Player::Black);
    }

    #[test]
    fn test_char_round_trip() {
        for disc in [Disc::Empty, Disc::Black, Disc::White] {
            assert_eq!(Disc::from_char(disc.to_char()), Some(disc));
        }
        assert_eq!(Disc::from_char('?'), None);
    }

    #[test]
    fn test_player_disc() {
        assert_eq!(Player::Black.disc().player(), Some(Player::Black));
        assert_eq!(Player::White.disc().player(), Some(Player::White));
        assert_eq!(Disc::Empty.player(), None);
    }
}
