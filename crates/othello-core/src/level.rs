//! CPU difficulty levels and search depth configuration.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::types::Depth;

/// CPU strength selected by the player at game start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Move-selection policy backing a difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Uniformly random legal move.
    Random,
    /// Highest square weight, random among ties, no lookahead.
    Greedy,
    /// Minimax with alpha-beta pruning and adaptive depth.
    Search,
}

impl Difficulty {
    /// All difficulties from weakest to strongest.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Returns the policy used at this difficulty.
    pub fn policy(self) -> Policy {
        match self {
            Difficulty::Easy => Policy::Random,
            Difficulty::Normal => Policy::Greedy,
            Difficulty::Hard => Policy::Search,
        }
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unknown difficulty name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty '{0}': expected easy, normal or hard")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "e" | "1" => Ok(Difficulty::Easy),
            "normal" | "n" | "2" => Ok(Difficulty::Normal),
            "hard" | "h" | "3" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// Search depth by board fill, checked top to bottom: `(min_filled, depth)`.
///
/// The branching factor shrinks toward the endgame, so deeper searches get
/// both cheaper and more valuable as the board fills up.
#[rustfmt::skip]
const DEPTH_SCHEDULE: [(u32, Depth); 3] = [
    (52, 10),
    (44,  7),
    ( 0,  5),
];

/// Returns the search depth for a board with `filled` occupied cells.
pub fn search_depth(filled: u32) -> Depth {
    DEPTH_SCHEDULE
        .iter()
        .find(|&&(min_filled, _)| filled >= min_filled)
        .map_or(DEPTH_SCHEDULE[DEPTH_SCHEDULE.len() - 1].1, |&(_, depth)| depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_depth_thresholds() {
        assert_eq!(search_depth(4), 5);
        assert_eq!(search_depth(43), 5);
        assert_eq!(search_depth(44), 7);
        assert_eq!(search_depth(51), 7);
        assert_eq!(search_depth(52), 10);
        assert_eq!(search_depth(64), 10);
    }

    #[test]
    fn test_depth_progression() {
        for filled in 4..64 {
            assert!(search_depth(filled + 1) >= search_depth(filled));
        }
    }

    #[test]
    fn test_policy_dispatch() {
        assert_eq!(Difficulty::Easy.policy(), Policy::Random);
        assert_eq!(Difficulty::Normal.policy(), Policy::Greedy);
        assert_eq!(Difficulty::Hard.policy(), Policy::Search);
    }

    #[test]
    fn test_parse_difficulty() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.to_string().parse::<Difficulty>(), Ok(difficulty));
        }
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("expert".parse::<Difficulty>().is_err());
    }
}
