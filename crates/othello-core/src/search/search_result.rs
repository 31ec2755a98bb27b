//! Search result types.

use std::time::Duration;

use crate::square::Square;
use crate::types::{Depth, Score};

/// Score of one root move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RootMove {
    pub sq: Square,
    pub score: Score,
}

/// Result of a search operation.
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// Best move for the side to move, `None` if it has no legal move.
    pub best_move: Option<Square>,
    /// Minimax value of the best move, from White's point of view.
    pub score: Score,
    /// Nominal search depth (root ply included).
    pub depth: Depth,
    /// Number of nodes visited below the root.
    pub n_nodes: u64,
    /// Every root move with its value, in move generation order.
    pub root_moves: Vec<RootMove>,
    /// Wall-clock time spent searching.
    pub elapsed: Duration,
}

impl SearchResult {
    /// Nodes per second, or 0 if the search was too fast to time.
    pub fn nps(&self) -> u64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            (self.n_nodes as f64 / secs) as u64
        } else {
            0
        }
    }
}
