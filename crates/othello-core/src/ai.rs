//! CPU move selection.
//!
//! Each [`Difficulty`] maps to one [`Policy`]. Random choices draw from a
//! caller-supplied RNG, so a seeded generator makes every decision
//! reproducible.

use std::thread::{self, JoinHandle};

use arrayvec::ArrayVec;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tracing::debug;

use crate::board::Board;
use crate::disc::Player;
use crate::eval;
use crate::level::{Difficulty, Policy};
use crate::move_list::{MAX_MOVES, MoveList};
use crate::rules;
use crate::search;
use crate::square::Square;

/// Chooses a move for `player` at the given difficulty.
///
/// # Returns
///
/// The chosen square, or `None` if `player` has no legal move.
pub fn choose_move<R: Rng + ?Sized>(
    board: &Board,
    player: Player,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Square> {
    let moves = rules::legal_moves(board, player);
    if moves.is_empty() {
        return None;
    }

    let sq = match difficulty.policy() {
        Policy::Random => random_move(&moves, rng),
        Policy::Greedy => greedy_move(&moves, rng),
        Policy::Search => search_move(board, player),
    };
    debug!(%player, %difficulty, sq = ?sq, "cpu move chosen");
    sq
}

/// Picks a legal move uniformly at random.
pub fn random_move<R: Rng + ?Sized>(moves: &MoveList, rng: &mut R) -> Option<Square> {
    moves.as_slice().choose(rng).map(|m| m.sq)
}

/// Picks the move whose target square has the highest positional weight.
///
/// Only the target square is considered: no lookahead and no mobility term.
/// Ties are broken uniformly at random among all maximal moves.
pub fn greedy_move<R: Rng + ?Sized>(moves: &MoveList, rng: &mut R) -> Option<Square> {
    let best_weight = moves.iter().map(|m| eval::square_weight(m.sq)).max()?;
    let best: ArrayVec<Square, MAX_MOVES> = moves
        .iter()
        .map(|m| m.sq)
        .filter(|&sq| eval::square_weight(sq) == best_weight)
        .collect();
    best.choose(rng).copied()
}

/// Picks the move with the best minimax value for `player`, using the
/// adaptive search depth.
pub fn search_move(board: &Board, player: Player) -> Option<Square> {
    search::search(board, player).best_move
}

/// A CPU decision running on a background thread.
///
/// Search has no side effects, so dropping the handle without joining simply
/// discards the answer.
pub struct PendingMove {
    handle: JoinHandle<Option<Square>>,
}

impl PendingMove {
    /// Returns `true` once the decision is ready.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the decision.
    ///
    /// # Errors
    ///
    /// Returns the panic payload if the worker thread panicked.
    pub fn join(self) -> thread::Result<Option<Square>> {
        self.handle.join()
    }
}

/// Starts [`choose_move`] on a background thread with an RNG seeded from `seed`.
///
/// The board is copied into the worker, so the caller's game state is never
/// shared with the search.
pub fn spawn_choose_move(
    board: Board,
    player: Player,
    difficulty: Difficulty,
    seed: u64,
) -> PendingMove {
    let handle = thread::spawn(move || {
        let mut rng = StdRng::seed_from_u64(seed);
        choose_move(&board, player, difficulty, &mut rng)
    });
    PendingMove { handle }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_no_moves_returns_none() {
        let board = Board::from_string(&format!("XXXXXXO-{}", "-".repeat(56))).unwrap();
        for difficulty in Difficulty::ALL {
            assert_eq!(
                choose_move(&board, Player::White, difficulty, &mut seeded(1)),
                None
            );
        }
    }

    #[test]
    fn test_every_difficulty_returns_legal_move() {
        let board = Board::new();
        for difficulty in Difficulty::ALL {
            for seed in 0..8 {
                let sq = choose_move(&board, Player::Black, difficulty, &mut seeded(seed))
                    .expect("black has moves");
                assert!(rules::is_legal(&board, sq, Player::Black));
            }
        }
    }

    #[test]
    fn test_random_move_is_deterministic_under_seed() {
        let moves = rules::legal_moves(&Board::new(), Player::Black);
        let a: Vec<_> = (0..16).map(|s| random_move(&moves, &mut seeded(s))).collect();
        let b: Vec<_> = (0..16).map(|s| random_move(&moves, &mut seeded(s))).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_move_covers_all_moves() {
        let moves = rules::legal_moves(&Board::new(), Player::Black);
        let mut rng = seeded(42);
        let mut seen = Vec::new();
        for _ in 0..200 {
            let sq = random_move(&moves, &mut rng).unwrap();
            if !seen.contains(&sq) {
                seen.push(sq);
            }
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_greedy_prefers_corner() {
        let board = Board::from_string(&format!("-OOOOOX--OX-----{}", "-".repeat(48))).unwrap();
        let moves = rules::legal_moves(&board, Player::Black);
        assert_eq!(moves.squares(), vec![Square::A1, Square::A2]);
        for seed in 0..8 {
            assert_eq!(greedy_move(&moves, &mut seeded(seed)), Some(Square::A1));
        }
    }

    #[test]
    fn test_greedy_breaks_ties_among_maximal_moves() {
        // From the start every black move has weight 3.
        let moves = rules::legal_moves(&Board::new(), Player::Black);
        let mut rng = seeded(3);
        let mut seen = Vec::new();
        for _ in 0..200 {
            let sq = greedy_move(&moves, &mut rng).unwrap();
            assert_eq!(eval::square_weight(sq), 3);
            if !seen.contains(&sq) {
                seen.push(sq);
            }
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_greedy_never_picks_lower_weight() {
        let mut board = Board::new();
        rules::apply_move(&mut board, Square::D3, Player::Black).unwrap();
        let moves = rules::legal_moves(&board, Player::White);
        let max = moves.iter().map(|m| eval::square_weight(m.sq)).max().unwrap();
        for seed in 0..16 {
            let sq = greedy_move(&moves, &mut seeded(seed)).unwrap();
            assert_eq!(eval::square_weight(sq), max);
        }
    }

    #[test]
    fn test_greedy_on_crowded_board() {
        let board = Board::from_string(
            "------OX-OOO-----OXX-OOX--X--XX-XO--OXO--XX-XX---OOOXOO---------",
        )
        .unwrap();
        let moves = rules::legal_moves(&board, Player::Black);
        assert_eq!(moves.count(), 35);
        for seed in 0..16 {
            let sq = greedy_move(&moves, &mut seeded(seed)).unwrap();
            assert!([Square::A1, Square::A8, Square::H8].contains(&sq));
        }
    }

    #[test]
    fn test_hard_is_deterministic() {
        let mut board = Board::new();
        rules::apply_move(&mut board, Square::D3, Player::Black).unwrap();
        let a = choose_move(&board, Player::White, Difficulty::Hard, &mut seeded(1));
        let b = choose_move(&board, Player::White, Difficulty::Hard, &mut seeded(99));
        assert_eq!(a, b);
        assert_eq!(a, search_move(&board, Player::White));
    }

    #[test]
    fn test_spawn_choose_move() {
        let board = Board::new();
        let pending = spawn_choose_move(board, Player::Black, Difficulty::Normal, 5);
        let sq = pending.join().unwrap();
        let expected = choose_move(&board, Player::Black, Difficulty::Normal, &mut seeded(5));
        assert_eq!(sq, expected);
    }
}
