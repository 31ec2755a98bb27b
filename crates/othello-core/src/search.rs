//! Game tree search engine.
//!
//! Plain minimax with alpha-beta pruning over board copies. White is the
//! maximizing side and Black the minimizing side; a side with no legal move
//! passes without consuming depth.

pub mod search_result;

use std::time::Instant;

use tracing::{debug, trace};

use crate::board::Board;
use crate::disc::Player;
use crate::eval;
use crate::level;
use crate::rules;
use crate::types::{Depth, SCORE_INF, Score};

pub use search_result::{RootMove, SearchResult};

/// Per-search bookkeeping.
#[derive(Default)]
struct SearchContext {
    n_nodes: u64,
}

/// Searches the position for `player` at the depth chosen by
/// [`level::search_depth`] for the current board fill.
pub fn search(board: &Board, player: Player) -> SearchResult {
    search_with_depth(board, player, level::search_depth(board.filled_count()))
}

/// Searches the position for `player` to a fixed nominal depth.
///
/// Each root move is played and its reply tree is searched to `depth - 1`
/// with a full window. The best value wins and the first move found keeps a
/// tie, so the result is deterministic. A `depth` of zero is treated as one.
pub fn search_with_depth(board: &Board, player: Player, depth: Depth) -> SearchResult {
    let start = Instant::now();
    let depth = depth.max(1);
    let maximizing = player.is_maximizing();
    let mut ctx = SearchContext::default();
    let mut root_moves = Vec::new();
    let mut best: Option<RootMove> = None;

    for mv in rules::legal_moves(board, player).iter() {
        let child = rules::with_move(board, mv, player);
        let score = alpha_beta(&mut ctx, &child, depth - 1, -SCORE_INF, SCORE_INF, !maximizing);
        trace!(sq = %mv.sq, score, "root move");

        let root_move = RootMove { sq: mv.sq, score };
        let improves = match best {
            None => true,
            Some(b) if maximizing => score > b.score,
            Some(b) => score < b.score,
        };
        if improves {
            best = Some(root_move);
        }
        root_moves.push(root_move);
    }

    let result = SearchResult {
        best_move: best.map(|b| b.sq),
        score: best.map_or_else(|| eval::combined_score(board), |b| b.score),
        depth,
        n_nodes: ctx.n_nodes,
        root_moves,
        elapsed: start.elapsed(),
    };
    debug!(
        %player,
        depth,
        nodes = result.n_nodes,
        score = result.score,
        best = ?result.best_move,
        "search finished"
    );
    result
}

/// Minimax value of `board` with alpha-beta pruning.
///
/// # Arguments
///
/// * `board` - Position to evaluate.
/// * `depth` - Remaining plies. Passes do not consume depth.
/// * `alpha` - Lower bound of the search window.
/// * `beta` - Upper bound of the search window.
/// * `maximizing` - `true` if White is to move.
///
/// # Returns
///
/// The value of the position from White's point of view. Within
/// `(alpha, beta)` it equals the unpruned minimax value.
pub fn minimax(board: &Board, depth: Depth, alpha: Score, beta: Score, maximizing: bool) -> Score {
    let mut ctx = SearchContext::default();
    alpha_beta(&mut ctx, board, depth, alpha, beta, maximizing)
}

fn alpha_beta(
    ctx: &mut SearchContext,
    board: &Board,
    depth: Depth,
    mut alpha: Score,
    mut beta: Score,
    maximizing: bool,
) -> Score {
    ctx.n_nodes += 1;

    let player = if maximizing { Player::White } else { Player::Black };
    let moves = rules::legal_moves(board, player);

    if depth == 0 || moves.is_empty() {
        if moves.is_empty() {
            if !rules::has_legal_moves(board, player.opponent()) {
                return eval::terminal_score(board);
            }
            return alpha_beta(ctx, board, depth, alpha, beta, !maximizing);
        }
        return eval::combined_score(board);
    }

    if maximizing {
        let mut best = -SCORE_INF;
        for mv in moves.iter() {
            let child = rules::with_move(board, mv, player);
            let score = alpha_beta(ctx, &child, depth - 1, alpha, beta, false);
            best = best.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = SCORE_INF;
        for mv in moves.iter() {
            let child = rules::with_move(board, mv, player);
            let score = alpha_beta(ctx, &child, depth - 1, alpha, beta, true);
            best = best.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}
