use crate::board::Board;
use crate::disc::Player;
use crate::rules;

/// Executes a perft run starting from the standard initial position.
///
/// # Arguments
///
/// * `depth` - Number of plies to expand from the initial position. A depth of
///   `1` counts the immediate legal moves; larger values walk the tree
///   recursively.
///
/// # Returns
///
/// The total node count the search visits from the initial position.
pub fn perft_root(depth: u32) -> u64 {
    perft(&Board::new(), Player::Black, depth)
}

/// Counts leaf nodes `depth` plies below `board` with `player` to move.
///
/// A pass does not count as a ply. A finished game counts as a single leaf.
pub fn perft(board: &Board, player: Player, depth: u32) -> u64 {
    let move_list = rules::legal_moves(board, player);

    if move_list.is_empty() {
        return if rules::has_legal_moves(board, player.opponent()) {
            perft(board, player.opponent(), depth)
        } else {
            1
        };
    }

    if depth <= 1 {
        return move_list.count() as u64;
    }

    move_list
        .iter()
        .map(|m| perft(&rules::with_move(board, m, player), player.opponent(), depth - 1))
        .sum()
}
