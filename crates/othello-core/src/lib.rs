//! Othello rules engine and computer opponent.
//!
//! The board, move legality and flipping live in [`board`], [`rules`] and
//! [`flip`]. [`game_state::GameState`] drives turns, passes and game over.
//! [`ai`] picks CPU moves, backed by [`eval`] and [`search`].

pub mod ai;
pub mod bitboard;
pub mod board;
pub mod disc;
pub mod eval;
pub mod flip;
pub mod game_state;
pub mod level;
pub mod move_list;
pub mod perft;
pub mod rules;
pub mod search;
pub mod square;
pub mod types;
