//! Common type aliases used throughout the engine.

/// Search depth in plies.
pub type Depth = u32;

/// Evaluation score, from White's point of view.
pub type Score = i32;

/// Infinity score for alpha-beta bounds. Larger than any terminal score.
pub const SCORE_INF: Score = 30_000;
