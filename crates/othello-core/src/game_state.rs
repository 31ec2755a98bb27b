//! Game state management.
//!
//! This module provides the `GameState` struct, the turn controller that a
//! front end drives: it owns the live board, decides whose turn it is,
//! resolves passes and game over, keeps an undo history, and queues
//! [`GameEvent`]s for the presentation layer to render.

use std::collections::VecDeque;

use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::ai;
use crate::bitboard::Bitboard;
use crate::board::{Board, DiscCount};
use crate::disc::Player;
use crate::level::Difficulty;
use crate::move_list::MoveList;
use crate::rules::{self, InvalidMoveError};
use crate::square::Square;

/// Whose turn it is, or the final tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    AwaitingMove(Player),
    Terminal(DiscCount),
}

/// State changes reported to the presentation layer, in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    MoveApplied {
        square: Square,
        flipped: Bitboard,
        mover: Player,
    },
    Passed {
        player: Player,
    },
    GameOver {
        black: u32,
        white: u32,
    },
}

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    BlackWins,
    WhiteWins,
    Draw,
}

impl Outcome {
    /// Decides the outcome from a final tally.
    pub fn from_count(count: DiscCount) -> Outcome {
        match count.black.cmp(&count.white) {
            std::cmp::Ordering::Greater => Outcome::BlackWins,
            std::cmp::Ordering::Less => Outcome::WhiteWins,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    /// The winning player, if any.
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::BlackWins => Some(Player::Black),
            Outcome::WhiteWins => Some(Player::White),
            Outcome::Draw => None,
        }
    }
}

/// A move request that does not fit the current game flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalStateError {
    #[error("it is {to_move}'s turn, not {player}'s")]
    NotYourTurn { player: Player, to_move: Player },
    #[error("the game is already over")]
    GameOver,
}

/// Any reason [`GameState::attempt_move`] can refuse a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    InvalidMove(#[from] InvalidMoveError),
    #[error(transparent)]
    IllegalState(#[from] IllegalStateError),
}

/// One applied move with everything needed to take it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub square: Square,
    pub mover: Player,
    pub flipped: Bitboard,
    /// The player forced to pass right after this move, if any.
    pub passed: Option<Player>,
    board_before: Board,
    status_before: Status,
    /// Events this move queued, so undo can withdraw the undrained ones.
    n_events: usize,
}

/// Represents the state of an Othello game.
///
/// The board is only changed by [`attempt_move`](Self::attempt_move); passes
/// only change whose turn it is. Every operation takes the state explicitly,
/// and AI search works on board copies, never on this value.
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    status: Status,
    history: Vec<MoveRecord>,
    events: VecDeque<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a new game in the initial position with Black to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            status: Status::AwaitingMove(Player::Black),
            history: Vec::new(),
            events: VecDeque::new(),
        }
    }

    /// Creates a game from an arbitrary position.
    ///
    /// If `side_to_move` cannot move, the pass or game over is resolved
    /// immediately and reported through the event queue.
    pub fn from_board(board: Board, side_to_move: Player) -> Self {
        let mut state = Self {
            board,
            status: Status::AwaitingMove(side_to_move),
            history: Vec::new(),
            events: VecDeque::new(),
        };
        if !rules::has_legal_moves(&state.board, side_to_move) {
            state.advance_turn(side_to_move.opponent());
        }
        state
    }

    /// Returns a reference to the current board position.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current turn status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns the player to move, or `None` once the game is over.
    pub fn side_to_move(&self) -> Option<Player> {
        match self.status {
            Status::AwaitingMove(player) => Some(player),
            Status::Terminal(_) => None,
        }
    }

    /// Checks if the game has ended (neither player can move).
    pub fn is_game_over(&self) -> bool {
        matches!(self.status, Status::Terminal(_))
    }

    /// Legal moves for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> MoveList {
        match self.status {
            Status::AwaitingMove(player) => rules::legal_moves(&self.board, player),
            Status::Terminal(_) => MoveList::default(),
        }
    }

    /// Plays `sq` for `player`.
    ///
    /// On success the board is updated, the turn advances (resolving a pass or
    /// game over), and the matching events are queued.
    ///
    /// # Returns
    ///
    /// The set of discs that were flipped.
    ///
    /// # Errors
    ///
    /// * [`IllegalStateError`] if the game is over or it is not `player`'s turn.
    /// * [`InvalidMoveError`] if `sq` is occupied or flips nothing.
    ///
    /// The state is unchanged when an error is returned.
    pub fn attempt_move(&mut self, sq: Square, player: Player) -> Result<Bitboard, GameError> {
        let to_move = match self.status {
            Status::Terminal(_) => return Err(IllegalStateError::GameOver.into()),
            Status::AwaitingMove(to_move) => to_move,
        };
        if to_move != player {
            return Err(IllegalStateError::NotYourTurn { player, to_move }.into());
        }

        let board_before = self.board;
        let status_before = self.status;
        let queued_before = self.events.len();
        let flipped = rules::apply_move(&mut self.board, sq, player)?;
        debug!(%player, %sq, flipped = flipped.count(), "move applied");
        self.events.push_back(GameEvent::MoveApplied {
            square: sq,
            flipped,
            mover: player,
        });

        let passed = self.advance_turn(player);
        self.history.push(MoveRecord {
            square: sq,
            mover: player,
            flipped,
            passed,
            board_before,
            status_before,
            n_events: self.events.len() - queued_before,
        });
        Ok(flipped)
    }

    /// Plays `sq` for whichever side is to move.
    pub fn play(&mut self, sq: Square) -> Result<Bitboard, GameError> {
        let player = self.side_to_move().ok_or(IllegalStateError::GameOver)?;
        self.attempt_move(sq, player)
    }

    /// Chooses a CPU move for the side to move without changing the state.
    ///
    /// # Returns
    ///
    /// `None` if the game is over.
    pub fn choose_ai_move<R: Rng + ?Sized>(
        &self,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Option<Square> {
        let player = self.side_to_move()?;
        ai::choose_move(&self.board, player, difficulty, rng)
    }

    /// Hands the turn to the opponent of `mover`, resolving passes and game over.
    ///
    /// Returns the player who had to pass, if any.
    fn advance_turn(&mut self, mover: Player) -> Option<Player> {
        let opponent = mover.opponent();
        if rules::has_legal_moves(&self.board, opponent) {
            self.status = Status::AwaitingMove(opponent);
            return None;
        }

        if rules::has_legal_moves(&self.board, mover) {
            debug!(player = %opponent, "pass");
            self.events.push_back(GameEvent::Passed { player: opponent });
            self.status = Status::AwaitingMove(mover);
            return Some(opponent);
        }

        let count = self.board.count_discs();
        debug!(black = count.black, white = count.white, "game over");
        self.events.push_back(GameEvent::GameOver {
            black: count.black,
            white: count.white,
        });
        self.status = Status::Terminal(count);
        None
    }

    /// Removes and returns all queued events, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Returns the disc count for both players.
    pub fn score(&self) -> DiscCount {
        self.board.count_discs()
    }

    /// Returns the outcome once the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            Status::Terminal(count) => Some(Outcome::from_count(count)),
            Status::AwaitingMove(_) => None,
        }
    }

    /// Returns the last move played.
    pub fn last_move(&self) -> Option<Square> {
        self.history.last().map(|record| record.square)
    }

    /// Returns every move played so far, oldest first.
    pub fn move_history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Undoes the last move, including any pass it caused.
    ///
    /// Events the move queued that have not been drained yet are discarded.
    ///
    /// # Returns
    ///
    /// `true` if a move was undone, `false` if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(record) => {
                self.board = record.board_before;
                self.status = record.status_before;
                let keep = self.events.len().saturating_sub(record.n_events);
                self.events.truncate(keep);
                true
            }
            None => false,
        }
    }
}
