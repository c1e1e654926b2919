use rand::Rng;

use super::board::Board;
use super::direction::Direction;
use super::history::Snapshot;
use super::rules::{game_outcome, score_delta, Rules};
use crate::error::BoardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// A tile reached the win value.
    Won,
    /// The board is full and no neighbours can merge.
    Stuck,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    GameOver,
}

/// What happened when a direction was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    /// Nothing could slide or merge; no tile was spawned.
    Unchanged,
    Moved { state: GameState, gained: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    score: u64,
    outcome: Option<GameOutcome>,
}

impl GameState {
    /// Wrap an existing board and score, deriving the outcome from the board.
    pub fn new(board: Board, score: u64, rules: &Rules) -> Self {
        let outcome = game_outcome(&board, rules.win_tile);
        GameState {
            board,
            score,
            outcome,
        }
    }

    /// Create initial game state: an empty board with two random tiles
    pub fn initial<R: Rng + ?Sized>(rules: &Rules, rng: &mut R) -> Result<Self, BoardError> {
        let blank = Board::empty(rules.rows, rules.cols)?;
        Ok(Self::start(&blank, rules, rng))
    }

    /// Start a game on `blank` by spawning two tiles.
    pub fn start<R: Rng + ?Sized>(blank: &Board, rules: &Rules, rng: &mut R) -> Self {
        let board = blank
            .with_random_tile(rng, rules.four_probability)
            .with_random_tile(rng, rules.four_probability);
        Self::new(board, 0, rules)
    }

    pub fn from_snapshot(snapshot: Snapshot, rules: &Rules) -> Self {
        Self::new(snapshot.board, snapshot.score, rules)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            score: self.score,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Directions that would change the board; empty once the game is over.
    pub fn legal_directions(&self) -> Vec<Direction> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.legal_directions()
    }

    /// Apply a move and return new state (immutable)
    ///
    /// A move that changes the board spawns one random tile and scores the
    /// gain between the old board and the slid board, before the spawn.
    pub fn apply_move<R: Rng + ?Sized>(
        &self,
        direction: Direction,
        rules: &Rules,
        rng: &mut R,
    ) -> Result<Turn, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let outcome = self.board.slide(direction);
        if !outcome.moved {
            return Ok(Turn::Unchanged);
        }

        let gained = score_delta(&self.board, &outcome.board);
        let board = outcome.board.with_random_tile(rng, rules.four_probability);

        Ok(Turn::Moved {
            state: GameState::new(board, self.score + gained, rules),
            gained,
        })
    }
}
