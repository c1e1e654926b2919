//! Core 2048 game logic: the board and its rotate-collapse move engine, the
//! spawn/score/termination rules, and the session with undo history.

mod board;
mod direction;
pub mod engine;
mod history;
pub mod rules;
mod session;
mod state;

pub use board::{Board, Cell, MAX_TILE};
pub use direction::{Direction, Rotation};
pub use engine::{collapse_row, move_grid, MoveOutcome};
pub use history::{History, Snapshot};
pub use rules::{game_outcome, is_game_over, score_delta, GameConfig, Rules};
pub use session::{MoveReport, Session};
pub use state::{GameOutcome, GameState, MoveError, Turn};
