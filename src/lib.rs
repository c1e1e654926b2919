//! # twenty48
//!
//! The 2048 sliding-tile puzzle with a terminal UI.
//!
//! Moves are computed by a single leftward slide-and-merge: the board is
//! rotated so the requested direction points left, every row is collapsed,
//! and the result is rotated back.
//!
//! ```
//! use twenty48::game::{move_grid, Direction};
//!
//! let outcome = move_grid(&[vec![Some(2), None, None, Some(2)]], Direction::Right).unwrap();
//! assert!(outcome.moved);
//! assert_eq!(outcome.board.rows(), &[vec![None, None, None, Some(4)]]);
//! ```
//!
//! ## Modules
//!
//! - [`game`] — Board, rotation, move engine, rules, session and undo history
//! - [`store`] — JSON save file for the current board and score
//! - [`ui`] — Terminal UI: game view and key handling
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod store;
pub mod ui;
