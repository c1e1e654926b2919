//! Terminal UI: a ratatui game view for playing 2048 with the keyboard.

mod app;
pub mod board_widget;
mod game_view;

pub use app::App;
