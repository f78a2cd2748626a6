//! Terminal UI: the board with a column selector, and the scoreboard.

mod app;
pub mod board_widget;
mod game_view;
mod scoreboard_view;

pub use app::{TerminalApp, View};
