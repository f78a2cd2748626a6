//! Core Connect Four game logic: board, stateless move engine, player types
//! and the resumable session state machine.

mod board;
mod coin;
pub mod engine;
mod player;
mod session;

pub use board::{Board, Cell, DEFAULT_COLS, DEFAULT_ROWS};
pub use coin::{CoinFlip, FixedCoin, RandomCoin};
pub use engine::{apply_move, MoveOutcome};
pub use player::Player;
pub(crate) use player::winner_flag;
pub use session::{GameSession, GameStatus, MoveRejected, Snapshot, StatusTag};
