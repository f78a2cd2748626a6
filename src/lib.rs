//! # Connect Four
//!
//! A gravity-drop connection game engine with sessions that survive process
//! restarts and a duplicate-free score ledger.
//!
//! ## Modules
//!
//! - [`game`]: Board, stateless move engine, player types, session state machine
//! - [`ledger`]: Append-only record of finished games
//! - [`store`]: Key-value persistence (in-memory and file-backed)
//! - [`timer`]: Elapsed-time tracking paused and resumed by the session
//! - [`app`]: Wires session transitions to the ledger and the store
//! - [`ui`]: ratatui front end with the board and the scoreboard
//! - [`players`]: Player names and ages
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod app;
pub mod config;
pub mod error;
pub mod game;
pub mod ledger;
pub mod players;
pub mod store;
pub mod timer;
pub mod ui;
