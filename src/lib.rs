//! chess-report - game listings and statistics for a chess.com player.
//!
//! Downloads a player's games for a month or a whole year, keeps the ones
//! matching a time control, and writes every game's moves followed by a
//! statistics report (results, rating changes, per-type and per-color
//! breakdowns) into a single text file.
//!
//! # Modules
//!
//! - [`splitter`] - splits a multi-game PGN download into game blocks
//! - [`header`] - PGN tag lookup
//! - [`timecontrol`] - time-control display, game types and filtering
//! - [`moves`] - move-text cleanup and move counting
//! - [`game`] - one game block to a [`game::GameRecord`]
//! - [`stats`] - running statistics over admitted games
//! - [`report`] - text rendering of entries and the final report
//! - [`source`] - periods, URLs and archive downloads
//! - [`client`] - blocking HTTP client
//! - [`config`] - optional TOML configuration
//! - [`pipeline`] - one complete run

pub mod client;
pub mod config;
pub mod error;
pub mod game;
pub mod header;
pub mod moves;
pub mod pipeline;
pub mod report;
pub mod source;
pub mod splitter;
pub mod stats;
pub mod timecontrol;

pub use error::{Error, Result};
