//! Game rules, timing and state transitions.
//!
//! This module builds the playable game on top of the core data structures:
//!
//! - [`GameField`] - Grid, falling piece, preview piece and hold slot
//! - [`GameSession`] - Field plus statistics, gravity timer and play state
//! - [`GameStats`] - Score, level, cleared lines and fall interval
//! - [`PieceGenerator`] - Uniform random piece source
//! - [`GameSeed`] - Seed for deterministic piece generation
//! - [`Command`] / [`Effect`] - What a driver sends in and gets back
//! - [`GameSnapshot`] - Read-only copy of a session for rendering
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`], optionally with a seed
//! 2. Feed it player commands and clock readings from the driver loop
//! 3. Map the returned effects to sounds, and render from a snapshot
//! 4. After game over, only [`Command::Restart`] does anything
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Command, Effect, GameSession};
//!
//! let mut session = GameSession::with_seed("00000000000000000000000000000000".parse().unwrap());
//!
//! session.process_command(Command::MoveLeft);
//! let effects = session.process_command(Command::HardDrop);
//! assert_eq!(effects.last(), Some(&Effect::Drop));
//!
//! let snapshot = session.snapshot();
//! assert_eq!(snapshot.score, 0);
//! assert!(!snapshot.game_over);
//! ```

pub use self::{
    command::*, effect::*, field::*, generator::*, session::*, snapshot::*, stats::*,
};

mod command;
mod effect;
mod field;
mod generator;
mod session;
mod snapshot;
mod stats;
