use serde::Serialize;

use crate::core::{Grid, Piece};

use super::session::SessionState;

/// Read-only view of a [`GameSession`](super::GameSession) at one instant.
///
/// Built by [`GameSession::snapshot`](super::GameSession::snapshot). Renderers
/// and recorders consume this instead of borrowing the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub grid: Grid,
    pub current_piece: Piece,
    pub next_piece: Piece,
    pub held_piece: Option<Piece>,
    /// Landing position of `current_piece`.
    pub ghost_piece: Piece,
    pub can_hold: bool,
    pub score: usize,
    pub level: usize,
    pub lines_cleared: usize,
    pub fall_interval_millis: u64,
    pub state: SessionState,
    pub game_over: bool,
}
