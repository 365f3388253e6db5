use arrayvec::ArrayVec;
use serde::Serialize;

/// Discrete notification emitted while a command or gravity tick is
/// processed.
///
/// Effects are returned in the order they occurred. A driver typically maps
/// each one to a sound cue; the engine itself never plays anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    /// The falling piece moved sideways or down, or a hold happened.
    #[display("move")]
    Move,
    /// The falling piece rotated.
    #[display("rotate")]
    Rotate,
    /// A piece locked after a hard drop or a failed gravity step.
    #[display("drop")]
    Drop,
    /// One row was cleared. Emitted once per row.
    #[display("clear")]
    Clear,
    /// The next piece could not spawn. Background music should stop.
    #[display("gameover")]
    GameOver,
    /// The game was reset. Background music should (re)start.
    #[display("restart")]
    Restart,
    /// The game was paused. Background music should pause.
    #[display("pause")]
    Pause,
    /// The game was resumed from pause.
    #[display("resume")]
    Resume,
}

/// Maximum number of effects produced by a single call.
///
/// The worst case is a lock clearing four rows that also ends the game:
/// four `Clear`, one `GameOver`, one `Drop`.
pub const MAX_EFFECTS_PER_STEP: usize = 8;

/// Effects produced by one command or gravity tick, in occurrence order.
pub type Effects = ArrayVec<Effect, MAX_EFFECTS_PER_STEP>;
