use serde::Serialize;

use crate::{
    HoldError, PieceCollisionError,
    core::{Grid, Piece},
};

use super::{
    GameStats,
    command::Command,
    effect::{Effect, Effects},
    field::GameField,
    generator::GameSeed,
    snapshot::GameSnapshot,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// A complete game: field, statistics, gravity timer and play state.
///
/// The session is driven from outside. A driver feeds it player
/// [`Command`]s and periodic clock readings, and reads the result back through
/// accessors or [`snapshot`](Self::snapshot). Every mutating call returns the
/// [`Effects`] it produced, in order, so sound and other presentation concerns
/// stay outside the engine.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Command, Effect, GameSession};
///
/// let mut session = GameSession::new();
///
/// let effects = session.process_command(Command::SoftDrop);
/// assert_eq!(effects.as_slice(), [Effect::Move]);
///
/// // Gravity only fires once the fall interval (1000ms at level 1) has passed.
/// let y = session.current_piece().y();
/// session.process_gravity_tick(500);
/// assert_eq!(session.current_piece().y(), y);
/// session.process_gravity_tick(1001);
/// assert_eq!(session.current_piece().y(), y + 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    field: GameField,
    stats: GameStats,
    session_state: SessionState,
    last_fall_millis: u64,
    clock_millis: u64,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    #[must_use]
    pub fn new() -> Self {
        Self::from_field(GameField::new())
    }

    #[must_use]
    pub fn with_seed(seed: GameSeed) -> Self {
        Self::from_field(GameField::with_seed(seed))
    }

    fn from_field(field: GameField) -> Self {
        Self {
            field,
            stats: GameStats::new(),
            session_state: SessionState::Playing,
            last_fall_millis: 0,
            clock_millis: 0,
        }
    }

    #[must_use]
    pub fn field(&self) -> &GameField {
        &self.field
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        self.field.grid()
    }

    #[must_use]
    pub fn current_piece(&self) -> Piece {
        self.field.current_piece()
    }

    #[must_use]
    pub fn next_piece(&self) -> Piece {
        self.field.next_piece()
    }

    #[must_use]
    pub fn held_piece(&self) -> Option<Piece> {
        self.field.held_piece()
    }

    /// Returns the landing position of the falling piece. Does not modify the
    /// session.
    #[must_use]
    pub fn ghost_piece(&self) -> Piece {
        self.field.ghost_piece()
    }

    /// Returns a read-only copy of everything a renderer needs.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid: self.field.grid().clone(),
            current_piece: self.field.current_piece(),
            next_piece: self.field.next_piece(),
            held_piece: self.field.held_piece(),
            ghost_piece: self.field.ghost_piece(),
            can_hold: self.field.can_hold(),
            score: self.stats.score(),
            level: self.stats.level(),
            lines_cleared: self.stats.total_cleared_lines(),
            fall_interval_millis: self.stats.fall_interval_millis(),
            state: self.session_state,
            game_over: self.session_state.is_game_over(),
        }
    }

    /// Applies one player command.
    ///
    /// Piece commands only act while playing. Commands that would move the
    /// piece into an invalid position are dropped without effects.
    pub fn process_command(&mut self, command: Command) -> Effects {
        let mut effects = Effects::new();
        match command {
            Command::Restart => {
                self.restart();
                effects.push(Effect::Restart);
            }
            Command::TogglePause => {
                if let Some(effect) = self.toggle_pause() {
                    effects.push(effect);
                }
            }
            _ if !self.session_state.is_playing() => {}
            Command::MoveLeft => {
                if self.try_move_left().is_ok() {
                    effects.push(Effect::Move);
                }
            }
            Command::MoveRight => {
                if self.try_move_right().is_ok() {
                    effects.push(Effect::Move);
                }
            }
            Command::SoftDrop => {
                if self.try_soft_drop().is_ok() {
                    effects.push(Effect::Move);
                }
            }
            Command::Rotate => {
                if self.try_rotate().is_ok() {
                    effects.push(Effect::Rotate);
                }
            }
            Command::HardDrop => {
                self.hard_drop_and_complete(&mut effects);
            }
            Command::Hold => {
                if self.try_hold().is_ok() {
                    effects.push(Effect::Move);
                }
            }
        }
        effects
    }

    /// Advances gravity to the clock reading `now_millis`.
    ///
    /// If more than the fall interval has passed since the last gravity step,
    /// the piece moves down one row, or locks if it cannot. The reference
    /// point is then reset to `now_millis`, so a stalled driver catches up by
    /// a single step rather than a burst.
    pub fn process_gravity_tick(&mut self, now_millis: u64) -> Effects {
        let mut effects = Effects::new();
        self.clock_millis = now_millis;
        if !self.session_state.is_playing() {
            return effects;
        }
        if now_millis.saturating_sub(self.last_fall_millis) > self.stats.fall_interval_millis() {
            self.auto_drop_and_complete(&mut effects);
            self.last_fall_millis = now_millis;
        }
        effects
    }

    pub fn try_move_left(&mut self) -> Result<(), PieceCollisionError> {
        let piece = self.field.current_piece().left();
        self.field.set_current_piece(piece)
    }

    pub fn try_move_right(&mut self) -> Result<(), PieceCollisionError> {
        let piece = self.field.current_piece().right();
        self.field.set_current_piece(piece)
    }

    pub fn try_soft_drop(&mut self) -> Result<(), PieceCollisionError> {
        let piece = self.field.current_piece().down();
        self.field.set_current_piece(piece)
    }

    /// Rotates clockwise in place. There are no wall kicks, so a rotation
    /// that does not fit at the current anchor is rejected.
    pub fn try_rotate(&mut self) -> Result<(), PieceCollisionError> {
        let piece = self.field.current_piece().rotated();
        self.field.set_current_piece(piece)
    }

    pub fn try_hold(&mut self) -> Result<(), HoldError> {
        self.field.try_hold()
    }

    /// Resets everything except the piece generator stream.
    pub fn restart(&mut self) {
        self.field.reset();
        self.stats = GameStats::new();
        self.session_state = SessionState::Playing;
        self.last_fall_millis = self.clock_millis;
    }

    /// Switches between playing and paused. Has no effect after game over.
    pub fn toggle_pause(&mut self) -> Option<Effect> {
        match self.session_state {
            SessionState::Playing => {
                self.session_state = SessionState::Paused;
                Some(Effect::Pause)
            }
            SessionState::Paused => {
                self.session_state = SessionState::Playing;
                self.last_fall_millis = self.clock_millis;
                Some(Effect::Resume)
            }
            SessionState::GameOver => None,
        }
    }

    fn hard_drop_and_complete(&mut self, effects: &mut Effects) {
        while self.try_soft_drop().is_ok() {}
        self.complete_piece_drop(effects);
        effects.push(Effect::Drop);
    }

    fn auto_drop_and_complete(&mut self, effects: &mut Effects) {
        if self.try_soft_drop().is_ok() {
            return;
        }
        self.complete_piece_drop(effects);
        effects.push(Effect::Drop);
    }

    fn complete_piece_drop(&mut self, effects: &mut Effects) {
        let (cleared_lines, result) = self
            .field
            .complete_piece_drop(|_row| effects.push(Effect::Clear));
        self.stats.complete_piece_drop(cleared_lines);
        if result.is_err() {
            self.session_state = SessionState::GameOver;
            effects.push(Effect::GameOver);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::ShapeKind;

    use super::*;

    fn session() -> GameSession {
        GameSession::with_seed("5eed5eed5eed5eed5eed5eed5eed5eed".parse().unwrap())
    }

    fn session_with(grid: Grid, current: Piece) -> GameSession {
        let mut session = session();
        *session.field.grid_mut() = grid;
        session.field.set_current_piece_unchecked(current);
        session
    }

    /// A vertical I-piece in the rightmost column.
    fn vertical_i_at_right_wall() -> Piece {
        let piece = Piece::spawn(ShapeKind::I).rotated();
        piece.moved(9 - piece.x(), 0)
    }

    #[test]
    fn test_hard_drop_o_piece_on_empty_grid() {
        let mut session = session_with(Grid::new(), Piece::spawn(ShapeKind::O));
        assert_eq!(
            (session.current_piece().x(), session.current_piece().y()),
            (4, 0)
        );

        let effects = session.process_command(Command::HardDrop);
        assert_eq!(effects.as_slice(), [Effect::Drop]);

        for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert!(session.grid().is_occupied(x, y), "({x}, {y})");
        }
        assert_eq!(session.grid().rows().iter().flatten().flatten().count(), 4);
        assert_eq!(session.stats().score(), 0);
        assert!(session.session_state().is_playing());
    }

    #[test]
    fn test_lock_scores_by_cleared_rows() {
        for (lines, expected) in [(0, 0), (1, 100), (2, 300), (3, 500), (4, 800)] {
            let rows = vec!["#########."; lines];
            let mut session = session_with(Grid::from_ascii(&rows), vertical_i_at_right_wall());

            let effects = session.process_command(Command::HardDrop);
            assert_eq!(session.stats().score(), expected, "{lines} lines");
            assert_eq!(session.stats().total_cleared_lines(), lines);

            let clears = effects.iter().filter(|e| **e == Effect::Clear).count();
            assert_eq!(clears, lines);
            assert_eq!(effects.last(), Some(&Effect::Drop));
        }
    }

    #[test]
    fn test_lock_score_doubles_at_level_two() {
        for (lines, expected) in [(0, 0), (1, 200), (2, 600), (3, 1000), (4, 1600)] {
            let rows = vec!["#########."; lines];
            let mut session = session_with(Grid::from_ascii(&rows), vertical_i_at_right_wall());
            for _ in 0..10 {
                session.stats.complete_piece_drop(1);
            }
            assert_eq!(session.stats().level(), 2);
            let before = session.stats().score();

            session.process_command(Command::HardDrop);
            assert_eq!(session.stats().score() - before, expected, "{lines} lines");
        }
    }

    #[test]
    fn test_clear_effects_precede_drop() {
        let rows = vec!["#########."; 2];
        let mut session = session_with(Grid::from_ascii(&rows), vertical_i_at_right_wall());
        let effects = session.process_command(Command::HardDrop);
        assert_eq!(
            effects.as_slice(),
            [Effect::Clear, Effect::Clear, Effect::Drop]
        );
    }

    #[test]
    fn test_move_commands() {
        let mut session = session_with(Grid::new(), Piece::spawn(ShapeKind::O));

        assert_eq!(
            session.process_command(Command::MoveLeft).as_slice(),
            [Effect::Move]
        );
        assert_eq!(session.current_piece().x(), 3);
        assert_eq!(
            session.process_command(Command::MoveRight).as_slice(),
            [Effect::Move]
        );
        assert_eq!(session.current_piece().x(), 4);
        assert_eq!(
            session.process_command(Command::SoftDrop).as_slice(),
            [Effect::Move]
        );
        assert_eq!(session.current_piece().y(), 1);

        for _ in 0..4 {
            session.process_command(Command::MoveLeft);
        }
        assert_eq!(session.current_piece().x(), 0);
        let effects = session.process_command(Command::MoveLeft);
        assert!(effects.is_empty());
        assert_eq!(session.current_piece().x(), 0);
    }

    #[test]
    fn test_soft_drop_blocked_at_floor_does_not_lock() {
        let piece = Piece::spawn(ShapeKind::O).moved(0, 18);
        let mut session = session_with(Grid::new(), piece);

        let effects = session.process_command(Command::SoftDrop);
        assert!(effects.is_empty());
        assert_eq!(session.current_piece(), piece);
        assert_eq!(*session.grid(), Grid::new());
    }

    #[test]
    fn test_rotate_without_wall_kick() {
        let piece = vertical_i_at_right_wall().moved(0, 5);
        let mut session = session_with(Grid::new(), piece);

        // Horizontal I would stick out past the right wall.
        let effects = session.process_command(Command::Rotate);
        assert!(effects.is_empty());
        assert_eq!(session.current_piece(), piece);

        session.process_command(Command::MoveLeft);
        session.process_command(Command::MoveLeft);
        session.process_command(Command::MoveLeft);
        let effects = session.process_command(Command::Rotate);
        assert_eq!(effects.as_slice(), [Effect::Rotate]);
        assert_eq!(session.current_piece().shape().rows(), 1);
        assert_eq!(session.current_piece().x(), 6);
    }

    #[test]
    fn test_rotate_rejected_by_occupied_cells() {
        // A single block at (1, 12), eight rows from the bottom.
        let mut rows = vec![".........."; 8];
        rows[0] = ".#........";
        let piece = Piece::spawn(ShapeKind::T).moved(-4, 10);
        assert_eq!((piece.x(), piece.y()), (0, 10));
        let mut session = session_with(Grid::from_ascii(&rows), piece);

        // The rotated T would need (1, 12).
        let effects = session.process_command(Command::Rotate);
        assert!(effects.is_empty());
        assert_eq!(session.current_piece(), piece);

        session.process_command(Command::MoveRight);
        assert_eq!(
            session.process_command(Command::Rotate).as_slice(),
            [Effect::Rotate]
        );
    }

    #[test]
    fn test_hold_once_per_lock() {
        let mut session = session_with(Grid::new(), Piece::spawn(ShapeKind::O));
        let current = session.current_piece();
        let next = session.next_piece();

        assert_eq!(
            session.process_command(Command::Hold).as_slice(),
            [Effect::Move]
        );
        assert_eq!(session.held_piece(), Some(current));
        assert_eq!(session.current_piece(), next);

        let before = session.snapshot();
        assert!(session.process_command(Command::Hold).is_empty());
        let after = session.snapshot();
        assert_eq!(after.current_piece, before.current_piece);
        assert_eq!(after.held_piece, before.held_piece);
        assert_eq!(after.next_piece, before.next_piece);

        session.process_command(Command::HardDrop);
        assert_eq!(
            session.process_command(Command::Hold).as_slice(),
            [Effect::Move]
        );
        assert_eq!(session.current_piece(), Piece::spawn(ShapeKind::O));
    }

    #[test]
    fn test_gravity_interval_and_reset() {
        let mut session = session_with(Grid::new(), Piece::spawn(ShapeKind::O));

        assert!(session.process_gravity_tick(500).is_empty());
        assert_eq!(session.current_piece().y(), 0);
        assert!(session.process_gravity_tick(1000).is_empty());
        assert_eq!(session.current_piece().y(), 0);

        assert!(session.process_gravity_tick(1001).is_empty());
        assert_eq!(session.current_piece().y(), 1);

        // The reference point moved to 1001, not to 1000.
        session.process_gravity_tick(2001);
        assert_eq!(session.current_piece().y(), 1);
        session.process_gravity_tick(2002);
        assert_eq!(session.current_piece().y(), 2);
    }

    #[test]
    fn test_gravity_does_not_accumulate_after_stall() {
        let mut session = session_with(Grid::new(), Piece::spawn(ShapeKind::O));
        session.process_gravity_tick(60_000);
        assert_eq!(session.current_piece().y(), 1);
        session.process_gravity_tick(60_001);
        assert_eq!(session.current_piece().y(), 1);
    }

    #[test]
    fn test_gravity_locks_resting_piece() {
        let mut session = session();
        assert_eq!(session.process_command(Command::Hold).as_slice(), [Effect::Move]);
        assert!(!session.field().can_hold());
        session
            .field
            .set_current_piece_unchecked(Piece::spawn(ShapeKind::O).moved(0, 18));

        let effects = session.process_gravity_tick(1001);
        assert_eq!(effects.as_slice(), [Effect::Drop]);
        assert!(session.grid().is_occupied(4, 19));
        assert_eq!(session.stats().completed_pieces(), 1);
        assert!(session.field().can_hold());
    }

    #[test]
    fn test_blocked_spawn_ends_game() {
        let grid = Grid::from_ascii(&["....#....."; Grid::HEIGHT]);
        let mut session = session_with(grid, Piece::spawn(ShapeKind::O).moved(-4, 18));
        session.field.set_next_piece(Piece::spawn(ShapeKind::O));

        let effects = session.process_command(Command::HardDrop);
        assert_eq!(effects.as_slice(), [Effect::GameOver, Effect::Drop]);
        assert!(session.session_state().is_game_over());
        assert!(session.snapshot().game_over);

        let grid = session.grid().clone();
        let score = session.stats().score();
        let piece = session.current_piece();
        for command in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::SoftDrop,
            Command::Rotate,
            Command::HardDrop,
            Command::Hold,
            Command::TogglePause,
        ] {
            assert!(session.process_command(command).is_empty(), "{command:?}");
        }
        assert!(session.process_gravity_tick(100_000).is_empty());
        assert_eq!(*session.grid(), grid);
        assert_eq!(session.stats().score(), score);
        assert_eq!(session.current_piece(), piece);
        assert!(session.session_state().is_game_over());
    }

    #[test]
    fn test_restart_resets_state() {
        let grid = Grid::from_ascii(&["....#....."; Grid::HEIGHT]);
        let mut session = session_with(grid, Piece::spawn(ShapeKind::O).moved(-4, 18));
        session.field.set_next_piece(Piece::spawn(ShapeKind::O));
        session.process_command(Command::HardDrop);
        session.process_gravity_tick(5_000);
        assert!(session.session_state().is_game_over());

        let effects = session.process_command(Command::Restart);
        assert_eq!(effects.as_slice(), [Effect::Restart]);
        assert!(session.session_state().is_playing());
        assert_eq!(*session.grid(), Grid::new());
        assert_eq!(*session.stats(), GameStats::new());
        assert_eq!(session.held_piece(), None);
        assert!(session.field().can_hold());

        // Gravity measures from the restart, not from time zero.
        let y = session.current_piece().y();
        session.process_gravity_tick(5_500);
        assert_eq!(session.current_piece().y(), y);
        session.process_gravity_tick(6_001);
        assert_eq!(session.current_piece().y(), y + 1);
    }

    #[test]
    fn test_restart_while_playing() {
        let mut session = session_with(Grid::new(), Piece::spawn(ShapeKind::O));
        session.process_command(Command::HardDrop);
        assert_eq!(session.stats().completed_pieces(), 1);

        session.process_command(Command::Restart);
        assert_eq!(*session.grid(), Grid::new());
        assert_eq!(session.stats().completed_pieces(), 0);
    }

    #[test]
    fn test_pause_blocks_commands_and_gravity() {
        let mut session = session_with(Grid::new(), Piece::spawn(ShapeKind::O));
        assert_eq!(
            session.process_command(Command::TogglePause).as_slice(),
            [Effect::Pause]
        );
        assert!(session.session_state().is_paused());

        assert!(session.process_command(Command::MoveLeft).is_empty());
        assert!(session.process_command(Command::HardDrop).is_empty());
        assert!(session.process_gravity_tick(3_000).is_empty());
        assert_eq!(session.current_piece(), Piece::spawn(ShapeKind::O));

        assert_eq!(
            session.process_command(Command::TogglePause).as_slice(),
            [Effect::Resume]
        );
        // The fall timer restarts at resume time.
        session.process_gravity_tick(3_500);
        assert_eq!(session.current_piece().y(), 0);
        session.process_gravity_tick(4_001);
        assert_eq!(session.current_piece().y(), 1);
    }

    #[test]
    fn test_ghost_does_not_mutate() {
        let session = session_with(
            Grid::from_ascii(&["####......", "####......"]),
            Piece::spawn(ShapeKind::O),
        );
        let before = session.snapshot();
        let ghost = session.ghost_piece();
        assert_eq!((ghost.x(), ghost.y()), (4, 18));
        assert_eq!(session.current_piece().y(), 0);
        assert_eq!(session.snapshot().current_piece, before.current_piece);

        let session = session_with(
            Grid::from_ascii(&["....##....", "....##...."]),
            Piece::spawn(ShapeKind::O),
        );
        assert_eq!(session.ghost_piece().y(), 16);
    }

    #[test]
    fn test_seeded_sessions_are_reproducible() {
        let script = [
            Command::MoveLeft,
            Command::Rotate,
            Command::HardDrop,
            Command::Hold,
            Command::MoveRight,
            Command::HardDrop,
            Command::HardDrop,
        ];
        let mut a = session();
        let mut b = session();
        for command in script {
            assert_eq!(a.process_command(command), b.process_command(command));
        }
        assert_eq!(a.snapshot().grid, b.snapshot().grid);
        assert_eq!(a.snapshot().next_piece, b.snapshot().next_piece);
    }
}
