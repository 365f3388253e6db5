use serde::Serialize;

/// Score values for line clears, indexed by the number of rows cleared by one
/// lock. Multiplied by the level at the time of the lock.
pub const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

/// Lines needed to advance one level.
pub const LINES_PER_LEVEL: usize = 10;

/// Fall interval at level 1, in milliseconds.
pub const INITIAL_FALL_INTERVAL_MILLIS: u64 = 1000;

/// Fastest fall interval, reached at level 10.
pub const MIN_FALL_INTERVAL_MILLIS: u64 = 100;

/// Amount the fall interval shrinks per level.
const FALL_INTERVAL_STEP_MILLIS: u64 = 100;

/// Game statistics: score, level, lines, and gravity speed.
///
/// - **Score**: `SCORE_TABLE[n] * level` per lock clearing `n` rows
/// - **Level**: `total_cleared_lines / 10 + 1`
/// - **Fall interval**: `max(100, 1000 - (level - 1) * 100)` milliseconds
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.level(), 1);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: usize,
    level: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
    fall_interval_millis: u64,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
            fall_interval_millis: INITIAL_FALL_INTERVAL_MILLIS,
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the current level, starting at 1.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by rows cleared.
    ///
    /// Index `n` counts locks that cleared exactly `n` rows.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Returns the gravity interval in milliseconds.
    #[must_use]
    pub const fn fall_interval_millis(&self) -> u64 {
        self.fall_interval_millis
    }

    /// Updates statistics after a piece lock.
    ///
    /// The score uses the level in effect before this lock; level and fall
    /// interval are recomputed afterwards.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) {
        debug_assert!(cleared_lines < SCORE_TABLE.len());
        self.completed_pieces += 1;
        if let Some(counter) = self.line_cleared_counter.get_mut(cleared_lines) {
            *counter += 1;
        }
        let points = SCORE_TABLE
            .get(cleared_lines)
            .copied()
            .unwrap_or(SCORE_TABLE[SCORE_TABLE.len() - 1]);
        self.score += points * self.level;
        self.total_cleared_lines += cleared_lines;
        self.level = self.total_cleared_lines / LINES_PER_LEVEL + 1;
        self.fall_interval_millis = fall_interval_millis(self.level);
    }
}

fn fall_interval_millis(level: usize) -> u64 {
    let steps = u64::try_from(level.saturating_sub(1)).unwrap_or(u64::MAX);
    INITIAL_FALL_INTERVAL_MILLIS
        .saturating_sub(steps.saturating_mul(FALL_INTERVAL_STEP_MILLIS))
        .max(MIN_FALL_INTERVAL_MILLIS)
}
