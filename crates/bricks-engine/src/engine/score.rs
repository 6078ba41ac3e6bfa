use std::time::Duration;

use crate::LineCountError;

/// Score cap.
pub const SCORE_MAX: usize = 1000;
/// Cleared line count cap.
pub const LINES_MAX: usize = 1000;
/// Highest level reachable.
pub const LEVEL_MAX: usize = 9;
/// Lines to clear per level.
pub const LINES_PER_LEVEL: usize = 10;
/// Most lines a single lock can clear.
pub const LINES_PER_LOCK_MAX: usize = 4;

/// Snapshot of the score, cleared lines and level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoreState {
    score: usize,
    lines: usize,
    level: usize,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl ScoreState {
    pub const INITIAL: Self = Self {
        score: 0,
        lines: 0,
        level: 1,
    };

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn lines(&self) -> usize {
        self.lines
    }

    /// Current level, in `1..=9`.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }
}

/// Tracks score and level progression.
///
/// # Scoring
///
/// - Clearing `n` lines at once scores `n²` points
/// - Level is `lines / 10 + 1`
/// - Score and lines are capped at 1000, level at 9
///
/// # Example
///
/// ```
/// use bricks_engine::ScoreTracker;
///
/// let mut tracker = ScoreTracker::new();
/// tracker.apply_lines_cleared(4).unwrap();
///
/// assert_eq!(tracker.state().score(), 16);
/// assert_eq!(tracker.state().lines(), 4);
/// assert_eq!(tracker.state().level(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScoreTracker {
    state: ScoreState,
}

impl ScoreTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ScoreState::INITIAL,
        }
    }

    #[must_use]
    pub const fn state(&self) -> ScoreState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = ScoreState::INITIAL;
    }

    /// Records the lines cleared by a single lock.
    ///
    /// Counts above 4 are rejected and leave the state untouched.
    pub fn apply_lines_cleared(&mut self, count: usize) -> Result<(), LineCountError> {
        if count > LINES_PER_LOCK_MAX {
            return Err(LineCountError { count });
        }
        let state = &mut self.state;
        state.score = usize::min(state.score + count * count, SCORE_MAX);
        state.lines = usize::min(state.lines + count, LINES_MAX);
        state.level = usize::min(state.lines / LINES_PER_LEVEL + 1, LEVEL_MAX);
        Ok(())
    }

    /// Gravity period for the current level: 900 ms at level 1, 100 ms at level 9.
    #[must_use]
    pub fn gravity_delay(&self) -> Duration {
        gravity_delay(self.state.level)
    }
}

pub(crate) fn gravity_delay(level: usize) -> Duration {
    let level = u64::try_from(level.clamp(1, LEVEL_MAX)).unwrap_or(1);
    Duration::from_millis(1000 - level * 100)
}
