use std::time::Duration;

/// Periodic gravity deadline.
///
/// The timer holds no clock of its own: the owner feeds elapsed time in with
/// [`Self::advance`] and drains expired periods with [`Self::take_due`].
/// Starting always replaces the previous period, so at most one schedule is
/// active at a time.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use bricks_engine::GravityTimer;
///
/// let mut timer = GravityTimer::new();
/// timer.start(Duration::from_millis(100));
/// timer.advance(Duration::from_millis(250));
///
/// assert!(timer.take_due());
/// assert!(timer.take_due());
/// assert!(!timer.take_due());
/// assert_eq!(timer.remaining(), Some(Duration::from_millis(50)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GravityTimer {
    period: Option<Duration>,
    elapsed: Duration,
}

impl GravityTimer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            period: None,
            elapsed: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.period.is_some()
    }

    #[must_use]
    pub const fn period(&self) -> Option<Duration> {
        self.period
    }

    /// Starts a fresh period of `period`, cancelling any running one.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn start(&mut self, period: Duration) {
        assert!(!period.is_zero(), "gravity period must be non-zero");
        self.period = Some(period);
        self.elapsed = Duration::ZERO;
    }

    /// Cancels the running period. Stopping a stopped timer does nothing.
    pub fn stop(&mut self) {
        self.period = None;
        self.elapsed = Duration::ZERO;
    }

    /// Stops the timer, then starts it with `period`.
    pub fn restart(&mut self, period: Duration) {
        self.stop();
        self.start(period);
    }

    /// Accumulates elapsed wall time. Ignored while stopped.
    pub fn advance(&mut self, elapsed: Duration) {
        if self.period.is_some() {
            self.elapsed = self.elapsed.saturating_add(elapsed);
        }
    }

    /// Consumes one expired period, if any.
    pub fn take_due(&mut self) -> bool {
        match self.period {
            Some(period) if self.elapsed >= period => {
                self.elapsed -= period;
                true
            }
            _ => false,
        }
    }

    /// Time left until the next period expires, or `None` while stopped.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.period
            .map(|period| period.saturating_sub(self.elapsed))
    }
}
