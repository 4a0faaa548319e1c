//! Debounced persistence of committed state.
//!
//! Commits happen on every edit; writing each one to storage is wasteful.
//! [`SaveDebouncer`] holds the latest value and hands it out once no new
//! value has arrived for the quiet period. A newer value always replaces the
//! pending one (last write wins). Time comes from the caller as a
//! [`Duration`] since any fixed epoch.

use core::time::Duration;

/// Default quiet period before a pending save is released.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Pending-save holder with a restartable quiet period.
#[derive(Debug, Clone)]
pub struct SaveDebouncer<T> {
    quiet_period: Duration,
    pending: Option<(T, Duration)>,
}

impl<T> Default for SaveDebouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl<T> SaveDebouncer<T> {
    pub const fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
        }
    }

    /// Queue `value`, dropping any value still pending, and restart the
    /// quiet period at `now`.
    pub fn schedule(&mut self, value: T, now: Duration) {
        self.pending = Some((value, now.saturating_add(self.quiet_period)));
    }

    /// Release the pending value if its quiet period has elapsed at `now`.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        if self.due_at().is_some_and(|due| now >= due) {
            self.flush()
        } else {
            None
        }
    }

    /// Release the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        let (value, _) = self.pending.take()?;
        plan_log!(trace, "flushing pending save");
        Some(value)
    }

    /// When the pending value becomes due, if there is one.
    pub fn due_at(&self) -> Option<Duration> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
