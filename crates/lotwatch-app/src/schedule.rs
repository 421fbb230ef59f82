//! Last-update / next-refresh bookkeeping.

use lotwatch_core::{elapsed_between, remaining_between};
use time::{Duration, OffsetDateTime};

/// Tracks when data was last loaded and when the next load is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateSchedule {
    last_updated: OffsetDateTime,
    /// Latest load attempt, successful or not.
    last_attempt: OffsetDateTime,
    refresh_interval: Duration,
}

impl UpdateSchedule {
    /// Schedule whose data was loaded at `last_updated`.
    #[must_use]
    pub const fn new(last_updated: OffsetDateTime, refresh_interval: Duration) -> Self {
        Self {
            last_updated,
            last_attempt: last_updated,
            refresh_interval,
        }
    }

    /// When data was last loaded.
    #[must_use]
    pub const fn last_updated(&self) -> OffsetDateTime {
        self.last_updated
    }

    /// When the next load is due, one interval after the latest attempt.
    #[must_use]
    pub fn next_refresh(&self) -> OffsetDateTime {
        self.last_attempt.saturating_add(self.refresh_interval)
    }

    /// True once `now` has reached the next refresh.
    #[must_use]
    pub fn is_due(&self, now: OffsetDateTime) -> bool {
        now >= self.next_refresh()
    }

    /// Record a load at `now`.
    pub const fn mark_updated(&mut self, now: OffsetDateTime) {
        self.last_updated = now;
        self.last_attempt = now;
    }

    /// Record a failed load at `now`; the data keeps its old timestamp.
    pub const fn mark_attempted(&mut self, now: OffsetDateTime) {
        self.last_attempt = now;
    }

    /// `"Updated 2m ago · Next update in 45s"`.
    #[must_use]
    pub fn status_line(&self, now: OffsetDateTime) -> String {
        format!(
            "Updated {} · Next update in {}",
            elapsed_between(self.last_updated, now),
            remaining_between(self.next_refresh(), now)
        )
    }
}
