//! Exit-intent popup suppression.

use chrono::{DateTime, TimeDelta, Utc};

/// Default number of days a dismissed popup stays hidden.
pub const DEFAULT_SUPPRESS_DAYS: u32 = 7;

/// Decides whether the exit popup may be shown again after a dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitPopupPolicy {
    suppress_for: TimeDelta,
}

impl ExitPopupPolicy {
    /// Hide the popup for `days` after each dismissal.
    #[must_use]
    pub fn new(days: u32) -> Self {
        Self {
            suppress_for: TimeDelta::days(i64::from(days)),
        }
    }

    /// Length of the suppression window.
    #[must_use]
    pub const fn suppress_for(&self) -> TimeDelta {
        self.suppress_for
    }

    /// Whether the popup should show at `now`.
    #[must_use]
    pub fn should_show(&self, dismissed_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        dismissed_at.is_none_or(|at| now.signed_duration_since(at) >= self.suppress_for)
    }
}

impl Default for ExitPopupPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_SUPPRESS_DAYS)
    }
}
