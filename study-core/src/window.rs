//! Fetch windows and per-day grouping keys.
//!
//! The canonical window is the trailing 24 hours ending "now", anchored at UTC+9.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

const JST_OFFSET_SECS: i32 = 9 * 3600;

/// Fixed UTC+9 offset used by the scheduled runs.
pub fn jst() -> FixedOffset {
    FixedOffset::east_opt(JST_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Inclusive `[start, end]` range of creation timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl TimeWindow {
    /// Window of `hours` ending at `now`, expressed in `offset`.
    pub fn trailing(now: DateTime<Utc>, hours: i64, offset: FixedOffset) -> Self {
        let end = now.with_timezone(&offset);
        Self {
            start: end - Duration::hours(hours),
            end,
        }
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts <= self.end
    }

    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start.with_timezone(&Utc)
    }

    pub fn end_utc(&self) -> DateTime<Utc> {
        self.end.with_timezone(&Utc)
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} .. {}", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

/// Grouping key for one user's results of one day ("task folder").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskDay {
    pub user_id: String,
    pub date: NaiveDate,
}

impl TaskDay {
    /// The day is the window end's calendar date in the window's own offset.
    pub fn for_window(user_id: impl Into<String>, window: &TimeWindow) -> Self {
        Self {
            user_id: user_id.into(),
            date: window.end.date_naive(),
        }
    }
}
