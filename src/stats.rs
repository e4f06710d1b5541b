//! Reading statistics for the current session.
//!
//! Nothing here is persisted; a new session starts from zero.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReadingStats {
    /// Incremented once per successful chapter load.
    pub surahs_read: u64,
    /// Seconds on the reading stopwatch.
    pub time_spent: u64,
    /// Carried for display only; no streak is computed.
    pub day_streak: u64,
}

/// `M:SS` below an hour, `H:MM:SS` from an hour on.
pub fn format_time(secs: u64) -> String {
    let hrs = secs / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;
    if hrs > 0 {
        format!("{}:{:02}:{:02}", hrs, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}
