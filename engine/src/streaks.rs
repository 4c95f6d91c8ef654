//! Consecutive-day streak tracking
//!
//! [`advance_streak`] is a pure transition function: it takes the current
//! [`StreakData`] and a snapshot of the day being logged, and returns the
//! next state. Callers own persistence and error policy. The transition is
//! deterministic given `last_active_date` and the snapshot's date; activity
//! dates must be non-decreasing, and a backwards date is rejected with
//! [`StreakError::NonMonotonicDate`] before any state is touched.

use chrono::Datelike;

use nutritrack_shared::{StreakData, StreakDay};

use crate::error::StreakError;

/// Upper bound on retained history entries, newest kept.
pub const STREAK_HISTORY_CAP: usize = 30;

/// Advance the streak state for one day of activity.
///
/// Rules, applied in order:
/// - the day's Monday-indexed slot in the week mask is set
/// - first-ever activity starts the streak at 1
/// - same-day re-activity leaves the counter unchanged
/// - the day after the last active date increments the counter
/// - any longer gap restarts the counter at 1
/// - the best streak only ever ratchets upward
/// - the day's history entry is upserted by date, capped at
///   [`STREAK_HISTORY_CAP`] newest entries
pub fn advance_streak(data: &StreakData, day: &StreakDay) -> Result<StreakData, StreakError> {
    if let Some(last) = data.last_active_date {
        if (day.date - last).num_days() < 0 {
            return Err(StreakError::NonMonotonicDate {
                date: day.date,
                last_active: last,
            });
        }
    }

    let mut next = data.clone();
    next.week_days[day.date.weekday().num_days_from_monday() as usize] = true;

    next.current_streak = match data.last_active_date {
        None => 1,
        Some(last) => match (day.date - last).num_days() {
            0 => data.current_streak,
            1 => data.current_streak + 1,
            _ => 1,
        },
    };
    next.best_streak = next.best_streak.max(next.current_streak);
    next.last_active_date = Some(day.date);

    match next.history.iter_mut().find(|entry| entry.date == day.date) {
        Some(entry) => *entry = *day,
        None => next.history.push(*day),
    }
    let excess = next.history.len().saturating_sub(STREAK_HISTORY_CAP);
    next.history.drain(..excess);

    Ok(next)
}
