use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily activity streak for a learner.
///
/// Invariant: `longest_streak_days >= current_streak_days` after every
/// recomputation. Longest is a high-water mark and never decreases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    pub current_streak_days: u32,
    pub longest_streak_days: u32,
    pub last_active_date: Option<NaiveDate>,
    pub is_active: bool,
}

impl StreakState {
    /// State for a learner with no recorded activity.
    pub fn dormant() -> Self {
        Self {
            current_streak_days: 0,
            longest_streak_days: 0,
            last_active_date: None,
            is_active: false,
        }
    }
}

/// Decide whether a streak continues, rests on its grace day, or resets.
///
/// Gap arithmetic is calendar-day granular (midnight to midnight), not
/// elapsed hours. Activity today or yesterday keeps the streak alive;
/// two or more missed days reset it. A `last_active_date` in the future
/// (clock skew between writer and reader) counts as activity today.
pub fn evaluate(
    last_active_date: Option<NaiveDate>,
    prior_streak_days: u32,
    today: NaiveDate,
) -> StreakState {
    let Some(last_active) = last_active_date else {
        return StreakState::dormant();
    };

    let days_since_active = (today - last_active).num_days().max(0);

    if days_since_active <= 1 {
        StreakState {
            current_streak_days: prior_streak_days,
            longest_streak_days: prior_streak_days,
            last_active_date: Some(last_active),
            is_active: true,
        }
    } else {
        StreakState {
            current_streak_days: 0,
            longest_streak_days: prior_streak_days,
            last_active_date: Some(last_active),
            is_active: false,
        }
    }
}

/// Fold a qualifying activity on `today` into the streak.
///
/// Same-day activity is idempotent, activity on the day after the last
/// active date extends the run, anything else starts a fresh one-day run.
pub fn record_activity(state: &StreakState, today: NaiveDate) -> StreakState {
    let current = match state.last_active_date {
        // Already counted today; keep the run (a zero-length run still
        // becomes one day of activity).
        Some(last) if last == today => state.current_streak_days.max(1),
        Some(last) if (today - last).num_days() == 1 => state.current_streak_days + 1,
        _ => 1,
    };

    StreakState {
        current_streak_days: current,
        longest_streak_days: state.longest_streak_days.max(current),
        last_active_date: Some(today),
        is_active: true,
    }
}
