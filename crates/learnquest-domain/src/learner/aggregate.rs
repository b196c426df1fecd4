use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::progression::{self, LevelProgress, StreakState};
use crate::shared::{DomainError, LearnerId};

/// Aggregate root for a learner's progression state.
///
/// `level` is cached for ranking queries but is re-derived from `total_xp`
/// on every XP mutation; XP is the only source of truth for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Learner {
    id: LearnerId,
    display_name: String,
    total_xp: u64,
    level: u32,
    current_streak_days: u32,
    longest_streak_days: u32,
    last_active_date: Option<NaiveDate>,
    lessons_completed: u32,
    time_spent_seconds: u64,
    created_at: DateTime<Utc>,
}

/// Read-only stats view used by achievement rule evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerSnapshot {
    pub total_xp: u64,
    pub current_streak_days: u32,
    pub lessons_completed: u32,
    pub time_spent_minutes: u64,
}

impl Learner {
    pub fn new(display_name: String, created_at: DateTime<Utc>) -> Result<Self, DomainError> {
        if display_name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Display name cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            id: LearnerId::new(),
            display_name: display_name.trim().to_string(),
            total_xp: 0,
            level: 1,
            current_streak_days: 0,
            longest_streak_days: 0,
            last_active_date: None,
            lessons_completed: 0,
            time_spent_seconds: 0,
            created_at,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: LearnerId,
        display_name: String,
        total_xp: u64,
        level: u32,
        current_streak_days: u32,
        longest_streak_days: u32,
        last_active_date: Option<NaiveDate>,
        lessons_completed: u32,
        time_spent_seconds: u64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            display_name,
            total_xp,
            level,
            current_streak_days,
            longest_streak_days,
            last_active_date,
            lessons_completed,
            time_spent_seconds,
            created_at,
        }
    }

    pub fn id(&self) -> &LearnerId {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn total_xp(&self) -> u64 {
        self.total_xp
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn current_streak_days(&self) -> u32 {
        self.current_streak_days
    }

    pub fn longest_streak_days(&self) -> u32 {
        self.longest_streak_days
    }

    pub fn last_active_date(&self) -> Option<NaiveDate> {
        self.last_active_date
    }

    pub fn lessons_completed(&self) -> u32 {
        self.lessons_completed
    }

    pub fn time_spent_seconds(&self) -> u64 {
        self.time_spent_seconds
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn update_display_name(&mut self, display_name: String) -> Result<(), DomainError> {
        if display_name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Display name cannot be empty".to_string(),
            ));
        }
        self.display_name = display_name.trim().to_string();
        Ok(())
    }

    /// Grant XP and re-derive the cached level. Total XP only ever grows.
    pub fn award_xp(&mut self, xp: u64) {
        self.total_xp = self.total_xp.saturating_add(xp);
        self.level = progression::level_for_xp(self.total_xp).level;
    }

    /// Position on the level curve, derived from total XP.
    pub fn level_progress(&self) -> LevelProgress {
        progression::level_for_xp(self.total_xp)
    }

    /// Fold a qualifying activity on `today` into the streak and time
    /// totals. Repeat completions of an already-finished lesson still
    /// count here.
    pub fn record_lesson_activity(&mut self, today: NaiveDate, time_spent_seconds: u32) {
        let next = progression::record_activity(&self.streak_fields(), today);
        self.apply_streak(next);
        self.time_spent_seconds += time_spent_seconds as u64;
    }

    /// Count a first-time lesson completion.
    pub fn mark_lesson_completed(&mut self) {
        self.lessons_completed += 1;
    }

    /// Re-evaluate the streak against `today` (the daily activity check).
    /// Returns the state after the longest-streak high-water mark is applied.
    pub fn refresh_streak(&mut self, today: NaiveDate) -> StreakState {
        let mut next =
            progression::evaluate_streak(self.last_active_date, self.current_streak_days, today);
        next.longest_streak_days = next.longest_streak_days.max(self.longest_streak_days);
        self.apply_streak(next);
        next
    }

    /// Streak view without mutation, for the display layer.
    pub fn evaluate_streak(&self, today: NaiveDate) -> StreakState {
        let mut state =
            progression::evaluate_streak(self.last_active_date, self.current_streak_days, today);
        state.longest_streak_days = state.longest_streak_days.max(self.longest_streak_days);
        state
    }

    pub fn snapshot(&self) -> LearnerSnapshot {
        LearnerSnapshot {
            total_xp: self.total_xp,
            current_streak_days: self.current_streak_days,
            lessons_completed: self.lessons_completed,
            time_spent_minutes: self.time_spent_seconds / 60,
        }
    }

    fn streak_fields(&self) -> StreakState {
        StreakState {
            current_streak_days: self.current_streak_days,
            longest_streak_days: self.longest_streak_days,
            last_active_date: self.last_active_date,
            is_active: self.current_streak_days > 0,
        }
    }

    fn apply_streak(&mut self, state: StreakState) {
        self.current_streak_days = state.current_streak_days;
        self.longest_streak_days = state.longest_streak_days;
        self.last_active_date = state.last_active_date;
    }
}
