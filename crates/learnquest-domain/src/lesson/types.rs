use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, LearnerId, LessonId, SubjectId};

pub const MAX_SCORE: u8 = 100;

/// A lesson as configured by content authors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    id: LessonId,
    subject_id: SubjectId,
    title: String,
    base_xp_reward: u64,
    is_active: bool,
}

impl Lesson {
    pub fn new(
        subject_id: SubjectId,
        title: String,
        base_xp_reward: u64,
    ) -> Result<Self, DomainError> {
        if title.trim().is_empty() {
            return Err(DomainError::Validation(
                "Lesson title cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            id: LessonId::new(),
            subject_id,
            title: title.trim().to_string(),
            base_xp_reward,
            is_active: true,
        })
    }

    pub fn restore(
        id: LessonId,
        subject_id: SubjectId,
        title: String,
        base_xp_reward: u64,
        is_active: bool,
    ) -> Self {
        Self {
            id,
            subject_id,
            title,
            base_xp_reward,
            is_active,
        }
    }

    pub fn id(&self) -> &LessonId {
        &self.id
    }

    pub fn subject_id(&self) -> &SubjectId {
        &self.subject_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn base_xp_reward(&self) -> u64 {
        self.base_xp_reward
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

/// A scored lesson completion, validated at construction.
///
/// Out-of-range scores are rejected, not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonAttempt {
    score: u8,
    time_spent_seconds: u32,
}

impl LessonAttempt {
    pub fn new(score: u8, time_spent_seconds: u32) -> Result<Self, DomainError> {
        if score > MAX_SCORE {
            return Err(DomainError::InvalidScore(format!(
                "Score must be between 0 and {}, got {}",
                MAX_SCORE, score
            )));
        }

        Ok(Self {
            score,
            time_spent_seconds,
        })
    }

    /// Build an attempt from an untrusted payload.
    pub fn from_raw(score: i64, time_spent_seconds: i64) -> Result<Self, DomainError> {
        if !(0..=MAX_SCORE as i64).contains(&score) {
            return Err(DomainError::InvalidScore(format!(
                "Score must be between 0 and {}, got {}",
                MAX_SCORE, score
            )));
        }
        if !(0..=u32::MAX as i64).contains(&time_spent_seconds) {
            return Err(DomainError::Validation(format!(
                "Time spent cannot be negative, got {}",
                time_spent_seconds
            )));
        }

        Self::new(score as u8, time_spent_seconds as u32)
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn time_spent_seconds(&self) -> u32 {
        self.time_spent_seconds
    }
}

/// Per-(learner, lesson) completion state.
///
/// Repeat completions keep the best score and never re-award XP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressRecord {
    learner_id: LearnerId,
    lesson_id: LessonId,
    subject_id: SubjectId,
    best_score: u8,
    xp_earned: u64,
    time_spent_seconds: u32,
    completed_at: DateTime<Utc>,
}

impl ProgressRecord {
    pub fn new(
        learner_id: LearnerId,
        lesson_id: LessonId,
        subject_id: SubjectId,
        attempt: &LessonAttempt,
        xp_earned: u64,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            learner_id,
            lesson_id,
            subject_id,
            best_score: attempt.score(),
            xp_earned,
            time_spent_seconds: attempt.time_spent_seconds(),
            completed_at,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        learner_id: LearnerId,
        lesson_id: LessonId,
        subject_id: SubjectId,
        best_score: u8,
        xp_earned: u64,
        time_spent_seconds: u32,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            learner_id,
            lesson_id,
            subject_id,
            best_score,
            xp_earned,
            time_spent_seconds,
            completed_at,
        }
    }

    /// Fold a repeat attempt into the record: best score wins, the latest
    /// time spent replaces the old one, the original XP award stands.
    pub fn revisit(&mut self, attempt: &LessonAttempt) {
        self.best_score = self.best_score.max(attempt.score());
        self.time_spent_seconds = attempt.time_spent_seconds();
    }

    pub fn learner_id(&self) -> &LearnerId {
        &self.learner_id
    }

    pub fn lesson_id(&self) -> &LessonId {
        &self.lesson_id
    }

    pub fn subject_id(&self) -> &SubjectId {
        &self.subject_id
    }

    pub fn best_score(&self) -> u8 {
        self.best_score
    }

    pub fn xp_earned(&self) -> u64 {
        self.xp_earned
    }

    pub fn time_spent_seconds(&self) -> u32 {
        self.time_spent_seconds
    }

    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}
