use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{Lesson, ProgressRecord};
use crate::shared::{DomainError, LearnerId, LessonId, SubjectId};

#[async_trait]
pub trait LessonRepository: Send + Sync {
    async fn save(&self, lesson: &Lesson) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &LessonId) -> Result<Option<Lesson>, DomainError>;

    /// List active lessons for a subject, in title order.
    async fn find_active_by_subject(
        &self,
        subject_id: &SubjectId,
    ) -> Result<Vec<Lesson>, DomainError>;
}

#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Save (upsert) a progress record. One row per (learner, lesson).
    async fn upsert(&self, record: &ProgressRecord) -> Result<(), DomainError>;

    async fn find(
        &self,
        learner_id: &LearnerId,
        lesson_id: &LessonId,
    ) -> Result<Option<ProgressRecord>, DomainError>;

    async fn list_for_learner(
        &self,
        learner_id: &LearnerId,
    ) -> Result<Vec<ProgressRecord>, DomainError>;

    /// Total XP a learner earned from completions at or after `since`.
    async fn sum_xp_earned_since(
        &self,
        learner_id: &LearnerId,
        since: DateTime<Utc>,
    ) -> Result<u64, DomainError>;
}
