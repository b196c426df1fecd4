use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use learnquest_domain::lesson::{ProgressRecord, ProgressRepository};
use learnquest_domain::shared::{DomainError, LearnerId, LessonId, SubjectId};

#[derive(FromRow)]
struct ProgressRow {
    learner_id: String,
    lesson_id: String,
    subject_id: String,
    best_score: i64,
    xp_earned: i64,
    time_spent_seconds: i64,
    completed_at: DateTime<Utc>,
}

impl ProgressRow {
    fn try_into_record(self) -> Result<ProgressRecord, DomainError> {
        if !(0..=100).contains(&self.best_score) {
            return Err(DomainError::DataIntegrity(format!(
                "Stored score out of range for lesson {}: {}",
                self.lesson_id, self.best_score
            )));
        }
        if self.xp_earned < 0 {
            return Err(DomainError::InvalidXp(format!(
                "Stored XP earned for lesson {} is negative: {}",
                self.lesson_id, self.xp_earned
            )));
        }

        Ok(ProgressRecord::restore(
            LearnerId::from_string(&self.learner_id),
            LessonId::from_string(&self.lesson_id),
            SubjectId::from_string(&self.subject_id),
            self.best_score as u8,
            self.xp_earned as u64,
            self.time_spent_seconds.max(0) as u32,
            self.completed_at,
        ))
    }
}

pub struct SqliteProgressRepository {
    base: SqliteRepositoryBase,
}

impl SqliteProgressRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl ProgressRepository for SqliteProgressRepository {
    async fn upsert(&self, record: &ProgressRecord) -> Result<(), DomainError> {
        let query = r#"
            INSERT OR REPLACE INTO lesson_progress (
                learner_id,
                lesson_id,
                subject_id,
                best_score,
                xp_earned,
                time_spent_seconds,
                completed_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(record.learner_id().as_str())
                    .bind(record.lesson_id().as_str())
                    .bind(record.subject_id().as_str())
                    .bind(record.best_score() as i64)
                    .bind(record.xp_earned() as i64)
                    .bind(record.time_spent_seconds() as i64)
                    .bind(record.completed_at()),
                "Save lesson progress",
            )
            .await?;

        Ok(())
    }

    async fn find(
        &self,
        learner_id: &LearnerId,
        lesson_id: &LessonId,
    ) -> Result<Option<ProgressRecord>, DomainError> {
        let query = r#"
            SELECT
                learner_id,
                lesson_id,
                subject_id,
                best_score,
                xp_earned,
                time_spent_seconds,
                completed_at
            FROM lesson_progress
            WHERE learner_id = ?1 AND lesson_id = ?2
        "#;

        let row: Option<ProgressRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(query)
                    .bind(learner_id.as_str())
                    .bind(lesson_id.as_str()),
                "Find lesson progress",
            )
            .await?;

        row.map(|r| r.try_into_record()).transpose()
    }

    async fn list_for_learner(
        &self,
        learner_id: &LearnerId,
    ) -> Result<Vec<ProgressRecord>, DomainError> {
        let query = r#"
            SELECT
                learner_id,
                lesson_id,
                subject_id,
                best_score,
                xp_earned,
                time_spent_seconds,
                completed_at
            FROM lesson_progress
            WHERE learner_id = ?1
            ORDER BY completed_at ASC
        "#;

        let rows: Vec<ProgressRow> = self
            .base
            .fetch_all(
                sqlx::query_as(query).bind(learner_id.as_str()),
                "List lesson progress for learner",
            )
            .await?;

        rows.into_iter().map(|r| r.try_into_record()).collect()
    }

    async fn sum_xp_earned_since(
        &self,
        learner_id: &LearnerId,
        since: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        let query = r#"
            SELECT COALESCE(SUM(xp_earned), 0)
            FROM lesson_progress
            WHERE learner_id = ?1 AND completed_at >= ?2
        "#;

        let total: i64 = sqlx::query_scalar(query)
            .bind(learner_id.as_str())
            .bind(since)
            .fetch_one(self.base.pool())
            .await
            .map_err(|e| DomainError::Repository(format!("Sum XP earned since: {}", e)))?;

        Ok(total.max(0) as u64)
    }
}
