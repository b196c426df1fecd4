use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use learnquest_domain::learner::{Learner, LearnerRepository};
use learnquest_domain::shared::{DomainError, LearnerId};

#[derive(FromRow)]
struct LearnerRow {
    id: String,
    display_name: String,
    total_xp: i64,
    level: i64,
    current_streak_days: i64,
    longest_streak_days: i64,
    last_active_date: Option<String>,
    lessons_completed: i64,
    time_spent_seconds: i64,
    created_at: DateTime<Utc>,
}

impl LearnerRow {
    fn try_into_learner(self) -> Result<Learner, DomainError> {
        if self.total_xp < 0 {
            return Err(DomainError::InvalidXp(format!(
                "Stored XP for learner {} is negative: {}",
                self.id, self.total_xp
            )));
        }

        let last_active_date = self
            .last_active_date
            .map(|s| {
                NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|e| {
                    DomainError::DataIntegrity(format!("Invalid last_active_date: {} ({})", s, e))
                })
            })
            .transpose()?;

        Ok(Learner::restore(
            LearnerId::from_string(&self.id),
            self.display_name,
            self.total_xp as u64,
            self.level.max(1) as u32,
            self.current_streak_days.max(0) as u32,
            self.longest_streak_days.max(0) as u32,
            last_active_date,
            self.lessons_completed.max(0) as u32,
            self.time_spent_seconds.max(0) as u64,
            self.created_at,
        ))
    }
}

pub struct SqliteLearnerRepository {
    base: SqliteRepositoryBase,
}

impl SqliteLearnerRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl LearnerRepository for SqliteLearnerRepository {
    async fn save(&self, learner: &Learner) -> Result<(), DomainError> {
        let query = r#"
            INSERT OR REPLACE INTO learners (
                id,
                display_name,
                total_xp,
                level,
                current_streak_days,
                longest_streak_days,
                last_active_date,
                lessons_completed,
                time_spent_seconds,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(learner.id().as_str())
                    .bind(learner.display_name())
                    .bind(learner.total_xp() as i64)
                    .bind(learner.level() as i64)
                    .bind(learner.current_streak_days() as i64)
                    .bind(learner.longest_streak_days() as i64)
                    .bind(
                        learner
                            .last_active_date()
                            .map(|d| d.format("%Y-%m-%d").to_string()),
                    )
                    .bind(learner.lessons_completed() as i64)
                    .bind(learner.time_spent_seconds() as i64)
                    .bind(learner.created_at()),
                "Save learner",
            )
            .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &LearnerId) -> Result<Option<Learner>, DomainError> {
        let query = r#"
            SELECT
                id,
                display_name,
                total_xp,
                level,
                current_streak_days,
                longest_streak_days,
                last_active_date,
                lessons_completed,
                time_spent_seconds,
                created_at
            FROM learners
            WHERE id = ?1
        "#;

        let row: Option<LearnerRow> = self
            .base
            .fetch_optional(sqlx::query_as(query).bind(id.as_str()), "Find learner by ID")
            .await?;

        row.map(|r| r.try_into_learner()).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Learner>, DomainError> {
        let query = r#"
            SELECT
                id,
                display_name,
                total_xp,
                level,
                current_streak_days,
                longest_streak_days,
                last_active_date,
                lessons_completed,
                time_spent_seconds,
                created_at
            FROM learners
            ORDER BY display_name ASC
        "#;

        let rows: Vec<LearnerRow> = self
            .base
            .fetch_all(sqlx::query_as(query), "List all learners")
            .await?;

        rows.into_iter().map(|r| r.try_into_learner()).collect()
    }

    async fn find_top_by_xp(&self, limit: u32) -> Result<Vec<Learner>, DomainError> {
        let query = r#"
            SELECT
                id,
                display_name,
                total_xp,
                level,
                current_streak_days,
                longest_streak_days,
                last_active_date,
                lessons_completed,
                time_spent_seconds,
                created_at
            FROM learners
            ORDER BY total_xp DESC, created_at ASC
            LIMIT ?1
        "#;

        let rows: Vec<LearnerRow> = self
            .base
            .fetch_all(
                sqlx::query_as(query).bind(limit as i64),
                "List top learners by XP",
            )
            .await?;

        rows.into_iter().map(|r| r.try_into_learner()).collect()
    }

    async fn delete(&self, id: &LearnerId) -> Result<(), DomainError> {
        self.base
            .execute(
                sqlx::query("DELETE FROM learners WHERE id = ?1").bind(id.as_str()),
                "Delete learner",
            )
            .await?;

        Ok(())
    }
}
