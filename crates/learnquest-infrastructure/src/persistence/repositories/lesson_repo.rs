use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use learnquest_domain::lesson::{Lesson, LessonRepository};
use learnquest_domain::shared::{DomainError, LessonId, SubjectId};

#[derive(FromRow)]
struct LessonRow {
    id: String,
    subject_id: String,
    title: String,
    base_xp_reward: i64,
    is_active: bool,
}

impl LessonRow {
    fn try_into_lesson(self) -> Result<Lesson, DomainError> {
        if self.base_xp_reward < 0 {
            return Err(DomainError::InvalidXp(format!(
                "Stored base XP reward for lesson {} is negative: {}",
                self.id, self.base_xp_reward
            )));
        }

        Ok(Lesson::restore(
            LessonId::from_string(&self.id),
            SubjectId::from_string(&self.subject_id),
            self.title,
            self.base_xp_reward as u64,
            self.is_active,
        ))
    }
}

pub struct SqliteLessonRepository {
    base: SqliteRepositoryBase,
}

impl SqliteLessonRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl LessonRepository for SqliteLessonRepository {
    async fn save(&self, lesson: &Lesson) -> Result<(), DomainError> {
        let query = r#"
            INSERT OR REPLACE INTO lessons (
                id,
                subject_id,
                title,
                base_xp_reward,
                is_active
            ) VALUES (?1, ?2, ?3, ?4, ?5)
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(lesson.id().as_str())
                    .bind(lesson.subject_id().as_str())
                    .bind(lesson.title())
                    .bind(lesson.base_xp_reward() as i64)
                    .bind(lesson.is_active()),
                "Save lesson",
            )
            .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &LessonId) -> Result<Option<Lesson>, DomainError> {
        let query = r#"
            SELECT id, subject_id, title, base_xp_reward, is_active
            FROM lessons
            WHERE id = ?1
        "#;

        let row: Option<LessonRow> = self
            .base
            .fetch_optional(sqlx::query_as(query).bind(id.as_str()), "Find lesson by ID")
            .await?;

        row.map(|r| r.try_into_lesson()).transpose()
    }

    async fn find_active_by_subject(
        &self,
        subject_id: &SubjectId,
    ) -> Result<Vec<Lesson>, DomainError> {
        let query = r#"
            SELECT id, subject_id, title, base_xp_reward, is_active
            FROM lessons
            WHERE subject_id = ?1 AND is_active = 1
            ORDER BY title ASC
        "#;

        let rows: Vec<LessonRow> = self
            .base
            .fetch_all(
                sqlx::query_as(query).bind(subject_id.as_str()),
                "List active lessons by subject",
            )
            .await?;

        rows.into_iter().map(|r| r.try_into_lesson()).collect()
    }
}
