use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::persistence::SqliteRepositoryBase;
use learnquest_domain::achievement::{AchievementCategory, AchievementRepository, AchievementRule};
use learnquest_domain::shared::{AchievementId, DomainError, LearnerId};

#[derive(FromRow)]
struct RuleRow {
    id: String,
    name: String,
    category: String,
    requirement: i64,
    xp_reward: i64,
    is_active: bool,
}

impl RuleRow {
    fn try_into_rule(self) -> Result<AchievementRule, DomainError> {
        let category = AchievementCategory::parse(&self.category)?;

        if self.requirement < 0 || self.xp_reward < 0 {
            return Err(DomainError::DataIntegrity(format!(
                "Negative requirement or reward on achievement {}",
                self.id
            )));
        }

        Ok(AchievementRule::restore(
            AchievementId::from_string(&self.id),
            self.name,
            category,
            self.requirement as u64,
            self.xp_reward as u64,
            self.is_active,
        ))
    }
}

pub struct SqliteAchievementRepository {
    base: SqliteRepositoryBase,
}

impl SqliteAchievementRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl AchievementRepository for SqliteAchievementRepository {
    async fn save_rule(&self, rule: &AchievementRule) -> Result<(), DomainError> {
        let query = r#"
            INSERT OR REPLACE INTO achievements (
                id,
                name,
                category,
                requirement,
                xp_reward,
                is_active
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(rule.id().as_str())
                    .bind(rule.name())
                    .bind(rule.category().as_str())
                    .bind(rule.requirement() as i64)
                    .bind(rule.xp_reward() as i64)
                    .bind(rule.is_active()),
                "Save achievement rule",
            )
            .await?;

        Ok(())
    }

    async fn list_active_rules(&self) -> Result<Vec<AchievementRule>, DomainError> {
        let query = r#"
            SELECT id, name, category, requirement, xp_reward, is_active
            FROM achievements
            WHERE is_active = 1
            ORDER BY category ASC, requirement ASC
        "#;

        let rows: Vec<RuleRow> = self
            .base
            .fetch_all(sqlx::query_as(query), "List active achievement rules")
            .await?;

        rows.into_iter().map(|r| r.try_into_rule()).collect()
    }

    async fn list_unlocked_ids(
        &self,
        learner_id: &LearnerId,
    ) -> Result<HashSet<AchievementId>, DomainError> {
        let query = r#"
            SELECT achievement_id
            FROM learner_achievements
            WHERE learner_id = ?1
        "#;

        let ids: Vec<String> = sqlx::query_scalar(query)
            .bind(learner_id.as_str())
            .fetch_all(self.base.pool())
            .await
            .map_err(|e| DomainError::Repository(format!("List unlocked achievements: {}", e)))?;

        Ok(ids
            .into_iter()
            .map(|id| AchievementId::from_string(&id))
            .collect())
    }

    async fn record_unlock(
        &self,
        learner_id: &LearnerId,
        achievement_id: &AchievementId,
        unlocked_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let query = r#"
            INSERT OR IGNORE INTO learner_achievements (
                learner_id,
                achievement_id,
                unlocked_at
            ) VALUES (?1, ?2, ?3)
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(learner_id.as_str())
                    .bind(achievement_id.as_str())
                    .bind(unlocked_at),
                "Record achievement unlock",
            )
            .await?;

        Ok(())
    }
}
