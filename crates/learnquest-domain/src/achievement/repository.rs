use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::AchievementRule;
use crate::shared::{AchievementId, DomainError, LearnerId};

#[async_trait]
pub trait AchievementRepository: Send + Sync {
    async fn save_rule(&self, rule: &AchievementRule) -> Result<(), DomainError>;

    async fn list_active_rules(&self) -> Result<Vec<AchievementRule>, DomainError>;

    async fn list_unlocked_ids(
        &self,
        learner_id: &LearnerId,
    ) -> Result<HashSet<AchievementId>, DomainError>;

    /// Record an unlock. Idempotent: re-recording an unlock is a no-op.
    async fn record_unlock(
        &self,
        learner_id: &LearnerId,
        achievement_id: &AchievementId,
        unlocked_at: DateTime<Utc>,
    ) -> Result<(), DomainError>;
}
