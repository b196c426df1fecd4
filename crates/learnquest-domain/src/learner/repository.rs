use async_trait::async_trait;

use super::Learner;
use crate::shared::{DomainError, LearnerId};

#[async_trait]
pub trait LearnerRepository: Send + Sync {
    async fn save(&self, learner: &Learner) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &LearnerId) -> Result<Option<Learner>, DomainError>;

    async fn find_all(&self) -> Result<Vec<Learner>, DomainError>;

    /// Learners ranked by total XP descending (ties broken by signup age).
    async fn find_top_by_xp(&self, limit: u32) -> Result<Vec<Learner>, DomainError>;

    async fn delete(&self, id: &LearnerId) -> Result<(), DomainError>;
}
