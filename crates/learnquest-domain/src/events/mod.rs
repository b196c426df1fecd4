use std::any::Any;

use async_trait::async_trait;

use crate::shared::DomainError;

pub mod progression_events;

pub use progression_events::{
    AchievementUnlocked, LearnerLeveledUp, LessonCompleted, StreakBroken,
};

/// Marker trait for domain events published by command handlers.
pub trait DomainEvent: Send + Sync {
    fn as_any(&self) -> &(dyn Any + Send + Sync);

    fn event_type_name(&self) -> &'static str;
}

#[async_trait]
pub trait EventBus: Send + Sync {
    async fn publish(&self, event: Box<dyn DomainEvent>) -> Result<(), DomainError>;
}
