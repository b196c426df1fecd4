use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;

use crate::events::DomainEvent;
use crate::shared::{AchievementId, LearnerId, LessonId};

/// Macro to implement DomainEvent trait with type name
macro_rules! impl_domain_event {
    ($type:ty) => {
        impl DomainEvent for $type {
            fn as_any(&self) -> &(dyn Any + Send + Sync) {
                self
            }

            fn event_type_name(&self) -> &'static str {
                std::any::type_name::<Self>()
            }
        }
    };
}

/// Event fired when a lesson completion is processed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonCompleted {
    pub learner_id: LearnerId,
    pub lesson_id: LessonId,
    pub score: u8,
    pub xp_earned: u64,
    pub first_completion: bool,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(LessonCompleted);

/// Event fired when accumulated XP crosses a level threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerLeveledUp {
    pub learner_id: LearnerId,
    pub new_level: u32,
    pub total_xp: u64,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(LearnerLeveledUp);

/// Event fired when an achievement rule unlocks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementUnlocked {
    pub learner_id: LearnerId,
    pub achievement_id: AchievementId,
    pub name: String,
    pub xp_reward: u64,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(AchievementUnlocked);

/// Event fired when a daily check resets a non-zero streak
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakBroken {
    pub learner_id: LearnerId,
    pub previous_streak_days: u32,
    pub occurred_at: DateTime<Utc>,
}

impl_domain_event!(StreakBroken);
