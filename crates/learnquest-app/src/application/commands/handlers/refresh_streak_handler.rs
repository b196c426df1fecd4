use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::progression_commands::*;
use learnquest_domain::events::{EventBus, StreakBroken};
use learnquest_domain::learner::LearnerRepository;
use learnquest_domain::shared::{Clock, DomainError, LearnerId};

/// Daily activity check: re-evaluates one learner's streak against the
/// injected clock and persists the outcome.
pub struct RefreshStreakHandler {
    learner_repo: Arc<dyn LearnerRepository>,
    event_bus: Arc<dyn EventBus>,
    clock: Arc<dyn Clock>,
}

impl RefreshStreakHandler {
    pub fn new(
        learner_repo: Arc<dyn LearnerRepository>,
        event_bus: Arc<dyn EventBus>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            learner_repo,
            event_bus,
            clock,
        }
    }
}

#[async_trait]
impl CommandHandler<RefreshStreakCommand> for RefreshStreakHandler {
    type Result = RefreshStreakResult;

    async fn handle(&self, cmd: RefreshStreakCommand) -> Result<Self::Result, DomainError> {
        if cmd.learner_id.trim().is_empty() {
            return Err(DomainError::MissingField("learner_id".to_string()));
        }

        let learner_id = LearnerId::from_string(&cmd.learner_id);
        let mut learner = self
            .learner_repo
            .find_by_id(&learner_id)
            .await?
            .ok_or_else(|| DomainError::LearnerNotFound(cmd.learner_id.clone()))?;

        let previous_streak = learner.current_streak_days();
        let streak = learner.refresh_streak(self.clock.today());
        self.learner_repo.save(&learner).await?;

        let streak_broken = previous_streak > 0 && streak.current_streak_days == 0;
        if streak_broken {
            info!(
                "[streak] reset learner={} previous={}",
                learner_id.as_str(),
                previous_streak
            );
            self.event_bus
                .publish(Box::new(StreakBroken {
                    learner_id,
                    previous_streak_days: previous_streak,
                    occurred_at: self.clock.now(),
                }))
                .await?;
        }

        Ok(RefreshStreakResult {
            streak,
            streak_broken,
        })
    }
}
