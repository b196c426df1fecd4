use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::progression_commands::*;
use learnquest_domain::achievement::{self, AchievementRepository};
use learnquest_domain::events::{
    AchievementUnlocked, EventBus, LearnerLeveledUp, LessonCompleted,
};
use learnquest_domain::learner::LearnerRepository;
use learnquest_domain::lesson::{LessonAttempt, LessonRepository, ProgressRecord, ProgressRepository};
use learnquest_domain::progression::RewardCalculator;
use learnquest_domain::shared::{Clock, DomainError, LearnerId, LessonId};

/// Lesson completion command handler: the single write path through which
/// XP, streak and achievement state change.
pub struct CompleteLessonHandler {
    learner_repo: Arc<dyn LearnerRepository>,
    lesson_repo: Arc<dyn LessonRepository>,
    progress_repo: Arc<dyn ProgressRepository>,
    achievement_repo: Arc<dyn AchievementRepository>,
    event_bus: Arc<dyn EventBus>,
    clock: Arc<dyn Clock>,
    rewards: RewardCalculator,
}

impl CompleteLessonHandler {
    pub fn new(
        learner_repo: Arc<dyn LearnerRepository>,
        lesson_repo: Arc<dyn LessonRepository>,
        progress_repo: Arc<dyn ProgressRepository>,
        achievement_repo: Arc<dyn AchievementRepository>,
        event_bus: Arc<dyn EventBus>,
        clock: Arc<dyn Clock>,
        rewards: RewardCalculator,
    ) -> Self {
        Self {
            learner_repo,
            lesson_repo,
            progress_repo,
            achievement_repo,
            event_bus,
            clock,
            rewards,
        }
    }
}

#[async_trait]
impl CommandHandler<CompleteLessonCommand> for CompleteLessonHandler {
    type Result = CompleteLessonResult;

    async fn handle(&self, cmd: CompleteLessonCommand) -> Result<Self::Result, DomainError> {
        info!(
            "Handling CompleteLessonCommand learner={} lesson={} score={}",
            cmd.learner_id, cmd.lesson_id, cmd.score
        );

        // 1. Validate the payload at the boundary
        if cmd.learner_id.trim().is_empty() {
            return Err(DomainError::MissingField("learner_id".to_string()));
        }
        if cmd.lesson_id.trim().is_empty() {
            return Err(DomainError::MissingField("lesson_id".to_string()));
        }
        let attempt = LessonAttempt::from_raw(cmd.score, cmd.time_spent_seconds)?;

        // 2. Load the lesson; completions only count against active lessons
        let lesson_id = LessonId::from_string(&cmd.lesson_id);
        let lesson = self
            .lesson_repo
            .find_by_id(&lesson_id)
            .await?
            .ok_or_else(|| DomainError::LessonNotFound(cmd.lesson_id.clone()))?;
        if !lesson.is_active() {
            return Err(DomainError::LessonInactive(cmd.lesson_id.clone()));
        }

        // 3. Load the learner
        let learner_id = LearnerId::from_string(&cmd.learner_id);
        let mut learner = self
            .learner_repo
            .find_by_id(&learner_id)
            .await?
            .ok_or_else(|| DomainError::LearnerNotFound(cmd.learner_id.clone()))?;

        let now = self.clock.now();
        let today = self.clock.today();

        // 4. Reward: XP is awarded once per lesson, on first completion,
        //    with the streak bonus taken from the streak as it stood
        //    before this attempt
        let existing = self.progress_repo.find(&learner_id, &lesson_id).await?;
        let first_completion = existing.is_none();
        let xp_earned = if first_completion {
            self.rewards.xp_for_attempt_with_streak(
                &attempt,
                lesson.base_xp_reward(),
                learner.current_streak_days(),
            )
        } else {
            0
        };

        // 5. Upsert progress; repeat attempts keep the best score
        let record = match existing {
            Some(mut record) => {
                record.revisit(&attempt);
                record
            }
            None => ProgressRecord::new(
                learner_id.clone(),
                lesson_id.clone(),
                lesson.subject_id().clone(),
                &attempt,
                xp_earned,
                now,
            ),
        };
        self.progress_repo.upsert(&record).await?;

        // 6. Fold the completion into the learner
        let level_before = learner.level();
        learner.record_lesson_activity(today, attempt.time_spent_seconds());
        if first_completion {
            learner.mark_lesson_completed();
        }
        learner.award_xp(xp_earned);

        // 7. Evaluate the achievement rule table and award unlock XP
        let rules = self.achievement_repo.list_active_rules().await?;
        let held = self.achievement_repo.list_unlocked_ids(&learner_id).await?;
        let unlocked_rules = achievement::newly_unlocked(&rules, &learner.snapshot(), &held);

        let mut unlocked = Vec::with_capacity(unlocked_rules.len());
        for rule in unlocked_rules {
            self.achievement_repo
                .record_unlock(&learner_id, rule.id(), now)
                .await?;
            learner.award_xp(rule.xp_reward());
            unlocked.push(UnlockedAchievement {
                achievement_id: rule.id().as_str().to_string(),
                name: rule.name().to_string(),
                xp_reward: rule.xp_reward(),
            });
        }

        // 8. Persist the learner
        self.learner_repo.save(&learner).await?;

        let leveled_up = learner.level() > level_before;

        // 9. Publish domain events
        self.event_bus
            .publish(Box::new(LessonCompleted {
                learner_id: learner_id.clone(),
                lesson_id,
                score: attempt.score(),
                xp_earned,
                first_completion,
                occurred_at: now,
            }))
            .await?;

        if leveled_up {
            self.event_bus
                .publish(Box::new(LearnerLeveledUp {
                    learner_id: learner_id.clone(),
                    new_level: learner.level(),
                    total_xp: learner.total_xp(),
                    occurred_at: now,
                }))
                .await?;
        }

        for achievement in &unlocked {
            self.event_bus
                .publish(Box::new(AchievementUnlocked {
                    learner_id: learner_id.clone(),
                    achievement_id: learnquest_domain::shared::AchievementId::from_string(
                        &achievement.achievement_id,
                    ),
                    name: achievement.name.clone(),
                    xp_reward: achievement.xp_reward,
                    occurred_at: now,
                }))
                .await?;
        }

        info!(
            "Lesson completed: learner={} xp_earned={} total_xp={} level={} streak={}",
            learner_id.as_str(),
            xp_earned,
            learner.total_xp(),
            learner.level(),
            learner.current_streak_days()
        );

        Ok(CompleteLessonResult {
            xp_earned,
            new_total_xp: learner.total_xp(),
            leveled_up,
            new_level: learner.level(),
            first_completion,
            current_streak_days: learner.current_streak_days(),
            unlocked_achievements: unlocked,
        })
    }
}
