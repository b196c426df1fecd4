use chrono::Days;
use log::info;
use std::sync::Arc;

use crate::application::dtos::{LeaderboardEntryDto, LevelProgressDto, StreakDto, XpWindowDto};
use learnquest_domain::learner::LearnerRepository;
use learnquest_domain::lesson::ProgressRepository;
use learnquest_domain::progression;
use learnquest_domain::shared::{Clock, DomainError, LearnerId};

/// Read side for progress bars, streak badges and leaderboards.
///
/// Works over already-persisted values only; level and streak views are
/// re-derived through the domain functions, never trusted from storage.
pub struct ProgressionQueries {
    learner_repo: Arc<dyn LearnerRepository>,
    progress_repo: Arc<dyn ProgressRepository>,
    clock: Arc<dyn Clock>,
}

impl ProgressionQueries {
    pub fn new(
        learner_repo: Arc<dyn LearnerRepository>,
        progress_repo: Arc<dyn ProgressRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            learner_repo,
            progress_repo,
            clock,
        }
    }

    /// Level and in-level progress for one learner
    pub async fn get_level_progress(
        &self,
        learner_id: &str,
    ) -> Result<LevelProgressDto, DomainError> {
        let learner = self.load_learner(learner_id).await?;
        let progress = learner.level_progress();

        Ok(LevelProgressDto {
            learner_id: learner.id().as_str().to_string(),
            level: progress.level,
            level_title: progression::level_title(progress.level).to_string(),
            total_xp: learner.total_xp(),
            xp_in_level: progress.xp_in_level,
            xp_to_next_level: progress.xp_to_next_level,
            progress_percent: progress.progress_percent,
        })
    }

    /// Current streak view for one learner, evaluated against today
    pub async fn get_streak(&self, learner_id: &str) -> Result<StreakDto, DomainError> {
        let learner = self.load_learner(learner_id).await?;
        let state = learner.evaluate_streak(self.clock.today());

        Ok(StreakDto {
            learner_id: learner.id().as_str().to_string(),
            current_streak_days: state.current_streak_days,
            longest_streak_days: state.longest_streak_days,
            last_active_date: state
                .last_active_date
                .map(|d| d.format("%Y-%m-%d").to_string()),
            is_active: state.is_active,
        })
    }

    /// Learners ranked by total XP
    pub async fn get_leaderboard(
        &self,
        limit: u32,
    ) -> Result<Vec<LeaderboardEntryDto>, DomainError> {
        let learners = self.learner_repo.find_top_by_xp(limit).await?;

        let entries: Vec<LeaderboardEntryDto> = learners
            .iter()
            .enumerate()
            .map(|(index, learner)| LeaderboardEntryDto {
                rank: index as u32 + 1,
                learner_id: learner.id().as_str().to_string(),
                display_name: learner.display_name().to_string(),
                total_xp: learner.total_xp(),
                level: learner.level(),
                current_streak_days: learner.current_streak_days(),
            })
            .collect();

        info!("[leaderboard] entries={} limit={}", entries.len(), limit);
        Ok(entries)
    }

    /// XP earned from completions in the trailing `days` window
    pub async fn get_xp_earned_since(
        &self,
        learner_id: &str,
        days: u32,
    ) -> Result<XpWindowDto, DomainError> {
        let learner = self.load_learner(learner_id).await?;
        let since = self.clock.now() - Days::new(days as u64);
        let xp_earned = self
            .progress_repo
            .sum_xp_earned_since(learner.id(), since)
            .await?;

        Ok(XpWindowDto {
            learner_id: learner.id().as_str().to_string(),
            days,
            xp_earned,
        })
    }

    async fn load_learner(
        &self,
        learner_id: &str,
    ) -> Result<learnquest_domain::learner::Learner, DomainError> {
        self.learner_repo
            .find_by_id(&LearnerId::from_string(learner_id))
            .await?
            .ok_or_else(|| DomainError::LearnerNotFound(learner_id.to_string()))
    }
}
