use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::learner::LearnerSnapshot;
use crate::shared::{AchievementId, DomainError};

/// Stat an achievement gates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
    Lessons,
    Xp,
    Streak,
    TimeMinutes,
}

impl AchievementCategory {
    /// Extract the gated stat from a learner snapshot.
    pub fn stat(&self, snapshot: &LearnerSnapshot) -> u64 {
        match self {
            AchievementCategory::Lessons => snapshot.lessons_completed as u64,
            AchievementCategory::Xp => snapshot.total_xp,
            AchievementCategory::Streak => snapshot.current_streak_days as u64,
            AchievementCategory::TimeMinutes => snapshot.time_spent_minutes,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementCategory::Lessons => "lessons",
            AchievementCategory::Xp => "xp",
            AchievementCategory::Streak => "streak",
            AchievementCategory::TimeMinutes => "time_minutes",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "lessons" => Ok(AchievementCategory::Lessons),
            "xp" => Ok(AchievementCategory::Xp),
            "streak" => Ok(AchievementCategory::Streak),
            "time_minutes" => Ok(AchievementCategory::TimeMinutes),
            other => Err(DomainError::DataIntegrity(format!(
                "Unknown achievement category: {}",
                other
            ))),
        }
    }
}

/// One row of the declarative unlock table: an achievement is unlocked
/// as soon as the stat its category selects reaches `requirement`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementRule {
    id: AchievementId,
    name: String,
    category: AchievementCategory,
    requirement: u64,
    xp_reward: u64,
    is_active: bool,
}

impl AchievementRule {
    pub fn new(
        name: String,
        category: AchievementCategory,
        requirement: u64,
        xp_reward: u64,
    ) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Achievement name cannot be empty".to_string(),
            ));
        }
        if requirement == 0 {
            return Err(DomainError::Validation(
                "Achievement requirement must be positive".to_string(),
            ));
        }

        Ok(Self {
            id: AchievementId::new(),
            name: name.trim().to_string(),
            category,
            requirement,
            xp_reward,
            is_active: true,
        })
    }

    pub fn restore(
        id: AchievementId,
        name: String,
        category: AchievementCategory,
        requirement: u64,
        xp_reward: u64,
        is_active: bool,
    ) -> Self {
        Self {
            id,
            name,
            category,
            requirement,
            xp_reward,
            is_active,
        }
    }

    pub fn id(&self) -> &AchievementId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> AchievementCategory {
        self.category
    }

    pub fn requirement(&self) -> u64 {
        self.requirement
    }

    pub fn xp_reward(&self) -> u64 {
        self.xp_reward
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_met(&self, snapshot: &LearnerSnapshot) -> bool {
        self.category.stat(snapshot) >= self.requirement
    }
}

/// Evaluate the rule table against a snapshot, skipping rules the learner
/// already holds. Evaluation is generic over categories; adding a category
/// touches only `AchievementCategory::stat`.
pub fn newly_unlocked<'a>(
    rules: &'a [AchievementRule],
    snapshot: &LearnerSnapshot,
    already_unlocked: &HashSet<AchievementId>,
) -> Vec<&'a AchievementRule> {
    rules
        .iter()
        .filter(|rule| rule.is_active())
        .filter(|rule| !already_unlocked.contains(rule.id()))
        .filter(|rule| rule.is_met(snapshot))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> LearnerSnapshot {
        LearnerSnapshot {
            total_xp: 1500,
            current_streak_days: 7,
            lessons_completed: 10,
            time_spent_minutes: 45,
        }
    }

    fn rule(name: &str, category: AchievementCategory, requirement: u64) -> AchievementRule {
        AchievementRule::new(name.to_string(), category, requirement, 25).unwrap()
    }

    #[test]
    fn unlocks_every_category_that_meets_its_requirement() {
        let rules = vec![
            rule("First Ten", AchievementCategory::Lessons, 10),
            rule("XP Collector", AchievementCategory::Xp, 1000),
            rule("Week Streak", AchievementCategory::Streak, 7),
            rule("Marathon", AchievementCategory::TimeMinutes, 60),
        ];

        let unlocked = newly_unlocked(&rules, &snapshot(), &HashSet::new());

        let names: Vec<&str> = unlocked.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["First Ten", "XP Collector", "Week Streak"]);
    }

    #[test]
    fn already_held_achievements_are_skipped() {
        let rules = vec![rule("First Ten", AchievementCategory::Lessons, 10)];
        let held: HashSet<_> = rules.iter().map(|r| r.id().clone()).collect();

        assert!(newly_unlocked(&rules, &snapshot(), &held).is_empty());
    }

    #[test]
    fn inactive_rules_never_fire() {
        let mut r = rule("Retired", AchievementCategory::Xp, 1);
        r = AchievementRule::restore(
            r.id().clone(),
            r.name().to_string(),
            r.category(),
            r.requirement(),
            r.xp_reward(),
            false,
        );

        assert!(newly_unlocked(&[r], &snapshot(), &HashSet::new()).is_empty());
    }

    #[test]
    fn requirement_boundary_is_inclusive() {
        let rules = vec![rule("Week Streak", AchievementCategory::Streak, 7)];
        let unlocked = newly_unlocked(&rules, &snapshot(), &HashSet::new());

        assert_eq!(unlocked.len(), 1);
    }

    #[test]
    fn zero_requirement_is_rejected() {
        let result = AchievementRule::new("Freebie".to_string(), AchievementCategory::Xp, 0, 0);

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn category_round_trips_through_strings() {
        for category in [
            AchievementCategory::Lessons,
            AchievementCategory::Xp,
            AchievementCategory::Streak,
            AchievementCategory::TimeMinutes,
        ] {
            assert_eq!(
                AchievementCategory::parse(category.as_str()).unwrap(),
                category
            );
        }

        assert!(AchievementCategory::parse("badges").is_err());
    }
}
