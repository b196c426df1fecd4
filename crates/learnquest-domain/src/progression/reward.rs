use serde::{Deserialize, Serialize};

use crate::lesson::LessonAttempt;

/// Reward policy for converting a scored attempt into XP.
///
/// The two policies are alternatives, never composed: a calculator is
/// constructed with exactly one and applies it uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardPolicy {
    /// Linear scaling: `floor(base_xp * score / 100)`.
    ScoreScaled,
    /// Flat multiplier on the base reward by score band:
    /// >=90 -> 1.2, >=80 -> 1.1, >=70 -> 1.0, else 0.8.
    ScoreBand,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        RewardPolicy::ScoreScaled
    }
}

/// Pure XP reward computation for completed lesson attempts.
pub struct RewardCalculator {
    policy: RewardPolicy,
}

impl RewardCalculator {
    pub fn new(policy: RewardPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RewardPolicy {
        self.policy
    }

    /// XP earned for an attempt, before any streak bonus.
    pub fn xp_for_attempt(&self, attempt: &LessonAttempt, base_xp: u64) -> u64 {
        match self.policy {
            RewardPolicy::ScoreScaled => base_xp * attempt.score() as u64 / 100,
            RewardPolicy::ScoreBand => {
                let multiplier = match attempt.score() {
                    90..=100 => 1.2,
                    80..=89 => 1.1,
                    70..=79 => 1.0,
                    _ => 0.8,
                };
                (base_xp as f64 * multiplier).floor() as u64
            }
        }
    }

    /// XP earned for an attempt with the streak bonus applied on top.
    pub fn xp_for_attempt_with_streak(
        &self,
        attempt: &LessonAttempt,
        base_xp: u64,
        streak_days: u32,
    ) -> u64 {
        xp_with_streak_bonus(self.xp_for_attempt(attempt, base_xp), streak_days)
    }
}

/// Bonus multiplier tier for a streak length. Lower bounds are inclusive:
/// exactly 7 days already sits in the 2x tier.
pub fn streak_bonus_tier(streak_days: u32) -> u64 {
    match streak_days {
        0..=2 => 0,
        3..=6 => 1,
        7..=13 => 2,
        14..=29 => 3,
        _ => 5,
    }
}

/// Apply the streak bonus: `xp + xp * tier`.
pub fn xp_with_streak_bonus(xp: u64, streak_days: u32) -> u64 {
    xp + xp * streak_bonus_tier(streak_days)
}
