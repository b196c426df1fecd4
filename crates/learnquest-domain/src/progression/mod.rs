mod level_curve;
mod reward;
mod streak;


pub use level_curve::{
    level_for_xp, level_title, xp_requirement, xp_to_reach, LevelProgress, BASE_XP_PER_LEVEL,
    LEVEL_GROWTH,
};
pub use reward::{streak_bonus_tier, xp_with_streak_bonus, RewardCalculator, RewardPolicy};
pub use streak::{evaluate as evaluate_streak, record_activity, StreakState};
