use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelProgressDto {
    pub learner_id: String,
    pub level: u32,
    pub level_title: String,
    pub total_xp: u64,
    pub xp_in_level: u64,
    pub xp_to_next_level: u64,
    pub progress_percent: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakDto {
    pub learner_id: String,
    pub current_streak_days: u32,
    pub longest_streak_days: u32,
    pub last_active_date: Option<String>, // ISO 8601 date (YYYY-MM-DD)
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntryDto {
    pub rank: u32,
    pub learner_id: String,
    pub display_name: String,
    pub total_xp: u64,
    pub level: u32,
    pub current_streak_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XpWindowDto {
    pub learner_id: String,
    pub days: u32,
    pub xp_earned: u64,
}
