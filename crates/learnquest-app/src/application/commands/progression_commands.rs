use learnquest_domain::progression::StreakState;

/// Raw lesson-completion payload. Fields arrive untrusted from the host
/// (HTTP body, IPC call) and are validated by the handler before any
/// domain logic runs.
#[derive(Debug, Clone)]
pub struct CompleteLessonCommand {
    pub learner_id: String,
    pub lesson_id: String,
    pub score: i64,
    pub time_spent_seconds: i64,
}

#[derive(Debug, Clone)]
pub struct CompleteLessonResult {
    pub xp_earned: u64,
    pub new_total_xp: u64,
    pub leveled_up: bool,
    pub new_level: u32,
    pub first_completion: bool,
    pub current_streak_days: u32,
    pub unlocked_achievements: Vec<UnlockedAchievement>,
}

#[derive(Debug, Clone)]
pub struct UnlockedAchievement {
    pub achievement_id: String,
    pub name: String,
    pub xp_reward: u64,
}

/// Daily activity check for one learner.
#[derive(Debug, Clone)]
pub struct RefreshStreakCommand {
    pub learner_id: String,
}

#[derive(Debug, Clone)]
pub struct RefreshStreakResult {
    pub streak: StreakState,
    pub streak_broken: bool,
}
