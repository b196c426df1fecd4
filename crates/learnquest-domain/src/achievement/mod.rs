mod repository;
mod rules;

pub use repository::AchievementRepository;
pub use rules::{newly_unlocked, AchievementCategory, AchievementRule};
