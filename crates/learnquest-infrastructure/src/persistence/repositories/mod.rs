mod achievement_repo;
mod learner_repo;
mod lesson_repo;
mod progress_repo;

pub use achievement_repo::SqliteAchievementRepository;
pub use learner_repo::SqliteLearnerRepository;
pub use lesson_repo::SqliteLessonRepository;
pub use progress_repo::SqliteProgressRepository;
