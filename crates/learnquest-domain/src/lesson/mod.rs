mod repository;
mod types;


pub use repository::{LessonRepository, ProgressRepository};
pub use types::{Lesson, LessonAttempt, ProgressRecord, MAX_SCORE};
