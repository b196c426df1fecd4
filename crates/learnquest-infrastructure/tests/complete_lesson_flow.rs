/// E2E Test: Complete Lesson Flow
///
/// This test validates the full end-to-end flow:
/// 1. Create a learner and a lesson
/// 2. Complete the lesson through the command handler
/// 3. Verify XP, streak and progress are persisted
/// 4. Verify achievements unlock and events are published
use std::sync::Arc;

use chrono::NaiveDate;

use learnquest_app::application::commands::handlers::CompleteLessonHandler;
use learnquest_app::application::commands::progression_commands::CompleteLessonCommand;
use learnquest_app::application::queries::ProgressionQueries;
use learnquest_app::CommandHandler;
use learnquest_domain::achievement::{AchievementCategory, AchievementRepository, AchievementRule};
use learnquest_domain::learner::{Learner, LearnerRepository};
use learnquest_domain::lesson::{Lesson, LessonRepository, ProgressRepository};
use learnquest_domain::progression::{RewardCalculator, RewardPolicy};
use learnquest_domain::shared::{Clock, FixedClock, SubjectId};
use learnquest_infrastructure::events::InMemoryEventBus;
use learnquest_infrastructure::persistence::repositories::{
    SqliteAchievementRepository, SqliteLearnerRepository, SqliteLessonRepository,
    SqliteProgressRepository,
};

mod test_helpers;

#[tokio::test]
async fn e2e_complete_lesson_flow() {
    // ============================================================
    // Setup: Database and Dependencies
    // ============================================================
    let pool = Arc::new(test_helpers::setup_in_memory_db().await);

    let learner_repo: Arc<dyn LearnerRepository> =
        Arc::new(SqliteLearnerRepository::new(pool.clone()));
    let lesson_repo: Arc<dyn LessonRepository> =
        Arc::new(SqliteLessonRepository::new(pool.clone()));
    let progress_repo = Arc::new(SqliteProgressRepository::new(pool.clone()));
    let achievement_repo: Arc<dyn AchievementRepository> =
        Arc::new(SqliteAchievementRepository::new(pool.clone()));

    let event_bus = Arc::new(InMemoryEventBus::new());
    let clock: Arc<dyn Clock> =
        Arc::new(FixedClock::from_date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()));

    let handler = CompleteLessonHandler::new(
        learner_repo.clone(),
        lesson_repo.clone(),
        progress_repo.clone(),
        achievement_repo.clone(),
        event_bus.clone(),
        clock.clone(),
        RewardCalculator::new(RewardPolicy::ScoreScaled),
    );

    // ============================================================
    // Step 1: Create Learner, Lesson and an Achievement Rule
    // ============================================================
    let learner = Learner::new("E2E Learner".to_string(), clock.now()).expect("create learner");
    learner_repo.save(&learner).await.expect("save learner");

    let lesson = Lesson::new(SubjectId::new(), "Intro to Algebra".to_string(), 1000)
        .expect("create lesson");
    lesson_repo.save(&lesson).await.expect("save lesson");

    let rule = AchievementRule::new(
        "First Lesson".to_string(),
        AchievementCategory::Lessons,
        1,
        50,
    )
    .expect("create rule");
    achievement_repo.save_rule(&rule).await.expect("save rule");

    // ============================================================
    // Step 2: Complete the Lesson
    // ============================================================
    let result = handler
        .handle(CompleteLessonCommand {
            learner_id: learner.id().as_str().to_string(),
            lesson_id: lesson.id().as_str().to_string(),
            score: 100,
            time_spent_seconds: 300,
        })
        .await
        .expect("lesson completion should succeed");

    assert_eq!(result.xp_earned, 1000);
    assert!(result.first_completion);
    assert!(result.leveled_up);
    assert_eq!(result.new_level, 2);
    assert_eq!(result.current_streak_days, 1);
    assert_eq!(result.unlocked_achievements.len(), 1);
    // 1000 from the lesson plus 50 from the unlock
    assert_eq!(result.new_total_xp, 1050);

    // ============================================================
    // Step 3: Verify Persisted State
    // ============================================================
    let saved = learner_repo
        .find_by_id(learner.id())
        .await
        .expect("find learner")
        .expect("learner should exist");
    assert_eq!(saved.total_xp(), 1050);
    assert_eq!(saved.level(), 2);
    assert_eq!(saved.current_streak_days(), 1);
    assert_eq!(saved.lessons_completed(), 1);

    let record = progress_repo
        .find(learner.id(), lesson.id())
        .await
        .expect("find progress")
        .expect("progress should exist");
    assert_eq!(record.best_score(), 100);
    assert_eq!(record.xp_earned(), 1000);

    let unlocked = achievement_repo
        .list_unlocked_ids(learner.id())
        .await
        .expect("list unlocks");
    assert!(unlocked.contains(rule.id()));

    // ============================================================
    // Step 4: Repeat Completion Awards Nothing New
    // ============================================================
    let repeat = handler
        .handle(CompleteLessonCommand {
            learner_id: learner.id().as_str().to_string(),
            lesson_id: lesson.id().as_str().to_string(),
            score: 80,
            time_spent_seconds: 100,
        })
        .await
        .expect("repeat completion should succeed");

    assert_eq!(repeat.xp_earned, 0);
    assert!(!repeat.first_completion);
    assert_eq!(repeat.new_total_xp, 1050);
    assert!(repeat.unlocked_achievements.is_empty());

    let record = progress_repo
        .find(learner.id(), lesson.id())
        .await
        .expect("find progress")
        .expect("progress should exist");
    // best score is kept
    assert_eq!(record.best_score(), 100);

    // ============================================================
    // Step 5: Verify Events and the Read Side
    // ============================================================
    let events = event_bus.published_event_names().await;
    assert!(events.iter().any(|name| name.contains("LessonCompleted")));
    assert!(events.iter().any(|name| name.contains("LearnerLeveledUp")));
    assert!(events
        .iter()
        .any(|name| name.contains("AchievementUnlocked")));

    let queries = ProgressionQueries::new(learner_repo.clone(), progress_repo.clone(), clock);

    let level = queries
        .get_level_progress(learner.id().as_str())
        .await
        .expect("level progress query");
    assert_eq!(level.level, 2);
    assert_eq!(level.total_xp, 1050);
    assert_eq!(level.level_title, "Beginner");

    let streak = queries
        .get_streak(learner.id().as_str())
        .await
        .expect("streak query");
    assert_eq!(streak.current_streak_days, 1);
    assert!(streak.is_active);

    let leaderboard = queries.get_leaderboard(10).await.expect("leaderboard query");
    assert_eq!(leaderboard.len(), 1);
    assert_eq!(leaderboard[0].rank, 1);
    assert_eq!(leaderboard[0].total_xp, 1050);

    let window = queries
        .get_xp_earned_since(learner.id().as_str(), 7)
        .await
        .expect("xp window query");
    assert_eq!(window.xp_earned, 1000);
}
