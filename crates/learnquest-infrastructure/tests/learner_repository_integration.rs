use chrono::{NaiveDate, Utc};
use std::sync::Arc;

use learnquest_domain::learner::{Learner, LearnerRepository};
use learnquest_domain::shared::DomainError;
use learnquest_infrastructure::persistence::repositories::SqliteLearnerRepository;

mod test_helpers;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn learner_repo_save_and_find_round_trip() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteLearnerRepository::new(Arc::new(pool));

    let mut learner = Learner::new("Ada".to_string(), Utc::now()).expect("create learner");
    learner.record_lesson_activity(day(2024, 3, 10), 120);
    learner.mark_lesson_completed();
    learner.award_xp(1500);

    repo.save(&learner).await.expect("save learner");

    let found = repo
        .find_by_id(learner.id())
        .await
        .expect("find learner")
        .expect("learner should exist");

    assert_eq!(found.display_name(), "Ada");
    assert_eq!(found.total_xp(), 1500);
    assert_eq!(found.level(), 2);
    assert_eq!(found.current_streak_days(), 1);
    assert_eq!(found.last_active_date(), Some(day(2024, 3, 10)));
    assert_eq!(found.lessons_completed(), 1);
    assert_eq!(found.time_spent_seconds(), 120);
}

#[tokio::test]
async fn learner_repo_save_is_an_upsert() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteLearnerRepository::new(Arc::new(pool));

    let mut learner = Learner::new("Grace".to_string(), Utc::now()).expect("create learner");
    repo.save(&learner).await.expect("first save");

    learner.award_xp(42);
    repo.save(&learner).await.expect("second save");

    let found = repo
        .find_by_id(learner.id())
        .await
        .expect("find learner")
        .expect("learner should exist");
    assert_eq!(found.total_xp(), 42);
}

#[tokio::test]
async fn learner_repo_ranks_by_xp_with_signup_tiebreak() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteLearnerRepository::new(Arc::new(pool));

    let names_and_xp = [("Low", 10u64), ("High", 5000), ("Mid", 900)];
    for (name, xp) in names_and_xp {
        let mut learner = Learner::new(name.to_string(), Utc::now()).expect("create learner");
        learner.award_xp(xp);
        repo.save(&learner).await.expect("save learner");
    }

    let top = repo.find_top_by_xp(2).await.expect("leaderboard query");

    assert_eq!(top.len(), 2);
    assert_eq!(top[0].display_name(), "High");
    assert_eq!(top[1].display_name(), "Mid");
}

#[tokio::test]
async fn learner_repo_rejects_negative_stored_xp() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteLearnerRepository::new(Arc::new(pool.clone()));

    let learner = Learner::new("Corrupt".to_string(), Utc::now()).expect("create learner");
    repo.save(&learner).await.expect("save learner");

    sqlx::query("UPDATE learners SET total_xp = -5 WHERE id = ?1")
        .bind(learner.id().as_str())
        .execute(&pool)
        .await
        .expect("corrupt row");

    let result = repo.find_by_id(learner.id()).await;
    assert!(matches!(result, Err(DomainError::InvalidXp(_))));
}

#[tokio::test]
async fn learner_repo_delete_removes_the_row() {
    let pool = test_helpers::setup_in_memory_db().await;
    let repo = SqliteLearnerRepository::new(Arc::new(pool));

    let learner = Learner::new("Gone".to_string(), Utc::now()).expect("create learner");
    repo.save(&learner).await.expect("save learner");
    repo.delete(learner.id()).await.expect("delete learner");

    let found = repo.find_by_id(learner.id()).await.expect("find learner");
    assert!(found.is_none());
}
