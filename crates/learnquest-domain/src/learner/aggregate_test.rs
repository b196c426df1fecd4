use chrono::{NaiveDate, Utc};

use super::aggregate::Learner;
use crate::shared::DomainError;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn fresh_learner() -> Learner {
    Learner::new("Ada".to_string(), Utc::now()).unwrap()
}

#[test]
fn new_learner_starts_at_level_one() {
    let learner = fresh_learner();

    assert_eq!(learner.total_xp(), 0);
    assert_eq!(learner.level(), 1);
    assert_eq!(learner.current_streak_days(), 0);
    assert_eq!(learner.lessons_completed(), 0);
    assert!(learner.last_active_date().is_none());
}

#[test]
fn blank_display_name_is_rejected() {
    let result = Learner::new("  ".to_string(), Utc::now());

    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[test]
fn awarding_xp_re_derives_the_level() {
    let mut learner = fresh_learner();

    learner.award_xp(999);
    assert_eq!(learner.level(), 1);

    learner.award_xp(1);
    assert_eq!(learner.total_xp(), 1000);
    assert_eq!(learner.level(), 2);
}

#[test]
fn lesson_activity_updates_streak_and_counters() {
    let mut learner = fresh_learner();

    learner.record_lesson_activity(day(2024, 3, 10), 90);
    learner.mark_lesson_completed();
    learner.record_lesson_activity(day(2024, 3, 11), 120);
    learner.mark_lesson_completed();

    assert_eq!(learner.current_streak_days(), 2);
    assert_eq!(learner.longest_streak_days(), 2);
    assert_eq!(learner.lessons_completed(), 2);
    assert_eq!(learner.time_spent_seconds(), 210);
    assert_eq!(learner.last_active_date(), Some(day(2024, 3, 11)));
}

#[test]
fn same_day_lessons_count_once_for_the_streak() {
    let mut learner = fresh_learner();

    learner.record_lesson_activity(day(2024, 3, 10), 60);
    learner.record_lesson_activity(day(2024, 3, 10), 60);

    assert_eq!(learner.current_streak_days(), 1);
    assert_eq!(learner.time_spent_seconds(), 120);
}

#[test]
fn refresh_after_missed_days_resets_but_keeps_longest() {
    let mut learner = fresh_learner();
    for offset in 0..5 {
        learner.record_lesson_activity(day(2024, 3, 1 + offset), 60);
    }
    assert_eq!(learner.current_streak_days(), 5);

    let state = learner.refresh_streak(day(2024, 3, 10));

    assert_eq!(state.current_streak_days, 0);
    assert!(!state.is_active);
    assert_eq!(learner.current_streak_days(), 0);
    assert_eq!(learner.longest_streak_days(), 5);
}

#[test]
fn longest_streak_never_decreases_across_refreshes() {
    let mut learner = fresh_learner();
    for offset in 0..7 {
        learner.record_lesson_activity(day(2024, 3, 1 + offset), 60);
    }

    learner.refresh_streak(day(2024, 3, 20));
    learner.record_lesson_activity(day(2024, 3, 20), 60);
    learner.refresh_streak(day(2024, 3, 21));
    learner.refresh_streak(day(2024, 4, 2));

    assert_eq!(learner.longest_streak_days(), 7);
}

#[test]
fn display_evaluation_does_not_mutate() {
    let mut learner = fresh_learner();
    learner.record_lesson_activity(day(2024, 3, 1), 60);

    let state = learner.evaluate_streak(day(2024, 3, 9));

    assert_eq!(state.current_streak_days, 0);
    // the aggregate itself is untouched until a refresh is applied
    assert_eq!(learner.current_streak_days(), 1);
}

#[test]
fn snapshot_reports_minutes() {
    let mut learner = fresh_learner();
    learner.record_lesson_activity(day(2024, 3, 1), 150);
    learner.mark_lesson_completed();
    learner.award_xp(42);

    let snapshot = learner.snapshot();

    assert_eq!(snapshot.total_xp, 42);
    assert_eq!(snapshot.lessons_completed, 1);
    assert_eq!(snapshot.time_spent_minutes, 2);
}
