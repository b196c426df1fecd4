use learnquest_infrastructure::persistence::Database;

#[tokio::test]
async fn database_bootstrap_creates_file_and_runs_migrations() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let db_path = dir.path().join("nested").join("learnquest.db");
    let db_path_str = db_path.to_str().expect("utf-8 path");

    let db = Database::new(db_path_str).await.expect("open database");
    db.run_migrations().await.expect("run migrations");

    assert!(db_path.exists());

    // migrated schema accepts a learner row
    sqlx::query(
        "INSERT INTO learners (id, display_name, created_at) VALUES ('l1', 'Ada', datetime('now'))",
    )
    .execute(db.pool())
    .await
    .expect("insert learner");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM learners")
        .fetch_one(db.pool())
        .await
        .expect("count learners");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn in_memory_database_migrates_cleanly() {
    let db = Database::in_memory().await.expect("open in-memory database");
    db.run_migrations().await.expect("run migrations");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM achievements")
        .fetch_one(db.pool())
        .await
        .expect("count achievements");
    assert_eq!(count, 0);
}
