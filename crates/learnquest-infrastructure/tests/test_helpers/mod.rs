use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// In-memory SQLite pool with migrations applied. Single connection:
/// every handle to `:memory:` is its own database otherwise.
pub async fn setup_in_memory_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("connect in-memory sqlite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("run migrations");

    pool
}
