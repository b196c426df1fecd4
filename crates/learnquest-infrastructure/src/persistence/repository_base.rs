use learnquest_domain::shared::DomainError;
use sqlx::sqlite::{SqliteArguments, SqliteQueryResult, SqliteRow};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

/// Shared plumbing for SQLite repositories: query execution with a
/// context label folded into the DomainError on failure.
pub struct SqliteRepositoryBase {
    pool: Arc<SqlitePool>,
}

impl SqliteRepositoryBase {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn execute<'q>(
        &self,
        query: sqlx::query::Query<'q, sqlx::Sqlite, SqliteArguments<'q>>,
        context: &str,
    ) -> Result<SqliteQueryResult, DomainError> {
        query
            .execute(&*self.pool)
            .await
            .map_err(|e| DomainError::Repository(format!("{}: {}", context, e)))
    }

    pub async fn fetch_optional<'q, T>(
        &self,
        query: sqlx::query::QueryAs<'q, sqlx::Sqlite, T, SqliteArguments<'q>>,
        context: &str,
    ) -> Result<Option<T>, DomainError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        query
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| DomainError::Repository(format!("{}: {}", context, e)))
    }

    pub async fn fetch_all<'q, T>(
        &self,
        query: sqlx::query::QueryAs<'q, sqlx::Sqlite, T, SqliteArguments<'q>>,
        context: &str,
    ) -> Result<Vec<T>, DomainError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        query
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| DomainError::Repository(format!("{}: {}", context, e)))
    }
}
