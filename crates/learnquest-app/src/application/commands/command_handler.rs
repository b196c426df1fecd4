use async_trait::async_trait;

use learnquest_domain::shared::DomainError;

/// Command handler abstraction for application write operations
#[async_trait]
pub trait CommandHandler<C>: Send + Sync {
    type Result;

    async fn handle(&self, cmd: C) -> Result<Self::Result, DomainError>;
}
