use async_trait::async_trait;
use tracing::info;

use learnquest_domain::events::{DomainEvent, EventBus};
use learnquest_domain::shared::DomainError;

/// Event bus that records published events as structured log lines.
/// The default bus for hosts that have no subscribers of their own.
pub struct TracingEventBus;

impl TracingEventBus {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventBus for TracingEventBus {
    async fn publish(&self, event: Box<dyn DomainEvent>) -> Result<(), DomainError> {
        info!(
            target: "learnquest::events",
            event = event.event_type_name(),
            "domain event published"
        );
        Ok(())
    }
}

/// Event bus that retains published event type names, for tests.
pub struct InMemoryEventBus {
    events: tokio::sync::RwLock<Vec<&'static str>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self {
            events: tokio::sync::RwLock::new(Vec::new()),
        }
    }

    pub async fn published_event_names(&self) -> Vec<&'static str> {
        self.events.read().await.clone()
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish(&self, event: Box<dyn DomainEvent>) -> Result<(), DomainError> {
        let mut events = self.events.write().await;
        events.push(event.event_type_name());
        Ok(())
    }
}
