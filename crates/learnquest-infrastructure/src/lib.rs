// Infrastructure layer - SQLite persistence, logging and event bus
// implementations behind the domain ports.

pub mod events;
pub mod logging;
pub mod persistence;
