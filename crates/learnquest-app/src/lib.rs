// Application layer - command handlers, queries and services over the
// domain ports. Hosts (HTTP routes, desktop shells) compose these.

pub mod application;

pub use application::commands::CommandHandler;
