pub mod command_handler;
pub mod handlers;
pub mod progression_commands;

pub use command_handler::CommandHandler;
