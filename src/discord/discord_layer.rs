// Discord layer - commands and event handlers.

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "moderation/message_handler.rs"]
pub mod message_handler;

// Re-export shared types for convenience
pub use commands::{Data, Error};
