//! Telegram bot integration and handlers

pub mod action;
pub mod bot;
pub mod callback;
pub mod intake;
pub mod menu;
pub mod schema;
pub mod send;

// Re-exports for convenience
pub use bot::{create_bot, setup_bot_commands, Command};
pub use schema::{schema, HandlerDeps, HandlerError};
