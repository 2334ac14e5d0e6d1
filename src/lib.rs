//! Vidra — Telegram bot that fetches video and audio from media links
//!
//! The bot walks a user from a pasted link through quality and delivery-mode
//! menus, runs the actual transfer through yt-dlp on a bounded worker pool,
//! sends the resulting file back and removes it from disk.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, input validation
//! - `session`: per-user table of the most recent submitted link
//! - `selection`: the selection state machine (pure, transport-free)
//! - `download`: media source abstraction, yt-dlp backend, worker pool
//! - `telegram`: bot integration, dispatcher schema and handlers

pub mod cli;
pub mod core;
pub mod download;
pub mod selection;
pub mod session;
pub mod telegram;

// Re-exports for convenience
pub use crate::core::{config, AppError};
pub use crate::download::{MediaSource, WorkerPool, YtDlpSource};
pub use crate::session::SessionStore;
