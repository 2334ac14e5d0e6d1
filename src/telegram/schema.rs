//! Dispatcher schema and handler dependencies
//!
//! The same handler tree is used in production and can be driven by
//! integration tests. All mutable shared state (the session table) and all
//! collaborators (media source, worker pool) live in `HandlerDeps` and are
//! injected — nothing here is a global.

use std::sync::Arc;

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;

use crate::download::{MediaSource, WorkerPool};
use crate::session::SessionStore;
use crate::telegram::bot::{Command, WELCOME_TEXT};
use crate::telegram::{callback, intake};

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub sessions: Arc<SessionStore>,
    pub source: Arc<dyn MediaSource>,
    pub workers: Arc<WorkerPool>,
}

impl HandlerDeps {
    pub fn new(sessions: Arc<SessionStore>, source: Arc<dyn MediaSource>, workers: Arc<WorkerPool>) -> Self {
        Self {
            sessions,
            source,
            workers,
        }
    }
}

/// Creates the dispatcher handler tree for the bot.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_messages = deps.clone();
    let deps_callbacks = deps;

    dptree::entry()
        .branch(command_handler())
        .branch(message_handler(deps_messages))
        .branch(callback_handler(deps_callbacks))
}

/// Handler for bot commands (/start, /help)
fn command_handler() -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        |bot: Bot, msg: Message, cmd: Command| async move {
            log::info!("Received command {:?} from chat {}", cmd, msg.chat.id);
            match cmd {
                Command::Start | Command::Help => {
                    bot.send_message(msg.chat.id, WELCOME_TEXT).await?;
                }
            }
            Ok(())
        },
    ))
}

/// Handler for regular text messages (links)
fn message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.text().is_some())
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move {
                // A failure here must never take the dispatcher down.
                if let Err(e) = intake::handle_message(bot, msg, deps).await {
                    log::error!("Error handling message: {:?}", e);
                }
                Ok(())
            }
        })
}

/// Handler for callback queries (inline keyboard buttons)
fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
        let deps = deps.clone();
        async move {
            if let Err(e) = callback::handle_callback(bot, q, deps).await {
                log::error!("Error handling callback: {:?}", e);
            }
            Ok(())
        }
    })
}
