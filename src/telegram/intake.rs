//! Link intake: validation, session write, host classification
//!
//! Every text message lands here. Invalid input is answered with a prompt
//! and leaves the session untouched. A valid link supersedes whatever the
//! user had in flight, then either the YouTube quality-discovery path (a
//! probe on the worker pool behind an "Analyzing…" placeholder) or the
//! fixed generic menu is taken.

use std::sync::Arc;
use teloxide::prelude::*;

use crate::core::validation;
use crate::selection;
use crate::telegram::menu;
use crate::telegram::schema::HandlerDeps;

const INVALID_LINK_TEXT: &str = "Please send a valid link.";
const ANALYZING_TEXT: &str = "Analyzing YouTube link...";
const PROBE_FAILED_TEXT: &str = "Could not fetch video info.";
const CHOOSE_FORMAT_TEXT: &str = "Choose format:";

/// Handles an incoming text message.
pub async fn handle_message(bot: Bot, msg: Message, deps: HandlerDeps) -> ResponseResult<()> {
    let Some(text) = msg.text() else { return Ok(()) };
    if text.starts_with('/') {
        // Commands are routed by their own handler branch.
        return Ok(());
    }

    let chat_id = msg.chat.id;

    let url = match validation::parse_media_url(text) {
        Ok(url) => url,
        Err(e) => {
            log::debug!("Rejected input from chat {}: {}", chat_id.0, e);
            bot.send_message(chat_id, INVALID_LINK_TEXT).await?;
            return Ok(());
        }
    };

    // A new submission silently replaces the prior one, discarding any
    // in-progress selection.
    deps.sessions.put(chat_id, url.clone());

    if validation::is_youtube_url(&url) {
        let status = bot.send_message(chat_id, ANALYZING_TEXT).await?;

        let source = Arc::clone(&deps.source);
        let probe_url = url.clone();
        let probed = deps.workers.dispatch(async move { source.probe(&probe_url).await }).await;

        match probed {
            Ok(info) => {
                let heights = selection::quality_choices(info.heights);
                bot.edit_message_text(chat_id, status.id, menu::quality_prompt(info.title.as_deref()))
                    .reply_markup(menu::quality_keyboard(&heights))
                    .await?;
            }
            Err(e) => {
                // Session URL stays intact; the user may resend or retry.
                log::error!("Probe failed for {}: {}", url, e);
                bot.edit_message_text(chat_id, status.id, PROBE_FAILED_TEXT).await?;
            }
        }
    } else {
        bot.send_message(chat_id, CHOOSE_FORMAT_TEXT)
            .reply_markup(menu::generic_format_keyboard())
            .await?;
    }

    Ok(())
}
