//! Callback-query handler: drives the selection state machine
//!
//! Decodes the pressed button at the adapter boundary, advances the state
//! machine against the session, and renders the resulting transition. The
//! download branch routes through the worker pool and always resolves its
//! "Downloading…" placeholder — success, failure and expiry each have a
//! terminal edit, so no status message is ever stranded.

use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::MessageId;
use url::Url;

use crate::download::FetchRequest;
use crate::selection::{self, DeliveryMode, TargetSpec, Transition};
use crate::telegram::schema::HandlerDeps;
use crate::telegram::{action, menu, send};

const EXPIRED_TEXT: &str = "Session expired. Please send the link again.";
const RESTART_TEXT: &str = "Please send the link again to restart.";
const DOWNLOADING_TEXT: &str = "Downloading...";
const UPLOADING_TEXT: &str = "Uploading...";
const DOWNLOAD_FAILED_TEXT: &str = "Failed to download (check the size limit or FFmpeg).";
const DELIVERY_FAILED_TEXT: &str = "Downloaded, but sending the file failed. Please try again.";

/// Handles a button press from any of the selection menus.
pub async fn handle_callback(bot: Bot, q: CallbackQuery, deps: HandlerDeps) -> ResponseResult<()> {
    // Stop the client-side spinner no matter what happens next.
    let _ = bot.answer_callback_query(q.id.clone()).await;

    let Some(data) = q.data.as_deref() else { return Ok(()) };
    let chat_id = q.message.as_ref().map(|m| m.chat().id);
    let message_id = q.message.as_ref().map(|m| m.id());
    let (Some(chat_id), Some(message_id)) = (chat_id, message_id) else {
        return Ok(());
    };

    let Some(decoded) = action::decode(data) else {
        // Stale button from an older build, or foreign data. Ignore.
        log::warn!("Undecodable callback data from chat {}: {:?}", chat_id.0, data);
        return Ok(());
    };

    match selection::advance(decoded, deps.sessions.get(chat_id)) {
        Transition::Expired => {
            bot.edit_message_text(chat_id, message_id, EXPIRED_TEXT).await?;
        }
        Transition::DeliveryMenu { height } => {
            bot.edit_message_text(
                chat_id,
                message_id,
                format!("Selected {}p. How do you want to receive it?", height),
            )
            .reply_markup(menu::delivery_keyboard(height))
            .await?;
        }
        Transition::Restart => {
            bot.send_message(chat_id, RESTART_TEXT).await?;
        }
        Transition::StartDownload { url, target, mode } => {
            run_download(&bot, chat_id, message_id, &deps, url, target, mode).await?;
        }
    }

    Ok(())
}

/// Executes the committed download and delivers the result.
async fn run_download(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    deps: &HandlerDeps,
    url: Url,
    target: TargetSpec,
    mode: DeliveryMode,
) -> ResponseResult<()> {
    bot.edit_message_text(chat_id, message_id, DOWNLOADING_TEXT).await?;

    let source = Arc::clone(&deps.source);
    let request = FetchRequest::from_target(url.clone(), target);
    let fetched = deps.workers.dispatch(async move { source.fetch(&request).await }).await;

    match fetched {
        Ok(media) => {
            bot.send_message(chat_id, UPLOADING_TEXT).await?;

            let kind = selection::delivery_kind(target, mode);
            if let Err(e) = send::deliver_and_cleanup(bot, chat_id, &media, kind).await {
                // The file is already gone at this point; the user has to
                // press the button again for a fresh transfer.
                log::error!("Delivery failed for {}: {}", url, e);
                bot.send_message(chat_id, DELIVERY_FAILED_TEXT).await?;
            }
        }
        Err(e) => {
            // No automatic retry: the likely causes (size ceiling, ffmpeg)
            // are not self-correcting, and the session keeps its URL so the
            // user can press the button again deliberately.
            log::error!("Download failed for {}: {}", url, e);
            bot.edit_message_text(chat_id, message_id, DOWNLOAD_FAILED_TEXT).await?;
        }
    }

    Ok(())
}
