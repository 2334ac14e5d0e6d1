//! File delivery and cleanup
//!
//! A fetched file is consumed exactly once: one send attempt in the kind
//! the selection implies, then the file is removed from disk whether or not
//! the send succeeded. Keeping the file after a failed send would leak disk
//! over time; the trade-off (a delivery failure loses the only copy) is
//! accepted and documented.

use std::path::Path;
use teloxide::prelude::*;
use teloxide::types::InputFile;

use crate::core::error::AppError;
use crate::download::FetchedMedia;
use crate::selection::DeliveryKind;

/// Sends the file back in the given kind, then removes it from disk.
///
/// # Errors
/// Returns the transport error if the send failed; the file is removed in
/// either case.
pub async fn deliver_and_cleanup(
    bot: &Bot,
    chat_id: ChatId,
    media: &FetchedMedia,
    kind: DeliveryKind,
) -> Result<(), AppError> {
    log::info!(
        "Delivering {} ({} bytes) to chat {} as {:?}",
        media.path.display(),
        media.size_bytes,
        chat_id.0,
        kind
    );

    let input = InputFile::file(media.path.clone());
    let sent = match kind {
        DeliveryKind::Audio => bot.send_audio(chat_id, input).await.map(|_| ()),
        DeliveryKind::Document => bot.send_document(chat_id, input).await.map(|_| ()),
        DeliveryKind::Video => bot.send_video(chat_id, input).await.map(|_| ()),
    };

    cleanup_media(&media.path).await;

    sent.map_err(AppError::from)
}

/// Removes a delivered (or undeliverable) temporary file.
///
/// An already-missing file is not an error; anything else is logged and
/// swallowed — cleanup problems must not mask the delivery outcome.
pub async fn cleanup_media(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => log::debug!("Removed {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => log::warn!("Failed to remove {}: {}", path.display(), e),
    }
}
