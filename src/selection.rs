//! Selection state machine
//!
//! Pure logic for the two-step download flow: a button press becomes a
//! [`SelectionAction`], and [`advance`] decides the next step against the
//! URL currently stored for the user. The split between the quality step
//! and the download step exists so the expensive transfer is deferred until
//! the delivery mode is also known.
//!
//! This module never touches the transport: raw callback strings are
//! decoded into `SelectionAction` at the adapter boundary
//! (`telegram::action`), and the transitions returned here are rendered
//! back into messages and keyboards by the callback handler.

use url::Url;

/// Heights the quality menu is allowed to offer. Probed streams outside
/// this set are dropped so the menu cannot grow unboundedly with exotic
/// heights.
pub const COMMON_HEIGHTS: [u32; 4] = [1080, 720, 480, 360];

/// Streams below this height are never offered.
pub const MIN_HEIGHT: u32 = 144;

/// What the user asked to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSpec {
    /// Video capped at this height
    Height(u32),
    /// Best available video
    Best,
    /// Audio only, no resolution ceiling
    Audio,
}

/// How a successfully downloaded file should be sent back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Inline playable item
    Stream,
    /// Generic document
    File,
}

/// A decoded button press. Carries no URL; the state machine resolves the
/// URL from the session, never from the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionAction {
    /// User picked a video height (first step of the YouTube path)
    Quality(u32),
    /// User committed to a download
    Download { target: TargetSpec, mode: DeliveryMode },
    /// User tapped "back"
    Restart,
}

/// Next step decided by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Show the delivery-mode menu for the chosen height
    DeliveryMenu { height: u32 },
    /// Hand the resolved URL to the download collaborator
    StartDownload {
        url: Url,
        target: TargetSpec,
        mode: DeliveryMode,
    },
    /// Tell the user to resend the link; the session keeps its URL
    Restart,
    /// The session holds no URL (superseded or never created)
    Expired,
}

/// Advances the state machine by one button press.
///
/// A missing session URL always yields [`Transition::Expired`], regardless
/// of the action — the uniform fallback for stale buttons after a session
/// has been overwritten or lost. Re-issuing the same `Quality` action
/// yields the same menu both times; nothing is consumed until `Download`.
pub fn advance(action: SelectionAction, session_url: Option<Url>) -> Transition {
    let Some(url) = session_url else {
        return Transition::Expired;
    };

    match action {
        SelectionAction::Quality(height) => Transition::DeliveryMenu { height },
        SelectionAction::Download { target, mode } => Transition::StartDownload { url, target, mode },
        SelectionAction::Restart => Transition::Restart,
    }
}

/// The kind of Telegram message a finished download is delivered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryKind {
    Audio,
    Document,
    Video,
}

/// Maps the committed target and mode to a delivery kind.
///
/// Audio is always sent as an audio message; the mode only matters for
/// video, where `File` means a generic document and `Stream` an inline
/// playable video.
pub fn delivery_kind(target: TargetSpec, mode: DeliveryMode) -> DeliveryKind {
    match (target, mode) {
        (TargetSpec::Audio, _) => DeliveryKind::Audio,
        (_, DeliveryMode::File) => DeliveryKind::Document,
        (_, DeliveryMode::Stream) => DeliveryKind::Video,
    }
}

/// Filters probed stream heights down to the quality menu.
///
/// Keeps distinct heights that are at least [`MIN_HEIGHT`] AND members of
/// [`COMMON_HEIGHTS`], sorted descending.
pub fn quality_choices<I: IntoIterator<Item = u32>>(heights: I) -> Vec<u32> {
    let mut choices: Vec<u32> = heights
        .into_iter()
        .filter(|h| *h >= MIN_HEIGHT && COMMON_HEIGHTS.contains(h))
        .collect();
    choices.sort_unstable_by(|a, b| b.cmp(a));
    choices.dedup();
    choices
}
