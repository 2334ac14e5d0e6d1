//! Callback-data codec for selection actions
//!
//! The rest of the crate works with [`SelectionAction`]; raw callback
//! strings stop at this boundary. The wire form is adapter-owned and
//! opaque to the user:
//!
//! ```text
//! quality:<height>
//! dl:<height|best|audio>:<video|file>
//! restart
//! ```
//!
//! Tokens never carry a URL — the state machine resolves it from the
//! session. `decode` returns `None` for anything malformed or foreign
//! (e.g. buttons from an older bot build) instead of guessing.

use crate::selection::{DeliveryMode, SelectionAction, TargetSpec};

/// Renders an action into callback data for an inline button.
pub fn encode(action: &SelectionAction) -> String {
    match action {
        SelectionAction::Quality(height) => format!("quality:{}", height),
        SelectionAction::Download { target, mode } => {
            let target_token = match target {
                TargetSpec::Height(h) => h.to_string(),
                TargetSpec::Best => "best".to_string(),
                TargetSpec::Audio => "audio".to_string(),
            };
            let mode_token = match mode {
                DeliveryMode::Stream => "video",
                DeliveryMode::File => "file",
            };
            format!("dl:{}:{}", target_token, mode_token)
        }
        SelectionAction::Restart => "restart".to_string(),
    }
}

/// Parses callback data back into an action.
pub fn decode(data: &str) -> Option<SelectionAction> {
    let mut parts = data.split(':');
    match parts.next()? {
        "quality" => {
            let height = parts.next()?.parse().ok()?;
            if parts.next().is_some() {
                return None;
            }
            Some(SelectionAction::Quality(height))
        }
        "dl" => {
            let target = match parts.next()? {
                "best" => TargetSpec::Best,
                "audio" => TargetSpec::Audio,
                raw => TargetSpec::Height(raw.parse().ok()?),
            };
            let mode = match parts.next()? {
                "video" => DeliveryMode::Stream,
                "file" => DeliveryMode::File,
                _ => return None,
            };
            if parts.next().is_some() {
                return None;
            }
            Some(SelectionAction::Download { target, mode })
        }
        "restart" => {
            if parts.next().is_some() {
                return None;
            }
            Some(SelectionAction::Restart)
        }
        _ => None,
    }
}
