//! Inline keyboard builders for the selection flow
//!
//! Every button's callback data is produced by `action::encode`, so the
//! wire form has a single source of truth.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::selection::{DeliveryMode, SelectionAction, TargetSpec};
use crate::telegram::action;

fn button(text: impl Into<String>, action: &SelectionAction) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(text.into(), action::encode(action))
}

/// Quality menu for the YouTube path: one row of `"<height>p"` buttons for
/// the retained heights, plus a constant audio row. `heights` is expected
/// to be pre-filtered by `selection::quality_choices`.
pub fn quality_keyboard(heights: &[u32]) -> InlineKeyboardMarkup {
    let mut rows = Vec::new();

    let quality_row: Vec<InlineKeyboardButton> = heights
        .iter()
        .map(|h| button(format!("{}p", h), &SelectionAction::Quality(*h)))
        .collect();
    if !quality_row.is_empty() {
        rows.push(quality_row);
    }

    rows.push(vec![button(
        "Audio Only (MP3)",
        &SelectionAction::Download {
            target: TargetSpec::Audio,
            mode: DeliveryMode::File,
        },
    )]);

    InlineKeyboardMarkup::new(rows)
}

/// Caption for the quality menu.
pub fn quality_prompt(title: Option<&str>) -> String {
    format!("Select quality for: {}", title.unwrap_or("Video"))
}

/// Delivery-mode menu shown after a height was picked.
pub fn delivery_keyboard(height: u32) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            button(
                "Video (Stream)",
                &SelectionAction::Download {
                    target: TargetSpec::Height(height),
                    mode: DeliveryMode::Stream,
                },
            ),
            button(
                "File (Document)",
                &SelectionAction::Download {
                    target: TargetSpec::Height(height),
                    mode: DeliveryMode::File,
                },
            ),
        ],
        vec![button("<< Back", &SelectionAction::Restart)],
    ])
}

/// Fixed menu for non-YouTube hosts: no probe happened, so the only video
/// target is "best".
pub fn generic_format_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            button(
                "Video (Stream)",
                &SelectionAction::Download {
                    target: TargetSpec::Best,
                    mode: DeliveryMode::Stream,
                },
            ),
            button(
                "Video (File)",
                &SelectionAction::Download {
                    target: TargetSpec::Best,
                    mode: DeliveryMode::File,
                },
            ),
        ],
        vec![button(
            "Audio Only",
            &SelectionAction::Download {
                target: TargetSpec::Audio,
                mode: DeliveryMode::File,
            },
        )],
    ])
}
