//! Media source abstraction and download plumbing
//!
//! `MediaSource` is the seam between the bot and the external extraction
//! engine: a metadata probe and a blocking fetch. The production backend is
//! [`YtDlpSource`]; tests substitute a scripted mock. All calls are routed
//! through the bounded [`WorkerPool`] so the dispatcher loop never blocks
//! on a transfer.

pub mod worker;
pub mod ytdlp;

use async_trait::async_trait;
use std::path::PathBuf;
use url::Url;

use crate::core::error::AppError;
use crate::selection::TargetSpec;

pub use worker::WorkerPool;
pub use ytdlp::YtDlpSource;

/// Metadata returned by a probe: no media bytes are transferred.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProbeInfo {
    /// Video title, if the extractor reported one
    pub title: Option<String>,
    /// Distinct stream heights on offer (unsorted, may be empty)
    pub heights: Vec<u32>,
}

/// What to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchKind {
    /// Video, optionally capped at a height ceiling
    Video { height_ceiling: Option<u32> },
    /// Audio only, normalized to MP3
    Audio,
}

/// A single fetch request handed to the download collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: Url,
    pub kind: FetchKind,
}

impl FetchRequest {
    /// Builds the request for a committed target: audio extraction for
    /// `Audio`, a capped video for `Height(h)`, uncapped for `Best`.
    pub fn from_target(url: Url, target: TargetSpec) -> Self {
        let kind = match target {
            TargetSpec::Audio => FetchKind::Audio,
            TargetSpec::Height(h) => FetchKind::Video {
                height_ceiling: Some(h),
            },
            TargetSpec::Best => FetchKind::Video { height_ceiling: None },
        };
        Self { url, kind }
    }
}

/// A file produced by a successful fetch. Consumed exactly once for
/// delivery; the path is removed right after the send attempt.
#[derive(Debug, Clone)]
pub struct FetchedMedia {
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Trait for media extraction backends.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Human-readable name of this source (e.g., "yt-dlp")
    fn name(&self) -> &str;

    /// Fetch title and available stream heights without downloading.
    async fn probe(&self, url: &Url) -> Result<ProbeInfo, AppError>;

    /// Perform the transfer. Enforces the configured maximum file size and,
    /// for audio, normalizes to MP3.
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchedMedia, AppError>;
}
