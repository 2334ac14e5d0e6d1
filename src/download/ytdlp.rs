//! YtDlpSource — media extraction backend powered by yt-dlp.
//!
//! The probe runs yt-dlp in metadata mode (`--dump-json --no-download`) and
//! parses the JSON for a title and the distinct stream heights on offer.
//! The fetch runs a real transfer into the configured download directory
//! under a UUID-stemmed output template, then resolves the file yt-dlp
//! actually produced (the extension is only known after the fact — `.mp4`
//! after a merge, `.mp3` after audio extraction).
//!
//! The size ceiling is enforced by yt-dlp itself via `--max-filesize`;
//! audio is normalized to MP3 by the ffmpeg post-processor.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tokio::time::timeout;
use url::Url;
use uuid::Uuid;

use crate::core::config;
use crate::core::error::AppError;
use crate::download::{FetchKind, FetchRequest, FetchedMedia, MediaSource, ProbeInfo};

/// Media source backed by the yt-dlp binary.
#[derive(Debug, Default)]
pub struct YtDlpSource;

impl YtDlpSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MediaSource for YtDlpSource {
    fn name(&self) -> &str {
        "yt-dlp"
    }

    async fn probe(&self, url: &Url) -> Result<ProbeInfo, AppError> {
        let mut cmd = Command::new(&*config::YTDL_BIN);
        cmd.args(["--dump-json", "--no-download", "--no-warnings", "--no-playlist"])
            .arg(url.as_str())
            .kill_on_drop(true);

        log::info!("Probing {} via {}", url, &*config::YTDL_BIN);

        let output = timeout(config::download::ytdlp_timeout(), cmd.output())
            .await
            .map_err(|_| {
                AppError::Probe(format!(
                    "yt-dlp probe timed out after {}s",
                    config::download::YTDLP_TIMEOUT_SECS
                ))
            })?
            .map_err(AppError::Io)?;

        if !output.status.success() {
            return Err(AppError::Probe(first_stderr_line(&output.stderr)));
        }

        parse_probe_output(&String::from_utf8_lossy(&output.stdout))
    }

    async fn fetch(&self, request: &FetchRequest) -> Result<FetchedMedia, AppError> {
        let dir = PathBuf::from(&*config::DOWNLOAD_DIR);
        tokio::fs::create_dir_all(&dir).await?;

        // The extension yt-dlp ends up with is unknown until the transfer
        // finishes, so the file is located by its unique stem afterwards.
        let stem = Uuid::new_v4().simple().to_string();
        let template = dir.join(format!("{}.%(ext)s", stem));

        let mut cmd = Command::new(&*config::YTDL_BIN);
        cmd.args(["--no-warnings", "--no-playlist"])
            .arg("--max-filesize")
            .arg(config::limits::MAX_FILE_SIZE_BYTES.to_string())
            .arg("-o")
            .arg(&template)
            .kill_on_drop(true);

        match &request.kind {
            FetchKind::Audio => {
                cmd.args([
                    "--extract-audio",
                    "--audio-format",
                    "mp3",
                    "--audio-quality",
                    config::audio::MP3_BITRATE,
                    "--format",
                    "bestaudio/best",
                ]);
            }
            kind @ FetchKind::Video { .. } => {
                cmd.arg("--format")
                    .arg(format_selector(kind))
                    .args(["--merge-output-format", "mp4"]);
            }
        }
        cmd.arg(request.url.as_str());

        log::info!("Fetching {} ({:?})", request.url, request.kind);

        let output = timeout(config::download::ytdlp_timeout(), cmd.output())
            .await
            .map_err(|_| {
                AppError::Download(format!(
                    "yt-dlp timed out after {}s",
                    config::download::YTDLP_TIMEOUT_SECS
                ))
            })?
            .map_err(AppError::Io)?;

        if !output.status.success() {
            cleanup_partials(&dir, &stem).await;
            return Err(AppError::Download(first_stderr_line(&output.stderr)));
        }

        // yt-dlp exits zero when --max-filesize skips the transfer; the
        // absence of an output file is the only signal.
        let path = find_downloaded_file(&dir, &stem).ok_or_else(|| {
            AppError::Download(format!(
                "no file produced (larger than {} bytes, or ffmpeg post-processing failed)",
                *config::limits::MAX_FILE_SIZE_BYTES
            ))
        })?;

        let size_bytes = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        log::info!("Fetched {} -> {} ({} bytes)", request.url, path.display(), size_bytes);

        Ok(FetchedMedia { path, size_bytes })
    }
}

/// Builds the yt-dlp `--format` selector for a video fetch.
fn format_selector(kind: &FetchKind) -> String {
    match kind {
        FetchKind::Video {
            height_ceiling: Some(h),
        } => format!("bestvideo[height<={h}]+bestaudio/best[height<={h}]"),
        FetchKind::Video { height_ceiling: None } => "best[ext=mp4]/best".to_string(),
        // Audio uses --extract-audio, not a format selector
        FetchKind::Audio => "bestaudio/best".to_string(),
    }
}

/// Parses `--dump-json` output into a [`ProbeInfo`].
///
/// Format entries without a height (audio-only streams, storyboards) are
/// skipped; duplicates collapse to one entry.
fn parse_probe_output(raw: &str) -> Result<ProbeInfo, AppError> {
    #[derive(Deserialize)]
    struct RawProbe {
        title: Option<String>,
        #[serde(default)]
        formats: Vec<RawFormat>,
    }

    #[derive(Deserialize)]
    struct RawFormat {
        height: Option<u32>,
    }

    let probe: RawProbe =
        serde_json::from_str(raw.trim()).map_err(|e| AppError::Probe(format!("unparseable yt-dlp output: {}", e)))?;

    let mut heights: Vec<u32> = probe.formats.into_iter().filter_map(|f| f.height).collect();
    heights.sort_unstable();
    heights.dedup();

    Ok(ProbeInfo {
        title: probe.title,
        heights,
    })
}

/// Finds the file yt-dlp produced for `stem`, ignoring leftover partials.
fn find_downloaded_file(dir: &Path, stem: &str) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(stem) && !n.ends_with(".part") && !n.ends_with(".ytdl"))
        })
        .find(|path| path.is_file())
}

/// Removes partial files left behind by an aborted transfer.
async fn cleanup_partials(dir: &Path, stem: &str) {
    let Ok(mut entries) = tokio::fs::read_dir(dir).await else {
        return;
    };
    while let Ok(Some(entry)) = entries.next_entry().await {
        let name = entry.file_name();
        if name.to_str().is_some_and(|n| n.starts_with(stem)) {
            if let Err(e) = tokio::fs::remove_file(entry.path()).await {
                log::warn!("Failed to remove partial {}: {}", entry.path().display(), e);
            }
        }
    }
}

/// First stderr line, for user-safe error surfaces and logs.
fn first_stderr_line(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    text.lines()
        .next()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .unwrap_or_else(|| "yt-dlp failed with no output".to_string())
}
