use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Cached yt-dlp binary path
/// Read once at startup from YTDL_BIN environment variable or defaults to "yt-dlp"
pub static YTDL_BIN: Lazy<String> = Lazy::new(|| env::var("YTDL_BIN").unwrap_or_else(|_| "yt-dlp".to_string()));

/// Directory downloaded files are written to before delivery
/// Read from DOWNLOAD_DIR environment variable
/// Default: downloads (relative to the working directory, created on demand)
pub static DOWNLOAD_DIR: Lazy<String> =
    Lazy::new(|| env::var("DOWNLOAD_DIR").unwrap_or_else(|_| "downloads".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: vidra.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "vidra.log".to_string()));

/// Input and transfer limits
pub mod limits {
    use once_cell::sync::Lazy;
    use std::env;

    /// Maximum URL length (RFC 7230 recommends 8000, but we use 2048 for safety)
    pub const MAX_URL_LENGTH: usize = 2048;

    /// Maximum size of a downloaded file in bytes, enforced by yt-dlp
    /// Read from MAX_FILE_SIZE environment variable
    /// Default: 50 MB (the Bot API upload ceiling for bots)
    pub static MAX_FILE_SIZE_BYTES: Lazy<u64> = Lazy::new(|| {
        env::var("MAX_FILE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(50 * 1024 * 1024)
    });
}

/// Download configuration
pub mod download {
    use super::Duration;

    /// Timeout for yt-dlp invocations (in seconds)
    /// Covers both metadata probes and full transfers
    pub const YTDLP_TIMEOUT_SECS: u64 = 240;

    /// yt-dlp command timeout duration
    pub fn ytdlp_timeout() -> Duration {
        Duration::from_secs(YTDLP_TIMEOUT_SECS)
    }
}

/// Worker pool configuration
pub mod worker {
    use once_cell::sync::Lazy;
    use std::env;

    /// Maximum number of concurrent collaborator calls (probes + downloads)
    /// Read from WORKER_POOL_SIZE environment variable
    /// Default: 2, to avoid upstream rate limiting
    pub static POOL_SIZE: Lazy<usize> = Lazy::new(|| {
        env::var("WORKER_POOL_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n| n > 0)
            .unwrap_or(2)
    });

    pub fn pool_size() -> usize {
        *POOL_SIZE
    }
}

/// Audio extraction configuration
pub mod audio {
    /// Bitrate passed to the ffmpeg MP3 post-processor
    pub const MP3_BITRATE: &str = "192K";
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for HTTP requests (in seconds)
    /// Increased to 15 minutes for large file uploads to the Bot API
    pub const REQUEST_TIMEOUT_SECS: u64 = 900;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}
