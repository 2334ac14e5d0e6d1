//! User input validation
//!
//! Extracts and validates links from free-form message text and classifies
//! the host so intake knows which menu path to take. Whitelist approach for
//! the YouTube classifier: only youtube.com (+ subdomains) and youtu.be.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use url::Url;

use crate::core::config;

/// Cached regex for matching URLs
/// Compiled once at startup and reused for all requests
static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s]+").expect("Failed to compile URL regex"));

/// Validation errors
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Message text contains no http(s) link at all
    #[error("no link found in message")]
    NoLink,

    /// URL exceeds the configured maximum length
    #[error("URL too long: {0} characters")]
    TooLong(usize),

    /// URL failed to parse
    #[error("invalid URL: {0}")]
    Invalid(String),

    /// Scheme other than http/https
    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),
}

/// Extracts and validates the first absolute http(s) URL from message text.
///
/// # Errors
/// Returns a `ValidationError` when no link is present, the link is too
/// long, fails to parse, or uses a non-http(s) scheme. No state is touched
/// on failure; intake re-prompts the user.
pub fn parse_media_url(text: &str) -> Result<Url, ValidationError> {
    let raw = URL_REGEX.find(text).map(|m| m.as_str()).ok_or(ValidationError::NoLink)?;

    if raw.len() > config::limits::MAX_URL_LENGTH {
        return Err(ValidationError::TooLong(raw.len()));
    }

    let url = Url::parse(raw).map_err(|_| ValidationError::Invalid(raw.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ValidationError::UnsupportedScheme(other.to_string())),
    }
}

/// Returns true if the URL points at a YouTube host.
///
/// Matches youtube.com, any subdomain of youtube.com (www, m, music), and
/// youtu.be. Everything else takes the generic format path.
pub fn is_youtube_url(url: &Url) -> bool {
    match url.host_str() {
        Some(host) => {
            let host = host.to_ascii_lowercase();
            host == "youtube.com" || host.ends_with(".youtube.com") || host == "youtu.be"
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_media_url_valid() {
        let cases = vec![
            "https://youtube.com/watch?v=dQw4w9WgXcQ",
            "http://example.com/video",
            "check this out: https://youtu.be/abc123",
            "https://instagram.com/p/xyz",
        ];

        for text in cases {
            assert!(parse_media_url(text).is_ok(), "Failed for: {}", text);
        }
    }

    #[test]
    fn test_parse_media_url_no_link() {
        let cases = vec!["hello", "", "just some words", "youtube.com/watch?v=abc"];

        for text in cases {
            assert!(
                matches!(parse_media_url(text), Err(ValidationError::NoLink)),
                "Should find no link in: {}",
                text
            );
        }
    }

    #[test]
    fn test_parse_media_url_rejects_overlong() {
        let long_url = format!("https://example.com/{}", "a".repeat(config::limits::MAX_URL_LENGTH));
        assert!(matches!(
            parse_media_url(&long_url),
            Err(ValidationError::TooLong(_))
        ));
    }

    #[test]
    fn test_parse_media_url_picks_first_link() {
        let text = "https://youtu.be/first and https://youtu.be/second";
        let url = parse_media_url(text).unwrap();
        assert_eq!(url.as_str(), "https://youtu.be/first");
    }

    #[test]
    fn test_is_youtube_url() {
        let youtube = vec![
            "https://youtube.com/watch?v=abc",
            "https://www.youtube.com/watch?v=abc",
            "https://m.youtube.com/watch?v=abc",
            "https://music.youtube.com/watch?v=abc",
            "https://youtu.be/abc",
        ];
        for raw in youtube {
            let url = Url::parse(raw).unwrap();
            assert!(is_youtube_url(&url), "Should classify as YouTube: {}", raw);
        }

        let other = vec![
            "https://instagram.com/p/xyz",
            "https://evil.com/youtube.com",
            "https://notyoutube.com/watch?v=abc",
            "https://youtube.com.evil.org/watch?v=abc",
        ];
        for raw in other {
            let url = Url::parse(raw).unwrap();
            assert!(!is_youtube_url(&url), "Should NOT classify as YouTube: {}", raw);
        }
    }
}
