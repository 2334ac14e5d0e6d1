//! End-to-end tests of the selection flow, transport excluded
//!
//! Drives the same sequence the callback handler runs — decode the button,
//! advance against the session, build the fetch request, run it on the
//! worker pool, clean up the file — using the scripted `MockSource` from
//! `common` in place of yt-dlp.

mod common;

use common::MockSource;
use std::sync::Arc;
use teloxide::types::ChatId;
use url::Url;

use vidra::core::validation;
use vidra::download::{FetchKind, FetchRequest, MediaSource, WorkerPool};
use vidra::selection::{self, DeliveryKind, SelectionAction, TargetSpec, Transition};
use vidra::session::SessionStore;
use vidra::telegram::action;
use vidra::telegram::send::cleanup_media;

fn url(raw: &str) -> Url {
    Url::parse(raw).unwrap()
}

const CHAT: ChatId = ChatId(1001);

#[tokio::test]
async fn youtube_flow_downloads_with_height_ceiling() {
    let dir = tempfile::tempdir().unwrap();
    let source = Arc::new(MockSource::new(dir.path().to_path_buf()));
    let workers = WorkerPool::new(2);
    let sessions = SessionStore::new();

    // Intake stored the link; the probe offered {1080, 720, 360, 144, 96},
    // which the menu narrows to the common set.
    sessions.put(CHAT, url("https://youtu.be/abc"));
    let info = source.probe(&url("https://youtu.be/abc")).await.unwrap();
    assert_eq!(selection::quality_choices(info.heights), vec![1080, 720, 360]);

    // First press: pick 720p -> delivery menu, no collaborator touched yet.
    let quality = action::decode("quality:720").unwrap();
    assert_eq!(
        selection::advance(quality, sessions.get(CHAT)),
        Transition::DeliveryMenu { height: 720 }
    );
    assert!(source.recorded_fetches().is_empty());

    // Second press: commit to streaming video.
    let commit = action::decode("dl:720:video").unwrap();
    let Transition::StartDownload { url: resolved, target, mode } =
        selection::advance(commit, sessions.get(CHAT))
    else {
        panic!("expected StartDownload");
    };
    assert_eq!(resolved, url("https://youtu.be/abc"));

    let request = FetchRequest::from_target(resolved, target);
    let fetch_source = Arc::clone(&source);
    let media = workers
        .dispatch(async move { fetch_source.fetch(&request).await })
        .await
        .unwrap();

    assert_eq!(
        source.recorded_fetches()[0].kind,
        FetchKind::Video {
            height_ceiling: Some(720)
        }
    );
    assert_eq!(selection::delivery_kind(target, mode), DeliveryKind::Video);

    // The file exists until the delivery attempt, then is released.
    assert!(media.path.exists());
    cleanup_media(&media.path).await;
    assert!(!media.path.exists());
}

#[tokio::test]
async fn audio_download_is_uncapped_and_delivered_as_audio() {
    let dir = tempfile::tempdir().unwrap();
    let source = Arc::new(MockSource::new(dir.path().to_path_buf()));
    let workers = WorkerPool::new(2);
    let sessions = SessionStore::new();

    sessions.put(CHAT, url("https://youtu.be/abc"));

    let commit = action::decode("dl:audio:file").unwrap();
    let Transition::StartDownload { url: resolved, target, mode } =
        selection::advance(commit, sessions.get(CHAT))
    else {
        panic!("expected StartDownload");
    };

    assert_eq!(target, TargetSpec::Audio);
    // Audio ignores the delivery mode.
    assert_eq!(selection::delivery_kind(target, mode), DeliveryKind::Audio);

    let request = FetchRequest::from_target(resolved, target);
    let fetch_source = Arc::clone(&source);
    let media = workers
        .dispatch(async move { fetch_source.fetch(&request).await })
        .await
        .unwrap();

    assert_eq!(source.recorded_fetches()[0].kind, FetchKind::Audio);

    // Cleanup runs regardless of how delivery went; the temp file must be
    // gone afterwards.
    cleanup_media(&media.path).await;
    assert!(!media.path.exists());
}

#[tokio::test]
async fn stale_button_without_session_never_fetches() {
    let dir = tempfile::tempdir().unwrap();
    let source = Arc::new(MockSource::new(dir.path().to_path_buf()));
    let sessions = SessionStore::new();

    for data in ["quality:1080", "dl:best:video", "dl:audio:file", "restart"] {
        let decoded = action::decode(data).unwrap();
        assert_eq!(
            selection::advance(decoded, sessions.get(CHAT)),
            Transition::Expired,
            "button {:?} must expire without a session",
            data
        );
    }

    // Expiry never reached the download collaborator.
    assert!(source.recorded_fetches().is_empty());
}

#[tokio::test]
async fn newer_submission_wins_the_download() {
    let dir = tempfile::tempdir().unwrap();
    let source = Arc::new(MockSource::new(dir.path().to_path_buf()));
    let workers = WorkerPool::new(1);
    let sessions = SessionStore::new();

    sessions.put(CHAT, url("https://youtu.be/old"));
    sessions.put(CHAT, url("https://instagram.com/p/new"));

    let commit = action::decode("dl:best:file").unwrap();
    let Transition::StartDownload { url: resolved, target, .. } =
        selection::advance(commit, sessions.get(CHAT))
    else {
        panic!("expected StartDownload");
    };
    assert_eq!(resolved, url("https://instagram.com/p/new"));

    let request = FetchRequest::from_target(resolved, target);
    let fetch_source = Arc::clone(&source);
    workers
        .dispatch(async move { fetch_source.fetch(&request).await })
        .await
        .unwrap();

    let recorded = source.recorded_fetches();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].url, url("https://instagram.com/p/new"));
    // The generic path carries no probed height: best available, uncapped.
    assert_eq!(recorded[0].kind, FetchKind::Video { height_ceiling: None });
}

#[tokio::test]
async fn failed_fetch_reports_download_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut mock = MockSource::new(dir.path().to_path_buf());
    mock.fail_fetch = Some("File is larger than max-filesize".to_string());
    let source = Arc::new(mock);
    let workers = WorkerPool::new(1);

    let request = FetchRequest::from_target(url("https://youtu.be/abc"), TargetSpec::Best);
    let fetch_source = Arc::clone(&source);
    let result = workers.dispatch(async move { fetch_source.fetch(&request).await }).await;

    assert!(matches!(result, Err(vidra::AppError::Download(_))));
    // The failed attempt was still recorded — the handler edits its status
    // message exactly once for it.
    assert_eq!(source.recorded_fetches().len(), 1);
}

#[test]
fn rejected_text_never_creates_a_session() {
    let sessions = SessionStore::new();

    for text in ["hello", "", "youtube.com/watch?v=abc", "ftp://example.com/x"] {
        if validation::parse_media_url(text).is_ok() {
            panic!("input {:?} should have been rejected", text);
        }
        // Intake only writes the session after validation passes.
    }

    // A later button press therefore finds nothing and expires.
    let decoded = action::decode("dl:best:video").unwrap();
    assert_eq!(selection::advance(decoded, sessions.get(CHAT)), Transition::Expired);
}

#[test]
fn quality_press_is_idempotent_through_the_wire() {
    let sessions = SessionStore::new();
    sessions.put(CHAT, url("https://youtu.be/abc"));

    let first = selection::advance(action::decode("quality:720").unwrap(), sessions.get(CHAT));
    let second = selection::advance(action::decode("quality:720").unwrap(), sessions.get(CHAT));

    assert_eq!(first, second);
    assert_eq!(first, Transition::DeliveryMenu { height: 720 });
}

#[test]
fn menu_buttons_decode_to_the_actions_that_built_them() {
    // Every button the menus can render must survive the wire.
    let actions = [
        SelectionAction::Quality(1080),
        SelectionAction::Quality(360),
        SelectionAction::Download {
            target: TargetSpec::Height(480),
            mode: vidra::selection::DeliveryMode::Stream,
        },
        SelectionAction::Download {
            target: TargetSpec::Best,
            mode: vidra::selection::DeliveryMode::File,
        },
        SelectionAction::Download {
            target: TargetSpec::Audio,
            mode: vidra::selection::DeliveryMode::File,
        },
        SelectionAction::Restart,
    ];

    for a in actions {
        assert_eq!(action::decode(&action::encode(&a)), Some(a), "wire roundtrip for {:?}", a);
    }
}
