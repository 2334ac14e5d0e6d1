//! Shared test helpers: a scripted media source
//!
//! `MockSource` stands in for yt-dlp: the probe answers from a canned
//! script, the fetch records every request it sees and writes a real file
//! into a temp directory so cleanup behavior can be observed on disk.

#![allow(dead_code)] // Not every test file uses every helper

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Mutex;
use url::Url;

use vidra::download::{FetchKind, FetchRequest, FetchedMedia, MediaSource, ProbeInfo};
use vidra::AppError;

pub struct MockSource {
    pub title: Option<String>,
    pub heights: Vec<u32>,
    pub output_dir: PathBuf,
    /// Every fetch request seen, in order
    pub fetch_calls: Mutex<Vec<FetchRequest>>,
    /// When set, every fetch fails with this message
    pub fail_fetch: Option<String>,
}

impl MockSource {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            title: Some("Test Clip".to_string()),
            heights: vec![1080, 720, 360, 144, 96],
            output_dir,
            fetch_calls: Mutex::new(Vec::new()),
            fail_fetch: None,
        }
    }

    pub fn recorded_fetches(&self) -> Vec<FetchRequest> {
        self.fetch_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn probe(&self, _url: &Url) -> Result<ProbeInfo, AppError> {
        Ok(ProbeInfo {
            title: self.title.clone(),
            heights: self.heights.clone(),
        })
    }

    async fn fetch(&self, request: &FetchRequest) -> Result<FetchedMedia, AppError> {
        let call_number = {
            let mut calls = self.fetch_calls.lock().unwrap();
            calls.push(request.clone());
            calls.len()
        };

        if let Some(message) = &self.fail_fetch {
            return Err(AppError::Download(message.clone()));
        }

        let ext = match request.kind {
            FetchKind::Audio => "mp3",
            FetchKind::Video { .. } => "mp4",
        };
        let path = self.output_dir.join(format!("fetched-{}.{}", call_number, ext));
        std::fs::write(&path, b"media bytes")?;

        Ok(FetchedMedia { path, size_bytes: 11 })
    }
}
