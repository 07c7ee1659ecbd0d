//! Shared helpers for sedump-convert integration tests

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use async_trait::async_trait;
use sedump_convert::config::ConvertConfig;
use sedump_convert::loader::{ChunkLoader, LoadError};
use sedump_convert::queue::CompletionEvent;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Config writing into `output_dir` with the spinner off
pub fn test_config(output_dir: &Path, chunk_rows: u64) -> ConvertConfig {
    ConvertConfig {
        chunk_rows,
        batch_rows: 2,
        queue_capacity: 4,
        show_progress: false,
        ..ConvertConfig::default()
    }
    .with_output_dir(output_dir)
}

/// Write a `Votes.xml` with `rows` generated rows into `dir`
pub fn write_votes(dir: &Path, rows: u64) -> PathBuf {
    const DATE: &str = "2020-01-01T00:00:00.000";
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<votes>\n");
    for id in 1..=rows {
        xml.push_str(&format!(
            "  <row Id=\"{id}\" PostId=\"{}\" VoteTypeId=\"2\" CreationDate=\"{DATE}\" />\n",
            id * 10
        ));
    }
    xml.push_str("</votes>\n");

    let path = dir.join("Votes.xml");
    std::fs::write(&path, xml).unwrap();
    path
}

/// A chunk as the loader saw it, captured before the worker deletes it
#[derive(Debug, Clone)]
pub struct LoadedChunk {
    pub chunk: u32,
    pub file_name: String,
    pub content: String,
}

impl LoadedChunk {
    pub fn lines(&self) -> Vec<&str> {
        self.content.lines().collect()
    }
}

/// In-process loader that captures every chunk it is given
#[derive(Clone, Default)]
pub struct CapturingLoader {
    seen: Arc<Mutex<Vec<LoadedChunk>>>,
    reject: Vec<u32>,
    delay: Option<(u32, Duration)>,
}

impl CapturingLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the listed chunks
    pub fn rejecting(mut self, chunks: &[u32]) -> Self {
        self.reject = chunks.to_vec();
        self
    }

    /// Hold chunk `chunk` for `delay` before accepting it
    pub fn delaying(mut self, chunk: u32, delay: Duration) -> Self {
        self.delay = Some((chunk, delay));
        self
    }

    pub fn seen(&self) -> Vec<LoadedChunk> {
        self.seen.lock().unwrap().clone()
    }

    pub fn seen_chunks(&self) -> Vec<u32> {
        self.seen().iter().map(|c| c.chunk).collect()
    }
}

#[async_trait]
impl ChunkLoader for CapturingLoader {
    async fn load(&self, event: &CompletionEvent) -> Result<(), LoadError> {
        if let Some((chunk, delay)) = self.delay {
            if chunk == event.chunk {
                tokio::time::sleep(delay).await;
            }
        }

        let content = tokio::fs::read_to_string(&event.path)
            .await
            .map_err(|err| LoadError::Other(err.to_string()))?;
        let file_name = event
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.seen.lock().unwrap().push(LoadedChunk {
            chunk: event.chunk,
            file_name,
            content,
        });

        if self.reject.contains(&event.chunk) {
            return Err(LoadError::Other(format!("chunk {} rejected", event.chunk)));
        }
        Ok(())
    }
}
