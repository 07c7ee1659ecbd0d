//! Chunk file rotation
//!
//! Rows flow into the open chunk until it holds `chunk_rows` of them. The
//! chunk is then sealed: its last partial batch is written, the file is
//! flushed and closed, and a [`CompletionEvent`] goes onto the job queue.
//!
//! ```text
//! NoChunk --start/push--> Open --threshold--> NoChunk --push--> Open ...
//!                          |
//!                          +--finish--> Done
//! ```
//!
//! The first chunk is opened eagerly by [`ChunkRotator::start`] so that an
//! input without rows still yields one header-only chunk. Later chunks open
//! on their first row, which keeps an exact multiple of the threshold from
//! leaving an empty trailing chunk. `Done` is reached by consuming the
//! rotator in [`ChunkRotator::finish`]; dropping it closes the job queue.

use super::BatchWriter;
use crate::config::ConvertConfig;
use crate::error::{ConvertError, Result};
use crate::queue::{CompletionEvent, JobSender};
use crate::record::headers;
use sedump_common::types::Entity;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Path of chunk `index` for input base name `base_name`
pub fn chunk_path(output_dir: &Path, index: u32, base_name: &str) -> PathBuf {
    output_dir.join(format!("{index}_{base_name}.csv"))
}

struct OpenChunk {
    index: u32,
    path: PathBuf,
    writer: BatchWriter<BufWriter<File>>,
    rows: u64,
}

enum ChunkState {
    NoChunk,
    Open(OpenChunk),
}

pub struct ChunkRotator {
    headers: &'static [&'static str],
    output_dir: PathBuf,
    base_name: String,
    chunk_rows: u64,
    batch_rows: usize,
    write_buffer_bytes: usize,
    jobs: JobSender,
    state: ChunkState,
    next_index: u32,
    sealed: u32,
}

impl ChunkRotator {
    pub fn new(
        entity: Entity,
        base_name: impl Into<String>,
        config: &ConvertConfig,
        jobs: JobSender,
    ) -> Self {
        Self {
            headers: headers(entity),
            output_dir: config.output_dir.clone(),
            base_name: base_name.into(),
            chunk_rows: config.chunk_rows.max(1),
            batch_rows: config.batch_rows,
            write_buffer_bytes: config.write_buffer_bytes,
            jobs,
            state: ChunkState::NoChunk,
            next_index: 1,
            sealed: 0,
        }
    }

    /// Open the first chunk before any row is seen
    pub fn start(&mut self) -> Result<()> {
        if matches!(self.state, ChunkState::NoChunk) && self.next_index == 1 {
            let chunk = self.open_chunk()?;
            self.state = ChunkState::Open(chunk);
        }
        Ok(())
    }

    /// Append one rendered row, sealing the chunk when it reaches the threshold
    pub fn push(&mut self, row: Vec<String>) -> Result<()> {
        let mut chunk = match std::mem::replace(&mut self.state, ChunkState::NoChunk) {
            ChunkState::Open(chunk) => chunk,
            ChunkState::NoChunk => self.open_chunk()?,
        };

        chunk.writer.push(row)?;
        chunk.rows += 1;

        if chunk.rows >= self.chunk_rows {
            self.seal(chunk)
        } else {
            self.state = ChunkState::Open(chunk);
            Ok(())
        }
    }

    /// Index of the chunk currently receiving rows, if one is open
    pub fn current_chunk(&self) -> Option<u32> {
        match &self.state {
            ChunkState::Open(chunk) => Some(chunk.index),
            ChunkState::NoChunk => None,
        }
    }

    /// Chunks sealed and enqueued so far
    pub fn sealed(&self) -> u32 {
        self.sealed
    }

    /// Seal the open chunk at end of input and return the number of chunks
    ///
    /// Always seals at least one chunk, creating a header-only file if no
    /// chunk was ever opened.
    pub fn finish(mut self) -> Result<u32> {
        match std::mem::replace(&mut self.state, ChunkState::NoChunk) {
            ChunkState::Open(chunk) => self.seal(chunk)?,
            ChunkState::NoChunk if self.sealed == 0 => {
                let chunk = self.open_chunk()?;
                self.seal(chunk)?;
            },
            ChunkState::NoChunk => {},
        }
        Ok(self.sealed)
    }

    fn open_chunk(&mut self) -> Result<OpenChunk> {
        let index = self.next_index;
        let path = chunk_path(&self.output_dir, index, &self.base_name);
        let file = File::create(&path).map_err(|source| ConvertError::CreateChunk {
            path: path.clone(),
            source,
        })?;
        let sink = BufWriter::with_capacity(self.write_buffer_bytes, file);
        let writer = BatchWriter::new(sink, self.headers, self.batch_rows)?;
        self.next_index += 1;

        debug!(chunk = index, path = %path.display(), "Opened chunk");
        Ok(OpenChunk {
            index,
            path,
            writer,
            rows: 0,
        })
    }

    fn seal(&mut self, chunk: OpenChunk) -> Result<()> {
        let OpenChunk {
            index,
            path,
            writer,
            rows,
        } = chunk;

        let sink = writer.finish()?;
        let file = sink.into_inner().map_err(|err| err.into_error())?;
        drop(file);
        self.sealed += 1;

        info!(chunk = index, path = %path.display(), rows, "Sealed chunk");
        self.jobs.enqueue(CompletionEvent::new(index, path))
    }
}
