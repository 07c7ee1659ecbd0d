//! Bounded hand-off of sealed chunks to the post-processing worker
//!
//! A thin wrapper over a bounded `tokio::sync::mpsc` channel. The producer
//! runs on a blocking thread and calls [`JobSender::enqueue`], which parks it
//! while the queue is full; that is the backpressure that stops chunk
//! rotation when the loader falls behind. Dropping the last [`JobSender`]
//! closes the queue, and [`JobReceiver::recv`] returns `None` once the
//! remaining events are drained.

use crate::error::{ConvertError, Result};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// A sealed chunk file that is ready for loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionEvent {
    /// 1-based chunk index
    pub chunk: u32,
    pub path: PathBuf,
}

impl CompletionEvent {
    pub fn new(chunk: u32, path: impl Into<PathBuf>) -> Self {
        Self {
            chunk,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Create a FIFO job queue holding at most `capacity` pending events
pub fn job_queue(capacity: usize) -> (JobSender, JobReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (JobSender { tx }, JobReceiver { rx })
}

/// Producer side of the job queue
#[derive(Debug, Clone)]
pub struct JobSender {
    tx: mpsc::Sender<CompletionEvent>,
}

impl JobSender {
    /// Enqueue from synchronous code, blocking while the queue is full.
    ///
    /// Must not be called from inside an async task; the converter calls it
    /// from `spawn_blocking`.
    pub fn enqueue(&self, event: CompletionEvent) -> Result<()> {
        self.tx
            .blocking_send(event)
            .map_err(|_| ConvertError::QueueClosed)
    }

    /// Enqueue from async code, waiting while the queue is full
    pub async fn send(&self, event: CompletionEvent) -> Result<()> {
        self.tx
            .send(event)
            .await
            .map_err(|_| ConvertError::QueueClosed)
    }

    /// Events enqueued but not yet taken by the worker
    pub fn pending(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }

    pub fn max_capacity(&self) -> usize {
        self.tx.max_capacity()
    }
}

/// Consumer side of the job queue, owned by the single worker
#[derive(Debug)]
pub struct JobReceiver {
    rx: mpsc::Receiver<CompletionEvent>,
}

impl JobReceiver {
    /// Next event in enqueue order; `None` once the queue is closed and drained
    pub async fn recv(&mut self) -> Option<CompletionEvent> {
        self.rx.recv().await
    }

    /// Blocking variant of [`JobReceiver::recv`] for synchronous callers
    pub fn blocking_recv(&mut self) -> Option<CompletionEvent> {
        self.rx.blocking_recv()
    }
}
