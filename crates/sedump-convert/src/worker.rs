//! Post-processing worker
//!
//! A single background task that takes sealed chunks off the job queue in
//! order, hands each one to the [`ChunkLoader`], and deletes the file once
//! it loaded. Chunks are loaded one at a time. A failed load leaves the
//! file on disk and moves on to the next chunk.

use crate::error::{ConvertError, Result};
use crate::loader::ChunkLoader;
use crate::queue::{CompletionEvent, JobReceiver};
use std::path::PathBuf;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// What the worker did with every chunk it received
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerReport {
    /// Chunks the loader accepted, in processing order
    pub loaded: Vec<PathBuf>,
    /// Chunks the loader rejected; still on disk
    pub failed: Vec<PathBuf>,
    /// Loaded chunks whose file could not be deleted
    pub undeleted: Vec<PathBuf>,
}

impl WorkerReport {
    pub fn processed(&self) -> usize {
        self.loaded.len() + self.failed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.undeleted.is_empty()
    }
}

pub struct PostProcessWorker<L> {
    loader: L,
}

impl<L: ChunkLoader + 'static> PostProcessWorker<L> {
    pub fn new(loader: L) -> Self {
        Self { loader }
    }

    /// Process events until the queue is closed and drained
    pub async fn run(&self, mut jobs: JobReceiver) -> WorkerReport {
        let mut report = WorkerReport::default();

        while let Some(event) = jobs.recv().await {
            self.process(event, &mut report).await;
        }

        info!(
            loaded = report.loaded.len(),
            failed = report.failed.len(),
            "Post-processing finished"
        );
        report
    }

    async fn process(&self, event: CompletionEvent, report: &mut WorkerReport) {
        let chunk = event.chunk;

        if let Err(err) = self.loader.load(&event).await {
            error!(
                chunk,
                path = %event.path.display(),
                error = %err,
                "Loader failed; keeping chunk file"
            );
            report.failed.push(event.path);
            return;
        }

        match tokio::fs::remove_file(&event.path).await {
            Ok(()) => info!(chunk, path = %event.path.display(), "Loaded and removed chunk"),
            Err(err) => {
                warn!(
                    chunk,
                    path = %event.path.display(),
                    error = %err,
                    "Loaded chunk could not be deleted"
                );
                report.undeleted.push(event.path.clone());
            },
        }
        report.loaded.push(event.path);
    }

    /// Run on a background task; the returned handle resolves once the queue
    /// has been closed and every event was processed
    pub fn spawn(self, jobs: JobReceiver) -> WorkerHandle {
        let (done_tx, done_rx) = oneshot::channel();
        let task = tokio::spawn(async move {
            let report = self.run(jobs).await;
            // The handle may have been dropped; nobody is waiting then
            let _ = done_tx.send(report);
        });

        WorkerHandle {
            done: done_rx,
            task,
        }
    }
}

/// Completion marker of a spawned [`PostProcessWorker`]
pub struct WorkerHandle {
    done: oneshot::Receiver<WorkerReport>,
    task: JoinHandle<()>,
}

impl WorkerHandle {
    /// Wait for the worker to drain the queue and report
    pub async fn wait(self) -> Result<WorkerReport> {
        match self.done.await {
            Ok(report) => {
                self.task.await?;
                Ok(report)
            },
            Err(_) => {
                // A panic surfaces as a join error
                self.task.await?;
                Err(ConvertError::WorkerStopped)
            },
        }
    }
}
