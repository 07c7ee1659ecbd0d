//! Fatal conversion errors
//!
//! Anything in here aborts the run. Errors confined to one record
//! ([`crate::record::RecordError`]) or one chunk ([`crate::loader::LoadError`])
//! are handled where they occur and never reach this type.

use sedump_common::SedumpError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Common(#[from] SedumpError),

    #[error("Failed to open {}: {source}", path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create chunk file {}: {source}", path.display())]
    CreateChunk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The worker dropped its end of the job queue while chunks were still being produced
    #[error("Job queue closed before all chunks were enqueued")]
    QueueClosed,

    /// The worker ended without reporting completion
    #[error("Post-processing worker stopped without reporting")]
    WorkerStopped,

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Column not found in CSV header: {0}")]
    ColumnNotFound(String),
}
