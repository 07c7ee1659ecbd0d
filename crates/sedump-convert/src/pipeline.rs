//! Conversion pipeline
//!
//! Wires the pieces together for one dump file:
//!
//! ```text
//! RowDecoder -> Record::to_row -> ChunkRotator --(job queue)--> PostProcessWorker
//!   (spawn_blocking producer)                                   (tokio task)
//! ```
//!
//! The producer owns the only [`JobSender`](crate::queue::JobSender), so the
//! queue closes as soon as it finishes, successfully or not. The worker is
//! always awaited before [`run`] returns, which means every sealed chunk has
//! been loaded or deliberately left on disk by then.

use crate::config::ConvertConfig;
use crate::decoder::RowDecoder;
use crate::error::{ConvertError, Result};
use crate::loader::ChunkLoader;
use crate::progress::{chunk_message, create_row_spinner, PROGRESS_INTERVAL};
use crate::queue::job_queue;
use crate::worker::{PostProcessWorker, WorkerReport};
use crate::writer::ChunkRotator;
use indicatif::ProgressBar;
use sedump_common::types::Entity;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{error, info};

/// Outcome of converting one stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Rows written to chunk files
    pub rows: u64,
    /// Rows dropped because they did not decode
    pub skipped: u64,
    /// Chunks sealed and enqueued
    pub chunks: u32,
}

/// Outcome of a full pipeline run
#[derive(Debug, Clone)]
pub struct PipelineSummary {
    pub entity: Entity,
    pub rows: u64,
    pub skipped: u64,
    pub chunks: u32,
    pub report: WorkerReport,
}

/// Base name of the chunk files: the input file stem, lower-cased
pub fn chunk_base_name(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Decode `input` and write its rows into chunks through `rotator`.
///
/// Synchronous; blocks whenever the job queue is full.
pub fn convert<R: BufRead>(
    input: R,
    entity: Entity,
    mut rotator: ChunkRotator,
    progress: &ProgressBar,
) -> Result<ConversionStats> {
    rotator.start()?;

    let mut decoder = RowDecoder::new(input, entity);
    let mut rows = 0u64;
    for record in &mut decoder {
        rotator.push(record?.to_row())?;

        rows += 1;
        if rows % PROGRESS_INTERVAL == 0 {
            progress.set_position(rows);
            progress.set_message(chunk_message(entity.table_name(), rotator.current_chunk()));
        }
    }

    let chunks = rotator.finish()?;
    progress.set_position(decoder.decoded());

    Ok(ConversionStats {
        rows: decoder.decoded(),
        skipped: decoder.skipped(),
        chunks,
    })
}

/// Convert one dump file and load every chunk with `loader`
pub async fn run<L: ChunkLoader + 'static>(
    input: &Path,
    config: &ConvertConfig,
    loader: L,
) -> Result<PipelineSummary> {
    config.validate()?;
    let entity = Entity::from_path(input)?;
    let base_name = chunk_base_name(input);

    let file = File::open(input).map_err(|source| ConvertError::OpenInput {
        path: input.to_path_buf(),
        source,
    })?;
    std::fs::create_dir_all(&config.output_dir)?;

    info!(
        input = %input.display(),
        entity = %entity,
        output_dir = %config.output_dir.display(),
        chunk_rows = config.chunk_rows,
        "Starting conversion"
    );

    let (jobs, queue) = job_queue(config.queue_capacity);
    let worker = PostProcessWorker::new(loader).spawn(queue);

    let rotator = ChunkRotator::new(entity, base_name, config, jobs);
    let reader = BufReader::with_capacity(config.read_buffer_bytes, file);
    let progress = create_row_spinner(entity.table_name(), config.show_progress);
    let producer = {
        let progress = progress.clone();
        tokio::task::spawn_blocking(move || convert(reader, entity, rotator, &progress))
    };

    let converted = producer.await;
    progress.finish_and_clear();

    // Chunks sealed before a producer failure are still loaded
    let report = match worker.wait().await {
        Ok(report) => report,
        Err(err) => {
            if let Some(lost) = producer_failure(&converted) {
                error!(error = %lost, "Conversion aborted before the worker stopped");
            }
            return Err(err);
        },
    };
    let stats = match converted {
        Ok(Ok(stats)) => stats,
        Ok(Err(err)) => {
            error!(error = %err, loaded = report.loaded.len(), "Conversion aborted");
            return Err(err);
        },
        Err(join) => return Err(join.into()),
    };

    info!(
        entity = %entity,
        rows = stats.rows,
        skipped = stats.skipped,
        chunks = stats.chunks,
        loaded = report.loaded.len(),
        failed = report.failed.len(),
        "Conversion complete"
    );

    Ok(PipelineSummary {
        entity,
        rows: stats.rows,
        skipped: stats.skipped,
        chunks: stats.chunks,
        report,
    })
}

/// Describes a producer failure that a worker failure would otherwise hide
fn producer_failure(
    converted: &std::result::Result<Result<ConversionStats>, tokio::task::JoinError>,
) -> Option<String> {
    match converted {
        Ok(Ok(_)) => None,
        Ok(Err(err)) => Some(err.to_string()),
        Err(join) => Some(join.to_string()),
    }
}
