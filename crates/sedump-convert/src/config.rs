// Conversion Configuration
//
// Environment-based configuration for the converter and its loader

use sedump_common::{Result, SedumpError};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_CHUNK_ROWS: u64 = 10_000_000;
const DEFAULT_BATCH_ROWS: usize = 10_000;
const DEFAULT_QUEUE_CAPACITY: usize = 100;
const DEFAULT_BUFFER_BYTES: usize = 4 * 1024 * 1024;
const DEFAULT_LOADER_PROGRAM: &str = "make";

/// Configuration for one conversion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertConfig {
    /// Directory chunk files are written to (default: current directory)
    pub output_dir: PathBuf,

    /// Rows per chunk file before it is sealed and handed to the loader
    pub chunk_rows: u64,

    /// Rows buffered before they are written to the chunk file
    pub batch_rows: usize,

    /// Sealed chunks that may wait for the loader before conversion pauses
    pub queue_capacity: usize,

    /// Input read buffer size in bytes
    pub read_buffer_bytes: usize,

    /// Per-chunk output buffer size in bytes
    pub write_buffer_bytes: usize,

    /// Executable invoked as `<program> <table> filename=<chunk>`
    pub loader_program: String,

    /// Kill a loader that runs longer than this (default: wait forever)
    pub loader_timeout_secs: Option<u64>,

    /// Whether to draw a progress spinner on the terminal
    pub show_progress: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            chunk_rows: DEFAULT_CHUNK_ROWS,
            batch_rows: DEFAULT_BATCH_ROWS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            read_buffer_bytes: DEFAULT_BUFFER_BYTES,
            write_buffer_bytes: DEFAULT_BUFFER_BYTES,
            loader_program: DEFAULT_LOADER_PROGRAM.to_string(),
            loader_timeout_secs: None,
            show_progress: true,
        }
    }
}

impl ConvertConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - SEDUMP_OUTPUT_DIR
    /// - SEDUMP_CHUNK_ROWS
    /// - SEDUMP_BATCH_ROWS
    /// - SEDUMP_QUEUE_CAPACITY
    /// - SEDUMP_READ_BUFFER_BYTES
    /// - SEDUMP_WRITE_BUFFER_BYTES
    /// - SEDUMP_LOADER_PROGRAM
    /// - SEDUMP_LOADER_TIMEOUT_SECS
    /// - SEDUMP_SHOW_PROGRESS
    ///
    /// Values that do not parse fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            output_dir: env::var("SEDUMP_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),

            chunk_rows: parse_env("SEDUMP_CHUNK_ROWS").unwrap_or(defaults.chunk_rows),

            batch_rows: parse_env("SEDUMP_BATCH_ROWS").unwrap_or(defaults.batch_rows),

            queue_capacity: parse_env("SEDUMP_QUEUE_CAPACITY").unwrap_or(defaults.queue_capacity),

            read_buffer_bytes: parse_env("SEDUMP_READ_BUFFER_BYTES")
                .unwrap_or(defaults.read_buffer_bytes),

            write_buffer_bytes: parse_env("SEDUMP_WRITE_BUFFER_BYTES")
                .unwrap_or(defaults.write_buffer_bytes),

            loader_program: env::var("SEDUMP_LOADER_PROGRAM")
                .unwrap_or(defaults.loader_program),

            loader_timeout_secs: parse_env("SEDUMP_LOADER_TIMEOUT_SECS"),

            show_progress: parse_env("SEDUMP_SHOW_PROGRESS").unwrap_or(defaults.show_progress),
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn loader_timeout(&self) -> Option<Duration> {
        self.loader_timeout_secs.map(Duration::from_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.chunk_rows == 0 {
            return Err(config_error("Chunk rows must be greater than 0"));
        }

        if self.batch_rows == 0 {
            return Err(config_error("Batch rows must be greater than 0"));
        }

        if self.queue_capacity == 0 {
            return Err(config_error("Queue capacity must be greater than 0"));
        }

        if self.read_buffer_bytes == 0 || self.write_buffer_bytes == 0 {
            return Err(config_error("Buffer sizes must be greater than 0"));
        }

        if self.loader_program.trim().is_empty() {
            return Err(config_error("Loader program cannot be empty"));
        }

        if self.loader_timeout_secs == Some(0) {
            return Err(config_error("Loader timeout must be greater than 0"));
        }

        Ok(())
    }
}

fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

fn config_error(msg: &str) -> SedumpError {
    SedumpError::Config(msg.to_string())
}
