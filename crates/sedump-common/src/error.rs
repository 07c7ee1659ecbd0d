//! Error types shared across sedump crates

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sedump operations
pub type Result<T> = std::result::Result<T, SedumpError>;

/// Errors that are not specific to a single conversion stage
#[derive(Error, Debug)]
pub enum SedumpError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input file name does not name a known dump table
    #[error("Unsupported input file: {} (expected Tags.xml, Users.xml, Badges.xml, Votes.xml or Comments.xml)", .0.display())]
    UnsupportedInput(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
