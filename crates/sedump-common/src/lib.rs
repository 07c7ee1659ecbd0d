//! sedump Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, logging, and error handling for the sedump workspace.
//!
//! - **Error Handling**: [`SedumpError`] and the [`Result`] alias
//! - **Types**: the [`types::Entity`] table enum and dump file detection
//! - **Logging**: `tracing` subscriber setup driven by [`logging::LogConfig`]
//!
//! # Example
//!
//! ```no_run
//! use sedump_common::types::Entity;
//! use sedump_common::Result;
//! use std::path::Path;
//!
//! fn table_for(path: &str) -> Result<&'static str> {
//!     Ok(Entity::from_path(Path::new(path))?.table_name())
//! }
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SedumpError};
