//! sedump Convert Library
//!
//! Streams data-exchange XML dumps (`Tags.xml`, `Users.xml`, `Badges.xml`,
//! `Votes.xml`, `Comments.xml`) into chunked CSV files ready for bulk
//! loading, and hands each finished chunk to an external loader on a
//! background worker.
//!
//! # Pipeline
//!
//! - [`decoder`]: `row` elements to typed [`record::Record`]s in bounded memory
//! - [`writer`]: batched CSV output and chunk file rotation
//! - [`queue`]: bounded FIFO of sealed chunks (backpressure on the converter)
//! - [`worker`]: loads chunks one at a time and deletes the loaded files
//! - [`pipeline`]: runs the above for one input file
//!
//! # Example
//!
//! ```no_run
//! use sedump_convert::config::ConvertConfig;
//! use sedump_convert::loader::CommandLoader;
//! use sedump_convert::pipeline;
//! use sedump_common::types::Entity;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let input = Path::new("./dumps/Tags.xml");
//!     let config = ConvertConfig::from_env();
//!     let loader = CommandLoader::for_entity(Entity::from_path(input)?, &config);
//!
//!     let summary = pipeline::run(input, &config, loader).await?;
//!     println!("{} rows in {} chunks", summary.rows, summary.chunks);
//!     Ok(())
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod audit;
pub mod config;
pub mod decoder;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod progress;
pub mod queue;
pub mod record;
pub mod worker;
pub mod writer;

pub use error::{ConvertError, Result};
