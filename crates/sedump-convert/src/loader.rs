//! External chunk loader
//!
//! [`ChunkLoader`] is the seam between the worker and whatever ingests a
//! sealed chunk. [`CommandLoader`] runs a build-style command such as
//! `make tags filename=3_tags.csv`; its exit status is the only success
//! signal and its stdout/stderr pass straight through to ours.

use crate::config::ConvertConfig;
use crate::queue::CompletionEvent;
use async_trait::async_trait;
use sedump_common::types::Entity;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

/// Why one chunk could not be loaded
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting for loader: {0}")]
    Wait(#[source] std::io::Error),

    #[error("loader exited with {0}")]
    Failed(ExitStatus),

    #[error("loader did not finish within {0:?}")]
    TimedOut(Duration),

    #[error("{0}")]
    Other(String),
}

/// Loads one sealed chunk into its destination
#[async_trait]
pub trait ChunkLoader: Send + Sync {
    async fn load(&self, event: &CompletionEvent) -> Result<(), LoadError>;
}

/// Loads chunks by running `<program> <target> filename=<path>`
#[derive(Debug, Clone)]
pub struct CommandLoader {
    program: String,
    target: String,
    timeout: Option<Duration>,
}

impl CommandLoader {
    pub fn new(program: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            target: target.into(),
            timeout: None,
        }
    }

    /// The configured loader program, targeting the table of `entity`
    pub fn for_entity(entity: Entity, config: &ConvertConfig) -> Self {
        Self::new(config.loader_program.clone(), entity.table_name())
            .with_timeout(config.loader_timeout())
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    fn command(&self, path: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg(&self.target)
            .arg(format!("filename={}", path.display()))
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        command
    }
}

#[async_trait]
impl ChunkLoader for CommandLoader {
    async fn load(&self, event: &CompletionEvent) -> Result<(), LoadError> {
        debug!(
            chunk = event.chunk,
            program = %self.program,
            target = %self.target,
            "Starting loader"
        );

        let mut child = self
            .command(event.path())
            .spawn()
            .map_err(|source| LoadError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let status = match self.timeout {
            Some(limit) => {
                let waited = tokio::time::timeout(limit, child.wait()).await;
                match waited {
                    Ok(status) => status.map_err(LoadError::Wait)?,
                    Err(_) => {
                        if let Err(err) = child.kill().await {
                            warn!(
                                chunk = event.chunk,
                                error = %err,
                                "Failed to kill timed out loader"
                            );
                        }
                        return Err(LoadError::TimedOut(limit));
                    },
                }
            },
            None => child.wait().await.map_err(LoadError::Wait)?,
        };

        if status.success() {
            Ok(())
        } else {
            Err(LoadError::Failed(status))
        }
    }
}
