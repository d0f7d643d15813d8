//! Typed error hierarchy for devvy.
//!
//! Two enums cover the two seams where callers need to branch on the failure:
//! - `DevvyError` — startup, working-directory and process-launch failures
//! - `PromptError` — interactive reads, where cancellation is recoverable

use std::path::PathBuf;
use thiserror::Error;

/// Errors from session setup and external process launches.
#[derive(Debug, Error)]
pub enum DevvyError {
    #[error("Project path does not exist: {path}")]
    ProjectPathNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to determine the current directory: {0}")]
    CurrentDirUnavailable(#[source] std::io::Error),

    #[error("Failed to change directory to {path}: {source}")]
    ChangeDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to launch {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

/// Errors from a single interactive read.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The user interrupted the read (Ctrl-C while prompting).
    #[error("Input interrupted")]
    Interrupted,

    /// No more input can arrive: stdin closed or not attached to a terminal.
    #[error("Input closed")]
    Closed,

    #[error("Terminal I/O failed: {0}")]
    Io(#[source] std::io::Error),
}

impl From<std::io::Error> for PromptError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::Interrupted => PromptError::Interrupted,
            std::io::ErrorKind::UnexpectedEof | std::io::ErrorKind::NotConnected => {
                PromptError::Closed
            }
            _ => PromptError::Io(err),
        }
    }
}
