//! Custom error types for the application.
//!
//! Provides structured error handling with meaningful error messages
//! and proper error categorization for each domain:
//!
//! - [`HistoryError`] - Reading or rewriting the history file
//! - [`ConfigError`] - Reading the handler config file
//! - [`ResolveError`] - Turning an input line into an invocation
//! - [`LaunchError`] - Handing the invocation to the operating system

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// History file errors. Absorbed by [`HistoryStore`](crate::core::HistoryStore)
/// so a storage hiccup never ends the session.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to read history file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write history file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Handler config errors. A missing file is not one of them.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Command resolution failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Nothing but whitespace was entered.
    #[error("empty command")]
    EmptyInput,
    /// The first token is not an executable, directory or file and no scheme matched.
    #[error("command not found: {command}")]
    NotFound { command: String },
}

/// Launch failures, reported from the detached launch task.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
}
