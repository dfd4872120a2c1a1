//! Resolution result and external launch context.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// A fully composed command line, ready to hand to the shell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Invocation {
    /// Shell command line
    pub command: String,
    /// Directory to switch to before launching, if any
    pub working_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            working_dir: None,
        }
    }

    /// Set the working directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

/// Paths supplied to the launcher from outside (e.g. files dropped on it).
///
/// Applied to every invocation resolved during the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LaunchContext {
    /// Overrides the working directory of every invocation
    pub working_dir: Option<PathBuf>,
    /// Appended to every invocation, already quoted
    pub extra_args: Option<String>,
}

impl LaunchContext {
    /// Build the context from launcher arguments.
    ///
    /// A single directory becomes the working directory. Otherwise every path
    /// becomes a double-quoted extra argument, and an absolute first path
    /// contributes its parent directory as working directory.
    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Self {
        let Some(first) = paths.first().map(AsRef::as_ref) else {
            return Self::default();
        };

        if paths.len() == 1 && first.is_dir() {
            return Self {
                working_dir: Some(first.to_path_buf()),
                extra_args: None,
            };
        }

        let extra_args = paths
            .iter()
            .map(|path| format!("\"{}\"", path.as_ref().display()))
            .collect::<Vec<_>>()
            .join(" ");
        let working_dir = if first.is_absolute() {
            first.parent().map(Path::to_path_buf)
        } else {
            None
        };

        Self {
            working_dir,
            extra_args: Some(extra_args),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.working_dir.is_none() && self.extra_args.is_none()
    }
}
