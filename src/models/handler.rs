//! Handler programs used to open URLs, files, directories and terminals.
//!
//! The config file is line-oriented, `key = value`, case-insensitive keys:
//!
//! ```text
//! http-handler = chromium
//!   directory-handler = thunar
//! ```
//!
//! Unrecognized lines are ignored. The file is re-read on every resolution
//! so edits take effect without restarting.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::core::error::ConfigError;

static HANDLER_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(http|ssh|file|directory|terminal)-handler\s*=(.*)$")
        .expect("handler line pattern is valid")
});

/// Command templates for each kind of target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HandlerConfig {
    pub http: String,
    pub ssh: String,
    pub file: String,
    pub directory: String,
    pub terminal: String,
}

impl HandlerConfig {
    /// Apply `key = value` lines from `text` on top of `self`.
    pub fn apply(mut self, text: &str) -> Self {
        for line in text.lines() {
            let Some(caps) = HANDLER_LINE.captures(line) else {
                continue;
            };
            let value = caps[2].trim().to_string();
            match caps[1].to_lowercase().as_str() {
                "http" => self.http = value,
                "ssh" => self.ssh = value,
                "file" => self.file = value,
                "directory" => self.directory = value,
                "terminal" => self.terminal = value,
                _ => {}
            }
        }
        self
    }

    /// Read the config file at `path` on top of `defaults`.
    ///
    /// A missing file is not an error and yields `defaults` unchanged.
    pub fn read(path: &Path, defaults: HandlerConfig) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(defaults.apply(&text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(defaults),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Like [`HandlerConfig::read`], but any read failure falls back to `defaults`.
    pub fn load(path: &Path, defaults: HandlerConfig) -> Self {
        match Self::read(path, defaults.clone()) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("{}; using default handlers", err);
                defaults
            }
        }
    }

    /// The terminal program without its arguments (`"xterm -e"` → `"xterm"`).
    pub fn terminal_program(&self) -> &str {
        self.terminal.split(' ').next().unwrap_or_default()
    }
}
