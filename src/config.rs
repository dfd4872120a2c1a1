//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application,
//! plus the default on-disk locations of the history and handler files.

use std::path::PathBuf;

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name, also used as the cache/config subdirectory.
pub const APP_NAME: &str = "drun";

// =============================================================================
// History Configuration
// =============================================================================

/// Maximum number of ranked `count text` entries kept in the history file.
pub const MAX_HISTORY_ENTRIES: usize = 500;

/// Maximum number of most-recently-used commands kept.
pub const MAX_RECENT_ENTRIES: usize = 500;

/// History file name (inside the per-user cache directory).
pub const HISTORY_FILE_NAME: &str = "history";

// =============================================================================
// Handler Configuration
// =============================================================================

/// Handler config file name (inside the per-user config directory).
pub const CONFIG_FILE_NAME: &str = "rc";

// =============================================================================
// Completion Configuration
// =============================================================================

/// Edit-distance budgets tried in order until one yields candidates.
pub const DISTANCE_TIERS: [usize; 3] = [0, 2, 4];

// =============================================================================
// Launch Configuration
// =============================================================================

/// Delay before the OS-level launch so "not found" feedback can render first.
pub const LAUNCH_DELAY_MS: u64 = 10;

/// UI text shown by front-ends.
pub mod labels {
    /// Prompt shown while idle.
    pub const RUN_PROGRAM: &str = "Run Program:";
    /// Prompt prefix while a reverse search is active.
    pub const REVERSE_SEARCH: &str = "reverse-i-search: ";
    /// Transient message after a failed activation.
    pub const NOT_FOUND: &str = "Command not found";
}

// =============================================================================
// Default Paths
// =============================================================================

/// Default history file: `<cache_dir>/drun/history`.
///
/// Falls back to `~/.cache` when the platform has no cache directory.
pub fn default_history_file() -> PathBuf {
    dirs::cache_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".cache")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(HISTORY_FILE_NAME)
}

/// Default handler config file: `<config_dir>/drun/rc`.
pub fn default_config_file() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(CONFIG_FILE_NAME)
}

/// The user's home directory as a `/`-separated string.
pub fn home_dir() -> String {
    dirs::home_dir()
        .map(|home| home.to_string_lossy().replace('\\', "/"))
        .unwrap_or_default()
}
