//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`PlatformProfile`], [`PlatformKind`], [`EscapeStyle`] - Platform rules selected at startup
//! - [`HandlerConfig`] - Programs that open URLs, files, directories and terminals
//! - [`HistoryEntry`] - Persisted run counts

mod handler;
mod history;
mod platform;

pub use handler::HandlerConfig;
pub use history::HistoryEntry;
pub use platform::{EscapeStyle, PlatformKind, PlatformProfile};
