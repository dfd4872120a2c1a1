//! Core logic of the launcher.
//!
//! This module provides:
//! - [`parser`] tokenizing, escaping and expansion of input lines
//! - [`PathIndex`] executable lookup and directory listing
//! - [`HistoryStore`] ranked, persistent command history
//! - [`fuzzy`] prefix and typo-tolerant matching
//! - [`CompletionEngine`] candidate production
//! - [`CommandResolver`] and [`Launcher`] for running the chosen line

mod autocomplete;
mod commands;
pub mod error;
mod filesystem;
pub mod fuzzy;
mod history;
pub mod parser;

pub use autocomplete::CompletionEngine;
pub use commands::{CommandResolver, Invocation, LaunchContext, Launcher};
pub use filesystem::PathIndex;
pub use history::HistoryStore;
