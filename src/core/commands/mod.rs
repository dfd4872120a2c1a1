//! Command resolution and launch.
//!
//! This module provides:
//! - [`CommandResolver`] turning a finished input line into an [`Invocation`]
//! - [`LaunchContext`] for paths handed to the launcher from outside
//! - [`Launcher`] for detached, non-blocking process launch
//!
//! # Architecture
//!
//! Resolution is pure apart from reading the handler config and probing the
//! filesystem. The working-directory change it decides on travels in the
//! returned [`Invocation`] and is applied by [`Launcher::launch`] just before
//! spawning, never during resolution. A dry-run launcher therefore leaves the
//! process directory unchanged.

mod launch;
mod resolve;
mod result;

pub use launch::Launcher;
pub use resolve::CommandResolver;
pub use result::{Invocation, LaunchContext};
