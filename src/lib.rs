//! Run-dialog core: completion, ranked history and handler dispatch.
//!
//! The front-end (see the `drun` binary) drives a [`Session`](app::Session)
//! and owns all control flow; the library only answers queries and launches
//! resolved commands.

pub mod app;
pub mod config;
pub mod core;
pub mod models;
pub mod utils;
