//! Utility modules.
//!
//! Provides:
//! - [`detect_scheme`], [`split_scheme`] - URL scheme detection

mod url;

pub use url::{Scheme, detect_scheme, split_scheme};
