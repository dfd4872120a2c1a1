//! Command-line tokenizing and expansion.
//!
//! Supports:
//! - Backslash escaping: `my\ file`, `a\&b`
//! - Double quotes: `"string with spaces"`
//! - Native separators: `c:\dir` reads as `c:/dir`
//! - Home expansion: `~/x`, `~user/x`
//! - Full-path expansion: `=prog`

mod expand;
mod lexer;

pub use expand::{Expander, is_absolute_file_path};
pub use lexer::{Lexer, Token, escape, split_on_spaces, split_prefix_suffix, unescape};
