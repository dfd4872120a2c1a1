//! Token expansion for home directories, `file://` URLs and `=program`.
//!
//! Handles:
//! - `~/x` → `$HOME/x` (and `~\x` on the Windows profile)
//! - `~user/x` → that user's home directory (POSIX profile, via `/etc/passwd`)
//! - `file:///x` → `/x` for absolute paths
//! - `=prog` → full path of `prog` on the search path (resolution only)

use std::fs;

use super::lexer::{Lexer, escape};
use crate::core::PathIndex;
use crate::models::PlatformProfile;

const PASSWD_FILE: &str = "/etc/passwd";

/// Expands single tokens and whole command lines.
#[derive(Clone, Debug)]
pub struct Expander<'a> {
    home: &'a str,
    paths: &'a PathIndex,
}

impl<'a> Expander<'a> {
    pub fn new(home: &'a str, paths: &'a PathIndex) -> Self {
        Self { home, paths }
    }

    fn profile(&self) -> &PlatformProfile {
        self.paths.profile()
    }

    /// Expand one unescaped token.
    ///
    /// With `single_match`, a relative `=prog` token is replaced by the full
    /// path of `prog` when it is found on the search path.
    pub fn expand(&self, input: &str, single_match: bool) -> String {
        let input = self.expand_home(input);

        if is_absolute_file_path(&input, self.profile()) {
            let path = input.strip_prefix("file://").unwrap_or(&input);
            if self.profile().is_windows() {
                return path.replace('\\', "/");
            }
            return path.to_string();
        }

        if single_match
            && let Some(name) = input.strip_prefix('=')
            && let Some(resolved) = self.paths.which(name)
        {
            return resolved;
        }

        input
    }

    /// Split, unescape, expand and re-escape every token, joined by single spaces.
    ///
    /// On the Windows profile the result uses native `\` separators.
    pub fn expand_all(&self, input: &str) -> String {
        let style = self.profile().escape_style;
        let expanded = Lexer::new(input)
            .map(|token| escape(&self.expand(&token.unescaped(), true), style))
            .collect::<Vec<_>>()
            .join(" ");

        if self.profile().is_windows() {
            expanded.replace('/', "\\")
        } else {
            expanded
        }
    }

    /// Replace a leading `~` form with the matching home directory.
    pub fn expand_home(&self, input: &str) -> String {
        if let Some(rest) = input.strip_prefix("~/") {
            return format!("{}/{}", self.home, rest);
        }

        if self.profile().is_windows() {
            if let Some(rest) = input.strip_prefix("~\\") {
                return format!("{}/{}", self.home, rest);
            }
            return input.to_string();
        }

        let Some(rest) = input.strip_prefix('~') else {
            return input.to_string();
        };
        let (user, tail) = match rest.find('/') {
            Some(idx) => rest.split_at(idx),
            None => (rest, ""),
        };
        if user.is_empty() {
            return format!("{}{}", self.home, tail);
        }
        match user_home(user) {
            Some(home) => format!("{}{}", home, tail),
            None => input.to_string(),
        }
    }
}

/// Whether `input` names an absolute path: leading `/`, a drive letter on the
/// Windows profile, or a `file://` URL.
pub fn is_absolute_file_path(input: &str, profile: &PlatformProfile) -> bool {
    if profile.is_windows() && input.chars().nth(1) == Some(':') {
        return true;
    }
    input.starts_with('/') || input.starts_with("file://")
}

/// Home directory of `user` according to the password database.
fn user_home(user: &str) -> Option<String> {
    let passwd = fs::read_to_string(PASSWD_FILE).ok()?;
    passwd_home(&passwd, user)
}

fn passwd_home(passwd: &str, user: &str) -> Option<String> {
    passwd.lines().find_map(|line| {
        let fields: Vec<&str> = line.split(':').collect();
        (fields.len() >= 6 && fields[0] == user).then(|| fields[5].to_string())
    })
}

// =============================================================================
// Tests
// =============================================================================
