//! URL scheme detection.
//!
//! Only the scheme is identified; the rest of the URL is passed through to
//! the handler untouched.

use std::sync::LazyLock;

use regex::Regex;

static SCHEME_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w*)://(.*)").expect("scheme pattern is valid"));

/// Schemes with a dedicated handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// `http://` and `https://`
    Http,
    File,
    Ssh,
}

impl Scheme {
    /// Known scheme for `name`, compared case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "http" | "https" => Some(Self::Http),
            "file" => Some(Self::File),
            "ssh" => Some(Self::Ssh),
            _ => None,
        }
    }
}

/// Split `scheme://rest` into its scheme name and remainder.
pub fn split_scheme(input: &str) -> Option<(&str, &str)> {
    let caps = SCHEME_URL.captures(input)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Scheme of `input` if it is a URL with a handled scheme.
pub fn detect_scheme(input: &str) -> Option<Scheme> {
    split_scheme(input).and_then(|(name, _)| Scheme::from_name(name))
}
