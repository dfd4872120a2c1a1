//! Platform-dependent behaviour gathered into one value object.
//!
//! Everything that differs between a POSIX desktop and a Windows-like one
//! (search-path separator, executable suffixes, escaping style, default
//! handler programs) lives here and is selected once at startup.

use std::fmt;
use std::str::FromStr;

use super::HandlerConfig;

/// Which family of platform rules to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlatformKind {
    Posix,
    Windows,
}

/// How the tokenizer escapes strings for display and re-parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscapeStyle {
    /// Prefix shell metacharacters with a backslash.
    Backslash,
    /// Wrap strings containing a space in double quotes, backslash otherwise.
    QuoteSpaces,
}

/// Suffixes tried when looking an executable up on the search path.
const POSIX_SUFFIXES: &[&str] = &[""];
const WINDOWS_SUFFIXES: &[&str] = &["", ".exe", ".bat", ".lnk", ".exe.lnk", ".bat.lnk"];

/// Extensions that mark a file as executable on the Windows profile.
const WINDOWS_EXECUTABLE_EXTENSIONS: &[&str] = &["exe", "lnk", "bat"];

/// Platform rules passed into the tokenizer, path index and resolver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformProfile {
    pub kind: PlatformKind,
    /// Separator between entries of the `PATH` variable.
    pub path_list_separator: char,
    pub escape_style: EscapeStyle,
    pub executable_suffixes: &'static [&'static str],
}

impl PlatformProfile {
    pub fn posix() -> Self {
        Self {
            kind: PlatformKind::Posix,
            path_list_separator: ':',
            escape_style: EscapeStyle::Backslash,
            executable_suffixes: POSIX_SUFFIXES,
        }
    }

    pub fn windows() -> Self {
        Self {
            kind: PlatformKind::Windows,
            path_list_separator: ';',
            escape_style: EscapeStyle::QuoteSpaces,
            executable_suffixes: WINDOWS_SUFFIXES,
        }
    }

    /// Profile of the platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::windows()
        } else {
            Self::posix()
        }
    }

    pub fn is_windows(&self) -> bool {
        self.kind == PlatformKind::Windows
    }

    /// Built-in handler programs used when no config file overrides them.
    pub fn default_handlers(&self) -> HandlerConfig {
        match self.kind {
            PlatformKind::Posix => HandlerConfig {
                http: "firefox".to_string(),
                ssh: "xterm -e ssh".to_string(),
                file: "gnome-open".to_string(),
                directory: "nautilus".to_string(),
                terminal: "Terminal -e".to_string(),
            },
            PlatformKind::Windows => HandlerConfig {
                http: "firefox".to_string(),
                ssh: "ssh".to_string(),
                file: "start".to_string(),
                directory: "explorer".to_string(),
                terminal: "cmd".to_string(),
            },
        }
    }

    /// Whether `name` carries one of the Windows executable extensions.
    pub fn has_executable_extension(&self, name: &str) -> bool {
        self.executable_extension(name).is_some()
    }

    /// Strip a Windows executable extension (`.exe`, `.lnk`, `.bat`) if present.
    pub fn strip_executable_extension<'a>(&self, name: &'a str) -> &'a str {
        match self.executable_extension(name) {
            Some(ext) => &name[..name.len() - ext.len() - 1],
            None => name,
        }
    }

    fn executable_extension(&self, name: &str) -> Option<&'static str> {
        let (_, ext) = name.rsplit_once('.')?;
        WINDOWS_EXECUTABLE_EXTENSIONS
            .iter()
            .copied()
            .find(|known| known.eq_ignore_ascii_case(ext))
    }
}

impl Default for PlatformProfile {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Posix => write!(f, "posix"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

impl FromStr for PlatformKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "posix" | "unix" | "linux" => Ok(Self::Posix),
            "windows" | "win" => Ok(Self::Windows),
            other => Err(format!("unknown platform '{}'", other)),
        }
    }
}

impl From<PlatformKind> for PlatformProfile {
    fn from(kind: PlatformKind) -> Self {
        match kind {
            PlatformKind::Posix => Self::posix(),
            PlatformKind::Windows => Self::windows(),
        }
    }
}
