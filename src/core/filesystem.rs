//! Real filesystem access for completion and resolution.
//!
//! [`PathIndex`] looks up executables on the search path and lists
//! directories, following the executable rules of a [`PlatformProfile`].

use std::env;
use std::fs;
use std::path::Path;

use crate::models::{PlatformKind, PlatformProfile};

/// Directory listing and executable lookup over the search path.
///
/// # Path Convention
///
/// Paths handed out by the index always use `/` as separator, also on the
/// Windows profile (where `PATH` entries are normalised on construction).
#[derive(Clone, Debug)]
pub struct PathIndex {
    /// Search-path directories, in lookup order
    dirs: Vec<String>,
    profile: PlatformProfile,
}

impl PathIndex {
    /// Create an index over explicit directories.
    pub fn new<P: AsRef<Path>>(dirs: impl IntoIterator<Item = P>, profile: PlatformProfile) -> Self {
        let dirs = dirs
            .into_iter()
            .map(|dir| dir.as_ref().to_string_lossy().replace('\\', "/"))
            .collect();
        Self { dirs, profile }
    }

    /// Create an index from a `PATH`-style list.
    pub fn from_path_list(list: &str, profile: PlatformProfile) -> Self {
        let dirs: Vec<&str> = list
            .split(profile.path_list_separator)
            .filter(|dir| !dir.is_empty())
            .collect();
        Self::new(dirs, profile)
    }

    /// Create an index from the process `PATH` variable.
    pub fn from_env(profile: PlatformProfile) -> Self {
        let list = env::var("PATH").unwrap_or_default();
        Self::from_path_list(&list, profile)
    }

    pub fn dirs(&self) -> &[String] {
        &self.dirs
    }

    pub fn profile(&self) -> &PlatformProfile {
        &self.profile
    }

    /// Full path of the first executable named `name` on the search path.
    ///
    /// Tries every directory in order and, within each, every platform suffix.
    pub fn which(&self, name: &str) -> Option<String> {
        if name.is_empty() {
            return None;
        }
        for dir in &self.dirs {
            for suffix in self.profile.executable_suffixes {
                let candidate = format!("{}/{}{}", dir, name, suffix);
                let path = Path::new(&candidate);
                if path.exists() && self.is_executable(path) && !path.is_dir() {
                    return Some(candidate);
                }
            }
        }
        None
    }

    /// Basenames of every entry directly inside `dir`, sorted.
    ///
    /// Unreadable directories list as empty.
    pub fn list_dir(&self, dir: impl AsRef<Path>) -> Vec<String> {
        let Ok(entries) = fs::read_dir(dir.as_ref()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .flatten()
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Whether `path` may be run: by extension on the Windows profile, by the
    /// execute permission bits elsewhere.
    pub fn is_executable(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        match self.profile.kind {
            PlatformKind::Windows => path
                .file_name()
                .map(|name| self.profile.has_executable_extension(&name.to_string_lossy()))
                .unwrap_or(false),
            PlatformKind::Posix => has_execute_bit(path),
        }
    }
}

#[cfg(unix)]
fn has_execute_bit(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path)
        .map(|meta| meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn has_execute_bit(path: &Path) -> bool {
    path.exists()
}
