//! Completion of launcher input from history, the filesystem and `PATH`.
//!
//! This module provides:
//! - Completion of the last token against history entries plus either
//!   filesystem entries (absolute paths) or executables on the search path
//! - Typo tolerance: exact prefix first, then edit distance 2, then 4
//! - Lazy expansion of missing parent directories (`/us/lo` → `/usr/local/`)
//! - Incremental reverse search through recent commands
//! - Parent-directory navigation of the last token

use std::path::Path;

use crate::config::DISTANCE_TIERS;
use crate::core::fuzzy::{case_insensitive_regex, match_candidates};
use crate::core::parser::{Expander, escape, is_absolute_file_path, split_prefix_suffix, unescape};
use crate::core::{HistoryStore, PathIndex};

/// Completion engine over borrowed session state.
pub struct CompletionEngine<'a> {
    history: &'a HistoryStore,
    paths: &'a PathIndex,
    home: &'a str,
}

impl<'a> CompletionEngine<'a> {
    pub fn new(history: &'a HistoryStore, paths: &'a PathIndex, home: &'a str) -> Self {
        Self {
            history,
            paths,
            home,
        }
    }

    // ========================================================================
    // Public API
    // ========================================================================

    /// Candidates for `input`, from the first distance tier that has any.
    ///
    /// Empty input offers the recent list.
    pub fn get_completion(&self, input: &str) -> Vec<String> {
        if input.is_empty() {
            return self.history.recent().to_vec();
        }

        DISTANCE_TIERS
            .iter()
            .map(|&corrections| self.complete_with_corrections(input, corrections))
            .find(|candidates| !candidates.is_empty())
            .unwrap_or_default()
    }

    /// Most recent command containing `input` anywhere (case-insensitive,
    /// `*` wildcard).
    pub fn get_reverse_completion(&self, input: &str) -> Option<String> {
        if input.is_empty() {
            return None;
        }
        let regex = case_insensitive_regex(input, false)?;
        self.history
            .recent()
            .iter()
            .find(|recent| regex.is_match(recent))
            .cloned()
    }

    /// `input` with the last path segment of its last token removed.
    ///
    /// `/usr/local/bin` → `/usr/local/`, `/usr` → `/`, and `/` stays `/`.
    /// A last token without any `/` is dropped entirely.
    pub fn get_parent_directory(&self, input: &str) -> String {
        let (prefix, suffix) = match split_prefix_suffix(input, true) {
            (prefix, Some(suffix)) => (prefix, suffix),
            (whole, None) => ("", whole),
        };

        let mut suffix = unescape(suffix);
        if suffix.len() > 1 && suffix.ends_with('/') {
            suffix.pop();
        }

        let parent = if suffix == "/" || (suffix.starts_with('/') && suffix.matches('/').count() == 1) {
            "/".to_string()
        } else {
            match suffix.rfind('/') {
                Some(idx) => suffix[..=idx].to_string(),
                None => return prefix.to_string(),
            }
        };

        let style = self.paths.profile().escape_style;
        format!("{} {}", prefix, escape(&parent, style)).trim().to_string()
    }

    // ========================================================================
    // Tiers
    // ========================================================================

    /// Complete the text after the last unescaped space.
    fn complete_with_corrections(&self, input: &str, corrections: usize) -> Vec<String> {
        match split_prefix_suffix(input, true) {
            (prefix, Some(suffix)) => {
                let mut candidates = self.complete_history(&unescape(input), corrections);
                candidates.extend(
                    self.complete_partial(&unescape(suffix), corrections)
                        .into_iter()
                        .map(|candidate| format!("{} {}", prefix, candidate)),
                );
                dedup(candidates)
            }
            (whole, None) => self.complete_partial(&unescape(whole), corrections),
        }
    }

    /// Complete a single unescaped token.
    fn complete_partial(&self, input: &str, corrections: usize) -> Vec<String> {
        if input.is_empty() {
            return Vec::new();
        }

        let input = self.expander().expand(input, false);
        let mut candidates = self.complete_history(&input, corrections);
        if is_absolute_file_path(&input, self.paths.profile()) {
            candidates.extend(self.complete_dir(&input, corrections));
        } else {
            candidates.extend(self.complete_path(&input, corrections));
        }
        dedup(candidates)
    }

    // ========================================================================
    // Sources
    // ========================================================================

    fn complete_history(&self, input: &str, corrections: usize) -> Vec<String> {
        let texts: Vec<&str> = self.history.entry_texts().collect();
        match_candidates(&texts, input, corrections)
    }

    /// Complete an absolute path.
    ///
    /// When a parent directory does not exist, the deepest missing ancestor is
    /// completed first (exact prefix only) and the rest of the input appended
    /// to each result before completing again.
    fn complete_dir(&self, input: &str, corrections: usize) -> Vec<String> {
        let style = self.paths.profile().escape_style;

        let mut segments: Vec<&str> = input.split('/').collect();
        while segments.last() == Some(&"") {
            segments.pop();
        }

        if !is_dir(&segments.join("/")) {
            for depth in 2..segments.len() {
                let ancestor = segments[..depth].join("/");
                if !is_dir(&ancestor) {
                    let rest = segments[depth..].join("/");
                    return self
                        .complete_dir(&ancestor, 0)
                        .into_iter()
                        .flat_map(|completed| {
                            self.complete_dir(&unescape(&format!("{}{}", completed, rest)), corrections)
                        })
                        .collect();
                }
            }
        }

        let mut input = input;
        if input.len() > 1 && input.ends_with('/') && !is_dir(input) {
            input = &input[..input.len() - 1];
        }

        let (dir, show_hidden) = if input.ends_with('/') {
            (input.to_string(), false)
        } else {
            let name = input.rsplit('/').next().unwrap_or_default();
            (dirname(input), name.starts_with('.'))
        };

        let listing: Vec<String> = self
            .paths
            .list_dir(&dir)
            .into_iter()
            .filter(|name| name.starts_with('.') == show_hidden)
            .map(|name| join_path(&dir, &name))
            .collect();

        match_candidates(&listing, input, corrections)
            .into_iter()
            .map(|path| {
                let path = if is_dir(&path) { format!("{}/", path) } else { path };
                escape(&path, style)
            })
            .collect()
    }

    /// Complete an executable name from the search path.
    ///
    /// A leading `=` asks for the full path instead of the bare name.
    fn complete_path(&self, input: &str, corrections: usize) -> Vec<String> {
        let profile = self.paths.profile();
        let (input, full_path) = match input.strip_prefix('=') {
            Some(rest) => (rest, true),
            None => (input, false),
        };

        let mut found: Vec<(&str, String)> = Vec::new();
        for dir in self.paths.dirs() {
            let names: Vec<String> = self
                .paths
                .list_dir(dir)
                .into_iter()
                .filter(|name| !name.starts_with('.'))
                .collect();
            for name in match_candidates(&names, input, corrections) {
                found.push((dir.as_str(), name));
            }
        }

        if profile.is_windows() {
            found.retain(|(_, name)| profile.has_executable_extension(name));
            if !full_path {
                for (_, name) in &mut found {
                    *name = profile.strip_executable_extension(name).to_string();
                }
            }
        }

        let mut found: Vec<(&str, String)> = found
            .into_iter()
            .map(|(dir, name)| (dir, escape(&name, profile.escape_style)))
            .collect();
        found.sort_by(|a, b| a.1.cmp(&b.1));

        found
            .into_iter()
            .map(|(dir, name)| {
                if full_path {
                    format!("{}/{}", dir, name)
                } else {
                    name
                }
            })
            .collect()
    }

    fn expander(&self) -> Expander<'_> {
        Expander::new(self.home, self.paths)
    }
}

// ============================================================================
// Utilities
// ============================================================================

fn is_dir(path: &str) -> bool {
    !path.is_empty() && Path::new(path).is_dir()
}

/// Directory part of a `/`-separated path (`/usr/lo` → `/usr`, `/lo` → `/`).
fn dirname(path: &str) -> String {
    match path.rfind('/') {
        Some(0) => "/".to_string(),
        Some(idx) => path[..idx].to_string(),
        None => ".".to_string(),
    }
}

fn join_path(dir: &str, name: &str) -> String {
    if dir.ends_with('/') {
        format!("{}{}", dir, name)
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Remove duplicates, keeping the first occurrence.
fn dedup(candidates: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.clone()))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
