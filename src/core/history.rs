//! Persistent, ranked history of launched commands.
//!
//! The history file holds the recent list (most recent first, one command per
//! line), a single blank line, then the frequency table as `count text`
//! lines:
//!
//! ```text
//! vim notes.txt
//! firefox
//!
//! 12 firefox
//! 3 vim notes.txt
//! ```
//!
//! The whole file is rewritten after every mutation. Read and write failures
//! are logged and otherwise ignored: the in-memory store stays authoritative
//! for the rest of the session.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{MAX_HISTORY_ENTRIES, MAX_RECENT_ENTRIES};
use crate::core::error::HistoryError;
use crate::models::HistoryEntry;

/// Recent list plus frequency table, backed by one file.
#[derive(Clone, Debug, Default)]
pub struct HistoryStore {
    /// Backing file; `None` keeps the store in memory only
    path: Option<PathBuf>,
    /// Sorted by descending count
    entries: Vec<HistoryEntry>,
    /// Most recent first, no duplicates
    recent: Vec<String>,
}

impl HistoryStore {
    /// A store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load the store backed by `path`.
    ///
    /// A missing file yields an empty store; an unreadable one is logged and
    /// also yields an empty store that still persists to `path`.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut store = match Self::read(&path) {
            Ok(store) => store,
            Err(err) => {
                tracing::warn!("{}", err);
                Self::default()
            }
        };
        store.path = Some(path);
        store
    }

    /// Read and parse `path` without absorbing errors.
    ///
    /// Invalid UTF-8 is decoded lossily so one bad byte only garbles its own line.
    pub fn read(path: &Path) -> Result<Self, HistoryError> {
        match fs::read(path) {
            Ok(bytes) => Ok(Self::parse(&String::from_utf8_lossy(&bytes))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(HistoryError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parse history file contents.
    pub fn parse(text: &str) -> Self {
        let mut entries = Vec::new();
        let mut recent = Vec::new();
        let mut in_recent = true;

        for line in text.lines() {
            if line.is_empty() {
                in_recent = false;
            } else if in_recent {
                recent.push(line.trim().to_string());
            } else {
                entries.push(HistoryEntry::parse_line(line));
            }
        }

        entries.sort_by(|a, b| b.count.cmp(&a.count));

        Self {
            path: None,
            entries,
            recent,
        }
    }

    /// Frequency table, highest count first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Recently run commands, most recent first.
    pub fn recent(&self) -> &[String] {
        &self.recent
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Texts of the frequency table, in rank order.
    pub fn entry_texts(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.text.as_str())
    }

    /// Record one more run of `text`.
    ///
    /// The entry moves ahead of every entry with an equal or lower count, so
    /// ties rank the most recently run first and truncation evicts the
    /// least recently run of the lowest-count entries.
    pub fn inc_count(&mut self, text: &str) {
        let count = match self.entries.iter().position(|entry| entry.text == text) {
            Some(idx) => self.entries.remove(idx).count.saturating_add(1),
            None => 1,
        };
        let rank = self
            .entries
            .iter()
            .position(|entry| entry.count <= count)
            .unwrap_or(self.entries.len());
        self.entries.insert(rank, HistoryEntry::new(count, text));
        self.entries.truncate(MAX_HISTORY_ENTRIES);

        self.recent.retain(|recent| recent != text);
        self.recent.insert(0, text.to_string());
        self.recent.truncate(MAX_RECENT_ENTRIES);

        self.save();
    }

    /// Forget every occurrence of `text`. Absent text is a no-op.
    pub fn delete(&mut self, text: &str) {
        self.entries.retain(|entry| entry.text != text);
        self.recent.retain(|recent| recent != text);

        self.save();
    }

    /// Rewrite the backing file from the in-memory state.
    pub fn persist(&self) -> Result<(), HistoryError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let write_err = |source| HistoryError::Write {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, self.render()).map_err(write_err)
    }

    /// File contents for the current state.
    pub fn render(&self) -> String {
        let mut text = String::new();
        for recent in &self.recent {
            text.push_str(recent);
            text.push('\n');
        }
        text.push('\n');
        for entry in &self.entries {
            text.push_str(&entry.to_string());
            text.push('\n');
        }
        text
    }

    fn save(&self) {
        if let Err(err) = self.persist() {
            tracing::warn!("{}; keeping history in memory", err);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(store: &HistoryStore) -> Vec<&str> {
        store.entry_texts().collect()
    }

    #[test]
    fn test_parse_file() {
        let store = HistoryStore::parse("vim\nls -la \n\n1 vim\n7 ls -la\nbad line\n");
        assert_eq!(store.recent(), &["vim".to_string(), "ls -la".to_string()]);
        assert_eq!(
            store.entries(),
            &[
                HistoryEntry::new(7, "ls -la"),
                HistoryEntry::new(1, "vim"),
                HistoryEntry::new(0, "line"),
            ]
        );
    }

    #[test]
    fn test_parse_keeps_load_order_for_ties() {
        let store = HistoryStore::parse("\n2 b\n2 a\n5 c\n2 d\n");
        assert_eq!(texts(&store), vec!["c", "b", "a", "d"]);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::load(dir.path().join("history"));
        assert!(store.entries().is_empty());
        assert!(store.recent().is_empty());
    }

    #[test]
    fn test_inc_count_ranks() {
        let mut store = HistoryStore::in_memory();
        store.inc_count("foo");
        store.inc_count("foo");
        store.inc_count("bar");
        assert_eq!(
            store.entries(),
            &[HistoryEntry::new(2, "foo"), HistoryEntry::new(1, "bar")]
        );
        assert_eq!(store.recent(), &["bar".to_string(), "foo".to_string()]);

        store.inc_count("bar");
        store.inc_count("bar");
        assert_eq!(texts(&store), vec!["bar", "foo"]);
    }

    #[test]
    fn test_recent_is_deduplicated() {
        let mut store = HistoryStore::in_memory();
        store.inc_count("a");
        store.inc_count("b");
        store.inc_count("a");
        assert_eq!(store.recent(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_delete() {
        let mut store = HistoryStore::in_memory();
        store.inc_count("foo");
        store.inc_count("foo");
        store.inc_count("bar");
        store.delete("foo");
        assert_eq!(store.entries(), &[HistoryEntry::new(1, "bar")]);
        assert_eq!(store.recent(), &["bar".to_string()]);

        store.delete("not there");
        assert_eq!(store.entries().len(), 1);
    }

    #[test]
    fn test_truncation_evicts_oldest_lowest() {
        let mut store = HistoryStore::in_memory();
        for i in 0..=MAX_HISTORY_ENTRIES {
            store.inc_count(&format!("cmd{}", i));
        }
        assert_eq!(store.entries().len(), MAX_HISTORY_ENTRIES);
        assert!(!texts(&store).contains(&"cmd0"));
        assert!(texts(&store).contains(&"cmd1"));
        assert_eq!(store.entries()[0].text, format!("cmd{}", MAX_HISTORY_ENTRIES));
        assert_eq!(store.recent().len(), MAX_RECENT_ENTRIES);
    }

    #[test]
    fn test_bumped_entry_survives_truncation() {
        let mut store = HistoryStore::in_memory();
        for i in 0..MAX_HISTORY_ENTRIES {
            store.inc_count(&format!("cmd{}", i));
        }
        store.inc_count("cmd0");
        store.inc_count("new");
        assert!(texts(&store).contains(&"cmd0"));
        assert!(!texts(&store).contains(&"cmd1"));
        assert_eq!(store.entries()[0], HistoryEntry::new(2, "cmd0"));
    }

    #[test]
    fn test_invalid_utf8_keeps_valid_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");
        fs::write(&path, b"vim\nls\n\n9 vim\n5 ls\n3 cat caf\xe9\n").unwrap();

        let mut store = HistoryStore::load(&path);
        assert_eq!(texts(&store), vec!["vim", "ls", "cat caf\u{FFFD}"]);

        store.inc_count("gimp");
        let reloaded = HistoryStore::load(&path);
        assert_eq!(
            &reloaded.entries()[..2],
            &[HistoryEntry::new(9, "vim"), HistoryEntry::new(5, "ls")]
        );
        assert_eq!(reloaded.recent(), &["gimp".to_string(), "vim".to_string(), "ls".to_string()]);
    }

    #[test]
    fn test_inc_count_saturates() {
        let mut store = HistoryStore::parse("\n4294967295 vim\n");
        store.inc_count("vim");
        assert_eq!(store.entries(), &[HistoryEntry::new(u32::MAX, "vim")]);
    }

    #[test]
    fn test_persist_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache").join("history");

        let mut store = HistoryStore::load(&path);
        store.inc_count("firefox");
        store.inc_count("vim notes.txt");
        store.inc_count("firefox");

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "firefox\nvim notes.txt\n\n2 firefox\n1 vim notes.txt\n");

        let reloaded = HistoryStore::load(&path);
        assert_eq!(reloaded.entries(), store.entries());
        assert_eq!(reloaded.recent(), store.recent());
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let dir = tempfile::tempdir().unwrap();
        // The history path is a directory, so every write fails.
        let mut store = HistoryStore::load(dir.path());
        store.inc_count("ls");
        assert!(store.persist().is_err());
        assert_eq!(store.entries(), &[HistoryEntry::new(1, "ls")]);
        assert_eq!(store.recent(), &["ls".to_string()]);
    }
}
