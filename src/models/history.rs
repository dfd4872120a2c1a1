//! Persisted history record types.

use std::fmt;

use serde::Serialize;

/// One row of the frequency table: how many times `text` was run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub count: u32,
    pub text: String,
}

impl HistoryEntry {
    pub fn new(count: u32, text: impl Into<String>) -> Self {
        Self {
            count,
            text: text.into(),
        }
    }

    /// Parse a `"<count> <text>"` line.
    ///
    /// A count that is not a number parses as 0; a line without a space is
    /// taken whole as the text with count 0.
    pub fn parse_line(line: &str) -> Self {
        match line.split_once(' ') {
            Some((count, text)) => Self::new(count.parse().unwrap_or(0), text),
            None => Self::new(0, line),
        }
    }
}

/// Formats as the on-disk `"<count> <text>"` line.
impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.count, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(HistoryEntry::parse_line("3 ls -la"), HistoryEntry::new(3, "ls -la"));
        assert_eq!(HistoryEntry::parse_line("x vim"), HistoryEntry::new(0, "vim"));
        assert_eq!(HistoryEntry::parse_line(" gimp"), HistoryEntry::new(0, "gimp"));
        assert_eq!(HistoryEntry::parse_line("lonely"), HistoryEntry::new(0, "lonely"));
    }

    #[test]
    fn test_display() {
        assert_eq!(HistoryEntry::new(12, "firefox").to_string(), "12 firefox");
    }
}
