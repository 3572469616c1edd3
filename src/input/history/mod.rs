mod file_ops;

use std::path::PathBuf;

use crate::error::ShellError;
use self::file_ops::FileOps;

/// Order-preserving command history persisted to a plain-text file, one
/// entry per line, capped at `max_entries` (oldest dropped first).
pub struct History {
    entries: Vec<String>,
    file_ops: FileOps,
    max_entries: usize,
}

impl History {
    pub fn new(history_file: PathBuf, max_entries: usize) -> Result<Self, ShellError> {
        let file_ops = FileOps::new(history_file);
        let mut history = History {
            entries: file_ops.load_entries()?,
            file_ops,
            max_entries,
        };
        history.trim_entries();
        Ok(history)
    }

    pub fn add(&mut self, entry: &str) -> Result<(), ShellError> {
        let entry = entry.trim();
        if entry.is_empty() {
            return Ok(());
        }
        if self.entries.last().map(String::as_str) == Some(entry) {
            return Ok(());
        }

        self.entries.push(entry.to_string());
        self.trim_entries();
        self.file_ops.append_entry(entry)?;

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn trim_entries(&mut self) {
        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_add_skips_blank_and_repeated_entries() {
        let tmp = tempdir().unwrap();
        let mut history = History::new(tmp.path().join("hist"), 100).unwrap();

        history.add("ls").unwrap();
        history.add("   ").unwrap();
        history.add("ls").unwrap();
        history.add("pwd").unwrap();

        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_entries_survive_reload() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("hist");

        {
            let mut history = History::new(file.clone(), 100).unwrap();
            history.add("cd ..").unwrap();
            history.add("help").unwrap();
        }

        let history = History::new(file, 100).unwrap();
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_cap_drops_oldest() {
        let tmp = tempdir().unwrap();
        let mut history = History::new(tmp.path().join("hist"), 2).unwrap();

        history.add("one").unwrap();
        history.add("two").unwrap();
        history.add("three").unwrap();

        assert_eq!(history.len(), 2);
    }
}
