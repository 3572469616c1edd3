use std::fs;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};

use super::{Command, CommandError};
use crate::core::session::Session;

/// Lists the current directory: name, directory marker or byte size, and
/// last-modified timestamp, one entry per line, sorted by name.
#[derive(Clone)]
pub struct LsCommand;

/// What `ls` could learn about a single entry. Metadata failures degrade to
/// `Unknown` instead of aborting the listing.
enum EntryInfo {
    Known {
        is_dir: bool,
        size: u64,
        modified: String,
    },
    Unknown,
}

impl Default for LsCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl LsCommand {
    pub fn new() -> Self {
        Self
    }

    fn inspect(path: &Path) -> EntryInfo {
        let Ok(metadata) = fs::metadata(path) else {
            return EntryInfo::Unknown;
        };
        let Ok(modified) = metadata.modified() else {
            return EntryInfo::Unknown;
        };

        EntryInfo::Known {
            is_dir: metadata.is_dir(),
            size: metadata.len(),
            modified: format_timestamp(modified),
        }
    }

    fn render(name: &str, info: EntryInfo) -> String {
        match info {
            EntryInfo::Known {
                is_dir: true,
                modified,
                ..
            } => format!("{}/\t\t<DIR>\t\t{}", name, modified),
            EntryInfo::Known {
                is_dir: false,
                size,
                modified,
            } => format!("{}\t\t{} bytes\t{}", name, size, modified),
            EntryInfo::Unknown => format!("{}\t\t<UNKNOWN>\t<UNKNOWN>", name),
        }
    }
}

impl Command for LsCommand {
    fn execute(&self, session: &mut Session, _args: &[String]) -> Result<String, CommandError> {
        let dir = session.current_dir().to_path_buf();
        let entries = fs::read_dir(&dir).map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => {
                CommandError::PermissionDenied("listing directory".to_string())
            }
            std::io::ErrorKind::NotFound => {
                CommandError::NotFound("Directory not found".to_string())
            }
            _ => CommandError::Io(e),
        })?;

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();

        if names.is_empty() {
            return Ok("Directory is empty".to_string());
        }
        names.sort();

        let listing: Vec<String> = names
            .iter()
            .map(|name| Self::render(name, Self::inspect(&dir.join(name))))
            .collect();

        Ok(listing.join("\n"))
    }
}

fn format_timestamp(time: SystemTime) -> String {
    let local: DateTime<Local> = time.into();
    local.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_directory() {
        let tmp = tempdir().unwrap();
        let mut session = Session::at(tmp.path()).unwrap();

        let output = LsCommand::new().execute(&mut session, &[]).unwrap();
        assert_eq!(output, "Directory is empty");
    }

    #[test]
    fn test_one_line_per_entry_sorted() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("beta.txt"), "bb").unwrap();
        fs::write(tmp.path().join("alpha.txt"), "a").unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();

        let mut session = Session::at(tmp.path()).unwrap();
        let output = LsCommand::new().execute(&mut session, &[]).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("alpha.txt"));
        assert!(lines[1].starts_with("beta.txt"));
        assert!(lines[2].starts_with("sub/"));
    }

    #[test]
    fn test_directory_and_size_columns() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("data.bin"), [0u8; 5]).unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();

        let mut session = Session::at(tmp.path()).unwrap();
        let output = LsCommand::new().execute(&mut session, &[]).unwrap();

        assert!(output.contains("data.bin\t\t5 bytes"));
        assert!(output.contains("nested/\t\t<DIR>"));
    }

    #[test]
    fn test_timestamp_format() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("f"), "x").unwrap();

        let mut session = Session::at(tmp.path()).unwrap();
        let output = LsCommand::new().execute(&mut session, &[]).unwrap();

        // YYYY-MM-DD HH:MM:SS at the end of the line.
        let line = output.lines().next().unwrap();
        let stamp = &line[line.len() - 19..];
        assert_eq!(stamp.as_bytes()[4], b'-');
        assert_eq!(stamp.as_bytes()[10], b' ');
        assert_eq!(stamp.as_bytes()[13], b':');
    }
}
