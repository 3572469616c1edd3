use std::fs::{self, OpenOptions};
use std::io::{self, Write as _};
use std::path::Path;

use super::{Command, CommandError};
use crate::core::session::Session;

const WRITE_USAGE: &str = "Usage: write {directory} {filename} {content}\n       write -add {directory} {filename} {content}\n       write -line {directory} {filename} {line_number} {content}\n       write -replace {directory} {filename} {old_text} {new_text}\n       write -insert {directory} {filename} {line_number} {content}";
const LINE_USAGE: &str = "Usage: write -line {directory} {filename} {line_number} {content}";
const REPLACE_USAGE: &str = "Usage: write -replace {directory} {filename} {old_text} {new_text}";
const INSERT_USAGE: &str = "Usage: write -insert {directory} {filename} {line_number} {content}";

/// One of the mutually exclusive mutations `write` can apply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteRequest {
    /// Replace the whole file, no trailing newline added.
    Overwrite { content: String },
    /// Append as a new line, separated from existing content by one newline.
    Append { content: String },
    /// Replace the 1-indexed line, padding with blank lines when short.
    SetLine { line: usize, content: String },
    /// Replace every occurrence of `old` with `new`.
    Replace { old: String, new: String },
    /// Insert before the 1-indexed line, padding with blank lines when the
    /// position is past the end.
    Insert { line: usize, content: String },
}

struct WriteArgs {
    directory: String,
    filename: String,
    request: WriteRequest,
}

#[derive(Clone)]
pub struct WriteCommand;

impl Default for WriteCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl WriteCommand {
    pub fn new() -> Self {
        Self
    }
}

fn parse_line_number(arg: &str) -> Result<usize, CommandError> {
    let n: i64 = arg
        .parse()
        .map_err(|_| CommandError::InvalidArgument("Line number must be an integer".to_string()))?;
    if n < 1 {
        return Err(CommandError::InvalidArgument(
            "Line number must be positive".to_string(),
        ));
    }
    Ok(n as usize)
}

fn parse(args: &[String]) -> Result<WriteArgs, CommandError> {
    if args.len() < 3 {
        return Err(CommandError::Usage(WRITE_USAGE));
    }

    if !args[0].starts_with('-') {
        return Ok(WriteArgs {
            directory: args[0].clone(),
            filename: args[1].clone(),
            request: WriteRequest::Overwrite {
                content: args[2..].join(" "),
            },
        });
    }

    let directory = args[1].clone();
    let filename = args[2].clone();
    let extras = &args[3..];

    let request = match args[0].as_str() {
        "-add" => WriteRequest::Append {
            content: extras.join(" "),
        },
        "-line" => {
            if extras.len() < 2 {
                return Err(CommandError::Usage(LINE_USAGE));
            }
            WriteRequest::SetLine {
                line: parse_line_number(&extras[0])?,
                content: extras[1..].join(" "),
            }
        }
        "-replace" => {
            if extras.len() < 2 {
                return Err(CommandError::Usage(REPLACE_USAGE));
            }
            WriteRequest::Replace {
                old: extras[0].clone(),
                new: extras[1..].join(" "),
            }
        }
        "-insert" => {
            if extras.len() < 2 {
                return Err(CommandError::Usage(INSERT_USAGE));
            }
            WriteRequest::Insert {
                line: parse_line_number(&extras[0])?,
                content: extras[1..].join(" "),
            }
        }
        _ => return Err(CommandError::Usage(WRITE_USAGE)),
    };

    Ok(WriteArgs {
        directory,
        filename,
        request,
    })
}

fn permission(filename: &str) -> impl Fn(io::Error) -> CommandError + '_ {
    move |e| match e.kind() {
        io::ErrorKind::PermissionDenied => {
            CommandError::PermissionDenied(format!("writing to '{}'", filename))
        }
        _ => CommandError::Io(e),
    }
}

fn load_lines(path: &Path, filename: &str) -> Result<Vec<String>, CommandError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::PermissionDenied => {
            CommandError::PermissionDenied(format!("reading '{}'", filename))
        }
        io::ErrorKind::InvalidData => {
            CommandError::Decode(format!("Cannot edit '{}' - file may be binary", filename))
        }
        _ => CommandError::Io(e),
    })?;
    Ok(content.lines().map(str::to_string).collect())
}

fn store_lines(path: &Path, filename: &str, lines: &[String]) -> Result<(), CommandError> {
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(path, content).map_err(permission(filename))
}

impl Command for WriteCommand {
    fn execute(&self, session: &mut Session, args: &[String]) -> Result<String, CommandError> {
        let parsed = parse(args)?;
        let dir_path = session.resolve_dir(&parsed.directory);
        let file_path = dir_path.join(&parsed.filename);
        let filename = &parsed.filename;

        if dir_path.exists() && !dir_path.is_dir() {
            return Err(CommandError::NotADirectory(format!(
                "'{}'",
                parsed.directory
            )));
        }

        // Intermediate directories are created before any mode runs.
        fs::create_dir_all(&dir_path).map_err(permission(filename))?;

        match parsed.request {
            WriteRequest::Overwrite { content } => {
                fs::write(&file_path, content).map_err(permission(filename))?;
                Ok(format!(
                    "File '{}' written successfully to {}",
                    filename,
                    file_path.display()
                ))
            }
            WriteRequest::Append { content } => {
                let existed = file_path.exists();
                let mut file = OpenOptions::new()
                    .append(true)
                    .create(true)
                    .open(&file_path)
                    .map_err(permission(filename))?;
                if existed {
                    write!(file, "\n{}", content).map_err(permission(filename))?;
                } else {
                    write!(file, "{}", content).map_err(permission(filename))?;
                }
                Ok(format!(
                    "Content added to '{}' at {}",
                    filename,
                    file_path.display()
                ))
            }
            WriteRequest::SetLine { line, content } => {
                let mut lines = load_lines(&file_path, filename)?;
                while lines.len() < line {
                    lines.push(String::new());
                }
                lines[line - 1] = content;
                store_lines(&file_path, filename, &lines)?;
                Ok(format!(
                    "Line {} in '{}' replaced successfully",
                    line, filename
                ))
            }
            WriteRequest::Replace { old, new } => {
                if !file_path.exists() {
                    return Err(CommandError::NotFound(format!(
                        "File '{}' does not exist",
                        filename
                    )));
                }
                let content = fs::read_to_string(&file_path).map_err(|e| match e.kind() {
                    io::ErrorKind::InvalidData => CommandError::Decode(format!(
                        "Cannot edit '{}' - file may be binary",
                        filename
                    )),
                    _ => permission(filename)(e),
                })?;
                if !content.contains(&old) {
                    return Err(CommandError::NotFound(format!(
                        "Text '{}' not found in '{}'",
                        old, filename
                    )));
                }
                // Replaces every occurrence, not just the first.
                fs::write(&file_path, content.replace(&old, &new))
                    .map_err(permission(filename))?;
                Ok(format!("Text replaced in '{}' successfully", filename))
            }
            WriteRequest::Insert { line, content } => {
                let mut lines = load_lines(&file_path, filename)?;
                let index = line - 1;
                if index <= lines.len() {
                    lines.insert(index, content);
                } else {
                    while lines.len() < index {
                        lines.push(String::new());
                    }
                    lines.push(content);
                }
                store_lines(&file_path, filename, &lines)?;
                Ok(format!(
                    "Content inserted at line {} in '{}' successfully",
                    line, filename
                ))
            }
        }
    }
}
