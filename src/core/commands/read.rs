use std::fs;
use std::io;
use std::path::Path;

use super::{Command, CommandError};
use crate::core::session::Session;

const READ_USAGE: &str = "Usage: read {directory} {filename}\n       read -lines {directory} {filename} {start} {end}\n       read -tail {directory} {filename} {lines}\n       read -head {directory} {filename} {lines}\n       read -count {directory} {filename}";
const LINES_USAGE: &str = "Usage: read -lines {directory} {filename} {start_line} {end_line}";
const TAIL_USAGE: &str = "Usage: read -tail {directory} {filename} {number_of_lines}";
const HEAD_USAGE: &str = "Usage: read -head {directory} {filename} {number_of_lines}";

const SEPARATOR_WIDTH: usize = 30;

/// One of the mutually exclusive ways `read` can slice a file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReadRequest {
    /// Entire content.
    Full,
    /// 1-indexed inclusive `start`, `end` used literally as the exclusive
    /// slice bound.
    Lines { start: usize, end: usize },
    /// Last `n` lines.
    Tail(usize),
    /// First `n` lines.
    Head(usize),
    /// Line, word, and character statistics.
    Count,
}

struct ReadArgs {
    directory: String,
    filename: String,
    request: ReadRequest,
}

#[derive(Clone)]
pub struct ReadCommand;

impl Default for ReadCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ReadCommand {
    pub fn new() -> Self {
        Self
    }
}

fn parse_line_count(arg: &str) -> Result<usize, CommandError> {
    let n: i64 = arg.parse().map_err(|_| {
        CommandError::InvalidArgument("Number of lines must be an integer".to_string())
    })?;
    Ok(n.max(0) as usize)
}

/// Splits the argument list into directory, filename, and request. The first
/// argument is a modifier when it starts with `-`; the modifier set is
/// closed, so anything else starting with `-` is a usage error.
fn parse(args: &[String]) -> Result<ReadArgs, CommandError> {
    if args.len() < 2 {
        return Err(CommandError::Usage(READ_USAGE));
    }

    if !args[0].starts_with('-') {
        return Ok(ReadArgs {
            directory: args[0].clone(),
            filename: args[1].clone(),
            request: ReadRequest::Full,
        });
    }

    if args.len() < 3 {
        return Err(CommandError::Usage(READ_USAGE));
    }
    let directory = args[1].clone();
    let filename = args[2].clone();
    let extras = &args[3..];

    let request = match args[0].as_str() {
        "-lines" => {
            if extras.len() < 2 {
                return Err(CommandError::Usage(LINES_USAGE));
            }
            let start: i64 = extras[0].parse().map_err(|_| {
                CommandError::InvalidArgument("Line numbers must be integers".to_string())
            })?;
            let end: i64 = extras[1].parse().map_err(|_| {
                CommandError::InvalidArgument("Line numbers must be integers".to_string())
            })?;
            ReadRequest::Lines {
                start: start.max(1) as usize,
                end: end.max(0) as usize,
            }
        }
        "-tail" => {
            let arg = extras.first().ok_or(CommandError::Usage(TAIL_USAGE))?;
            ReadRequest::Tail(parse_line_count(arg)?)
        }
        "-head" => {
            let arg = extras.first().ok_or(CommandError::Usage(HEAD_USAGE))?;
            ReadRequest::Head(parse_line_count(arg)?)
        }
        "-count" => ReadRequest::Count,
        _ => return Err(CommandError::Usage(READ_USAGE)),
    };

    Ok(ReadArgs {
        directory,
        filename,
        request,
    })
}

fn load_text(path: &Path, filename: &str) -> Result<String, CommandError> {
    if !path.exists() {
        return Err(CommandError::NotFound(format!(
            "File '{}' not found",
            filename
        )));
    }
    if !path.is_file() {
        return Err(CommandError::NotAFile(format!("'{}'", filename)));
    }

    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::PermissionDenied => {
            CommandError::PermissionDenied(format!("reading '{}'", filename))
        }
        _ => CommandError::Io(e),
    })?;

    String::from_utf8(bytes).map_err(|_| {
        CommandError::Decode(format!("Cannot read '{}' - file may be binary", filename))
    })
}

fn framed(header: String, body: &str) -> String {
    format!("{}\n{}\n{}", header, "-".repeat(SEPARATOR_WIDTH), body)
}

impl Command for ReadCommand {
    fn execute(&self, session: &mut Session, args: &[String]) -> Result<String, CommandError> {
        let parsed = parse(args)?;
        let path = session.resolve_file(&parsed.directory, &parsed.filename);
        let content = load_text(&path, &parsed.filename)?;
        let filename = &parsed.filename;

        let output = match parsed.request {
            ReadRequest::Full => framed(format!("Content of {}:", filename), &content),
            ReadRequest::Lines { start, end } => {
                let lines: Vec<&str> = content.lines().collect();
                let from = start - 1;
                let to = end.min(lines.len());
                let body = if from < to {
                    lines[from..to].join("\n")
                } else {
                    String::new()
                };
                framed(format!("Lines {}-{} of {}:", start, end, filename), &body)
            }
            ReadRequest::Tail(n) => {
                let lines: Vec<&str> = content.lines().collect();
                let taken = n.min(lines.len());
                let body = lines[lines.len() - taken..].join("\n");
                framed(format!("Last {} lines of {}:", taken, filename), &body)
            }
            ReadRequest::Head(n) => {
                let lines: Vec<&str> = content.lines().collect();
                let taken = n.min(lines.len());
                let body = lines[..taken].join("\n");
                framed(format!("First {} lines of {}:", taken, filename), &body)
            }
            ReadRequest::Count => {
                let line_count = content.lines().count();
                let word_count: usize =
                    content.lines().map(|l| l.split_whitespace().count()).sum();
                let char_count: usize = content.lines().map(|l| l.chars().count()).sum();
                format!(
                    "File statistics for {}:\nLines: {}\nWords: {}\nCharacters: {}",
                    filename, line_count, word_count, char_count
                )
            }
        };

        Ok(output)
    }
}
