use std::collections::BTreeMap;
use std::io;

mod cd;
mod guython;
mod help;
mod ls;
mod pwd;
mod read;
mod ver;
mod write;

pub use cd::CdCommand;
pub use guython::GuythonCommand;
pub use help::HelpCommand;
pub use ls::LsCommand;
pub use pwd::PwdCommand;
pub use read::{ReadCommand, ReadRequest};
pub use ver::VerCommand;
pub use write::{WriteCommand, WriteRequest};

use crate::core::session::Session;
use crate::process::ProcessError;

/// Every word the dispatcher recognizes, including the loop-level `exit`.
pub const COMMAND_NAMES: &[&str] = &[
    "cd", "exit", "guython", "help", "ls", "pwd", "read", "ver", "write",
];

/// Failure modes a handler can surface. Each renders as descriptive text;
/// none of them terminates the session.
#[derive(Debug)]
pub enum CommandError {
    /// Path, file, substring, or interpreter lookup failed.
    NotFound(String),
    PermissionDenied(String),
    NotADirectory(String),
    NotAFile(String),
    /// Non-integer where an integer was expected, or a bad parameter.
    InvalidArgument(String),
    /// File content is not valid text.
    Decode(String),
    /// Insufficient or malformed arguments; carries the usage block.
    Usage(&'static str),
    Unknown { command: String, available: String },
    Process(ProcessError),
    Io(io::Error),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::NotFound(msg) => write!(f, "Error: {}", msg),
            CommandError::PermissionDenied(msg) => write!(f, "Error: Permission denied {}", msg),
            CommandError::NotADirectory(msg) => write!(f, "Error: {} is not a directory", msg),
            CommandError::NotAFile(msg) => write!(f, "Error: {} is not a file", msg),
            CommandError::InvalidArgument(msg) => write!(f, "Error: {}", msg),
            CommandError::Decode(msg) => write!(f, "Error: {}", msg),
            CommandError::Usage(usage) => write!(f, "{}", usage),
            CommandError::Unknown { command, available } => {
                write!(f, "Unknown command: {}\nAvailable commands: {}", command, available)
            }
            CommandError::Process(err) => write!(f, "Error: {}", err),
            CommandError::Io(err) => write!(f, "Error: {}", err),
        }
    }
}

impl From<ProcessError> for CommandError {
    fn from(err: ProcessError) -> Self {
        CommandError::Process(err)
    }
}

impl std::error::Error for CommandError {}

pub trait Command {
    fn execute(&self, session: &mut Session, args: &[String]) -> Result<String, CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Cd(CdCommand),
    Guython(GuythonCommand),
    Help(HelpCommand),
    Ls(LsCommand),
    Pwd(PwdCommand),
    Read(ReadCommand),
    Ver(VerCommand),
    Write(WriteCommand),
}

impl Command for CommandType {
    fn execute(&self, session: &mut Session, args: &[String]) -> Result<String, CommandError> {
        match self {
            CommandType::Cd(cmd) => cmd.execute(session, args),
            CommandType::Guython(cmd) => cmd.execute(session, args),
            CommandType::Help(cmd) => cmd.execute(session, args),
            CommandType::Ls(cmd) => cmd.execute(session, args),
            CommandType::Pwd(cmd) => cmd.execute(session, args),
            CommandType::Read(cmd) => cmd.execute(session, args),
            CommandType::Ver(cmd) => cmd.execute(session, args),
            CommandType::Write(cmd) => cmd.execute(session, args),
        }
    }
}

/// Dispatch table mapping command words to handlers. The command word is
/// case-insensitive; `exit` is recognized by the shell loop, not here.
#[derive(Clone)]
pub struct CommandExecutor {
    commands: BTreeMap<String, CommandType>,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor {
    pub fn new() -> Self {
        let mut executor = Self {
            commands: BTreeMap::new(),
        };

        executor
            .commands
            .insert("cd".to_string(), CommandType::Cd(CdCommand::new()));
        executor.commands.insert(
            "guython".to_string(),
            CommandType::Guython(GuythonCommand::new()),
        );
        executor
            .commands
            .insert("help".to_string(), CommandType::Help(HelpCommand::new()));
        executor
            .commands
            .insert("ls".to_string(), CommandType::Ls(LsCommand::new()));
        executor
            .commands
            .insert("pwd".to_string(), CommandType::Pwd(PwdCommand::new()));
        executor
            .commands
            .insert("read".to_string(), CommandType::Read(ReadCommand::new()));
        executor
            .commands
            .insert("ver".to_string(), CommandType::Ver(VerCommand::new()));
        executor
            .commands
            .insert("write".to_string(), CommandType::Write(WriteCommand::new()));

        executor
    }

    pub fn execute(
        &self,
        session: &mut Session,
        command: &str,
        args: &[String],
    ) -> Result<String, CommandError> {
        let name = command.to_lowercase();
        match self.commands.get(&name) {
            Some(cmd) => cmd.execute(session, args),
            None => Err(CommandError::Unknown {
                command: command.to_string(),
                available: COMMAND_NAMES.join(", "),
            }),
        }
    }

    pub fn is_builtin(&self, command: &str) -> bool {
        self.commands.contains_key(&command.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn setup() -> (CommandExecutor, Session, tempfile::TempDir) {
        let tmp = tempdir().expect("temp dir");
        let session = Session::at(tmp.path()).expect("session");
        (CommandExecutor::new(), session, tmp)
    }

    fn run(
        executor: &CommandExecutor,
        session: &mut Session,
        command: &str,
        args: &[&str],
    ) -> Result<String, CommandError> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        executor.execute(session, command, &args)
    }

    #[test]
    fn test_unknown_command() {
        let (executor, mut session, _tmp) = setup();
        let before = session.current_dir().to_path_buf();

        let err = run(&executor, &mut session, "frobnicate", &[]).unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, CommandError::Unknown { .. }));
        assert!(message.contains("Unknown command: frobnicate"));
        assert!(message.contains("help"));

        // State must be untouched by an unknown command.
        assert_eq!(session.current_dir(), before);
    }

    #[test]
    fn test_command_word_is_case_insensitive() {
        let (executor, mut session, _tmp) = setup();
        assert!(run(&executor, &mut session, "PWD", &[]).is_ok());
        assert!(run(&executor, &mut session, "Ls", &[]).is_ok());
    }

    #[test]
    fn test_builtin_detection() {
        let (executor, _session, _tmp) = setup();
        assert!(executor.is_builtin("read"));
        assert!(executor.is_builtin("WRITE"));
        assert!(!executor.is_builtin("exit"));
        assert!(!executor.is_builtin(""));
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let (executor, mut session, _tmp) = setup();

        run(&executor, &mut session, "write", &["", "note.txt", "hello", "world"])
            .expect("write");
        let output = run(&executor, &mut session, "read", &["", "note.txt"]).expect("read");

        assert!(output.ends_with("hello world"));
        assert_eq!(
            fs::read_to_string(session.current_dir().join("note.txt")).expect("file"),
            "hello world"
        );
    }

    #[test]
    fn test_add_twice_separates_with_one_newline() {
        let (executor, mut session, _tmp) = setup();

        run(&executor, &mut session, "write", &["-add", "", "log.txt", "first"]).expect("add");
        run(&executor, &mut session, "write", &["-add", "", "log.txt", "second"]).expect("add");

        assert_eq!(
            fs::read_to_string(session.current_dir().join("log.txt")).expect("file"),
            "first\nsecond"
        );
    }

    #[test]
    fn test_count_after_write() {
        let (executor, mut session, _tmp) = setup();

        fs::write(session.current_dir().join("stats.txt"), "one two thr\nfour five s")
            .expect("fixture");
        let output =
            run(&executor, &mut session, "read", &["-count", "", "stats.txt"]).expect("count");

        assert!(output.contains("Lines: 2"));
        assert!(output.contains("Words: 6"));
        assert!(output.contains("Characters: 22"));
    }

    #[test]
    fn test_error_display_is_never_empty() {
        let errors = vec![
            CommandError::NotFound("file 'x' not found".to_string()),
            CommandError::PermissionDenied("reading 'x'".to_string()),
            CommandError::NotADirectory("'x'".to_string()),
            CommandError::NotAFile("'x'".to_string()),
            CommandError::InvalidArgument("line numbers must be integers".to_string()),
            CommandError::Decode("binary".to_string()),
            CommandError::Usage("Usage: read"),
            CommandError::Io(io::Error::new(io::ErrorKind::NotFound, "io")),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
