use super::{Command, CommandError};
use crate::core::session::Session;

const HELP_TEXT: &str = "guyOS Commands:
===============

ls                          - List directory contents
cd {directory}              - Change directory (use '..' for parent directory)
read {directory} {filename} - Read a file (directory can be empty for current dir)
read -lines {directory} {filename} {start} {end} - Read specific lines from file
read -tail {directory} {filename} {lines} - Read last N lines from file
read -head {directory} {filename} {lines} - Read first N lines from file
read -count {directory} {filename} - Show file statistics (lines, words, characters)
write {directory} {filename} {content} - Write to a file (overwrites existing)
write -add {directory} {filename} {content} - Add content to a file on new line
write -line {directory} {filename} {line_number} {content} - Replace specific line
write -replace {directory} {filename} {old_text} {new_text} - Replace text in file
write -insert {directory} {filename} {line_number} {content} - Insert line at position
guython {script_file.gy/.guy} [args] - Execute Guython script file (.gy or .guy)
guython -c \"code\"           - Execute Guython code directly
ver                         - Show version information
help                        - Show this help message
pwd                         - Show current directory
exit                        - Exit guyOS";

#[derive(Clone)]
pub struct HelpCommand;

impl Default for HelpCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for HelpCommand {
    fn execute(&self, _session: &mut Session, _args: &[String]) -> Result<String, CommandError> {
        Ok(HELP_TEXT.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::COMMAND_NAMES;
    use tempfile::tempdir;

    #[test]
    fn test_help_mentions_every_command() {
        let tmp = tempdir().unwrap();
        let mut session = Session::at(tmp.path()).unwrap();

        let output = HelpCommand::new().execute(&mut session, &[]).unwrap();
        for name in COMMAND_NAMES {
            assert!(output.contains(name), "help is missing '{}'", name);
        }
    }
}
