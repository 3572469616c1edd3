use rustyline::completion::Pair;

use crate::core::commands::COMMAND_NAMES;

/// Completes the first word of a line against the fixed builtin set. There
/// is no external-command lookup; everything this shell runs is builtin.
#[derive(Clone, Default)]
pub struct CommandCompleter;

impl CommandCompleter {
    pub fn new() -> Self {
        Self
    }

    pub fn complete_command(&self, input: &str) -> Vec<Pair> {
        let input = input.trim();
        COMMAND_NAMES
            .iter()
            .filter(|cmd| cmd.starts_with(input))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_match() {
        let completer = CommandCompleter::new();
        let matches = completer.complete_command("re");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].display, "read");
    }

    #[test]
    fn test_empty_prefix_lists_everything() {
        let completer = CommandCompleter::new();
        assert_eq!(
            completer.complete_command("").len(),
            COMMAND_NAMES.len()
        );
    }
}
