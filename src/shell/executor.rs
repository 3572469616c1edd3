use crate::error::ShellError;

pub(crate) enum CommandOutcome {
    Continue,
    Exit,
}

pub(crate) trait CommandHandler {
    fn execute_command(&mut self, line: &str) -> Result<CommandOutcome, ShellError>;
}

impl CommandHandler for super::Shell {
    fn execute_command(&mut self, line: &str) -> Result<CommandOutcome, ShellError> {
        // Command word is case-insensitive, arguments are not.
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return Ok(CommandOutcome::Continue);
        };
        let args: Vec<String> = parts.map(str::to_string).collect();

        if command.to_lowercase() == "exit" {
            return Ok(CommandOutcome::Exit);
        }

        if self.flags.is_set("debug") {
            eprintln!("guyos: dispatching '{}' with {} arg(s)", command, args.len());
        }

        // Handler failures become printed text; they never end the session.
        match self.executor.execute(&mut self.session, command, &args) {
            Ok(output) => println!("{}\n", output),
            Err(e) => println!("{}\n", self.highlighter.highlight_error(&e.to_string())),
        }

        Ok(CommandOutcome::Continue)
    }
}
