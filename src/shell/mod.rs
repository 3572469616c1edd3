use rustyline::{config::Configurer, history::FileHistory, Editor};

mod executor;

use crate::{
    core::{commands::CommandExecutor, session::Session},
    error::ShellError,
    flags::Flags,
    highlight::SyntaxHighlighter,
    input::{History, ShellCompleter},
};

use executor::{CommandHandler, CommandOutcome};

pub struct Shell {
    pub(crate) editor: Editor<ShellCompleter, FileHistory>,
    pub(crate) session: Session,
    pub(crate) history: History,
    pub(crate) flags: Flags,
    pub(crate) executor: CommandExecutor,
    pub(crate) highlighter: SyntaxHighlighter,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let completer = ShellCompleter::new();
        let mut editor = Editor::<ShellCompleter, FileHistory>::new()?;

        editor.set_helper(Some(completer));
        editor.set_auto_add_history(true);

        let session = Session::new()?;
        let executor = CommandExecutor::new();

        let history_file = dirs::home_dir()
            .ok_or(ShellError::HomeDirNotFound)?
            .join(".guyos_history");
        let history = History::new(history_file, 1000)?;

        ctrlc::set_handler(move || {
            println!("\nUse 'exit' to quit guyOS");
        })?;

        Ok(Shell {
            editor,
            session,
            history,
            flags,
            executor,
            highlighter: SyntaxHighlighter::new(),
        })
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        if !self.flags.is_set("quiet") {
            self.print_banner();
        }

        loop {
            let prompt = format!("guyOS:{}$ ", self.session.current_dir().display());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if let Err(e) = self.history.add(&line) {
                        if !self.flags.is_set("quiet") {
                            eprintln!("Warning: Couldn't add to history: {}", e);
                        }
                    }

                    match self.execute_command(&line)? {
                        CommandOutcome::Continue => {}
                        CommandOutcome::Exit => {
                            println!("Goodbye from guyOS!");
                            break;
                        }
                    }
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    // Interrupt at the prompt redisplays it, nothing more.
                    continue;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("Goodbye");
                    break;
                }
                Err(e) => {
                    if !self.flags.is_set("quiet") {
                        eprintln!("Error: {}", e);
                    }
                    continue;
                }
            }
        }
        Ok(())
    }

    fn print_banner(&self) {
        println!("{}", "=".repeat(50));
        println!("Welcome to guyOS!");
        println!("{}", "=".repeat(50));
        println!("Type 'help' for available commands or 'exit' to quit.");
        println!("All commands work with your computer's real file system!");
        println!();
    }
}
