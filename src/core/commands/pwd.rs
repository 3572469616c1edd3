use super::{Command, CommandError};
use crate::core::session::Session;

#[derive(Clone)]
pub struct PwdCommand;

impl Default for PwdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl PwdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for PwdCommand {
    fn execute(&self, session: &mut Session, _args: &[String]) -> Result<String, CommandError> {
        Ok(format!(
            "Current directory: {}",
            session.current_dir().display()
        ))
    }
}
