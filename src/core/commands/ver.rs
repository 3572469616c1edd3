use super::{Command, CommandError};
use crate::core::session::Session;

#[derive(Clone)]
pub struct VerCommand;

impl Default for VerCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl VerCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for VerCommand {
    fn execute(&self, _session: &mut Session, _args: &[String]) -> Result<String, CommandError> {
        Ok(format!(
            "guyOS Version {}\nCopyright (c) 2024 Guy Industries\nMock Operating System",
            env!("CARGO_PKG_VERSION")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ver_includes_crate_version() {
        let tmp = tempdir().unwrap();
        let mut session = Session::at(tmp.path()).unwrap();

        let output = VerCommand::new().execute(&mut session, &[]).unwrap();
        assert!(output.contains(env!("CARGO_PKG_VERSION")));
        assert!(output.contains("Guy Industries"));
    }
}
