use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use super::{signal, ProcessError};

/// Runs an external program synchronously with captured stdout/stderr. The
/// whole shell blocks until the child exits; no timeout is enforced.
#[derive(Clone, Debug, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }

    pub fn run_captured(
        &self,
        program: &Path,
        args: &[OsString],
        cwd: &Path,
    ) -> Result<Output, ProcessError> {
        // The child owns the terminal until it exits; SIGINT goes to it.
        signal::setup_signal_handlers()?;

        Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ProcessError::LaunchFailed(program.display().to_string())
                } else {
                    e.into()
                }
            })
    }
}
